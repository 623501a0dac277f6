use anyhow::{Context, Result};
use std::{env, io, path::PathBuf, process};
use tfplan_tidy_config::{Config, Reduction as ConfigReduction};
use tfplan_tidy_engine::{Reduction, RenderOptions, StreamOptions, Transducer};

fn main() -> Result<()> {
    // Logs go to stderr so they never mix with the plan on stdout
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Warn)
        .parse_default_env()
        .init();

    // Settings come from an explicit config path or the default location
    let args: Vec<String> = env::args().collect();
    let config = if args.len() == 2 {
        let requested = PathBuf::from(&args[1]);
        let path = Config::expand_path(&requested).unwrap_or(requested);
        match Config::load_from_path(&path) {
            Ok(Some(config)) => config,
            Ok(None) => {
                eprintln!("Error: Config file '{}' does not exist", path.display());
                eprintln!("Usage: {} [config-file-path]", args[0]);
                process::exit(1);
            }
            Err(e) => {
                eprintln!("Error: {e}");
                process::exit(1);
            }
        }
    } else if args.len() == 1 {
        match Config::load() {
            Ok(Some(config)) => config,
            Ok(None) => {
                log::debug!(
                    "No config file at {}, using defaults",
                    Config::config_path().display()
                );
                Config::default()
            }
            Err(e) => {
                eprintln!("Error: {e}");
                eprintln!(
                    "Fix or remove the config file at {}",
                    Config::config_path().display()
                );
                process::exit(1);
            }
        }
    } else {
        eprintln!("Usage: {} [config-file-path]", args[0]);
        eprintln!("Reads terraform output on stdin and writes it to stdout");
        process::exit(1);
    };

    log::debug!("Using {config:?}");

    let stdin = io::stdin();
    let stdout = io::stdout();
    let summary = Transducer::new(stream_options(&config))
        .run(stdin.lock(), stdout.lock())
        .context("Failed to process terraform output")?;

    log::info!(
        "Processed {} lines, {} sections, cancelled {} pairs",
        summary.lines,
        summary.sections,
        summary.cancelled_pairs
    );
    Ok(())
}

fn stream_options(config: &Config) -> StreamOptions {
    StreamOptions {
        minimize: config.minimize,
        reduction: match config.reduction {
            ConfigReduction::SinglePass => Reduction::SinglePass,
            ConfigReduction::FixedPoint => Reduction::FixedPoint,
        },
        render: RenderOptions {
            restore_trailing_null: config.restore_trailing_null,
        },
        skip_drift_reconstruction: config.skip_drift_reconstruction,
    }
}
