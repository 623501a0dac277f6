// Benchmark helper functions - Rust's dead code analysis doesn't understand
// that these are used by benchmark files in the same directory
// See: https://users.rust-lang.org/t/cargo-rustc-benches-awarnings/110111/2
#[allow(dead_code)]
pub fn generate_plan_section(resources: usize) -> Vec<String> {
    let mut lines = Vec::new();

    for i in 0..resources {
        lines.push(String::new());
        lines.push(format!("  # aws_security_group.sg{i} will be updated in-place"));
        lines.push(marked(2, 33, '~', &format!("resource \"aws_security_group\" \"sg{i}\" {{")));
        lines.push(format!("        id   = \"sg-{i:04}\""));
        lines.push(marked(6, 33, '~', "tags = {"));
        lines.push(marked(10, 31, '-', &format!("\"Build\" = \"{i}\"")));
        lines.push(marked(10, 32, '+', &format!("\"Build\" = \"{}\"", i + 1)));
        lines.push("        }".to_string());
        for (color, op) in [(31, '-'), (32, '+')] {
            lines.push(marked(6, color, op, "ingress {"));
            lines.push(marked(10, color, op, "from_port = 443"));
            lines.push(marked(10, color, op, "to_port   = 443"));
            lines.push("        }".to_string());
        }
        lines.push("    }".to_string());
    }

    lines.push(String::new());
    lines.push(format!("Plan: 0 to add, {resources} to change, 0 to destroy."));
    lines
}

#[allow(dead_code)]
pub fn generate_deep_nesting(depth: usize) -> Vec<String> {
    let mut lines = Vec::with_capacity(depth * 2);
    for level in 0..depth {
        lines.push(marked(level % 40, 33, '~', &format!("level{level} {{")));
    }
    for level in (0..depth).rev() {
        lines.push(format!("{}}}", " ".repeat(level % 40)));
    }
    lines
}

fn marked(indent: usize, color: u8, op: char, text: &str) -> String {
    format!("{}\x1b[{color}m{op}\x1b[0m {text}", " ".repeat(indent))
}
