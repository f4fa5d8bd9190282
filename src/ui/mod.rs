//! Terminal status output.
//!
//! Status lines go to stderr so they never mix with a graph printed on stdout.

use owo_colors::OwoColorize;
use std::io::IsTerminal;
use std::path::Path;

/// Check if stderr is a terminal.
pub fn is_terminal() -> bool {
    std::io::stderr().is_terminal()
}

/// Plain summary of a written graph.
pub fn written_summary(nodes: usize, path: &Path) -> String {
    let noun = if nodes == 1 { "node" } else { "nodes" };
    format!("Wrote {} {} to {}", nodes, noun, path.display())
}

/// Report a written graph on stderr, colored, when stderr is a terminal.
pub fn print_written(nodes: usize, path: &Path) {
    if !is_terminal() {
        return;
    }
    eprintln!("{} {}", "✓".green().bold(), written_summary(nodes, path).cyan());
}
