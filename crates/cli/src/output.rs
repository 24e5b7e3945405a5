//! Result rendering shared by the replay commands.

use console::style;

/// How a command prints its result.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable summary
    #[default]
    Text,
    /// Full JSON result with the final state fingerprint
    Json,
}

pub fn fingerprint_hex(digest: [u8; 32]) -> String {
    hex::encode(digest)
}

pub fn verdict(success: bool) -> String {
    if success {
        style("SUCCESS").bold().green().to_string()
    } else {
        style("FAILED").bold().red().to_string()
    }
}

pub fn label(text: &str) -> String {
    style(text).bold().cyan().to_string()
}

pub fn check(met: bool) -> String {
    if met {
        style("yes").green().to_string()
    } else {
        style("no").red().to_string()
    }
}

/// Prints sandbox console lines and the sandbox error, if any.
pub fn print_sandbox(console_output: &[String], error: Option<&str>) {
    for line in console_output {
        println!("{} {}", style("console>").dim(), line);
    }
    if let Some(error) = error {
        println!("{} {}", style("Sandbox error:").bold().yellow(), error);
    }
}
