//! Console rendering for the binaries: status lines, failure reports and the submission banner.
//!
//! Status lines go to stdout for the operator. Logging is separate and goes
//! to stderr through `tracing`.

use colored::Colorize;
use tracing_subscriber::EnvFilter;

use crate::error::Error;
use crate::proof::Proof;

const RULE_WIDTH: usize = 50;

/// A completed step, e.g. `✅ Signed commit hash with Student Private Key`.
pub fn success_line(message: &str) -> String {
    format!("{} {}", "✅", message)
}

/// A progress note printed before a slow step.
pub fn progress_line(message: &str) -> String {
    format!("{} {}", "🔹", message.bold())
}

/// A failure: what failed (with the file or command), then the remedy.
pub fn failure_lines(err: &Error) -> String {
    format!(
        "{} {}\n   {}",
        "❌",
        err.to_string().red().bold(),
        err.remedy()
    )
}

/// The block the operator copies into the submission form.
///
/// Kept free of color codes so it pastes cleanly.
pub fn submission_banner(proof: &Proof) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    let mut output = String::new();

    output.push('\n');
    output.push_str(&format!("{}\n", rule));
    output.push_str("📜 SUBMISSION DATA (COPY THESE EXACTLY)\n");
    output.push_str(&format!("{}\n", rule));
    output.push_str(&format!("\n1. Commit Hash:\n{}\n", proof.revision));
    output.push_str(&format!(
        "\n2. Encrypted Commit Signature (One Line):\n{}\n",
        proof.artifact
    ));
    output.push('\n');
    output.push_str(&rule);

    output
}

/// Install the stderr `tracing` subscriber. `RUST_LOG` overrides the default level.
pub fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
