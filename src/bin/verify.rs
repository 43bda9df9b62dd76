//! Open and verify a submitted commit proof.

use std::path::PathBuf;
use std::process;

use clap::Parser;
use colored::Colorize;

use commitproof::config::{INSTRUCTOR_PRIVATE_KEY, STUDENT_PUBLIC_KEY};
use commitproof::error::{Error, KeyRole};
use commitproof::output;
use commitproof::proof::{read_private_key, read_public_key};
use commitproof::revision::Revision;
use commitproof::verify::verify_proof;

/// Decrypt a proof with the instructor key and check it against a student key.
#[derive(Parser, Debug)]
#[command(name = "commitproof-verify", version)]
struct Cli {
    /// The base64 proof, exactly as submitted.
    #[arg(long)]
    proof: String,

    /// The 40-character commit hash the proof claims.
    #[arg(long)]
    revision: String,

    /// Instructor private key (PEM).
    #[arg(long, default_value = INSTRUCTOR_PRIVATE_KEY)]
    verifier_private_key: PathBuf,

    /// Student public key (PEM).
    #[arg(long, default_value = STUDENT_PUBLIC_KEY)]
    signer_public_key: PathBuf,

    /// Print the result as JSON.
    #[arg(long)]
    json: bool,

    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();
    output::init_logging(cli.verbose);

    match run(&cli) {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(err) => {
            eprintln!("{}", output::failure_lines(&err));
            process::exit(err.exit_code());
        }
    }
}

fn run(cli: &Cli) -> Result<bool, Error> {
    let revision = Revision::parse(&cli.revision)?;
    let verifier = read_private_key(&cli.verifier_private_key, KeyRole::VerifierPrivate)?;
    let signer = read_public_key(&cli.signer_public_key, KeyRole::SignerPublic)?;

    let result = verify_proof(&cli.proof, &revision, &verifier, &signer);

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else if result.valid {
        println!(
            "{}",
            output::success_line(&format!("Proof valid for commit {}", result.revision))
        );
        if let Some(key_id) = &result.signer_key_id {
            println!("   Signer key: {}", key_id);
        }
    } else {
        let code = result
            .error_code
            .map(|c| c.to_string())
            .unwrap_or_default();
        println!(
            "{} {} {}",
            "❌",
            code.red().bold(),
            result.error_message.as_deref().unwrap_or_default()
        );
    }

    Ok(result.valid)
}
