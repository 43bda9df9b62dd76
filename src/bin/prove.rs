//! Generate a proof of authorship for the latest commit.

use std::path::PathBuf;
use std::process;

use clap::Parser;

use commitproof::config::{ProofConfig, INSTRUCTOR_PUBLIC_KEY, STUDENT_PRIVATE_KEY};
use commitproof::error::Error;
use commitproof::output;
use commitproof::proof::{generate_proof, Stage};
use commitproof::revision::GitRevision;

/// Sign the latest commit hash and seal the signature for the instructor.
#[derive(Parser, Debug)]
#[command(name = "commitproof", version)]
struct Cli {
    /// Student private key (PEM).
    #[arg(long, default_value = STUDENT_PRIVATE_KEY)]
    private_key: PathBuf,

    /// Instructor public key (PEM).
    #[arg(long, default_value = INSTRUCTOR_PUBLIC_KEY)]
    verifier_key: PathBuf,

    /// Repository to read the commit from (defaults to the working directory).
    #[arg(long)]
    repo: Option<PathBuf>,

    /// Log each step to stderr.
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();
    output::init_logging(cli.verbose);

    if let Err(err) = run(&cli) {
        eprintln!("{}", output::failure_lines(&err));
        process::exit(err.exit_code());
    }
}

fn run(cli: &Cli) -> Result<(), Error> {
    println!("{}", output::progress_line("Generating Cryptographic Proof..."));

    let mut source = GitRevision::new();
    if let Some(repo) = &cli.repo {
        source = source.in_dir(repo);
    }
    let config = ProofConfig {
        private_key_path: cli.private_key.clone(),
        verifier_public_key_path: cli.verifier_key.clone(),
    };

    let proof = generate_proof(&source, &config, |stage| {
        let message = match stage {
            Stage::RevisionResolved(revision) => format!("Commit Hash: {}", revision),
            Stage::Signed => "Signed commit hash with Student Private Key".to_string(),
            Stage::Encrypted => "Encrypted signature with Instructor Public Key".to_string(),
        };
        println!("{}", output::success_line(&message));
    })?;

    println!("{}", output::submission_banner(&proof));
    Ok(())
}
