//! Key generation tool for commit proofs

use std::path::PathBuf;
use std::process;

use clap::Parser;

use commitproof::config::{KeyGenConfig, STUDENT_PRIVATE_KEY, STUDENT_PUBLIC_KEY};
use commitproof::crypto::{self, DEFAULT_KEY_BITS};
use commitproof::error::Error;
use commitproof::keygen;
use commitproof::output;

/// Generate the student RSA key pair. Existing files are overwritten.
#[derive(Parser, Debug)]
#[command(name = "commitproof-keygen", version)]
struct Cli {
    /// RSA modulus size in bits.
    #[arg(long, default_value_t = DEFAULT_KEY_BITS as u64, value_parser = clap::value_parser!(u64).range(2048..=16384))]
    bits: u64,

    /// Where to write the private key (PKCS#8 PEM, unencrypted).
    #[arg(long, default_value = STUDENT_PRIVATE_KEY)]
    private_out: PathBuf,

    /// Where to write the public key (SubjectPublicKeyInfo PEM).
    #[arg(long, default_value = STUDENT_PUBLIC_KEY)]
    public_out: PathBuf,

    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();
    output::init_logging(cli.verbose);

    if let Err(err) = run(cli) {
        eprintln!("{}", output::failure_lines(&err));
        process::exit(err.exit_code());
    }
}

fn run(cli: Cli) -> Result<(), Error> {
    let config = KeyGenConfig {
        bits: cli.bits as usize,
        private_key_path: cli.private_out,
        public_key_path: cli.public_out,
    };

    println!(
        "Generating {}-bit RSA key pair... this may take a moment.",
        config.bits
    );
    let key_pair = keygen::generate_and_save(&config)?;

    println!(
        "{}",
        output::success_line(&format!("Saved {}", config.private_key_path.display()))
    );
    println!(
        "{}",
        output::success_line(&format!("Saved {}", config.public_key_path.display()))
    );

    let key_id = crypto::calculate_key_id_from_pem(&key_pair.public_key_pem)?;
    println!("Key ID: {}", key_id);
    Ok(())
}
