//! Command-line interface for `cipherlab`.

#![forbid(unsafe_code)]

mod config;
mod workbench;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{bail, Result};
use cipherlab_core::rsa::{generate_key_pair_with, KeyGenOptions, KeyPair};
use cipherlab_core::{
    aes_ecb, AesEcb, CasePolicy, CipherError, Mode, PrivateKey, PublicKey, RailFence, RailKey,
    TextCipher, ToyRsa, Vigenere,
};
use cipherlab_store::{MemoryStore, RecordStore, SqliteStore};
use clap::{Args, Parser, Subcommand, ValueEnum};
use num_bigint::BigUint;
use rand::{CryptoRng, RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;

use crate::config::Config;
use crate::workbench::{Submitter, Workbench};

/// Classroom cipher workbench.
#[derive(Parser)]
#[command(
    name = "cipherlab",
    version,
    about = "Rail-fence, Vigenère, toy RSA and AES-ECB transforms with submission records"
)]
struct Cli {
    /// Config file (defaults to $CIPHERLAB_CONFIG, then ./cipherlab.toml).
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Record database, overriding the configured path.
    #[arg(long, global = true, value_name = "FILE", conflicts_with = "no_store")]
    db: Option<PathBuf>,
    /// Keep records in memory only for this invocation.
    #[arg(long, global = true, default_value_t = false)]
    no_store: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum ModeArg {
    Encrypt,
    Decrypt,
}

impl From<ModeArg> for Mode {
    fn from(value: ModeArg) -> Self {
        match value {
            ModeArg::Encrypt => Mode::Encrypt,
            ModeArg::Decrypt => Mode::Decrypt,
        }
    }
}

/// Submitter details; a name makes an encryption get recorded.
#[derive(Args)]
struct SubmitterArgs {
    /// Submitter name.
    #[arg(long)]
    name: Option<String>,
    /// Submitter identifier (e.g. student number).
    #[arg(long, requires = "name", default_value = "")]
    id: String,
    /// Submitter category.
    #[arg(long, requires = "name", default_value = "")]
    category: String,
}

impl SubmitterArgs {
    fn into_submitter(self) -> Option<Submitter> {
        self.name.map(|name| Submitter {
            name,
            external_id: self.id,
            category: self.category,
        })
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Rail-fence (zigzag) transposition.
    Rail {
        #[arg(long, value_enum)]
        mode: ModeArg,
        /// Number of rails (at least 1).
        #[arg(long, allow_negative_numbers = true, value_parser = RailKey::parse)]
        key: RailKey,
        text: String,
        #[command(flatten)]
        submitter: SubmitterArgs,
    },
    /// Vigenère substitution.
    Vigenere {
        #[arg(long, value_enum)]
        mode: ModeArg,
        /// Alphabetic key.
        #[arg(long)]
        key: String,
        /// Keep the input's letter case instead of upper-casing.
        #[arg(long, default_value_t = false)]
        preserve_case: bool,
        text: String,
        #[command(flatten)]
        submitter: SubmitterArgs,
    },
    /// AES-256-ECB keyed by SHA-256 of a password; cipher text is base64.
    Aes {
        #[arg(long, value_enum)]
        mode: ModeArg,
        #[arg(long)]
        password: String,
        text: String,
        #[command(flatten)]
        submitter: SubmitterArgs,
    },
    /// Print the AES key derived from a password, as hex.
    DeriveKey {
        #[arg(long)]
        password: String,
    },
    /// Toy RSA over individual characters.
    Rsa {
        #[command(subcommand)]
        command: RsaCommands,
    },
    /// List stored submissions.
    Records {
        /// Emit JSON instead of a table.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

/// Primes and RNG seed for a fresh key pair.
#[derive(Args)]
struct KeyGenArgs {
    /// First prime (defaults to the configured value).
    #[arg(long)]
    p: Option<BigUint>,
    /// Second prime (defaults to the configured value).
    #[arg(long)]
    q: Option<BigUint>,
    /// Optional RNG seed for reproducible exponents.
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Subcommand)]
enum RsaCommands {
    /// Generate and print a key pair.
    Keygen {
        #[command(flatten)]
        primes: KeyGenArgs,
    },
    /// Encrypt text to a bracketed integer list.
    Encrypt {
        /// Public exponent; requires --n. Without it a fresh pair is generated.
        #[arg(long, requires = "n")]
        e: Option<BigUint>,
        /// Modulus for --e.
        #[arg(long, requires = "e")]
        n: Option<BigUint>,
        #[command(flatten)]
        primes: KeyGenArgs,
        text: String,
        #[command(flatten)]
        submitter: SubmitterArgs,
    },
    /// Decrypt a bracketed integer list such as "[12, 300]".
    Decrypt {
        #[arg(long)]
        d: BigUint,
        #[arg(long)]
        n: BigUint,
        cipher: String,
    },
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", describe(&err));
            ExitCode::FAILURE
        }
    }
}

fn describe(err: &anyhow::Error) -> String {
    match err.downcast_ref::<CipherError>() {
        Some(cipher_err) => format!("{}: {}", cipher_err.kind(), cipher_err.message()),
        None => format!("{err:#}"),
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = Config::load(cli.config.as_deref())?;
    let store: Box<dyn RecordStore> = if cli.no_store {
        Box::new(MemoryStore::new())
    } else {
        let path = cli.db.unwrap_or_else(|| config.store.path.clone());
        Box::new(SqliteStore::open(path)?)
    };
    let mut bench = Workbench::new(store);

    match cli.command {
        Commands::Rail {
            mode,
            key,
            text,
            submitter,
        } => cmd_transform(&mut bench, &RailFence::with_key(key), mode, &text, submitter),
        Commands::Vigenere {
            mode,
            key,
            preserve_case,
            text,
            submitter,
        } => {
            let case = if preserve_case {
                CasePolicy::Preserve
            } else {
                CasePolicy::Upper
            };
            let cipher = Vigenere::with_case(&key, case)?;
            cmd_transform(&mut bench, &cipher, mode, &text, submitter)
        }
        Commands::Aes {
            mode,
            password,
            text,
            submitter,
        } => cmd_transform(&mut bench, &AesEcb::new(&password)?, mode, &text, submitter),
        Commands::DeriveKey { password } => {
            let key = aes_ecb::derive_key(&password)?;
            println!("{}", hex::encode(key.as_bytes()));
            Ok(())
        }
        Commands::Rsa { command } => cmd_rsa(&mut bench, &config, command),
        Commands::Records { json } => cmd_records(&bench, json),
    }
}

fn cmd_transform<S: RecordStore>(
    bench: &mut Workbench<S>,
    cipher: &dyn TextCipher,
    mode: ModeArg,
    text: &str,
    submitter: SubmitterArgs,
) -> Result<()> {
    let outcome = bench.run(cipher, mode.into(), text, submitter.into_submitter())?;
    println!("{}", outcome.output);
    if let Some(row_id) = outcome.stored_as {
        eprintln!("stored as record #{row_id}");
    }
    Ok(())
}

fn cmd_rsa<S: RecordStore>(
    bench: &mut Workbench<S>,
    config: &Config,
    command: RsaCommands,
) -> Result<()> {
    match command {
        RsaCommands::Keygen { primes } => {
            let keys = fresh_key_pair(config, primes)?;
            print_key_pair(&keys);
            Ok(())
        }
        RsaCommands::Encrypt {
            e,
            n,
            primes,
            text,
            submitter,
        } => {
            let cipher = match (e, n) {
                (Some(e), Some(n)) => ToyRsa::public_only(PublicKey::new(e, n)?),
                (None, None) => {
                    let keys = fresh_key_pair(config, primes)?;
                    print_key_pair(&keys);
                    ToyRsa::new(keys)
                }
                _ => bail!("--e and --n must be given together"),
            };
            cmd_transform(bench, &cipher, ModeArg::Encrypt, &text, submitter)
        }
        RsaCommands::Decrypt { d, n, cipher } => {
            let rsa = ToyRsa::private_only(PrivateKey::new(d, n)?);
            let outcome = bench.run(&rsa, Mode::Decrypt, &cipher, None)?;
            println!("{}", outcome.output);
            Ok(())
        }
    }
}

fn fresh_key_pair(config: &Config, args: KeyGenArgs) -> Result<KeyPair> {
    let p = args.p.unwrap_or_else(|| BigUint::from(config.rsa.p));
    let q = args.q.unwrap_or_else(|| BigUint::from(config.rsa.q));
    let options = KeyGenOptions {
        max_attempts: config.rsa.max_e_attempts,
    };
    let mut rng = seeded_rng(args.seed);
    Ok(generate_key_pair_with(&mut rng, p, q, &options)?)
}

fn print_key_pair(keys: &KeyPair) {
    eprintln!(
        "public key (e, n) = ({}, {})",
        keys.public.e(),
        keys.public.n()
    );
    eprintln!(
        "private key (d, n) = ({}, {})",
        keys.private.d(),
        keys.private.n()
    );
}

fn cmd_records<S: RecordStore>(bench: &Workbench<S>, json: bool) -> Result<()> {
    let records = bench.records()?;
    if json {
        println!("{}", serde_json::to_string_pretty(&records)?);
        return Ok(());
    }
    for stored in &records {
        let r = &stored.record;
        println!(
            "{:>4}  {}  {:<20} {:<14} {:<3} {:<10} {}",
            stored.row_id,
            stored.created_at.format("%Y-%m-%d %H:%M:%S"),
            r.name,
            r.external_id,
            r.category,
            r.cipher,
            r.output
        );
    }
    Ok(())
}

fn seeded_rng(seed: Option<u64>) -> impl RngCore + CryptoRng {
    match seed {
        Some(value) => ChaCha20Rng::seed_from_u64(value),
        None => {
            let mut seed_bytes = [0u8; 32];
            rand::rngs::OsRng.fill_bytes(&mut seed_bytes);
            ChaCha20Rng::from_seed(seed_bytes)
        }
    }
}
