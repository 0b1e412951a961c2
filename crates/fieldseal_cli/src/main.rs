//! fieldseal CLI
//!
//! Operator tools for fieldseal.
//!
//! # Commands
//!
//! - `gen-key` - Generate a fresh 64-hex-character encryption key
//! - `encrypt` - Encrypt one value into an envelope
//! - `decrypt` - Decrypt one stored value
//! - `blind-index` - Compute the blind index of a value
//! - `inspect` - Show what a stored value is and whether it decrypts
//! - `lookup` - Print the lookup filter for a searchable value

mod commands;
mod config;

use clap::{Parser, Subcommand, ValueEnum};
use config::{KeyConfig, KEY_ENV};
use tracing_subscriber::EnvFilter;

/// fieldseal command-line tools.
#[derive(Parser)]
#[command(name = "fieldseal")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Hex-encoded 32-byte encryption key
    #[arg(global = true, short, long, env = KEY_ENV, hide_env_values = true)]
    key: Option<String>,

    /// Continue without a key when the supplied one is invalid
    #[arg(global = true, long)]
    allow_unconfigured: bool,

    /// Output format
    #[arg(global = true, short, long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Enable verbose output
    #[arg(global = true, short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// Human-readable text
    Text,
    /// JSON
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a fresh encryption key
    GenKey,

    /// Encrypt a value
    Encrypt {
        /// Plaintext to encrypt
        value: String,
    },

    /// Decrypt a stored value
    Decrypt {
        /// Stored value (envelope or legacy plaintext)
        value: String,
    },

    /// Compute the blind index of a value
    BlindIndex {
        /// Value to index
        value: String,

        /// Use the unkeyed variant regardless of key configuration
        #[arg(long)]
        plain: bool,
    },

    /// Show whether a stored value is an envelope and whether it decrypts
    Inspect {
        /// Stored value
        value: String,
    },

    /// Print the multi-variant lookup filter for a value
    Lookup {
        /// Value to look up, e.g. an email address
        value: String,

        /// Field holding the blind index
        #[arg(long, default_value = "emailHash")]
        hash_field: String,

        /// Field holding the unkeyed blind index
        #[arg(long, default_value = "emailHashPlain")]
        plain_hash_field: String,

        /// Field holding the normalized plaintext
        #[arg(long, default_value = "emailLookup")]
        lookup_field: String,

        /// Legacy plaintext field
        #[arg(long, default_value = "email")]
        legacy_field: String,
    },

    /// Show version information
    Version,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let keys = KeyConfig::new(cli.key, cli.allow_unconfigured);
    let format = cli.format;

    match cli.command {
        Commands::GenKey => commands::keygen::run(format)?,
        Commands::Encrypt { value } => {
            let crypto = keys.load_required()?;
            commands::field::encrypt(&crypto, &value, format)?;
        }
        Commands::Decrypt { value } => {
            let crypto = keys.load()?;
            commands::field::decrypt(&crypto, &value, format)?;
        }
        Commands::BlindIndex { value, plain } => {
            let crypto = keys.load()?;
            commands::index::run(&crypto, &value, plain, format)?;
        }
        Commands::Inspect { value } => {
            let crypto = keys.load()?;
            commands::inspect::run(&crypto, &value, format)?;
        }
        Commands::Lookup {
            value,
            hash_field,
            plain_hash_field,
            lookup_field,
            legacy_field,
        } => {
            let crypto = keys.load()?;
            let field = fieldseal_core::IndexedField::new(hash_field)
                .plain_hash_field(plain_hash_field)
                .lookup_field(lookup_field)
                .legacy_field(legacy_field);
            commands::lookup::run(&crypto, &field, &value, format)?;
        }
        Commands::Version => {
            println!("fieldseal CLI v{}", env!("CARGO_PKG_VERSION"));
            println!("fieldseal core v{}", fieldseal_core::VERSION);
        }
    }

    Ok(())
}
