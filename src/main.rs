//! field-crypt - encrypt and decrypt individual field values.
//!
//! Values are read from `--data`, `--input` or stdin. Ciphertext is printed as
//! base64 (the same text the library's string encryptor produces) or hex.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use clap::{Parser, Subcommand, ValueEnum};
use field_crypt::config::{NEW_SECRET_ENV, SECRET_ENV};
use field_crypt::crypto::inspect;
use field_crypt::{BytesEncryptor, CipherMode, Error, Result, Secret};
use std::io::{self, Read, Write};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "field-crypt")]
#[command(author, version, about, long_about = None)]
#[command(
    about = "Field-level encryption with AES-256-GCM or AES-256-CBC",
    long_about = "Encrypts single values with a key derived from a passphrase. The passphrase is read from FIELD_CRYPT_SECRET or prompted for."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Printable encoding for ciphertext.
#[derive(Clone, Copy, Debug, ValueEnum)]
enum Encoding {
    Base64,
    Hex,
}

#[derive(clap::Args)]
struct ValueSource {
    /// Input file
    #[arg(long, conflicts_with = "data")]
    input: Option<PathBuf>,

    /// Value given inline
    #[arg(long, conflicts_with = "input")]
    data: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Encrypt a value
    Encrypt {
        #[command(flatten)]
        source: ValueSource,

        /// Cipher mode
        #[arg(long, default_value = "gcm")]
        mode: CipherMode,

        /// Ciphertext encoding
        #[arg(long, value_enum, default_value = "base64")]
        format: Encoding,

        /// Output file (default: stdout)
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Decrypt a value
    Decrypt {
        #[command(flatten)]
        source: ValueSource,

        /// Cipher mode the value was encrypted with
        #[arg(long, default_value = "gcm")]
        mode: CipherMode,

        /// Ciphertext encoding
        #[arg(long, value_enum, default_value = "base64")]
        format: Encoding,

        /// Output file (default: stdout)
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Report whether a value is encrypted, as JSON
    Check {
        #[command(flatten)]
        source: ValueSource,

        /// Ciphertext encoding
        #[arg(long, value_enum, default_value = "base64")]
        format: Encoding,
    },

    /// Re-encrypt a value under a new secret and/or mode
    Rekey {
        #[command(flatten)]
        source: ValueSource,

        /// Mode the value is currently encrypted with
        #[arg(long, default_value = "gcm")]
        from_mode: CipherMode,

        /// Mode to re-encrypt with
        #[arg(long, default_value = "gcm")]
        to_mode: CipherMode,

        /// Ciphertext encoding
        #[arg(long, value_enum, default_value = "base64")]
        format: Encoding,
    },
}

fn main() {
    init_logging();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Encrypt {
            source,
            mode,
            format,
            output,
        } => cmd_encrypt(source, mode, format, output),

        Commands::Decrypt {
            source,
            mode,
            format,
            output,
        } => cmd_decrypt(source, mode, format, output),

        Commands::Check { source, format } => cmd_check(source, format),

        Commands::Rekey {
            source,
            from_mode,
            to_mode,
            format,
        } => cmd_rekey(source, from_mode, to_mode, format),
    }
}

fn read_secret(env_var: &str, prompt: &str) -> Result<Secret> {
    if let Ok(secret) = std::env::var(env_var) {
        return Ok(Secret::new(secret));
    }

    let secret = rpassword::prompt_password(prompt)?;
    Ok(Secret::new(secret))
}

fn read_value(source: ValueSource) -> Result<Vec<u8>> {
    let value = match (source.input, source.data) {
        (Some(path), None) => std::fs::read(&path)?,
        (None, Some(s)) => s.into_bytes(),
        (None, None) => {
            let mut buffer = Vec::new();
            io::stdin().read_to_end(&mut buffer)?;
            buffer
        }
        (Some(_), Some(_)) => unreachable!(),
    };
    Ok(value)
}

fn encode(format: Encoding, bytes: &[u8]) -> String {
    match format {
        Encoding::Base64 => STANDARD.encode(bytes),
        Encoding::Hex => hex::encode(bytes),
    }
}

fn decode(format: Encoding, raw: &[u8]) -> Result<Vec<u8>> {
    let text = std::str::from_utf8(raw)
        .map_err(|_| Error::Format("encoded input is not text".to_string()))?
        .trim();

    match format {
        Encoding::Base64 => Ok(STANDARD.decode(text)?),
        Encoding::Hex => Ok(hex::decode(text)?),
    }
}

fn write_output(output: Option<PathBuf>, data: &[u8]) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(&path, data)?;
            info!(bytes = data.len(), path = %path.display(), "wrote output");
        }
        None => {
            let mut stdout = io::stdout();
            stdout.write_all(data)?;
            stdout.flush()?;
        }
    }
    Ok(())
}

fn cmd_encrypt(
    source: ValueSource,
    mode: CipherMode,
    format: Encoding,
    output: Option<PathBuf>,
) -> Result<()> {
    let plaintext = read_value(source)?;
    let encryptor = BytesEncryptor::new(mode, read_secret(SECRET_ENV, "Secret: ")?)?;

    let framed = encryptor.encrypt(&plaintext)?;
    let mut encoded = encode(format, &framed);
    encoded.push('\n');

    write_output(output, encoded.as_bytes())
}

fn cmd_decrypt(
    source: ValueSource,
    mode: CipherMode,
    format: Encoding,
    output: Option<PathBuf>,
) -> Result<()> {
    let framed = decode(format, &read_value(source)?)?;
    let encryptor = BytesEncryptor::new(mode, read_secret(SECRET_ENV, "Secret: ")?)?;

    let plaintext = encryptor.decrypt(&framed)?;
    write_output(output, &plaintext)
}

fn cmd_check(source: ValueSource, format: Encoding) -> Result<()> {
    let raw = read_value(source)?;
    let value = decode(format, &raw).unwrap_or(raw);

    println!("{}", serde_json::to_string_pretty(&inspect(&value))?);
    Ok(())
}

fn cmd_rekey(
    source: ValueSource,
    from_mode: CipherMode,
    to_mode: CipherMode,
    format: Encoding,
) -> Result<()> {
    let framed = decode(format, &read_value(source)?)?;

    let current = BytesEncryptor::new(from_mode, read_secret(SECRET_ENV, "Current secret: ")?)?;
    let target = BytesEncryptor::new(to_mode, read_secret(NEW_SECRET_ENV, "New secret: ")?)?;

    let migrated = current.reencrypt(&framed, &target)?;
    info!(%from_mode, %to_mode, "value re-encrypted");

    println!("{}", encode(format, &migrated));
    Ok(())
}
