//! em-token: mint and inspect signed tokens
//!
//! Operators use this to check a cookie copied from a browser, or to mint
//! one for a staging deployment. Defaults (salt, timestamp alphabet) are the
//! SSO provider's; `--alphabet lowercase-first` reproduces the reference
//! vectors of the signing crate instead.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use em_signing::{
    Base62Alphabet, FixedTimeSource, SecretKey, Signer, SigningService, SystemTimeSource,
    TimeSource, TokenSigningApi,
};
use em_sso::config::{DEFAULT_COOKIE_NAME, ENV_SECRET};
use tracing::{debug, info};

/// em-token: sign and verify SSO-compatible tokens
#[derive(Parser, Debug)]
#[command(name = "em-token")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Shared secret
    #[arg(long, env = ENV_SECRET, hide_env_values = true)]
    pub secret: String,

    /// Signing salt (the provider uses the cookie name)
    #[arg(long, default_value = DEFAULT_COOKIE_NAME)]
    pub salt: String,

    /// Separator between value, timestamp and signature
    #[arg(long, default_value_t = em_signing::DEFAULT_SEPARATOR)]
    pub separator: char,

    /// Pin the clock to this Unix time instead of reading the system clock
    #[arg(long)]
    pub now: Option<u64>,

    /// Base62 ordering for timestamps (the provider uses uppercase-first)
    #[arg(long, value_enum, default_value_t = AlphabetArg::UppercaseFirst)]
    pub alphabet: AlphabetArg,

    #[command(subcommand)]
    pub command: Command,
}

/// Base62 ordering flag.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum AlphabetArg {
    /// 0-9, a-z, A-Z
    LowercaseFirst,
    /// 0-9, A-Z, a-z
    UppercaseFirst,
}

impl From<AlphabetArg> for Base62Alphabet {
    fn from(arg: AlphabetArg) -> Self {
        match arg {
            AlphabetArg::LowercaseFirst => Base62Alphabet::LowercaseFirst,
            AlphabetArg::UppercaseFirst => Base62Alphabet::UppercaseFirst,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    // === Plain ===
    /// Sign a string: value:signature
    Sign {
        /// Value to sign
        value: String,
    },

    /// Verify value:signature and print the value
    Unsign {
        /// Signed token
        signed: String,
    },

    // === Timestamped ===
    /// Sign a string with the current time: value:ts:signature
    SignTimestamped {
        /// Value to sign
        value: String,
    },

    /// Verify value:ts:signature and print the value
    UnsignTimestamped {
        /// Signed token
        signed: String,

        /// Reject tokens older than this many seconds
        #[arg(long)]
        max_age: Option<u64>,
    },

    // === JSON ===
    /// Sign a JSON document: "payload:ts:signature"
    SignJson {
        /// JSON document
        json: String,
    },

    /// Verify a quoted JSON token and print the document
    UnsignJson {
        /// Signed token, quotes included
        signed: String,

        /// Reject tokens older than this many seconds
        #[arg(long)]
        max_age: Option<u64>,
    },
}

/// Execute `cli` and return what should be printed.
pub fn run(cli: &Cli) -> Result<String> {
    if cli.secret.is_empty() {
        bail!("secret must not be empty");
    }

    let signer = Signer::new(SecretKey::from(cli.secret.as_str()), cli.salt.as_str())
        .with_separator(cli.separator)
        .context("invalid separator")?;

    match cli.now {
        Some(now) => {
            debug!(now, "Using pinned clock");
            execute(&cli.command, signer, FixedTimeSource::new(now), cli.alphabet)
        }
        None => execute(&cli.command, signer, SystemTimeSource, cli.alphabet),
    }
}

fn execute<T: TimeSource>(
    command: &Command,
    signer: Signer,
    clock: T,
    alphabet: AlphabetArg,
) -> Result<String> {
    let service = SigningService::with_clock(signer, clock).with_alphabet(alphabet.into());

    let output = match command {
        Command::Sign { value } => service.sign_value(value),
        Command::Unsign { signed } => service
            .unsign_value(signed)
            .context("token did not verify")?,
        Command::SignTimestamped { value } => service.sign_timestamped(value),
        Command::UnsignTimestamped { signed, max_age } => service
            .unsign_timestamped(signed, *max_age)
            .context("token did not verify")?,
        Command::SignJson { json } => {
            let value: serde_json::Value =
                serde_json::from_str(json).context("argument is not valid JSON")?;
            service.sign_json(&value)?
        }
        Command::UnsignJson { signed, max_age } => {
            let value = service
                .unsign_json(signed, *max_age)
                .context("token did not verify")?;
            serde_json::to_string_pretty(&value)?
        }
    };

    info!(command = command_name(command), "Done");
    Ok(output)
}

fn command_name(command: &Command) -> &'static str {
    match command {
        Command::Sign { .. } => "sign",
        Command::Unsign { .. } => "unsign",
        Command::SignTimestamped { .. } => "sign-timestamped",
        Command::UnsignTimestamped { .. } => "unsign-timestamped",
        Command::SignJson { .. } => "sign-json",
        Command::UnsignJson { .. } => "unsign-json",
    }
}
