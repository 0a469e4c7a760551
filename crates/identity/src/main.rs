use std::ffi::OsString;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use msg_identity::{IdentityEngine, KeyStore, Message, encoding::write_record};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Sign a message with a P-256 key pair that stays stable per message.
///
/// Keys are kept as `id_<hash>` / `id_<hash>.pub` in the working directory.
#[derive(Debug, Parser)]
#[command(disable_help_flag = true, disable_version_flag = true)]
struct Args {
    /// Message to sign (1 to 250 bytes), taken verbatim even if it looks like a flag.
    #[arg(allow_hyphen_values = true)]
    message: Message,
}

/// Parse `argv` (binary name first) so that every user argument is message text.
fn parse_args<I, T>(argv: I) -> Result<Args, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut argv = argv.into_iter().map(Into::into);
    let bin = argv.next().unwrap_or_else(|| OsString::from("msg-identity"));
    // after an escape clap stops looking for options, so "--help" or "--" is the message itself
    let escaped = std::iter::once(bin)
        .chain(std::iter::once(OsString::from("--")))
        .chain(argv);
    Args::try_parse_from(escaped)
}

fn main() -> ExitCode {
    let args = parse_args(std::env::args_os()).unwrap_or_else(|e| e.exit());

    // stdout is reserved for the JSON record
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match run(&args.message) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("failed to generate keys: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(message: &Message) -> Result<()> {
    let engine = IdentityEngine::new(KeyStore::current_dir());
    let identity = engine.process(message).context("processing message")?;
    write_record(std::io::stdout().lock(), &identity.record).context("writing output")?;
    Ok(())
}
