//! # CLI Interface
//!
//! Defines the command-line argument structure for `stellar-tx` using
//! `clap` derive. Network, Horizon URL and signing secret can all come from
//! the environment so scripts don't have to repeat them.

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::logging::LogFormat;

/// Build, sign, inspect and submit Stellar transactions.
#[derive(Parser, Debug)]
#[command(
    name = "stellar-tx",
    about = "Build, sign, inspect and submit Stellar transactions",
    version,
    propagate_version = true
)]
pub struct StellarTxCli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// `public`, `testnet`, or a custom network passphrase.
    #[arg(long, short = 'n', env = "STELLAR_NETWORK", default_value = "testnet", global = true)]
    pub network: String,

    /// Horizon base URL. Defaults to SDF's instance for public and testnet.
    #[arg(long, env = "STELLAR_HORIZON_URL", global = true)]
    pub horizon_url: Option<String>,

    /// Log output format.
    #[arg(long, value_enum, env = "STELLAR_LOG_FORMAT", default_value_t = LogFormatArg::Pretty, global = true)]
    pub log_format: LogFormatArg,

    /// Default filter when `RUST_LOG` is not set.
    #[arg(long, env = "STELLAR_LOG", default_value = "stellar_tx=info,stellar_sdk=info", global = true)]
    pub log_level: String,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormatArg {
    Pretty,
    Json,
}

impl From<LogFormatArg> for LogFormat {
    fn from(arg: LogFormatArg) -> Self {
        match arg {
            LogFormatArg::Pretty => LogFormat::Pretty,
            LogFormatArg::Json => LogFormat::Json,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate a random keypair.
    Keygen(KeygenArgs),
    /// Build and sign a payment, optionally submitting it.
    Pay(PayArgs),
    /// Print a transaction envelope as JSON.
    Decode(DecodeArgs),
    /// Add a signature to an envelope.
    Sign(SignArgs),
    /// Submit an envelope to Horizon.
    Submit(SubmitArgs),
    /// Show an account's sequence number, thresholds and signers.
    Account(AccountArgs),
    /// Print version information and exit.
    Version,
}

#[derive(Args, Debug)]
pub struct KeygenArgs {
    /// Print the keypair as JSON.
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct PayArgs {
    /// Secret seed (`S...`) of the source account.
    #[arg(long, env = "STELLAR_SECRET", hide_env_values = true)]
    pub secret: String,

    /// Destination address, `G...` or `M...`.
    #[arg(long, short = 'd')]
    pub destination: String,

    /// Decimal amount, at most 7 fractional digits.
    #[arg(long, short = 'a')]
    pub amount: String,

    /// `native` or `CODE:ISSUER`.
    #[arg(long, default_value = "native")]
    pub asset: String,

    /// Base fee per operation, in stroops.
    #[arg(long, default_value_t = 100)]
    pub fee: u32,

    /// Current sequence number of the source. Loaded from Horizon if omitted.
    #[arg(long)]
    pub sequence: Option<i64>,

    /// Text memo, up to 28 bytes.
    #[arg(long)]
    pub memo: Option<String>,

    /// Seconds until the transaction expires; 0 for no expiry.
    #[arg(long, default_value_t = 300)]
    pub timeout: u64,

    /// Submit after signing instead of printing the envelope.
    #[arg(long)]
    pub submit: bool,
}

#[derive(Args, Debug)]
pub struct DecodeArgs {
    /// Base64 envelope XDR.
    pub xdr: String,
}

#[derive(Args, Debug)]
pub struct SignArgs {
    /// Base64 envelope XDR.
    pub xdr: String,

    /// Secret seed (`S...`) to sign with.
    #[arg(long, env = "STELLAR_SECRET", hide_env_values = true)]
    pub secret: String,
}

#[derive(Args, Debug)]
pub struct SubmitArgs {
    /// Base64 envelope XDR.
    pub xdr: String,

    /// Skip the SEP-29 memo-required check on destinations.
    #[arg(long)]
    pub skip_memo_check: bool,
}

#[derive(Args, Debug)]
pub struct AccountArgs {
    /// Account address, `G...` or `M...`.
    pub account_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli_structure() {
        StellarTxCli::command().debug_assert();
    }

    #[test]
    fn parses_pay_with_defaults() {
        let cli = StellarTxCli::try_parse_from([
            "stellar-tx",
            "pay",
            "--secret",
            "SAAQCAIBAEAQCAIBAEAQCAIBAEAQCAIBAEAQCAIBAEAQCAIBAEAQC5MY",
            "-d",
            "GCATS5YOVB6ROX2WUNKGNQ2MP3GMXDMKSG2O4N5CLX3A6W4PZGZZI55U",
            "-a",
            "10.5",
            "--network",
            "public",
        ])
        .unwrap();
        assert_eq!(cli.global.network, "public");
        match cli.command {
            Commands::Pay(args) => {
                assert_eq!(args.asset, "native");
                assert_eq!(args.fee, 100);
                assert!(args.sequence.is_none());
                assert!(!args.submit);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
