// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # stellar-tx
//!
//! Entry point for the `stellar-tx` binary. Parses CLI arguments,
//! initializes logging, and dispatches to one subcommand:
//!
//! - `keygen`  : generate a random keypair
//! - `pay`     : build, sign and optionally submit a payment
//! - `decode`  : envelope XDR to JSON
//! - `sign`    : add a signature to an envelope
//! - `submit`  : post an envelope to Horizon
//! - `account` : show an account's sequence, thresholds and signers
//! - `version` : print build version information

mod cli;
mod logging;

use anyhow::{anyhow, Context, Result};
use clap::Parser;

use stellar_sdk::horizon::Server;
use stellar_sdk::prelude::*;

use cli::{Commands, GlobalArgs, StellarTxCli};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = StellarTxCli::parse();
    logging::init_logging(&cli.global.log_level, cli.global.log_format.into());

    let network = Network::from_name_or_passphrase(&cli.global.network);
    tracing::debug!(%network, "selected network");

    match cli.command {
        Commands::Keygen(args) => keygen(args),
        Commands::Pay(args) => pay(args, &cli.global, network).await,
        Commands::Decode(args) => decode(args, network),
        Commands::Sign(args) => sign(args, network),
        Commands::Submit(args) => submit(args, &cli.global, network).await,
        Commands::Account(args) => account(args, &cli.global, network).await,
        Commands::Version => {
            print_version();
            Ok(())
        }
    }
}

/// Horizon for `network`: the explicit URL if given, SDF's otherwise.
fn horizon(global: &GlobalArgs, network: &Network) -> Result<Server> {
    let url = match (&global.horizon_url, network.default_horizon_url()) {
        (Some(url), _) => url.as_str(),
        (None, Some(url)) => url,
        (None, None) => {
            return Err(anyhow!(
                "no default Horizon for a custom network, pass --horizon-url"
            ))
        }
    };
    tracing::debug!(url, "using horizon");
    Server::new(url, network.clone()).context("failed to create Horizon client")
}

fn keygen(args: cli::KeygenArgs) -> Result<()> {
    let keypair = Keypair::random();
    let secret = keypair.secret()?;
    if args.json {
        let out = serde_json::json!({
            "account_id": keypair.account_id(),
            "secret": secret,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        println!("Account ID : {}", keypair.account_id());
        println!("Secret     : {}", secret);
    }
    Ok(())
}

async fn pay(args: cli::PayArgs, global: &GlobalArgs, network: Network) -> Result<()> {
    let signer = Keypair::from_secret(&args.secret).context("invalid --secret")?;
    let destination: MuxedAccount = args
        .destination
        .parse()
        .with_context(|| format!("invalid destination '{}'", args.destination))?;
    let asset: Asset = args
        .asset
        .parse()
        .with_context(|| format!("invalid asset '{}'", args.asset))?;
    let payment = Payment::new(destination, asset, args.amount.as_str())
        .with_context(|| format!("invalid amount '{}'", args.amount))?;

    let mut source = match args.sequence {
        Some(sequence) => Account::new(signer.account_id().parse()?, sequence),
        None => horizon(global, &network)?
            .load_account(&signer.account_id())
            .await
            .context("failed to load source account")?,
    };

    let mut builder = TransactionBuilder::new(&mut source, network.clone(), args.fee)
        .append_operation(payment)
        .set_timeout(args.timeout);
    if let Some(text) = &args.memo {
        builder = builder.add_text_memo(text)?;
    }
    let mut envelope = builder.build()?;
    envelope.sign(&signer)?;
    tracing::info!(
        hash = %envelope.hash_hex()?,
        sequence = envelope.transaction.sequence,
        "payment signed"
    );

    if args.submit {
        let response = horizon(global, &network)?
            .submit_transaction(&Envelope::from(envelope), false)
            .await
            .context("submission failed")?;
        println!("{}", serde_json::to_string_pretty(&response)?);
    } else {
        println!("{}", envelope.to_xdr()?);
    }
    Ok(())
}

fn decode(args: cli::DecodeArgs, network: Network) -> Result<()> {
    let envelope = Envelope::from_xdr(args.xdr.trim(), network).context("not a valid envelope")?;
    let out = serde_json::json!({
        "envelope_type": envelope.envelope_type().to_string(),
        "hash": envelope.hash_hex()?,
        "envelope": envelope,
    });
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}

fn sign(args: cli::SignArgs, network: Network) -> Result<()> {
    let signer = Keypair::from_secret(&args.secret).context("invalid --secret")?;
    let mut envelope =
        Envelope::from_xdr(args.xdr.trim(), network).context("not a valid envelope")?;
    envelope.sign(&signer)?;
    tracing::info!(
        signer = %signer.account_id(),
        signatures = envelope.signatures().len(),
        "envelope signed"
    );
    println!("{}", envelope.to_xdr()?);
    Ok(())
}

async fn submit(args: cli::SubmitArgs, global: &GlobalArgs, network: Network) -> Result<()> {
    let response = horizon(global, &network)?
        .submit_transaction_xdr(args.xdr.trim(), args.skip_memo_check)
        .await
        .context("submission failed")?;
    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}

async fn account(args: cli::AccountArgs, global: &GlobalArgs, network: Network) -> Result<()> {
    let account = horizon(global, &network)?
        .load_account(&args.account_id)
        .await
        .with_context(|| format!("failed to load {}", args.account_id))?;
    println!("{}", serde_json::to_string_pretty(&account)?);
    Ok(())
}

fn print_version() {
    println!("stellar-tx {}", env!("CARGO_PKG_VERSION"));
    println!("rustc      {}", rustc_version());
}

fn rustc_version() -> &'static str {
    option_env!("RUSTC_VERSION").unwrap_or("unknown")
}
