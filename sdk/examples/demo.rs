//! Offline walkthrough of a transaction's life.
//!
//! Derives a keypair, builds a payment, signs it, wraps it in a fee bump,
//! and decodes the result again. Nothing touches the network.
//!
//! Run with:
//!   cargo run --example demo

use std::time::Instant;

use stellar_sdk::prelude::*;

// ---------------------------------------------------------------------------
// ANSI color constants
// ---------------------------------------------------------------------------

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const GREEN: &str = "\x1b[32m";
const CYAN: &str = "\x1b[36m";

fn step(n: usize, title: &str) {
    println!();
    println!("{BOLD}{CYAN}[{n}]{RESET} {BOLD}{title}{RESET}");
}

fn field(label: &str, value: impl std::fmt::Display) {
    println!("    {DIM}{label:<14}{RESET} {value}");
}

fn main() -> Result<(), stellar_sdk::Error> {
    let started = Instant::now();
    let network = Network::testnet();

    step(1, "Keys");
    let alice = Keypair::from_secret("SAAQCAIBAEAQCAIBAEAQCAIBAEAQCAIBAEAQCAIBAEAQCAIBAEAQC5MY")?;
    let sponsor = Keypair::random();
    let bob: MuxedAccount =
        "MCATS5YOVB6ROX2WUNKGNQ2MP3GMXDMKSG2O4N5CLX3A6W4PZGZZIAAAAAAAAAAE2IU4Y".parse()?;
    field("alice", alice.account_id());
    field("sponsor", sponsor.account_id());
    field("bob (muxed)", &bob);
    field("bob id", bob.id().unwrap_or_default());

    step(2, "Build");
    let mut account = Account::new(alice.account_id().parse()?, 99);
    let mut envelope = TransactionBuilder::new(&mut account, network.clone(), 100)
        .append_operation(Payment::new(bob, Asset::native(), "10.5")?)
        .add_text_memo("demo")?
        .set_timeout(300)
        .build()?;
    field("sequence", envelope.transaction.sequence);
    field("fee", envelope.transaction.fee);
    field("hash", envelope.hash_hex()?);

    step(3, "Sign");
    envelope.sign(&alice)?;
    field("signatures", envelope.signatures.len());
    field("verifies", envelope.verify_signature(alice.public_key())?);
    field("xdr", envelope.to_xdr()?);

    step(4, "Fee bump");
    let mut bump = FeeBumpTransactionEnvelope::wrap((*sponsor.public_key()).into(), 1_000, envelope)?;
    bump.sign(&sponsor)?;
    field("total fee", bump.transaction.fee);
    field("hash", bump.hash_hex()?);

    step(5, "Decode");
    let decoded = Envelope::from_xdr(&bump.to_xdr()?, network)?;
    let inner = decoded.inner_transaction();
    field("type", decoded.envelope_type());
    field("memo", inner.memo.type_name());
    field("operations", inner.operations.len());

    println!();
    println!(
        "{GREEN}{BOLD}done{RESET} {DIM}in {:.2?}{RESET}",
        started.elapsed()
    );
    Ok(())
}
