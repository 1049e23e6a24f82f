// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # Stellar SDK: Transaction Codec & Signing
//!
//! Everything you need to put a transaction on the Stellar network, minus the
//! part where you hope it lands: build it, encode it to XDR byte-for-byte the
//! way stellar-core expects, sign it for the right network, and hand it to
//! Horizon.
//!
//! ## Architecture
//!
//! The crate is layered leaves-first. Nothing below `horizon` performs I/O,
//! blocks, or logs; the codec and signing core is plain synchronous code that
//! you can drive from any runtime (or none).
//!
//! - **xdr**: Primitive XDR codec: big-endian integers, padded opaque data,
//!   explicit cursor on decode, pure append on encode.
//! - **amount**: Decimal strings to 64-bit stroops and back. Exact, never rounds.
//! - **crypto**: Strkey addresses, Ed25519 keypairs, signature hints, SHA-256.
//! - **network**: Network passphrases and the network IDs derived from them.
//! - **account / asset / memo / time_bounds / price / signer**: Small value
//!   types with canonical XDR encodings.
//! - **operation**: The closed set of operation kinds and their wire bodies.
//! - **transaction**: Transactions, envelopes (v0, v1, fee bump), the
//!   signature base protocol, the builder, and verification.
//! - **horizon**: The thin submission/account facade (async and blocking).
//! - **config**: Protocol constants. Every magic number lives there.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use stellar_sdk::prelude::*;
//!
//! # fn main() -> Result<(), stellar_sdk::Error> {
//! let signer = Keypair::from_secret("SAAQCAIBAEAQCAIBAEAQCAIBAEAQCAIBAEAQCAIBAEAQCAIBAEAQC5MY")?;
//! let mut account = Account::new(signer.account_id().parse()?, 99);
//!
//! let destination: MuxedAccount =
//!     "GCATS5YOVB6ROX2WUNKGNQ2MP3GMXDMKSG2O4N5CLX3A6W4PZGZZI55U".parse()?;
//! let mut envelope = TransactionBuilder::new(&mut account, Network::testnet(), 100)
//!     .append_operation(Payment::new(destination, Asset::native(), "10.5")?)
//!     .build()?;
//!
//! envelope.sign(&signer)?;
//! println!("{}", envelope.to_xdr()?);
//! # Ok(())
//! # }
//! ```

pub mod account;
pub mod amount;
pub mod asset;
pub mod config;
pub mod crypto;
pub mod error;
pub mod horizon;
pub mod memo;
pub mod network;
pub mod operation;
pub mod price;
pub mod signer;
pub mod time_bounds;
pub mod transaction;
pub mod xdr;

mod serde_util;

pub use error::{Error, Result};

/// The types most programs need, in one import.
pub mod prelude {
    pub use crate::account::{Account, MuxedAccount, Thresholds};
    pub use crate::amount::{from_network_amount, to_network_amount};
    pub use crate::asset::Asset;
    pub use crate::crypto::{DecoratedSignature, Keypair, PublicKey};
    pub use crate::error::Error;
    pub use crate::memo::Memo;
    pub use crate::network::Network;
    pub use crate::operation::{
        AccountMerge, AllowTrust, BumpSequence, ChangeTrust, CreateAccount,
        CreatePassiveSellOffer, Inflation, ManageBuyOffer, ManageData, ManageSellOffer,
        Operation, OperationBody, OperationType, PathPaymentStrictReceive,
        PathPaymentStrictSend, Payment, SetOptions,
    };
    pub use crate::price::Price;
    pub use crate::signer::{Signer, SignerKey};
    pub use crate::time_bounds::TimeBounds;
    pub use crate::transaction::{
        Envelope, FeeBumpTransaction, FeeBumpTransactionEnvelope, SignableEnvelope,
        Transaction, TransactionBuilder, TransactionEnvelope, TransactionVersion,
    };
}
