//! # Transaction Module
//!
//! Construction, encoding, signing and verification of Stellar transactions
//! and the envelopes that carry them.
//!
//! ## Architecture
//!
//! ```text
//! types.rs       : TransactionVersion and EnvelopeType discriminants
//! tx.rs          : The canonical Transaction (one struct, V0/V1 wire shapes)
//! envelope.rs    : TransactionEnvelope and the Envelope enum for either kind
//! fee_bump.rs    : FeeBumpTransaction and its envelope
//! signing.rs     : SignableEnvelope: hash, sign, hash-x, verify
//! builder.rs     : Fluent TransactionBuilder over a source Account
//! verification.rs: Structural checks and signer verification
//! ```
//!
//! ## Transaction Lifecycle
//!
//! 1. **Build**: use [`TransactionBuilder`] to get an unsigned envelope.
//! 2. **Sign**: call [`SignableEnvelope::sign`] once per signer.
//! 3. **Encode**: `to_xdr()` gives the base64 form Horizon accepts.
//! 4. **Submit**: hand the envelope to [`crate::horizon::Server`].
//!
//! ## Signature base
//!
//! Every signer signs `SHA-256(network_id ‖ envelope_type ‖ tx)`. Regular
//! transactions always use `ENVELOPE_TYPE_TX` and the V1 shape, even when
//! sent as V0, so a V0 envelope and its V1 upgrade share signatures. Fee
//! bumps use `ENVELOPE_TYPE_TX_FEE_BUMP` over the fee bump body.

pub mod builder;
pub mod envelope;
pub mod fee_bump;
pub mod signing;
pub mod tx;
pub mod types;
pub mod verification;

pub use builder::TransactionBuilder;
pub use envelope::{Envelope, TransactionEnvelope};
pub use fee_bump::{FeeBumpTransaction, FeeBumpTransactionEnvelope};
pub use signing::{EnvelopeError, SignableEnvelope};
pub use tx::Transaction;
pub use types::{EnvelopeType, TransactionVersion};
pub use verification::{verify_signatures, verify_transaction, TransactionError};
