//! Structural checks on transactions and signature checks on envelopes.
//!
//! None of this is required for the codec to work: stellar-core is the final
//! judge. These checks catch the mistakes that would otherwise only surface
//! as a `tx_malformed` or `tx_insufficient_fee` from Horizon. They run from
//! cheapest to most expensive.

use thiserror::Error;

use super::signing::{EnvelopeError, SignableEnvelope};
use super::tx::Transaction;
use crate::config::{BASE_FEE, MAX_OPERATIONS};
use crate::crypto::PublicKey;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransactionError {
    #[error("transaction has no operations")]
    NoOperations,

    #[error("transaction has {0} operations, at most 100 are allowed")]
    TooManyOperations(usize),

    #[error("fee {fee} is below the minimum of {minimum} for this transaction")]
    InsufficientFee { fee: u32, minimum: u64 },

    #[error("base fee times operation count overflows the 32-bit fee")]
    FeeOverflow,

    #[error("sequence number {0} is not valid")]
    InvalidSequence(i64),

    #[error("time bounds are inverted: min {min_time} > max {max_time}")]
    InvalidTimeBounds { min_time: u64, max_time: u64 },

    #[error("envelope is unsigned")]
    MissingSignature,

    #[error("no valid signature from {signer}")]
    InvalidSignature { signer: String },

    #[error(transparent)]
    Envelope(#[from] EnvelopeError),
}

// ---------------------------------------------------------------------------
// Verification
// ---------------------------------------------------------------------------

/// Checks what can be checked without the ledger.
///
/// 1. **Operations**: 1 to 100.
/// 2. **Fee**: at least the base fee per operation.
/// 3. **Sequence**: positive.
/// 4. **Time bounds**: `min_time <= max_time` unless `max_time` is 0.
pub fn verify_transaction(tx: &Transaction) -> Result<(), TransactionError> {
    let op_count = tx.operations.len();
    if op_count == 0 {
        return Err(TransactionError::NoOperations);
    }
    if op_count > MAX_OPERATIONS {
        return Err(TransactionError::TooManyOperations(op_count));
    }

    let minimum = u64::from(BASE_FEE) * op_count as u64;
    if u64::from(tx.fee) < minimum {
        return Err(TransactionError::InsufficientFee {
            fee: tx.fee,
            minimum,
        });
    }

    if tx.sequence <= 0 {
        return Err(TransactionError::InvalidSequence(tx.sequence));
    }

    if let Some(bounds) = &tx.time_bounds {
        if bounds.max_time != 0 && bounds.min_time > bounds.max_time {
            return Err(TransactionError::InvalidTimeBounds {
                min_time: bounds.min_time,
                max_time: bounds.max_time,
            });
        }
    }

    Ok(())
}

/// Requires a valid signature from every key in `signers`.
pub fn verify_signatures<E: SignableEnvelope>(
    envelope: &E,
    signers: &[PublicKey],
) -> Result<(), TransactionError> {
    if !envelope.is_signed() {
        return Err(TransactionError::MissingSignature);
    }
    for signer in signers {
        if !envelope.verify_signature(signer)? {
            return Err(TransactionError::InvalidSignature {
                signer: signer.account_id(),
            });
        }
    }
    Ok(())
}
