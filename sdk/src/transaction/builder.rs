//! Transaction construction via the builder pattern.
//!
//! The [`TransactionBuilder`] borrows the source [`Account`] mutably: on a
//! successful `build()` it uses `sequence + 1` and bumps the account, so the
//! next builder on the same account gets the next number without a round
//! trip to Horizon.
//!
//! The builder does not sign; that happens on the returned envelope through
//! [`super::SignableEnvelope`]. Nor does it police the fee: a base fee under
//! the network minimum still builds. Run [`super::verify_transaction`] on
//! the result to catch that before submitting.

use super::envelope::TransactionEnvelope;
use super::tx::Transaction;
use super::types::TransactionVersion;
use super::verification::TransactionError;
use crate::account::Account;
use crate::config::{MAX_OPERATIONS, TIMEOUT_INFINITE};
use crate::memo::{Memo, MemoError};
use crate::network::Network;
use crate::operation::Operation;
use crate::time_bounds::TimeBounds;

/// Fluent builder for unsigned [`TransactionEnvelope`]s.
///
/// # Usage
///
/// ```rust,no_run
/// use stellar_sdk::prelude::*;
///
/// # fn main() -> Result<(), stellar_sdk::Error> {
/// let mut account = Account::new(
///     "GCFIRY65OQE7DFP5KLNS2PF2LVZMUZYJX4OZIEQ36N2IQANUB5XVYOJR".parse()?,
///     99,
/// );
/// let envelope = TransactionBuilder::new(&mut account, Network::testnet(), 100)
///     .append_operation(BumpSequence::new(200))
///     .set_timeout(30)
///     .build()?;
/// assert_eq!(envelope.transaction.sequence, 100);
/// # Ok(())
/// # }
/// ```
pub struct TransactionBuilder<'a> {
    source: &'a mut Account,
    network: Network,
    base_fee: u32,
    operations: Vec<Operation>,
    memo: Memo,
    time_bounds: Option<TimeBounds>,
    version: TransactionVersion,
}

impl<'a> TransactionBuilder<'a> {
    /// `base_fee` is per operation; the transaction fee is `base_fee × ops`.
    pub fn new(source: &'a mut Account, network: Network, base_fee: u32) -> Self {
        Self {
            source,
            network,
            base_fee,
            operations: Vec::new(),
            memo: Memo::None,
            time_bounds: None,
            version: TransactionVersion::V1,
        }
    }

    pub fn append_operation(mut self, operation: impl Into<Operation>) -> Self {
        self.operations.push(operation.into());
        self
    }

    pub fn memo(mut self, memo: Memo) -> Self {
        self.memo = memo;
        self
    }

    pub fn add_text_memo(self, text: &str) -> Result<Self, MemoError> {
        Ok(self.memo(Memo::text(text)?))
    }

    pub fn time_bounds(mut self, bounds: TimeBounds) -> Self {
        self.time_bounds = Some(bounds);
        self
    }

    /// Valid until `seconds` from now. 0 means no upper bound.
    pub fn set_timeout(self, seconds: u64) -> Self {
        if seconds == TIMEOUT_INFINITE {
            self.time_bounds(TimeBounds::unbounded())
        } else {
            self.time_bounds(TimeBounds::with_timeout(seconds))
        }
    }

    /// Emit the legacy V0 wire shape. Signing is unaffected.
    pub fn version(mut self, version: TransactionVersion) -> Self {
        self.version = version;
        self
    }

    /// Consumes the builder and produces an unsigned envelope.
    ///
    /// Fails only when the transaction cannot be encoded: more than 100
    /// operations, or a fee or sequence number that overflows. The source
    /// account's sequence number is only bumped on success.
    pub fn build(self) -> Result<TransactionEnvelope, TransactionError> {
        let op_count = self.operations.len();
        if op_count > MAX_OPERATIONS {
            return Err(TransactionError::TooManyOperations(op_count));
        }
        let fee = u32::try_from(op_count)
            .ok()
            .and_then(|n| self.base_fee.checked_mul(n))
            .ok_or(TransactionError::FeeOverflow)?;
        let sequence = self
            .source
            .sequence
            .checked_add(1)
            .ok_or(TransactionError::InvalidSequence(self.source.sequence))?;

        let transaction = Transaction {
            source: self.source.account,
            fee,
            sequence,
            time_bounds: self.time_bounds,
            memo: self.memo,
            operations: self.operations,
            version: self.version,
        };
        self.source.increment_sequence_number();
        Ok(TransactionEnvelope::new(transaction, self.network))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
