//! Crate-level error type.
//!
//! Every module keeps its own `thiserror` enum so callers that only touch
//! one layer can match on something small. [`Error`] collects them for code
//! that crosses layers and just wants `?` to work.

use thiserror::Error;

use crate::amount::AmountError;
use crate::asset::AssetError;
use crate::crypto::{KeyError, SignatureError, StrKeyError};
use crate::horizon::HorizonError;
use crate::memo::MemoError;
use crate::operation::OperationError;
use crate::price::PriceError;
use crate::time_bounds::TimeBoundsError;
use crate::transaction::{EnvelopeError, TransactionError};
use crate::xdr::XdrError;

#[derive(Debug, Error)]
pub enum Error {
    #[error("amount: {0}")]
    Amount(#[from] AmountError),

    #[error("asset: {0}")]
    Asset(#[from] AssetError),

    #[error("memo: {0}")]
    Memo(#[from] MemoError),

    #[error("time bounds: {0}")]
    TimeBounds(#[from] TimeBoundsError),

    #[error("price: {0}")]
    Price(#[from] PriceError),

    #[error("operation: {0}")]
    Operation(#[from] OperationError),

    #[error("address: {0}")]
    StrKey(#[from] StrKeyError),

    #[error("key: {0}")]
    Key(#[from] KeyError),

    #[error("signature: {0}")]
    Signature(#[from] SignatureError),

    #[error("xdr: {0}")]
    Xdr(#[from] XdrError),

    #[error("envelope: {0}")]
    Envelope(#[from] EnvelopeError),

    #[error("transaction: {0}")]
    Transaction(#[from] TransactionError),

    #[error("horizon: {0}")]
    Horizon(#[from] HorizonError),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_account(s: &str) -> Result<crate::account::MuxedAccount> {
        Ok(s.parse()?)
    }

    #[test]
    fn question_mark_lifts_module_errors() {
        let err = parse_account("not an address").unwrap_err();
        assert!(matches!(err, Error::StrKey(_)));
        assert!(err.to_string().starts_with("address: "));
    }

    #[test]
    fn amount_errors_keep_their_message() {
        let err: Error = crate::amount::to_network_amount("1.23456789")
            .unwrap_err()
            .into();
        assert!(matches!(err, Error::Amount(_)));
    }
}
