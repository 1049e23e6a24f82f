//! Version and envelope discriminants shared by the transaction types.

use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// TransactionVersion
// ---------------------------------------------------------------------------

/// Which wire shape a [`super::Transaction`] serializes to.
///
/// The two shapes differ only in the source account: V0 carries the raw
/// ed25519 key, V1 the tagged `MuxedAccount`. Everything else is shared, and
/// so is the signature base (always computed over the V1 shape).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionVersion {
    V0,
    #[default]
    V1,
}

impl TransactionVersion {
    /// The envelope type a transaction of this version travels in.
    pub fn envelope_type(self) -> EnvelopeType {
        match self {
            TransactionVersion::V0 => EnvelopeType::TxV0,
            TransactionVersion::V1 => EnvelopeType::Tx,
        }
    }
}

impl fmt::Display for TransactionVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::V0 => write!(f, "v0"),
            Self::V1 => write!(f, "v1"),
        }
    }
}

// ---------------------------------------------------------------------------
// EnvelopeType
// ---------------------------------------------------------------------------

/// XDR `EnvelopeType` values used by this crate.
///
/// `Tx` and `TxFeeBump` also prefix the signature base; `TxV0` only ever
/// appears as a wire discriminant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(i32)]
pub enum EnvelopeType {
    TxV0 = 0,
    Tx = 2,
    TxFeeBump = 5,
}

impl EnvelopeType {
    pub fn code(self) -> i32 {
        self as i32
    }

    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(Self::TxV0),
            2 => Some(Self::Tx),
            5 => Some(Self::TxFeeBump),
            _ => None,
        }
    }
}

impl fmt::Display for EnvelopeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TxV0 => write!(f, "ENVELOPE_TYPE_TX_V0"),
            Self::Tx => write!(f, "ENVELOPE_TYPE_TX"),
            Self::TxFeeBump => write!(f, "ENVELOPE_TYPE_TX_FEE_BUMP"),
        }
    }
}
