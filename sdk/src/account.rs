//! # Accounts
//!
//! Two related ideas live here:
//!
//! - [`MuxedAccount`]: an address that may carry a 64-bit sub-account id on
//!   top of the underlying Ed25519 key (`M...` rather than `G...`). It is what
//!   transaction sources and payment destinations are made of.
//! - [`Account`]: a source account as the transaction builder sees it, an
//!   address plus the sequence number the next transaction must use.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::crypto::strkey::{self, StrKeyError};
use crate::crypto::PublicKey;
use crate::signer::Signer;
use crate::xdr::{XdrDecode, XdrEncode, XdrError, XdrReader, XdrWriter};

const KEY_TYPE_ED25519: i32 = 0;
const KEY_TYPE_MUXED_ED25519: i32 = 0x100;

// ---------------------------------------------------------------------------
// MuxedAccount
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MuxedAccount {
    Ed25519(PublicKey),
    Muxed { id: u64, ed25519: PublicKey },
}

impl MuxedAccount {
    pub fn new(ed25519: PublicKey, id: Option<u64>) -> Self {
        match id {
            Some(id) => MuxedAccount::Muxed { id, ed25519 },
            None => MuxedAccount::Ed25519(ed25519),
        }
    }

    /// The underlying Ed25519 key, with any sub-account id stripped.
    pub fn ed25519(&self) -> &PublicKey {
        match self {
            MuxedAccount::Ed25519(key) | MuxedAccount::Muxed { ed25519: key, .. } => key,
        }
    }

    pub fn id(&self) -> Option<u64> {
        match self {
            MuxedAccount::Ed25519(_) => None,
            MuxedAccount::Muxed { id, .. } => Some(*id),
        }
    }

    pub fn is_muxed(&self) -> bool {
        matches!(self, MuxedAccount::Muxed { .. })
    }

    /// `G...` address of the underlying key.
    pub fn account_id(&self) -> String {
        self.ed25519().account_id()
    }

    /// `M...` when an id is present, `G...` otherwise.
    pub fn address(&self) -> String {
        match self {
            MuxedAccount::Ed25519(key) => key.account_id(),
            MuxedAccount::Muxed { id, ed25519 } => {
                strkey::encode_muxed_account(ed25519.as_bytes(), *id)
            }
        }
    }
}

impl From<PublicKey> for MuxedAccount {
    fn from(key: PublicKey) -> Self {
        MuxedAccount::Ed25519(key)
    }
}

impl fmt::Display for MuxedAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.address())
    }
}

impl FromStr for MuxedAccount {
    type Err = StrKeyError;

    /// Accepts both `G...` and `M...` addresses.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.starts_with('M') {
            let (key, id) = strkey::decode_muxed_account(s)?;
            Ok(MuxedAccount::Muxed {
                id,
                ed25519: PublicKey::from_bytes(key),
            })
        } else {
            let key = strkey::decode_ed25519_public_key(s)?;
            Ok(MuxedAccount::Ed25519(PublicKey::from_bytes(key)))
        }
    }
}

impl Serialize for MuxedAccount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.address())
    }
}

impl<'de> Deserialize<'de> for MuxedAccount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

impl XdrEncode for MuxedAccount {
    fn encode(&self, writer: &mut XdrWriter) -> Result<(), XdrError> {
        match self {
            MuxedAccount::Ed25519(key) => {
                writer.write_i32(KEY_TYPE_ED25519);
                writer.write_fixed_opaque(key.as_bytes());
            }
            MuxedAccount::Muxed { id, ed25519 } => {
                writer.write_i32(KEY_TYPE_MUXED_ED25519);
                writer.write_u64(*id);
                writer.write_fixed_opaque(ed25519.as_bytes());
            }
        }
        Ok(())
    }
}

impl XdrDecode for MuxedAccount {
    fn decode(reader: &mut XdrReader<'_>) -> Result<Self, XdrError> {
        match reader.read_i32()? {
            KEY_TYPE_ED25519 => Ok(MuxedAccount::Ed25519(PublicKey::from_bytes(
                reader.read_array::<32>()?,
            ))),
            KEY_TYPE_MUXED_ED25519 => {
                let id = reader.read_u64()?;
                let ed25519 = PublicKey::from_bytes(reader.read_array::<32>()?);
                Ok(MuxedAccount::Muxed { id, ed25519 })
            }
            other => Err(XdrError::InvalidDiscriminant {
                kind: "crypto key type",
                value: other.into(),
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// Account
// ---------------------------------------------------------------------------

/// Signing thresholds of an account, as reported by Horizon.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thresholds {
    pub low_threshold: u8,
    pub med_threshold: u8,
    pub high_threshold: u8,
}

/// A transaction source: address plus current sequence number.
///
/// `sequence` is the number the account holds *now*; the next transaction
/// built from it uses `sequence + 1`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub account: MuxedAccount,
    pub sequence: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thresholds: Option<Thresholds>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub signers: Vec<Signer>,
}

impl Account {
    pub fn new(account: MuxedAccount, sequence: i64) -> Self {
        Self {
            account,
            sequence,
            thresholds: None,
            signers: Vec::new(),
        }
    }

    pub fn account_id(&self) -> String {
        self.account.account_id()
    }

    pub fn increment_sequence_number(&mut self) {
        self.sequence += 1;
    }
}
