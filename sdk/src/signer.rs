//! Account signers, as added or removed by `SetOptions`.
//!
//! A signer key is one of three 32-byte things: an Ed25519 public key, the
//! hash of a specific transaction (pre-authorized), or the SHA-256 of a
//! secret preimage (hash-x). Each has its own strkey prefix: `G`, `T`, `X`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::crypto::strkey::{self, StrKeyError};
use crate::crypto::PublicKey;
use crate::xdr::{XdrDecode, XdrEncode, XdrError, XdrReader, XdrWriter};

const SIGNER_KEY_TYPE_ED25519: i32 = 0;
const SIGNER_KEY_TYPE_PRE_AUTH_TX: i32 = 1;
const SIGNER_KEY_TYPE_HASH_X: i32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignerKey {
    Ed25519([u8; 32]),
    PreAuthTx([u8; 32]),
    HashX([u8; 32]),
}

impl SignerKey {
    pub fn ed25519(key: &PublicKey) -> Self {
        SignerKey::Ed25519(*key.as_bytes())
    }

    /// Signer satisfied only by the transaction with this hash.
    pub fn pre_auth_tx(tx_hash: [u8; 32]) -> Self {
        SignerKey::PreAuthTx(tx_hash)
    }

    /// Signer satisfied by revealing a preimage of `hash`.
    pub fn hash_x(hash: [u8; 32]) -> Self {
        SignerKey::HashX(hash)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        match self {
            SignerKey::Ed25519(b) | SignerKey::PreAuthTx(b) | SignerKey::HashX(b) => b,
        }
    }

    /// Strkey form: `G...`, `T...` or `X...`.
    pub fn to_strkey(&self) -> String {
        match self {
            SignerKey::Ed25519(b) => strkey::encode_ed25519_public_key(b),
            SignerKey::PreAuthTx(b) => strkey::encode_pre_auth_tx(b),
            SignerKey::HashX(b) => strkey::encode_sha256_hash(b),
        }
    }
}

impl fmt::Display for SignerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_strkey())
    }
}

impl FromStr for SignerKey {
    type Err = StrKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.as_bytes().first() {
            Some(b'T') => Ok(SignerKey::PreAuthTx(strkey::decode_pre_auth_tx(s)?)),
            Some(b'X') => Ok(SignerKey::HashX(strkey::decode_sha256_hash(s)?)),
            _ => Ok(SignerKey::Ed25519(strkey::decode_ed25519_public_key(s)?)),
        }
    }
}

impl Serialize for SignerKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_strkey())
    }
}

impl<'de> Deserialize<'de> for SignerKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

impl XdrEncode for SignerKey {
    fn encode(&self, writer: &mut XdrWriter) -> Result<(), XdrError> {
        let discriminant = match self {
            SignerKey::Ed25519(_) => SIGNER_KEY_TYPE_ED25519,
            SignerKey::PreAuthTx(_) => SIGNER_KEY_TYPE_PRE_AUTH_TX,
            SignerKey::HashX(_) => SIGNER_KEY_TYPE_HASH_X,
        };
        writer.write_i32(discriminant);
        writer.write_fixed_opaque(self.as_bytes());
        Ok(())
    }
}

impl XdrDecode for SignerKey {
    fn decode(reader: &mut XdrReader<'_>) -> Result<Self, XdrError> {
        let discriminant = reader.read_i32()?;
        let key: fn([u8; 32]) -> SignerKey = match discriminant {
            SIGNER_KEY_TYPE_ED25519 => SignerKey::Ed25519,
            SIGNER_KEY_TYPE_PRE_AUTH_TX => SignerKey::PreAuthTx,
            SIGNER_KEY_TYPE_HASH_X => SignerKey::HashX,
            other => {
                return Err(XdrError::InvalidDiscriminant {
                    kind: "signer key type",
                    value: other.into(),
                })
            }
        };
        Ok(key(reader.read_array::<32>()?))
    }
}

/// A signer key with its weight. Weight 0 removes the signer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Signer {
    pub key: SignerKey,
    pub weight: u32,
}

impl Signer {
    pub fn new(key: SignerKey, weight: u32) -> Self {
        Self { key, weight }
    }
}

impl XdrEncode for Signer {
    fn encode(&self, writer: &mut XdrWriter) -> Result<(), XdrError> {
        self.key.encode(writer)?;
        writer.write_u32(self.weight);
        Ok(())
    }
}

impl XdrDecode for Signer {
    fn decode(reader: &mut XdrReader<'_>) -> Result<Self, XdrError> {
        Ok(Self {
            key: SignerKey::decode(reader)?,
            weight: reader.read_u32()?,
        })
    }
}
