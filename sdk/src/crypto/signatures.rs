//! # Decorated Signatures
//!
//! Envelopes don't carry bare signatures. Each one is *decorated* with a
//! four-byte hint (the tail of the signer key) so validators can find the
//! right signer without trying every key on the account.
//!
//! Two flavours end up in this wrapper:
//!
//! - **Ed25519**: hint = last 4 bytes of the public key, signature = the
//!   64-byte Ed25519 signature over the transaction hash.
//! - **Hash-x**: hint = last 4 bytes of `sha256(preimage)`, signature = the
//!   preimage itself. Anyone who knows the preimage can "sign".

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::hash::sha256;
use super::keys::{KeyError, PublicKey};
use crate::config::{SIGNATURE_HINT_LENGTH, SIGNATURE_MAX_BYTES};
use crate::serde_util::hex_bytes;
use crate::xdr::{XdrDecode, XdrEncode, XdrError, XdrReader, XdrWriter};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignatureError {
    #[error("hash-x preimage is {0} bytes, at most 64 fit in a signature")]
    PreimageTooLong(usize),
}

/// A signature plus the hint that identifies its signer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DecoratedSignature {
    #[serde(with = "hex_bytes")]
    pub hint: [u8; SIGNATURE_HINT_LENGTH],
    #[serde(with = "hex_bytes")]
    pub signature: Vec<u8>,
}

impl DecoratedSignature {
    pub fn new(hint: [u8; SIGNATURE_HINT_LENGTH], signature: Vec<u8>) -> Self {
        Self { hint, signature }
    }

    /// Builds the signature that satisfies a hash-x signer for `preimage`.
    pub fn hashx(preimage: &[u8]) -> Result<Self, SignatureError> {
        if preimage.len() > SIGNATURE_MAX_BYTES {
            return Err(SignatureError::PreimageTooLong(preimage.len()));
        }
        let digest = sha256(preimage);
        let mut hint = [0u8; SIGNATURE_HINT_LENGTH];
        hint.copy_from_slice(&digest[32 - SIGNATURE_HINT_LENGTH..]);
        Ok(Self::new(hint, preimage.to_vec()))
    }

    pub fn hint_hex(&self) -> String {
        hex::encode(self.hint)
    }

    /// Whether this signature's hint points at `signer`.
    pub fn matches_hint(&self, signer: &PublicKey) -> bool {
        self.hint == signer.signature_hint()
    }

    /// Whether `signer` produced this signature over `data`.
    ///
    /// The hint must match first; a valid signature under a different hint
    /// is still rejected, the same way validators treat it.
    pub fn verify(&self, signer: &PublicKey, data: &[u8]) -> Result<bool, KeyError> {
        if !self.matches_hint(signer) {
            return Ok(false);
        }
        signer.verify(data, &self.signature)
    }
}

impl XdrEncode for DecoratedSignature {
    fn encode(&self, writer: &mut XdrWriter) -> Result<(), XdrError> {
        writer.write_fixed_opaque(&self.hint);
        writer.write_var_opaque(&self.signature, SIGNATURE_MAX_BYTES)
    }
}

impl XdrDecode for DecoratedSignature {
    fn decode(reader: &mut XdrReader<'_>) -> Result<Self, XdrError> {
        let hint = reader.read_array::<SIGNATURE_HINT_LENGTH>()?;
        let signature = reader.read_var_opaque(SIGNATURE_MAX_BYTES)?;
        Ok(Self { hint, signature })
    }
}
