//! # Key Management
//!
//! Ed25519 keypairs and public keys as Stellar sees them.
//!
//! A [`Keypair`] always knows its public key and may or may not know its
//! secret. A keypair built from a `G...` address can verify and can tell you
//! its signature hint, but asking it to sign is an error, not a panic.
//!
//! ## Security considerations
//!
//! - Secret keys are zeroized on drop (ed25519-dalek does this for us).
//! - Random keys come from `OsRng`.
//! - Secret material never appears in `Debug` output or logs.

use std::fmt;
use std::str::FromStr;

use ed25519_dalek::{Signature as DalekSignature, Signer, SigningKey, Verifier, VerifyingKey};
use rand::rngs::OsRng;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

use super::signatures::DecoratedSignature;
use super::strkey::{self, StrKeyError};
use crate::config::{SIGNATURE_HINT_LENGTH, SIGNATURE_MAX_BYTES};
use crate::xdr::{XdrDecode, XdrEncode, XdrError, XdrReader, XdrWriter};

/// `PUBLIC_KEY_TYPE_ED25519`, the only arm of the XDR `PublicKey` union.
const PUBLIC_KEY_TYPE_ED25519: i32 = 0;

/// Errors that can occur during key operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyError {
    #[error("keypair has no secret seed and cannot sign")]
    MissingSecretSeed,

    #[error("signature must be 64 bytes, got {0}")]
    InvalidSignatureLength(usize),

    #[error("public key must be 32 bytes, got {0}")]
    InvalidPublicKeyLength(usize),

    #[error(transparent)]
    StrKey(#[from] StrKeyError),
}

// ---------------------------------------------------------------------------
// PublicKey
// ---------------------------------------------------------------------------

/// A 32-byte Ed25519 public key, the payload of every `G...` address.
///
/// On the wire it is the XDR `AccountID` (a `PublicKey` union with a single
/// ed25519 arm). Bytes are not checked for being a curve point until they
/// are used to verify something, matching what the network accepts.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PublicKey([u8; 32]);

impl PublicKey {
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn try_from_slice(slice: &[u8]) -> Result<Self, KeyError> {
        let bytes: [u8; 32] = slice
            .try_into()
            .map_err(|_| KeyError::InvalidPublicKeyLength(slice.len()))?;
        Ok(Self(bytes))
    }

    /// Parses a `G...` address.
    pub fn from_account_id(address: &str) -> Result<Self, KeyError> {
        Ok(Self(strkey::decode_ed25519_public_key(address)?))
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// The `G...` address of this key.
    pub fn account_id(&self) -> String {
        strkey::encode_ed25519_public_key(&self.0)
    }

    /// Last four bytes of the key, used to match signatures to signers.
    pub fn signature_hint(&self) -> [u8; SIGNATURE_HINT_LENGTH] {
        let mut hint = [0u8; SIGNATURE_HINT_LENGTH];
        hint.copy_from_slice(&self.0[32 - SIGNATURE_HINT_LENGTH..]);
        hint
    }

    /// Checks an Ed25519 signature over `data`.
    ///
    /// A signature of the wrong length is an error. A signature that simply
    /// doesn't verify, or a key that isn't a valid curve point, is `Ok(false)`.
    pub fn verify(&self, data: &[u8], signature: &[u8]) -> Result<bool, KeyError> {
        let sig: [u8; SIGNATURE_MAX_BYTES] = signature
            .try_into()
            .map_err(|_| KeyError::InvalidSignatureLength(signature.len()))?;
        let Ok(verifying_key) = VerifyingKey::from_bytes(&self.0) else {
            return Ok(false);
        };
        Ok(verifying_key
            .verify(data, &DalekSignature::from_bytes(&sig))
            .is_ok())
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.account_id())
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({})", self.account_id())
    }
}

impl FromStr for PublicKey {
    type Err = KeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_account_id(s)
    }
}

impl Serialize for PublicKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.account_id())
    }
}

impl<'de> Deserialize<'de> for PublicKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

impl XdrEncode for PublicKey {
    fn encode(&self, writer: &mut XdrWriter) -> Result<(), XdrError> {
        writer.write_i32(PUBLIC_KEY_TYPE_ED25519);
        writer.write_fixed_opaque(&self.0);
        Ok(())
    }
}

impl XdrDecode for PublicKey {
    fn decode(reader: &mut XdrReader<'_>) -> Result<Self, XdrError> {
        match reader.read_i32()? {
            PUBLIC_KEY_TYPE_ED25519 => Ok(Self(reader.read_array::<32>()?)),
            other => Err(XdrError::InvalidDiscriminant {
                kind: "public key type",
                value: other.into(),
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// Keypair
// ---------------------------------------------------------------------------

/// An Ed25519 keypair, possibly without its secret half.
///
/// # Examples
///
/// ```
/// use stellar_sdk::crypto::Keypair;
///
/// let kp = Keypair::random();
/// let sig = kp.sign(b"hello").unwrap();
/// assert!(kp.verify(b"hello", &sig).unwrap());
///
/// let watcher = Keypair::from_public_key(&kp.account_id()).unwrap();
/// assert!(!watcher.can_sign());
/// assert!(watcher.sign(b"hello").is_err());
/// ```
pub struct Keypair {
    public_key: PublicKey,
    signing_key: Option<SigningKey>,
}

impl Keypair {
    /// Fresh keypair from the OS RNG.
    pub fn random() -> Self {
        Self::from_signing_key(SigningKey::generate(&mut OsRng))
    }

    /// From an `S...` secret seed.
    pub fn from_secret(secret: &str) -> Result<Self, KeyError> {
        let seed = strkey::decode_ed25519_secret_seed(secret)?;
        Ok(Self::from_raw_ed25519_seed(&seed))
    }

    /// From the raw 32-byte Ed25519 seed.
    pub fn from_raw_ed25519_seed(seed: &[u8; 32]) -> Self {
        Self::from_signing_key(SigningKey::from_bytes(seed))
    }

    /// Verify-only keypair from a `G...` address.
    pub fn from_public_key(address: &str) -> Result<Self, KeyError> {
        Ok(Self::from(PublicKey::from_account_id(address)?))
    }

    /// Verify-only keypair from raw public key bytes.
    pub fn from_raw_ed25519_public_key(bytes: &[u8]) -> Result<Self, KeyError> {
        Ok(Self::from(PublicKey::try_from_slice(bytes)?))
    }

    fn from_signing_key(signing_key: SigningKey) -> Self {
        Self {
            public_key: PublicKey(signing_key.verifying_key().to_bytes()),
            signing_key: Some(signing_key),
        }
    }

    pub fn public_key(&self) -> &PublicKey {
        &self.public_key
    }

    /// The `G...` address.
    pub fn account_id(&self) -> String {
        self.public_key.account_id()
    }

    pub fn raw_public_key(&self) -> [u8; 32] {
        self.public_key.0
    }

    /// The `S...` secret seed. Fails for verify-only keypairs.
    pub fn secret(&self) -> Result<String, KeyError> {
        Ok(strkey::encode_ed25519_secret_seed(&self.raw_secret_key()?))
    }

    pub fn raw_secret_key(&self) -> Result<[u8; 32], KeyError> {
        self.signing_key
            .as_ref()
            .map(SigningKey::to_bytes)
            .ok_or(KeyError::MissingSecretSeed)
    }

    pub fn can_sign(&self) -> bool {
        self.signing_key.is_some()
    }

    pub fn signature_hint(&self) -> [u8; SIGNATURE_HINT_LENGTH] {
        self.public_key.signature_hint()
    }

    /// Raw 64-byte Ed25519 signature over `data`.
    pub fn sign(&self, data: &[u8]) -> Result<[u8; 64], KeyError> {
        let signing_key = self.signing_key.as_ref().ok_or(KeyError::MissingSecretSeed)?;
        Ok(signing_key.sign(data).to_bytes())
    }

    /// Signature paired with this key's hint, ready for an envelope.
    pub fn sign_decorated(&self, data: &[u8]) -> Result<DecoratedSignature, KeyError> {
        let signature = self.sign(data)?;
        Ok(DecoratedSignature::new(self.signature_hint(), signature.to_vec()))
    }

    /// See [`PublicKey::verify`].
    pub fn verify(&self, data: &[u8], signature: &[u8]) -> Result<bool, KeyError> {
        self.public_key.verify(data, signature)
    }
}

impl From<PublicKey> for Keypair {
    fn from(public_key: PublicKey) -> Self {
        Self {
            public_key,
            signing_key: None,
        }
    }
}

impl Clone for Keypair {
    fn clone(&self) -> Self {
        Self {
            public_key: self.public_key,
            signing_key: self
                .signing_key
                .as_ref()
                .map(|k| SigningKey::from_bytes(&k.to_bytes())),
        }
    }
}

impl fmt::Debug for Keypair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Never print secret key material.
        f.debug_struct("Keypair")
            .field("account_id", &self.account_id())
            .field("can_sign", &self.can_sign())
            .finish()
    }
}

impl PartialEq for Keypair {
    /// Keypairs compare by public key; a verify-only copy equals the original.
    fn eq(&self, other: &Self) -> bool {
        self.public_key == other.public_key
    }
}

impl Eq for Keypair {}
