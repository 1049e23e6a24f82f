//! Envelope signing.
//!
//! Both envelope kinds sign the same way; only the signature base differs.
//! [`SignableEnvelope`] captures that: an envelope supplies its network,
//! its signature base and its signature list, and gets hashing, signing and
//! verification for free.
//!
//! Signing is a separate step from building because the key may not be
//! available at construction time (hardware wallet, remote co-signer).

use thiserror::Error;

use super::types::EnvelopeType;
use crate::config::MAX_SIGNATURES;
use crate::crypto::{sha256, DecoratedSignature, KeyError, Keypair, PublicKey, SignatureError};
use crate::network::Network;
use crate::xdr::XdrError;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EnvelopeError {
    /// A signature with the same hint is already attached.
    #[error("a signature with hint {hint} is already present")]
    SignatureExists { hint: String },

    #[error("envelope already carries the maximum of {0} signatures")]
    TooManySignatures(usize),

    #[error("unexpected envelope type {0}")]
    InvalidEnvelopeType(i32),

    #[error("fee bump base fee {base_fee} is below the minimum of {minimum}")]
    InsufficientFee { base_fee: i64, minimum: i64 },

    #[error("fee bump fee overflows a 64-bit integer")]
    FeeOverflow,

    #[error(transparent)]
    Key(#[from] KeyError),

    #[error(transparent)]
    Signature(#[from] SignatureError),

    #[error(transparent)]
    Xdr(#[from] XdrError),
}

impl EnvelopeError {
    pub(crate) fn wrong_type(found: EnvelopeType) -> Self {
        EnvelopeError::InvalidEnvelopeType(found.code())
    }
}

// ---------------------------------------------------------------------------
// SignableEnvelope
// ---------------------------------------------------------------------------

/// An envelope that collects signatures over its own signature base.
///
/// State only ever moves forward: signatures are appended, never removed, and
/// serialization works the same before and after signing.
pub trait SignableEnvelope {
    fn network(&self) -> &Network;

    /// The exact bytes whose SHA-256 every signer signs.
    fn signature_base(&self) -> Result<Vec<u8>, XdrError>;

    fn signatures(&self) -> &[DecoratedSignature];

    fn signatures_mut(&mut self) -> &mut Vec<DecoratedSignature>;

    fn hash(&self) -> Result<[u8; 32], XdrError> {
        Ok(sha256(&self.signature_base()?))
    }

    fn hash_hex(&self) -> Result<String, XdrError> {
        Ok(hex::encode(self.hash()?))
    }

    fn is_signed(&self) -> bool {
        !self.signatures().is_empty()
    }

    /// Signs the envelope hash with `signer` and appends the result.
    fn sign(&mut self, signer: &Keypair) -> Result<(), EnvelopeError> {
        let hash = self.hash()?;
        let signature = signer.sign_decorated(&hash)?;
        self.append_signature(signature)
    }

    /// Appends the signature that satisfies a hash-x signer for `preimage`.
    fn sign_hashx(&mut self, preimage: &[u8]) -> Result<(), EnvelopeError> {
        let signature = DecoratedSignature::hashx(preimage)?;
        self.append_signature(signature)
    }

    /// Appends a signature produced elsewhere. It is not verified here.
    fn append_signature(&mut self, signature: DecoratedSignature) -> Result<(), EnvelopeError> {
        // Only the hint is compared: two different keys that share their last
        // four bytes cannot both sign the same envelope.
        if self.signatures().iter().any(|s| s.hint == signature.hint) {
            return Err(EnvelopeError::SignatureExists {
                hint: signature.hint_hex(),
            });
        }
        if self.signatures().len() >= MAX_SIGNATURES {
            return Err(EnvelopeError::TooManySignatures(MAX_SIGNATURES));
        }
        self.signatures_mut().push(signature);
        Ok(())
    }

    /// Whether some attached signature is a valid `signer` signature of the
    /// envelope hash. Signatures whose hint doesn't match are skipped.
    fn verify_signature(&self, signer: &PublicKey) -> Result<bool, EnvelopeError> {
        let hash = self.hash()?;
        Ok(self
            .signatures()
            .iter()
            .filter(|s| s.matches_hint(signer))
            .any(|s| matches!(s.verify(signer, &hash), Ok(true))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::account::MuxedAccount;
    use crate::asset::Asset;
    use crate::operation::Payment;
    use crate::transaction::{Transaction, TransactionEnvelope};

    const DEST: &str = "GCATS5YOVB6ROX2WUNKGNQ2MP3GMXDMKSG2O4N5CLX3A6W4PZGZZI55U";
    const SIGNATURE: &str = "d10d10d137fbd2cce942fa30d0e2bc0317d6da7790f409f51f06c7bff4629b1f9c5ee180a18bd7315dc424ae05b39d62b1858953079daedd6cd7cb3fac466a07";

    fn signer() -> Keypair {
        Keypair::from_raw_ed25519_seed(&[1; 32])
    }

    fn envelope() -> TransactionEnvelope {
        let source: MuxedAccount = (*signer().public_key()).into();
        let pay = Payment::new(DEST.parse().unwrap(), Asset::native(), "10.5").unwrap();
        let tx = Transaction::new(source, 100, 100, vec![pay.into()]);
        TransactionEnvelope::new(tx, Network::testnet())
    }

    #[test]
    fn sign_produces_known_signature() {
        let mut env = envelope();
        assert!(!env.is_signed());
        env.sign(&signer()).unwrap();
        assert!(env.is_signed());
        assert_eq!(env.signatures.len(), 1);
        assert_eq!(env.signatures[0].hint, signer().signature_hint());
        assert_eq!(hex::encode(&env.signatures[0].signature), SIGNATURE);
    }

    #[test]
    fn signing_is_deterministic() {
        let mut a = envelope();
        let mut b = envelope();
        a.sign(&signer()).unwrap();
        b.sign(&signer()).unwrap();
        assert_eq!(a.signatures, b.signatures);
    }

    #[test]
    fn second_signature_with_same_hint_is_rejected() {
        let mut env = envelope();
        env.sign(&signer()).unwrap();
        let err = env.sign(&signer()).unwrap_err();
        assert!(matches!(err, EnvelopeError::SignatureExists { .. }));
        assert_eq!(env.signatures.len(), 1);
    }

    #[test]
    fn public_only_keypair_cannot_sign() {
        let mut env = envelope();
        let watcher = Keypair::from(*signer().public_key());
        assert_eq!(
            env.sign(&watcher).unwrap_err(),
            EnvelopeError::Key(KeyError::MissingSecretSeed)
        );
        assert!(!env.is_signed());
    }

    #[test]
    fn signature_limit() {
        let mut env = envelope();
        for i in 0..MAX_SIGNATURES as u8 {
            env.append_signature(DecoratedSignature::new([i, 0, 0, 1], vec![0; 64]))
                .unwrap();
        }
        assert_eq!(
            env.append_signature(DecoratedSignature::new([0xff; 4], vec![0; 64]))
                .unwrap_err(),
            EnvelopeError::TooManySignatures(MAX_SIGNATURES)
        );
    }

    #[test]
    fn hashx_signature() {
        let mut env = envelope();
        env.sign_hashx(b"open sesame").unwrap();
        let digest = sha256(b"open sesame");
        assert_eq!(env.signatures[0].hint, digest[28..]);
        assert_eq!(env.signatures[0].signature, b"open sesame");
        assert!(matches!(
            env.sign_hashx(&[0; 65]),
            Err(EnvelopeError::Signature(SignatureError::PreimageTooLong(65)))
        ));
    }

    #[test]
    fn verify_signature_checks_key_and_hash() {
        let mut env = envelope();
        env.sign(&signer()).unwrap();
        assert!(env.verify_signature(signer().public_key()).unwrap());

        let other = Keypair::from_raw_ed25519_seed(&[2; 32]);
        assert!(!env.verify_signature(other.public_key()).unwrap());

        // Same signatures, different network: the hash no longer matches.
        let mut moved = env.clone();
        moved.network = Network::public();
        assert!(!moved.verify_signature(signer().public_key()).unwrap());
    }
}
