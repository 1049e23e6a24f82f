//! # Hashing
//!
//! Stellar uses exactly one hash function: SHA-256. It derives network IDs
//! from passphrases, transaction hashes from signature bases, and hash-x
//! signer keys from preimages. Nothing else is needed, so nothing else is here.

use sha2::{Digest, Sha256};

/// SHA-256 digest of `data`.
///
/// # Example
///
/// ```
/// use stellar_sdk::crypto::sha256;
///
/// let digest = sha256(b"Test SDF Network ; September 2015");
/// assert_eq!(digest[0], 0xce);
/// ```
pub fn sha256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Hex-encoded SHA-256, as Horizon displays transaction hashes.
pub fn sha256_hex(data: &[u8]) -> String {
    hex::encode(sha256(data))
}
