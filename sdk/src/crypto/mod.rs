//! # Cryptographic Primitives
//!
//! Everything security-related in the SDK flows through here: the strkey
//! address format, Ed25519 keypairs, decorated signatures, and SHA-256.
//!
//! We deliberately stay boring:
//!
//! - **Ed25519** (ed25519-dalek) for signatures, because that's what the
//!   network verifies.
//! - **SHA-256** (sha2) for network IDs and transaction hashes.
//! - **CRC16-XMODEM** for strkey checksums. Not cryptographic, and it doesn't
//!   pretend to be; it catches typos in addresses.

pub mod hash;
pub mod keys;
pub mod signatures;
pub mod strkey;

pub use hash::{sha256, sha256_hex};
pub use keys::{KeyError, Keypair, PublicKey};
pub use signatures::{DecoratedSignature, SignatureError};
pub use strkey::{KeyKind, StrKeyError};
