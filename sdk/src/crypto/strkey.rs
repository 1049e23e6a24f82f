//! # Strkey Addresses
//!
//! The human-facing form of every key and hash on Stellar:
//!
//! ```text
//! base32( version_byte || payload || crc16_xmodem(version_byte || payload) )
//! ```
//!
//! The version byte picks the leading letter, so you can tell at a glance
//! what you are holding:
//!
//! | Prefix | Kind                 | Payload |
//! |--------|----------------------|---------|
//! | `G`    | Ed25519 public key   | 32 bytes |
//! | `S`    | Ed25519 secret seed  | 32 bytes |
//! | `T`    | Pre-authorized tx    | 32 bytes |
//! | `X`    | SHA-256 hash (hashX) | 32 bytes |
//! | `M`    | Muxed account        | 32-byte key, then 8-byte big-endian id |
//!
//! The checksum is CRC16-XMODEM appended little-endian. Base32 uses the RFC
//! 4648 alphabet without padding. Decoding rejects anything that does not
//! round-trip exactly: wrong prefix, wrong length, bad checksum, lowercase,
//! or stray bits in the final character.

use std::fmt;

use data_encoding::BASE32_NOPAD;
use thiserror::Error;

// ---------------------------------------------------------------------------
// Version bytes
// ---------------------------------------------------------------------------

/// What a strkey encodes. The discriminant is the version byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum KeyKind {
    Ed25519PublicKey = 6 << 3,
    Ed25519SecretSeed = 18 << 3,
    PreAuthTx = 19 << 3,
    Sha256Hash = 23 << 3,
    MuxedAccount = 12 << 3,
}

impl KeyKind {
    pub fn version_byte(self) -> u8 {
        self as u8
    }

    /// Payload length in bytes, excluding version byte and checksum.
    pub fn payload_len(self) -> usize {
        match self {
            KeyKind::MuxedAccount => 40,
            _ => 32,
        }
    }
}

impl fmt::Display for KeyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            KeyKind::Ed25519PublicKey => "ed25519 public key",
            KeyKind::Ed25519SecretSeed => "ed25519 secret seed",
            KeyKind::PreAuthTx => "pre-auth tx",
            KeyKind::Sha256Hash => "sha256 hash",
            KeyKind::MuxedAccount => "muxed account",
        };
        f.write_str(name)
    }
}

/// Strkey decoding failure, tagged with the kind the caller expected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StrKeyError {
    #[error("invalid {kind} address: {reason}")]
    InvalidAddress { kind: KeyKind, reason: &'static str },
}

impl StrKeyError {
    fn new(kind: KeyKind, reason: &'static str) -> Self {
        StrKeyError::InvalidAddress { kind, reason }
    }

    /// The kind of key that failed to decode.
    pub fn kind(&self) -> KeyKind {
        match self {
            StrKeyError::InvalidAddress { kind, .. } => *kind,
        }
    }
}

// ---------------------------------------------------------------------------
// Generic encode / decode
// ---------------------------------------------------------------------------

/// Encodes `payload` with the version byte of `kind`.
///
/// The payload length is not checked here; the typed wrappers below take
/// fixed-size arrays.
pub fn encode_check(kind: KeyKind, payload: &[u8]) -> String {
    let mut raw = Vec::with_capacity(payload.len() + 3);
    raw.push(kind.version_byte());
    raw.extend_from_slice(payload);
    let checksum = crc16_xmodem(&raw);
    raw.extend_from_slice(&checksum.to_le_bytes());
    BASE32_NOPAD.encode(&raw)
}

/// Decodes a strkey of the expected `kind` and returns its payload.
pub fn decode_check(kind: KeyKind, encoded: &str) -> Result<Vec<u8>, StrKeyError> {
    let raw = BASE32_NOPAD
        .decode(encoded.as_bytes())
        .map_err(|_| StrKeyError::new(kind, "not valid base32"))?;

    if raw.len() != kind.payload_len() + 3 {
        return Err(StrKeyError::new(kind, "wrong length"));
    }
    if raw[0] != kind.version_byte() {
        return Err(StrKeyError::new(kind, "wrong version byte"));
    }

    let (body, checksum) = raw.split_at(raw.len() - 2);
    let expected = crc16_xmodem(body).to_le_bytes();
    if checksum != expected.as_slice() {
        return Err(StrKeyError::new(kind, "checksum mismatch"));
    }

    Ok(body[1..].to_vec())
}

fn decode_fixed<const N: usize>(kind: KeyKind, encoded: &str) -> Result<[u8; N], StrKeyError> {
    let payload = decode_check(kind, encoded)?;
    payload
        .try_into()
        .map_err(|_| StrKeyError::new(kind, "wrong payload length"))
}

/// CRC16-XMODEM: polynomial 0x1021, initial value 0, no reflection.
pub fn crc16_xmodem(data: &[u8]) -> u16 {
    let mut crc: u16 = 0;
    for byte in data {
        crc ^= (*byte as u16) << 8;
        for _ in 0..8 {
            crc = if crc & 0x8000 != 0 {
                (crc << 1) ^ 0x1021
            } else {
                crc << 1
            };
        }
    }
    crc
}

// ---------------------------------------------------------------------------
// Typed helpers
// ---------------------------------------------------------------------------

pub fn encode_ed25519_public_key(key: &[u8; 32]) -> String {
    encode_check(KeyKind::Ed25519PublicKey, key)
}

pub fn decode_ed25519_public_key(address: &str) -> Result<[u8; 32], StrKeyError> {
    decode_fixed(KeyKind::Ed25519PublicKey, address)
}

pub fn is_valid_ed25519_public_key(address: &str) -> bool {
    decode_ed25519_public_key(address).is_ok()
}

pub fn encode_ed25519_secret_seed(seed: &[u8; 32]) -> String {
    encode_check(KeyKind::Ed25519SecretSeed, seed)
}

pub fn decode_ed25519_secret_seed(seed: &str) -> Result<[u8; 32], StrKeyError> {
    decode_fixed(KeyKind::Ed25519SecretSeed, seed)
}

pub fn is_valid_ed25519_secret_seed(seed: &str) -> bool {
    decode_ed25519_secret_seed(seed).is_ok()
}

pub fn encode_pre_auth_tx(hash: &[u8; 32]) -> String {
    encode_check(KeyKind::PreAuthTx, hash)
}

pub fn decode_pre_auth_tx(key: &str) -> Result<[u8; 32], StrKeyError> {
    decode_fixed(KeyKind::PreAuthTx, key)
}

pub fn encode_sha256_hash(hash: &[u8; 32]) -> String {
    encode_check(KeyKind::Sha256Hash, hash)
}

pub fn decode_sha256_hash(key: &str) -> Result<[u8; 32], StrKeyError> {
    decode_fixed(KeyKind::Sha256Hash, key)
}

/// Encodes an `M...` address from the underlying key and the 64-bit id.
pub fn encode_muxed_account(ed25519: &[u8; 32], id: u64) -> String {
    let mut payload = [0u8; 40];
    payload[..32].copy_from_slice(ed25519);
    payload[32..].copy_from_slice(&id.to_be_bytes());
    encode_check(KeyKind::MuxedAccount, &payload)
}

/// Splits an `M...` address into its ed25519 key and id.
pub fn decode_muxed_account(address: &str) -> Result<([u8; 32], u64), StrKeyError> {
    let payload: [u8; 40] = decode_fixed(KeyKind::MuxedAccount, address)?;
    let mut key = [0u8; 32];
    key.copy_from_slice(&payload[..32]);
    let mut id = [0u8; 8];
    id.copy_from_slice(&payload[32..]);
    Ok((key, u64::from_be_bytes(id)))
}
