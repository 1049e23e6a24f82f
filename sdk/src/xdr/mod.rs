//! # XDR Codec
//!
//! Stellar's wire format is XDR (RFC 4506): big-endian integers, every item
//! padded to a multiple of four bytes, variable-length data prefixed with a
//! 32-bit length, optionals prefixed with a 32-bit presence flag, and unions
//! prefixed with a 32-bit discriminant.
//!
//! Types that go on the wire implement [`XdrEncode`] and [`XdrDecode`]. Encoding
//! appends to an [`XdrWriter`]; decoding reads from an [`XdrReader`] that owns
//! an explicit cursor into a borrowed byte slice, so a failed decode never
//! leaves hidden state behind.
//!
//! Decoders are strict. Non-zero padding, out-of-range flags, lengths beyond a
//! declared maximum, and unknown union discriminants are all rejected.

mod reader;
mod writer;

pub use reader::XdrReader;
pub use writer::XdrWriter;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use thiserror::Error;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors raised while encoding or decoding XDR.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum XdrError {
    #[error("unexpected end of input at offset {offset}: needed {needed} bytes, {remaining} left")]
    UnexpectedEof {
        offset: usize,
        needed: usize,
        remaining: usize,
    },

    #[error("non-zero padding at offset {0}")]
    NonZeroPadding(usize),

    #[error("length {len} exceeds the maximum of {max}")]
    LengthExceedsMax { len: usize, max: usize },

    #[error("invalid boolean value {0}")]
    InvalidBool(u32),

    #[error("invalid {kind} discriminant {value}")]
    InvalidDiscriminant { kind: &'static str, value: i64 },

    #[error("operation type {0} is not implemented")]
    UnknownOperationType(i32),

    #[error("{0} trailing bytes after the encoded value")]
    TrailingBytes(usize),

    #[error("string is not valid UTF-8")]
    InvalidUtf8,

    #[error("invalid base64: {0}")]
    Base64(String),

    #[error("invalid {what}: {reason}")]
    InvalidValue { what: &'static str, reason: String },
}

impl XdrError {
    pub(crate) fn invalid(what: &'static str, reason: impl ToString) -> Self {
        XdrError::InvalidValue {
            what,
            reason: reason.to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Traits
// ---------------------------------------------------------------------------

/// A value with a canonical XDR encoding.
pub trait XdrEncode {
    /// Appends the encoding of `self` to `writer`.
    fn encode(&self, writer: &mut XdrWriter) -> Result<(), XdrError>;
}

/// A value that can be read back from its XDR encoding.
pub trait XdrDecode: Sized {
    /// Reads one value starting at the reader's cursor.
    fn decode(reader: &mut XdrReader<'_>) -> Result<Self, XdrError>;

    /// Decodes one value from `bytes` starting at `cursor`, returning the
    /// value and the cursor just past it.
    fn decode_at(bytes: &[u8], cursor: usize) -> Result<(Self, usize), XdrError> {
        let mut reader = XdrReader::at(bytes, cursor)?;
        let value = Self::decode(&mut reader)?;
        Ok((value, reader.position()))
    }
}

// Primitive impls so generic helpers (optionals, arrays) can carry them.

macro_rules! impl_primitive {
    ($ty:ty, $write:ident, $read:ident) => {
        impl XdrEncode for $ty {
            fn encode(&self, writer: &mut XdrWriter) -> Result<(), XdrError> {
                writer.$write(*self);
                Ok(())
            }
        }

        impl XdrDecode for $ty {
            fn decode(reader: &mut XdrReader<'_>) -> Result<Self, XdrError> {
                reader.$read()
            }
        }
    };
}

impl_primitive!(u32, write_u32, read_u32);
impl_primitive!(i32, write_i32, read_i32);
impl_primitive!(u64, write_u64, read_u64);
impl_primitive!(i64, write_i64, read_i64);
impl_primitive!(bool, write_bool, read_bool);

impl XdrEncode for [u8; 32] {
    fn encode(&self, writer: &mut XdrWriter) -> Result<(), XdrError> {
        writer.write_fixed_opaque(self);
        Ok(())
    }
}

impl XdrDecode for [u8; 32] {
    fn decode(reader: &mut XdrReader<'_>) -> Result<Self, XdrError> {
        reader.read_array::<32>()
    }
}

// ---------------------------------------------------------------------------
// Whole-buffer helpers
// ---------------------------------------------------------------------------

/// Encodes `value` into a fresh buffer.
pub fn to_bytes<T: XdrEncode + ?Sized>(value: &T) -> Result<Vec<u8>, XdrError> {
    let mut writer = XdrWriter::new();
    value.encode(&mut writer)?;
    Ok(writer.into_bytes())
}

/// Decodes exactly one value from `bytes`. Leftover input is an error.
pub fn from_bytes<T: XdrDecode>(bytes: &[u8]) -> Result<T, XdrError> {
    let mut reader = XdrReader::new(bytes);
    let value = T::decode(&mut reader)?;
    reader.finish()?;
    Ok(value)
}

/// Encodes `value` and wraps it in standard base64.
pub fn to_base64<T: XdrEncode + ?Sized>(value: &T) -> Result<String, XdrError> {
    Ok(BASE64.encode(to_bytes(value)?))
}

/// Decodes a base64 XDR blob into exactly one value.
pub fn from_base64<T: XdrDecode>(encoded: &str) -> Result<T, XdrError> {
    from_bytes(&decode_base64(encoded)?)
}

/// Standard base64 decoding with the error mapped into [`XdrError`].
pub fn decode_base64(encoded: &str) -> Result<Vec<u8>, XdrError> {
    BASE64
        .decode(encoded.trim())
        .map_err(|e| XdrError::Base64(e.to_string()))
}

/// Bytes of padding needed after `len` bytes of payload.
pub(crate) fn padding_for(len: usize) -> usize {
    (4 - len % 4) % 4
}
