//! # Memos
//!
//! Every transaction carries exactly one memo, usually `None`. Exchanges and
//! custodians use it to route a deposit to the right customer, which is why
//! some accounts refuse payments that lack one (see the memo-required check
//! in [`crate::horizon`]).
//!
//! Wire form: a 32-bit discriminant, then the arm's payload.
//!
//! | Type | Code | Payload |
//! |------|------|---------|
//! | None   | 0 | nothing |
//! | Text   | 1 | `string<28>` |
//! | Id     | 2 | `uint64` |
//! | Hash   | 3 | 32 bytes |
//! | Return | 4 | 32 bytes |

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::MEMO_TEXT_MAX_BYTES;
use crate::serde_util::hex_bytes;
use crate::xdr::{XdrDecode, XdrEncode, XdrError, XdrReader, XdrWriter};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MemoError {
    #[error("memo text is {0} bytes, the limit is 28")]
    TextTooLong(usize),

    #[error("memo hash must be 32 bytes, got {0}")]
    InvalidHashLength(usize),

    #[error("memo hash is not valid hex: {0}")]
    InvalidHex(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Memo {
    #[default]
    None,
    Text(String),
    Id(u64),
    Hash(#[serde(with = "hex_bytes")] [u8; 32]),
    Return(#[serde(with = "hex_bytes")] [u8; 32]),
}

const MEMO_NONE: i32 = 0;
const MEMO_TEXT: i32 = 1;
const MEMO_ID: i32 = 2;
const MEMO_HASH: i32 = 3;
const MEMO_RETURN: i32 = 4;

impl Memo {
    /// Text memo. The limit is 28 *bytes* of UTF-8, not 28 characters.
    pub fn text(text: impl Into<String>) -> Result<Self, MemoError> {
        let text = text.into();
        if text.len() > MEMO_TEXT_MAX_BYTES {
            return Err(MemoError::TextTooLong(text.len()));
        }
        Ok(Memo::Text(text))
    }

    pub fn id(id: u64) -> Self {
        Memo::Id(id)
    }

    pub fn hash(bytes: &[u8]) -> Result<Self, MemoError> {
        Ok(Memo::Hash(to_hash(bytes)?))
    }

    pub fn hash_hex(hex_str: &str) -> Result<Self, MemoError> {
        Self::hash(&decode_hex(hex_str)?)
    }

    pub fn return_hash(bytes: &[u8]) -> Result<Self, MemoError> {
        Ok(Memo::Return(to_hash(bytes)?))
    }

    pub fn return_hash_hex(hex_str: &str) -> Result<Self, MemoError> {
        Self::return_hash(&decode_hex(hex_str)?)
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Memo::None)
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Memo::None => "none",
            Memo::Text(_) => "text",
            Memo::Id(_) => "id",
            Memo::Hash(_) => "hash",
            Memo::Return(_) => "return",
        }
    }
}

fn to_hash(bytes: &[u8]) -> Result<[u8; 32], MemoError> {
    bytes
        .try_into()
        .map_err(|_| MemoError::InvalidHashLength(bytes.len()))
}

fn decode_hex(hex_str: &str) -> Result<Vec<u8>, MemoError> {
    hex::decode(hex_str).map_err(|e| MemoError::InvalidHex(e.to_string()))
}

impl XdrEncode for Memo {
    fn encode(&self, writer: &mut XdrWriter) -> Result<(), XdrError> {
        match self {
            Memo::None => writer.write_i32(MEMO_NONE),
            Memo::Text(text) => {
                writer.write_i32(MEMO_TEXT);
                writer.write_string(text, MEMO_TEXT_MAX_BYTES)?;
            }
            Memo::Id(id) => {
                writer.write_i32(MEMO_ID);
                writer.write_u64(*id);
            }
            Memo::Hash(hash) => {
                writer.write_i32(MEMO_HASH);
                writer.write_fixed_opaque(hash);
            }
            Memo::Return(hash) => {
                writer.write_i32(MEMO_RETURN);
                writer.write_fixed_opaque(hash);
            }
        }
        Ok(())
    }
}

impl XdrDecode for Memo {
    fn decode(reader: &mut XdrReader<'_>) -> Result<Self, XdrError> {
        Ok(match reader.read_i32()? {
            MEMO_NONE => Memo::None,
            MEMO_TEXT => Memo::Text(reader.read_string(MEMO_TEXT_MAX_BYTES)?),
            MEMO_ID => Memo::Id(reader.read_u64()?),
            MEMO_HASH => Memo::Hash(reader.read_array::<32>()?),
            MEMO_RETURN => Memo::Return(reader.read_array::<32>()?),
            other => {
                return Err(XdrError::InvalidDiscriminant {
                    kind: "memo type",
                    value: other.into(),
                })
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xdr;

    #[test]
    fn text_limit_counts_bytes() {
        assert!(Memo::text("a".repeat(28)).is_ok());
        assert_eq!(
            Memo::text("a".repeat(29)).unwrap_err(),
            MemoError::TextTooLong(29)
        );
        // 10 three-byte characters: 10 chars, 30 bytes.
        assert_eq!(
            Memo::text("€".repeat(10)).unwrap_err(),
            MemoError::TextTooLong(30)
        );
    }

    #[test]
    fn none_is_four_zero_bytes() {
        assert_eq!(xdr::to_bytes(&Memo::None).unwrap(), vec![0, 0, 0, 0]);
    }

    #[test]
    fn text_wire_form() {
        let bytes = xdr::to_bytes(&Memo::text("hi").unwrap()).unwrap();
        assert_eq!(bytes, vec![0, 0, 0, 1, 0, 0, 0, 2, b'h', b'i', 0, 0]);
    }

    #[test]
    fn id_wire_form() {
        let bytes = xdr::to_bytes(&Memo::id(1)).unwrap();
        assert_eq!(bytes, vec![0, 0, 0, 2, 0, 0, 0, 0, 0, 0, 0, 1]);
    }

    #[test]
    fn hash_and_return_round_trip() {
        for memo in [
            Memo::hash(&[0xaa; 32]).unwrap(),
            Memo::return_hash(&[0xbb; 32]).unwrap(),
        ] {
            let bytes = xdr::to_bytes(&memo).unwrap();
            assert_eq!(bytes.len(), 36);
            assert_eq!(xdr::from_bytes::<Memo>(&bytes).unwrap(), memo);
        }
    }

    #[test]
    fn hash_must_be_32_bytes() {
        assert_eq!(
            Memo::hash(&[0u8; 31]).unwrap_err(),
            MemoError::InvalidHashLength(31)
        );
        assert!(matches!(
            Memo::hash_hex("zz"),
            Err(MemoError::InvalidHex(_))
        ));
    }

    #[test]
    fn unknown_memo_type_is_rejected() {
        assert!(matches!(
            xdr::from_bytes::<Memo>(&[0, 0, 0, 5]),
            Err(XdrError::InvalidDiscriminant { kind: "memo type", value: 5 })
        ));
    }

    #[test]
    fn decoded_text_over_limit_is_rejected() {
        let mut bytes = vec![0, 0, 0, 1, 0, 0, 0, 29];
        bytes.extend_from_slice(&[b'a'; 32]);
        assert!(matches!(
            xdr::from_bytes::<Memo>(&bytes),
            Err(XdrError::LengthExceedsMax { len: 29, max: 28 })
        ));
    }

    #[test]
    fn serde_shape() {
        let json = serde_json::to_value(Memo::id(7)).unwrap();
        assert_eq!(json, serde_json::json!({"type": "id", "value": 7}));
        assert_eq!(
            serde_json::to_value(Memo::None).unwrap(),
            serde_json::json!({"type": "none"})
        );
    }
}
