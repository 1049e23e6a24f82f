//! # Assets
//!
//! An asset is either the network's native lumen or a credit issued by some
//! account. Credits come in two widths, picked by code length:
//!
//! - 1 to 4 characters: `CREDIT_ALPHANUM4`, code padded to 4 bytes
//! - 5 to 12 characters: `CREDIT_ALPHANUM12`, code padded to 12 bytes
//!
//! The width is a function of the code, never chosen by the caller, so an
//! [`Asset`] can't disagree with its own encoding.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::{ASSET_CODE4_MAX_LENGTH, ASSET_CODE_MAX_LENGTH};
use crate::crypto::{KeyError, PublicKey};
use crate::xdr::{XdrDecode, XdrEncode, XdrError, XdrReader, XdrWriter};

const ASSET_TYPE_NATIVE: i32 = 0;
const ASSET_TYPE_CREDIT_ALPHANUM4: i32 = 1;
const ASSET_TYPE_CREDIT_ALPHANUM12: i32 = 2;

/// Code shown for the native asset.
pub const NATIVE_ASSET_CODE: &str = "XLM";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssetError {
    #[error("asset code '{0}' must be 1-12 ASCII letters or digits")]
    InvalidCode(String),

    #[error("asset '{0}' needs an issuer")]
    MissingIssuer(String),

    #[error("invalid issuer: {0}")]
    InvalidIssuer(#[from] KeyError),

    #[error("cannot parse asset '{0}', expected 'native' or 'CODE:ISSUER'")]
    Unparseable(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Asset {
    Native,
    CreditAlphanum4 { code: String, issuer: PublicKey },
    CreditAlphanum12 { code: String, issuer: PublicKey },
}

impl Asset {
    pub fn native() -> Self {
        Asset::Native
    }

    /// `XLM` without an issuer is the native asset. Any other code needs one.
    pub fn new(code: &str, issuer: Option<&str>) -> Result<Self, AssetError> {
        match issuer {
            None if code == NATIVE_ASSET_CODE => Ok(Asset::Native),
            None => Err(AssetError::MissingIssuer(code.to_string())),
            Some(issuer) => Self::credit(code, PublicKey::from_account_id(issuer)?),
        }
    }

    /// A credit asset. The width follows from the code length.
    pub fn credit(code: &str, issuer: PublicKey) -> Result<Self, AssetError> {
        validate_code(code)?;
        let code = code.to_string();
        if code.len() <= ASSET_CODE4_MAX_LENGTH {
            Ok(Asset::CreditAlphanum4 { code, issuer })
        } else {
            Ok(Asset::CreditAlphanum12 { code, issuer })
        }
    }

    pub fn is_native(&self) -> bool {
        matches!(self, Asset::Native)
    }

    pub fn code(&self) -> &str {
        match self {
            Asset::Native => NATIVE_ASSET_CODE,
            Asset::CreditAlphanum4 { code, .. } | Asset::CreditAlphanum12 { code, .. } => code,
        }
    }

    pub fn issuer(&self) -> Option<&PublicKey> {
        match self {
            Asset::Native => None,
            Asset::CreditAlphanum4 { issuer, .. } | Asset::CreditAlphanum12 { issuer, .. } => {
                Some(issuer)
            }
        }
    }

    /// Horizon's name for the asset type.
    pub fn asset_type(&self) -> &'static str {
        match self {
            Asset::Native => "native",
            Asset::CreditAlphanum4 { .. } => "credit_alphanum4",
            Asset::CreditAlphanum12 { .. } => "credit_alphanum12",
        }
    }
}

impl fmt::Display for Asset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.issuer() {
            None => f.write_str("native"),
            Some(issuer) => write!(f, "{}:{}", self.code(), issuer),
        }
    }
}

impl FromStr for Asset {
    type Err = AssetError;

    /// Accepts `native`, `XLM`, or `CODE:ISSUER`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("native") || s == NATIVE_ASSET_CODE {
            return Ok(Asset::Native);
        }
        match s.split_once(':') {
            Some((code, issuer)) => Asset::new(code, Some(issuer)),
            None => Err(AssetError::Unparseable(s.to_string())),
        }
    }
}

pub(crate) fn validate_code(code: &str) -> Result<(), AssetError> {
    let ok = !code.is_empty()
        && code.len() <= ASSET_CODE_MAX_LENGTH
        && code.bytes().all(|b| b.is_ascii_alphanumeric());
    if ok {
        Ok(())
    } else {
        Err(AssetError::InvalidCode(code.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Asset codes on the wire
// ---------------------------------------------------------------------------

/// Writes a code as `opaque[width]`, right-padded with zeros.
pub(crate) fn write_asset_code(
    writer: &mut XdrWriter,
    code: &str,
    width: usize,
) -> Result<(), XdrError> {
    if code.len() > width {
        return Err(XdrError::LengthExceedsMax {
            len: code.len(),
            max: width,
        });
    }
    let mut padded = vec![0u8; width];
    padded[..code.len()].copy_from_slice(code.as_bytes());
    writer.write_fixed_opaque(&padded);
    Ok(())
}

/// Reads a fixed-width code and strips the zero padding.
pub(crate) fn read_asset_code(reader: &mut XdrReader<'_>, width: usize) -> Result<String, XdrError> {
    let raw = reader.read_fixed_opaque(width)?;
    let end = raw.iter().position(|b| *b == 0).unwrap_or(raw.len());
    if raw[end..].iter().any(|b| *b != 0) {
        return Err(XdrError::invalid("asset code", "non-zero byte after padding"));
    }
    let code = String::from_utf8(raw[..end].to_vec()).map_err(|_| XdrError::InvalidUtf8)?;
    validate_code(&code).map_err(|e| XdrError::invalid("asset code", e))?;

    let fits_width = if width == ASSET_CODE4_MAX_LENGTH {
        code.len() <= ASSET_CODE4_MAX_LENGTH
    } else {
        code.len() > ASSET_CODE4_MAX_LENGTH
    };
    if !fits_width {
        return Err(XdrError::invalid(
            "asset code",
            format!("'{code}' does not match a {width}-byte code"),
        ));
    }
    Ok(code)
}

impl XdrEncode for Asset {
    fn encode(&self, writer: &mut XdrWriter) -> Result<(), XdrError> {
        match self {
            Asset::Native => writer.write_i32(ASSET_TYPE_NATIVE),
            Asset::CreditAlphanum4 { code, issuer } => {
                writer.write_i32(ASSET_TYPE_CREDIT_ALPHANUM4);
                write_asset_code(writer, code, ASSET_CODE4_MAX_LENGTH)?;
                issuer.encode(writer)?;
            }
            Asset::CreditAlphanum12 { code, issuer } => {
                writer.write_i32(ASSET_TYPE_CREDIT_ALPHANUM12);
                write_asset_code(writer, code, ASSET_CODE_MAX_LENGTH)?;
                issuer.encode(writer)?;
            }
        }
        Ok(())
    }
}

impl XdrDecode for Asset {
    fn decode(reader: &mut XdrReader<'_>) -> Result<Self, XdrError> {
        match reader.read_i32()? {
            ASSET_TYPE_NATIVE => Ok(Asset::Native),
            ASSET_TYPE_CREDIT_ALPHANUM4 => Ok(Asset::CreditAlphanum4 {
                code: read_asset_code(reader, ASSET_CODE4_MAX_LENGTH)?,
                issuer: PublicKey::decode(reader)?,
            }),
            ASSET_TYPE_CREDIT_ALPHANUM12 => Ok(Asset::CreditAlphanum12 {
                code: read_asset_code(reader, ASSET_CODE_MAX_LENGTH)?,
                issuer: PublicKey::decode(reader)?,
            }),
            other => Err(XdrError::InvalidDiscriminant {
                kind: "asset type",
                value: other.into(),
            }),
        }
    }
}

/// Writes the `AllowTrust` asset union: type code, then the bare code.
pub(crate) fn write_trust_asset_code(writer: &mut XdrWriter, code: &str) -> Result<(), XdrError> {
    if code.len() <= ASSET_CODE4_MAX_LENGTH {
        writer.write_i32(ASSET_TYPE_CREDIT_ALPHANUM4);
        write_asset_code(writer, code, ASSET_CODE4_MAX_LENGTH)
    } else {
        writer.write_i32(ASSET_TYPE_CREDIT_ALPHANUM12);
        write_asset_code(writer, code, ASSET_CODE_MAX_LENGTH)
    }
}

/// Reads the code arm of the `AllowTrust` asset union.
pub(crate) fn read_trust_asset_code(reader: &mut XdrReader<'_>) -> Result<String, XdrError> {
    match reader.read_i32()? {
        ASSET_TYPE_CREDIT_ALPHANUM4 => read_asset_code(reader, ASSET_CODE4_MAX_LENGTH),
        ASSET_TYPE_CREDIT_ALPHANUM12 => read_asset_code(reader, ASSET_CODE_MAX_LENGTH),
        other => Err(XdrError::InvalidDiscriminant {
            kind: "allow trust asset type",
            value: other.into(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xdr;

    const ISSUER: &str = "GCFIRY65OQE7DFP5KLNS2PF2LVZMUZYJX4OZIEQ36N2IQANUB5XVYOJR";

    fn issuer() -> PublicKey {
        ISSUER.parse().unwrap()
    }

    #[test]
    fn code_length_picks_width() {
        assert!(matches!(
            Asset::credit("USD", issuer()).unwrap(),
            Asset::CreditAlphanum4 { .. }
        ));
        assert!(matches!(
            Asset::credit("USDC", issuer()).unwrap(),
            Asset::CreditAlphanum4 { .. }
        ));
        assert!(matches!(
            Asset::credit("BANANA", issuer()).unwrap(),
            Asset::CreditAlphanum12 { .. }
        ));
    }

    #[test]
    fn invalid_codes() {
        for code in ["", "ABCDEFGHIJKLM", "US D", "US-D", "ÜSD"] {
            assert!(
                matches!(Asset::credit(code, issuer()), Err(AssetError::InvalidCode(_))),
                "{code:?} should be rejected"
            );
        }
    }

    #[test]
    fn xlm_without_issuer_is_native() {
        assert_eq!(Asset::new("XLM", None).unwrap(), Asset::Native);
        assert!(matches!(
            Asset::new("USD", None),
            Err(AssetError::MissingIssuer(_))
        ));
    }

    #[test]
    fn native_is_four_bytes() {
        assert_eq!(xdr::to_bytes(&Asset::native()).unwrap(), vec![0, 0, 0, 0]);
    }

    #[test]
    fn alphanum4_pads_code() {
        let asset = Asset::credit("USD", issuer()).unwrap();
        let bytes = xdr::to_bytes(&asset).unwrap();
        assert_eq!(&bytes[..8], &[0, 0, 0, 1, b'U', b'S', b'D', 0]);
        assert_eq!(bytes.len(), 4 + 4 + 36);
        assert_eq!(xdr::from_bytes::<Asset>(&bytes).unwrap(), asset);
    }

    #[test]
    fn alphanum12_pads_code() {
        let asset = Asset::credit("BANANA", issuer()).unwrap();
        let bytes = xdr::to_bytes(&asset).unwrap();
        assert_eq!(&bytes[4..16], b"BANANA\0\0\0\0\0\0");
        assert_eq!(xdr::from_bytes::<Asset>(&bytes).unwrap(), asset);
    }

    #[test]
    fn short_code_in_wide_slot_is_rejected() {
        let mut bytes = vec![0, 0, 0, 2];
        bytes.extend_from_slice(b"USD\0\0\0\0\0\0\0\0\0");
        bytes.extend_from_slice(&xdr::to_bytes(&issuer()).unwrap());
        assert!(matches!(
            xdr::from_bytes::<Asset>(&bytes),
            Err(XdrError::InvalidValue { what: "asset code", .. })
        ));
    }

    #[test]
    fn gap_inside_code_is_rejected() {
        let mut bytes = vec![0, 0, 0, 1];
        bytes.extend_from_slice(b"U\0SD");
        bytes.extend_from_slice(&xdr::to_bytes(&issuer()).unwrap());
        assert!(xdr::from_bytes::<Asset>(&bytes).is_err());
    }

    #[test]
    fn parse_and_display() {
        let asset: Asset = format!("USD:{ISSUER}").parse().unwrap();
        assert_eq!(asset.code(), "USD");
        assert_eq!(asset.to_string(), format!("USD:{ISSUER}"));
        assert_eq!("native".parse::<Asset>().unwrap(), Asset::Native);
        assert!("USD".parse::<Asset>().is_err());
    }

    #[test]
    fn horizon_type_names() {
        assert_eq!(Asset::native().asset_type(), "native");
        assert_eq!(
            Asset::credit("ABCDE", issuer()).unwrap().asset_type(),
            "credit_alphanum12"
        );
    }
}
