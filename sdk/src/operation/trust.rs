//! Trustlines: opting in to hold a credit asset, and the issuer's side of
//! authorizing holders.

use serde::{Deserialize, Serialize};

use super::{operation_kind, OperationError};
use crate::amount::{to_network_amount, IntoAmount};
use crate::asset::{read_trust_asset_code, validate_code, write_trust_asset_code, Asset};
use crate::crypto::PublicKey;
use crate::serde_util;
use crate::xdr::{XdrDecode, XdrEncode, XdrError, XdrReader, XdrWriter};

// ---------------------------------------------------------------------------
// ChangeTrust
// ---------------------------------------------------------------------------

/// Creates, updates or (with limit 0) removes a trustline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeTrust {
    pub asset: Asset,
    #[serde(with = "serde_util::amount")]
    pub limit: i64,
}

impl ChangeTrust {
    /// A trustline with the largest possible limit.
    pub fn new(asset: Asset) -> Self {
        Self {
            asset,
            limit: i64::MAX,
        }
    }

    pub fn with_limit(asset: Asset, limit: impl IntoAmount) -> Result<Self, OperationError> {
        Ok(Self {
            asset,
            limit: to_network_amount(limit)?,
        })
    }
}

impl XdrEncode for ChangeTrust {
    fn encode(&self, writer: &mut XdrWriter) -> Result<(), XdrError> {
        self.asset.encode(writer)?;
        writer.write_i64(self.limit);
        Ok(())
    }
}

impl XdrDecode for ChangeTrust {
    fn decode(reader: &mut XdrReader<'_>) -> Result<Self, XdrError> {
        Ok(Self {
            asset: Asset::decode(reader)?,
            limit: reader.read_i64()?,
        })
    }
}

operation_kind!(ChangeTrust);

// ---------------------------------------------------------------------------
// AllowTrust
// ---------------------------------------------------------------------------

/// The `authorize` flag of [`AllowTrust`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u32)]
pub enum TrustLineAuthorization {
    Unauthorized = 0,
    Authorized = 1,
    /// Keeps existing offers and balances but allows no new activity.
    AuthorizedToMaintainLiabilities = 2,
}

impl TrustLineAuthorization {
    pub fn from_flag(flag: u32) -> Option<Self> {
        match flag {
            0 => Some(Self::Unauthorized),
            1 => Some(Self::Authorized),
            2 => Some(Self::AuthorizedToMaintainLiabilities),
            _ => None,
        }
    }
}

impl From<bool> for TrustLineAuthorization {
    fn from(authorize: bool) -> Self {
        if authorize {
            Self::Authorized
        } else {
            Self::Unauthorized
        }
    }
}

/// Sets whether `trustor` may hold the source's asset `asset_code`.
///
/// The source account is the issuer, so only the code goes on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllowTrust {
    pub trustor: PublicKey,
    pub asset_code: String,
    pub authorize: TrustLineAuthorization,
}

impl AllowTrust {
    pub fn new(
        trustor: PublicKey,
        asset_code: &str,
        authorize: impl Into<TrustLineAuthorization>,
    ) -> Result<Self, OperationError> {
        validate_code(asset_code)?;
        Ok(Self {
            trustor,
            asset_code: asset_code.to_string(),
            authorize: authorize.into(),
        })
    }
}

impl XdrEncode for AllowTrust {
    fn encode(&self, writer: &mut XdrWriter) -> Result<(), XdrError> {
        self.trustor.encode(writer)?;
        write_trust_asset_code(writer, &self.asset_code)?;
        writer.write_u32(self.authorize as u32);
        Ok(())
    }
}

impl XdrDecode for AllowTrust {
    fn decode(reader: &mut XdrReader<'_>) -> Result<Self, XdrError> {
        let trustor = PublicKey::decode(reader)?;
        let asset_code = read_trust_asset_code(reader)?;
        let flag = reader.read_u32()?;
        let authorize =
            TrustLineAuthorization::from_flag(flag).ok_or(XdrError::InvalidDiscriminant {
                kind: "trustline authorization",
                value: flag.into(),
            })?;
        Ok(Self {
            trustor,
            asset_code,
            authorize,
        })
    }
}

operation_kind!(AllowTrust);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asset::AssetError;
    use crate::operation::Operation;
    use crate::xdr;

    const TRUSTOR: &str = "GCATS5YOVB6ROX2WUNKGNQ2MP3GMXDMKSG2O4N5CLX3A6W4PZGZZI55U";
    const ISSUER: &str = "GCFIRY65OQE7DFP5KLNS2PF2LVZMUZYJX4OZIEQ36N2IQANUB5XVYOJR";

    #[test]
    fn change_trust_defaults_to_max_limit() {
        let op = ChangeTrust::new(Asset::new("USD", Some(ISSUER)).unwrap());
        assert_eq!(op.limit, i64::MAX);
        let json = serde_json::to_value(&op).unwrap();
        assert_eq!(json["limit"], "922337203685.4775807");
    }

    #[test]
    fn change_trust_zero_limit_removes() {
        let op = ChangeTrust::with_limit(Asset::new("USD", Some(ISSUER)).unwrap(), "0").unwrap();
        let bytes = xdr::to_bytes(&op).unwrap();
        assert_eq!(&bytes[bytes.len() - 8..], &[0; 8]);
    }

    #[test]
    fn allow_trust_short_code() {
        let op = AllowTrust::new(TRUSTOR.parse().unwrap(), "USD", true).unwrap();
        let bytes = xdr::to_bytes(&op).unwrap();
        // trustor (36), type 1, code padded to 4, authorize
        assert_eq!(bytes.len(), 36 + 4 + 4 + 4);
        assert_eq!(&bytes[36..44], &[0, 0, 0, 1, b'U', b'S', b'D', 0]);
        assert_eq!(&bytes[44..], &[0, 0, 0, 1]);
    }

    #[test]
    fn allow_trust_long_code_round_trip() {
        let op: Operation = AllowTrust::new(
            TRUSTOR.parse().unwrap(),
            "BANANA",
            TrustLineAuthorization::AuthorizedToMaintainLiabilities,
        )
        .unwrap()
        .into();
        assert_eq!(Operation::from_xdr(&op.to_xdr().unwrap()).unwrap(), op);
    }

    #[test]
    fn allow_trust_rejects_bad_code() {
        assert!(matches!(
            AllowTrust::new(TRUSTOR.parse().unwrap(), "TOOLONGASSETCODE", false),
            Err(OperationError::Asset(AssetError::InvalidCode(_)))
        ));
    }

    #[test]
    fn unknown_authorization_flag_is_rejected() {
        let op = AllowTrust::new(TRUSTOR.parse().unwrap(), "USD", false).unwrap();
        let mut bytes = xdr::to_bytes(&op).unwrap();
        let last = bytes.len() - 1;
        bytes[last] = 3;
        assert!(matches!(
            xdr::from_bytes::<AllowTrust>(&bytes),
            Err(XdrError::InvalidDiscriminant { value: 3, .. })
        ));
    }
}
