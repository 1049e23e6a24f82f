//! Payments, direct and along a path of intermediate assets.
//!
//! Path payments come in two flavours that fix opposite ends:
//!
//! - **strict receive**: the destination gets exactly `dest_amount`, the
//!   sender spends at most `send_max`.
//! - **strict send**: the sender spends exactly `send_amount`, the
//!   destination gets at least `dest_min`.

use serde::{Deserialize, Serialize};

use super::{operation_kind, OperationError};
use crate::account::MuxedAccount;
use crate::amount::{to_network_amount, IntoAmount};
use crate::asset::Asset;
use crate::config::MAX_PATH_LENGTH;
use crate::serde_util;
use crate::xdr::{XdrDecode, XdrEncode, XdrError, XdrReader, XdrWriter};

fn check_path(path: &[Asset]) -> Result<(), OperationError> {
    if path.len() > MAX_PATH_LENGTH {
        return Err(OperationError::PathTooLong(path.len()));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Payment
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payment {
    pub destination: MuxedAccount,
    pub asset: Asset,
    #[serde(with = "serde_util::amount")]
    pub amount: i64,
}

impl Payment {
    pub fn new(destination: MuxedAccount, asset: Asset, amount: impl IntoAmount) -> Result<Self, OperationError> {
        Ok(Self {
            destination,
            asset,
            amount: to_network_amount(amount)?,
        })
    }
}

impl XdrEncode for Payment {
    fn encode(&self, writer: &mut XdrWriter) -> Result<(), XdrError> {
        self.destination.encode(writer)?;
        self.asset.encode(writer)?;
        writer.write_i64(self.amount);
        Ok(())
    }
}

impl XdrDecode for Payment {
    fn decode(reader: &mut XdrReader<'_>) -> Result<Self, XdrError> {
        Ok(Self {
            destination: MuxedAccount::decode(reader)?,
            asset: Asset::decode(reader)?,
            amount: reader.read_i64()?,
        })
    }
}

operation_kind!(Payment);

// ---------------------------------------------------------------------------
// PathPaymentStrictReceive
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathPaymentStrictReceive {
    pub send_asset: Asset,
    #[serde(with = "serde_util::amount")]
    pub send_max: i64,
    pub destination: MuxedAccount,
    pub dest_asset: Asset,
    #[serde(with = "serde_util::amount")]
    pub dest_amount: i64,
    pub path: Vec<Asset>,
}

impl PathPaymentStrictReceive {
    pub fn new(
        destination: MuxedAccount,
        send_asset: Asset,
        send_max: impl IntoAmount,
        dest_asset: Asset,
        dest_amount: impl IntoAmount,
        path: Vec<Asset>,
    ) -> Result<Self, OperationError> {
        check_path(&path)?;
        Ok(Self {
            send_asset,
            send_max: to_network_amount(send_max)?,
            destination,
            dest_asset,
            dest_amount: to_network_amount(dest_amount)?,
            path,
        })
    }
}

impl XdrEncode for PathPaymentStrictReceive {
    fn encode(&self, writer: &mut XdrWriter) -> Result<(), XdrError> {
        self.send_asset.encode(writer)?;
        writer.write_i64(self.send_max);
        self.destination.encode(writer)?;
        self.dest_asset.encode(writer)?;
        writer.write_i64(self.dest_amount);
        writer.write_var_array(&self.path, MAX_PATH_LENGTH)
    }
}

impl XdrDecode for PathPaymentStrictReceive {
    fn decode(reader: &mut XdrReader<'_>) -> Result<Self, XdrError> {
        Ok(Self {
            send_asset: Asset::decode(reader)?,
            send_max: reader.read_i64()?,
            destination: MuxedAccount::decode(reader)?,
            dest_asset: Asset::decode(reader)?,
            dest_amount: reader.read_i64()?,
            path: reader.read_var_array(MAX_PATH_LENGTH)?,
        })
    }
}

operation_kind!(PathPaymentStrictReceive);

// ---------------------------------------------------------------------------
// PathPaymentStrictSend
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathPaymentStrictSend {
    pub send_asset: Asset,
    #[serde(with = "serde_util::amount")]
    pub send_amount: i64,
    pub destination: MuxedAccount,
    pub dest_asset: Asset,
    #[serde(with = "serde_util::amount")]
    pub dest_min: i64,
    pub path: Vec<Asset>,
}

impl PathPaymentStrictSend {
    pub fn new(
        destination: MuxedAccount,
        send_asset: Asset,
        send_amount: impl IntoAmount,
        dest_asset: Asset,
        dest_min: impl IntoAmount,
        path: Vec<Asset>,
    ) -> Result<Self, OperationError> {
        check_path(&path)?;
        Ok(Self {
            send_asset,
            send_amount: to_network_amount(send_amount)?,
            destination,
            dest_asset,
            dest_min: to_network_amount(dest_min)?,
            path,
        })
    }
}

impl XdrEncode for PathPaymentStrictSend {
    fn encode(&self, writer: &mut XdrWriter) -> Result<(), XdrError> {
        self.send_asset.encode(writer)?;
        writer.write_i64(self.send_amount);
        self.destination.encode(writer)?;
        self.dest_asset.encode(writer)?;
        writer.write_i64(self.dest_min);
        writer.write_var_array(&self.path, MAX_PATH_LENGTH)
    }
}

impl XdrDecode for PathPaymentStrictSend {
    fn decode(reader: &mut XdrReader<'_>) -> Result<Self, XdrError> {
        Ok(Self {
            send_asset: Asset::decode(reader)?,
            send_amount: reader.read_i64()?,
            destination: MuxedAccount::decode(reader)?,
            dest_asset: Asset::decode(reader)?,
            dest_min: reader.read_i64()?,
            path: reader.read_var_array(MAX_PATH_LENGTH)?,
        })
    }
}

operation_kind!(PathPaymentStrictSend);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operation::{Operation, OperationKind, OperationType};
    use crate::xdr;

    const DEST: &str = "GCATS5YOVB6ROX2WUNKGNQ2MP3GMXDMKSG2O4N5CLX3A6W4PZGZZI55U";
    const ISSUER: &str = "GCFIRY65OQE7DFP5KLNS2PF2LVZMUZYJX4OZIEQ36N2IQANUB5XVYOJR";

    fn usd() -> Asset {
        Asset::new("USD", Some(ISSUER)).unwrap()
    }

    fn eur() -> Asset {
        Asset::new("EUR", Some(ISSUER)).unwrap()
    }

    #[test]
    fn payment_amount_is_scaled() {
        let op = Payment::new(DEST.parse().unwrap(), usd(), "0.0000001").unwrap();
        assert_eq!(op.amount, 1);
        assert_eq!(Payment::TYPE, OperationType::Payment);
    }

    #[test]
    fn strict_receive_round_trip() {
        let op = PathPaymentStrictReceive::new(
            DEST.parse().unwrap(),
            Asset::native(),
            "10",
            usd(),
            "5.5",
            vec![eur()],
        )
        .unwrap();
        let operation: Operation = op.into();
        let decoded = Operation::from_xdr(&operation.to_xdr().unwrap()).unwrap();
        assert_eq!(decoded, operation);
        assert_eq!(decoded.operation_type(), OperationType::PathPaymentStrictReceive);
    }

    #[test]
    fn strict_send_round_trip() {
        let op = PathPaymentStrictSend::new(
            DEST.parse().unwrap(),
            usd(),
            "3",
            Asset::native(),
            "1",
            vec![],
        )
        .unwrap();
        let bytes = xdr::to_bytes(&op).unwrap();
        assert_eq!(xdr::from_bytes::<PathPaymentStrictSend>(&bytes).unwrap(), op);
        // Empty path encodes as a zero count at the very end.
        assert_eq!(&bytes[bytes.len() - 4..], &[0, 0, 0, 0]);
    }

    #[test]
    fn path_longer_than_five_is_rejected() {
        let path = vec![eur(); 6];
        assert_eq!(
            PathPaymentStrictSend::new(DEST.parse().unwrap(), usd(), "1", usd(), "1", path)
                .unwrap_err(),
            OperationError::PathTooLong(6)
        );
    }

    #[test]
    fn negative_amount_is_rejected() {
        assert!(matches!(
            Payment::new(DEST.parse().unwrap(), usd(), "-5"),
            Err(OperationError::Amount(_))
        ));
    }
}
