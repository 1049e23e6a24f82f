//! Offers on the built-in order book.
//!
//! `offer_id` 0 creates a new offer; a non-zero id updates that offer, and
//! updating with amount 0 deletes it.

use serde::{Deserialize, Serialize};

use super::{operation_kind, OperationError};
use crate::amount::{to_network_amount, IntoAmount};
use crate::asset::Asset;
use crate::price::Price;
use crate::serde_util;
use crate::xdr::{XdrDecode, XdrEncode, XdrError, XdrReader, XdrWriter};

fn check_offer_id(offer_id: i64) -> Result<i64, OperationError> {
    if offer_id < 0 {
        return Err(OperationError::NegativeOfferId(offer_id));
    }
    Ok(offer_id)
}

/// Sell `amount` of `selling` at `price` units of `buying` each.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManageSellOffer {
    pub selling: Asset,
    pub buying: Asset,
    #[serde(with = "serde_util::amount")]
    pub amount: i64,
    pub price: Price,
    pub offer_id: i64,
}

impl ManageSellOffer {
    pub fn new(
        selling: Asset,
        buying: Asset,
        amount: impl IntoAmount,
        price: Price,
        offer_id: i64,
    ) -> Result<Self, OperationError> {
        Ok(Self {
            selling,
            buying,
            amount: to_network_amount(amount)?,
            price,
            offer_id: check_offer_id(offer_id)?,
        })
    }
}

impl XdrEncode for ManageSellOffer {
    fn encode(&self, writer: &mut XdrWriter) -> Result<(), XdrError> {
        self.selling.encode(writer)?;
        self.buying.encode(writer)?;
        writer.write_i64(self.amount);
        self.price.encode(writer)?;
        writer.write_i64(self.offer_id);
        Ok(())
    }
}

impl XdrDecode for ManageSellOffer {
    fn decode(reader: &mut XdrReader<'_>) -> Result<Self, XdrError> {
        Ok(Self {
            selling: Asset::decode(reader)?,
            buying: Asset::decode(reader)?,
            amount: reader.read_i64()?,
            price: Price::decode(reader)?,
            offer_id: reader.read_i64()?,
        })
    }
}

operation_kind!(ManageSellOffer);

/// Buy `buy_amount` of `buying`, paying `price` units of `selling` each.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManageBuyOffer {
    pub selling: Asset,
    pub buying: Asset,
    #[serde(with = "serde_util::amount")]
    pub buy_amount: i64,
    pub price: Price,
    pub offer_id: i64,
}

impl ManageBuyOffer {
    pub fn new(
        selling: Asset,
        buying: Asset,
        buy_amount: impl IntoAmount,
        price: Price,
        offer_id: i64,
    ) -> Result<Self, OperationError> {
        Ok(Self {
            selling,
            buying,
            buy_amount: to_network_amount(buy_amount)?,
            price,
            offer_id: check_offer_id(offer_id)?,
        })
    }
}

impl XdrEncode for ManageBuyOffer {
    fn encode(&self, writer: &mut XdrWriter) -> Result<(), XdrError> {
        self.selling.encode(writer)?;
        self.buying.encode(writer)?;
        writer.write_i64(self.buy_amount);
        self.price.encode(writer)?;
        writer.write_i64(self.offer_id);
        Ok(())
    }
}

impl XdrDecode for ManageBuyOffer {
    fn decode(reader: &mut XdrReader<'_>) -> Result<Self, XdrError> {
        Ok(Self {
            selling: Asset::decode(reader)?,
            buying: Asset::decode(reader)?,
            buy_amount: reader.read_i64()?,
            price: Price::decode(reader)?,
            offer_id: reader.read_i64()?,
        })
    }
}

operation_kind!(ManageBuyOffer);

/// A sell offer that never takes an existing offer at the same price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatePassiveSellOffer {
    pub selling: Asset,
    pub buying: Asset,
    #[serde(with = "serde_util::amount")]
    pub amount: i64,
    pub price: Price,
}

impl CreatePassiveSellOffer {
    pub fn new(
        selling: Asset,
        buying: Asset,
        amount: impl IntoAmount,
        price: Price,
    ) -> Result<Self, OperationError> {
        Ok(Self {
            selling,
            buying,
            amount: to_network_amount(amount)?,
            price,
        })
    }
}

impl XdrEncode for CreatePassiveSellOffer {
    fn encode(&self, writer: &mut XdrWriter) -> Result<(), XdrError> {
        self.selling.encode(writer)?;
        self.buying.encode(writer)?;
        writer.write_i64(self.amount);
        self.price.encode(writer)
    }
}

impl XdrDecode for CreatePassiveSellOffer {
    fn decode(reader: &mut XdrReader<'_>) -> Result<Self, XdrError> {
        Ok(Self {
            selling: Asset::decode(reader)?,
            buying: Asset::decode(reader)?,
            amount: reader.read_i64()?,
            price: Price::decode(reader)?,
        })
    }
}

operation_kind!(CreatePassiveSellOffer);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operation::Operation;
    use crate::xdr;

    const ISSUER: &str = "GCFIRY65OQE7DFP5KLNS2PF2LVZMUZYJX4OZIEQ36N2IQANUB5XVYOJR";

    fn usd() -> Asset {
        Asset::new("USD", Some(ISSUER)).unwrap()
    }

    #[test]
    fn sell_offer_tail_is_price_then_id() {
        let op = ManageSellOffer::new(Asset::native(), usd(), "100", Price::new(3, 2), 42).unwrap();
        let bytes = xdr::to_bytes(&op).unwrap();
        let tail = &bytes[bytes.len() - 16..];
        assert_eq!(&tail[..8], &[0, 0, 0, 3, 0, 0, 0, 2]);
        assert_eq!(&tail[8..], &42i64.to_be_bytes());
    }

    #[test]
    fn buy_offer_round_trip() {
        let price = Price::from_decimal("0.25").unwrap();
        let op: Operation = ManageBuyOffer::new(usd(), Asset::native(), "7.5", price, 0)
            .unwrap()
            .into();
        assert_eq!(Operation::from_xdr(&op.to_xdr().unwrap()).unwrap(), op);
    }

    #[test]
    fn passive_offer_round_trip() {
        let op = CreatePassiveSellOffer::new(usd(), Asset::native(), "1", Price::new(1, 1)).unwrap();
        let bytes = xdr::to_bytes(&op).unwrap();
        assert_eq!(xdr::from_bytes::<CreatePassiveSellOffer>(&bytes).unwrap(), op);
    }

    #[test]
    fn negative_offer_id_is_rejected() {
        assert_eq!(
            ManageSellOffer::new(Asset::native(), usd(), "1", Price::new(1, 1), -1).unwrap_err(),
            OperationError::NegativeOfferId(-1)
        );
    }
}
