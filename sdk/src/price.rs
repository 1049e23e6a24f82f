//! Offer prices as 32-bit rationals.
//!
//! Offers carry their price as `n / d` with both parts in `int32`. Decimal
//! prices are converted with the continued-fraction best approximation,
//! stopping before either term leaves the `int32` range.

use std::fmt;

use rust_decimal::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::amount::{AmountError, IntoAmount};
use crate::xdr::{XdrDecode, XdrEncode, XdrError, XdrReader, XdrWriter};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PriceError {
    #[error("no 32-bit rational approximation exists for {0}")]
    NoApproximation(String),

    #[error("price {0} is negative")]
    Negative(String),

    #[error(transparent)]
    Amount(#[from] AmountError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Price {
    pub n: i32,
    pub d: i32,
}

impl Price {
    pub fn new(n: i32, d: i32) -> Self {
        Self { n, d }
    }

    /// Best `n/d` approximation of a decimal price such as `"1.5"`.
    pub fn from_decimal(value: impl IntoAmount) -> Result<Self, PriceError> {
        let value = value.into_decimal()?;
        if value.is_sign_negative() && !value.is_zero() {
            return Err(PriceError::Negative(value.to_string()));
        }

        let max = Decimal::from(i32::MAX);
        // (h, k) for the two most recent convergents.
        let (mut h_prev, mut k_prev) = (Decimal::ZERO, Decimal::ONE);
        let (mut h, mut k) = (Decimal::ONE, Decimal::ZERO);
        let mut number = value;

        while number <= max {
            let a = number.floor();
            let f = number - a;
            let (Some(h_next), Some(k_next)) = (
                a.checked_mul(h).and_then(|x| x.checked_add(h_prev)),
                a.checked_mul(k).and_then(|x| x.checked_add(k_prev)),
            ) else {
                break;
            };
            if h_next > max || k_next > max {
                break;
            }
            (h_prev, k_prev, h, k) = (h, k, h_next, k_next);
            if f.is_zero() {
                break;
            }
            match Decimal::ONE.checked_div(f) {
                Some(next) => number = next,
                None => break,
            }
        }

        match (h.to_i32(), k.to_i32()) {
            (Some(n), Some(d)) if n != 0 && d != 0 => Ok(Self { n, d }),
            _ => Err(PriceError::NoApproximation(value.to_string())),
        }
    }

    /// The decimal value without trailing zeros, or `None` when `d` is zero.
    pub fn to_decimal(&self) -> Option<Decimal> {
        Decimal::from(self.n)
            .checked_div(Decimal::from(self.d))
            .map(|d| d.normalize())
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.n, self.d)
    }
}

impl XdrEncode for Price {
    fn encode(&self, writer: &mut XdrWriter) -> Result<(), XdrError> {
        writer.write_i32(self.n);
        writer.write_i32(self.d);
        Ok(())
    }
}

impl XdrDecode for Price {
    fn decode(reader: &mut XdrReader<'_>) -> Result<Self, XdrError> {
        Ok(Self {
            n: reader.read_i32()?,
            d: reader.read_i32()?,
        })
    }
}
