//! # Operations
//!
//! An operation is one ledger mutation: pay someone, place an offer, add a
//! signer. A transaction carries 1 to 100 of them and applies them
//! atomically.
//!
//! ## Wire form
//!
//! ```text
//! Operation {
//!     MuxedAccount* sourceAccount;   // optional override of the tx source
//!     union switch (OperationType type) {
//!         case CREATE_ACCOUNT: CreateAccountOp;
//!         case PAYMENT:        PaymentOp;
//!         ...
//!     } body;
//! }
//! ```
//!
//! ## The registry
//!
//! The set of operation kinds is closed: [`OperationBody`] has one variant
//! per kind, and decoding dispatches on the type code with a single `match`.
//! A type code outside that set is an [`XdrError::UnknownOperationType`], not
//! a silent skip.
//!
//! Every body type implements [`OperationKind`], which ties it to its type
//! code and to its wire encoding.

mod account;
mod offer;
mod options;
mod payment;
mod trust;

pub use account::{AccountMerge, BumpSequence, CreateAccount, Inflation, ManageData};
pub use offer::{CreatePassiveSellOffer, ManageBuyOffer, ManageSellOffer};
pub use options::{flags, SetOptions};
pub use payment::{PathPaymentStrictReceive, PathPaymentStrictSend, Payment};
pub use trust::{AllowTrust, ChangeTrust, TrustLineAuthorization};

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::account::MuxedAccount;
use crate::amount::AmountError;
use crate::asset::AssetError;
use crate::price::PriceError;
use crate::xdr::{self, XdrDecode, XdrEncode, XdrError, XdrReader, XdrWriter};

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors raised while constructing an operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OperationError {
    #[error(transparent)]
    Amount(#[from] AmountError),

    #[error(transparent)]
    Asset(#[from] AssetError),

    #[error(transparent)]
    Price(#[from] PriceError),

    #[error("payment path holds {0} assets, at most 5 are allowed")]
    PathTooLong(usize),

    #[error("data entry name must be 1 to 64 bytes, got {0}")]
    InvalidDataName(usize),

    #[error("data entry value must be at most 64 bytes, got {0}")]
    DataValueTooLong(usize),

    #[error("home domain must be at most 32 bytes, got {0}")]
    HomeDomainTooLong(usize),

    #[error("offer id must not be negative, got {0}")]
    NegativeOfferId(i64),
}

// ---------------------------------------------------------------------------
// Operation types
// ---------------------------------------------------------------------------

/// XDR `OperationType` codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(i32)]
pub enum OperationType {
    CreateAccount = 0,
    Payment = 1,
    PathPaymentStrictReceive = 2,
    ManageSellOffer = 3,
    CreatePassiveSellOffer = 4,
    SetOptions = 5,
    ChangeTrust = 6,
    AllowTrust = 7,
    AccountMerge = 8,
    Inflation = 9,
    ManageData = 10,
    BumpSequence = 11,
    ManageBuyOffer = 12,
    PathPaymentStrictSend = 13,
}

impl OperationType {
    pub const ALL: [OperationType; 14] = [
        OperationType::CreateAccount,
        OperationType::Payment,
        OperationType::PathPaymentStrictReceive,
        OperationType::ManageSellOffer,
        OperationType::CreatePassiveSellOffer,
        OperationType::SetOptions,
        OperationType::ChangeTrust,
        OperationType::AllowTrust,
        OperationType::AccountMerge,
        OperationType::Inflation,
        OperationType::ManageData,
        OperationType::BumpSequence,
        OperationType::ManageBuyOffer,
        OperationType::PathPaymentStrictSend,
    ];

    pub fn code(self) -> i32 {
        self as i32
    }

    pub fn from_code(code: i32) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.code() == code)
    }

    /// Horizon's snake_case name.
    pub fn name(self) -> &'static str {
        match self {
            OperationType::CreateAccount => "create_account",
            OperationType::Payment => "payment",
            OperationType::PathPaymentStrictReceive => "path_payment_strict_receive",
            OperationType::ManageSellOffer => "manage_sell_offer",
            OperationType::CreatePassiveSellOffer => "create_passive_sell_offer",
            OperationType::SetOptions => "set_options",
            OperationType::ChangeTrust => "change_trust",
            OperationType::AllowTrust => "allow_trust",
            OperationType::AccountMerge => "account_merge",
            OperationType::Inflation => "inflation",
            OperationType::ManageData => "manage_data",
            OperationType::BumpSequence => "bump_sequence",
            OperationType::ManageBuyOffer => "manage_buy_offer",
            OperationType::PathPaymentStrictSend => "path_payment_strict_send",
        }
    }
}

impl fmt::Display for OperationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A body type that belongs to exactly one operation kind.
pub trait OperationKind: XdrEncode + XdrDecode + Into<OperationBody> {
    const TYPE: OperationType;

    fn type_code() -> i32 {
        Self::TYPE.code()
    }
}

// ---------------------------------------------------------------------------
// OperationBody
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OperationBody {
    CreateAccount(CreateAccount),
    Payment(Payment),
    PathPaymentStrictReceive(PathPaymentStrictReceive),
    ManageSellOffer(ManageSellOffer),
    CreatePassiveSellOffer(CreatePassiveSellOffer),
    SetOptions(SetOptions),
    ChangeTrust(ChangeTrust),
    AllowTrust(AllowTrust),
    AccountMerge(AccountMerge),
    Inflation,
    ManageData(ManageData),
    BumpSequence(BumpSequence),
    ManageBuyOffer(ManageBuyOffer),
    PathPaymentStrictSend(PathPaymentStrictSend),
}

impl OperationBody {
    pub fn operation_type(&self) -> OperationType {
        match self {
            OperationBody::CreateAccount(_) => CreateAccount::TYPE,
            OperationBody::Payment(_) => Payment::TYPE,
            OperationBody::PathPaymentStrictReceive(_) => PathPaymentStrictReceive::TYPE,
            OperationBody::ManageSellOffer(_) => ManageSellOffer::TYPE,
            OperationBody::CreatePassiveSellOffer(_) => CreatePassiveSellOffer::TYPE,
            OperationBody::SetOptions(_) => SetOptions::TYPE,
            OperationBody::ChangeTrust(_) => ChangeTrust::TYPE,
            OperationBody::AllowTrust(_) => AllowTrust::TYPE,
            OperationBody::AccountMerge(_) => AccountMerge::TYPE,
            OperationBody::Inflation => Inflation::TYPE,
            OperationBody::ManageData(_) => ManageData::TYPE,
            OperationBody::BumpSequence(_) => BumpSequence::TYPE,
            OperationBody::ManageBuyOffer(_) => ManageBuyOffer::TYPE,
            OperationBody::PathPaymentStrictSend(_) => PathPaymentStrictSend::TYPE,
        }
    }

    /// The account that receives funds, for the kinds that move them to
    /// someone else: payments, both path payments and account merges.
    pub fn destination(&self) -> Option<&MuxedAccount> {
        match self {
            OperationBody::Payment(op) => Some(&op.destination),
            OperationBody::PathPaymentStrictReceive(op) => Some(&op.destination),
            OperationBody::PathPaymentStrictSend(op) => Some(&op.destination),
            OperationBody::AccountMerge(op) => Some(&op.destination),
            _ => None,
        }
    }

    fn encode_body(&self, writer: &mut XdrWriter) -> Result<(), XdrError> {
        match self {
            OperationBody::CreateAccount(op) => op.encode(writer),
            OperationBody::Payment(op) => op.encode(writer),
            OperationBody::PathPaymentStrictReceive(op) => op.encode(writer),
            OperationBody::ManageSellOffer(op) => op.encode(writer),
            OperationBody::CreatePassiveSellOffer(op) => op.encode(writer),
            OperationBody::SetOptions(op) => op.encode(writer),
            OperationBody::ChangeTrust(op) => op.encode(writer),
            OperationBody::AllowTrust(op) => op.encode(writer),
            OperationBody::AccountMerge(op) => op.encode(writer),
            OperationBody::Inflation => Inflation.encode(writer),
            OperationBody::ManageData(op) => op.encode(writer),
            OperationBody::BumpSequence(op) => op.encode(writer),
            OperationBody::ManageBuyOffer(op) => op.encode(writer),
            OperationBody::PathPaymentStrictSend(op) => op.encode(writer),
        }
    }

    fn decode_body(kind: OperationType, reader: &mut XdrReader<'_>) -> Result<Self, XdrError> {
        fn read<T: OperationKind>(reader: &mut XdrReader<'_>) -> Result<OperationBody, XdrError> {
            Ok(T::decode(reader)?.into())
        }

        match kind {
            OperationType::CreateAccount => read::<CreateAccount>(reader),
            OperationType::Payment => read::<Payment>(reader),
            OperationType::PathPaymentStrictReceive => read::<PathPaymentStrictReceive>(reader),
            OperationType::ManageSellOffer => read::<ManageSellOffer>(reader),
            OperationType::CreatePassiveSellOffer => read::<CreatePassiveSellOffer>(reader),
            OperationType::SetOptions => read::<SetOptions>(reader),
            OperationType::ChangeTrust => read::<ChangeTrust>(reader),
            OperationType::AllowTrust => read::<AllowTrust>(reader),
            OperationType::AccountMerge => read::<AccountMerge>(reader),
            OperationType::Inflation => read::<Inflation>(reader),
            OperationType::ManageData => read::<ManageData>(reader),
            OperationType::BumpSequence => read::<BumpSequence>(reader),
            OperationType::ManageBuyOffer => read::<ManageBuyOffer>(reader),
            OperationType::PathPaymentStrictSend => read::<PathPaymentStrictSend>(reader),
        }
    }
}

impl XdrEncode for OperationBody {
    fn encode(&self, writer: &mut XdrWriter) -> Result<(), XdrError> {
        writer.write_i32(self.operation_type().code());
        self.encode_body(writer)
    }
}

impl XdrDecode for OperationBody {
    fn decode(reader: &mut XdrReader<'_>) -> Result<Self, XdrError> {
        let code = reader.read_i32()?;
        let kind = OperationType::from_code(code).ok_or(XdrError::UnknownOperationType(code))?;
        Self::decode_body(kind, reader)
    }
}

// ---------------------------------------------------------------------------
// Operation
// ---------------------------------------------------------------------------

/// An operation body plus an optional source account override.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Operation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<MuxedAccount>,
    #[serde(flatten)]
    pub body: OperationBody,
}

impl Operation {
    pub fn new(body: impl Into<OperationBody>) -> Self {
        Self {
            source: None,
            body: body.into(),
        }
    }

    /// Runs this operation on behalf of `source` instead of the tx source.
    pub fn with_source(mut self, source: MuxedAccount) -> Self {
        self.source = Some(source);
        self
    }

    pub fn operation_type(&self) -> OperationType {
        self.body.operation_type()
    }

    pub fn type_code(&self) -> i32 {
        self.operation_type().code()
    }

    pub fn to_xdr(&self) -> Result<String, XdrError> {
        xdr::to_base64(self)
    }

    pub fn from_xdr(encoded: &str) -> Result<Self, XdrError> {
        xdr::from_base64(encoded)
    }
}

impl From<OperationBody> for Operation {
    fn from(body: OperationBody) -> Self {
        Operation::new(body)
    }
}

impl XdrEncode for Operation {
    fn encode(&self, writer: &mut XdrWriter) -> Result<(), XdrError> {
        writer.write_optional(self.source.as_ref())?;
        self.body.encode(writer)
    }
}

impl XdrDecode for Operation {
    fn decode(reader: &mut XdrReader<'_>) -> Result<Self, XdrError> {
        Ok(Self {
            source: reader.read_optional()?,
            body: OperationBody::decode(reader)?,
        })
    }
}

/// Wires a body type into [`OperationBody`], [`Operation`] and [`OperationKind`].
macro_rules! operation_kind {
    ($ty:ident) => {
        impl From<$ty> for $crate::operation::OperationBody {
            fn from(op: $ty) -> Self {
                $crate::operation::OperationBody::$ty(op)
            }
        }

        impl From<$ty> for $crate::operation::Operation {
            fn from(op: $ty) -> Self {
                $crate::operation::Operation::new(op)
            }
        }

        impl $crate::operation::OperationKind for $ty {
            const TYPE: $crate::operation::OperationType =
                $crate::operation::OperationType::$ty;
        }
    };
}

pub(crate) use operation_kind;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asset::Asset;

    const DEST: &str = "GCATS5YOVB6ROX2WUNKGNQ2MP3GMXDMKSG2O4N5CLX3A6W4PZGZZI55U";
    const SOURCE: &str = "GCFIRY65OQE7DFP5KLNS2PF2LVZMUZYJX4OZIEQ36N2IQANUB5XVYOJR";

    fn payment() -> Operation {
        Payment::new(DEST.parse().unwrap(), Asset::native(), "10.5")
            .unwrap()
            .into()
    }

    #[test]
    fn type_codes_round_trip() {
        for (i, kind) in OperationType::ALL.iter().enumerate() {
            assert_eq!(kind.code(), i as i32);
            assert_eq!(OperationType::from_code(i as i32), Some(*kind));
        }
        assert_eq!(OperationType::from_code(14), None);
        assert_eq!(OperationType::from_code(-1), None);
        assert_eq!(Payment::type_code(), 1);
        assert_eq!(Operation::new(BumpSequence::new(1)).type_code(), 11);
    }

    #[test]
    fn payment_operation_wire_form() {
        let bytes = crate::xdr::to_bytes(&payment()).unwrap();
        // no source, PAYMENT, ed25519 destination, native asset, amount
        let mut expected = vec![0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 0, 0];
        expected.extend_from_slice(DEST.parse::<MuxedAccount>().unwrap().ed25519().as_bytes());
        expected.extend_from_slice(&[0, 0, 0, 0]);
        expected.extend_from_slice(&105_000_000i64.to_be_bytes());
        assert_eq!(bytes, expected);
    }

    #[test]
    fn source_override_round_trips() {
        let op = payment().with_source(SOURCE.parse().unwrap());
        let decoded = Operation::from_xdr(&op.to_xdr().unwrap()).unwrap();
        assert_eq!(decoded, op);
        assert_eq!(decoded.source.unwrap().account_id(), SOURCE);
    }

    #[test]
    fn unknown_type_code_is_rejected() {
        let bytes = [0, 0, 0, 0, 0, 0, 0, 99];
        assert_eq!(
            crate::xdr::from_bytes::<Operation>(&bytes).unwrap_err(),
            XdrError::UnknownOperationType(99)
        );
    }

    #[test]
    fn inflation_has_empty_body() {
        let op = Operation::new(Inflation);
        assert_eq!(
            crate::xdr::to_bytes(&op).unwrap(),
            vec![0, 0, 0, 0, 0, 0, 0, 9]
        );
    }

    #[test]
    fn destination_is_reported_for_fund_movers() {
        assert!(payment().body.destination().is_some());
        assert!(Operation::new(BumpSequence::new(1)).body.destination().is_none());
    }

    #[test]
    fn json_is_flat_and_tagged() {
        let json = serde_json::to_value(payment()).unwrap();
        assert_eq!(json["type"], "payment");
        assert_eq!(json["destination"], DEST);
        assert_eq!(json["amount"], "10.5");
        assert!(json.get("source").is_none());
    }
}
