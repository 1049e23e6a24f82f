//! Operations that create, merge or tweak accounts.

use serde::{Deserialize, Serialize};

use super::{operation_kind, OperationBody, OperationError, OperationKind, OperationType};
use crate::account::MuxedAccount;
use crate::amount::{to_network_amount, IntoAmount};
use crate::config::{DATA_NAME_MAX_BYTES, DATA_VALUE_MAX_BYTES};
use crate::crypto::PublicKey;
use crate::serde_util;
use crate::xdr::{XdrDecode, XdrEncode, XdrError, XdrReader, XdrWriter};

// ---------------------------------------------------------------------------
// CreateAccount
// ---------------------------------------------------------------------------

/// Funds a new account with a starting balance of lumens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateAccount {
    pub destination: PublicKey,
    #[serde(with = "serde_util::amount")]
    pub starting_balance: i64,
}

impl CreateAccount {
    pub fn new(destination: PublicKey, starting_balance: impl IntoAmount) -> Result<Self, OperationError> {
        Ok(Self {
            destination,
            starting_balance: to_network_amount(starting_balance)?,
        })
    }
}

impl XdrEncode for CreateAccount {
    fn encode(&self, writer: &mut XdrWriter) -> Result<(), XdrError> {
        self.destination.encode(writer)?;
        writer.write_i64(self.starting_balance);
        Ok(())
    }
}

impl XdrDecode for CreateAccount {
    fn decode(reader: &mut XdrReader<'_>) -> Result<Self, XdrError> {
        Ok(Self {
            destination: PublicKey::decode(reader)?,
            starting_balance: reader.read_i64()?,
        })
    }
}

operation_kind!(CreateAccount);

// ---------------------------------------------------------------------------
// AccountMerge
// ---------------------------------------------------------------------------

/// Moves the source's whole lumen balance to `destination` and deletes it.
///
/// The body is the bare destination, not a struct.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountMerge {
    pub destination: MuxedAccount,
}

impl AccountMerge {
    pub fn new(destination: MuxedAccount) -> Self {
        Self { destination }
    }
}

impl XdrEncode for AccountMerge {
    fn encode(&self, writer: &mut XdrWriter) -> Result<(), XdrError> {
        self.destination.encode(writer)
    }
}

impl XdrDecode for AccountMerge {
    fn decode(reader: &mut XdrReader<'_>) -> Result<Self, XdrError> {
        Ok(Self {
            destination: MuxedAccount::decode(reader)?,
        })
    }
}

operation_kind!(AccountMerge);

// ---------------------------------------------------------------------------
// Inflation
// ---------------------------------------------------------------------------

/// Runs the (long retired) inflation round. No body.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Inflation;

impl XdrEncode for Inflation {
    fn encode(&self, _writer: &mut XdrWriter) -> Result<(), XdrError> {
        Ok(())
    }
}

impl XdrDecode for Inflation {
    fn decode(_reader: &mut XdrReader<'_>) -> Result<Self, XdrError> {
        Ok(Inflation)
    }
}

impl From<Inflation> for OperationBody {
    fn from(_: Inflation) -> Self {
        OperationBody::Inflation
    }
}

impl From<Inflation> for super::Operation {
    fn from(op: Inflation) -> Self {
        super::Operation::new(op)
    }
}

impl OperationKind for Inflation {
    const TYPE: OperationType = OperationType::Inflation;
}

// ---------------------------------------------------------------------------
// ManageData
// ---------------------------------------------------------------------------

/// Sets, modifies or (with `value: None`) deletes a named data entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManageData {
    pub name: String,
    #[serde(default, with = "opt_base64")]
    pub value: Option<Vec<u8>>,
}

impl ManageData {
    pub fn new(name: impl Into<String>, value: Option<Vec<u8>>) -> Result<Self, OperationError> {
        let name = name.into();
        if name.is_empty() || name.len() > DATA_NAME_MAX_BYTES {
            return Err(OperationError::InvalidDataName(name.len()));
        }
        if let Some(v) = &value {
            if v.len() > DATA_VALUE_MAX_BYTES {
                return Err(OperationError::DataValueTooLong(v.len()));
            }
        }
        Ok(Self { name, value })
    }
}

impl XdrEncode for ManageData {
    fn encode(&self, writer: &mut XdrWriter) -> Result<(), XdrError> {
        writer.write_string(&self.name, DATA_NAME_MAX_BYTES)?;
        match &self.value {
            Some(v) => {
                writer.write_bool(true);
                writer.write_var_opaque(v, DATA_VALUE_MAX_BYTES)
            }
            None => {
                writer.write_bool(false);
                Ok(())
            }
        }
    }
}

impl XdrDecode for ManageData {
    fn decode(reader: &mut XdrReader<'_>) -> Result<Self, XdrError> {
        let name = reader.read_string(DATA_NAME_MAX_BYTES)?;
        let value = if reader.read_bool()? {
            Some(reader.read_var_opaque(DATA_VALUE_MAX_BYTES)?)
        } else {
            None
        };
        Ok(Self { name, value })
    }
}

operation_kind!(ManageData);

/// Data values shown the way Horizon shows them: base64.
mod opt_base64 {
    use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Option<Vec<u8>>, serializer: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(v) => serializer.serialize_str(&BASE64.encode(v)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Vec<u8>>, D::Error> {
        Option::<String>::deserialize(deserializer)?
            .map(|s| BASE64.decode(s).map_err(serde::de::Error::custom))
            .transpose()
    }
}

// ---------------------------------------------------------------------------
// BumpSequence
// ---------------------------------------------------------------------------

/// Raises the source's sequence number to `bump_to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BumpSequence {
    pub bump_to: i64,
}

impl BumpSequence {
    pub fn new(bump_to: i64) -> Self {
        Self { bump_to }
    }
}

impl XdrEncode for BumpSequence {
    fn encode(&self, writer: &mut XdrWriter) -> Result<(), XdrError> {
        writer.write_i64(self.bump_to);
        Ok(())
    }
}

impl XdrDecode for BumpSequence {
    fn decode(reader: &mut XdrReader<'_>) -> Result<Self, XdrError> {
        Ok(Self {
            bump_to: reader.read_i64()?,
        })
    }
}

operation_kind!(BumpSequence);
