//! The canonical transaction: one struct, two wire shapes.
//!
//! ```text
//! Transaction {                      TransactionV0 {
//!     MuxedAccount sourceAccount;        uint256 sourceAccountEd25519;
//!     uint32 fee;                        uint32 fee;
//!     SequenceNumber seqNum;             SequenceNumber seqNum;
//!     TimeBounds* timeBounds;            TimeBounds* timeBounds;
//!     Memo memo;                         Memo memo;
//!     Operation operations<100>;         Operation operations<100>;
//!     union switch (int v) { case 0: void; } ext;
//! }                                  }
//! ```
//!
//! The version tag only matters at the serialization boundary. Hashing and
//! signing always go through the V1 shape.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::types::{EnvelopeType, TransactionVersion};
use crate::account::MuxedAccount;
use crate::config::MAX_OPERATIONS;
use crate::crypto::{sha256, PublicKey};
use crate::memo::Memo;
use crate::network::Network;
use crate::operation::Operation;
use crate::time_bounds::TimeBounds;
use crate::xdr::{self, XdrDecode, XdrEncode, XdrError, XdrReader, XdrWriter};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub source: MuxedAccount,
    /// Total fee in stroops, for all operations together.
    pub fee: u32,
    pub sequence: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_bounds: Option<TimeBounds>,
    #[serde(default)]
    pub memo: Memo,
    pub operations: Vec<Operation>,
    #[serde(default)]
    pub version: TransactionVersion,
}

impl Transaction {
    /// A V1 transaction without memo or time bounds.
    pub fn new(source: MuxedAccount, fee: u32, sequence: i64, operations: Vec<Operation>) -> Self {
        Self {
            source,
            fee,
            sequence,
            time_bounds: None,
            memo: Memo::None,
            operations,
            version: TransactionVersion::V1,
        }
    }

    /// Writes the transaction in the given wire shape, ignoring `self.version`.
    ///
    /// A muxed source written as V0 loses its sub-id: V0 has nowhere to put it.
    pub fn encode_as(&self, writer: &mut XdrWriter, version: TransactionVersion) -> Result<(), XdrError> {
        match version {
            TransactionVersion::V0 => writer.write_fixed_opaque(self.source.ed25519().as_bytes()),
            TransactionVersion::V1 => self.source.encode(writer)?,
        }
        writer.write_u32(self.fee);
        writer.write_i64(self.sequence);
        writer.write_optional(self.time_bounds.as_ref())?;
        self.memo.encode(writer)?;
        writer.write_var_array(&self.operations, MAX_OPERATIONS)?;
        // ext
        writer.write_i32(0);
        Ok(())
    }

    /// Reads a transaction in the given wire shape and tags it with `version`.
    pub fn decode_as(reader: &mut XdrReader<'_>, version: TransactionVersion) -> Result<Self, XdrError> {
        let source = match version {
            TransactionVersion::V0 => PublicKey::from_bytes(reader.read_array::<32>()?).into(),
            TransactionVersion::V1 => MuxedAccount::decode(reader)?,
        };
        let fee = reader.read_u32()?;
        let sequence = reader.read_i64()?;
        let time_bounds = reader.read_optional()?;
        let memo = Memo::decode(reader)?;
        let operations = reader.read_var_array(MAX_OPERATIONS)?;
        reader.read_empty_ext()?;
        Ok(Self {
            source,
            fee,
            sequence,
            time_bounds,
            memo,
            operations,
            version,
        })
    }

    /// Base64 XDR of the bare transaction in its own wire shape.
    pub fn to_xdr(&self) -> Result<String, XdrError> {
        xdr::to_base64(self)
    }

    pub fn from_xdr(encoded: &str, version: TransactionVersion) -> Result<Self, XdrError> {
        let bytes = xdr::decode_base64(encoded)?;
        let mut reader = XdrReader::new(&bytes);
        let tx = Self::decode_as(&mut reader, version)?;
        reader.finish()?;
        Ok(tx)
    }

    /// A copy tagged V1. The fields, and therefore the hash, are unchanged.
    pub fn to_v1(&self) -> Self {
        Self {
            version: TransactionVersion::V1,
            ..self.clone()
        }
    }

    /// `network_id ‖ ENVELOPE_TYPE_TX ‖ tx as V1`, for either version.
    pub fn signature_base(&self, network: &Network) -> Result<Vec<u8>, XdrError> {
        let mut writer = XdrWriter::with_capacity(256);
        writer.write_fixed_opaque(network.network_id());
        writer.write_i32(EnvelopeType::Tx.code());
        self.encode_as(&mut writer, TransactionVersion::V1)?;
        Ok(writer.into_bytes())
    }

    /// The transaction hash on `network`: SHA-256 of the signature base.
    pub fn hash(&self, network: &Network) -> Result<[u8; 32], XdrError> {
        Ok(sha256(&self.signature_base(network)?))
    }

    /// Accounts this transaction moves funds to, with the index of the first
    /// operation that targets each.
    ///
    /// Muxed destinations are left out: the sub-id already identifies the
    /// recipient, so they never need a memo.
    pub fn memo_required_destinations(&self) -> Vec<(usize, PublicKey)> {
        let mut seen = HashSet::new();
        self.operations
            .iter()
            .enumerate()
            .filter_map(|(index, op)| match op.body.destination() {
                Some(dest) if !dest.is_muxed() => Some((index, *dest.ed25519())),
                _ => None,
            })
            .filter(|(_, key)| seen.insert(*key))
            .collect()
    }
}

impl XdrEncode for Transaction {
    fn encode(&self, writer: &mut XdrWriter) -> Result<(), XdrError> {
        self.encode_as(writer, self.version)
    }
}
