//! Fee bump transactions: a second account pays a higher fee for an already
//! signed transaction without touching its signatures.
//!
//! ```text
//! FeeBumpTransaction {
//!     MuxedAccount feeSource;
//!     int64 fee;
//!     union switch (EnvelopeType type) {
//!         case ENVELOPE_TYPE_TX: TransactionV1Envelope v1;
//!     } innerTx;
//!     union switch (int v) { case 0: void; } ext;
//! }
//! ```

use serde::{Deserialize, Serialize};

use super::envelope::TransactionEnvelope;
use super::signing::{EnvelopeError, SignableEnvelope};
use super::types::{EnvelopeType, TransactionVersion};
use crate::account::MuxedAccount;
use crate::config::{BASE_FEE, MAX_SIGNATURES};
use crate::crypto::{sha256, DecoratedSignature};
use crate::network::Network;
use crate::xdr::{self, XdrDecode, XdrEncode, XdrError, XdrReader, XdrWriter};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeBumpTransaction {
    pub fee_source: MuxedAccount,
    /// Total fee in stroops: the bumped base fee times (inner ops + 1).
    pub fee: i64,
    /// Always V1; a V0 envelope is upgraded on the way in.
    pub inner: TransactionEnvelope,
}

impl FeeBumpTransaction {
    /// Wraps `inner`, paying `base_fee` per operation plus one for the bump.
    ///
    /// `base_fee` must be at least the network minimum and at least the
    /// per-operation fee the inner transaction already offers.
    pub fn new(
        fee_source: MuxedAccount,
        base_fee: i64,
        inner: TransactionEnvelope,
    ) -> Result<Self, EnvelopeError> {
        let inner = inner.to_v1();
        let op_count = inner.transaction.operations.len() as i64;
        let inner_fee = i64::from(inner.transaction.fee);
        let inner_base_fee = if op_count == 0 {
            inner_fee
        } else {
            inner_fee / op_count
        };

        let minimum = inner_base_fee.max(i64::from(BASE_FEE));
        if base_fee < minimum {
            return Err(EnvelopeError::InsufficientFee { base_fee, minimum });
        }
        let fee = base_fee
            .checked_mul(op_count + 1)
            .ok_or(EnvelopeError::FeeOverflow)?;

        Ok(Self {
            fee_source,
            fee,
            inner,
        })
    }

    /// `network_id ‖ ENVELOPE_TYPE_TX_FEE_BUMP ‖ fee bump tx`.
    pub fn signature_base(&self, network: &Network) -> Result<Vec<u8>, XdrError> {
        let mut writer = XdrWriter::with_capacity(512);
        writer.write_fixed_opaque(network.network_id());
        writer.write_i32(EnvelopeType::TxFeeBump.code());
        self.encode(&mut writer)?;
        Ok(writer.into_bytes())
    }

    pub fn hash(&self, network: &Network) -> Result<[u8; 32], XdrError> {
        Ok(sha256(&self.signature_base(network)?))
    }

    fn decode_with(reader: &mut XdrReader<'_>, network: Network) -> Result<Self, XdrError> {
        let fee_source = MuxedAccount::decode(reader)?;
        let fee = reader.read_i64()?;
        let inner = match reader.read_i32()? {
            code if code == EnvelopeType::Tx.code() => {
                TransactionEnvelope::decode_body(reader, TransactionVersion::V1, network)?
            }
            other => {
                return Err(XdrError::InvalidDiscriminant {
                    kind: "fee bump inner transaction",
                    value: other.into(),
                })
            }
        };
        reader.read_empty_ext()?;
        Ok(Self {
            fee_source,
            fee,
            inner,
        })
    }
}

impl XdrEncode for FeeBumpTransaction {
    fn encode(&self, writer: &mut XdrWriter) -> Result<(), XdrError> {
        self.fee_source.encode(writer)?;
        writer.write_i64(self.fee);
        writer.write_i32(EnvelopeType::Tx.code());
        self.inner.encode_v1_body(writer)?;
        // ext
        writer.write_i32(0);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// FeeBumpTransactionEnvelope
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeBumpTransactionEnvelope {
    pub transaction: FeeBumpTransaction,
    pub network: Network,
    #[serde(default)]
    pub signatures: Vec<DecoratedSignature>,
}

impl FeeBumpTransactionEnvelope {
    pub fn new(transaction: FeeBumpTransaction, network: Network) -> Self {
        Self {
            transaction,
            network,
            signatures: Vec::new(),
        }
    }

    /// Builds the fee bump for `inner` on the inner envelope's network.
    pub fn wrap(
        fee_source: MuxedAccount,
        base_fee: i64,
        inner: TransactionEnvelope,
    ) -> Result<Self, EnvelopeError> {
        let network = inner.network.clone();
        Ok(Self::new(
            FeeBumpTransaction::new(fee_source, base_fee, inner)?,
            network,
        ))
    }

    pub fn to_xdr(&self) -> Result<String, XdrError> {
        xdr::to_base64(self)
    }

    /// Parses a fee bump envelope; any other envelope kind is rejected.
    pub fn from_xdr(encoded: &str, network: Network) -> Result<Self, EnvelopeError> {
        match super::Envelope::from_xdr(encoded, network)? {
            super::Envelope::FeeBump(env) => Ok(env),
            super::Envelope::Transaction(env) => Err(EnvelopeError::wrong_type(env.envelope_type())),
        }
    }

    pub(crate) fn decode_body(reader: &mut XdrReader<'_>, network: Network) -> Result<Self, XdrError> {
        let transaction = FeeBumpTransaction::decode_with(reader, network.clone())?;
        let signatures = reader.read_var_array(MAX_SIGNATURES)?;
        Ok(Self {
            transaction,
            network,
            signatures,
        })
    }
}

impl XdrEncode for FeeBumpTransactionEnvelope {
    fn encode(&self, writer: &mut XdrWriter) -> Result<(), XdrError> {
        writer.write_i32(EnvelopeType::TxFeeBump.code());
        self.transaction.encode(writer)?;
        writer.write_var_array(&self.signatures, MAX_SIGNATURES)
    }
}

impl SignableEnvelope for FeeBumpTransactionEnvelope {
    fn network(&self) -> &Network {
        &self.network
    }

    fn signature_base(&self) -> Result<Vec<u8>, XdrError> {
        self.transaction.signature_base(&self.network)
    }

    fn signatures(&self) -> &[DecoratedSignature] {
        &self.signatures
    }

    fn signatures_mut(&mut self) -> &mut Vec<DecoratedSignature> {
        &mut self.signatures
    }
}
