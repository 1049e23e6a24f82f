//! Transaction envelopes: a transaction plus the signatures that authorize it.
//!
//! ```text
//! union TransactionEnvelope switch (EnvelopeType type) {
//!     case ENVELOPE_TYPE_TX_V0:      TransactionV0Envelope v0;
//!     case ENVELOPE_TYPE_TX:         TransactionV1Envelope v1;
//!     case ENVELOPE_TYPE_TX_FEE_BUMP: FeeBumpTransactionEnvelope feeBump;
//! };
//! ```
//!
//! The network is not on the wire. It is needed to compute the signature
//! base, so every decode entry point takes one.

use serde::{Deserialize, Serialize};

use super::fee_bump::FeeBumpTransactionEnvelope;
use super::signing::{EnvelopeError, SignableEnvelope};
use super::tx::Transaction;
use super::types::{EnvelopeType, TransactionVersion};
use crate::config::MAX_SIGNATURES;
use crate::crypto::DecoratedSignature;
use crate::network::Network;
use crate::xdr::{self, XdrEncode, XdrError, XdrReader, XdrWriter};

// ---------------------------------------------------------------------------
// TransactionEnvelope
// ---------------------------------------------------------------------------

/// A V0 or V1 transaction with its signatures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionEnvelope {
    pub transaction: Transaction,
    pub network: Network,
    #[serde(default)]
    pub signatures: Vec<DecoratedSignature>,
}

impl TransactionEnvelope {
    pub fn new(transaction: Transaction, network: Network) -> Self {
        Self {
            transaction,
            network,
            signatures: Vec::new(),
        }
    }

    pub fn envelope_type(&self) -> EnvelopeType {
        self.transaction.version.envelope_type()
    }

    /// The same envelope with its transaction tagged V1.
    ///
    /// Existing signatures stay valid: both versions share a signature base.
    pub fn to_v1(&self) -> Self {
        Self {
            transaction: self.transaction.to_v1(),
            network: self.network.clone(),
            signatures: self.signatures.clone(),
        }
    }

    pub fn to_xdr(&self) -> Result<String, XdrError> {
        xdr::to_base64(self)
    }

    /// Parses a V0 or V1 envelope. A fee bump envelope is rejected here; use
    /// [`Envelope::from_xdr`] to accept either kind.
    pub fn from_xdr(encoded: &str, network: Network) -> Result<Self, EnvelopeError> {
        match Envelope::from_xdr(encoded, network)? {
            Envelope::Transaction(env) => Ok(env),
            Envelope::FeeBump(_) => Err(EnvelopeError::wrong_type(EnvelopeType::TxFeeBump)),
        }
    }

    /// Reads the envelope body that follows the type discriminant.
    pub(crate) fn decode_body(
        reader: &mut XdrReader<'_>,
        version: TransactionVersion,
        network: Network,
    ) -> Result<Self, XdrError> {
        let transaction = Transaction::decode_as(reader, version)?;
        let signatures = reader.read_var_array(MAX_SIGNATURES)?;
        Ok(Self {
            transaction,
            network,
            signatures,
        })
    }

    /// Writes the envelope body in the V1 shape, as a fee bump embeds it.
    pub(crate) fn encode_v1_body(&self, writer: &mut XdrWriter) -> Result<(), XdrError> {
        self.transaction.encode_as(writer, TransactionVersion::V1)?;
        writer.write_var_array(&self.signatures, MAX_SIGNATURES)
    }
}

impl XdrEncode for TransactionEnvelope {
    fn encode(&self, writer: &mut XdrWriter) -> Result<(), XdrError> {
        writer.write_i32(self.envelope_type().code());
        self.transaction.encode(writer)?;
        writer.write_var_array(&self.signatures, MAX_SIGNATURES)
    }
}

impl SignableEnvelope for TransactionEnvelope {
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

// ---------------------------------------------------------------------------
// Envelope
// ---------------------------------------------------------------------------

/// Either envelope kind, as found on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Envelope {
    Transaction(TransactionEnvelope),
    FeeBump(FeeBumpTransactionEnvelope),
}

impl Envelope {
    /// Parses any envelope, dispatching on its type discriminant.
    pub fn from_xdr(encoded: &str, network: Network) -> Result<Self, EnvelopeError> {
        let bytes = xdr::decode_base64(encoded)?;
        let mut reader = XdrReader::new(&bytes);
        let code = reader.read_i32()?;
        let envelope = match EnvelopeType::from_code(code) {
            Some(EnvelopeType::TxV0) => Envelope::Transaction(TransactionEnvelope::decode_body(
                &mut reader,
                TransactionVersion::V0,
                network,
            )?),
            Some(EnvelopeType::Tx) => Envelope::Transaction(TransactionEnvelope::decode_body(
                &mut reader,
                TransactionVersion::V1,
                network,
            )?),
            Some(EnvelopeType::TxFeeBump) => {
                Envelope::FeeBump(FeeBumpTransactionEnvelope::decode_body(&mut reader, network)?)
            }
            None => return Err(EnvelopeError::InvalidEnvelopeType(code)),
        };
        reader.finish()?;
        Ok(envelope)
    }

    pub fn to_xdr(&self) -> Result<String, XdrError> {
        xdr::to_base64(self)
    }

    pub fn envelope_type(&self) -> EnvelopeType {
        match self {
            Envelope::Transaction(env) => env.envelope_type(),
            Envelope::FeeBump(_) => EnvelopeType::TxFeeBump,
        }
    }

    /// The transaction that carries the operations. For a fee bump that is
    /// the wrapped inner transaction.
    pub fn inner_transaction(&self) -> &Transaction {
        match self {
            Envelope::Transaction(env) => &env.transaction,
            Envelope::FeeBump(env) => &env.transaction.inner.transaction,
        }
    }
}

impl From<TransactionEnvelope> for Envelope {
    fn from(env: TransactionEnvelope) -> Self {
        Envelope::Transaction(env)
    }
}

impl From<FeeBumpTransactionEnvelope> for Envelope {
    fn from(env: FeeBumpTransactionEnvelope) -> Self {
        Envelope::FeeBump(env)
    }
}

impl XdrEncode for Envelope {
    fn encode(&self, writer: &mut XdrWriter) -> Result<(), XdrError> {
        match self {
            Envelope::Transaction(env) => env.encode(writer),
            Envelope::FeeBump(env) => env.encode(writer),
        }
    }
}

impl SignableEnvelope for Envelope {
    fn network(&self) -> &Network {
        match self {
            Envelope::Transaction(env) => env.network(),
            Envelope::FeeBump(env) => env.network(),
        }
    }

    fn signature_base(&self) -> Result<Vec<u8>, XdrError> {
        match self {
            Envelope::Transaction(env) => env.signature_base(),
            Envelope::FeeBump(env) => env.signature_base(),
        }
    }

    fn signatures(&self) -> &[DecoratedSignature] {
        match self {
            Envelope::Transaction(env) => env.signatures(),
            Envelope::FeeBump(env) => env.signatures(),
        }
    }

    fn signatures_mut(&mut self) -> &mut Vec<DecoratedSignature> {
        match self {
            Envelope::Transaction(env) => env.signatures_mut(),
            Envelope::FeeBump(env) => env.signatures_mut(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::account::MuxedAccount;
    use crate::asset::Asset;
    use crate::crypto::Keypair;
    use crate::memo::Memo;
    use crate::operation::{Inflation, Payment};
    use crate::time_bounds::TimeBounds;

    const DEST: &str = "GCATS5YOVB6ROX2WUNKGNQ2MP3GMXDMKSG2O4N5CLX3A6W4PZGZZI55U";
    const ENV_V1: &str = "AAAAAgAAAACKiOPddAnxlf1S2y08ul1yymcJvx2UEhvzdIgBtA9vXAAAAGQAAAAAAAAAZAAAAAAAAAAAAAAAAQAAAAAAAAABAAAAAIE5dw6ofRdfVqNUZsNMfszLjYqRtO43ol32D1uPybOUAAAAAAAAAAAGQixAAAAAAAAAAAG0D29cAAAAQNENENE3+9LM6UL6MNDivAMX1tp3kPQJ9R8Gx7/0YpsfnF7hgKGL1zFdxCSuBbOdYrGFiVMHna7dbNfLP6xGagc=";
    const ENV_V0: &str = "AAAAAIqI4910CfGV/VLbLTy6XXLKZwm/HZQSG/N0iAG0D29cAAAAZAAAAAAAAABkAAAAAAAAAAAAAAABAAAAAAAAAAEAAAAAgTl3Dqh9F19Wo1Rmw0x+zMuNipG07jeiXfYPW4/Js5QAAAAAAAAAAAZCLEAAAAAAAAAAAbQPb1wAAABA0Q0Q0Tf70szpQvow0OK8AxfW2neQ9An1HwbHv/Rimx+cXuGAoYvXMV3EJK4Fs51isYWJUwedrt1s18s/rEZqBw==";
    const UNSIGNED_V1: &str = "AAAAAgAAAACKiOPddAnxlf1S2y08ul1yymcJvx2UEhvzdIgBtA9vXAAAAGQAAAAAAAAAZAAAAAAAAAAAAAAAAQAAAAAAAAABAAAAAIE5dw6ofRdfVqNUZsNMfszLjYqRtO43ol32D1uPybOUAAAAAAAAAAAGQixAAAAAAAAAAAA=";

    fn signer() -> Keypair {
        Keypair::from_raw_ed25519_seed(&[1; 32])
    }

    fn unsigned(version: TransactionVersion) -> TransactionEnvelope {
        let source: MuxedAccount = (*signer().public_key()).into();
        let pay = Payment::new(DEST.parse().unwrap(), Asset::native(), "10.5").unwrap();
        let mut tx = Transaction::new(source, 100, 100, vec![pay.into()]);
        tx.version = version;
        TransactionEnvelope::new(tx, Network::testnet())
    }

    #[test]
    fn unsigned_v1_encoding() {
        assert_eq!(unsigned(TransactionVersion::V1).to_xdr().unwrap(), UNSIGNED_V1);
    }

    #[test]
    fn signed_v1_and_v0_encodings() {
        let mut v1 = unsigned(TransactionVersion::V1);
        v1.sign(&signer()).unwrap();
        assert_eq!(v1.to_xdr().unwrap(), ENV_V1);

        let mut v0 = unsigned(TransactionVersion::V0);
        v0.sign(&signer()).unwrap();
        assert_eq!(v0.to_xdr().unwrap(), ENV_V0);
        assert_eq!(v0.signatures, v1.signatures);
    }

    #[test]
    fn serialization_does_not_mutate() {
        let env = unsigned(TransactionVersion::V1);
        let before = env.clone();
        env.to_xdr().unwrap();
        assert_eq!(env, before);
    }

    #[test]
    fn parse_known_envelopes() {
        let v1 = TransactionEnvelope::from_xdr(ENV_V1, Network::testnet()).unwrap();
        assert_eq!(v1.transaction.version, TransactionVersion::V1);
        assert_eq!(v1.transaction.sequence, 100);
        assert_eq!(v1.transaction.fee, 100);
        assert_eq!(v1.signatures.len(), 1);
        assert!(v1.verify_signature(signer().public_key()).unwrap());

        let v0 = TransactionEnvelope::from_xdr(ENV_V0, Network::testnet()).unwrap();
        assert_eq!(v0.transaction.version, TransactionVersion::V0);
        assert_eq!(v0.to_v1(), v1);
        assert_eq!(v0.hash().unwrap(), v1.hash().unwrap());
    }

    #[test]
    fn round_trip_keeps_every_field() {
        let mut env = unsigned(TransactionVersion::V1);
        env.transaction.memo = Memo::id(42);
        env.transaction.time_bounds = Some(TimeBounds::new(1, 1_000).unwrap());
        env.transaction
            .operations
            .push(crate::operation::Operation::new(Inflation).with_source(DEST.parse().unwrap()));
        env.transaction.fee = 200;
        env.sign(&signer()).unwrap();

        let decoded = TransactionEnvelope::from_xdr(&env.to_xdr().unwrap(), Network::testnet()).unwrap();
        assert_eq!(decoded, env);
    }

    #[test]
    fn unknown_envelope_type() {
        let mut bytes = xdr::decode_base64(ENV_V1).unwrap();
        bytes[3] = 1;
        let encoded = base64::Engine::encode(&base64::engine::general_purpose::STANDARD, &bytes);
        assert_eq!(
            Envelope::from_xdr(&encoded, Network::testnet()).unwrap_err(),
            EnvelopeError::InvalidEnvelopeType(1)
        );
    }

    #[test]
    fn trailing_bytes_are_rejected() {
        let mut bytes = xdr::decode_base64(ENV_V1).unwrap();
        bytes.extend_from_slice(&[0; 4]);
        let encoded = base64::Engine::encode(&base64::engine::general_purpose::STANDARD, &bytes);
        assert_eq!(
            Envelope::from_xdr(&encoded, Network::testnet()).unwrap_err(),
            EnvelopeError::Xdr(XdrError::TrailingBytes(4))
        );
    }

    #[test]
    fn envelope_enum_delegates() {
        let mut env: Envelope = unsigned(TransactionVersion::V1).into();
        env.sign(&signer()).unwrap();
        assert_eq!(env.to_xdr().unwrap(), ENV_V1);
        assert_eq!(env.envelope_type(), EnvelopeType::Tx);
        assert_eq!(env.inner_transaction().sequence, 100);
    }
}
