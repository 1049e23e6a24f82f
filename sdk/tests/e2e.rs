//! End-to-end tests for the Stellar SDK.
//!
//! These go through the public API only: secret seed to keypair, builder to
//! envelope, signature, base64, and back. The golden vectors were produced
//! by stellar-core compatible tooling, so a byte drift anywhere in the codec
//! shows up here.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use stellar_sdk::horizon::{HorizonError, HorizonTransport, HttpReply, Server};
use stellar_sdk::operation::TrustLineAuthorization;
use stellar_sdk::prelude::*;
use stellar_sdk::transaction::{verify_signatures, EnvelopeError, EnvelopeType};

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

const SECRET: &str = "SAAQCAIBAEAQCAIBAEAQCAIBAEAQCAIBAEAQCAIBAEAQCAIBAEAQC5MY";
const SOURCE: &str = "GCFIRY65OQE7DFP5KLNS2PF2LVZMUZYJX4OZIEQ36N2IQANUB5XVYOJR";
const DEST: &str = "GCATS5YOVB6ROX2WUNKGNQ2MP3GMXDMKSG2O4N5CLX3A6W4PZGZZI55U";
const ISSUER: &str = DEST;

const GOLDEN_V1: &str = "AAAAAgAAAACKiOPddAnxlf1S2y08ul1yymcJvx2UEhvzdIgBtA9vXAAAAGQAAAAAAAAAZAAAAAAAAAAAAAAAAQAAAAAAAAABAAAAAIE5dw6ofRdfVqNUZsNMfszLjYqRtO43ol32D1uPybOUAAAAAAAAAAAGQixAAAAAAAAAAAG0D29cAAAAQNENENE3+9LM6UL6MNDivAMX1tp3kPQJ9R8Gx7/0YpsfnF7hgKGL1zFdxCSuBbOdYrGFiVMHna7dbNfLP6xGagc=";
const GOLDEN_V0: &str = "AAAAAIqI4910CfGV/VLbLTy6XXLKZwm/HZQSG/N0iAG0D29cAAAAZAAAAAAAAABkAAAAAAAAAAAAAAABAAAAAAAAAAEAAAAAgTl3Dqh9F19Wo1Rmw0x+zMuNipG07jeiXfYPW4/Js5QAAAAAAAAAAAZCLEAAAAAAAAAAAbQPb1wAAABA0Q0Q0Tf70szpQvow0OK8AxfW2neQ9An1HwbHv/Rimx+cXuGAoYvXMV3EJK4Fs51isYWJUwedrt1s18s/rEZqBw==";
const GOLDEN_HASH: &str = "e460eae4a16bb9a8f42142545521c0b9c759f2935e534e75e2078578cf4265d5";

fn signer() -> Keypair {
    Keypair::from_secret(SECRET).unwrap()
}

fn golden_envelope(version: TransactionVersion) -> TransactionEnvelope {
    let mut account = Account::new(SOURCE.parse().unwrap(), 99);
    let payment = Payment::new(DEST.parse().unwrap(), Asset::native(), "10.5").unwrap();
    let mut envelope = TransactionBuilder::new(&mut account, Network::testnet(), 100)
        .append_operation(payment)
        .version(version)
        .build()
        .unwrap();
    envelope.sign(&signer()).unwrap();
    envelope
}

fn usd() -> Asset {
    Asset::new("USD", Some(ISSUER)).unwrap()
}

// ---------------------------------------------------------------------------
// Golden scenario
// ---------------------------------------------------------------------------

#[test]
fn golden_payment_matches_reference_encoding() {
    assert_eq!(signer().account_id(), SOURCE);

    let v1 = golden_envelope(TransactionVersion::V1);
    assert_eq!(v1.hash_hex().unwrap(), GOLDEN_HASH);
    assert_eq!(v1.to_xdr().unwrap(), GOLDEN_V1);

    let v0 = golden_envelope(TransactionVersion::V0);
    assert_eq!(v0.hash_hex().unwrap(), GOLDEN_HASH);
    assert_eq!(v0.to_xdr().unwrap(), GOLDEN_V0);
    assert_eq!(v0.signatures, v1.signatures);
}

#[test]
fn golden_envelopes_parse_back() {
    for (encoded, kind) in [(GOLDEN_V1, EnvelopeType::Tx), (GOLDEN_V0, EnvelopeType::TxV0)] {
        let envelope = Envelope::from_xdr(encoded, Network::testnet()).unwrap();
        assert_eq!(envelope.envelope_type(), kind);

        let tx = envelope.inner_transaction();
        assert_eq!(tx.source.address(), SOURCE);
        assert_eq!(tx.sequence, 100);
        assert_eq!(tx.fee, 100);
        assert_eq!(tx.memo, Memo::None);
        assert_eq!(tx.time_bounds, None);
        assert_eq!(tx.operations.len(), 1);

        verify_signatures(&envelope, &[*signer().public_key()]).unwrap();
        assert_eq!(envelope.to_xdr().unwrap(), encoded);
    }
}

#[test]
fn wrong_network_does_not_verify() {
    let envelope = TransactionEnvelope::from_xdr(GOLDEN_V1, Network::public()).unwrap();
    assert!(!envelope.verify_signature(signer().public_key()).unwrap());
}

// ---------------------------------------------------------------------------
// Lifecycle
// ---------------------------------------------------------------------------

#[test]
fn every_operation_kind_survives_the_round_trip() {
    let source = signer();
    let dest: MuxedAccount = DEST.parse().unwrap();
    let dest_key = *dest.ed25519();
    let mut account = Account::new((*source.public_key()).into(), 1_000);

    let operations: Vec<Operation> = vec![
        CreateAccount::new(dest_key, "1000").unwrap().into(),
        Payment::new(dest, usd(), "0.0000001").unwrap().into(),
        PathPaymentStrictReceive::new(dest, Asset::native(), "20", usd(), "10", vec![usd()])
            .unwrap()
            .into(),
        PathPaymentStrictSend::new(dest, usd(), "10", Asset::native(), "19.5", vec![])
            .unwrap()
            .into(),
        ManageSellOffer::new(usd(), Asset::native(), "50", Price::new(3, 2), 0)
            .unwrap()
            .into(),
        ManageBuyOffer::new(Asset::native(), usd(), "25", Price::from_decimal("0.5").unwrap(), 7)
            .unwrap()
            .into(),
        CreatePassiveSellOffer::new(usd(), Asset::native(), "1", Price::new(1, 1))
            .unwrap()
            .into(),
        SetOptions::new()
            .set_flags(3)
            .thresholds(1, 2, 3)
            .home_domain("example.com")
            .unwrap()
            .signer(Signer::new(SignerKey::ed25519(&dest_key), 5))
            .into(),
        ChangeTrust::new(usd()).into(),
        AllowTrust::new(dest_key, "USD", TrustLineAuthorization::AuthorizedToMaintainLiabilities)
            .unwrap()
            .into(),
        AccountMerge::new(dest).into(),
        Inflation.into(),
        ManageData::new("config.memo_required", Some(b"1".to_vec())).unwrap().into(),
        Operation::new(BumpSequence::new(2_000)).with_source(dest),
    ];
    let count = operations.len();

    let mut builder = TransactionBuilder::new(&mut account, Network::testnet(), 100)
        .memo(Memo::id(42))
        .time_bounds(TimeBounds::new(1_000, 2_000).unwrap());
    for op in operations.clone() {
        builder = builder.append_operation(op);
    }
    let mut envelope = builder.build().unwrap();
    envelope.sign(&source).unwrap();
    assert_eq!(account.sequence, 1_001);

    let decoded = TransactionEnvelope::from_xdr(&envelope.to_xdr().unwrap(), Network::testnet()).unwrap();
    assert_eq!(decoded, envelope);
    assert_eq!(decoded.transaction.operations, operations);
    assert_eq!(decoded.transaction.fee, 100 * count as u32);
    assert_eq!(decoded.transaction.memo, Memo::id(42));
    assert_eq!(decoded.hash().unwrap(), envelope.hash().unwrap());
}

#[test]
fn fee_bump_lifecycle() {
    let inner = golden_envelope(TransactionVersion::V0);
    let payer = Keypair::from_raw_ed25519_seed(&[3; 32]);

    let mut bump = FeeBumpTransactionEnvelope::wrap((*payer.public_key()).into(), 400, inner.clone()).unwrap();
    bump.sign(&payer).unwrap();
    assert_eq!(bump.transaction.fee, 800);

    let encoded = bump.to_xdr().unwrap();
    let parsed = Envelope::from_xdr(&encoded, Network::testnet()).unwrap();
    assert_eq!(parsed.envelope_type(), EnvelopeType::TxFeeBump);
    verify_signatures(&parsed, &[*payer.public_key()]).unwrap();

    // the inner signature still checks out after the V0 to V1 upgrade
    match parsed {
        Envelope::FeeBump(env) => {
            assert_eq!(env.transaction.inner.transaction.version, TransactionVersion::V1);
            assert_eq!(env.transaction.inner.hash_hex().unwrap(), GOLDEN_HASH);
            verify_signatures(&env.transaction.inner, &[*signer().public_key()]).unwrap();
        }
        other => panic!("expected a fee bump, got {:?}", other.envelope_type()),
    }
}

#[test]
fn signing_rules() {
    let mut envelope = golden_envelope(TransactionVersion::V1);
    assert!(matches!(
        envelope.sign(&signer()),
        Err(EnvelopeError::SignatureExists { .. })
    ));

    let verify_only = Keypair::from_public_key(DEST).unwrap();
    assert!(envelope.sign(&verify_only).is_err());

    let preimage = b"open sesame";
    envelope.sign_hashx(preimage).unwrap();
    assert_eq!(envelope.signatures.len(), 2);
    assert_eq!(envelope.signatures[1].signature, preimage.to_vec());
}

// ---------------------------------------------------------------------------
// Value rules
// ---------------------------------------------------------------------------

#[test]
fn amounts_are_exact() {
    assert_eq!(to_network_amount("10.5").unwrap(), 105_000_000);
    assert_eq!(from_network_amount(105_000_000), "10.5");
    assert_eq!(to_network_amount("922337203685.4775807").unwrap(), i64::MAX);
    for bad in ["1.23456789", "-1", "922337203685.4775808", "abc"] {
        assert!(to_network_amount(bad).is_err(), "{bad} should be rejected");
    }
}

#[test]
fn single_bit_flips_break_addresses() {
    let bytes = SOURCE.as_bytes();
    for i in 0..bytes.len() {
        let mut flipped = bytes.to_vec();
        flipped[i] ^= 0x01;
        let flipped = String::from_utf8(flipped).unwrap();
        assert!(PublicKey::from_account_id(&flipped).is_err(), "flip at {i} accepted");
    }
}

#[test]
fn asset_code_widths() {
    assert_eq!(Asset::new("ABCD", Some(ISSUER)).unwrap().asset_type(), "credit_alphanum4");
    assert_eq!(Asset::new("ABCDE", Some(ISSUER)).unwrap().asset_type(), "credit_alphanum12");
    assert!(Asset::new("ABCDEFGHIJKLM", Some(ISSUER)).is_err());
}

// ---------------------------------------------------------------------------
// Horizon facade
// ---------------------------------------------------------------------------

#[derive(Default)]
struct FakeHorizon {
    accounts: HashMap<String, String>,
    submitted: Mutex<Vec<String>>,
}

#[async_trait]
impl HorizonTransport for FakeHorizon {
    async fn submit(&self, envelope_xdr: &str) -> Result<HttpReply, HorizonError> {
        self.submitted.lock().unwrap().push(envelope_xdr.to_string());
        Ok(HttpReply::new(200, format!(r#"{{"hash":"{GOLDEN_HASH}","ledger":1}}"#)))
    }

    async fn account(&self, account_id: &str) -> Result<HttpReply, HorizonError> {
        Ok(match self.accounts.get(account_id) {
            Some(body) => HttpReply::new(200, body.clone()),
            None => HttpReply::new(404, r#"{"title":"Resource Missing","status":404}"#),
        })
    }
}

#[tokio::test]
async fn submit_golden_envelope_through_horizon() {
    let server = Server::with_transport(FakeHorizon::default(), Network::testnet());
    let envelope: Envelope = golden_envelope(TransactionVersion::V1).into();

    let response = server.submit_transaction(&envelope, false).await.unwrap();
    assert_eq!(response.hash, GOLDEN_HASH);
    assert_eq!(
        server.transport().submitted.lock().unwrap().as_slice(),
        &[GOLDEN_V1.to_string()]
    );
}

#[tokio::test]
async fn memo_required_destination_is_refused() {
    let mut fake = FakeHorizon::default();
    fake.accounts.insert(
        DEST.to_string(),
        serde_json::json!({
            "account_id": DEST,
            "sequence": "1",
            "thresholds": { "low_threshold": 0, "med_threshold": 0, "high_threshold": 0 },
            "signers": [],
            "data": { "config.memo_required": "MQ==" }
        })
        .to_string(),
    );
    let server = Server::with_transport(fake, Network::testnet());

    let err = server.submit_transaction_xdr(GOLDEN_V1, false).await.unwrap_err();
    assert!(matches!(
        err,
        stellar_sdk::Error::Horizon(HorizonError::AccountRequiresMemo { operation_index: 0, .. })
    ));
    assert!(server.transport().submitted.lock().unwrap().is_empty());
}
