// Signing & verification benchmarks for the Stellar SDK.
//
// Covers keypair generation, raw Ed25519 signing and verification, envelope
// hashing, and signing an envelope with a growing number of signers.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use stellar_sdk::prelude::*;

const DEST: &str = "GCATS5YOVB6ROX2WUNKGNQ2MP3GMXDMKSG2O4N5CLX3A6W4PZGZZI55U";

fn unsigned_envelope(source: &Keypair) -> TransactionEnvelope {
    let mut account = Account::new((*source.public_key()).into(), 99);
    let payment = Payment::new(DEST.parse().unwrap(), Asset::native(), "10.5").unwrap();
    TransactionBuilder::new(&mut account, Network::testnet(), 100)
        .append_operation(payment)
        .build()
        .unwrap()
}

fn bench_keypair_generation(c: &mut Criterion) {
    c.bench_function("ed25519/keypair_random", |b| {
        b.iter(Keypair::random);
    });
}

fn bench_sign_message(c: &mut Criterion) {
    let keypair = Keypair::from_raw_ed25519_seed(&[1; 32]);
    let message = [0x5Au8; 32];

    c.bench_function("ed25519/sign_hash", |b| {
        b.iter(|| keypair.sign(&message).unwrap());
    });
}

fn bench_verify_signature(c: &mut Criterion) {
    let keypair = Keypair::from_raw_ed25519_seed(&[1; 32]);
    let message = [0x5Au8; 32];
    let signature = keypair.sign(&message).unwrap();

    c.bench_function("ed25519/verify_hash", |b| {
        b.iter(|| keypair.verify(&message, &signature).unwrap());
    });
}

fn bench_envelope_hash(c: &mut Criterion) {
    let source = Keypair::from_raw_ed25519_seed(&[1; 32]);
    let envelope = unsigned_envelope(&source);

    c.bench_function("envelope/hash", |b| {
        b.iter(|| envelope.hash().unwrap());
    });
}

fn bench_multi_sign(c: &mut Criterion) {
    let mut group = c.benchmark_group("envelope/sign");
    let source = Keypair::from_raw_ed25519_seed(&[1; 32]);

    for size in [1usize, 5, 20] {
        let signers: Vec<Keypair> = (0..size)
            .map(|i| Keypair::from_raw_ed25519_seed(&[i as u8 + 1; 32]))
            .collect();

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &signers, |b, signers| {
            b.iter(|| {
                let mut envelope = unsigned_envelope(&source);
                for signer in signers {
                    envelope.sign(signer).unwrap();
                }
                envelope
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_keypair_generation,
    bench_sign_message,
    bench_verify_signature,
    bench_envelope_hash,
    bench_multi_sign,
);
criterion_main!(benches);
