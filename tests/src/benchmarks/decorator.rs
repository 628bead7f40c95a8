//! # Decorator Benchmarks
//!
//! Cost per stage of a Web3Tx ante pass:
//! - Sign document and typed-data digest construction
//! - Single-signer verification, with and without fee delegation
//! - Batch verification versus a sequential loop
//! - Simulation, which skips the curve work entirely

use crate::fixtures::*;
use criterion::{black_box, BenchmarkId, Criterion, Throughput};
use eip712_sig_verification::{AnteDecorator, SignerData};
use shared_types::{Transaction, Tx};
use std::time::Duration;

fn signed_batch(decorator: &Decorator, size: usize) -> Vec<Transaction> {
    (0..size)
        .map(|i| {
            let wallet = TestWallet::random();
            let account_number = i as u64 + 1;
            register(decorator, &wallet, account_number, 0);

            let mut tx = send_tx(&[wallet.address], 1_000);
            sign_tx(decorator.verifier(), &mut tx, &wallet, account_number, 0);
            tx
        })
        .collect()
}

pub fn bench_digest(c: &mut Criterion) {
    let mut group = c.benchmark_group("ante/digest");
    group.measurement_time(Duration::from_secs(5));

    let decorator = decorator();
    let tx = send_tx(&[TestWallet::random().address], 1_000);
    let signer_data: SignerData = signer_data(1, 0);

    group.bench_function("sign_doc_hash", |b| {
        b.iter(|| black_box(decorator.verifier().sign_doc_hash(&signer_data, &tx)))
    });

    group.finish();
}

pub fn bench_single(c: &mut Criterion) {
    let mut group = c.benchmark_group("ante/single");
    group.measurement_time(Duration::from_secs(10));

    let decorator = decorator();
    let tx = signed_batch(&decorator, 1).remove(0);
    group.bench_function("ante_handle", |b| {
        b.iter(|| black_box(decorator.ante_handle(&ctx(), &tx)))
    });

    group.bench_function("simulate", |b| {
        let simulate = ctx().with_simulate(true);
        b.iter(|| black_box(decorator.ante_handle(&simulate, &tx)))
    });

    let delegated = crate::fixtures::decorator();
    let signer = TestWallet::random();
    let payer = TestWallet::random();
    register(&delegated, &signer, 1, 0);
    let mut tx = send_tx(&[signer.address], 1_000);
    attach_fee_payer(
        delegated.verifier(),
        &mut tx,
        &payer,
        &payer,
        0,
        &signer_data(1, 0),
    );
    sign_tx(delegated.verifier(), &mut tx, &signer, 1, 0);

    // adds a public key recovery on top of the known-key check
    group.bench_function("fee_delegated", |b| {
        b.iter(|| black_box(delegated.ante_handle(&ctx(), &tx)))
    });

    group.finish();
}

pub fn bench_batch(c: &mut Criterion) {
    let mut group = c.benchmark_group("ante/batch");
    group.measurement_time(Duration::from_secs(15));

    for size in [10usize, 100, 500] {
        let decorator = decorator();
        let txs = signed_batch(&decorator, size);
        let refs: Vec<&dyn Tx> = txs.iter().map(|t| t as &dyn Tx).collect();

        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("sequential", size), &refs, |b, refs| {
            b.iter(|| {
                let valid = refs
                    .iter()
                    .filter(|tx| decorator.ante_handle(&ctx(), **tx).is_ok())
                    .count();
                black_box(valid)
            })
        });

        group.bench_with_input(BenchmarkId::new("parallel", size), &refs, |b, refs| {
            b.iter(|| black_box(decorator.verify_batch(&ctx(), refs)))
        });
    }

    group.finish();
}

pub fn register_benchmarks(c: &mut Criterion) {
    bench_digest(c);
    bench_single(c);
    bench_batch(c);
}
