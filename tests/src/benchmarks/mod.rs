//! # Ante Benchmarks
//!
//! Criterion benchmarks of the EIP-712 signature verification decorator.

pub mod decorator;
