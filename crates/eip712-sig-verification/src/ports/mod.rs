//! # Ports Layer
//!
//! - **Inbound**: `AnteDecorator`, called by the transaction admission pipeline
//! - **Outbound**: `AccountKeeper`, the account state the decorator reads

pub mod inbound;
pub mod outbound;
