//! # Ports Layer
//!
//! - **Inbound (Driving)**: API that external callers use
//! - **Outbound (Driven)**: the clock this crate reads

pub mod inbound;
pub mod outbound;
