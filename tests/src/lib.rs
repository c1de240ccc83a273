// Copyright (c) 2022-2023 The MobileCoin Foundation

//! Tests for EOS hardware wallet integration.
//!
//! Generic over [Driver][ledger_eos_core::engine::Driver] for reuse
//! against the engine directly or behind a transport.

pub mod transaction;
