// Copyright (c) 2022-2023 The MobileCoin Foundation

//! EOS hardware wallet signing core
//!
//! This provides a common [Engine][engine] supporting canonical transaction
//! encoding and signing for execution on hardware wallets.
//!
//! Interactions with the [Engine][engine] are performed via
//! [Event][engine::Event]s and [Output][engine::Output]s, with the
//! transport layer responsible for decoding wire requests into the
//! structured inputs consumed here.
//!
//! ## Operations
//!
//! Transactions may contain an unbounded number of actions while the
//! device has only a handful of kilobytes of working memory, so the
//! canonical pre-image is never materialized: every field is folded into
//! a running SHA-256 the moment it is known, in the exact order the
//! chain's verifier reconstructs it.
//!
//! 1. Issue [`TxInit`][engine::Event::TxInit] with the chain id, action
//!    count, [`TxHeader`][tx::TxHeader] and derived signing key to start
//!    a signing session
//! 2. Issue [`TxAddAction`][engine::Event::TxAddAction] once per declared
//!    action, in declaration order
//! 3. Issue [`TxSign`][engine::Event::TxSign] to append the fixed
//!    trailer, request on-device confirmation, and produce a recoverable
//!    signature over the finalized digest
//!
//! Any failure after initialisation wipes the session (key, header and
//! hash state) before the error is surfaced, and a fresh
//! [`TxInit`][engine::Event::TxInit] is required to start over.
//!
//! Display rendering for the confirmation UI (assets, account names,
//! public keys) is provided by [helpers] and is independent of the
//! hashing path.

#![cfg_attr(not(feature = "std"), no_std)]

pub mod engine;

pub mod helpers;

pub mod tx;
