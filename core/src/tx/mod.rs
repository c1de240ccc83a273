// Copyright (c) 2022-2023 The MobileCoin Foundation

//! Transaction structures as supplied by the transport layer.
//!
//! The transport decodes wire requests into these objects before handing
//! them to the [Engine][crate::engine::Engine]; fields that are optional
//! on the wire stay optional here and are checked when the action is
//! compiled, never before.

use heapless::{String, Vec};
use zeroize::Zeroize;

/// Chain id length in bytes
pub const CHAIN_ID_LEN: usize = 32;

/// Maximum permission levels per action authorization
pub const MAX_AUTHORIZATION: usize = 4;

/// Maximum transfer memo length
pub const MEMO_MAX: usize = 256;

/// Fixed transaction header, captured once per session.
///
/// `max_net_usage_words` and `delay_sec` are varint encoded on the wire,
/// `max_cpu_usage_ms` is a single byte, everything else is fixed-width
/// little-endian.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TxHeader {
    pub expiration: u32,
    pub ref_block_num: u16,
    pub ref_block_prefix: u32,
    pub max_net_usage_words: u32,
    pub max_cpu_usage_ms: u8,
    pub delay_sec: u32,
}

impl Zeroize for TxHeader {
    fn zeroize(&mut self) {
        self.expiration.zeroize();
        self.ref_block_num.zeroize();
        self.ref_block_prefix.zeroize();
        self.max_net_usage_words.zeroize();
        self.max_cpu_usage_ms.zeroize();
        self.delay_sec.zeroize();
    }
}

/// Asset value with packed symbol.
///
/// The low byte of `symbol` holds the decimal precision, the remaining
/// seven bytes hold the nul-padded uppercase symbol code, read upward
/// from the second byte.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Asset {
    pub amount: i64,
    pub symbol: u64,
}

/// An (actor, permission) pair authorizing an action
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct PermissionLevel {
    pub actor: Option<u64>,
    pub permission: Option<u64>,
}

/// Fields common to every action: target account and name plus a
/// non-empty authorization list
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ActionCommon {
    pub account: Option<u64>,
    pub name: Option<u64>,
    pub authorization: Vec<PermissionLevel, MAX_AUTHORIZATION>,
}

/// Transfer action payload.
///
/// Carried for display during confirmation; see
/// [`ActionPayload`] for the bytes actually compiled.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ActionTransfer {
    pub quantity: Option<Asset>,
    pub memo: String<MEMO_MAX>,
}

/// Action-kind specific payload.
///
/// Each supported action kind defines its own wire layout, compiled
/// immediately after the common fields.
#[derive(Clone, Debug, PartialEq)]
pub enum ActionPayload {
    Transfer(ActionTransfer),
}
