// Copyright (c) 2022-2023 The MobileCoin Foundation

//! Transaction signing vectors and a generic end-to-end signing test.
//!
//! The expected digest is recomputed here by an independent buffering
//! encoder, so an engine that reorders, skips or double-counts a single
//! byte of the canonical serialization fails the signature check.

use anyhow::{anyhow, ensure};
use sha2::{Digest, Sha256};

use secp256k1::{
    ecdsa::{RecoverableSignature, RecoveryId},
    Message, PublicKey, Secp256k1, SecretKey,
};

use ledger_eos_core::{
    engine::{Driver, Engine, Event, Output, SigningKey},
    helpers::{fmt_asset, ASSET_STR_SIZE},
    tx::{
        ActionCommon, ActionPayload, ActionTransfer, Asset, PermissionLevel, TxHeader,
        CHAIN_ID_LEN,
    },
};

/// One declared action: account / name plus authorization pairs, all as
/// human-readable names
pub struct ActionSpec<'a> {
    pub account: &'a str,
    pub name: &'a str,
    pub authorization: &'a [(&'a str, &'a str)],
}

/// A complete signing session expectation
pub struct TransactionExpectation<'a> {
    pub chain_id: &'a str,
    pub key: &'a str,
    pub header: TxHeader,
    pub actions: &'a [ActionSpec<'a>],
}

pub const TRANSACTIONS: &[TransactionExpectation<'static>] = &[
    // Single transfer, single authorization (mainnet chain id)
    TransactionExpectation {
        chain_id: "aca376f206b8fc25a6ed44dbdc66547c36c6c33e3a119ffbeaef943642f0e906",
        key: "000102030405060708090a0b0c0d0e0f101112131415161718191a1b1c1d1e1f",
        header: TxHeader {
            expiration: 0x5cb5_fe30,
            ref_block_num: 0x2bcd,
            ref_block_prefix: 0xa1b2_c3d4,
            max_net_usage_words: 0,
            max_cpu_usage_ms: 0,
            delay_sec: 0,
        },
        actions: &[ActionSpec {
            account: "eosio.token",
            name: "transfer",
            authorization: &[("alice", "active")],
        }],
    },
    // Multiple actions, varint-exercising header fields
    TransactionExpectation {
        chain_id: "e70aaab8997e1dfce58fbfac80cbbb8fecec7b99cf982a9444273cbc64c41473",
        key: "4242424242424242424242424242424242424242424242424242424242424242",
        header: TxHeader {
            expiration: 0x5d01_ab00,
            ref_block_num: 0xffff,
            ref_block_prefix: 0x0102_0304,
            max_net_usage_words: 300,
            max_cpu_usage_ms: 200,
            delay_sec: 128,
        },
        actions: &[
            ActionSpec {
                account: "eosio.token",
                name: "transfer",
                authorization: &[("bob", "active"), ("carol", "owner")],
            },
            ActionSpec {
                account: "eosio",
                name: "delegatebw",
                authorization: &[("bob", "active")],
            },
            ActionSpec {
                account: "eosio.token",
                name: "transfer",
                authorization: &[("dave", "active"), ("erin", "active"), ("frank", "owner")],
            },
        ],
    },
    // Header only, no actions
    TransactionExpectation {
        chain_id: "aca376f206b8fc25a6ed44dbdc66547c36c6c33e3a119ffbeaef943642f0e906",
        key: "d00dfeeddeadbeefd00dfeeddeadbeefd00dfeeddeadbeefd00dfeeddeadbeef",
        header: TxHeader {
            expiration: 1,
            ref_block_num: 2,
            ref_block_prefix: 3,
            max_net_usage_words: u32::MAX,
            max_cpu_usage_ms: 1,
            delay_sec: u32::MAX,
        },
        actions: &[],
    },
];

/// Pack a symbol code and precision into the on-chain representation
pub fn asset_symbol(code: &str, precision: u8) -> u64 {
    let mut s = precision as u64;
    for (i, c) in code.bytes().enumerate() {
        s |= (c as u64) << ((i + 1) * 8);
    }
    s
}

/// Pack a human-readable account name (base-32 alphabet, 5 bits per
/// character, 4 for the last of 13)
pub fn account_name(s: &str) -> u64 {
    const CHARMAP: &[u8; 32] = b".12345abcdefghijklmnopqrstuvwxyz";

    let mut v = 0u64;
    for (i, c) in s.bytes().enumerate() {
        let idx = CHARMAP
            .iter()
            .position(|&m| m == c)
            .expect("invalid name character") as u64;
        if i == 12 {
            v |= idx & 0x0f;
        } else {
            v |= idx << (64 - 5 * (i + 1));
        }
    }
    v
}

impl<'a> TransactionExpectation<'a> {
    pub fn chain_id(&self) -> [u8; CHAIN_ID_LEN] {
        let mut b = [0u8; CHAIN_ID_LEN];
        b.copy_from_slice(&hex::decode(self.chain_id).unwrap());
        b
    }

    pub fn key(&self) -> [u8; 32] {
        let mut b = [0u8; 32];
        b.copy_from_slice(&hex::decode(self.key).unwrap());
        b
    }

    /// Build the [ActionCommon] structures the transport would supply
    pub fn common(&self) -> Vec<ActionCommon> {
        self.actions
            .iter()
            .map(|a| {
                let mut authorization = heapless::Vec::new();
                for (actor, permission) in a.authorization {
                    authorization
                        .push(PermissionLevel {
                            actor: Some(account_name(actor)),
                            permission: Some(account_name(permission)),
                        })
                        .unwrap();
                }

                ActionCommon {
                    account: Some(account_name(a.account)),
                    name: Some(account_name(a.name)),
                    authorization,
                }
            })
            .collect()
    }
}

/// Reference varint encoding (buffering, unlike the engine)
fn push_varint(buff: &mut Vec<u8>, mut val: u64) {
    loop {
        let mut b = (val as u8) & 0x7f;
        val >>= 7;
        b |= ((val > 0) as u8) << 7;
        buff.push(b);

        if val == 0 {
            break;
        }
    }
}

/// Independently rebuild the canonical pre-image for a vector.
///
/// `chain_id(32) || expiration(4) || ref_block_num(2) ||
/// ref_block_prefix(4) || varint(max_net_usage_words) ||
/// max_cpu_usage_ms(1) || varint(delay_sec) || varint(0) ||
/// varint(action_count) || actions... || varint(0) || zero(32)`
pub fn canonical_preimage(tx: &TransactionExpectation) -> Vec<u8> {
    let mut buff = Vec::new();

    buff.extend_from_slice(&tx.chain_id());
    buff.extend_from_slice(&tx.header.expiration.to_le_bytes());
    buff.extend_from_slice(&tx.header.ref_block_num.to_le_bytes());
    buff.extend_from_slice(&tx.header.ref_block_prefix.to_le_bytes());
    push_varint(&mut buff, tx.header.max_net_usage_words as u64);
    buff.push(tx.header.max_cpu_usage_ms);
    push_varint(&mut buff, tx.header.delay_sec as u64);

    // context_free_actions
    push_varint(&mut buff, 0);

    // actions
    push_varint(&mut buff, tx.actions.len() as u64);
    for a in tx.actions {
        buff.extend_from_slice(&account_name(a.account).to_le_bytes());
        buff.extend_from_slice(&account_name(a.name).to_le_bytes());
        push_varint(&mut buff, a.authorization.len() as u64);
        for (actor, permission) in a.authorization {
            buff.extend_from_slice(&account_name(actor).to_le_bytes());
            buff.extend_from_slice(&account_name(permission).to_le_bytes());
        }
        // Placeholder transfer payload
        buff.extend_from_slice(&[0u8; 4]);
    }

    // transaction_extensions
    push_varint(&mut buff, 0);

    // context_free_data digest (empty)
    buff.extend_from_slice(&[0u8; 32]);

    buff
}

/// Run a full signing session against an engine and verify the returned
/// signature against the independently recomputed digest
pub fn test<DRV: Driver>(
    engine: &mut Engine<DRV>,
    tx: &TransactionExpectation,
) -> anyhow::Result<()> {
    let chain_id = tx.chain_id();
    let key = tx.key();

    log::info!("Starting transaction ({} actions)", tx.actions.len());

    // Initialise session
    engine.update(&Event::TxInit {
        chain_id: &chain_id,
        num_actions: tx.actions.len() as u32,
        header: tx.header.clone(),
        key: SigningKey::new(key),
    })?;

    ensure!(engine.is_initialized(), "init did not take");

    // Compile each declared action, with the display payload the
    // transport would attach
    let quantity = Asset {
        amount: 1_0000,
        symbol: asset_symbol("EOS", 4),
    };
    let payload = ActionPayload::Transfer(ActionTransfer {
        quantity: Some(quantity),
        memo: heapless::String::try_from("a memo").map_err(|_| anyhow!("memo too long"))?,
    });

    // Rendered quantity as the confirmation UI would show it
    let mut buff = [0u8; ASSET_STR_SIZE];
    let rendered = fmt_asset(quantity.amount, quantity.symbol, &mut buff)
        .map_err(|e| anyhow!("asset render failed: {e:?}"))?;
    ensure!(rendered == "1.0000 EOS", "unexpected asset rendering");

    for common in tx.common().iter() {
        ensure!(!engine.is_finished(), "finished before all actions");

        engine.update(&Event::TxAddAction {
            common,
            payload: &payload,
        })?;
    }

    ensure!(engine.is_finished(), "not finished after all actions");

    // Sign
    let output = engine.update(&Event::TxSign)?;
    let (v, r, s) = match &output {
        Output::Signature { v, r, s } => (*v, *r, *s),
        _ => return Err(anyhow!("unexpected output: {output:?}")),
    };

    // Recompute the digest from the reference serialization
    let digest: [u8; 32] = Sha256::digest(canonical_preimage(tx)).into();

    // Recover the public key from the signature and compare against the
    // key the session was initialised with
    let secp = Secp256k1::new();

    let mut compact = [0u8; 64];
    compact[..32].copy_from_slice(&r);
    compact[32..].copy_from_slice(&s);

    let recovery_id = RecoveryId::from_i32(v as i32)?;
    let signature = RecoverableSignature::from_compact(&compact, recovery_id)?;
    let message = Message::from_digest_slice(&digest)?;

    let recovered = secp.recover_ecdsa(&message, &signature)?;
    let expected = PublicKey::from_secret_key(&secp, &SecretKey::from_slice(&key)?);

    ensure!(
        recovered == expected,
        "signature does not verify against the session key for the canonical digest"
    );

    // Plain ECDSA verification over the same digest
    secp.verify_ecdsa(&message, &signature.to_standard(), &expected)?;

    Ok(())
}
