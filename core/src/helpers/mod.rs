// Copyright (c) 2022-2023 The MobileCoin Foundation

//! Display codecs for the confirmation UI.
//!
//! These render transport-supplied values into caller-provided buffers
//! without allocation, and are independent of the signing/hashing path.
//! A failed render always leaves the buffer fully cleared, never
//! partially written.

use core::str::from_utf8;

use emstr::EncodeStr;
use static_assertions::const_assert;

use crate::engine::Error;

/// Maximum rendered asset length: sign, 20 digits, decimal point,
/// space, 7 symbol characters
pub const ASSET_STR_SIZE: usize = 32;

/// Maximum rendered name length
pub const NAME_STR_SIZE: usize = 13;

/// Maximum rendered public key length: prefix plus base58check of a
/// 33-byte compressed point
pub const PUBKEY_STR_SIZE: usize = 64;

/// Compressed public key length in bytes
pub const PUBLIC_KEY_LEN: usize = 33;

const PUBKEY_PREFIX: &str = "EOS_K1_";

/// Name alphabet, 5 bits per character (4 for the last)
const NAME_CHARMAP: &[u8; 32] = b".12345abcdefghijklmnopqrstuvwxyz";

/// Powers of ten for digit extraction, ones place first
const POW10: [u64; 20] = [
    1,
    10,
    100,
    1_000,
    10_000,
    100_000,
    1_000_000,
    10_000_000,
    100_000_000,
    1_000_000_000,
    10_000_000_000,
    100_000_000_000,
    1_000_000_000_000,
    10_000_000_000_000,
    100_000_000_000_000,
    1_000_000_000_000_000,
    10_000_000_000_000_000,
    100_000_000_000_000_000,
    1_000_000_000_000_000_000,
    10_000_000_000_000_000_000,
];

const_assert!(ASSET_STR_SIZE >= 1 + 20 + 1 + 1 + 7);
const_assert!(PUBKEY_STR_SIZE >= 7 + 51);

/// Render an asset value with its symbol code, eg. `-12345.0000 EOS`.
///
/// Precision is taken from the low byte of the packed symbol; a digit is
/// emitted for every position implied by the precision whether or not
/// the magnitude reaches that column. Fails (clearing `buff`) if any
/// symbol-code byte before the nul terminator is not an uppercase ASCII
/// letter, or if the buffer is exhausted.
pub fn fmt_asset(amount: i64, symbol: u64, buff: &mut [u8]) -> Result<&str, Error> {
    let n = match fmt_asset_inner(amount, symbol, buff) {
        Ok(n) => n,
        Err(e) => {
            buff.fill(0);
            return Err(e);
        }
    };

    from_utf8(&buff[..n]).map_err(|_| Error::EncodingFailed)
}

fn fmt_asset_inner(amount: i64, symbol: u64, buff: &mut [u8]) -> Result<usize, Error> {
    let mut n = 0;

    // Sign. Magnitude handled unsigned so i64::MIN negates cleanly
    let v = amount.unsigned_abs();
    if amount < 0 {
        n += emstr::write!(&mut buff[n..], '-').map_err(|_| Error::EncodingFailed)?;
    }

    // Value. Precision stored in low 8 bits; no decimal point is placed
    // for precisions past the last digit column
    let precision = (symbol & 0xff) as usize;
    for k in (1..POW10.len()).rev() {
        if v >= POW10[k] || precision >= k {
            let digit = (b'0' + (v / POW10[k] % 10) as u8) as char;
            n += emstr::write!(&mut buff[n..], digit).map_err(|_| Error::EncodingFailed)?;
        }
        if precision == k {
            n += emstr::write!(&mut buff[n..], '.').map_err(|_| Error::EncodingFailed)?;
        }
    }
    let ones = (b'0' + (v % 10) as u8) as char;
    n += emstr::write!(&mut buff[n..], ones, ' ').map_err(|_| Error::EncodingFailed)?;

    // Symbol. Up to 7 characters from the packed high bytes, nul padded
    for i in 1..8 {
        let c = ((symbol >> (i * 8)) & 0xff) as u8;
        if c == 0 {
            break;
        }
        if !c.is_ascii_uppercase() {
            return Err(Error::InvalidSymbol);
        }
        n += emstr::write!(&mut buff[n..], c as char).map_err(|_| Error::EncodingFailed)?;
    }

    Ok(n)
}

/// Decode a packed 64-bit account name, eg. `eosio`.
///
/// 13 characters, 5 bits each (4 for the last), trailing filler
/// stripped; zero decodes to the empty string. Always succeeds.
pub fn fmt_name(name: u64, buff: &mut [u8; NAME_STR_SIZE]) -> &str {
    buff.fill(b'.');

    let mut tmp = name;
    for i in 0..NAME_STR_SIZE {
        let (mask, shift) = match i {
            0 => (0x0f, 4),
            _ => (0x1f, 5),
        };
        buff[NAME_STR_SIZE - 1 - i] = NAME_CHARMAP[(tmp & mask) as usize];
        tmp >>= shift;
    }

    let len = NAME_STR_SIZE - buff.iter().rev().take_while(|&&c| c == b'.').count();

    from_utf8(&buff[..len]).unwrap_or("")
}

/// Render a compressed public key as prefixed base58check text,
/// eg. `EOS_K1_...`.
///
/// Fails (clearing `buff`) if the check encoding does not fit.
pub fn fmt_public_key<'a>(
    pubkey: &[u8; PUBLIC_KEY_LEN],
    buff: &'a mut [u8],
) -> Result<&'a str, Error> {
    let n = match fmt_public_key_inner(pubkey, buff) {
        Ok(n) => n,
        Err(e) => {
            buff.fill(0);
            return Err(e);
        }
    };

    from_utf8(&buff[..n]).map_err(|_| Error::EncodingFailed)
}

fn fmt_public_key_inner(
    pubkey: &[u8; PUBLIC_KEY_LEN],
    buff: &mut [u8],
) -> Result<usize, Error> {
    let mut n = emstr::write!(&mut buff[..], PUBKEY_PREFIX).map_err(|_| Error::EncodingFailed)?;

    n += bs58::encode(&pubkey[..])
        .with_check()
        .into(&mut buff[n..])
        .map_err(|_| Error::EncodingFailed)?;

    Ok(n)
}
