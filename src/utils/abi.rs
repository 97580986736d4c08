//! Minimal ABI encoding for the handful of ERC-721 read calls the pipeline
//! needs. Selectors are precomputed (first 4 bytes of the keccak-256 of the
//! canonical signature).

use anyhow::{bail, Context, Result};

/// `name()`
pub const SEL_NAME: &str = "06fdde03";
/// `symbol()`
pub const SEL_SYMBOL: &str = "95d89b41";
/// `balanceOf(address)`
pub const SEL_BALANCE_OF: &str = "70a08231";
/// `tokenOfOwnerByIndex(address,uint256)`
pub const SEL_TOKEN_OF_OWNER_BY_INDEX: &str = "2f745c59";
/// `tokenURI(uint256)`
pub const SEL_TOKEN_URI: &str = "c87b56dd";

/// Left-pad an address to a 32-byte word
pub fn encode_address(addr_hex: &str) -> String {
    let body = addr_hex.trim_start_matches("0x");
    format!("{:0>64}", body.to_ascii_lowercase())
}

/// Encode an unsigned integer as a 32-byte word
pub fn encode_uint(value: u128) -> String {
    format!("{:064x}", value)
}

/// Build `0x`-prefixed calldata from a selector and word-encoded arguments
pub fn calldata(selector: &str, args: &[String]) -> String {
    let mut data = String::with_capacity(10 + args.len() * 64);
    data.push_str("0x");
    data.push_str(selector);
    for arg in args {
        data.push_str(arg);
    }
    data
}

fn strip_0x(data: &str) -> &str {
    data.strip_prefix("0x").unwrap_or(data)
}

/// Decode a single uint256 return value; must fit in a u128
pub fn decode_uint(data: &str) -> Result<u128> {
    let hex_str = strip_0x(data);
    // The RPC response is untrusted; reject non-ASCII up front so the word
    // slicing below cannot land inside a multi-byte char.
    if !hex_str.is_ascii() {
        bail!("ABI uint return is not valid hex");
    }
    if hex_str.len() < 64 {
        bail!("ABI uint return too short: {} hex chars", hex_str.len());
    }

    let (high, low) = hex_str[..64].split_at(32);
    if u128::from_str_radix(high, 16).context("invalid uint word")? != 0 {
        bail!("uint return value exceeds 128 bits");
    }
    u128::from_str_radix(low, 16).context("invalid uint word")
}

/// Decode a single dynamic string return value (offset word, length word,
/// then the UTF-8 bytes)
pub fn decode_string(data: &str) -> Result<String> {
    let bytes = hex::decode(strip_0x(data)).context("ABI return is not valid hex")?;
    if bytes.len() < 64 {
        bail!("ABI string return too short: {} bytes", bytes.len());
    }

    let offset = word_to_usize(&bytes[..32])?;
    if bytes.len() < offset + 32 {
        bail!("ABI string offset out of range");
    }

    let len = word_to_usize(&bytes[offset..offset + 32])?;
    let start = offset + 32;
    if bytes.len() < start + len {
        bail!("ABI string length out of range");
    }

    String::from_utf8(bytes[start..start + len].to_vec()).context("ABI string is not valid UTF-8")
}

fn word_to_usize(word: &[u8]) -> Result<usize> {
    if word[..24].iter().any(|b| *b != 0) {
        bail!("ABI word exceeds addressable range");
    }
    let mut buf = [0u8; 8];
    buf.copy_from_slice(&word[24..32]);
    Ok(u64::from_be_bytes(buf) as usize)
}
