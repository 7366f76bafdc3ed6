// This file is part of Substrate.

// Copyright (C) Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: Apache-2.0

// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
// 	http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Encoding, decoding and validation of SS58 addresses.

use crate::{ensure_encodable, hashing::ss58hash, Error, Ss58AddressFormat, LOG_TARGET};

/// Key lengths that can be encoded: account indices (1, 2, 4, 8) and public keys (32, 33).
pub const ALLOWED_DECODED_LENGTHS: [usize; 6] = [1, 2, 4, 8, 32, 33];

/// Byte lengths of a base58-decoded address, prefix and checksum included.
pub const ALLOWED_ENCODED_LENGTHS: [usize; 8] = [3, 4, 6, 10, 35, 36, 37, 38];

/// Checksum bytes appended for a key of `key_len` bytes.
fn checksum_len(key_len: usize) -> usize {
	if matches!(key_len, 32 | 33) {
		2
	} else {
		1
	}
}

/// Prefix bytes of `prefix`, which must be at most 14 bits.
fn prefix_bytes(prefix: u16) -> Vec<u8> {
	match prefix {
		0..=63 => vec![prefix as u8],
		_ => {
			// upper six bits of the lower byte(!)
			let first = ((prefix & 0b0000_0000_1111_1100) as u8) >> 2;
			// lower two bits of the lower byte in the high pos,
			// lower bits of the upper byte in the low pos
			let second = ((prefix >> 8) as u8) | ((prefix & 0b0000_0000_0000_0011) as u8) << 6;
			vec![first | 0b0100_0000, second]
		},
	}
}

/// Encode `key` as an SS58 address of the given network.
pub fn encode_address(key: &[u8], format: Ss58AddressFormat) -> Result<String, Error> {
	ensure_encodable(format)?;
	if !ALLOWED_DECODED_LENGTHS.contains(&key.len()) {
		return Err(Error::InvalidKeyLength(key.len()))
	}

	let mut data = prefix_bytes(u16::from(format));
	data.reserve(key.len() + 2);
	data.extend_from_slice(key);
	let hash = ss58hash(&data);
	data.extend_from_slice(&hash[..checksum_len(key.len())]);
	Ok(bs58::encode(data).into_string())
}

/// Result of inspecting the checksum of a base58-decoded address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChecksumCheck {
	/// The checksum matches and the prefix byte is allowed.
	pub is_valid: bool,
	/// Offset one past the last key byte, where the checksum starts.
	pub end: usize,
	/// Length of the prefix, 1 or 2 bytes.
	pub prefix_len: usize,
	pub format: Ss58AddressFormat,
}

/// Inspect the prefix and checksum of a base58-decoded address.
///
/// Never fails: input too short to hold a checksum is reported as invalid.
pub fn check_address_checksum(decoded: &[u8]) -> ChecksumCheck {
	let first = decoded.first().copied().unwrap_or_default();
	let second = decoded.get(1).copied().unwrap_or_default();
	let (prefix_len, prefix) = if first & 0b0100_0000 == 0 {
		(1, first as u16)
	} else {
		// weird bit manipulation owing to the combination of LE encoding and missing two
		// bits from the left.
		// d[0] d[1] are: 01aaaaaa bbcccccc
		// they make the LE-encoded 16-bit value: aaaaaabb 00cccccc
		// so the lower byte is formed of aaaaaabb and the higher byte is 00cccccc
		let lower = ((first & 0b0011_1111) << 2) | (second >> 6);
		let upper = second & 0b0011_1111;
		(2, (lower as u16) | ((upper as u16) << 8))
	};
	let format = Ss58AddressFormat::custom(prefix);

	// 32/33 byte keys plus a two byte checksum.
	let is_public_key = decoded.len() == 34 + prefix_len || decoded.len() == 35 + prefix_len;
	let checksum_len = if is_public_key { 2 } else { 1 };

	let end = match decoded.len().checked_sub(checksum_len) {
		Some(end) if end >= prefix_len => end,
		_ => {
			let end = prefix_len.min(decoded.len());
			return ChecksumCheck { is_valid: false, end, prefix_len: end, format }
		},
	};

	let hash = ss58hash(&decoded[..end]);
	let is_valid = first & 0b1000_0000 == 0 &&
		!matches!(first, 46 | 47) &&
		decoded[end..] == hash[..checksum_len];

	ChecksumCheck { is_valid, end, prefix_len, format }
}

/// The bytes between prefix and checksum form a key of an allowed length.
fn has_key_length(check: &ChecksumCheck) -> bool {
	ALLOWED_DECODED_LENGTHS.contains(&(check.end - check.prefix_len))
}

fn base58_decode(address: &str) -> Result<Vec<u8>, Error> {
	bs58::decode(address).into_vec().map_err(|e| {
		log::debug!(target: LOG_TARGET, "Base58 decoding of {} failed: {}", address, e);
		match e {
			bs58::decode::Error::InvalidCharacter { character, index } =>
				Error::InvalidCharacter { character, index },
			bs58::decode::Error::NonAsciiCharacter { index } => Error::InvalidCharacter {
				character: address
					.get(index..)
					.and_then(|rest| rest.chars().next())
					.unwrap_or(char::REPLACEMENT_CHARACTER),
				index,
			},
			other => Error::Base58(other.to_string()),
		}
	})
}

/// Decode an SS58 address into its key bytes and network prefix.
///
/// With `ignore_checksum` a checksum mismatch is tolerated. With `expected` the decoded prefix
/// has to match.
pub fn decode_address_with_format(
	address: &str,
	ignore_checksum: bool,
	expected: Option<Ss58AddressFormat>,
) -> Result<(Vec<u8>, Ss58AddressFormat), Error> {
	if address.is_empty() {
		return Err(Error::EmptyAddress)
	}

	let decoded = base58_decode(address)?;
	if !ALLOWED_ENCODED_LENGTHS.contains(&decoded.len()) {
		log::debug!(target: LOG_TARGET, "Decoding {}: invalid length {}", address, decoded.len());
		return Err(Error::InvalidLength(decoded.len()))
	}

	let check = check_address_checksum(&decoded);
	if !has_key_length(&check) {
		log::debug!(target: LOG_TARGET, "Decoding {}: no key of allowed length", address);
		return Err(Error::InvalidLength(decoded.len()))
	}
	if !check.is_valid && !ignore_checksum {
		log::debug!(target: LOG_TARGET, "Decoding {}: invalid checksum", address);
		return Err(Error::InvalidChecksum)
	}
	if let Some(expected) = expected {
		if expected != check.format {
			return Err(Error::PrefixMismatch { expected, found: check.format })
		}
	}

	Ok((decoded[check.prefix_len..check.end].to_vec(), check.format))
}

/// Decode an SS58 address into its key bytes.
///
/// A `0x` prefixed hex string is taken as the raw key and returned as-is.
pub fn decode_address(
	address: &str,
	ignore_checksum: bool,
	expected: Option<Ss58AddressFormat>,
) -> Result<Vec<u8>, Error> {
	if address.starts_with("0x") {
		return array_bytes::hex2bytes(address).map_err(|_| Error::InvalidHex)
	}
	decode_address_with_format(address, ignore_checksum, expected).map(|(key, _)| key)
}

/// Re-encode an address, or a hex key, under another network prefix.
pub fn convert_address(address: &str, format: Ss58AddressFormat) -> Result<String, Error> {
	encode_address(&decode_address(address, false, None)?, format)
}

/// Check that `address` is a valid address of `format`.
///
/// The prefix is checked first, then the length, then the checksum.
pub fn check_address(address: &str, format: Ss58AddressFormat) -> Result<(), Error> {
	let decoded = base58_decode(address)?;
	let check = check_address_checksum(&decoded);

	if check.format != format {
		return Err(Error::PrefixMismatch { expected: format, found: check.format })
	}
	if !ALLOWED_ENCODED_LENGTHS.contains(&decoded.len()) || !has_key_length(&check) {
		return Err(Error::InvalidLength(decoded.len()))
	}
	if !check.is_valid {
		return Err(Error::InvalidChecksum)
	}
	Ok(())
}

/// Like [`decode_address`], discarding the key.
pub fn validate_address(
	address: &str,
	ignore_checksum: bool,
	expected: Option<Ss58AddressFormat>,
) -> Result<(), Error> {
	decode_address(address, ignore_checksum, expected).map(|_| ())
}

pub fn is_address(
	address: &str,
	ignore_checksum: bool,
	expected: Option<Ss58AddressFormat>,
) -> bool {
	validate_address(address, ignore_checksum, expected).is_ok()
}

/// Whether two addresses (or hex keys) refer to the same key, whatever their network.
pub fn address_eq(a: &str, b: &str) -> Result<bool, Error> {
	Ok(decode_address(a, false, None)? == decode_address(b, false, None)?)
}

/// Sort addresses by their key bytes, re-encoding them under `format`.
pub fn sort_addresses<S: AsRef<str>>(
	addresses: &[S],
	format: Ss58AddressFormat,
) -> Result<Vec<String>, Error> {
	let mut keys = addresses
		.iter()
		.map(|a| decode_address(a.as_ref(), false, None))
		.collect::<Result<Vec<_>, _>>()?;
	keys.sort();
	keys.iter().map(|key| encode_address(key, format)).collect()
}
