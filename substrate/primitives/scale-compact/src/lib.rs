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

//! # SCALE compact integers
//!
//! Variable length encoding of unsigned integers used by SCALE. The two least significant bits of
//! the first byte select one of four modes:
//!
//! | mode   | range                | layout                                                   |
//! |--------|----------------------|----------------------------------------------------------|
//! | `0b00` | `0..=2^6-1`          | single byte, `value << 2`                                |
//! | `0b01` | `2^6..=2^14-1`       | two bytes little endian, `value << 2 \| 0b01`            |
//! | `0b10` | `2^14..=2^30-1`      | four bytes little endian, `value << 2 \| 0b10`           |
//! | `0b11` | `2^30..`             | `(len - 4) << 2 \| 0b11` followed by `len` LE bytes       |
//!
//! Native integers up to `u128` are handled by [`compact_to_vec`] and [`compact_from_slice`],
//! arbitrary precision integers by [`compact_big_to_vec`] and [`compact_big_from_slice`].
//!
//! Decoding is lenient: a value stored in a wider mode than needed is accepted.

mod big;

pub use big::{compact_big_from_slice, compact_big_to_vec};

use codec::Input;

/// Log target for this crate.
pub const LOG_TARGET: &str = "scale-compact";

/// Largest value of the single byte mode.
pub const MAX_U8: u128 = (1 << 6) - 1;
/// Largest value of the two byte mode.
pub const MAX_U16: u128 = (1 << 14) - 1;
/// Largest value of the four byte mode.
pub const MAX_U32: u128 = (1 << 30) - 1;
/// Largest payload of the big-integer mode, six header bits plus the implicit four.
pub const MAX_BIG_INTEGER_BYTES: usize = 0b0011_1111 + 4;

const MODE_MASK: u8 = 0b11;
const MODE_SINGLE: u8 = 0b00;
const MODE_TWO: u8 = 0b01;
const MODE_FOUR: u8 = 0b10;

/// Compact codec errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
	/// The input ended before the announced encoding did.
	#[error("Unexpected end of buffer: needed {needed} bytes, {available} available")]
	UnexpectedEndOfBuffer {
		/// Bytes the encoding requires.
		needed: usize,
		/// Bytes actually present.
		available: usize,
	},
	/// The decoded value does not fit the requested integer width.
	#[error("Compact value does not fit into {0} bits")]
	Overflow(u32),
	/// The value is wider than the big-integer mode can express.
	#[error("Value needs {0} bytes, compact encoding supports at most 67")]
	ValueTooLarge(usize),
}

/// Number of little-endian bytes needed to represent `value`, at least one.
fn significant_bytes(value: u128) -> usize {
	let bits = 128 - value.leading_zeros() as usize;
	bits.div_ceil(8).max(1)
}

/// Length of the compact encoding of `value`.
pub fn compact_len(value: u128) -> usize {
	if value <= MAX_U8 {
		1
	} else if value <= MAX_U16 {
		2
	} else if value <= MAX_U32 {
		4
	} else {
		1 + significant_bytes(value)
	}
}

/// Append the compact encoding of `value` to `dest`.
pub fn encode_compact_to(value: u128, dest: &mut Vec<u8>) {
	if value <= MAX_U8 {
		dest.push((value as u8) << 2 | MODE_SINGLE);
	} else if value <= MAX_U16 {
		dest.extend_from_slice(&((value as u16) << 2 | MODE_TWO as u16).to_le_bytes());
	} else if value <= MAX_U32 {
		dest.extend_from_slice(&((value as u32) << 2 | MODE_FOUR as u32).to_le_bytes());
	} else {
		let len = significant_bytes(value);
		debug_assert!(len >= 4, "anything below 2^30 is handled by the fixed modes; qed");
		dest.push(big_integer_header(len));
		dest.extend_from_slice(&value.to_le_bytes()[..len]);
	}
}

/// Compact encoding of `value`.
pub fn compact_to_vec(value: u128) -> Vec<u8> {
	let mut dest = Vec::with_capacity(compact_len(value));
	encode_compact_to(value, &mut dest);
	dest
}

/// Prefix `input` with its compact-encoded length.
pub fn compact_add_length(input: &[u8]) -> Vec<u8> {
	let len = input.len() as u128;
	let mut dest = Vec::with_capacity(compact_len(len) + input.len());
	encode_compact_to(len, &mut dest);
	dest.extend_from_slice(input);
	dest
}

pub(crate) fn big_integer_header(len: usize) -> u8 {
	(((len - 4) as u8) << 2) | MODE_MASK
}

/// A compact value split off the front of a buffer, before it is turned into an integer.
pub(crate) enum Raw<'a> {
	/// One of the fixed modes, already shifted.
	Fixed { consumed: usize, value: u32 },
	/// Big-integer mode with its little-endian payload.
	Big { consumed: usize, payload: &'a [u8] },
}

fn take(input: &[u8], needed: usize) -> Result<&[u8], Error> {
	input.get(..needed).ok_or_else(|| {
		log::debug!(
			target: LOG_TARGET,
			"Truncated compact: needed {} bytes, got {}",
			needed,
			input.len()
		);
		Error::UnexpectedEndOfBuffer { needed, available: input.len() }
	})
}

pub(crate) fn read_raw(input: &[u8]) -> Result<Raw<'_>, Error> {
	let first = *input.first().ok_or(Error::UnexpectedEndOfBuffer { needed: 1, available: 0 })?;
	match first & MODE_MASK {
		MODE_SINGLE => Ok(Raw::Fixed { consumed: 1, value: (first >> 2) as u32 }),
		MODE_TWO => {
			let bytes = take(input, 2)?;
			let value = u16::from_le_bytes([bytes[0], bytes[1]]) >> 2;
			Ok(Raw::Fixed { consumed: 2, value: value as u32 })
		},
		MODE_FOUR => {
			let bytes = take(input, 4)?;
			let value = u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]) >> 2;
			Ok(Raw::Fixed { consumed: 4, value })
		},
		_ => {
			let len = (first >> 2) as usize + 4;
			let bytes = take(input, 1 + len)?;
			Ok(Raw::Big { consumed: 1 + len, payload: &bytes[1..] })
		},
	}
}

/// Decode a compact integer from the front of `input`.
///
/// Returns the number of bytes consumed and the value.
pub fn compact_from_slice(input: &[u8]) -> Result<(usize, u128), Error> {
	match read_raw(input)? {
		Raw::Fixed { consumed, value } => Ok((consumed, value as u128)),
		Raw::Big { consumed, payload } => Ok((consumed, le_to_u128(payload)?)),
	}
}

fn le_to_u128(payload: &[u8]) -> Result<u128, Error> {
	let used = payload.iter().rposition(|b| *b != 0).map_or(0, |p| p + 1);
	if used > 16 {
		log::debug!(target: LOG_TARGET, "Compact payload of {} bytes overflows u128", used);
		return Err(Error::Overflow(128))
	}
	let mut buf = [0u8; 16];
	buf[..used].copy_from_slice(&payload[..used]);
	Ok(u128::from_le_bytes(buf))
}

/// Read a compact length prefix and return the total consumed length with the payload it
/// announces.
pub fn compact_strip_length(input: &[u8]) -> Result<(usize, &[u8]), Error> {
	let (offset, len) = compact_from_slice(input)?;
	let len = usize::try_from(len).map_err(|_| Error::Overflow(usize::BITS))?;
	let total = offset.checked_add(len).ok_or(Error::Overflow(usize::BITS))?;
	let payload = input.get(offset..total).ok_or_else(|| {
		log::debug!(
			target: LOG_TARGET,
			"Length prefix announces {} bytes, {} left",
			len,
			input.len() - offset
		);
		Error::UnexpectedEndOfBuffer { needed: total, available: input.len() }
	})?;
	Ok((total, payload))
}

fn read_exact<I: Input>(input: &mut I, into: &mut [u8], needed: usize) -> Result<(), Error> {
	if let Ok(Some(available)) = input.remaining_len() {
		if available < into.len() {
			let available = needed - into.len() + available;
			return Err(Error::UnexpectedEndOfBuffer { needed, available })
		}
	}
	input
		.read(into)
		.map_err(|_| Error::UnexpectedEndOfBuffer { needed, available: needed - into.len() })
}

/// Decode a compact integer from a SCALE input stream, advancing it past the encoding.
pub fn decode_compact<I: Input>(input: &mut I) -> Result<u128, Error> {
	let first = input
		.read_byte()
		.map_err(|_| Error::UnexpectedEndOfBuffer { needed: 1, available: 0 })?;
	match first & MODE_MASK {
		MODE_SINGLE => Ok((first >> 2) as u128),
		MODE_TWO => {
			let mut buf = [first, 0];
			read_exact(input, &mut buf[1..], 2)?;
			Ok((u16::from_le_bytes(buf) >> 2) as u128)
		},
		MODE_FOUR => {
			let mut buf = [first, 0, 0, 0];
			read_exact(input, &mut buf[1..], 4)?;
			Ok((u32::from_le_bytes(buf) >> 2) as u128)
		},
		_ => {
			let len = (first >> 2) as usize + 4;
			let mut payload = vec![0u8; len];
			read_exact(input, &mut payload, 1 + len)?;
			le_to_u128(&payload)
		},
	}
}
