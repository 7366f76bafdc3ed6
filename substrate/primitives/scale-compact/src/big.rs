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

//! Arbitrary precision compact integers.

use crate::{
	big_integer_header, compact_to_vec, read_raw, Error, Raw, LOG_TARGET, MAX_BIG_INTEGER_BYTES,
};
use num_bigint::BigUint;
use num_traits::ToPrimitive;

/// Compact encoding of an arbitrary precision integer.
///
/// Fails with [`Error::ValueTooLarge`] if `value` needs more than 67 bytes.
pub fn compact_big_to_vec(value: &BigUint) -> Result<Vec<u8>, Error> {
	if let Some(native) = value.to_u128() {
		return Ok(compact_to_vec(native))
	}

	let payload = value.to_bytes_le();
	if payload.len() > MAX_BIG_INTEGER_BYTES {
		log::debug!(target: LOG_TARGET, "Refusing to encode a {} byte integer", payload.len());
		return Err(Error::ValueTooLarge(payload.len()))
	}

	let mut dest = Vec::with_capacity(1 + payload.len());
	dest.push(big_integer_header(payload.len()));
	dest.extend_from_slice(&payload);
	Ok(dest)
}

/// Decode an arbitrary precision compact integer from the front of `input`.
///
/// Returns the number of bytes consumed and the value.
pub fn compact_big_from_slice(input: &[u8]) -> Result<(usize, BigUint), Error> {
	match read_raw(input)? {
		Raw::Fixed { consumed, value } => Ok((consumed, BigUint::from(value))),
		Raw::Big { consumed, payload } => Ok((consumed, BigUint::from_bytes_le(payload))),
	}
}
