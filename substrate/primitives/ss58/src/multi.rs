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

//! Multisig account ids.

use crate::{decode_address, encode_address, Error, Ss58AddressFormat};
use sp_crypto_hashing::blake2_256;
use sp_scale_compact::encode_compact_to;

/// Seed of the multisig account id.
const MULTI_PREFIX: &[u8] = b"modlpy/utilisuba";

/// Deterministic account id of a `threshold`-of-`who` multisig.
///
/// `blake2_256("modlpy/utilisuba" || compact(who.len()) || sorted(who) || threshold_le)`, so the
/// order of the signatories does not matter.
pub fn create_key_multi<K: AsRef<[u8]>>(who: &[K], threshold: u16) -> [u8; 32] {
	let mut signatories: Vec<&[u8]> = who.iter().map(AsRef::as_ref).collect();
	signatories.sort();

	let keys_len: usize = signatories.iter().map(|k| k.len()).sum();
	let mut data = Vec::with_capacity(MULTI_PREFIX.len() + 5 + keys_len + 2);
	data.extend_from_slice(MULTI_PREFIX);
	encode_compact_to(signatories.len() as u128, &mut data);
	for key in signatories {
		data.extend_from_slice(key);
	}
	data.extend_from_slice(&threshold.to_le_bytes());

	blake2_256(&data)
}

/// Address of a `threshold`-of-`who` multisig, with `who` given as addresses or hex keys.
pub fn encode_multi_address<S: AsRef<str>>(
	who: &[S],
	threshold: u16,
	format: Ss58AddressFormat,
) -> Result<String, Error> {
	let keys = who
		.iter()
		.map(|a| decode_address(a.as_ref(), false, None))
		.collect::<Result<Vec<_>, _>>()?;
	encode_address(&create_key_multi(&keys, threshold), format)
}
