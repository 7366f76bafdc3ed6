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

//! Soft derivation of sr25519 addresses.

use crate::{decode_address, encode_address, Error, Ss58AddressFormat, LOG_TARGET};
use codec::Encode;
use schnorrkel::{
	derive::{ChainCode, Derivation},
	PublicKey,
};
use sp_crypto_hashing::blake2_256;

/// The length of the junction identifier. Note that this is also referred to as the
/// `CHAIN_CODE_LENGTH` in the context of Schnorrkel.
pub const JUNCTION_ID_LEN: usize = 32;

/// A single derivation junction description. It is the single parameter used when creating
/// a new secret key from an existing secret key and, in the case of `Soft`, a new public key
/// from an existing public key.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum DeriveJunction {
	/// Soft (vanilla) derivation. Public keys have a correspondent derivation.
	Soft([u8; JUNCTION_ID_LEN]),
	/// Hard ("hardened") derivation. Public keys do not have a correspondent derivation.
	Hard([u8; JUNCTION_ID_LEN]),
}

impl DeriveJunction {
	/// Consume self to return a hard derive junction with the same chain code.
	pub fn harden(self) -> Self {
		DeriveJunction::Hard(self.unwrap_inner())
	}

	/// Create a new soft (vanilla) DeriveJunction from a given, encodable, value.
	///
	/// If you need a hard junction, use `harden()` on the result.
	pub fn soft<T: Encode>(index: T) -> Self {
		let mut cc: [u8; JUNCTION_ID_LEN] = Default::default();
		index.using_encoded(|data| {
			if data.len() > JUNCTION_ID_LEN {
				cc = blake2_256(data);
			} else {
				cc[0..data.len()].copy_from_slice(data);
			}
		});
		DeriveJunction::Soft(cc)
	}

	/// Consume self to return the chain code.
	pub fn unwrap_inner(self) -> [u8; JUNCTION_ID_LEN] {
		match self {
			DeriveJunction::Hard(c) | DeriveJunction::Soft(c) => c,
		}
	}

	/// Get a reference to the inner junction id.
	pub fn inner(&self) -> &[u8; JUNCTION_ID_LEN] {
		match self {
			DeriveJunction::Hard(ref c) | DeriveJunction::Soft(ref c) => c,
		}
	}

	/// Return `true` if the junction is hard.
	pub fn is_hard(&self) -> bool {
		matches!(*self, DeriveJunction::Hard(_))
	}

	/// A junction from the text between two separators. Numeric codes are taken as `u64`.
	fn from_code(code: &str, hard: bool) -> Self {
		let res = match code.parse::<u64>() {
			Ok(n) => DeriveJunction::soft(n),
			Err(_) => DeriveJunction::soft(code),
		};
		if hard {
			res.harden()
		} else {
			res
		}
	}
}

/// Parse a derivation path such as `/1/stash//hard` into its junctions.
///
/// `/` starts a soft junction, `//` a hard one. An empty path has no junctions.
pub fn parse_path(path: &str) -> Result<Vec<DeriveJunction>, Error> {
	let invalid = || Error::InvalidPath(path.into());
	let mut junctions = Vec::new();
	let mut rest = path;

	while !rest.is_empty() {
		let after = rest.strip_prefix('/').ok_or_else(invalid)?;
		let (hard, body) = match after.strip_prefix('/') {
			Some(body) => (true, body),
			None => (false, after),
		};
		let end = body.find('/').unwrap_or(body.len());
		if end == 0 {
			return Err(invalid())
		}
		junctions.push(DeriveJunction::from_code(&body[..end], hard));
		rest = &body[end..];
	}

	Ok(junctions)
}

/// Derive the address reached from the sr25519 key of `who` along the soft junctions of `path`.
pub fn derive_address(who: &str, path: &str, format: Ss58AddressFormat) -> Result<String, Error> {
	let key = decode_address(who, false, None)?;
	if key.len() != JUNCTION_ID_LEN {
		return Err(Error::InvalidKeyLength(key.len()))
	}

	let junctions = parse_path(path)?;
	if junctions.iter().any(DeriveJunction::is_hard) {
		return Err(Error::HardDerivation)
	}

	let public = PublicKey::from_bytes(&key).map_err(|e| {
		log::debug!(target: LOG_TARGET, "Rejecting derivation from {}: {}", who, e);
		Error::InvalidPublicKey
	})?;
	let derived = junctions.iter().fold(public, |acc, j| {
		acc.derived_key_simple(ChainCode(*j.inner()), b"").0
	});

	encode_address(&derived.to_bytes(), format)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::Ss58AddressFormatRegistry::{PolkadotAccount, SubstrateAccount};

	const ALICE: &str = "5GrwvaEF5zXb26Fz9rcQpDWS57CtERHpNehXCPcNoHGKutQY";
	/// Root public key of the development phrase.
	const DEV_ROOT: &str = "5DfhGyQdFobKM8NsWvEeAKk5EQQgYe9AydgJ7rMB6E1EqRzV";

	#[test]
	fn numeric_junctions_are_u64() {
		let mut expected = [0u8; 32];
		expected[0] = 42;
		assert_eq!(parse_path("/42").unwrap(), vec![DeriveJunction::Soft(expected)]);
	}

	#[test]
	fn string_junctions_are_scale_encoded() {
		let mut expected = [0u8; 32];
		expected[0] = 5 << 2;
		expected[1..6].copy_from_slice(b"stash");
		assert_eq!(parse_path("//stash").unwrap(), vec![DeriveJunction::Hard(expected)]);
	}

	#[test]
	fn long_junctions_are_hashed() {
		let code = "a".repeat(40);
		let junction = parse_path(&format!("/{}", code)).unwrap()[0];
		assert_eq!(junction, DeriveJunction::Soft(blake2_256(&code.encode())));
	}

	#[test]
	fn path_parsing() {
		assert!(parse_path("").unwrap().is_empty());
		let junctions = parse_path("/1//2/x").unwrap();
		assert_eq!(junctions.len(), 3);
		let hard: Vec<_> = junctions.iter().map(DeriveJunction::is_hard).collect();
		assert_eq!(hard, vec![false, true, false]);

		for bad in ["1", "/", "//", "/a//", "///pass", "/a/"] {
			assert_eq!(parse_path(bad), Err(Error::InvalidPath(bad.into())), "{}", bad);
		}
	}

	#[test]
	fn derive_soft_known_address() {
		let format = Ss58AddressFormat::from(SubstrateAccount);
		// Public key of the development phrase derived along `/Alice`.
		assert_eq!(
			derive_address(DEV_ROOT, "/Alice", format).unwrap(),
			"5GvKEoc787uDV8etY1AM8vF385edu2iyqD1WfCjDugzLUiAL"
		);
		assert_eq!(
			derive_address(ALICE, "/foo", format).unwrap(),
			"5HZ5szcUx9cL6xa1xDwRsQnSHt39YiyLNW7vjagw19bY4NkB"
		);
		assert_eq!(
			derive_address(ALICE, "/foo", PolkadotAccount.into()).unwrap(),
			"16VP2KsYovsoYVaXurzS1Zcb9W2oF2XUSzrQtsgHZEd4EyFn"
		);
	}

	#[test]
	fn soft_derivation_composes() {
		let format = Ss58AddressFormat::from(SubstrateAccount);
		let one = derive_address(ALICE, "/1", format).unwrap();
		let two = derive_address(&one, "/2", format).unwrap();
		assert_eq!(derive_address(ALICE, "/1/2", format).unwrap(), two);
		assert_ne!(one, ALICE);
		assert_ne!(derive_address(ALICE, "/2", format).unwrap(), one);
		assert_eq!(derive_address(ALICE, "", format).unwrap(), ALICE);
	}

	#[test]
	fn derivation_respects_format() {
		let substrate = derive_address(ALICE, "/stash", SubstrateAccount.into()).unwrap();
		let polkadot = derive_address(ALICE, "/stash", PolkadotAccount.into()).unwrap();
		assert_eq!(crate::address_eq(&substrate, &polkadot), Ok(true));
	}

	#[test]
	fn hard_junctions_are_rejected() {
		assert_eq!(
			derive_address(ALICE, "/1//hard", Ss58AddressFormat::from(SubstrateAccount)),
			Err(Error::HardDerivation)
		);
	}

	#[test]
	fn short_keys_are_rejected() {
		let index = encode_address(&[7], Ss58AddressFormat::from(SubstrateAccount)).unwrap();
		assert_eq!(
			derive_address(&index, "/1", Ss58AddressFormat::from(SubstrateAccount)),
			Err(Error::InvalidKeyLength(1))
		);
	}
}
