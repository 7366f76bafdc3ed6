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

//! # SS58 addresses
//!
//! SS58 renders a public key as a base58 string tagged with a network prefix and protected by a
//! BLAKE2b-512 checksum:
//!
//! ```text
//! base58( prefix (1 or 2 bytes) || key || blake2b_512("SS58PRE" || prefix || key)[..1 or 2] )
//! ```
//!
//! Prefixes below 64 take a single byte, prefixes up to 16383 take two. Keys of 32 or 33 bytes
//! carry a two byte checksum, the short account index formats (1, 2, 4 or 8 bytes) carry one.
//!
//! Besides [`encode_address`] and [`decode_address`] this crate offers the usual helpers built on
//! top of them: validation ([`check_address`], [`is_address`]), comparison ([`address_eq`],
//! [`sort_addresses`]), multisig account ids ([`create_key_multi`]), EVM mapping
//! ([`evm_to_address`]), soft sr25519 derivation ([`derive_address`]) and a typed
//! [`AccountId32`].

mod account;
mod address;
mod derive;
mod evm;
mod format;
mod hashing;
mod multi;

pub use account::{AccountId32, Ss58Codec};
pub use address::{
	address_eq, check_address, check_address_checksum, convert_address, decode_address,
	decode_address_with_format, encode_address, is_address, sort_addresses, validate_address,
	ChecksumCheck, ALLOWED_DECODED_LENGTHS, ALLOWED_ENCODED_LENGTHS,
};
pub use derive::{derive_address, parse_path, DeriveJunction, JUNCTION_ID_LEN};
pub use evm::{address_to_evm, evm_to_address, EVM_ADDRESS_LEN};
pub use format::{
	default_ss58_version, ensure_encodable, is_reserved, known_networks, network_name,
	parse_address_format, set_default_ss58_version, KnownNetwork, MAX_PREFIX,
};
pub use hashing::ss58hash;
pub use multi::{create_key_multi, encode_multi_address};
pub use ss58_registry::{Ss58AddressFormat, Ss58AddressFormatRegistry, Token, TokenRegistry};

/// Log target for this crate.
pub const LOG_TARGET: &str = "ss58";

/// SS58 errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
	#[error("Invalid empty address passed")]
	EmptyAddress,
	/// A character outside the base58 alphabet.
	#[error("Invalid base58 character '{character}' at index {index}")]
	InvalidCharacter { character: char, index: usize },
	/// Any other base58 failure.
	#[error("Invalid base58 input: {0}")]
	Base58(String),
	/// The decoded byte length is not an allowed SS58 length.
	#[error("Invalid decoded address length {0}")]
	InvalidLength(usize),
	#[error("Invalid decoded address checksum")]
	InvalidChecksum,
	#[error("Expected ss58 format {expected}, received {found}")]
	PrefixMismatch { expected: Ss58AddressFormat, found: Ss58AddressFormat },
	#[error("Out of range ss58 format {0}")]
	FormatOutOfRange(u16),
	/// Reserved prefixes (46, 47) cannot be used to encode.
	#[error("Reserved ss58 format {0} is not allowed")]
	FormatNotAllowed(u16),
	#[error("Unknown ss58 network {0}")]
	UnknownNetwork(String),
	#[error("Expected a key with length 1, 2, 4, 8, 32 or 33, got {0}")]
	InvalidKeyLength(usize),
	#[error("Invalid hex input")]
	InvalidHex,
	#[error("Invalid evm address length {0}, expected 20")]
	InvalidEvmLength(usize),
	#[error("Invalid derivation path '{0}'")]
	InvalidPath(String),
	/// Public keys can only follow soft junctions.
	#[error("Expected a path containing only soft junctions")]
	HardDerivation,
	#[error("Key is not a valid sr25519 public key")]
	InvalidPublicKey,
}
