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
//! Network prefixes, backed by the `ss58-registry` crate.

use crate::{Error, LOG_TARGET};
use core::sync::atomic::{AtomicU16, Ordering};
use serde::Serialize;
use ss58_registry::{Ss58AddressFormat, Ss58AddressFormatRegistry, Token};

/// Largest prefix that fits the 14 bits of the two byte encoding.
pub const MAX_PREFIX: u16 = 0b0011_1111_1111_1111;

/// A registry entry, flattened for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KnownNetwork {
	pub prefix: u16,
	/// Lowercase name, as accepted by [`parse_address_format`].
	pub network: &'static str,
	pub symbols: Vec<&'static str>,
	pub decimals: Vec<u8>,
}

impl KnownNetwork {
	/// Look up a registry entry by network name, ignoring case.
	pub fn from_name(name: &str) -> Option<Self> {
		let network =
			Ss58AddressFormat::all_names().iter().copied().find(|n| n.eq_ignore_ascii_case(name))?;
		let registry = Ss58AddressFormatRegistry::try_from(network).ok()?;
		let tokens: Vec<Token> =
			registry.tokens().iter().map(|t| Token::from(t.clone())).collect();
		Some(Self {
			prefix: u16::from(Ss58AddressFormat::from(registry)),
			network,
			symbols: tokens.iter().map(|t| t.name).collect(),
			decimals: tokens.iter().map(|t| t.decimals).collect(),
		})
	}

	/// Look up a registry entry by prefix.
	pub fn from_prefix(prefix: u16) -> Option<Self> {
		Self::from_name(network_name(Ss58AddressFormat::custom(prefix))?)
	}

	pub fn format(&self) -> Ss58AddressFormat {
		Ss58AddressFormat::custom(self.prefix)
	}
}

/// Every registry entry, ordered by prefix.
pub fn known_networks() -> Vec<KnownNetwork> {
	let mut networks: Vec<_> =
		Ss58AddressFormat::all_names().iter().filter_map(|n| KnownNetwork::from_name(n)).collect();
	networks.sort_by_key(|n| n.prefix);
	networks
}

/// Registry name of `format`, `None` for custom prefixes.
pub fn network_name(format: Ss58AddressFormat) -> Option<&'static str> {
	Ss58AddressFormat::all_names()
		.iter()
		.copied()
		.find(|n| Ss58AddressFormat::try_from(*n).map_or(false, |f| f == format))
}

/// Parse a format from a registry name (any case) or a numeric prefix.
pub fn parse_address_format(x: &str) -> Result<Ss58AddressFormat, Error> {
	if let Some(known) = KnownNetwork::from_name(x) {
		return Ok(known.format())
	}
	let prefix = x.parse::<u16>().map_err(|_| Error::UnknownNetwork(x.into()))?;
	if prefix > MAX_PREFIX {
		return Err(Error::FormatOutOfRange(prefix))
	}
	Ok(Ss58AddressFormat::custom(prefix))
}

/// Prefixes 46 and 47 are reserved.
pub fn is_reserved(format: Ss58AddressFormat) -> bool {
	matches!(u16::from(format), 46 | 47)
}

/// Ensure `format` can be used to encode an address.
pub fn ensure_encodable(format: Ss58AddressFormat) -> Result<(), Error> {
	let prefix = u16::from(format);
	if prefix > MAX_PREFIX {
		return Err(Error::FormatOutOfRange(prefix))
	}
	if is_reserved(format) {
		return Err(Error::FormatNotAllowed(prefix))
	}
	Ok(())
}

/// Prefix of the `substrate` network.
static DEFAULT_VERSION: AtomicU16 = AtomicU16::new(42);

/// Returns the default SS58 format used by the current process.
pub fn default_ss58_version() -> Ss58AddressFormat {
	Ss58AddressFormat::custom(DEFAULT_VERSION.load(Ordering::Relaxed))
}

/// Set the default SS58 format used by the current process.
///
/// Only encodable formats are accepted, so the default can always be used to encode.
pub fn set_default_ss58_version(format: Ss58AddressFormat) -> Result<(), Error> {
	ensure_encodable(format)?;
	log::debug!(target: LOG_TARGET, "Default ss58 format set to {}", format);
	DEFAULT_VERSION.store(u16::from(format), Ordering::Relaxed);
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;
	use ss58_registry::Ss58AddressFormatRegistry::{
		KusamaAccount, PolkadotAccount, SubstrateAccount,
	};

	#[test]
	fn registry_is_sorted() {
		let networks = known_networks();
		assert_eq!(networks.len(), Ss58AddressFormat::all_names().len());
		assert!(networks.windows(2).all(|w| w[0].prefix <= w[1].prefix));
		for network in networks {
			assert_eq!(network.symbols.len(), network.decimals.len(), "{}", network.network);
			let by_prefix = KnownNetwork::from_prefix(network.prefix).map(|n| n.prefix);
			assert_eq!(by_prefix, Some(network.prefix));
		}
	}

	#[test]
	fn parse_names_and_numbers() {
		let polkadot = Ss58AddressFormat::from(PolkadotAccount);
		assert_eq!(parse_address_format("polkadot"), Ok(polkadot));
		assert_eq!(parse_address_format("Kusama"), Ok(Ss58AddressFormat::from(KusamaAccount)));
		assert_eq!(parse_address_format("42"), Ok(Ss58AddressFormat::from(SubstrateAccount)));
		assert_eq!(parse_address_format("9999"), Ok(Ss58AddressFormat::custom(9999)));
		assert_eq!(parse_address_format("16384"), Err(Error::FormatOutOfRange(16384)));
		assert_eq!(
			parse_address_format("nowhere"),
			Err(Error::UnknownNetwork("nowhere".into()))
		);
	}

	#[test]
	fn parachain_networks_are_known() {
		for (name, prefix) in [("phala", 30), ("hydradx", 63), ("crust", 66)] {
			assert_eq!(u16::from(parse_address_format(name).unwrap()), prefix, "{}", name);
			assert_eq!(network_name(Ss58AddressFormat::custom(prefix)), Some(name));
		}
		assert_eq!(Ss58AddressFormat::custom(30).to_string(), "phala");
	}

	#[test]
	fn known_network_carries_tokens() {
		let polkadot = KnownNetwork::from_prefix(0).unwrap();
		assert_eq!(polkadot.network, "polkadot");
		assert_eq!(polkadot.symbols, vec!["DOT"]);
		assert_eq!(polkadot.decimals, vec![10]);
		assert_eq!(KnownNetwork::from_name("KUSAMA").map(|n| n.prefix), Some(2));
		assert_eq!(network_name(Ss58AddressFormat::custom(16000)), None);
	}

	#[test]
	fn reserved_and_out_of_range_formats() {
		for prefix in [46, 47] {
			let format = Ss58AddressFormat::custom(prefix);
			assert!(is_reserved(format));
			assert_eq!(ensure_encodable(format), Err(Error::FormatNotAllowed(prefix)));
		}
		assert_eq!(
			ensure_encodable(Ss58AddressFormat::custom(MAX_PREFIX + 1)),
			Err(Error::FormatOutOfRange(MAX_PREFIX + 1))
		);
		assert!(ensure_encodable(Ss58AddressFormat::custom(MAX_PREFIX)).is_ok());
	}

	#[test]
	fn default_version_rejects_unencodable_formats() {
		assert_eq!(
			set_default_ss58_version(Ss58AddressFormat::custom(46)),
			Err(Error::FormatNotAllowed(46))
		);
		assert!(ensure_encodable(default_ss58_version()).is_ok());
	}
}
