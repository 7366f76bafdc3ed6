// This file is part of Substrate.

// Copyright (C) Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later WITH Classpath-exception-2.0

// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.

// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU General Public License for more details.

// You should have received a copy of the GNU General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

//! Command line utility for SS58 addresses and SCALE compact integers.
//!
//! See [`Ss58ToolCmd`] for a list of available commands.
//!
//! ## Typical use-cases.
//! ##### Encode a public key for Polkadot
//! ```bash
//! ss58-tool --network polkadot encode --public 0xd43593c715fdd31c61141abd04a99fd6822c8558854ccde39a5684e7a56da27d
//! ```
//!
//! ##### Inspect an address
//! ```bash
//! ss58-tool --output-type json decode 5GrwvaEF5zXb26Fz9rcQpDWS57CtERHpNehXCPcNoHGKutQY
//! ```
//!
//! ##### Move an address to another network
//! ```bash
//! ss58-tool --network kusama convert 15oF4uVJwmo4TdGW7VfQxNLavjCXviqxT9S1MgbjMNHr6Sp5
//! ```
//!
//! ##### SCALE compact integers
//! ```bash
//! ss58-tool compact encode 16384
//! ss58-tool compact decode 0x02000100
//! ```
//!
//! Errors are printed to stderr and make the process exit with a non-zero code. Set `RUST_LOG`
//! (e.g. `RUST_LOG=ss58=debug`) to see why an address was rejected.

use clap::{Parser, Subcommand, ValueEnum};
use num_bigint::BigUint;
use serde_json::{json, Value};
use sp_ss58::{
	check_address, convert_address, decode_address, decode_address_with_format,
	default_ss58_version, derive_address, encode_address, encode_multi_address, evm_to_address,
	known_networks, network_name, parse_address_format, Ss58AddressFormat,
};

/// Log target of the tool.
pub const LOG_TARGET: &str = "ss58-tool";

/// Encode, decode and inspect SS58 addresses.
#[derive(Debug, Parser)]
#[command(rename_all = "kebab-case", version, about)]
pub struct Ss58Tool {
	#[command(subcommand)]
	pub command: Ss58ToolCmd,
	/// Network address format, by name or numeric prefix.
	///
	/// Also becomes the process default format.
	#[arg(
		short = 'n',
		long,
		global = true,
		value_name = "NETWORK",
		value_parser = parse_ss58_address_format,
	)]
	pub network: Option<Ss58AddressFormat>,
	/// Output format.
	#[arg(
		long,
		global = true,
		value_name = "FORMAT",
		value_enum,
		ignore_case = true,
		default_value_t = OutputType::Text
	)]
	pub output_type: OutputType,
}

/// Output type of the commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "kebab-case")]
pub enum OutputType {
	Json,
	Text,
}

#[derive(Debug, Subcommand)]
#[command(rename_all = "kebab-case")]
pub enum Ss58ToolCmd {
	Encode(EncodeCmd),
	Decode(DecodeCmd),
	Convert(ConvertCmd),
	Validate(ValidateCmd),
	Networks,
	#[command(subcommand)]
	Compact(CompactCmd),
	Multi(MultiCmd),
	Evm(EvmCmd),
	Derive(DeriveCmd),
}

/// Encode a public key as an address.
#[derive(Parser, Debug, Clone)]
pub struct EncodeCmd {
	/// Hex encoded public key, 1, 2, 4, 8, 32 or 33 bytes long.
	#[arg(long, short)]
	pub public: String,
}

/// Decode an address into its public key and network.
#[derive(Parser, Debug, Clone)]
pub struct DecodeCmd {
	pub address: String,
	/// Accept addresses with a wrong checksum.
	#[arg(long)]
	pub ignore_checksum: bool,
}

/// Re-encode an address under the network given with `--network`.
#[derive(Parser, Debug, Clone)]
pub struct ConvertCmd {
	/// Address or hex encoded public key.
	pub address: String,
}

/// Check an address, optionally against the network given with `--network`.
#[derive(Parser, Debug, Clone)]
pub struct ValidateCmd {
	pub address: String,
}

/// SCALE compact integers.
#[derive(Subcommand, Debug, Clone)]
#[command(rename_all = "kebab-case")]
pub enum CompactCmd {
	/// Encode a non-negative decimal integer.
	Encode {
		value: String,
	},
	/// Decode a hex encoded compact integer.
	Decode {
		hex: String,
	},
}

/// Compute the address of a multisig account.
#[derive(Parser, Debug, Clone)]
pub struct MultiCmd {
	/// Number of approvals required.
	#[arg(long, short)]
	pub threshold: u16,
	/// Signatories, as addresses or hex encoded public keys.
	#[arg(required = true)]
	pub who: Vec<String>,
}

/// Compute the account mapped from a 20 byte EVM address.
#[derive(Parser, Debug, Clone)]
pub struct EvmCmd {
	/// `0x` prefixed EVM address.
	pub evm: String,
}

/// Derive an address along soft junctions, e.g. `/1/stash`.
#[derive(Parser, Debug, Clone)]
pub struct DeriveCmd {
	/// Address of the sr25519 key to derive from.
	pub address: String,
	/// Derivation path made of soft junctions only.
	pub path: String,
}

/// Parse a network by name (any case) or prefix, listing the known names on failure.
pub fn parse_ss58_address_format(x: &str) -> Result<Ss58AddressFormat, String> {
	parse_address_format(x).map_err(|_| {
		format!("Unable to parse variant. Known variants: {:?}", Ss58AddressFormat::all_names())
	})
}

/// Result of a command, renderable as text or JSON.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
	text: String,
	json: Value,
}

impl Report {
	fn new(text: impl Into<String>, json: Value) -> Self {
		Self { text: text.into(), json }
	}

	pub fn render(&self, output_type: OutputType) -> Result<String, String> {
		match output_type {
			OutputType::Text => Ok(self.text.clone()),
			OutputType::Json => serde_json::to_string_pretty(&self.json)
				.map_err(|e| format!("Conversion to json failed: {e}")),
		}
	}
}

/// Execute `command`. Addresses are encoded in `network` or, if absent, the process default.
pub fn run(command: &Ss58ToolCmd, network: Option<Ss58AddressFormat>) -> Result<Report, String> {
	let format = network.unwrap_or_else(default_ss58_version);
	log::debug!(target: LOG_TARGET, "Running {:?} with format {}", command, format);

	match command {
		Ss58ToolCmd::Encode(EncodeCmd { public }) => {
			let key = parse_hex(public)?;
			let address = encode_address(&key, format).map_err(|e| e.to_string())?;
			Ok(Report::new(
				address.clone(),
				json!({ "address": address, "network": describe(format), "publicKey": public }),
			))
		},
		Ss58ToolCmd::Decode(DecodeCmd { address, ignore_checksum }) => {
			let (key, found) = decode_address_with_format(address, *ignore_checksum, network)
				.map_err(|e| e.to_string())?;
			let key = array_bytes::bytes2hex("0x", &key);
			Ok(Report::new(
				format!("Public key (hex): {}\nNetwork:          {}", key, describe_text(found)),
				json!({ "publicKey": key, "network": describe(found) }),
			))
		},
		Ss58ToolCmd::Convert(ConvertCmd { address }) => {
			let target = network.ok_or("The target network must be given with --network")?;
			let converted = convert_address(address, target).map_err(|e| e.to_string())?;
			Ok(Report::new(
				converted.clone(),
				json!({ "address": converted, "network": describe(target) }),
			))
		},
		Ss58ToolCmd::Validate(ValidateCmd { address }) => {
			let found = match network {
				Some(expected) => check_address(address, expected).map(|_| expected),
				None => decode_address_with_format(address, false, None).map(|(_, f)| f),
			}
			.map_err(|e| format!("Invalid address {address}: {e}"))?;
			Ok(Report::new(
				format!("{} is a valid {} address", address, describe_text(found)),
				json!({ "address": address, "valid": true, "network": describe(found) }),
			))
		},
		Ss58ToolCmd::Networks => {
			let networks = known_networks();
			let text = networks
				.iter()
				.map(|n| format!("{:>5}  {:<20} {}", n.prefix, n.network, n.symbols.join(", ")))
				.collect::<Vec<_>>()
				.join("\n");
			let json = serde_json::to_value(&networks)
				.map_err(|e| format!("Conversion to json failed: {e}"))?;
			Ok(Report::new(text, json))
		},
		Ss58ToolCmd::Compact(CompactCmd::Encode { value }) => {
			let parsed = value
				.parse::<BigUint>()
				.map_err(|e| format!("Invalid non-negative integer {value}: {e}"))?;
			let encoded = sp_scale_compact::compact_big_to_vec(&parsed).map_err(|e| e.to_string())?;
			let encoded = array_bytes::bytes2hex("0x", &encoded);
			Ok(Report::new(
				encoded.clone(),
				json!({ "value": parsed.to_string(), "encoded": encoded }),
			))
		},
		Ss58ToolCmd::Compact(CompactCmd::Decode { hex }) => {
			let bytes = parse_hex(hex)?;
			let (consumed, value) =
				sp_scale_compact::compact_big_from_slice(&bytes).map_err(|e| e.to_string())?;
			let remaining = array_bytes::bytes2hex("0x", &bytes[consumed..]);
			let text = if consumed == bytes.len() {
				value.to_string()
			} else {
				format!("{} (remaining: {})", value, remaining)
			};
			Ok(Report::new(
				text,
				json!({ "value": value.to_string(), "consumed": consumed, "remaining": remaining }),
			))
		},
		Ss58ToolCmd::Multi(MultiCmd { threshold, who }) => {
			let address =
				encode_multi_address(who, *threshold, format).map_err(|e| e.to_string())?;
			Ok(Report::new(
				address.clone(),
				json!({
					"address": address,
					"network": describe(format),
					"threshold": threshold,
					"signatories": who,
				}),
			))
		},
		Ss58ToolCmd::Evm(EvmCmd { evm }) => {
			let bytes = parse_hex(evm)?;
			let address = evm_to_address(&bytes, format).map_err(|e| e.to_string())?;
			let key = decode_address(&address, false, None).map_err(|e| e.to_string())?;
			Ok(Report::new(
				address.clone(),
				json!({
					"address": address,
					"network": describe(format),
					"publicKey": array_bytes::bytes2hex("0x", &key),
				}),
			))
		},
		Ss58ToolCmd::Derive(DeriveCmd { address, path }) => {
			let derived = derive_address(address, path, format).map_err(|e| e.to_string())?;
			Ok(Report::new(
				derived.clone(),
				json!({ "address": derived, "path": path, "network": describe(format) }),
			))
		},
	}
}

fn parse_hex(input: &str) -> Result<Vec<u8>, String> {
	array_bytes::hex2bytes(input).map_err(|e| format!("Invalid hex input {input}: {e:?}"))
}

fn describe(format: Ss58AddressFormat) -> Value {
	json!({
		"prefix": u16::from(format),
		"name": network_name(format),
	})
}

fn describe_text(format: Ss58AddressFormat) -> String {
	match network_name(format) {
		Some(name) => format!("{} ({})", name, u16::from(format)),
		None => format!("custom ({})", u16::from(format)),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use sp_ss58::Ss58AddressFormatRegistry::{PolkadotAccount, SubstrateAccount};

	const ALICE_HEX: &str = "0xd43593c715fdd31c61141abd04a99fd6822c8558854ccde39a5684e7a56da27d";
	const ALICE: &str = "5GrwvaEF5zXb26Fz9rcQpDWS57CtERHpNehXCPcNoHGKutQY";
	const ALICE_POLKADOT: &str = "15oF4uVJwmo4TdGW7VfQxNLavjCXviqxT9S1MgbjMNHr6Sp5";

	fn exec(args: &[&str]) -> Result<String, String> {
		let args = std::iter::once("ss58-tool").chain(args.iter().copied());
		let tool = Ss58Tool::try_parse_from(args).map_err(|e| e.to_string())?;
		run(&tool.command, tool.network)?.render(tool.output_type)
	}

	#[test]
	fn network_parser_accepts_names_and_prefixes() {
		let polkadot = Ss58AddressFormat::from(PolkadotAccount);
		assert_eq!(parse_ss58_address_format("polkadot"), Ok(polkadot));
		assert_eq!(parse_ss58_address_format("Polkadot"), Ok(polkadot));
		assert_eq!(parse_ss58_address_format("42"), Ok(Ss58AddressFormat::from(SubstrateAccount)));
		assert_eq!(parse_ss58_address_format("1000"), Ok(Ss58AddressFormat::custom(1000)));
		let err = parse_ss58_address_format("nope").unwrap_err();
		assert!(err.starts_with("Unable to parse variant. Known variants: "));
		assert!(err.contains("\"kusama\""));
		assert!(parse_ss58_address_format("16384").is_err());
	}

	#[test]
	fn encode_and_decode() {
		assert_eq!(
			exec(&["-n", "polkadot", "encode", "--public", ALICE_HEX]).unwrap(),
			ALICE_POLKADOT
		);
		assert_eq!(exec(&["encode", "--public", ALICE_HEX, "-n", "42"]).unwrap(), ALICE);

		let decoded = exec(&["decode", ALICE_POLKADOT]).unwrap();
		assert!(decoded.contains(ALICE_HEX));
		assert!(decoded.contains("polkadot (0)"));

		assert!(exec(&["-n", "kusama", "decode", ALICE_POLKADOT]).is_err());
	}

	#[test]
	fn network_names_ignore_case() {
		assert_eq!(
			exec(&["-n", "POLKADOT", "encode", "--public", ALICE_HEX]).unwrap(),
			ALICE_POLKADOT
		);
		let decoded = exec(&["-n", "Phala", "encode", "--public", ALICE_HEX]).unwrap();
		assert!(exec(&["decode", &decoded]).unwrap().contains("phala (30)"));
	}

	#[test]
	fn json_output() {
		let out = exec(&["--output-type", "json", "decode", ALICE]).unwrap();
		let value: Value = serde_json::from_str(&out).unwrap();
		assert_eq!(value["publicKey"], ALICE_HEX);
		assert_eq!(value["network"]["prefix"], 42);
		assert_eq!(value["network"]["name"], "substrate");
	}

	#[test]
	fn convert_requires_network() {
		assert_eq!(exec(&["-n", "polkadot", "convert", ALICE]).unwrap(), ALICE_POLKADOT);
		assert!(exec(&["convert", ALICE]).is_err());
	}

	#[test]
	fn validate_checks_network() {
		assert!(exec(&["validate", ALICE]).is_ok());
		assert!(exec(&["-n", "substrate", "validate", ALICE]).is_ok());
		let err = exec(&["-n", "polkadot", "validate", ALICE]).unwrap_err();
		assert!(err.contains("Expected ss58 format polkadot, received substrate"), "{}", err);
	}

	#[test]
	fn compact_commands() {
		assert_eq!(exec(&["compact", "encode", "16384"]).unwrap(), "0x02000100");
		assert_eq!(exec(&["compact", "decode", "0x02000100"]).unwrap(), "16384");
		assert_eq!(exec(&["compact", "decode", "0xfcff"]).unwrap(), "63 (remaining: 0xff)");
		assert_eq!(
			exec(&["compact", "encode", "340282366920938463463374607431768211456"]).unwrap(),
			"0x370000000000000000000000000000000001"
		);
		assert!(exec(&["compact", "encode", "-1"]).is_err());
		assert!(exec(&["compact", "decode", "0x01"]).is_err());
	}

	#[test]
	fn networks_lists_registry() {
		let text = exec(&["networks"]).unwrap();
		assert_eq!(text.lines().count(), known_networks().len());
		assert!(text.lines().any(|l| l.contains("hydradx")));
		let out = exec(&["networks", "--output-type", "json"]).unwrap();
		let json: Value = serde_json::from_str(&out).unwrap();
		assert_eq!(json[0]["network"], "polkadot");
		assert_eq!(json[0]["symbols"][0], "DOT");
		assert_eq!(json[0]["decimals"][0], 10);
	}

	#[test]
	fn multi_evm_and_derive() {
		let bob = "5FHneW46xGXgs5mUiveU4sbTyGBzmstUspZC92UhjJM694ty";
		let ab = exec(&["multi", "--threshold", "2", ALICE, bob]).unwrap();
		let ba = exec(&["multi", "--threshold", "2", bob, ALICE]).unwrap();
		assert_eq!(ab, ba);
		assert!(exec(&["multi", "--threshold", "2"]).is_err());

		assert!(exec(&["evm", "0xd43593c715fdd31c61141abd04a99fd6822c8558"]).is_ok());
		assert!(exec(&["evm", "0xd43593c715fdd31c"]).is_err());

		assert_ne!(exec(&["derive", ALICE, "/1"]).unwrap(), ALICE);
		assert!(exec(&["derive", ALICE, "//1"]).is_err());
	}
}
