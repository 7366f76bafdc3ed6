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

use std::process::{Command, Output};

const ALICE_HEX: &str = "0xd43593c715fdd31c61141abd04a99fd6822c8558854ccde39a5684e7a56da27d";
const ALICE: &str = "5GrwvaEF5zXb26Fz9rcQpDWS57CtERHpNehXCPcNoHGKutQY";
const ALICE_KUSAMA: &str = "HNZata7iMYWmk5RvZRTiAsSDhV8366zq2YGb3tLH5Upf74F";

fn ss58_tool(args: &[&str]) -> Output {
	let path = assert_cmd::cargo::cargo_bin("ss58-tool");
	Command::new(path).args(args).output().expect("failed to run ss58-tool")
}

fn stdout(output: &Output) -> String {
	String::from_utf8_lossy(&output.stdout).trim_end().to_string()
}

#[test]
fn encode_uses_network_flag() {
	let output = ss58_tool(&["--network", "kusama", "encode", "--public", ALICE_HEX]);
	assert!(output.status.success());
	assert_eq!(stdout(&output), ALICE_KUSAMA);

	let output = ss58_tool(&["encode", "--public", ALICE_HEX]);
	assert!(output.status.success());
	assert_eq!(stdout(&output), ALICE);
}

#[test]
fn reserved_network_is_rejected() {
	let output = ss58_tool(&["--network", "46", "encode", "--public", ALICE_HEX]);
	assert!(!output.status.success());
	assert!(String::from_utf8_lossy(&output.stderr).contains("Reserved ss58 format 46"));
}

#[test]
fn decode_as_json() {
	let output = ss58_tool(&["--output-type", "json", "decode", ALICE_KUSAMA]);
	assert!(output.status.success());
	let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
	assert_eq!(json["publicKey"], ALICE_HEX);
	assert_eq!(json["network"]["name"], "kusama");
	assert_eq!(json["network"]["prefix"], 2);
}

#[test]
fn broken_checksum_fails_unless_ignored() {
	let mut broken = ALICE.to_string();
	broken.replace_range(47.., "Z");
	let output = ss58_tool(&["decode", &broken]);
	assert!(!output.status.success());
	assert!(!output.stderr.is_empty());

	let output = ss58_tool(&["decode", "--ignore-checksum", &broken]);
	assert!(output.status.success());
	assert!(stdout(&output).contains(ALICE_HEX));
}

#[test]
fn convert_and_validate() {
	let output = ss58_tool(&["convert", ALICE, "--network", "kusama"]);
	assert!(output.status.success());
	assert_eq!(stdout(&output), ALICE_KUSAMA);

	assert!(ss58_tool(&["validate", ALICE_KUSAMA, "-n", "kusama"]).status.success());
	assert!(!ss58_tool(&["validate", ALICE_KUSAMA, "-n", "polkadot"]).status.success());
}

#[test]
fn compact_round_trip() {
	let output = ss58_tool(&["compact", "encode", "1073741824"]);
	assert!(output.status.success());
	assert_eq!(stdout(&output), "0x0300000040");

	let output = ss58_tool(&["compact", "decode", "0x0300000040"]);
	assert!(output.status.success());
	assert_eq!(stdout(&output), "1073741824");
}

#[test]
fn unknown_network_lists_known_ones() {
	let output = ss58_tool(&["--network", "nowhere", "networks"]);
	assert!(!output.status.success());
	assert!(String::from_utf8_lossy(&output.stderr).contains("Known variants"));
}
