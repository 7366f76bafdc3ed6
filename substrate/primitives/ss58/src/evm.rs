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

//! Mapping between EVM addresses and SS58 accounts.

use crate::{decode_address, encode_address, Error, Ss58AddressFormat};
use sp_crypto_hashing::blake2_256;

pub const EVM_ADDRESS_LEN: usize = 20;

/// The account of an EVM address: `blake2_256("evm:" || evm)`.
pub fn evm_to_address(evm: &[u8], format: Ss58AddressFormat) -> Result<String, Error> {
	if evm.len() != EVM_ADDRESS_LEN {
		return Err(Error::InvalidEvmLength(evm.len()))
	}

	let mut message = Vec::with_capacity(4 + EVM_ADDRESS_LEN);
	message.extend_from_slice(b"evm:");
	message.extend_from_slice(evm);
	encode_address(&blake2_256(&message), format)
}

/// Truncate the key of `address` to an EVM address.
pub fn address_to_evm(
	address: &str,
	ignore_checksum: bool,
) -> Result<[u8; EVM_ADDRESS_LEN], Error> {
	let key = decode_address(address, ignore_checksum, None)?;
	let mut evm = [0u8; EVM_ADDRESS_LEN];
	let prefix = key.get(..EVM_ADDRESS_LEN).ok_or(Error::InvalidKeyLength(key.len()))?;
	evm.copy_from_slice(prefix);
	Ok(evm)
}
