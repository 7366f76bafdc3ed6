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

use blake2::{Blake2b512, Digest};

/// Domain separator of the address checksum.
const SS58_PREFIX: &[u8] = b"SS58PRE";

/// BLAKE2b-512 of `"SS58PRE" || data`, the source of the address checksum.
pub fn ss58hash(data: &[u8]) -> [u8; 64] {
	let mut hasher = Blake2b512::new();
	hasher.update(SS58_PREFIX);
	hasher.update(data);

	let mut output = [0u8; 64];
	output.copy_from_slice(&hasher.finalize());
	output
}
