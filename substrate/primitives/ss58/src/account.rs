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

//! Typed keys that render as SS58.

use crate::{
	decode_address, decode_address_with_format, default_ss58_version, encode_address, Error,
	Ss58AddressFormat,
};
use codec::{Decode, Encode, MaxEncodedLen};
use core::{fmt, str::FromStr};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

/// Key that can be encoded to/from SS58.
///
/// See <https://docs.substrate.io/reference/address-formats/>
/// for information on the codec.
pub trait Ss58Codec: Sized + AsMut<[u8]> + AsRef<[u8]> + Default {
	/// Some if the string is a properly encoded SS58Check address.
	fn from_ss58check(s: &str) -> Result<Self, Error> {
		Self::from_ss58check_with_version(s).map(|(r, _)| r)
	}

	/// Some if the string is a properly encoded SS58Check address.
	fn from_ss58check_with_version(s: &str) -> Result<(Self, Ss58AddressFormat), Error> {
		let (key, format) = decode_address_with_format(s, false, None)?;
		let mut res = Self::default();
		if key.len() != res.as_ref().len() {
			return Err(Error::InvalidKeyLength(key.len()))
		}
		res.as_mut().copy_from_slice(&key);
		Ok((res, format))
	}

	/// Return the ss58-check string for this key.
	fn to_ss58check_with_version(&self, version: Ss58AddressFormat) -> Result<String, Error> {
		encode_address(self.as_ref(), version)
	}

	/// Return the ss58-check string for this key, in the process-wide default format.
	fn to_ss58check(&self) -> Result<String, Error> {
		self.to_ss58check_with_version(default_ss58_version())
	}
}

/// An opaque 32-byte account identifier.
#[derive(
	Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Encode, Decode, MaxEncodedLen,
)]
pub struct AccountId32([u8; 32]);

impl AccountId32 {
	pub const fn new(inner: [u8; 32]) -> Self {
		Self(inner)
	}
}

impl Ss58Codec for AccountId32 {}

impl AsRef<[u8]> for AccountId32 {
	fn as_ref(&self) -> &[u8] {
		&self.0[..]
	}
}

impl AsMut<[u8]> for AccountId32 {
	fn as_mut(&mut self) -> &mut [u8] {
		&mut self.0[..]
	}
}

impl From<[u8; 32]> for AccountId32 {
	fn from(x: [u8; 32]) -> Self {
		Self::new(x)
	}
}

impl From<AccountId32> for [u8; 32] {
	fn from(x: AccountId32) -> [u8; 32] {
		x.0
	}
}

impl<'a> TryFrom<&'a [u8]> for AccountId32 {
	type Error = Error;

	fn try_from(x: &'a [u8]) -> Result<AccountId32, Error> {
		<[u8; 32]>::try_from(x).map(Self).map_err(|_| Error::InvalidKeyLength(x.len()))
	}
}

impl fmt::Display for AccountId32 {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(f, "{}", self.to_ss58check().map_err(|_| fmt::Error)?)
	}
}

impl fmt::Debug for AccountId32 {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		let hex = array_bytes::bytes2hex("", self.0);
		match self.to_ss58check() {
			Ok(s) => write!(f, "{} ({}...)", hex, &s[0..8]),
			Err(_) => write!(f, "{}", hex),
		}
	}
}

impl FromStr for AccountId32 {
	type Err = Error;

	/// Accepts an SS58 address of any network or a `0x` prefixed hex key.
	fn from_str(s: &str) -> Result<Self, Self::Err> {
		if s.starts_with("0x") {
			return Self::try_from(&decode_address(s, false, None)?[..])
		}
		Self::from_ss58check(s)
	}
}

impl Serialize for AccountId32 {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		let s = self.to_ss58check().map_err(serde::ser::Error::custom)?;
		serializer.serialize_str(&s)
	}
}

impl<'de> Deserialize<'de> for AccountId32 {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		Self::from_str(&String::deserialize(deserializer)?)
			.map_err(|e| de::Error::custom(format!("{:?}", e)))
	}
}
