// Copyright 2022 IOTA Stiftung
// SPDX-License-Identifier: Apache-2.0

//! Module containing the [`Address`] types.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{
    error::Error,
    packer::{Packable, Packer, Unpacker},
    util::bytify,
};

/// An Ed25519 address: the BLAKE2b-256 hash of an Ed25519 public key.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ed25519Address(#[serde(with = "bytify")] pub [u8; Self::LENGTH]);

impl Ed25519Address {
    /// The wire discriminant of an Ed25519 address.
    pub const KIND: u8 = 0;
    /// The length of an Ed25519 address, in bytes.
    pub const LENGTH: usize = 32;

    /// Converts the address to its `0x`-prefixed hex representation.
    pub fn to_hex(&self) -> String {
        prefix_hex::encode(self.0.as_ref())
    }
}

impl AsRef<[u8]> for Ed25519Address {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl FromStr for Ed25519Address {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes: [u8; Self::LENGTH] =
            prefix_hex::decode(s).map_err(|e| Error::InvalidHex(e.to_string()))?;
        Ok(Self(bytes))
    }
}

/// The address kinds a balance can be locked to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Address {
    /// An Ed25519 address.
    Ed25519(Ed25519Address),
}

impl From<Ed25519Address> for Address {
    fn from(value: Ed25519Address) -> Self {
        Self::Ed25519(value)
    }
}

impl Packable for Address {
    fn pack(&self, packer: &mut Packer) -> Result<(), Error> {
        match self {
            Address::Ed25519(address) => {
                packer.write_u8(Ed25519Address::KIND);
                packer.write_bytes(&address.0);
            }
        }
        Ok(())
    }

    fn unpack(unpacker: &mut Unpacker<'_>) -> Result<Self, Error> {
        match unpacker.read_u8("address type")? {
            Ed25519Address::KIND => Ok(Self::Ed25519(Ed25519Address(
                unpacker.read_array("ed25519 address")?,
            ))),
            kind => Err(Error::UnknownAddressType(kind)),
        }
    }
}

#[cfg(any(test, feature = "rand"))]
mod rand {
    use super::*;

    impl Address {
        /// Generates a random Ed25519 [`Address`].
        pub fn rand() -> Self {
            Self::Ed25519(Ed25519Address(::rand::random()))
        }
    }
}
