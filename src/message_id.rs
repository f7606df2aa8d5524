// Copyright 2022 IOTA Stiftung
// SPDX-License-Identifier: Apache-2.0

//! Module containing the [`MessageId`] type.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{
    error::Error,
    packer::{Packable, Packer, Unpacker},
    util::bytify,
};

/// The BLAKE2b-256 digest identifying a message in the Tangle.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageId(#[serde(with = "bytify")] pub [u8; Self::LENGTH]);

impl MessageId {
    /// The length of a message id, in bytes.
    pub const LENGTH: usize = 32;

    /// Converts the id to its `0x`-prefixed hex representation.
    pub fn to_hex(&self) -> String {
        prefix_hex::encode(self.0.as_ref())
    }
}

impl From<[u8; MessageId::LENGTH]> for MessageId {
    fn from(bytes: [u8; MessageId::LENGTH]) -> Self {
        Self(bytes)
    }
}

impl AsRef<[u8]> for MessageId {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl FromStr for MessageId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes: [u8; Self::LENGTH] =
            prefix_hex::decode(s).map_err(|e| Error::InvalidHex(e.to_string()))?;
        Ok(Self(bytes))
    }
}

impl Packable for MessageId {
    fn pack(&self, packer: &mut Packer) -> Result<(), Error> {
        packer.write_bytes(&self.0);
        Ok(())
    }

    fn unpack(unpacker: &mut Unpacker<'_>) -> Result<Self, Error> {
        Ok(Self(unpacker.read_array("message id")?))
    }
}

#[cfg(any(test, feature = "rand"))]
mod rand {
    use super::*;

    impl MessageId {
        /// Generates a random [`MessageId`].
        pub fn rand() -> Self {
            Self(::rand::random())
        }
    }
}
