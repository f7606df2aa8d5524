// Copyright 2022 IOTA Stiftung
// SPDX-License-Identifier: Apache-2.0

//! Module containing the [`Input`] types.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{
    error::Error,
    packer::{Packable, Packer, Unpacker},
    util::bytify,
};

/// The BLAKE2b-256 digest identifying a transaction.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionId(#[serde(with = "bytify")] pub [u8; Self::LENGTH]);

impl TransactionId {
    /// The length of a transaction id, in bytes.
    pub const LENGTH: usize = 32;

    /// Converts the id to its `0x`-prefixed hex representation.
    pub fn to_hex(&self) -> String {
        prefix_hex::encode(self.0.as_ref())
    }
}

impl AsRef<[u8]> for TransactionId {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl Packable for TransactionId {
    fn pack(&self, packer: &mut Packer) -> Result<(), Error> {
        packer.write_bytes(&self.0);
        Ok(())
    }

    fn unpack(unpacker: &mut Unpacker<'_>) -> Result<Self, Error> {
        Ok(Self(unpacker.read_array("transaction id")?))
    }
}

impl FromStr for TransactionId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes: [u8; Self::LENGTH] =
            prefix_hex::decode(s).map_err(|e| Error::InvalidHex(e.to_string()))?;
        Ok(Self(bytes))
    }
}

/// An input referencing the output of a previous transaction.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Input {
    /// A UTXO input.
    Utxo(UtxoInput),
}

/// An input spending a specific output of a previous transaction.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UtxoInput {
    /// The id of the transaction that created the output.
    pub transaction_id: TransactionId,
    /// The index of the output within that transaction.
    pub index: u16,
}

impl UtxoInput {
    /// The wire discriminant of a UTXO input.
    pub const KIND: u8 = 0;
}

impl From<UtxoInput> for Input {
    fn from(value: UtxoInput) -> Self {
        Self::Utxo(value)
    }
}

impl Packable for Input {
    fn pack(&self, packer: &mut Packer) -> Result<(), Error> {
        match self {
            Input::Utxo(input) => {
                packer.write_u8(UtxoInput::KIND);
                input.transaction_id.pack(packer)?;
                packer.write_u16(input.index);
            }
        }
        Ok(())
    }

    fn unpack(unpacker: &mut Unpacker<'_>) -> Result<Self, Error> {
        match unpacker.read_u8("input type")? {
            UtxoInput::KIND => Ok(Self::Utxo(UtxoInput {
                transaction_id: TransactionId(unpacker.read_array("transaction id")?),
                index: unpacker.read_u16("output index")?,
            })),
            kind => Err(Error::UnknownInputType(kind)),
        }
    }
}

#[cfg(any(test, feature = "rand"))]
mod rand {
    use ::rand::{thread_rng, Rng};

    use super::*;

    impl Input {
        /// Generates a random UTXO [`Input`].
        pub fn rand() -> Self {
            Self::Utxo(UtxoInput {
                transaction_id: TransactionId(::rand::random()),
                index: thread_rng().gen_range(0..127),
            })
        }
    }
}
