// Copyright 2022 IOTA Stiftung
// SPDX-License-Identifier: Apache-2.0

//! Module containing the [`Output`] types.

use serde::{Deserialize, Serialize};

use crate::{
    address::Address,
    error::Error,
    packer::{Packable, Packer, Unpacker},
};

/// An output created by a transaction.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Output {
    /// An output locked to a single address.
    SigLockedSingle(SigLockedSingleOutput),
    /// An output counting towards the dust allowance of an address.
    SigLockedDustAllowance(SigLockedDustAllowanceOutput),
}

/// A balance locked to a single address.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SigLockedSingleOutput {
    /// The address the balance is locked to.
    pub address: Address,
    /// The amount, in base tokens.
    pub amount: u64,
}

impl SigLockedSingleOutput {
    /// The wire discriminant of a signature-locked single output.
    pub const KIND: u8 = 0;
}

/// A balance raising the dust allowance of an address.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SigLockedDustAllowanceOutput {
    /// The address whose dust allowance is raised.
    pub address: Address,
    /// The amount, in base tokens.
    pub amount: u64,
}

impl SigLockedDustAllowanceOutput {
    /// The wire discriminant of a dust allowance output.
    pub const KIND: u8 = 1;
}

impl From<SigLockedSingleOutput> for Output {
    fn from(value: SigLockedSingleOutput) -> Self {
        Self::SigLockedSingle(value)
    }
}

impl From<SigLockedDustAllowanceOutput> for Output {
    fn from(value: SigLockedDustAllowanceOutput) -> Self {
        Self::SigLockedDustAllowance(value)
    }
}

impl Packable for Output {
    fn pack(&self, packer: &mut Packer) -> Result<(), Error> {
        match self {
            Output::SigLockedSingle(output) => {
                packer.write_u8(SigLockedSingleOutput::KIND);
                output.address.pack(packer)?;
                packer.write_u64(output.amount);
            }
            Output::SigLockedDustAllowance(output) => {
                packer.write_u8(SigLockedDustAllowanceOutput::KIND);
                output.address.pack(packer)?;
                packer.write_u64(output.amount);
            }
        }
        Ok(())
    }

    fn unpack(unpacker: &mut Unpacker<'_>) -> Result<Self, Error> {
        match unpacker.read_u8("output type")? {
            SigLockedSingleOutput::KIND => Ok(Self::SigLockedSingle(SigLockedSingleOutput {
                address: Address::unpack(unpacker)?,
                amount: unpacker.read_u64("output amount")?,
            })),
            SigLockedDustAllowanceOutput::KIND => {
                Ok(Self::SigLockedDustAllowance(SigLockedDustAllowanceOutput {
                    address: Address::unpack(unpacker)?,
                    amount: unpacker.read_u64("output amount")?,
                }))
            }
            kind => Err(Error::UnknownOutputType(kind)),
        }
    }
}

#[cfg(any(test, feature = "rand"))]
mod rand {
    use super::*;

    impl Output {
        /// Generates a random signature-locked single [`Output`].
        pub fn rand() -> Self {
            Self::SigLockedSingle(SigLockedSingleOutput {
                address: Address::rand(),
                amount: ::rand::random(),
            })
        }

        /// Generates a random dust allowance [`Output`].
        pub fn rand_dust_allowance() -> Self {
            Self::SigLockedDustAllowance(SigLockedDustAllowanceOutput {
                address: Address::rand(),
                amount: ::rand::random(),
            })
        }
    }
}
