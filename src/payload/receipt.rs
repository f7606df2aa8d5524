// Copyright 2022 IOTA Stiftung
// SPDX-License-Identifier: Apache-2.0

//! Module containing the [`ReceiptPayload`] type.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::{
    address::Address,
    error::Error,
    packer::{check_count, Packable, Packer, Unpacker},
    tangle::MilestoneIndex,
    util::bytify,
};

/// Allowed entry counts of a receipt's funds list. A receipt without entries
/// records nothing and is malformed.
const FUNDS_COUNT_RANGE: RangeInclusive<usize> = 1..=127;

/// The hash of the tail transaction of a legacy-network bundle.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TailTransactionHash(#[serde(with = "bytify")] pub [u8; Self::LENGTH]);

impl TailTransactionHash {
    /// The length of a tail transaction hash, in bytes.
    pub const LENGTH: usize = 49;
}

impl AsRef<[u8]> for TailTransactionHash {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// One balance migrated from the legacy network.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MigratedFundsEntry {
    /// The tail transaction hash of the migration bundle.
    pub tail_transaction_hash: TailTransactionHash,
    /// The address the funds were migrated to.
    pub address: Address,
    /// The migrated amount, in base tokens.
    pub deposit: u64,
}

impl MigratedFundsEntry {
    /// The wire length of one entry, in bytes.
    pub const LENGTH: usize = TailTransactionHash::LENGTH + 1 + 32 + 8;
}

impl Packable for MigratedFundsEntry {
    fn pack(&self, packer: &mut Packer) -> Result<(), Error> {
        packer.write_bytes(&self.tail_transaction_hash.0);
        self.address.pack(packer)?;
        packer.write_u64(self.deposit);
        Ok(())
    }

    fn unpack(unpacker: &mut Unpacker<'_>) -> Result<Self, Error> {
        Ok(Self {
            tail_transaction_hash: TailTransactionHash(
                unpacker.read_array("tail transaction hash")?,
            ),
            address: Address::unpack(unpacker)?,
            deposit: unpacker.read_u64("deposit")?,
        })
    }
}

/// Records the funds migrated from the legacy network at a given milestone.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceiptPayload {
    /// The index of the milestone at which the funds were migrated.
    pub migrated_at: MilestoneIndex,
    /// The migrated balances, at least one.
    pub funds: Box<[MigratedFundsEntry]>,
}

impl ReceiptPayload {
    /// The wire type tag of a receipt payload.
    pub const KIND: u32 = 3;
    /// The smallest legal receipt: the tag, the milestone index, and a funds
    /// list with a single entry.
    pub const MIN_LENGTH: usize = 4 + 4 + 2 + MigratedFundsEntry::LENGTH;
}

impl Packable for ReceiptPayload {
    fn pack(&self, packer: &mut Packer) -> Result<(), Error> {
        check_count("migrated funds", self.funds.len(), &FUNDS_COUNT_RANGE)?;
        packer.write_u32(Self::KIND);
        self.migrated_at.pack(packer)?;
        packer.write_u16(self.funds.len() as u16);
        for entry in self.funds.iter() {
            entry.pack(packer)?;
        }
        Ok(())
    }

    fn unpack(unpacker: &mut Unpacker<'_>) -> Result<Self, Error> {
        unpacker.require("receipt payload", Self::MIN_LENGTH)?;
        let tag = unpacker.read_u32("payload type")?;
        if tag != Self::KIND {
            return Err(Error::TypeTagMismatch {
                expected: Self::KIND,
                found: tag,
            });
        }
        let migrated_at = MilestoneIndex::unpack(unpacker)?;
        let funds_count = unpacker.read_u16("migrated funds count")? as usize;
        check_count("migrated funds", funds_count, &FUNDS_COUNT_RANGE)?;
        let mut funds = Vec::with_capacity(funds_count);
        for _ in 0..funds_count {
            funds.push(MigratedFundsEntry::unpack(unpacker)?);
        }
        Ok(Self {
            migrated_at,
            funds: funds.into_boxed_slice(),
        })
    }
}

#[cfg(any(test, feature = "rand"))]
mod rand {
    use ::rand::{thread_rng, Rng, RngCore};

    use super::*;

    impl MigratedFundsEntry {
        /// Generates a random [`MigratedFundsEntry`].
        pub fn rand() -> Self {
            let mut hash = [0u8; TailTransactionHash::LENGTH];
            thread_rng().fill_bytes(&mut hash);
            Self {
                tail_transaction_hash: TailTransactionHash(hash),
                address: Address::rand(),
                deposit: ::rand::random(),
            }
        }
    }

    impl ReceiptPayload {
        /// Generates a random [`ReceiptPayload`].
        pub fn rand() -> Self {
            Self {
                migrated_at: MilestoneIndex::rand(),
                funds: (0..thread_rng().gen_range(1..=3))
                    .map(|_| MigratedFundsEntry::rand())
                    .collect(),
            }
        }
    }
}
