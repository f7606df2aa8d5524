// Copyright 2022 IOTA Stiftung
// SPDX-License-Identifier: Apache-2.0

//! Milestone index and timestamp scalars.

use std::{fmt, num::ParseIntError, ops, str::FromStr};

use derive_more::{Add, Deref, DerefMut, Sub};
use serde::{Deserialize, Serialize};

use crate::{
    error::Error,
    packer::{Packable, Packer, Unpacker},
};

/// The index of a milestone in the Tangle.
#[derive(
    Clone, Copy, PartialOrd, Ord, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize, Add, Sub, Deref, DerefMut,
)]
#[serde(transparent)]
pub struct MilestoneIndex(pub u32);

impl fmt::Display for MilestoneIndex {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<u32> for MilestoneIndex {
    fn from(value: u32) -> Self {
        MilestoneIndex(value)
    }
}

impl From<MilestoneIndex> for u32 {
    fn from(value: MilestoneIndex) -> Self {
        value.0
    }
}

impl ops::Add<u32> for MilestoneIndex {
    type Output = Self;

    fn add(self, x: u32) -> Self {
        MilestoneIndex(self.0 + x)
    }
}

impl PartialEq<u32> for MilestoneIndex {
    fn eq(&self, x: &u32) -> bool {
        self.0 == *x
    }
}

impl PartialEq<MilestoneIndex> for u32 {
    fn eq(&self, x: &MilestoneIndex) -> bool {
        *self == x.0
    }
}

impl FromStr for MilestoneIndex {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(u32::from_str(s)?.into())
    }
}

impl Packable for MilestoneIndex {
    fn pack(&self, packer: &mut Packer) -> Result<(), Error> {
        packer.write_u32(self.0);
        Ok(())
    }

    fn unpack(unpacker: &mut Unpacker<'_>) -> Result<Self, Error> {
        Ok(Self(unpacker.read_u32("milestone index")?))
    }
}

/// The timestamp of a milestone, in seconds since the UNIX epoch.
///
/// Stored as eight bytes on the wire; values beyond what downstream consumers
/// can represent are their concern, not the codec's.
#[derive(Clone, Copy, PartialOrd, Ord, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize, Deref)]
#[serde(transparent)]
pub struct MilestoneTimestamp(pub u64);

impl fmt::Display for MilestoneTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<u64> for MilestoneTimestamp {
    fn from(value: u64) -> Self {
        MilestoneTimestamp(value)
    }
}

impl From<MilestoneTimestamp> for u64 {
    fn from(value: MilestoneTimestamp) -> Self {
        value.0
    }
}

impl PartialEq<u64> for MilestoneTimestamp {
    fn eq(&self, x: &u64) -> bool {
        self.0 == *x
    }
}

impl Packable for MilestoneTimestamp {
    fn pack(&self, packer: &mut Packer) -> Result<(), Error> {
        packer.write_u64(self.0);
        Ok(())
    }

    fn unpack(unpacker: &mut Unpacker<'_>) -> Result<Self, Error> {
        Ok(Self(unpacker.read_u64("milestone timestamp")?))
    }
}

#[cfg(any(test, feature = "rand"))]
mod rand {
    use super::*;

    impl MilestoneIndex {
        /// Generates a random [`MilestoneIndex`].
        pub fn rand() -> Self {
            Self(::rand::random())
        }
    }

    impl MilestoneTimestamp {
        /// Generates a random [`MilestoneTimestamp`].
        pub fn rand() -> Self {
            Self(::rand::random())
        }
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn index_arithmetic() {
        assert_eq!(MilestoneIndex(42) + 1, MilestoneIndex(43));
        assert_eq!(MilestoneIndex(42) - MilestoneIndex(2), MilestoneIndex(40));
        assert_eq!(MilestoneIndex(42), 42);
    }

    #[test]
    fn index_wire_round_trip() {
        let index = MilestoneIndex::rand();
        let bytes = index.pack_to_vec().unwrap();
        assert_eq!(bytes.len(), 4);
        assert_eq!(index, MilestoneIndex::unpack_from_slice(&bytes).unwrap());
    }

    #[test]
    fn timestamp_wire_round_trip() {
        let timestamp = MilestoneTimestamp::rand();
        let bytes = timestamp.pack_to_vec().unwrap();
        assert_eq!(bytes.len(), 8);
        assert_eq!(timestamp, MilestoneTimestamp::unpack_from_slice(&bytes).unwrap());
    }
}
