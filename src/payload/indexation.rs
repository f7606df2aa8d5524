// Copyright 2022 IOTA Stiftung
// SPDX-License-Identifier: Apache-2.0

//! Module containing the [`IndexationPayload`] type.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::{
    error::Error,
    packer::{Packable, Packer, Unpacker},
};

/// Arbitrary data stored in the Tangle under a short UTF-8 index.
///
/// The index length bound is only enforced towards the wire, i.e. by
/// [`IndexationPayload::new`] and when packing. Unpacking accepts an index of
/// any length, including an empty one, to stay compatible with encoders that
/// never enforced the bound.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexationPayload {
    index: String,
    #[serde(with = "serde_bytes")]
    data: Box<[u8]>,
}

impl IndexationPayload {
    /// The wire type tag of an indexation payload.
    pub const KIND: u32 = 2;
    /// Allowed byte lengths of the index.
    pub const INDEX_LENGTH_RANGE: RangeInclusive<usize> = 1..=64;

    /// Creates a payload, rejecting an index outside
    /// [`Self::INDEX_LENGTH_RANGE`] before anything else happens.
    pub fn new(index: impl Into<String>, data: impl Into<Box<[u8]>>) -> Result<Self, Error> {
        let index = index.into();
        Self::check_index(&index)?;
        Ok(Self {
            index,
            data: data.into(),
        })
    }

    /// Creates a payload from `0x`-prefixed hex data, the representation used
    /// at API boundaries.
    pub fn from_hex(index: impl Into<String>, data: &str) -> Result<Self, Error> {
        let data: Vec<u8> = prefix_hex::decode(data).map_err(|e| Error::InvalidHex(e.to_string()))?;
        Self::new(index, data)
    }

    /// The index this payload is stored under.
    pub fn index(&self) -> &str {
        &self.index
    }

    /// The raw data, possibly empty.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// The data as `0x`-prefixed hex.
    pub fn data_hex(&self) -> String {
        prefix_hex::encode(self.data.as_ref())
    }

    fn check_index(index: &str) -> Result<(), Error> {
        let length = index.len();
        if !Self::INDEX_LENGTH_RANGE.contains(&length) {
            return Err(Error::IndexLengthOutOfRange {
                length,
                min: *Self::INDEX_LENGTH_RANGE.start(),
                max: *Self::INDEX_LENGTH_RANGE.end(),
            });
        }
        Ok(())
    }
}

impl Packable for IndexationPayload {
    fn pack(&self, packer: &mut Packer) -> Result<(), Error> {
        // Re-checked here so a value deserialized from elsewhere cannot
        // sidestep the constructor's validation.
        Self::check_index(&self.index)?;
        packer.write_u32(Self::KIND);
        packer.write_string("indexation index", &self.index)?;
        packer.write_u32(self.data.len() as u32);
        packer.write_bytes(&self.data);
        Ok(())
    }

    fn unpack(unpacker: &mut Unpacker<'_>) -> Result<Self, Error> {
        let tag = unpacker.read_u32("payload type")?;
        if tag != Self::KIND {
            return Err(Error::TypeTagMismatch {
                expected: Self::KIND,
                found: tag,
            });
        }
        let index = unpacker.read_string("indexation index")?;
        let data_length = unpacker.read_u32("indexation data length")? as usize;
        let data = unpacker.read_bytes("indexation data", data_length)?;
        Ok(Self {
            index,
            data: data.to_vec().into_boxed_slice(),
        })
    }
}

#[cfg(any(test, feature = "rand"))]
mod rand {
    use ::rand::{
        distributions::{Alphanumeric, DistString},
        thread_rng, Rng, RngCore,
    };

    use super::*;

    impl IndexationPayload {
        /// Generates a random [`IndexationPayload`].
        pub fn rand() -> Self {
            let mut rng = thread_rng();
            let index_length = rng.gen_range(*Self::INDEX_LENGTH_RANGE.start()..=*Self::INDEX_LENGTH_RANGE.end());
            let mut data = vec![0u8; rng.gen_range(0..=64)];
            rng.fill_bytes(&mut data);
            Self {
                index: Alphanumeric.sample_string(&mut rng, index_length),
                data: data.into_boxed_slice(),
            }
        }
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn wire_round_trip() {
        let payload = IndexationPayload::rand();
        let bytes = payload.pack_to_vec().unwrap();
        assert_eq!(payload, IndexationPayload::unpack_from_slice(&bytes).unwrap());
    }

    #[test]
    fn index_bounds_are_enforced_on_construction() {
        assert_eq!(
            IndexationPayload::new("", Vec::new()).unwrap_err(),
            Error::IndexLengthOutOfRange {
                length: 0,
                min: 1,
                max: 64,
            }
        );
        assert_eq!(
            IndexationPayload::new("x".repeat(65), Vec::new()).unwrap_err(),
            Error::IndexLengthOutOfRange {
                length: 65,
                min: 1,
                max: 64,
            }
        );
        assert!(IndexationPayload::new("x", Vec::new()).is_ok());
        assert!(IndexationPayload::new("x".repeat(64), Vec::new()).is_ok());
    }

    #[test]
    fn empty_index_is_accepted_when_unpacking() {
        // tag, empty index string, no data.
        let mut bytes = IndexationPayload::KIND.to_le_bytes().to_vec();
        bytes.extend_from_slice(&[0, 0]);
        bytes.extend_from_slice(&0u32.to_le_bytes());
        let payload = IndexationPayload::unpack_from_slice(&bytes).unwrap();
        assert_eq!(payload.index(), "");
        // But the lenient value cannot be packed again.
        assert!(matches!(
            payload.pack_to_vec(),
            Err(Error::IndexLengthOutOfRange { length: 0, .. })
        ));
    }

    #[test]
    fn hex_data_round_trip() {
        let payload = IndexationPayload::from_hex("key", "0xdeadbeef").unwrap();
        assert_eq!(payload.data(), &[0xde, 0xad, 0xbe, 0xef]);
        assert_eq!(payload.data_hex(), "0xdeadbeef");
    }

    #[test]
    fn absent_data_encodes_a_zero_length() {
        let payload = IndexationPayload::new("A", Vec::new()).unwrap();
        let bytes = payload.pack_to_vec().unwrap();
        assert_eq!(bytes, vec![2, 0, 0, 0, 1, 0, b'A', 0, 0, 0, 0]);
    }
}
