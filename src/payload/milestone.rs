// Copyright 2022 IOTA Stiftung
// SPDX-License-Identifier: Apache-2.0

//! Module containing the [`MilestonePayload`] type.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use super::{OptionalPayload, Payload};
use crate::{
    error::Error,
    message_id::MessageId,
    packer::{check_count, Packable, Packer, Unpacker},
    tangle::{MilestoneIndex, MilestoneTimestamp},
    util::bytify,
};

/// Allowed public key counts of a milestone. The count is a single byte on
/// the wire, and a caller supplying more keys than that gets an explicit
/// error rather than a truncated count.
const PUBLIC_KEY_COUNT_RANGE: RangeInclusive<usize> = 1..=255;
/// Allowed signature counts of a milestone.
const SIGNATURE_COUNT_RANGE: RangeInclusive<usize> = 1..=255;

/// A public key taking part in a milestone's quorum.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MilestonePublicKey(#[serde(with = "bytify")] pub [u8; Self::LENGTH]);

impl MilestonePublicKey {
    /// The length of a milestone public key, in bytes.
    pub const LENGTH: usize = 32;
}

impl AsRef<[u8]> for MilestonePublicKey {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// A signature over a milestone essence.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MilestoneSignature(#[serde(with = "bytify")] pub [u8; Self::LENGTH]);

impl MilestoneSignature {
    /// The length of a milestone signature, in bytes.
    pub const LENGTH: usize = 64;
}

impl AsRef<[u8]> for MilestoneSignature {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// A signed checkpoint in the Tangle, optionally carrying a receipt of
/// migrated funds.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MilestonePayload {
    /// The index of this milestone.
    pub index: MilestoneIndex,
    /// When this milestone was issued, in seconds since the UNIX epoch.
    pub timestamp: MilestoneTimestamp,
    /// The first parent message this milestone references.
    pub parent_1: MessageId,
    /// The second parent message this milestone references.
    pub parent_2: MessageId,
    /// The merkle proof over the messages included by this milestone.
    #[serde(with = "bytify")]
    pub inclusion_merkle_proof: [u8; Self::MERKLE_PROOF_LENGTH],
    /// The public keys of the quorum signing this milestone.
    pub public_keys: Box<[MilestonePublicKey]>,
    /// An optional embedded receipt; no other payload kind is legal here.
    pub receipt: OptionalPayload,
    /// The quorum signatures, in public key order.
    pub signatures: Box<[MilestoneSignature]>,
}

impl MilestonePayload {
    /// The wire type tag of a milestone payload.
    pub const KIND: u32 = 1;
    /// The length of the inclusion merkle proof, in bytes.
    pub const MERKLE_PROOF_LENGTH: usize = 32;
    /// The smallest legal milestone: one public key, one signature, no
    /// receipt.
    pub const MIN_LENGTH: usize = 4
        + 4
        + 8
        + 2 * MessageId::LENGTH
        + Self::MERKLE_PROOF_LENGTH
        + 1
        + MilestonePublicKey::LENGTH
        + 1
        + MilestoneSignature::LENGTH;

    fn check_receipt(receipt: &OptionalPayload) -> Result<(), Error> {
        match &receipt.0 {
            None | Some(Payload::Receipt(_)) => Ok(()),
            Some(payload) => Err(Error::InvalidNestedPayloadKind(payload.kind_tag())),
        }
    }
}

impl Packable for MilestonePayload {
    fn pack(&self, packer: &mut Packer) -> Result<(), Error> {
        // All structural validation happens before the first byte is written.
        check_count("public keys", self.public_keys.len(), &PUBLIC_KEY_COUNT_RANGE)?;
        check_count("signatures", self.signatures.len(), &SIGNATURE_COUNT_RANGE)?;
        Self::check_receipt(&self.receipt)?;

        packer.write_u32(Self::KIND);
        self.index.pack(packer)?;
        self.timestamp.pack(packer)?;
        self.parent_1.pack(packer)?;
        self.parent_2.pack(packer)?;
        packer.write_bytes(&self.inclusion_merkle_proof);
        packer.write_u8(self.public_keys.len() as u8);
        for public_key in self.public_keys.iter() {
            packer.write_bytes(&public_key.0);
        }
        self.receipt.pack(packer)?;
        packer.write_u8(self.signatures.len() as u8);
        for signature in self.signatures.iter() {
            packer.write_bytes(&signature.0);
        }
        Ok(())
    }

    fn unpack(unpacker: &mut Unpacker<'_>) -> Result<Self, Error> {
        unpacker.require("milestone payload", Self::MIN_LENGTH)?;
        let tag = unpacker.read_u32("payload type")?;
        if tag != Self::KIND {
            return Err(Error::TypeTagMismatch {
                expected: Self::KIND,
                found: tag,
            });
        }
        let index = MilestoneIndex::unpack(unpacker)?;
        let timestamp = MilestoneTimestamp::unpack(unpacker)?;
        let parent_1 = MessageId::unpack(unpacker)?;
        let parent_2 = MessageId::unpack(unpacker)?;
        let inclusion_merkle_proof = unpacker.read_array("inclusion merkle proof")?;
        let public_key_count = unpacker.read_u8("public key count")? as usize;
        check_count("public keys", public_key_count, &PUBLIC_KEY_COUNT_RANGE)?;
        let mut public_keys = Vec::with_capacity(public_key_count);
        for _ in 0..public_key_count {
            public_keys.push(MilestonePublicKey(unpacker.read_array("public key")?));
        }
        // The envelope's own length field says whether a receipt follows, so
        // this is decoded unconditionally.
        let receipt = OptionalPayload::unpack(unpacker)?;
        Self::check_receipt(&receipt)?;
        let signature_count = unpacker.read_u8("signature count")? as usize;
        check_count("signatures", signature_count, &SIGNATURE_COUNT_RANGE)?;
        let mut signatures = Vec::with_capacity(signature_count);
        for _ in 0..signature_count {
            signatures.push(MilestoneSignature(unpacker.read_array("signature")?));
        }
        Ok(Self {
            index,
            timestamp,
            parent_1,
            parent_2,
            inclusion_merkle_proof,
            public_keys: public_keys.into_boxed_slice(),
            receipt,
            signatures: signatures.into_boxed_slice(),
        })
    }
}

#[cfg(any(test, feature = "rand"))]
mod rand {
    use ::rand::{thread_rng, Rng, RngCore};

    use super::*;
    use crate::payload::ReceiptPayload;

    impl MilestonePayload {
        /// Generates a random [`MilestonePayload`] without a receipt.
        pub fn rand() -> Self {
            let mut rng = thread_rng();
            let key_count = rng.gen_range(1..=4);
            Self {
                index: MilestoneIndex::rand(),
                timestamp: MilestoneTimestamp::rand(),
                parent_1: MessageId::rand(),
                parent_2: MessageId::rand(),
                inclusion_merkle_proof: ::rand::random(),
                public_keys: (0..key_count)
                    .map(|_| MilestonePublicKey(::rand::random()))
                    .collect(),
                receipt: OptionalPayload(None),
                signatures: (0..key_count)
                    .map(|_| {
                        let mut signature = [0u8; MilestoneSignature::LENGTH];
                        thread_rng().fill_bytes(&mut signature);
                        MilestoneSignature(signature)
                    })
                    .collect(),
            }
        }

        /// Generates a random [`MilestonePayload`] embedding a random receipt.
        pub fn rand_with_receipt() -> Self {
            Self {
                receipt: OptionalPayload::from(Payload::from(ReceiptPayload::rand())),
                ..Self::rand()
            }
        }
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::payload::TransactionPayload;

    #[test]
    fn wire_round_trip() {
        let payload = MilestonePayload::rand();
        let bytes = payload.pack_to_vec().unwrap();
        assert_eq!(payload, MilestonePayload::unpack_from_slice(&bytes).unwrap());
    }

    #[test]
    fn wire_round_trip_with_receipt() {
        let payload = MilestonePayload::rand_with_receipt();
        let bytes = payload.pack_to_vec().unwrap();
        assert_eq!(payload, MilestonePayload::unpack_from_slice(&bytes).unwrap());
    }

    #[test]
    fn smallest_milestone_has_min_length() {
        let mut payload = MilestonePayload::rand();
        payload.public_keys = vec![MilestonePublicKey([0; 32])].into_boxed_slice();
        payload.signatures = vec![MilestoneSignature([0; 64])].into_boxed_slice();
        let bytes = payload.pack_to_vec().unwrap();
        // MIN_LENGTH does not count the 4-byte envelope of the absent receipt.
        assert_eq!(bytes.len(), MilestonePayload::MIN_LENGTH + 4);
    }

    #[test]
    fn embedded_transaction_is_rejected_when_packing() {
        let mut payload = MilestonePayload::rand();
        payload.receipt = OptionalPayload::from(Payload::from(TransactionPayload::rand()));
        assert_eq!(
            payload.pack_to_vec(),
            Err(Error::InvalidNestedPayloadKind(TransactionPayload::KIND))
        );
    }

    #[test]
    fn key_count_bounds_are_enforced() {
        let mut payload = MilestonePayload::rand();
        payload.public_keys = Vec::new().into_boxed_slice();
        assert_eq!(
            payload.pack_to_vec(),
            Err(Error::InvalidCount {
                field: "public keys",
                count: 0,
                min: 1,
                max: 255,
            })
        );

        let mut payload = MilestonePayload::rand();
        payload.public_keys = (0..256).map(|_| MilestonePublicKey([0; 32])).collect();
        assert!(matches!(
            payload.pack_to_vec(),
            Err(Error::InvalidCount {
                field: "public keys",
                count: 256,
                ..
            })
        ));
    }

    #[test]
    fn signature_count_bounds_are_enforced() {
        let mut payload = MilestonePayload::rand();
        payload.signatures = Vec::new().into_boxed_slice();
        assert!(matches!(
            payload.pack_to_vec(),
            Err(Error::InvalidCount {
                field: "signatures",
                count: 0,
                ..
            })
        ));
    }
}
