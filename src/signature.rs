// Copyright 2022 IOTA Stiftung
// SPDX-License-Identifier: Apache-2.0

//! Module containing the [`Signature`] type.

use serde::{Deserialize, Serialize};

use crate::{
    error::Error,
    packer::{Packable, Packer, Unpacker},
    util::bytify,
};

/// A signature authorizing the spending of an input.
///
/// The codec carries the raw bytes; verifying them against the essence is the
/// business of the consensus layer, not the wire format.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum Signature {
    /// An Ed25519 signature.
    #[serde(rename = "ed25519")]
    Ed25519 {
        /// The public key the signature verifies under.
        #[serde(with = "bytify")]
        public_key: [u8; Self::PUBLIC_KEY_LENGTH],
        /// The signature bytes.
        #[serde(with = "bytify")]
        signature: [u8; Self::SIGNATURE_LENGTH],
    },
}

impl Signature {
    /// The wire discriminant of an Ed25519 signature.
    pub const ED25519_KIND: u8 = 0;
    /// The length of an Ed25519 public key, in bytes.
    pub const PUBLIC_KEY_LENGTH: usize = 32;
    /// The length of an Ed25519 signature, in bytes.
    pub const SIGNATURE_LENGTH: usize = 64;
}

impl Packable for Signature {
    fn pack(&self, packer: &mut Packer) -> Result<(), Error> {
        match self {
            Signature::Ed25519 {
                public_key,
                signature,
            } => {
                packer.write_u8(Self::ED25519_KIND);
                packer.write_bytes(public_key);
                packer.write_bytes(signature);
            }
        }
        Ok(())
    }

    fn unpack(unpacker: &mut Unpacker<'_>) -> Result<Self, Error> {
        match unpacker.read_u8("signature type")? {
            Self::ED25519_KIND => Ok(Self::Ed25519 {
                public_key: unpacker.read_array("public key")?,
                signature: unpacker.read_array("signature")?,
            }),
            kind => Err(Error::UnknownSignatureType(kind)),
        }
    }
}

#[cfg(any(test, feature = "rand"))]
mod rand {
    use ::rand::{thread_rng, RngCore};

    use super::*;

    impl Signature {
        /// Generates a random Ed25519 [`Signature`].
        pub fn rand() -> Self {
            let mut signature = [0u8; Self::SIGNATURE_LENGTH];
            thread_rng().fill_bytes(&mut signature);
            Self::Ed25519 {
                public_key: ::rand::random(),
                signature,
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
        let signature = Signature::rand();
        let bytes = signature.pack_to_vec().unwrap();
        assert_eq!(
            bytes.len(),
            1 + Signature::PUBLIC_KEY_LENGTH + Signature::SIGNATURE_LENGTH
        );
        assert_eq!(signature, Signature::unpack_from_slice(&bytes).unwrap());
    }

    #[test]
    fn unknown_kind_is_rejected() {
        let mut bytes = Signature::rand().pack_to_vec().unwrap();
        bytes[0] = 4;
        assert_eq!(
            Signature::unpack_from_slice(&bytes),
            Err(Error::UnknownSignatureType(4))
        );
    }

    #[test]
    fn serde_json_round_trip() {
        let signature = Signature::rand();
        let json = serde_json::to_string(&signature).unwrap();
        assert_eq!(signature, serde_json::from_str(&json).unwrap());
    }
}
