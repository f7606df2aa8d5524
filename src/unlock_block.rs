// Copyright 2022 IOTA Stiftung
// SPDX-License-Identifier: Apache-2.0

//! Module containing the [`UnlockBlock`] types.

use serde::{Deserialize, Serialize};

use crate::{
    error::Error,
    packer::{Packable, Packer, Unpacker},
    signature::Signature,
};

/// A block authorizing the spending of one transaction input.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnlockBlock {
    /// A signature over the transaction essence.
    Signature(SignatureUnlock),
    /// A reference to the unlock block of a previous input.
    Reference(ReferenceUnlock),
}

/// An unlock block carrying a signature.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SignatureUnlock(pub Signature);

impl SignatureUnlock {
    /// The wire discriminant of a signature unlock block.
    pub const KIND: u8 = 0;
}

/// An unlock block referring to the unlock block of another input that is
/// signed by the same key.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReferenceUnlock(pub u16);

impl ReferenceUnlock {
    /// The wire discriminant of a reference unlock block.
    pub const KIND: u8 = 1;
}

impl From<SignatureUnlock> for UnlockBlock {
    fn from(value: SignatureUnlock) -> Self {
        Self::Signature(value)
    }
}

impl From<ReferenceUnlock> for UnlockBlock {
    fn from(value: ReferenceUnlock) -> Self {
        Self::Reference(value)
    }
}

impl Packable for UnlockBlock {
    fn pack(&self, packer: &mut Packer) -> Result<(), Error> {
        match self {
            UnlockBlock::Signature(unlock) => {
                packer.write_u8(SignatureUnlock::KIND);
                unlock.0.pack(packer)?;
            }
            UnlockBlock::Reference(unlock) => {
                packer.write_u8(ReferenceUnlock::KIND);
                packer.write_u16(unlock.0);
            }
        }
        Ok(())
    }

    fn unpack(unpacker: &mut Unpacker<'_>) -> Result<Self, Error> {
        match unpacker.read_u8("unlock block type")? {
            SignatureUnlock::KIND => Ok(Self::Signature(SignatureUnlock(Signature::unpack(
                unpacker,
            )?))),
            ReferenceUnlock::KIND => Ok(Self::Reference(ReferenceUnlock(
                unpacker.read_u16("reference index")?,
            ))),
            kind => Err(Error::UnknownUnlockBlockType(kind)),
        }
    }
}

#[cfg(any(test, feature = "rand"))]
mod rand {
    use ::rand::{thread_rng, Rng};

    use super::*;

    impl UnlockBlock {
        /// Generates a random signature [`UnlockBlock`].
        pub fn rand() -> Self {
            Self::Signature(SignatureUnlock(Signature::rand()))
        }

        /// Generates a random reference [`UnlockBlock`].
        pub fn rand_reference() -> Self {
            Self::Reference(ReferenceUnlock(thread_rng().gen_range(0..127)))
        }
    }
}
