// Copyright 2022 IOTA Stiftung
// SPDX-License-Identifier: Apache-2.0

//! Module containing the [`TransactionPayload`] type.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::{
    error::Error,
    input::Input,
    output::Output,
    packer::{check_count, Packable, Packer, Unpacker},
    unlock_block::UnlockBlock,
};

/// Allowed input counts of a transaction essence.
const INPUT_COUNT_RANGE: RangeInclusive<usize> = 1..=127;
/// Allowed output counts of a transaction essence.
const OUTPUT_COUNT_RANGE: RangeInclusive<usize> = 1..=127;
/// Allowed unlock block counts of a transaction payload.
const UNLOCK_BLOCK_COUNT_RANGE: RangeInclusive<usize> = 1..=127;

/// The transferable content of a transaction: what is consumed and what is
/// created.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionEssence {
    /// The inputs consumed by the transaction.
    pub inputs: Box<[Input]>,
    /// The outputs created by the transaction.
    pub outputs: Box<[Output]>,
}

impl TransactionEssence {
    /// The wire discriminant of the only recognized essence kind.
    pub const KIND: u8 = 0;
}

impl Packable for TransactionEssence {
    fn pack(&self, packer: &mut Packer) -> Result<(), Error> {
        check_count("inputs", self.inputs.len(), &INPUT_COUNT_RANGE)?;
        check_count("outputs", self.outputs.len(), &OUTPUT_COUNT_RANGE)?;
        packer.write_u8(Self::KIND);
        packer.write_u16(self.inputs.len() as u16);
        for input in self.inputs.iter() {
            input.pack(packer)?;
        }
        packer.write_u16(self.outputs.len() as u16);
        for output in self.outputs.iter() {
            output.pack(packer)?;
        }
        Ok(())
    }

    fn unpack(unpacker: &mut Unpacker<'_>) -> Result<Self, Error> {
        let kind = unpacker.read_u8("essence type")?;
        if kind != Self::KIND {
            return Err(Error::UnrecognizedEssenceType(kind));
        }
        let input_count = unpacker.read_u16("input count")? as usize;
        check_count("inputs", input_count, &INPUT_COUNT_RANGE)?;
        let mut inputs = Vec::with_capacity(input_count);
        for _ in 0..input_count {
            inputs.push(Input::unpack(unpacker)?);
        }
        let output_count = unpacker.read_u16("output count")? as usize;
        check_count("outputs", output_count, &OUTPUT_COUNT_RANGE)?;
        let mut outputs = Vec::with_capacity(output_count);
        for _ in 0..output_count {
            outputs.push(Output::unpack(unpacker)?);
        }
        Ok(Self {
            inputs: inputs.into_boxed_slice(),
            outputs: outputs.into_boxed_slice(),
        })
    }
}

/// Signals a transaction of tokens: an essence plus the unlock blocks
/// authorizing it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionPayload {
    /// The transaction essence.
    pub essence: TransactionEssence,
    /// One unlock block per input, in input order.
    pub unlock_blocks: Box<[UnlockBlock]>,
}

impl TransactionPayload {
    /// The wire type tag of a transaction payload.
    pub const KIND: u32 = 0;
    /// The smallest legal transaction payload: the tag plus the essence
    /// discriminant.
    pub const MIN_LENGTH: usize = 4 + 1;
}

impl Packable for TransactionPayload {
    fn pack(&self, packer: &mut Packer) -> Result<(), Error> {
        check_count(
            "unlock blocks",
            self.unlock_blocks.len(),
            &UNLOCK_BLOCK_COUNT_RANGE,
        )?;
        packer.write_u32(Self::KIND);
        self.essence.pack(packer)?;
        packer.write_u16(self.unlock_blocks.len() as u16);
        for unlock_block in self.unlock_blocks.iter() {
            unlock_block.pack(packer)?;
        }
        Ok(())
    }

    fn unpack(unpacker: &mut Unpacker<'_>) -> Result<Self, Error> {
        unpacker.require("transaction payload", Self::MIN_LENGTH)?;
        let tag = unpacker.read_u32("payload type")?;
        if tag != Self::KIND {
            return Err(Error::TypeTagMismatch {
                expected: Self::KIND,
                found: tag,
            });
        }
        let essence = TransactionEssence::unpack(unpacker)?;
        let unlock_block_count = unpacker.read_u16("unlock block count")? as usize;
        check_count("unlock blocks", unlock_block_count, &UNLOCK_BLOCK_COUNT_RANGE)?;
        let mut unlock_blocks = Vec::with_capacity(unlock_block_count);
        for _ in 0..unlock_block_count {
            unlock_blocks.push(UnlockBlock::unpack(unpacker)?);
        }
        Ok(Self {
            essence,
            unlock_blocks: unlock_blocks.into_boxed_slice(),
        })
    }
}

#[cfg(any(test, feature = "rand"))]
mod rand {
    use ::rand::{thread_rng, Rng};

    use super::*;

    impl TransactionEssence {
        /// Generates a random [`TransactionEssence`].
        pub fn rand() -> Self {
            let mut rng = thread_rng();
            Self {
                inputs: (0..rng.gen_range(1..=3)).map(|_| Input::rand()).collect(),
                outputs: (0..rng.gen_range(1..=3)).map(|_| Output::rand()).collect(),
            }
        }
    }

    impl TransactionPayload {
        /// Generates a random [`TransactionPayload`].
        pub fn rand() -> Self {
            let essence = TransactionEssence::rand();
            let unlock_blocks = essence.inputs.iter().map(|_| UnlockBlock::rand()).collect();
            Self {
                essence,
                unlock_blocks,
            }
        }
    }
}
