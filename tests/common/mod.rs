// Copyright 2022 IOTA Stiftung
// SPDX-License-Identifier: Apache-2.0

//! Deterministic payload fixtures shared by the integration tests.

#![allow(dead_code)]

use chrysalis_payload::{
    address::{Address, Ed25519Address},
    input::{Input, TransactionId, UtxoInput},
    message_id::MessageId,
    output::{Output, SigLockedSingleOutput},
    payload::{
        milestone::{MilestonePublicKey, MilestoneSignature},
        receipt::{MigratedFundsEntry, TailTransactionHash},
        transaction::TransactionEssence,
        IndexationPayload, MilestonePayload, OptionalPayload, Payload, ReceiptPayload,
        TransactionPayload,
    },
    signature::Signature,
    unlock_block::{SignatureUnlock, UnlockBlock},
};

pub fn transaction() -> TransactionPayload {
    TransactionPayload {
        essence: TransactionEssence {
            inputs: vec![Input::Utxo(UtxoInput {
                transaction_id: TransactionId([1; 32]),
                index: 0,
            })]
            .into_boxed_slice(),
            outputs: vec![Output::SigLockedSingle(SigLockedSingleOutput {
                address: Address::Ed25519(Ed25519Address([2; 32])),
                amount: 1_000_000,
            })]
            .into_boxed_slice(),
        },
        unlock_blocks: vec![UnlockBlock::Signature(SignatureUnlock(Signature::Ed25519 {
            public_key: [3; 32],
            signature: [4; 64],
        }))]
        .into_boxed_slice(),
    }
}

pub fn milestone(receipt: Option<Payload>) -> MilestonePayload {
    MilestonePayload {
        index: 1_000.into(),
        timestamp: 1_600_000_000.into(),
        parent_1: MessageId([5; 32]),
        parent_2: MessageId([6; 32]),
        inclusion_merkle_proof: [7; 32],
        public_keys: vec![MilestonePublicKey([8; 32])].into_boxed_slice(),
        receipt: OptionalPayload::from(receipt),
        signatures: vec![MilestoneSignature([9; 64])].into_boxed_slice(),
    }
}

pub fn indexation() -> IndexationPayload {
    IndexationPayload::new("spam", vec![0xde, 0xad, 0xbe, 0xef]).expect("valid index")
}

pub fn receipt() -> ReceiptPayload {
    ReceiptPayload {
        migrated_at: 500.into(),
        funds: vec![MigratedFundsEntry {
            tail_transaction_hash: TailTransactionHash([10; 49]),
            address: Address::Ed25519(Ed25519Address([11; 32])),
            deposit: 42,
        }]
        .into_boxed_slice(),
    }
}
