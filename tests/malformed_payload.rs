// Copyright 2022 IOTA Stiftung
// SPDX-License-Identifier: Apache-2.0

mod common;

use chrysalis_payload::{
    Error, MilestonePayload, OptionalPayload, Packable, Packer, Payload, ReceiptPayload,
    TransactionPayload,
};
use pretty_assertions::assert_eq;

/// Packs a milestone by hand so that the embedded payload slot can hold any
/// kind, which the typed API refuses to pack.
fn milestone_bytes_with_embedded(embedded: &Payload) -> Vec<u8> {
    let mut packer = Packer::new();
    packer.write_u32(MilestonePayload::KIND);
    packer.write_u32(5); // index
    packer.write_u64(1_600_000_000); // timestamp
    packer.write_bytes(&[1; 32]); // parent 1
    packer.write_bytes(&[2; 32]); // parent 2
    packer.write_bytes(&[3; 32]); // inclusion merkle proof
    packer.write_u8(1); // public key count
    packer.write_bytes(&[4; 32]);
    OptionalPayload::from(embedded.clone())
        .pack(&mut packer)
        .unwrap();
    packer.write_u8(1); // signature count
    packer.write_bytes(&[5; 64]);
    packer.into_vec()
}

#[test]
fn every_truncation_of_a_valid_encoding_is_detected() {
    let bytes = OptionalPayload::from(Payload::from(common::milestone(Some(
        common::receipt().into(),
    ))))
    .pack_to_vec()
    .unwrap();

    for cut in 0..bytes.len() {
        match OptionalPayload::unpack_from_slice(&bytes[..cut]) {
            Err(Error::TruncatedInput { .. }) => {}
            other => panic!("truncation at {cut} not detected: {other:?}"),
        }
    }
}

#[test]
fn unknown_outer_tag_is_rejected() {
    let mut bytes = OptionalPayload::from(Payload::from(common::transaction()))
        .pack_to_vec()
        .unwrap();
    bytes[4..8].copy_from_slice(&9u32.to_le_bytes());
    assert_eq!(
        OptionalPayload::unpack_from_slice(&bytes),
        Err(Error::UnknownPayloadType(9))
    );
}

#[test]
fn cross_kind_tag_never_decodes_as_the_wrong_kind() {
    let bytes = OptionalPayload::from(Payload::from(common::transaction()))
        .pack_to_vec()
        .unwrap();

    for tag in [
        MilestonePayload::KIND,
        chrysalis_payload::IndexationPayload::KIND,
        ReceiptPayload::KIND,
    ] {
        let mut mutated = bytes.clone();
        mutated[4..8].copy_from_slice(&tag.to_le_bytes());
        // A transaction body read under another kind's tag must fail
        // structurally; it must never come back as a valid payload.
        assert!(OptionalPayload::unpack_from_slice(&mutated).is_err());
    }
}

#[test]
fn milestone_embedding_a_transaction_is_rejected() {
    let bytes = milestone_bytes_with_embedded(&Payload::from(common::transaction()));
    assert_eq!(
        MilestonePayload::unpack_from_slice(&bytes),
        Err(Error::InvalidNestedPayloadKind(TransactionPayload::KIND))
    );

    // The same check holds through the outer envelope.
    let mut packer = Packer::new();
    packer.write_u32(bytes.len() as u32);
    packer.write_bytes(&bytes);
    assert_eq!(
        OptionalPayload::unpack_from_slice(packer.as_slice()),
        Err(Error::InvalidNestedPayloadKind(TransactionPayload::KIND))
    );
}

#[test]
fn milestone_embedding_a_receipt_is_accepted() {
    let bytes = milestone_bytes_with_embedded(&Payload::from(common::receipt()));
    let payload = MilestonePayload::unpack_from_slice(&bytes).unwrap();
    assert!(matches!(payload.receipt.0, Some(Payload::Receipt(_))));
}

#[test]
fn corrupted_essence_discriminant_is_rejected() {
    let mut bytes = OptionalPayload::from(Payload::from(common::transaction()))
        .pack_to_vec()
        .unwrap();
    // Envelope length (4) + payload tag (4) puts the essence kind at byte 8.
    bytes[8] = 0xff;
    assert_eq!(
        OptionalPayload::unpack_from_slice(&bytes),
        Err(Error::UnrecognizedEssenceType(0xff))
    );
}

#[test]
fn zero_migrated_funds_count_is_rejected() {
    let mut packer = Packer::new();
    packer.write_u32(ReceiptPayload::KIND);
    packer.write_u32(500); // migrated at
    packer.write_u16(0); // funds count
    packer.write_bytes(&[0; 90]); // padding past the minimum-size gate
    assert_eq!(
        ReceiptPayload::unpack_from_slice(packer.as_slice()),
        Err(Error::InvalidCount {
            field: "migrated funds",
            count: 0,
            min: 1,
            max: 127,
        })
    );
}

#[test]
fn zero_public_key_count_is_rejected_on_decode() {
    let valid = common::milestone(None).pack_to_vec().unwrap();
    let mut bytes = valid.clone();
    // tag + index + timestamp + two parents + merkle proof.
    let count_offset = 4 + 4 + 8 + 32 + 32 + 32;
    bytes[count_offset] = 0;
    // Keep the buffer long enough to pass the minimum-size gate.
    bytes.extend_from_slice(&[0; 32]);
    assert!(matches!(
        MilestonePayload::unpack_from_slice(&bytes),
        Err(Error::InvalidCount {
            field: "public keys",
            count: 0,
            ..
        })
    ));
}
