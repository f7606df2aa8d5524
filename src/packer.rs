// Copyright 2022 IOTA Stiftung
// SPDX-License-Identifier: Apache-2.0

//! Byte cursors and the [`Packable`] trait implemented by every wire type.
//!
//! All multi-byte integers on the wire are little-endian. The [`Packer`] is an
//! append-only buffer with explicit in-place patching, which is how the payload
//! envelope writes its length field after the body it frames. The [`Unpacker`]
//! borrows the input slice and refuses to read past its end, so adversarial or
//! truncated input surfaces as [`Error::TruncatedInput`] instead of a panic.

use std::ops::RangeInclusive;

use crate::error::Error;

/// The maximum number of length-prefixed payload envelopes that may be nested
/// during a single unpack: the outer envelope plus the receipt a milestone
/// embeds. The protocol itself never nests deeper; the cap is enforced anyway
/// so the format cannot be abused to recurse.
pub const MAX_PAYLOAD_DEPTH: usize = 2;

/// A type with a fixed representation in the Chrysalis wire format.
pub trait Packable: Sized {
    /// Packs this value into the given packer.
    fn pack(&self, packer: &mut Packer) -> Result<(), Error>;

    /// Unpacks a value, advancing the unpacker past the bytes it consumed.
    fn unpack(unpacker: &mut Unpacker<'_>) -> Result<Self, Error>;

    /// Packs this value into a fresh byte vector.
    fn pack_to_vec(&self) -> Result<Vec<u8>, Error> {
        let mut packer = Packer::new();
        self.pack(&mut packer)?;
        Ok(packer.into_vec())
    }

    /// Unpacks a value from the start of a byte slice. Trailing bytes are not
    /// an error here; the caller decides whether leftovers matter.
    fn unpack_from_slice(bytes: &[u8]) -> Result<Self, Error> {
        Self::unpack(&mut Unpacker::new(bytes))
    }
}

/// An append-only byte sink with explicit in-place patching.
#[derive(Debug, Default)]
pub struct Packer {
    bytes: Vec<u8>,
}

impl Packer {
    /// Creates an empty packer.
    pub fn new() -> Self {
        Self::default()
    }

    /// The number of bytes written so far, i.e. the offset the next write
    /// lands at.
    pub fn position(&self) -> usize {
        self.bytes.len()
    }

    /// Appends a single byte.
    pub fn write_u8(&mut self, value: u8) {
        self.bytes.push(value);
    }

    /// Appends a `u16` in little-endian order.
    pub fn write_u16(&mut self, value: u16) {
        self.bytes.extend_from_slice(&value.to_le_bytes());
    }

    /// Appends a `u32` in little-endian order.
    pub fn write_u32(&mut self, value: u32) {
        self.bytes.extend_from_slice(&value.to_le_bytes());
    }

    /// Appends a `u64` in little-endian order.
    pub fn write_u64(&mut self, value: u64) {
        self.bytes.extend_from_slice(&value.to_le_bytes());
    }

    /// Appends raw bytes.
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.bytes.extend_from_slice(bytes);
    }

    /// Appends a string with a 2-byte length prefix.
    pub fn write_string(&mut self, field: &'static str, value: &str) -> Result<(), Error> {
        let length = value.len();
        if length > u16::MAX as usize {
            return Err(Error::StringTooLong {
                field,
                length,
                max: u16::MAX as usize,
            });
        }
        self.write_u16(length as u16);
        self.write_bytes(value.as_bytes());
        Ok(())
    }

    /// Overwrites the four bytes at `offset` with `value`, leaving the write
    /// position untouched. This is how length fields that are only known after
    /// the body has been written get filled in.
    ///
    /// # Panics
    ///
    /// Panics if the range `offset..offset + 4` has not been written yet.
    pub fn patch_u32(&mut self, offset: usize, value: u32) {
        self.bytes[offset..offset + 4].copy_from_slice(&value.to_le_bytes());
    }

    /// The bytes written so far.
    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }

    /// Consumes the packer, returning the written bytes.
    pub fn into_vec(self) -> Vec<u8> {
        self.bytes
    }
}

/// A borrowing byte source that tracks its position and fails with
/// [`Error::TruncatedInput`] instead of reading past the end.
///
/// A single unpacker must not be shared across concurrent decodes; its
/// position is mutable state with no internal locking. Reads are tagged with a
/// field name so that failures on malformed input name the field that could
/// not be read.
#[derive(Debug)]
pub struct Unpacker<'a> {
    bytes: &'a [u8],
    position: usize,
    depth: usize,
}

impl<'a> Unpacker<'a> {
    /// Creates an unpacker over the given bytes.
    pub fn new(bytes: &'a [u8]) -> Self {
        Self {
            bytes,
            position: 0,
            depth: 0,
        }
    }

    /// The offset of the next read.
    pub fn position(&self) -> usize {
        self.position
    }

    /// The number of unread bytes.
    pub fn remaining(&self) -> usize {
        self.bytes.len() - self.position
    }

    /// Whether at least `needed` unread bytes remain.
    pub fn has_remaining(&self, needed: usize) -> bool {
        self.remaining() >= needed
    }

    /// Fails with [`Error::TruncatedInput`] unless at least `needed` unread
    /// bytes remain for `field`.
    pub fn require(&self, field: &'static str, needed: usize) -> Result<(), Error> {
        if self.has_remaining(needed) {
            Ok(())
        } else {
            Err(Error::TruncatedInput {
                field,
                needed,
                remaining: self.remaining(),
                offset: self.position,
            })
        }
    }

    /// Reads a single byte.
    pub fn read_u8(&mut self, field: &'static str) -> Result<u8, Error> {
        self.require(field, 1)?;
        let value = self.bytes[self.position];
        self.position += 1;
        Ok(value)
    }

    /// Reads a little-endian `u16`.
    pub fn read_u16(&mut self, field: &'static str) -> Result<u16, Error> {
        Ok(u16::from_le_bytes(self.read_array(field)?))
    }

    /// Reads a little-endian `u32`.
    pub fn read_u32(&mut self, field: &'static str) -> Result<u32, Error> {
        Ok(u32::from_le_bytes(self.read_array(field)?))
    }

    /// Reads a little-endian `u64`.
    pub fn read_u64(&mut self, field: &'static str) -> Result<u64, Error> {
        Ok(u64::from_le_bytes(self.read_array(field)?))
    }

    /// Reads `n` raw bytes.
    pub fn read_bytes(&mut self, field: &'static str, n: usize) -> Result<&'a [u8], Error> {
        self.require(field, n)?;
        let bytes = &self.bytes[self.position..self.position + n];
        self.position += n;
        Ok(bytes)
    }

    /// Reads a fixed-size byte array.
    pub fn read_array<const N: usize>(&mut self, field: &'static str) -> Result<[u8; N], Error> {
        let bytes = self.read_bytes(field, N)?;
        let mut array = [0u8; N];
        array.copy_from_slice(bytes);
        Ok(array)
    }

    /// Reads a string with a 2-byte length prefix, validating that it is
    /// UTF-8.
    pub fn read_string(&mut self, field: &'static str) -> Result<String, Error> {
        let length = self.read_u16(field)? as usize;
        let offset = self.position;
        let bytes = self.read_bytes(field, length)?;
        let value = std::str::from_utf8(bytes)
            .map_err(|_| Error::InvalidStringUtf8 { field, offset })?;
        Ok(value.to_owned())
    }

    /// Reads a little-endian `u32` without consuming it.
    pub fn peek_u32(&self, field: &'static str) -> Result<u32, Error> {
        self.require(field, 4)?;
        let mut bytes = [0u8; 4];
        bytes.copy_from_slice(&self.bytes[self.position..self.position + 4]);
        Ok(u32::from_le_bytes(bytes))
    }

    /// Registers entry into a payload envelope, failing once the nesting cap
    /// is exceeded. Must be balanced with [`Self::leave_payload`].
    pub(crate) fn enter_payload(&mut self) -> Result<(), Error> {
        if self.depth == MAX_PAYLOAD_DEPTH {
            return Err(Error::NestingTooDeep {
                max: MAX_PAYLOAD_DEPTH,
            });
        }
        self.depth += 1;
        Ok(())
    }

    pub(crate) fn leave_payload(&mut self) {
        self.depth -= 1;
    }
}

/// Checks a sequence length against the protocol bounds for `field`.
pub(crate) fn check_count(
    field: &'static str,
    count: usize,
    range: &RangeInclusive<usize>,
) -> Result<(), Error> {
    if range.contains(&count) {
        Ok(())
    } else {
        Err(Error::InvalidCount {
            field,
            count,
            min: *range.start(),
            max: *range.end(),
        })
    }
}
