// SPDX-FileCopyrightText: Copyright (c) 2018-2025 slowtec GmbH <post@slowtec.de>
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::*;
use crate::error::*;
use byteorder::{BigEndian, ByteOrder};

// [MODBUS over Serial Line Specification and Implementation Guide V1.02](http://modbus.org/docs/Modbus_over_serial_line_V1_02.pdf), page 13
// "The maximum size of a MODBUS RTU frame is 256 bytes."
pub const MAX_FRAME_LEN: usize = 256;

/// Number of bytes of the trailing CRC field.
pub const CRC_LEN: usize = 2;

/// Maximum number of bytes a [`Frame`] holds (server address up to the
/// last payload byte).
pub const MAX_PAYLOAD_LEN: usize = MAX_FRAME_LEN - CRC_LEN;

/// The bytes of one RTU message without its CRC.
///
/// The capacity is declared up front and appending beyond it fails
/// instead of truncating.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Frame {
    data: heapless::Vec<u8, MAX_PAYLOAD_LEN>,
    capacity: usize,
}

impl Frame {
    /// Create an empty frame that accepts exactly `capacity` bytes.
    pub fn with_capacity(capacity: usize) -> Result<Self, Error> {
        if capacity > MAX_PAYLOAD_LEN {
            return Err(Error::BufferSize);
        }
        Ok(Self {
            data: heapless::Vec::new(),
            capacity,
        })
    }

    /// Create a completely filled frame from received bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, Error> {
        let data = heapless::Vec::from_slice(bytes).map_err(|()| Error::BufferSize)?;
        Ok(Self {
            data,
            capacity: bytes.len(),
        })
    }

    /// Append a single byte.
    pub fn add_u8(&mut self, byte: u8) -> Result<(), Error> {
        if self.remaining() < 1 {
            return Err(Error::BufferSize);
        }
        self.data.push(byte).map_err(|_| Error::BufferSize)
    }

    /// Append a word, most significant byte first.
    pub fn add_u16(&mut self, word: Word) -> Result<(), Error> {
        let mut buf = [0; 2];
        BigEndian::write_u16(&mut buf, word);
        self.add_bytes(&buf)
    }

    /// Append raw bytes verbatim.
    pub fn add_bytes(&mut self, bytes: &[u8]) -> Result<(), Error> {
        if self.remaining() < bytes.len() {
            return Err(Error::BufferSize);
        }
        self.data
            .extend_from_slice(bytes)
            .map_err(|()| Error::BufferSize)
    }

    /// Append words, each most significant byte first.
    pub fn add_words(&mut self, words: &[Word]) -> Result<(), Error> {
        if self.remaining() < words.len() * 2 {
            return Err(Error::BufferSize);
        }
        words.iter().try_for_each(|w| self.add_u16(*w))
    }

    /// Number of bytes appended so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    ///  Returns `true` if nothing has been appended.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The declared number of bytes.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns `true` if the declared capacity is filled.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.len() == self.capacity
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    fn remaining(&self) -> usize {
        self.capacity.saturating_sub(self.data.len())
    }
}

impl AsRef<[u8]> for Frame {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

#[cfg(all(feature = "defmt", target_os = "none"))]
impl defmt::Format for Frame {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(
            fmt,
            "Frame {{ capacity: {}, data: {=[u8]:x} }}",
            self.capacity,
            self.as_bytes()
        )
    }
}
