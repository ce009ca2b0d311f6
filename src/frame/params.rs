// SPDX-FileCopyrightText: Copyright (c) 2018-2025 slowtec GmbH <post@slowtec.de>
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::*;

/// Parameters that follow the function code of a request.
///
/// Every variant is packed in a fixed order: the 16 bit parameters
/// most significant byte first, then (for the variable length shapes)
/// the byte count and the payload.
#[cfg_attr(all(feature = "defmt", target_os = "none"), derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Params<'p> {
    /// No parameters, e.g. `ReadExceptionStatus`.
    None,
    /// One word, e.g. the FIFO pointer address of `ReadFifoQueue`.
    One(Word),
    /// Two words, e.g. address and quantity of `ReadHoldingRegisters`.
    Two(Word, Word),
    /// Three words, e.g. address, AND mask and OR mask of `MaskWriteRegister`.
    Three(Word, Word, Word),
    /// Two words, a byte count and words (`WriteMultipleRegisters`).
    ///
    /// `byte_count` is the length of `words` in bytes, i.e. twice the
    /// number of words that get packed.
    Words {
        p1: Word,
        p2: Word,
        byte_count: u8,
        words: &'p [Word],
    },
    /// Two words, a byte count and raw bytes (`WriteMultipleCoils`).
    Bytes {
        p1: Word,
        p2: Word,
        byte_count: u8,
        bytes: &'p [u8],
    },
    /// A preformatted payload that is appended verbatim after the
    /// function code.
    Raw(&'p [u8]),
}

/// The parameter shape of [`Params`] without its values.
#[cfg_attr(all(feature = "defmt", target_os = "none"), derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// [`Params::None`]
    None,
    /// [`Params::One`]
    One,
    /// [`Params::Two`]
    Two,
    /// [`Params::Three`]
    Three,
    /// [`Params::Words`]
    Words,
    /// [`Params::Bytes`]
    Bytes,
    /// [`Params::Raw`]
    Raw,
}

impl Params<'_> {
    /// Shorthand for address/quantity style requests.
    #[must_use]
    pub const fn address_quantity(address: Address, quantity: Quantity) -> Self {
        Self::Two(address, quantity)
    }

    /// Build [`Params::Words`] with the byte count derived from `words`.
    ///
    /// The byte count saturates at `255` which the checks reject as
    /// inconsistent.
    #[must_use]
    pub fn words(address: Address, quantity: Quantity, words: &[Word]) -> Params<'_> {
        Params::Words {
            p1: address,
            p2: quantity,
            byte_count: u8::try_from(words.len() * 2).unwrap_or(u8::MAX),
            words,
        }
    }

    /// Build [`Params::Bytes`] with the byte count derived from `bytes`.
    #[must_use]
    pub fn bytes(address: Address, quantity: Quantity, bytes: &[u8]) -> Params<'_> {
        Params::Bytes {
            p1: address,
            p2: quantity,
            byte_count: u8::try_from(bytes.len()).unwrap_or(u8::MAX),
            bytes,
        }
    }

    #[must_use]
    pub const fn shape(&self) -> Shape {
        match self {
            Self::None => Shape::None,
            Self::One(_) => Shape::One,
            Self::Two(_, _) => Shape::Two,
            Self::Three(_, _, _) => Shape::Three,
            Self::Words { .. } => Shape::Words,
            Self::Bytes { .. } => Shape::Bytes,
            Self::Raw(_) => Shape::Raw,
        }
    }

    /// Number of bytes of the request frame without its CRC
    /// (server address, function code and these parameters).
    #[must_use]
    pub const fn frame_len(&self) -> usize {
        match *self {
            Self::None => 2,
            Self::One(_) => 4,
            Self::Two(_, _) => 6,
            Self::Three(_, _, _) => 8,
            Self::Words { byte_count, .. } | Self::Bytes { byte_count, .. } => {
                7 + byte_count as usize
            }
            Self::Raw(data) => 2 + data.len(),
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::None => "none",
            Self::One => "one word",
            Self::Two => "two words",
            Self::Three => "three words",
            Self::Words => "word array",
            Self::Bytes => "byte array",
            Self::Raw => "preformatted",
        };
        f.write_str(name)
    }
}
