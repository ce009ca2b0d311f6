// SPDX-FileCopyrightText: Copyright (c) 2018-2025 slowtec GmbH <post@slowtec.de>
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common helpers

use crate::error::Error;

/// A Coil represents a single bit.
///
/// - `true` is equivalent to `ON`, `1` and `0xFF00`.
/// - `false` is equivalent to `OFF`, `0` and `0x0000`.
pub type Coil = bool;

/// Turn a bool into a u16 coil value
#[must_use]
pub const fn bool_to_u16_coil(state: Coil) -> u16 {
    if state { 0xFF00 } else { 0x0000 }
}

/// Turn a u16 coil value into a boolean value.
pub const fn u16_coil_to_bool(coil: u16) -> Result<Coil, Error> {
    match coil {
        0xFF00 => Ok(true),
        0x0000 => Ok(false),
        _ => Err(Error::CoilValue(coil)),
    }
}

/// Calculate the number of bytes required for a given number of coils.
#[must_use]
pub const fn packed_coils_len(bitcount: usize) -> usize {
    bitcount.div_ceil(8)
}

///  Pack coils into a byte array, e.g. for the payload of
///  `WriteMultipleCoils`.
///
///  It returns the number of bytes used to pack the coils.
pub fn pack_coils(coils: &[Coil], bytes: &mut [u8]) -> Result<usize, Error> {
    let packed_size = packed_coils_len(coils.len());
    if bytes.len() < packed_size {
        return Err(Error::BufferSize);
    }
    bytes[..packed_size].fill(0);
    coils.iter().enumerate().for_each(|(i, b)| {
        bytes[i / 8] |= u8::from(*b) << (i % 8);
    });
    Ok(packed_size)
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn convert_bool_to_coil() {
        assert_eq!(bool_to_u16_coil(true), 0xFF00);
        assert_eq!(bool_to_u16_coil(false), 0x0000);
    }

    #[test]
    fn convert_coil_to_bool() {
        assert!(u16_coil_to_bool(0xFF00).unwrap());
        assert!(!u16_coil_to_bool(0x0000).unwrap());
        assert_eq!(
            u16_coil_to_bool(0x1234).err().unwrap(),
            Error::CoilValue(0x1234)
        );
    }

    #[test]
    fn packed_length() {
        assert_eq!(packed_coils_len(0), 0);
        assert_eq!(packed_coils_len(1), 1);
        assert_eq!(packed_coils_len(8), 1);
        assert_eq!(packed_coils_len(9), 2);
        assert_eq!(packed_coils_len(1968), 246);
    }

    #[test]
    fn pack_coils_into_byte_array() {
        assert_eq!(pack_coils(&[], &mut []).unwrap(), 0);
        assert_eq!(
            pack_coils(&[true; 2], &mut []).err().unwrap(),
            Error::BufferSize
        );

        let buff = &mut [0];
        assert_eq!(pack_coils(&[true, false], buff).unwrap(), 1);
        assert_eq!(buff, &[0b_01]);

        let buff = &mut [0];
        assert_eq!(pack_coils(&[false, true], buff).unwrap(), 1);
        assert_eq!(buff, &[0b_10]);

        // stale bits are cleared
        let buff = &mut [0xFF];
        assert_eq!(pack_coils(&[false; 8], buff).unwrap(), 1);
        assert_eq!(buff, &[0]);

        let buff = &mut [0, 0];
        assert_eq!(pack_coils(&[true; 9], buff).unwrap(), 2);
        assert_eq!(buff, &[0xff, 1]);

        // 10 coils: ON OFF ON ON OFF OFF ON ON, ON OFF
        let buff = &mut [0, 0];
        let coils = [
            true, false, true, true, false, false, true, true, true, false,
        ];
        assert_eq!(pack_coils(&coils, buff).unwrap(), 2);
        assert_eq!(buff, &[0xCD, 0x01]);
    }
}
