// SPDX-FileCopyrightText: Copyright (c) 2018-2025 slowtec GmbH <post@slowtec.de>
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Modbus RTU

use super::*;
use byteorder::{ByteOrder, LittleEndian};
use core::fmt;

mod request;
mod response;

pub use self::{request::*, response::*};
pub use crate::frame::{CRC_LEN, MAX_FRAME_LEN, MAX_PAYLOAD_LEN};

// CRC-16/MODBUS lookup tables (polynomial 0xA001, reflected).
// Index with `lo ^ byte`: the high table feeds the new low byte,
// the low table yields the new high byte.
#[rustfmt::skip]
const CRC_HI_TABLE: [u8; 256] = [
    0x00, 0xC1, 0x81, 0x40, 0x01, 0xC0, 0x80, 0x41, 0x01, 0xC0, 0x80, 0x41, 0x00, 0xC1, 0x81, 0x40,
    0x01, 0xC0, 0x80, 0x41, 0x00, 0xC1, 0x81, 0x40, 0x00, 0xC1, 0x81, 0x40, 0x01, 0xC0, 0x80, 0x41,
    0x01, 0xC0, 0x80, 0x41, 0x00, 0xC1, 0x81, 0x40, 0x00, 0xC1, 0x81, 0x40, 0x01, 0xC0, 0x80, 0x41,
    0x00, 0xC1, 0x81, 0x40, 0x01, 0xC0, 0x80, 0x41, 0x01, 0xC0, 0x80, 0x41, 0x00, 0xC1, 0x81, 0x40,
    0x01, 0xC0, 0x80, 0x41, 0x00, 0xC1, 0x81, 0x40, 0x00, 0xC1, 0x81, 0x40, 0x01, 0xC0, 0x80, 0x41,
    0x00, 0xC1, 0x81, 0x40, 0x01, 0xC0, 0x80, 0x41, 0x01, 0xC0, 0x80, 0x41, 0x00, 0xC1, 0x81, 0x40,
    0x00, 0xC1, 0x81, 0x40, 0x01, 0xC0, 0x80, 0x41, 0x01, 0xC0, 0x80, 0x41, 0x00, 0xC1, 0x81, 0x40,
    0x01, 0xC0, 0x80, 0x41, 0x00, 0xC1, 0x81, 0x40, 0x00, 0xC1, 0x81, 0x40, 0x01, 0xC0, 0x80, 0x41,
    0x01, 0xC0, 0x80, 0x41, 0x00, 0xC1, 0x81, 0x40, 0x00, 0xC1, 0x81, 0x40, 0x01, 0xC0, 0x80, 0x41,
    0x00, 0xC1, 0x81, 0x40, 0x01, 0xC0, 0x80, 0x41, 0x01, 0xC0, 0x80, 0x41, 0x00, 0xC1, 0x81, 0x40,
    0x00, 0xC1, 0x81, 0x40, 0x01, 0xC0, 0x80, 0x41, 0x01, 0xC0, 0x80, 0x41, 0x00, 0xC1, 0x81, 0x40,
    0x01, 0xC0, 0x80, 0x41, 0x00, 0xC1, 0x81, 0x40, 0x00, 0xC1, 0x81, 0x40, 0x01, 0xC0, 0x80, 0x41,
    0x00, 0xC1, 0x81, 0x40, 0x01, 0xC0, 0x80, 0x41, 0x01, 0xC0, 0x80, 0x41, 0x00, 0xC1, 0x81, 0x40,
    0x01, 0xC0, 0x80, 0x41, 0x00, 0xC1, 0x81, 0x40, 0x00, 0xC1, 0x81, 0x40, 0x01, 0xC0, 0x80, 0x41,
    0x01, 0xC0, 0x80, 0x41, 0x00, 0xC1, 0x81, 0x40, 0x00, 0xC1, 0x81, 0x40, 0x01, 0xC0, 0x80, 0x41,
    0x00, 0xC1, 0x81, 0x40, 0x01, 0xC0, 0x80, 0x41, 0x01, 0xC0, 0x80, 0x41, 0x00, 0xC1, 0x81, 0x40,
];

#[rustfmt::skip]
const CRC_LO_TABLE: [u8; 256] = [
    0x00, 0xC0, 0xC1, 0x01, 0xC3, 0x03, 0x02, 0xC2, 0xC6, 0x06, 0x07, 0xC7, 0x05, 0xC5, 0xC4, 0x04,
    0xCC, 0x0C, 0x0D, 0xCD, 0x0F, 0xCF, 0xCE, 0x0E, 0x0A, 0xCA, 0xCB, 0x0B, 0xC9, 0x09, 0x08, 0xC8,
    0xD8, 0x18, 0x19, 0xD9, 0x1B, 0xDB, 0xDA, 0x1A, 0x1E, 0xDE, 0xDF, 0x1F, 0xDD, 0x1D, 0x1C, 0xDC,
    0x14, 0xD4, 0xD5, 0x15, 0xD7, 0x17, 0x16, 0xD6, 0xD2, 0x12, 0x13, 0xD3, 0x11, 0xD1, 0xD0, 0x10,
    0xF0, 0x30, 0x31, 0xF1, 0x33, 0xF3, 0xF2, 0x32, 0x36, 0xF6, 0xF7, 0x37, 0xF5, 0x35, 0x34, 0xF4,
    0x3C, 0xFC, 0xFD, 0x3D, 0xFF, 0x3F, 0x3E, 0xFE, 0xFA, 0x3A, 0x3B, 0xFB, 0x39, 0xF9, 0xF8, 0x38,
    0x28, 0xE8, 0xE9, 0x29, 0xEB, 0x2B, 0x2A, 0xEA, 0xEE, 0x2E, 0x2F, 0xEF, 0x2D, 0xED, 0xEC, 0x2C,
    0xE4, 0x24, 0x25, 0xE5, 0x27, 0xE7, 0xE6, 0x26, 0x22, 0xE2, 0xE3, 0x23, 0xE1, 0x21, 0x20, 0xE0,
    0xA0, 0x60, 0x61, 0xA1, 0x63, 0xA3, 0xA2, 0x62, 0x66, 0xA6, 0xA7, 0x67, 0xA5, 0x65, 0x64, 0xA4,
    0x6C, 0xAC, 0xAD, 0x6D, 0xAF, 0x6F, 0x6E, 0xAE, 0xAA, 0x6A, 0x6B, 0xAB, 0x69, 0xA9, 0xA8, 0x68,
    0x78, 0xB8, 0xB9, 0x79, 0xBB, 0x7B, 0x7A, 0xBA, 0xBE, 0x7E, 0x7F, 0xBF, 0x7D, 0xBD, 0xBC, 0x7C,
    0xB4, 0x74, 0x75, 0xB5, 0x77, 0xB7, 0xB6, 0x76, 0x72, 0xB2, 0xB3, 0x73, 0xB1, 0x71, 0x70, 0xB0,
    0x50, 0x90, 0x91, 0x51, 0x93, 0x53, 0x52, 0x92, 0x96, 0x56, 0x57, 0x97, 0x55, 0x95, 0x94, 0x54,
    0x9C, 0x5C, 0x5D, 0x9D, 0x5F, 0x9F, 0x9E, 0x5E, 0x5A, 0x9A, 0x9B, 0x5B, 0x99, 0x59, 0x58, 0x98,
    0x88, 0x48, 0x49, 0x89, 0x4B, 0x8B, 0x8A, 0x4A, 0x4E, 0x8E, 0x8F, 0x4F, 0x8D, 0x4D, 0x4C, 0x8C,
    0x44, 0x84, 0x85, 0x45, 0x87, 0x47, 0x46, 0x86, 0x82, 0x42, 0x43, 0x83, 0x41, 0x81, 0x80, 0x40,
];

/// Calculate the CRC (Cyclic Redundancy Check) sum.
///
/// The result is the numeric CRC value, e.g. `0xCDC5`. On the wire the
/// low byte is sent first.
#[must_use]
pub fn crc16(data: &[u8]) -> u16 {
    let mut hi: u8 = 0xFF;
    let mut lo: u8 = 0xFF;
    for x in data {
        let idx = usize::from(lo ^ *x);
        lo = hi ^ CRC_HI_TABLE[idx];
        hi = CRC_LO_TABLE[idx];
    }
    u16::from(hi) << 8 | u16::from(lo)
}

/// Write `crc` in wire order (low byte first) to the start of `buf`.
pub fn write_crc(crc: u16, buf: &mut [u8]) -> Result<()> {
    if buf.len() < CRC_LEN {
        return Err(Error::BufferSize);
    }
    LittleEndian::write_u16(&mut buf[..CRC_LEN], crc);
    Ok(())
}

/// Split a complete wire frame into its payload and the trailing CRC.
///
/// The CRC is not verified here.
pub fn split_crc(adu: &[u8]) -> Result<(&[u8], u16)> {
    if adu.len() <= CRC_LEN {
        return Err(Error::BufferSize);
    }
    let (payload, crc_buf) = adu.split_at(adu.len() - CRC_LEN);
    Ok((payload, LittleEndian::read_u16(crc_buf)))
}

/// Printable form of a frame: label, CRC and bytes in hex.
#[derive(Debug, Clone, Copy)]
pub struct Dump<'a> {
    label: &'a str,
    crc: u16,
    data: &'a [u8],
}

impl<'a> Dump<'a> {
    #[must_use]
    pub const fn new(label: &'a str, crc: u16, data: &'a [u8]) -> Self {
        Self { label, crc, data }
    }
}

impl fmt::Display for Dump<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} CRC:{:0>4X}", self.label, self.crc)?;
        write!(f, "\nData ({} bytes):", self.data.len())?;
        for b in self.data {
            write!(f, " {b:0>2X}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Bitwise reference implementation (polynomial 0xA001).
    fn crc16_bitwise(data: &[u8]) -> u16 {
        let mut crc = 0xFFFF;
        for x in data {
            crc ^= u16::from(*x);
            for _ in 0..8 {
                #[allow(clippy::branches_sharing_code)]
                if (crc & 0x0001) != 0 {
                    crc >>= 1;
                    crc ^= 0xA001;
                } else {
                    crc >>= 1;
                }
            }
        }
        crc
    }

    #[test]
    fn test_calc_crc16() {
        let msg = &[0x01, 0x03, 0x00, 0x00, 0x00, 0x0A];
        assert_eq!(crc16(msg), 0xCDC5);

        let msg = &[0x01, 0x03, 0x08, 0x2B, 0x00, 0x02];
        assert_eq!(crc16(msg), 0x63B6);

        let msg = &[0x12, 0x06, 0x22, 0x22, 0xAB, 0xCD];
        assert_eq!(crc16(msg), 0xBE9F);

        let msg = &[0x11, 0x06, 0x00, 0x01, 0x00, 0x03];
        assert_eq!(crc16(msg), 0x9B9A);
    }

    #[test]
    fn write_single_register_crc_on_the_wire() {
        let msg = &[0x11, 0x06, 0x00, 0x01, 0x00, 0x03];
        let crc = crc16(msg);
        assert_eq!(crc, crc16_bitwise(msg));
        let buf = &mut [0; 2];
        write_crc(crc, buf).unwrap();
        assert_eq!(buf, &[0x9A, 0x9B]);
    }

    #[test]
    fn crc16_of_empty_input() {
        assert_eq!(crc16(&[]), 0xFFFF);
    }

    #[test]
    fn crc16_is_order_dependent() {
        assert_ne!(crc16(&[0x01, 0x02]), crc16(&[0x02, 0x01]));
    }

    #[test]
    fn tables_match_the_polynomial() {
        for i in 0..=u8::MAX {
            assert_eq!(crc16(&[i]), crc16_bitwise(&[i]), "byte 0x{i:02X}");
            assert_eq!(
                crc16(&[i, !i, 0x5A]),
                crc16_bitwise(&[i, !i, 0x5A]),
                "byte 0x{i:02X}"
            );
        }
    }

    #[test]
    fn write_crc_low_byte_first() {
        let buf = &mut [0; 3];
        write_crc(0xCDC5, buf).unwrap();
        assert_eq!(buf, &[0xC5, 0xCD, 0x00]);
        assert_eq!(write_crc(0xCDC5, &mut [0]).err().unwrap(), Error::BufferSize);
    }

    #[test]
    fn split_trailing_crc() {
        let adu = &[0x01, 0x03, 0x00, 0x00, 0x00, 0x0A, 0xC5, 0xCD];
        let (payload, crc) = split_crc(adu).unwrap();
        assert_eq!(payload, &[0x01, 0x03, 0x00, 0x00, 0x00, 0x0A]);
        assert_eq!(crc, 0xCDC5);
        assert_eq!(crc16(payload), crc);

        assert!(split_crc(&[0x01, 0xC5, 0xCD]).is_ok());
        assert_eq!(split_crc(&[0xC5, 0xCD]).err().unwrap(), Error::BufferSize);
        assert_eq!(split_crc(&[]).err().unwrap(), Error::BufferSize);
    }
}
