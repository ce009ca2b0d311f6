// SPDX-FileCopyrightText: Copyright (c) 2018-2025 slowtec GmbH <post@slowtec.de>
// SPDX-License-Identifier: MIT OR Apache-2.0

use core::fmt;

/// modbus-rtu-frame Error
#[cfg_attr(all(feature = "defmt", target_os = "none"), derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Invalid or reserved server address
    ServerId(u8),
    /// Invalid function code
    FnCode(u8),
    /// The function code does not take the given parameter shape
    ParameterCount(u8),
    /// A parameter is out of its permitted range
    ParameterLimit(u16),
    /// Invalid byte count
    ByteCount(u8),
    /// Invalid coil value
    CoilValue(u16),
    /// Invalid buffer size
    BufferSize,
    /// Invalid CRC
    Crc(u16, u16),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use Error::*;

        match self {
            ServerId(id) => write!(f, "Invalid server address: {id}"),
            FnCode(fn_code) => write!(f, "Invalid function code: 0x{fn_code:0>2X}"),
            ParameterCount(fn_code) => write!(
                f,
                "Invalid parameter count for function code: 0x{fn_code:0>2X}"
            ),
            ParameterLimit(v) => write!(f, "Parameter out of range: {v}"),
            ByteCount(cnt) => write!(f, "Invalid byte count: {cnt}"),
            CoilValue(v) => write!(f, "Invalid coil value: 0x{v:0>4X}"),
            BufferSize => write!(f, "Invalid buffer size"),
            Crc(expected, actual) => write!(
                f,
                "Invalid CRC: expected = 0x{expected:0>4X}, actual = 0x{actual:0>4X}"
            ),
        }
    }
}

impl core::error::Error for Error {}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use std::string::ToString;

    #[test]
    fn display_error_messages() {
        assert_eq!(
            Error::FnCode(0x83).to_string(),
            "Invalid function code: 0x83"
        );
        assert_eq!(
            Error::Crc(0xCDC5, 0x1234).to_string(),
            "Invalid CRC: expected = 0xCDC5, actual = 0x1234"
        );
        assert_eq!(Error::ServerId(248).to_string(), "Invalid server address: 248");
        assert_eq!(Error::CoilValue(0x1234).to_string(), "Invalid coil value: 0x1234");
    }
}
