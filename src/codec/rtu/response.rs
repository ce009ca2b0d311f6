// SPDX-FileCopyrightText: Copyright (c) 2018-2025 slowtec GmbH <post@slowtec.de>
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Modbus RTU responses received by the client (master).

use super::*;

/// A received RTU response.
///
/// The transport strips the trailing CRC off the wire frame and hands
/// over the remaining bytes as payload together with the CRC value.
#[cfg_attr(all(feature = "defmt", target_os = "none"), derive(defmt::Format))]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RtuResponse {
    frame: Frame,
    crc: u16,
}

impl RtuResponse {
    /// Create a response from payload bytes that no longer contain the CRC.
    pub fn new(payload: &[u8]) -> Result<Self> {
        Ok(Self {
            frame: Frame::from_bytes(payload)?,
            crc: 0,
        })
    }

    /// Create a response from a complete wire frame.
    ///
    /// The trailing two bytes are taken as CRC (low byte first).
    /// The CRC is not verified here, see [`RtuResponse::is_valid_crc`].
    pub fn from_adu(adu: &[u8]) -> Result<Self> {
        let (payload, crc) = split_crc(adu)?;
        let mut rsp = Self::new(payload)?;
        rsp.set_crc(crc);
        Ok(rsp)
    }

    /// Set the CRC that was extracted from the received frame.
    pub fn set_crc(&mut self, crc: u16) {
        self.crc = crc;
    }

    #[must_use]
    pub const fn crc(&self) -> u16 {
        self.crc
    }

    #[must_use]
    pub fn payload(&self) -> &[u8] {
        self.frame.as_bytes()
    }

    #[must_use]
    pub const fn frame(&self) -> &Frame {
        &self.frame
    }

    #[must_use]
    pub fn server(&self) -> Option<ServerId> {
        self.payload().first().copied()
    }

    #[must_use]
    pub fn function_code(&self) -> Option<FunctionCode> {
        self.payload().get(1).copied().map(FunctionCode::new)
    }

    /// Returns `true` if the payload is not empty and its CRC matches
    /// the stored one.
    #[must_use]
    pub fn is_valid_crc(&self) -> bool {
        !self.frame.is_empty() && crc16(self.frame.as_bytes()) == self.crc
    }

    /// Like [`RtuResponse::is_valid_crc`] but reports the mismatch.
    pub fn check_crc(&self) -> Result<()> {
        if self.frame.is_empty() {
            return Err(Error::BufferSize);
        }
        let actual = crc16(self.frame.as_bytes());
        if actual != self.crc {
            #[cfg(feature = "log")]
            log::warn!(
                "CRC mismatch in response {:02X?}: expected = 0x{:0>4X}, actual = 0x{actual:0>4X}",
                self.frame.as_bytes(),
                self.crc
            );
            return Err(Error::Crc(self.crc, actual));
        }
        Ok(())
    }

    /// Human readable dump of the CRC and the payload.
    #[must_use]
    pub fn dump<'a>(&'a self, label: &'a str) -> Dump<'a> {
        Dump::new(label, self.crc, self.frame.as_bytes())
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use std::string::ToString;

    #[test]
    fn valid_read_holding_registers_response() {
        let mut rsp = RtuResponse::new(&[
            0x01, // server address
            0x03, // function code
            0x04, // byte count
            0x89, //
            0x02, //
            0x42, //
            0xC7, //
        ])
        .unwrap();
        assert!(!rsp.is_valid_crc());
        rsp.set_crc(0x9D00);
        assert!(rsp.is_valid_crc());
        assert!(rsp.check_crc().is_ok());
        assert_eq!(rsp.server(), Some(0x01));
        assert_eq!(rsp.function_code(), Some(FunctionCode::ReadHoldingRegisters));
    }

    #[test]
    fn crc_mismatch() {
        let mut rsp = RtuResponse::new(&[0x12, 0x06, 0x22, 0x22, 0xAB, 0xCD]).unwrap();
        rsp.set_crc(0xBE5F);
        assert!(!rsp.is_valid_crc());
        assert_eq!(rsp.check_crc().err().unwrap(), Error::Crc(0xBE5F, 0xBE9F));
        rsp.set_crc(0xBE9F);
        assert!(rsp.is_valid_crc());
    }

    #[test]
    fn empty_payload_is_never_valid() {
        let mut rsp = RtuResponse::default();
        assert!(!rsp.is_valid_crc());
        // CRC of no bytes at all
        rsp.set_crc(0xFFFF);
        assert!(!rsp.is_valid_crc());
        assert_eq!(rsp.check_crc().err().unwrap(), Error::BufferSize);

        let mut rsp = RtuResponse::new(&[]).unwrap();
        rsp.set_crc(0xFFFF);
        assert!(!rsp.is_valid_crc());
        assert_eq!(rsp.server(), None);
        assert_eq!(rsp.function_code(), None);
    }

    #[test]
    fn response_from_wire_frame() {
        let adu = &[0x12, 0x06, 0x22, 0x22, 0xAB, 0xCD, 0x9F, 0xBE];
        let rsp = RtuResponse::from_adu(adu).unwrap();
        assert_eq!(rsp.payload(), &[0x12, 0x06, 0x22, 0x22, 0xAB, 0xCD]);
        assert_eq!(rsp.crc(), 0xBE9F);
        assert!(rsp.is_valid_crc());

        // bad CRC is kept, not rejected
        let adu = &[0x12, 0x06, 0x22, 0x22, 0xAB, 0xCD, 0x5F, 0xBE];
        let rsp = RtuResponse::from_adu(adu).unwrap();
        assert!(!rsp.is_valid_crc());

        assert_eq!(
            RtuResponse::from_adu(&[0x9F, 0xBE]).err().unwrap(),
            Error::BufferSize
        );
        assert_eq!(
            RtuResponse::from_adu(&[0; MAX_FRAME_LEN + 1]).err().unwrap(),
            Error::BufferSize
        );
    }

    #[test]
    fn request_bytes_validate_as_response() {
        let req = RtuRequest::new(0x11, 0x06, Params::Two(0x0001, 0x0003), 0).unwrap();
        let mut rsp = RtuResponse::new(req.as_bytes()).unwrap();
        rsp.set_crc(req.crc());
        assert!(rsp.is_valid_crc());

        let buf = &mut [0; MAX_FRAME_LEN];
        let len = req.encode(buf).unwrap();
        assert!(RtuResponse::from_adu(&buf[..len]).unwrap().is_valid_crc());
    }

    #[test]
    fn dump_response() {
        let mut rsp = RtuResponse::new(&[0x01, 0x07, 0x6D]).unwrap();
        rsp.set_crc(0x1234);
        assert_eq!(
            rsp.dump("Response").to_string(),
            "Response CRC:1234\nData (3 bytes): 01 07 6D"
        );
    }
}
