// SPDX-FileCopyrightText: Copyright (c) 2018-2025 slowtec GmbH <post@slowtec.de>
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Modbus RTU client (master) request frames.

use super::*;

/// An RTU request: the packed frame, its CRC and a correlation token.
///
/// The CRC is kept apart from the frame bytes and covers exactly the
/// bytes of [`RtuRequest::as_bytes`].
#[cfg_attr(all(feature = "defmt", target_os = "none"), derive(defmt::Format))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RtuRequest {
    frame: Frame,
    crc: u16,
    token: Token,
}

impl RtuRequest {
    /// Build a request after running the standard [`Checks`].
    pub fn new(
        server: ServerId,
        fn_code: impl Into<FunctionCode>,
        params: Params<'_>,
        token: Token,
    ) -> Result<Self> {
        Self::with_checks(&Checks::new(), server, fn_code, params, token)
    }

    /// Build a request after running `checks`.
    ///
    /// If `checks` reports an error it is returned unchanged and
    /// no frame is created.
    pub fn with_checks<V>(
        checks: &V,
        server: ServerId,
        fn_code: impl Into<FunctionCode>,
        params: Params<'_>,
        token: Token,
    ) -> Result<Self>
    where
        V: Validate + ?Sized,
    {
        let fn_code = fn_code.into();
        if let Err(err) = checks.validate(server, fn_code, &params) {
            #[cfg(feature = "log")]
            log::debug!(
                "Rejected request (server = {server}, function code = 0x{:0>2X}, params = {}): {err}",
                fn_code.value(),
                params.shape()
            );
            return Err(err);
        }
        let frame = pack(server, fn_code, &params)?;
        let crc = crc16(frame.as_bytes());
        #[cfg(feature = "log")]
        log::trace!(
            "Built request (token = {token}): {:02X?} CRC:{crc:0>4X}",
            frame.as_bytes()
        );
        Ok(Self { frame, crc, token })
    }

    #[must_use]
    pub fn server(&self) -> ServerId {
        self.frame.as_bytes()[0]
    }

    #[must_use]
    pub fn function_code(&self) -> FunctionCode {
        FunctionCode::new(self.frame.as_bytes()[1])
    }

    #[must_use]
    pub const fn frame(&self) -> &Frame {
        &self.frame
    }

    /// The packed bytes without the CRC.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        self.frame.as_bytes()
    }

    #[must_use]
    pub const fn crc(&self) -> u16 {
        self.crc
    }

    #[must_use]
    pub const fn token(&self) -> Token {
        self.token
    }

    /// Number of bytes on the wire, including the CRC.
    #[must_use]
    pub fn adu_len(&self) -> usize {
        self.frame.len() + CRC_LEN
    }

    /// Write the wire frame (packed bytes followed by the CRC, low byte
    /// first) into `buf`.
    pub fn encode(&self, buf: &mut [u8]) -> Result<usize> {
        let len = self.frame.len();
        if buf.len() < len + CRC_LEN {
            return Err(Error::BufferSize);
        }
        buf[..len].copy_from_slice(self.frame.as_bytes());
        write_crc(self.crc, &mut buf[len..])?;
        Ok(len + CRC_LEN)
    }

    /// Human readable dump of the CRC and the packed bytes.
    #[must_use]
    pub fn dump<'a>(&'a self, label: &'a str) -> Dump<'a> {
        Dump::new(label, self.crc, self.frame.as_bytes())
    }
}

/// Pack the server address, the function code and the parameters in
/// wire order.
fn pack(server: ServerId, fn_code: FunctionCode, params: &Params<'_>) -> Result<Frame> {
    let mut frame = Frame::with_capacity(params.frame_len())?;
    frame.add_u8(server)?;
    frame.add_u8(fn_code.value())?;
    match *params {
        Params::None => {}
        Params::One(p1) => {
            frame.add_u16(p1)?;
        }
        Params::Two(p1, p2) => {
            frame.add_u16(p1)?;
            frame.add_u16(p2)?;
        }
        Params::Three(p1, p2, p3) => {
            frame.add_u16(p1)?;
            frame.add_u16(p2)?;
            frame.add_u16(p3)?;
        }
        Params::Words {
            p1,
            p2,
            byte_count,
            words,
        } => {
            frame.add_u16(p1)?;
            frame.add_u16(p2)?;
            frame.add_u8(byte_count)?;
            // `byte_count` counts bytes, not words
            let words = words
                .get(..usize::from(byte_count / 2))
                .ok_or(Error::ByteCount(byte_count))?;
            frame.add_words(words)?;
        }
        Params::Bytes {
            p1,
            p2,
            byte_count,
            bytes,
        } => {
            frame.add_u16(p1)?;
            frame.add_u16(p2)?;
            frame.add_u8(byte_count)?;
            let bytes = bytes
                .get(..usize::from(byte_count))
                .ok_or(Error::ByteCount(byte_count))?;
            frame.add_bytes(bytes)?;
        }
        Params::Raw(data) => {
            frame.add_bytes(data)?;
        }
    }
    if !frame.is_complete() {
        return Err(Error::BufferSize);
    }
    Ok(frame)
}
