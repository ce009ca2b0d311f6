// SPDX-FileCopyrightText: Copyright (c) 2018-2025 slowtec GmbH <post@slowtec.de>
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Parameter checks that run before a request frame is packed.

use super::*;

/// Highest unicast server address, `248` - `255` are reserved.
pub const MAX_SERVER_ID: ServerId = 247;

// Quantity limits of the MODBUS Application Protocol Specification V1.1b3.
const MAX_READ_COILS: Quantity = 2000;
const MAX_READ_REGISTERS: Quantity = 125;
const MAX_WRITE_COILS: Quantity = 1968;
const MAX_WRITE_REGISTERS: Quantity = 123;

/// Decides whether a request may be built from the given parameters.
///
/// Implementations must be pure: the same arguments always lead to the
/// same result.
pub trait Validate {
    fn validate(&self, server: ServerId, fn_code: FunctionCode, params: &Params<'_>)
    -> Result<()>;
}

/// The standard checks for server address, function code and parameter
/// ranges.
#[cfg_attr(all(feature = "defmt", target_os = "none"), derive(defmt::Format))]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Checks {
    allow_broadcast: bool,
}

impl Checks {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            allow_broadcast: false,
        }
    }

    /// Accept the broadcast address `0`.
    #[must_use]
    pub const fn allow_broadcast(mut self, allow: bool) -> Self {
        self.allow_broadcast = allow;
        self
    }

    #[must_use]
    pub const fn broadcast_allowed(&self) -> bool {
        self.allow_broadcast
    }

    const fn check_server(&self, server: ServerId) -> Result<()> {
        match server {
            0 if self.allow_broadcast => Ok(()),
            1..=MAX_SERVER_ID => Ok(()),
            _ => Err(Error::ServerId(server)),
        }
    }
}

impl Validate for Checks {
    fn validate(
        &self,
        server: ServerId,
        fn_code: FunctionCode,
        params: &Params<'_>,
    ) -> Result<()> {
        self.check_server(server)?;
        check_fn_code(fn_code)?;
        check_shape(fn_code, params.shape())?;
        check_payload(params)?;
        check_values(fn_code, params)?;
        check_frame_len(params)
    }
}

/// Only makes sure the payload matches its byte count and the request
/// fits into an RTU frame.
#[cfg_attr(all(feature = "defmt", target_os = "none"), derive(defmt::Format))]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoChecks;

impl Validate for NoChecks {
    fn validate(&self, _: ServerId, _: FunctionCode, params: &Params<'_>) -> Result<()> {
        check_payload(params)?;
        check_frame_len(params)
    }
}

const fn check_fn_code(fn_code: FunctionCode) -> Result<()> {
    match fn_code.value() {
        0x01..=0x7F => Ok(()),
        code => Err(Error::FnCode(code)),
    }
}

/// The shape a standard function code is packed with,
/// `None` if any shape is accepted.
const fn expected_shape(fn_code: FunctionCode) -> Option<Shape> {
    use FunctionCode as f;

    let shape = match fn_code {
        f::ReadExceptionStatus | f::GetCommEventCounter | f::GetCommEventLog | f::ReportServerId => {
            Shape::None
        }
        f::ReadFifoQueue => Shape::One,
        f::ReadCoils
        | f::ReadDiscreteInputs
        | f::ReadHoldingRegisters
        | f::ReadInputRegisters
        | f::WriteSingleCoil
        | f::WriteSingleRegister
        | f::Diagnostics => Shape::Two,
        f::MaskWriteRegister => Shape::Three,
        f::WriteMultipleRegisters => Shape::Words,
        f::WriteMultipleCoils => Shape::Bytes,
        f::ReadFileRecord
        | f::WriteFileRecord
        | f::ReadWriteMultipleRegisters
        | f::EncapsulatedInterfaceTransport => Shape::Raw,
        f::Custom(_) => return None,
    };
    Some(shape)
}

fn check_shape(fn_code: FunctionCode, shape: Shape) -> Result<()> {
    // A preformatted payload is accepted for every function code.
    if shape == Shape::Raw {
        return Ok(());
    }
    match expected_shape(fn_code) {
        Some(expected) if expected != shape => Err(Error::ParameterCount(fn_code.value())),
        _ => Ok(()),
    }
}

fn check_values(fn_code: FunctionCode, params: &Params<'_>) -> Result<()> {
    use FunctionCode as f;

    match (fn_code, *params) {
        (f::ReadCoils | f::ReadDiscreteInputs, Params::Two(address, quantity)) => {
            check_quantity(address, quantity, MAX_READ_COILS)
        }
        (f::ReadHoldingRegisters | f::ReadInputRegisters, Params::Two(address, quantity)) => {
            check_quantity(address, quantity, MAX_READ_REGISTERS)
        }
        (f::WriteSingleCoil, Params::Two(_, value)) => u16_coil_to_bool(value).map(|_| ()),
        (f::WriteMultipleRegisters, Params::Words { p1, p2, byte_count, .. }) => {
            check_quantity(p1, p2, MAX_WRITE_REGISTERS)?;
            check_byte_count(byte_count, usize::from(p2) * 2)
        }
        (f::WriteMultipleCoils, Params::Bytes { p1, p2, byte_count, .. }) => {
            check_quantity(p1, p2, MAX_WRITE_COILS)?;
            check_byte_count(byte_count, packed_coils_len(usize::from(p2)))
        }
        _ => Ok(()),
    }
}

const fn check_byte_count(byte_count: u8, expected: usize) -> Result<()> {
    if byte_count as usize != expected {
        return Err(Error::ByteCount(byte_count));
    }
    Ok(())
}

/// The byte count of the variable length shapes must describe the
/// payload exactly.
const fn check_payload(params: &Params<'_>) -> Result<()> {
    match *params {
        Params::Words {
            byte_count, words, ..
        } if byte_count % 2 != 0 || words.len() * 2 != byte_count as usize => {
            Err(Error::ByteCount(byte_count))
        }
        Params::Bytes {
            byte_count, bytes, ..
        } if bytes.len() != byte_count as usize => Err(Error::ByteCount(byte_count)),
        _ => Ok(()),
    }
}

fn check_quantity(address: Address, quantity: Quantity, max: Quantity) -> Result<()> {
    if quantity == 0 || quantity > max {
        return Err(Error::ParameterLimit(quantity));
    }
    if u32::from(address) + u32::from(quantity) > 0x1_0000 {
        return Err(Error::ParameterLimit(quantity));
    }
    Ok(())
}

const fn check_frame_len(params: &Params<'_>) -> Result<()> {
    if params.frame_len() > MAX_PAYLOAD_LEN {
        return Err(Error::BufferSize);
    }
    Ok(())
}
