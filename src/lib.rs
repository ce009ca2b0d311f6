// SPDX-FileCopyrightText: Copyright (c) 2018-2025 slowtec GmbH <post@slowtec.de>
// SPDX-License-Identifier: MIT OR Apache-2.0

#![doc = include_str!("../README.md")]
#![no_std]

mod codec;
mod error;
mod frame;
mod util;

pub use codec::rtu;
pub use codec::{Checks, MAX_SERVER_ID, NoChecks, Validate};
pub use error::*;
pub use frame::*;
pub use util::*;
