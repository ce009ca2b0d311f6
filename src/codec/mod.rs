// SPDX-FileCopyrightText: Copyright (c) 2018-2025 slowtec GmbH <post@slowtec.de>
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{error::*, frame::*, util::*};

mod check;
pub mod rtu;

pub use self::check::*;

type Result<T> = core::result::Result<T, Error>;
