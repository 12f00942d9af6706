// Copyright (C) 2025 Paul Hampson
//
// This program is free software: you can redistribute it and/or modify it under
// the terms of the GNU General Public License version 3 as  published by the
// Free Software Foundation.
//
// This program is distributed in the hope that it will be useful, but WITHOUT
// ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS
// FOR A PARTICULAR PURPOSE.  See the GNU General Public License for more
// details.
//
// You should have received a copy of the GNU General Public License along with
// this program.  If not, see <https://www.gnu.org/licenses/>.


//! Platform independent logic for the weighscale firmware.
//!
//! Everything here is generic over the `embedded-hal` traits so it runs on the RP2040 and in
//! host tests alike:
//!
//! - [`weight`]: HX711 driver, averaged sensor reads and the calibration transform
//! - [`storage`]: tare offset persistence on NOR flash
//! - [`hmi`]: TM1637 seven segment display, glyphs, animations and the tare button
//! - [`application`]: the start-up sequence and the polling control loop
//!
//! Run the tests on the host with `cargo test -p weighscale-core`.

#![cfg_attr(not(test), no_std)]

mod fmt;

pub mod application;
pub mod config;
pub mod hmi;
pub mod storage;
pub mod weight;

#[cfg(test)]
pub(crate) mod test_support;
