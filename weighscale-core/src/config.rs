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


use crate::weight::calibration::Calibration;

/// Raw reading with no load on the platform, taken when the scale was calibrated.
pub const CAL_OFFSET: i32 = 59_600;
/// Raw reading with the reference weight on the platform.
pub const CAL_VALUE: i32 = 249_800;
/// The reference weight, in display units (grams).
pub const KNOWN_VALUE: i32 = 482;

pub const DEFAULT_CALIBRATION: Calibration = Calibration::new(CAL_OFFSET, CAL_VALUE, KNOWN_VALUE);

/// Raw samples averaged for every displayed reading
pub const SAMPLE_COUNT: usize = 15;

/// TM1637 brightness, 0 to 7
pub const DISPLAY_BRIGHTNESS: u8 = 7;

pub const UPDATE_INTERVAL_MS: u32 = 100;
pub const NOT_READY_BACKOFF_MS: u32 = 500;
pub const TARE_MESSAGE_MS: u32 = 500;
pub const READY_MESSAGE_MS: u32 = 500;
pub const ANIMATION_FRAME_MS: u32 = 100;
pub const SCROLL_STEP_MS: u32 = 200;
pub const POWER_ON_FLASHES: usize = 3;
pub const POWER_ON_FLASH_MS: u32 = 250;

pub const INTRO_TEXT: &str = "SCALE";
pub const TARE_MESSAGE: &str = "TArE";
pub const READY_MESSAGE: &str = "rdY";
pub const NOT_READY_MESSAGE: &str = "Err";
pub const POWER_ON_MESSAGE: &str = "On";

/// Runtime view of the compile-time settings. The firmware builds one from [`Default`] and may
/// adjust fields (e.g. `diagnostics`) before handing it to the controller.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleConfig {
    pub calibration: Calibration,
    pub sample_count: usize,
    pub brightness: u8,
    pub update_interval_ms: u32,
    pub not_ready_backoff_ms: u32,
    pub tare_message_ms: u32,
    pub ready_message_ms: u32,
    pub animation_frame_ms: u32,
    pub power_on_flashes: usize,
    pub power_on_flash_ms: u32,
    /// Emit a report of raw reading, offset, ratio and weight every cycle
    pub diagnostics: bool,
}

impl Default for ScaleConfig {
    fn default() -> Self {
        Self {
            calibration: DEFAULT_CALIBRATION,
            sample_count: SAMPLE_COUNT,
            brightness: DISPLAY_BRIGHTNESS,
            update_interval_ms: UPDATE_INTERVAL_MS,
            not_ready_backoff_ms: NOT_READY_BACKOFF_MS,
            tare_message_ms: TARE_MESSAGE_MS,
            ready_message_ms: READY_MESSAGE_MS,
            animation_frame_ms: ANIMATION_FRAME_MS,
            power_on_flashes: POWER_ON_FLASHES,
            power_on_flash_ms: POWER_ON_FLASH_MS,
            diagnostics: false,
        }
    }
}
