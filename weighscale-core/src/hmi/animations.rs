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


use crate::hmi::segments::{Frame, BLANK, SEG_A, SEG_B, SEG_C, SEG_D, SEG_E, SEG_F};

const ZERO: u8 = 0x3F;

/// A single segment running once around the outside of the display
pub const INTRO_SPIN: [Frame; 12] = [
    [SEG_A, BLANK, BLANK, BLANK],
    [BLANK, SEG_A, BLANK, BLANK],
    [BLANK, BLANK, SEG_A, BLANK],
    [BLANK, BLANK, BLANK, SEG_A],
    [BLANK, BLANK, BLANK, SEG_B],
    [BLANK, BLANK, BLANK, SEG_C],
    [BLANK, BLANK, BLANK, SEG_D],
    [BLANK, BLANK, SEG_D, BLANK],
    [BLANK, SEG_D, BLANK, BLANK],
    [SEG_D, BLANK, BLANK, BLANK],
    [SEG_E, BLANK, BLANK, BLANK],
    [SEG_F, BLANK, BLANK, BLANK],
];

/// Tare confirmation, the zero reading blinks three times
pub const FLASH_ZERO: [Frame; 6] = [
    [BLANK, BLANK, BLANK, ZERO],
    [BLANK; 4],
    [BLANK, BLANK, BLANK, ZERO],
    [BLANK; 4],
    [BLANK, BLANK, BLANK, ZERO],
    [BLANK; 4],
];
