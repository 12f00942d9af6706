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


/// Two point calibration: a raw reading with no load, a raw reading with a known weight on the
/// platform, and that weight.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Calibration {
    cal_offset: i32,
    cal_value: i32,
    known_value: i32,
}

impl Calibration {
    pub const fn new(cal_offset: i32, cal_value: i32, known_value: i32) -> Self {
        Self {
            cal_offset,
            cal_value,
            known_value,
        }
    }

    /// False when the constants give a zero or unbounded ratio.
    pub const fn is_valid(&self) -> bool {
        self.known_value != 0 && self.cal_value != self.cal_offset
    }

    /// The raw no-load reading, used as the offset until the scale is first tared.
    pub const fn cal_offset(&self) -> i32 {
        self.cal_offset
    }

    /// Raw counts per display unit. Only for reporting, [`Calibration::transform`] does not
    /// round through it.
    pub fn ratio(&self) -> f32 {
        (self.cal_value as i64 - self.cal_offset as i64) as f32 / self.known_value as f32
    }

    /// `floor((raw - offset) / ratio)`, evaluated as
    /// `floor((raw - offset) * known_value / (cal_value - cal_offset))` so the result is exact.
    pub fn transform(&self, raw: i32, offset: i32) -> i32 {
        let mut numerator = (raw as i128 - offset as i128) * self.known_value as i128;
        let mut denominator = self.cal_value as i128 - self.cal_offset as i128;
        if denominator < 0 {
            numerator = -numerator;
            denominator = -denominator;
        }

        // a zero denominator is rejected at build time through is_valid()
        let weight = numerator.checked_div_euclid(denominator).unwrap_or(0);
        weight.clamp(i32::MIN as i128, i32::MAX as i128) as i32
    }
}
