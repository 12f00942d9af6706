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


//! Seven segment glyphs. Bit 0 is segment A through bit 6 for segment G, bit 7 is the
//! decimal point.

use heapless::Vec;

pub const DIGITS: usize = 4;

/// One full display worth of segment bytes, leftmost digit first
pub type Frame = [u8; DIGITS];

/// Longest text kept for scrolling, anything beyond is dropped
pub const MAX_TEXT_GLYPHS: usize = 32;

pub const SEG_A: u8 = 0b0000_0001;
pub const SEG_B: u8 = 0b0000_0010;
pub const SEG_C: u8 = 0b0000_0100;
pub const SEG_D: u8 = 0b0000_1000;
pub const SEG_E: u8 = 0b0001_0000;
pub const SEG_F: u8 = 0b0010_0000;
pub const SEG_G: u8 = 0b0100_0000;
pub const SEG_DP: u8 = 0b1000_0000;

pub const BLANK: u8 = 0;
pub const MINUS: u8 = SEG_G;

pub const BLANK_FRAME: Frame = [BLANK; DIGITS];
/// Shown for numbers that do not fit in four digits
pub const OVERFLOW_FRAME: Frame = [MINUS; DIGITS];

const MAX_DISPLAYABLE: i32 = 9_999;
const MIN_DISPLAYABLE: i32 = -999;

const DIGIT_GLYPHS: [u8; 10] = [
    0x3F, // 0
    0x06, // 1
    0x5B, // 2
    0x4F, // 3
    0x66, // 4
    0x6D, // 5
    0x7D, // 6
    0x07, // 7
    0x7F, // 8
    0x6F, // 9
];

pub fn encode_digit(digit: u8) -> u8 {
    DIGIT_GLYPHS[(digit % 10) as usize]
}

/// Closest seven segment shape for a character. Where upper and lower case differ on a real
/// display both are provided. Unknown characters are blank.
pub fn encode_char(c: char) -> u8 {
    match c {
        '0'..='9' => encode_digit(c as u8 - b'0'),
        'A' | 'a' => 0x77,
        'B' | 'b' => 0x7C,
        'C' => 0x39,
        'c' => 0x58,
        'D' | 'd' => 0x5E,
        'E' | 'e' => 0x79,
        'F' | 'f' => 0x71,
        'G' | 'g' => 0x3D,
        'H' => 0x76,
        'h' => 0x74,
        'I' => 0x30,
        'i' => 0x10,
        'J' | 'j' => 0x1E,
        'K' | 'k' => 0x75,
        'L' | 'l' => 0x38,
        'M' | 'm' => 0x37,
        'N' | 'n' => 0x54,
        'O' => 0x3F,
        'o' => 0x5C,
        'P' | 'p' => 0x73,
        'Q' | 'q' => 0x67,
        'R' | 'r' => 0x50,
        'S' | 's' => 0x6D,
        'T' | 't' => 0x78,
        'U' | 'V' => 0x3E,
        'u' | 'v' => 0x1C,
        'W' | 'w' => 0x2A,
        'X' | 'x' => 0x76,
        'Y' | 'y' => 0x6E,
        'Z' | 'z' => 0x5B,
        '-' => MINUS,
        '_' => SEG_D,
        '=' => SEG_G | SEG_D,
        '°' => 0x63,
        _ => BLANK,
    }
}

/// Right justified, minus sign hard against the first digit, no leading zeros.
pub fn encode_number(value: i32) -> Frame {
    if !(MIN_DISPLAYABLE..=MAX_DISPLAYABLE).contains(&value) {
        return OVERFLOW_FRAME;
    }

    let mut frame = BLANK_FRAME;
    let mut remaining = value.unsigned_abs();
    let mut position = DIGITS;
    loop {
        position -= 1;
        frame[position] = encode_digit((remaining % 10) as u8);
        remaining /= 10;
        if remaining == 0 {
            break;
        }
    }

    if value < 0 {
        frame[position - 1] = MINUS;
    }
    frame
}

/// Glyphs for a whole string. A `.` lights the decimal point of the glyph before it rather than
/// taking a digit of its own.
pub fn encode_text(text: &str) -> Vec<u8, MAX_TEXT_GLYPHS> {
    let mut glyphs = Vec::new();
    for c in text.chars() {
        if c == '.' {
            if let Some(last) = glyphs.last_mut() {
                *last |= SEG_DP;
                continue;
            }
        }
        let glyph = if c == '.' { SEG_DP } else { encode_char(c) };
        if glyphs.push(glyph).is_err() {
            break;
        }
    }
    glyphs
}

/// Four glyphs starting at `start`, left justified and padded with blanks.
pub fn window(glyphs: &[u8], start: usize) -> Frame {
    let mut frame = BLANK_FRAME;
    for (slot, glyph) in frame.iter_mut().zip(glyphs.iter().skip(start)) {
        *slot = *glyph;
    }
    frame
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_are_right_justified() {
        assert_eq!(encode_number(0), [BLANK, BLANK, BLANK, 0x3F]);
        assert_eq!(encode_number(506), [BLANK, 0x6D, 0x3F, 0x7D]);
        assert_eq!(encode_number(9_999), [0x6F; 4]);
    }

    #[test]
    fn negative_numbers_carry_sign() {
        assert_eq!(encode_number(-12), [BLANK, MINUS, 0x06, 0x5B]);
        assert_eq!(encode_number(-999), [MINUS, 0x6F, 0x6F, 0x6F]);
    }

    #[test]
    fn out_of_range_numbers_overflow() {
        assert_eq!(encode_number(10_000), OVERFLOW_FRAME);
        assert_eq!(encode_number(-1_000), OVERFLOW_FRAME);
        assert_eq!(encode_number(i32::MIN), OVERFLOW_FRAME);
    }

    #[test]
    fn status_messages() {
        assert_eq!(window(&encode_text("Err"), 0), [0x79, 0x50, 0x50, BLANK]);
        assert_eq!(window(&encode_text("On"), 0), [0x3F, 0x54, BLANK, BLANK]);
        assert_eq!(window(&encode_text("TArE"), 0), [0x78, 0x77, 0x50, 0x79]);
        assert_eq!(window(&encode_text("rdY"), 0), [0x50, 0x5E, 0x6E, BLANK]);
    }

    #[test]
    fn decimal_point_joins_previous_glyph() {
        let glyphs = encode_text("1.5");
        assert_eq!(glyphs.as_slice(), &[0x06 | SEG_DP, 0x6D]);
        assert_eq!(encode_text(".").as_slice(), &[SEG_DP]);
    }

    #[test]
    fn unknown_characters_are_blank() {
        assert_eq!(encode_char('!'), BLANK);
        assert_eq!(encode_char(' '), BLANK);
    }

    #[test]
    fn long_text_is_capped() {
        let text = "0123456789012345678901234567890123456789";
        assert_eq!(encode_text(text).len(), MAX_TEXT_GLYPHS);
    }

    #[test]
    fn window_pads_past_end() {
        let glyphs = encode_text("SCALE");
        assert_eq!(window(&glyphs, 1), [0x39, 0x77, 0x38, 0x79]);
        assert_eq!(window(&glyphs, 4), [0x79, BLANK, BLANK, BLANK]);
    }
}
