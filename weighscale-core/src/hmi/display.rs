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


use crate::config::SCROLL_STEP_MS;
use crate::hmi::segments::{encode_number, encode_text, window, Frame, BLANK_FRAME, DIGITS};

/// A four digit seven segment display.
///
/// Implementors supply the raw segment write, brightness and a way to wait; numbers, text and
/// animations are built on top of those.
pub trait SegmentDisplay {
    type Error;

    /// Replace the content of every digit.
    async fn write_segments(&mut self, frame: &Frame) -> Result<(), Self::Error>;

    /// Intensity from 0 (dimmest) to 7, higher values are clamped.
    async fn set_brightness(&mut self, level: u8) -> Result<(), Self::Error>;

    async fn pause(&mut self, ms: u32);

    /// Time each scroll position stays up. Scrolling speed belongs to the display, not to
    /// `ScaleConfig`; drivers override this to change it.
    fn scroll_step_ms(&self) -> u32 {
        SCROLL_STEP_MS
    }

    async fn clear(&mut self) -> Result<(), Self::Error> {
        self.write_segments(&BLANK_FRAME).await
    }

    /// Right justified value; outside -999..=9999 shows `----`.
    async fn show_number(&mut self, value: i32) -> Result<(), Self::Error> {
        self.write_segments(&encode_number(value)).await
    }

    /// Up to four glyphs are shown left justified. Longer text scrolls left one glyph per
    /// scroll step and stays on its last four glyphs.
    async fn show_string(&mut self, text: &str) -> Result<(), Self::Error> {
        let glyphs = encode_text(text);
        if glyphs.len() <= DIGITS {
            return self.write_segments(&window(&glyphs, 0)).await;
        }

        let step = self.scroll_step_ms();
        for start in 0..=glyphs.len() - DIGITS {
            if start > 0 {
                self.pause(step).await;
            }
            self.write_segments(&window(&glyphs, start)).await?;
        }
        Ok(())
    }

    /// Plays every frame once, blocking for `frames.len() * frame_duration_ms`. The last frame
    /// stays on the display.
    async fn show_animation(&mut self, frames: &[Frame], frame_duration_ms: u32) -> Result<(), Self::Error> {
        for frame in frames {
            self.write_segments(frame).await?;
            self.pause(frame_duration_ms).await;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hmi::segments::{encode_char, OVERFLOW_FRAME};
    use crate::test_support::RecordingDisplay;
    use embassy_futures::block_on;

    #[test]
    fn short_text_is_one_frame() {
        let mut display = RecordingDisplay::default();
        block_on(display.show_string("Err")).unwrap();
        assert_eq!(display.frames, vec![[0x79, 0x50, 0x50, 0x00]]);
        assert_eq!(display.paused_ms, 0);
    }

    #[test]
    fn long_text_scrolls() {
        let mut display = RecordingDisplay::default();
        block_on(display.show_string("SCALE")).unwrap();

        let s = encode_char('S');
        let c = encode_char('C');
        let a = encode_char('A');
        let l = encode_char('L');
        let e = encode_char('E');
        assert_eq!(display.frames, vec![[s, c, a, l], [c, a, l, e]]);
        assert_eq!(display.paused_ms, SCROLL_STEP_MS);
    }

    #[test]
    fn scroll_speed_follows_driver() {
        let mut display = RecordingDisplay {
            scroll_step: Some(50),
            ..Default::default()
        };
        block_on(display.show_string("rEAdY")).unwrap();
        assert_eq!(display.frames.len(), 2);
        assert_eq!(display.paused_ms, 50);
    }

    #[test]
    fn animation_blocks_for_every_frame() {
        let mut display = RecordingDisplay::default();
        let frames = [[0x01; 4], [0x02; 4], [0x04; 4]];
        block_on(display.show_animation(&frames, 120)).unwrap();
        assert_eq!(display.frames, frames.to_vec());
        assert_eq!(display.paused_ms, 360);
    }

    #[test]
    fn clear_and_numbers() {
        let mut display = RecordingDisplay::default();
        block_on(display.show_number(123_456)).unwrap();
        block_on(display.clear()).unwrap();
        assert_eq!(display.frames, vec![OVERFLOW_FRAME, BLANK_FRAME]);
    }
}
