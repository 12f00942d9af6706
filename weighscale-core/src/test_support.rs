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


//! Test doubles for the peripherals the controller drives.

use crate::application::diagnostics::{DiagnosticReport, DiagnosticSink};
use crate::config::SCROLL_STEP_MS;
use crate::hmi::display::SegmentDisplay;
use crate::hmi::segments::Frame;
use crate::storage::OffsetStore;
use crate::weight::interface::AsyncStrainGaugeInterface;
use core::convert::Infallible;
use embedded_hal::digital::{ErrorType, InputPin, OutputPin};
use embedded_hal_async::delay::DelayNs;
use embedded_hal_async::digital::Wait;
use embedded_storage_async::nor_flash::{
    self, MultiwriteNorFlash, NorFlash, NorFlashErrorKind, ReadNorFlash,
};
use std::collections::VecDeque;

/// Returns immediately, keeping count of the time asked for
#[derive(Default)]
pub struct MockDelay {
    pub total_ns: u64,
}

impl MockDelay {
    pub fn total_ms(&self) -> u64 {
        self.total_ns / 1_000_000
    }
}

impl DelayNs for MockDelay {
    async fn delay_ns(&mut self, ns: u32) {
        self.total_ns += ns as u64;
    }
}

#[derive(Default)]
pub struct RecordingOutputPin {
    pub is_high: bool,
    pub rising_edges: usize,
}

impl ErrorType for RecordingOutputPin {
    type Error = Infallible;
}

impl OutputPin for RecordingOutputPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.is_high = false;
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        if !self.is_high {
            self.rising_edges += 1;
        }
        self.is_high = true;
        Ok(())
    }
}

/// HX711 DOUT line. `is_low` reports readiness, `is_high` hands out the scripted data bits in
/// order and low once they run out.
pub struct ScriptedDataPin {
    pub ready: bool,
    bits: VecDeque<bool>,
}

impl ScriptedDataPin {
    pub fn new(ready: bool, bits: Vec<bool>) -> Self {
        Self {
            ready,
            bits: bits.into(),
        }
    }
}

impl ErrorType for ScriptedDataPin {
    type Error = Infallible;
}

impl InputPin for ScriptedDataPin {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(self.bits.pop_front().unwrap_or(false))
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(self.ready)
    }
}

impl Wait for ScriptedDataPin {
    async fn wait_for_high(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    async fn wait_for_low(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    async fn wait_for_rising_edge(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    async fn wait_for_falling_edge(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    async fn wait_for_any_edge(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GaugeFault;

/// Strain gauge that hands out queued readings, then `default_reading` forever.
#[derive(Default)]
pub struct ScriptedGauge {
    pub ready: bool,
    pub readings: VecDeque<i32>,
    pub default_reading: i32,
    pub fail_reads: bool,
    pub reads: usize,
    pub initialized: bool,
}

impl ScriptedGauge {
    pub fn ready_with(readings: &[i32]) -> Self {
        Self {
            ready: true,
            readings: readings.iter().copied().collect(),
            ..Default::default()
        }
    }

    pub fn constant(reading: i32) -> Self {
        Self {
            ready: true,
            default_reading: reading,
            ..Default::default()
        }
    }

    pub fn not_ready() -> Self {
        Self::default()
    }
}

impl AsyncStrainGaugeInterface for ScriptedGauge {
    type Error = GaugeFault;

    async fn initialize(&mut self) -> Result<(), Self::Error> {
        self.initialized = true;
        Ok(())
    }

    fn is_ready(&mut self) -> Result<bool, Self::Error> {
        Ok(self.ready)
    }

    async fn get_next_reading(&mut self) -> Result<i32, Self::Error> {
        if self.fail_reads {
            return Err(GaugeFault);
        }
        self.reads += 1;
        Ok(self.readings.pop_front().unwrap_or(self.default_reading))
    }

    async fn power_down(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    async fn power_up(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    fn get_adc_bit_count(&self) -> usize {
        24
    }
}

/// Button line; `pressed` means pulled low. Scripted levels are used first, one per read.
#[derive(Default)]
pub struct ScriptedButton {
    pub pressed: bool,
    script: VecDeque<bool>,
}

impl ScriptedButton {
    pub fn held(pressed: bool) -> Self {
        Self {
            pressed,
            script: VecDeque::new(),
        }
    }

    pub fn sequence(presses: &[bool]) -> Self {
        Self {
            pressed: false,
            script: presses.iter().copied().collect(),
        }
    }

    fn next_pressed(&mut self) -> bool {
        self.script.pop_front().unwrap_or(self.pressed)
    }
}

impl ErrorType for ScriptedButton {
    type Error = Infallible;
}

impl InputPin for ScriptedButton {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.next_pressed())
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(self.next_pressed())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayFault;

#[derive(Default)]
pub struct RecordingDisplay {
    pub frames: Vec<Frame>,
    pub brightness: Option<u8>,
    pub paused_ms: u32,
    pub fail: bool,
    pub scroll_step: Option<u32>,
}

impl SegmentDisplay for RecordingDisplay {
    type Error = DisplayFault;

    async fn write_segments(&mut self, frame: &Frame) -> Result<(), Self::Error> {
        if self.fail {
            return Err(DisplayFault);
        }
        self.frames.push(*frame);
        Ok(())
    }

    async fn set_brightness(&mut self, level: u8) -> Result<(), Self::Error> {
        if self.fail {
            return Err(DisplayFault);
        }
        self.brightness = Some(level.min(7));
        Ok(())
    }

    async fn pause(&mut self, ms: u32) {
        self.paused_ms += ms;
    }

    fn scroll_step_ms(&self) -> u32 {
        self.scroll_step.unwrap_or(SCROLL_STEP_MS)
    }
}

#[derive(Default)]
pub struct CountingStore {
    pub stored: i32,
    pub saves: Vec<i32>,
    pub loads: usize,
}

impl CountingStore {
    pub fn holding(stored: i32) -> Self {
        Self {
            stored,
            ..Default::default()
        }
    }
}

impl OffsetStore for CountingStore {
    async fn load_offset(&mut self) -> i32 {
        self.loads += 1;
        self.stored
    }

    async fn save_offset(&mut self, value: i32) {
        self.saves.push(value);
        self.stored = value;
    }
}

#[derive(Default)]
pub struct RecordingDiagnostics {
    pub reports: Vec<DiagnosticReport>,
}

impl DiagnosticSink for RecordingDiagnostics {
    fn report(&mut self, report: &DiagnosticReport) {
        self.reports.push(*report);
    }
}

/// NOR flash in RAM: erase sets bytes to 0xFF, writes can only clear bits. `fail_reads` makes
/// every read report a read error.
pub struct RamFlash {
    data: Vec<u8>,
    pub fail_reads: bool,
    pub erases: usize,
}

impl RamFlash {
    pub const CAPACITY: usize = 4 * 4096;

    pub fn new() -> Self {
        Self {
            data: vec![0xFF; Self::CAPACITY],
            fail_reads: false,
            erases: 0,
        }
    }

    fn check_range(&self, offset: u32, length: usize, alignment: usize) -> Result<usize, NorFlashErrorKind> {
        let offset = offset as usize;
        if offset % alignment != 0 || length % alignment != 0 {
            return Err(NorFlashErrorKind::NotAligned);
        }
        if offset + length > self.data.len() {
            return Err(NorFlashErrorKind::OutOfBounds);
        }
        Ok(offset)
    }
}

impl nor_flash::ErrorType for RamFlash {
    type Error = NorFlashErrorKind;
}

impl ReadNorFlash for RamFlash {
    const READ_SIZE: usize = 1;

    async fn read(&mut self, offset: u32, bytes: &mut [u8]) -> Result<(), Self::Error> {
        if self.fail_reads {
            return Err(NorFlashErrorKind::Other);
        }
        let start = self.check_range(offset, bytes.len(), Self::READ_SIZE)?;
        bytes.copy_from_slice(&self.data[start..start + bytes.len()]);
        Ok(())
    }

    fn capacity(&self) -> usize {
        self.data.len()
    }
}

impl NorFlash for RamFlash {
    const WRITE_SIZE: usize = 4;
    const ERASE_SIZE: usize = 4096;

    async fn erase(&mut self, from: u32, to: u32) -> Result<(), Self::Error> {
        if to < from {
            return Err(NorFlashErrorKind::OutOfBounds);
        }
        let start = self.check_range(from, (to - from) as usize, Self::ERASE_SIZE)?;
        self.data[start..to as usize].fill(0xFF);
        self.erases += 1;
        Ok(())
    }

    async fn write(&mut self, offset: u32, bytes: &[u8]) -> Result<(), Self::Error> {
        let start = self.check_range(offset, bytes.len(), Self::WRITE_SIZE)?;
        for (cell, byte) in self.data[start..start + bytes.len()].iter_mut().zip(bytes) {
            *cell &= *byte;
        }
        Ok(())
    }
}

impl MultiwriteNorFlash for RamFlash {}
