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


use crate::hmi::display::SegmentDisplay;
use crate::hmi::segments::{Frame, DIGITS};
use embedded_hal::digital::{InputPin, OutputPin};
use embedded_hal_async::delay::DelayNs;

const DATA_COMMAND_AUTO_INCREMENT: u8 = 0x40;
const ADDRESS_COMMAND: u8 = 0xC0;
const DISPLAY_CONTROL_COMMAND: u8 = 0x80;
const DISPLAY_ON: u8 = 0x08;
pub const MAX_BRIGHTNESS: u8 = 7;

const BIT_DELAY_US: u32 = 100;

#[derive(Debug)]
pub enum Error<ClkE, DioE> {
    ClockPin(ClkE),
    DataPin(DioE),
}

/// TM1637 LED driver on two open-drain lines. The module's own pull-ups hold both lines high
/// when released.
pub struct Tm1637<CLK, DIO, D> {
    clock_pin: CLK,
    data_pin: DIO,
    delay: D,
    brightness: u8,
}

impl<CLK, DIO, D, ClkE, DioE> Tm1637<CLK, DIO, D>
where
    CLK: OutputPin<Error = ClkE>,
    DIO: OutputPin<Error = DioE> + InputPin<Error = DioE>,
    D: DelayNs,
{
    pub fn new(clock_pin: CLK, data_pin: DIO, delay: D) -> Result<Self, Error<ClkE, DioE>> {
        let mut tm1637 = Self {
            clock_pin,
            data_pin,
            delay,
            brightness: MAX_BRIGHTNESS,
        };
        tm1637.clock_pin.set_high().map_err(Error::ClockPin)?;
        tm1637.data_pin.set_high().map_err(Error::DataPin)?;
        Ok(tm1637)
    }

    async fn bit_delay(&mut self) {
        self.delay.delay_us(BIT_DELAY_US).await;
    }

    async fn start(&mut self) -> Result<(), Error<ClkE, DioE>> {
        // DIO falling while CLK is high
        self.data_pin.set_low().map_err(Error::DataPin)?;
        self.bit_delay().await;
        Ok(())
    }

    async fn stop(&mut self) -> Result<(), Error<ClkE, DioE>> {
        self.data_pin.set_low().map_err(Error::DataPin)?;
        self.bit_delay().await;
        self.clock_pin.set_high().map_err(Error::ClockPin)?;
        self.bit_delay().await;
        self.data_pin.set_high().map_err(Error::DataPin)?;
        self.bit_delay().await;
        Ok(())
    }

    /// Clocks out one byte LSB first, then clocks the ACK slot. Returns true if the chip
    /// acknowledged.
    async fn write_byte(&mut self, byte: u8) -> Result<bool, Error<ClkE, DioE>> {
        let mut data = byte;
        for _ in 0..8 {
            self.clock_pin.set_low().map_err(Error::ClockPin)?;
            self.bit_delay().await;
            if data & 0x01 == 0x01 {
                self.data_pin.set_high().map_err(Error::DataPin)?;
            } else {
                self.data_pin.set_low().map_err(Error::DataPin)?;
            }
            self.bit_delay().await;
            self.clock_pin.set_high().map_err(Error::ClockPin)?;
            self.bit_delay().await;
            data >>= 1;
        }

        self.clock_pin.set_low().map_err(Error::ClockPin)?;
        self.data_pin.set_high().map_err(Error::DataPin)?;
        self.bit_delay().await;
        self.clock_pin.set_high().map_err(Error::ClockPin)?;
        self.bit_delay().await;
        let ack = self.data_pin.is_low().map_err(Error::DataPin)?;
        self.clock_pin.set_low().map_err(Error::ClockPin)?;
        self.bit_delay().await;

        if !ack {
            trace!("TM1637 did not acknowledge 0x{:x}", byte);
        }
        Ok(ack)
    }

    async fn send_command(&mut self, bytes: &[u8]) -> Result<(), Error<ClkE, DioE>> {
        self.start().await?;
        for byte in bytes {
            self.write_byte(*byte).await?;
        }
        self.stop().await
    }

    async fn send_display_control(&mut self) -> Result<(), Error<ClkE, DioE>> {
        self.send_command(&[DISPLAY_CONTROL_COMMAND | DISPLAY_ON | self.brightness])
            .await
    }
}

impl<CLK, DIO, D, ClkE, DioE> SegmentDisplay for Tm1637<CLK, DIO, D>
where
    CLK: OutputPin<Error = ClkE>,
    DIO: OutputPin<Error = DioE> + InputPin<Error = DioE>,
    D: DelayNs,
{
    type Error = Error<ClkE, DioE>;

    async fn write_segments(&mut self, frame: &Frame) -> Result<(), Self::Error> {
        self.send_command(&[DATA_COMMAND_AUTO_INCREMENT]).await?;

        let mut address_and_data = [0u8; 1 + DIGITS];
        address_and_data[0] = ADDRESS_COMMAND;
        address_and_data[1..].copy_from_slice(frame);
        self.send_command(&address_and_data).await?;

        self.send_display_control().await
    }

    async fn set_brightness(&mut self, level: u8) -> Result<(), Self::Error> {
        self.brightness = level.min(MAX_BRIGHTNESS);
        self.send_display_control().await
    }

    async fn pause(&mut self, ms: u32) {
        self.delay.delay_ms(ms).await;
    }
}
