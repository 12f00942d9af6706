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


use crate::weight::interface::AsyncStrainGaugeInterface;
use embedded_hal_async::delay::DelayNs;

#[allow(dead_code)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Hx711Gain {
    Gain128,
    Gain64,
    Gain32ChannelB,
}

impl Hx711Gain {
    fn tick_count(&self) -> usize {
        match self {
            Hx711Gain::Gain128 => 25,
            Hx711Gain::Gain64 => 27,
            Hx711Gain::Gain32ChannelB => 26,
        }
    }
}

const POWER_MODE_CHANGE_DELAY_US: u32 = 60;
const CLK_HALF_PERIOD_US: u32 = 1;
const VALID_DATA_BITS: usize = 24;

#[derive(Debug)]
pub enum Error<OutPinE, InPinE> {
    OutPin(OutPinE),
    InPin(InPinE),
}

pub struct Hx711Async<CLK, DATA, D> {
    clock_pin: CLK,
    data_pin: DATA,
    delay: D,
    gain_clocks: usize,
    powered_up: bool,
}

impl<CLK, DATA, D, ClkE, DataE> Hx711Async<CLK, DATA, D>
where
    CLK: embedded_hal::digital::OutputPin<Error = ClkE>,
    DATA: embedded_hal_async::digital::Wait<Error = DataE>
        + embedded_hal::digital::InputPin<Error = DataE>,
    D: DelayNs,
{
    pub fn new(clock_pin: CLK, data_pin: DATA, delay: D, gain: Hx711Gain) -> Self {
        Self {
            clock_pin,
            data_pin,
            delay,
            gain_clocks: gain.tick_count(),
            powered_up: false,
        }
    }
}

/// Extend the sign of a 24-bit two's complement value
fn sign_extend_24(data: i32) -> i32 {
    if (data >> 23) & 0x1 == 0x1 {
        data | 0xFF000000u32 as i32
    } else {
        data
    }
}

impl<CLK, DATA, D, ClkE, DataE> AsyncStrainGaugeInterface for Hx711Async<CLK, DATA, D>
where
    CLK: embedded_hal::digital::OutputPin<Error = ClkE>,
    DATA: embedded_hal_async::digital::Wait<Error = DataE>
        + embedded_hal::digital::InputPin<Error = DataE>,
    D: DelayNs,
{
    type Error = Error<ClkE, DataE>;

    async fn initialize(&mut self) -> Result<(), Self::Error> {
        self.power_up().await
    }

    fn is_ready(&mut self) -> Result<bool, Self::Error> {
        // DOUT goes low when conversion is ready
        self.data_pin.is_low().map_err(Error::InPin)
    }

    async fn get_next_reading(&mut self) -> Result<i32, Self::Error> {
        if !self.powered_up {
            self.power_up().await?;
        }

        self.data_pin.wait_for_low().await.map_err(Error::InPin)?;
        let mut data: i32 = 0;

        self.delay.delay_us(CLK_HALF_PERIOD_US).await;
        for _ in 0..self.gain_clocks {
            data <<= 1;
            self.clock_pin.set_high().map_err(Error::OutPin)?;
            self.delay.delay_us(CLK_HALF_PERIOD_US).await;
            self.clock_pin.set_low().map_err(Error::OutPin)?;
            let data_sample = self.data_pin.is_high().map_err(Error::InPin)?;
            if data_sample {
                data |= 0x1;
            }
            self.delay.delay_us(CLK_HALF_PERIOD_US).await;
        }

        // the trailing clocks select gain for the next conversion, their bits are not data
        let data_bits_to_discard = self.gain_clocks - VALID_DATA_BITS;
        data >>= data_bits_to_discard;
        let data_mask = (1 << VALID_DATA_BITS) - 1;
        data &= data_mask;
        Ok(sign_extend_24(data))
    }

    async fn power_down(&mut self) -> Result<(), Self::Error> {
        self.clock_pin.set_high().map_err(Error::OutPin)?;
        self.delay.delay_us(POWER_MODE_CHANGE_DELAY_US).await;
        self.powered_up = false;
        Ok(())
    }

    async fn power_up(&mut self) -> Result<(), Self::Error> {
        self.clock_pin.set_low().map_err(Error::OutPin)?;
        self.delay.delay_us(POWER_MODE_CHANGE_DELAY_US).await;
        self.powered_up = true;
        Ok(())
    }

    fn get_adc_bit_count(&self) -> usize {
        VALID_DATA_BITS
    }
}
