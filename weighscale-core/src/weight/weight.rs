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
use crate::weight::interface::AsyncStrainGaugeInterface;

#[derive(Debug, PartialEq)]
pub enum Error<StrainGaugeE> {
    StrainGaugeReadingError(StrainGaugeE),
}

/// A strain gauge plus the scale and offset needed to turn its readings into a weight.
pub struct WeightScale<StrainGauge> {
    strain_gauge: StrainGauge,
    calibration: Calibration,
    tare_offset: i32,
}

impl<StrainGauge, StrainGaugeE> WeightScale<StrainGauge>
where
    StrainGauge: AsyncStrainGaugeInterface<Error = StrainGaugeE>,
{
    /// Powers up the gauge. The offset starts at the calibration's no-load reading.
    pub async fn new(
        mut strain_gauge: StrainGauge,
        calibration: Calibration,
    ) -> Result<Self, Error<StrainGaugeE>> {
        strain_gauge
            .initialize()
            .await
            .map_err(Error::StrainGaugeReadingError)?;

        debug!(
            "Weight scale up: {} bit ADC, {} counts per unit",
            strain_gauge.get_adc_bit_count(),
            calibration.ratio()
        );

        Ok(Self {
            strain_gauge,
            calibration,
            tare_offset: calibration.cal_offset(),
        })
    }

    pub fn is_ready(&mut self) -> Result<bool, Error<StrainGaugeE>> {
        self.strain_gauge
            .is_ready()
            .map_err(Error::StrainGaugeReadingError)
    }

    /// Mean of `sample_count` consecutive readings, truncated toward zero. Waits for every
    /// conversion, so only call once [`WeightScale::is_ready`] has said yes. A count of zero
    /// takes a single reading.
    pub async fn read_average(&mut self, sample_count: usize) -> Result<i32, Error<StrainGaugeE>> {
        let sample_count = sample_count.max(1);
        let mut sum: i64 = 0;

        for _ in 0..sample_count {
            let reading = self
                .strain_gauge
                .get_next_reading()
                .await
                .map_err(Error::StrainGaugeReadingError)?;
            sum += reading as i64;
        }

        let average = (sum / sample_count as i64) as i32;
        trace!("Average of {} readings = {}", sample_count, average);
        Ok(average)
    }

    pub fn set_offset(&mut self, offset: i32) {
        self.tare_offset = offset;
    }

    pub fn get_offset(&self) -> i32 {
        self.tare_offset
    }

    /// Raw counts per display unit
    pub fn get_scale(&self) -> f32 {
        self.calibration.ratio()
    }

    pub fn weight_from_raw(&self, raw: i32) -> i32 {
        self.calibration.transform(raw, self.tare_offset)
    }

    #[cfg(test)]
    pub(crate) fn strain_gauge(&self) -> &StrainGauge {
        &self.strain_gauge
    }
}
