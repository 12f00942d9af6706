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


use crate::application::diagnostics::{DiagnosticReport, DiagnosticSink};
use crate::config::{
    ScaleConfig, INTRO_TEXT, NOT_READY_MESSAGE, POWER_ON_MESSAGE, READY_MESSAGE, TARE_MESSAGE,
};
use crate::fmt::Debug2Format;
use crate::hmi::animations::{FLASH_ZERO, INTRO_SPIN};
use crate::hmi::button::TareButton;
use crate::hmi::display::SegmentDisplay;
use crate::storage::OffsetStore;
use crate::weight::interface::AsyncStrainGaugeInterface;
use crate::weight::WeightScale;
use core::fmt::Debug;
use embedded_hal::digital::InputPin;
use embedded_hal_async::delay::DelayNs;

/// What one pass of the control loop did
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CycleOutcome {
    /// No conversion available (or the read failed); `Err` shown, nothing weighed or stored.
    SensorNotReady,
    Weighed { raw: i32, weight: i32 },
    /// The button was held: `raw` is now the stored and live tare offset.
    Tared { raw: i32 },
}

fn log_display_error<E: Debug>(result: Result<(), E>) {
    if let Err(e) = result {
        warn!("Display update failed: {:?}", Debug2Format(&e));
    }
}

/// Owns every peripheral handle and runs the start-up sequence and the polling loop.
///
/// Each pass is strictly sequential: sensor read, transform, display, button check, then the
/// optional tare write and its feedback. Nothing runs concurrently with it.
pub struct ScaleController<StrainGauge, Display, Button, Store, Delay, Diagnostics> {
    scale: WeightScale<StrainGauge>,
    display: Display,
    button: TareButton<Button>,
    store: Store,
    delay: Delay,
    diagnostics: Diagnostics,
    config: ScaleConfig,
}

impl<StrainGauge, StrainGaugeE, Display, DisplayE, Button, Store, Delay, Diagnostics>
    ScaleController<StrainGauge, Display, Button, Store, Delay, Diagnostics>
where
    StrainGauge: AsyncStrainGaugeInterface<Error = StrainGaugeE>,
    StrainGaugeE: Debug,
    Display: SegmentDisplay<Error = DisplayE>,
    DisplayE: Debug,
    Button: InputPin,
    Store: OffsetStore,
    Delay: DelayNs,
    Diagnostics: DiagnosticSink,
{
    pub fn new(
        scale: WeightScale<StrainGauge>,
        display: Display,
        button: TareButton<Button>,
        store: Store,
        delay: Delay,
        diagnostics: Diagnostics,
        config: ScaleConfig,
    ) -> Self {
        Self {
            scale,
            display,
            button,
            store,
            delay,
            diagnostics,
            config,
        }
    }

    /// Start-up followed by the polling loop, never returns.
    pub async fn run(mut self) -> ! {
        self.start().await;
        loop {
            self.poll_once().await;
        }
    }

    /// Display greeting and loading of the tare offset. A stored offset of zero means the scale
    /// was never tared and the calibration's no-load reading is used instead.
    pub async fn start(&mut self) {
        log_display_error(self.display.set_brightness(self.config.brightness).await);
        log_display_error(self.display.clear().await);

        for _ in 0..self.config.power_on_flashes {
            log_display_error(self.display.show_string(POWER_ON_MESSAGE).await);
            self.delay.delay_ms(self.config.power_on_flash_ms).await;
            log_display_error(self.display.clear().await);
            self.delay.delay_ms(self.config.power_on_flash_ms).await;
        }

        log_display_error(
            self.display
                .show_animation(&INTRO_SPIN, self.config.animation_frame_ms)
                .await,
        );
        log_display_error(self.display.show_string(INTRO_TEXT).await);
        self.delay.delay_ms(self.config.ready_message_ms).await;

        let stored_offset = self.store.load_offset().await;
        let offset = if stored_offset == 0 {
            self.config.calibration.cal_offset()
        } else {
            stored_offset
        };
        self.scale.set_offset(offset);
        info!("Tare offset {} (stored {})", offset, stored_offset);

        log_display_error(self.display.clear().await);
    }

    pub async fn poll_once(&mut self) -> CycleOutcome {
        let ready = self.scale.is_ready().unwrap_or_else(|e| {
            warn!("Unable to poll weight sensor: {:?}", Debug2Format(&e));
            false
        });
        if !ready {
            return self.sensor_not_ready().await;
        }

        let raw = match self.scale.read_average(self.config.sample_count).await {
            Ok(raw) => raw,
            Err(e) => {
                warn!("Weight sensor read failed: {:?}", Debug2Format(&e));
                return self.sensor_not_ready().await;
            }
        };

        let weight = self.scale.weight_from_raw(raw);
        if self.config.diagnostics {
            self.diagnostics.report(&DiagnosticReport {
                raw,
                offset: self.scale.get_offset(),
                ratio: self.scale.get_scale(),
                weight,
            });
        }

        log_display_error(self.display.show_number(weight).await);
        self.delay.delay_ms(self.config.update_interval_ms).await;

        if self.tare_requested() {
            self.tare(raw).await;
            return CycleOutcome::Tared { raw };
        }

        CycleOutcome::Weighed { raw, weight }
    }

    fn tare_requested(&mut self) -> bool {
        self.button.is_pressed().unwrap_or_else(|_| {
            warn!("Unable to read tare button");
            false
        })
    }

    async fn sensor_not_ready(&mut self) -> CycleOutcome {
        trace!("Weight sensor not ready");
        log_display_error(self.display.show_string(NOT_READY_MESSAGE).await);
        self.delay.delay_ms(self.config.not_ready_backoff_ms).await;
        CycleOutcome::SensorNotReady
    }

    async fn tare(&mut self, raw: i32) {
        log_display_error(self.display.show_string(TARE_MESSAGE).await);
        self.delay.delay_ms(self.config.tare_message_ms).await;

        self.store.save_offset(raw).await;
        self.scale.set_offset(raw);
        info!("Tared at raw reading {}", raw);

        log_display_error(
            self.display
                .show_animation(&FLASH_ZERO, self.config.animation_frame_ms)
                .await,
        );
        log_display_error(self.display.show_string(READY_MESSAGE).await);
        self.delay.delay_ms(self.config.ready_message_ms).await;
    }
}
