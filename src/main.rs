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

#![no_std]
#![no_main]

mod diagnostics;

use core::ops::Range;

use assign_resources::assign_resources;
use defmt::{info, warn};
use embassy_embedded_hal::adapter::BlockingAsync;
use embassy_executor::Spawner;
use embassy_rp::flash::{Blocking, Flash};
use embassy_rp::gpio::{Input, Level, Output, OutputOpenDrain, Pull};
use embassy_rp::peripherals;
use embassy_time::Delay;
#[allow(unused_imports)]
use {defmt_rtt as _, panic_probe as _};

use weighscale_core::application::scale_controller::ScaleController;
use weighscale_core::config::{ScaleConfig, DEFAULT_CALIBRATION};
use weighscale_core::hmi::button::TareButton;
use weighscale_core::hmi::tm1637::Tm1637;
use weighscale_core::storage::tare_store::FlashTareStore;
use weighscale_core::weight::interface::hx711async::{Hx711Async, Hx711Gain};
use weighscale_core::weight::WeightScale;

use crate::diagnostics::DefmtDiagnostics;

const FLASH_SIZE: usize = 2 * 1024 * 1024;
const STORAGE_SIZE: u32 = 16 * 1024;
/// Flash offsets kept out of the program image by memory.x
const STORAGE_RANGE: Range<u32> = (FLASH_SIZE as u32 - STORAGE_SIZE)..FLASH_SIZE as u32;

const _: () = assert!(
    DEFAULT_CALIBRATION.is_valid(),
    "calibration constants give a zero or unbounded ratio"
);

mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

assign_resources! {
    strain_gauge_io: StrainGaugeResources {
        clk_pin: PIN_14,
        data_pin: PIN_15,
    },
    display_io: DisplayResources {
        clk_pin: PIN_2,
        dio_pin: PIN_3,
    },
    hmi_inputs: HmiInputPins {
        push_btn_pin: PIN_6,
    },
    storage: StorageResources {
        flash: FLASH,
    }
}

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    let p = embassy_rp::init(Default::default());
    let resources = split_resources!(p);

    let dirty_indicator = if built_info::GIT_DIRTY.unwrap_or(true) { "+" } else { "" };
    info!(
        "{} v{} ({}{}) starting",
        built_info::PKG_NAME,
        built_info::PKG_VERSION,
        built_info::GIT_COMMIT_HASH_SHORT.unwrap_or("unknown"),
        dirty_indicator
    );

    let config = ScaleConfig {
        diagnostics: cfg!(feature = "diagnostics"),
        ..Default::default()
    };
    if config.diagnostics {
        warn!("Diagnostic output enabled");
    }

    let strain_gauge = Hx711Async::new(
        Output::new(resources.strain_gauge_io.clk_pin, Level::Low),
        Input::new(resources.strain_gauge_io.data_pin, Pull::Up),
        Delay,
        Hx711Gain::Gain128,
    );
    let weight_scale = WeightScale::new(strain_gauge, config.calibration).await.unwrap();

    let display = Tm1637::new(
        OutputOpenDrain::new(resources.display_io.clk_pin, Level::High),
        OutputOpenDrain::new(resources.display_io.dio_pin, Level::High),
        Delay,
    )
    .unwrap();

    let tare_button = TareButton::new(Input::new(resources.hmi_inputs.push_btn_pin, Pull::Up));

    let flash = Flash::<_, Blocking, FLASH_SIZE>::new_blocking(resources.storage.flash);
    let tare_store = FlashTareStore::new(BlockingAsync::new(flash), STORAGE_RANGE);

    ScaleController::new(
        weight_scale,
        display,
        tare_button,
        tare_store,
        Delay,
        DefmtDiagnostics,
        config,
    )
    .run()
    .await
}
