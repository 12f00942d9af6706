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


use crate::fmt::Debug2Format;
use crate::storage::{OffsetStore, StorageError};
use core::ops::Range;
use embedded_storage_async::nor_flash::MultiwriteNorFlash;
use sequential_storage::cache::NoCache;
use sequential_storage::map;

/// Fixed map key the tare offset lives under
pub const TARE_OFFSET_KEY: u16 = 0;

// Must hold the biggest serialized item (key + value) rounded up to the flash word size.
const DATA_BUFFER_SIZE: usize = 128;

/// Tare offset kept in a `sequential-storage` map on NOR flash. Items are appended and old ones
/// retired, so a write interrupted by power loss leaves the previous offset readable.
pub struct FlashTareStore<F> {
    flash: F,
    storage_range: Range<u32>,
    flash_cache: NoCache,
}

impl<F> FlashTareStore<F>
where
    F: MultiwriteNorFlash,
{
    /// `storage_range` must be page aligned and span at least two erase pages.
    pub fn new(flash: F, storage_range: Range<u32>) -> Self {
        debug!(
            "Tare storage flash address range: 0x{:x} to 0x{:x}",
            storage_range.start, storage_range.end
        );
        Self {
            flash,
            storage_range,
            flash_cache: NoCache::new(),
        }
    }

    pub async fn read_offset(&mut self) -> Result<Option<i32>, StorageError> {
        let mut data_buffer = [0; DATA_BUFFER_SIZE];

        let value: Option<i32> = map::fetch_item(
            &mut self.flash,
            self.storage_range.clone(),
            &mut self.flash_cache,
            &mut data_buffer,
            &TARE_OFFSET_KEY,
        )
        .await
        .map_err(|e| {
            warn!("Unable to read tare offset. Error: {:?}", Debug2Format(&e));
            StorageError::RetrieveError
        })?;
        Ok(value)
    }

    pub async fn write_offset(&mut self, value: i32) -> Result<(), StorageError> {
        let mut data_buffer = [0; DATA_BUFFER_SIZE];

        map::store_item(
            &mut self.flash,
            self.storage_range.clone(),
            &mut self.flash_cache,
            &mut data_buffer,
            &TARE_OFFSET_KEY,
            &value,
        )
        .await
        .map_err(|e| {
            warn!("Unable to save tare offset. Error: {:?}", Debug2Format(&e));
            StorageError::SaveError
        })
    }

    /// Wipe the whole storage range. Used when the region cannot be read back.
    pub async fn erase(&mut self) -> Result<(), StorageError> {
        sequential_storage::erase_all(&mut self.flash, self.storage_range.clone())
            .await
            .map_err(|e| {
                warn!("Unable to erase storage. Error: {:?}", Debug2Format(&e));
                StorageError::EraseError
            })
    }

    #[cfg(test)]
    pub(crate) fn flash_mut(&mut self) -> &mut F {
        &mut self.flash
    }
}

impl<F> OffsetStore for FlashTareStore<F>
where
    F: MultiwriteNorFlash,
{
    async fn load_offset(&mut self) -> i32 {
        match self.read_offset().await {
            Ok(Some(offset)) => offset,
            Ok(None) => {
                debug!("No tare offset stored");
                0
            }
            Err(_) => {
                warn!("Tare storage unreadable, erasing");
                let _ = self.erase().await;
                0
            }
        }
    }

    async fn save_offset(&mut self, value: i32) {
        if self.write_offset(value).await.is_ok() {
            trace!("Tare offset {} stored", value);
        }
    }
}
