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


pub mod tare_store;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StorageError {
    SaveError,
    RetrieveError,
    EraseError,
}

/// Non-volatile home of the tare offset.
///
/// Neither operation reports failure: a value that cannot be read comes back as `0` (the
/// unprogrammed state) and a failed write is logged and otherwise ignored.
pub trait OffsetStore {
    /// The stored offset, or `0` if none was ever written.
    async fn load_offset(&mut self) -> i32;

    /// Replace the stored offset. The value is on the medium when this returns.
    async fn save_offset(&mut self, value: i32);
}
