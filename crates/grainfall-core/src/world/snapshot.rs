//! Whole-grid snapshots for undo/redo and saving

use grainfall_simulation::MaterialId;
use serde::{Deserialize, Serialize};

use super::cell_store::CellStore;
use crate::error::EngineError;

/// Immutable copy of every cell's material, temperature and age
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    width: usize,
    height: usize,
    materials: Vec<MaterialId>,
    temperatures: Vec<f32>,
    ages: Vec<u16>,
}

impl Snapshot {
    /// Copy the current contents of `store`
    pub fn capture(store: &CellStore) -> Self {
        Self {
            width: store.width(),
            height: store.height(),
            materials: store.materials().to_vec(),
            temperatures: store.temperatures().to_vec(),
            ages: store.ages().to_vec(),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn materials(&self) -> &[MaterialId] {
        &self.materials
    }

    pub fn temperatures(&self) -> &[f32] {
        &self.temperatures
    }

    pub fn ages(&self) -> &[u16] {
        &self.ages
    }

    /// Material at (x, y), or None outside the captured grid
    pub fn material(&self, x: usize, y: usize) -> Option<MaterialId> {
        if x < self.width && y < self.height {
            Some(self.materials[y * self.width + x])
        } else {
            None
        }
    }

    /// Overwrite `store` with this snapshot. Dimensions must match.
    pub fn apply_to(&self, store: &mut CellStore) -> Result<(), EngineError> {
        if store.width() != self.width || store.height() != self.height {
            return Err(EngineError::SnapshotMismatch {
                width: store.width(),
                height: store.height(),
                found_width: self.width,
                found_height: self.height,
            });
        }
        store.load(&self.materials, &self.temperatures, &self.ages);
        Ok(())
    }

    /// Encode with bincode and compress with LZ4
    pub fn to_bytes(&self) -> Result<Vec<u8>, EngineError> {
        let encoded = bincode_next::serde::encode_to_vec(self, bincode_next::config::standard())
            .map_err(|e| EngineError::SnapshotEncode(e.to_string()))?;
        Ok(lz4_flex::compress_prepend_size(&encoded))
    }

    /// Decode bytes produced by [`Snapshot::to_bytes`]
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, EngineError> {
        check_size_header(bytes)?;
        let decompressed = lz4_flex::decompress_size_prepended(bytes)
            .map_err(|e| EngineError::SnapshotDecode(e.to_string()))?;
        let (snapshot, _): (Self, usize) =
            bincode_next::serde::decode_from_slice(&decompressed, bincode_next::config::standard())
                .map_err(|e| EngineError::SnapshotDecode(e.to_string()))?;
        snapshot.check_lengths()?;
        Ok(snapshot)
    }

    fn check_lengths(&self) -> Result<(), EngineError> {
        let expected = self
            .width
            .checked_mul(self.height)
            .filter(|&n| n > 0)
            .ok_or_else(|| {
                EngineError::SnapshotDecode(format!(
                    "invalid dimensions {}x{}",
                    self.width, self.height
                ))
            })?;

        for (name, len) in [
            ("materials", self.materials.len()),
            ("temperatures", self.temperatures.len()),
            ("ages", self.ages.len()),
        ] {
            if len != expected {
                return Err(EngineError::SnapshotDecode(format!(
                    "{} holds {} cells, expected {}",
                    name, len, expected
                )));
            }
        }
        Ok(())
    }
}

/// LZ4 cannot expand a block by more than this factor
const MAX_COMPRESSION_RATIO: usize = 255;

/// Reject size prefixes the payload could never decompress to, before
/// anything is allocated for them
fn check_size_header(bytes: &[u8]) -> Result<(), EngineError> {
    let Some((header, payload)) = bytes.split_first_chunk::<4>() else {
        return Err(EngineError::SnapshotDecode(format!(
            "{} bytes is too short for a snapshot",
            bytes.len()
        )));
    };
    let claimed = u32::from_le_bytes(*header) as usize;
    let limit = payload.len().saturating_mul(MAX_COMPRESSION_RATIO);
    if claimed > limit {
        return Err(EngineError::SnapshotDecode(format!(
            "header claims {} bytes from a {} byte payload",
            claimed,
            payload.len()
        )));
    }
    Ok(())
}
