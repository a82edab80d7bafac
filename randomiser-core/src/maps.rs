use crate::store::{DataArray, RecordStore};
use crate::Result;

pub const PROPERTIES_START: usize = 0x2D8F00;
pub const PROPERTIES_END: usize = 0x2DC49F;
pub const PROPERTIES_SIZE: usize = 33;

const ENCOUNTER_FLAGS: usize = 5;
const RANDOM_ENCOUNTERS_MASK: u8 = 0x80;

/// Answers which map-scoped encounter zones are live.
pub trait MapRegistry {
    fn map_count(&self) -> usize;

    fn random_encounters_enabled(&self, map_id: usize) -> bool;
}

#[derive(Debug, Clone)]
pub struct Maps {
    enable_random_encounters: Vec<bool>,
}

impl Maps {
    pub fn new(enable_random_encounters: Vec<bool>) -> Self {
        Self {
            enable_random_encounters,
        }
    }

    pub fn read(rom: &[u8]) -> Result<Self> {
        let table = DataArray::read(rom, "map properties", PROPERTIES_START, PROPERTIES_END, PROPERTIES_SIZE)?;
        let enable_random_encounters = (0..table.len())
            .map(|index| {
                let record = table.read(index)?;
                Ok(record[ENCOUNTER_FLAGS] & RANDOM_ENCOUNTERS_MASK != 0)
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::new(enable_random_encounters))
    }
}

impl MapRegistry for Maps {
    fn map_count(&self) -> usize {
        self.enable_random_encounters.len()
    }

    fn random_encounters_enabled(&self, map_id: usize) -> bool {
        self.enable_random_encounters
            .get(map_id)
            .copied()
            .unwrap_or(false)
    }
}
