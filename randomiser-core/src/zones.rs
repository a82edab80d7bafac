use crate::store::{DataArray, RecordStore};
use crate::{RandomiserError, Result};

pub const WORLD_ZONES_START: usize = 0xF5400;
pub const WORLD_ZONES_END: usize = 0xF55FF;
pub const MAP_ZONES_START: usize = 0xF5600;
pub const MAP_ZONES_END: usize = 0xF59FF;
pub const WORLD_RATES_START: usize = 0xF5A00;
pub const WORLD_RATES_END: usize = 0xF5A7F;
pub const MAP_RATES_START: usize = 0xF5A80;
pub const MAP_RATES_END: usize = 0xF5B7F;

pub const ZONE_SIZE: usize = 4;
const RATE_SIZE: usize = 1;

pub const PACK_COUNT: usize = 4;

/// Encounter rate value shared by ordinary zone slots.
pub const NORMAL_ENCOUNTER_RATE: u8 = 0;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnemyZone {
    /// World zone index, or the map id for map zones.
    pub id: usize,
    pub map: bool,
    pub packs: [u8; PACK_COUNT],
    pub encounter_rates: [u8; PACK_COUNT],
}

impl EnemyZone {
    fn from_records(id: usize, map: bool, packs: &[u8], rates: u8) -> Self {
        let mut zone = Self {
            id,
            map,
            packs: [0; PACK_COUNT],
            encounter_rates: [0; PACK_COUNT],
        };
        zone.packs.copy_from_slice(&packs[..PACK_COUNT]);
        for (slot, rate) in zone.encounter_rates.iter_mut().enumerate() {
            *rate = (rates >> (slot * 2)) & 0b11;
        }
        zone
    }
}

/// World zones first, then map zones.
#[derive(Debug, Clone)]
pub struct EnemyZones {
    pub zones: Vec<EnemyZone>,
}

impl EnemyZones {
    pub fn read(rom: &[u8]) -> Result<Self> {
        let world = DataArray::read(rom, "world zones", WORLD_ZONES_START, WORLD_ZONES_END, ZONE_SIZE)?;
        let world_rates = DataArray::read(rom, "world zone rates", WORLD_RATES_START, WORLD_RATES_END, RATE_SIZE)?;
        let map = DataArray::read(rom, "map zones", MAP_ZONES_START, MAP_ZONES_END, ZONE_SIZE)?;
        let map_rates = DataArray::read(rom, "map zone rates", MAP_RATES_START, MAP_RATES_END, RATE_SIZE)?;
        Self::from_tables(&world, &world_rates, &map, &map_rates)
    }

    pub fn from_tables(
        world: &DataArray,
        world_rates: &DataArray,
        map: &DataArray,
        map_rates: &DataArray,
    ) -> Result<Self> {
        let mut zones = Vec::with_capacity(world.len() + map.len());
        for (is_map, packs, rates) in [(false, world, world_rates), (true, map, map_rates)] {
            if rates.len() < packs.len() {
                return Err(RandomiserError::Config(format!(
                    "{} has {} records but {} only has {}",
                    packs.name(),
                    packs.len(),
                    rates.name(),
                    rates.len()
                )));
            }
            for id in 0..packs.len() {
                let rate = rates.read(id)?[0];
                zones.push(EnemyZone::from_records(id, is_map, packs.read(id)?, rate));
            }
        }
        Ok(Self { zones })
    }
}
