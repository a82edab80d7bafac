//! Random-encounter rewriting across the zone -> pack -> formation hierarchy.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::formations::EnemyFormations;
use crate::maps::MapRegistry;
use crate::packs::{EnemyPacks, FORMATION_COUNT};
use crate::zones::{EnemyZone, EnemyZones, NORMAL_ENCOUNTER_RATE, PACK_COUNT};

/// Width of the formation block behind a slot with extra formations.
const EXTRA_FORMATION_BLOCK: u16 = 4;

/// Map zones without a map, or on a map with random encounters disabled.
pub fn skip_shuffling_zone<M: MapRegistry + ?Sized>(maps: &M, zone: &EnemyZone) -> bool {
    if !zone.map {
        return false;
    }
    zone.id >= maps.map_count() || !maps.random_encounters_enabled(zone.id)
}

pub fn skip_shuffling_pack(pack: u8, encounter_rate: u8) -> bool {
    // Pack 0 at the normal rate is the unused placeholder.
    if pack == 0 && encounter_rate == NORMAL_ENCOUNTER_RATE {
        return true;
    }
    pack == EnemyPacks::VELDT || pack == EnemyPacks::ZONE_EATER
}

pub fn skip_shuffling_formation(formation: u16) -> bool {
    formation == EnemyFormations::PRESENTER
}

/// Pack ids referenced by live zone slots, in zone order, duplicates kept.
pub fn encounter_packs<M: MapRegistry + ?Sized>(zones: &EnemyZones, maps: &M) -> Vec<u8> {
    let mut packs = Vec::new();
    for zone in &zones.zones {
        if skip_shuffling_zone(maps, zone) {
            continue;
        }
        for slot in 0..PACK_COUNT {
            if skip_shuffling_pack(zone.packs[slot], zone.encounter_rates[slot]) {
                continue;
            }
            packs.push(zone.packs[slot]);
        }
    }
    packs
}

/// Counts from one encounter shuffle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ShuffleSummary {
    pub packs: usize,
    pub collected: usize,
    pub written: usize,
    pub discarded: usize,
}

/// Shuffle every randomly encounterable formation between pack slots.
///
/// A slot flagged with extra formations feeds its whole block into the pool
/// but gets back a single id, so surplus ids are dropped after reassignment.
pub fn shuffle_encounters<M, R>(
    zones: &EnemyZones,
    packs: &mut EnemyPacks,
    maps: &M,
    rng: &mut R,
) -> ShuffleSummary
where
    M: MapRegistry + ?Sized,
    R: Rng + ?Sized,
{
    let mut pack_ids = Vec::new();
    for id in encounter_packs(zones, maps) {
        if !pack_ids.contains(&id) {
            pack_ids.push(id);
        }
    }

    let mut formations = Vec::new();
    for &id in &pack_ids {
        let Some(pack) = packs.packs.get(id as usize) else {
            log::warn!("zone references pack {id}, which does not exist");
            continue;
        };
        for slot in 0..FORMATION_COUNT {
            let formation = pack.formations[slot];
            if skip_shuffling_formation(formation) {
                continue;
            }
            if pack.extra_formations[slot] {
                formations.extend((0..EXTRA_FORMATION_BLOCK).map(|offset| formation + offset));
            } else {
                formations.push(formation);
            }
        }
    }

    let collected = formations.len();
    formations.shuffle(rng);

    let mut written = 0;
    for &id in &pack_ids {
        let Some(pack) = packs.get_mut(id) else {
            continue;
        };
        for slot in 0..FORMATION_COUNT {
            if skip_shuffling_formation(pack.formations[slot]) {
                continue;
            }
            if let Some(formation) = formations.pop() {
                pack.formations[slot] = formation;
                written += 1;
            }
        }
    }

    let summary = ShuffleSummary {
        packs: pack_ids.len(),
        collected,
        written,
        discarded: formations.len(),
    };
    log::info!(
        "shuffled {} formations into {} slots across {} packs ({} discarded)",
        summary.collected,
        summary.written,
        summary.packs,
        summary.discarded
    );
    summary
}

pub fn chupon_encounters<M: MapRegistry + ?Sized>(zones: &EnemyZones, packs: &mut EnemyPacks, maps: &M) {
    let pool = encounter_packs(zones, maps);
    packs.chupon_packs(&pool);
}

pub fn randomize_encounters<M, R>(
    zones: &EnemyZones,
    packs: &mut EnemyPacks,
    formations: &EnemyFormations,
    maps: &M,
    boss_percent: u32,
    rng: &mut R,
) where
    M: MapRegistry + ?Sized,
    R: Rng + ?Sized,
{
    let pool = encounter_packs(zones, maps);
    packs.randomize_packs(&pool, boss_percent as f64 / 100.0, formations, rng);
}
