use rand::seq::SliceRandom;
use rand::Rng;

use crate::encounters;
use crate::formations::EnemyFormations;
use crate::store::{DataArray, RecordStore};
use crate::Result;

pub const PACKS_START: usize = 0xF4800;
pub const PACKS_END: usize = 0xF4FFF;
pub const PACK_SIZE: usize = 8;

pub const FORMATION_COUNT: usize = 4;

const EXTRA_FORMATIONS_FLAG: u16 = 0x8000;
const FORMATION_MASK: u16 = 0x7FFF;

/// Four formation slots a zone can roll between.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnemyPack {
    pub id: u8,
    pub formations: [u16; FORMATION_COUNT],
    /// Slot stands for its formation and the three that follow it.
    pub extra_formations: [bool; FORMATION_COUNT],
}

impl EnemyPack {
    pub fn from_record(id: u8, record: &[u8]) -> Self {
        let mut formations = [0; FORMATION_COUNT];
        let mut extra_formations = [false; FORMATION_COUNT];
        for (slot, bytes) in record.chunks_exact(2).take(FORMATION_COUNT).enumerate() {
            let value = u16::from_le_bytes([bytes[0], bytes[1]]);
            formations[slot] = value & FORMATION_MASK;
            extra_formations[slot] = value & EXTRA_FORMATIONS_FLAG != 0;
        }
        Self {
            id,
            formations,
            extra_formations,
        }
    }

    pub fn data(&self) -> Vec<u8> {
        self.formations
            .iter()
            .zip(self.extra_formations)
            .flat_map(|(&formation, extra)| {
                let flag = if extra { EXTRA_FORMATIONS_FLAG } else { 0 };
                ((formation & FORMATION_MASK) | flag).to_le_bytes()
            })
            .collect()
    }
}

#[derive(Debug, Clone)]
pub struct EnemyPacks {
    table: DataArray,
    pub packs: Vec<EnemyPack>,
}

impl EnemyPacks {
    /// Veldt pack, rolled from the party's past battles instead of a zone.
    pub const VELDT: u8 = 0xFF;
    /// Pack used inside the Zone Eater.
    pub const ZONE_EATER: u8 = 0xFE;

    pub fn read(rom: &[u8]) -> Result<Self> {
        let table = DataArray::read(rom, "packs", PACKS_START, PACKS_END, PACK_SIZE)?;
        Self::from_table(table)
    }

    pub fn from_table(table: DataArray) -> Result<Self> {
        let packs = (0..table.len())
            .map(|index| Ok(EnemyPack::from_record(index as u8, table.read(index)?)))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { table, packs })
    }

    pub fn get_mut(&mut self, id: u8) -> Option<&mut EnemyPack> {
        self.packs.get_mut(id as usize)
    }

    /// Every replaceable slot of every pooled pack becomes the Chupon fight.
    pub fn chupon_packs(&mut self, pool: &[u8]) {
        let mut rewritten = 0;
        for &id in pool {
            let Some(pack) = self.get_mut(id) else {
                log::warn!("pack {id} is out of range, skipping");
                continue;
            };
            for slot in 0..FORMATION_COUNT {
                if encounters::skip_shuffling_formation(pack.formations[slot]) {
                    continue;
                }
                pack.formations[slot] = EnemyFormations::CHUPON;
                pack.extra_formations[slot] = false;
                rewritten += 1;
            }
        }
        log::info!("replaced {rewritten} pack slots with chupon");
    }

    /// Each replaceable slot of each pooled pack rolls a boss formation with
    /// probability `boss_percent`, otherwise a regular one.
    pub fn randomize_packs<R: Rng + ?Sized>(
        &mut self,
        pool: &[u8],
        boss_percent: f64,
        formations: &EnemyFormations,
        rng: &mut R,
    ) {
        let boss_formations = formations.boss_formations();
        let regular_formations = formations.regular_formations();

        for &id in pool {
            let Some(pack) = self.get_mut(id) else {
                log::warn!("pack {id} is out of range, skipping");
                continue;
            };
            for slot in 0..FORMATION_COUNT {
                if encounters::skip_shuffling_formation(pack.formations[slot]) {
                    continue;
                }

                let candidates = if rng.gen::<f64>() < boss_percent {
                    &boss_formations
                } else {
                    &regular_formations
                };
                let Some(&formation) = candidates.choose(&mut *rng) else {
                    continue;
                };

                log::debug!(
                    "pack {} slot {} formation {} -> {}",
                    pack.id,
                    slot,
                    pack.formations[slot],
                    formation
                );
                pack.formations[slot] = formation;
                pack.extra_formations[slot] = false;
            }
        }
    }

    /// Push every pack back into the backing table.
    pub fn write(&mut self) -> Result<()> {
        let records = self.packs.iter().map(EnemyPack::data).collect();
        self.table.write_all(records)
    }

    pub fn commit(&self, rom: &mut [u8]) -> Result<()> {
        self.table.commit(rom)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::formations::tests::formation_record;
    use crate::formations::FORMATION_SIZE;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    pub(crate) fn pack_record(slots: [(u16, bool); FORMATION_COUNT]) -> Vec<u8> {
        let pack = EnemyPack {
            id: 0,
            formations: slots.map(|(formation, _)| formation),
            extra_formations: slots.map(|(_, extra)| extra),
        };
        pack.data()
    }

    pub(crate) fn packs_from(records: Vec<Vec<u8>>) -> EnemyPacks {
        EnemyPacks::from_table(DataArray::from_records("packs", PACK_SIZE, records).unwrap()).unwrap()
    }

    fn formations() -> EnemyFormations {
        // 0: empty, 1-2: regular, 3: boss.
        let table = DataArray::from_records(
            "formations",
            FORMATION_SIZE,
            vec![
                formation_record(&[]),
                formation_record(&[4, 4]),
                formation_record(&[9]),
                formation_record(&[259]),
            ],
        )
        .unwrap();
        EnemyFormations::from_table(&table).unwrap()
    }

    #[test]
    fn extra_formation_flag_lives_in_bit_15() {
        let record = vec![0x10, 0x80, 0x22, 0x00, 0xFF, 0x01, 0x00, 0x80];
        let pack = EnemyPack::from_record(7, &record);
        assert_eq!(pack.formations, [0x10, 0x22, 0x1FF, 0]);
        assert_eq!(pack.extra_formations, [true, false, false, true]);
        assert_eq!(pack.data(), record);
    }

    #[test]
    fn chupon_keeps_presenter_and_clears_flags() {
        let presenter = EnemyFormations::PRESENTER;
        let mut packs = packs_from(vec![
            pack_record([(1, true), (presenter, false), (2, false), (3, false)]),
            pack_record([(5, false); 4]),
        ]);

        packs.chupon_packs(&[0]);

        assert_eq!(
            packs.packs[0].formations,
            [EnemyFormations::CHUPON, presenter, EnemyFormations::CHUPON, EnemyFormations::CHUPON]
        );
        assert_eq!(packs.packs[0].extra_formations, [false; 4]);
        assert_eq!(packs.packs[1].formations, [5; 4]);
    }

    #[test]
    fn randomize_draws_from_the_requested_pool() {
        let formations = formations();
        let mut rng = StdRng::seed_from_u64(3);

        let mut packs = packs_from(vec![pack_record([(0, true); 4])]);
        packs.randomize_packs(&[0], 1.0, &formations, &mut rng);
        assert_eq!(packs.packs[0].formations, [3; 4]);
        assert_eq!(packs.packs[0].extra_formations, [false; 4]);

        let mut packs = packs_from(vec![pack_record([(0, false); 4])]);
        packs.randomize_packs(&[0], 0.0, &formations, &mut rng);
        assert!(packs.packs[0].formations.iter().all(|id| [1, 2].contains(id)));
    }

    #[test]
    fn empty_pool_leaves_slot_alone() {
        let table = DataArray::from_records("formations", FORMATION_SIZE, vec![formation_record(&[4])]).unwrap();
        let formations = EnemyFormations::from_table(&table).unwrap();
        let mut packs = packs_from(vec![pack_record([(0, true); 4])]);
        let mut rng = StdRng::seed_from_u64(3);

        packs.randomize_packs(&[0], 1.0, &formations, &mut rng);

        assert_eq!(packs.packs[0].formations, [0; 4]);
        assert_eq!(packs.packs[0].extra_formations, [true; 4]);
    }

    #[test]
    fn write_round_trips_through_the_table() {
        let mut packs = packs_from(vec![pack_record([(1, false); 4])]);
        packs.packs[0].formations[2] = 0x123;
        packs.packs[0].extra_formations[2] = true;
        packs.write().unwrap();

        let reread = EnemyPacks::from_table(packs.table.clone()).unwrap();
        assert_eq!(reread.packs[0], packs.packs[0]);
    }
}
