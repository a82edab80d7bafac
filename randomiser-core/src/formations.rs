use crate::bosses;
use crate::store::{DataArray, RecordStore};
use crate::Result;

pub const FORMATIONS_START: usize = 0xF6200;
pub const FORMATIONS_END: usize = 0xF83BF;
pub const FORMATION_SIZE: usize = 15;

pub const ENEMY_SLOTS: usize = 6;

const PRESENT_MASK: usize = 1;
const ENEMY_LOW: usize = 2;
const ENEMY_HIGH_BITS: usize = 14;

/// One battle grouping of up to six enemies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnemyFormation {
    pub id: u16,
    pub enemies: [Option<u16>; ENEMY_SLOTS],
}

impl EnemyFormation {
    pub fn from_record(id: u16, record: &[u8]) -> Self {
        let present = record.get(PRESENT_MASK).copied().unwrap_or(0);
        let high = record.get(ENEMY_HIGH_BITS).copied().unwrap_or(0);

        let mut enemies = [None; ENEMY_SLOTS];
        for (slot, enemy) in enemies.iter_mut().enumerate() {
            if present & (1 << slot) == 0 {
                continue;
            }
            let low = record.get(ENEMY_LOW + slot).copied().unwrap_or(0) as u16;
            let high = ((high >> slot) & 1) as u16;
            *enemy = Some(low | (high << 8));
        }

        Self { id, enemies }
    }

    pub fn enemy_ids(&self) -> impl Iterator<Item = u16> + '_ {
        self.enemies.iter().flatten().copied()
    }

    pub fn has_boss(&self) -> bool {
        self.enemy_ids().any(bosses::is_boss)
    }

    pub fn is_empty(&self) -> bool {
        self.enemy_ids().next().is_none()
    }
}

/// Read-only view of the formation table.
#[derive(Debug, Clone)]
pub struct EnemyFormations {
    pub formations: Vec<EnemyFormation>,
}

impl EnemyFormations {
    /// Scripted "presenter" formation. It is never moved between slots.
    pub const PRESENTER: u16 = 0x1A2;
    /// Coliseum Chupon, used when every random encounter becomes Chupon.
    pub const CHUPON: u16 = 0x1D5;

    pub fn read(rom: &[u8]) -> Result<Self> {
        let table = DataArray::read(rom, "formations", FORMATIONS_START, FORMATIONS_END, FORMATION_SIZE)?;
        Self::from_table(&table)
    }

    pub fn from_table(table: &DataArray) -> Result<Self> {
        let formations = (0..table.len())
            .map(|index| Ok(EnemyFormation::from_record(index as u16, table.read(index)?)))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { formations })
    }

    /// Formations containing at least one boss.
    pub fn boss_formations(&self) -> Vec<u16> {
        self.formations
            .iter()
            .filter(|formation| formation.id != Self::PRESENTER && formation.has_boss())
            .map(|formation| formation.id)
            .collect()
    }

    /// Non-empty formations without any boss.
    pub fn regular_formations(&self) -> Vec<u16> {
        self.formations
            .iter()
            .filter(|formation| formation.id != Self::PRESENTER)
            .filter(|formation| !formation.is_empty() && !formation.has_boss())
            .map(|formation| formation.id)
            .collect()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Record with the given enemies in the first slots.
    pub(crate) fn formation_record(enemies: &[u16]) -> Vec<u8> {
        let mut record = vec![0u8; FORMATION_SIZE];
        for (slot, &enemy) in enemies.iter().enumerate() {
            record[PRESENT_MASK] |= 1 << slot;
            record[ENEMY_LOW + slot] = (enemy & 0xFF) as u8;
            record[ENEMY_HIGH_BITS] |= (((enemy >> 8) & 1) as u8) << slot;
        }
        record
    }

    #[test]
    fn decodes_nine_bit_enemy_ids() {
        let formation = EnemyFormation::from_record(3, &formation_record(&[12, 259, 300]));
        assert_eq!(formation.enemy_ids().collect::<Vec<_>>(), vec![12, 259, 300]);
        assert_eq!(formation.enemies[3], None);
        assert!(formation.has_boss());
    }

    #[test]
    fn splits_boss_and_regular_formations() {
        let table = DataArray::from_records(
            "formations",
            FORMATION_SIZE,
            vec![
                formation_record(&[1, 2]),
                formation_record(&[]),
                formation_record(&[282]),
                formation_record(&[5]),
            ],
        )
        .unwrap();
        let formations = EnemyFormations::from_table(&table).unwrap();
        assert_eq!(formations.regular_formations(), vec![0, 3]);
        assert_eq!(formations.boss_formations(), vec![2]);
    }
}
