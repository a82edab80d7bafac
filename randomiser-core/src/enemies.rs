//! The enemy registry: owns every enemy and the encounter tables, and applies
//! the configured modifications in a fixed order.

use rand::Rng;

use crate::bosses::{self, INVINCIBLE_GUARDIAN_ID, SRBEHEMOTH2_ID};
use crate::distort::{self, PercentRange};
use crate::encounters;
use crate::enemy::{Enemy, DATA_SIZE, ITEMS_SIZE, NAME_SIZE, SPECIAL_NAME_SIZE};
use crate::formations::EnemyFormations;
use crate::items::ItemSource;
use crate::loot;
use crate::maps::MapRegistry;
use crate::packs::{EnemyPack, EnemyPacks};
use crate::rebalance;
use crate::store::{DataArray, RecordStore};
use crate::zones::EnemyZones;
use crate::{EncounterMode, RandomiserError, RandomiserSettings, Result};

pub const DATA_START: usize = 0xF0000;
pub const DATA_END: usize = 0xF2FFF;
pub const NAMES_START: usize = 0xFC050;
pub const NAMES_END: usize = 0xFD0CF;
pub const ITEMS_START: usize = 0xF3000;
pub const ITEMS_END: usize = 0xF35FF;
pub const SPECIAL_NAMES_START: usize = 0xFD0D0;
pub const SPECIAL_NAMES_END: usize = 0xFDFDF;

const HP_HALVED: &[&str] = &["Vargas", "Ultros 3"];
const HP_4X: &[&str] = &["Leader", "Marshal"];
const HP_3X: &[&str] = &["Rizopas", "Piranha", "TunnelArmr"];
const HP_2X: &[&str] = &[
    "Ipooh",
    "GhostTrain",
    "Kefka (Narshe)",
    "Dadaluma",
    "Ifrit",
    "Shiva",
    "Number 024",
    "Number 128",
    "Left Blade",
    "Right Blade",
    "Left Crane",
    "Right Crane",
    "Nerapa",
];
// Opera Ultros is only doubled when the rebalance will not touch it.
const HP_2X_UNBALANCED: &str = "Ultros 2";

/// The four parallel per-enemy record tables.
#[derive(Debug, Clone)]
pub struct EnemyTables {
    pub data: DataArray,
    pub names: DataArray,
    pub items: DataArray,
    pub special_names: DataArray,
}

impl EnemyTables {
    pub fn read(rom: &[u8]) -> Result<Self> {
        Ok(Self {
            data: DataArray::read(rom, "enemy data", DATA_START, DATA_END, DATA_SIZE)?,
            names: DataArray::read(rom, "enemy names", NAMES_START, NAMES_END, NAME_SIZE)?,
            items: DataArray::read(rom, "enemy items", ITEMS_START, ITEMS_END, ITEMS_SIZE)?,
            special_names: DataArray::read(
                rom,
                "enemy special names",
                SPECIAL_NAMES_START,
                SPECIAL_NAMES_END,
                SPECIAL_NAME_SIZE,
            )?,
        })
    }

    fn commit(&self, rom: &mut [u8]) -> Result<()> {
        self.data.commit(rom)?;
        self.names.commit(rom)?;
        self.items.commit(rom)?;
        self.special_names.commit(rom)
    }
}

pub struct Enemies {
    tables: EnemyTables,
    pub enemies: Vec<Enemy>,
    bosses: Vec<usize>,
    pub formations: EnemyFormations,
    pub packs: EnemyPacks,
    pub zones: EnemyZones,
    original_packs: Vec<EnemyPack>,
}

impl Enemies {
    pub fn read(rom: &[u8], settings: &RandomiserSettings) -> Result<Self> {
        Self::from_tables(
            EnemyTables::read(rom)?,
            EnemyFormations::read(rom)?,
            EnemyPacks::read(rom)?,
            EnemyZones::read(rom)?,
            settings,
        )
    }

    pub fn from_tables(
        tables: EnemyTables,
        formations: EnemyFormations,
        packs: EnemyPacks,
        zones: EnemyZones,
        settings: &RandomiserSettings,
    ) -> Result<Self> {
        let count = tables.data.len();
        for table in [&tables.names, &tables.items, &tables.special_names] {
            if table.len() < count {
                return Err(RandomiserError::Config(format!(
                    "{} holds {} records, expected at least {count}",
                    table.name(),
                    table.len()
                )));
            }
        }

        let enemies = (0..count)
            .map(|index| {
                Ok(Enemy::new(
                    index as u16,
                    tables.data.read(index)?,
                    tables.names.read(index)?,
                    tables.items.read(index)?,
                    tables.special_names.read(index)?,
                ))
            })
            .collect::<Result<Vec<_>>>()?;
        let bosses = bosses::boss_indices(&enemies);
        log::info!("loaded {} enemies ({} bosses)", enemies.len(), bosses.len());

        let original_packs = packs.packs.clone();
        let mut registry = Self {
            tables,
            enemies,
            bosses,
            formations,
            packs,
            zones,
            original_packs,
        };

        if settings.doom_gaze_no_escape {
            // No escaping Doom Gaze for a free check when it sits in a shuffled spot.
            let doom_gaze = registry.get_enemy("Doom Gaze")?;
            registry.enemy_mut(doom_gaze)?.no_run = true;
        }

        Ok(registry)
    }

    pub fn bosses(&self) -> impl Iterator<Item = &Enemy> + '_ {
        self.bosses.iter().map(|&index| &self.enemies[index])
    }

    pub fn get_enemy(&self, name: &str) -> Result<u16> {
        if let Some(id) = bosses::name_enemy(name) {
            return Ok(id);
        }
        self.enemies
            .iter()
            .find(|enemy| enemy.name == name)
            .map(Enemy::id)
            .ok_or_else(|| RandomiserError::NotFound(format!("enemy {name}")))
    }

    pub fn get_name(&self, id: u16) -> Result<&str> {
        if let Some(name) = bosses::enemy_name(id) {
            return Ok(name);
        }
        self.enemy(id).map(|enemy| enemy.name.as_str())
    }

    pub fn enemy(&self, id: u16) -> Result<&Enemy> {
        self.enemies
            .get(id as usize)
            .ok_or_else(|| RandomiserError::NotFound(format!("enemy id {id}")))
    }

    pub fn enemy_mut(&mut self, id: u16) -> Result<&mut Enemy> {
        self.enemies
            .get_mut(id as usize)
            .ok_or_else(|| RandomiserError::NotFound(format!("enemy id {id}")))
    }

    pub fn set_common_steal(&mut self, id: u16, item_id: u8) -> Result<()> {
        self.enemy_mut(id)?.set_common_steal(item_id);
        Ok(())
    }

    pub fn set_rare_steal(&mut self, id: u16, item_id: u8) -> Result<()> {
        self.enemy_mut(id)?.set_rare_steal(item_id);
        Ok(())
    }

    pub fn set_common_drop(&mut self, id: u16, item_id: u8) -> Result<()> {
        self.enemy_mut(id)?.set_common_drop(item_id);
        Ok(())
    }

    pub fn set_rare_drop(&mut self, id: u16, item_id: u8) -> Result<()> {
        self.enemy_mut(id)?.set_rare_drop(item_id);
        Ok(())
    }

    /// Fixed HP adjustments for bosses that are usually fought with a short
    /// party, applied before any rebalancing.
    pub fn apply_scaling(&mut self, balance_boss_stats: bool) -> Result<()> {
        for name in HP_HALVED {
            let id = self.get_enemy(name)?;
            let enemy = self.enemy_mut(id)?;
            enemy.hp /= 2;
        }

        for &(id, name) in bosses::ENEMY_NAME {
            let multiplier = if HP_4X.contains(&name) {
                4
            } else if HP_3X.contains(&name) {
                3
            } else if HP_2X.contains(&name) || (!balance_boss_stats && name == HP_2X_UNBALANCED) {
                2
            } else {
                continue;
            };

            let enemy = self.enemy_mut(id)?;
            let scaled = enemy.hp.saturating_mul(multiplier);
            log::debug!("scaling {}'s hp to {} (was {})", name, scaled, enemy.hp);
            enemy.hp = scaled;
        }
        Ok(())
    }

    /// EXP from the custom table, scaled by level.
    pub fn boss_experience(&mut self) -> Result<()> {
        for &(id, exp) in bosses::CUSTOM_EXP {
            let enemy = self.enemy_mut(id)?;
            enemy.exp = exp.saturating_mul(enemy.level as u16);
        }
        Ok(())
    }

    /// Every ordinary enemy becomes escapable with probability `percent`%.
    pub fn set_escapable<R: Rng + ?Sized>(&mut self, percent: u32, rng: &mut R) {
        let escapable = percent as f64 / 100.0;
        for enemy in &mut self.enemies {
            let id = enemy.id();
            if bosses::is_named_boss(id) || id == SRBEHEMOTH2_ID || id == INVINCIBLE_GUARDIAN_ID {
                continue;
            }
            enemy.no_run = rng.gen::<f64>() >= escapable;
        }
    }

    pub fn no_undead_bosses(&mut self) {
        let ids = bosses::ENEMY_NAME
            .iter()
            .map(|&(id, _)| id)
            .chain([SRBEHEMOTH2_ID]);
        for id in ids {
            if let Some(enemy) = self.enemies.get_mut(id as usize) {
                enemy.undead = false;
            }
        }
    }

    pub fn scan_all(&mut self) {
        for enemy in &mut self.enemies {
            enemy.no_scan = false;
        }
    }

    /// Apply every configured modification. The order is fixed: a seed only
    /// reproduces its output when the draws happen in the same sequence.
    pub fn apply_mods<M, I, R>(
        &mut self,
        settings: &RandomiserSettings,
        maps: &M,
        items: &I,
        rng: &mut R,
    ) -> Result<()>
    where
        M: MapRegistry + ?Sized,
        I: ItemSource,
        R: Rng + ?Sized,
    {
        settings.validate()?;
        self.apply_scaling(settings.balance_boss_stats)?;

        if settings.balance_boss_stats {
            log::info!("rebalancing boss stats");
            rebalance::boss_rebalance_stats(&mut self.enemies, &self.bosses);
            rebalance::boss_rebalance_hpmp(&mut self.enemies, &self.bosses);
        }

        if settings.boss_stats_random_percent {
            let range = PercentRange {
                min: settings.boss_stats_random_percent_min,
                max: settings.boss_stats_random_percent_max,
            };
            log::info!("distorting boss stats by {}%..={}%", range.min, range.max);
            distort::boss_stats_randomize(&mut self.enemies, &self.bosses, range, rng);
            distort::boss_hpmp_randomize(&mut self.enemies, &self.bosses, range, rng);
        }

        if settings.boss_experience {
            self.boss_experience()?;
        }

        if settings.random_steals_drops {
            log::info!("randomizing every steal and drop");
            loot::randomize_loot(&mut self.enemies, items, rng);
        }
        if settings.shuffle_steals_drops {
            loot::shuffle_steals_drops_random(
                &mut self.enemies,
                settings.shuffle_steals_drops_random_percent,
                items,
                rng,
            );
        }

        if settings.permadeath {
            loot::remove_fenix_downs(&mut self.enemies, rng)?;
        }

        if let Some(percent) = settings.encounters_escapable_random {
            self.set_escapable(percent, rng);
        }

        if settings.boss_no_undead {
            self.no_undead_bosses();
        }

        match settings.random_encounters {
            EncounterMode::Original => {}
            EncounterMode::Shuffle => {
                encounters::shuffle_encounters(&self.zones, &mut self.packs, maps, rng);
            }
            EncounterMode::Chupon => {
                encounters::chupon_encounters(&self.zones, &mut self.packs, maps);
            }
            EncounterMode::Random { boss_percent } => {
                encounters::randomize_encounters(
                    &self.zones,
                    &mut self.packs,
                    &self.formations,
                    maps,
                    boss_percent,
                    rng,
                );
            }
        }

        if settings.scan_all {
            self.scan_all();
        }
        Ok(())
    }

    /// Serialize every enemy into its tables, then the packs.
    pub fn write(&mut self) -> Result<()> {
        for (index, enemy) in self.enemies.iter().enumerate() {
            self.tables.data.set(index, enemy.data())?;
            self.tables.names.set(index, enemy.name_data())?;
            self.tables.items.set(index, enemy.item_data())?;
            self.tables.special_names.set(index, enemy.special_name_data())?;
        }
        self.packs.write()
    }

    pub fn commit(&self, rom: &mut [u8]) -> Result<()> {
        self.tables.commit(rom)?;
        self.packs.commit(rom)
    }

    // Boss-table names tell the phases of a fight apart.
    fn summary(&self, enemy: &Enemy) -> String {
        let name = self.get_name(enemy.id()).unwrap_or(enemy.name.as_str());
        enemy.summary(name)
    }

    /// Plain-text listing of every boss and every pack that changed.
    pub fn spoiler_log(&self) -> String {
        let mut log = String::new();
        log.push_str("bosses:\n");
        for boss in self.bosses() {
            log.push_str(&format!("  {}\n", self.summary(boss)));
            for &child in bosses::children(boss.id()) {
                if let Ok(enemy) = self.enemy(child) {
                    log.push_str(&format!("    {}\n", self.summary(enemy)));
                }
            }
        }

        log.push_str("packs:\n");
        for (pack, original) in self.packs.packs.iter().zip(&self.original_packs) {
            if pack == original {
                continue;
            }
            log.push_str(&format!(
                "  {:3}: {:?} -> {:?}\n",
                pack.id, original.formations, pack.formations
            ));
        }
        log
    }
}
