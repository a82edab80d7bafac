use rand::{rngs::StdRng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub mod bosses;
pub mod distort;
pub mod encounters;
pub mod enemies;
pub mod enemy;
pub mod formations;
pub mod items;
pub mod loot;
pub mod maps;
pub mod packs;
pub mod rebalance;
pub mod stats;
pub mod store;
mod text;
pub mod zones;

use enemies::Enemies;
use items::ItemPool;
use maps::Maps;

/// How random encounters are rewritten. Only one mode can be active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EncounterMode {
    #[default]
    Original,
    Shuffle,
    Chupon,
    Random { boss_percent: u32 },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RandomiserSettings {
    pub seed: u64,
    pub balance_boss_stats: bool,
    pub boss_stats_random_percent: bool,
    pub boss_stats_random_percent_min: u32,
    pub boss_stats_random_percent_max: u32,
    pub boss_experience: bool,
    pub random_steals_drops: bool,
    pub shuffle_steals_drops: bool,
    pub shuffle_steals_drops_random_percent: u32,
    pub permadeath: bool,
    pub doom_gaze_no_escape: bool,
    /// `None` keeps every enemy's original escape flag.
    pub encounters_escapable_random: Option<u32>,
    pub random_encounters: EncounterMode,
    pub boss_no_undead: bool,
    pub scan_all: bool,
    pub debug: bool,
    pub input_path: PathBuf,
    pub output_path: PathBuf,
}

impl Default for RandomiserSettings {
    fn default() -> Self {
        Self {
            seed: 0,
            balance_boss_stats: false,
            boss_stats_random_percent: false,
            boss_stats_random_percent_min: 100,
            boss_stats_random_percent_max: 100,
            boss_experience: false,
            random_steals_drops: false,
            shuffle_steals_drops: false,
            shuffle_steals_drops_random_percent: 0,
            permadeath: false,
            doom_gaze_no_escape: false,
            encounters_escapable_random: None,
            random_encounters: EncounterMode::Original,
            boss_no_undead: false,
            scan_all: false,
            debug: false,
            input_path: PathBuf::new(),
            output_path: PathBuf::from("."),
        }
    }
}

impl RandomiserSettings {
    /// Read a JSON settings file. Missing fields take their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)?;
        let settings: Self = serde_json::from_str(&data)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        if self.boss_stats_random_percent
            && self.boss_stats_random_percent_min > self.boss_stats_random_percent_max
        {
            return Err(RandomiserError::Config(format!(
                "boss stat distortion minimum {}% is above the maximum {}%",
                self.boss_stats_random_percent_min, self.boss_stats_random_percent_max
            )));
        }

        let percents = [
            ("shuffle_steals_drops_random_percent", Some(self.shuffle_steals_drops_random_percent)),
            ("encounters_escapable_random", self.encounters_escapable_random),
            (
                "random_encounters boss_percent",
                match self.random_encounters {
                    EncounterMode::Random { boss_percent } => Some(boss_percent),
                    _ => None,
                },
            ),
        ];
        for (name, percent) in percents {
            if let Some(percent) = percent.filter(|&percent| percent > 100) {
                return Err(RandomiserError::Config(format!(
                    "{name} must be between 0 and 100, got {percent}"
                )));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Error)]
pub enum RandomiserError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("settings error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("configuration error: {0}")]
    Config(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("{table}: record is {got} bytes, expected {expected}")]
    RecordSize {
        table: &'static str,
        expected: usize,
        got: usize,
    },
    #[error("{table}: record {index} is out of range ({len} records)")]
    RecordIndex {
        table: &'static str,
        index: usize,
        len: usize,
    },
}

pub type Result<T> = std::result::Result<T, RandomiserError>;

const COPIER_HEADER_SIZE: usize = 0x200;

/// Split off a copier header, if the image carries one.
fn split_header(mut image: Vec<u8>) -> (Vec<u8>, Vec<u8>) {
    if image.len() % 0x400 == COPIER_HEADER_SIZE {
        let rom = image.split_off(COPIER_HEADER_SIZE);
        (image, rom)
    } else {
        (Vec::new(), image)
    }
}

pub fn run(settings: RandomiserSettings) -> Result<()> {
    settings.validate()?;

    if !settings.input_path.is_file() {
        return Err(RandomiserError::Config(format!(
            "Input ROM does not exist: {}",
            settings.input_path.display()
        )));
    }

    // Each seed gets its own folder so runs do not overwrite each other.
    let out_root = settings
        .output_path
        .join(format!("rebalanced_{}", settings.seed));
    if !out_root.exists() {
        fs::create_dir_all(&out_root)?;
    }

    let image = fs::read(&settings.input_path)?;
    let (header, mut rom) = split_header(image);
    log::info!(
        "read {} ({} bytes, header: {})",
        settings.input_path.display(),
        rom.len(),
        !header.is_empty()
    );

    let maps = Maps::read(&rom)?;
    let items = ItemPool::standard();
    let mut rng = StdRng::seed_from_u64(settings.seed);

    let mut enemies = Enemies::read(&rom, &settings)?;
    enemies.apply_mods(&settings, &maps, &items, &mut rng)?;
    enemies.write()?;
    enemies.commit(&mut rom)?;

    let file_name = settings
        .input_path
        .file_name()
        .map(|name| name.to_os_string())
        .unwrap_or_else(|| "rom.smc".into());
    let rom_dest = out_root.join(file_name);
    let mut image = header;
    image.extend_from_slice(&rom);
    fs::write(&rom_dest, image)?;
    log::info!("wrote {}", rom_dest.display());

    if settings.debug {
        let mut log = String::new();
        log.push_str(&format!("seed: {}\n", settings.seed));
        log.push_str(&format!("rom: {} -> {}\n", settings.input_path.display(), rom_dest.display()));
        log.push_str(&format!("settings: {}\n", serde_json::to_string_pretty(&settings)?));
        log.push_str(&enemies.spoiler_log());

        let log_path = out_root.join("spoiler_log.txt");
        fs::write(log_path, log)?;
    }

    Ok(())
}
