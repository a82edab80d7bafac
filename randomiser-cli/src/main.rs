use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use randomiser_core::{run, EncounterMode, RandomiserSettings};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Encounters {
    Original,
    Shuffle,
    Chupon,
    Random,
}

#[derive(Debug, Parser)]
#[command(name = "enemy-randomiser", version, about = "Boss rebalancer and enemy/encounter randomiser")]
struct Args {
    #[arg(long)]
    input: PathBuf,

    #[arg(long)]
    output: PathBuf,

    #[arg(long)]
    seed: Option<u64>,

    /// JSON settings file used as the base. Flags below override it; a bare
    /// switch means `true`, `--switch false` turns a base option off.
    #[arg(long, value_name = "JSON")]
    settings: Option<PathBuf>,

    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    balance_boss_stats: Option<bool>,

    /// Distort boss stats by a random percent in MIN..=MAX.
    #[arg(long, num_args = 2, value_names = ["MIN", "MAX"])]
    boss_stats_random_percent: Option<Vec<u32>>,

    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    boss_experience: Option<bool>,

    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    random_steals_drops: Option<bool>,

    /// Shuffle steals/drops, replacing PERCENT of them with random items.
    #[arg(long, value_name = "PERCENT")]
    shuffle_steals_drops: Option<u32>,

    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    permadeath: Option<bool>,

    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    doom_gaze_no_escape: Option<bool>,

    /// Chance for each ordinary enemy to be escapable.
    #[arg(long, value_name = "PERCENT")]
    encounters_escapable_random: Option<u32>,

    #[arg(long, value_enum)]
    random_encounters: Option<Encounters>,

    /// Boss formation chance for `--random-encounters random`.
    #[arg(long, value_name = "PERCENT", default_value_t = 0)]
    random_encounters_boss_percent: u32,

    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    boss_no_undead: Option<bool>,

    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    scan_all: Option<bool>,

    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    debug: Option<bool>,
}

fn setup_logging(debug: bool) -> Result<(), fern::InitError> {
    let level = if debug {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{} {} {}] {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                record.target(),
                message
            ))
        })
        .level(level)
        .chain(std::io::stderr())
        .apply()?;
    Ok(())
}

fn build_settings(args: Args) -> randomiser_core::Result<RandomiserSettings> {
    let mut settings = match &args.settings {
        Some(path) => RandomiserSettings::load(path)?,
        None => RandomiserSettings::default(),
    };

    settings.input_path = args.input;
    settings.output_path = args.output;
    if let Some(seed) = args.seed {
        settings.seed = seed;
    }

    if let Some(enabled) = args.balance_boss_stats {
        settings.balance_boss_stats = enabled;
    }
    if let Some(range) = args.boss_stats_random_percent {
        settings.boss_stats_random_percent = true;
        settings.boss_stats_random_percent_min = range[0];
        settings.boss_stats_random_percent_max = range[1];
    }
    if let Some(enabled) = args.boss_experience {
        settings.boss_experience = enabled;
    }
    if let Some(enabled) = args.random_steals_drops {
        settings.random_steals_drops = enabled;
    }
    if let Some(percent) = args.shuffle_steals_drops {
        settings.shuffle_steals_drops = true;
        settings.shuffle_steals_drops_random_percent = percent;
    }
    if let Some(enabled) = args.permadeath {
        settings.permadeath = enabled;
    }
    if let Some(enabled) = args.doom_gaze_no_escape {
        settings.doom_gaze_no_escape = enabled;
    }
    if args.encounters_escapable_random.is_some() {
        settings.encounters_escapable_random = args.encounters_escapable_random;
    }
    if let Some(mode) = args.random_encounters {
        settings.random_encounters = match mode {
            Encounters::Original => EncounterMode::Original,
            Encounters::Shuffle => EncounterMode::Shuffle,
            Encounters::Chupon => EncounterMode::Chupon,
            Encounters::Random => EncounterMode::Random {
                boss_percent: args.random_encounters_boss_percent,
            },
        };
    }
    if let Some(enabled) = args.boss_no_undead {
        settings.boss_no_undead = enabled;
    }
    if let Some(enabled) = args.scan_all {
        settings.scan_all = enabled;
    }
    if let Some(enabled) = args.debug {
        settings.debug = enabled;
    }

    Ok(settings)
}

fn main() {
    let args = Args::parse();

    let settings = match build_settings(args) {
        Ok(settings) => settings,
        Err(err) => {
            eprintln!("Error: {err}");
            std::process::exit(1);
        }
    };

    if let Err(err) = setup_logging(settings.debug) {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }

    log::info!("seed {}", settings.seed);
    if let Err(err) = run(settings) {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}
