//! Random percentage scaling of boss stats. Parents draw their own percents;
//! children reuse the parent's realized factors so every phase of a fight
//! scales together.

use std::collections::HashMap;

use rand::Rng;

use crate::bosses;
use crate::enemy::Enemy;
use crate::stats::{self, Stat};

/// Inclusive percent range; `100..=100` means "leave everything alone".
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct PercentRange {
    pub min: u32,
    pub max: u32,
}

impl PercentRange {
    pub fn is_identity(&self) -> bool {
        self.min == 100 && self.max == 100
    }

    fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        rng.gen_range(self.min..=self.max) as f64 / 100.0
    }
}

pub fn boss_stats_randomize<R: Rng + ?Sized>(
    enemies: &mut [Enemy],
    bosses: &[usize],
    range: PercentRange,
    rng: &mut R,
) {
    if range.is_identity() {
        return;
    }

    // First pass: non-excluded bosses draw a percent per nonzero stat.
    let mut factors: HashMap<u16, HashMap<Stat, f64>> = HashMap::new();
    for &index in bosses {
        let enemy = &mut enemies[index];
        if bosses::is_excluded(enemy.id()) {
            continue;
        }

        let mut enemy_factors = HashMap::new();
        for stat in Stat::ALL {
            let value = stat.get(enemy);
            if value == 0 {
                continue;
            }

            let percent = range.draw(&mut *rng);
            let distorted = stats::scale_stat(value, percent);
            stat.set(enemy, distorted);
            enemy_factors.insert(stat, percent);
            log::debug!(
                "distorting {}'s {} to {} (was {})",
                enemy.name,
                stat.name(),
                distorted,
                value
            );
        }

        if bosses::is_parent(enemy.id()) {
            factors.insert(enemy.id(), enemy_factors);
        }
    }

    // Second pass: children reapply whatever their parent drew.
    for &index in bosses {
        let enemy = &mut enemies[index];
        let Some(parent_id) = bosses::child_to_parent(enemy.id()) else {
            continue;
        };
        let Some(parent_factors) = factors.get(&parent_id) else {
            continue;
        };

        for stat in Stat::ALL {
            let value = stat.get(enemy);
            if value == 0 {
                continue;
            }
            if let Some(&factor) = parent_factors.get(&stat) {
                let distorted = stats::scale_stat(value, factor);
                stat.set(enemy, distorted);
                log::debug!(
                    "child {}'s {} distorted to {} using parent's ({}) factor {:.2}",
                    enemy.name,
                    stat.name(),
                    distorted,
                    parent_id,
                    factor
                );
            }
        }
    }
}

pub fn boss_hpmp_randomize<R: Rng + ?Sized>(
    enemies: &mut [Enemy],
    bosses: &[usize],
    range: PercentRange,
    rng: &mut R,
) {
    if range.is_identity() {
        return;
    }

    let factors = stats::hpmp_parent_pass(enemies, bosses, "distorted", |enemy| {
        let hp = distort_hpmp(enemy.hp, range.draw(&mut *rng));
        let mp = distort_hpmp(enemy.mp, range.draw(&mut *rng));
        (hp, mp)
    });
    stats::hpmp_child_pass(enemies, bosses, "distortion", &factors);
}

// HP and MP never drop below 1, even when they started at 0.
fn distort_hpmp(value: u16, percent: f64) -> u16 {
    (value as f64 * percent).clamp(1.0, u16::MAX as f64) as u16
}
