//! Deterministic "pull toward baseline" for boss stats.
//!
//! Neither pass is idempotent: running one twice pulls values closer to the
//! baseline a second time.

use crate::enemy::Enemy;
use crate::stats::{self, Stat};

/// Core stat baseline, in `Stat::ALL` order.
pub const BASELINE_STATS: [u8; 5] = [50, 60, 135, 155, 10];
pub const BASELINE_HP: u32 = 650;
pub const BASELINE_MP: u32 = 230;

fn pull_toward(value: u32, baseline: u32) -> u32 {
    if value < baseline {
        (baseline + value) / 2
    } else {
        value
    }
}

/// Raise every boss's core stats halfway to the baseline. The hierarchy is
/// ignored here.
pub fn boss_rebalance_stats(enemies: &mut [Enemy], bosses: &[usize]) {
    for &index in bosses {
        let enemy = &mut enemies[index];
        for (stat, baseline) in Stat::ALL.into_iter().zip(BASELINE_STATS) {
            let value = stat.get(enemy);
            let rebalanced = pull_toward(value as u32, baseline as u32) as u8;
            stat.set(enemy, rebalanced);
            log::debug!(
                "normalizing {}'s {} to {} (was {})",
                enemy.name,
                stat.name(),
                rebalanced,
                value
            );
        }
    }
}

/// Raise HP/MP halfway to a level-scaled baseline, then scale each child by
/// its parent's realized ratio.
pub fn boss_rebalance_hpmp(enemies: &mut [Enemy], bosses: &[usize]) {
    let factors = stats::hpmp_parent_pass(enemies, bosses, "rebalanced", |enemy| {
        let level = enemy.level as u32;
        let hp = pull_toward(enemy.hp as u32, BASELINE_HP * level);
        let mp = pull_toward(enemy.mp as u32, BASELINE_MP * level);
        (clamp_u16(hp), clamp_u16(mp))
    });
    stats::hpmp_child_pass(enemies, bosses, "rebalancing", &factors);
}

fn clamp_u16(value: u32) -> u16 {
    value.min(u16::MAX as u32) as u16
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bosses::{self, HALF_HP_CHILD_ID};
    use crate::stats::tests::blank_enemies;

    #[test]
    fn core_stats_move_halfway_to_baseline() {
        let mut enemies = blank_enemies(400);
        let boss = &mut enemies[256];
        boss.speed = 30;
        boss.vigor = 80;
        boss.defense = 135;
        boss.magic_defense = 0;
        boss.magic = 9;

        boss_rebalance_stats(&mut enemies, &[256]);
        let boss = &enemies[256];
        assert_eq!(boss.speed, 40);
        assert_eq!(boss.vigor, 80);
        assert_eq!(boss.defense, 135);
        assert_eq!(boss.magic_defense, 77);
        assert_eq!(boss.magic, 9);
    }

    #[test]
    fn rebalanced_stats_stay_between_value_and_baseline() {
        let mut enemies = blank_enemies(400);
        let bosses = bosses::boss_indices(&enemies);
        for (n, &index) in bosses.iter().enumerate() {
            for (i, stat) in Stat::ALL.iter().enumerate() {
                stat.set(&mut enemies[index], ((n * 37 + i * 53) % 256) as u8);
            }
        }
        let before = enemies.clone();

        boss_rebalance_stats(&mut enemies, &bosses);

        for &index in &bosses {
            for (stat, baseline) in Stat::ALL.into_iter().zip(BASELINE_STATS) {
                let old = stat.get(&before[index]);
                let new = stat.get(&enemies[index]);
                if old >= baseline {
                    assert_eq!(new, old);
                } else {
                    assert!(new >= old && new <= baseline);
                }
            }
        }
    }

    #[test]
    fn running_twice_pulls_again() {
        let mut enemies = blank_enemies(400);
        enemies[256].speed = 10;
        boss_rebalance_stats(&mut enemies, &[256]);
        assert_eq!(enemies[256].speed, 30);
        boss_rebalance_stats(&mut enemies, &[256]);
        assert_eq!(enemies[256].speed, 40);
    }

    #[test]
    fn children_follow_parent_ratio() {
        let mut enemies = blank_enemies(400);
        // Curley (287) with Larry (288) and Moe (289).
        enemies[287].level = 4;
        enemies[287].hp = 1300;
        enemies[287].mp = 0;
        enemies[288].level = 4;
        enemies[288].hp = 200;
        enemies[288].mp = 50;
        enemies[289].hp = 0;

        boss_rebalance_hpmp(&mut enemies, &[287, 288, 289]);

        // Baseline 2600: (2600 + 1300) / 2 = 1950, a 1.5x ratio.
        assert_eq!(enemies[287].hp, 1950);
        assert_eq!(enemies[287].mp, 460);
        assert_eq!(enemies[288].hp, 300);
        // Parent MP was 0, so its MP ratio is 1.
        assert_eq!(enemies[288].mp, 50);
        assert_eq!(enemies[289].hp, 0);
    }

    #[test]
    fn children_use_their_own_values_not_their_baseline() {
        let mut enemies = blank_enemies(400);
        enemies[287].level = 1;
        enemies[287].hp = 5000;
        enemies[288].level = 50;
        enemies[288].hp = 10;

        boss_rebalance_hpmp(&mut enemies, &[287, 288]);
        assert_eq!(enemies[287].hp, 5000);
        assert_eq!(enemies[288].hp, 10);
    }

    #[test]
    fn every_child_follows_its_parent_hp_ratio() {
        let mut enemies = blank_enemies(400);
        let bosses = bosses::boss_indices(&enemies);
        for (n, &index) in bosses.iter().enumerate() {
            let enemy = &mut enemies[index];
            enemy.level = (n % 20) as u8 + 5;
            enemy.hp = (n as u16 + 1) * 90;
            enemy.mp = (n as u16 + 1) * 11;
        }
        let before = enemies.clone();

        boss_rebalance_hpmp(&mut enemies, &bosses);

        for (parent, children) in bosses::HIERARCHY {
            let parent = *parent as usize;
            let hp_ratio = stats::ratio(enemies[parent].hp, before[parent].hp);
            let mp_ratio = stats::ratio(enemies[parent].mp, before[parent].mp);
            for &child in *children {
                let child = child as usize;
                if child == HALF_HP_CHILD_ID as usize {
                    assert_eq!(enemies[child].hp, enemies[parent].hp / 2);
                    assert_eq!(enemies[child].mp, before[child].mp);
                } else {
                    assert_eq!(enemies[child].hp, stats::scale_u16(before[child].hp, hp_ratio));
                    assert_eq!(enemies[child].mp, stats::scale_u16(before[child].mp, mp_ratio));
                }
            }
        }
    }

    #[test]
    fn parent_gaining_a_fifth_lifts_child_by_a_fifth() {
        let mut enemies = blank_enemies(400);
        enemies[287].hp = 1000;
        enemies[288].hp = 100;

        let factors = stats::hpmp_parent_pass(&mut enemies, &[287, 288], "rebalanced", |enemy| (1200, enemy.mp));
        stats::hpmp_child_pass(&mut enemies, &[287, 288], "rebalancing", &factors);

        assert_eq!(enemies[287].hp, 1200);
        assert_eq!(enemies[288].hp, 120);
    }

    #[test]
    fn half_hp_child_tracks_parent() {
        let mut enemies = blank_enemies(400);
        enemies[259].level = 10;
        enemies[259].hp = 1001;
        enemies[HALF_HP_CHILD_ID as usize].hp = 9000;
        enemies[HALF_HP_CHILD_ID as usize].mp = 77;

        boss_rebalance_hpmp(&mut enemies, &[259, HALF_HP_CHILD_ID as usize]);

        assert_eq!(enemies[259].hp, 3750);
        assert_eq!(enemies[HALF_HP_CHILD_ID as usize].hp, 1875);
        assert_eq!(enemies[HALF_HP_CHILD_ID as usize].mp, 77);
    }

    #[test]
    fn hp_saturates() {
        let mut enemies = blank_enemies(400);
        enemies[256].level = 255;
        enemies[256].hp = 65000;
        boss_rebalance_hpmp(&mut enemies, &[256]);
        assert_eq!(enemies[256].hp, u16::MAX);
    }
}
