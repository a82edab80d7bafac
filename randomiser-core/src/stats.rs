use std::collections::HashMap;

use crate::bosses;
use crate::enemy::Enemy;

/// The five core stats, iterated identically by rebalancing and distortion.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Stat {
    Speed,
    Vigor,
    Defense,
    MagicDefense,
    Magic,
}

impl Stat {
    pub const ALL: [Stat; 5] = [
        Stat::Speed,
        Stat::Vigor,
        Stat::Defense,
        Stat::MagicDefense,
        Stat::Magic,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Stat::Speed => "speed",
            Stat::Vigor => "vigor",
            Stat::Defense => "defense",
            Stat::MagicDefense => "magic_defense",
            Stat::Magic => "magic",
        }
    }

    pub fn get(self, enemy: &Enemy) -> u8 {
        match self {
            Stat::Speed => enemy.speed,
            Stat::Vigor => enemy.vigor,
            Stat::Defense => enemy.defense,
            Stat::MagicDefense => enemy.magic_defense,
            Stat::Magic => enemy.magic,
        }
    }

    pub fn set(self, enemy: &mut Enemy, value: u8) {
        let field = match self {
            Stat::Speed => &mut enemy.speed,
            Stat::Vigor => &mut enemy.vigor,
            Stat::Defense => &mut enemy.defense,
            Stat::MagicDefense => &mut enemy.magic_defense,
            Stat::Magic => &mut enemy.magic,
        };
        *field = value;
    }
}

/// Truncating scale of an 8-bit stat, clamped to 0..=255.
pub(crate) fn scale_stat(value: u8, factor: f64) -> u8 {
    (value as f64 * factor).clamp(0.0, u8::MAX as f64) as u8
}

/// Truncating scale of HP/MP, clamped to 0..=65535.
pub(crate) fn scale_u16(value: u16, factor: f64) -> u16 {
    (value as f64 * factor).clamp(0.0, u16::MAX as f64) as u16
}

/// `new / old`, or 1 when there was nothing to scale.
pub(crate) fn ratio(new: u16, old: u16) -> f64 {
    if old > 0 {
        new as f64 / old as f64
    } else {
        1.0
    }
}

/// A parent's finalized HP/MP and the multipliers its children inherit.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct HpMpFactor {
    pub hp: u16,
    pub hp_ratio: f64,
    pub mp_ratio: f64,
}

/// First pass over every non-excluded boss: apply `transform` (which returns
/// the new HP and MP) and record the realized factors of every parent.
pub(crate) fn hpmp_parent_pass<F>(
    enemies: &mut [Enemy],
    bosses: &[usize],
    action: &str,
    mut transform: F,
) -> HashMap<u16, HpMpFactor>
where
    F: FnMut(&Enemy) -> (u16, u16),
{
    let mut factors = HashMap::new();

    for &index in bosses {
        let enemy = &mut enemies[index];
        if bosses::is_excluded(enemy.id()) {
            continue;
        }

        let (new_hp, new_mp) = transform(enemy);

        if bosses::is_parent(enemy.id()) {
            let factor = HpMpFactor {
                hp: new_hp,
                hp_ratio: ratio(new_hp, enemy.hp),
                mp_ratio: ratio(new_mp, enemy.mp),
            };
            log::debug!(
                "parent {} ({}) {}: hp x{}, mp x{}",
                enemy.name,
                enemy.id(),
                action,
                factor.hp_ratio,
                factor.mp_ratio
            );
            factors.insert(enemy.id(), factor);
        }

        log::debug!(
            "{}'s hp {} to {} (was {}), mp {} to {} (was {})",
            enemy.name,
            action,
            new_hp,
            enemy.hp,
            action,
            new_mp,
            enemy.mp
        );
        enemy.hp = new_hp;
        enemy.mp = new_mp;
    }

    factors
}

/// Second pass over every excluded boss, reusing the factors of its parent.
/// Parents must be final before this runs.
pub(crate) fn hpmp_child_pass(
    enemies: &mut [Enemy],
    bosses: &[usize],
    action: &str,
    factors: &HashMap<u16, HpMpFactor>,
) {
    for &index in bosses {
        let enemy = &mut enemies[index];
        if !bosses::is_excluded(enemy.id()) {
            continue;
        }

        let parent = bosses::child_to_parent(enemy.id())
            .and_then(|parent_id| factors.get(&parent_id).map(|factor| (parent_id, factor)));

        match parent {
            Some((parent_id, factor)) if enemy.id() == bosses::HALF_HP_CHILD_ID => {
                enemy.hp = factor.hp / 2;
                log::debug!(
                    "special case: child {} ({}) hp set to half of parent's ({}) hp: {}",
                    enemy.name,
                    enemy.id(),
                    parent_id,
                    enemy.hp
                );
            }
            Some((parent_id, factor)) => {
                enemy.hp = scale_u16(enemy.hp, factor.hp_ratio);
                enemy.mp = scale_u16(enemy.mp, factor.mp_ratio);
                log::debug!(
                    "child {} ({}) inherits parent's ({}) {}: hp {}, mp {}",
                    enemy.name,
                    enemy.id(),
                    parent_id,
                    action,
                    enemy.hp,
                    enemy.mp
                );
            }
            None => {
                log::debug!("no hp adjustment for child {} ({})", enemy.name, enemy.id());
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::enemy::DATA_SIZE;

    /// Blank enemy table sized to cover every boss id.
    pub(crate) fn blank_enemies(count: u16) -> Vec<Enemy> {
        (0..count)
            .map(|id| Enemy::new(id, &[0u8; DATA_SIZE], &[], &[], &[]))
            .collect()
    }

    #[test]
    fn stat_accessors_cover_every_field() {
        let mut enemies = blank_enemies(1);
        let enemy = &mut enemies[0];
        for (value, stat) in Stat::ALL.iter().enumerate() {
            stat.set(enemy, value as u8 + 1);
        }
        assert_eq!(
            (enemy.speed, enemy.vigor, enemy.defense, enemy.magic_defense, enemy.magic),
            (1, 2, 3, 4, 5)
        );
        assert_eq!(Stat::MagicDefense.get(enemy), 4);
    }

    #[test]
    fn scaling_truncates_and_clamps() {
        assert_eq!(scale_stat(100, 1.999), 199);
        assert_eq!(scale_stat(200, 2.0), 255);
        assert_eq!(scale_u16(40000, 2.0), u16::MAX);
        assert_eq!(ratio(10, 0), 1.0);
    }

    #[test]
    fn child_pass_without_parent_factor_is_noop() {
        let mut enemies = blank_enemies(400);
        enemies[288].hp = 500;
        enemies[288].mp = 40;
        hpmp_child_pass(&mut enemies, &[288], "test", &HashMap::new());
        assert_eq!((enemies[288].hp, enemies[288].mp), (500, 40));
    }

    #[test]
    fn child_pass_reapplies_parent_ratio() {
        let mut enemies = blank_enemies(400);
        enemies[288].hp = 100;
        enemies[288].mp = 10;
        let mut factors = HashMap::new();
        factors.insert(
            287,
            HpMpFactor {
                hp: 1500,
                hp_ratio: 1.5,
                mp_ratio: 2.0,
            },
        );
        hpmp_child_pass(&mut enemies, &[288], "test", &factors);
        assert_eq!((enemies[288].hp, enemies[288].mp), (150, 20));
    }
}
