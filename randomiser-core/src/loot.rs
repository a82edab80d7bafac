use rand::seq::{index, SliceRandom};
use rand::Rng;

use crate::bosses;
use crate::enemy::Enemy;
use crate::items::{self, ItemSource};
use crate::{RandomiserError, Result};

/// Every loot slot of every enemy gets a fresh random item.
pub fn randomize_loot<I, R>(enemies: &mut [Enemy], items: &I, rng: &mut R)
where
    I: ItemSource,
    R: Rng + ?Sized,
{
    for enemy in enemies.iter_mut() {
        enemy.set_common_steal(items.get_random(rng));
        enemy.set_rare_steal(items.get_random(rng));
        enemy.set_common_drop(items.get_random(rng));
        enemy.set_rare_drop(items.get_random(rng));
    }
}

// Named enemies contribute steals, plus drops unless the slots are unused.
fn has_drop_slots(enemy: &Enemy) -> bool {
    !bosses::is_final_battle_enemy(enemy.id())
}

/// Pool every named enemy's loot, replace `percent`% of it with fresh random
/// items, shuffle, and deal it back out in the same slot order.
pub fn shuffle_steals_drops_random<I, R>(enemies: &mut [Enemy], percent: u32, items: &I, rng: &mut R)
where
    I: ItemSource,
    R: Rng + ?Sized,
{
    let mut steals_drops = Vec::new();
    for enemy in enemies.iter().filter(|enemy| !enemy.name.is_empty()) {
        steals_drops.push(enemy.steal_common);
        steals_drops.push(enemy.steal_rare);
        if has_drop_slots(enemy) {
            steals_drops.push(enemy.drop_common);
            steals_drops.push(enemy.drop_rare);
        }
    }

    let total = steals_drops.len();
    let number_random = ((percent as f64 / 100.0) * total as f64).round() as usize;
    let number_random = number_random.min(total);
    for slot in index::sample(rng, total, number_random).into_iter() {
        steals_drops[slot] = items.get_random(rng);
    }
    log::info!("replaced {number_random} of {total} steal/drop slots with random items");

    steals_drops.shuffle(rng);

    // Dealt back in the same 4-or-2 pattern, so the pool cannot run dry.
    let mut shuffled = steals_drops.into_iter();
    let mut next = |current: u8| shuffled.next().unwrap_or(current);
    for enemy in enemies.iter_mut().filter(|enemy| !enemy.name.is_empty()) {
        let steal_common = next(enemy.steal_common);
        let steal_rare = next(enemy.steal_rare);
        enemy.set_common_steal(steal_common);
        enemy.set_rare_steal(steal_rare);
        if has_drop_slots(enemy) {
            let drop_common = next(enemy.drop_common);
            let drop_rare = next(enemy.drop_rare);
            enemy.set_common_drop(drop_common);
            enemy.set_rare_drop(drop_rare);
        }
    }
}

/// Swap every Fenix Down in a loot slot for a basic consumable.
pub fn remove_fenix_downs<R: Rng + ?Sized>(enemies: &mut [Enemy], rng: &mut R) -> Result<()> {
    let fenix_down = items::name_id("Fenix Down")
        .ok_or_else(|| RandomiserError::NotFound("item Fenix Down".to_string()))?;
    let replacements = items::FENIX_DOWN_REPLACEMENTS
        .iter()
        .map(|name| {
            items::name_id(name).ok_or_else(|| RandomiserError::NotFound(format!("item {name}")))
        })
        .collect::<Result<Vec<u8>>>()?;

    let mut replace = |slot: &mut u8| {
        if *slot == fenix_down {
            if let Some(&replacement) = replacements.choose(&mut *rng) {
                *slot = replacement;
            }
        }
    };

    for enemy in enemies.iter_mut() {
        replace(&mut enemy.steal_common);
        replace(&mut enemy.steal_rare);
        replace(&mut enemy.drop_common);
        replace(&mut enemy.drop_rare);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enemy::NO_ITEM;
    use crate::items::ItemPool;
    use crate::stats::tests::blank_enemies;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn named_enemies() -> Vec<Enemy> {
        let mut enemies = blank_enemies(370);
        for (i, enemy) in enemies.iter_mut().enumerate() {
            if i % 3 != 0 || bosses::is_final_battle_enemy(i as u16) {
                enemy.name = format!("E{i}");
            }
            enemy.set_common_steal((i % 50) as u8);
            enemy.set_rare_steal((i % 50 + 50) as u8);
            enemy.set_common_drop((i % 50 + 100) as u8);
            enemy.set_rare_drop((i % 50 + 150) as u8);
        }
        enemies
    }

    fn pooled(enemies: &[Enemy]) -> Vec<u8> {
        let mut out = Vec::new();
        for enemy in enemies.iter().filter(|enemy| !enemy.name.is_empty()) {
            out.extend([enemy.steal_common, enemy.steal_rare]);
            if has_drop_slots(enemy) {
                out.extend([enemy.drop_common, enemy.drop_rare]);
            }
        }
        out.sort_unstable();
        out
    }

    #[test]
    fn zero_percent_is_a_pure_shuffle() {
        let mut enemies = named_enemies();
        let before = enemies.clone();
        let marker = ItemPool::new(vec![0xEE]);
        let mut rng = StdRng::seed_from_u64(42);

        shuffle_steals_drops_random(&mut enemies, 0, &marker, &mut rng);

        assert_eq!(pooled(&enemies), pooled(&before));
        assert!(enemies.iter().zip(&before).any(|(a, b)| a.item_data() != b.item_data()));
    }

    #[test]
    fn full_percent_draws_every_slot() {
        let mut enemies = named_enemies();
        let marker = ItemPool::new(vec![0xEE]);
        let mut rng = StdRng::seed_from_u64(42);

        shuffle_steals_drops_random(&mut enemies, 100, &marker, &mut rng);

        assert!(pooled(&enemies).iter().all(|&id| id == 0xEE));
    }

    #[test]
    fn unnamed_and_final_battle_slots_are_left_alone() {
        let mut enemies = named_enemies();
        let before = enemies.clone();
        let marker = ItemPool::new(vec![0xEE]);
        let mut rng = StdRng::seed_from_u64(1);

        shuffle_steals_drops_random(&mut enemies, 100, &marker, &mut rng);

        assert_eq!(enemies[3].item_data(), before[3].item_data());
        let kefka = &enemies[360];
        assert_eq!(kefka.steal_common, 0xEE);
        assert_eq!(kefka.drop_common, before[360].drop_common);
        assert_eq!(kefka.drop_rare, before[360].drop_rare);
    }

    #[test]
    fn full_mode_touches_every_enemy() {
        let mut enemies = blank_enemies(10);
        let marker = ItemPool::new(vec![0x10]);
        let mut rng = StdRng::seed_from_u64(0);
        randomize_loot(&mut enemies, &marker, &mut rng);
        assert!(enemies.iter().all(|enemy| enemy.item_data() == vec![0x10; 4]));
    }

    #[test]
    fn fenix_downs_are_replaced() {
        let mut enemies = blank_enemies(4);
        let fenix_down = items::name_id("Fenix Down").unwrap();
        enemies[1].set_rare_steal(fenix_down);
        enemies[2].set_common_drop(fenix_down);
        enemies[3].set_rare_drop(0xE8);
        let mut rng = StdRng::seed_from_u64(9);

        remove_fenix_downs(&mut enemies, &mut rng).unwrap();

        for enemy in &enemies {
            assert!(!enemy.item_data().contains(&fenix_down));
        }
        assert_ne!(enemies[1].steal_rare, NO_ITEM);
        assert_eq!(enemies[3].drop_rare, 0xE8);
    }
}
