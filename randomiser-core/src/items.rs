use rand::Rng;

use crate::enemy::NO_ITEM;

/// Anything that can hand out a random item id for a loot slot.
pub trait ItemSource {
    fn get_random<R: Rng + ?Sized>(&self, rng: &mut R) -> u8;
}

/// Uniform pick from a fixed list of item ids.
#[derive(Debug, Clone)]
pub struct ItemPool {
    ids: Vec<u8>,
}

impl ItemPool {
    pub fn new(ids: Vec<u8>) -> Self {
        Self { ids }
    }

    /// Every real item except the ones that would break a seed if handed out
    /// by an enemy.
    pub fn standard() -> Self {
        let ids = (0u8..NO_ITEM)
            .filter(|id| !EXCLUDED_LOOT.contains(id))
            .collect();
        Self { ids }
    }

    pub fn ids(&self) -> &[u8] {
        &self.ids
    }
}

impl ItemSource for ItemPool {
    fn get_random<R: Rng + ?Sized>(&self, rng: &mut R) -> u8 {
        if self.ids.is_empty() {
            return NO_ITEM;
        }
        self.ids[rng.gen_range(0..self.ids.len())]
    }
}

// Dummy / empty inventory entries.
const EXCLUDED_LOOT: &[u8] = &[0xFE];

pub const FENIX_DOWN_REPLACEMENTS: &[&str] = &[
    "Tonic",
    "Potion",
    "Tincture",
    "Antidote",
    "Echo Screen",
    "Eyedrop",
    "Green Cherry",
    "Revivify",
    "Soft",
    "Ether",
    "Sleeping Bag",
    "Tent",
    "Remedy",
    "Dried Meat",
];

pub fn name_id(name: &str) -> Option<u8> {
    (0u8..NO_ITEM).find(|&id| lookup_item_name(id) == name)
}

/// Names for the consumable block of the inventory. Equipment and relics
/// are not named here.
pub fn lookup_item_name(item_id: u8) -> &'static str {
    match item_id {
        0xE7 => "Tonic",
        0xE8 => "Potion",
        0xE9 => "X-Potion",
        0xEA => "Tincture",
        0xEB => "Ether",
        0xEC => "X-Ether",
        0xED => "Elixir",
        0xEE => "Megalixir",
        0xEF => "Fenix Down",
        0xF0 => "Revivify",
        0xF1 => "Antidote",
        0xF2 => "Eyedrop",
        0xF3 => "Soft",
        0xF4 => "Remedy",
        0xF5 => "Sleeping Bag",
        0xF6 => "Tent",
        0xF7 => "Green Cherry",
        0xF8 => "Magicite",
        0xF9 => "Super Ball",
        0xFA => "Echo Screen",
        0xFB => "Smoke Bomb",
        0xFC => "Warp Stone",
        0xFD => "Dried Meat",
        0xFE => "Empty",
        0xFF => "(none)",
        0x00..=0x5C => "Weapon",
        0x5D..=0xAF => "Armor",
        0xB0..=0xE6 => "Relic",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn looks_up_consumables_by_name() {
        assert_eq!(name_id("Fenix Down"), Some(0xEF));
        assert_eq!(name_id("Dried Meat"), Some(0xFD));
        assert_eq!(name_id("Ribbon"), None);
        for name in FENIX_DOWN_REPLACEMENTS {
            assert!(name_id(name).is_some(), "{name} has no item id");
        }
    }

    #[test]
    fn standard_pool_never_hands_out_placeholders() {
        let pool = ItemPool::standard();
        assert!(!pool.ids().contains(&0xFE));
        assert!(!pool.ids().contains(&NO_ITEM));
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..200 {
            let id = pool.get_random(&mut rng);
            assert!(id < 0xFE);
        }
    }

    #[test]
    fn empty_pool_gives_no_item() {
        let mut rng = StdRng::seed_from_u64(5);
        assert_eq!(ItemPool::new(Vec::new()).get_random(&mut rng), NO_ITEM);
    }
}
