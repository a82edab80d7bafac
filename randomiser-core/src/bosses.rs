//! Static boss tables. Everything here is read-only and shared process-wide.

use crate::enemy::Enemy;

pub const SRBEHEMOTH2_ID: u16 = 127;
pub const INVINCIBLE_GUARDIAN_ID: u16 = 273;

/// Child whose HP always tracks half of its parent's HP (Ipooh, fought
/// alongside Vargas). Its MP is never touched by the hierarchy passes.
pub const HALF_HP_CHILD_ID: u16 = 333;

pub const ENEMY_NAME: &[(u16, &str)] = &[
    (256, "Whelk"),
    (257, "Presenter"),
    (258, "Marshal"),
    (259, "Vargas"),
    (260, "Leader"),
    (261, "TunnelArmr"),
    (262, "GhostTrain"),
    (263, "Dadaluma"),
    (264, "Shiva"),
    (265, "Ifrit"),
    (266, "Number 024"),
    (267, "Number 128"),
    (268, "Inferno"),
    (269, "Right Crane"),
    (270, "Left Crane"),
    (271, "Umaro"),
    (272, "Guardian"),
    (274, "Tritoch"),
    (275, "Air Force"),
    (276, "FlameEatr"),
    (277, "AtmaWeapon"),
    (278, "Nerapa"),
    (279, "SrBehemoth"),
    (280, "Kefka (Imperial Camp)"),
    (281, "Dullahan"),
    (282, "Doom Gaze"),
    (283, "Tentacle (Top Left)"),
    (284, "Chadarnook"),
    (285, "Wrexsoul"),
    (286, "KatanaSoul"),
    (287, "Curley"),
    (288, "Larry"),
    (289, "Moe"),
    (290, "Hidon"),
    (291, "Phunbaba"),
    (292, "Goddess"),
    (293, "Poltrgeist"),
    (294, "Phunbaba 2"),
    (295, "Ultros 1"),
    (296, "Ultros 2"),
    (297, "Ultros 3"),
    (298, "Chupon"),
    (299, "Siegfried"),
    (300, "Kefka (Narshe)"),
    (301, "Master Pug"),
    (302, "Rizopas"),
    (303, "Ice Dragon"),
    (304, "Storm Drgn"),
    (305, "Dirt Drgn"),
    (306, "Gold Drgn"),
    (307, "Skull Drgn"),
    (308, "Blue Drgn"),
    (309, "Red Dragon"),
    (310, "White Drgn"),
    (311, "MagiMaster"),
    (312, "CzarDragon"),
    (313, "Colossus"),
    (314, "Doom"),
    (315, "Poltrgeist 2"),
    (316, "Tentacle (Top Right)"),
    (317, "Tentacle (Bottom Left)"),
    (318, "Tentacle (Bottom Right)"),
    (319, "Right Blade"),
    (320, "Left Blade"),
    (321, "Rough"),
    (322, "Striker"),
    (325, "Laser Gun"),
    (326, "Speck"),
    (327, "MissileBay"),
    (333, "Ipooh"),
    (340, "Piranha"),
    (352, "Phunbaba 3"),
    (353, "Phunbaba 4"),
    (354, "Phunbaba 5"),
    (359, "Hidonite"),
    (360, "Kefka"),
    (361, "Short Arm"),
    (362, "Long Arm"),
    (363, "Face"),
    (364, "Tiger"),
    (365, "Tools"),
    (366, "Magic"),
    (367, "Hit"),
    (368, "Girl"),
    (369, "Sleep"),
];

/// Named in the table above for lookups, but never treated as a boss.
pub const REMOVED_ENEMY_NAME: &[(u16, &str)] = &[(257, "Presenter")];

/// Final battle enemies only have steal slots; their drop slots are unused.
pub const FINAL_BATTLE_ENEMY_NAME: &[(u16, &str)] = &[
    (360, "Kefka"),
    (361, "Short Arm"),
    (362, "Long Arm"),
    (363, "Face"),
    (364, "Tiger"),
    (365, "Tools"),
    (366, "Magic"),
    (367, "Hit"),
    (368, "Girl"),
    (369, "Sleep"),
];

/// Multi-phase encounters: parent id -> ordered child ids. Two levels only.
pub const HIERARCHY: &[(u16, &[u16])] = &[
    (268, &[321, 322]),
    (267, &[319, 320]),
    (275, &[325, 327]),
    (270, &[269]),
    (283, &[316, 317, 318]),
    (259, &[333]),
    (291, &[294, 352, 353, 354]),
    (287, &[288, 289]),
    (290, &[359]),
];

/// Bosses handled in the second (child) pass. Every child above, plus
/// 326 and 340 which have no parent and are therefore left alone.
pub const EXCLUDED_IDS: &[u16] = &[
    321, 322, 320, 319, 325, 327, 269, 316, 317, 318, 333, 294, 352, 353, 354, 288, 289, 359,
    326, 340,
];

/// EXP per level awarded by bosses when custom boss experience is enabled.
pub const CUSTOM_EXP: &[(u16, u16)] = &[
    (256, 30),
    (258, 40),
    (259, 45),
    (260, 40),
    (261, 45),
    (262, 55),
    (263, 60),
    (264, 60),
    (265, 60),
    (266, 70),
    (267, 70),
    (270, 75),
    (271, 80),
    (275, 90),
    (276, 100),
    (277, 120),
    (278, 60),
    (279, 110),
    (281, 120),
    (282, 130),
    (283, 85),
    (287, 110),
    (290, 110),
    (291, 80),
    (296, 65),
    (297, 90),
    (300, 50),
    (302, 50),
];

pub fn enemy_name(id: u16) -> Option<&'static str> {
    ENEMY_NAME
        .iter()
        .find(|(boss_id, _)| *boss_id == id)
        .map(|(_, name)| *name)
}

pub fn name_enemy(name: &str) -> Option<u16> {
    ENEMY_NAME
        .iter()
        .find(|(_, boss_name)| *boss_name == name)
        .map(|(id, _)| *id)
}

fn in_table(table: &[(u16, &str)], id: u16) -> bool {
    table.iter().any(|(table_id, _)| *table_id == id)
}

/// True for ids in the boss name table (removed entries included).
pub fn is_named_boss(id: u16) -> bool {
    in_table(ENEMY_NAME, id)
}

pub fn is_boss(id: u16) -> bool {
    is_named_boss(id) && !in_table(REMOVED_ENEMY_NAME, id)
}

pub fn is_final_battle_enemy(id: u16) -> bool {
    in_table(FINAL_BATTLE_ENEMY_NAME, id)
}

pub fn is_excluded(id: u16) -> bool {
    EXCLUDED_IDS.contains(&id)
}

pub fn is_parent(id: u16) -> bool {
    HIERARCHY.iter().any(|(parent, _)| *parent == id)
}

pub fn children(parent: u16) -> &'static [u16] {
    HIERARCHY
        .iter()
        .find(|(id, _)| *id == parent)
        .map(|(_, children)| *children)
        .unwrap_or(&[])
}

pub fn child_to_parent(child: u16) -> Option<u16> {
    HIERARCHY
        .iter()
        .find(|(_, children)| children.contains(&child))
        .map(|(parent, _)| *parent)
}

pub fn custom_exp(id: u16) -> Option<u16> {
    CUSTOM_EXP
        .iter()
        .find(|(boss_id, _)| *boss_id == id)
        .map(|(_, exp)| *exp)
}

/// Indices of the boss subset, in enemy order.
pub fn boss_indices(enemies: &[Enemy]) -> Vec<usize> {
    enemies
        .iter()
        .enumerate()
        .filter(|(_, enemy)| is_boss(enemy.id()))
        .map(|(index, _)| index)
        .collect()
}
