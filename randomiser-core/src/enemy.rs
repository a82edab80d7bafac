use crate::text;

pub const DATA_SIZE: usize = 32;
pub const NAME_SIZE: usize = 10;
pub const ITEMS_SIZE: usize = 4;
pub const SPECIAL_NAME_SIZE: usize = 10;

/// Loot slot value meaning "no item".
pub const NO_ITEM: u8 = 0xFF;

// Offsets within the 32-byte stat record.
const SPEED: usize = 0x00;
const VIGOR: usize = 0x01;
const DEFENSE: usize = 0x05;
const MAGIC_DEFENSE: usize = 0x06;
const MAGIC: usize = 0x07;
const HP: usize = 0x08;
const MP: usize = 0x0A;
const EXP: usize = 0x0C;
const LEVEL: usize = 0x10;
const FLAGS1: usize = 0x13;
const FLAGS2: usize = 0x14;

const UNDEAD_MASK: u8 = 0x80;
const NO_RUN_MASK: u8 = 0x08;
const NO_SCAN_MASK: u8 = 0x10;

// Loot record order.
const STEAL_RARE: usize = 0;
const STEAL_COMMON: usize = 1;
const DROP_RARE: usize = 2;
const DROP_COMMON: usize = 3;

#[derive(Debug, Clone)]
pub struct Enemy {
    id: u16,
    pub name: String,
    pub special_name: String,

    pub level: u8,
    pub speed: u8,
    pub vigor: u8,
    pub defense: u8,
    pub magic_defense: u8,
    pub magic: u8,
    pub hp: u16,
    pub mp: u16,
    pub exp: u16,

    pub steal_common: u8,
    pub steal_rare: u8,
    pub drop_common: u8,
    pub drop_rare: u8,

    pub no_run: bool,
    pub undead: bool,
    pub no_scan: bool,

    // Original records; bytes not modelled above pass through untouched.
    data: Vec<u8>,
    name_raw: Vec<u8>,
    special_name_raw: Vec<u8>,
}

fn byte(record: &[u8], offset: usize) -> u8 {
    record.get(offset).copied().unwrap_or(0)
}

fn word(record: &[u8], offset: usize) -> u16 {
    u16::from_le_bytes([byte(record, offset), byte(record, offset + 1)])
}

fn padded(record: &[u8], size: usize, fill: u8) -> Vec<u8> {
    let mut out = record.to_vec();
    out.resize(size, fill);
    out
}

impl Enemy {
    /// Decode one enemy from its four parallel records. Nothing is validated;
    /// short records are treated as zero-filled (or blank for text).
    pub fn new(id: u16, data: &[u8], name: &[u8], items: &[u8], special_name: &[u8]) -> Self {
        let flags1 = byte(data, FLAGS1);
        let flags2 = byte(data, FLAGS2);
        let item = |offset: usize| items.get(offset).copied().unwrap_or(NO_ITEM);

        Self {
            id,
            name: text::decode(name),
            special_name: text::decode(special_name),
            level: byte(data, LEVEL),
            speed: byte(data, SPEED),
            vigor: byte(data, VIGOR),
            defense: byte(data, DEFENSE),
            magic_defense: byte(data, MAGIC_DEFENSE),
            magic: byte(data, MAGIC),
            hp: word(data, HP),
            mp: word(data, MP),
            exp: word(data, EXP),
            steal_common: item(STEAL_COMMON),
            steal_rare: item(STEAL_RARE),
            drop_common: item(DROP_COMMON),
            drop_rare: item(DROP_RARE),
            no_run: flags2 & NO_RUN_MASK != 0,
            undead: flags1 & UNDEAD_MASK != 0,
            no_scan: flags2 & NO_SCAN_MASK != 0,
            data: padded(data, DATA_SIZE, 0),
            name_raw: padded(name, NAME_SIZE, text::PAD),
            special_name_raw: padded(special_name, SPECIAL_NAME_SIZE, text::PAD),
        }
    }

    pub fn id(&self) -> u16 {
        self.id
    }

    pub fn set_common_steal(&mut self, item_id: u8) {
        self.steal_common = item_id;
    }

    pub fn set_rare_steal(&mut self, item_id: u8) {
        self.steal_rare = item_id;
    }

    pub fn set_common_drop(&mut self, item_id: u8) {
        self.drop_common = item_id;
    }

    pub fn set_rare_drop(&mut self, item_id: u8) {
        self.drop_rare = item_id;
    }

    pub fn data(&self) -> Vec<u8> {
        let mut data = self.data.clone();
        data[SPEED] = self.speed;
        data[VIGOR] = self.vigor;
        data[DEFENSE] = self.defense;
        data[MAGIC_DEFENSE] = self.magic_defense;
        data[MAGIC] = self.magic;
        data[HP..HP + 2].copy_from_slice(&self.hp.to_le_bytes());
        data[MP..MP + 2].copy_from_slice(&self.mp.to_le_bytes());
        data[EXP..EXP + 2].copy_from_slice(&self.exp.to_le_bytes());
        data[LEVEL] = self.level;

        data[FLAGS1] = (data[FLAGS1] & !UNDEAD_MASK) | if self.undead { UNDEAD_MASK } else { 0 };
        let mut flags2 = data[FLAGS2] & !(NO_RUN_MASK | NO_SCAN_MASK);
        if self.no_run {
            flags2 |= NO_RUN_MASK;
        }
        if self.no_scan {
            flags2 |= NO_SCAN_MASK;
        }
        data[FLAGS2] = flags2;
        data
    }

    pub fn name_data(&self) -> Vec<u8> {
        if text::decode(&self.name_raw) == self.name {
            self.name_raw.clone()
        } else {
            text::encode(&self.name, NAME_SIZE)
        }
    }

    pub fn item_data(&self) -> Vec<u8> {
        let mut items = vec![NO_ITEM; ITEMS_SIZE];
        items[STEAL_RARE] = self.steal_rare;
        items[STEAL_COMMON] = self.steal_common;
        items[DROP_RARE] = self.drop_rare;
        items[DROP_COMMON] = self.drop_common;
        items
    }

    pub fn special_name_data(&self) -> Vec<u8> {
        if text::decode(&self.special_name_raw) == self.special_name {
            self.special_name_raw.clone()
        } else {
            text::encode(&self.special_name, SPECIAL_NAME_SIZE)
        }
    }
}

impl Enemy {
    /// One spoiler line under the given display name.
    pub fn summary(&self, name: &str) -> String {
        format!(
            "{:3} {:<14} lv {:2} hp {:5} mp {:5} spd {:3} vig {:3} def {:3} mdef {:3} mag {:3} exp {:5}",
            self.id,
            name,
            self.level,
            self.hp,
            self.mp,
            self.speed,
            self.vigor,
            self.defense,
            self.magic_defense,
            self.magic,
            self.exp,
        )
    }
}
