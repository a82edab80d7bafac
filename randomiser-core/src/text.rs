// Menu font used by enemy names and special attack names.
pub(crate) const PAD: u8 = 0xFF;

const PUNCTUATION: &[(u8, char)] = &[
    (0xBE, '!'),
    (0xBF, '?'),
    (0xC0, '/'),
    (0xC1, ':'),
    (0xC2, '"'),
    (0xC3, '\''),
    (0xC4, '-'),
    (0xC5, '.'),
    (0xC6, ','),
    (0xC8, ';'),
    (0xC9, '#'),
    (0xCA, '+'),
    (0xCB, '('),
    (0xCC, ')'),
    (0xCD, '%'),
    (0xCE, '~'),
    (0xFE, ' '),
];

fn decode_byte(b: u8) -> Option<char> {
    match b {
        0x80..=0x99 => Some((b'A' + (b - 0x80)) as char),
        0x9A..=0xB3 => Some((b'a' + (b - 0x9A)) as char),
        0xB4..=0xBD => Some((b'0' + (b - 0xB4)) as char),
        _ => PUNCTUATION.iter().find(|(code, _)| *code == b).map(|(_, c)| *c),
    }
}

fn encode_char(c: char) -> Option<u8> {
    match c {
        'A'..='Z' => Some(0x80 + (c as u8 - b'A')),
        'a'..='z' => Some(0x9A + (c as u8 - b'a')),
        '0'..='9' => Some(0xB4 + (c as u8 - b'0')),
        _ => PUNCTUATION.iter().find(|(_, ch)| *ch == c).map(|(code, _)| *code),
    }
}

/// Decode a padded name record. Glyphs without a text equivalent are dropped.
pub(crate) fn decode(bytes: &[u8]) -> String {
    let end = bytes
        .iter()
        .rposition(|&b| b != PAD)
        .map_or(0, |pos| pos + 1);
    bytes[..end].iter().filter_map(|&b| decode_byte(b)).collect()
}

/// Encode `text` into a record of exactly `size` bytes, truncating long names.
pub(crate) fn encode(text: &str, size: usize) -> Vec<u8> {
    let mut out: Vec<u8> = text.chars().filter_map(encode_char).take(size).collect();
    out.resize(size, PAD);
    out
}
