//! The APOLLO palette by AdamCYounis, packed as `0xRRGGBB`.
//!
//! Rows of six run dark to light within one hue family; particle recipes pick
//! a three-entry window out of it.

/// All 46 palette entries.
pub const APOLLO: [u32; 46] = [
    0x172038, 0x253a5e, 0x3c5e8b, 0x4f8fba, 0x73bed3, 0xa4dddb, //
    0x19332d, 0x25562e, 0x468232, 0x75a743, 0xa8ca58, 0xd0da91, //
    0x4d2b32, 0x7a4841, 0xad7757, 0xc09473, 0xd7b594, 0xe7d5b3, //
    0x341c27, 0x602c2c, 0x884b2b, 0xbe772b, 0xde9e41, 0xe8c170, //
    0x241527, 0x411d31, 0x752438, 0xa53030, 0xcf573c, 0xda863e, //
    0x1e1d39, 0x402751, 0x7a367b, 0xa23e8c, 0xc65197, 0xdf84a5, //
    0x090a14, 0x10141f, 0x151d28, 0x202e37, 0x394a50, 0x577277, //
    0x819796, 0xa8b5b2, 0xc7cfcc, 0xebede9,
];

/// Background fill behind the tile map.
pub const BACKGROUND: u32 = APOLLO[2];

/// Greens used for shredded-bush debris.
pub const LEAVES: std::ops::Range<usize> = 6..9;

/// Pale greys used for dust and confetti.
pub const DUST: std::ops::Range<usize> = 41..44;

/// Pick a colour from `window` using a uniform draw `r` in `[0, 1)`.
pub fn pick(window: std::ops::Range<usize>, r: f64) -> u32 {
    let span = window.end - window.start;
    let offset = ((r * span as f64).floor() as usize).min(span.saturating_sub(1));
    APOLLO[window.start + offset]
}

/// Render a packed colour as a `#rrggbb` string.
pub fn to_hex(color: u32) -> String {
    format!("#{color:06x}")
}
