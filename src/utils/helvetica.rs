// Helvetica glyph advance widths (AFM units per 1000 em) for text measurement

/// Widths for printable ASCII, starting at U+0020
const ASCII_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556, // '0'..'?'
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, // '@'..'O'
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556, // 'P'..'_'
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, // '`'..'o'
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584, // 'p'..'~'
];

/// Width used for anything outside printable ASCII
const FALLBACK_WIDTH: u16 = 556;

const PT_TO_MM: f32 = 25.4 / 72.0;

fn glyph_width(c: char) -> u16 {
    let code = c as u32;
    if (0x20..=0x7e).contains(&code) {
        ASCII_WIDTHS[(code - 0x20) as usize]
    } else {
        FALLBACK_WIDTH
    }
}

/// Rendered width of `text` in millimetres at `font_size` points
pub fn text_width_mm(text: &str, font_size: f32) -> f32 {
    let units: u32 = text.chars().map(|c| glyph_width(c) as u32).sum();
    units as f32 / 1000.0 * font_size * PT_TO_MM
}
