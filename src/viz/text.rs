//! Label sizing for the legend and axis gutters.
//!
//! Plotters cannot measure text, so widths assume every glyph is 3/5 of the font
//! size. Integer math keeps `fit_label` and `label_width_px` in agreement.

/// Approximate rendered width of `text` in pixels.
pub fn label_width_px(text: &str, font_px: u32) -> u32 {
    let glyphs = text.chars().count() as u32;
    (glyphs * font_px * 3).div_ceil(5)
}

/// How many glyphs fit into `max_px`.
fn glyph_budget(font_px: u32, max_px: u32) -> usize {
    (max_px * 5 / (font_px.max(1) * 3)) as usize
}

/// Shorten `text` so it fits `max_px`, ending in `…` when anything was cut.
pub fn fit_label(text: &str, font_px: u32, max_px: u32) -> String {
    let budget = glyph_budget(font_px, max_px);
    if text.chars().count() <= budget {
        return text.to_string();
    }
    if budget == 0 {
        return String::new();
    }
    let mut out: String = text.chars().take(budget - 1).collect();
    out.push('…');
    out
}
