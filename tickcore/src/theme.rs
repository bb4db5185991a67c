//! Widget theme: per-mode palettes and font setup.
//!
//! One light-gray window fill everywhere; the mode decides subtitle color,
//! glyph color, and whether a gold border frames the window. The display
//! font (Antonio) and a CJK fallback are loaded from disk when present;
//! otherwise egui's built-in fonts carry the widget.

use egui::{
    Color32, FontData, FontDefinitions, FontFamily, FontId, Rounding, Stroke, Style, TextStyle,
    Visuals,
};

use crate::mode::Mode;

/// The widget's fixed colors.
pub struct ClockColors;

impl ClockColors {
    /// Window fill shared by all modes.
    pub const WINDOW: Color32 = Color32::from_rgb(240, 240, 240);
    /// Digit card fill.
    pub const CARD: Color32 = Color32::from_rgb(0, 0, 0);
    /// Glyphs outside the NYAM session.
    pub const GLYPH: Color32 = Color32::from_rgb(255, 255, 255);
    /// Subtitle and quote ink.
    pub const INK: Color32 = Color32::from_rgb(0, 0, 0);
    /// NYAM gold.
    pub const GOLD: Color32 = Color32::from_rgb(255, 215, 0);
    /// Border flash warn color.
    pub const WARN: Color32 = Color32::from_rgb(255, 82, 82);
}

/// Width of the window border in NYAM mode (and during flashes).
pub const BORDER_WIDTH: f32 = 3.0;

/// Resolved colors for one mode.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub window: Color32,
    pub subtitle: Color32,
    pub glyph: Color32,
    /// Border stroke; `Stroke::NONE` outside the NYAM session.
    pub border: Stroke,
}

/// Palette for a display mode.
pub fn palette(mode: Mode) -> Palette {
    match mode {
        Mode::Normal | Mode::Quote => Palette {
            window: ClockColors::WINDOW,
            subtitle: ClockColors::INK,
            glyph: ClockColors::GLYPH,
            border: Stroke::NONE,
        },
        Mode::Nyam => Palette {
            window: ClockColors::WINDOW,
            subtitle: ClockColors::GOLD,
            glyph: ClockColors::GOLD,
            border: Stroke::new(BORDER_WIDTH, ClockColors::GOLD),
        },
    }
}

/// Theme configuration for the widget.
pub struct ClockTheme {
    pub font_size_subtitle: f32,
    pub font_size_quote: f32,
}

impl Default for ClockTheme {
    fn default() -> Self {
        Self {
            font_size_subtitle: 14.0,
            font_size_quote: 30.0,
        }
    }
}

impl ClockTheme {
    /// Load a font file from disk, searched relative to the executable and
    /// in standard font paths.
    fn load_font(names: &[&str]) -> Option<Vec<u8>> {
        let mut search_paths = Vec::new();

        if let Ok(exe) = std::env::current_exe() {
            if let Some(dir) = exe.parent() {
                for name in names {
                    search_paths.push(dir.join("fonts").join(name));
                    search_paths.push(dir.join(name));
                }
            }
        }
        for name in names {
            search_paths.push(std::path::PathBuf::from("/usr/share/fonts").join(name));
            search_paths.push(std::path::PathBuf::from("/usr/share/fonts/truetype").join(name));
        }

        for path in search_paths {
            if let Ok(data) = std::fs::read(&path) {
                return Some(data);
            }
        }
        None
    }

    /// Apply the widget theme to an egui context.
    pub fn apply(&self, ctx: &egui::Context) {
        // --- fonts ---
        // Antonio drives the digit cards (its narrow glyphs fit the 1:2
        // card), a CJK face covers the subtitle and quotes. Both are
        // optional; egui's bundled fonts remain as fallback.
        let mut fonts = FontDefinitions::default();
        if let Some(data) = Self::load_font(&["Antonio-Regular.ttf", "Antonio.ttf"]) {
            fonts
                .font_data
                .insert("Antonio".to_owned(), FontData::from_owned(data));
            fonts
                .families
                .entry(FontFamily::Monospace)
                .or_default()
                .insert(0, "Antonio".to_owned());
        }
        if let Some(data) = Self::load_font(&["NotoSansCJK-Regular.otf", "NotoSansCJK.otf"]) {
            fonts
                .font_data
                .insert("NotoSansCJK".to_owned(), FontData::from_owned(data));
            for family in [FontFamily::Proportional, FontFamily::Monospace] {
                fonts
                    .families
                    .entry(family)
                    .or_default()
                    .push("NotoSansCJK".to_owned());
            }
        }
        ctx.set_fonts(fonts);

        // --- style ---
        let mut style = Style::default();

        style.text_styles = [
            (TextStyle::Small, FontId::new(11.0, FontFamily::Proportional)),
            (TextStyle::Body, FontId::new(self.font_size_subtitle, FontFamily::Proportional)),
            (TextStyle::Button, FontId::new(self.font_size_subtitle, FontFamily::Proportional)),
            (TextStyle::Heading, FontId::new(self.font_size_quote, FontFamily::Proportional)),
            (TextStyle::Monospace, FontId::new(self.font_size_subtitle, FontFamily::Monospace)),
        ]
        .into();

        let mut visuals = Visuals::light();
        visuals.window_fill = ClockColors::WINDOW;
        visuals.panel_fill = ClockColors::WINDOW;
        visuals.faint_bg_color = ClockColors::WINDOW;
        visuals.extreme_bg_color = ClockColors::WINDOW;
        visuals.window_rounding = Rounding::ZERO;
        visuals.window_stroke = Stroke::NONE;
        visuals.window_shadow = egui::epaint::Shadow::NONE;
        visuals.popup_shadow = egui::epaint::Shadow::NONE;
        style.visuals = visuals;

        style.spacing.item_spacing = egui::vec2(2.0, 2.0);

        ctx.set_style(style);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nyam_palette_is_gold() {
        let pal = palette(Mode::Nyam);
        assert_eq!(pal.subtitle, ClockColors::GOLD);
        assert_eq!(pal.glyph, ClockColors::GOLD);
        assert_eq!(pal.border.width, BORDER_WIDTH);
        assert_eq!(pal.border.color, ClockColors::GOLD);
    }

    #[test]
    fn test_normal_and_quote_share_borderless_palette() {
        for mode in [Mode::Normal, Mode::Quote] {
            let pal = palette(mode);
            assert_eq!(pal.window, ClockColors::WINDOW);
            assert_eq!(pal.subtitle, ClockColors::INK);
            assert_eq!(pal.border, Stroke::NONE);
        }
    }
}
