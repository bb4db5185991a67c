//! Flip-clock style cards for the time display.

use egui::{Color32, FontFamily, FontId, Response, Sense, Stroke, Ui, Widget};

/// Card height in points. Cards keep a strict 1:2 width:height ratio.
pub const DIGIT_HEIGHT: f32 = 70.0;

/// Thickness of the horizontal seam across the card middle.
const SEAM_WIDTH: f32 = 2.0;

/// A single static digit card: black rectangle, centered glyph in the
/// display font, and a seam line in the window color that fakes the split
/// of a mechanical flip clock.
pub struct DigitCard {
    glyph: char,
    height: f32,
    card: Color32,
    glyph_color: Color32,
    seam: Color32,
}

impl DigitCard {
    pub fn new(glyph: char, card: Color32, glyph_color: Color32, seam: Color32) -> Self {
        Self {
            glyph,
            height: DIGIT_HEIGHT,
            card,
            glyph_color,
            seam,
        }
    }

    pub fn height(mut self, height: f32) -> Self {
        self.height = height;
        self
    }
}

impl Widget for DigitCard {
    fn ui(self, ui: &mut Ui) -> Response {
        let size = egui::vec2(self.height * 0.5, self.height);
        let (rect, response) = ui.allocate_exact_size(size, Sense::hover());

        if ui.is_rect_visible(rect) {
            let painter = ui.painter();
            painter.rect_filled(rect, 0.0, self.card);
            painter.text(
                rect.center(),
                egui::Align2::CENTER_CENTER,
                self.glyph,
                FontId::new(self.height * 0.8, FontFamily::Monospace),
                self.glyph_color,
            );
            painter.line_segment(
                [
                    egui::pos2(rect.left(), rect.center().y),
                    egui::pos2(rect.right(), rect.center().y),
                ],
                Stroke::new(SEAM_WIDTH, self.seam),
            );
        }

        response
    }
}

/// Separator card between digit groups: same black rectangle, two dots.
pub struct ColonCard {
    height: f32,
    card: Color32,
    dot: Color32,
}

impl ColonCard {
    pub fn new(card: Color32, dot: Color32) -> Self {
        Self {
            height: DIGIT_HEIGHT,
            card,
            dot,
        }
    }

    pub fn height(mut self, height: f32) -> Self {
        self.height = height;
        self
    }
}

impl Widget for ColonCard {
    fn ui(self, ui: &mut Ui) -> Response {
        let size = egui::vec2(self.height * 0.5, self.height);
        let (rect, response) = ui.allocate_exact_size(size, Sense::hover());

        if ui.is_rect_visible(rect) {
            let painter = ui.painter();
            painter.rect_filled(rect, 0.0, self.card);
            let radius = self.height * 0.045;
            painter.circle_filled(
                egui::pos2(rect.center().x, rect.top() + self.height / 3.0),
                radius,
                self.dot,
            );
            painter.circle_filled(
                egui::pos2(rect.center().x, rect.top() + self.height * 2.0 / 3.0),
                radius,
                self.dot,
            );
        }

        response
    }
}
