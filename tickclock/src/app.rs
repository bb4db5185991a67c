//! The widget application: timer loop, mode side effects, rendering.

use chrono::{DateTime, Datelike, Local};
use egui::{Context, FontId, Pos2, Rect, Sense, Stroke, Ui};

use tickcore::config::Settings;
use tickcore::flash::BorderFlash;
use tickcore::mode::{self, Mode, ModeMachine};
use tickcore::quotes::QuoteReel;
use tickcore::repaint::TickGovernor;
use tickcore::safety::catch_or;
use tickcore::theme::{self, ClockColors, Palette};
use tickcore::widgets::{ColonCard, DigitCard, DIGIT_HEIGHT};

/// Fixed window size, not resizable.
pub const WINDOW_SIZE: [f32; 2] = [350.0, 140.0];

/// Spacing between cards in the time row.
const CARD_SPACING: f32 = 2.0;

pub struct TickClockApp {
    machine: ModeMachine,
    quotes: QuoteReel,
    flash: BorderFlash,
    governor: TickGovernor,
    /// Cached calendar subtitle and the day ordinal it was computed for.
    cached_calendar: (u32, String),
}

impl TickClockApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, settings: Settings) -> Self {
        let mut quotes = QuoteReel::with_deck(settings.quotes.clone());
        quotes.set_dwell_secs(settings.quote_dwell_secs);

        let machine = ModeMachine::new(Local::now().time());
        if machine.mode() == Mode::Quote {
            quotes.begin_session();
        }

        Self {
            machine,
            quotes,
            flash: BorderFlash::new(),
            governor: TickGovernor::new(),
            cached_calendar: (0, String::new()),
        }
    }

    /// Advance the mode machine and animations by one frame.
    fn advance(&mut self, now: DateTime<Local>, dt: f32) {
        let time = now.time();

        if let Some(switch) = self.machine.observe(time) {
            if switch.from == Mode::Quote {
                self.quotes.end_session();
            }
            if switch.to == Mode::Quote {
                self.quotes.begin_session();
            }
        }

        match self.machine.mode() {
            Mode::Quote => self.quotes.tick(dt),
            Mode::Nyam => {
                if mode::candle_countdown(time) <= mode::CANDLE_WARN_SECS {
                    self.flash.arm();
                } else {
                    self.flash.disarm();
                }
            }
            Mode::Normal => {}
        }
        if self.machine.mode() != Mode::Nyam {
            self.flash.disarm();
        }
        self.flash.tick(dt);
    }

    fn subtitle(&mut self, now: DateTime<Local>) -> String {
        match self.machine.mode() {
            Mode::Normal => {
                let date = now.date_naive();
                if date.ordinal() != self.cached_calendar.0 {
                    self.cached_calendar = (date.ordinal(), tickcore::almanac::calendar_line(date));
                }
                self.cached_calendar.1.clone()
            }
            Mode::Nyam => format!("下一K棒: {}s", mode::candle_countdown(now.time())),
            Mode::Quote => now.format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }

    fn draw_clock_row(&self, ui: &mut Ui, area: Rect, pal: &Palette, now: DateTime<Local>) {
        let digits: Vec<char> = now.format("%H%M%S").to_string().chars().collect();
        if digits.len() != 6 {
            return;
        }

        let card_w = DIGIT_HEIGHT * 0.5;
        let row_w = 8.0 * card_w + 7.0 * CARD_SPACING;
        let rect = Rect::from_center_size(area.center(), egui::vec2(row_w, DIGIT_HEIGHT));

        ui.allocate_ui_at_rect(rect, |ui| {
            ui.spacing_mut().item_spacing = egui::vec2(CARD_SPACING, 0.0);
            ui.horizontal(|ui| {
                for (i, glyph) in digits.iter().enumerate() {
                    if i == 2 || i == 4 {
                        ui.add(ColonCard::new(ClockColors::CARD, pal.glyph));
                    }
                    ui.add(DigitCard::new(*glyph, ClockColors::CARD, pal.glyph, pal.window));
                }
            });
        });
    }

    fn draw_quotes(&self, ui: &mut Ui, area: Rect) {
        let painter = ui.painter_at(area);
        let (current, incoming) = self.quotes.frames();
        for frame in [current, incoming].into_iter().flatten() {
            let galley = painter.layout(
                frame.text.to_string(),
                FontId::proportional(30.0),
                ClockColors::INK,
                area.width() - 30.0,
            );
            let center_y = area.top() + area.height() * frame.anchor_y;
            let pos = Pos2::new(
                area.center().x - galley.size().x / 2.0,
                center_y - galley.size().y / 2.0,
            );
            painter.galley(pos, galley, ClockColors::INK);
        }
    }
}

impl eframe::App for TickClockApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        let dt = self.governor.frame_dt();

        if ctx.input(|i| i.key_pressed(egui::Key::F12)) {
            ctx.send_viewport_cmd(egui::ViewportCommand::Minimized(true));
        }
        if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }

        let now = Local::now();
        catch_or((), || self.advance(now, dt));

        let pal = theme::palette(self.machine.mode());
        let border = if self.flash.warn_phase() {
            Stroke::new(theme::BORDER_WIDTH, ClockColors::WARN)
        } else {
            pal.border
        };
        let subtitle = self.subtitle(now);

        egui::CentralPanel::default()
            .frame(
                egui::Frame::none()
                    .fill(pal.window)
                    .stroke(border)
                    .inner_margin(egui::Margin::same(6.0)),
            )
            .show(ctx, |ui| {
                // Drag anywhere on the body moves the window
                let drag = ui.interact(
                    ui.max_rect(),
                    ui.id().with("window_drag"),
                    Sense::click_and_drag(),
                );
                if drag.drag_started() {
                    ctx.send_viewport_cmd(egui::ViewportCommand::StartDrag);
                }

                ui.vertical_centered(|ui| {
                    ui.add_space(2.0);
                    ui.label(
                        egui::RichText::new(&subtitle)
                            .font(FontId::proportional(14.0))
                            .color(pal.subtitle),
                    );
                });

                let area = ui.available_rect_before_wrap();
                match self.machine.mode() {
                    Mode::Quote => self.draw_quotes(ui, area),
                    _ => self.draw_clock_row(ui, area, &pal, now),
                }
            });

        self.governor
            .set_animating(self.quotes.sliding() || self.flash.running());
        self.governor.schedule(ctx);
    }
}
