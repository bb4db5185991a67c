//! tickclock — a floating multi-state trading clock
//!
//! A fixed-size, always-on-top desk widget showing a flip-clock time
//! display with a lunisolar calendar subtitle, a candle countdown during
//! the 21:30–23:00 session, and rotating trading aphorisms on every
//! ten-minute mark.

mod app;

use app::TickClockApp;
use eframe::NativeOptions;

fn main() -> eframe::Result<()> {
    let settings = tickcore::config::load();

    let mut position = egui::pos2(settings.window_x, settings.window_y);
    if let Some(offset) = tickcore::cascade_offset() {
        position += offset;
    }

    let mut viewport = egui::ViewportBuilder::default()
        .with_inner_size(app::WINDOW_SIZE)
        .with_title("tickclock")
        .with_resizable(false)
        .with_decorations(false)
        .with_position(position);
    if settings.always_on_top {
        viewport = viewport.with_always_on_top();
    }

    let options = NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        "tickclock",
        options,
        Box::new(|cc| {
            tickcore::ClockTheme::default().apply(&cc.egui_ctx);
            Box::new(TickClockApp::new(cc, settings))
        }),
    )
}
