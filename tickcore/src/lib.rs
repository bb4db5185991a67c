//! tickcore — shared library for the tickclock desktop widget

pub mod almanac;
pub mod config;
pub mod flash;
pub mod mode;
pub mod quotes;
pub mod repaint;
pub mod safety;
pub mod theme;
pub mod widgets;

pub use mode::{Mode, ModeMachine};
pub use theme::ClockTheme;

/// Cascade offset for stacked multi-instance launches, from the
/// TICKCLOCK_CASCADE environment variable. Instance n sits 30 points
/// down-right of the settings position.
pub fn cascade_offset() -> Option<egui::Vec2> {
    std::env::var("TICKCLOCK_CASCADE")
        .ok()
        .and_then(|s| s.parse::<u32>().ok())
        .map(|n| {
            let offset = (n as f32) * 30.0;
            egui::Vec2::new(offset, offset)
        })
}
