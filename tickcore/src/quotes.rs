//! Quote reel: the rotating deck of trading-discipline aphorisms shown
//! during Quote mode, with the vertical slide transition between entries.

/// Seconds each quote stays on screen before the next one slides in.
pub const QUOTE_DWELL_SECS: f32 = 5.0;
/// Duration of the slide transition. Motion is linear.
pub const SLIDE_SECS: f32 = 0.3;

/// The built-in deck, in rotation order.
pub const DEFAULT_DECK: [&str; 25] = [
    "三單停手不貪法",
    "定時定法定量好",
    "跟隨鯊魚去交易",
    "展開運鈔車人生",
    "機構創造流動性",
    "機構清除流動性",
    "機構創造不平衡",
    "機構平衡不平衡",
    "建立盤前偏見",
    "識別鯊魚覓食區",
    "建立盤中方向",
    "識別鯊魚去那裡",
    "一單一口不用貪",
    "連輸二單必停手",
    "頭頭高底底高",
    "頭頭低底底低",
    "上漲盤整猜上漲",
    "下跌盤整猜下跌",
    "識別慣性要練習",
    "慣性延續不要怕",
    "慣性改變有線索",
    "二百美金真的夠",
    "細水常流比氣長",
    "我是來市場賺錢",
    "不是來賭場輸錢",
];

/// Where the current and incoming quotes sit, as fractional y anchors of
/// the content area (0.5 is centered, 1.5 is one full area below).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuoteFrame<'a> {
    pub text: &'a str,
    pub anchor_y: f32,
}

/// Sequential quote rotation with a global cursor.
///
/// The cursor survives the end of a quote session: the next session resumes
/// at the following entry rather than starting over. It does not survive a
/// restart of the process.
#[derive(Debug)]
pub struct QuoteReel {
    deck: Vec<String>,
    cursor: usize,
    dwell: f32,
    dwell_limit: f32,
    current: Option<String>,
    incoming: Option<String>,
    /// Slide progress 0..1 while `incoming` is set.
    slide: f32,
}

impl Default for QuoteReel {
    fn default() -> Self {
        Self::new()
    }
}

impl QuoteReel {
    pub fn new() -> Self {
        Self::with_deck(DEFAULT_DECK.iter().map(|s| s.to_string()).collect())
    }

    /// Use a custom deck; an empty one falls back to the built-in deck.
    pub fn with_deck(deck: Vec<String>) -> Self {
        let deck = if deck.is_empty() {
            DEFAULT_DECK.iter().map(|s| s.to_string()).collect()
        } else {
            deck
        };
        Self {
            deck,
            cursor: 0,
            dwell: 0.0,
            dwell_limit: QUOTE_DWELL_SECS,
            current: None,
            incoming: None,
            slide: 0.0,
        }
    }

    /// Override the per-quote dwell time. Values under half a second would
    /// starve the slide transition and are clamped.
    pub fn set_dwell_secs(&mut self, secs: f32) {
        self.dwell_limit = secs.max(0.5);
    }

    fn draw_next(&mut self) -> String {
        let quote = self.deck[self.cursor].clone();
        self.cursor = (self.cursor + 1) % self.deck.len();
        quote
    }

    /// Start a quote session: the first quote appears at once, unanimated.
    pub fn begin_session(&mut self) {
        let first = self.draw_next();
        self.current = Some(first);
        self.incoming = None;
        self.dwell = 0.0;
        self.slide = 0.0;
    }

    /// End the session, cancelling any pending rotation. The cursor keeps
    /// its position for the next session.
    pub fn end_session(&mut self) {
        self.current = None;
        self.incoming = None;
        self.dwell = 0.0;
        self.slide = 0.0;
    }

    pub fn active(&self) -> bool {
        self.current.is_some()
    }

    /// Whether a slide transition is in flight (wants fast repaints).
    pub fn sliding(&self) -> bool {
        self.incoming.is_some()
    }

    /// Advance dwell and slide timers by `dt` seconds.
    pub fn tick(&mut self, dt: f32) {
        if self.current.is_none() {
            return;
        }
        if self.incoming.is_some() {
            self.slide += dt / SLIDE_SECS;
            if self.slide >= 1.0 {
                self.current = self.incoming.take();
                self.slide = 0.0;
                self.dwell = 0.0;
            }
        } else {
            self.dwell += dt;
            if self.dwell >= self.dwell_limit {
                let next = self.draw_next();
                self.incoming = Some(next);
                self.slide = 0.0;
            }
        }
    }

    /// Current frames to draw: the resident quote and, mid-slide, the
    /// incoming one. The resident rises from 0.5 toward -0.5 while the
    /// incoming rises from 1.5 toward 0.5.
    pub fn frames(&self) -> (Option<QuoteFrame<'_>>, Option<QuoteFrame<'_>>) {
        let current = self.current.as_deref().map(|text| QuoteFrame {
            text,
            anchor_y: if self.incoming.is_some() { 0.5 - self.slide } else { 0.5 },
        });
        let incoming = self.incoming.as_deref().map(|text| QuoteFrame {
            text,
            anchor_y: 1.5 - self.slide,
        });
        (current, incoming)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reel(entries: &[&str]) -> QuoteReel {
        QuoteReel::with_deck(entries.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn test_default_deck_size() {
        assert_eq!(DEFAULT_DECK.len(), 25);
        assert!(QuoteReel::new().deck.len() == 25);
    }

    #[test]
    fn test_sequential_rotation_with_wrap() {
        let mut r = reel(&["a", "b", "c"]);
        r.begin_session();
        assert_eq!(r.frames().0.unwrap().text, "a");

        // Dwell expires, slide starts, completes
        r.tick(QUOTE_DWELL_SECS);
        assert!(r.sliding());
        assert_eq!(r.frames().1.unwrap().text, "b");
        r.tick(SLIDE_SECS);
        assert!(!r.sliding());
        assert_eq!(r.frames().0.unwrap().text, "b");

        r.tick(QUOTE_DWELL_SECS);
        r.tick(SLIDE_SECS);
        assert_eq!(r.frames().0.unwrap().text, "c");

        // Wrap-around
        r.tick(QUOTE_DWELL_SECS);
        r.tick(SLIDE_SECS);
        assert_eq!(r.frames().0.unwrap().text, "a");
    }

    #[test]
    fn test_cursor_survives_sessions() {
        let mut r = reel(&["a", "b", "c"]);
        r.begin_session();
        assert_eq!(r.frames().0.unwrap().text, "a");
        r.end_session();
        assert!(!r.active());

        r.begin_session();
        assert_eq!(r.frames().0.unwrap().text, "b");
    }

    #[test]
    fn test_first_quote_is_unanimated() {
        let mut r = reel(&["a", "b"]);
        r.begin_session();
        assert!(!r.sliding());
        let (current, incoming) = r.frames();
        assert_eq!(current.unwrap().anchor_y, 0.5);
        assert!(incoming.is_none());
    }

    #[test]
    fn test_slide_anchor_geometry() {
        let mut r = reel(&["a", "b"]);
        r.begin_session();
        r.tick(QUOTE_DWELL_SECS);

        // Halfway through the slide both frames are offset by half an area
        r.tick(SLIDE_SECS / 2.0);
        let (current, incoming) = r.frames();
        assert!((current.unwrap().anchor_y - 0.0).abs() < 1e-3);
        assert!((incoming.unwrap().anchor_y - 1.0).abs() < 1e-3);
    }

    #[test]
    fn test_tick_without_session_is_inert() {
        let mut r = reel(&["a"]);
        r.tick(100.0);
        assert!(!r.active());
        assert!(r.frames().0.is_none());
    }

    #[test]
    fn test_single_entry_deck_repeats() {
        let mut r = reel(&["only"]);
        r.begin_session();
        r.tick(QUOTE_DWELL_SECS);
        r.tick(SLIDE_SECS);
        assert_eq!(r.frames().0.unwrap().text, "only");
    }

    #[test]
    fn test_dwell_override() {
        let mut r = reel(&["a", "b"]);
        r.set_dwell_secs(1.0);
        r.begin_session();
        r.tick(1.0);
        assert!(r.sliding());

        // Clamped: a zero dwell still waits half a second
        r.set_dwell_secs(0.0);
        r.tick(SLIDE_SECS);
        r.tick(0.25);
        assert!(!r.sliding());
        r.tick(0.25);
        assert!(r.sliding());
    }

    #[test]
    fn test_empty_deck_falls_back_to_builtin() {
        let mut r = QuoteReel::with_deck(Vec::new());
        r.begin_session();
        assert_eq!(r.frames().0.unwrap().text, DEFAULT_DECK[0]);
    }
}
