use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::bundle::Bundle;
use crate::catalog::Catalog;
use crate::display::{self, Scoreboard};
use crate::session::Session;
use crate::share::{self, SHARING_NOT_AVAILABLE, ShareSurface};
use crate::timer::{LifecycleEvent, LifecycleObserver, TickTimer};

/// How long a notice stays on screen.
pub const NOTICE_DURATION: Duration = Duration::from_millis(3500);
const MAX_ACTIVITIES: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Bakery,
    Catalog,
}

#[derive(Debug, Clone)]
pub struct Notice {
    pub text: String,
    pub shown_at: Instant,
}

pub struct App {
    pub screen: Screen,
    pub selected_tier: usize,
    pub should_quit: bool,
    pub recreate_requested: bool,
    pub paused: bool,
    pub focused: bool,
    pub session: Session,
    pub timer: TickTimer,
    pub scoreboard: Scoreboard,
    pub notice: Option<Notice>,
    pub recent_activities: Vec<String>,
    share: Box<dyn ShareSurface>,
}

impl App {
    pub fn new(catalog: Catalog, tick_interval: Duration, share: Box<dyn ShareSurface>) -> App {
        let session = Session::new(catalog);
        let scoreboard = Scoreboard::new(&session);
        App {
            screen: Screen::Bakery,
            selected_tier: 0,
            should_quit: false,
            recreate_requested: false,
            paused: false,
            focused: true,
            session,
            timer: TickTimer::new(tick_interval),
            scoreboard,
            notice: None,
            recent_activities: vec![
                "Welcome to the bakery!".to_string(),
                "Press Enter to sell your first cupcake".to_string(),
            ],
            share,
        }
    }

    pub fn on_primary_action(&mut self) {
        if display::sell_one(&mut self.session, &mut self.scoreboard) {
            let tier = self.session.current_tier();
            let activity = format!(
                "{} Now baking {} at ${} each",
                tier.image.glyph, tier.image.name, tier.unit_price
            );
            self.push_activity(activity);
        }
    }

    pub fn on_share_action(&mut self, now: Instant) {
        info!("share requested");
        let message = share::share_message(self.session.units_sold(), self.session.revenue());
        match self.share.share(&message) {
            Ok(()) => {
                info!(%message, "shared summary");
                self.push_activity(format!("📤 {message}"));
            }
            Err(err) => {
                warn!(error = %err, "share failed");
                self.notice = Some(Notice {
                    text: SHARING_NOT_AVAILABLE.to_string(),
                    shown_at: now,
                });
            }
        }
    }

    pub fn handle_lifecycle(&mut self, event: LifecycleEvent, now: Instant) {
        info!(?event, "lifecycle");
        self.timer.on_lifecycle(event, now);
    }

    /// The bakery counts as visible only while the terminal has focus and no
    /// manual pause is in effect.
    fn sync_visibility(&mut self, now: Instant) {
        let event = if self.focused && !self.paused {
            LifecycleEvent::BecameVisible
        } else {
            LifecycleEvent::BecameHidden
        };
        self.handle_lifecycle(event, now);
    }

    pub fn on_focus(&mut self, gained: bool, now: Instant) {
        self.focused = gained;
        self.sync_visibility(now);
    }

    pub fn toggle_pause(&mut self, now: Instant) {
        self.paused = !self.paused;
        self.sync_visibility(now);
        let status = if self.paused { "⏸️ Paused" } else { "▶️ Resumed" };
        self.push_activity(status.to_string());
    }

    /// Fires a pending tick and expires old notices.
    pub fn update_time(&mut self, now: Instant) {
        if self.timer.poll(now) {
            self.session.tick();
            debug!(seconds = self.session.elapsed_seconds(), "timer tick");
            self.timer.rearm(now);
        }

        if self
            .notice
            .as_ref()
            .is_some_and(|notice| now.duration_since(notice.shown_at) >= NOTICE_DURATION)
        {
            self.notice = None;
        }
    }

    pub fn suspend(&mut self, now: Instant) -> Bundle {
        self.handle_lifecycle(LifecycleEvent::Suspend, now);
        let mut bundle = Bundle::new();
        bundle.write_snapshot(&self.session.snapshot());
        bundle
    }

    pub fn resume(&mut self, bundle: &Bundle, now: Instant) {
        self.handle_lifecycle(LifecycleEvent::Resume, now);
        self.session.restore(bundle.read_snapshot());
        display::refresh(&self.session, &mut self.scoreboard);
    }

    /// Tears the app down and builds a fresh one from a suspended bundle, the
    /// way a host does on a configuration change. Only the bundle crosses over.
    pub fn recreate(mut self, now: Instant) -> App {
        self.handle_lifecycle(LifecycleEvent::BecameHidden, now);
        let hand_off = self.suspend(now).to_json();
        let App {
            session,
            timer,
            share,
            paused,
            focused,
            ..
        } = self;
        let catalog = session.catalog().clone();

        let mut fresh = App::new(catalog, timer.interval(), share);
        match Bundle::from_json(&hand_off) {
            Ok(bundle) => fresh.resume(&bundle, now),
            Err(err) => warn!(error = %err, "discarding unreadable bundle"),
        }
        fresh.paused = paused;
        fresh.focused = focused;
        fresh.sync_visibility(now);
        fresh.push_activity("🔄 Recreated from saved state".to_string());
        fresh
    }

    pub fn visible_notice(&self) -> Option<&str> {
        self.notice.as_ref().map(|notice| notice.text.as_str())
    }

    pub fn push_activity(&mut self, activity: String) {
        self.recent_activities.insert(0, activity);
        if self.recent_activities.len() > MAX_ACTIVITIES {
            self.recent_activities.truncate(MAX_ACTIVITIES);
        }
    }

    pub fn toggle_catalog(&mut self) {
        self.screen = match self.screen {
            Screen::Bakery => {
                self.selected_tier = self.session.active_tier();
                Screen::Catalog
            }
            Screen::Catalog => Screen::Bakery,
        };
    }

    pub fn next_tier(&mut self) {
        if self.screen == Screen::Catalog {
            self.selected_tier = (self.selected_tier + 1) % self.session.catalog().len();
        }
    }

    pub fn previous_tier(&mut self) {
        if self.screen != Screen::Catalog {
            return;
        }
        if self.selected_tier > 0 {
            self.selected_tier -= 1;
        } else {
            self.selected_tier = self.session.catalog().len() - 1;
        }
    }

    pub fn go_back(&mut self) {
        match self.screen {
            Screen::Bakery => self.should_quit = true,
            Screen::Catalog => self.screen = Screen::Bakery,
        }
    }
}
