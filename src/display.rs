use crate::catalog::ImageRef;
use crate::session::Session;

/// Receives what the player should currently see.
pub trait DessertDisplay {
    fn show_totals(&mut self, revenue: u64, units_sold: u64);
    fn show_image(&mut self, image: &ImageRef);
}

/// The values bound to the bakery screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scoreboard {
    pub revenue: u64,
    pub units_sold: u64,
    pub image: ImageRef,
}

impl Scoreboard {
    pub fn new(session: &Session) -> Self {
        Self {
            revenue: session.revenue(),
            units_sold: session.units_sold(),
            image: session.current_tier().image,
        }
    }
}

impl DessertDisplay for Scoreboard {
    fn show_totals(&mut self, revenue: u64, units_sold: u64) {
        self.revenue = revenue;
        self.units_sold = units_sold;
    }

    fn show_image(&mut self, image: &ImageRef) {
        self.image = *image;
    }
}

/// Records one sale and pushes the result to `display`: totals every time,
/// the image only when the tier changed.
pub fn sell_one(session: &mut Session, display: &mut dyn DessertDisplay) -> bool {
    let changed = session.record_sale();
    display.show_totals(session.revenue(), session.units_sold());
    if changed {
        display.show_image(&session.current_tier().image);
    }
    changed
}

/// Pushes the full session state, used after a restore.
pub fn refresh(session: &Session, display: &mut dyn DessertDisplay) {
    display.show_totals(session.revenue(), session.units_sold());
    display.show_image(&session.current_tier().image);
}
