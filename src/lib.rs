//! Blueprint Portfolio - client-side behavior for a mechanical-design portfolio
//!
//! Core modules:
//! - `gear`: Pure gear outline geometry (SVG path data)
//! - `dom`: Page capability interface and an in-memory page
//! - `schedule`: Frame/timer task abstraction and a virtual clock
//! - `landing`, `hero`, `typing`, `nav`, `reveal`, `contact`: Page behaviors
//! - `site`: Page-load entry point wiring the behaviors together
//! - `platform`: Browser bindings (wasm32 only)

pub mod config;
pub mod contact;
pub mod date;
pub mod dom;
pub mod gear;
pub mod hero;
pub mod landing;
pub mod nav;
pub mod platform;
pub mod reveal;
pub mod schedule;
pub mod site;
pub mod typing;

pub use config::SiteConfig;
pub use dom::{Dom, Extent, MemoryDom, NodeId};
pub use gear::GearSpec;
pub use schedule::{Spawn, Task, Timeline, Wake};
pub use site::{PageUrl, Site, boot};

use glam::DVec2;

/// Page timing and layout constants
pub mod consts {
    /// Virtual frame period used by the headless clock (~60 Hz)
    pub const FRAME_MS: u64 = 16;

    /// Landing gears: degrees per frame before and after ignition
    pub const LANDING_IDLE_SPEED: f64 = 0.4;
    pub const LANDING_IGNITE_SPEED: f64 = 8.0;
    /// Delay between ignition and the overlay fade
    pub const IGNITE_REVEAL_DELAY_MS: u32 = 800;
    /// Overlay fade duration; the landing loop stops when it ends
    pub const OVERLAY_FADE_MS: u32 = 1000;
    /// Layout settle time before scrolling to a deep-linked fragment
    pub const FRAGMENT_SCROLL_DELAY_MS: u32 = 100;

    /// Landing gear placement inside the overlay SVG
    pub const LANDING_LARGE_ORIGIN: (f64, f64) = (420.0, 240.0);
    pub const LANDING_SMALL_ORIGIN: (f64, f64) = (745.0, 240.0);

    /// Hero gear: degrees per frame and placement
    pub const HERO_STEP_DEG: f64 = 0.2;
    pub const HERO_ORIGIN: (f64, f64) = (400.0, 300.0);

    /// Typing effect cadence
    pub const TYPE_STEP_MS: u32 = 50;
    pub const ERASE_STEP_MS: u32 = 30;
    pub const PHRASE_DWELL_MS: u32 = 2000;

    /// Contact button feedback duration
    pub const SUBMIT_FEEDBACK_MS: u32 = 3000;

    /// Fraction of a card that must be visible before it animates in
    pub const REVEAL_THRESHOLD: f64 = 0.2;
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f64, theta: f64) -> DVec2 {
    DVec2::new(r * theta.cos(), r * theta.sin())
}

/// SVG transform placing a group at (tx, ty) rotated by `deg` degrees
pub fn transform(origin: (f64, f64), deg: f64) -> String {
    format!("translate({}, {}) rotate({})", origin.0, origin.1, deg)
}
