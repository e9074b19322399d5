//! Landing sequence
//!
//! Two meshed gears idle on a full-screen overlay until the visitor hits
//! ignite: the gears spin up, the overlay fades, the page is revealed, and
//! the spin loop is stopped once the fade has finished.

use std::cell::RefCell;
use std::rc::Rc;

use crate::consts::*;
use crate::dom::{Dom, NodeId};
use crate::gear::GearSpec;
use crate::schedule::{Spawn, Task, Wake};
use crate::transform;

pub const OVERLAY: &str = "#landing-overlay";
pub const HEADER: &str = ".blueprint-header";
pub const MAIN: &str = "main";

/// Hidden until the landing sequence reveals it
pub const HIDDEN_CLASS: &str = "hidden-initially";
/// Added to main content; keeps `hidden-initially` so its transition applies
pub const REVEAL_CLASS: &str = "reveal";
pub const FADE_CLASS: &str = "fade-out";
pub const NO_SCROLL_CLASS: &str = "no-scroll";

/// Fragment the page lands on after the sequence
const HOME_FRAGMENT: &str = "#home";

/// Phase offset so the small gear's teeth sit between the large gear's
const SMALL_GEAR_PHASE: f64 = 180.0 / 9.0;

/// Spin state shared by the frame loop and the ignite sequence
#[derive(Debug)]
struct LandingGears {
    angle: f64,
    speed: f64,
    running: bool,
    ignited: bool,
    large: Option<NodeId>,
    small: Option<NodeId>,
}

/// Handle to the landing animation
#[derive(Debug, Clone)]
pub struct Landing {
    gears: Rc<RefCell<LandingGears>>,
}

impl Landing {
    /// Lock the page behind the overlay and start the idle spin
    pub fn start(dom: &mut dyn Dom, spawn: &mut dyn Spawn) -> Self {
        if let Some(body) = dom.body() {
            dom.add_class(body, NO_SCROLL_CLASS);
        }
        dom.scroll_to_top();
        for selector in [HEADER, MAIN] {
            if let Some(node) = dom.query(selector) {
                dom.add_class(node, HIDDEN_CLASS);
            }
        }

        let path_large = dom.by_id("pathL");
        let path_small = dom.by_id("pathS");
        let spinning = match (path_large, path_small) {
            (Some(large), Some(small)) => {
                dom.set_attribute(large, "d", &GearSpec::LANDING_LARGE.path());
                dom.set_attribute(small, "d", &GearSpec::LANDING_SMALL.path());
                true
            }
            _ => {
                log::debug!("landing gear paths missing, overlay stays static");
                false
            }
        };

        let gears = Rc::new(RefCell::new(LandingGears {
            angle: 0.0,
            speed: LANDING_IDLE_SPEED,
            running: spinning,
            ignited: false,
            large: dom.by_id("gearL"),
            small: dom.by_id("gearS"),
        }));

        if spinning {
            // First frame is drawn before returning
            let mut spin = LandingSpin(gears.clone());
            let wake = spin.run(dom);
            spawn.spawn(Box::new(spin), wake);
        }

        Self { gears }
    }

    /// Spin up and schedule the reveal. Returns false if already ignited.
    pub fn ignite(&self, spawn: &mut dyn Spawn) -> bool {
        {
            let mut gears = self.gears.borrow_mut();
            if gears.ignited {
                return false;
            }
            gears.ignited = true;
            gears.speed = LANDING_IGNITE_SPEED;
        }

        log::info!("Ignition - revealing in {IGNITE_REVEAL_DELAY_MS}ms");
        let sequence = IgniteSequence {
            gears: self.gears.clone(),
            stage: IgniteStage::Revving,
        };
        spawn.spawn(Box::new(sequence), Wake::After(IGNITE_REVEAL_DELAY_MS));
        true
    }

    /// Current rotation of the large gear (degrees)
    pub fn angle(&self) -> f64 {
        self.gears.borrow().angle
    }

    /// Degrees per frame
    pub fn speed(&self) -> f64 {
        self.gears.borrow().speed
    }

    /// Whether the spin loop is still rendering frames
    pub fn is_running(&self) -> bool {
        self.gears.borrow().running
    }
}

/// Per-frame spin of both landing gears
struct LandingSpin(Rc<RefCell<LandingGears>>);

impl Task for LandingSpin {
    fn run(&mut self, dom: &mut dyn Dom) -> Wake {
        let mut gears = self.0.borrow_mut();
        if !gears.running {
            return Wake::Done;
        }

        let speed = gears.speed;
        gears.angle += speed;
        let angle = gears.angle;

        if let (Some(large), Some(small)) = (gears.large, gears.small) {
            dom.set_attribute(large, "transform", &transform(LANDING_LARGE_ORIGIN, angle));
            let small_angle =
                GearSpec::LANDING_LARGE.meshed_angle(&GearSpec::LANDING_SMALL, angle, SMALL_GEAR_PHASE);
            dom.set_attribute(small, "transform", &transform(LANDING_SMALL_ORIGIN, small_angle));
        }

        Wake::Frame
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum IgniteStage {
    /// Gears at full speed, overlay still opaque
    Revving,
    /// Overlay fading, page revealed
    Fading,
}

/// Timed steps after ignition
struct IgniteSequence {
    gears: Rc<RefCell<LandingGears>>,
    stage: IgniteStage,
}

impl Task for IgniteSequence {
    fn run(&mut self, dom: &mut dyn Dom) -> Wake {
        match self.stage {
            IgniteStage::Revving => {
                if let Some(overlay) = dom.query(OVERLAY) {
                    dom.add_class(overlay, FADE_CLASS);
                }
                if let Some(header) = dom.query(HEADER) {
                    dom.remove_class(header, HIDDEN_CLASS);
                }
                if let Some(main) = dom.query(MAIN) {
                    dom.add_class(main, REVEAL_CLASS);
                }
                if let Some(body) = dom.body() {
                    dom.remove_class(body, NO_SCROLL_CLASS);
                }
                dom.set_location_hash(HOME_FRAGMENT);
                dom.scroll_to_top();

                self.stage = IgniteStage::Fading;
                Wake::After(OVERLAY_FADE_MS)
            }
            IgniteStage::Fading => {
                self.gears.borrow_mut().running = false;
                if let Some(overlay) = dom.query(OVERLAY) {
                    dom.hide(overlay);
                }
                log::info!("Landing overlay dismissed");
                Wake::Done
            }
        }
    }
}

/// Deep-link load: show the page at once and optionally scroll to a fragment
pub fn skip(dom: &mut dyn Dom, spawn: &mut dyn Spawn, fragment: Option<&str>) {
    if let Some(overlay) = dom.query(OVERLAY) {
        dom.hide(overlay);
    }
    for selector in [HEADER, MAIN] {
        if let Some(node) = dom.query(selector) {
            dom.remove_class(node, HIDDEN_CLASS);
        }
    }
    if let Some(body) = dom.body() {
        dom.remove_class(body, NO_SCROLL_CLASS);
    }

    if let Some(id) = fragment {
        let task = ScrollToFragment { id: id.to_string() };
        spawn.spawn(Box::new(task), Wake::After(FRAGMENT_SCROLL_DELAY_MS));
    }
}

/// One-shot smooth scroll once layout has settled
struct ScrollToFragment {
    id: String,
}

impl Task for ScrollToFragment {
    fn run(&mut self, dom: &mut dyn Dom) -> Wake {
        match dom.by_id(&self.id) {
            Some(target) => dom.scroll_into_view(target),
            None => log::debug!("fragment target #{} not found", self.id),
        }
        Wake::Done
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::MemoryDom;
    use crate::schedule::Timeline;

    fn started() -> (MemoryDom, Timeline, Landing) {
        let mut dom = MemoryDom::portfolio();
        let mut timeline = Timeline::new();
        let landing = Landing::start(&mut dom, &mut timeline);
        (dom, timeline, landing)
    }

    #[test]
    fn test_start_locks_page() {
        let (mut dom, _, landing) = started();
        let body = dom.root();
        let main = dom.query(MAIN).unwrap();
        let path = dom.by_id("pathL").unwrap();

        assert!(dom.has_class(body, NO_SCROLL_CLASS));
        assert!(dom.has_class(main, HIDDEN_CLASS));
        assert_eq!(dom.attribute(path, "d"), Some(GearSpec::LANDING_LARGE.path()));
        assert!(landing.is_running());
        assert_eq!(landing.speed(), LANDING_IDLE_SPEED);
    }

    #[test]
    fn test_first_frame_drawn_on_start() {
        let (mut dom, timeline, landing) = started();
        let large = dom.by_id("gearL").unwrap();
        assert_eq!(timeline.now(), 0);
        assert_eq!(landing.angle(), LANDING_IDLE_SPEED);
        assert_eq!(
            dom.attribute(large, "transform"),
            Some(transform(LANDING_LARGE_ORIGIN, LANDING_IDLE_SPEED))
        );
    }

    #[test]
    fn test_idle_spin_transforms_both_gears() {
        let (mut dom, mut timeline, landing) = started();
        // Frames at 0, 16, 32
        timeline.run_until(&mut dom, 40);
        assert!((landing.angle() - 3.0 * LANDING_IDLE_SPEED).abs() < 1e-9);

        let large = dom.by_id("gearL").unwrap();
        let small = dom.by_id("gearS").unwrap();
        assert_eq!(
            dom.attribute(large, "transform"),
            Some(transform(LANDING_LARGE_ORIGIN, landing.angle()))
        );
        let expected = -landing.angle() * (14.0 / 9.0) + 180.0 / 9.0;
        assert_eq!(
            dom.attribute(small, "transform"),
            Some(transform(LANDING_SMALL_ORIGIN, expected))
        );
    }

    #[test]
    fn test_ignite_sequence_timing() {
        let (mut dom, mut timeline, landing) = started();
        let overlay = dom.query(OVERLAY).unwrap();
        let header = dom.query(HEADER).unwrap();
        let main = dom.query(MAIN).unwrap();
        let body = dom.root();

        assert!(landing.ignite(&mut timeline));
        assert_eq!(landing.speed(), LANDING_IGNITE_SPEED);

        timeline.run_until(&mut dom, 799);
        assert!(!dom.has_class(overlay, FADE_CLASS));
        assert!(dom.has_class(body, NO_SCROLL_CLASS));

        timeline.run_until(&mut dom, 800);
        assert!(dom.has_class(overlay, FADE_CLASS));
        assert!(!dom.has_class(header, HIDDEN_CLASS));
        assert!(dom.has_class(main, REVEAL_CLASS));
        assert!(dom.has_class(main, HIDDEN_CLASS));
        assert!(!dom.has_class(body, NO_SCROLL_CLASS));
        assert_eq!(dom.location_hash(), "#home");
        assert!(!dom.is_hidden(overlay));
        assert!(landing.is_running());

        timeline.run_until(&mut dom, 1800);
        assert!(dom.is_hidden(overlay));
        assert!(!landing.is_running());

        let angle = landing.angle();
        timeline.run_until(&mut dom, 2500);
        assert_eq!(landing.angle(), angle);
        assert_eq!(timeline.pending(), 0);
    }

    #[test]
    fn test_second_ignite_is_ignored() {
        let (mut dom, mut timeline, landing) = started();
        assert!(landing.ignite(&mut timeline));
        timeline.run_until(&mut dom, 400);
        assert!(!landing.ignite(&mut timeline));
    }

    #[test]
    fn test_ignite_without_gear_paths_still_reveals() {
        let mut dom = MemoryDom::new();
        let body = dom.root();
        let overlay = dom.create(body, "div#landing-overlay");
        let main = dom.create(body, "main");
        let mut timeline = Timeline::new();

        let landing = Landing::start(&mut dom, &mut timeline);
        assert!(!landing.is_running());
        assert_eq!(timeline.pending(), 0);

        landing.ignite(&mut timeline);
        timeline.run_until(&mut dom, 1800);
        assert!(dom.has_class(main, REVEAL_CLASS));
        assert!(dom.is_hidden(overlay));
    }

    #[test]
    fn test_skip_with_fragment_scrolls_after_settle() {
        let mut dom = MemoryDom::portfolio();
        let mut timeline = Timeline::new();
        let overlay = dom.query(OVERLAY).unwrap();
        let main = dom.query(MAIN).unwrap();
        let projects = dom.by_id("projects").unwrap();

        skip(&mut dom, &mut timeline, Some("projects"));
        assert!(dom.is_hidden(overlay));
        assert!(!dom.has_class(main, HIDDEN_CLASS));
        assert_eq!(timeline.pending(), 1);

        timeline.run_until(&mut dom, 99);
        assert_eq!(dom.scrolled_to(), None);
        timeline.run_until(&mut dom, 100);
        assert_eq!(dom.scrolled_to(), Some(projects));
        assert_eq!(dom.scroll_y(), 1400.0);
    }

    #[test]
    fn test_skip_with_unknown_fragment_is_harmless() {
        let mut dom = MemoryDom::portfolio();
        let mut timeline = Timeline::new();
        skip(&mut dom, &mut timeline, Some("nowhere"));
        timeline.run_until(&mut dom, 200);
        assert_eq!(dom.scrolled_to(), None);
    }
}
