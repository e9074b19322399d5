//! Hero section background gear

use crate::consts::{HERO_ORIGIN, HERO_STEP_DEG};
use crate::dom::{Dom, NodeId};
use crate::gear::GearSpec;
use crate::schedule::{Spawn, Task, Wake};
use crate::transform;

/// Endless slow rotation of the hero gear
#[derive(Debug)]
pub struct HeroGear {
    angle: f64,
    group: Option<NodeId>,
}

impl HeroGear {
    /// Draw the gear outline and start rotating its group
    pub fn start(dom: &mut dyn Dom, spawn: &mut dyn Spawn) {
        match dom.by_id("heroGearPath") {
            Some(path) => dom.set_attribute(path, "d", &GearSpec::HERO.path()),
            None => log::debug!("#heroGearPath not found"),
        }

        let mut gear = HeroGear {
            angle: 0.0,
            group: dom.by_id("heroGearGroup"),
        };
        let wake = gear.run(dom);
        spawn.spawn(Box::new(gear), wake);
    }
}

impl Task for HeroGear {
    fn run(&mut self, dom: &mut dyn Dom) -> Wake {
        self.angle += HERO_STEP_DEG;
        if let Some(group) = self.group {
            dom.set_attribute(group, "transform", &transform(HERO_ORIGIN, self.angle));
        }
        // Runs for the lifetime of the page; the browser pauses it in hidden tabs
        Wake::Frame
    }
}
