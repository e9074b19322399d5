//! Gear outline generation
//!
//! A gear is a closed polygon: each tooth is a trapezoid with two vertices on
//! the base circle and two on the tip circle, spaced evenly around the origin.

use glam::DVec2;
use std::f64::consts::TAU;

use crate::polar_to_cartesian;

/// Half-width of a tooth at its root, as a fraction of the angular step
const ROOT_HALF_WIDTH: f64 = 0.15;
/// Half-width of a tooth at its tip, as a fraction of the angular step
const TIP_HALF_WIDTH: f64 = 0.08;

/// Gear configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GearSpec {
    /// Number of teeth
    pub teeth: u32,
    /// Base (root) radius
    pub radius: f64,
    /// Radial tooth height above the base circle
    pub depth: f64,
}

impl GearSpec {
    /// Decorative background gear in the hero section
    pub const HERO: GearSpec = GearSpec::new(16, 170.0, 25.0);
    /// Large landing gear
    pub const LANDING_LARGE: GearSpec = GearSpec::new(14, 180.0, 28.0);
    /// Small landing gear, meshed with the large one
    pub const LANDING_SMALL: GearSpec = GearSpec::new(9, 115.0, 28.0);

    pub const fn new(teeth: u32, radius: f64, depth: f64) -> Self {
        Self { teeth, radius, depth }
    }

    /// Tip circle radius
    #[inline]
    pub fn outer_radius(&self) -> f64 {
        self.radius + self.depth
    }

    /// Outline vertices, four per tooth, counter-clockwise from angle 0
    pub fn outline(&self) -> Vec<DVec2> {
        if self.teeth == 0 {
            return Vec::new();
        }
        let step = TAU / self.teeth as f64;
        let inner = self.radius;
        let outer = self.outer_radius();

        (0..self.teeth)
            .flat_map(|i| {
                let a = i as f64 * step;
                [
                    polar_to_cartesian(inner, a - step * ROOT_HALF_WIDTH),
                    polar_to_cartesian(outer, a - step * TIP_HALF_WIDTH),
                    polar_to_cartesian(outer, a + step * TIP_HALF_WIDTH),
                    polar_to_cartesian(inner, a + step * ROOT_HALF_WIDTH),
                ]
            })
            .collect()
    }

    /// SVG path data: `M x,y L x,y ... Z`
    pub fn path(&self) -> String {
        let points = self.outline();
        if points.is_empty() {
            return String::new();
        }

        let mut d = String::with_capacity(points.len() * 40);
        for (i, p) in points.iter().enumerate() {
            if i > 0 {
                d.push(' ');
            }
            d.push_str(if i == 0 { "M " } else { "L " });
            d.push_str(&format!("{},{}", p.x, p.y));
        }
        d.push_str(" Z");
        d
    }

    /// Rotation of a meshed partner for a given rotation of this gear.
    ///
    /// Partners turn the opposite way at the tooth ratio; `phase` is added
    /// so teeth interleave at angle 0.
    pub fn meshed_angle(&self, partner: &GearSpec, angle: f64, phase: f64) -> f64 {
        -angle * (self.teeth as f64 / partner.teeth as f64) + phase
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_hero_gear_vertex_count() {
        let outline = GearSpec::HERO.outline();
        assert_eq!(outline.len(), 64);

        let path = GearSpec::HERO.path();
        assert!(path.starts_with("M "));
        assert!(path.ends_with(" Z"));
        assert_eq!(path.matches("M ").count(), 1);
        assert_eq!(path.matches("L ").count(), 63);
    }

    #[test]
    fn test_first_tooth_shape() {
        let spec = GearSpec::new(4, 100.0, 10.0);
        let outline = spec.outline();
        let step = TAU / 4.0;

        // Root vertices straddle angle 0 at the base radius
        assert!((outline[0].length() - 100.0).abs() < 1e-9);
        assert!((outline[0].y.atan2(outline[0].x) + step * 0.15).abs() < 1e-9);
        assert!((outline[3].y.atan2(outline[3].x) - step * 0.15).abs() < 1e-9);

        // Tip vertices are narrower and on the tip circle
        assert!((outline[1].length() - 110.0).abs() < 1e-9);
        assert!((outline[2].y.atan2(outline[2].x) - step * 0.08).abs() < 1e-9);
    }

    #[test]
    fn test_zero_teeth_is_empty() {
        let spec = GearSpec::new(0, 50.0, 5.0);
        assert!(spec.outline().is_empty());
        assert_eq!(spec.path(), "");
    }

    #[test]
    fn test_meshed_angle_ratio() {
        let large = GearSpec::LANDING_LARGE;
        let small = GearSpec::LANDING_SMALL;
        let phase = 180.0 / 9.0;
        assert!((large.meshed_angle(&small, 0.0, phase) - 20.0).abs() < 1e-9);
        assert!((large.meshed_angle(&small, 9.0, phase) - (-14.0 + 20.0)).abs() < 1e-9);
    }

    proptest! {
        #[test]
        fn prop_four_vertices_per_tooth(teeth in 1u32..200, r in 1.0f64..500.0, depth in 0.0f64..100.0) {
            let spec = GearSpec::new(teeth, r, depth);
            let path = spec.path();
            prop_assert_eq!(spec.outline().len(), 4 * teeth as usize);
            prop_assert_eq!(path.matches("M ").count(), 1);
            prop_assert_eq!(path.matches("L ").count(), 4 * teeth as usize - 1);
            prop_assert!(path.ends_with(" Z"));
        }

        #[test]
        fn prop_vertices_within_radial_band(teeth in 1u32..100, r in 1.0f64..500.0, depth in 0.0f64..100.0) {
            let spec = GearSpec::new(teeth, r, depth);
            for p in spec.outline() {
                let len = p.length();
                prop_assert!(len >= r - 1e-6 && len <= r + depth + 1e-6);
            }
        }

        #[test]
        fn prop_path_is_deterministic(teeth in 1u32..100, r in 1.0f64..500.0, depth in 0.0f64..100.0) {
            let spec = GearSpec::new(teeth, r, depth);
            prop_assert_eq!(spec.path(), spec.path());
        }
    }
}
