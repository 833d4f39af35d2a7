//! Maps chip positions from world space to screen space.

use crate::modules::settings::ScreenSettings;
use macroquad::prelude::Vec2;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenMap {
    pub origin_x: f32,
    pub lane_spacing: f32,
    pub pixels_per_meter: f32,
    pub sprite_size: f32,
}

impl ScreenMap {
    pub fn from_settings(screen: &ScreenSettings) -> Self {
        Self {
            origin_x: screen.origin_x,
            lane_spacing: screen.lane_spacing,
            pixels_per_meter: screen.pixels_per_meter,
            sprite_size: screen.sprite_size,
        }
    }

    /// Left edge of lane `index`. Independent of the body's x.
    pub fn lane_x(&self, index: usize) -> f32 {
        self.origin_x + self.lane_spacing * index as f32
    }

    /// Resting y: sprite bottom flush with the window bottom.
    pub fn rest_y(&self, window_height: f32) -> f32 {
        window_height - self.sprite_size
    }

    /// World y scaled to pixels and flipped so world y = 0 lands on `rest_y`.
    pub fn raw_y(&self, body_y: f32, window_height: f32) -> f32 {
        self.rest_y(window_height) - body_y * self.pixels_per_meter
    }

    /// Screen position of lane `index` whose chip is at `body`, blended toward
    /// the resting y by `weight` (0 = raw physics, 1 = fully at rest).
    pub fn place(&self, index: usize, body: Vec2, window_height: f32, weight: f32) -> Vec2 {
        let raw = self.raw_y(body.y, window_height);
        let rest = self.rest_y(window_height);
        Vec2::new(self.lane_x(index), raw + (rest - raw) * weight)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn map() -> ScreenMap {
        ScreenMap::from_settings(&ScreenSettings::default())
    }

    #[test]
    fn test_lane_x() {
        let m = map();
        assert_eq!(m.lane_x(0), 10.0);
        assert_eq!(m.lane_x(8), 810.0);
    }

    #[test]
    fn test_raw_y_flips_axis() {
        let m = map();
        assert_eq!(m.raw_y(0.0, 600.0), 500.0);
        assert_eq!(m.raw_y(1.0, 600.0), 400.0);
        assert_eq!(m.raw_y(-0.5, 600.0), 550.0);
    }

    #[test]
    fn test_place_weight_endpoints() {
        let m = map();
        let body = Vec2::new(3.0, 4.0);
        let start = m.place(2, body, 600.0, 0.0);
        assert_eq!(start, Vec2::new(210.0, m.raw_y(4.0, 600.0)));
        let end = m.place(2, body, 600.0, 1.0);
        assert_eq!(end, Vec2::new(210.0, 500.0));
    }

    proptest! {
        #[test]
        fn prop_blend_stays_between_raw_and_rest(
            body_y in -20.0f32..20.0,
            weight in 0.0f32..=1.0,
            height in 200.0f32..2000.0,
        ) {
            let m = map();
            let y = m.place(0, Vec2::new(0.0, body_y), height, weight).y;
            let raw = m.raw_y(body_y, height);
            let rest = m.rest_y(height);
            let (lo, hi) = if raw < rest { (raw, rest) } else { (rest, raw) };
            prop_assert!(y >= lo - 1e-2 && y <= hi + 1e-2);
        }

        #[test]
        fn prop_distance_to_rest_shrinks_with_weight(
            body_y in -20.0f32..20.0,
            w1 in 0.0f32..=1.0,
            w2 in 0.0f32..=1.0,
        ) {
            let m = map();
            let (lo, hi) = if w1 < w2 { (w1, w2) } else { (w2, w1) };
            let rest = m.rest_y(600.0);
            let d_lo = (m.place(0, Vec2::new(0.0, body_y), 600.0, lo).y - rest).abs();
            let d_hi = (m.place(0, Vec2::new(0.0, body_y), 600.0, hi).y - rest).abs();
            prop_assert!(d_hi <= d_lo + 1e-2);
        }
    }
}
