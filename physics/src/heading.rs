//! Compass heading helpers. Headings are degrees clockwise from North
//! (world −Z); East is world +X.

use crate::{Vec2f, Vec3f};

/// Heading of a forward vector, ignoring its vertical component.
/// Degenerate (near-zero horizontal) vectors report 0.
pub fn heading_from_forward(forward: Vec3f) -> f32 {
    if forward.x * forward.x + forward.z * forward.z < 1e-4 {
        return 0.0;
    }
    normalize_heading(forward.x.atan2(-forward.z).to_degrees())
}

/// Wrap any heading into `[0, 360)`.
pub fn normalize_heading(heading: f32) -> f32 {
    if !heading.is_finite() {
        return 0.0;
    }
    let mut h = heading % 360.0;
    if h < 0.0 {
        h += 360.0;
    }
    // -1e-8 + 360 rounds to 360 in f32
    if h >= 360.0 {
        h = 0.0;
    }
    h
}

/// Shortest signed turn from `current` to `target`, in `[-180, 180]`.
/// Positive means turn right.
pub fn heading_error(current: f32, target: f32) -> f32 {
    let mut e = normalize_heading(target) - normalize_heading(current);
    if e > 180.0 {
        e -= 360.0;
    }
    if e < -180.0 {
        e += 360.0;
    }
    e
}

/// Heading as a 2D map direction (x east, y south); North maps to (0, −1).
pub fn heading_to_2d(heading: f32) -> Vec2f {
    let r = heading.to_radians();
    Vec2f::new(r.sin(), -r.cos())
}

/// Horizontal unit forward vector for a heading.
pub fn heading_to_forward(heading: f32) -> Vec3f {
    let d = heading_to_2d(heading);
    Vec3f::new(d.x, 0.0, d.y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cardinal_directions() {
        assert_eq!(heading_from_forward(Vec3f::new(0.0, 0.0, -1.0)), 0.0);
        assert!((heading_from_forward(Vec3f::new(1.0, 0.0, 0.0)) - 90.0).abs() < 1e-4);
        assert!((heading_from_forward(Vec3f::new(0.0, 0.0, 1.0)) - 180.0).abs() < 1e-4);
        assert!((heading_from_forward(Vec3f::new(-1.0, 0.0, 0.0)) - 270.0).abs() < 1e-4);
    }

    #[test]
    fn degenerate_forward_is_north() {
        assert_eq!(heading_from_forward(Vec3f::new(0.001, 1.0, 0.001)), 0.0);
        assert_eq!(heading_from_forward(Vec3f::ZERO), 0.0);
    }

    #[test]
    fn normalize_wraps_negative_and_large() {
        assert_eq!(normalize_heading(-90.0), 270.0);
        assert_eq!(normalize_heading(720.0), 0.0);
        assert!((normalize_heading(365.5) - 5.5).abs() < 1e-4);
        assert_eq!(normalize_heading(-1e-8), 0.0);
        assert_eq!(normalize_heading(f32::NAN), 0.0);
    }

    #[test]
    fn north_maps_to_negative_y() {
        let v = heading_to_2d(0.0);
        assert!(v.x.abs() < 1e-6 && (v.y + 1.0).abs() < 1e-6, "{v:?}");
        let e = heading_to_2d(90.0);
        assert!((e.x - 1.0).abs() < 1e-6 && e.y.abs() < 1e-6, "{e:?}");
    }

    #[test]
    fn forward_roundtrips_through_heading() {
        for h in [0.0_f32, 33.0, 90.0, 181.0, 270.0, 359.0] {
            let back = heading_from_forward(heading_to_forward(h));
            assert!(heading_error(back, h).abs() < 1e-3, "h={h} back={back}");
        }
    }
}
