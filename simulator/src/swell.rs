use physics::{Vec3f, WaveSampler};
use serde::{Deserialize, Serialize};

const GRAVITY: f32 = 9.81;

/// Single long-crested deep-water swell on top of the sea level.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct Swell {
    /// m
    pub amplitude: f32,
    /// m
    pub wavelength: f32,
    /// Compass direction the crests travel toward, degrees.
    pub direction: f32,
    #[serde(skip)]
    pub time: f32,
    #[serde(skip)]
    pub base_level: f32,
}

impl Default for Swell {
    fn default() -> Self {
        Self { amplitude: 1.0, wavelength: 80.0, direction: 0.0, time: 0.0, base_level: 0.0 }
    }
}

impl Swell {
    fn wavenumber(&self) -> f32 {
        std::f32::consts::TAU / self.wavelength.max(1e-3)
    }

    /// Deep-water dispersion, rad/s.
    pub fn angular_frequency(&self) -> f32 {
        (GRAVITY * self.wavenumber()).sqrt()
    }

    pub fn advance(&mut self, dt: f32) {
        self.time += dt;
    }
}

impl WaveSampler for Swell {
    fn height_at(&self, position: Vec3f) -> f32 {
        let dir = physics::heading::heading_to_forward(self.direction);
        let along = position.x * dir.x + position.z * dir.z;
        let phase = self.wavenumber() * along - self.angular_frequency() * self.time;
        self.base_level + self.amplitude * phase.sin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn height_stays_within_amplitude_of_base() {
        let mut s = Swell { amplitude: 2.0, base_level: 5.0, ..Swell::default() };
        for i in 0..200 {
            s.advance(0.1);
            let h = s.height_at(Vec3f::new(i as f32 * 3.0, 0.0, -(i as f32)));
            assert!((3.0..=7.0).contains(&h), "h={h}");
        }
    }

    #[test]
    fn crest_repeats_after_one_wavelength() {
        let s = Swell { direction: 90.0, ..Swell::default() };
        let a = s.height_at(Vec3f::new(10.0, 0.0, 0.0));
        let b = s.height_at(Vec3f::new(90.0, 0.0, 0.0));
        assert!((a - b).abs() < 1e-3, "a={a} b={b}");
    }
}
