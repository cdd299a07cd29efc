use crate::Vec3f;

/// Current global sea level, in metres (world Y).
pub trait SeaLevel {
    fn sea_level_meters(&self) -> f32;
}

/// Local water surface height at a world position.
pub trait WaveSampler {
    fn height_at(&self, position: Vec3f) -> f32;
}

/// Flat sea at a fixed level.
#[derive(Debug, Clone, Copy, Default)]
pub struct StillWater {
    pub level: f32,
}

impl SeaLevel for StillWater {
    fn sea_level_meters(&self) -> f32 {
        self.level
    }
}

/// Environment context handed to the pipeline each tick.
#[derive(Clone, Copy)]
pub struct Ocean<'a> {
    sea: &'a dyn SeaLevel,
    waves: Option<&'a dyn WaveSampler>,
}

impl<'a> Ocean<'a> {
    pub fn new(sea: &'a dyn SeaLevel) -> Self {
        Self { sea, waves: None }
    }

    pub fn with_waves(mut self, waves: &'a dyn WaveSampler) -> Self {
        self.waves = Some(waves);
        self
    }

    pub fn sea_level_meters(&self) -> f32 {
        self.sea.sea_level_meters()
    }

    /// Wave height at `position`, or the sea level when no sampler is present
    /// (or the sampler returns garbage).
    pub fn wave_height_at(&self, position: Vec3f) -> f32 {
        match self.waves {
            Some(w) => {
                let h = w.height_at(position);
                if h.is_finite() {
                    h
                } else {
                    self.sea_level_meters()
                }
            }
            None => self.sea_level_meters(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Step;

    impl WaveSampler for Step {
        fn height_at(&self, position: Vec3f) -> f32 {
            if position.x > 0.0 { 1.0 } else { f32::NAN }
        }
    }

    #[test]
    fn wave_height_falls_back_to_sea_level() {
        let sea = StillWater { level: -2.0 };
        let calm = Ocean::new(&sea);
        assert_eq!(calm.wave_height_at(Vec3f::ZERO), -2.0);

        let rough = Ocean::new(&sea).with_waves(&Step);
        assert_eq!(rough.wave_height_at(Vec3f::X), 1.0);
        assert_eq!(rough.wave_height_at(-Vec3f::X), -2.0);
    }
}
