use crate::GalaxyError;
use bevy::color::Color;

#[derive(Clone, Debug, PartialEq)]
pub struct GalaxyParameters {
    pub count: usize,
    /// Point size in world units, only read by the renderer.
    pub size: f32,
    pub radius: f32,
    pub branches: u32,
    pub spin: f32,
    pub randomness: f32,
    pub randomness_power: f32,
    pub inside_color: Color,
    pub outside_color: Color,
}

impl Default for GalaxyParameters {
    fn default() -> Self {
        Self {
            count: 1000,
            size: 0.02,
            radius: 5.0,
            branches: 3,
            spin: 3.0,
            randomness: 0.2,
            randomness_power: 3.0,
            inside_color: Color::srgb_u8(0xff, 0xff, 0x44),
            outside_color: Color::srgb_u8(0x44, 0xff, 0xff),
        }
    }
}

impl GalaxyParameters {
    // Panel ranges. The generator itself only rejects structurally invalid values.
    pub const MIN: Self = Self {
        count: 100,
        size: 0.01,
        radius: 0.01,
        branches: 1,
        spin: 1.0,
        randomness: 0.1,
        randomness_power: 1.0,
        inside_color: Color::BLACK,
        outside_color: Color::BLACK,
    };
    pub const MAX: Self = Self {
        count: 100_000,
        size: 0.1,
        radius: 20.0,
        branches: 10,
        spin: 10.0,
        randomness: 2.0,
        randomness_power: 5.0,
        inside_color: Color::WHITE,
        outside_color: Color::WHITE,
    };
    pub const COUNT_STEP: usize = 100;

    /// Checks the values the spiral formula cannot work with.
    /// `size` never reaches the formula and is left to the renderer.
    pub fn validate(&self) -> Result<(), GalaxyError> {
        if self.branches < 1 {
            return Err(GalaxyError::invalid("branches", "must be at least 1"));
        }
        if !self.radius.is_finite() || self.radius < 0.0 {
            return Err(GalaxyError::invalid("radius", "must be finite and non-negative"));
        }
        if !self.spin.is_finite() {
            return Err(GalaxyError::invalid("spin", "must be finite"));
        }
        if !self.randomness.is_finite() || self.randomness < 0.0 {
            return Err(GalaxyError::invalid(
                "randomness",
                "must be finite and non-negative",
            ));
        }
        if !self.randomness_power.is_finite() || self.randomness_power <= 0.0 {
            return Err(GalaxyError::invalid(
                "randomness_power",
                "must be finite and positive",
            ));
        }
        Ok(())
    }

    /// Copy of `self` with every numeric field pulled into the panel range.
    /// Count snaps down to a multiple of [`Self::COUNT_STEP`].
    pub fn clamped(&self) -> Self {
        let (min, max) = (&Self::MIN, &Self::MAX);
        let count = self.count.clamp(min.count, max.count);
        Self {
            count: count - count % Self::COUNT_STEP,
            size: self.size.clamp(min.size, max.size),
            radius: self.radius.clamp(min.radius, max.radius),
            branches: self.branches.clamp(min.branches, max.branches),
            spin: self.spin.clamp(min.spin, max.spin),
            randomness: self.randomness.clamp(min.randomness, max.randomness),
            randomness_power: self
                .randomness_power
                .clamp(min.randomness_power, max.randomness_power),
            inside_color: self.inside_color,
            outside_color: self.outside_color,
        }
    }
}
