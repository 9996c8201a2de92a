use geom::Vec3;
use std::default::Default;
use std::f32::consts::PI;

/// Parameters of the textured force shading branch.
#[derive(Debug, Clone)]
pub struct ShadingConfig {
    /// Fraction of the previous tangential force added to the shaded force
    /// while friction is enabled.
    pub friction_coupling: f32,
    /// The outward bias added along the mesh normal is
    /// `height * (height_bias - smoothness)`.
    pub height_bias: f32,
    pub bump: BumpProfile,
}

/// Periodic ridge profile of the procedural bump surface.
///
/// Inside a ridge, `sin(phase + frequency·π·x)` is positive and the force gets
/// pushed along `axis`. The companion `sin(phase + negator_phase + frequency·π·x)`
/// decides the push direction on either side of the ridge crest.
#[derive(Debug, Clone)]
pub struct BumpProfile {
    pub phase: f32,
    /// Half-cycles per texture width, i.e. `frequency / 2` bumps span the texture.
    pub frequency: f32,
    pub negator_phase: f32,
    /// Divisor of the ridge weight. The push ramps up from zero at the ridge
    /// edges and peaks at `0.25 / blend_distance`.
    pub blend_distance: f32,
    /// Scale of the perturbation relative to the force magnitude.
    pub perturbation_scale: f32,
    /// Force magnitude gained per unit of bump height inside a ridge.
    pub height_boost: f32,
    /// Secondary axis along which bumps push, in world space.
    pub axis: Vec3,
}

impl Default for ShadingConfig {
    fn default() -> Self {
        ShadingConfig {
            friction_coupling: 0.25,
            height_bias: 1.5,
            bump: BumpProfile::default(),
        }
    }
}

impl Default for BumpProfile {
    fn default() -> Self {
        BumpProfile {
            phase: 0.7,
            frequency: 19.5,
            negator_phase: 1.5 * PI,
            blend_distance: 0.15,
            perturbation_scale: 0.25,
            height_boost: 2.0,
            axis: Vec3::new(0.0, 1.0, 0.0),
        }
    }
}

impl BumpProfile {
    /// Length of one full bump cycle in texture space.
    pub fn period(&self) -> f32 {
        2.0 / self.frequency
    }
}
