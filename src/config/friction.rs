use std::default::Default;

/// Specifies whether and how friction gets modulated by surface textures.
#[derive(Debug, Clone)]
pub struct FrictionConfig {
    /// Friction rendering is off until explicitly switched on.
    pub enabled: bool,
    /// Global damping applied to roughness map values.
    pub roughness_damping: f32,
    pub band: FrictionBand,
}

/// High friction bands of the procedural friction surface, running along
/// the texture's y axis.
#[derive(Debug, Clone)]
pub struct FrictionBand {
    pub frequency: f32,
    pub phase: f32,
}

impl Default for FrictionConfig {
    fn default() -> Self {
        FrictionConfig {
            enabled: false,
            roughness_damping: 0.25,
            band: FrictionBand::default(),
        }
    }
}

impl Default for FrictionBand {
    fn default() -> Self {
        FrictionBand {
            frequency: 9.75,
            phase: 0.5,
        }
    }
}
