mod friction;
mod normal_encoding;
mod shading;

pub use self::friction::{FrictionBand, FrictionConfig};
pub use self::normal_encoding::{Channel, NormalEncoding};
pub use self::shading::{BumpProfile, ShadingConfig};

/// Encapsulates parameters that influence force shading and friction modulation.
///
/// Passed by reference into every haptic cycle.
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub shading: ShadingConfig,
    pub friction: FrictionConfig,
    pub normal_encoding: NormalEncoding,
}

impl Config {
    /// Default configuration with friction rendering switched on or off.
    pub fn with_friction(enabled: bool) -> Self {
        let mut config = Config::default();
        config.friction.enabled = enabled;
        config
    }
}
