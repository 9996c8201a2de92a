use config::Config;
use contact::{ContactSample, ForceState};
use friction::{compute_friction, FrictionSample, FrictionTarget};
use material::SurfaceMaterial;
use shading::{compute_shaded_force, ForceDebugTrace};

/// Texture rendering layered on top of a god-object/finger-proxy algorithm.
///
/// The host runs collision detection and constrains the proxy, then calls
/// `test_friction` while moving the proxy along a surface and `update_force`
/// once the solver force of the cycle is known.
#[derive(Debug, Clone, Default)]
pub struct TextureProxy {
    config: Config,
}

impl TextureProxy {
    pub fn new(config: Config) -> Self {
        TextureProxy { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn friction_enabled(&self) -> bool {
        self.config.friction.enabled
    }

    /// Switches texture modulated friction and friction coupled shading on
    /// or off for all following cycles.
    pub fn set_friction_enabled(&mut self, enabled: bool) {
        self.config.friction.enabled = enabled;
    }

    /// Replaces the solver force in `state` with the shaded force for the
    /// nearest contact. Call exactly once per haptic cycle, the result is fed
    /// back as solver force otherwise.
    pub fn update_force<M>(&self, state: &mut ForceState, contact: Option<&ContactSample<M>>) -> ForceDebugTrace
    where
        M: SurfaceMaterial + ?Sized,
    {
        let shaded = compute_shaded_force(state, contact, &self.config);
        state.global_force = shaded.force;
        shaded.trace
    }

    /// Applies the friction at the contact to the contacted surface before
    /// the proxy moves along it.
    ///
    /// Returns the applied friction with the roughness it came from, or `None`
    /// if the surface's friction was left unchanged.
    pub fn test_friction<M, T>(
        &self,
        contact: Option<&ContactSample<M>>,
        surface: &mut T,
    ) -> Option<FrictionSample>
    where
        M: SurfaceMaterial + ?Sized,
        T: FrictionTarget + ?Sized,
    {
        let sample = compute_friction(contact, &self.config)?;
        surface.set_friction(sample.coefficients, true);
        Some(sample)
    }
}
