use config::{Config, FrictionBand};
use contact::ContactSample;
use error::TextureError;
use material::{SurfaceMaterial, SurfaceVariant};
use std::f32::consts::PI;
use texture::{wrap_coordinate, Texel};

/// A pair of static and dynamic Coulomb friction coefficients.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FrictionCoefficients {
    pub static_friction: f32,
    pub dynamic_friction: f32,
}

impl FrictionCoefficients {
    pub fn new(static_friction: f32, dynamic_friction: f32) -> Self {
        FrictionCoefficients {
            static_friction,
            dynamic_friction,
        }
    }

    pub fn frictionless() -> Self {
        FrictionCoefficients::new(0.0, 0.0)
    }

    pub fn scaled(&self, factor: f32) -> Self {
        FrictionCoefficients::new(self.static_friction * factor, self.dynamic_friction * factor)
    }
}

/// Friction computed for a contact, with the roughness it was derived from.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FrictionSample {
    pub coefficients: FrictionCoefficients,
    /// Roughness map color at the contact, `None` on the banded surface.
    pub roughness_texel: Option<Texel>,
}

impl FrictionSample {
    fn banded(coefficients: FrictionCoefficients) -> Self {
        FrictionSample {
            coefficients,
            roughness_texel: None,
        }
    }
}

/// Something that friction can be applied to, usually the contacted surface
/// of the host engine.
pub trait FrictionTarget {
    /// Overwrites the friction coefficients. If `symmetric` is set, the
    /// coefficients apply regardless of which side the surface is touched from.
    fn set_friction(&mut self, coefficients: FrictionCoefficients, symmetric: bool);
}

/// Persistent friction of a surface, consulted by the constraint solver.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FrictionState {
    pub coefficients: FrictionCoefficients,
    pub symmetric: bool,
}

impl FrictionState {
    pub fn new(coefficients: FrictionCoefficients) -> Self {
        FrictionState {
            coefficients,
            symmetric: true,
        }
    }
}

impl Default for FrictionState {
    fn default() -> Self {
        FrictionState::new(FrictionCoefficients::frictionless())
    }
}

impl FrictionTarget for FrictionState {
    fn set_friction(&mut self, coefficients: FrictionCoefficients, symmetric: bool) {
        self.coefficients = coefficients;
        self.symmetric = symmetric;
    }
}

/// Multiplier of the base friction on the banded friction surface at texture
/// coordinate `y`.
///
/// Zero between bands. Inside a band the profile is sharpened cubically so
/// bands get a pronounced but continuous edge.
pub fn band_multiplier(band: &FrictionBand, y: f32) -> f32 {
    let y = wrap_coordinate(y);
    let variant = (band.frequency * PI * y + band.phase).sin().max(0.0);
    sharpen(variant)
}

fn sharpen(variant: f32) -> f32 {
    (1.0 + variant).powi(3) - 1.0
}

/// Friction at the contact, or `None` if the contacted surface does not
/// modulate friction or is missing textures. In that case the surface's
/// current friction should stay in effect.
pub fn compute_friction<M>(contact: Option<&ContactSample<M>>, config: &Config) -> Option<FrictionSample>
where
    M: SurfaceMaterial + ?Sized,
{
    let contact = contact?;
    let material = match contact.material {
        Some(material) => material,
        None => {
            trace!("No textured material at {:?}, keeping friction", contact.texcoords);
            return None;
        }
    };

    let sample = match material.variant() {
        SurfaceVariant::ProceduralFriction => {
            let multiplier = band_multiplier(&config.friction.band, contact.texcoords.y);
            trace!("Friction multiplier: {}", multiplier);
            Ok(FrictionSample::banded(material.base_friction().scaled(multiplier)))
        }
        SurfaceVariant::Textured(_) => textured_friction(contact, material, config),
        SurfaceVariant::ProceduralBump => return None,
    };

    match sample {
        Ok(sample) => Some(sample),
        Err(err) => {
            warn!("Skipping friction modulation: {}", err);
            None
        }
    }
}

fn textured_friction<M>(
    contact: &ContactSample<M>,
    material: &M,
    config: &Config,
) -> Result<FrictionSample, TextureError>
where
    M: SurfaceMaterial + ?Sized,
{
    let roughness_texel = material.sample_roughness(contact.texcoords)?;
    let roughness = roughness_texel.mean() / 255.0;

    let coefficients = if config.friction.enabled {
        let factor = roughness * config.friction.roughness_damping * material.friction_factor();
        material.max_friction().scaled(factor)
    } else {
        FrictionCoefficients::frictionless()
    };

    Ok(FrictionSample {
        coefficients,
        roughness_texel: Some(roughness_texel),
    })
}

#[cfg(test)]
mod test {
    use super::*;
    use geom::{Vec2, Vec3};
    use material::{MaterialBuilder, MaterialDescriptor};
    use texture::TextureMap;

    #[test]
    fn test_sharpen_strictly_increasing() {
        assert_eq!(0.0, sharpen(0.0));

        let mut last = sharpen(0.0);
        for i in 1..=100 {
            let next = sharpen(i as f32 / 100.0);
            assert!(next > last);
            last = next;
        }

        assert_relative_eq!(7.0, sharpen(1.0));
    }

    #[test]
    fn test_band_multiplier_zero_between_bands() {
        let band = FrictionBand::default();
        let mut inside = 0;

        for i in 0..1000 {
            let y = i as f32 / 1000.0;
            let variant = (band.frequency * PI * y + band.phase).sin();
            let multiplier = band_multiplier(&band, y);

            if variant <= 0.0 {
                assert_eq!(0.0, multiplier);
            } else {
                inside += 1;
                assert!(multiplier > 0.0 && multiplier <= 7.0);
            }
        }

        assert!(inside > 0);
    }

    #[test]
    fn test_band_multiplier_wraps() {
        let band = FrictionBand::default();
        assert_relative_eq!(band_multiplier(&band, 0.25), band_multiplier(&band, -0.75), epsilon = 0.0001);
        assert_relative_eq!(band_multiplier(&band, 0.25), band_multiplier(&band, 1.25), epsilon = 0.0001);
    }

    #[test]
    fn test_band_scales_base_friction() {
        let material = MaterialBuilder::preset(5).base_friction(0.3, 0.1).build();
        let band = FrictionBand::default();
        // Peak of the first band
        let y = (0.5 * PI - band.phase) / (band.frequency * PI);
        let contact = contact_at(&material, Vec2::new(0.2, y));

        let sample = compute_friction(Some(&contact), &Config::default()).unwrap();
        let coefficients = sample.coefficients;

        assert_eq!(None, sample.roughness_texel);
        assert_relative_eq!(0.3 * 7.0, coefficients.static_friction, epsilon = 0.001);
        assert_relative_eq!(0.1 * 7.0, coefficients.dynamic_friction, epsilon = 0.001);
    }

    #[test]
    fn test_roughness_scales_max_friction() {
        let material = MaterialBuilder::preset(8)
            .roughness_map(TextureMap::uniform([255, 255, 255]))
            .build();
        let contact = contact_at(&material, Vec2::new(0.5, 0.5));

        let coefficients = compute_friction(Some(&contact), &Config::with_friction(true))
            .unwrap()
            .coefficients;

        // full roughness, damped by a quarter, cork friction factor
        assert_relative_eq!(2.0 * 0.25 * 0.8, coefficients.static_friction, epsilon = 0.0001);
        assert_relative_eq!(1.7 * 0.25 * 0.8, coefficients.dynamic_friction, epsilon = 0.0001);
    }

    #[test]
    fn test_disabled_friction_is_frictionless() {
        let material = MaterialBuilder::preset(8)
            .roughness_map(TextureMap::uniform([255, 255, 255]))
            .build();
        let contact = contact_at(&material, Vec2::new(0.5, 0.5));

        let sample = compute_friction(Some(&contact), &Config::with_friction(false)).unwrap();
        assert_eq!(FrictionCoefficients::frictionless(), sample.coefficients);
    }

    #[test]
    fn test_roughness_texel_at_contact() {
        let material = MaterialBuilder::preset(6)
            .roughness_map(TextureMap::from_fn(3, 1, |x, _| [x as u8 * 100, 30, 60]))
            .build();
        let contact = contact_at(&material, Vec2::new(0.5, 0.5));

        let sample = compute_friction(Some(&contact), &Config::with_friction(true)).unwrap();
        let texel = sample.roughness_texel.unwrap();

        assert_eq!(Texel::new(100.0, 30.0, 60.0), texel);
        let expected = 2.0 * (190.0 / 3.0 / 255.0) * 0.25 * 0.25;
        assert_relative_eq!(expected, sample.coefficients.static_friction, epsilon = 0.0001);
    }

    #[test]
    fn test_skipped_without_resources() {
        let config = Config::with_friction(true);

        assert_eq!(None, compute_friction::<MaterialDescriptor>(None, &config));

        let no_roughness = MaterialBuilder::preset(0).build();
        assert_eq!(None, compute_friction(Some(&contact_at(&no_roughness, Vec2::new(0.5, 0.5))), &config));

        let bumps = MaterialBuilder::preset(3)
            .roughness_map(TextureMap::uniform([255, 255, 255]))
            .build();
        assert_eq!(None, compute_friction(Some(&contact_at(&bumps, Vec2::new(0.5, 0.5))), &config));
    }

    #[test]
    fn test_friction_state_overwritten() {
        let mut state = FrictionState::default();
        state.set_friction(FrictionCoefficients::new(0.4, 0.2), false);

        assert_eq!(FrictionCoefficients::new(0.4, 0.2), state.coefficients);
        assert!(!state.symmetric);
    }

    fn contact_at<'a>(material: &'a MaterialDescriptor, texcoords: Vec2) -> ContactSample<'a> {
        let origin = Vec3::new(0.0, 0.0, 0.0);
        ContactSample::new(
            origin,
            origin,
            origin,
            Vec3::new(0.0, 0.0, 1.0),
            texcoords,
            Some(material),
        )
    }
}
