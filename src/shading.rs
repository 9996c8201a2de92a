use config::{BumpProfile, Config};
use contact::{ContactSample, ForceState};
use error::{MapKind, TextureError};
use geom::prelude::*;
use geom::{Vec2, Vec3};
use material::{SurfaceMaterial, SurfaceVariant};
use rebasis::{rebase_normal, rebase_vector};
use std::f32::consts::PI;
use std::f32::EPSILON;
use texture::{wrap_coordinate, Texel};

/// The bump profile evaluated at one texture position.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct BumpSample {
    /// Positive inside a ridge.
    pub y_variant: f32,
    /// Phase shifted companion, its sign decides the push direction.
    pub negator: f32,
    /// Signed weight of the perturbation, zero outside ridges.
    pub perturbation: f32,
}

/// Intermediate values of one shading step, for visualization and tuning.
///
/// Fields stay `None` if the branch that was taken does not produce them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ForceDebugTrace {
    pub texcoords: Option<Vec2>,
    pub albedo: Option<Texel>,
    pub normal_texel: Option<Texel>,
    pub height_texel: Option<Texel>,
    pub bump: Option<BumpSample>,
    /// Normal decoded from the normal map, in texture space.
    pub normal_map_normal: Option<Vec3>,
    /// Shading normal of the mesh at the contact.
    pub surface_normal: Option<Vec3>,
    /// Normal map normal rotated into the frame of the surface normal.
    pub perturbed_normal: Option<Vec3>,
    pub height: Option<f32>,
    /// Slope of the height map along u and v, per texel.
    pub height_gradient: Option<Vec2>,
    /// Height gradient rotated into the frame of the surface normal, pointing
    /// uphill along the surface.
    pub delta_h: Option<Vec3>,
    pub penetration_depth: Option<f32>,
    pub perturbed_factor: Option<f32>,
    pub mesh_normal_factor: Option<f32>,
}

/// Force to send to the device, with the values that led to it.
#[derive(Debug, Clone, PartialEq)]
pub struct ShadedForce {
    pub force: Vec3,
    pub trace: ForceDebugTrace,
}

impl ShadedForce {
    fn unchanged(force: Vec3, trace: ForceDebugTrace) -> Self {
        ShadedForce { force, trace }
    }
}

/// Evaluates the ridge profile of the procedural bump surface at texture
/// coordinate `x`.
///
/// Inside a ridge the perturbation is `(1 - y_variant) * y_variant / blend_distance`,
/// so it starts at zero at the ridge edges and peaks at `0.25 / blend_distance`
/// halfway up. It reaches zero again at the crest, where `negator` changes sign
/// and the push direction flips.
pub fn bump_profile(profile: &BumpProfile, x: f32) -> BumpSample {
    let x = wrap_coordinate(x);
    let angle = profile.phase + profile.frequency * PI * x;

    let y_variant = angle.sin();
    let negator = (angle + profile.negator_phase).sin();

    let perturbation = if y_variant > 0.0 {
        let blend = if y_variant < 1.0 {
            y_variant / profile.blend_distance
        } else {
            1.0
        };
        let weight = (1.0 - y_variant) * blend;
        if negator < 0.0 {
            -weight
        } else {
            weight
        }
    } else {
        0.0
    };

    BumpSample {
        y_variant,
        negator,
        perturbation,
    }
}

/// Perturbs the force computed by the constraint solver according to the
/// textures of the contacted surface.
///
/// Without a contact, a texture-aware material or any of the required
/// texture maps, the solver force is returned unchanged.
pub fn compute_shaded_force<M>(
    state: &ForceState,
    contact: Option<&ContactSample<M>>,
    config: &Config,
) -> ShadedForce
where
    M: SurfaceMaterial + ?Sized,
{
    let base = state.global_force;
    let mut trace = ForceDebugTrace::default();

    let contact = match contact {
        Some(contact) => contact,
        None => return ShadedForce::unchanged(base, trace),
    };

    trace.texcoords = Some(contact.texcoords);

    let shaded = match contact.material {
        Some(material) => match material.variant() {
            SurfaceVariant::ProceduralBump => shade_bump(base, contact, material, &config.shading.bump, &mut trace),
            SurfaceVariant::Textured(_) => shade_textured(state, contact, material, config, &mut trace),
            SurfaceVariant::ProceduralFriction => Ok(base),
        },
        None => Err(TextureError::MissingMaterial),
    };

    match shaded {
        Ok(force) => ShadedForce { force, trace },
        Err(TextureError::MissingMaterial) => {
            trace!("No textured material at {:?}, leaving force unshaded", contact.texcoords);
            ShadedForce::unchanged(base, trace)
        }
        Err(TextureError::DegenerateGeometry) => {
            debug!("Degenerate geometry at {:?}, leaving force unshaded", contact.texcoords);
            ShadedForce::unchanged(base, trace)
        }
        Err(err) => {
            warn!("Skipping force shading: {}", err);
            ShadedForce::unchanged(base, trace)
        }
    }
}

fn shade_bump<M>(
    base: Vec3,
    contact: &ContactSample<M>,
    material: &M,
    profile: &BumpProfile,
    trace: &mut ForceDebugTrace,
) -> Result<Vec3, TextureError>
where
    M: SurfaceMaterial + ?Sized,
{
    let mut magnitude = non_degenerate_magnitude(base)?;

    let albedo = material.sample_albedo(contact.texcoords)?;
    let height = (albedo.g + albedo.b) / (2.0 * 255.0);
    trace.albedo = Some(albedo);
    trace.height = Some(height);

    let bump = bump_profile(profile, contact.texcoords.x);
    trace.bump = Some(bump);

    if bump.y_variant > 0.0 {
        magnitude += height * profile.height_boost;
    }

    let offset = bump.perturbation * magnitude * profile.perturbation_scale;
    rescale(base + profile.axis * offset, magnitude)
}

fn shade_textured<M>(
    state: &ForceState,
    contact: &ContactSample<M>,
    material: &M,
    config: &Config,
    trace: &mut ForceDebugTrace,
) -> Result<Vec3, TextureError>
where
    M: SurfaceMaterial + ?Sized,
{
    let magnitude = non_degenerate_magnitude(state.global_force)?;
    let texcoords = contact.texcoords;

    let normal_texel = material.sample_normal(texcoords)?;
    trace.normal_texel = Some(normal_texel);
    let normal_map_normal = normal_texel
        .decode_normal(&config.normal_encoding)
        .ok_or(TextureError::DegenerateGeometry)?;
    trace.normal_map_normal = Some(normal_map_normal);

    let surface_normal = rescale(contact.normal, 1.0)?;
    let perturbed_normal = rebase_normal(normal_map_normal, surface_normal);
    trace.surface_normal = Some(surface_normal);
    trace.perturbed_normal = Some(perturbed_normal);

    let height_texel = material.sample_height(texcoords)?;
    let height = height_texel.luminance() / 255.0;
    trace.height_texel = Some(height_texel);
    trace.height = Some(height);
    trace.height_gradient = material
        .map(MapKind::Height)
        .and_then(|map| map.height_gradient(texcoords));
    trace.delta_h = trace
        .height_gradient
        .map(|gradient| rebase_vector(Vec3::new(gradient.x, gradient.y, 0.0), surface_normal));

    let smoothness = material.smoothness();
    let penetration_depth = contact.penetration_depth() + height + (1.0 - smoothness);
    let perturbed_factor = smoothness * height;
    let mesh_normal_factor = (penetration_depth - perturbed_factor).max(0.0).min(1.0);
    trace.penetration_depth = Some(penetration_depth);
    trace.perturbed_factor = Some(perturbed_factor);
    trace.mesh_normal_factor = Some(mesh_normal_factor);

    // Deep contacts lean on the mesh normal, shallow ones purely on the
    // texture. The blend weight is not clamped, only the reported factor is.
    let mut direction = if penetration_depth > perturbed_factor {
        surface_normal * (penetration_depth - perturbed_factor) + perturbed_normal * perturbed_factor
    } else {
        perturbed_normal * perturbed_factor
    };

    direction += surface_normal * (height * (config.shading.height_bias - smoothness));

    if config.friction.enabled {
        direction += state.tangential_force * config.shading.friction_coupling;
    }

    rescale(direction, magnitude)
}

fn non_degenerate_magnitude(force: Vec3) -> Result<f32, TextureError> {
    let magnitude = force.magnitude();
    if magnitude < EPSILON {
        Err(TextureError::DegenerateGeometry)
    } else {
        Ok(magnitude)
    }
}

/// Scales `direction` to the given length.
fn rescale(direction: Vec3, magnitude: f32) -> Result<Vec3, TextureError> {
    non_degenerate_magnitude(direction).map(|length| direction * (magnitude / length))
}
