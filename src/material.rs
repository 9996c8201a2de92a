use error::{MapKind, TextureError};
use friction::FrictionCoefficients;
use geom::Vec2;
use std::sync::Arc;
use texture::{Texel, TextureMap};

/// Id of the procedurally bumped surface in the material catalog.
const BUMP_ID: u8 = 3;
/// Id of the procedurally banded friction surface in the material catalog.
const FRICTION_BAND_ID: u8 = 5;

/// Selects which force shading and friction algorithm applies to a surface.
///
/// The catalog id decides the variant, so `from_id` is the intended way to
/// obtain one. A `Textured` variant carrying a procedural id is resolved to
/// that procedural variant by `canonical` and by `MaterialBuilder`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SurfaceVariant {
    /// Force shaded by normal and height maps, friction from the roughness map.
    Textured(u8),
    /// Ridges perturbing the force along a secondary axis, heights from the
    /// albedo map. Friction is left alone.
    ProceduralBump,
    /// Bands of high friction along the texture's y axis. Force is left alone.
    ProceduralFriction,
}

impl SurfaceVariant {
    /// Looks up the variant of a catalog id.
    ///
    /// The catalog is (0) scales, (1) unknown, (2) fabric, (3) bumps,
    /// (4) metal, (5) friction, (6) leather, (7) unknown, (8) cork.
    pub fn from_id(id: u8) -> Self {
        match id {
            BUMP_ID => SurfaceVariant::ProceduralBump,
            FRICTION_BAND_ID => SurfaceVariant::ProceduralFriction,
            id => SurfaceVariant::Textured(id),
        }
    }

    /// The variant the catalog assigns to this variant's id.
    pub fn canonical(&self) -> Self {
        SurfaceVariant::from_id(self.id())
    }

    pub fn id(&self) -> u8 {
        match self {
            &SurfaceVariant::Textured(id) => id,
            &SurfaceVariant::ProceduralBump => BUMP_ID,
            &SurfaceVariant::ProceduralFriction => FRICTION_BAND_ID,
        }
    }
}

/// Capabilities a material needs to take part in texture rendering.
///
/// Resolved once when building the scene, a surface either carries a
/// `SurfaceMaterial` or is rendered without texture effects.
pub trait SurfaceMaterial {
    fn variant(&self) -> SurfaceVariant;

    /// Image backing one of the sample fields, if present.
    fn map(&self, kind: MapKind) -> Option<&TextureMap>;

    /// In `[0, 1]`, smooth surfaces let the texture perturb force more.
    fn smoothness(&self) -> f32;

    fn friction_factor(&self) -> f32;

    /// Friction scaled by the procedural friction band multiplier.
    fn base_friction(&self) -> FrictionCoefficients;

    /// Friction at full roughness for textured surfaces.
    fn max_friction(&self) -> FrictionCoefficients;

    /// Bilinearly filtered color of a map at wrapped texture coordinates.
    fn sample(&self, kind: MapKind, texcoords: Vec2) -> Result<Texel, TextureError> {
        self.map(kind)
            .and_then(|map| map.sample(texcoords))
            .ok_or(TextureError::MissingMap(kind))
    }

    fn sample_albedo(&self, texcoords: Vec2) -> Result<Texel, TextureError> {
        self.sample(MapKind::Albedo, texcoords)
    }

    fn sample_normal(&self, texcoords: Vec2) -> Result<Texel, TextureError> {
        self.sample(MapKind::Normal, texcoords)
    }

    fn sample_height(&self, texcoords: Vec2) -> Result<Texel, TextureError> {
        self.sample(MapKind::Height, texcoords)
    }

    fn sample_roughness(&self, texcoords: Vec2) -> Result<Texel, TextureError> {
        self.sample(MapKind::Roughness, texcoords)
    }
}

/// Texture maps and constant coefficients of one surface instance.
///
/// Built once at scene setup with a `MaterialBuilder` and never mutated
/// afterwards. Maps are reference counted so that surfaces can share images.
#[derive(Debug, Clone)]
pub struct MaterialDescriptor {
    variant: SurfaceVariant,
    albedo: Option<Arc<TextureMap>>,
    normal: Option<Arc<TextureMap>>,
    height: Option<Arc<TextureMap>>,
    roughness: Option<Arc<TextureMap>>,
    friction_factor: f32,
    smoothness: f32,
    base_friction: FrictionCoefficients,
    max_friction: FrictionCoefficients,
}

impl SurfaceMaterial for MaterialDescriptor {
    fn variant(&self) -> SurfaceVariant {
        self.variant
    }

    fn map(&self, kind: MapKind) -> Option<&TextureMap> {
        let map = match kind {
            MapKind::Albedo => &self.albedo,
            MapKind::Normal => &self.normal,
            MapKind::Height => &self.height,
            MapKind::Roughness => &self.roughness,
        };

        map.as_ref().map(|m| &**m)
    }

    fn smoothness(&self) -> f32 {
        self.smoothness
    }

    fn friction_factor(&self) -> f32 {
        self.friction_factor
    }

    fn base_friction(&self) -> FrictionCoefficients {
        self.base_friction
    }

    fn max_friction(&self) -> FrictionCoefficients {
        self.max_friction
    }
}

pub struct MaterialBuilder {
    material: MaterialDescriptor,
}

impl MaterialBuilder {
    /// Starts a material without maps and with neutral coefficients.
    pub fn new(variant: SurfaceVariant) -> MaterialBuilder {
        MaterialBuilder {
            material: MaterialDescriptor {
                variant: variant.canonical(),
                albedo: None,
                normal: None,
                height: None,
                roughness: None,
                friction_factor: 1.0,
                smoothness: 0.5,
                base_friction: FrictionCoefficients::new(0.3, 0.1),
                max_friction: FrictionCoefficients::new(2.0, 1.7),
            },
        }
    }

    /// Starts a material with the coefficients tuned for the catalog id.
    /// Ids outside the catalog get neutral coefficients.
    pub fn preset(id: u8) -> MaterialBuilder {
        let (friction_factor, smoothness) = match id {
            0 => (0.4, 0.6),
            1 => (1.0, 1.0),
            2 => (0.5, 0.8),
            3 => (0.0, 1.0),
            4 => (0.4, 0.85),
            5 => (1.0, 1.0),
            6 => (0.25, 0.4),
            7 => (1.0, 1.0),
            8 => (0.8, 0.35),
            _ => (1.0, 0.5),
        };

        MaterialBuilder::new(SurfaceVariant::from_id(id))
            .friction_factor(friction_factor)
            .smoothness(smoothness)
    }

    pub fn albedo_map<M: Into<Arc<TextureMap>>>(mut self, map: M) -> MaterialBuilder {
        self.material.albedo = Some(map.into());
        self
    }

    pub fn normal_map<M: Into<Arc<TextureMap>>>(mut self, map: M) -> MaterialBuilder {
        self.material.normal = Some(map.into());
        self
    }

    pub fn height_map<M: Into<Arc<TextureMap>>>(mut self, map: M) -> MaterialBuilder {
        self.material.height = Some(map.into());
        self
    }

    pub fn roughness_map<M: Into<Arc<TextureMap>>>(mut self, map: M) -> MaterialBuilder {
        self.material.roughness = Some(map.into());
        self
    }

    pub fn friction_factor(mut self, friction_factor: f32) -> MaterialBuilder {
        self.material.friction_factor = friction_factor;
        self
    }

    pub fn smoothness(mut self, smoothness: f32) -> MaterialBuilder {
        self.material.smoothness = smoothness;
        self
    }

    pub fn base_friction(mut self, static_friction: f32, dynamic_friction: f32) -> MaterialBuilder {
        self.material.base_friction = FrictionCoefficients::new(static_friction, dynamic_friction);
        self
    }

    pub fn max_friction(mut self, static_friction: f32, dynamic_friction: f32) -> MaterialBuilder {
        self.material.max_friction = FrictionCoefficients::new(static_friction, dynamic_friction);
        self
    }

    pub fn build(self) -> MaterialDescriptor {
        assert!(
            self.material.smoothness >= 0.0 && self.material.smoothness <= 1.0,
            "Smoothness must be in [0, 1], got {}",
            self.material.smoothness
        );

        assert!(
            self.material.friction_factor >= 0.0,
            "Friction factor must not be negative, got {}",
            self.material.friction_factor
        );

        self.material
    }
}
