use geom::prelude::*;
use geom::{Interpolation, TangentSpace, TupleTriangle, Vec2, Vec3, Vertex};
use material::{MaterialDescriptor, SurfaceMaterial};
use texture::wrap_texcoords;

/// Everything known about the nearest contact in the current haptic cycle.
///
/// Rebuilt every cycle from the host's collision result and only valid for
/// that cycle.
#[derive(Debug, Clone)]
pub struct ContactSample<'a, M: 'a + ?Sized = MaterialDescriptor> {
    /// Position of the haptic device in world space.
    pub device_position: Vec3,
    /// Position of the proxy after it was constrained to the surface.
    pub proxy_position: Vec3,
    /// Position of the contact relative to the contacted mesh.
    pub local_position: Vec3,
    /// Unit shading normal at the contact, smoothed across the triangle.
    pub normal: Vec3,
    /// Texture coordinates at the contact, wrapped into `[0, 1)`.
    pub texcoords: Vec2,
    /// Material of the contacted surface, `None` if it has no texture effects.
    pub material: Option<&'a M>,
}

impl<'a, M: SurfaceMaterial + ?Sized> ContactSample<'a, M> {
    pub fn new(
        device_position: Vec3,
        proxy_position: Vec3,
        local_position: Vec3,
        normal: Vec3,
        texcoords: Vec2,
        material: Option<&'a M>,
    ) -> Self {
        ContactSample {
            device_position,
            proxy_position,
            local_position,
            normal,
            texcoords: wrap_texcoords(texcoords),
            material,
        }
    }

    /// Resolves texture coordinates and the shading normal at a position on
    /// the contacted triangle by interpolating its vertices.
    ///
    /// If the vertex normals cancel out at the contact, the face normal is
    /// used instead.
    pub fn on_triangle(
        triangle: &TupleTriangle<Vertex>,
        local_position: Vec3,
        device_position: Vec3,
        proxy_position: Vec3,
        material: Option<&'a M>,
    ) -> Self {
        let texcoords = triangle.interpolate_at(local_position, |v| v.texcoords);
        let normal = triangle.interpolate_at(local_position, |v| v.normal);

        let normal = if normal.magnitude() > ::std::f32::EPSILON {
            normal.normalize()
        } else {
            warn!("Vertex normals cancel out at contact, falling back to face normal");
            triangle.normal()
        };

        ContactSample::new(
            device_position,
            proxy_position,
            local_position,
            normal,
            texcoords,
            material,
        )
    }

    /// Distance between the constrained proxy and the device.
    pub fn penetration_depth(&self) -> f32 {
        (self.proxy_position - self.device_position).magnitude()
    }
}

/// Force fields of the haptic tool, owned by the host.
///
/// Before shading, `global_force` holds the force computed by the constraint
/// solver for the current cycle, and `tangential_force` its component along
/// the surface.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ForceState {
    pub global_force: Vec3,
    pub tangential_force: Vec3,
}

impl ForceState {
    pub fn new(global_force: Vec3, tangential_force: Vec3) -> Self {
        ForceState {
            global_force,
            tangential_force,
        }
    }

    /// A state with the given force and no tangential component.
    pub fn normal_only(global_force: Vec3) -> Self {
        ForceState::new(global_force, Vec3::new(0.0, 0.0, 0.0))
    }
}

impl Default for ForceState {
    fn default() -> Self {
        ForceState::normal_only(Vec3::new(0.0, 0.0, 0.0))
    }
}
