use geom::prelude::*;
use geom::Vec3;
use std::f32::consts::FRAC_PI_2;

/// Re-expresses a normal sampled from a tangent space normal map, where `+Z`
/// is the unperturbed surface, in the frame of the mesh normal at the contact.
///
/// The sampled normal is tilted about the Y axis by the elevation of the mesh
/// normal over the X axis, then about the X axis by its elevation over the Y
/// axis. For a mesh normal along `+Z` this is the identity, for `+X` and `+Y`
/// the texture's `+Z` ends up on that axis. Only elevations are considered,
/// so mesh normals in the `-Z` hemisphere are not flipped over.
pub fn rebase_normal(texture_normal: Vec3, mesh_normal: Vec3) -> Vec3 {
    rebase_vector(texture_normal, mesh_normal).normalize()
}

/// Applies the rotation of `rebase_normal` to an arbitrary texture space
/// vector, keeping its length. Zero vectors stay zero.
pub fn rebase_vector(texture_vector: Vec3, mesh_normal: Vec3) -> Vec3 {
    let tilt_about_y = FRAC_PI_2 - angle_between_unit(mesh_normal.x);
    let tilt_about_x = angle_between_unit(mesh_normal.y) - FRAC_PI_2;

    rotate_about_x(rotate_about_y(texture_vector, tilt_about_y), tilt_about_x)
}

/// Angle for a cosine, tolerant of rounding slightly past ±1.
fn angle_between_unit(cosine: f32) -> f32 {
    cosine.max(-1.0).min(1.0).acos()
}

fn rotate_about_x(v: Vec3, angle: f32) -> Vec3 {
    let (sin, cos) = angle.sin_cos();
    Vec3::new(v.x, v.y * cos - v.z * sin, v.y * sin + v.z * cos)
}

fn rotate_about_y(v: Vec3, angle: f32) -> Vec3 {
    let (sin, cos) = angle.sin_cos();
    Vec3::new(v.x * cos + v.z * sin, v.y, -v.x * sin + v.z * cos)
}
