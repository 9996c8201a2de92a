/// Contains functionality to create representative contact scenes.
///
/// Provides shared functionality for tests and benchmarks.
extern crate aitios_geom as geom;
extern crate aitios_haptics as haptics;

pub mod tray;

use geom::{TupleTriangle, Vec2, Vec3, Vertex};

/// Unit square on the X/Y plane facing +Z, spanning `x` in `[0, 1]` and `y`
/// in `[-1, 0]`. Texture coordinates are scaled by `repeat`, so the texture
/// tiles `repeat` times in each direction.
pub fn quad(repeat: f32) -> Vec<TupleTriangle<Vertex>> {
    let normal = Vec3::new(0.0, 0.0, 1.0);
    let vertex = |x: f32, y: f32| Vertex {
        position: Vec3::new(x, y, 0.0),
        normal,
        texcoords: Vec2::new(x * repeat, (1.0 + y) * repeat),
    };

    vec![
        TupleTriangle(vertex(0.0, -1.0), vertex(1.0, -1.0), vertex(1.0, 0.0)),
        TupleTriangle(vertex(0.0, -1.0), vertex(1.0, 0.0), vertex(0.0, 0.0)),
    ]
}
