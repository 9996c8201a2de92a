//! A tray of swatches, one for every material in the catalog, each covering
//! the unit quad.

use geom::{Vec2, Vec3};
use haptics::{Config, ContactSample, MaterialBuilder, MaterialDescriptor, TextureMap, TextureProxy};
use std::f32::consts::PI;

use quad;

const MAP_SIZE: u32 = 64;

/// Materials with ids `0` to `8`, indexed by id.
pub fn make_materials() -> Vec<MaterialDescriptor> {
    (0..9u8).map(make_material).collect()
}

pub fn make_material(id: u8) -> MaterialDescriptor {
    let waves = 2.0 + id as f32;

    MaterialBuilder::preset(id)
        .albedo_map(gradient_albedo(id))
        .normal_map(wave_normal_map(waves))
        .height_map(wave_height_map(waves))
        .roughness_map(checker_roughness(4 + id as u32))
        .build()
}

pub fn make_proxy(friction: bool) -> TextureProxy {
    TextureProxy::new(Config::with_friction(friction))
}

/// Contact on the tray quad at the given texture coordinates, with the device
/// `depth` units below the surface.
pub fn make_contact<'a>(material: &'a MaterialDescriptor, texcoords: Vec2, depth: f32) -> ContactSample<'a> {
    let tris = quad(1.0);
    let triangle = if texcoords.x >= texcoords.y { &tris[0] } else { &tris[1] };

    let surface_position = Vec3::new(texcoords.x, texcoords.y - 1.0, 0.0);
    let device_position = surface_position - Vec3::new(0.0, 0.0, depth);

    ContactSample::on_triangle(
        triangle,
        surface_position,
        device_position,
        surface_position,
        Some(material),
    )
}

fn gradient_albedo(id: u8) -> TextureMap {
    TextureMap::from_fn(MAP_SIZE, MAP_SIZE, |x, y| {
        [
            id.wrapping_mul(28),
            (x * 255 / (MAP_SIZE - 1)) as u8,
            (y * 255 / (MAP_SIZE - 1)) as u8,
        ]
    })
}

/// Ridges running along `v`, stored with green holding the `x` component.
fn wave_normal_map(waves: f32) -> TextureMap {
    TextureMap::from_fn(MAP_SIZE, MAP_SIZE, |x, _| {
        let slope = 0.5 * (2.0 * PI * waves * x as f32 / MAP_SIZE as f32).cos();
        let length = (slope * slope + 1.0).sqrt();
        [encode(0.0), encode(-slope / length), encode(1.0 / length)]
    })
}

fn wave_height_map(waves: f32) -> TextureMap {
    TextureMap::from_fn(MAP_SIZE, MAP_SIZE, |x, _| {
        let height = 0.5 + 0.5 * (2.0 * PI * waves * x as f32 / MAP_SIZE as f32).sin();
        let gray = (height * 255.0) as u8;
        [gray, gray, gray]
    })
}

fn checker_roughness(cells: u32) -> TextureMap {
    let cell_size = (MAP_SIZE / cells).max(1);
    TextureMap::from_fn(MAP_SIZE, MAP_SIZE, |x, y| {
        let rough = ((x / cell_size) + (y / cell_size)) % 2 == 0;
        if rough {
            [230, 230, 230]
        } else {
            [40, 40, 40]
        }
    })
}

fn encode(component: f32) -> u8 {
    (component * 127.5 + 127.5).round().max(0.0).min(255.0) as u8
}
