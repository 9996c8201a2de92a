use config::{Channel, NormalEncoding};
use error::TextureError;
use geom::prelude::*;
use geom::{Vec2, Vec3};
use image::{self, ImageBuffer, Rgb, RgbImage};
use std::f32::EPSILON;
use std::path::Path;

/// Beyond this distance from the unit interval, wrapping stops stepping by one
/// and falls back to subtracting the floor, which would otherwise take
/// millions of iterations or never terminate once `x - 1.0 == x`.
const WRAP_STEP_LIMIT: f32 = 64.0;
/// Center of the 8-bit normal map encoding.
const NORMAL_ORIGIN: f32 = 127.5;

/// Wraps a texture coordinate into `[0, 1)`, so that e.g. `-0.25` yields
/// `0.75` and `1.25` yields `0.25`.
///
/// UV seams routinely produce coordinates slightly outside the unit interval,
/// these are brought back by stepping in whole units. Non-finite input maps
/// to `0.0`.
pub fn wrap_coordinate(x: f32) -> f32 {
    if !x.is_finite() {
        return 0.0;
    }

    let mut x = x;
    if x.abs() < WRAP_STEP_LIMIT {
        while x >= 1.0 {
            x -= 1.0;
        }

        // Step into [-1, 0) first, then flip into [0, 1)
        while x < -1.0 {
            x += 1.0;
        }

        if x < 0.0 {
            x += 1.0;
        }
    } else {
        x -= x.floor();
    }

    // -1e-9 + 1.0 rounds to 1.0 in f32
    if x >= 1.0 {
        0.0
    } else {
        x
    }
}

/// Wraps both components of a texture coordinate into `[0, 1)`.
pub fn wrap_texcoords(texcoords: Vec2) -> Vec2 {
    Vec2::new(wrap_coordinate(texcoords.x), wrap_coordinate(texcoords.y))
}

/// A color sample with channels in the 8-bit range `[0, 255]`.
///
/// Channels are floats because bilinear filtering yields values between
/// integer levels.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Texel {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Texel {
    pub fn new(r: f32, g: f32, b: f32) -> Self {
        Texel { r, g, b }
    }

    pub fn channel(&self, channel: Channel) -> f32 {
        match channel {
            Channel::Red => self.r,
            Channel::Green => self.g,
            Channel::Blue => self.b,
        }
    }

    /// Perceived brightness in `[0, 255]`, weighted like the luma of analog TV.
    pub fn luminance(&self) -> f32 {
        0.30 * self.r + 0.59 * self.g + 0.11 * self.b
    }

    /// Average of the three channels in `[0, 255]`.
    pub fn mean(&self) -> f32 {
        (self.r + self.g + self.b) / 3.0
    }

    /// Interprets the texel as a tangent space normal encoded around
    /// `(127.5, 127.5, 127.5)`, where 255 is the maximum in positive direction
    /// and 0 the maximum in negative direction of an axis.
    ///
    /// Returns `None` if the texel sits on the origin of the encoding.
    pub fn decode_normal(&self, encoding: &NormalEncoding) -> Option<Vec3> {
        let encoded = encoding.swizzle(self);
        let normal = Vec3::new(
            encoded[0] - NORMAL_ORIGIN,
            encoded[1] - NORMAL_ORIGIN,
            encoded[2] - NORMAL_ORIGIN,
        );

        if normal.magnitude() < EPSILON {
            None
        } else {
            Some(normal.normalize())
        }
    }

    fn lerp(&self, other: &Texel, t: f32) -> Texel {
        Texel {
            r: self.r + (other.r - self.r) * t,
            g: self.g + (other.g - self.g) * t,
            b: self.b + (other.b - self.b) * t,
        }
    }
}

impl<'a> From<&'a Rgb<u8>> for Texel {
    fn from(pixel: &'a Rgb<u8>) -> Self {
        Texel::new(pixel.0[0] as f32, pixel.0[1] as f32, pixel.0[2] as f32)
    }
}

/// An 8-bit RGB image addressable by normalized texture coordinates that
/// repeat in both directions.
///
/// Images are resident in memory, sampling never allocates.
#[derive(Debug, Clone)]
pub struct TextureMap {
    image: RgbImage,
}

impl TextureMap {
    pub fn new(image: RgbImage) -> Self {
        TextureMap { image }
    }

    /// Loads an image from disk, converting it to 8-bit RGB if necessary.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, TextureError> {
        let image = image::open(path)?.to_rgb8();
        Ok(TextureMap::new(image))
    }

    /// Generates a texture by evaluating `f` for every pixel.
    pub fn from_fn<F>(width: u32, height: u32, mut f: F) -> Self
    where
        F: FnMut(u32, u32) -> [u8; 3],
    {
        TextureMap::new(ImageBuffer::from_fn(width, height, |x, y| Rgb(f(x, y))))
    }

    /// A single-pixel texture that samples to the same color everywhere.
    pub fn uniform(color: [u8; 3]) -> Self {
        TextureMap::from_fn(1, 1, |_, _| color)
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    /// Color of the pixel closest to the given texture coordinates, or `None`
    /// for an empty image.
    pub fn sample_nearest(&self, texcoords: Vec2) -> Option<Texel> {
        if self.is_empty() {
            return None;
        }

        let (px, py) = self.pixel_location(texcoords);
        let x = (px.round() as u32).min(self.width() - 1);
        let y = (py.round() as u32).min(self.height() - 1);
        Some(Texel::from(self.image.get_pixel(x, y)))
    }

    /// Bilinearly interpolated color at the given texture coordinates, or
    /// `None` for an empty image.
    pub fn sample(&self, texcoords: Vec2) -> Option<Texel> {
        if self.is_empty() {
            return None;
        }

        let (px, py) = self.pixel_location(texcoords);
        let x0 = (px.floor() as u32).min(self.width() - 1);
        let y0 = (py.floor() as u32).min(self.height() - 1);
        let x1 = (x0 + 1).min(self.width() - 1);
        let y1 = (y0 + 1).min(self.height() - 1);
        let fx = px - x0 as f32;
        let fy = py - y0 as f32;

        let texel = |x, y| Texel::from(self.image.get_pixel(x, y));
        let top = texel(x0, y0).lerp(&texel(x1, y0), fx);
        let bottom = texel(x0, y1).lerp(&texel(x1, y1), fx);
        Some(top.lerp(&bottom, fy))
    }

    /// Height in `[0, 1]` read from the luminance at the given coordinates.
    pub fn sample_height(&self, texcoords: Vec2) -> Option<f32> {
        self.sample(texcoords).map(|t| t.luminance() / 255.0)
    }

    /// Estimates the slope of the height field by central differences one
    /// texel apart, in height units per texel along u and v.
    pub fn height_gradient(&self, texcoords: Vec2) -> Option<Vec2> {
        if self.is_empty() {
            return None;
        }

        let du = Vec2::new(texel_spacing(self.width()), 0.0);
        let dv = Vec2::new(0.0, texel_spacing(self.height()));

        let dh_du = self.sample_height(texcoords + du)? - self.sample_height(texcoords - du)?;
        let dh_dv = self.sample_height(texcoords + dv)? - self.sample_height(texcoords - dv)?;

        Some(Vec2::new(0.5 * dh_du, 0.5 * dh_dv))
    }

    /// Continuous pixel position of wrapped texture coordinates, spanning
    /// the centers of the first to the last pixel.
    fn pixel_location(&self, texcoords: Vec2) -> (f32, f32) {
        let texcoords = wrap_texcoords(texcoords);
        (
            texcoords.x * (self.width() - 1) as f32,
            texcoords.y * (self.height() - 1) as f32,
        )
    }
}

/// Distance between neighbouring pixel centers in texture space, zero for a
/// single pixel.
fn texel_spacing(pixels: u32) -> f32 {
    if pixels > 1 {
        1.0 / (pixels - 1) as f32
    } else {
        0.0
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_wrap_coordinate() {
        let expected = [
            (-1.25, 0.75),
            (-0.25, 0.75),
            (0.5, 0.5),
            (1.25, 0.25),
            (2.25, 0.25),
            (-1.0, 0.0),
            (1.0, 0.0),
            (0.0, 0.0),
        ];

        for &(x, wrapped) in expected.iter() {
            let actual = wrap_coordinate(x);
            assert!(actual >= 0.0 && actual < 1.0, "{} wrapped to {}", x, actual);
            assert_relative_eq!(wrapped, actual, epsilon = 0.00001);
        }
    }

    #[test]
    fn test_wrap_far_out_of_range() {
        for &x in [-1000.75, 12345.5, 1.0e9, -1.0e9, -0.000000001].iter() {
            let wrapped = wrap_coordinate(x);
            assert!(wrapped >= 0.0 && wrapped < 1.0, "{} wrapped to {}", x, wrapped);
        }

        assert_relative_eq!(0.25, wrap_coordinate(-1000.75), epsilon = 0.001);
        assert_relative_eq!(0.5, wrap_coordinate(12345.5), epsilon = 0.001);
        assert_eq!(0.0, wrap_coordinate(::std::f32::NAN));
        assert_eq!(0.0, wrap_coordinate(::std::f32::INFINITY));
    }

    #[test]
    fn test_wrap_texcoords() {
        let wrapped = wrap_texcoords(Vec2::new(-0.25, 1.25));
        assert_relative_eq!(wrapped.x, 0.75);
        assert_relative_eq!(wrapped.y, 0.25);
    }

    #[test]
    fn test_bilinear_sampling_interpolates_between_pixels() {
        // Black on the left, white on the right
        let map = TextureMap::from_fn(2, 1, |x, _| if x == 0 { [0, 0, 0] } else { [255, 255, 255] });

        let left = map.sample(Vec2::new(0.0, 0.0)).unwrap();
        assert_eq!(Texel::new(0.0, 0.0, 0.0), left);

        let mid = map.sample(Vec2::new(0.5, 0.0)).unwrap();
        assert_relative_eq!(127.5, mid.r, epsilon = 0.001);
        assert_relative_eq!(127.5, mid.g, epsilon = 0.001);

        let nearest = map.sample_nearest(Vec2::new(0.9, 0.0)).unwrap();
        assert_eq!(Texel::new(255.0, 255.0, 255.0), nearest);
    }

    #[test]
    fn test_sampling_repeats() {
        let map = TextureMap::from_fn(4, 4, |x, y| [(x * 60) as u8, (y * 60) as u8, 0]);
        // Exactly representable so that wrapping introduces no rounding
        let uv = Vec2::new(0.25, 0.5);

        assert_eq!(map.sample(uv), map.sample(uv + Vec2::new(1.0, -2.0)));
        assert_eq!(map.sample_nearest(uv), map.sample_nearest(uv + Vec2::new(-1.0, 1.0)));
    }

    #[test]
    fn test_empty_map_yields_no_samples() {
        let map = TextureMap::from_fn(0, 0, |_, _| [0, 0, 0]);
        assert!(map.is_empty());
        assert_eq!(None, map.sample(Vec2::new(0.5, 0.5)));
        assert_eq!(None, map.sample_nearest(Vec2::new(0.5, 0.5)));
        assert_eq!(None, map.height_gradient(Vec2::new(0.5, 0.5)));
    }

    #[test]
    fn test_luminance_and_mean() {
        let white = Texel::new(255.0, 255.0, 255.0);
        assert_relative_eq!(255.0, white.luminance(), epsilon = 0.001);
        assert_relative_eq!(255.0, white.mean(), epsilon = 0.001);

        let green = Texel::new(0.0, 255.0, 0.0);
        assert!(green.luminance() > green.mean());
    }

    #[test]
    fn test_decode_flat_normal() {
        // Flat blue normal map pixel, the most common value in tangent space maps
        let flat = Texel::new(127.5, 127.5, 255.0);
        let normal = flat.decode_normal(&NormalEncoding::default()).unwrap();
        assert_relative_eq!(Vec3::new(0.0, 0.0, 1.0), normal, epsilon = 0.0001);
    }

    #[test]
    fn test_decode_swizzles_channels() {
        let red = Texel::new(255.0, 127.5, 127.5);

        let default = red.decode_normal(&NormalEncoding::default()).unwrap();
        assert_relative_eq!(Vec3::new(0.0, 1.0, 0.0), default, epsilon = 0.0001);

        let rgb = red.decode_normal(&NormalEncoding::rgb()).unwrap();
        assert_relative_eq!(Vec3::new(1.0, 0.0, 0.0), rgb, epsilon = 0.0001);
    }

    #[test]
    fn test_decode_origin_is_degenerate() {
        let origin = Texel::new(127.5, 127.5, 127.5);
        assert_eq!(None, origin.decode_normal(&NormalEncoding::default()));
    }

    #[test]
    fn test_height_gradient_of_ramp() {
        // Brightness rises along u, constant along v
        let map = TextureMap::from_fn(11, 11, |x, _| {
            let level = (x * 20) as u8;
            [level, level, level]
        });

        let gradient = map.height_gradient(Vec2::new(0.5, 0.5)).unwrap();
        // Central difference of the neighbouring pixels at 80 and 120
        assert_relative_eq!(0.5 * 40.0 / 255.0, gradient.x, epsilon = 0.001);
        assert_relative_eq!(0.0, gradient.y, epsilon = 0.0001);
    }

    #[test]
    fn test_height_gradient_of_single_pixel() {
        let gradient = TextureMap::uniform([90, 90, 90])
            .height_gradient(Vec2::new(0.3, 0.7))
            .unwrap();
        assert_eq!(Vec2::new(0.0, 0.0), gradient);
    }

    #[test]
    fn test_open_missing_file() {
        match TextureMap::open("does/not/exist.png") {
            Err(TextureError::Image(_)) => (),
            other => panic!("Expected image error, got {:?}", other),
        }
    }
}
