use image;
use std::error::Error;
use std::fmt;

/// Identifies one of the four sample fields of a material.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum MapKind {
    Albedo,
    Normal,
    Height,
    Roughness,
}

/// Errors that can occur while sampling textures for a contact.
///
/// Per-cycle entry points never hand these to the caller, they log them and
/// leave force or friction untouched.
#[derive(Debug)]
pub enum TextureError {
    /// The contacted surface has no texture-aware material.
    MissingMaterial,
    /// The material has no image for the requested map.
    MissingMap(MapKind),
    /// A normal or force vector had zero length and cannot be normalized.
    DegenerateGeometry,
    /// An image could not be loaded or decoded.
    Image(image::ImageError),
}

impl fmt::Display for TextureError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            &TextureError::MissingMaterial => write!(f, "Contacted surface has no textured material"),
            &TextureError::MissingMap(kind) => write!(f, "Material has no {:?} map", kind),
            &TextureError::DegenerateGeometry => write!(f, "Cannot normalize zero-length vector"),
            &TextureError::Image(ref e) => write!(f, "Image error: {}", e),
        }
    }
}

impl Error for TextureError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            &TextureError::Image(ref e) => Some(e),
            _ => None,
        }
    }
}

impl From<image::ImageError> for TextureError {
    fn from(e: image::ImageError) -> Self {
        TextureError::Image(e)
    }
}
