#[cfg_attr(test, macro_use)]
extern crate aitios_geom as geom;
extern crate image;
#[macro_use]
extern crate log;

mod config;
mod contact;
mod error;
mod friction;
mod material;
mod proxy;
mod rebasis;
mod shading;
mod texture;

pub use config::{BumpProfile, Channel, Config, FrictionBand, FrictionConfig, NormalEncoding, ShadingConfig};
pub use contact::{ContactSample, ForceState};
pub use error::{MapKind, TextureError};
pub use friction::{band_multiplier, compute_friction, FrictionCoefficients, FrictionSample, FrictionState, FrictionTarget};
pub use material::{MaterialBuilder, MaterialDescriptor, SurfaceMaterial, SurfaceVariant};
pub use proxy::TextureProxy;
pub use rebasis::{rebase_normal, rebase_vector};
pub use shading::{bump_profile, compute_shaded_force, BumpSample, ForceDebugTrace, ShadedForce};
pub use texture::{wrap_coordinate, wrap_texcoords, Texel, TextureMap};
