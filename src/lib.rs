//! Load-once resource caching.
//!
//! A [`ResourceCache`] asks its [`Loader`] for a resource the first time a logical name is
//! requested, keeps the result together with the filename and options it was loaded with, and
//! hands out [`Handle`]s instead of references. Handles are resolved through the cache every time
//! they are used, so a resource can be reloaded from its recorded parameters without invalidating
//! anything that holds on to its handle.
//!
//! Two loaders ship with the crate: [`texture::TextureLoader`] decodes images and
//! [`font::FontLoader`] rasterizes bitmap glyph sheets. [`Resources`] bundles a cache of each.
//!
//! Nothing here is thread-safe.

mod error;
pub mod font;
pub mod resource;
mod resources;
pub mod texture;
pub mod util;

#[cfg(test)]
mod testing;

pub use error::LoadError;
pub use resource::{Handle, Loader, ResourceCache, ResourceManager};
pub use resources::Resources;
