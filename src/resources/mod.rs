//! Asset namespaces, handle types and the name-keyed registries that own them.
//!
//! Fonts, images, sounds and music are four independent namespaces: the same
//! name may exist in two of them without conflict. Each namespace has its own
//! handle type so a font can never be passed where an image is expected.
//!
//! # Key types
//!
//! - [`ResourceKind`] identifies a namespace and the resource directory it loads from
//! - [`FontHandle`], [`ImageHandle`], [`SoundHandle`], [`MusicHandle`] are opaque engine ids
//! - [`Handle`] ties a handle type to its kind and to the engine's free primitive
//! - [`registry::ResourceRegistry`] stores name to handle mappings for one kind
//! - [`catalog::Catalog`] is the data-driven list of assets to load

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::engine::Engine;

pub mod catalog;
pub mod registry;

pub use catalog::{Catalog, CatalogRecord};
pub use registry::ResourceRegistry;

/// One of the four asset namespaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResourceKind {
    Font,
    Image,
    Sound,
    Music,
}

impl ResourceKind {
    /// All kinds in loading-stage order.
    pub const ALL: [ResourceKind; 4] = [
        ResourceKind::Font,
        ResourceKind::Image,
        ResourceKind::Sound,
        ResourceKind::Music,
    ];

    /// Directory (relative to the asset root) files of this kind are resolved in.
    ///
    /// Music shares the sound directory.
    pub fn resource_dir(self) -> &'static str {
        match self {
            ResourceKind::Font => "fonts",
            ResourceKind::Image => "images",
            ResourceKind::Sound | ResourceKind::Music => "sounds",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ResourceKind::Font => "font",
            ResourceKind::Image => "image",
            ResourceKind::Sound => "sound",
            ResourceKind::Music => "music",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FontHandle(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ImageHandle(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SoundHandle(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MusicHandle(pub u32);

/// A handle that knows which namespace it belongs to and how to give itself back
/// to the engine.
pub trait Handle: Copy + Eq + fmt::Debug {
    const KIND: ResourceKind;

    /// Release the engine-side asset behind this handle.
    fn free<E: Engine + ?Sized>(self, engine: &mut E);
}

impl Handle for FontHandle {
    const KIND: ResourceKind = ResourceKind::Font;

    fn free<E: Engine + ?Sized>(self, engine: &mut E) {
        engine.free_font(self);
    }
}

impl Handle for ImageHandle {
    const KIND: ResourceKind = ResourceKind::Image;

    fn free<E: Engine + ?Sized>(self, engine: &mut E) {
        engine.free_image(self);
    }
}

impl Handle for SoundHandle {
    const KIND: ResourceKind = ResourceKind::Sound;

    fn free<E: Engine + ?Sized>(self, engine: &mut E) {
        engine.free_sound(self);
    }
}

impl Handle for MusicHandle {
    const KIND: ResourceKind = ResourceKind::Music;

    fn free<E: Engine + ?Sized>(self, engine: &mut E) {
        engine.free_music(self);
    }
}
