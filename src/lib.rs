//! broadside
//!
//! Asset loading for a 2D naval strategy game: a name-keyed registry per asset
//! kind, a staged loading sequence with a progress bar, an animated boot screen
//! and an orderly shutdown. Drawing, audio and file decoding sit behind the
//! [`engine::Engine`] trait so the same code drives a real backend, the bundled
//! [`engine::software::SoftwareEngine`] or a recording fake in tests.
//!
//! High-level modules
//! - `boot`: the loading screen state machine and its scoped boot assets
//! - `config`: boot screen layout, asset files and pacing, loaded from RON
//! - `context`: the four long-lived registries game code looks assets up in
//! - `engine`: the media backend trait, geometry types and a software backend
//! - `error`: the crate's error type
//! - `loading`: the ordered font/image/sound/music stages and progress display
//! - `resources`: handle types, registries and the asset catalog
//! - `teardown`: releasing everything at shutdown
//!

pub mod boot;
pub mod config;
pub mod context;
pub mod engine;
pub mod error;
pub mod loading;
pub mod resources;
pub mod teardown;

// Re-exports commonly used types for convenience in downstream code.
pub use boot::{BootReport, BootScreen, BootState};
pub use config::BootConfig;
pub use context::ResourceContext;
pub use engine::Engine;
pub use error::AssetError;
pub use loading::LoadingSequencer;
pub use resources::{
    Catalog, FontHandle, ImageHandle, MusicHandle, ResourceKind, ResourceRegistry, SoundHandle,
};
pub use teardown::{TeardownReport, free_resources};
