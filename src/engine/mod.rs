//! The engine primitives the loader consumes.
//!
//! Decoding, drawing, audio and the window all belong to the engine. The loader
//! only talks to it through [`Engine`], so the same boot sequence runs against a
//! real backend, the headless [`software::SoftwareEngine`] or a recording test
//! double.
//!
//! # Key types
//!
//! - [`Engine`] is the collaborator contract
//! - [`Point`], [`Rect`] and [`Color`] are the small geometry types draw calls take
//! - [`Alignment`] controls horizontal text placement inside a box

use std::path::{Path, PathBuf};

use instant::Duration;

use crate::resources::{FontHandle, ImageHandle, MusicHandle, ResourceKind, SoundHandle};

pub mod software;
#[cfg(feature = "text")]
mod text;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const TRANSPARENT: Color = Color {
        r: 0,
        g: 0,
        b: 0,
        a: 0,
    };

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    Left,
    #[default]
    Center,
    Right,
}

/// Rendering, audio and file primitives provided by the host engine.
///
/// Load calls fail with an error when the file is missing or corrupt; the
/// loader attaches the stage and asset name. Every handle returned by a load
/// call must eventually be given back through the matching `free_*` call.
pub trait Engine {
    /// Path of `file_name` inside the resource directory for `kind`.
    fn resolve_path(&self, file_name: &str, kind: ResourceKind) -> PathBuf;

    fn load_font(&mut self, path: &Path, size: u32) -> anyhow::Result<FontHandle>;
    /// Load a bitmap; `transparent` is an optional colour key.
    fn load_image(&mut self, path: &Path, transparent: Option<Color>) -> anyhow::Result<ImageHandle>;
    fn load_sound(&mut self, path: &Path) -> anyhow::Result<SoundHandle>;
    fn load_music(&mut self, path: &Path) -> anyhow::Result<MusicHandle>;

    fn free_font(&mut self, font: FontHandle);
    fn free_image(&mut self, image: ImageHandle);
    fn free_sound(&mut self, sound: SoundHandle);
    fn free_music(&mut self, music: MusicHandle);

    fn draw_image(&mut self, image: ImageHandle, at: Point);
    /// Draw the `source` sub-rectangle of `image` with its top-left corner at `at`.
    fn draw_image_part(&mut self, image: ImageHandle, source: Rect, at: Point);
    /// Draw `text` inside `bounds`; `\n` starts a new line.
    fn draw_text(
        &mut self,
        text: &str,
        color: Color,
        font: FontHandle,
        alignment: Alignment,
        bounds: Rect,
    );
    fn clear_screen(&mut self);
    fn refresh_screen(&mut self);
    /// Let the host process pending window events.
    fn pump_events(&mut self);
    /// Block for `duration`.
    fn delay(&mut self, duration: Duration);

    fn play_sound(&mut self, sound: SoundHandle);
    fn set_music_volume(&mut self, volume: f32);

    fn screen_size(&self) -> (u32, u32);
    fn change_screen_size(&mut self, width: u32, height: u32);
}
