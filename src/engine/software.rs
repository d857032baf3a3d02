//! Headless engine backend drawing into an in-memory framebuffer.
//!
//! [`SoftwareEngine`] resolves asset files under a root directory, decodes
//! images with the `image` crate and composites every draw call into an RGBA
//! framebuffer the size of the current screen. Sounds and music are kept as
//! encoded bytes; playback and volume are tracked rather than mixed. With the
//! `text` feature, fonts are parsed and text is rasterised with `ab_glyph`.
//!
//! It is the backend the demo runs on and the one integration tests use to
//! check real file loading.

use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context as _, ensure};
use image::{Rgba, RgbaImage, imageops};
use instant::Duration;

use crate::{
    engine::{Alignment, Color, Engine, Point, Rect},
    resources::{FontHandle, ImageHandle, MusicHandle, ResourceKind, SoundHandle},
};

struct LoadedFont {
    #[cfg_attr(not(feature = "text"), allow(dead_code))]
    size: u32,
    #[cfg(feature = "text")]
    face: ab_glyph::FontVec,
}

pub struct SoftwareEngine {
    root: PathBuf,
    frame: RgbaImage,
    next_id: u32,
    fonts: HashMap<u32, LoadedFont>,
    images: HashMap<u32, RgbaImage>,
    sounds: HashMap<u32, Vec<u8>>,
    music: HashMap<u32, Vec<u8>>,
    frames_presented: u64,
    events_pumped: u64,
    sounds_played: Vec<SoundHandle>,
    music_volume: f32,
}

impl SoftwareEngine {
    /// Create a backend reading assets below `root` with a black
    /// `width`×`height` screen.
    pub fn new(root: impl Into<PathBuf>, width: u32, height: u32) -> Self {
        Self {
            root: root.into(),
            frame: blank_frame(width, height),
            next_id: 1,
            fonts: HashMap::new(),
            images: HashMap::new(),
            sounds: HashMap::new(),
            music: HashMap::new(),
            frames_presented: 0,
            events_pumped: 0,
            sounds_played: Vec::new(),
            music_volume: 1.0,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The framebuffer as last drawn.
    pub fn frame(&self) -> &RgbaImage {
        &self.frame
    }

    /// Write the framebuffer to `path`; the format follows the extension.
    pub fn save_frame(&self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let path = path.as_ref();
        self.frame
            .save(path)
            .with_context(|| format!("write frame to {}", path.display()))
    }

    pub fn frames_presented(&self) -> u64 {
        self.frames_presented
    }

    pub fn events_pumped(&self) -> u64 {
        self.events_pumped
    }

    pub fn sounds_played(&self) -> &[SoundHandle] {
        &self.sounds_played
    }

    pub fn music_volume(&self) -> f32 {
        self.music_volume
    }

    pub fn image_size(&self, image: ImageHandle) -> Option<(u32, u32)> {
        self.images.get(&image.0).map(|img| img.dimensions())
    }

    /// Number of handles loaded and not yet freed, across all kinds.
    pub fn live_handles(&self) -> usize {
        self.fonts.len() + self.images.len() + self.sounds.len() + self.music.len()
    }

    fn next_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

fn blank_frame(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_pixel(width, height, Rgba([0, 0, 0, 255]))
}

fn read_asset(path: &Path) -> anyhow::Result<Vec<u8>> {
    let bytes = fs::read(path).with_context(|| format!("read {}", path.display()))?;
    ensure!(!bytes.is_empty(), "{} is empty", path.display());
    Ok(bytes)
}

impl Engine for SoftwareEngine {
    fn resolve_path(&self, file_name: &str, kind: ResourceKind) -> PathBuf {
        self.root.join(kind.resource_dir()).join(file_name)
    }

    fn load_font(&mut self, path: &Path, size: u32) -> anyhow::Result<FontHandle> {
        let bytes = read_asset(path)?;
        #[cfg(feature = "text")]
        let font = LoadedFont {
            size,
            face: super::text::parse_font(bytes)?,
        };
        #[cfg(not(feature = "text"))]
        let font = {
            drop(bytes);
            LoadedFont { size }
        };
        let id = self.next_id();
        self.fonts.insert(id, font);
        Ok(FontHandle(id))
    }

    fn load_image(&mut self, path: &Path, transparent: Option<Color>) -> anyhow::Result<ImageHandle> {
        let mut img = image::open(path)
            .with_context(|| format!("decode image {}", path.display()))?
            .to_rgba8();
        if let Some(key) = transparent {
            for pixel in img.pixels_mut() {
                if pixel.0[..3] == [key.r, key.g, key.b] {
                    pixel.0[3] = 0;
                }
            }
        }
        let id = self.next_id();
        self.images.insert(id, img);
        Ok(ImageHandle(id))
    }

    fn load_sound(&mut self, path: &Path) -> anyhow::Result<SoundHandle> {
        let bytes = read_asset(path)?;
        let id = self.next_id();
        self.sounds.insert(id, bytes);
        Ok(SoundHandle(id))
    }

    fn load_music(&mut self, path: &Path) -> anyhow::Result<MusicHandle> {
        let bytes = read_asset(path)?;
        let id = self.next_id();
        self.music.insert(id, bytes);
        Ok(MusicHandle(id))
    }

    fn free_font(&mut self, font: FontHandle) {
        if self.fonts.remove(&font.0).is_none() {
            log::warn!("free of unknown font handle {:?}", font);
        }
    }

    fn free_image(&mut self, image: ImageHandle) {
        if self.images.remove(&image.0).is_none() {
            log::warn!("free of unknown image handle {:?}", image);
        }
    }

    fn free_sound(&mut self, sound: SoundHandle) {
        if self.sounds.remove(&sound.0).is_none() {
            log::warn!("free of unknown sound handle {:?}", sound);
        }
    }

    fn free_music(&mut self, music: MusicHandle) {
        if self.music.remove(&music.0).is_none() {
            log::warn!("free of unknown music handle {:?}", music);
        }
    }

    fn draw_image(&mut self, image: ImageHandle, at: Point) {
        let Some(img) = self.images.get(&image.0) else {
            log::warn!("draw of unknown image handle {:?}", image);
            return;
        };
        log::trace!("draw {:?} at {:?}", image, at);
        imageops::overlay(&mut self.frame, img, at.x as i64, at.y as i64);
    }

    fn draw_image_part(&mut self, image: ImageHandle, source: Rect, at: Point) {
        let Some(img) = self.images.get(&image.0) else {
            log::warn!("draw of unknown image handle {:?}", image);
            return;
        };
        let (width, height) = img.dimensions();
        let x = source.x.max(0) as u32;
        let y = source.y.max(0) as u32;
        if source.is_empty() || x >= width || y >= height {
            return;
        }
        let part_width = source.width.min(width - x);
        let part_height = source.height.min(height - y);
        log::trace!(
            "draw {:?} part {}x{}+{}+{} at {:?}",
            image,
            part_width,
            part_height,
            x,
            y,
            at
        );
        let part = imageops::crop_imm(img, x, y, part_width, part_height).to_image();
        imageops::overlay(&mut self.frame, &part, at.x as i64, at.y as i64);
    }

    fn draw_text(
        &mut self,
        text: &str,
        color: Color,
        font: FontHandle,
        alignment: Alignment,
        bounds: Rect,
    ) {
        let Some(loaded) = self.fonts.get(&font.0) else {
            log::warn!("draw with unknown font handle {:?}", font);
            return;
        };
        log::trace!("text {:?} in {:?}", text, bounds);
        #[cfg(feature = "text")]
        super::text::draw_text(
            &mut self.frame,
            &loaded.face,
            loaded.size,
            text,
            color,
            alignment,
            bounds,
        );
        #[cfg(not(feature = "text"))]
        let _ = (loaded, color, alignment);
    }

    fn clear_screen(&mut self) {
        for pixel in self.frame.pixels_mut() {
            *pixel = Rgba([0, 0, 0, 255]);
        }
    }

    fn refresh_screen(&mut self) {
        self.frames_presented += 1;
    }

    fn pump_events(&mut self) {
        self.events_pumped += 1;
    }

    fn delay(&mut self, duration: Duration) {
        std::thread::sleep(duration);
    }

    fn play_sound(&mut self, sound: SoundHandle) {
        if !self.sounds.contains_key(&sound.0) {
            log::warn!("play of unknown sound handle {:?}", sound);
            return;
        }
        self.sounds_played.push(sound);
    }

    fn set_music_volume(&mut self, volume: f32) {
        self.music_volume = volume.clamp(0.0, 1.0);
    }

    fn screen_size(&self) -> (u32, u32) {
        self.frame.dimensions()
    }

    fn change_screen_size(&mut self, width: u32, height: u32) {
        log::debug!("screen size {}x{}", width, height);
        self.frame = blank_frame(width, height);
    }
}
