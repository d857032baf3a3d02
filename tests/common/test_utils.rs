use std::{
    collections::HashSet,
    path::{Path, PathBuf},
};

use anyhow::bail;
use broadside::{
    BootConfig, Catalog, Engine, FontHandle, ImageHandle, MusicHandle, ResourceKind, SoundHandle,
    engine::{Alignment, Color, Point, Rect},
};
use instant::Duration;

/// Every engine primitive the loader invoked, in call order.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    LoadFont { file: String, size: u32 },
    LoadImage { file: String, transparent: Option<Color> },
    LoadSound { file: String },
    LoadMusic { file: String },
    FreeFont(FontHandle),
    FreeImage(ImageHandle),
    FreeSound(SoundHandle),
    FreeMusic(MusicHandle),
    DrawImage(ImageHandle, Point),
    DrawImagePart(ImageHandle, Rect, Point),
    DrawText { text: String, font: FontHandle, bounds: Rect },
    Clear,
    Refresh,
    Pump,
    Delay(Duration),
    PlaySound(SoundHandle),
    MusicVolume(f32),
    ChangeScreenSize(u32, u32),
}

impl Call {
    pub fn is_load(&self) -> bool {
        matches!(
            self,
            Call::LoadFont { .. } | Call::LoadImage { .. } | Call::LoadSound { .. } | Call::LoadMusic { .. }
        )
    }

    pub fn is_free(&self) -> bool {
        matches!(
            self,
            Call::FreeFont(_) | Call::FreeImage(_) | Call::FreeSound(_) | Call::FreeMusic(_)
        )
    }
}

/// Engine double that records calls and tracks which handles are live.
pub struct RecordingEngine {
    pub calls: Vec<Call>,
    next_id: u32,
    live: HashSet<(ResourceKind, u32)>,
    bad_frees: usize,
    fail_on: Option<String>,
    screen: (u32, u32),
}

impl RecordingEngine {
    pub fn new() -> Self {
        Self {
            calls: Vec::new(),
            next_id: 1,
            live: HashSet::new(),
            bad_frees: 0,
            fail_on: None,
            screen: (1024, 768),
        }
    }

    /// Loading a file with this name fails.
    pub fn failing_on(file: &str) -> Self {
        Self {
            fail_on: Some(file.to_string()),
            ..Self::new()
        }
    }

    pub fn live_handles(&self) -> usize {
        self.live.len()
    }

    pub fn is_live(&self, kind: ResourceKind, id: u32) -> bool {
        self.live.contains(&(kind, id))
    }

    /// Frees of handles that were never loaded or already freed.
    pub fn bad_frees(&self) -> usize {
        self.bad_frees
    }

    pub fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.calls.iter().filter(|c| pred(c)).count()
    }

    pub fn position(&self, pred: impl Fn(&Call) -> bool) -> Option<usize> {
        self.calls.iter().position(pred)
    }

    /// Total time the loader asked the engine to block for.
    pub fn delayed(&self) -> Duration {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::Delay(d) => Some(*d),
                _ => None,
            })
            .sum()
    }

    fn load(&mut self, kind: ResourceKind, path: &Path, call: Call) -> anyhow::Result<u32> {
        self.calls.push(call);
        let file = file_name(path);
        if self.fail_on.as_deref() == Some(file.as_str()) {
            bail!("{} is missing", path.display());
        }
        let id = self.next_id;
        self.next_id += 1;
        self.live.insert((kind, id));
        Ok(id)
    }

    fn free(&mut self, kind: ResourceKind, id: u32, call: Call) {
        self.calls.push(call);
        if !self.live.remove(&(kind, id)) {
            self.bad_frees += 1;
        }
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

impl Engine for RecordingEngine {
    fn resolve_path(&self, file_name: &str, kind: ResourceKind) -> PathBuf {
        PathBuf::from(kind.resource_dir()).join(file_name)
    }

    fn load_font(&mut self, path: &Path, size: u32) -> anyhow::Result<FontHandle> {
        let call = Call::LoadFont {
            file: file_name(path),
            size,
        };
        self.load(ResourceKind::Font, path, call).map(FontHandle)
    }

    fn load_image(&mut self, path: &Path, transparent: Option<Color>) -> anyhow::Result<ImageHandle> {
        let call = Call::LoadImage {
            file: file_name(path),
            transparent,
        };
        self.load(ResourceKind::Image, path, call).map(ImageHandle)
    }

    fn load_sound(&mut self, path: &Path) -> anyhow::Result<SoundHandle> {
        let call = Call::LoadSound { file: file_name(path) };
        self.load(ResourceKind::Sound, path, call).map(SoundHandle)
    }

    fn load_music(&mut self, path: &Path) -> anyhow::Result<MusicHandle> {
        let call = Call::LoadMusic { file: file_name(path) };
        self.load(ResourceKind::Music, path, call).map(MusicHandle)
    }

    fn free_font(&mut self, font: FontHandle) {
        self.free(ResourceKind::Font, font.0, Call::FreeFont(font));
    }

    fn free_image(&mut self, image: ImageHandle) {
        self.free(ResourceKind::Image, image.0, Call::FreeImage(image));
    }

    fn free_sound(&mut self, sound: SoundHandle) {
        self.free(ResourceKind::Sound, sound.0, Call::FreeSound(sound));
    }

    fn free_music(&mut self, music: MusicHandle) {
        self.free(ResourceKind::Music, music.0, Call::FreeMusic(music));
    }

    fn draw_image(&mut self, image: ImageHandle, at: Point) {
        self.calls.push(Call::DrawImage(image, at));
    }

    fn draw_image_part(&mut self, image: ImageHandle, source: Rect, at: Point) {
        self.calls.push(Call::DrawImagePart(image, source, at));
    }

    fn draw_text(
        &mut self,
        text: &str,
        _color: Color,
        font: FontHandle,
        _alignment: Alignment,
        bounds: Rect,
    ) {
        self.calls.push(Call::DrawText {
            text: text.to_string(),
            font,
            bounds,
        });
    }

    fn clear_screen(&mut self) {
        self.calls.push(Call::Clear);
    }

    fn refresh_screen(&mut self) {
        self.calls.push(Call::Refresh);
    }

    fn pump_events(&mut self) {
        self.calls.push(Call::Pump);
    }

    fn delay(&mut self, duration: Duration) {
        self.calls.push(Call::Delay(duration));
    }

    fn play_sound(&mut self, sound: SoundHandle) {
        self.calls.push(Call::PlaySound(sound));
    }

    fn set_music_volume(&mut self, volume: f32) {
        self.calls.push(Call::MusicVolume(volume));
    }

    fn screen_size(&self) -> (u32, u32) {
        self.screen
    }

    fn change_screen_size(&mut self, width: u32, height: u32) {
        self.calls.push(Call::ChangeScreenSize(width, height));
        self.screen = (width, height);
    }
}

/// A catalog with a couple of assets of every kind.
pub fn small_catalog() -> Catalog {
    let mut catalog = Catalog::new();
    catalog
        .font("Title", "title.ttf", 24)
        .font("Body", "body.ttf", 12)
        .image("Board", "board.png")
        .transparent_image("Marker", "marker.png", [255, 0, 255])
        .sound("Hit", "hit.wav")
        .music("Theme", "theme.mp3");
    catalog
}

pub fn boot_config() -> BootConfig {
    BootConfig::default()
}
