//! Boot screen configuration.
//!
//! Layout, timings and boot-asset file names for the loading screen, read from
//! `assets/boot.ron`. Every section falls back to the values the game shipped
//! with, so a partial file only overrides what it names.

use std::{fs, path::Path};

use instant::Duration;
use serde::Deserialize;

use crate::{
    engine::{Color, Point, Rect},
    error::AssetError,
};

/// Screen resolution used while the loading screen is visible.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct ScreenConfig {
    pub width: u32,
    pub height: u32,
}
impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
        }
    }
}

/// Files of the boot-only assets.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct BootAssetFiles {
    pub background: String,
    pub animation: String,
    pub font: String,
    pub font_size: u32,
    pub start_sound: String,
    pub bar_full: String,
    pub bar_empty: String,
}
impl Default for BootAssetFiles {
    fn default() -> Self {
        Self {
            background: "SplashBack.png".into(),
            animation: "SwinGameAni.jpg".into(),
            font: "arial.ttf".into(),
            font_size: 12,
            start_sound: "SwinGameStart.ogg".into(),
            bar_full: "loader_full.png".into(),
            bar_empty: "loader_empty.png".into(),
        }
    }
}

/// Intro animation: a sprite sheet of cels laid out column by column.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct IntroConfig {
    pub x: i32,
    pub y: i32,
    pub cel_width: u32,
    pub cel_height: u32,
    /// Cels per column of the sheet.
    pub rows: u32,
    pub cel_count: u32,
    pub sound_lead_ms: u64,
    pub frame_ms: u64,
    pub hold_ms: u64,
}
impl Default for IntroConfig {
    fn default() -> Self {
        Self {
            x: 143,
            y: 134,
            cel_width: 546,
            cel_height: 327,
            rows: 6,
            cel_count: 11,
            sound_lead_ms: 200,
            frame_ms: 20,
            hold_ms: 1500,
        }
    }
}

impl IntroConfig {
    /// Sheet rectangle of cel `cel`: column `cel / rows`, row `cel % rows`.
    pub fn cel_rect(&self, cel: u32) -> Rect {
        let rows = self.rows.max(1);
        Rect::new(
            ((cel / rows) * self.cel_width) as i32,
            ((cel % rows) * self.cel_height) as i32,
            self.cel_width,
            self.cel_height,
        )
    }

    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Placement of the progress bar and the status message.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ProgressLayout {
    pub bar_x: i32,
    pub bar_y: i32,
    pub bar_width: u32,
    pub bar_height: u32,
    pub text_x: i32,
    pub text_y: i32,
    pub text_width: u32,
    pub text_height: u32,
    pub text_color: [u8; 3],
}
impl Default for ProgressLayout {
    fn default() -> Self {
        Self {
            bar_x: 279,
            bar_y: 453,
            bar_width: 260,
            bar_height: 66,
            text_x: 310,
            text_y: 493,
            text_width: 200,
            text_height: 25,
            text_color: [255, 255, 255],
        }
    }
}

impl ProgressLayout {
    pub fn bar_origin(&self) -> Point {
        Point::new(self.bar_x, self.bar_y)
    }

    pub fn text_bounds(&self) -> Rect {
        Rect::new(self.text_x, self.text_y, self.text_width, self.text_height)
    }

    pub fn text_color(&self) -> Color {
        let [r, g, b] = self.text_color;
        Color::rgb(r, g, b)
    }
}

/// Pauses around the loading stages, in milliseconds.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct PacingConfig {
    pub stage_ms: u64,
    pub final_ms: u64,
    pub end_hold_ms: u64,
}
impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            stage_ms: 100,
            final_ms: 100,
            end_hold_ms: 500,
        }
    }
}

impl PacingConfig {
    pub fn stage(&self) -> Duration {
        Duration::from_millis(self.stage_ms)
    }

    pub fn final_pause(&self) -> Duration {
        Duration::from_millis(self.final_ms)
    }

    pub fn end_hold(&self) -> Duration {
        Duration::from_millis(self.end_hold_ms)
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct BootConfig {
    pub screen: ScreenConfig,
    pub assets: BootAssetFiles,
    pub intro: IntroConfig,
    pub progress: ProgressLayout,
    pub pacing: PacingConfig,
    /// Music volume applied right after the music stage. The shipped game
    /// muted music here; kept at 0.0 so behaviour is unchanged.
    pub music_volume: f32,
}
impl Default for BootConfig {
    fn default() -> Self {
        Self {
            screen: ScreenConfig::default(),
            assets: BootAssetFiles::default(),
            intro: IntroConfig::default(),
            progress: ProgressLayout::default(),
            pacing: PacingConfig::default(),
            music_volume: 0.0,
        }
    }
}

impl BootConfig {
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, AssetError> {
        let path = path.as_ref();
        let data = fs::read_to_string(path).map_err(|source| AssetError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        ron::from_str(&data).map_err(|source| AssetError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// The file's configuration, or the defaults plus the reason the file
    /// could not be used.
    pub fn load_or_default(path: impl AsRef<Path>) -> (Self, Option<AssetError>) {
        match Self::load_from_file(&path) {
            Ok(cfg) => (cfg, None),
            Err(e) => (Self::default(), Some(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn cels_walk_down_each_column() {
        let intro = IntroConfig::default();
        assert_eq!(intro.cel_rect(0), Rect::new(0, 0, 546, 327));
        assert_eq!(intro.cel_rect(5), Rect::new(0, 5 * 327, 546, 327));
        assert_eq!(intro.cel_rect(6), Rect::new(546, 0, 546, 327));
        assert_eq!(intro.cel_rect(10), Rect::new(546, 4 * 327, 546, 327));
    }

    #[test]
    fn load_or_default_missing_file() {
        let (cfg, err) = BootConfig::load_or_default("this/file/does/not/exist.ron");
        assert!(matches!(err, Some(AssetError::Io { .. })));
        assert_eq!(cfg, BootConfig::default());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let sample = r#"(
            screen: (width: 1024),
            assets: (font: "cour.ttf"),
            pacing: (stage_ms: 0),
            music_volume: 0.25,
        )"#;
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(sample.as_bytes()).unwrap();
        let (cfg, err) = BootConfig::load_or_default(file.path());
        assert!(err.is_none(), "unexpected error: {err:?}");
        assert_eq!(cfg.screen.width, 1024);
        assert_eq!(cfg.screen.height, 600);
        assert_eq!(cfg.assets.font, "cour.ttf");
        assert_eq!(cfg.assets.font_size, 12);
        assert_eq!(cfg.pacing.stage(), Duration::ZERO);
        assert_eq!(cfg.pacing.end_hold_ms, 500);
        assert_eq!(cfg.music_volume, 0.25);
        assert_eq!(cfg.intro, IntroConfig::default());
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"(screen: (width: \"wide\"))").unwrap();
        let (_, err) = BootConfig::load_or_default(file.path());
        assert!(matches!(err, Some(AssetError::Parse { .. })));
    }
}
