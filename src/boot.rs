//! The loading screen shown while the game starts.
//!
//! [`BootScreen`] switches to the boot resolution, loads the boot-only assets,
//! plays the intro animation, runs the [`LoadingSequencer`] with a progress bar
//! and finally releases the boot assets and restores the previous resolution.
//!
//! # States
//!
//! `Idle → BootAssetsLoading → IntroPlaying → Sequencing → TearingDown → Done`
//!
//! The boot assets (background, animation sheet, loading font, start sound and
//! the two bar sprites) live in a [`BootAssets`] guard. They are released when
//! the loading screen is torn down or, if any step fails, when the guard is
//! dropped on the way out. They never outlive [`BootScreen::run`].

use std::path::PathBuf;

use instant::Duration;

use crate::{
    config::{BootAssetFiles, BootConfig, IntroConfig},
    context::ResourceContext,
    engine::{Engine, Point},
    error::AssetError,
    loading::{
        EnginePacing, LoadingSequencer, Pacing, ProgressOverlay, SequenceReport,
    },
    resources::{Catalog, FontHandle, ImageHandle, ResourceKind, SoundHandle},
    teardown,
};

/// Stage label used in load failures of boot assets.
pub const BOOT_STAGE: &str = "boot";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootState {
    Idle,
    BootAssetsLoading,
    IntroPlaying,
    Sequencing,
    TearingDown,
    Done,
}

impl BootState {
    /// The only state this one may move to.
    pub fn next(self) -> Option<BootState> {
        match self {
            BootState::Idle => Some(BootState::BootAssetsLoading),
            BootState::BootAssetsLoading => Some(BootState::IntroPlaying),
            BootState::IntroPlaying => Some(BootState::Sequencing),
            BootState::Sequencing => Some(BootState::TearingDown),
            BootState::TearingDown => Some(BootState::Done),
            BootState::Done => None,
        }
    }
}

/// Handles of the boot-only assets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BootHandles {
    pub background: ImageHandle,
    pub animation: ImageHandle,
    pub font: FontHandle,
    pub start_sound: SoundHandle,
    pub bar_full: ImageHandle,
    pub bar_empty: ImageHandle,
}

#[derive(Debug, Clone, Copy)]
enum Held {
    Font(FontHandle),
    Image(ImageHandle),
    Sound(SoundHandle),
}

/// Frees whatever it holds when dropped.
struct HeldAssets<'e, E: Engine + ?Sized> {
    engine: &'e mut E,
    held: Vec<Held>,
}

impl<'e, E: Engine + ?Sized> HeldAssets<'e, E> {
    fn path(&self, file: &str, kind: ResourceKind) -> PathBuf {
        self.engine.resolve_path(file, kind)
    }

    fn image(&mut self, file: &str) -> Result<ImageHandle, AssetError> {
        let path = self.path(file, ResourceKind::Image);
        let image = self
            .engine
            .load_image(&path, None)
            .map_err(|source| boot_failure(ResourceKind::Image, file, path, source))?;
        self.held.push(Held::Image(image));
        Ok(image)
    }

    fn font(&mut self, file: &str, size: u32) -> Result<FontHandle, AssetError> {
        let path = self.path(file, ResourceKind::Font);
        let font = self
            .engine
            .load_font(&path, size)
            .map_err(|source| boot_failure(ResourceKind::Font, file, path, source))?;
        self.held.push(Held::Font(font));
        Ok(font)
    }

    fn sound(&mut self, file: &str) -> Result<SoundHandle, AssetError> {
        let path = self.path(file, ResourceKind::Sound);
        let sound = self
            .engine
            .load_sound(&path)
            .map_err(|source| boot_failure(ResourceKind::Sound, file, path, source))?;
        self.held.push(Held::Sound(sound));
        Ok(sound)
    }

    /// Free everything held, most recently loaded first. Only used when
    /// loading stops part way.
    fn release(&mut self) -> usize {
        let released = self.held.len();
        while let Some(held) = self.held.pop() {
            match held {
                Held::Font(font) => self.engine.free_font(font),
                Held::Image(image) => self.engine.free_image(image),
                Held::Sound(sound) => self.engine.free_sound(sound),
            }
        }
        released
    }
}

impl<E: Engine + ?Sized> Drop for HeldAssets<'_, E> {
    fn drop(&mut self) {
        if !self.held.is_empty() {
            log::warn!(
                "releasing {} boot asset(s) on an early exit",
                self.held.len()
            );
            self.release();
        }
    }
}

fn boot_failure(kind: ResourceKind, file: &str, path: PathBuf, source: anyhow::Error) -> AssetError {
    AssetError::LoadFailure {
        stage: BOOT_STAGE.to_string(),
        kind,
        name: file.to_string(),
        path,
        source,
    }
}

/// The boot-only assets together with exclusive access to the engine.
///
/// All drawing during the loading screen goes through [`engine`](Self::engine)
/// so the assets cannot be leaked past the guard.
pub struct BootAssets<'e, E: Engine + ?Sized> {
    guard: HeldAssets<'e, E>,
    handles: BootHandles,
}

impl<'e, E: Engine + ?Sized> BootAssets<'e, E> {
    /// Load the boot assets. If any of them fails, the ones already loaded are
    /// freed before the error is returned.
    pub fn acquire(engine: &'e mut E, files: &BootAssetFiles) -> Result<Self, AssetError> {
        let mut guard = HeldAssets {
            engine,
            held: Vec::new(),
        };

        let background = guard.image(&files.background)?;
        // show the background straight away, the rest takes a moment
        guard.engine.draw_image(background, Point::default());
        guard.engine.refresh_screen();
        guard.engine.pump_events();

        let animation = guard.image(&files.animation)?;
        let font = guard.font(&files.font, files.font_size)?;
        let start_sound = guard.sound(&files.start_sound)?;
        let bar_full = guard.image(&files.bar_full)?;
        let bar_empty = guard.image(&files.bar_empty)?;
        log::debug!("{} boot asset(s) loaded", guard.held.len());

        Ok(Self {
            guard,
            handles: BootHandles {
                background,
                animation,
                font,
                start_sound,
                bar_full,
                bar_empty,
            },
        })
    }

    pub fn handles(&self) -> BootHandles {
        self.handles
    }

    pub fn engine(&mut self) -> &mut E {
        &mut *self.guard.engine
    }

    /// Free all boot assets now and return how many were released.
    ///
    /// Order: font, background, animation, empty bar, full bar, start sound.
    pub fn release(mut self) -> usize {
        let handles = self.handles;
        let engine = &mut *self.guard.engine;
        engine.free_font(handles.font);
        engine.free_image(handles.background);
        engine.free_image(handles.animation);
        engine.free_image(handles.bar_empty);
        engine.free_image(handles.bar_full);
        engine.free_sound(handles.start_sound);

        let released = self.guard.held.len();
        self.guard.held.clear();
        released
    }
}

/// Play the start sound and the intro animation over the background.
pub fn play_intro<E, P>(assets: &mut BootAssets<'_, E>, pacing: &mut P, intro: &IntroConfig)
where
    E: Engine + ?Sized,
    P: Pacing,
{
    let handles = assets.handles();
    let engine = assets.engine();

    engine.play_sound(handles.start_sound);
    pacing.pause(engine, Duration::from_millis(intro.sound_lead_ms));

    for cel in 0..intro.cel_count {
        engine.draw_image(handles.background, Point::default());
        engine.draw_image_part(handles.animation, intro.cel_rect(cel), intro.position());
        pacing.pause(engine, Duration::from_millis(intro.frame_ms));
        engine.refresh_screen();
        engine.pump_events();
    }

    pacing.pause(engine, Duration::from_millis(intro.hold_ms));
}

#[derive(Debug, Clone, PartialEq)]
pub struct BootReport {
    pub sequence: SequenceReport,
    pub history: Vec<BootState>,
    /// Screen size captured before boot and restored at the end.
    pub restored_screen: (u32, u32),
    pub boot_assets_released: usize,
}

/// Orchestrates one run of the loading screen.
pub struct BootScreen<'a> {
    config: &'a BootConfig,
    catalog: &'a Catalog,
    state: BootState,
    history: Vec<BootState>,
}

impl<'a> BootScreen<'a> {
    pub fn new(config: &'a BootConfig, catalog: &'a Catalog) -> Self {
        Self {
            config,
            catalog,
            state: BootState::Idle,
            history: vec![BootState::Idle],
        }
    }

    pub fn state(&self) -> BootState {
        self.state
    }

    /// Every state entered so far, starting with `Idle`.
    pub fn history(&self) -> &[BootState] {
        &self.history
    }

    fn enter(&mut self, next: BootState) {
        debug_assert_eq!(self.state.next(), Some(next));
        log::debug!("boot {:?} -> {:?}", self.state, next);
        self.state = next;
        self.history.push(next);
    }

    /// Run the loading screen to completion, filling `ctx`.
    ///
    /// On error the state stays at the step that failed, the boot assets are
    /// released and whatever the sequencer registered so far stays in `ctx`.
    pub fn run<E, P>(
        &mut self,
        engine: &mut E,
        pacing: &mut P,
        ctx: &mut ResourceContext,
    ) -> Result<BootReport, AssetError>
    where
        E: Engine + ?Sized,
        P: Pacing,
    {
        let config = self.config;
        self.state = BootState::Idle;
        self.history = vec![BootState::Idle];

        let saved_screen = engine.screen_size();
        engine.change_screen_size(config.screen.width, config.screen.height);

        self.enter(BootState::BootAssetsLoading);
        let mut assets = BootAssets::acquire(&mut *engine, &config.assets)?;

        self.enter(BootState::IntroPlaying);
        play_intro(&mut assets, pacing, &config.intro);

        self.enter(BootState::Sequencing);
        let handles = assets.handles();
        let mut overlay = ProgressOverlay::new(
            handles.bar_empty,
            handles.bar_full,
            handles.font,
            config.progress.clone(),
        );
        let sequence = LoadingSequencer::new(self.catalog)
            .with_pacing(config.pacing.clone())
            .with_music_volume(config.music_volume)
            .run(assets.engine(), pacing, &mut overlay, ctx)?;

        self.enter(BootState::TearingDown);
        let screen = assets.engine();
        screen.pump_events();
        pacing.pause(screen, config.pacing.end_hold());
        screen.clear_screen();
        screen.refresh_screen();
        let boot_assets_released = assets.release();
        engine.change_screen_size(saved_screen.0, saved_screen.1);

        self.enter(BootState::Done);
        log::info!(
            "boot finished: {} asset(s) loaded",
            sequence.total_loaded()
        );
        Ok(BootReport {
            sequence,
            history: self.history.clone(),
            restored_screen: saved_screen,
            boot_assets_released,
        })
    }
}

/// Show the loading screen with real pauses and return the loaded resources.
///
/// Installs `env_logger` if no logger is set yet. On failure everything loaded
/// so far is released before the error is returned.
pub fn run<E: Engine + ?Sized>(
    engine: &mut E,
    config: &BootConfig,
    catalog: &Catalog,
) -> anyhow::Result<ResourceContext> {
    if let Err(e) = env_logger::try_init() {
        log::warn!("could not initialize logger: {}", e);
    }

    let mut ctx = ResourceContext::new();
    let mut screen = BootScreen::new(config, catalog);
    match screen.run(engine, &mut EnginePacing, &mut ctx) {
        Ok(report) => {
            for stage in &report.sequence.stages {
                log::debug!("{}: {} in {:?}", stage.label, stage.loaded, stage.elapsed);
            }
            Ok(ctx)
        }
        Err(e) => {
            log::error!("boot failed in state {:?}: {}", screen.state(), e);
            teardown::free_resources(&mut ctx, engine);
            Err(anyhow::Error::new(e).context("loading screen failed"))
        }
    }
}
