//! Staged loading of the game's assets.
//!
//! Four stages run strictly in order: fonts, images, sounds, music. Each stage
//! loads every catalog record of its kind into the matching registry of the
//! [`ResourceContext`]. A progress message is shown before every stage and once
//! more when loading is complete.
//!
//! # Progress steps
//!
//! The bar is filled to `floor(bar_width * step / STEPS_TOTAL)` with
//! `STEPS_TOTAL = 5`. Stages show their ordinal (0..=3) and completion shows 5,
//! so step 4 is never displayed and the bar jumps from 3/5 to full at the end.
//! This matches the shipped loading screen exactly, though it is probably an
//! off-by-one in the step numbering.

use instant::{Duration, Instant};

use crate::{
    config::PacingConfig,
    context::ResourceContext,
    engine::{Color, Engine},
    error::AssetError,
    resources::{Catalog, CatalogRecord, Handle, ResourceKind, ResourceRegistry},
};

pub mod overlay;
pub mod pacing;

pub use overlay::{ProgressOverlay, ProgressView, SilentProgress};
pub use pacing::{EnginePacing, Headless, Pacing};

/// Denominator of the progress bar fraction.
pub const STEPS_TOTAL: u32 = 5;

pub const COMPLETION_MESSAGE: &str = "Game loaded...";

/// One ordered loading phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stage {
    pub label: &'static str,
    pub ordinal: u32,
    pub kind: ResourceKind,
}

impl Stage {
    pub fn message(&self) -> String {
        format!("Loading {}...", self.label)
    }
}

pub const STAGES: [Stage; 4] = [
    Stage {
        label: "fonts",
        ordinal: 0,
        kind: ResourceKind::Font,
    },
    Stage {
        label: "images",
        ordinal: 1,
        kind: ResourceKind::Image,
    },
    Stage {
        label: "sounds",
        ordinal: 2,
        kind: ResourceKind::Sound,
    },
    Stage {
        label: "music",
        ordinal: 3,
        kind: ResourceKind::Music,
    },
];

/// Filled width of a `bar_width` wide bar at progress `step`.
pub fn filled_width(bar_width: u32, step: u32) -> u32 {
    let step = step.min(STEPS_TOTAL);
    (u64::from(bar_width) * u64::from(step) / u64::from(STEPS_TOTAL)) as u32
}

#[derive(Debug, Clone, PartialEq)]
pub struct StageReport {
    pub label: &'static str,
    pub ordinal: u32,
    pub kind: ResourceKind,
    pub loaded: usize,
    pub elapsed: Duration,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SequenceReport {
    pub stages: Vec<StageReport>,
    /// Progress steps in the order they were shown.
    pub steps_shown: Vec<u32>,
}

impl SequenceReport {
    pub fn total_loaded(&self) -> usize {
        self.stages.iter().map(|s| s.loaded).sum()
    }
}

/// Runs the four loading stages over a catalog.
#[derive(Debug, Clone)]
pub struct LoadingSequencer<'a> {
    catalog: &'a Catalog,
    pacing: PacingConfig,
    music_volume: f32,
}

impl<'a> LoadingSequencer<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self {
            catalog,
            pacing: PacingConfig::default(),
            music_volume: 0.0,
        }
    }

    pub fn with_pacing(mut self, pacing: PacingConfig) -> Self {
        self.pacing = pacing;
        self
    }

    /// Volume set right after the music stage.
    pub fn with_music_volume(mut self, volume: f32) -> Self {
        self.music_volume = volume;
        self
    }

    pub fn stages(&self) -> &'static [Stage] {
        &STAGES
    }

    /// Load every stage into `ctx`, showing progress through `view`.
    ///
    /// The catalog is validated first, so a duplicate name or a font without a
    /// size aborts before any file is loaded. The first load failure aborts the
    /// sequence; assets loaded so far stay registered in `ctx`.
    pub fn run<E, P, V>(
        &self,
        engine: &mut E,
        pacing: &mut P,
        view: &mut V,
        ctx: &mut ResourceContext,
    ) -> Result<SequenceReport, AssetError>
    where
        E: Engine + ?Sized,
        P: Pacing,
        V: ProgressView<E>,
    {
        self.catalog.validate()?;
        let mut report = SequenceReport::default();

        for stage in STAGES {
            view.show(engine, &stage.message(), stage.ordinal);
            report.steps_shown.push(stage.ordinal);

            let started = Instant::now();
            let loaded = self.load_stage(engine, &stage, ctx)?;
            if stage.kind == ResourceKind::Music {
                engine.set_music_volume(self.music_volume);
            }
            let elapsed = started.elapsed();
            log::info!(
                "stage {} ({}) loaded {} asset(s) in {:?}",
                stage.ordinal,
                stage.label,
                loaded,
                elapsed
            );
            report.stages.push(StageReport {
                label: stage.label,
                ordinal: stage.ordinal,
                kind: stage.kind,
                loaded,
                elapsed,
            });

            pacing.pause(engine, self.pacing.stage());
        }

        pacing.pause(engine, self.pacing.final_pause());
        view.show(engine, COMPLETION_MESSAGE, STEPS_TOTAL);
        report.steps_shown.push(STEPS_TOTAL);
        pacing.pause(engine, self.pacing.stage());

        Ok(report)
    }

    fn load_stage<E: Engine + ?Sized>(
        &self,
        engine: &mut E,
        stage: &Stage,
        ctx: &mut ResourceContext,
    ) -> Result<usize, AssetError> {
        let mut loaded = 0;
        for record in self.catalog.records_of(stage.kind) {
            load_record(engine, stage, record, ctx)?;
            loaded += 1;
        }
        Ok(loaded)
    }
}

fn load_record<E: Engine + ?Sized>(
    engine: &mut E,
    stage: &Stage,
    record: &CatalogRecord,
    ctx: &mut ResourceContext,
) -> Result<(), AssetError> {
    let path = engine.resolve_path(&record.file, record.kind);
    let failed = |source| AssetError::LoadFailure {
        stage: stage.label.to_string(),
        kind: record.kind,
        name: record.name.clone(),
        path: path.clone(),
        source,
    };

    match record.kind {
        ResourceKind::Font => {
            let size = record.size.unwrap_or_default();
            let font = engine.load_font(&path, size).map_err(failed)?;
            register(&mut ctx.fonts, engine, &record.name, font)
        }
        ResourceKind::Image => {
            let key = record.transparent.map(|[r, g, b]| Color::rgb(r, g, b));
            let image = engine.load_image(&path, key).map_err(failed)?;
            register(&mut ctx.images, engine, &record.name, image)
        }
        ResourceKind::Sound => {
            let sound = engine.load_sound(&path).map_err(failed)?;
            register(&mut ctx.sounds, engine, &record.name, sound)
        }
        ResourceKind::Music => {
            let music = engine.load_music(&path).map_err(failed)?;
            register(&mut ctx.music, engine, &record.name, music)
        }
    }
}

/// Register a freshly loaded handle, giving it back to the engine if the name
/// is already taken.
fn register<H: Handle, E: Engine + ?Sized>(
    registry: &mut ResourceRegistry<H>,
    engine: &mut E,
    name: &str,
    handle: H,
) -> Result<(), AssetError> {
    registry
        .register(name, handle)
        .inspect_err(|_| handle.free(engine))
}
