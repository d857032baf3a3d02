//! Shutdown of the long-lived asset registries.

use crate::{context::ResourceContext, engine::Engine, resources::ResourceKind};

/// Registries are emptied in this order.
pub const RELEASE_ORDER: [ResourceKind; 4] = [
    ResourceKind::Font,
    ResourceKind::Image,
    ResourceKind::Music,
    ResourceKind::Sound,
];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TeardownReport {
    /// Handles released per kind, in release order.
    pub released: Vec<(ResourceKind, usize)>,
}

impl TeardownReport {
    pub fn total(&self) -> usize {
        self.released.iter().map(|(_, n)| n).sum()
    }

    pub fn released_of(&self, kind: ResourceKind) -> usize {
        self.released
            .iter()
            .find(|(k, _)| *k == kind)
            .map_or(0, |(_, n)| *n)
    }
}

/// Free every handle owned by `ctx` through `engine`, then pump events once.
///
/// Afterwards every registry is empty and every lookup fails with
/// [`crate::AssetError::NotFound`]. Calling this on an empty context only
/// pumps events.
pub fn free_resources<E: Engine + ?Sized>(
    ctx: &mut ResourceContext,
    engine: &mut E,
) -> TeardownReport {
    let mut report = TeardownReport::default();
    for kind in RELEASE_ORDER {
        let released = match kind {
            ResourceKind::Font => ctx.fonts.release_all(engine),
            ResourceKind::Image => ctx.images.release_all(engine),
            ResourceKind::Music => ctx.music.release_all(engine),
            ResourceKind::Sound => ctx.sounds.release_all(engine),
        };
        report.released.push((kind, released));
    }
    engine.pump_events();
    log::info!("released {} asset(s)", report.total());
    report
}
