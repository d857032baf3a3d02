use crate::{
    error::AssetError,
    resources::{
        FontHandle, ImageHandle, MusicHandle, ResourceKind, ResourceRegistry, SoundHandle,
    },
};

/// Owner of the four long-lived asset registries.
///
/// Created empty at startup, filled by the loading sequencer and emptied by
/// [`crate::teardown::free_resources`] at shutdown. Game code resolves assets by
/// name through [`font`](Self::font), [`image`](Self::image),
/// [`sound`](Self::sound) and [`music`](Self::music).
#[derive(Debug, Default)]
pub struct ResourceContext {
    pub fonts: ResourceRegistry<FontHandle>,
    pub images: ResourceRegistry<ImageHandle>,
    pub sounds: ResourceRegistry<SoundHandle>,
    pub music: ResourceRegistry<MusicHandle>,
}

impl ResourceContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn font(&self, name: &str) -> Result<FontHandle, AssetError> {
        self.fonts.lookup(name)
    }

    pub fn image(&self, name: &str) -> Result<ImageHandle, AssetError> {
        self.images.lookup(name)
    }

    pub fn sound(&self, name: &str) -> Result<SoundHandle, AssetError> {
        self.sounds.lookup(name)
    }

    pub fn music(&self, name: &str) -> Result<MusicHandle, AssetError> {
        self.music.lookup(name)
    }

    /// Number of entries registered for `kind`.
    pub fn count(&self, kind: ResourceKind) -> usize {
        match kind {
            ResourceKind::Font => self.fonts.len(),
            ResourceKind::Image => self.images.len(),
            ResourceKind::Sound => self.sounds.len(),
            ResourceKind::Music => self.music.len(),
        }
    }

    pub fn total(&self) -> usize {
        ResourceKind::ALL.iter().map(|&kind| self.count(kind)).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

impl Drop for ResourceContext {
    fn drop(&mut self) {
        // handles can only be freed through an engine, so all we can do is say so
        if !self.is_empty() {
            log::warn!(
                "resource context dropped while still owning {} handle(s); call teardown::free_resources first",
                self.total()
            );
        }
    }
}
