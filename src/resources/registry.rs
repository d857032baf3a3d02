use std::collections::HashMap;

use crate::{engine::Engine, error::AssetError, resources::Handle};

/// A name to handle store for one asset kind.
///
/// The registry owns every handle it holds from registration until
/// [`release_all`](Self::release_all). Entries are never removed one by one and
/// never overwritten.
#[derive(Debug)]
pub struct ResourceRegistry<H: Handle> {
    entries: HashMap<String, H>,
}

impl<H: Handle> Default for ResourceRegistry<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: Handle> ResourceRegistry<H> {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Store `handle` under `name`.
    ///
    /// Fails with [`AssetError::DuplicateKey`] if the name is already taken; the
    /// existing mapping is left untouched and the caller still owns `handle`.
    pub fn register(&mut self, name: impl Into<String>, handle: H) -> Result<(), AssetError> {
        let name = name.into();
        if self.entries.contains_key(&name) {
            return Err(AssetError::DuplicateKey {
                kind: H::KIND,
                name,
            });
        }
        log::debug!("registered {} `{}` as {:?}", H::KIND, name, handle);
        self.entries.insert(name, handle);
        Ok(())
    }

    /// The handle stored under `name`, the same one on every call.
    pub fn lookup(&self, name: &str) -> Result<H, AssetError> {
        self.entries
            .get(name)
            .copied()
            .ok_or_else(|| AssetError::NotFound {
                kind: H::KIND,
                name: name.to_string(),
            })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Registered names in no particular order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Free every stored handle through the engine and empty the registry.
    ///
    /// Returns how many handles were released. Calling it on an empty registry
    /// is a no-op that returns 0.
    pub fn release_all<E: Engine + ?Sized>(&mut self, engine: &mut E) -> usize {
        let released = self.entries.len();
        for (_, handle) in self.entries.drain() {
            handle.free(engine);
        }
        if released > 0 {
            log::debug!("released {} {} handle(s)", released, H::KIND);
        }
        released
    }
}
