//! Theme synchronizer
//!
//! Owns the `ThemeState` and the two optional capabilities it mirrors into.
//! Any capability may be absent (e.g. a non-interactive render pass); the
//! matching side effect is then skipped and the in-memory state still moves.
//! Storage and surface failures are logged and never returned.
//! `toggle` runs `initialize` first when it has not run yet, so a toggle
//! always flips the persisted mode.

use tracing::{debug, info, warn};

use super::{ThemeMode, ThemeState};
use crate::constants::marker::{DARK_CLASS, LIGHT_CLASS};
use crate::constants::storage::THEME_KEY;
use crate::store::DurableStore;
use crate::surface::PresentationSurface;

pub struct ThemeSynchronizer {
    state: ThemeState,
    store: Option<Box<dyn DurableStore>>,
    surface: Option<Box<dyn PresentationSurface>>,
    /// Write the default back when storage held nothing usable
    persist_default: bool,
    initialized: bool,
}

impl ThemeSynchronizer {
    pub fn new(
        store: Option<Box<dyn DurableStore>>,
        surface: Option<Box<dyn PresentationSurface>>,
    ) -> Self {
        Self {
            state: ThemeState::default(),
            store,
            surface,
            persist_default: false,
            initialized: false,
        }
    }

    /// Construct and run `initialize` in one step
    pub fn initialized(
        store: Option<Box<dyn DurableStore>>,
        surface: Option<Box<dyn PresentationSurface>>,
        persist_default: bool,
    ) -> Self {
        let mut sync = Self::new(store, surface).with_persist_default(persist_default);
        sync.initialize();
        sync
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn with_persist_default(mut self, persist_default: bool) -> Self {
        self.persist_default = persist_default;
        self
    }

    pub fn mode(&self) -> ThemeMode {
        self.state.mode
    }

    pub fn state(&self) -> ThemeState {
        self.state
    }

    pub fn has_store(&self) -> bool {
        self.store.is_some()
    }

    pub fn has_surface(&self) -> bool {
        self.surface.is_some()
    }

    pub fn store(&self) -> Option<&dyn DurableStore> {
        self.store.as_deref()
    }

    pub fn surface(&self) -> Option<&dyn PresentationSurface> {
        self.surface.as_deref()
    }

    /// Adopt the persisted mode (or `Dark`) and apply it to the surface.
    /// No-op when neither capability is available.
    pub fn initialize(&mut self) -> ThemeMode {
        self.initialized = true;
        if self.store.is_none() && self.surface.is_none() {
            debug!("No store or document available, skipping theme initialization");
            return self.state.mode;
        }

        let (mode, defaulted) = match self.read_stored() {
            Some(mode) => (mode, false),
            None => (ThemeMode::default(), true),
        };

        self.state.mode = mode;
        if defaulted && self.persist_default {
            self.persist(mode);
        }
        self.apply(mode);

        info!(mode = %mode, defaulted, "Initialized theme");
        mode
    }

    /// Flip the mode and propagate it to storage and the surface
    pub fn toggle(&mut self) -> ThemeMode {
        if !self.initialized {
            debug!("Toggle before initialization, initializing first");
            self.initialize();
        }
        let mode = self.state.mode.opposite();
        self.state.mode = mode;
        self.persist(mode);
        self.apply(mode);

        info!(mode = %mode, "Toggled theme");
        mode
    }

    fn read_stored(&self) -> Option<ThemeMode> {
        let store = self.store.as_ref()?;
        let raw = match store.get(THEME_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                warn!(error = ?e, "Failed to read stored theme, using default");
                return None;
            }
        };

        match raw.parse::<ThemeMode>() {
            Ok(mode) => Some(mode),
            Err(e) => {
                warn!(value = %raw, error = %e, "Ignoring stored theme");
                None
            }
        }
    }

    fn persist(&mut self, mode: ThemeMode) {
        let Some(store) = self.store.as_mut() else {
            debug!(mode = %mode, "No store available, theme not persisted");
            return;
        };
        if let Err(e) = store.set(THEME_KEY, mode.as_str()) {
            warn!(mode = %mode, error = ?e, "Failed to persist theme");
        }
    }

    /// Exactly one of the two markers is present afterwards
    fn apply(&mut self, mode: ThemeMode) {
        let Some(surface) = self.surface.as_mut() else {
            debug!(mode = %mode, "No document available, markers not applied");
            return;
        };
        for (class, present) in [(DARK_CLASS, mode.is_dark()), (LIGHT_CLASS, !mode.is_dark())] {
            if let Err(e) = surface.set_marker(class, present) {
                warn!(class, present, error = ?e, "Failed to set theme marker");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use crate::surface::RootClasses;
    use anyhow::{anyhow, Result};

    fn synchronizer(stored: Option<&str>) -> ThemeSynchronizer {
        let store = match stored {
            Some(value) => MemoryStore::with_entry(THEME_KEY, value),
            None => MemoryStore::new(),
        };
        ThemeSynchronizer::new(Some(Box::new(store)), Some(Box::new(RootClasses::new())))
    }

    fn stored(sync: &ThemeSynchronizer) -> Option<String> {
        sync.store().unwrap().get(THEME_KEY).unwrap()
    }

    fn markers(sync: &ThemeSynchronizer) -> (bool, bool) {
        let surface = sync.surface().unwrap();
        (surface.has_marker(DARK_CLASS), surface.has_marker(LIGHT_CLASS))
    }

    /// All present surfaces agree with the in-memory mode
    fn assert_consistent(sync: &ThemeSynchronizer) {
        let mode = sync.mode();
        assert_eq!(markers(sync), (mode.is_dark(), !mode.is_dark()));
    }

    struct FailingStore;

    impl DurableStore for FailingStore {
        fn get(&self, _key: &str) -> Result<Option<String>> {
            Err(anyhow!("storage unavailable"))
        }

        fn set(&mut self, _key: &str, _value: &str) -> Result<()> {
            Err(anyhow!("storage unavailable"))
        }
    }

    #[test]
    fn test_initialize_empty_storage_defaults_dark() {
        let mut sync = synchronizer(None);
        assert_eq!(sync.initialize(), ThemeMode::Dark);
        assert_eq!(markers(&sync), (true, false));
        // Default is not written back unless asked
        assert_eq!(stored(&sync), None);
    }

    #[test]
    fn test_initialize_adopts_stored_light() {
        let mut sync = synchronizer(Some("light"));
        assert_eq!(sync.initialize(), ThemeMode::Light);
        assert_eq!(markers(&sync), (false, true));
    }

    #[test]
    fn test_initialize_adopts_stored_dark() {
        let mut sync = synchronizer(Some("dark"));
        assert_eq!(sync.initialize(), ThemeMode::Dark);
        assert_eq!(markers(&sync), (true, false));
    }

    #[test]
    fn test_initialize_corrupt_value_defaults_dark() {
        let mut sync = synchronizer(Some("blue"));
        assert_eq!(sync.initialize(), ThemeMode::Dark);
        assert_consistent(&sync);
        // Corrupt value is left alone
        assert_eq!(stored(&sync).as_deref(), Some("blue"));
    }

    #[test]
    fn test_initialize_persist_default_writes_back() {
        let mut sync = synchronizer(Some("blue")).with_persist_default(true);
        sync.initialize();
        assert_eq!(stored(&sync).as_deref(), Some("dark"));
    }

    #[test]
    fn test_initialize_is_idempotent() {
        let mut sync = synchronizer(Some("light"));
        let first = sync.initialize();
        let second = sync.initialize();
        assert_eq!(first, second);
        assert_consistent(&sync);
    }

    #[test]
    fn test_initialize_clears_stale_marker() {
        let mut root = RootClasses::new();
        root.set_marker(DARK_CLASS, true).unwrap();
        root.set_marker(LIGHT_CLASS, true).unwrap();
        let store = MemoryStore::with_entry(THEME_KEY, "light");
        let mut sync = ThemeSynchronizer::new(Some(Box::new(store)), Some(Box::new(root)));

        sync.initialize();
        assert_eq!(markers(&sync), (false, true));
    }

    #[test]
    fn test_toggle_from_dark() {
        let mut sync = synchronizer(None);
        sync.initialize();

        assert_eq!(sync.toggle(), ThemeMode::Light);
        assert_eq!(stored(&sync).as_deref(), Some("light"));
        assert_eq!(markers(&sync), (false, true));
    }

    #[test]
    fn test_toggle_twice_round_trips() {
        let mut sync = synchronizer(Some("light"));
        sync.initialize();

        sync.toggle();
        assert_eq!(stored(&sync).as_deref(), Some("dark"));
        assert_consistent(&sync);

        sync.toggle();
        assert_eq!(sync.mode(), ThemeMode::Light);
        assert_eq!(stored(&sync).as_deref(), Some("light"));
        assert_consistent(&sync);
    }

    #[test]
    fn test_three_way_consistency_over_many_toggles() {
        let mut sync = synchronizer(None);
        sync.initialize();
        for _ in 0..5 {
            let mode = sync.toggle();
            assert_eq!(stored(&sync).as_deref(), Some(mode.as_str()));
            assert_consistent(&sync);
        }
    }

    #[test]
    fn test_toggle_without_initialize_starts_from_stored_mode() {
        let mut sync = synchronizer(Some("light"));
        assert!(!sync.is_initialized());

        assert_eq!(sync.toggle(), ThemeMode::Dark);
        assert!(sync.is_initialized());
        assert_eq!(stored(&sync).as_deref(), Some("dark"));
        assert_consistent(&sync);
    }

    #[test]
    fn test_initialized_constructor() {
        let store = MemoryStore::with_entry(THEME_KEY, "light");
        let sync = ThemeSynchronizer::initialized(
            Some(Box::new(store)),
            Some(Box::new(RootClasses::new())),
            false,
        );
        assert!(sync.is_initialized());
        assert_eq!(sync.mode(), ThemeMode::Light);
        assert_consistent(&sync);
    }

    #[test]
    fn test_no_capabilities_is_noop() {
        let mut sync = ThemeSynchronizer::new(None, None);
        assert_eq!(sync.initialize(), ThemeMode::Dark);

        // State still moves in memory
        assert_eq!(sync.toggle(), ThemeMode::Light);
        assert!(!sync.has_store());
        assert!(!sync.has_surface());
    }

    #[test]
    fn test_surface_without_store_uses_default() {
        let mut sync = ThemeSynchronizer::new(None, Some(Box::new(RootClasses::new())));
        assert_eq!(sync.initialize(), ThemeMode::Dark);
        assert_eq!(markers(&sync), (true, false));

        sync.toggle();
        assert_eq!(markers(&sync), (false, true));
    }

    #[test]
    fn test_store_without_surface_still_persists() {
        let store = MemoryStore::with_entry(THEME_KEY, "light");
        let mut sync = ThemeSynchronizer::new(Some(Box::new(store)), None);
        assert_eq!(sync.initialize(), ThemeMode::Light);

        sync.toggle();
        assert_eq!(stored(&sync).as_deref(), Some("dark"));
    }

    #[test]
    fn test_failing_store_degrades_to_memory_and_document() {
        let mut sync =
            ThemeSynchronizer::new(Some(Box::new(FailingStore)), Some(Box::new(RootClasses::new())));
        assert_eq!(sync.initialize(), ThemeMode::Dark);

        assert_eq!(sync.toggle(), ThemeMode::Light);
        assert_consistent(&sync);
    }
}
