//! Theme mode, its state holder and the synchronizer that keeps state,
//! storage and presentation in agreement.

mod mode;
mod sync;

pub use mode::{ParseThemeModeError, ThemeMode};
pub use sync::ThemeSynchronizer;

/// Current theme, owned by a single `ThemeSynchronizer`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ThemeState {
    pub mode: ThemeMode,
}
