//! Presentation surface: the document root's class list
//!
//! The synchronizer flips two marker classes here. `RootClasses` is the
//! native model; the browser binding lives in `web`.

use anyhow::Result;
use std::collections::BTreeSet;

/// Something that carries boolean presentation markers
pub trait PresentationSurface {
    /// Add (`present = true`) or remove a marker class
    fn set_marker(&mut self, class: &str, present: bool) -> Result<()>;

    fn has_marker(&self, class: &str) -> bool;
}

/// In-memory class list of the document root
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RootClasses {
    classes: BTreeSet<String>,
}

impl RootClasses {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PresentationSurface for RootClasses {
    fn set_marker(&mut self, class: &str, present: bool) -> Result<()> {
        if present {
            self.classes.insert(class.to_string());
        } else {
            self.classes.remove(class);
        }
        Ok(())
    }

    fn has_marker(&self, class: &str) -> bool {
        self.classes.contains(class)
    }
}
