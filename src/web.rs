//! Browser bindings for the two synchronizer capabilities
//!
//! `LocalStorage` wraps `window.localStorage`, `DocumentRoot` wraps the class
//! list of `document.documentElement`. Both constructors return `None` when
//! the browser does not provide the object, which the synchronizer treats as
//! an absent capability.

use anyhow::{anyhow, Result};
use wasm_bindgen::JsValue;
use web_sys::{Element, Storage};

use crate::app::RenderContext;
use crate::store::DurableStore;
use crate::surface::PresentationSurface;

fn js_error(context: &str, e: JsValue) -> anyhow::Error {
    anyhow!("{context}: {e:?}")
}

pub struct LocalStorage {
    storage: Storage,
}

impl LocalStorage {
    pub fn open() -> Option<Self> {
        let storage = web_sys::window()?.local_storage().ok().flatten()?;
        Some(Self { storage })
    }
}

impl DurableStore for LocalStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.storage
            .get_item(key)
            .map_err(|e| js_error("localStorage.getItem failed", e))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.storage
            .set_item(key, value)
            .map_err(|e| js_error("localStorage.setItem failed", e))
    }
}

pub struct DocumentRoot {
    root: Element,
}

impl DocumentRoot {
    pub fn open() -> Option<Self> {
        let root = web_sys::window()?.document()?.document_element()?;
        Some(Self { root })
    }
}

impl PresentationSurface for DocumentRoot {
    fn set_marker(&mut self, class: &str, present: bool) -> Result<()> {
        self.root
            .class_list()
            .toggle_with_force(class, present)
            .map(|_| ())
            .map_err(|e| js_error("classList.toggle failed", e))
    }

    fn has_marker(&self, class: &str) -> bool {
        self.root.class_list().contains(class)
    }
}

/// Capabilities of the current page, whichever of them exist
pub fn browser_context() -> RenderContext {
    let store = LocalStorage::open().map(|s| Box::new(s) as Box<dyn DurableStore>);
    let surface = DocumentRoot::open().map(|s| Box::new(s) as Box<dyn PresentationSurface>);
    RenderContext::new(store, surface)
}
