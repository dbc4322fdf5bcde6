//! Application bootstrap
//!
//! Builds the app from an `AppConfig` and a `RenderContext`, installing the
//! configured plugins in order. A render context without a document is a
//! non-interactive pass: client-only plugins are skipped and the theme
//! synchronizer performs no side effects. Such a pass is only allowed when
//! `ssr` is enabled in config.

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::rc::Rc;
use tracing::{debug, info};

use crate::config::AppConfig;
use crate::constants::storage::THEME_KEY;
use crate::store::DurableStore;
use crate::surface::PresentationSurface;
use crate::theme::{ThemeMode, ThemeSynchronizer};

/// Where a plugin may run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PluginMode {
    /// Only with a live document
    Client,
    /// Every pass, including non-interactive rendering
    #[default]
    Universal,
}

/// Capabilities available to this render pass
#[derive(Default)]
pub struct RenderContext {
    pub store: Option<Box<dyn DurableStore>>,
    pub surface: Option<Box<dyn PresentationSurface>>,
}

impl RenderContext {
    pub fn new(
        store: Option<Box<dyn DurableStore>>,
        surface: Option<Box<dyn PresentationSurface>>,
    ) -> Self {
        Self { store, surface }
    }

    /// Non-interactive pass: no storage, no document
    pub fn server() -> Self {
        Self::default()
    }

    pub fn client(store: impl DurableStore + 'static, surface: impl PresentationSurface + 'static) -> Self {
        Self::new(Some(Box::new(store)), Some(Box::new(surface)))
    }

    pub fn is_interactive(&self) -> bool {
        self.surface.is_some()
    }
}

/// Shared access to the theme for UI components: read the mode, toggle it
#[derive(Clone)]
pub struct ThemeHandle {
    inner: Rc<RefCell<ThemeSynchronizer>>,
}

impl ThemeHandle {
    fn new(sync: ThemeSynchronizer) -> Self {
        Self {
            inner: Rc::new(RefCell::new(sync)),
        }
    }

    pub fn mode(&self) -> ThemeMode {
        self.inner.borrow().mode()
    }

    pub fn toggle(&self) -> ThemeMode {
        self.inner.borrow_mut().toggle()
    }

    /// Persisted value under the theme key; `None` when absent or unreadable
    pub fn stored(&self) -> Option<String> {
        let sync = self.inner.borrow();
        sync.store()?.get(THEME_KEY).ok().flatten()
    }

    /// Whether `class` is set on the document; `false` without a document
    pub fn has_marker(&self, class: &str) -> bool {
        self.inner
            .borrow()
            .surface()
            .is_some_and(|surface| surface.has_marker(class))
    }

    pub fn has_store(&self) -> bool {
        self.inner.borrow().has_store()
    }

    pub fn has_surface(&self) -> bool {
        self.inner.borrow().has_surface()
    }
}

/// What plugins see while installing, and what they provide to the app
pub struct AppContext {
    config: AppConfig,
    render: RenderContext,
    interactive: bool,
    theme: Option<ThemeHandle>,
    api_base: Option<String>,
    map: bool,
}

impl AppContext {
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn is_interactive(&self) -> bool {
        self.interactive
    }

    pub fn theme(&self) -> Option<&ThemeHandle> {
        self.theme.as_ref()
    }

    pub fn api_base(&self) -> Option<&str> {
        self.api_base.as_deref()
    }

    pub fn has_map(&self) -> bool {
        self.map
    }
}

pub trait Plugin {
    fn name(&self) -> &str;

    fn mode(&self) -> PluginMode;

    fn install(&self, ctx: &mut AppContext) -> Result<()>;
}

/// Light/dark theme: builds the synchronizer from the render capabilities
pub struct ThemePlugin {
    mode: PluginMode,
}

impl Plugin for ThemePlugin {
    fn name(&self) -> &str {
        "theme"
    }

    fn mode(&self) -> PluginMode {
        self.mode
    }

    fn install(&self, ctx: &mut AppContext) -> Result<()> {
        let sync = ThemeSynchronizer::initialized(
            ctx.render.store.take(),
            ctx.render.surface.take(),
            ctx.config.theme.persist_default,
        );
        ctx.theme = Some(ThemeHandle::new(sync));
        Ok(())
    }
}

/// HTTP client setup, only records the API base it would talk to
pub struct AxiosPlugin {
    mode: PluginMode,
}

impl Plugin for AxiosPlugin {
    fn name(&self) -> &str {
        "axios"
    }

    fn mode(&self) -> PluginMode {
        self.mode
    }

    fn install(&self, ctx: &mut AppContext) -> Result<()> {
        ctx.api_base = Some(ctx.config.runtime.public.api_base.clone());
        Ok(())
    }
}

/// Map widget support
pub struct LeafletPlugin {
    mode: PluginMode,
}

impl Plugin for LeafletPlugin {
    fn name(&self) -> &str {
        "leaflet"
    }

    fn mode(&self) -> PluginMode {
        self.mode
    }

    fn install(&self, ctx: &mut AppContext) -> Result<()> {
        ctx.map = true;
        Ok(())
    }
}

fn resolve_plugin(name: &str, mode: PluginMode) -> Result<Box<dyn Plugin>> {
    let plugin: Box<dyn Plugin> = match name {
        "theme" => Box::new(ThemePlugin { mode }),
        "axios" => Box::new(AxiosPlugin { mode }),
        "leaflet" => Box::new(LeafletPlugin { mode }),
        other => bail!("Unknown plugin {other:?} in config"),
    };
    Ok(plugin)
}

pub struct App {
    ctx: AppContext,
    installed: Vec<String>,
}

impl App {
    /// Install every configured plugin that may run in this render context
    pub fn bootstrap(config: AppConfig, render: RenderContext) -> Result<Self> {
        let interactive = render.is_interactive();
        if !interactive && !config.ssr {
            bail!("Non-interactive render pass requested but ssr is disabled in config");
        }

        let plugins = config
            .plugins
            .iter()
            .map(|spec| resolve_plugin(&spec.name, spec.mode))
            .collect::<Result<Vec<_>>>()?;

        let mut ctx = AppContext {
            config,
            render,
            interactive,
            theme: None,
            api_base: None,
            map: false,
        };

        let mut installed = Vec::new();
        for plugin in plugins {
            if plugin.mode() == PluginMode::Client && !interactive {
                debug!(plugin = plugin.name(), "Skipping client-only plugin on non-interactive pass");
                continue;
            }
            plugin.install(&mut ctx)?;
            installed.push(plugin.name().to_string());
        }

        info!(interactive, plugins = ?installed, "Application bootstrapped");
        Ok(Self { ctx, installed })
    }

    pub fn context(&self) -> &AppContext {
        &self.ctx
    }

    pub fn theme(&self) -> Option<&ThemeHandle> {
        self.ctx.theme()
    }

    /// Names of plugins that ran, in install order
    pub fn installed(&self) -> &[String] {
        &self.installed
    }
}
