//! Widget-type registry: one-time template loading.
//!
//! The template resource lives through three states: **unset** (nothing
//! registered), **loading** (a [`register`](Registry::register) call is
//! awaiting its source), and **ready** (parsed and stored). Instance
//! construction is only reachable once the registry is ready, and from then
//! on is synchronous: the template is a loaded singleton, never re-fetched
//! per instance. A failed load or parse leaves the registry unset so a later
//! registration can retry.

use std::future::Future;

use tokio::sync::OnceCell;

use crate::template::{parse_template, Template, TemplateError};

/// Errors from the widget-type registry.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("slideshow template is not ready; register a template first")]
    NotReady,
    #[error(transparent)]
    Template(#[from] TemplateError),
}

/// Holds the once-loaded template for the slideshow widget type.
pub struct Registry {
    cell: OnceCell<Template>,
}

impl Registry {
    /// Create a registry in the unset state.
    pub const fn new() -> Self {
        Self {
            cell: OnceCell::const_new(),
        }
    }

    /// The process-wide registry used by [`SlideShow::new`].
    ///
    /// [`SlideShow::new`]: crate::slideshow::SlideShow::new
    pub fn global() -> &'static Registry {
        static GLOBAL: Registry = Registry::new();
        &GLOBAL
    }

    /// Await a template source and register it.
    ///
    /// The source future is resolved at most once per registry: concurrent
    /// and repeated calls all yield the already-registered template.
    pub async fn register<F>(&self, source: F) -> Result<&Template, RegistryError>
    where
        F: Future<Output = String>,
    {
        self.cell
            .get_or_try_init(|| async move {
                parse_template(&source.await).map_err(RegistryError::from)
            })
            .await
    }

    /// Register an already-fetched template source, synchronously.
    ///
    /// For hosts that load the resource themselves (and for tests). If a
    /// template is already registered, the first registration wins.
    pub fn install(&self, source: &str) -> Result<&Template, RegistryError> {
        let template = parse_template(source)?;
        // First registration wins; a concurrent winner is equally valid.
        let _ = self.cell.set(template);
        self.template().ok_or(RegistryError::NotReady)
    }

    /// The registered template, or `None` while unset/loading.
    pub fn template(&self) -> Option<&Template> {
        self.cell.get()
    }

    /// Whether the template is ready.
    pub fn is_ready(&self) -> bool {
        self.cell.get().is_some()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

// ===========================================================================
// Tests
// ===========================================================================
