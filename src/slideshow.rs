//! The slideshow widget: slide selection, attribute dispatch, activation.
//!
//! [`SlideShow`] owns the current index and keeps three things consistent:
//! the visibility marker on exactly one panel, the internal typed properties,
//! and the external attribute surface. All navigation (relative stepping,
//! direct index writes, control clicks) converges on [`SlideShow::set_slide`].

use std::time::Duration;

use crate::attrs::{self, AttrError, AttrMap, AttrValue};
use crate::deck::{Deck, Panel, PanelId};
use crate::event::{Controls, EventDispatcher, Message};
use crate::registry::{Registry, RegistryError};
use crate::template::{ControlAction, Template};

// ---------------------------------------------------------------------------
// SlideShow
// ---------------------------------------------------------------------------

/// A widget that displays one of its panels at a time, with wrap-around
/// navigation.
///
/// Two implicit states: *empty* (no panels registered, where index assignment is
/// a complete no-op) and *active* (at least one panel, exactly one of which
/// carries the visible marker). Out-of-range indices are absorbed by
/// euclidean wrap-around, never rejected.
///
/// # Examples
///
/// ```ignore
/// let registry = Registry::new();
/// registry.install(TEMPLATE_SOURCE)?;
///
/// let mut show = SlideShow::with_registry(&registry)?;
/// let mut deck = Deck::new();
/// deck.push(Panel::new("first"));
/// deck.push(Panel::new("second"));
/// show.connect(deck);
///
/// show.next();
/// assert_eq!(show.slide(), 1);
/// ```
#[derive(Debug)]
pub struct SlideShow {
    template: Template,
    attrs: AttrMap,
    timeout_ms: u64,
    animation: String,
    slide: usize,
    deck: Option<Deck>,
    controls: Controls,
    dispatcher: EventDispatcher,
}

impl SlideShow {
    /// Construct an instance from the process-wide registry.
    ///
    /// Fails with [`RegistryError::NotReady`] until a template has been
    /// registered; after that, construction is synchronous.
    pub fn new() -> Result<Self, RegistryError> {
        Self::with_registry(Registry::global())
    }

    /// Construct an instance from a specific registry.
    pub fn with_registry(registry: &Registry) -> Result<Self, RegistryError> {
        let template = registry.template().ok_or(RegistryError::NotReady)?.clone();
        Ok(Self {
            template,
            attrs: AttrMap::new(),
            timeout_ms: 0,
            animation: "none".to_string(),
            slide: 0,
            deck: None,
            controls: Controls::new(),
            dispatcher: EventDispatcher::new(),
        })
    }

    /// The attribute names this widget observes.
    pub fn observed_attributes() -> Vec<&'static str> {
        attrs::observed_attributes()
    }

    // ── Activation ───────────────────────────────────────────────────

    /// Attach the panel deck and activate the widget.
    ///
    /// Binds the template's controls, selects the initial slide, and from
    /// here on re-validates the index whenever the deck changes.
    pub fn connect(&mut self, deck: Deck) {
        self.controls = Controls::from_template(&self.template);
        self.deck = Some(deck);
        // Events recorded before attachment are superseded by the initial
        // selection.
        if let Some(deck) = self.deck.as_mut() {
            let _ = deck.pending_events();
        }
        self.set_slide(0);
    }

    /// Detach and return the deck, unbinding the controls.
    pub fn disconnect(&mut self) -> Option<Deck> {
        self.controls = Controls::new();
        self.deck.take()
    }

    /// Whether a deck is attached.
    pub fn is_connected(&self) -> bool {
        self.deck.is_some()
    }

    // ── Slide selection ──────────────────────────────────────────────

    /// Assign the current slide index.
    ///
    /// When active: unmarks the current panel, wraps `index` into
    /// `[0, count)`, marks the panel at the new index, and reflects the
    /// normalized value to the `slide` attribute. When empty: a complete
    /// no-op, including the attribute write.
    pub fn set_slide(&mut self, index: i64) {
        let count = self.slide_count();
        if count == 0 {
            return;
        }
        if let Some(deck) = self.deck.as_mut() {
            // Unmarks the current panel, and any stale marker a removal
            // left behind.
            deck.clear_visible();
        }
        self.slide = index.rem_euclid(count as i64) as usize;
        if let Some(deck) = self.deck.as_mut() {
            deck.set_visible_at(self.slide, true);
        }
        let reflected = attrs::format_number(self.slide as f64);
        self.reflect("slide", &reflected);
    }

    /// Step to the previous slide, wrapping from the first to the last.
    pub fn previous(&mut self) {
        self.set_slide(self.slide as i64 - 1);
    }

    /// Step to the next slide, wrapping from the last to the first.
    pub fn next(&mut self) {
        self.set_slide(self.slide as i64 + 1);
    }

    /// The current slide index. Meaningful only while at least one panel is
    /// registered.
    pub fn slide(&self) -> usize {
        self.slide
    }

    /// The live panel count; `0` before a deck is attached.
    pub fn slide_count(&self) -> usize {
        self.deck.as_ref().map_or(0, Deck::len)
    }

    // ── Properties ───────────────────────────────────────────────────

    /// Set the auto-advance interval in seconds; stored as milliseconds and
    /// reflected to the `timeout` attribute. Negative values clamp to zero.
    pub fn set_timeout(&mut self, seconds: f64) {
        let seconds = seconds.max(0.0);
        self.timeout_ms = (seconds * 1000.0) as u64;
        let reflected = attrs::format_number(seconds);
        self.reflect("timeout", &reflected);
    }

    /// The auto-advance interval in milliseconds. Scheduling is the host's
    /// job; the widget only carries the configured value.
    pub fn timeout_ms(&self) -> u64 {
        self.timeout_ms
    }

    /// The auto-advance interval as a [`Duration`].
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Set the animation style selector. Stored verbatim and deliberately
    /// not reflected back to the attribute.
    pub fn set_animation(&mut self, animation: impl Into<String>) {
        self.animation = animation.into();
    }

    /// The animation style selector. Opaque to the widget.
    pub fn animation(&self) -> &str {
        &self.animation
    }

    // ── Attribute surface ────────────────────────────────────────────

    /// Write an external attribute.
    ///
    /// This is the change-notification entry point: the raw value is stored,
    /// and for observed names the table coercion runs and the result is
    /// assigned to the matching property. Writing a value equal to the
    /// stored one is a no-op past the store; this is the short-circuit that also
    /// terminates the reflection loop.
    pub fn set_attribute(&mut self, name: &str, value: &str) -> Result<(), AttrError> {
        let old = self.attrs.set(name, value);
        if attrs::coercion_for(name).is_none() {
            return Ok(());
        }
        self.attribute_changed(name, old.as_deref(), Some(value))
    }

    /// Remove an external attribute. Removal never coerces; the internal
    /// property keeps its value.
    pub fn remove_attribute(&mut self, name: &str) -> Result<(), AttrError> {
        let old = self.attrs.remove(name);
        if attrs::coercion_for(name).is_none() {
            return Ok(());
        }
        self.attribute_changed(name, old.as_deref(), None)
    }

    /// Read an external attribute.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attrs.get(name)
    }

    fn attribute_changed(
        &mut self,
        name: &str,
        old: Option<&str>,
        new: Option<&str>,
    ) -> Result<(), AttrError> {
        if old == new {
            return Ok(());
        }
        let Some(raw) = new else {
            // Removal carries no value to coerce.
            return Ok(());
        };
        let coercion = attrs::coercion_for(name)
            .ok_or_else(|| AttrError::UnknownAttribute(name.to_string()))?;
        let value = coercion.apply(name, raw)?;
        self.assign(name, value);
        Ok(())
    }

    fn assign(&mut self, name: &str, value: AttrValue) {
        match (name, value) {
            ("timeout", AttrValue::Number(seconds)) => self.set_timeout(seconds),
            ("slide", AttrValue::Number(index)) => self.set_slide(index as i64),
            ("animation", AttrValue::Text(animation)) => self.set_animation(animation),
            // The table guarantees name/kind agreement; anything else is
            // absorbed.
            _ => {}
        }
    }

    fn reflect(&mut self, name: &str, value: &str) {
        // Round-trips through the external set path; the old == new
        // short-circuit terminates the loop.
        let _ = self.set_attribute(name, value);
    }

    // ── Panels ───────────────────────────────────────────────────────

    /// Append a panel. `None` if no deck is attached.
    pub fn append_panel(&mut self, panel: Panel) -> Option<PanelId> {
        let id = self.deck.as_mut()?.push(panel);
        self.sync_slots();
        Some(id)
    }

    /// Insert a panel at a display position. `None` if no deck is attached.
    pub fn insert_panel(&mut self, index: usize, panel: Panel) -> Option<PanelId> {
        let id = self.deck.as_mut()?.insert_at(index, panel);
        self.sync_slots();
        Some(id)
    }

    /// Remove a panel by id, returning it.
    pub fn remove_panel(&mut self, id: PanelId) -> Option<Panel> {
        let panel = self.deck.as_mut()?.remove(id)?;
        self.sync_slots();
        Some(panel)
    }

    /// Remove the panel at a display position, returning it.
    pub fn remove_panel_at(&mut self, index: usize) -> Option<Panel> {
        let panel = self.deck.as_mut()?.remove_at(index)?;
        self.sync_slots();
        Some(panel)
    }

    /// Read access to the attached deck.
    pub fn deck(&self) -> Option<&Deck> {
        self.deck.as_ref()
    }

    /// Drain deck change events and, if any fired, re-enter the selector
    /// with the current (possibly now out-of-range) index.
    fn sync_slots(&mut self) {
        let changed = match self.deck.as_mut() {
            Some(deck) => !deck.pending_events().is_empty(),
            None => false,
        };
        if changed {
            self.set_slide(self.slide as i64);
        }
    }

    // ── Controls and messages ────────────────────────────────────────

    /// Activate a control by id, enqueueing its bound message.
    ///
    /// Unknown ids, and any id before [`connect`](Self::connect) binds the
    /// controls, are absorbed.
    pub fn click(&mut self, control_id: &str) {
        if let Some(message) = self.controls.resolve(control_id) {
            self.dispatcher.push(message);
        }
    }

    /// Enqueue a navigation message directly.
    pub fn post(&mut self, message: Message) {
        self.dispatcher.push(message);
    }

    /// Process all pending messages in arrival order.
    pub fn pump(&mut self) {
        for message in self.dispatcher.drain() {
            match message {
                Message::Previous => self.previous(),
                Message::Next => self.next(),
                Message::Select(index) => self.set_slide(index),
            }
        }
    }

    // ── Projection ───────────────────────────────────────────────────

    /// Project the widget to text lines: the visible panel's content (if
    /// any) followed by a control row like `< 2/3 >`.
    pub fn render_lines(&self, width: usize) -> Vec<String> {
        if width == 0 {
            return Vec::new();
        }
        let mut lines = Vec::new();
        if let Some(deck) = &self.deck {
            let panel = deck.panel_at(self.slide).and_then(|id| deck.get(id));
            if let Some(panel) = panel {
                if panel.is_visible() {
                    for line in panel.content().split('\n') {
                        lines.push(line.chars().take(width).collect());
                    }
                }
            }
        }
        lines.push(self.control_row(width));
        lines
    }

    /// The widget's template.
    pub fn template(&self) -> &Template {
        &self.template
    }

    fn control_row(&self, width: usize) -> String {
        let count = self.slide_count();
        let position = if count == 0 {
            "0/0".to_string()
        } else {
            format!("{}/{}", self.slide + 1, count)
        };
        let prev = self
            .template
            .label_for(ControlAction::Previous)
            .unwrap_or("<");
        let next = self.template.label_for(ControlAction::Next).unwrap_or(">");
        format!("{prev} {position} {next}")
            .chars()
            .take(width)
            .collect()
    }
}

// ===========================================================================
// Tests
// ===========================================================================
