//! Pilot: programmatic interaction with a connected slideshow.
//!
//! The `Pilot` builds a ready registry, constructs a [`SlideShow`], connects
//! a deck of panels, and provides a high-level API for simulating control
//! clicks and attribute writes and for rendering the widget to text.

use crate::attrs::AttrError;
use crate::deck::{Deck, Panel};
use crate::registry::Registry;
use crate::slideshow::SlideShow;
use crate::template::ControlAction;

/// The template the pilot installs when none is given.
pub const DEFAULT_TEMPLATE: &str = r#"
slideshow {
    slot #slides;
    control #prev "<" previous;
    control #next ">" next;
}
"#;

/// Render a widget to a newline-joined string for assertions.
pub fn render_to_string(widget: &SlideShow, width: usize) -> String {
    widget.render_lines(width).join("\n")
}

// ---------------------------------------------------------------------------
// Pilot
// ---------------------------------------------------------------------------

/// A headless driver for testing slideshow behavior.
///
/// # Examples
///
/// ```ignore
/// let mut pilot = Pilot::new(&["one", "two", "three"]);
/// pilot.click_next();
/// pilot.process();
/// assert_eq!(pilot.current(), 1);
/// ```
pub struct Pilot {
    widget: SlideShow,
}

impl Pilot {
    /// Build a pilot with the default template and the given panel contents.
    pub fn new(panels: &[&str]) -> Self {
        Self::with_template(DEFAULT_TEMPLATE, panels)
    }

    /// Build a pilot with a custom template source.
    pub fn with_template(source: &str, panels: &[&str]) -> Self {
        let registry = Registry::new();
        registry.install(source).expect("pilot template must parse");
        let mut widget =
            SlideShow::with_registry(&registry).expect("registry was just installed");
        let mut deck = Deck::new();
        for content in panels {
            deck.push(Panel::new(*content));
        }
        widget.connect(deck);
        Self { widget }
    }

    // ── Input simulation ─────────────────────────────────────────────

    /// Click the control bound to the previous action, if the template
    /// declares one.
    pub fn click_prev(&mut self) {
        self.click_action(ControlAction::Previous);
    }

    /// Click the control bound to the next action, if the template
    /// declares one.
    pub fn click_next(&mut self) {
        self.click_action(ControlAction::Next);
    }

    fn click_action(&mut self, action: ControlAction) {
        let id = self
            .widget
            .template()
            .control_for(action)
            .map(|c| c.id.clone());
        if let Some(id) = id {
            self.widget.click(&id);
        }
    }

    /// Write an external attribute on the widget.
    pub fn set_attr(&mut self, name: &str, value: &str) -> Result<(), AttrError> {
        self.widget.set_attribute(name, value)
    }

    // ── Processing ───────────────────────────────────────────────────

    /// Process all queued messages.
    pub fn process(&mut self) {
        self.widget.pump();
    }

    // ── Query ────────────────────────────────────────────────────────

    /// The current slide index.
    pub fn current(&self) -> usize {
        self.widget.slide()
    }

    /// Borrow the underlying widget immutably.
    pub fn widget(&self) -> &SlideShow {
        &self.widget
    }

    /// Borrow the underlying widget mutably.
    pub fn widget_mut(&mut self) -> &mut SlideShow {
        &mut self.widget
    }

    /// Render the widget to a newline-joined string.
    pub fn render_to_string(&self, width: usize) -> String {
        render_to_string(&self.widget, width)
    }
}

// ===========================================================================
// Tests
// ===========================================================================
