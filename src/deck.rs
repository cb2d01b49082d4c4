//! Slide registry: the live, possibly-changing set of projected panels.
//!
//! Panels live in a slotmap arena so removal never invalidates other panels'
//! ids; display order is a separate id list. Mutations record [`DeckEvent`]s
//! that the widget drains to re-validate its current index; the deck itself
//! never touches the selection.

use slotmap::{new_key_type, SlotMap};

new_key_type! {
    /// Unique identifier for a registered panel. Copy, lightweight (u64).
    pub struct PanelId;
}

// ---------------------------------------------------------------------------
// Panel
// ---------------------------------------------------------------------------

/// One child panel the widget can display.
///
/// The core only reads the panel count and toggles the `visible` marker;
/// content and classes are carried for the consumer and for styling
/// collaborators.
#[derive(Debug, Clone)]
pub struct Panel {
    content: String,
    classes: Vec<String>,
    visible: bool,
}

impl Panel {
    /// Create a panel with the given text content.
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            classes: Vec::new(),
            visible: false,
        }
    }

    /// Add a class (builder).
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        let class = class.into();
        if !self.classes.contains(&class) {
            self.classes.push(class);
        }
        self
    }

    /// The panel's text content.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Whether this panel is the one currently shown.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Check whether this panel has a given class.
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Add a class. No-op if already present.
    pub fn add_class(&mut self, class: &str) {
        if !self.has_class(class) {
            self.classes.push(class.to_string());
        }
    }

    /// Remove a class. No-op if not present.
    pub fn remove_class(&mut self, class: &str) {
        self.classes.retain(|c| c != class);
    }
}

// ---------------------------------------------------------------------------
// DeckEvent
// ---------------------------------------------------------------------------

/// Change notification recorded when the panel set is mutated at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeckEvent {
    /// A panel was added.
    Added(PanelId),
    /// A panel was removed.
    Removed(PanelId),
}

// ---------------------------------------------------------------------------
// Deck
// ---------------------------------------------------------------------------

/// The panel collection: arena storage, display order, pending change events.
#[derive(Debug, Default)]
pub struct Deck {
    panels: SlotMap<PanelId, Panel>,
    order: Vec<PanelId>,
    pending: Vec<DeckEvent>,
}

impl Deck {
    /// Create an empty deck.
    pub fn new() -> Self {
        Self::default()
    }

    /// The live panel count, computed from the order list, never cached.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether the deck has no panels.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Append a panel, recording an `Added` event.
    pub fn push(&mut self, panel: Panel) -> PanelId {
        let id = self.panels.insert(panel);
        self.order.push(id);
        self.pending.push(DeckEvent::Added(id));
        id
    }

    /// Insert a panel at a display position, recording an `Added` event.
    ///
    /// Positions past the end append.
    pub fn insert_at(&mut self, index: usize, panel: Panel) -> PanelId {
        let id = self.panels.insert(panel);
        let index = index.min(self.order.len());
        self.order.insert(index, id);
        self.pending.push(DeckEvent::Added(id));
        id
    }

    /// Remove a panel by id, recording a `Removed` event.
    ///
    /// Returns the removed panel, or `None` for a stale id.
    pub fn remove(&mut self, id: PanelId) -> Option<Panel> {
        let panel = self.panels.remove(id)?;
        self.order.retain(|&p| p != id);
        self.pending.push(DeckEvent::Removed(id));
        Some(panel)
    }

    /// Remove the panel at a display position, recording a `Removed` event.
    pub fn remove_at(&mut self, index: usize) -> Option<Panel> {
        let id = *self.order.get(index)?;
        self.remove(id)
    }

    /// Immutable access to a panel.
    pub fn get(&self, id: PanelId) -> Option<&Panel> {
        self.panels.get(id)
    }

    /// Mutable access to a panel.
    pub fn get_mut(&mut self, id: PanelId) -> Option<&mut Panel> {
        self.panels.get_mut(id)
    }

    /// The id of the panel at a display position.
    pub fn panel_at(&self, index: usize) -> Option<PanelId> {
        self.order.get(index).copied()
    }

    /// The display position of a panel.
    pub fn index_of(&self, id: PanelId) -> Option<usize> {
        self.order.iter().position(|&p| p == id)
    }

    /// Panel ids in display order.
    pub fn ids(&self) -> &[PanelId] {
        &self.order
    }

    /// Iterate panels in display order.
    pub fn iter(&self) -> impl Iterator<Item = (PanelId, &Panel)> {
        self.order.iter().filter_map(|&id| {
            self.panels.get(id).map(|panel| (id, panel))
        })
    }

    // ── Visibility markers ───────────────────────────────────────────

    /// Clear the visible marker on every panel.
    pub fn clear_visible(&mut self) {
        for id in &self.order {
            if let Some(panel) = self.panels.get_mut(*id) {
                panel.visible = false;
            }
        }
    }

    /// Set the visible marker on the panel at a display position.
    ///
    /// Returns `false` (and changes nothing) if the position is out of range.
    pub fn set_visible_at(&mut self, index: usize, visible: bool) -> bool {
        let Some(id) = self.panel_at(index) else {
            return false;
        };
        match self.panels.get_mut(id) {
            Some(panel) => {
                panel.visible = visible;
                true
            }
            None => false,
        }
    }

    /// The display position of the currently visible panel, if any.
    pub fn visible_index(&self) -> Option<usize> {
        self.order
            .iter()
            .position(|&id| self.panels.get(id).is_some_and(Panel::is_visible))
    }

    /// How many panels carry the visible marker.
    pub fn visible_count(&self) -> usize {
        self.order
            .iter()
            .filter(|&&id| self.panels.get(id).is_some_and(Panel::is_visible))
            .count()
    }

    // ── Change notification ──────────────────────────────────────────

    /// Drain and return all pending change events.
    pub fn pending_events(&mut self) -> Vec<DeckEvent> {
        std::mem::take(&mut self.pending)
    }

    /// Whether any change events are pending.
    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }
}

// ===========================================================================
// Tests
// ===========================================================================
