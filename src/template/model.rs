//! Template data model: parsed widget structure.

/// What activating a control does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlAction {
    /// Step to the previous slide.
    Previous,
    /// Step to the next slide.
    Next,
}

/// A navigation control declared by the template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlDef {
    /// Unique control id (without the `#`).
    pub id: String,
    /// Display label, e.g. `"<"`.
    pub label: String,
    /// The action this control triggers.
    pub action: ControlAction,
}

/// A parsed widget template: one slot for projected panels plus the
/// declared navigation controls.
///
/// Loaded once per widget type (see [`crate::registry::Registry`]) and cloned
/// into each instance at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    /// Id of the slot the panels are projected into (without the `#`).
    pub slot_id: String,
    /// Declared controls, in source order.
    pub controls: Vec<ControlDef>,
}

impl Template {
    /// Look up a control by id.
    pub fn control(&self, id: &str) -> Option<&ControlDef> {
        self.controls.iter().find(|c| c.id == id)
    }

    /// The first control declared for the given action, if any.
    pub fn control_for(&self, action: ControlAction) -> Option<&ControlDef> {
        self.controls.iter().find(|c| c.action == action)
    }

    /// The label of the first control declared for the given action.
    pub fn label_for(&self, action: ControlAction) -> Option<&str> {
        self.control_for(action).map(|c| c.label.as_str())
    }
}
