//! Progressive-enhancement layer for freshly rendered panels
//!
//! Panels are plain markup until something binds behaviour to their
//! controls. The [`ControlRegistry`] does that for mouse input: a panel's
//! controls only resolve clicks once the panel has been processed.

use crate::model::action_panel::{PanelControl, PanelMarkup};
use crate::model::table::RowId;
use std::collections::HashMap;

/// Binds behaviour to newly inserted panel markup.
///
/// Implementations must be idempotent and accept panels with nothing to bind.
pub trait Enhance {
    fn process(&mut self, panel: &PanelMarkup);
}

/// Registry of panel controls that accept mouse clicks
#[derive(Debug, Default)]
pub struct ControlRegistry {
    bound: HashMap<RowId, Vec<PanelControl>>,
}

impl ControlRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve a click on `control` inside the panel owned by `owner`
    pub fn resolve(&self, owner: RowId, control: PanelControl) -> Option<PanelControl> {
        self.bound
            .get(&owner)
            .filter(|controls| controls.contains(&control))
            .map(|_| control)
    }

    #[cfg(test)]
    pub fn is_bound(&self, owner: RowId) -> bool {
        self.bound.contains_key(&owner)
    }

    /// Drop bindings for a row that left the table
    pub fn forget(&mut self, owner: RowId) {
        self.bound.remove(&owner);
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.bound.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.bound.is_empty()
    }
}

impl Enhance for ControlRegistry {
    fn process(&mut self, panel: &PanelMarkup) {
        self.bound.insert(panel.owner, panel.controls().to_vec());
        tracing::trace!(panel = %panel.dom_id, "panel controls bound");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::action_panel::render_panel;
    use crate::model::context::PageContext;
    use crate::model::table::{RecordKey, Row};
    use crate::model::viewport::ViewportClass;

    fn panel(id: usize) -> PanelMarkup {
        let row = Row::new(RowId(id), RecordKey::parse(&id.to_string()), vec![]);
        render_panel(&row, &PageContext::default(), ViewportClass::Mobile, 2)
    }

    #[test]
    fn test_unprocessed_panel_does_not_resolve() {
        let registry = ControlRegistry::new();
        assert!(registry.resolve(RowId(1), PanelControl::Delete).is_none());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_process_binds_controls() {
        let mut registry = ControlRegistry::new();
        registry.process(&panel(1));

        assert!(registry.is_bound(RowId(1)));
        assert_eq!(
            registry.resolve(RowId(1), PanelControl::Edit),
            Some(PanelControl::Edit)
        );
        assert_eq!(
            registry.resolve(RowId(1), PanelControl::Delete),
            Some(PanelControl::Delete)
        );
    }

    #[test]
    fn test_process_is_idempotent() {
        let mut registry = ControlRegistry::new();
        let p = panel(2);
        registry.process(&p);
        registry.process(&p);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_forget_unbinds() {
        let mut registry = ControlRegistry::new();
        registry.process(&panel(3));
        registry.forget(RowId(3));
        assert!(!registry.is_bound(RowId(3)));
    }
}
