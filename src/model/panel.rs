//! Row action panel controller
//!
//! Tracks which record (if any) has its action panel open. At most one panel
//! exists per table: opening a panel for another record always removes the
//! current one first.

use super::action_panel::{render_panel, PanelMarkup};
use super::context::PageContext;
use super::table::{ActionPanel, ClickTarget, Row, RowId, Table};
use super::viewport::ViewportClass;
use crate::services::enhance::Enhance;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// How a mobile row click produces its panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PanelStrategy {
    /// Render a fresh panel on every open
    #[default]
    Dynamic,
    /// Render every panel once at load and toggle its visibility
    Prerendered,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PanelState {
    #[default]
    Closed,
    Open(RowId),
}

/// Result of feeding a click to the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelTransition {
    Opened(RowId),
    Closed(RowId),
    Replaced { from: RowId, to: RowId },
    Ignored,
}

#[derive(Debug, Default)]
pub struct ActionPanelController {
    state: PanelState,
    strategy: PanelStrategy,
    prerendered: HashMap<RowId, PanelMarkup>,
}

impl ActionPanelController {
    pub fn new(strategy: PanelStrategy) -> Self {
        Self {
            state: PanelState::Closed,
            strategy,
            prerendered: HashMap::new(),
        }
    }

    #[cfg(test)]
    pub fn state(&self) -> PanelState {
        self.state
    }

    pub fn strategy(&self) -> PanelStrategy {
        self.strategy
    }

    pub fn open_owner(&self) -> Option<RowId> {
        match self.state {
            PanelState::Open(id) => Some(id),
            PanelState::Closed => None,
        }
    }

    /// Render hidden panels up front when using the prerendered strategy
    pub fn prepare(
        &mut self,
        table: &Table,
        context: &PageContext,
        mut enhancer: Option<&mut dyn Enhance>,
    ) {
        if self.strategy != PanelStrategy::Prerendered {
            return;
        }

        let colspan = table.columns.len();
        for row in table.records() {
            let markup = render_panel(row, context, ViewportClass::Mobile, colspan);
            if let Some(enhancer) = enhancer.as_deref_mut() {
                enhancer.process(&markup);
            }
            self.prerendered.insert(row.id, markup);
        }
        tracing::debug!(panels = self.prerendered.len(), "action panels prerendered");
    }

    /// Handle a click on a table row.
    ///
    /// Only mobile viewports open panels from row clicks, and clicks inside
    /// the panel row itself never cause a transition.
    pub fn click(
        &mut self,
        table: &mut Table,
        target: ClickTarget,
        context: &PageContext,
        viewport: ViewportClass,
        enhancer: Option<&mut dyn Enhance>,
    ) -> PanelTransition {
        if !viewport.is_mobile() {
            return PanelTransition::Ignored;
        }
        let ClickTarget::Record(id) = target else {
            return PanelTransition::Ignored;
        };

        let transition = match self.state {
            PanelState::Open(current) if current == id => {
                self.close(table);
                PanelTransition::Closed(id)
            }
            PanelState::Open(current) => {
                self.close(table);
                if self.open(table, id, context, enhancer) {
                    PanelTransition::Replaced { from: current, to: id }
                } else {
                    PanelTransition::Closed(current)
                }
            }
            PanelState::Closed => {
                if self.open(table, id, context, enhancer) {
                    PanelTransition::Opened(id)
                } else {
                    PanelTransition::Ignored
                }
            }
        };

        tracing::debug!(?transition, "row clicked");
        transition
    }

    fn open(
        &mut self,
        table: &mut Table,
        id: RowId,
        context: &PageContext,
        enhancer: Option<&mut dyn Enhance>,
    ) -> bool {
        let Some(row) = table.record(id) else {
            return false;
        };

        let markup = match self.prerendered.get(&id) {
            Some(markup) if self.strategy == PanelStrategy::Prerendered => markup.clone(),
            _ => {
                let markup = render_panel(row, context, ViewportClass::Mobile, table.columns.len());
                if let Some(enhancer) = enhancer {
                    enhancer.process(&markup);
                }
                markup
            }
        };

        if table.insert_panel(ActionPanel { owner: id, markup }) {
            self.state = PanelState::Open(id);
            true
        } else {
            false
        }
    }

    /// Close the open panel, returning its former owner
    pub fn close(&mut self, table: &mut Table) -> Option<RowId> {
        table.remove_panel();
        let owner = self.open_owner();
        self.state = PanelState::Closed;
        owner
    }

    /// A delete for `id` succeeded: drop the record and any panel it owns
    pub fn record_deleted(&mut self, table: &mut Table, id: RowId) -> Option<Row> {
        let removed = table.remove_record(id);
        if self.state == PanelState::Open(id) {
            self.state = PanelState::Closed;
        }
        self.prerendered.remove(&id);
        removed
    }

    /// Desktop layouts show actions inline, so a stacked panel is closed
    pub fn viewport_changed(&mut self, table: &mut Table, viewport: ViewportClass) -> Option<RowId> {
        if viewport.is_mobile() {
            None
        } else {
            self.close(table)
        }
    }

    /// Close the panel when its owner is no longer displayed
    pub fn retain_visible<F>(&mut self, table: &mut Table, is_visible: F) -> Option<RowId>
    where
        F: Fn(RowId) -> bool,
    {
        match self.state {
            PanelState::Open(id) if !is_visible(id) => self.close(table),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::table::tests::create_test_table;
    use crate::model::table::TableRow;
    use crate::services::enhance::ControlRegistry;

    fn sample() -> Table {
        create_test_table(&[
            ("1", &["Carol", "10", "Kitchen"]),
            ("2", &["Alice", "2", "Garden"]),
            ("3", &["Bob", "7", "Driving"]),
        ])
    }

    fn panel_count(table: &Table) -> usize {
        table.rows().iter().filter(|r| r.is_panel()).count()
    }

    fn click(
        controller: &mut ActionPanelController,
        table: &mut Table,
        target: ClickTarget,
    ) -> PanelTransition {
        controller.click(table, target, &PageContext::default(), ViewportClass::Mobile, None)
    }

    #[test]
    fn test_click_opens_panel_after_row() {
        let mut table = sample();
        let mut controller = ActionPanelController::new(PanelStrategy::Dynamic);

        let transition = click(&mut controller, &mut table, ClickTarget::Record(RowId(0)));

        assert_eq!(transition, PanelTransition::Opened(RowId(0)));
        assert_eq!(controller.state(), PanelState::Open(RowId(0)));
        assert!(matches!(table.rows()[1], TableRow::Panel(ref p) if p.owner == RowId(0)));
    }

    #[test]
    fn test_second_click_on_owner_closes() {
        let mut table = sample();
        let mut controller = ActionPanelController::new(PanelStrategy::Dynamic);

        click(&mut controller, &mut table, ClickTarget::Record(RowId(1)));
        let transition = click(&mut controller, &mut table, ClickTarget::Record(RowId(1)));

        assert_eq!(transition, PanelTransition::Closed(RowId(1)));
        assert_eq!(controller.state(), PanelState::Closed);
        assert_eq!(panel_count(&table), 0);
    }

    #[test]
    fn test_other_row_replaces_panel() {
        let mut table = sample();
        let mut controller = ActionPanelController::new(PanelStrategy::Dynamic);

        click(&mut controller, &mut table, ClickTarget::Record(RowId(0)));
        let transition = click(&mut controller, &mut table, ClickTarget::Record(RowId(2)));

        assert_eq!(
            transition,
            PanelTransition::Replaced { from: RowId(0), to: RowId(2) }
        );
        assert_eq!(panel_count(&table), 1);
        assert_eq!(table.panel().unwrap().owner, RowId(2));
    }

    #[test]
    fn test_never_two_panels_across_click_sequences() {
        let mut table = sample();
        let mut controller = ActionPanelController::new(PanelStrategy::Dynamic);
        let sequence = [0, 1, 1, 2, 0, 2, 2, 1, 0];

        for id in sequence {
            click(&mut controller, &mut table, ClickTarget::Record(RowId(id)));
            assert!(panel_count(&table) <= 1);
        }
    }

    #[test]
    fn test_click_inside_panel_is_ignored() {
        let mut table = sample();
        let mut controller = ActionPanelController::new(PanelStrategy::Dynamic);

        click(&mut controller, &mut table, ClickTarget::Record(RowId(0)));
        let target = table.rows()[1].target();
        assert_eq!(target, ClickTarget::Panel(RowId(0)));

        let transition = click(&mut controller, &mut table, target);
        assert_eq!(transition, PanelTransition::Ignored);
        assert_eq!(controller.state(), PanelState::Open(RowId(0)));
    }

    #[test]
    fn test_desktop_clicks_do_not_open_panels() {
        let mut table = sample();
        let mut controller = ActionPanelController::new(PanelStrategy::Dynamic);

        let transition = controller.click(
            &mut table,
            ClickTarget::Record(RowId(0)),
            &PageContext::default(),
            ViewportClass::Desktop,
            None,
        );

        assert_eq!(transition, PanelTransition::Ignored);
        assert_eq!(panel_count(&table), 0);
    }

    #[test]
    fn test_dynamic_open_registers_controls() {
        let mut table = sample();
        let mut controller = ActionPanelController::new(PanelStrategy::Dynamic);
        let mut registry = ControlRegistry::new();

        controller.click(
            &mut table,
            ClickTarget::Record(RowId(2)),
            &PageContext::default(),
            ViewportClass::Mobile,
            Some(&mut registry),
        );

        assert!(registry.is_bound(RowId(2)));
    }

    #[test]
    fn test_prerendered_panels_are_bound_at_load() {
        let mut table = sample();
        let mut controller = ActionPanelController::new(PanelStrategy::Prerendered);
        let mut registry = ControlRegistry::new();

        controller.prepare(&table, &PageContext::default(), Some(&mut registry));
        assert_eq!(registry.len(), 3);

        let transition = click(&mut controller, &mut table, ClickTarget::Record(RowId(1)));
        assert_eq!(transition, PanelTransition::Opened(RowId(1)));
        assert_eq!(table.panel().unwrap().markup.dom_id, "actions-2");

        click(&mut controller, &mut table, ClickTarget::Record(RowId(0)));
        assert_eq!(panel_count(&table), 1);
    }

    #[test]
    fn test_record_deleted_closes_panel() {
        let mut table = sample();
        let mut controller = ActionPanelController::new(PanelStrategy::Dynamic);

        click(&mut controller, &mut table, ClickTarget::Record(RowId(1)));
        let removed = controller.record_deleted(&mut table, RowId(1));

        assert!(removed.is_some());
        assert_eq!(controller.state(), PanelState::Closed);
        assert_eq!(table.record_count(), 2);
        assert_eq!(panel_count(&table), 0);
    }

    #[test]
    fn test_switch_to_desktop_closes_panel() {
        let mut table = sample();
        let mut controller = ActionPanelController::new(PanelStrategy::Dynamic);
        click(&mut controller, &mut table, ClickTarget::Record(RowId(0)));

        assert_eq!(controller.viewport_changed(&mut table, ViewportClass::Mobile), None);
        assert_eq!(
            controller.viewport_changed(&mut table, ViewportClass::Desktop),
            Some(RowId(0))
        );
        assert_eq!(panel_count(&table), 0);
    }

    #[test]
    fn test_hidden_owner_closes_panel() {
        let mut table = sample();
        let mut controller = ActionPanelController::new(PanelStrategy::Dynamic);
        click(&mut controller, &mut table, ClickTarget::Record(RowId(0)));

        assert_eq!(controller.retain_visible(&mut table, |_| true), None);
        assert_eq!(
            controller.retain_visible(&mut table, |id| id != RowId(0)),
            Some(RowId(0))
        );
        assert_eq!(controller.state(), PanelState::Closed);
    }
}
