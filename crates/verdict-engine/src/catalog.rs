//! Catalog view seam
//!
//! The engine reads rulesets, actions and workflows through the
//! [`CatalogView`] trait. An execution binds to one view at start and the
//! view must stay consistent for its whole duration; the catalog crate
//! satisfies this with immutable snapshots.

use std::collections::BTreeMap;
use std::sync::Arc;
use verdict_core::{ActionDef, RuleSet, Workflow};

/// Read-only view over the rule/action/workflow catalog
pub trait CatalogView: Send + Sync {
    /// Look up a ruleset by name
    fn ruleset(&self, name: &str) -> Option<Arc<RuleSet>>;

    /// Look up an action by pattern key
    fn action(&self, pattern: &str) -> Option<ActionDef>;

    /// Look up a workflow by process name
    fn workflow(&self, process_name: &str) -> Option<Workflow>;
}

/// In-memory catalog view, used for tests and transient executions
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    rulesets: BTreeMap<String, Arc<RuleSet>>,
    actions: BTreeMap<String, ActionDef>,
    workflows: BTreeMap<String, Workflow>,
}

impl StaticCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a ruleset
    pub fn with_ruleset(mut self, ruleset: RuleSet) -> Self {
        self.rulesets.insert(ruleset.name.clone(), Arc::new(ruleset));
        self
    }

    /// Add an action
    pub fn with_action(mut self, action: ActionDef) -> Self {
        self.actions.insert(action.pattern.clone(), action);
        self
    }

    /// Add a workflow
    pub fn with_workflow(mut self, workflow: Workflow) -> Self {
        self.workflows
            .insert(workflow.process_name.clone(), workflow);
        self
    }
}

impl CatalogView for StaticCatalog {
    fn ruleset(&self, name: &str) -> Option<Arc<RuleSet>> {
        self.rulesets.get(name).cloned()
    }

    fn action(&self, pattern: &str) -> Option<ActionDef> {
        self.actions.get(pattern).cloned()
    }

    fn workflow(&self, process_name: &str) -> Option<Workflow> {
        self.workflows.get(process_name).cloned()
    }
}

/// A catalog view layering transient artifacts over a base view.
///
/// Used for decision-table executions: the derived ruleset and its
/// synthesized actions are visible only to the current execution while
/// explicit pattern references still resolve from the base catalog.
pub struct OverlayCatalog {
    base: Arc<dyn CatalogView>,
    overlay: StaticCatalog,
}

impl OverlayCatalog {
    /// Create an overlay over a base view
    pub fn new(base: Arc<dyn CatalogView>) -> Self {
        Self {
            base,
            overlay: StaticCatalog::new(),
        }
    }

    /// Add a transient ruleset
    pub fn with_ruleset(mut self, ruleset: RuleSet) -> Self {
        self.overlay = self.overlay.with_ruleset(ruleset);
        self
    }

    /// Add a transient action
    pub fn with_action(mut self, action: ActionDef) -> Self {
        self.overlay = self.overlay.with_action(action);
        self
    }

    /// Add several transient actions
    pub fn with_actions(mut self, actions: Vec<ActionDef>) -> Self {
        for action in actions {
            self.overlay = self.overlay.with_action(action);
        }
        self
    }
}

impl CatalogView for OverlayCatalog {
    fn ruleset(&self, name: &str) -> Option<Arc<RuleSet>> {
        self.overlay.ruleset(name).or_else(|| self.base.ruleset(name))
    }

    fn action(&self, pattern: &str) -> Option<ActionDef> {
        self.overlay
            .action(pattern)
            .or_else(|| self.base.action(pattern))
    }

    fn workflow(&self, process_name: &str) -> Option<Workflow> {
        self.overlay
            .workflow(process_name)
            .or_else(|| self.base.workflow(process_name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use verdict_core::Value;

    #[test]
    fn test_static_catalog_lookup() {
        let catalog = StaticCatalog::new()
            .with_ruleset(RuleSet::new("fraud"))
            .with_action(ActionDef::literal("notify", Value::Bool(true)));

        assert!(catalog.ruleset("fraud").is_some());
        assert!(catalog.ruleset("missing").is_none());
        assert!(catalog.action("notify").is_some());
        assert!(catalog.workflow("nope").is_none());
    }

    #[test]
    fn test_overlay_prefers_transient_artifacts() {
        let base = StaticCatalog::new()
            .with_action(ActionDef::literal("shared", Value::Number(1.0)))
            .with_action(ActionDef::literal("base_only", Value::Number(2.0)));

        let overlay = OverlayCatalog::new(Arc::new(base))
            .with_action(ActionDef::literal("shared", Value::Number(9.0)));

        let shared = overlay.action("shared").unwrap();
        assert_eq!(
            shared.effect,
            verdict_core::EffectSpec::Literal {
                value: Value::Number(9.0)
            }
        );
        assert!(overlay.action("base_only").is_some());
        assert!(overlay.action("missing").is_none());
    }
}
