//! Copy-on-write catalog
//!
//! All reads go through an immutable snapshot behind an `Arc`; an
//! execution binds to one snapshot at its start and sees a consistent
//! catalog for its whole duration. Writers clone the current snapshot,
//! apply the change, and swap the new snapshot in under a short write
//! lock. Snapshots are never mutated in place.

use crate::error::{CatalogError, Result};
use std::collections::BTreeMap;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::info;
use verdict_core::{ActionDef, Rule, RuleSet, Workflow};
use verdict_engine::CatalogView;

/// One immutable catalog state
#[derive(Debug, Clone, Default)]
pub struct CatalogSnapshot {
    /// Monotonically increasing catalog version, bumped on every write
    pub version: u64,
    rulesets: BTreeMap<String, Arc<RuleSet>>,
    actions: BTreeMap<String, ActionDef>,
    workflows: BTreeMap<String, Workflow>,
}

impl CatalogSnapshot {
    /// Names of all rulesets, sorted
    pub fn ruleset_names(&self) -> Vec<String> {
        self.rulesets.keys().cloned().collect()
    }

    /// Patterns of all actions, sorted
    pub fn action_patterns(&self) -> Vec<String> {
        self.actions.keys().cloned().collect()
    }

    /// Process names of all workflows, sorted
    pub fn workflow_names(&self) -> Vec<String> {
        self.workflows.keys().cloned().collect()
    }
}

impl CatalogView for CatalogSnapshot {
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

/// Thread-safe versioned catalog
#[derive(Debug, Default)]
pub struct Catalog {
    current: RwLock<Arc<CatalogSnapshot>>,
}

impl Catalog {
    /// Create an empty catalog at version 0
    pub fn new() -> Self {
        Self::default()
    }

    /// The current snapshot. Holding the returned `Arc` pins that state
    /// for as long as the caller needs it.
    pub fn snapshot(&self) -> Arc<CatalogSnapshot> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Apply a change to a clone of the current snapshot under the write
    /// lock, then swap the new snapshot in. The clone happens inside the
    /// lock so concurrent writers never lose each other's updates. A
    /// failing change leaves the catalog untouched.
    fn update<T>(
        &self,
        apply: impl FnOnce(&mut CatalogSnapshot) -> Result<T>,
    ) -> Result<T> {
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        let mut next = (**guard).clone();
        let out = apply(&mut next)?;
        next.version = guard.version + 1;
        *guard = Arc::new(next);
        Ok(out)
    }

    /// Insert or replace a ruleset. A replacement gets the stored
    /// ruleset's version plus one, regardless of the version submitted.
    /// Returns the stored ruleset version.
    pub fn upsert_ruleset(&self, mut ruleset: RuleSet) -> Result<u64> {
        ruleset.validate()?;
        self.update(|next| {
            if let Some(existing) = next.rulesets.get(&ruleset.name) {
                ruleset.version = existing.version + 1;
            }
            let version = ruleset.version;
            info!(ruleset = %ruleset.name, version, "upserting ruleset");
            next.rulesets
                .insert(ruleset.name.clone(), Arc::new(ruleset));
            Ok(version)
        })
    }

    /// Remove a ruleset
    pub fn delete_ruleset(&self, name: &str) -> Result<()> {
        self.update(|next| {
            if next.rulesets.remove(name).is_none() {
                return Err(CatalogError::not_found("ruleset", name));
            }
            info!(ruleset = %name, "deleted ruleset");
            Ok(())
        })
    }

    /// Insert or replace one rule inside an existing ruleset, bumping
    /// the ruleset version. Returns the new ruleset version.
    pub fn upsert_rule(&self, ruleset_name: &str, rule: Rule) -> Result<u64> {
        rule.validate()?;
        self.update(|next| {
            let existing = next
                .rulesets
                .get(ruleset_name)
                .ok_or_else(|| CatalogError::not_found("ruleset", ruleset_name))?;

            let mut updated = (**existing).clone();
            match updated.rules.iter_mut().find(|r| r.id == rule.id) {
                Some(slot) => *slot = rule,
                None => updated.rules.push(rule),
            }
            updated.version += 1;
            updated.validate()?;
            let version = updated.version;
            next.rulesets
                .insert(ruleset_name.to_string(), Arc::new(updated));
            Ok(version)
        })
    }

    /// Remove one rule from a ruleset, bumping the ruleset version
    pub fn delete_rule(&self, ruleset_name: &str, rule_id: &str) -> Result<u64> {
        self.update(|next| {
            let existing = next
                .rulesets
                .get(ruleset_name)
                .ok_or_else(|| CatalogError::not_found("ruleset", ruleset_name))?;

            let mut updated = (**existing).clone();
            let before = updated.rules.len();
            updated.rules.retain(|r| r.id != rule_id);
            if updated.rules.len() == before {
                return Err(CatalogError::not_found("rule", rule_id));
            }
            updated.version += 1;
            let version = updated.version;
            next.rulesets
                .insert(ruleset_name.to_string(), Arc::new(updated));
            Ok(version)
        })
    }

    /// Insert or replace an action, keyed by its pattern
    pub fn upsert_action(&self, action: ActionDef) -> Result<()> {
        action.validate()?;
        self.update(|next| {
            next.actions.insert(action.pattern.clone(), action);
            Ok(())
        })
    }

    /// Remove an action by pattern
    pub fn delete_action(&self, pattern: &str) -> Result<()> {
        self.update(|next| {
            if next.actions.remove(pattern).is_none() {
                return Err(CatalogError::not_found("action", pattern));
            }
            Ok(())
        })
    }

    /// Insert or replace a workflow, keyed by process name
    pub fn upsert_workflow(&self, workflow: Workflow) -> Result<()> {
        workflow.validate()?;
        self.update(|next| {
            next.workflows
                .insert(workflow.process_name.clone(), workflow);
            Ok(())
        })
    }

    /// Remove a workflow by process name
    pub fn delete_workflow(&self, process_name: &str) -> Result<()> {
        self.update(|next| {
            if next.workflows.remove(process_name).is_none() {
                return Err(CatalogError::not_found("workflow", process_name));
            }
            Ok(())
        })
    }
}
