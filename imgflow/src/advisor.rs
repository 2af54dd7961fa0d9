//! Missing-context advisory table mapping context names to producers.
//!
//! The table is data, not logic: it names the operation(s) that typically
//! produce each context so missing-context diagnostics can suggest a
//! remediation. Advisory only; nothing here blocks pipeline execution.

use parking_lot::RwLock;
use std::collections::{BTreeSet, HashMap};
use std::sync::LazyLock;

/// Advisory table from context name to producing operation names.
#[derive(Debug, Clone, Default)]
pub struct MissingContextAdvisor {
    producers: HashMap<String, BTreeSet<String>>,
}

impl MissingContextAdvisor {
    /// Creates a new empty advisor.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an advisor preloaded with the built-in producer table.
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut advisor = Self::new();
        for (context, operation) in [
            ("resolution", "decide_resolution"),
            ("resolution_decision", "decide_resolution"),
            ("resize", "resize"),
            ("blur", "blur"),
            ("sharpen", "sharpen"),
        ] {
            advisor.register_producer(context, operation);
        }
        advisor
    }

    /// Records `operation` as a producer of `context`.
    pub fn register_producer(
        &mut self,
        context: impl Into<String>,
        operation: impl Into<String>,
    ) {
        self.producers
            .entry(context.into())
            .or_default()
            .insert(operation.into());
    }

    /// Returns the known producers of a context, sorted.
    #[must_use]
    pub fn producers_for(&self, context: &str) -> Vec<String> {
        self.producers
            .get(context)
            .map(|ops| ops.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Produces remediation lines for one missing context name.
    ///
    /// One line per known producer; degrades to a generic line when no
    /// producer is known rather than failing.
    #[must_use]
    pub fn suggestion_for(&self, context: &str) -> Vec<String> {
        let producers = self.producers_for(context);
        if producers.is_empty() {
            return vec![format!("No known operation produces '{context}' context")];
        }
        producers
            .iter()
            .map(|op| format!("Run '{op}' operation to generate '{context}' context"))
            .collect()
    }

    /// Produces remediation lines for a missing-name list, input order.
    #[must_use]
    pub fn suggestions<S: AsRef<str>>(&self, missing: &[S]) -> Vec<String> {
        missing
            .iter()
            .flat_map(|name| self.suggestion_for(name.as_ref()))
            .collect()
    }
}

static ADVISOR: LazyLock<RwLock<MissingContextAdvisor>> =
    LazyLock::new(|| RwLock::new(MissingContextAdvisor::with_defaults()));

/// Records `operation` as a producer of `context` in the global table.
pub fn register_producer(context: impl Into<String>, operation: impl Into<String>) {
    ADVISOR.write().register_producer(context, operation);
}

/// Returns the known producers of a context from the global table.
#[must_use]
pub fn producers_for(context: &str) -> Vec<String> {
    ADVISOR.read().producers_for(context)
}

/// Produces remediation lines from the global table, input order.
#[must_use]
pub fn suggestions<S: AsRef<str>>(missing: &[S]) -> Vec<String> {
    ADVISOR.read().suggestions(missing)
}
