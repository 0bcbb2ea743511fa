use crate::error::{MutationError, Result};
use serde::{Deserialize, Serialize};

/// Metadata identifying one eligible mutation site, handed to the core by the
/// traversal just before an operator would rewrite the node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MutationSite {
    /// Name of the operator that found the site.
    pub operator: String,
    /// Child-index path from the root of the original tree to the node.
    pub path: Vec<usize>,
    /// Human-readable summary of the rewrite, e.g. `"True -> False"`.
    pub description: String,
}

/// Record of the single mutation performed during a pass.
///
/// The engine treats this as an opaque marker: its presence after a pass means
/// exactly one node was rewritten, its absence means the pass was a no-op.
/// The outer harness uses the embedded site metadata for reporting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivationRecord {
    pub site: MutationSite,
}

/// The decision point shared by every operator.
///
/// The traversal consults the bound core once per eligible site, in source
/// order. Returning `true` authorizes the rewrite of that site; the traversal
/// then stops descending. All per-pass mutable state lives in the core, never
/// in the operator, and a core is discarded after one pass.
pub trait MutationCore {
    fn visit_mutation_site(&mut self, site: MutationSite) -> bool;
}

/// Core that authorizes mutation of exactly the Nth eligible site.
///
/// Seeded with a zero-based occurrence index; decrements once per site until
/// it reaches zero, records the activation, and refuses every later site in
/// the same pass. If the tree has fewer than N+1 eligible sites the pass is a
/// no-op and `activation_record` stays `None`.
#[derive(Debug)]
pub struct ActivationCore {
    remaining: u64,
    activation_record: Option<ActivationRecord>,
}

impl ActivationCore {
    pub fn new(occurrence: i64) -> Result<Self> {
        if occurrence < 0 {
            return Err(MutationError::InvalidIndex(occurrence));
        }
        Ok(ActivationCore {
            remaining: occurrence as u64,
            activation_record: None,
        })
    }

    /// `Some` exactly when a mutation occurred during the pass.
    pub fn activation_record(&self) -> Option<&ActivationRecord> {
        self.activation_record.as_ref()
    }
}

impl MutationCore for ActivationCore {
    fn visit_mutation_site(&mut self, site: MutationSite) -> bool {
        if self.activation_record.is_some() {
            return false;
        }
        if self.remaining > 0 {
            self.remaining -= 1;
            return false;
        }
        tracing::debug!(
            operator = %site.operator,
            path = ?site.path,
            description = %site.description,
            "Activating mutation"
        );
        self.activation_record = Some(ActivationRecord { site });
        true
    }
}

/// Drop-in substitute for [`ActivationCore`] that never authorizes a rewrite.
///
/// Counts the eligible sites an operator finds in a tree; after a full pass,
/// `count` equals the number of distinct occurrence indices for which an
/// activation core would produce a mutant. Both cores share the same
/// traversal, so "eligible site" is defined exactly once.
#[derive(Debug, Default)]
pub struct CountingCore {
    pub count: usize,
}

impl CountingCore {
    pub fn new() -> Self {
        CountingCore::default()
    }
}

impl MutationCore for CountingCore {
    fn visit_mutation_site(&mut self, site: MutationSite) -> bool {
        tracing::trace!(
            operator = %site.operator,
            path = ?site.path,
            "Counting mutation site"
        );
        self.count += 1;
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn site(n: usize) -> MutationSite {
        MutationSite {
            operator: "test-operator".to_string(),
            path: vec![n],
            description: format!("site {}", n),
        }
    }

    #[test]
    fn test_activation_core_rejects_negative_index() {
        assert!(matches!(
            ActivationCore::new(-1),
            Err(MutationError::InvalidIndex(-1))
        ));
    }

    #[test]
    fn test_activation_core_activates_nth_site_only() {
        let mut core = ActivationCore::new(2).unwrap();

        assert!(!core.visit_mutation_site(site(0)));
        assert!(!core.visit_mutation_site(site(1)));
        assert!(core.activation_record().is_none());

        assert!(core.visit_mutation_site(site(2)));
        let record = core.activation_record().unwrap();
        assert_eq!(record.site.path, vec![2]);

        // Later sites in the same pass are never authorized.
        assert!(!core.visit_mutation_site(site(3)));
        assert!(!core.visit_mutation_site(site(4)));
        assert_eq!(core.activation_record().unwrap().site.path, vec![2]);
    }

    #[test]
    fn test_activation_core_no_op_when_too_few_sites() {
        let mut core = ActivationCore::new(5).unwrap();
        for n in 0..3 {
            assert!(!core.visit_mutation_site(site(n)));
        }
        assert!(core.activation_record().is_none());
    }

    #[test]
    fn test_counting_core_counts_without_authorizing() {
        let mut core = CountingCore::new();
        for n in 0..4 {
            assert!(!core.visit_mutation_site(site(n)));
        }
        assert_eq!(core.count, 4);
    }

    #[test]
    fn test_activation_record_serializes() {
        let record = ActivationRecord {
            site: MutationSite {
                operator: "boolean-replacer".to_string(),
                path: vec![0, 1],
                description: "True -> False".to_string(),
            },
        };

        let json = serde_json::to_string(&record).unwrap();
        let back: ActivationRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }
}
