//! Ordered, name-checked middleware groups.

use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::sync::Arc;

use tracing::warn;

use crate::error::{MiddlewareError, MiddlewareResult};

/// A named wrapper attached to an activity group.
pub trait Middleware: Send + Sync + fmt::Debug {
    /// Name that must be unique within its group.
    fn name(&self) -> &str;
}

/// Ordered middleware sequence of one activity group.
pub type MiddlewareGroup = Vec<Arc<dyn Middleware>>;

/// Validated mapping from activity group to middleware sequence.
#[derive(Clone, Debug, Default)]
pub struct MiddlewarePipeline {
    groups: BTreeMap<String, MiddlewareGroup>,
}

impl MiddlewarePipeline {
    /// Creates an empty pipeline.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates and assembles a pipeline.
    ///
    /// Validation stops at the first problem; nothing is dropped or
    /// reordered.
    ///
    /// # Errors
    ///
    /// Returns [`MiddlewareError::DuplicateName`] when a group holds two
    /// entries with the same name, [`MiddlewareError::EmptyName`] for a
    /// nameless entry and [`MiddlewareError::DuplicateGroup`] when a group key
    /// repeats.
    pub fn from_groups<K>(groups: impl IntoIterator<Item = (K, MiddlewareGroup)>) -> MiddlewareResult<Self>
    where
        K: Into<String>,
    {
        let mut assembled = BTreeMap::new();
        for (group, entries) in groups {
            let group = group.into();
            validate_group(&group, &entries)?;
            if assembled.contains_key(&group) {
                return Err(MiddlewareError::DuplicateGroup { group });
            }
            assembled.insert(group, entries);
        }
        Ok(Self { groups: assembled })
    }

    /// Returns the full mapping as supplied.
    #[must_use]
    pub fn middleware(&self) -> &BTreeMap<String, MiddlewareGroup> {
        &self.groups
    }

    /// Returns the sequence attached to one group.
    #[must_use]
    pub fn group(&self, name: &str) -> Option<&[Arc<dyn Middleware>]> {
        self.groups.get(name).map(Vec::as_slice)
    }

    /// Returns `true` when no group is attached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

fn validate_group(group: &str, entries: &[Arc<dyn Middleware>]) -> MiddlewareResult<()> {
    let mut seen = HashSet::with_capacity(entries.len());
    for entry in entries {
        let name = entry.name();
        if name.trim().is_empty() {
            warn!(group, "rejecting nameless middleware");
            return Err(MiddlewareError::EmptyName {
                group: group.to_owned(),
            });
        }
        if !seen.insert(name) {
            warn!(group, middleware = name, "rejecting duplicate middleware name");
            return Err(MiddlewareError::DuplicateName {
                group: group.to_owned(),
                name: name.to_owned(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Named(&'static str);

    impl Middleware for Named {
        fn name(&self) -> &str {
            self.0
        }
    }

    fn entry(name: &'static str) -> Arc<dyn Middleware> {
        Arc::new(Named(name))
    }

    #[test]
    fn distinct_names_are_accepted() {
        let pipeline = MiddlewarePipeline::from_groups([(
            "test",
            vec![entry("Middleware1"), entry("Middleware2")],
        )])
        .unwrap();

        let group = pipeline.group("test").expect("group");
        let names: Vec<_> = group.iter().map(|m| m.name()).collect();
        assert_eq!(names, ["Middleware1", "Middleware2"]);
        assert_eq!(pipeline.middleware().len(), 1);
    }

    #[test]
    fn duplicate_names_fail() {
        let err = MiddlewarePipeline::from_groups([(
            "test",
            vec![entry("Middleware1"), entry("Middleware1")],
        )])
        .expect_err("duplicate should fail");

        assert_eq!(
            err,
            MiddlewareError::DuplicateName {
                group: "test".into(),
                name: "Middleware1".into(),
            }
        );
    }

    #[test]
    fn same_name_in_different_groups_is_fine() {
        let pipeline = MiddlewarePipeline::from_groups([
            ("read", vec![entry("Store")]),
            ("write", vec![entry("Store")]),
        ])
        .unwrap();
        assert_eq!(pipeline.middleware().len(), 2);
    }

    #[test]
    fn repeated_group_and_empty_name_fail() {
        let err = MiddlewarePipeline::from_groups([
            ("a", vec![entry("x")]),
            ("a", vec![entry("y")]),
        ])
        .expect_err("repeated group");
        assert!(matches!(err, MiddlewareError::DuplicateGroup { .. }));

        let err = MiddlewarePipeline::from_groups([("a", vec![entry(" ")])])
            .expect_err("empty name");
        assert!(matches!(err, MiddlewareError::EmptyName { .. }));
    }
}
