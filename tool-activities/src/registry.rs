//! Registry indexing a tool's declared activities by name.

use std::collections::HashMap;

use tool_primitives::ActivityName;
use tracing::trace;

use crate::activity::Activity;
use crate::error::{ActivityError, ActivityResult};

/// Ordered, name-indexed set of activities belonging to one tool.
///
/// Activities keep their declaration order, so repeated listings of the same
/// registry are identical.
#[derive(Clone, Debug, Default)]
pub struct ActivityRegistry {
    activities: Vec<Activity>,
    index: HashMap<ActivityName, usize>,
}

impl ActivityRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a registry from the declared activities.
    ///
    /// # Errors
    ///
    /// Returns [`ActivityError::DuplicateActivity`] if two activities share a
    /// name.
    pub fn from_activities(activities: impl IntoIterator<Item = Activity>) -> ActivityResult<Self> {
        let mut registry = Self::new();
        for activity in activities {
            registry.register(activity)?;
        }
        Ok(registry)
    }

    /// Appends an activity.
    ///
    /// # Errors
    ///
    /// Returns [`ActivityError::DuplicateActivity`] if the name is already
    /// present.
    pub fn register(&mut self, activity: Activity) -> ActivityResult<()> {
        let name = activity.name().clone();
        if self.index.contains_key(&name) {
            return Err(ActivityError::DuplicateActivity {
                name: name.to_string(),
            });
        }

        trace!(activity = %name, "activity registered");
        self.index.insert(name, self.activities.len());
        self.activities.push(activity);
        Ok(())
    }

    /// Returns every activity in declaration order.
    #[must_use]
    pub fn activities(&self) -> &[Activity] {
        &self.activities
    }

    /// Returns the activity with exactly the supplied name.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&Activity> {
        self.index.get(name).map(|&position| &self.activities[position])
    }

    /// Returns the activity names in declaration order.
    #[must_use]
    pub fn names(&self) -> Vec<&ActivityName> {
        self.activities.iter().map(Activity::name).collect()
    }

    /// Returns the number of registered activities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.activities.len()
    }

    /// Returns `true` when no activity is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.activities.is_empty()
    }
}
