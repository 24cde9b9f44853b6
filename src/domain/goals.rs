//! Health goals document

use serde::{Deserialize, Serialize};

/// Ordered list of free-text goals, stored at `goals/{uid}`
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GoalList {
    #[serde(default)]
    pub goals: Vec<String>,
}

impl GoalList {
    /// Appends a goal unless it is blank
    ///
    /// Returns `true` when the goal was added.
    pub fn push(&mut self, goal: impl Into<String>) -> bool {
        let goal = goal.into();
        if goal.trim().is_empty() {
            return false;
        }
        self.goals.push(goal);
        true
    }

    /// Removes the goal at `index`
    pub fn remove(&mut self, index: usize) -> Option<String> {
        (index < self.goals.len()).then(|| self.goals.remove(index))
    }

    pub fn len(&self) -> usize {
        self.goals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.goals.is_empty()
    }
}
