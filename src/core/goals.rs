//! Goals
//!
//! Every change rewrites the whole `goals/{uid}` document.

use crate::adapters::storage::{read_document, write_document, DocumentStore};
use crate::domain::ids::{DocumentPath, UserId};
use crate::domain::{AppError, GoalList, Result};
use std::sync::Arc;

/// Manages the goal list of users
pub struct GoalsService {
    store: Arc<dyn DocumentStore>,
}

impl GoalsService {
    /// Create a new goals service
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Current goals; empty when none were saved
    pub async fn list(&self, user_id: &UserId) -> Result<GoalList> {
        let path = DocumentPath::goals(user_id);
        Ok(read_document(self.store.as_ref(), &path)
            .await?
            .unwrap_or_default())
    }

    /// Append `goal` and save
    ///
    /// Blank input is ignored and nothing is written. The goal is stored as
    /// entered, without trimming.
    pub async fn add(&self, user_id: &UserId, goal: &str) -> Result<GoalList> {
        let mut goals = self.list(user_id).await?;
        if !goals.push(goal) {
            tracing::debug!(uid = %user_id, "Ignoring blank goal");
            return Ok(goals);
        }

        self.save(user_id, &goals).await?;
        Ok(goals)
    }

    /// Remove the goal at `index` and save
    ///
    /// # Errors
    ///
    /// Returns `Validation` when `index` is out of range.
    pub async fn remove(&self, user_id: &UserId, index: usize) -> Result<GoalList> {
        let mut goals = self.list(user_id).await?;
        if goals.remove(index).is_none() {
            return Err(AppError::Validation(format!(
                "No goal at position {index} (have {})",
                goals.len()
            )));
        }

        self.save(user_id, &goals).await?;
        Ok(goals)
    }

    async fn save(&self, user_id: &UserId, goals: &GoalList) -> Result<()> {
        write_document(self.store.as_ref(), &DocumentPath::goals(user_id), goals).await?;
        tracing::info!(uid = %user_id, goals = goals.len(), "Goals saved");
        Ok(())
    }
}
