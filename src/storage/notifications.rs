//! Notification state repository for JSON storage
//!
//! Persists each user's [`NotificationLog`] to notifications.json. All
//! mutations go through [`NotificationRepository::transact`], which holds the
//! write lock for the whole read-modify-write so concurrent evaluations of
//! the same user cannot lose a transition.

use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;
use std::sync::RwLock;

use crate::alerts::{AnnouncedTier, NotificationLog};
use crate::error::TrackerError;
use crate::models::{ScopeId, UserId};

use super::file_io::{read_json, write_json_atomic};

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct NotificationData {
    #[serde(default)]
    users: BTreeMap<UserId, NotificationLog>,
}

/// Repository for per-user notification state
pub struct NotificationRepository {
    path: PathBuf,
    logs: RwLock<HashMap<UserId, NotificationLog>>,
}

impl NotificationRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            logs: RwLock::new(HashMap::new()),
        }
    }

    /// Load notification state from disk
    pub fn load(&self) -> Result<(), TrackerError> {
        let file_data: NotificationData = read_json(&self.path)?;

        let mut logs = self
            .logs
            .write()
            .map_err(|e| TrackerError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        logs.clear();
        logs.extend(file_data.users);
        Ok(())
    }

    /// Save notification state to disk
    pub fn save(&self) -> Result<(), TrackerError> {
        let logs = self
            .logs
            .read()
            .map_err(|e| TrackerError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let users: BTreeMap<_, _> = logs
            .iter()
            .filter(|(_, log)| !log.is_empty())
            .map(|(user, log)| (user.clone(), log.clone()))
            .collect();

        write_json_atomic(&self.path, &NotificationData { users })
    }

    /// Run `f` against a user's log under the write lock.
    ///
    /// This is the single mutation point for notification state. A user
    /// with no log yet gets an empty one.
    pub fn transact<F, T>(&self, user_id: &UserId, f: F) -> Result<T, TrackerError>
    where
        F: FnOnce(&mut NotificationLog) -> T,
    {
        let mut logs = self
            .logs
            .write()
            .map_err(|e| TrackerError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        let log = logs.entry(user_id.clone()).or_default();
        Ok(f(log))
    }

    /// Snapshot of a user's log
    pub fn log_for(&self, user_id: &UserId) -> Result<NotificationLog, TrackerError> {
        let logs = self
            .logs
            .read()
            .map_err(|e| TrackerError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(logs.get(user_id).cloned().unwrap_or_default())
    }

    /// Last announced tier for a user's scope
    pub fn last_announced(
        &self,
        user_id: &UserId,
        scope: ScopeId,
    ) -> Result<AnnouncedTier, TrackerError> {
        Ok(self.log_for(user_id)?.last_announced(scope))
    }

    /// Delete a scope's state (its budget was removed)
    pub fn remove_scope(&self, user_id: &UserId, scope: ScopeId) -> Result<bool, TrackerError> {
        self.transact(user_id, |log| log.remove(scope))
    }
}
