//! Notification deduplication
//!
//! Remembers, per scope, the most severe tier already announced so the same
//! threshold crossing is surfaced once. Dropping back to Normal clears the
//! memory silently; a later crossing notifies again.
//!
//! ```text
//!  stored \ new   Normal         Warning          Alert
//!  None           -              notify ->Warning notify ->Alert
//!  Warning        reset ->None   -                notify ->Alert
//!  Alert          reset ->None   -                -
//! ```

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::threshold::Tier;
use crate::models::ScopeId;

/// The most severe tier already announced for a scope
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AnnouncedTier {
    #[default]
    None,
    Warning,
    Alert,
}

impl From<Tier> for AnnouncedTier {
    fn from(tier: Tier) -> Self {
        match tier {
            Tier::Normal => Self::None,
            Tier::Warning => Self::Warning,
            Tier::Alert => Self::Alert,
        }
    }
}

/// Pure transition table: `(should_notify, next_stored)`
pub fn transition(stored: AnnouncedTier, new_tier: Tier) -> (bool, AnnouncedTier) {
    match (stored, new_tier) {
        (_, Tier::Normal) => (false, AnnouncedTier::None),
        (AnnouncedTier::None, tier) => (true, tier.into()),
        (AnnouncedTier::Warning, Tier::Alert) => (true, AnnouncedTier::Alert),
        (stored, _) => (false, stored),
    }
}

/// Announced state of one scope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationState {
    pub scope_id: ScopeId,
    pub last_announced: AnnouncedTier,
    /// Last time `last_announced` changed
    pub updated_at: DateTime<Utc>,
}

impl NotificationState {
    /// Fresh state for a scope that has never been evaluated
    pub fn new(scope_id: ScopeId) -> Self {
        Self {
            scope_id,
            last_announced: AnnouncedTier::None,
            updated_at: Utc::now(),
        }
    }
}

/// Outcome of feeding a newly computed tier to the state machine
#[derive(Debug, Clone, PartialEq)]
pub struct Advance {
    pub should_notify: bool,
    pub state: NotificationState,
}

/// Advance one scope's state with a newly computed tier.
///
/// A missing prior state is treated as `None`. The returned state is
/// unchanged (including its timestamp) when the stored tier does not move,
/// so repeating a call with the same tier is a no-op.
pub fn advance(scope_id: ScopeId, new_tier: Tier, state: Option<&NotificationState>) -> Advance {
    let current = state
        .cloned()
        .unwrap_or_else(|| NotificationState::new(scope_id));

    let (should_notify, next) = transition(current.last_announced, new_tier);

    let state = if next == current.last_announced {
        current
    } else {
        NotificationState {
            scope_id,
            last_announced: next,
            updated_at: Utc::now(),
        }
    };

    Advance {
        should_notify,
        state,
    }
}

/// Every scope's announced state for one user
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NotificationLog {
    states: BTreeMap<ScopeId, NotificationState>,
}

impl NotificationLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self, scope_id: ScopeId) -> Option<&NotificationState> {
        self.states.get(&scope_id)
    }

    /// Last announced tier, `None` for unknown scopes
    pub fn last_announced(&self, scope_id: ScopeId) -> AnnouncedTier {
        self.state(scope_id)
            .map(|s| s.last_announced)
            .unwrap_or_default()
    }

    /// Record a newly computed tier. Returns the tier to announce, if any.
    pub fn record(&mut self, scope_id: ScopeId, new_tier: Tier) -> Option<Tier> {
        let Advance {
            should_notify,
            state,
        } = advance(scope_id, new_tier, self.states.get(&scope_id));

        if state.last_announced != self.last_announced(scope_id) {
            tracing::debug!(
                scope = %scope_id,
                from = ?self.last_announced(scope_id),
                to = ?state.last_announced,
                "Notification state changed"
            );
        }
        self.states.insert(scope_id, state);

        should_notify.then_some(new_tier)
    }

    /// Forget what was announced so the next crossing notifies again
    pub fn reset(&mut self, scope_id: ScopeId) {
        if let Some(state) = self.states.get_mut(&scope_id) {
            state.last_announced = AnnouncedTier::None;
            state.updated_at = Utc::now();
        }
    }

    /// Drop a scope entirely (its budget was removed)
    pub fn remove(&mut self, scope_id: ScopeId) -> bool {
        self.states.remove(&scope_id).is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &NotificationState> {
        self.states.values()
    }
}
