//! Query filters for listing todos.

use chrono::{NaiveDateTime, TimeDelta};

use crate::types::Todo;

/// Conjunctive filter over todos. Unset criteria match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoFilter {
    /// Keep only todos whose deadline is strictly earlier than this.
    /// Todos without a deadline never match.
    pub deadline_before: Option<NaiveDateTime>,
    pub completed: Option<bool>,
}

impl TodoFilter {
    /// Build a filter from raw query parameters.
    ///
    /// `window` is a number of days from `now`; a value that is not an
    /// integer is ignored. `completed` is true only for a case-insensitive
    /// `"true"`.
    pub fn from_query(window: Option<&str>, completed: Option<&str>, now: NaiveDateTime) -> Self {
        let deadline_before = window
            .and_then(|raw| raw.trim().parse::<i64>().ok())
            .map(|days| window_end(now, days));
        Self {
            deadline_before,
            completed: completed.map(|raw| raw.eq_ignore_ascii_case("true")),
        }
    }

    pub fn matches(&self, todo: &Todo) -> bool {
        if let Some(max) = self.deadline_before {
            match todo.deadline_at {
                Some(deadline) if deadline < max => {}
                _ => return false,
            }
        }
        if let Some(completed) = self.completed {
            if todo.completed != completed {
                return false;
            }
        }
        true
    }
}

// saturates instead of overflowing for absurd windows
fn window_end(now: NaiveDateTime, days: i64) -> NaiveDateTime {
    TimeDelta::try_days(days)
        .and_then(|delta| now.checked_add_signed(delta))
        .unwrap_or(if days > 0 {
            NaiveDateTime::MAX
        } else {
            NaiveDateTime::MIN
        })
}
