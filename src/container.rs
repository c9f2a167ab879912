//! Render targets for the list views
//!
//! A container holds the last rendered list markup and pagination markup of
//! one view. Writes are full replacements. Each load takes a [`Ticket`] before
//! it starts its request; when it finishes, its markup is only kept if no
//! newer ticket was issued in the meantime, so a slow response can never
//! overwrite a fresher one.

use std::sync::{Mutex, MutexGuard, PoisonError};

use serde::Serialize;

/// Sequence number of one load against a container
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

impl Ticket {
    pub fn value(self) -> u64 {
        self.0
    }
}

/// Current content of a container
#[derive(Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Rendered {
    /// Markup of the list itself (rows, cards or options)
    pub list: String,

    /// Markup of the pagination control, empty for unpaginated views
    pub pagination: String,

    /// Ticket of the load that produced this content, 0 before the first one
    pub sequence: u64,
}

#[derive(Debug, Default)]
struct State {
    issued: u64,
    rendered: Rendered,
}

#[derive(Debug)]
pub struct Container {
    name: &'static str,
    state: Mutex<State>,
}

impl Container {
    pub fn new(name: &'static str) -> Self {
        Container {
            name,
            state: Mutex::new(State::default()),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Issues the next ticket; it supersedes every ticket issued before
    pub fn issue(&self) -> Ticket {
        let mut state = self.lock();
        state.issued += 1;
        Ticket(state.issued)
    }

    /// Whether `ticket` is still the latest one issued
    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.lock().issued == ticket.0
    }

    /// Replaces the content if `ticket` is still current
    ///
    /// `pagination` of `None` keeps the pagination already shown. Returns
    /// `false` when the write was discarded as stale.
    pub fn commit(&self, ticket: Ticket, list: String, pagination: Option<String>) -> bool {
        let mut state = self.lock();
        if state.issued != ticket.0 {
            tracing::debug!(
                "{}: discarding stale render #{} (latest is #{})",
                self.name,
                ticket.0,
                state.issued
            );
            return false;
        }

        state.rendered.list = list;
        if let Some(pagination) = pagination {
            state.rendered.pagination = pagination;
        }
        state.rendered.sequence = ticket.0;
        true
    }

    pub fn snapshot(&self) -> Rendered {
        self.lock().rendered.clone()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
