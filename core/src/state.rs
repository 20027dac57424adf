//! View-state primitives shared by every page.
//!
//! A view never performs I/O. When it needs the network it hands the host a
//! `Pending` (a request tagged with a fresh `Ticket`) and later receives the
//! outcome through its `on_response`. The view only applies an outcome whose
//! ticket matches the operation it is waiting on, so late or misrouted
//! responses are dropped instead of written into state.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::http::HttpRequest;

/// Load state of a view: exactly one of loading, failed or ready.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewState<T, E = String> {
    Loading,
    Failed(E),
    Ready(T),
}

impl<T, E> ViewState<T, E> {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            Self::Ready(val) => Some(val),
            _ => None,
        }
    }

    pub fn ready_mut(&mut self) -> Option<&mut T> {
        match self {
            Self::Ready(val) => Some(val),
            _ => None,
        }
    }

    pub fn failure(&self) -> Option<&E> {
        match self {
            Self::Failed(err) => Some(err),
            _ => None,
        }
    }

    pub fn resolve_or_reject(&mut self, res: Result<T, E>) {
        *self = match res {
            Ok(ok) => Self::Ready(ok),
            Err(err) => Self::Failed(err),
        };
    }
}

impl<T, E> Default for ViewState<T, E> {
    fn default() -> Self {
        Self::Loading
    }
}

/// Correlates a response with the request that produced it.
///
/// Tickets are unique for the lifetime of the process, so a ticket issued by
/// one view instance never matches an operation of another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ticket(u64);

impl Ticket {
    pub(crate) fn issue() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Ticket(NEXT.fetch_add(1, Ordering::Relaxed))
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

/// A request the host must execute and answer with the same ticket.
#[derive(Debug, Clone, PartialEq)]
pub struct Pending {
    pub ticket: Ticket,
    pub request: HttpRequest,
}

/// The single operation a view is waiting on.
#[derive(Debug)]
pub(crate) struct InFlight<Op> {
    slot: Option<(Ticket, Op)>,
}

impl<Op> InFlight<Op> {
    pub(crate) fn idle() -> Self {
        Self { slot: None }
    }

    pub(crate) fn is_busy(&self) -> bool {
        self.slot.is_some()
    }

    /// Record `op` as in flight and return its ticket.
    pub(crate) fn start(&mut self, op: Op) -> Ticket {
        let ticket = Ticket::issue();
        self.slot = Some((ticket, op));
        ticket
    }

    /// Take the operation if `ticket` is the one being waited on.
    pub(crate) fn finish(&mut self, ticket: Ticket) -> Option<Op> {
        match self.slot.take() {
            Some((current, op)) if current == ticket => Some(op),
            other => {
                self.slot = other;
                None
            }
        }
    }
}
