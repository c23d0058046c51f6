//! "Latest request wins" bookkeeping for views that refetch.
//!
//! A [`RequestSlot`] hands out one [`Ticket`] per request. Beginning a new
//! request cancels the previous ticket, and [`RequestSlot::settle`] only
//! yields a result while its ticket is still the current one.

use futures::future::{Either, select};
use std::cell::{Cell, RefCell};
use std::pin::pin;
use tokio_util::sync::CancellationToken;

/// Handle for one in-flight request
#[derive(Debug, Clone)]
pub struct Ticket {
    generation: u64,
    token: CancellationToken,
}

impl Ticket {
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }
}

/// Owns the "current request" of one view
#[derive(Debug, Default)]
pub struct RequestSlot {
    generation: Cell<u64>,
    current: RefCell<Option<CancellationToken>>,
    retired: Cell<bool>,
}

impl RequestSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancel whatever is in flight and hand out the next ticket
    pub fn begin(&self) -> Ticket {
        let generation = self.generation.get().wrapping_add(1);
        self.generation.set(generation);

        let token = CancellationToken::new();
        if let Some(previous) = self.current.replace(Some(token.clone())) {
            previous.cancel();
        }
        if self.retired.get() {
            token.cancel();
        }

        Ticket { generation, token }
    }

    pub fn is_current(&self, ticket: &Ticket) -> bool {
        !self.retired.get()
            && !ticket.is_cancelled()
            && ticket.generation == self.generation.get()
    }

    /// Cancel the outstanding request, if any
    pub fn cancel(&self) {
        if let Some(token) = self.current.borrow_mut().take() {
            token.cancel();
        }
    }

    /// The owning view is going away: cancel and ignore everything from now on
    pub fn teardown(&self) {
        self.retired.set(true);
        self.cancel();
    }

    pub fn is_retired(&self) -> bool {
        self.retired.get()
    }

    /// Drive `work` for `ticket`. `None` when the ticket was superseded or
    /// cancelled before or while `work` ran.
    pub async fn settle<F: Future>(&self, ticket: &Ticket, work: F) -> Option<F::Output> {
        if !self.is_current(ticket) {
            return None;
        }

        let work = pin!(work);
        let cancelled = pin!(ticket.token.cancelled());
        match select(work, cancelled).await {
            Either::Left((output, _)) if self.is_current(ticket) => Some(output),
            _ => None,
        }
    }

    /// [`begin`](Self::begin) a request and [`settle`](Self::settle) it
    pub async fn run<F: Future>(&self, work: F) -> Option<F::Output> {
        let ticket = self.begin();
        self.settle(&ticket, work).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::oneshot;

    #[test]
    fn begin_supersedes_previous_ticket() {
        let slot = RequestSlot::new();
        let first = slot.begin();
        let second = slot.begin();

        assert!(first.is_cancelled());
        assert!(!slot.is_current(&first));
        assert!(slot.is_current(&second));
        assert!(second.generation() > first.generation());
    }

    #[tokio::test]
    async fn slow_early_response_is_dropped() {
        let slot = RequestSlot::new();
        let (early_tx, early_rx) = oneshot::channel::<&str>();
        let (late_tx, late_rx) = oneshot::channel::<&str>();

        let early = slot.begin();
        let late = slot.begin();

        late_tx.send("projects").unwrap();
        early_tx.send("posts").unwrap();

        let late_result = slot.settle(&late, async move { late_rx.await.unwrap() }).await;
        let early_result = slot.settle(&early, async move { early_rx.await.unwrap() }).await;

        assert_eq!(late_result, Some("projects"));
        assert_eq!(early_result, None);
    }

    #[tokio::test]
    async fn in_flight_request_loses_to_newer_one() {
        use futures::FutureExt;

        let slot = RequestSlot::new();
        let (posts_tx, posts_rx) = oneshot::channel::<&str>();

        let posts = slot.begin();
        let mut posts_result = pin!(slot.settle(&posts, async move { posts_rx.await.unwrap() }));
        assert!(posts_result.as_mut().now_or_never().is_none());

        // User switches tab while the first request is still waiting
        let projects = slot.begin();
        let projects_result = slot.settle(&projects, async { "projects" }).await;

        posts_tx.send("posts").unwrap();
        assert_eq!(posts_result.await, None);
        assert_eq!(projects_result, Some("projects"));
    }

    #[tokio::test]
    async fn cancel_interrupts_pending_work() {
        let slot = RequestSlot::new();
        let (_tx, rx) = oneshot::channel::<u32>();

        let ticket = slot.begin();
        let pending = slot.settle(&ticket, rx);
        slot.cancel();

        assert_eq!(pending.await, None);
    }

    #[tokio::test]
    async fn retired_slot_never_yields() {
        let slot = RequestSlot::new();
        slot.teardown();

        assert!(slot.is_retired());
        assert_eq!(slot.run(async { 1 }).await, None);
    }

    #[tokio::test]
    async fn run_yields_when_uncontested() {
        let slot = RequestSlot::new();
        assert_eq!(slot.run(async { 7 }).await, Some(7));
    }
}
