//! Home feed loading with supersession.
//!
//! Every [`FeedLoader::load`] call takes a ticket from the loader's
//! [`RequestSlot`]. Starting a new load cancels the previous one, and a
//! response is only applied while its ticket is still the current one, so a
//! slow early response can never overwrite a newer one.

use crate::api::FeedApi;
use crate::error::ApiError;
use crate::types::{FeedItem, LikeStatus};
use crate::request::{RequestSlot, Ticket};
use tracing::{debug, warn};

pub const FEED_LOAD_ERROR: &str = "Could not load feed.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedState {
    pub items: Vec<FeedItem>,
    pub is_loading: bool,
    pub error: Option<String>,
}

impl Default for FeedState {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            is_loading: true,
            error: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedUpdate {
    Started,
    Loaded(Vec<FeedItem>),
    Failed(String),
    /// The transport dropped the request on its own; stop the spinner
    /// without reporting anything.
    Abandoned,
}

impl FeedState {
    #[must_use]
    pub fn reduce(&self, update: FeedUpdate) -> Self {
        match update {
            FeedUpdate::Started => Self {
                items: self.items.clone(),
                is_loading: true,
                error: None,
            },
            FeedUpdate::Loaded(items) => Self {
                items,
                is_loading: false,
                error: None,
            },
            FeedUpdate::Failed(error) => Self {
                items: self.items.clone(),
                is_loading: false,
                error: Some(error),
            },
            FeedUpdate::Abandoned => Self {
                is_loading: false,
                ..self.clone()
            },
        }
    }
}

/// Handle for one in-flight feed request
pub type FeedTicket = Ticket;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The result (or error) was applied
    Applied,
    /// Superseded, cancelled or torn down; nothing was applied after `Started`
    Discarded,
}

/// Owns the "current request" slot of one feed view
#[derive(Debug, Default)]
pub struct FeedLoader {
    slot: RequestSlot,
}

impl FeedLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancel whatever is in flight and hand out the next ticket
    pub fn begin(&self) -> FeedTicket {
        self.slot.begin()
    }

    pub fn is_current(&self, ticket: &FeedTicket) -> bool {
        self.slot.is_current(ticket)
    }

    /// Cancel the outstanding request, if any
    pub fn cancel(&self) {
        self.slot.cancel();
    }

    /// The owning view is going away: cancel and ignore everything from now on
    pub fn teardown(&self) {
        self.slot.teardown();
    }

    pub fn is_retired(&self) -> bool {
        self.slot.is_retired()
    }

    /// Fetch the feed, applying updates only while this call is the most
    /// recent one.
    pub async fn load<A>(&self, api: &A, apply: impl Fn(FeedUpdate)) -> LoadOutcome
    where
        A: FeedApi + ?Sized,
    {
        let ticket = self.begin();
        if !self.is_current(&ticket) {
            return LoadOutcome::Discarded;
        }

        debug!(generation = ticket.generation(), "Loading feed");
        apply(FeedUpdate::Started);

        let Some(result) = self.slot.settle(&ticket, api.feed()).await else {
            return LoadOutcome::Discarded;
        };

        match result {
            Ok(items) => {
                debug!(generation = ticket.generation(), count = items.len(), "Feed loaded");
                apply(FeedUpdate::Loaded(items));
            }
            Err(ApiError::Cancelled) => apply(FeedUpdate::Abandoned),
            Err(error) => {
                warn!(%error, "Feed request failed");
                apply(FeedUpdate::Failed(FEED_LOAD_ERROR.to_string()));
            }
        }
        LoadOutcome::Applied
    }

    /// Like or unlike `item`, then reload the whole feed so counts come from
    /// the server. A failed like skips the reload.
    pub async fn toggle_like<A>(
        &self,
        api: &A,
        item: &FeedItem,
        apply: impl Fn(FeedUpdate),
    ) -> Result<LikeStatus, ApiError>
    where
        A: FeedApi + ?Sized,
    {
        let status = api.toggle_like(item).await?;
        debug!(key = %item.key(), ?status, "Like toggled");
        self.load(api, apply).await;
        Ok(status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::MockFeedApi;
    use crate::error::ApiResult;
    use crate::types::{Author, PostBody};
    use async_trait::async_trait;
    use chrono::{TimeZone, Utc};
    use std::cell::RefCell;
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use tokio::sync::oneshot;

    type Reply = ApiResult<Vec<FeedItem>>;

    fn verbalise(id: u64, content: &str) -> FeedItem {
        FeedItem {
            id,
            author: Author {
                username: "ada".into(),
                profile_image: None,
            },
            created_at: Utc.with_ymd_and_hms(2025, 3, 1, 10, 0, 0).unwrap(),
            like_count: 0,
            comment_count: 0,
            is_liked: false,
            body: PostBody::Verbalise {
                content: content.into(),
            },
        }
    }

    /// Feed whose responses are released by the test, in any order
    struct ScriptedFeed {
        pending: Mutex<VecDeque<oneshot::Receiver<Reply>>>,
    }

    impl ScriptedFeed {
        fn with_calls(count: usize) -> (Self, Vec<oneshot::Sender<Reply>>) {
            let (senders, receivers): (Vec<_>, VecDeque<_>) =
                (0..count).map(|_| oneshot::channel()).unzip();
            (
                Self {
                    pending: Mutex::new(receivers),
                },
                senders,
            )
        }
    }

    #[async_trait]
    impl FeedApi for ScriptedFeed {
        async fn feed(&self) -> ApiResult<Vec<FeedItem>> {
            let receiver = self
                .pending
                .lock()
                .unwrap()
                .pop_front()
                .expect("unexpected feed request");
            receiver
                .await
                .unwrap_or_else(|_| Err(ApiError::Transport("reply dropped".into())))
        }

        async fn toggle_like(&self, _item: &FeedItem) -> ApiResult<LikeStatus> {
            Ok(LikeStatus::Liked)
        }
    }

    struct View {
        state: RefCell<FeedState>,
        updates: RefCell<Vec<FeedUpdate>>,
    }

    impl View {
        fn new() -> Self {
            Self {
                state: RefCell::new(FeedState::default()),
                updates: RefCell::new(Vec::new()),
            }
        }

        fn apply(&self) -> impl Fn(FeedUpdate) + '_ {
            move |update| {
                let next = self.state.borrow().reduce(update.clone());
                *self.state.borrow_mut() = next;
                self.updates.borrow_mut().push(update);
            }
        }
    }

    #[test]
    fn begin_cancels_previous_ticket() {
        let loader = FeedLoader::new();
        let first = loader.begin();
        let second = loader.begin();

        assert!(first.is_cancelled());
        assert!(!loader.is_current(&first));
        assert!(loader.is_current(&second));
        assert!(second.generation() > first.generation());
    }

    #[tokio::test]
    async fn slow_earlier_response_never_overwrites_newer_one() {
        let (api, mut replies) = ScriptedFeed::with_calls(2);
        let second_reply = replies.pop().unwrap();
        let first_reply = replies.pop().unwrap();

        let loader = FeedLoader::new();
        let view = View::new();
        let apply = view.apply();

        let (first, second, ()) = futures::join!(
            loader.load(&api, &apply),
            loader.load(&api, &apply),
            async {
                let _ = second_reply.send(Ok(vec![verbalise(2, "newer")]));
                let _ = first_reply.send(Ok(vec![verbalise(1, "stale")]));
            }
        );

        assert_eq!(first, LoadOutcome::Discarded);
        assert_eq!(second, LoadOutcome::Applied);
        let state = view.state.borrow();
        assert_eq!(state.items, vec![verbalise(2, "newer")]);
        assert!(!state.is_loading);
        assert!(state.error.is_none());
    }

    #[tokio::test]
    async fn only_last_of_many_rapid_loads_is_applied() {
        const LOADS: usize = 5;
        let (api, replies) = ScriptedFeed::with_calls(LOADS);

        let loader = FeedLoader::new();
        let view = View::new();
        let apply = view.apply();

        let loads = (0..LOADS).map(|_| loader.load(&api, &apply));
        let (outcomes, ()) = futures::join!(futures::future::join_all(loads), async {
            // Release replies newest first so every stale one arrives late
            for (index, reply) in replies.into_iter().enumerate().rev() {
                let content = format!("reply {index}");
                let _ = reply.send(Ok(vec![verbalise(index as u64, &content)]));
            }
        });

        let applied = outcomes
            .iter()
            .filter(|outcome| **outcome == LoadOutcome::Applied)
            .count();
        assert_eq!(applied, 1);
        assert_eq!(outcomes.last(), Some(&LoadOutcome::Applied));
        assert_eq!(
            view.state.borrow().items,
            vec![verbalise(LOADS as u64 - 1, &format!("reply {}", LOADS - 1))]
        );

        let loaded = view
            .updates
            .borrow()
            .iter()
            .filter(|update| matches!(update, FeedUpdate::Loaded(_)))
            .count();
        assert_eq!(loaded, 1);
    }

    #[tokio::test]
    async fn failure_sets_error_and_keeps_items() {
        let (api, mut replies) = ScriptedFeed::with_calls(1);
        let reply = replies.pop().unwrap();

        let loader = FeedLoader::new();
        let view = View::new();
        *view.state.borrow_mut() = FeedState::default().reduce(FeedUpdate::Loaded(vec![verbalise(1, "kept")]));
        let apply = view.apply();

        let (outcome, ()) = futures::join!(loader.load(&api, &apply), async {
            let _ = reply.send(Err(ApiError::Transport("connection reset".into())));
        });

        assert_eq!(outcome, LoadOutcome::Applied);
        let state = view.state.borrow();
        assert_eq!(state.error.as_deref(), Some(FEED_LOAD_ERROR));
        assert_eq!(state.items, vec![verbalise(1, "kept")]);
        assert!(!state.is_loading);
    }

    #[tokio::test]
    async fn transport_cancellation_is_not_an_error() {
        let (api, mut replies) = ScriptedFeed::with_calls(1);
        let reply = replies.pop().unwrap();

        let loader = FeedLoader::new();
        let view = View::new();
        let apply = view.apply();

        futures::join!(loader.load(&api, &apply), async {
            let _ = reply.send(Err(ApiError::Cancelled));
        });

        let state = view.state.borrow();
        assert!(state.error.is_none());
        assert!(!state.is_loading);
    }

    #[tokio::test]
    async fn teardown_with_request_outstanding_applies_nothing() {
        let (api, mut replies) = ScriptedFeed::with_calls(1);
        let reply = replies.pop().unwrap();

        let loader = FeedLoader::new();
        let view = View::new();
        let apply = view.apply();

        let (outcome, updates_at_teardown) = futures::join!(loader.load(&api, &apply), async {
            let seen = view.updates.borrow().len();
            loader.teardown();
            let _ = reply.send(Ok(vec![verbalise(1, "too late")]));
            seen
        });

        assert_eq!(outcome, LoadOutcome::Discarded);
        assert_eq!(updates_at_teardown, 1);
        assert_eq!(*view.updates.borrow(), vec![FeedUpdate::Started]);
        assert!(loader.is_retired());
    }

    #[tokio::test]
    async fn load_after_teardown_does_nothing() {
        let mut api = MockFeedApi::new();
        api.expect_feed().never();

        let loader = FeedLoader::new();
        loader.teardown();
        let view = View::new();

        let outcome = loader.load(&api, view.apply()).await;
        assert_eq!(outcome, LoadOutcome::Discarded);
        assert!(view.updates.borrow().is_empty());
    }

    #[tokio::test]
    async fn like_then_reload_reflects_server_counts() {
        let before = FeedItem {
            like_count: 4,
            ..verbalise(3, "liked post")
        };
        let after = FeedItem {
            like_count: 5,
            is_liked: true,
            ..before.clone()
        };

        let mut api = MockFeedApi::new();
        api.expect_toggle_like()
            .withf(|item| item.id == 3)
            .times(1)
            .returning(|_| Ok(LikeStatus::Liked));
        let reloaded = after.clone();
        api.expect_feed()
            .times(1)
            .returning(move || Ok(vec![reloaded.clone()]));

        let loader = FeedLoader::new();
        let view = View::new();
        *view.state.borrow_mut() = FeedState::default().reduce(FeedUpdate::Loaded(vec![before.clone()]));

        let status = loader.toggle_like(&api, &before, view.apply()).await.unwrap();

        assert_eq!(status, LikeStatus::Liked);
        let state = view.state.borrow();
        assert_eq!(state.items, vec![after]);
        assert!(state.items[0].is_liked);
        assert_eq!(state.items[0].like_count, 5);
    }

    #[tokio::test]
    async fn failed_like_skips_reload() {
        let mut api = MockFeedApi::new();
        api.expect_toggle_like()
            .times(1)
            .returning(|_| Err(ApiError::NotFound("No Post matches the given query.".into())));
        api.expect_feed().never();

        let loader = FeedLoader::new();
        let view = View::new();
        let result = loader
            .toggle_like(&api, &verbalise(9, "gone"), view.apply())
            .await;

        assert!(matches!(result, Err(ApiError::NotFound(_))));
        assert!(view.updates.borrow().is_empty());
    }
}
