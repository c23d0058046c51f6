//! Midart client core: domain types, the error taxonomy and the state machines
//! behind the session and the home feed.
//!
//! Nothing here touches the network or the DOM. Transport is reached through
//! the traits in [`api`], so every piece runs natively under test.

pub mod api;
pub mod error;
pub mod feed;
pub mod guard;
pub mod progress;
pub mod request;
pub mod session;
pub mod types;

pub use api::{AuthApi, FeedApi};
pub use error::{ApiError, ApiResult};
pub use feed::{FEED_LOAD_ERROR, FeedLoader, FeedState, FeedTicket, FeedUpdate, LoadOutcome};
pub use guard::{GuardDecision, HomeTarget, UnauthorizedRedirect, guard, home_target};
pub use request::{RequestSlot, Ticket};
pub use session::{EXPIRED_NOTICE, Session, SessionAction, SessionContext};
pub use types::*;
