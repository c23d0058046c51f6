//! Transport seams used by the session and feed state machines.
//!
//! The HTTP client implements these; tests substitute mocks or fakes.

use crate::error::ApiResult;
use crate::types::{Credentials, FeedItem, LikeStatus, Registration, SessionPayload, UserSummary};
use async_trait::async_trait;

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait AuthApi {
    /// Probe the current session cookie
    async fn me(&self) -> ApiResult<SessionPayload>;
    async fn login(&self, credentials: &Credentials) -> ApiResult<SessionPayload>;
    async fn logout(&self) -> ApiResult<()>;
    async fn register(&self, registration: &Registration) -> ApiResult<UserSummary>;
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait FeedApi {
    async fn feed(&self) -> ApiResult<Vec<FeedItem>>;
    /// Like or unlike, depending on the server's current state
    async fn toggle_like(&self, item: &FeedItem) -> ApiResult<LikeStatus>;
}

// Mock implementations for testing
#[cfg(test)]
pub mod mock {
    use super::*;
    use mockall::mock;

    mock! {
        pub AuthApi {}

        #[async_trait]
        impl AuthApi for AuthApi {
            async fn me(&self) -> ApiResult<SessionPayload>;
            async fn login(&self, credentials: &Credentials) -> ApiResult<SessionPayload>;
            async fn logout(&self) -> ApiResult<()>;
            async fn register(&self, registration: &Registration) -> ApiResult<UserSummary>;
        }
    }

    mock! {
        pub FeedApi {}

        #[async_trait]
        impl FeedApi for FeedApi {
            async fn feed(&self) -> ApiResult<Vec<FeedItem>>;
            async fn toggle_like(&self, item: &FeedItem) -> ApiResult<LikeStatus>;
        }
    }
}
