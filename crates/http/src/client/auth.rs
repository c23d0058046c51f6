//! Session endpoints

use crate::client::{ClientError, MidartClient};
use async_trait::async_trait;
use midart_core::{ApiResult, AuthApi, Credentials, Registration, SessionPayload, UserSummary};
use reqwest::Method;

impl MidartClient {
    /// Start a session. Sets the session cookie on success.
    pub async fn login(&self, credentials: &Credentials) -> Result<SessionPayload, ClientError> {
        let request = self.request(Method::POST, "/auth/login/").json(credentials);
        self.execute(request).await
    }

    /// Create an account; the caller logs in separately
    pub async fn register(&self, registration: &Registration) -> Result<UserSummary, ClientError> {
        let request = self.request(Method::POST, "/auth/register/").json(registration);
        self.execute(request).await
    }

    pub async fn logout(&self) -> Result<(), ClientError> {
        let request = self.request(Method::POST, "/auth/logout/");
        self.execute_empty(request).await
    }

    /// Identity behind the current session cookie
    pub async fn me(&self) -> Result<SessionPayload, ClientError> {
        let request = self.request(Method::GET, "/auth/me/");
        self.execute(request).await
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl AuthApi for MidartClient {
    async fn me(&self) -> ApiResult<SessionPayload> {
        Ok(Self::me(self).await?)
    }

    async fn login(&self, credentials: &Credentials) -> ApiResult<SessionPayload> {
        Ok(Self::login(self, credentials).await?)
    }

    async fn logout(&self) -> ApiResult<()> {
        Ok(Self::logout(self).await?)
    }

    async fn register(&self, registration: &Registration) -> ApiResult<UserSummary> {
        Ok(Self::register(self, registration).await?)
    }
}
