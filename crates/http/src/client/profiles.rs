//! Profiles and the follow graph

use crate::client::{ClientError, MidartClient, file_part, segment};
use midart_core::{
    FeedItem, Profile, ProfileUpdate, ProjectSummary, SEARCH_MIN_CHARS, SearchResults, UserSummary,
};
use reqwest::Method;
use reqwest::multipart::Form;

impl MidartClient {
    pub async fn profile(&self, username: &str) -> Result<Profile, ClientError> {
        let request = self.request(Method::GET, &format!("/profiles/{}/", segment(username)));
        self.execute(request).await
    }

    /// Update the caller's own profile. Only the fields that are set are sent.
    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<(), ClientError> {
        let mut form = Form::new();
        if let Some(bio) = &update.bio {
            form = form.text("bio", bio.clone());
        }
        if let Some(user_type) = &update.user_type {
            form = form.text("user_type", user_type.as_str().to_string());
        }
        if let Some(image) = &update.profile_image {
            form = form.part("profile_image", file_part(image)?);
        }

        let request = self.request(Method::PATCH, "/profile/update/").multipart(form);
        self.execute_empty(request).await
    }

    pub async fn follow(&self, username: &str) -> Result<(), ClientError> {
        let request = self.request(Method::POST, &format!("/profiles/{}/follow/", segment(username)));
        self.execute_empty(request).await
    }

    pub async fn unfollow(&self, username: &str) -> Result<(), ClientError> {
        let request = self.request(Method::DELETE, &format!("/profiles/{}/follow/", segment(username)));
        self.execute_empty(request).await
    }

    pub async fn followers(&self, username: &str) -> Result<Vec<UserSummary>, ClientError> {
        let request = self.request(Method::GET, &format!("/profiles/{}/followers/", segment(username)));
        self.execute(request).await
    }

    pub async fn following(&self, username: &str) -> Result<Vec<UserSummary>, ClientError> {
        let request = self.request(Method::GET, &format!("/profiles/{}/following/", segment(username)));
        self.execute(request).await
    }

    /// Both post kinds by `username`, newest first
    pub async fn user_posts(&self, username: &str) -> Result<Vec<FeedItem>, ClientError> {
        let request = self.request(Method::GET, &format!("/profiles/{}/posts/", segment(username)));
        self.execute(request).await
    }

    /// Projects `username` created or collaborates on
    pub async fn user_projects(&self, username: &str) -> Result<Vec<ProjectSummary>, ClientError> {
        let request = self.request(Method::GET, &format!("/profiles/{}/projects/", segment(username)));
        self.execute(request).await
    }

    /// Users and projects matching `query`. Short queries are answered
    /// locally with no results, as the server would.
    pub async fn search(&self, query: &str) -> Result<SearchResults, ClientError> {
        let query = query.trim();
        if query.chars().count() < SEARCH_MIN_CHARS {
            return Ok(SearchResults::default());
        }
        let request = self.request(Method::GET, "/search/").query(&[("q", query)]);
        self.execute(request).await
    }
}
