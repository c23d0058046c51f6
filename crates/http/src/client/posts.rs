//! Feed, image posts and verbalise posts

use crate::client::{ClientError, MidartClient, file_part};
use async_trait::async_trait;
use midart_core::{
    ApiResult, Comment, FeedApi, FeedItem, LikeResponse, LikeStatus, NewComment, NewImagePost,
    NewVerbalise, PostKind,
};
use reqwest::Method;
use reqwest::multipart::Form;

impl MidartClient {
    /// Posts from followed users and the caller, newest first
    pub async fn feed(&self) -> Result<Vec<FeedItem>, ClientError> {
        let request = self.request(Method::GET, "/feed/");
        self.execute(request).await
    }

    pub async fn create_image_post(&self, post: &NewImagePost) -> Result<(), ClientError> {
        let form = Form::new()
            .part("image", file_part(&post.image)?)
            .text("caption", post.caption.clone());
        let request = self.request(Method::POST, "/posts/").multipart(form);
        self.execute_empty(request).await
    }

    pub async fn delete_post(&self, id: u64) -> Result<(), ClientError> {
        let request = self.request(Method::DELETE, &format!("/posts/{id}/"));
        self.execute_empty(request).await
    }

    /// Like or unlike, whichever the server's current state calls for
    pub async fn like_post(&self, id: u64) -> Result<LikeStatus, ClientError> {
        self.like(PostKind::Image, id).await
    }

    pub async fn create_verbalise(&self, post: &NewVerbalise) -> Result<(), ClientError> {
        let request = self.request(Method::POST, "/verbalise/").json(post);
        self.execute_empty(request).await
    }

    pub async fn delete_verbalise(&self, id: u64) -> Result<(), ClientError> {
        let request = self.request(Method::DELETE, &format!("/verbalise/{id}/"));
        self.execute_empty(request).await
    }

    pub async fn like_verbalise(&self, id: u64) -> Result<LikeStatus, ClientError> {
        self.like(PostKind::Verbalise, id).await
    }

    /// Delete a feed item through the endpoint matching its kind
    pub async fn delete_item(&self, item: &FeedItem) -> Result<(), ClientError> {
        match item.kind() {
            PostKind::Image => self.delete_post(item.id).await,
            PostKind::Verbalise => self.delete_verbalise(item.id).await,
        }
    }

    /// Comments on a post, oldest first
    pub async fn comments(&self, kind: PostKind, id: u64) -> Result<Vec<Comment>, ClientError> {
        let request = self.request(Method::GET, &post_path(kind, id, "comments/"));
        self.execute(request).await
    }

    pub async fn add_comment(
        &self,
        kind: PostKind,
        id: u64,
        comment: &NewComment,
    ) -> Result<Comment, ClientError> {
        let request = self
            .request(Method::POST, &post_path(kind, id, "comments/"))
            .json(comment);
        self.execute(request).await
    }

    async fn like(&self, kind: PostKind, id: u64) -> Result<LikeStatus, ClientError> {
        let request = self.request(Method::POST, &post_path(kind, id, "like/"));
        let response: LikeResponse = self.execute(request).await?;
        Ok(response.status)
    }
}

/// `action` under the post's own collection, e.g. `/verbalise/4/like/`
fn post_path(kind: PostKind, id: u64, action: &str) -> String {
    let collection = match kind {
        PostKind::Image => "posts",
        PostKind::Verbalise => "verbalise",
    };
    format!("/{collection}/{id}/{action}")
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl FeedApi for MidartClient {
    async fn feed(&self) -> ApiResult<Vec<FeedItem>> {
        Ok(Self::feed(self).await?)
    }

    async fn toggle_like(&self, item: &FeedItem) -> ApiResult<LikeStatus> {
        Ok(self.like(item.kind(), item.id).await?)
    }
}
