//! Direct messages

use crate::client::{ClientError, MidartClient};
use midart_core::{Message, NewMessage};
use reqwest::Method;

impl MidartClient {
    pub async fn inbox(&self) -> Result<Vec<Message>, ClientError> {
        let request = self.request(Method::GET, "/messages/inbox/");
        self.execute(request).await
    }

    pub async fn outbox(&self) -> Result<Vec<Message>, ClientError> {
        let request = self.request(Method::GET, "/messages/outbox/");
        self.execute(request).await
    }

    pub async fn send_message(&self, message: &NewMessage) -> Result<(), ClientError> {
        let request = self.request(Method::POST, "/messages/send/").json(message);
        self.execute_empty(request).await
    }
}
