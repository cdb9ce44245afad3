//! Subscriber, contact, and question lists: read-and-delete only.

use serde::Deserialize;

use scentops_core::models::{Contact, Question, Subscriber};

use crate::client::AdminClient;
use crate::endpoints::Ack;
use crate::error::ApiError;

#[derive(Debug, Deserialize)]
struct SubscribersResponse {
    subscribers: Vec<Subscriber>,
}

#[derive(Debug, Deserialize)]
struct ContactsResponse {
    contacts: Vec<Contact>,
}

#[derive(Debug, Deserialize)]
struct QuestionsResponse {
    questions: Vec<Question>,
}

impl AdminClient {
    /// # Errors
    ///
    /// - [`ApiError::Api`] on an `ok: false` envelope.
    /// - [`ApiError::Http`] / [`ApiError::Status`] on transport failure.
    /// - [`ApiError::Deserialize`] if the response shape is unexpected.
    pub async fn list_subscribers(&self) -> Result<Vec<Subscriber>, ApiError> {
        let body: SubscribersResponse = self
            .get_json("admin-subscribers", "list_subscribers")
            .await?;
        Ok(body.subscribers)
    }

    /// # Errors
    ///
    /// Same taxonomy as [`AdminClient::list_subscribers`].
    pub async fn delete_subscriber(&self, id: &str) -> Result<(), ApiError> {
        let _: Ack = self
            .delete_json(
                &format!("admin-subscribers/delete/{id}"),
                "delete_subscriber",
            )
            .await?;
        Ok(())
    }

    /// # Errors
    ///
    /// Same taxonomy as [`AdminClient::list_subscribers`].
    pub async fn list_contacts(&self) -> Result<Vec<Contact>, ApiError> {
        let body: ContactsResponse = self.get_json("admin-contacts", "list_contacts").await?;
        Ok(body.contacts)
    }

    /// # Errors
    ///
    /// Same taxonomy as [`AdminClient::list_subscribers`].
    pub async fn delete_contact(&self, id: &str) -> Result<(), ApiError> {
        let _: Ack = self
            .delete_json(&format!("admin-contacts/delete/{id}"), "delete_contact")
            .await?;
        Ok(())
    }

    /// # Errors
    ///
    /// Same taxonomy as [`AdminClient::list_subscribers`].
    pub async fn list_questions(&self) -> Result<Vec<Question>, ApiError> {
        let body: QuestionsResponse = self.get_json("admin-questions", "list_questions").await?;
        Ok(body.questions)
    }

    /// # Errors
    ///
    /// Same taxonomy as [`AdminClient::list_subscribers`].
    pub async fn delete_question(&self, id: &str) -> Result<(), ApiError> {
        let _: Ack = self
            .delete_json(&format!("admin-questions/delete/{id}"), "delete_question")
            .await?;
        Ok(())
    }
}
