//! Banners, slogans, and review moderation.

use reqwest::multipart::Form;
use serde::Deserialize;

use scentops_core::models::{Banner, Review, ReviewStatus, Slogan};

use crate::client::{attach_files, AdminClient};
use crate::endpoints::Ack;
use crate::error::ApiError;
use crate::forms::{BannerUpload, SloganUpload};

#[derive(Debug, Deserialize)]
struct BannersResponse {
    banners: Vec<Banner>,
}

#[derive(Debug, Deserialize)]
struct BannerResponse {
    banner: Banner,
}

#[derive(Debug, Deserialize)]
struct SlogansResponse {
    slogans: Vec<Slogan>,
}

#[derive(Debug, Deserialize)]
struct SloganResponse {
    slogan: Slogan,
}

#[derive(Debug, Deserialize)]
struct ReviewsResponse {
    reviews: Vec<Review>,
}

fn banner_form(upload: &BannerUpload) -> Form {
    let mut form = Form::new()
        .text("name", upload.name.clone())
        .text("status", upload.status.clone());
    if let Some(id) = &upload.id {
        form = form.text("_id", id.clone());
    }
    if let Some(order) = upload.order {
        form = form.text("order", order.to_string());
    }
    if let Some(image) = &upload.image {
        form = attach_files(form, std::slice::from_ref(image));
    }
    form
}

impl AdminClient {
    /// # Errors
    ///
    /// - [`ApiError::Api`] on an `ok: false` envelope.
    /// - [`ApiError::Http`] / [`ApiError::Status`] on transport failure.
    /// - [`ApiError::Deserialize`] if the response shape is unexpected.
    pub async fn list_banners(&self) -> Result<Vec<Banner>, ApiError> {
        let body: BannersResponse = self.get_json("admin-banners", "list_banners").await?;
        Ok(body.banners)
    }

    /// Creates a banner (multipart; the image is required by the form layer).
    ///
    /// # Errors
    ///
    /// Same taxonomy as [`AdminClient::list_banners`].
    pub async fn create_banner(&self, upload: &BannerUpload) -> Result<Banner, ApiError> {
        let body: BannerResponse = self
            .post_multipart("admin-banners/create", banner_form(upload), "create_banner")
            .await?;
        Ok(body.banner)
    }

    /// # Errors
    ///
    /// [`ApiError::Validation`] when the id is missing, otherwise the same
    /// taxonomy as [`AdminClient::list_banners`].
    pub async fn update_banner(&self, upload: &BannerUpload) -> Result<Banner, ApiError> {
        if upload.id.is_none() {
            return Err(ApiError::Validation(
                "banner update requires an id".to_string(),
            ));
        }
        let body: BannerResponse = self
            .put_multipart("admin-banners/update", banner_form(upload), "update_banner")
            .await?;
        Ok(body.banner)
    }

    /// # Errors
    ///
    /// Same taxonomy as [`AdminClient::list_banners`].
    pub async fn delete_banner(&self, id: &str) -> Result<(), ApiError> {
        let _: Ack = self
            .delete_json(&format!("admin-banners/delete/{id}"), "delete_banner")
            .await?;
        Ok(())
    }

    /// # Errors
    ///
    /// Same taxonomy as [`AdminClient::list_banners`].
    pub async fn list_slogans(&self) -> Result<Vec<Slogan>, ApiError> {
        let body: SlogansResponse = self.get_json("admin-slogans", "list_slogans").await?;
        Ok(body.slogans)
    }

    /// # Errors
    ///
    /// Same taxonomy as [`AdminClient::list_banners`].
    pub async fn create_slogan(&self, upload: &SloganUpload) -> Result<Slogan, ApiError> {
        let body: SloganResponse = self
            .post_json("admin-slogans/create", upload, "create_slogan")
            .await?;
        Ok(body.slogan)
    }

    /// # Errors
    ///
    /// [`ApiError::Validation`] when the id is missing, otherwise the same
    /// taxonomy as [`AdminClient::list_banners`].
    pub async fn update_slogan(&self, upload: &SloganUpload) -> Result<Slogan, ApiError> {
        if upload.id.is_none() {
            return Err(ApiError::Validation(
                "slogan update requires an id".to_string(),
            ));
        }
        let body: SloganResponse = self
            .put_json("admin-slogans/update", upload, "update_slogan")
            .await?;
        Ok(body.slogan)
    }

    /// # Errors
    ///
    /// Same taxonomy as [`AdminClient::list_banners`].
    pub async fn delete_slogan(&self, id: &str) -> Result<(), ApiError> {
        let _: Ack = self
            .delete_json(&format!("admin-slogans/delete/{id}"), "delete_slogan")
            .await?;
        Ok(())
    }

    /// # Errors
    ///
    /// Same taxonomy as [`AdminClient::list_banners`].
    pub async fn list_reviews(&self) -> Result<Vec<Review>, ApiError> {
        let body: ReviewsResponse = self.get_json("admin-reviews", "list_reviews").await?;
        Ok(body.reviews)
    }

    /// Moderates a review: publish or send back to pending.
    ///
    /// # Errors
    ///
    /// Same taxonomy as [`AdminClient::list_banners`].
    pub async fn update_review_status(
        &self,
        id: &str,
        status: ReviewStatus,
    ) -> Result<(), ApiError> {
        let payload = serde_json::json!({ "_id": id, "status": status });
        let _: Ack = self
            .put_json("admin-reviews/update", &payload, "update_review_status")
            .await?;
        Ok(())
    }

    /// # Errors
    ///
    /// Same taxonomy as [`AdminClient::list_banners`].
    pub async fn delete_review(&self, id: &str) -> Result<(), ApiError> {
        let _: Ack = self
            .delete_json(&format!("admin-reviews/delete/{id}"), "delete_review")
            .await?;
        Ok(())
    }
}
