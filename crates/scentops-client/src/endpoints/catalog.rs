//! Categories, products, and variants.

use chrono::{DateTime, SecondsFormat, Utc};
use reqwest::multipart::Form;
use serde::Deserialize;
use serde_json::Value;

use scentops_core::diff::Patch;
use scentops_core::models::{Category, Product, Variant};

use crate::client::{attach_files, AdminClient};
use crate::endpoints::Ack;
use crate::error::ApiError;
use crate::forms::{CategoryUpload, VariantDraft, VariantPatch};

#[derive(Debug, Deserialize)]
struct CategoriesResponse {
    categories: Vec<Category>,
}

#[derive(Debug, Deserialize)]
struct CategoryResponse {
    category: Category,
}

#[derive(Debug, Deserialize)]
struct ProductsResponse {
    products: Vec<Product>,
}

#[derive(Debug, Deserialize)]
struct ProductResponse {
    product: Product,
}

#[derive(Debug, Deserialize)]
struct VariantResponse {
    variant: Variant,
}

fn iso_millis(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn category_form(upload: &CategoryUpload) -> Form {
    let mut form = Form::new()
        .text("vi_name", upload.name.vi.clone())
        .text("en_name", upload.name.en.clone())
        .text("vi_description", upload.description.vi.clone())
        .text("en_description", upload.description.en.clone())
        .text("status", upload.status.clone());
    if let Some(id) = &upload.id {
        form = form.text("_id", id.clone());
    }
    if let Some(image) = &upload.image {
        form = attach_files(form, std::slice::from_ref(image));
    }
    form
}

impl AdminClient {
    /// Lists all categories visible to the dashboard.
    ///
    /// # Errors
    ///
    /// - [`ApiError::Api`] on an `ok: false` envelope.
    /// - [`ApiError::Http`] / [`ApiError::Status`] on transport failure.
    /// - [`ApiError::Deserialize`] if the response shape is unexpected.
    pub async fn list_categories(&self) -> Result<Vec<Category>, ApiError> {
        let body: CategoriesResponse = self
            .get_json("admin-categories", "list_categories")
            .await?;
        Ok(body.categories)
    }

    /// Creates a category from the drawer form (multipart: localized text,
    /// status, optional image).
    ///
    /// # Errors
    ///
    /// Same taxonomy as [`AdminClient::list_categories`].
    pub async fn create_category(&self, upload: &CategoryUpload) -> Result<Category, ApiError> {
        let body: CategoryResponse = self
            .post_multipart(
                "admin-categories/create",
                category_form(upload),
                "create_category",
            )
            .await?;
        Ok(body.category)
    }

    /// Updates a category; `upload.id` must be present.
    ///
    /// # Errors
    ///
    /// [`ApiError::Validation`] when the id is missing, otherwise the same
    /// taxonomy as [`AdminClient::list_categories`].
    pub async fn update_category(&self, upload: &CategoryUpload) -> Result<Category, ApiError> {
        if upload.id.is_none() {
            return Err(ApiError::Validation(
                "category update requires an id".to_string(),
            ));
        }
        let body: CategoryResponse = self
            .put_multipart(
                "admin-categories/update",
                category_form(upload),
                "update_category",
            )
            .await?;
        Ok(body.category)
    }

    /// Deletes a category by id.
    ///
    /// # Errors
    ///
    /// Same taxonomy as [`AdminClient::list_categories`].
    pub async fn delete_category(&self, id: &str) -> Result<(), ApiError> {
        let _: Ack = self
            .delete_json(
                &format!("admin-categories/delete/{id}"),
                "delete_category",
            )
            .await?;
        Ok(())
    }

    /// Lists all products with populated categories and variants.
    ///
    /// # Errors
    ///
    /// Same taxonomy as [`AdminClient::list_categories`].
    pub async fn list_products(&self) -> Result<Vec<Product>, ApiError> {
        let body: ProductsResponse = self.get_json("admin-products", "list_products").await?;
        Ok(body.products)
    }

    /// Fetches a single product by id.
    ///
    /// # Errors
    ///
    /// Same taxonomy as [`AdminClient::list_categories`].
    pub async fn get_product(&self, id: &str) -> Result<Product, ApiError> {
        let body: ProductResponse = self
            .get_json(&format!("admin-products/{id}"), "get_product")
            .await?;
        Ok(body.product)
    }

    /// Creates the product record itself (multipart). Variant ids must
    /// already exist; the creation flow in [`crate::orchestrate`] sequences
    /// that for you.
    ///
    /// # Errors
    ///
    /// Same taxonomy as [`AdminClient::list_categories`].
    pub async fn create_product_record(&self, form: Form) -> Result<Product, ApiError> {
        let body: ProductResponse = self
            .post_multipart("admin-products/create", form, "create_product")
            .await?;
        Ok(body.product)
    }

    /// Sends a partial product update: the changed fields plus `_id`.
    ///
    /// # Errors
    ///
    /// [`ApiError::NoChanges`] for an empty patch — the no-op guard is
    /// enforced here as well as in the form flow — otherwise the same
    /// taxonomy as [`AdminClient::list_categories`].
    pub async fn update_product(&self, id: &str, patch: &Patch) -> Result<Product, ApiError> {
        if patch.is_empty() {
            return Err(ApiError::NoChanges);
        }
        let mut payload = patch.as_map().clone();
        payload.insert("_id".to_string(), Value::String(id.to_string()));
        let body: ProductResponse = self
            .put_json("admin-products/update", &payload, "update_product")
            .await?;
        Ok(body.product)
    }

    /// Deletes a product by id.
    ///
    /// # Errors
    ///
    /// Same taxonomy as [`AdminClient::list_categories`].
    pub async fn delete_product(&self, id: &str) -> Result<(), ApiError> {
        let _: Ack = self
            .delete_json(&format!("admin-products/delete/{id}"), "delete_product")
            .await?;
        Ok(())
    }

    /// Uploads videos for a just-created product.
    ///
    /// # Errors
    ///
    /// Same taxonomy as [`AdminClient::list_categories`].
    pub async fn upload_product_videos(
        &self,
        id: &str,
        files: &[crate::client::FileUpload],
    ) -> Result<(), ApiError> {
        let form = attach_files(Form::new().text("_id", id.to_string()), files);
        let _: Ack = self
            .post_multipart("admin-products/upload-videos", form, "upload_product_videos")
            .await?;
        Ok(())
    }

    /// Replaces a product's videos with a new non-empty file list.
    ///
    /// # Errors
    ///
    /// Same taxonomy as [`AdminClient::list_categories`].
    pub async fn update_product_videos(
        &self,
        id: &str,
        files: &[crate::client::FileUpload],
    ) -> Result<(), ApiError> {
        let form = attach_files(Form::new().text("_id", id.to_string()), files);
        let _: Ack = self
            .put_multipart("admin-products/update-videos", form, "update_product_videos")
            .await?;
        Ok(())
    }

    /// Removes all videos from a product.
    ///
    /// # Errors
    ///
    /// Same taxonomy as [`AdminClient::list_categories`].
    pub async fn remove_product_videos(&self, id: &str) -> Result<(), ApiError> {
        let _: Ack = self
            .delete_json(
                &format!("admin-products/remove-videos/{id}"),
                "remove_product_videos",
            )
            .await?;
        Ok(())
    }

    /// Creates one variant (multipart: images plus scalar fields; discount
    /// window as RFC3339 text) and returns the stored variant.
    ///
    /// The caller is expected to have validated the draft; the check is
    /// repeated here so no incomplete window ever reaches the wire.
    ///
    /// # Errors
    ///
    /// [`ApiError::Core`] wrapping the incomplete-window validation error,
    /// otherwise the same taxonomy as [`AdminClient::list_categories`].
    pub async fn create_variant(&self, draft: &VariantDraft) -> Result<Variant, ApiError> {
        draft.validate()?;

        let mut form = attach_files(Form::new(), &draft.images)
            .text("fragrance", draft.fragrance.clone())
            .text("stock", draft.stock.to_string())
            .text("price", draft.price.to_string());

        if let Some(discounted_price) = draft.discounted_price {
            form = form.text("discountedPrice", discounted_price.to_string());
            // validate() guarantees both bounds are present here.
            if let (Some(from), Some(to)) = (draft.discounted_from, draft.discounted_to) {
                form = form
                    .text("discountedFrom", iso_millis(from))
                    .text("discountedTo", iso_millis(to));
            }
        }

        let body: VariantResponse = self
            .post_multipart("admin-variants/create", form, "create_variant")
            .await?;
        Ok(body.variant)
    }

    /// Updates a variant; only the fields present in the patch travel.
    ///
    /// # Errors
    ///
    /// Same taxonomy as [`AdminClient::list_categories`].
    pub async fn update_variant(&self, patch: &VariantPatch) -> Result<(), ApiError> {
        let mut form = attach_files(Form::new(), &patch.images).text("_id", patch.id.clone());

        if let Some(fragrance) = &patch.fragrance {
            form = form.text("fragrance", fragrance.clone());
        }
        if let Some(stock) = patch.stock {
            form = form.text("stock", stock.to_string());
        }
        if let Some(price) = patch.price {
            form = form.text("price", price.to_string());
        }
        if let Some(discounted_price) = patch.discounted_price {
            form = form.text("discountedPrice", discounted_price.to_string());
        }
        if let Some(from) = patch.discounted_from {
            form = form.text("discountedFrom", iso_millis(from));
        }
        if let Some(to) = patch.discounted_to {
            form = form.text("discountedTo", iso_millis(to));
        }

        let _: Ack = self
            .put_multipart("admin-variants/update", form, "update_variant")
            .await?;
        Ok(())
    }
}
