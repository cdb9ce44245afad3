//! Multi-call flows behind the product add/edit forms.
//!
//! One logical save can span several backend entities: variant rows, video
//! attachments, and the product record itself. Calls are issued strictly
//! sequentially in source order; a failure partway through leaves earlier
//! steps committed and later steps un-attempted, and is surfaced as a single
//! error. There is no automatic rollback — the backend exposes no batch
//! endpoint — so callers should treat a partial failure as "re-open the form
//! and retry".

use reqwest::multipart::Form;
use serde_json::json;

use scentops_core::diff;
use scentops_core::models::Product;

use crate::client::{attach_files, AdminClient};
use crate::error::ApiError;
use crate::forms::{ProductDraft, ProductEditForm, ProductFields, VariantSnapshot};

/// What the video sub-flow of a save did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VideoOutcome {
    /// The video list did not change; nothing was sent.
    Untouched,
    /// A non-empty new file list replaced the stored videos.
    Replaced,
    /// The list was emptied and the stored videos removed.
    Removed,
    /// Removal was attempted and failed; the save continued regardless.
    RemoveFailed,
}

/// Summary of a completed [`save_product_edit`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaveOutcome {
    /// How many variant updates were issued.
    pub variants_updated: usize,
    /// Whether a product-level patch was sent (false when only variants or
    /// videos changed).
    pub product_updated: bool,
    pub videos: VideoOutcome,
}

/// Creates variants one at a time, in input order, collecting their ids.
///
/// Each draft is validated immediately before its network call: a discounted
/// price with an incomplete window aborts the sequence without touching the
/// wire for that variant. Earlier creations are not rolled back.
///
/// # Errors
///
/// - [`ApiError::Core`] for an incomplete discount window.
/// - Any [`AdminClient::create_variant`] error, at the first failing variant.
/// - [`ApiError::Api`] if a created variant comes back without an id.
pub async fn create_variants(
    client: &AdminClient,
    drafts: &[crate::forms::VariantDraft],
) -> Result<Vec<String>, ApiError> {
    let mut ids = Vec::with_capacity(drafts.len());

    for draft in drafts {
        draft.validate()?;
        let variant = client.create_variant(draft).await?;
        let id = variant.id.ok_or_else(|| {
            ApiError::Api(format!(
                "created variant '{}' came back without an id",
                draft.fragrance
            ))
        })?;
        ids.push(id);
    }

    Ok(ids)
}

/// Creates a product end to end: variants first, then the product record
/// carrying the collected variant ids, then the optional video upload.
///
/// # Errors
///
/// Propagates the first failing step; earlier steps stay committed.
pub async fn create_product(
    client: &AdminClient,
    draft: &ProductDraft,
) -> Result<Product, ApiError> {
    let variant_ids = create_variants(client, &draft.variants).await?;

    let mut form = attach_files(Form::new(), &draft.images)
        .text("vi_name", draft.name.vi.clone())
        .text("en_name", draft.name.en.clone())
        .text("vi_description", draft.description.vi.clone())
        .text("en_description", draft.description.en.clone())
        .text("category", draft.category.clone())
        .text("status", draft.status.clone());
    for id in &variant_ids {
        form = form.text("variants", id.clone());
    }

    let product = client.create_product_record(form).await?;

    if !draft.videos.is_empty() {
        client
            .upload_product_videos(&product.id, &draft.videos)
            .await?;
    }

    Ok(product)
}

/// Saves an edited product: diffs product-level fields and variant working
/// copies independently, refuses a no-op submission, runs the video
/// sub-flow, updates the variants, and finally sends the product patch.
///
/// The product-level update is issued only after every variant update has
/// completed. The video and variant branches are independent; both finish
/// (or are explicitly skipped) before this function returns success.
///
/// # Errors
///
/// - [`ApiError::NoChanges`] when neither diff found anything — nothing is
///   sent in that case.
/// - [`ApiError::Core`] if a working copy fails to serialize for diffing.
/// - Any endpoint error from the video upload, a variant update, or the
///   product update; earlier steps stay committed.
pub async fn save_product_edit(
    client: &AdminClient,
    initial: &Product,
    form: &ProductEditForm,
) -> Result<SaveOutcome, ApiError> {
    let initial_fields = ProductFields::from_product(initial);
    let mut product_patch = diff::diff_records(&initial_fields, &form.fields)?;

    let initial_variants: Vec<VariantSnapshot> =
        initial.variants.iter().map(VariantSnapshot::from).collect();
    let edited_variants: Vec<VariantSnapshot> =
        form.variants.iter().map(|v| v.snapshot()).collect();
    let variants_patch = diff::diff_records(
        &json!({ "variants": initial_variants }),
        &json!({ "variants": edited_variants }),
    )?;

    if product_patch.is_empty() && variants_patch.is_empty() {
        return Err(ApiError::NoChanges);
    }

    let videos = if product_patch.remove("videos").is_some() {
        if form.videos.is_empty() {
            match client.remove_product_videos(&initial.id).await {
                Ok(()) => VideoOutcome::Removed,
                Err(err) => {
                    // Removal failure does not block the rest of the save.
                    tracing::warn!(product = %initial.id, error = %err, "failed to remove product videos");
                    VideoOutcome::RemoveFailed
                }
            }
        } else {
            client
                .update_product_videos(&initial.id, &form.videos)
                .await?;
            VideoOutcome::Replaced
        }
    } else {
        VideoOutcome::Untouched
    };

    let mut variants_updated = 0;
    if !variants_patch.is_empty() {
        for variant in &form.variants {
            client.update_variant(&variant.to_patch()).await?;
            variants_updated += 1;
        }
    }

    let product_updated = if product_patch.is_empty() {
        false
    } else {
        client.update_product(&initial.id, &product_patch).await?;
        true
    };

    Ok(SaveOutcome {
        variants_updated,
        product_updated,
        videos,
    })
}
