//! Typed client for the admin REST backend.
//!
//! [`AdminClient`] attaches the current session's bearer token to every
//! request and refreshes expired tokens through [`SessionStore`];
//! [`PublicClient`] covers the unauthenticated read-only endpoints. Every
//! call returns a `Result` so callers can tell a failed request apart from
//! an empty response.

pub mod auth;
pub mod client;
pub mod endpoints;
pub mod error;
pub mod forms;
pub mod orchestrate;
pub mod session;

pub use auth::AuthClient;
pub use client::{AdminClient, FileUpload, PublicClient};
pub use error::ApiError;
pub use forms::{
    BannerUpload, CategoryUpload, CouponUpload, ProductDraft, ProductEditForm, ProductFields,
    SloganUpload, VariantDraft, VariantEdit, VariantPatch, VariantSnapshot,
};
pub use orchestrate::{SaveOutcome, VideoOutcome};
pub use session::{AdminUser, BackendTokens, Session, SessionStore};
