//! Integration tests for the product save flows using wiremock.

use chrono::{TimeZone, Utc};
use rust_decimal::Decimal;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use scentops_client::orchestrate::{
    create_product, create_variants, save_product_edit, VideoOutcome,
};
use scentops_client::{
    AdminClient, AdminUser, ApiError, BackendTokens, FileUpload, ProductDraft, ProductEditForm,
    ProductFields, Session, SessionStore, VariantDraft, VariantEdit,
};
use scentops_core::models::{Category, LocalizedText, Product, Variant};

const FAR_FUTURE_MS: i64 = 4_102_444_800_000;

async fn authed_client(server: &MockServer) -> AdminClient {
    let store = SessionStore::default();
    let client = AdminClient::with_base_url(&server.uri(), &server.uri(), 30, store.clone())
        .expect("client construction should not fail");
    store
        .set(Session {
            user: AdminUser {
                id: "admin-1".to_string(),
                email: "ops@example.com".to_string(),
            },
            tokens: BackendTokens {
                access_token: "access-1".to_string(),
                refresh_token: "refresh-1".to_string(),
                expires_at_ms: FAR_FUTURE_MS,
            },
        })
        .await;
    client
}

fn draft(fragrance: &str) -> VariantDraft {
    VariantDraft {
        fragrance: fragrance.to_string(),
        stock: 5,
        price: Decimal::from(200_000),
        discounted_price: None,
        discounted_from: None,
        discounted_to: None,
        images: vec![FileUpload::new("front.webp", vec![1, 2, 3])],
    }
}

fn variant_body(id: &str, fragrance: &str) -> serde_json::Value {
    serde_json::json!({
        "ok": true,
        "variant": {
            "_id": id,
            "fragrance": fragrance,
            "stock": 5,
            "price": 200000.0,
            "images": []
        }
    })
}

fn stored_variant(id: &str, fragrance: &str) -> Variant {
    Variant {
        id: Some(id.to_string()),
        fragrance: fragrance.to_string(),
        stock: 5,
        price: Decimal::from(200_000),
        discounted_price: None,
        discounted_from: None,
        discounted_to: None,
        images: vec!["https://cdn.example.com/variants/front.webp".to_string()],
    }
}

fn stored_product(videos: Option<Vec<String>>) -> Product {
    Product {
        id: "p1".to_string(),
        name: LocalizedText::new("Nến thơm", "Scented candle"),
        slug: LocalizedText::new("nen-thom", "scented-candle"),
        description: LocalizedText::new("Mô tả", "Description"),
        images: vec!["https://cdn.example.com/products/hero.webp".to_string()],
        status: "active".to_string(),
        category: Category {
            id: "c1".to_string(),
            name: LocalizedText::new("Nến", "Candles"),
            slug: LocalizedText::new("nen", "candles"),
            description: LocalizedText::new("", ""),
            image: None,
            status: "active".to_string(),
            products: vec!["p1".to_string()],
        },
        variants: vec![stored_variant("v1", "Amber Noir")],
        videos,
    }
}

fn edit_of(product: &Product) -> ProductEditForm {
    ProductEditForm {
        fields: ProductFields::from_product(product),
        variants: product
            .variants
            .iter()
            .map(|v| VariantEdit {
                id: v.id.clone().expect("stored variants carry ids"),
                fragrance: v.fragrance.clone(),
                stock: v.stock,
                price: v.price,
                discounted_price: v.discounted_price,
                discounted_from: v.discounted_from,
                discounted_to: v.discounted_to,
                images: v
                    .images
                    .iter()
                    .map(|url| {
                        FileUpload::new(
                            scentops_client::forms::file_name_from_url(url),
                            vec![],
                        )
                    })
                    .collect(),
            })
            .collect(),
        videos: vec![],
    }
}

#[tokio::test]
async fn variants_are_created_sequentially_and_ids_collected_in_order() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/admin-variants/create"))
        .and(body_string_contains("Amber Noir"))
        .respond_with(ResponseTemplate::new(200).set_body_json(variant_body("va", "Amber Noir")))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/admin-variants/create"))
        .and(body_string_contains("Bergamot"))
        .respond_with(ResponseTemplate::new(200).set_body_json(variant_body("vb", "Bergamot")))
        .mount(&server)
        .await;

    let client = authed_client(&server).await;
    let ids = create_variants(&client, &[draft("Amber Noir"), draft("Bergamot")])
        .await
        .expect("both variants should be created");

    assert_eq!(ids, vec!["va".to_string(), "vb".to_string()]);
}

#[tokio::test]
async fn a_failing_variant_stops_the_sequence_before_later_variants() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/admin-variants/create"))
        .and(body_string_contains("Amber Noir"))
        .respond_with(ResponseTemplate::new(200).set_body_json(variant_body("va", "Amber Noir")))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/admin-variants/create"))
        .and(body_string_contains("Bergamot"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = authed_client(&server).await;
    let err = create_variants(
        &client,
        &[draft("Amber Noir"), draft("Bergamot"), draft("Cedarwood")],
    )
    .await
    .expect_err("the second variant must fail");
    assert!(err.is_retryable(), "500 should be retryable: {err:?}");

    let requests = server.received_requests().await.expect("recording enabled");
    let creates: Vec<_> = requests
        .iter()
        .filter(|r| r.url.path() == "/admin-variants/create")
        .collect();
    assert_eq!(creates.len(), 2, "Cedarwood must never be attempted");
    for request in creates {
        let body = String::from_utf8_lossy(&request.body);
        assert!(!body.contains("Cedarwood"));
    }
}

#[tokio::test]
async fn incomplete_discount_window_aborts_without_any_network_call() {
    let server = MockServer::start().await;
    let client = authed_client(&server).await;

    let mut bad = draft("Amber Noir");
    bad.discounted_price = Some(Decimal::from(150_000));
    bad.discounted_from = Some(Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap());
    // discounted_to deliberately missing

    let err = create_variants(&client, &[bad])
        .await
        .expect_err("validation must fail");
    assert!(matches!(err, ApiError::Core(_)), "got: {err:?}");

    let requests = server.received_requests().await.expect("recording enabled");
    assert!(requests.is_empty(), "no network call expected");
}

#[tokio::test]
async fn product_create_runs_variants_then_record_then_videos() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/admin-variants/create"))
        .and(body_string_contains("Amber Noir"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(variant_body("id-amber-1", "Amber Noir")),
        )
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/admin-variants/create"))
        .and(body_string_contains("Bergamot"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(variant_body("id-bergamot-2", "Bergamot")),
        )
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/admin-products/create"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "ok": true,
            "product": serde_json::to_value(stored_product(None)).expect("product serializes"),
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/admin-products/upload-videos"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "ok": true })))
        .expect(1)
        .mount(&server)
        .await;

    let client = authed_client(&server).await;
    let product_draft = ProductDraft {
        name: LocalizedText::new("Nến thơm", "Scented candle"),
        description: LocalizedText::new("Mô tả", "Description"),
        category: "c1".to_string(),
        status: "active".to_string(),
        images: vec![FileUpload::new("hero.webp", vec![1, 2, 3])],
        variants: vec![draft("Amber Noir"), draft("Bergamot")],
        videos: vec![FileUpload::new("intro.mp4", vec![9, 9, 9])],
    };

    let product = create_product(&client, &product_draft)
        .await
        .expect("the full create flow should succeed");
    assert_eq!(product.id, "p1");

    let requests = server.received_requests().await.expect("recording enabled");
    let paths: Vec<_> = requests.iter().map(|r| r.url.path().to_string()).collect();
    assert_eq!(
        paths,
        vec![
            "/admin-variants/create",
            "/admin-variants/create",
            "/admin-products/create",
            "/admin-products/upload-videos",
        ],
        "variants must be created before the product record, videos last"
    );

    // The product record carries every collected variant id, in input order.
    let create_body = String::from_utf8_lossy(&requests[2].body);
    let amber = create_body
        .find("id-amber-1")
        .expect("first variant id in the product body");
    let bergamot = create_body
        .find("id-bergamot-2")
        .expect("second variant id in the product body");
    assert!(amber < bergamot, "variant ids must keep input order");
}

#[tokio::test]
async fn status_only_edit_sends_exactly_one_patch_call() {
    let server = MockServer::start().await;

    let initial = stored_product(None);
    let mut form = edit_of(&initial);
    form.fields.status = "archived".to_string();

    Mock::given(method("PUT"))
        .and(path("/admin-products/update"))
        .and(wiremock::matchers::body_json(serde_json::json!({
            "status": "archived",
            "_id": "p1",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "ok": true,
            "product": serde_json::to_value(&initial).expect("product serializes"),
        })))
        .mount(&server)
        .await;

    let client = authed_client(&server).await;
    let outcome = save_product_edit(&client, &initial, &form)
        .await
        .expect("save should succeed");

    assert!(outcome.product_updated);
    assert_eq!(outcome.variants_updated, 0);
    assert_eq!(outcome.videos, VideoOutcome::Untouched);

    let requests = server.received_requests().await.expect("recording enabled");
    assert_eq!(requests.len(), 1, "exactly one network call expected");
}

#[tokio::test]
async fn unchanged_form_is_rejected_before_any_network_call() {
    let server = MockServer::start().await;

    let initial = stored_product(None);
    let form = edit_of(&initial);

    let client = authed_client(&server).await;
    let err = save_product_edit(&client, &initial, &form)
        .await
        .expect_err("no-op submissions are user errors");
    assert!(matches!(err, ApiError::NoChanges), "got: {err:?}");

    let requests = server.received_requests().await.expect("recording enabled");
    assert!(requests.is_empty());
}

#[tokio::test]
async fn emptied_video_list_triggers_removal_and_skips_empty_product_patch() {
    let server = MockServer::start().await;

    let initial = stored_product(Some(vec![
        "https://cdn.example.com/videos/intro.mp4".to_string()
    ]));
    let mut form = edit_of(&initial);
    // The admin removed every video: the working copy carries an empty list.
    form.fields.videos = Some(vec![]);
    form.videos = vec![];

    Mock::given(method("DELETE"))
        .and(path("/admin-products/remove-videos/p1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "ok": true })))
        .expect(1)
        .mount(&server)
        .await;

    let client = authed_client(&server).await;
    let outcome = save_product_edit(&client, &initial, &form)
        .await
        .expect("save should succeed");

    assert_eq!(outcome.videos, VideoOutcome::Removed);
    assert!(
        !outcome.product_updated,
        "the patch only contained videos, so no product update should fire"
    );

    let requests = server.received_requests().await.expect("recording enabled");
    assert_eq!(requests.len(), 1);
}

#[tokio::test]
async fn failed_video_removal_is_reported_but_does_not_abort_the_save() {
    let server = MockServer::start().await;

    let initial = stored_product(Some(vec![
        "https://cdn.example.com/videos/intro.mp4".to_string()
    ]));
    let mut form = edit_of(&initial);
    form.fields.videos = Some(vec![]);
    form.videos = vec![];
    form.fields.status = "archived".to_string();

    Mock::given(method("DELETE"))
        .and(path("/admin-products/remove-videos/p1"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("PUT"))
        .and(path("/admin-products/update"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "ok": true,
            "product": serde_json::to_value(&initial).expect("product serializes"),
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = authed_client(&server).await;
    let outcome = save_product_edit(&client, &initial, &form)
        .await
        .expect("removal failure must not abort the save");

    assert_eq!(outcome.videos, VideoOutcome::RemoveFailed);
    assert!(
        outcome.product_updated,
        "the status change must still be sent after the failed removal"
    );
}

#[tokio::test]
async fn failed_video_replacement_aborts_before_variant_and_product_updates() {
    let server = MockServer::start().await;

    let initial = stored_product(Some(vec![
        "https://cdn.example.com/videos/intro.mp4".to_string()
    ]));
    let mut form = edit_of(&initial);
    form.fields.videos = Some(vec!["teaser.mp4".to_string()]);
    form.videos = vec![FileUpload::new("teaser.mp4", vec![7, 7, 7])];
    form.fields.status = "archived".to_string();
    form.variants[0].stock = 42;

    Mock::given(method("PUT"))
        .and(path("/admin-products/update-videos"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let client = authed_client(&server).await;
    let err = save_product_edit(&client, &initial, &form)
        .await
        .expect_err("a failed replacement upload must abort the save");
    assert!(err.is_retryable(), "500 should be retryable: {err:?}");

    let requests = server.received_requests().await.expect("recording enabled");
    assert!(
        requests
            .iter()
            .all(|r| r.url.path() == "/admin-products/update-videos"),
        "no variant or product update may follow the failed upload"
    );
}

#[tokio::test]
async fn changed_variant_rows_are_updated_before_the_product_patch() {
    let server = MockServer::start().await;

    let initial = stored_product(None);
    let mut form = edit_of(&initial);
    form.variants[0].stock = 42;
    form.fields.status = "archived".to_string();

    Mock::given(method("PUT"))
        .and(path("/admin-variants/update"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "ok": true })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("PUT"))
        .and(path("/admin-products/update"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "ok": true,
            "product": serde_json::to_value(&initial).expect("product serializes"),
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = authed_client(&server).await;
    let outcome = save_product_edit(&client, &initial, &form)
        .await
        .expect("save should succeed");

    assert_eq!(outcome.variants_updated, 1);
    assert!(outcome.product_updated);

    let requests = server.received_requests().await.expect("recording enabled");
    let paths: Vec<_> = requests.iter().map(|r| r.url.path().to_string()).collect();
    let variant_pos = paths
        .iter()
        .position(|p| p == "/admin-variants/update")
        .expect("variant update issued");
    let product_pos = paths
        .iter()
        .position(|p| p == "/admin-products/update")
        .expect("product update issued");
    assert!(
        variant_pos < product_pos,
        "variant updates must complete before the product patch"
    );
}
