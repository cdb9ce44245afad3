//! Coupons, orders (the payments family), donations, and customers.

use serde::Deserialize;

use scentops_core::models::{Coupon, Customer, Donation, Order, OrderStatus};

use crate::client::AdminClient;
use crate::endpoints::Ack;
use crate::error::ApiError;
use crate::forms::CouponUpload;

#[derive(Debug, Deserialize)]
struct CouponsResponse {
    coupons: Vec<Coupon>,
}

#[derive(Debug, Deserialize)]
struct CouponResponse {
    coupon: Coupon,
}

#[derive(Debug, Deserialize)]
struct OrdersResponse {
    orders: Vec<Order>,
}

#[derive(Debug, Deserialize)]
struct OrderResponse {
    order: Order,
}

#[derive(Debug, Deserialize)]
struct UsersResponse {
    users: Vec<Customer>,
}

#[derive(Debug, Deserialize)]
struct UserResponse {
    user: Customer,
}

#[derive(Debug, Deserialize)]
struct DonationsResponse {
    donations: Vec<Donation>,
}

impl AdminClient {
    /// # Errors
    ///
    /// - [`ApiError::Api`] on an `ok: false` envelope.
    /// - [`ApiError::Http`] / [`ApiError::Status`] on transport failure.
    /// - [`ApiError::Deserialize`] if the response shape is unexpected.
    pub async fn list_coupons(&self) -> Result<Vec<Coupon>, ApiError> {
        let body: CouponsResponse = self.get_json("admin-coupons", "list_coupons").await?;
        Ok(body.coupons)
    }

    /// # Errors
    ///
    /// Same taxonomy as [`AdminClient::list_coupons`].
    pub async fn create_coupon(&self, upload: &CouponUpload) -> Result<Coupon, ApiError> {
        let body: CouponResponse = self
            .post_json("admin-coupons/create", upload, "create_coupon")
            .await?;
        Ok(body.coupon)
    }

    /// Partial coupon update: changed fields plus `_id`.
    ///
    /// # Errors
    ///
    /// [`ApiError::NoChanges`] for an empty patch, otherwise the same
    /// taxonomy as [`AdminClient::list_coupons`].
    pub async fn update_coupon(
        &self,
        id: &str,
        patch: &scentops_core::diff::Patch,
    ) -> Result<Coupon, ApiError> {
        if patch.is_empty() {
            return Err(ApiError::NoChanges);
        }
        let mut payload = patch.as_map().clone();
        payload.insert("_id".to_string(), serde_json::Value::String(id.to_string()));
        let body: CouponResponse = self
            .put_json("admin-coupons/update", &payload, "update_coupon")
            .await?;
        Ok(body.coupon)
    }

    /// # Errors
    ///
    /// Same taxonomy as [`AdminClient::list_coupons`].
    pub async fn delete_coupon(&self, id: &str) -> Result<(), ApiError> {
        let _: Ack = self
            .delete_json(&format!("admin-coupons/delete/{id}"), "delete_coupon")
            .await?;
        Ok(())
    }

    /// Lists all orders with their payment status.
    ///
    /// # Errors
    ///
    /// Same taxonomy as [`AdminClient::list_coupons`].
    pub async fn list_orders(&self) -> Result<Vec<Order>, ApiError> {
        let body: OrdersResponse = self.get_json("admin-payments", "list_orders").await?;
        Ok(body.orders)
    }

    /// # Errors
    ///
    /// Same taxonomy as [`AdminClient::list_coupons`].
    pub async fn get_order(&self, id: &str) -> Result<Order, ApiError> {
        let body: OrderResponse = self
            .get_json(&format!("admin-payments/{id}"), "get_order")
            .await?;
        Ok(body.order)
    }

    /// Moves an order to a new payment status.
    ///
    /// # Errors
    ///
    /// Same taxonomy as [`AdminClient::list_coupons`].
    pub async fn update_order_status(
        &self,
        id: &str,
        status: OrderStatus,
    ) -> Result<Order, ApiError> {
        let payload = serde_json::json!({ "_id": id, "status": status });
        let body: OrderResponse = self
            .put_json("admin-payments/update", &payload, "update_order_status")
            .await?;
        Ok(body.order)
    }

    /// Lists registered customers.
    ///
    /// # Errors
    ///
    /// Same taxonomy as [`AdminClient::list_coupons`].
    pub async fn list_customers(&self) -> Result<Vec<Customer>, ApiError> {
        let body: UsersResponse = self.get_json("admin-users", "list_customers").await?;
        Ok(body.users)
    }

    /// # Errors
    ///
    /// Same taxonomy as [`AdminClient::list_coupons`].
    pub async fn get_customer(&self, id: &str) -> Result<Customer, ApiError> {
        let body: UserResponse = self
            .get_json(&format!("admin-users/{id}"), "get_customer")
            .await?;
        Ok(body.user)
    }

    /// # Errors
    ///
    /// Same taxonomy as [`AdminClient::list_coupons`].
    pub async fn list_donations(&self) -> Result<Vec<Donation>, ApiError> {
        let body: DonationsResponse = self.get_json("admin-donations", "list_donations").await?;
        Ok(body.donations)
    }
}
