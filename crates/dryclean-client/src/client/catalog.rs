//! Service categories and order history.

use super::ApiClient;
use crate::error::ApiError;
use crate::types::{CategoriesData, Category, DataEnvelope, Order, OrdersData};

impl ApiClient {
    /// `GET category`. Public; a token is sent when present.
    ///
    /// # Errors
    ///
    /// Returns a transport, status, or decoding error.
    pub async fn list_categories(&self) -> Result<Vec<Category>, ApiError> {
        let url = self.endpoint(&["category"]);
        let mut request = self.client.get(url);
        if let Some(token) = self.token.as_deref() {
            request = request.bearer_auth(token);
        }
        let envelope: DataEnvelope<CategoriesData> =
            self.send_json(request, "list_categories").await?;
        Ok(envelope.data.categories)
    }

    /// `GET order/user/{userId}`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotAuthenticated`] without a token, otherwise a
    /// transport, status, or decoding error.
    pub async fn list_orders(&self, user_id: &str) -> Result<Vec<Order>, ApiError> {
        let url = self.endpoint(&["order", "user", user_id]);
        let request = self.authorized(self.client.get(url))?;
        let envelope: DataEnvelope<OrdersData> = self
            .send_json(request, &format!("list_orders(user_id={user_id})"))
            .await?;
        Ok(envelope.data.orders)
    }
}
