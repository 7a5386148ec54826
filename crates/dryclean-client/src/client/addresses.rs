//! Address endpoints.

use dryclean_core::Address;

use super::ApiClient;
use crate::error::ApiError;
use crate::types::{AddressesData, DataEnvelope, MessageResponse};

impl ApiClient {
    /// Lists the saved addresses of `user_id` (`GET address/user/{userId}`).
    ///
    /// # Errors
    ///
    /// - [`ApiError::NotAuthenticated`] if no token is set.
    /// - [`ApiError::Api`] / [`ApiError::Http`] / [`ApiError::Deserialize`]
    ///   as described on the client.
    pub async fn list_addresses(&self, user_id: &str) -> Result<Vec<Address>, ApiError> {
        let url = self.endpoint(&["address", "user", user_id]);
        let request = self.authorized(self.client.get(url))?;
        let envelope: DataEnvelope<AddressesData> = self
            .send_json(request, &format!("list_addresses(user_id={user_id})"))
            .await?;
        Ok(envelope.data.addresses)
    }

    /// Deletes one address (`DELETE address/{id}`). Returns the backend's
    /// confirmation message.
    ///
    /// # Errors
    ///
    /// Same as [`ApiClient::list_addresses`].
    pub async fn delete_address(&self, address_id: &str) -> Result<String, ApiError> {
        let url = self.endpoint(&["address", address_id]);
        let request = self.authorized(self.client.delete(url))?;
        let response: MessageResponse = self
            .send_json(request, &format!("delete_address(id={address_id})"))
            .await?;
        Ok(response.message)
    }
}
