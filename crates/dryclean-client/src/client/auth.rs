//! Authentication endpoints. None of them require a token.

use reqwest::multipart::{Form, Part};

use super::ApiClient;
use crate::error::ApiError;
use crate::types::{
    EmailRequest, LoginRequest, LoginResponse, MessageResponse, RegisterRequest,
    VerifyOtpRequest, VerifyOtpResponse,
};

impl ApiClient {
    /// `POST auth/login`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Api`] with the backend message on rejected
    /// credentials, or a transport/decoding error.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, ApiError> {
        let url = self.endpoint(&["auth", "login"]);
        let request = self
            .client
            .post(url)
            .json(&LoginRequest { email, password });
        let response: LoginResponse = self.send_json(request, "login").await?;
        tracing::info!(user_id = %response.user_id, "login succeeded");
        Ok(response)
    }

    /// `POST auth/register` as multipart, with an optional profile image.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Http`] if the image MIME type is invalid or the
    /// request fails, otherwise as for [`ApiClient::login`].
    pub async fn register(&self, form: RegisterRequest) -> Result<MessageResponse, ApiError> {
        let url = self.endpoint(&["auth", "register"]);
        let mut multipart = Form::new()
            .text("name", form.name)
            .text("email", form.email)
            .text("phone", form.phone)
            .text("password", form.password);

        if let Some(image) = form.profile_image {
            let part = Part::bytes(image.bytes)
                .file_name(image.file_name)
                .mime_str(&image.mime_type)?;
            multipart = multipart.part("profileImage", part);
        }

        let request = self.client.post(url).multipart(multipart);
        self.send_json(request, "register").await
    }

    /// `POST auth/forgot-password`.
    ///
    /// # Errors
    ///
    /// As for [`ApiClient::login`].
    pub async fn forgot_password(&self, email: &str) -> Result<MessageResponse, ApiError> {
        let url = self.endpoint(&["auth", "forgot-password"]);
        let request = self.client.post(url).json(&EmailRequest { email });
        self.send_json(request, "forgot_password").await
    }

    /// `POST auth/verify-otp`.
    ///
    /// # Errors
    ///
    /// As for [`ApiClient::login`].
    pub async fn verify_otp(&self, email: &str, otp: &str) -> Result<VerifyOtpResponse, ApiError> {
        let url = self.endpoint(&["auth", "verify-otp"]);
        let request = self
            .client
            .post(url)
            .json(&VerifyOtpRequest { email, otp });
        self.send_json(request, "verify_otp").await
    }

    /// `POST auth/resend-otp`.
    ///
    /// # Errors
    ///
    /// As for [`ApiClient::login`].
    pub async fn resend_otp(&self, email: &str) -> Result<MessageResponse, ApiError> {
        let url = self.endpoint(&["auth", "resend-otp"]);
        let request = self.client.post(url).json(&EmailRequest { email });
        self.send_json(request, "resend_otp").await
    }
}
