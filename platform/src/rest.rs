//! REST transport for the platform API.
//!
//! One [`RestBackend`] holds one shared `reqwest::Client`; every call
//! injects the project header (and the server API key when constructed
//! from an [`AdminConfig`]) and folds HTTP status codes into
//! [`PlatformError`] in a single place.

use crate::config::{AdminConfig, PlatformConfig};
use crate::error::{PlatformError, Result};
use crate::model::{Account, Collection, Document, Session, StoredFile, Token};
use crate::permission::Permission;
use crate::services::{Accounts, Collections, FileBuckets, OAuthProvider};
use crate::urls;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::json;
use std::future::Future;

/// Production platform backend over HTTPS.
#[derive(Debug, Clone)]
pub struct RestBackend {
    http: Client,
    config: PlatformConfig,
    api_key: Option<String>,
}

impl RestBackend {
    /// Create a client-scoped backend (no server API key).
    #[must_use]
    pub fn new(config: PlatformConfig) -> Self {
        Self {
            http: Client::new(),
            config,
            api_key: None,
        }
    }

    /// Create a privileged backend carrying the server API key.
    ///
    /// Collection and attribute management require this form.
    #[must_use]
    pub fn with_key(config: AdminConfig) -> Self {
        Self {
            http: Client::new(),
            config: config.platform,
            api_key: Some(config.api_key),
        }
    }

    /// The configuration this backend was built from.
    #[must_use]
    pub const fn config(&self) -> &PlatformConfig {
        &self.config
    }

    fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.config.endpoint, path);
        let mut builder = self
            .http
            .request(method, url)
            .header("X-Gatherly-Project", &self.config.project_id);
        if let Some(key) = &self.api_key {
            builder = builder.header("X-Gatherly-Key", key);
        }
        builder
    }
}

/// Fold a non-success response into the error taxonomy.
async fn into_error(response: reqwest::Response) -> PlatformError {
    let status = response.status();
    let message = response.text().await.unwrap_or_default();
    tracing::error!(status = status.as_u16(), %message, "platform request failed");
    match status {
        StatusCode::UNAUTHORIZED => PlatformError::Unauthorized,
        StatusCode::TOO_MANY_REQUESTS => PlatformError::RateLimited,
        StatusCode::NOT_FOUND => PlatformError::NotFound { message },
        StatusCode::CONFLICT => PlatformError::Conflict { message },
        other => PlatformError::Api {
            status: other.as_u16(),
            message,
        },
    }
}

async fn parse_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
    if response.status().is_success() {
        response
            .json::<T>()
            .await
            .map_err(|e| PlatformError::ResponseParseFailed(e.to_string()))
    } else {
        Err(into_error(response).await)
    }
}

async fn expect_success(response: reqwest::Response) -> Result<()> {
    if response.status().is_success() {
        Ok(())
    } else {
        Err(into_error(response).await)
    }
}

fn transport_error(e: &reqwest::Error) -> PlatformError {
    PlatformError::RequestFailed(e.to_string())
}

impl Accounts for RestBackend {
    fn create_account(
        &self,
        user_id: &str,
        email: &str,
        password: &str,
        name: &str,
    ) -> impl Future<Output = Result<Account>> + Send {
        async move {
            let response = self
                .request(Method::POST, "/account")
                .json(&json!({
                    "userId": user_id,
                    "email": email,
                    "password": password,
                    "name": name,
                }))
                .send()
                .await
                .map_err(|e| transport_error(&e))?;
            parse_json(response).await
        }
    }

    fn create_email_session(
        &self,
        email: &str,
        password: &str,
    ) -> impl Future<Output = Result<Session>> + Send {
        async move {
            let response = self
                .request(Method::POST, "/account/sessions/email")
                .json(&json!({ "email": email, "password": password }))
                .send()
                .await
                .map_err(|e| transport_error(&e))?;
            parse_json(response).await
        }
    }

    fn create_magic_url_token(
        &self,
        user_id: &str,
        email: &str,
        redirect_url: &str,
    ) -> impl Future<Output = Result<Token>> + Send {
        async move {
            let response = self
                .request(Method::POST, "/account/tokens/magic-url")
                .json(&json!({
                    "userId": user_id,
                    "email": email,
                    "url": redirect_url,
                }))
                .send()
                .await
                .map_err(|e| transport_error(&e))?;
            parse_json(response).await
        }
    }

    fn oauth2_session_url(
        &self,
        provider: OAuthProvider,
        success_url: &str,
        failure_url: &str,
    ) -> Result<String> {
        if self.config.endpoint.is_empty() {
            return Err(PlatformError::MissingConfig("GATHERLY_ENDPOINT"));
        }
        Ok(urls::oauth2_session_url(
            &self.config.endpoint,
            &self.config.project_id,
            provider,
            success_url,
            failure_url,
        ))
    }

    fn get_account(&self) -> impl Future<Output = Result<Account>> + Send {
        async move {
            let response = self
                .request(Method::GET, "/account")
                .send()
                .await
                .map_err(|e| transport_error(&e))?;
            parse_json(response).await
        }
    }

    fn delete_session(&self, session_id: &str) -> impl Future<Output = Result<()>> + Send {
        async move {
            let response = self
                .request(Method::DELETE, &format!("/account/sessions/{session_id}"))
                .send()
                .await
                .map_err(|e| transport_error(&e))?;
            expect_success(response).await
        }
    }
}

impl Collections for RestBackend {
    fn create_collection(
        &self,
        collection_id: &str,
        name: &str,
        permissions: &[Permission],
    ) -> impl Future<Output = Result<Collection>> + Send {
        async move {
            let path = format!("/databases/{}/collections", self.config.database_id);
            let response = self
                .request(Method::POST, &path)
                .json(&json!({
                    "collectionId": collection_id,
                    "name": name,
                    "permissions": permissions,
                }))
                .send()
                .await
                .map_err(|e| transport_error(&e))?;
            parse_json(response).await
        }
    }

    fn create_string_attribute(
        &self,
        collection_id: &str,
        key: &str,
        size: u32,
        required: bool,
        default: Option<&str>,
    ) -> impl Future<Output = Result<()>> + Send {
        async move {
            let path = format!(
                "/databases/{}/collections/{collection_id}/attributes/string",
                self.config.database_id
            );
            let response = self
                .request(Method::POST, &path)
                .json(&json!({
                    "key": key,
                    "size": size,
                    "required": required,
                    "default": default,
                }))
                .send()
                .await
                .map_err(|e| transport_error(&e))?;
            expect_success(response).await
        }
    }

    fn create_document(
        &self,
        collection_id: &str,
        document_id: &str,
        data: serde_json::Value,
    ) -> impl Future<Output = Result<Document>> + Send {
        async move {
            let path = format!(
                "/databases/{}/collections/{collection_id}/documents",
                self.config.database_id
            );
            let response = self
                .request(Method::POST, &path)
                .json(&json!({
                    "documentId": document_id,
                    "data": data,
                }))
                .send()
                .await
                .map_err(|e| transport_error(&e))?;
            parse_json(response).await
        }
    }

    fn delete_document(
        &self,
        collection_id: &str,
        document_id: &str,
    ) -> impl Future<Output = Result<()>> + Send {
        async move {
            let path = format!(
                "/databases/{}/collections/{collection_id}/documents/{document_id}",
                self.config.database_id
            );
            let response = self
                .request(Method::DELETE, &path)
                .send()
                .await
                .map_err(|e| transport_error(&e))?;
            expect_success(response).await
        }
    }
}

impl FileBuckets for RestBackend {
    fn create_file(
        &self,
        bucket_id: &str,
        file_id: &str,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> impl Future<Output = Result<StoredFile>> + Send {
        async move {
            let path = format!("/storage/buckets/{bucket_id}/files");
            let form = Form::new()
                .text("fileId", file_id.to_string())
                .part("file", Part::bytes(bytes).file_name(file_name.to_string()));
            let response = self
                .request(Method::POST, &path)
                .multipart(form)
                .send()
                .await
                .map_err(|e| transport_error(&e))?;
            parse_json(response).await
        }
    }

    fn delete_file(&self, bucket_id: &str, file_id: &str) -> impl Future<Output = Result<()>> + Send {
        async move {
            let path = format!("/storage/buckets/{bucket_id}/files/{file_id}");
            let response = self
                .request(Method::DELETE, &path)
                .send()
                .await
                .map_err(|e| transport_error(&e))?;
            expect_success(response).await
        }
    }
}
