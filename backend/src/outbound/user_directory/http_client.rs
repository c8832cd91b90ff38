//! Reqwest-backed user directory adapter.
//!
//! This adapter owns transport details only: URL construction, trace
//! propagation, HTTP error mapping, and JSON decoding into user records.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, error};

use crate::domain::ports::{UserDirectory, UserDirectoryError};
use crate::domain::{TRACE_ID_HEADER, TraceId, UserId, UserRecord};

/// User directory adapter speaking JSON over HTTP to one base URL.
///
/// Requests target `{base}/users` and `{base}/users/{id}`. Any query string
/// on the base URL is kept.
#[derive(Clone)]
pub struct HttpUserDirectory {
    client: Client,
    base: Url,
}

impl HttpUserDirectory {
    /// Build an adapter with transport default timeouts.
    /// ```rust,ignore
    /// let directory = HttpUserDirectory::new(base_url)?;
    /// ```
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(base_url: Url) -> Result<Self, reqwest::Error> {
        Self::with_timeout(base_url, None)
    }

    /// Build an adapter that bounds every request by `timeout` when given.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn with_timeout(base_url: Url, timeout: Option<Duration>) -> Result<Self, reqwest::Error> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;
        Ok(Self {
            client,
            base: base_url,
        })
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        // http(s) URLs always have a hierarchical path.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn users_url(&self) -> Url {
        self.endpoint(&["users"])
    }

    fn user_url(&self, id: UserId) -> Url {
        let id = id.to_string();
        self.endpoint(&["users", id.as_str()])
    }

    async fn execute(&self, request: RequestBuilder) -> Result<Vec<u8>, UserDirectoryError> {
        let request = match TraceId::current() {
            Some(trace_id) => request.header(TRACE_ID_HEADER, trace_id.to_string()),
            None => request,
        };
        let response = request
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }
        Ok(body.to_vec())
    }

    async fn fetch_by_id(&self, id: UserId) -> Result<Option<UserRecord>, UserDirectoryError> {
        let body = self.execute(self.client.get(self.user_url(id))).await?;
        decode_optional(&body)
    }
}

#[async_trait]
impl UserDirectory for HttpUserDirectory {
    async fn list_all(&self) -> Result<Vec<UserRecord>, UserDirectoryError> {
        let body = self.execute(self.client.get(self.users_url())).await?;
        let records: Option<Vec<UserRecord>> = decode_optional(&body)?;
        let records = records.unwrap_or_default();
        debug!(count = records.len(), "listed user records");
        Ok(records)
    }

    async fn get_by_id(&self, id: UserId) -> Option<UserRecord> {
        match self.fetch_by_id(id).await {
            Ok(Some(record)) => Some(record),
            Ok(None) => {
                error!(user_id = %id, "user directory returned an empty record");
                None
            }
            Err(err) => {
                error!(user_id = %id, error = %err, "user directory lookup failed");
                None
            }
        }
    }

    async fn create(&self, record: &UserRecord) -> Result<UserRecord, UserDirectoryError> {
        let body = self
            .execute(self.client.post(self.users_url()).json(record))
            .await?;
        let created: Option<UserRecord> = decode_optional(&body)?;
        created.ok_or_else(|| UserDirectoryError::decode("create returned an empty body"))
    }

    async fn update(
        &self,
        id: UserId,
        record: &UserRecord,
    ) -> Result<UserRecord, UserDirectoryError> {
        self.execute(self.client.put(self.user_url(id)).json(record))
            .await?;
        self.get_by_id(id)
            .await
            .ok_or_else(|| UserDirectoryError::not_found_after_update(id))
    }

    async fn delete(&self, id: UserId) -> Result<(), UserDirectoryError> {
        self.execute(self.client.delete(self.user_url(id))).await?;
        Ok(())
    }
}

/// Decode a JSON body where blank bodies and `null` both mean "nothing".
fn decode_optional<T>(body: &[u8]) -> Result<Option<T>, UserDirectoryError>
where
    T: DeserializeOwned,
{
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }
    serde_json::from_slice::<Option<T>>(body).map_err(|err| {
        UserDirectoryError::decode(format!("invalid user JSON payload: {err}"))
    })
}

fn map_transport_error(error: reqwest::Error) -> UserDirectoryError {
    if error.is_timeout() {
        UserDirectoryError::timeout(error.to_string())
    } else {
        UserDirectoryError::transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> UserDirectoryError {
    let preview = body_preview(body);
    let message = if preview.is_empty() {
        "empty body".to_owned()
    } else {
        preview
    };
    UserDirectoryError::status(status.as_u16(), message)
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}


#[cfg(test)]
#[path = "http_client_tests.rs"]
mod network_tests;
