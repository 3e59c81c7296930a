//! Reqwest-backed user directory adapter.
//!
//! Calls `GET {base}/users/usernames?users=a,b`, decodes the JSON array and
//! realigns it to the requested order. Unknown names are omitted. No retries
//! happen here.

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use tracing::debug;

use super::dto::UsuarioDto;
use crate::domain::{DirectoryUser, align_to_request};
use crate::domain::ports::{UserDirectory, UserDirectoryError};
use crate::outbound::http_support::{join_path, status_message};

const USERNAMES_PATH: &str = "users/usernames";

/// Directory adapter performing one GET per resolution.
#[derive(Debug, Clone)]
pub struct HttpUserDirectory {
    client: Client,
    base_url: Url,
}

impl HttpUserDirectory {
    /// Build an adapter over an existing, shared client.
    pub fn with_client(client: Client, base_url: Url) -> Self {
        Self { client, base_url }
    }

    fn usernames_url(&self, usernames: &[String]) -> Result<Url, UserDirectoryError> {
        let mut url = join_path(&self.base_url, USERNAMES_PATH).map_err(|error| {
            UserDirectoryError::transport(format!("invalid users service URL: {error}"))
        })?;
        url.query_pairs_mut()
            .append_pair("users", &usernames.join(","));
        Ok(url)
    }
}

#[async_trait]
impl UserDirectory for HttpUserDirectory {
    async fn resolve_users(
        &self,
        usernames: &[String],
    ) -> Result<Vec<DirectoryUser>, UserDirectoryError> {
        let url = self.usernames_url(usernames)?;
        debug!(%url, "resolving users");
        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }
        parse_users(usernames, body.as_ref())
    }
}

fn parse_users(usernames: &[String], body: &[u8]) -> Result<Vec<DirectoryUser>, UserDirectoryError> {
    let decoded: Vec<UsuarioDto> = serde_json::from_slice(body).map_err(|error| {
        UserDirectoryError::decode(format!("invalid users payload: {error}"))
    })?;
    let users: Vec<DirectoryUser> = decoded.into_iter().map(DirectoryUser::from).collect();
    Ok(align_to_request(usernames, &users))
}

fn map_transport_error(error: reqwest::Error) -> UserDirectoryError {
    if error.is_timeout() {
        UserDirectoryError::timeout(error.to_string())
    } else {
        UserDirectoryError::transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> UserDirectoryError {
    let message = status_message(status, body);
    match status {
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => {
            UserDirectoryError::timeout(message)
        }
        _ => UserDirectoryError::status(status.as_u16(), message),
    }
}
