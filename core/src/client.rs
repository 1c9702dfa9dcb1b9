//! Stateless request builder and response parser for the user-info endpoint.
//!
//! # Design
//! `UserInfoClient` holds only a base URL and a timeout. `build_get_user_info`
//! produces an `HttpRequest`; `parse_get_user_info` consumes the matching
//! `HttpResponse`. The round-trip itself happens in [`crate::transport`], so
//! everything here is deterministic and tested without a network.

use serde_json::Value;
use std::time::Duration;

use crate::config::ClientConfig;
use crate::error::UserInfoError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

pub const USER_INFO_PATH: &str = "/ptool_userinfo/user_info.php";

/// Characters of an undecodable body kept in [`UserInfoError::Decode`].
pub const SNIPPET_CHARS: usize = 200;

#[derive(Debug, Clone)]
pub struct UserInfoClient {
    base_url: String,
    timeout: Duration,
}

impl UserInfoClient {
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
        }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(&config.base_url, config.timeout)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn build_get_user_info(&self, mall_id: &str) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: format!("{}{USER_INFO_PATH}", self.base_url),
            query: vec![
                ("display_type".to_string(), "json".to_string()),
                ("user_id".to_string(), mall_id.to_string()),
            ],
            headers: vec![("accept".to_string(), "application/json".to_string())],
            timeout: self.timeout,
        }
    }

    /// Decode the user record. Anything but a 200 is an error, whatever the
    /// body holds.
    pub fn parse_get_user_info(
        &self,
        mall_id: &str,
        response: HttpResponse,
    ) -> Result<Value, UserInfoError> {
        if response.status != 200 {
            tracing::warn!(mall_id, status = response.status, "user-info request rejected");
            return Err(UserInfoError::Status {
                status: response.status,
                body: response.body,
            });
        }

        serde_json::from_str(&response.body).map_err(|e| {
            tracing::warn!(
                mall_id,
                content_type = response.header("content-type"),
                "user-info response is not JSON"
            );
            UserInfoError::Decode {
                mall_id: mall_id.to_string(),
                message: e.to_string(),
                snippet: response.body.chars().take(SNIPPET_CHARS).collect(),
            }
        })
    }
}
