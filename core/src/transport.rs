//! Executes `HttpRequest` values over the network.
//!
//! # Design
//! [`Transport`] is the seam between the pure client and real I/O.
//! [`UreqTransport`] is the production implementation; tests substitute a
//! closure. Non-2xx statuses come back as `HttpResponse` data so status
//! interpretation stays in `UserInfoClient`; only failures below HTTP
//! (timeouts, connection errors, unreadable bodies) become `TransportError`.

use std::io;

use serde_json::Value;

use crate::client::UserInfoClient;
use crate::error::{TransportError, UserInfoError};
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

pub trait Transport {
    fn execute(&self, req: &HttpRequest) -> Result<HttpResponse, TransportError>;
}

impl<F> Transport for F
where
    F: Fn(&HttpRequest) -> Result<HttpResponse, TransportError>,
{
    fn execute(&self, req: &HttpRequest) -> Result<HttpResponse, TransportError> {
        self(req)
    }
}

/// Blocking transport backed by a fresh ureq agent per request, configured
/// with the request's own timeout.
#[derive(Debug, Clone, Copy, Default)]
pub struct UreqTransport;

impl Transport for UreqTransport {
    fn execute(&self, req: &HttpRequest) -> Result<HttpResponse, TransportError> {
        let agent = ureq::Agent::config_builder()
            .timeout_global(Some(req.timeout))
            .http_status_as_error(false)
            .build()
            .new_agent();

        let mut builder = match req.method {
            HttpMethod::Get => agent.get(&req.path),
        };
        for (key, value) in &req.query {
            builder = builder.query(key, value);
        }
        for (key, value) in &req.headers {
            builder = builder.header(key.as_str(), value.as_str());
        }

        let mut response = builder.call().map_err(classify)?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();
        let body = response.body_mut().read_to_string().map_err(classify)?;

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

fn classify(err: ureq::Error) -> TransportError {
    match err {
        ureq::Error::Timeout(_) => TransportError::Timeout,
        ureq::Error::Io(e) if e.kind() == io::ErrorKind::TimedOut => TransportError::Timeout,
        other => TransportError::Other(other.to_string()),
    }
}

/// Fetch and decode the user record for `mall_id` over the network.
pub fn fetch_user_info(client: &UserInfoClient, mall_id: &str) -> Result<Value, UserInfoError> {
    fetch_user_info_with(&UreqTransport, client, mall_id)
}

/// [`fetch_user_info`] over an arbitrary [`Transport`].
pub fn fetch_user_info_with<T: Transport + ?Sized>(
    transport: &T,
    client: &UserInfoClient,
    mall_id: &str,
) -> Result<Value, UserInfoError> {
    let req = client.build_get_user_info(mall_id);
    tracing::debug!(mall_id, path = %req.path, timeout = ?req.timeout, "fetching user info");

    let response = transport.execute(&req).map_err(|err| {
        tracing::warn!(mall_id, error = %err, "user-info transport failure");
        match err {
            TransportError::Timeout => UserInfoError::Timeout {
                mall_id: mall_id.to_string(),
            },
            TransportError::Other(message) => UserInfoError::Transport {
                mall_id: mall_id.to_string(),
                message,
            },
        }
    })?;

    tracing::debug!(mall_id, status = response.status, "user-info response received");
    client.parse_get_user_info(mall_id, response)
}
