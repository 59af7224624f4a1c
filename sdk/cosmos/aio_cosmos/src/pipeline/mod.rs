// Copyright (c) Microsoft Corporation. All rights reserved.
// Licensed under the MIT License.

mod headers;

pub(crate) use headers::{HeaderBuilder, HeaderOptions};

use azure_core::http::{headers::Headers, HttpClient, Method, RawResponse, Request, StatusCode};
use bytes::Bytes;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info, trace, warn};
use url::Url;

use crate::{
    constants,
    location_cache::LocationCache,
    resource_context::ResourceLink,
    session::SessionState,
    CosmosError, CosmosResponse, OperationStatus, Result,
};

/// Shared state behind every client handle: signing, endpoints, session and transport.
#[derive(Debug, Clone)]
pub(crate) struct CosmosPipeline {
    header_builder: HeaderBuilder,
    transport: Arc<dyn HttpClient>,
    locations: Arc<LocationCache>,
    session: Arc<SessionState>,
    raise_on_failure: bool,
    diagnostics: bool,
}

impl CosmosPipeline {
    pub fn new(
        header_builder: HeaderBuilder,
        transport: Arc<dyn HttpClient>,
        endpoint: Url,
        raise_on_failure: bool,
        diagnostics: bool,
    ) -> Self {
        Self {
            header_builder,
            transport,
            locations: Arc::new(LocationCache::new(endpoint)),
            session: Arc::new(SessionState::new()),
            raise_on_failure,
            diagnostics,
        }
    }

    pub fn locations(&self) -> &LocationCache {
        &self.locations
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    /// Builds the signed headers for a request against `link`.
    pub fn headers(
        &self,
        method: Method,
        link: &ResourceLink,
        options: &HeaderOptions<'_>,
    ) -> Result<Headers> {
        self.header_builder.build(
            method,
            &link.link_for_signing(),
            link.resource_type(),
            options,
        )
    }

    /// A request for `link` against a writable endpoint.
    pub fn request(&self, method: Method, link: &ResourceLink, headers: Headers) -> Request {
        signed_request(link.url(&self.locations.writable()), method, headers)
    }

    /// Sends `request` and buffers the whole response body. Transport errors are returned as
    /// [`Error::Transport`](crate::Error::Transport) and never retried.
    pub async fn send(&self, request: &Request) -> Result<RawResponse> {
        trace!(method = ?request.method(), url = %request.url(), "sending request");
        if self.diagnostics {
            let sent: Vec<_> = request
                .headers()
                .iter()
                .map(|(name, value)| {
                    if *name == constants::AUTHORIZATION {
                        format!("{}: <redacted>", name.as_str())
                    } else {
                        format!("{}: {}", name.as_str(), value.as_str())
                    }
                })
                .collect();
            info!(method = ?request.method(), url = %request.url(), headers = ?sent, "request");
        }

        let response = self
            .transport
            .execute_request(request)
            .await?
            .try_into_raw_response()
            .await?;

        if self.diagnostics {
            info!(
                method = ?request.method(),
                url = %request.url(),
                status = u16::from(response.status()),
                "response"
            );
        }
        Ok(response)
    }

    /// Turns a transport response into a [`CosmosResponse`].
    ///
    /// Failures are raised before the session is touched. In tolerate mode the session is
    /// still updated from a failed response, since it may carry a valid token.
    pub fn interpret(
        &self,
        response: RawResponse,
        error_message: &str,
        manage_session: bool,
        subkey: Option<&str>,
    ) -> Result<CosmosResponse> {
        let status = response.status();
        let failed = is_failure(status);
        let data = decode_body(&response, failed)?;

        if failed && self.raise_on_failure {
            return Err(CosmosError::new(status, data, error_message).into());
        }

        let session_token = if manage_session {
            let token = response
                .headers()
                .get_optional_str(&constants::SESSION_TOKEN)
                .map(str::to_string);
            debug!(session_token = ?token, "updating session token");
            self.session.set(token.clone());
            token
        } else {
            None
        };

        if failed {
            warn!(status = u16::from(status), "{}", error_message);
            return Ok(CosmosResponse {
                status: OperationStatus::Failed,
                code: status,
                session_token,
                error: Some(error_message.to_string()),
                data,
            });
        }

        let data = match subkey {
            Some(key) => match data {
                Value::Object(mut map) => map
                    .remove(key)
                    .ok_or_else(|| crate::Error::MissingField(key.to_string()))?,
                _ => return Err(crate::Error::MissingField(key.to_string())),
            },
            None => data,
        };

        Ok(CosmosResponse {
            status: OperationStatus::Ok,
            code: status,
            session_token,
            error: None,
            data,
        })
    }
}

/// Builds a request carrying `headers`.
pub(crate) fn signed_request(url: Url, method: Method, headers: Headers) -> Request {
    let mut request = Request::new(url, method);
    for (name, value) in headers.iter() {
        request.insert_header(name.clone(), value.clone());
    }
    request
}

/// Serializes `body` as the JSON payload of `request`.
pub(crate) fn set_json_body<T: Serialize + ?Sized>(
    request: &mut Request,
    body: &T,
) -> Result<()> {
    request.set_body(Bytes::from(serde_json::to_vec(body)?));
    Ok(())
}

/// Any status of 400 or above is a failure.
pub(crate) fn is_failure(status: StatusCode) -> bool {
    u16::from(status) >= 400
}

/// An empty body decodes to `null`. A failed response whose body is not JSON keeps its text.
pub(crate) fn decode_body(response: &RawResponse, failed: bool) -> Result<Value> {
    let body: &[u8] = response.body().as_ref();
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Null);
    }
    match serde_json::from_slice(body) {
        Ok(value) => Ok(value),
        Err(_) if failed => Ok(Value::String(String::from_utf8_lossy(body).into_owned())),
        Err(e) => Err(e.into()),
    }
}
