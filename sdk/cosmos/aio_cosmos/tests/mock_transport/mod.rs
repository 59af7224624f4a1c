// Copyright (c) Microsoft Corporation. All rights reserved.
// Licensed under the MIT License.

#![allow(dead_code)]

use std::{
    io,
    sync::{Arc, Mutex},
    time::Duration,
};

use aio_cosmos::{CosmosClient, CosmosClientOptions};
use async_trait::async_trait;
use azure_core::{
    error::ErrorKind,
    http::{
        headers::{HeaderName, Headers},
        AsyncRawResponse, Body, HttpClient, Request, StatusCode,
    },
};
use serde_json::Value;

/// Base64 of a 64-byte key, in the shape of a real account key.
pub const ACCOUNT_KEY: &str =
    "8F8xXXOptJxkblM1DBXW7a6NMI5oE8NnwPGYBSwxLCd3aKrIpLHaDNbg4rQpc3gIJ2UkTqJ3oyz5MRWcg9zuDw==";
pub const ACCOUNT_ENDPOINT: &str = "https://mockaccount.documents.azure.com:443/";

/// A canned response, optionally delayed.
#[derive(Debug, Clone)]
pub struct MockResponse {
    pub status: u16,
    pub headers: Vec<(&'static str, String)>,
    pub body: String,
    pub delay: Option<Duration>,
    /// Fail the request with an I/O error carrying this message instead of answering.
    pub io_error: Option<&'static str>,
}

impl MockResponse {
    pub fn json(status: u16, body: Value) -> Self {
        Self::text(status, body.to_string())
    }

    pub fn empty(status: u16) -> Self {
        Self::text(status, String::new())
    }

    pub fn text(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: body.into(),
            delay: None,
            io_error: None,
        }
    }

    /// The connection fails before any response arrives.
    pub fn io_error(message: &'static str) -> Self {
        Self {
            io_error: Some(message),
            ..Self::empty(0)
        }
    }

    pub fn with_header(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.headers.push((name, value.into()));
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

type Responder = dyn Fn(&Request, usize) -> MockResponse + Send + Sync;

/// An [`HttpClient`] that answers from a closure and records every request it sees.
///
/// The closure receives the request and its zero-based arrival index.
pub struct MockTransport {
    responder: Box<Responder>,
    requests: Mutex<Vec<Request>>,
}

impl std::fmt::Debug for MockTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockTransport").finish_non_exhaustive()
    }
}

impl MockTransport {
    pub fn new(
        responder: impl Fn(&Request, usize) -> MockResponse + Send + Sync + 'static,
    ) -> Arc<Self> {
        Arc::new(Self {
            responder: Box::new(responder),
            requests: Mutex::new(Vec::new()),
        })
    }

    /// Replies with the given responses in order, one per request.
    pub fn sequence(responses: Vec<MockResponse>) -> Arc<Self> {
        Self::new(move |_, index| {
            responses
                .get(index)
                .cloned()
                .unwrap_or_else(|| panic!("unexpected request #{index}"))
        })
    }

    pub fn requests(&self) -> Vec<Request> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl HttpClient for MockTransport {
    async fn execute_request(&self, request: &Request) -> azure_core::Result<AsyncRawResponse> {
        let index = {
            let mut requests = self.requests.lock().unwrap();
            requests.push(request.clone());
            requests.len() - 1
        };
        let response = (self.responder)(request, index);
        if let Some(delay) = response.delay {
            tokio::time::sleep(delay).await;
        }

        if let Some(message) = response.io_error {
            return Err(azure_core::Error::new(
                ErrorKind::Io,
                io::Error::new(io::ErrorKind::ConnectionReset, message),
            ));
        }

        let mut headers = Headers::new();
        for (name, value) in response.headers {
            headers.insert(HeaderName::from_static(name), value);
        }
        Ok(AsyncRawResponse::from_bytes(
            StatusCode::from(response.status),
            headers,
            response.body,
        ))
    }
}

pub fn client(transport: Arc<MockTransport>, raise_on_failure: bool) -> CosmosClient {
    let options = CosmosClientOptions::builder()
        .with_transport(transport)
        .with_raise_on_failure(raise_on_failure)
        .build();
    CosmosClient::new(ACCOUNT_ENDPOINT, ACCOUNT_KEY, Some(options)).unwrap()
}

pub fn header<'a>(request: &'a Request, name: &'static str) -> Option<&'a str> {
    request
        .headers()
        .get_optional_str(&HeaderName::from_static(name))
}

pub fn body(request: &Request) -> Value {
    match request.body() {
        Body::Bytes(bytes) => serde_json::from_slice(bytes).unwrap(),
        #[allow(unreachable_patterns)]
        _ => panic!("request body is not buffered"),
    }
}
