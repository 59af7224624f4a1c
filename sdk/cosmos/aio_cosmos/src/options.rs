// Copyright (c) Microsoft Corporation. All rights reserved.
// Licensed under the MIT License.

use azure_core::http::HttpClient;
use std::sync::Arc;

use crate::QueryPartitionStrategy;

/// Options used when creating a [`CosmosClient`](crate::CosmosClient).
#[derive(Clone, Debug)]
pub struct CosmosClientOptions {
    /// Return an error for responses with status 400 or above. When `false`, such responses are
    /// returned as envelopes with [`OperationStatus::Failed`](crate::OperationStatus::Failed).
    pub raise_on_failure: bool,

    /// Log each request's headers (with the signature redacted) and response status at `info`.
    pub diagnostics: bool,

    /// Appended to the default `User-Agent`.
    pub user_agent_suffix: Option<String>,

    /// The transport. Defaults to the `azure_core` reqwest client when the `reqwest` or
    /// `reqwest_rustls` feature is enabled.
    pub transport: Option<Arc<dyn HttpClient>>,
}

impl Default for CosmosClientOptions {
    fn default() -> Self {
        Self {
            raise_on_failure: true,
            diagnostics: false,
            user_agent_suffix: None,
            transport: None,
        }
    }
}

impl CosmosClientOptions {
    /// Creates a new [`CosmosClientOptionsBuilder`] that can be used to construct a [`CosmosClientOptions`].
    ///
    /// # Examples
    ///
    /// ```rust
    /// let options = aio_cosmos::CosmosClientOptions::builder()
    ///     .with_raise_on_failure(false)
    ///     .build();
    /// assert!(!options.raise_on_failure);
    /// ```
    pub fn builder() -> CosmosClientOptionsBuilder {
        CosmosClientOptionsBuilder::default()
    }
}

/// Builder used to construct a [`CosmosClientOptions`].
///
/// Obtain a [`CosmosClientOptionsBuilder`] by calling [`CosmosClientOptions::builder()`]
#[derive(Default)]
pub struct CosmosClientOptionsBuilder(CosmosClientOptions);

impl CosmosClientOptionsBuilder {
    pub fn with_raise_on_failure(mut self, raise_on_failure: bool) -> Self {
        self.0.raise_on_failure = raise_on_failure;
        self
    }

    pub fn with_diagnostics(mut self, diagnostics: bool) -> Self {
        self.0.diagnostics = diagnostics;
        self
    }

    pub fn with_user_agent_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.0.user_agent_suffix = Some(suffix.into());
        self
    }

    pub fn with_transport(mut self, transport: Arc<dyn HttpClient>) -> Self {
        self.0.transport = Some(transport);
        self
    }

    /// Builds a [`CosmosClientOptions`] from the builder.
    ///
    /// This does not consume the builder, and can be called multiple times.
    pub fn build(&self) -> CosmosClientOptions {
        self.0.clone()
    }
}

/// Provisioned throughput for a new database or container.
///
/// At most one of `throughput` and `autoscale_ceiling` may be set; setting both fails the
/// request before it is sent.
#[derive(Clone, Debug, Default)]
pub struct ThroughputOptions {
    /// Manual throughput, in request units per second.
    pub throughput: Option<u32>,

    /// Maximum autoscale throughput, in request units per second.
    pub autoscale_ceiling: Option<u32>,
}

pub type CreateDatabaseOptions = ThroughputOptions;
pub type CreateContainerOptions = ThroughputOptions;

/// Options for single-document and bulk writes.
#[derive(Clone, Debug, Default)]
pub struct ItemOptions {
    /// Replace the document if one with the same id already exists.
    pub upsert: bool,

    /// `Some(true)` includes the document in the index, `Some(false)` excludes it.
    pub indexed: Option<bool>,

    /// Use this session token instead of the client's most recent one.
    pub session_token: Option<String>,
}

/// Options for reading and deleting a single document.
#[derive(Clone, Debug, Default)]
pub struct SessionOptions {
    /// Use this session token instead of the client's most recent one.
    pub session_token: Option<String>,
}

/// Options for [`ContainerClient::query_documents`](crate::clients::ContainerClient::query_documents).
#[derive(Clone, Debug)]
pub struct QueryOptions {
    pub partition_strategy: QueryPartitionStrategy,

    /// Session token for the first page, instead of the client's most recent one. Later pages
    /// use the token returned by the previous page.
    pub session_token: Option<String>,
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self {
            partition_strategy: QueryPartitionStrategy::CrossPartition,
            session_token: None,
        }
    }
}
