// Copyright (c) Microsoft Corporation. All rights reserved.
// Licensed under the MIT License.

//! Constants defining HTTP headers and other values relevant to Azure Cosmos DB APIs.

use azure_core::http::headers::HeaderName;

pub use azure_core::http::headers::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, USER_AGENT};

/// The REST API version sent on every request.
pub const API_VERSION: &str = "2018-12-31";

/// The crate version, reported in the `User-Agent` header.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

pub const CACHE_CONTROL: HeaderName = HeaderName::from_static("cache-control");
pub const HTTP_DATE: HeaderName = HeaderName::from_static("date");

pub const VERSION: HeaderName = HeaderName::from_static("x-ms-version");
pub const X_DATE: HeaderName = HeaderName::from_static("x-ms-date");
pub const SESSION_TOKEN: HeaderName = HeaderName::from_static("x-ms-session-token");
pub const CONSISTENCY_LEVEL: HeaderName = HeaderName::from_static("x-ms-consistency-level");
pub const CONTINUATION: HeaderName = HeaderName::from_static("x-ms-continuation");
pub const IS_CONTINUATION_EXPECTED: HeaderName =
    HeaderName::from_static("x-ms-documentdb-query-iscontinuationexpected");
pub const QUERY: HeaderName = HeaderName::from_static("x-ms-documentdb-isquery");
pub const QUERY_ENABLE_CROSS_PARTITION: HeaderName =
    HeaderName::from_static("x-ms-documentdb-query-enablecrosspartition");
pub const PARTITION_KEY: HeaderName = HeaderName::from_static("x-ms-documentdb-partitionkey");
pub const IS_UPSERT: HeaderName = HeaderName::from_static("x-ms-documentdb-is-upsert");
pub const INDEXING_DIRECTIVE: HeaderName = HeaderName::from_static("x-ms-indexing-directive");
pub const OFFER_THROUGHPUT: HeaderName = HeaderName::from_static("x-ms-offer-throughput");
pub const OFFER_AUTOPILOT_SETTINGS: HeaderName =
    HeaderName::from_static("x-ms-cosmos-offer-autopilot-settings");

pub const QUERY_CONTENT_TYPE: &str = "application/query+json";
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// The response field holding the documents of a query page.
pub const DOCUMENTS_FIELD: &str = "Documents";
