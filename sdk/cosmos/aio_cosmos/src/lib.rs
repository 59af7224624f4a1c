// Copyright (c) Microsoft Corporation. All rights reserved.
// Licensed under the MIT License.

#![doc = include_str!("../README.md")]
// Docs.rs build is done with the nightly compiler, so we can enable nightly features in that build.
// In this case we enable two features:
// - `doc_auto_cfg`: Automatically scans `cfg` attributes and uses them to show those required configurations in the generated documentation.
// - `doc_cfg_hide`: Ignore the `doc` configuration for `doc_auto_cfg`.
// See https://doc.rust-lang.org/rustdoc/unstable-features.html#doc_auto_cfg-automatically-generate-doccfg for more details.
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![cfg_attr(docsrs, feature(doc_cfg_hide))]

pub mod auth;
pub mod clients;
pub mod constants;
mod error;
mod location_cache;
pub mod models;
mod options;
mod partition_key;
pub(crate) mod pipeline;
mod query;
pub(crate) mod resource_context;
mod response;
mod session;
pub(crate) mod utils;

#[doc(inline)]
pub use clients::CosmosClient;

pub use error::{CosmosError, Error, Result};
pub use options::*;
pub use partition_key::*;
pub use query::{Query, QueryPartitionStrategy};
pub use resource_context::ResourceType;
pub use response::{CosmosResponse, OperationStatus};

/// A stream of query result pages.
pub type FeedPager = futures::stream::BoxStream<'static, Result<CosmosResponse>>;
