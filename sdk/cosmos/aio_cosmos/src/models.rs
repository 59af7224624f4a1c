// Copyright (c) Microsoft Corporation. All rights reserved.
// Licensed under the MIT License.

//! Model types sent to and received from Cosmos DB.

use serde::{Deserialize, Serialize};
use url::Url;

/// The database account, as returned by a GET on the account endpoint.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountProperties {
    #[serde(default)]
    pub writable_locations: Vec<AccountRegion>,
    #[serde(default)]
    pub readable_locations: Vec<AccountRegion>,
}

/// A region of the database account and the endpoint serving it.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountRegion {
    #[serde(default)]
    pub name: String,
    pub database_account_endpoint: Url,
}

/// The body of a create-container request.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ContainerProperties<'a> {
    pub id: &'a str,
    pub partition_key: PartitionKeyDefinition<'a>,
}

#[derive(Clone, Debug, Serialize)]
pub(crate) struct PartitionKeyDefinition<'a> {
    pub paths: Vec<&'a str>,
    pub kind: &'static str,
    #[serde(rename = "Version")]
    pub version: u8,
}

impl<'a> PartitionKeyDefinition<'a> {
    /// A version 2 hash partition on a single path such as `/account`.
    pub fn hash(path: &'a str) -> Self {
        Self {
            paths: vec![path],
            kind: "Hash",
            version: 2,
        }
    }
}
