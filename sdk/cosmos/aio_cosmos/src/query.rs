// Copyright (c) Microsoft Corporation. All rights reserved.
// Licensed under the MIT License.

use serde::Serialize;
use serde_json::Value;

use crate::PartitionKey;

/// A Cosmos DB query, sent verbatim to the service with optional named parameters.
///
/// Plain strings convert into a query without parameters:
///
/// ```rust
/// # use aio_cosmos::Query;
/// let query: Query = "SELECT * FROM c".into();
/// ```
///
/// Parameters are bound by name:
///
/// ```rust
/// # use aio_cosmos::Query;
/// let query = Query::from("SELECT * FROM c WHERE c.account = @account")
///     .with_parameter("@account", "Account-1")
///     .unwrap();
/// ```
#[derive(Clone, Debug, Serialize)]
pub struct Query {
    #[serde(rename = "query")]
    text: String,
    parameters: Vec<QueryParameter>,
}

impl Query {
    /// Adds a named parameter, consuming and returning the query.
    ///
    /// Fails if `value` cannot be serialized to JSON.
    pub fn with_parameter(
        mut self,
        name: impl Into<String>,
        value: impl Serialize,
    ) -> crate::Result<Self> {
        self.parameters.push(QueryParameter {
            name: name.into(),
            value: serde_json::to_value(value)?,
        });
        Ok(self)
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

impl<T: Into<String>> From<T> for Query {
    fn from(value: T) -> Self {
        Self {
            text: value.into(),
            parameters: vec![],
        }
    }
}

#[derive(Clone, Debug, Serialize)]
struct QueryParameter {
    name: String,
    value: Value,
}

/// Which partitions a query runs against. The two are mutually exclusive.
#[derive(Clone, Debug, PartialEq)]
pub enum QueryPartitionStrategy {
    SinglePartition(PartitionKey),
    CrossPartition,
}

impl<T: Into<PartitionKey>> From<T> for QueryPartitionStrategy {
    fn from(value: T) -> Self {
        Self::SinglePartition(value.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn plain_query_serializes_with_empty_parameters() {
        let query = Query::from("select * from r where r.account = 'Account-1'");
        assert_eq!(
            serde_json::to_value(&query).unwrap(),
            json!({
                "query": "select * from r where r.account = 'Account-1'",
                "parameters": []
            })
        );
    }

    #[test]
    fn parameters_keep_insertion_order() {
        let query = Query::from("SELECT * FROM c WHERE c.a = @a AND c.b = @b")
            .with_parameter("@a", 1)
            .unwrap()
            .with_parameter("@b", "two")
            .unwrap();
        assert_eq!(
            serde_json::to_value(&query).unwrap()["parameters"],
            json!([{ "name": "@a", "value": 1 }, { "name": "@b", "value": "two" }])
        );
    }

    #[test]
    fn partition_strategy_from_key() {
        assert_eq!(
            QueryPartitionStrategy::from("Account-1"),
            QueryPartitionStrategy::SinglePartition(PartitionKey::from("Account-1"))
        );
    }
}
