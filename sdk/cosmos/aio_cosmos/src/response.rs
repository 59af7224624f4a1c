// Copyright (c) Microsoft Corporation. All rights reserved.
// Licensed under the MIT License.

use serde::de::DeserializeOwned;
use serde_json::Value;

use azure_core::http::StatusCode;

/// Whether the service accepted the operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationStatus {
    Ok,
    Failed,
}

/// The uniform result of every operation.
///
/// When the client raises on failure, a `CosmosResponse` is always [`OperationStatus::Ok`];
/// otherwise failed responses come back here with `error` set.
#[derive(Debug, Clone, PartialEq)]
pub struct CosmosResponse {
    pub status: OperationStatus,
    pub code: StatusCode,
    /// The session token returned by the service, for operations that track the session.
    pub session_token: Option<String>,
    pub error: Option<String>,
    /// The decoded body, or the projected field for queries. `null` for an empty body.
    pub data: Value,
}

impl CosmosResponse {
    pub fn is_ok(&self) -> bool {
        self.status == OperationStatus::Ok
    }

    /// Deserializes [`data`](Self::data) into `T`.
    pub fn deserialize_data<T: DeserializeOwned>(&self) -> crate::Result<T> {
        Ok(serde_json::from_value(self.data.clone())?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[test]
    fn deserialize_data() {
        #[derive(Deserialize)]
        struct Doc {
            id: String,
        }

        let response = CosmosResponse {
            status: OperationStatus::Ok,
            code: StatusCode::Ok,
            session_token: None,
            error: None,
            data: json!([{ "id": "1" }, { "id": "2" }]),
        };
        let docs: Vec<Doc> = response.deserialize_data().unwrap();
        assert_eq!(
            docs.iter().map(|d| d.id.as_str()).collect::<Vec<_>>(),
            ["1", "2"]
        );
    }
}
