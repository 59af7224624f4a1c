// Copyright (c) Microsoft Corporation. All rights reserved.
// Licensed under the MIT License.

use serde_json::Value;

/// The partition key value used to route a document to its physical partition.
///
/// Sent as a JSON array in the `x-ms-documentdb-partitionkey` header, for example `["Account-1"]`.
///
/// ```rust
/// use aio_cosmos::PartitionKey;
///
/// assert_eq!(PartitionKey::from("Account-1").to_header_value(), r#"["Account-1"]"#);
/// assert_eq!(PartitionKey::from(42).to_header_value(), "[42]");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PartitionKey(Value);

impl PartitionKey {
    /// A partition key for documents whose partition key property is `null`.
    pub const NULL: PartitionKey = PartitionKey(Value::Null);

    pub fn to_header_value(&self) -> String {
        Value::Array(vec![self.0.clone()]).to_string()
    }
}

impl From<&str> for PartitionKey {
    fn from(value: &str) -> Self {
        Self(Value::String(value.to_string()))
    }
}

impl From<String> for PartitionKey {
    fn from(value: String) -> Self {
        Self(Value::String(value))
    }
}

impl From<&String> for PartitionKey {
    fn from(value: &String) -> Self {
        Self(Value::String(value.clone()))
    }
}

impl From<bool> for PartitionKey {
    fn from(value: bool) -> Self {
        Self(Value::Bool(value))
    }
}

macro_rules! impl_from_number {
    ($($t:ty),*) => {
        $(
            impl From<$t> for PartitionKey {
                fn from(value: $t) -> Self {
                    Self(Value::from(value))
                }
            }
        )*
    };
}

impl_from_number!(i32, i64, u32, u64, f64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_keys_are_quoted() {
        assert_eq!(PartitionKey::from("a").to_header_value(), r#"["a"]"#);
        assert_eq!(
            PartitionKey::from(String::from("with \"quote\"")).to_header_value(),
            r#"["with \"quote\""]"#
        );
    }

    #[test]
    fn non_string_keys() {
        assert_eq!(PartitionKey::from(7u64).to_header_value(), "[7]");
        assert_eq!(PartitionKey::from(1.5).to_header_value(), "[1.5]");
        assert_eq!(PartitionKey::from(true).to_header_value(), "[true]");
        assert_eq!(PartitionKey::NULL.to_header_value(), "[null]");
    }
}
