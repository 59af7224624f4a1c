// Copyright (c) Microsoft Corporation. All rights reserved.
// Licensed under the MIT License.

//! Master-key request signing.
//!
//! Every request carries an `authorization` header whose value the service recomputes from
//! the same inputs, so the canonical string built here has to match the service byte for byte.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use hmac::{Hmac, Mac};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use sha2::Sha256;
use std::fmt;

use crate::{Error, Result};

/// Characters left unescaped in the token, on top of ASCII alphanumerics.
const TOKEN_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// The decoded account key.
///
/// The key is decoded once, when the client is created, so a malformed key fails fast.
#[derive(Clone)]
pub struct MasterKey(Vec<u8>);

impl MasterKey {
    /// Decodes a base64-encoded account key.
    pub fn from_base64(key: impl AsRef<str>) -> Result<Self> {
        Ok(Self(STANDARD.decode(key.as_ref())?))
    }

    /// Signs a request. See [`sign`] for the meaning of the arguments.
    pub fn sign(
        &self,
        verb: &str,
        resource_link: &str,
        resource_type: &str,
        x_date: &str,
        http_date: &str,
    ) -> Result<String> {
        let text = string_to_sign(verb, resource_link, resource_type, x_date, http_date);

        type HmacSha256 = Hmac<Sha256>;
        let mut mac = <HmacSha256 as Mac>::new_from_slice(&self.0)
            .map_err(|e| Error::Credential(format!("invalid hmac key: {e}").into()))?;
        mac.update(text.as_bytes());
        let signature = STANDARD.encode(mac.finalize().into_bytes());

        let token = format!("type=master&ver=1.0&sig={}", signature);
        Ok(utf8_percent_encode(&token, TOKEN_ENCODE_SET).to_string())
    }
}

impl fmt::Debug for MasterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("MasterKey(<redacted>)")
    }
}

/// Computes the `authorization` header value for a request signed with a base64 account key.
///
/// * `verb` - the HTTP method; compared case-insensitively.
/// * `resource_link` - the resource id or full name, e.g. `dbs/db/colls/coll`. Kept verbatim
///   because names are case-sensitive.
/// * `resource_type` - e.g. `dbs`, `colls`, `docs`; compared case-insensitively.
/// * `x_date` / `http_date` - the `x-ms-date` and `date` header values, or `""` when unset.
///
/// Fails only if `key` is not valid base64.
pub fn sign(
    verb: &str,
    resource_link: &str,
    resource_type: &str,
    x_date: &str,
    http_date: &str,
    key: &str,
) -> Result<String> {
    MasterKey::from_base64(key)?.sign(verb, resource_link, resource_type, x_date, http_date)
}

fn string_to_sign(
    verb: &str,
    resource_link: &str,
    resource_type: &str,
    x_date: &str,
    http_date: &str,
) -> String {
    format!(
        "{}\n{}\n{}\n{}\n{}\n",
        verb.to_lowercase(),
        resource_type.to_lowercase(),
        resource_link,
        x_date.to_lowercase(),
        http_date.to_lowercase(),
    )
}
