// Copyright (c) Microsoft Corporation. All rights reserved.
// Licensed under the MIT License.

use azure_core::http::{headers::Headers, Method};
use time::{format_description::BorrowedFormatItem, macros::format_description, OffsetDateTime};

use crate::{
    auth::MasterKey,
    constants,
    resource_context::ResourceType,
    Error, Result,
};

const RFC1123: &[BorrowedFormatItem<'static>] = format_description!(
    "[weekday repr:short], [day] [month repr:short] [year] [hour]:[minute]:[second] GMT"
);

/// Per-request flags that shape the header set.
#[derive(Clone, Debug, Default)]
pub(crate) struct HeaderOptions<'a> {
    pub is_query: bool,
    pub upsert: bool,
    pub indexed: Option<bool>,
    pub throughput: Option<u32>,
    pub autoscale_ceiling: Option<u32>,
    pub session_token: Option<&'a str>,
}

/// Builds the signed header set for a request.
#[derive(Debug, Clone)]
pub(crate) struct HeaderBuilder {
    key: MasterKey,
    user_agent: String,
}

impl HeaderBuilder {
    pub fn new(key: MasterKey, user_agent_suffix: Option<&str>) -> Self {
        let mut user_agent = format!("aio-cosmos/rust-cosmos-async-sdk/{}", constants::SDK_VERSION);
        if let Some(suffix) = user_agent_suffix {
            user_agent.push(' ');
            user_agent.push_str(suffix);
        }
        Self { key, user_agent }
    }

    /// Builds headers signed with the current UTC time.
    pub fn build(
        &self,
        method: Method,
        resource_link: &str,
        resource_type: ResourceType,
        options: &HeaderOptions<'_>,
    ) -> Result<Headers> {
        self.build_at(
            OffsetDateTime::now_utc(),
            method,
            resource_link,
            resource_type,
            options,
        )
    }

    pub(crate) fn build_at(
        &self,
        now: OffsetDateTime,
        method: Method,
        resource_link: &str,
        resource_type: ResourceType,
        options: &HeaderOptions<'_>,
    ) -> Result<Headers> {
        if options.throughput.is_some() && options.autoscale_ceiling.is_some() {
            return Err(Error::invalid_argument(
                "only one of throughput or autoscale_ceiling can be specified",
            ));
        }

        let is_query = options.is_query && matches!(method, Method::Post | Method::Put);
        let mut headers = self.default_headers();
        if !is_query {
            headers.insert(constants::IS_CONTINUATION_EXPECTED, "False");
        }

        if let Some(token) = options.session_token {
            if !resource_type.is_master_resource() {
                headers.insert(constants::SESSION_TOKEN, token.to_string());
            }
        }

        if is_query {
            headers.insert(constants::CONTENT_TYPE, constants::QUERY_CONTENT_TYPE);
            headers.insert(constants::QUERY, "True");
        }

        if options.upsert {
            headers.insert(constants::IS_UPSERT, "True");
        }

        if let Some(indexed) = options.indexed {
            headers.insert(
                constants::INDEXING_DIRECTIVE,
                if indexed { "Include" } else { "Exclude" },
            );
        }

        if let Some(throughput) = options.throughput {
            headers.insert(constants::OFFER_THROUGHPUT, throughput.to_string());
        } else if let Some(ceiling) = options.autoscale_ceiling {
            headers.insert(
                constants::OFFER_AUTOPILOT_SETTINGS,
                serde_json::json!({ "maxThroughput": ceiling }).to_string(),
            );
        }

        let date = now.to_offset(time::UtcOffset::UTC).format(RFC1123)?;
        let authorization = self.key.sign(
            method.as_str(),
            resource_link,
            resource_type.path_segment(),
            &date,
            headers.get_optional_str(&constants::HTTP_DATE).unwrap_or(""),
        )?;
        headers.insert(constants::X_DATE, date);
        headers.insert(constants::AUTHORIZATION, authorization);

        Ok(headers)
    }

    fn default_headers(&self) -> Headers {
        let mut headers = Headers::new();
        headers.insert(constants::USER_AGENT, self.user_agent.clone());
        headers.insert(constants::VERSION, constants::API_VERSION);
        headers.insert(constants::CACHE_CONTROL, "no-cache");
        headers.insert(constants::CONSISTENCY_LEVEL, "Session");
        headers.insert(constants::SESSION_TOKEN, "");
        headers.insert(constants::ACCEPT, constants::JSON_CONTENT_TYPE);
        headers
    }
}
