// Copyright (c) Microsoft Corporation. All rights reserved.
// Licensed under the MIT License.

use azure_core::http::{HttpClient, Method};
use serde_json::json;
use std::sync::Arc;
use tracing::debug;
use url::Url;

use crate::{
    auth::MasterKey,
    clients::DatabaseClient,
    models::AccountProperties,
    pipeline::{
        decode_body, is_failure, set_json_body, signed_request, CosmosPipeline, HeaderBuilder,
        HeaderOptions,
    },
    resource_context::{ResourceLink, ResourceType},
    CosmosClientOptions, CosmosError, CosmosResponse, CreateDatabaseOptions, Error, Result,
};

/// Client for Azure Cosmos DB.
///
/// Cloning a `CosmosClient` is cheap; clones share the session token, the known regional
/// endpoints and the transport.
#[derive(Debug, Clone)]
pub struct CosmosClient {
    databases_link: ResourceLink,
    pipeline: CosmosPipeline,
}

impl CosmosClient {
    /// Creates a new CosmosClient for the account `endpoint`, signing requests with the
    /// base64-encoded account `key`.
    ///
    /// No request is sent; until [`refresh_locations`](Self::refresh_locations) runs, every
    /// request goes to `endpoint`.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use aio_cosmos::CosmosClient;
    ///
    /// let client = CosmosClient::new(
    ///     "https://myaccount.documents.azure.com/",
    ///     "a2V5",
    ///     None,
    /// ).unwrap();
    /// ```
    pub fn new(
        endpoint: impl AsRef<str>,
        key: impl AsRef<str>,
        options: Option<CosmosClientOptions>,
    ) -> Result<Self> {
        let options = options.unwrap_or_default();
        let endpoint = parse_endpoint(endpoint.as_ref())?;
        let key = MasterKey::from_base64(key)?;
        let transport = match options.transport {
            Some(transport) => transport,
            None => default_transport()?,
        };

        let pipeline = CosmosPipeline::new(
            HeaderBuilder::new(key, options.user_agent_suffix.as_deref()),
            transport,
            endpoint,
            options.raise_on_failure,
            options.diagnostics,
        );
        Ok(Self {
            databases_link: ResourceLink::root(ResourceType::Databases),
            pipeline,
        })
    }

    /// Creates a client and discovers the account's regional endpoints.
    pub async fn connect(
        endpoint: impl AsRef<str>,
        key: impl AsRef<str>,
        options: Option<CosmosClientOptions>,
    ) -> Result<Self> {
        let client = Self::new(endpoint, key, options)?;
        client.refresh_locations().await?;
        Ok(client)
    }

    /// Reads the database account and replaces the known writable and readable endpoints.
    ///
    /// A failure leaves the previously known endpoints in place. Discovery failures are always
    /// returned as errors, whatever the client's failure mode.
    pub async fn refresh_locations(&self) -> Result<AccountProperties> {
        let link = ResourceLink::account();
        let headers = self
            .pipeline
            .headers(Method::Get, &link, &HeaderOptions::default())?;
        let request = signed_request(
            self.pipeline.locations().default_endpoint().clone(),
            Method::Get,
            headers,
        );

        let response = self.pipeline.send(&request).await?;
        let failed = is_failure(response.status());
        let data = decode_body(&response, failed)?;
        if failed {
            return Err(CosmosError::new(
                response.status(),
                data,
                "Could not read database account",
            )
            .into());
        }

        let account: AccountProperties = serde_json::from_value(data)?;
        debug!(
            writable = account.writable_locations.len(),
            readable = account.readable_locations.len(),
            "discovered account locations"
        );
        self.pipeline
            .locations()
            .update(&account.writable_locations, &account.readable_locations);
        Ok(account)
    }

    /// The most recent session token observed by this client.
    pub fn session_token(&self) -> Option<String> {
        self.pipeline.session().get()
    }

    /// A writable regional endpoint, chosen at random among the known ones.
    pub fn writable_endpoint(&self) -> Url {
        self.pipeline.locations().writable()
    }

    /// A readable regional endpoint, chosen at random among the known ones.
    pub fn readable_endpoint(&self) -> Url {
        self.pipeline.locations().readable()
    }

    /// Gets a [`DatabaseClient`] that can be used to access the database with the specified ID.
    ///
    /// # Arguments
    /// * `id` - The ID of the database.
    pub fn database_client(&self, id: impl AsRef<str>) -> DatabaseClient {
        DatabaseClient::new(self.pipeline.clone(), &self.databases_link, id.as_ref())
    }

    /// Lists the databases in the account.
    pub async fn list_databases(&self) -> Result<CosmosResponse> {
        let headers =
            self.pipeline
                .headers(Method::Get, &self.databases_link, &HeaderOptions::default())?;
        let request = self
            .pipeline
            .request(Method::Get, &self.databases_link, headers);
        let response = self.pipeline.send(&request).await?;
        self.pipeline
            .interpret(response, "Could not list databases", false, None)
    }

    /// Creates a new database.
    ///
    /// # Arguments
    /// * `id` - The ID of the new database.
    /// * `options` - Optional throughput. Setting both manual and autoscale throughput fails
    ///   before anything is sent.
    pub async fn create_database(
        &self,
        id: &str,
        options: Option<CreateDatabaseOptions>,
    ) -> Result<CosmosResponse> {
        let options = options.unwrap_or_default();
        let headers = self.pipeline.headers(
            Method::Post,
            &self.databases_link,
            &HeaderOptions {
                throughput: options.throughput,
                autoscale_ceiling: options.autoscale_ceiling,
                ..Default::default()
            },
        )?;
        let mut request = self
            .pipeline
            .request(Method::Post, &self.databases_link, headers);
        set_json_body(&mut request, &json!({ "id": id }))?;

        let response = self.pipeline.send(&request).await?;
        self.pipeline.interpret(
            response,
            &format!("Could not create database: {id}"),
            false,
            None,
        )
    }

    /// Deletes a database.
    pub async fn delete_database(&self, id: &str) -> Result<CosmosResponse> {
        self.database_client(id).delete().await
    }
}

fn parse_endpoint(endpoint: &str) -> Result<Url> {
    let url = if endpoint.ends_with('/') {
        Url::parse(endpoint)?
    } else {
        Url::parse(&format!("{endpoint}/"))?
    };
    if url.cannot_be_a_base() {
        return Err(Error::invalid_argument(format!(
            "endpoint '{endpoint}' is not a base URL"
        )));
    }
    Ok(url)
}

#[cfg(any(feature = "reqwest", feature = "reqwest_rustls"))]
fn default_transport() -> Result<Arc<dyn HttpClient>> {
    Ok(azure_core::http::new_http_client())
}

#[cfg(not(any(feature = "reqwest", feature = "reqwest_rustls")))]
fn default_transport() -> Result<Arc<dyn HttpClient>> {
    Err(Error::invalid_argument(
        "no transport configured; enable the `reqwest` feature or set `CosmosClientOptions::transport`",
    ))
}
