// Copyright (c) Microsoft Corporation. All rights reserved.
// Licensed under the MIT License.

use azure_core::http::Method;

use crate::{
    clients::ContainerClient,
    models::{ContainerProperties, PartitionKeyDefinition},
    pipeline::{set_json_body, CosmosPipeline, HeaderOptions},
    resource_context::{ResourceLink, ResourceType},
    CosmosResponse, CreateContainerOptions, Result,
};

/// A client for working with a specific database in a Cosmos DB account.
///
/// You can get a `DatabaseClient` by calling [`CosmosClient::database_client()`](crate::CosmosClient::database_client()).
#[derive(Debug, Clone)]
pub struct DatabaseClient {
    database_id: String,
    link: ResourceLink,
    containers_link: ResourceLink,
    pipeline: CosmosPipeline,
}

impl DatabaseClient {
    pub(crate) fn new(
        pipeline: CosmosPipeline,
        databases_link: &ResourceLink,
        database_id: &str,
    ) -> Self {
        let database_id = database_id.to_string();
        let link = databases_link.item(database_id.as_str());
        let containers_link = link.feed(ResourceType::Containers);

        Self {
            database_id,
            link,
            containers_link,
            pipeline,
        }
    }

    /// Returns the identifier of the Cosmos database.
    pub fn id(&self) -> &str {
        &self.database_id
    }

    /// Gets a [`ContainerClient`] that can be used to access the container with the specified name.
    ///
    /// # Arguments
    /// * `name` - The name of the container.
    pub fn container_client(&self, name: impl AsRef<str>) -> ContainerClient {
        ContainerClient::new(
            self.pipeline.clone(),
            &self.containers_link,
            &self.database_id,
            name.as_ref(),
        )
    }

    /// Deletes this database.
    pub async fn delete(&self) -> Result<CosmosResponse> {
        let headers =
            self.pipeline
                .headers(Method::Delete, &self.link, &HeaderOptions::default())?;
        let request = self.pipeline.request(Method::Delete, &self.link, headers);
        let response = self.pipeline.send(&request).await?;
        self.pipeline.interpret(
            response,
            &format!("Could not delete database: {}", self.database_id),
            false,
            None,
        )
    }

    /// Creates a new container, hash-partitioned on `partition_key_path` (for example `/account`).
    ///
    /// # Arguments
    /// * `id` - The ID of the new container.
    /// * `partition_key_path` - The JSON path of the partition key property.
    /// * `options` - Optional throughput. Setting both manual and autoscale throughput fails
    ///   before anything is sent.
    pub async fn create_container(
        &self,
        id: &str,
        partition_key_path: &str,
        options: Option<CreateContainerOptions>,
    ) -> Result<CosmosResponse> {
        let options = options.unwrap_or_default();
        let headers = self.pipeline.headers(
            Method::Post,
            &self.containers_link,
            &HeaderOptions {
                throughput: options.throughput,
                autoscale_ceiling: options.autoscale_ceiling,
                ..Default::default()
            },
        )?;
        let mut request = self
            .pipeline
            .request(Method::Post, &self.containers_link, headers);
        set_json_body(
            &mut request,
            &ContainerProperties {
                id,
                partition_key: PartitionKeyDefinition::hash(partition_key_path),
            },
        )?;

        let response = self.pipeline.send(&request).await?;
        self.pipeline.interpret(
            response,
            &format!("Could not create container: {}:{}", self.database_id, id),
            false,
            None,
        )
    }

    /// Deletes a container in this database.
    pub async fn delete_container(&self, id: &str) -> Result<CosmosResponse> {
        self.container_client(id).delete().await
    }
}
