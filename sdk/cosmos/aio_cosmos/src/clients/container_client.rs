// Copyright (c) Microsoft Corporation. All rights reserved.
// Licensed under the MIT License.

use azure_core::http::{headers::Headers, Method};
use futures::{future, stream, StreamExt};
use serde::Serialize;
use tracing::debug;

use crate::{
    constants,
    pipeline::{set_json_body, CosmosPipeline, HeaderOptions},
    resource_context::{ResourceLink, ResourceType},
    CosmosResponse, FeedPager, ItemOptions, PartitionKey, Query, QueryOptions,
    QueryPartitionStrategy, Result, SessionOptions,
};

/// A client for working with a specific container in a Cosmos DB account.
///
/// You can get a `ContainerClient` by calling [`DatabaseClient::container_client()`](crate::clients::DatabaseClient::container_client()).
#[derive(Debug, Clone)]
pub struct ContainerClient {
    database_id: String,
    container_id: String,
    link: ResourceLink,
    documents_link: ResourceLink,
    pipeline: CosmosPipeline,
}

impl ContainerClient {
    pub(crate) fn new(
        pipeline: CosmosPipeline,
        containers_link: &ResourceLink,
        database_id: &str,
        container_id: &str,
    ) -> Self {
        let link = containers_link.item(container_id);
        let documents_link = link.feed(ResourceType::Documents);

        Self {
            database_id: database_id.to_string(),
            container_id: container_id.to_string(),
            link,
            documents_link,
            pipeline,
        }
    }

    /// Returns the identifier of the Cosmos container.
    pub fn id(&self) -> &str {
        &self.container_id
    }

    /// Deletes this container.
    pub async fn delete(&self) -> Result<CosmosResponse> {
        let headers =
            self.pipeline
                .headers(Method::Delete, &self.link, &HeaderOptions::default())?;
        let request = self.pipeline.request(Method::Delete, &self.link, headers);
        let response = self.pipeline.send(&request).await?;
        self.pipeline.interpret(
            response,
            &format!(
                "Could not delete container: {}:{}",
                self.database_id, self.container_id
            ),
            false,
            None,
        )
    }

    /// Creates a document and records the returned session token.
    ///
    /// # Arguments
    /// * `document` - The document body. It must carry an `id` and the partition key property.
    /// * `partition_key` - The document's partition key value.
    /// * `options` - Upsert and indexing directives, and an optional session token override.
    pub async fn create_document<T: Serialize>(
        &self,
        document: &T,
        partition_key: impl Into<PartitionKey>,
        options: Option<ItemOptions>,
    ) -> Result<CosmosResponse> {
        let options = options.unwrap_or_default();
        let mut headers = self.write_headers(&options)?;
        headers.insert(
            constants::PARTITION_KEY,
            partition_key.into().to_header_value(),
        );

        let mut request = self
            .pipeline
            .request(Method::Post, &self.documents_link, headers);
        set_json_body(&mut request, document)?;

        let response = self.pipeline.send(&request).await?;
        self.pipeline
            .interpret(response, &self.create_error_message(), true, None)
    }

    /// Creates many documents concurrently.
    ///
    /// The headers are signed once; every request then owns its own copy with that document's
    /// partition key. All requests are in flight at once, so callers should chunk very large
    /// batches. The session token is not updated.
    ///
    /// Fails without sending anything if the headers cannot be built. Otherwise returns one
    /// result per input document, in input order, whatever order the requests complete in.
    pub async fn create_documents<T, I>(
        &self,
        documents: I,
        options: Option<ItemOptions>,
    ) -> Result<Vec<Result<CosmosResponse>>>
    where
        T: Serialize,
        I: IntoIterator<Item = (T, PartitionKey)>,
    {
        let options = options.unwrap_or_default();
        let headers = self.write_headers(&options)?;
        let error_message = self.create_error_message();

        let writes = documents.into_iter().map(|(document, partition_key)| {
            let mut headers = headers.clone();
            headers.insert(constants::PARTITION_KEY, partition_key.to_header_value());
            let mut request = self
                .pipeline
                .request(Method::Post, &self.documents_link, headers);
            let body = set_json_body(&mut request, &document);
            let error_message = &error_message;
            async move {
                body?;
                let response = self.pipeline.send(&request).await?;
                self.pipeline
                    .interpret(response, error_message, false, None)
            }
        });

        Ok(future::join_all(writes).await)
    }

    /// Reads a document and records the returned session token.
    pub async fn get_document(
        &self,
        id: &str,
        partition_key: impl Into<PartitionKey>,
        options: Option<SessionOptions>,
    ) -> Result<CosmosResponse> {
        self.document_operation(Method::Get, id, partition_key.into(), options, "get")
            .await
    }

    /// Deletes a document and records the returned session token.
    pub async fn delete_document(
        &self,
        id: &str,
        partition_key: impl Into<PartitionKey>,
        options: Option<SessionOptions>,
    ) -> Result<CosmosResponse> {
        self.document_operation(Method::Delete, id, partition_key.into(), options, "delete")
            .await
    }

    /// Queries the container, one page per stream item.
    ///
    /// The query text is sent verbatim. Each page is requested with the previous page's
    /// continuation token and session token, and updates the client's session token. The
    /// stream ends after the first page that comes back without a continuation token, or
    /// after the first error.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// # async fn doc(container: aio_cosmos::clients::ContainerClient) -> aio_cosmos::Result<()> {
    /// use aio_cosmos::{QueryOptions, QueryPartitionStrategy};
    /// use futures::TryStreamExt;
    ///
    /// let options = QueryOptions {
    ///     partition_strategy: QueryPartitionStrategy::from("Account-1"),
    ///     ..Default::default()
    /// };
    /// let mut pages = container.query_documents("SELECT * FROM c", Some(options));
    /// while let Some(page) = pages.try_next().await? {
    ///     println!("{}", page.data);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub fn query_documents(
        &self,
        query: impl Into<Query>,
        options: Option<QueryOptions>,
    ) -> FeedPager {
        let options = options.unwrap_or_default();
        let state = QueryState {
            continuation: None,
            session_token: self.pipeline.session().resolve(options.session_token.as_deref()),
        };
        let pager = QueryPager {
            pipeline: self.pipeline.clone(),
            documents_link: self.documents_link.clone(),
            query: query.into(),
            partition_strategy: options.partition_strategy,
        };

        stream::unfold(Some(state), move |state| {
            let pager = pager.clone();
            async move {
                let state = state?;
                match pager.next_page(state).await {
                    Ok((page, next)) => Some((Ok(page), next)),
                    Err(e) => Some((Err(e), None)),
                }
            }
        })
        .boxed()
    }

    fn write_headers(&self, options: &ItemOptions) -> Result<Headers> {
        let session_token = self
            .pipeline
            .session()
            .resolve(options.session_token.as_deref());
        self.pipeline.headers(
            Method::Post,
            &self.documents_link,
            &HeaderOptions {
                upsert: options.upsert,
                indexed: options.indexed,
                session_token: session_token.as_deref(),
                ..Default::default()
            },
        )
    }

    async fn document_operation(
        &self,
        method: Method,
        id: &str,
        partition_key: PartitionKey,
        options: Option<SessionOptions>,
        verb: &str,
    ) -> Result<CosmosResponse> {
        let options = options.unwrap_or_default();
        let link = self.documents_link.item(id);
        let session_token = self
            .pipeline
            .session()
            .resolve(options.session_token.as_deref());
        let mut headers = self.pipeline.headers(
            method,
            &link,
            &HeaderOptions {
                session_token: session_token.as_deref(),
                ..Default::default()
            },
        )?;
        headers.insert(constants::PARTITION_KEY, partition_key.to_header_value());

        let request = self.pipeline.request(method, &link, headers);
        let response = self.pipeline.send(&request).await?;
        self.pipeline.interpret(
            response,
            &format!(
                "Could not {verb} document: {}:{}:{id}",
                self.database_id, self.container_id
            ),
            true,
            None,
        )
    }

    fn create_error_message(&self) -> String {
        format!(
            "Could not create document in {}:{}",
            self.database_id, self.container_id
        )
    }
}

struct QueryState {
    continuation: Option<String>,
    session_token: Option<String>,
}

#[derive(Clone)]
struct QueryPager {
    pipeline: CosmosPipeline,
    documents_link: ResourceLink,
    query: Query,
    partition_strategy: QueryPartitionStrategy,
}

impl QueryPager {
    /// Fetches one page. Returns the state for the next page, or `None` once the service stops
    /// returning a continuation token.
    async fn next_page(&self, state: QueryState) -> Result<(CosmosResponse, Option<QueryState>)> {
        let mut headers = self.pipeline.headers(
            Method::Post,
            &self.documents_link,
            &HeaderOptions {
                is_query: true,
                session_token: state.session_token.as_deref(),
                ..Default::default()
            },
        )?;
        match &self.partition_strategy {
            QueryPartitionStrategy::CrossPartition => {
                headers.insert(constants::QUERY_ENABLE_CROSS_PARTITION, "True");
            }
            QueryPartitionStrategy::SinglePartition(partition_key) => {
                headers.insert(constants::PARTITION_KEY, partition_key.to_header_value());
            }
        }
        if let Some(continuation) = state.continuation {
            headers.insert(constants::CONTINUATION, continuation);
        }

        let mut request = self
            .pipeline
            .request(Method::Post, &self.documents_link, headers);
        set_json_body(&mut request, &self.query)?;

        let response = self.pipeline.send(&request).await?;
        let continuation = response
            .headers()
            .get_optional_str(&constants::CONTINUATION)
            .map(str::to_string);
        let session_token = response
            .headers()
            .get_optional_str(&constants::SESSION_TOKEN)
            .map(str::to_string);

        let page = self.pipeline.interpret(
            response,
            "Could not query documents",
            true,
            Some(constants::DOCUMENTS_FIELD),
        )?;

        debug!(has_continuation = continuation.is_some(), "received query page");
        let next = continuation.map(|continuation| QueryState {
            continuation: Some(continuation),
            session_token,
        });
        Ok((page, next))
    }
}
