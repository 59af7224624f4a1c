// Copyright (c) Microsoft Corporation. All rights reserved.
// Licensed under the MIT License.

mod mock_transport;

use aio_cosmos::{
    CosmosClient, CosmosClientOptions, CreateContainerOptions, CreateDatabaseOptions, Error,
    OperationStatus,
};
use azure_core::http::{Method, StatusCode};
use mock_transport::{body, client, header, MockResponse, MockTransport, ACCOUNT_KEY};
use serde_json::json;

fn account_body() -> serde_json::Value {
    json!({
        "id": "mockaccount",
        "writableLocations": [
            { "name": "West US", "databaseAccountEndpoint": "https://mockaccount-westus.documents.azure.com:443/" }
        ],
        "readableLocations": [
            { "name": "West US", "databaseAccountEndpoint": "https://mockaccount-westus.documents.azure.com:443/" },
            { "name": "East US", "databaseAccountEndpoint": "https://mockaccount-eastus.documents.azure.com:443/" }
        ]
    })
}

#[tokio::test]
async fn connect_discovers_endpoints() {
    let transport = MockTransport::sequence(vec![
        MockResponse::json(200, account_body()),
        MockResponse::json(200, json!({ "Databases": [], "_count": 0 })),
    ]);
    let options = CosmosClientOptions::builder()
        .with_transport(transport.clone())
        .build();
    let client = CosmosClient::connect(
        "https://mockaccount.documents.azure.com:443",
        ACCOUNT_KEY,
        Some(options),
    )
    .await
    .unwrap();

    assert_eq!(
        client.writable_endpoint().as_str(),
        "https://mockaccount-westus.documents.azure.com/"
    );
    let readable = client.readable_endpoint();
    assert!(
        readable.as_str() == "https://mockaccount-westus.documents.azure.com/"
            || readable.as_str() == "https://mockaccount-eastus.documents.azure.com/"
    );

    let databases = client.list_databases().await.unwrap();
    assert_eq!(databases.data["_count"], 0);

    let requests = transport.requests();
    assert!(matches!(requests[0].method(), Method::Get));
    assert_eq!(
        requests[0].url().as_str(),
        "https://mockaccount.documents.azure.com/"
    );
    assert_eq!(
        requests[1].url().as_str(),
        "https://mockaccount-westus.documents.azure.com/dbs"
    );
    assert!(matches!(requests[1].method(), Method::Get));
}

#[tokio::test]
async fn failed_discovery_keeps_endpoints() {
    let transport = MockTransport::sequence(vec![
        MockResponse::json(200, account_body()),
        MockResponse::json(401, json!({ "code": "Unauthorized", "message": "bad signature" })),
    ]);
    // Discovery failures surface even when the client tolerates failed responses.
    let client = client(transport, false);

    client.refresh_locations().await.unwrap();
    let err = client.refresh_locations().await.unwrap_err();
    assert_eq!(err.http_status(), Some(StatusCode::Unauthorized));
    assert_eq!(
        client.writable_endpoint().as_str(),
        "https://mockaccount-westus.documents.azure.com/"
    );
}

#[tokio::test]
async fn failed_discovery_with_text_body_keeps_status() {
    let transport = MockTransport::sequence(vec![MockResponse::text(503, "Service Unavailable")]);
    let client = client(transport, true);

    let err = client.refresh_locations().await.unwrap_err();
    assert_eq!(err.http_status(), Some(StatusCode::ServiceUnavailable));
    let Error::HttpResponse(err) = err else {
        panic!("expected an HTTP error");
    };
    assert_eq!(err.response(), "Service Unavailable");
    assert_eq!(
        client.writable_endpoint().as_str(),
        "https://mockaccount.documents.azure.com/"
    );
}

#[tokio::test]
async fn empty_discovery_falls_back_to_account_endpoint() {
    let transport = MockTransport::sequence(vec![MockResponse::json(
        200,
        json!({ "writableLocations": [], "readableLocations": [] }),
    )]);
    let client = client(transport, true);

    let account = client.refresh_locations().await.unwrap();
    assert!(account.writable_locations.is_empty());
    assert_eq!(
        client.writable_endpoint().as_str(),
        "https://mockaccount.documents.azure.com/"
    );
    assert_eq!(
        client.readable_endpoint().as_str(),
        "https://mockaccount.documents.azure.com/"
    );
}

#[tokio::test]
async fn create_database_with_throughput() {
    let transport = MockTransport::sequence(vec![
        MockResponse::json(201, json!({ "id": "db1" })),
        MockResponse::json(201, json!({ "id": "db2" })),
    ]);
    let client = client(transport.clone(), true);

    client
        .create_database(
            "db1",
            Some(CreateDatabaseOptions {
                throughput: Some(400),
                ..Default::default()
            }),
        )
        .await
        .unwrap();
    client
        .create_database(
            "db2",
            Some(CreateDatabaseOptions {
                autoscale_ceiling: Some(4000),
                ..Default::default()
            }),
        )
        .await
        .unwrap();

    let requests = transport.requests();
    assert_eq!(
        requests[0].url().as_str(),
        "https://mockaccount.documents.azure.com/dbs"
    );
    assert_eq!(body(&requests[0]), json!({ "id": "db1" }));
    assert_eq!(header(&requests[0], "x-ms-offer-throughput"), Some("400"));
    assert!(header(&requests[0], "x-ms-cosmos-offer-autopilot-settings").is_none());
    assert_eq!(
        header(&requests[1], "x-ms-cosmos-offer-autopilot-settings"),
        Some(r#"{"maxThroughput":4000}"#)
    );
    assert!(header(&requests[1], "x-ms-offer-throughput").is_none());
}

#[tokio::test]
async fn conflicting_throughput_sends_nothing() {
    let transport = MockTransport::sequence(Vec::new());
    let client = client(transport.clone(), true);
    let options = CreateContainerOptions {
        throughput: Some(400),
        autoscale_ceiling: Some(4000),
    };

    let err = client
        .create_database("db", Some(options.clone()))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::InvalidArgument(_)));

    let err = client
        .database_client("db")
        .create_container("coll", "/account", Some(options))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::InvalidArgument(_)));
    assert_eq!(transport.request_count(), 0);
}

#[tokio::test]
async fn create_container_body() {
    let transport = MockTransport::sequence(vec![MockResponse::json(201, json!({ "id": "Items" }))]);
    let database = client(transport.clone(), true).database_client("ToDoList");

    database
        .create_container("Items", "/account", None)
        .await
        .unwrap();

    let requests = transport.requests();
    assert_eq!(
        requests[0].url().as_str(),
        "https://mockaccount.documents.azure.com/dbs/ToDoList/colls"
    );
    assert_eq!(
        body(&requests[0]),
        json!({
            "id": "Items",
            "partitionKey": { "paths": ["/account"], "kind": "Hash", "Version": 2 }
        })
    );
}

#[tokio::test]
async fn master_resources_never_send_session_token() {
    let transport = MockTransport::new(|request, _| {
        let response = match request.method() {
            Method::Post => MockResponse::json(201, json!({})),
            Method::Delete => MockResponse::empty(204),
            _ => MockResponse::json(200, json!({ "Databases": [] })),
        };
        response.with_header("x-ms-session-token", "0:-1#77")
    });
    let client = client(transport.clone(), true);
    let database = client.database_client("db");
    let container = database.container_client("coll");

    // Seed a session token through a document write.
    container
        .create_document(&json!({ "id": "1" }), "pk", None)
        .await
        .unwrap();
    assert_eq!(client.session_token().as_deref(), Some("0:-1#77"));

    client.create_database("db2", None).await.unwrap();
    client.list_databases().await.unwrap();
    database.create_container("coll2", "/pk", None).await.unwrap();
    database.delete_container("coll2").await.unwrap();
    client.delete_database("db2").await.unwrap();

    let requests = transport.requests();
    assert_eq!(requests.len(), 6);
    for request in &requests[1..] {
        assert_eq!(
            header(request, "x-ms-session-token"),
            Some(""),
            "{:?} {}",
            request.method(),
            request.url()
        );
    }
}

#[tokio::test]
async fn delete_missing_database_tolerated() {
    let transport = MockTransport::sequence(vec![MockResponse::json(
        404,
        json!({ "code": "NotFound", "message": "Resource Not Found" }),
    )]);
    let client = client(transport.clone(), false);

    let response = client.delete_database("gone").await.unwrap();
    assert_eq!(response.status, OperationStatus::Failed);
    assert_eq!(response.code, StatusCode::NotFound);
    assert_eq!(
        transport.requests()[0].url().as_str(),
        "https://mockaccount.documents.azure.com/dbs/gone"
    );
}
