//! End-to-end lifecycle against a mock service.
//!
//! Replays the status sequence of a real session: create a database, a
//! partitioned collection and a document, replace the document, attempt a
//! replace with a stale ETag, then delete everything.

use cosmosdb::rest::{Collection, Database, PartitionKey, RequestOptions, Resource, ResourceKind};
use cosmosdb::{CosmosClient, CosmosConfig, DatabaseAccount, Endpoint, MasterKey};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio_test::assert_ok;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const DB_ETAG: &str = "\"00000100-0000-0000-0000-5c6b3a1e0000\"";
const COLL_ETAG: &str = "\"00000200-0000-0000-0000-5c6b3a1e0000\"";
const E1: &str = "\"00000300-0000-0000-0000-5c6b3a1e0000\"";
const E2: &str = "\"00000400-0000-0000-0000-5c6b3a1f0000\"";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Person {
    id: String,
    #[serde(rename = "_etag", default, skip_serializing_if = "Option::is_none")]
    etag: Option<String>,
    surname: String,
}

impl Resource for Person {
    const KIND: ResourceKind = ResourceKind::DOCUMENT;

    fn id(&self) -> &str {
        &self.id
    }

    fn etag(&self) -> Option<&str> {
        self.etag.as_deref()
    }
}

async fn mount_service(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/dbs"))
        .and(body_json(json!({"id": "testdb"})))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(json!({"id": "testdb", "_etag": DB_ETAG})),
        )
        .expect(1)
        .mount(server)
        .await;

    Mock::given(method("POST"))
        .and(path("/dbs/testdb/colls"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": "people",
            "partitionKey": {"paths": ["/id"], "kind": "Hash"},
            "_etag": COLL_ETAG
        })))
        .expect(1)
        .mount(server)
        .await;

    Mock::given(method("POST"))
        .and(path("/dbs/testdb/colls/people/docs"))
        .and(header("x-ms-documentdb-partitionkey", "[\"jim\"]"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": "jim", "surname": "Minter", "_etag": E1
        })))
        .expect(1)
        .mount(server)
        .await;

    // The first replace with E1 wins; every later one sees a stale tag.
    Mock::given(method("PUT"))
        .and(path("/dbs/testdb/colls/people/docs/jim"))
        .and(header("if-match", E1))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "jim", "surname": "Morrison", "_etag": E2
        })))
        .up_to_n_times(1)
        .expect(1)
        .mount(server)
        .await;

    Mock::given(method("PUT"))
        .and(path("/dbs/testdb/colls/people/docs/jim"))
        .and(header("if-match", E1))
        .respond_with(ResponseTemplate::new(412).set_body_json(json!({
            "code": "PreconditionFailed",
            "message": "Operation cannot be performed because one of the specified precondition is not met."
        })))
        .expect(1)
        .mount(server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/dbs/testdb/colls/people/docs/jim"))
        .and(header("if-match", E2))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/dbs/testdb/colls/people"))
        .and(header("if-match", COLL_ETAG))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/dbs/testdb"))
        .and(header("if-match", DB_ETAG))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_document_lifecycle_with_optimistic_concurrency() {
    let server = MockServer::start().await;
    mount_service(&server).await;

    let config = CosmosConfig::builder()
        .account(DatabaseAccount::new("testaccount").unwrap())
        .master_key(MasterKey::new("c2VjcmV0a2V5").unwrap())
        .endpoint(Endpoint::new(server.uri()).unwrap())
        .build()
        .unwrap();
    let client = CosmosClient::new(&config).unwrap();
    let options = RequestOptions::default();

    let db = assert_ok!(
        client
            .databases()
            .create(&Database::new("testdb"), &options)
            .await
    );
    assert!(db.etag().is_some_and(|etag| !etag.is_empty()));

    let collections = client.collections("testdb").unwrap();
    let coll = assert_ok!(
        collections
            .create(
                &Collection::new("people").with_partition_key(PartitionKey::hash("/id")),
                &options,
            )
            .await
    );

    let people = client.documents::<Person>("testdb", "people").unwrap();
    let in_partition = RequestOptions::new().partition_key("jim");

    let created = assert_ok!(
        people
            .create(
                &Person {
                    id: "jim".to_string(),
                    etag: None,
                    surname: "Minter".to_string(),
                },
                &in_partition,
            )
            .await
    );
    assert_eq!(created.etag(), Some(E1));

    let mut renamed = created.clone();
    renamed.surname = "Morrison".to_string();
    let replaced = assert_ok!(people.replace(&renamed, &in_partition).await);
    assert_eq!(replaced.surname, "Morrison");
    assert_eq!(replaced.etag(), Some(E2));

    let mut stale = created.clone();
    stale.surname = "Henson".to_string();
    let error = people.replace(&stale, &in_partition).await.unwrap_err();
    assert!(error.is_precondition_failed());
    assert!(!error.is_not_found());

    assert_ok!(people.delete(&replaced, &in_partition).await);
    assert_ok!(collections.delete(&coll, &options).await);
    assert_ok!(client.databases().delete(&db, &options).await);
}
