//! Workflow tests for find-then-mutate operations.

use fmxml_client::{
    Client, ClientConfig, ClientError, CommandMap, Directive, MockTransport, RawResponse, Record,
    RequestOverride, ResultSet, Value, RECID_FIELD, UPDATE_RECID_FIELD,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn client() -> Client<MockTransport> {
    init_tracing();
    let config = ClientConfig::new("https://gateway.example.com/fmi/xml")
        .with_auth("admin", "admin")
        .with_database("Test")
        .with_layout("people");
    Client::new(config, MockTransport::new())
}

fn person(rec_id: i64, name: &str) -> Record {
    Record::from_iter([(RECID_FIELD, Value::from(rec_id)), ("name", Value::from(name))])
}

fn query(name: &str) -> Record {
    Record::from_iter([("name", name)])
}

#[tokio::test]
async fn zero_matches_read_as_empty() {
    let client = client();
    client
        .transport()
        .push_response(RawResponse::no_records())
        .push_response(RawResponse::no_records());

    let found = client.find(&query("nobody"), None, None).await.unwrap();
    assert_eq!(found, ResultSet { count: 0, total: None, records: vec![] });

    let all = client.find_all(None, None).await.unwrap();
    assert_eq!(all, ResultSet::empty());
}

#[tokio::test]
async fn upsert_edits_matched_record() {
    let client = client();
    client
        .transport()
        .push_response(RawResponse::success(1, 20, vec![person(42, "Ada")]))
        .push_response(RawResponse::success(1, 20, vec![person(42, "Ada Lovelace")]));

    let data = Record::from_iter([("name", "Ada Lovelace")]);
    let saved = client.upsert(&query("Ada"), data, None, None).await.unwrap();
    assert_eq!(saved.count, 1);

    let requests = client.transport().requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].directive(), Some(Directive::Find));
    assert_eq!(requests[1].directive(), Some(Directive::Edit));
    assert_eq!(requests[1].command.get(RECID_FIELD), Some(&Value::Integer(42)));
    assert_eq!(
        requests[1].command.get("name"),
        Some(&Value::from("Ada Lovelace"))
    );
}

#[tokio::test]
async fn upsert_creates_when_nothing_matches() {
    let client = client();
    client
        .transport()
        .push_response(RawResponse::no_records())
        .push_response(RawResponse::success(1, 21, vec![person(43, "Grace")]));

    let data = Record::from_iter([("name", "Grace")]);
    client.upsert(&query("Grace"), data, None, None).await.unwrap();

    let requests = client.transport().requests();
    assert_eq!(requests[1].directive(), Some(Directive::New));
    assert!(!requests[1].command.contains_key(RECID_FIELD));
    assert!(!requests[1].command.contains_key("-find"));
}

#[tokio::test]
async fn upsert_save_uses_base_credentials() {
    let client = client();
    client
        .transport()
        .push_response(RawResponse::no_records())
        .push_response(RawResponse::success(1, 1, vec![]));

    let patch = RequestOverride::credentials("guest", "guest");
    client
        .upsert(&query("Ada"), query("Ada"), None, Some(&patch))
        .await
        .unwrap();

    let requests = client.transport().requests();
    assert_eq!(requests[0].auth.user, "guest");
    assert_eq!(requests[1].auth.user, "admin");
}

#[tokio::test]
async fn upsert_find_failure_short_circuits() {
    let client = client();
    client.transport().push_response(RawResponse::error(105));

    let err = client
        .upsert(&query("Ada"), query("Ada"), None, None)
        .await
        .unwrap_err();

    assert_eq!(err.gateway_code(), Some(105));
    assert_eq!(client.transport().request_count(), 1);
}

#[tokio::test]
async fn update_without_match_fails_without_writing() {
    let client = client();
    client.transport().push_response(RawResponse::no_records());

    let err = client
        .update(&query("nobody"), query("somebody"), None, None)
        .await
        .unwrap_err();

    assert!(err.is_not_found());
    assert_eq!(client.transport().request_count(), 1);
}

#[tokio::test]
async fn update_writes_with_create_directive() {
    let client = client();
    client
        .transport()
        .push_response(RawResponse::success(1, 9, vec![person(7, "Ada")]))
        .push_response(RawResponse::success(1, 9, vec![]));

    let data = Record::from_iter([("name", "Ada L.")]).with(RECID_FIELD, 99);
    client.update(&query("Ada"), data, None, None).await.unwrap();

    let requests = client.transport().requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[1].directive(), Some(Directive::New));
    // The match carries `-recid`, not `-recid-id`, so the write has none.
    assert!(!requests[1].command.contains_key(RECID_FIELD));
}

#[tokio::test]
async fn update_copies_identifier_from_update_field() {
    let client = client();
    let matched = person(7, "Ada").with(UPDATE_RECID_FIELD, 7);
    client
        .transport()
        .push_response(RawResponse::success(1, 9, vec![matched]))
        .push_response(RawResponse::success(1, 9, vec![]));

    client
        .update(&query("Ada"), query("Ada L."), None, None)
        .await
        .unwrap();

    let write = &client.transport().requests()[1];
    assert_eq!(write.command.get(RECID_FIELD), Some(&Value::Integer(7)));
    assert_eq!(write.directive(), Some(Directive::New));
}

#[tokio::test]
async fn update_find_failure_short_circuits() {
    let client = client();
    client.transport().push_failure("connection reset by peer");

    let err = client
        .update(&query("Ada"), query("Ada"), None, None)
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::Transport { .. }));
    assert_eq!(client.transport().request_count(), 1);
}

#[tokio::test]
async fn delete_with_identifier_skips_find() {
    let client = client();
    client.transport().push_response(RawResponse::success(0, 8, vec![]));

    let mut extra = CommandMap::new();
    extra.insert("-script".into(), Value::from("AfterDelete"));
    let target = Record::new().with(RECID_FIELD, 5);
    client.delete(&target, Some(&extra), None).await.unwrap();

    let requests = client.transport().requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].directive(), Some(Directive::Delete));
    assert_eq!(requests[0].command.get(RECID_FIELD), Some(&Value::Integer(5)));
    assert!(!requests[0].command.contains_key("-script"));
}

#[tokio::test]
async fn delete_removes_first_match() {
    let client = client();
    client
        .transport()
        .push_response(RawResponse::success(2, 8, vec![person(3, "Ada"), person(4, "Ada")]))
        .push_response(RawResponse::success(0, 7, vec![]));

    let result = client.delete(&query("Ada"), None, None).await.unwrap();
    assert_eq!(result.total, Some(7));

    let requests = client.transport().requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[1].directive(), Some(Directive::Delete));
    assert_eq!(requests[1].command.get(RECID_FIELD), Some(&Value::Integer(3)));
}

#[tokio::test]
async fn delete_without_match_fails() {
    let client = client();
    client.transport().push_response(RawResponse::no_records());

    let err = client.delete(&query("nobody"), None, None).await.unwrap_err();

    assert!(err.is_not_found());
    assert_eq!(err.gateway_code(), Some(401));
    assert_eq!(client.transport().request_count(), 1);
}

#[tokio::test]
async fn delete_match_without_identifier_is_malformed() {
    let client = client();
    client
        .transport()
        .push_response(RawResponse::success(1, 1, vec![query("Ada")]));

    let err = client.delete(&query("Ada"), None, None).await.unwrap_err();

    assert!(matches!(err, ClientError::MalformedResponse(_)));
    assert_eq!(client.transport().request_count(), 1);
}

#[tokio::test]
async fn mutation_error_surfaces_after_find() {
    let client = client();
    client
        .transport()
        .push_response(RawResponse::success(1, 1, vec![person(1, "Ada")]))
        .push_response(RawResponse::error(301));

    let err = client.delete(&query("Ada"), None, None).await.unwrap_err();

    assert_eq!(err.gateway_code(), Some(301));
    assert_eq!(client.transport().request_count(), 2);
}
