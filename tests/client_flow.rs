//! Integration tests driving the client against a scripted backend.

mod common;

use common::MockClient;
use serde_json::{json, Value};
use webglobe_dns::{Error, FieldValue, Record, Session};

fn domains_body() -> Value {
    json!({"domains": {"reg_domains": {"data": [
        {"domain_id": 7, "domain": "example.com", "status": "hotovo"},
        {"domain_id": 8, "domain": "pending.example", "status": "ceka"}
    ]}}})
}

fn records_body() -> Value {
    json!({"data": {"records": [
        {"id": 101, "type": "A", "name": "www", "data": "192.0.2.1", "ttl": 600}
    ]}})
}

#[tokio::test]
async fn end_to_end_record_update() {
    let mock = MockClient::new();
    mock.push(200, json!({"data": {"token": "tok123"}}));
    mock.push(200, domains_body());
    mock.push(200, records_body());
    mock.push(200, json!({"data": {"id": 101}}));

    let mut session = Session::with_client("http://api.test", mock.clone());
    session
        .login("user@example.com", "secret", None, None)
        .await
        .unwrap();
    assert_eq!(session.token(), Some("tok123"));

    // Only the "hotovo" domain is surfaced.
    let zones = session.zones().await.unwrap();
    assert_eq!(zones.len(), 1);
    let zone = zones.get_by_id(7).unwrap();
    assert_eq!(zone.name(), "example.com");

    let records = zone.records().await.unwrap();
    let mut record = records.get_by_id(101).unwrap();
    record.set_ttl(900);
    record.save().await.unwrap();

    assert_eq!(record.id(), Some(101));
    assert!(!record.is_changed());

    // A second save of the now-clean record must not hit the network.
    record.save().await.unwrap();

    let requests = mock.requests();
    assert_eq!(requests.len(), 4);

    assert_eq!(requests[0].method, "POST");
    assert!(requests[0].url.ends_with("/auth/login"));
    assert_eq!(requests[0].bearer, None);

    assert_eq!(requests[1].method, "GET");
    assert!(requests[1].url.ends_with("/domains?full=true"));
    assert_eq!(requests[1].bearer.as_deref(), Some("Bearer tok123"));

    assert_eq!(requests[2].method, "GET");
    assert!(requests[2].url.ends_with("/7/dns"));

    assert_eq!(requests.iter().filter(|r| r.method == "PUT").count(), 1);
    let put = &requests[3];
    assert!(put.url.ends_with("/7/dns/101"));
    let body = put.body.as_ref().unwrap();
    assert_eq!(body["ttl"], 900);
    assert_eq!(body["type"], "A");
    assert_eq!(body["name"], "www");
    assert_eq!(body["data"], "192.0.2.1");
}

#[tokio::test]
async fn login_failure_surfaces_provider_error() {
    let mock = MockClient::new();
    mock.push(401, json!({"error": {"code": 108, "message": "invalid credentials"}}));

    let mut session = Session::with_client("http://api.test", mock.clone());
    match session.login("user", "wrong", None, None).await {
        Err(Error::Authentication { code, message }) => {
            assert_eq!(code, 108);
            assert_eq!(message, "invalid credentials");
        }
        other => panic!("expected authentication error, got {:?}", other.err()),
    }
    assert_eq!(session.token(), None);
}

#[tokio::test]
async fn login_attaches_otp_and_sms_only_when_given() {
    let mock = MockClient::new();
    mock.push(200, json!({"data": {"token": "t1"}}));
    mock.push(200, json!({"data": {"token": "t2"}}));

    let mut session = Session::with_client("http://api.test", mock.clone());
    session.login("user", "pw", None, None).await.unwrap();
    session
        .login("user", "pw", Some("123456"), Some("9999"))
        .await
        .unwrap();

    let requests = mock.requests();

    let plain = requests[0].body.as_ref().unwrap();
    assert_eq!(plain["login"], "user");
    assert_eq!(plain["password"], "pw");
    assert!(plain.get("otp").is_none());
    assert!(plain.get("sms").is_none());

    let two_factor = requests[1].body.as_ref().unwrap();
    assert_eq!(two_factor["otp"], "123456");
    assert_eq!(two_factor["sms"], "9999");
}

#[tokio::test]
async fn create_assigns_id_and_locks() {
    let mock = MockClient::new();
    mock.push(200, json!({"data": {"token": "tok"}}));
    mock.push(200, domains_body());
    mock.push(200, json!({"data": {"id": 55}}));

    let mut session = Session::with_client("http://api.test", mock.clone());
    session.login("user", "pw", None, None).await.unwrap();
    let zones = session.zones().await.unwrap();
    let zone = zones
        .get(&[("name", FieldValue::from("example.com"))])
        .unwrap();

    let mut record = Record::new(&zone, "TXT", "@", "v=spf1 -all", 600).unwrap();
    // Unsaved record: save delegates to create.
    record.save().await.unwrap();

    assert_eq!(record.id(), Some(55));
    assert!(!record.is_changed());

    let post = &mock.requests()[2];
    assert_eq!(post.method, "POST");
    assert!(post.url.ends_with("/7/dns"));
    let body = post.body.as_ref().unwrap();
    assert_eq!(body["type"], "TXT");
    assert_eq!(body["name"], "@");
    assert!(body.get("aux").is_none());
}

#[tokio::test]
async fn mx_create_carries_aux() {
    let mock = MockClient::new();
    mock.push(200, json!({"data": {"token": "tok"}}));
    mock.push(200, domains_body());
    mock.push(200, json!({"data": {"id": 56}}));

    let mut session = Session::with_client("http://api.test", mock.clone());
    session.login("user", "pw", None, None).await.unwrap();
    let zones = session.zones().await.unwrap();
    let zone = zones.get_by_id(7).unwrap();

    let mut record =
        Record::new(&zone, "MX", "example.com.", "mail.example.com.", 3600).unwrap();
    record.set_aux(10).unwrap();
    record.create().await.unwrap();

    let body = mock.requests()[2].body.clone().unwrap();
    assert_eq!(body["aux"], 10);
    assert_eq!(body["data"], "mail.example.com.");
}

#[tokio::test]
async fn duplicate_record_maps_to_its_own_error() {
    let mock = MockClient::new();
    mock.push(200, json!({"data": {"token": "tok"}}));
    mock.push(200, domains_body());
    mock.push(400, json!({"error": {"code": 937, "message": "Record already exists"}}));

    let mut session = Session::with_client("http://api.test", mock.clone());
    session.login("user", "pw", None, None).await.unwrap();
    let zones = session.zones().await.unwrap();
    let zone = zones.get_by_id(7).unwrap();

    let mut record = Record::new(&zone, "A", "www", "192.0.2.1", 600).unwrap();
    match record.create().await {
        Err(Error::DuplicateRecord { code, .. }) => assert_eq!(code, 937),
        other => panic!("expected duplicate record error, got {:?}", other.err()),
    }

    // Failed create leaves the record unsaved and dirty.
    assert_eq!(record.id(), None);
    assert!(record.is_changed());
}

#[tokio::test]
async fn other_api_codes_map_to_generic_error() {
    let mock = MockClient::new();
    mock.push(200, json!({"data": {"token": "tok"}}));
    mock.push(403, json!({"error": {"code": 500, "message": "forbidden"}}));

    let mut session = Session::with_client("http://api.test", mock.clone());
    session.login("user", "pw", None, None).await.unwrap();

    match session.zones().await {
        Err(Error::Api { code, message }) => {
            assert_eq!(code, 500);
            assert_eq!(message, "forbidden");
        }
        other => panic!("expected API error, got {:?}", other.err()),
    }
}

#[tokio::test]
async fn delete_returns_record_to_unsaved() {
    let mock = MockClient::new();
    mock.push(200, json!({"data": {"token": "tok"}}));
    mock.push(200, domains_body());
    mock.push(200, records_body());
    mock.push(200, json!({"data": {}}));

    let mut session = Session::with_client("http://api.test", mock.clone());
    session.login("user", "pw", None, None).await.unwrap();
    let zones = session.zones().await.unwrap();
    let zone = zones.get_by_id(7).unwrap();
    let mut record = zone.records().await.unwrap().get_by_id(101).unwrap();

    record.delete().await.unwrap();
    assert_eq!(record.id(), None);
    assert!(record.is_changed());

    let del = &mock.requests()[3];
    assert_eq!(del.method, "DELETE");
    assert!(del.url.ends_with("/7/dns/101"));
    assert!(del.body.is_none());
}

#[tokio::test]
async fn unauthenticated_requests_carry_no_auth_header() {
    let mock = MockClient::new();
    mock.push(401, json!({"error": {"code": 109, "message": "missing token"}}));

    let session = Session::with_client("http://api.test", mock.clone());
    match session.zones().await {
        Err(Error::Api { code, .. }) => assert_eq!(code, 109),
        other => panic!("expected API error, got {:?}", other.err()),
    }
    assert_eq!(mock.requests()[0].bearer, None);
}

#[tokio::test]
async fn failure_without_error_body_is_flagged() {
    let mock = MockClient::new();
    mock.push(200, json!({"data": {"token": "tok"}}));
    mock.push(500, Value::Null);

    let mut session = Session::with_client("http://api.test", mock.clone());
    session.login("user", "pw", None, None).await.unwrap();

    assert!(matches!(
        session.get("/7/dns").await,
        Err(Error::UnexpectedResponse(_))
    ));
}

#[tokio::test]
async fn failed_update_keeps_local_state() {
    let mock = MockClient::new();
    mock.push(200, json!({"data": {"token": "tok"}}));
    mock.push(200, domains_body());
    mock.push(200, records_body());
    // No response scripted for the PUT: the transport fails.

    let mut session = Session::with_client("http://api.test", mock.clone());
    session.login("user", "pw", None, None).await.unwrap();
    let zones = session.zones().await.unwrap();
    let zone = zones.get_by_id(7).unwrap();
    let mut record = zone.records().await.unwrap().get_by_id(101).unwrap();

    record.set_ttl(900);
    assert!(record.save().await.is_err());

    assert_eq!(record.id(), Some(101));
    assert!(record.is_changed());
    assert_eq!(record.ttl(), 900);
}

#[tokio::test]
async fn zone_sets_filter_and_sort() {
    let mock = MockClient::new();
    mock.push(200, json!({"data": {"token": "tok"}}));
    mock.push(200, json!({"domains": {"reg_domains": {"data": [
        {"domain_id": 9, "domain": "zeta.example", "status": "hotovo"},
        {"domain_id": 7, "domain": "alpha.example", "status": "hotovo"},
        {"domain_id": 8, "domain": "gone.example", "status": "expirovano"}
    ]}}}));

    let mut session = Session::with_client("http://api.test", mock.clone());
    session.login("user", "pw", None, None).await.unwrap();

    let zones = session.zones().await.unwrap();
    assert_eq!(zones.len(), 2);

    let sorted = zones.sort("id").unwrap();
    assert_eq!(sorted[0].id(), 7);
    assert_eq!(sorted[1].id(), 9);
    // Source order is preserved.
    assert_eq!(zones[0].id(), 9);

    let by_name = zones
        .filter(&[("name", FieldValue::from("alpha.example"))])
        .unwrap();
    assert_eq!(by_name.len(), 1);
    assert_eq!(by_name[0].id(), 7);
}
