use cloudctl::api::CloudClient;
use cloudctl::commands::complete::{suggestions, CompletionKind};
use cloudctl::commands::gateway::{self, GatewayCommands, GatewayCreateArgs};
use cloudctl::commands::s3::{self, S3Commands, S3ListArgs};
use cloudctl::commands::Session;
use cloudctl::config::ResolvedContext;
use cloudctl::error::ApiError;
use cloudctl::output::{OutputFormat, Printer};
use reqwest::StatusCode;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn session(url: &str, format: OutputFormat) -> Session {
    let ctx = ResolvedContext {
        name: None,
        url: url.to_string(),
        token: Some("t0ken".to_string()),
    };
    Session {
        client: CloudClient::new(&ctx).unwrap(),
        printer: Printer::new(format),
    }
}

#[tokio::test]
async fn test_gateway_create_sends_pipes_in_order() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/v1/gateway"))
        .and(header("authorization", "Bearer t0ken"))
        .and(body_json(json!({
            "project_uid": "p1",
            "name": "edge",
            "pipes": [
                {"name": "web", "port": 8080, "remote": "web.backend"},
                {"name": "db", "port": 5432, "remote": "db.backend"}
            ]
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "uid": "gw-1",
            "name": "edge",
            "project_uid": "p1",
            "pipes": [
                {"name": "web", "port": 8080, "remote": "web.backend"},
                {"name": "db", "port": 5432, "remote": "db.backend"}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let uri = server.uri();
    let cmd = GatewayCommands::Create(GatewayCreateArgs {
        name: "edge".to_string(),
        project: "p1".to_string(),
        pipes: "web:8080:web.backend,db:5432:db.backend".to_string(),
    });
    let mut out = Vec::new();
    gateway::run(cmd, || Ok(session(&uri, OutputFormat::Yaml)), &mut out)
        .await
        .unwrap();

    let printed = String::from_utf8(out).unwrap();
    assert!(printed.contains("uid: gw-1"));
    assert!(printed.contains("remote: db.backend"));
}

#[tokio::test]
async fn test_gateway_create_with_bad_pipes_sends_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/v1/gateway"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let uri = server.uri();
    let cmd = GatewayCommands::Create(GatewayCreateArgs {
        name: "edge".to_string(),
        project: "p1".to_string(),
        pipes: "web:8080:web.backend,db:5432".to_string(),
    });
    let err = gateway::run(cmd, || Ok(session(&uri, OutputFormat::Yaml)), &mut Vec::new())
        .await
        .unwrap_err();
    assert!(format!("{err:#}").contains("incomplete"));
}

#[tokio::test]
async fn test_bad_pipes_are_reported_before_endpoint_resolution() {
    let cmd = GatewayCommands::Create(GatewayCreateArgs {
        name: "edge".to_string(),
        project: "p1".to_string(),
        pipes: "svc:70000:x".to_string(),
    });
    let connect = || -> anyhow::Result<Session> { anyhow::bail!("no API URL configured") };
    let err = gateway::run(cmd, connect, &mut Vec::new())
        .await
        .unwrap_err();
    let msg = format!("{err:#}");
    assert!(msg.contains("out of range"), "{msg}");
    assert!(!msg.contains("no API URL"), "{msg}");
}

#[tokio::test]
async fn test_http_error_carries_server_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/cluster/nope"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "statuscode": 404,
            "message": "cluster nope not found"
        })))
        .mount(&server)
        .await;

    let s = session(&server.uri(), OutputFormat::Yaml);
    match s.client.find_cluster("nope").await {
        Err(ApiError::Http { status, detail }) => {
            assert_eq!(status, StatusCode::NOT_FOUND);
            assert_eq!(detail, "cluster nope not found");
        }
        other => panic!("expected http error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_unreachable_server_is_a_transport_error() {
    // nothing listens on port 1
    let s = session("http://127.0.0.1:1", OutputFormat::Yaml);
    let err = s.client.list_clusters().await.unwrap_err();
    assert!(matches!(err, ApiError::Transport { .. }), "{err:?}");
}

#[tokio::test]
async fn test_undecodable_body_is_a_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/cluster"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
        .mount(&server)
        .await;

    let s = session(&server.uri(), OutputFormat::Yaml);
    let err = s.client.list_clusters().await.unwrap_err();
    assert!(matches!(err, ApiError::Decode { .. }), "{err:?}");
}

#[tokio::test]
async fn test_s3_list_filters_by_project() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/s3/list"))
        .and(body_json(json!({"partition": "fra"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "a", "partition": "fra", "project": "p1"},
            {"id": "b", "partition": "fra", "project": "p2"}
        ])))
        .mount(&server)
        .await;

    let uri = server.uri();
    let cmd = S3Commands::List(S3ListArgs {
        partition: "fra".to_string(),
        project: Some("p2".to_string()),
    });
    let mut out = Vec::new();
    s3::run(cmd, || Ok(session(&uri, OutputFormat::Json)), &mut out)
        .await
        .unwrap();

    let printed: serde_json::Value = serde_json::from_slice(&out).unwrap();
    let ids: Vec<_> = printed
        .as_array()
        .unwrap()
        .iter()
        .map(|u| u["id"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(ids, ["b"]);
}

#[tokio::test]
async fn test_completion_suggestions() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/cluster/listconstraints"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "partitions": ["fra", "ams"],
            "machine_images": [{"name": "ubuntu", "version": "22.04"}]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/database/postgres/partitions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "fra": {}, "ams": {}
        })))
        .mount(&server)
        .await;

    let s = session(&server.uri(), OutputFormat::Yaml);
    let partitions = suggestions(&s.client, CompletionKind::Partitions, None)
        .await
        .unwrap();
    assert_eq!(partitions, ["fra", "ams"]);

    let images = suggestions(&s.client, CompletionKind::MachineImages, None)
        .await
        .unwrap();
    assert_eq!(images, ["ubuntu-22.04"]);

    let pg = suggestions(&s.client, CompletionKind::PostgresPartitions, None)
        .await
        .unwrap();
    assert_eq!(pg, ["ams", "fra"]);
}
