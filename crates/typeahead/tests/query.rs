#![cfg(not(target_os = "windows"))]

use serde_json::Value;
use typeahead_test_utils::sandbox::Sandbox;
use typeahead_test_utils::stub::{StubResponse, StubServer};

const SCENARIO_A: &str = r#"{"autocomplete": [
    {"id": 1, "name": "Chess", "match": 5},
    {"id": 2, "name": "art", "match": 9},
    {"id": 3, "name": "Baking", "match": 1}
]}"#;

fn json_output(output: &std::process::Output) -> Value {
    serde_json::from_slice(&output.stdout).expect("stdout is JSON")
}

fn names(value: &Value) -> Vec<&str> {
    value
        .as_array()
        .expect("JSON array")
        .iter()
        .map(|e| e["name"].as_str().expect("name"))
        .collect()
}

#[test]
fn test_query_ranks_top_candidate_last() {
    let server = StubServer::json(SCENARIO_A);
    let endpoint = server.url("/autocomplete/interests");

    let output = Sandbox::new()
        .cmd(
            "typeahead",
            ["--endpoint", endpoint.as_str(), "--token", "secret", "query", "ch", "--json"],
        )
        .assert()
        .success()
        .get_output()
        .clone();

    let value = json_output(&output);
    assert_eq!(names(&value), ["Baking", "Chess", "art"]);
    assert_eq!(value[2]["top"], Value::Bool(true));
    assert_eq!(value[0]["top"], Value::Bool(false));
    assert_eq!(value[0]["key"], "id:3");

    let requests = server.requests();
    assert_eq!(requests.len(), 1);
    let request = &requests[0];
    assert_eq!(request.method, "GET");
    assert_eq!(request.path(), "/autocomplete/interests");
    assert_eq!(request.query_param("q").as_deref(), Some("ch"));
    assert_eq!(request.query_param("limit").as_deref(), Some("12"));
    assert_eq!(request.query_param("from").as_deref(), Some("0"));
    assert_eq!(request.header("authorization"), Some("secret"));
}

#[test]
fn test_query_plain_output() {
    let server = StubServer::json(
        r#"{"autocomplete": [
            {"id": 1, "name": "Music [genre]", "match": 2},
            {"id": 2, "name": "Hiking", "match": 7}
        ]}"#,
    );
    let endpoint = server.url("/autocomplete/interests");

    Sandbox::new()
        .cmd("typeahead", ["--endpoint", endpoint.as_str(), "q"])
        .assert()
        .success()
        .stdout("  Music [genre] · genre\n★ Hiking\n");
}

#[test]
fn test_server_error_prints_empty_list() {
    let server = StubServer::start(|_| StubResponse::status(500));
    let endpoint = server.url("/autocomplete/interests");

    Sandbox::new()
        .cmd("typeahead", ["--endpoint", endpoint.as_str(), "query", "x", "--json"])
        .assert()
        .success()
        .stdout("[]\n");
    assert_eq!(server.requests().len(), 1);
}

#[test]
fn test_config_file_and_limit_flag() {
    let server = StubServer::json(r#"{"autocomplete": []}"#);
    let sandbox = Sandbox::new();
    let config = sandbox.write(
        "typeahead.toml",
        format!(
            "endpoint = \"{}\"\npage_size = 30\noffset = 5\n",
            server.url("/api/interests")
        ),
    );
    let config = config.to_string_lossy().into_owned();

    sandbox
        .cmd(
            "typeahead",
            ["--config", config.as_str(), "--limit", "7", "query", "--json"],
        )
        .assert()
        .success()
        .stdout("[]\n");

    let requests = server.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].path(), "/api/interests");
    assert_eq!(requests[0].query_param("q").as_deref(), Some(""));
    assert_eq!(requests[0].query_param("limit").as_deref(), Some("7"));
    assert_eq!(requests[0].query_param("from").as_deref(), Some("5"));
    assert_eq!(requests[0].header("authorization"), None);
}

#[cfg(target_os = "linux")]
#[test]
fn test_default_config_location_and_env() {
    let server = StubServer::json(SCENARIO_A);
    let sandbox = Sandbox::new();
    sandbox.write("config/typeahead/config.toml", "token = \"from-file\"\n");

    let output = sandbox
        .cmd("typeahead", ["query", "--json"])
        .env("TYPEAHEAD_API_URL", server.url("/env/interests"))
        .assert()
        .success()
        .get_output()
        .clone();

    assert_eq!(names(&json_output(&output)), ["Baking", "Chess", "art"]);
    let requests = server.requests();
    assert_eq!(requests[0].path(), "/env/interests");
    assert_eq!(requests[0].header("authorization"), Some("from-file"));
}

#[test]
fn test_invalid_config_fails() {
    let sandbox = Sandbox::new();
    let config = sandbox.write("bad.toml", "endpoint = \"not a url\"\n");
    let config = config.to_string_lossy().into_owned();

    let output = sandbox
        .cmd("typeahead", ["--config", config.as_str(), "query"])
        .assert()
        .failure()
        .get_output()
        .clone();

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.starts_with("Error:"), "stderr: {stderr}");
}
