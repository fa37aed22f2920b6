use assert_cmd::Command;
use httpmock::prelude::*;
use serde_json::json;

const FEED_URL: &str = "https://feeds.example.com/rss/index.xml";

struct TestContext {
    server: MockServer,
}

impl TestContext {
    fn new() -> Self {
        Self {
            server: MockServer::start(),
        }
    }

    fn mock_register_ok(&self, token: &str) -> httpmock::Mock<'_> {
        let body = json!({ "token": token });
        self.server.mock(|when, then| {
            when.method(POST).path("/api/auth/register");
            then.status(200).json_body(body);
        })
    }

    fn mock_feed_api(&self, token: &str, feed_id: serde_json::Value) {
        let bearer = format!("Bearer {token}");
        let add_body = json!({ "feed": { "id": feed_id.clone(), "url": FEED_URL } });
        let list_body = json!({ "feeds": [{ "id": feed_id, "url": FEED_URL }] });
        self.server.mock(|when, then| {
            when.method(POST)
                .path("/api/feeds")
                .header("authorization", bearer.clone())
                .json_body(json!({ "url": FEED_URL }));
            then.status(200).json_body(add_body);
        });
        self.server.mock(|when, then| {
            when.method(GET).path("/api/feeds").header("authorization", bearer.clone());
            then.status(200).json_body(list_body);
        });
        self.server.mock(|when, then| {
            when.method(POST).path("/api/refresh").header("authorization", bearer.clone());
            then.status(200).json_body(json!({ "status": "ok" }));
        });
        self.server.mock(|when, then| {
            when.method(GET).path("/api/articles").header("authorization", bearer);
            then.status(200).json_body(json!([
                { "id": "a1", "title": "First" },
                { "id": "a2", "title": "Second" },
            ]));
        });
    }

    fn mock_delete(&self, feed_id: &str) -> httpmock::Mock<'_> {
        self.server.mock(|when, then| {
            when.method(DELETE).path(format!("/api/feeds/{feed_id}"));
            then.status(200).json_body(json!({ "deleted": true }));
        })
    }

    fn run(&self) -> std::process::Output {
        Command::cargo_bin("api-smoke")
            .unwrap()
            .args([
                "--base-url",
                &self.server.base_url(),
                "--feed-url",
                FEED_URL,
            ])
            .output()
            .unwrap()
    }
}

fn stdout_of(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn test_full_sequence_passes_and_cleans_up() {
    let ctx = TestContext::new();
    ctx.mock_register_ok("tok-1");
    ctx.mock_feed_api("tok-1", json!("feed-123"));
    let delete = ctx.mock_delete("feed-123");

    let output = ctx.run();

    assert!(output.status.success());
    let stdout = stdout_of(&output);
    assert!(stdout.contains("Registration successful and token received."));
    assert!(stdout.contains("Skipping Login (already have token)."));
    assert!(stdout.contains("Feed added successfully. Feed ID: feed-123"));
    assert!(stdout.contains("Newly added feed found in the list."));
    assert!(stdout.contains("Refresh request completed with status 200."));
    assert!(stdout.contains("Found 2 articles."));
    assert!(stdout.contains("Cleaning up (deleting feed: feed-123)"));
    assert!(stdout.contains("Cleanup successful."));
    assert!(stdout.contains("Test Suite Finished"));
    delete.assert();
}

#[test]
fn test_numeric_feed_ids_are_accepted() {
    let ctx = TestContext::new();
    ctx.mock_register_ok("tok-9");
    ctx.mock_feed_api("tok-9", json!(42));
    let delete = ctx.mock_delete("42");

    let output = ctx.run();

    assert!(output.status.success());
    let stdout = stdout_of(&output);
    assert!(stdout.contains("Feed added successfully. Feed ID: 42"));
    assert!(stdout.contains("Newly added feed found in the list."));
    delete.assert();
}

#[test]
fn test_register_conflict_falls_through_to_login() {
    let ctx = TestContext::new();
    ctx.server.mock(|when, then| {
        when.method(POST).path("/api/auth/register");
        then.status(400).body(r#"{"error":"user already exists"}"#);
    });
    ctx.server.mock(|when, then| {
        when.method(POST).path("/api/auth/login");
        then.status(200).json_body(json!({ "token": "tok-2" }));
    });
    ctx.mock_feed_api("tok-2", json!("feed-9"));
    let delete = ctx.mock_delete("feed-9");

    let output = ctx.run();

    assert!(output.status.success());
    let stdout = stdout_of(&output);
    assert!(stdout.contains("Registration failed. Status: 400"));
    assert!(stdout.contains("Logging in as user:"));
    assert!(stdout.contains("Login successful and token received."));
    assert!(stdout.contains("Feed added successfully. Feed ID: feed-9"));
    delete.assert();
}

#[test]
fn test_server_error_on_register_aborts_the_run() {
    let ctx = TestContext::new();
    ctx.server.mock(|when, then| {
        when.method(POST).path("/api/auth/register");
        then.status(500).body("internal error");
    });
    let add_feed = ctx.server.mock(|when, then| {
        when.method(POST).path("/api/feeds");
        then.status(200).json_body(json!({ "feed": { "id": "nope" } }));
    });

    let output = ctx.run();

    // The run ends early but the tool itself did its job.
    assert!(output.status.success());
    let stdout = stdout_of(&output);
    assert!(stdout.contains("Registration failed. Status: 500"));
    assert!(stdout.contains("Test Suite Finished"));
    assert!(!stdout.contains("[3/7]"));
    assert_eq!(add_feed.hits(), 0);
}

#[test]
fn test_missing_token_in_register_response_aborts_the_run() {
    let ctx = TestContext::new();
    ctx.server.mock(|when, then| {
        when.method(POST).path("/api/auth/register");
        then.status(200).json_body(json!({ "user": "created, but no token" }));
    });

    let output = ctx.run();

    assert!(output.status.success());
    let stdout = stdout_of(&output);
    assert!(stdout.contains("Token not found in registration response."));
    assert!(!stdout.contains("[3/7]"));
}

#[test]
fn test_login_failure_aborts_the_run() {
    let ctx = TestContext::new();
    ctx.server.mock(|when, then| {
        when.method(POST).path("/api/auth/register");
        then.status(400).body("already exists");
    });
    ctx.server.mock(|when, then| {
        when.method(POST).path("/api/auth/login");
        then.status(401).body("bad credentials");
    });

    let output = ctx.run();

    assert!(output.status.success());
    let stdout = stdout_of(&output);
    assert!(stdout.contains("Login request failed: HTTP 401"));
    assert!(!stdout.contains("[3/7]"));
}

#[test]
fn test_add_feed_failure_does_not_stop_later_steps() {
    let ctx = TestContext::new();
    ctx.mock_register_ok("tok-3");
    ctx.server.mock(|when, then| {
        when.method(POST).path("/api/feeds");
        then.status(500).body("cannot add");
    });
    ctx.server.mock(|when, then| {
        when.method(GET).path("/api/feeds");
        then.status(200).json_body(json!({ "feeds": [] }));
    });
    ctx.server.mock(|when, then| {
        when.method(POST).path("/api/refresh");
        then.status(200).json_body(json!({}));
    });
    ctx.server.mock(|when, then| {
        when.method(GET).path("/api/articles");
        then.status(200).json_body(json!([]));
    });

    let output = ctx.run();

    assert!(output.status.success());
    let stdout = stdout_of(&output);
    assert!(stdout.contains("Add feed request failed: HTTP 500"));
    assert!(stdout.contains("Newly added feed not found."));
    assert!(stdout.contains("Refresh request completed with status 200."));
    assert!(stdout.contains("Found 0 articles."));
    // No feed id was ever obtained, so there is nothing to clean up.
    assert!(!stdout.contains("[7/7]"));
}
