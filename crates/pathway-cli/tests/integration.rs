use assert_cmd::Command;
use predicates::prelude::*;

fn pathway(server_url: &str) -> Command {
    let mut cmd = Command::cargo_bin("pathway").unwrap();
    // Point --config at a path that never exists so only env and defaults
    // apply, regardless of the developer's own ~/.pathway/config.yaml.
    cmd.arg("--config")
        .arg("/nonexistent/pathway-config.yaml")
        .env("PATHWAY_API_URL", server_url)
        .env("PATHWAY_TOKEN", "test-token");
    cmd
}

// ---------------------------------------------------------------------------
// pathway status
// ---------------------------------------------------------------------------

#[test]
fn status_without_token_fails() {
    let mut cmd = Command::cargo_bin("pathway").unwrap();
    cmd.arg("--config")
        .arg("/nonexistent/pathway-config.yaml")
        .env("PATHWAY_API_URL", "http://localhost:1")
        .env("PATHWAY_TOKEN", "")
        .arg("status")
        .assert()
        .failure()
        .stderr(predicate::str::contains("no API token"));
}

#[test]
fn status_reports_fresh_start_on_404() {
    let mut server = mockito::Server::new();
    server
        .mock("GET", "/onboarding")
        .with_status(404)
        .with_body(r#"{"message":"no onboarding session"}"#)
        .create();

    pathway(&server.url())
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("No onboarding session yet"));
}

#[test]
fn status_shows_resumed_session() {
    let mut server = mockito::Server::new();
    server
        .mock("GET", "/onboarding")
        .match_header("authorization", "Bearer test-token")
        .with_status(200)
        .with_body(
            r#"{
                "response": {
                    "data": {
                        "step1": { "currentRole": "student" },
                        "step2": { "targetRole": "ml_engineer" },
                        "step3": { "weeklyHours": 12 }
                    }
                },
                "currentStep": 4
            }"#,
        )
        .create();

    pathway(&server.url())
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("4 of 5"))
        .stdout(predicate::str::contains("Machine Learning Engineer"))
        .stdout(predicate::str::contains("12 hours / week"));
}

#[test]
fn status_json_emits_the_snapshot() {
    let mut server = mockito::Server::new();
    server
        .mock("GET", "/onboarding")
        .with_status(200)
        .with_body(r#"{"response": {"data": {"step3": {"weeklyHours": 8}}}, "currentStep": 3}"#)
        .create();

    let output = pathway(&server.url())
        .arg("--json")
        .arg("status")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let value: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(value["currentStep"], 3);
    assert_eq!(value["data"]["step3"]["weeklyHours"], 8);
}

// ---------------------------------------------------------------------------
// pathway reset
// ---------------------------------------------------------------------------

#[test]
fn reset_overwrites_the_saved_session() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("PATCH", "/onboarding/preferences")
        .match_body(mockito::Matcher::Json(serde_json::json!({})))
        .with_status(200)
        .create();

    pathway(&server.url())
        .arg("reset")
        .arg("--yes")
        .assert()
        .success()
        .stdout(predicate::str::contains("Onboarding reset"));
    mock.assert();
}

// ---------------------------------------------------------------------------
// pathway preferences
// ---------------------------------------------------------------------------

#[test]
fn preferences_requires_something_to_update() {
    pathway("http://localhost:1")
        .arg("preferences")
        .assert()
        .failure()
        .stderr(predicate::str::contains("nothing to update"));
}

#[test]
fn preferences_updates_hours_and_pushes_aggregate() {
    let mut server = mockito::Server::new();
    server
        .mock("GET", "/onboarding")
        .with_status(200)
        .with_body(
            r#"{
                "response": {
                    "data": {
                        "step1": { "currentRole": "student" },
                        "step2": { "targetRole": "ml_engineer" },
                        "step3": { "weeklyHours": 10 }
                    }
                },
                "currentStep": 5
            }"#,
        )
        .create();
    server
        .mock("PATCH", "/onboarding/step/3")
        .with_status(200)
        .create();
    let prefs = server
        .mock("PATCH", "/onboarding/preferences")
        .match_body(mockito::Matcher::PartialJson(serde_json::json!({
            "step3": { "weeklyHours": 15 }
        })))
        .with_status(200)
        .create();

    pathway(&server.url())
        .arg("preferences")
        .arg("--hours")
        .arg("15")
        .assert()
        .success()
        .stdout(predicate::str::contains("Preferences updated"));
    prefs.assert();
}

// ---------------------------------------------------------------------------
// pathway start
// ---------------------------------------------------------------------------

#[test]
fn start_fresh_quits_cleanly_without_network() {
    // --fresh skips hydration; quitting at step 1 makes no calls at all.
    pathway("http://localhost:1")
        .arg("start")
        .arg("--fresh")
        .write_stdin("q\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Step 1 of 5"));
}

#[test]
fn start_walks_all_five_steps_and_generates() {
    let mut server = mockito::Server::new();
    server
        .mock("PATCH", mockito::Matcher::Regex(r"^/onboarding/step/\d$".to_string()))
        .with_status(200)
        .expect_at_least(4)
        .create();
    let generate = server
        .mock("POST", "/roadmap/generate")
        .with_status(200)
        .with_body(r#"{"roadmapId":"5b4f9d7e-31a8-4f4c-bd35-2f11a3b4c5d6"}"#)
        .create();

    // student → ML engineer → 12 h/week → skip nothing → generate.
    pathway(&server.url())
        .arg("start")
        .arg("--fresh")
        .write_stdin("1\n1\n12\n\ng\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Your roadmap is ready"));
    generate.assert();
}

#[test]
fn start_blocks_advance_on_short_custom_role() {
    let mut server = mockito::Server::new();
    server
        .mock("PATCH", mockito::Matcher::Regex(r"^/onboarding/step/\d$".to_string()))
        .with_status(200)
        .create();

    // "Other" with a one-character description is refused; the wizard
    // stays on step 1 and explains why.
    pathway(&server.url())
        .arg("start")
        .arg("--fresh")
        .write_stdin("6\nP\nq\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("at least 2 characters"));
}
