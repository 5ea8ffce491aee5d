//! Cascading reads against a recording transport.

use pb_client::testing::RecordingTransport;
use pb_client::{Endpoint, PlaybookClient, Reply};
use pb_core::wire::CascadingFeature;
use pb_sync::{CascadeReader, FeatureView};
use pretty_assertions::assert_eq;
use serde_json::json;

fn cascade(view: FeatureView) -> CascadingFeature {
    match view {
        FeatureView::Cascade(feature) => feature,
        FeatureView::Summary(summary) => panic!("expected a cascade, got {summary:?}"),
    }
}

/// Feature `login` with stories `brute-force` (two scenarios) and
/// `phishing` (one scenario).
fn scripted() -> RecordingTransport {
    let transport = RecordingTransport::new();
    transport
        .respond(
            Endpoint::FeatureRead,
            Reply::ok(&json!({"short_name": "login", "description": "Sign-in", "project": "web"})),
        )
        .respond(
            Endpoint::AbusesRead,
            Reply::ok(&json!([
                {"short_name": "brute-force", "description": "Guess passwords"},
                {"short_name": "phishing", "description": "Steal credentials"},
            ])),
        )
        .respond_matching(
            Endpoint::ScenariosRead,
            "abuser_story",
            "brute-force",
            Reply::ok(&json!([
                {"name": "no-lockout", "type": "inline", "severity": 7, "cwe": 307},
                {"name": "weak-captcha", "type": "inline", "severity": 4},
            ])),
        )
        .respond_matching(
            Endpoint::ScenariosRead,
            "abuser_story",
            "phishing",
            Reply::ok(&json!([{"name": "lookalike-domain", "type": "repo"}])),
        )
        .respond_matching(
            Endpoint::TestRead,
            "scenario",
            "no-lockout",
            Reply::ok(&json!([
                {"name": "attempt-1000-logins", "test_case": "Send 1000 wrong passwords", "tools": ["burp", "hydra"]},
                {"name": "", "test_case": "placeholder row"},
            ])),
        );
    transport
}

#[tokio::test]
async fn cascade_call_count_is_two_plus_stories_plus_scenarios() {
    let client = PlaybookClient::new(scripted());

    let feature = cascade(
        CascadeReader::new(&client)
            .read("login", "web", true)
            .await
            .unwrap(),
    );

    // 1 feature read + 1 story listing + 2 scenario listings + 3 test listings
    assert_eq!(client.transport().calls().len(), 2 + 2 + 3);
    assert_eq!(feature.abuse_cases.len(), 2);
    assert_eq!(feature.scenario_count(), 3);
    assert_eq!(feature.test_case_count(), 1);
}

#[tokio::test]
async fn cascade_preserves_listing_order_and_fills_parents() {
    let client = PlaybookClient::new(scripted());

    let feature = cascade(
        CascadeReader::new(&client)
            .with_max_in_flight(2)
            .read("login", "web", true)
            .await
            .unwrap(),
    );

    let names: Vec<(&str, Vec<&str>)> = feature
        .abuse_cases
        .iter()
        .map(|story| {
            (
                story.short_name.as_str(),
                story.scenarios.iter().map(|s| s.name.as_str()).collect(),
            )
        })
        .collect();
    assert_eq!(
        names,
        vec![
            ("brute-force", vec!["no-lockout", "weak-captcha"]),
            ("phishing", vec!["lookalike-domain"]),
        ]
    );

    let story = &feature.abuse_cases[0];
    assert_eq!(story.feature, "login");
    let scenario = &story.scenarios[0];
    assert_eq!(scenario.abuser_story, "brute-force");
    assert_eq!(scenario.feature, "login");
    assert_eq!(scenario.cwe, Some(307));
    assert_eq!(scenario.test_cases[0].name, "attempt-1000-logins");
    assert_eq!(scenario.test_cases[0].threat_scenario, "no-lockout");
    assert_eq!(scenario.test_cases[0].tools, vec!["burp", "hydra"]);
}

#[tokio::test]
async fn story_without_scenarios_is_not_a_failure() {
    let transport = RecordingTransport::new();
    transport
        .respond(
            Endpoint::FeatureRead,
            Reply::ok(&json!({"short_name": "login", "description": "", "project": "web"})),
        )
        .respond(
            Endpoint::AbusesRead,
            Reply::ok(&json!([{"short_name": "brute-force", "description": ""}])),
        )
        .respond(Endpoint::ScenariosRead, Reply::ok(&json!([])));
    let client = PlaybookClient::new(transport);

    let feature = cascade(
        CascadeReader::new(&client)
            .read("login", "web", true)
            .await
            .unwrap(),
    );

    assert_eq!(feature.abuse_cases.len(), 1);
    assert!(feature.abuse_cases[0].scenarios.is_empty());
    assert_eq!(client.transport().calls().len(), 3);

    let rendered = serde_json::to_value(&feature).unwrap();
    assert_eq!(rendered["abuse_cases"][0]["scenarios"], json!([]));
}

#[tokio::test]
async fn rejected_scenario_listing_keeps_other_stories() {
    let transport = RecordingTransport::new();
    transport
        .respond(
            Endpoint::FeatureRead,
            Reply::ok(&json!({"short_name": "login"})),
        )
        .respond(
            Endpoint::AbusesRead,
            Reply::ok(&json!([{"short_name": "brute-force"}, {"short_name": "phishing"}])),
        )
        .respond_matching(
            Endpoint::ScenariosRead,
            "abuser_story",
            "brute-force",
            Reply::new(500, "internal error"),
        )
        .respond_matching(
            Endpoint::ScenariosRead,
            "abuser_story",
            "phishing",
            Reply::ok(&json!([{"name": "lookalike-domain", "type": "repo"}])),
        );
    let client = PlaybookClient::new(transport);

    let feature = cascade(
        CascadeReader::new(&client)
            .read("login", "web", true)
            .await
            .unwrap(),
    );

    assert_eq!(feature.abuse_cases.len(), 2);
    assert!(feature.abuse_cases[0].scenarios.is_empty());
    assert_eq!(feature.abuse_cases[1].scenarios[0].name, "lookalike-domain");
}

#[tokio::test]
async fn rejected_test_listing_yields_no_test_cases() {
    let transport = RecordingTransport::new();
    transport
        .respond(
            Endpoint::FeatureRead,
            Reply::ok(&json!({"short_name": "login"})),
        )
        .respond(
            Endpoint::AbusesRead,
            Reply::ok(&json!([{"short_name": "brute-force"}])),
        )
        .respond(
            Endpoint::ScenariosRead,
            Reply::ok(&json!([{"name": "no-lockout"}])),
        )
        .respond(Endpoint::TestRead, Reply::new(503, "unavailable"));
    let client = PlaybookClient::new(transport);

    let feature = cascade(
        CascadeReader::new(&client)
            .read("login", "web", true)
            .await
            .unwrap(),
    );

    assert_eq!(feature.scenario_count(), 1);
    assert_eq!(feature.test_case_count(), 0);
    assert_eq!(client.transport().calls().len(), 4);
}

#[tokio::test]
async fn undecodable_scenario_listing_keeps_other_stories() {
    let transport = RecordingTransport::new();
    transport
        .respond(
            Endpoint::FeatureRead,
            Reply::ok(&json!({"short_name": "login"})),
        )
        .respond(
            Endpoint::AbusesRead,
            Reply::ok(&json!([{"short_name": "brute-force"}, {"short_name": "phishing"}])),
        )
        .respond_matching(
            Endpoint::ScenariosRead,
            "abuser_story",
            "brute-force",
            Reply::ok(&json!([{"name": "no-lockout", "type": "inline", "severity": 7}])),
        )
        .respond_matching(
            Endpoint::ScenariosRead,
            "abuser_story",
            "phishing",
            Reply::ok(&json!([{"name": "lookalike-domain", "severity": 6.5}])),
        )
        .respond(
            Endpoint::TestRead,
            Reply::new(200, "not an envelope"),
        );
    let client = PlaybookClient::new(transport);

    let feature = cascade(
        CascadeReader::new(&client)
            .read("login", "web", true)
            .await
            .unwrap(),
    );

    assert_eq!(feature.abuse_cases.len(), 2);
    assert_eq!(feature.abuse_cases[0].scenarios[0].name, "no-lockout");
    assert_eq!(feature.abuse_cases[0].scenarios[0].severity, Some(7));
    assert!(feature.abuse_cases[0].scenarios[0].test_cases.is_empty());
    assert!(feature.abuse_cases[1].scenarios.is_empty());
}
