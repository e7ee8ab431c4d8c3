use profileiq_match::core::config_manager::ServiceConfig;
use profileiq_match::orchestrator::FAILURE_NOTICE;
use profileiq_match::render::render_text;
use profileiq_match::{
    Completion, ConfidenceTier, FailureKind, Orchestrator, RequestState, ResumeFile,
    ServiceClient,
};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn resume() -> ResumeFile {
    ResumeFile::new("candidate.pdf", b"%PDF-1.4 candidate".to_vec())
}

fn client(base_url: String) -> ServiceClient {
    ServiceClient::new(&ServiceConfig {
        base_url,
        timeout_seconds: 5,
        ..ServiceConfig::default()
    })
    .unwrap()
}

async fn scoring_server(body: serde_json::Value) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/analyze-resume"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&server)
        .await;
    server
}

#[tokio::test]
async fn strong_match_scenario() {
    let server = scoring_server(json!({
        "final_score": 82,
        "skill_match_score": 90,
        "semantic_similarity": 70,
        "role_alignment_score": 85,
        "experience_score": 60,
        "recommendations": ["Add cloud certifications"]
    }))
    .await;

    let client = client(server.uri());
    let mut orchestrator = Orchestrator::default();

    let completion = orchestrator
        .submit_input(&client, Some(resume()), "Cloud engineer, AWS and Python")
        .await
        .unwrap();
    assert_eq!(completion, Completion::Applied);

    let presentation = orchestrator.presentation().unwrap();
    assert_eq!(presentation.headline.tier, ConfidenceTier::Strong);
    assert_eq!(presentation.headline.label, "Strong Match");
    assert!(presentation.headline.guidance.contains("strong alignment"));
    assert_eq!(presentation.recommendations.heading, "Next Steps");
    assert_eq!(
        presentation.recommendations.items,
        vec!["Add cloud certifications"]
    );

    let weights: Vec<u8> = presentation
        .contribution_chart
        .iter()
        .map(|bar| bar.weight)
        .collect();
    assert_eq!(weights, vec![40, 30, 20, 10]);

    let text = render_text(&presentation);
    assert!(text.contains("Strong Match"));
    assert!(text.contains("Next Steps"));
    assert_eq!(text.matches("Add cloud certifications").count(), 1);
}

#[tokio::test]
async fn network_failure_clears_prior_result() {
    let server = scoring_server(json!({
        "final_score": 55,
        "skill_match_score": 40,
        "semantic_similarity": 70,
        "role_alignment_score": 50,
        "experience_score": 60,
        "recommendations": []
    }))
    .await;

    let mut orchestrator = Orchestrator::default();
    orchestrator
        .submit_input(&client(server.uri()), Some(resume()), "Data analyst")
        .await
        .unwrap();
    assert!(orchestrator.result().is_some());

    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let completion = orchestrator
        .submit(&client(format!("http://{}", addr)))
        .await
        .unwrap();

    assert_eq!(completion, Completion::Applied);
    assert_eq!(
        orchestrator.state(),
        &RequestState::Failed {
            kind: FailureKind::Transport
        }
    );
    assert!(orchestrator.result().is_none());
    assert_eq!(orchestrator.notice().unwrap().message(), FAILURE_NOTICE);
}

#[tokio::test]
async fn malformed_payload_looks_like_any_other_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/analyze-resume"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let mut orchestrator = Orchestrator::default();
    orchestrator
        .submit_input(&client(server.uri()), Some(resume()), "Data analyst")
        .await
        .unwrap();

    assert_eq!(
        orchestrator.state(),
        &RequestState::Failed {
            kind: FailureKind::Protocol
        }
    );
    assert_eq!(orchestrator.notice().unwrap().message(), FAILURE_NOTICE);
}

#[tokio::test]
async fn blank_job_description_never_reaches_the_service() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    let client = client(server.uri());
    let mut orchestrator = Orchestrator::default();

    assert!(orchestrator
        .submit_input(&client, Some(resume()), "   ")
        .await
        .is_err());
    assert!(orchestrator
        .submit_input(&client, None, "Python developer")
        .await
        .is_err());
    assert_eq!(orchestrator.state(), &RequestState::AwaitingInput);
}
