//! End-to-end workflow tests over a scripted gateway

use pretty_assertions::assert_eq;
use serde_json::json;
use studio_core::prelude::*;
use studio_core::{AgentKind, Priority, RawEnvelope, ScoreBand};
use studio_test_utils::{
    content_envelope, graphic_envelope, message_envelope, result_envelope, seo_envelope,
    setup_test_studio,
};

#[tokio::test]
async fn content_then_seo_handoff() {
    let studio = setup_test_studio();
    let gateway = studio.gateway();
    gateway.respond(AgentKind::ContentCoordinator, content_envelope("Launch Plan"));
    gateway.respond(AgentKind::SeoAnalyst, seo_envelope(82));

    let draft = studio
        .generate_content(&ContentRequest::new("product launch").with_tone("Witty"))
        .await
        .unwrap();
    assert_eq!(draft.title, "Launch Plan");
    assert_eq!(draft.highlights, vec!["one", "two"]);

    studio.send_to_seo(&draft);
    let request = studio.seed_seo_request().unwrap().with_keyword("launch");
    let audit = studio.analyze_seo(&request).await.unwrap();

    assert_eq!(audit.band(), ScoreBand::Good);
    assert_eq!(audit.recommendations[0].priority_level(), Priority::High);
    assert!(audit.content_preview.starts_with("## Launch Plan"));

    let calls = gateway.calls();
    assert_eq!(calls.len(), 2);
    assert!(calls[0].instruction.contains("Tone: Witty"));
    assert_eq!(calls[1].agent_id, AgentKind::SeoAnalyst.default_id());
    assert!(calls[1].instruction.contains("launch"));

    let summary = studio.dashboard();
    assert_eq!(summary.content_count, 1);
    assert_eq!(summary.seo_count, 1);
    assert_eq!(summary.average_seo_score, 82);
}

#[tokio::test]
async fn rate_limited_gateway_records_nothing() {
    let studio = setup_test_studio();
    studio
        .gateway()
        .respond(AgentKind::ContentCoordinator, RawEnvelope::failure("rate limited"));

    let err = studio
        .generate_content(&ContentRequest::new("topic"))
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "rate limited");
    assert!(err.is_retryable());
    studio.with_state(|state| {
        assert!(state.content_history().is_empty());
        assert!(!state.is_busy());
    });
}

#[tokio::test]
async fn failure_without_message_uses_fallback() {
    let studio = setup_test_studio();
    studio.gateway().respond(
        AgentKind::GraphicGenerator,
        RawEnvelope {
            success: false,
            ..RawEnvelope::default()
        },
    );

    let err = studio
        .generate_graphic(&GraphicRequest::new("banner"))
        .await
        .unwrap_err();

    assert_eq!(
        err.to_string(),
        "An error occurred while generating the graphic. Please try again."
    );
}

#[tokio::test]
async fn blank_gateway_message_uses_fallback() {
    let studio = setup_test_studio();
    studio
        .gateway()
        .respond(AgentKind::SeoAnalyst, RawEnvelope::failure(""));

    let err = studio
        .analyze_seo(&SeoRequest::new("text"))
        .await
        .unwrap_err();

    assert!(matches!(err, WorkflowError::GatewayFailure { .. }));
    assert_eq!(err.to_string(), "An error occurred during SEO analysis.");
}

#[tokio::test]
async fn message_encoded_payload_is_decoded() {
    let studio = setup_test_studio();
    studio.gateway().respond(
        AgentKind::ContentCoordinator,
        message_envelope(r#"{"title":"From Message","word_count":"bad"}"#),
    );

    let record = studio
        .generate_content(&ContentRequest::new("topic").with_word_count(800))
        .await
        .unwrap();

    assert_eq!(record.title, "From Message");
    assert_eq!(record.word_count, 800);
    assert_eq!(record.format, "Blog Post");
}

#[tokio::test]
async fn module_outputs_win_over_payload_url() {
    let studio = setup_test_studio();
    studio.gateway().respond(
        AgentKind::GraphicGenerator,
        result_envelope(json!({ "image_url": "b" })).with_artifact_files(["a"]),
    );

    let record = studio
        .generate_graphic(&GraphicRequest::new("banner"))
        .await
        .unwrap();

    assert_eq!(record.image_url, "a");
    studio.with_state(|state| {
        assert_eq!(state.graphics_history().latest().unwrap().image_url, "a");
    });
}

#[tokio::test]
async fn graphic_without_image_is_never_committed() {
    let studio = setup_test_studio();
    let gateway = studio.gateway();
    gateway.respond(
        AgentKind::GraphicGenerator,
        result_envelope(json!({ "image_url": "", "design_notes": "n" })),
    );
    gateway.respond(AgentKind::GraphicGenerator, graphic_envelope("https://img/ok.png"));

    let err = studio
        .generate_graphic(&GraphicRequest::new("banner"))
        .await
        .unwrap_err();
    assert!(matches!(err, WorkflowError::ArtifactMissing { .. }));
    assert_eq!(err.transient_record().unwrap().image_url, "");
    studio.with_state(|state| {
        assert!(state.graphics_history().is_empty());
        assert!(state.transient_graphic().is_some());
    });

    let record = studio
        .generate_graphic(&GraphicRequest::new("banner"))
        .await
        .unwrap();
    assert_eq!(record.style_applied, "Bold");
    studio.with_state(|state| {
        assert_eq!(state.graphics_history().len(), 1);
        assert!(state.transient_graphic().is_none());
    });
}

#[tokio::test]
async fn transport_error_and_unknown_agent_are_gateway_failures() {
    let studio = setup_test_studio();
    studio.gateway().fail(AgentKind::SeoAnalyst, "connection reset");

    let err = studio
        .analyze_seo(&SeoRequest::new("text"))
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "connection reset");

    // nothing queued for the content agent
    let err = studio
        .generate_content(&ContentRequest::new("topic"))
        .await
        .unwrap_err();
    assert!(matches!(err, WorkflowError::GatewayFailure { .. }));
    assert_eq!(
        err.to_string(),
        format!("unknown agent: {}", AgentKind::ContentCoordinator.default_id())
    );
}

#[tokio::test]
async fn concurrent_requests_last_to_complete_wins() {
    let studio = setup_test_studio();
    let gateway = studio.gateway();
    let release_first = gateway.hold(AgentKind::ContentCoordinator);
    let release_second = gateway.hold(AgentKind::ContentCoordinator);

    // the second request's response is ready immediately
    release_second.send(content_envelope("issued second")).unwrap();

    let request_a = ContentRequest::new("a");
    let request_b = ContentRequest::new("b");
    let first = studio.generate_content(&request_a);
    let second = async {
        let record = studio.generate_content(&request_b).await;
        // release the first request only once the second has committed
        release_first.send(content_envelope("issued first")).unwrap();
        record
    };

    let (first, second) = tokio::join!(first, second);
    assert_eq!(first.unwrap().title, "issued first");
    assert_eq!(second.unwrap().title, "issued second");

    studio.with_state(|state| {
        let titles: Vec<&str> = state
            .content_history()
            .iter()
            .map(|r| r.title.as_str())
            .collect();
        assert_eq!(titles, ["issued first", "issued second"]);
        assert!(!state.is_busy());
    });
}

#[tokio::test]
async fn sample_dashboard_does_not_touch_history() {
    let studio = Studio::new(
        studio_test_utils::ScriptedGateway::new(),
        StudioConfig::new().with_sample(true),
    );

    let summary = studio.dashboard();
    assert!(summary.showing_sample);
    assert_eq!(summary.average_seo_score, 74);
    assert_eq!(summary.recent_graphics.len(), 1);
    studio.with_state(|state| assert!(state.content_history().is_empty()));
}
