//! Integration tests for the full submit flow against the mock analyst.

use std::sync::Arc;

use finsight::adapters::ai::MockAnalyst;
use finsight::application::{ChatOrchestrator, UNKNOWN_ERROR_MESSAGE};
use finsight::domain::session::WELCOME_MESSAGE;
use finsight::domain::transcript::{Role, Source};
use finsight::ports::{Analysis, AnalystError};

fn orchestrator(analyst: MockAnalyst) -> ChatOrchestrator<MockAnalyst> {
    ChatOrchestrator::new(Arc::new(analyst))
}

#[tokio::test]
async fn fresh_session_scenario() {
    // Given: a fresh session, seeded with the welcome turn only
    let mut orchestrator = orchestrator(
        MockAnalyst::new().with_grounded_response(
            "NVIDIA reported diluted EPS of $0.81 for the quarter.",
            vec![Source::new("https://investor.nvidia.com", "NVIDIA Investor Relations")],
        ),
    );

    let session = orchestrator.snapshot();
    assert_eq!(session.len(), 1);
    let welcome = &session.transcript()[0];
    assert_eq!(welcome.role(), Role::Model);
    assert_eq!(welcome.content(), WELCOME_MESSAGE);
    assert!(welcome.visible_sources().is_none());

    // When: one prompt is submitted
    orchestrator.submit("What is NVIDIA's latest EPS?").await;

    // Then: welcome + user + model, in that exact order
    let session = orchestrator.snapshot();
    let transcript = session.transcript();
    assert_eq!(transcript.len(), 3);
    assert_eq!(transcript[0].role(), Role::Model);
    assert_eq!(transcript[1].role(), Role::User);
    assert_eq!(transcript[1].content(), "What is NVIDIA's latest EPS?");
    assert_eq!(transcript[2].role(), Role::Model);
    assert_eq!(
        transcript[2].content(),
        "NVIDIA reported diluted EPS of $0.81 for the quarter."
    );
    assert!(!session.is_in_flight());
}

#[tokio::test]
async fn successful_mapping_is_exact() {
    let mut orchestrator = orchestrator(
        MockAnalyst::new()
            .with_analysis(Analysis::new("T").with_sources(vec![Source::new("u1", "t1")])),
    );

    orchestrator.submit("q").await;

    let session = orchestrator.snapshot();
    let model_turn = session.last_turn().unwrap();
    assert_eq!(model_turn.role(), Role::Model);
    assert_eq!(model_turn.content(), "T");
    assert_eq!(model_turn.visible_sources(), Some(&[Source::new("u1", "t1")][..]));
}

#[tokio::test]
async fn sourceless_result_has_no_source_section() {
    let mut orchestrator = orchestrator(MockAnalyst::new().with_analysis(Analysis::new("T")));

    orchestrator.submit("q").await;

    let session = orchestrator.snapshot();
    assert!(session.last_turn().unwrap().visible_sources().is_none());
}

#[tokio::test]
async fn provider_failure_surfaces_in_banner_and_transcript() {
    let mut orchestrator =
        orchestrator(MockAnalyst::new().with_error(AnalystError::other("quota exceeded")));

    orchestrator.submit("q").await;

    let session = orchestrator.snapshot();
    assert_eq!(session.len(), 3);
    assert!(session.last_turn().unwrap().content().contains("quota exceeded"));
    assert!(session.last_error().unwrap().contains("quota exceeded"));
    assert!(!session.is_in_flight());
}

#[tokio::test]
async fn messageless_failure_uses_fallback_phrase() {
    let mut orchestrator = orchestrator(MockAnalyst::new().with_error(AnalystError::other("")));

    orchestrator.submit("q").await;

    let session = orchestrator.snapshot();
    let banner = session.last_error().unwrap();
    assert!(!banner.is_empty());
    assert!(banner.contains(UNKNOWN_ERROR_MESSAGE));
    assert!(session
        .last_turn()
        .unwrap()
        .content()
        .contains(UNKNOWN_ERROR_MESSAGE));
}

#[tokio::test]
async fn session_remains_usable_across_failures() {
    let mut orchestrator = orchestrator(
        MockAnalyst::new()
            .with_error(AnalystError::rate_limited(30))
            .with_response("Back to normal"),
    );

    orchestrator.submit("first").await;
    orchestrator.submit("second").await;

    let session = orchestrator.snapshot();
    // welcome + 2 user turns + 2 model turns, order preserved
    assert_eq!(session.len(), 5);
    assert_eq!(session.last_turn().unwrap().content(), "Back to normal");
    assert!(session.last_error().is_none());
}

mod whitespace_prompts {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Any prompt made only of whitespace leaves the session untouched.
        #[test]
        fn whitespace_only_prompt_is_a_no_op(prompt in r"[ \t\r\n]{0,32}") {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_time()
                .build()
                .unwrap();

            runtime.block_on(async {
                let analyst = MockAnalyst::new();
                let mut orchestrator = ChatOrchestrator::new(Arc::new(analyst.clone()));

                orchestrator.submit(&prompt).await;

                let session = orchestrator.snapshot();
                prop_assert_eq!(session.len(), 1);
                prop_assert!(!session.is_in_flight());
                prop_assert!(session.last_error().is_none());
                prop_assert_eq!(analyst.call_count(), 0);
                Ok(())
            })?;
        }
    }
}
