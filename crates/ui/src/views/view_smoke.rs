use quiz_core::model::ActivityRecord;
use storage::repository::ActivityLogStore;

use super::test_harness::{CannedBackend, ViewKind, setup_view_harness};

#[tokio::test(flavor = "current_thread")]
async fn landing_view_smoke_renders_call_to_action() {
    let mut harness = setup_view_harness(ViewKind::Landing, CannedBackend { stats_available: true });
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Start Learning"), "missing button in {html}");
    assert!(html.contains("Backend: test backend"), "missing backend in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_renders_first_question() {
    let mut harness = setup_view_harness(ViewKind::Quiz, CannedBackend { stats_available: true });
    harness.rebuild();
    assert!(harness.render().contains("Loading your learning session..."));

    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Question #1"), "missing header in {html}");
    assert!(html.contains("Topic 2"), "missing badge in {html}");
    assert!(html.contains("Topic 0"), "missing knowledge bar in {html}");
    assert!(html.contains("Submit"), "missing submit in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn dashboard_view_smoke_renders_history_without_stats() {
    let mut harness =
        setup_view_harness(ViewKind::Dashboard, CannedBackend { stats_available: false });
    harness
        .storage
        .activity
        .append(ActivityRecord::new("Q1", 1, "B", false, "1/1/2024, 9:00:00 AM"))
        .await
        .expect("append");

    harness.rebuild();
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("--%"), "missing placeholder mastery in {html}");
    assert!(html.contains("Incorrect"), "missing verdict in {html}");
    assert!(html.contains("Your answer: B"), "missing answer in {html}");
    assert!(html.contains("Total Questions Answered: 1"), "missing tally in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn dashboard_view_smoke_renders_topic_mastery() {
    let mut harness =
        setup_view_harness(ViewKind::Dashboard, CannedBackend { stats_available: true });
    harness.rebuild();
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("54%"), "missing overall mastery in {html}");
    assert!(html.contains("Topic 0: 25%"), "missing topic row in {html}");
    assert!(html.contains("Topic 1: 83%"), "missing topic row in {html}");
    assert!(html.contains("No recent activity yet."), "missing empty state in {html}");
}
