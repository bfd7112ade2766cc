//! End-to-end sequences through the async adapter.
//!
//! Each test plays the part of the page driver and the connectivity monitor,
//! feeding events through an `EventSink` and checking what a presentation
//! subscriber observes.

use load_state::{
    LoadConfig, LoadEvent, LoadState, LoadStateAdapter, LoadStateSubscription, Overlay,
    ShellConfig,
};
use pretty_assertions::assert_eq;

async fn collect(updates: &mut LoadStateSubscription, count: usize) -> Vec<LoadState> {
    let mut seen = Vec::with_capacity(count);
    for _ in 0..count {
        seen.push(updates.recv().await.expect("adapter closed early"));
    }
    seen
}

async fn play(events: Vec<LoadEvent>) -> (Vec<LoadState>, LoadState) {
    let adapter = LoadStateAdapter::spawn(&LoadConfig::default());
    let mut updates = adapter.subscribe();
    let sink = adapter.sink();
    for event in events {
        sink.send(event).unwrap();
    }
    let final_state = adapter.shutdown().await.unwrap();

    let mut published = Vec::new();
    while let Some(state) = updates.recv().await {
        published.push(state);
    }
    (published, final_state)
}

#[tokio::test]
async fn test_full_load_reaches_success() {
    let (published, final_state) = play(vec![
        LoadEvent::LoadStarted,
        LoadEvent::progressed(0.3),
        LoadEvent::progressed(0.7),
        LoadEvent::LoadFinished,
    ])
    .await;

    assert_eq!(final_state, LoadState::success());
    assert_eq!(
        published,
        vec![
            LoadState::progressing(0.0),
            LoadState::progressing(0.3),
            LoadState::progressing(0.7),
            LoadState::success(),
        ]
    );
}

#[tokio::test]
async fn test_failure_surfaces_message() {
    let (_, final_state) = play(vec![
        LoadEvent::LoadStarted,
        LoadEvent::progressed(0.5),
        LoadEvent::failed("timeout"),
    ])
    .await;
    assert_eq!(final_state, LoadState::error("timeout"));
}

#[tokio::test]
async fn test_offline_ignores_progress() {
    let (published, final_state) =
        play(vec![LoadEvent::ConnectivityLost, LoadEvent::progressed(0.4)]).await;
    assert_eq!(published, vec![LoadState::offline()]);
    assert_eq!(final_state, LoadState::offline());
}

#[tokio::test]
async fn test_reconnect_then_reload() {
    let (published, final_state) = play(vec![
        LoadEvent::ConnectivityLost,
        LoadEvent::ConnectivityRestored,
        LoadEvent::LoadStarted,
        LoadEvent::progressed(1.0),
        LoadEvent::LoadFinished,
    ])
    .await;

    assert_eq!(final_state, LoadState::success());
    assert_eq!(
        published,
        vec![
            LoadState::offline(),
            LoadState::idle(),
            LoadState::progressing(0.0),
            LoadState::progressing(1.0),
            LoadState::success(),
        ]
    );
}

#[tokio::test]
async fn test_reload_after_success_restarts_progress() {
    let adapter = LoadStateAdapter::spawn(&LoadConfig::default());
    let mut updates = adapter.subscribe();
    let sink = adapter.sink();

    sink.load_started().unwrap();
    sink.load_progressed(0.8).unwrap();
    sink.load_finished().unwrap();
    collect(&mut updates, 3).await;

    sink.load_started().unwrap();
    assert_eq!(
        updates.recv().await,
        Some(LoadState::progressing(0.0))
    );
    assert_eq!(adapter.snapshot(), LoadState::progressing(0.0));
}

#[tokio::test]
async fn test_out_of_range_progress_is_clamped() {
    let (published, _) = play(vec![
        LoadEvent::LoadStarted,
        LoadEvent::progressed(-0.2),
        LoadEvent::progressed(1.5),
    ])
    .await;
    assert_eq!(
        published,
        vec![LoadState::progressing(0.0), LoadState::progressing(1.0)]
    );
}

#[tokio::test]
async fn test_blank_failure_uses_configured_sentinel() {
    let config = ShellConfig::from_toml_str("[load]\nunknown_error_message = \"Page unavailable\"\n")
        .unwrap();
    let adapter = LoadStateAdapter::spawn(&config.load);
    let sink = adapter.sink();
    sink.load_started().unwrap();
    sink.load_failed("").unwrap();

    let final_state = adapter.shutdown().await.unwrap();
    assert_eq!(final_state, LoadState::error("Page unavailable"));
    assert_eq!(
        Overlay::for_state(&final_state).caption(&config.overlay).as_deref(),
        Some("Error: Page unavailable")
    );
}

#[tokio::test]
async fn test_sinks_from_two_collaborators_are_serialized() {
    let adapter = LoadStateAdapter::spawn(&LoadConfig::default());
    let mut renderer = adapter.watch();
    let driver = adapter.sink();
    let connectivity = adapter.sink();

    let driver_task = tokio::spawn(async move {
        driver.load_started().unwrap();
        for step in 1..=10 {
            driver.load_progressed(step as f64 / 10.0).unwrap();
            tokio::task::yield_now().await;
        }
    });
    driver_task.await.unwrap();
    connectivity.connectivity_changed(false).unwrap();

    renderer
        .wait_for(|state| state.is_offline())
        .await
        .unwrap();
    assert_eq!(adapter.shutdown().await.unwrap(), LoadState::offline());
}
