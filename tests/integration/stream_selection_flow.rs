use mockito::{Matcher, Server};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;

use stream_launcher::models::{
    ContentId, Destination, MediaItem, MediaKind, NavigationDecision, PlaybackRequest,
};
use stream_launcher::{
    ExternalStreamApi, PlaybackConfig, SelectorState, StreamSelectionCoordinator,
    StreamSelectorController,
};

use crate::common::{TestApp, streams_body};

fn selector_config() -> PlaybackConfig {
    PlaybackConfig {
        use_external_player: false,
        new_video_player: true,
    }
}

fn coordinator_for(server: &Server) -> StreamSelectionCoordinator {
    let api = ExternalStreamApi::with_timeouts(
        &server.url(),
        Duration::from_secs(2),
        Duration::from_secs(2),
    )
    .unwrap();
    StreamSelectionCoordinator::new(Arc::new(api))
}

fn episode_queue() -> Vec<MediaItem> {
    vec![
        MediaItem::new("ep-1", MediaKind::Episode).with_provider_id("sc", "other"),
        MediaItem::new("ep-2", MediaKind::Episode)
            .with_name("Pilot")
            .with_provider_id("sc", "abc123"),
    ]
}

async fn wait_for_loaded(coordinator: &StreamSelectionCoordinator) -> SelectorState {
    let mut states = coordinator.subscribe();
    timeout(Duration::from_secs(5), async {
        loop {
            let state = states.current();
            if !matches!(state, SelectorState::Idle | SelectorState::Loading { .. }) {
                return state;
            }
            if !states.wait_for_change().await {
                return state;
            }
        }
    })
    .await
    .expect("streams were not loaded")
}

#[tokio::test]
async fn test_play_through_stream_selector_into_video_player() {
    let mut server = Server::new_async().await;
    let streams_mock = server
        .mock("GET", "/streams/abc123")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(streams_body().to_string())
        .expect(1)
        .create_async()
        .await;
    let resolve_mock = server
        .mock("GET", "/resolve/abc123")
        .match_query(Matcher::UrlEncoded("stream".into(), "1".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({"status": "ok", "sc_id": "abc123", "stream_index": 1, "url": "http://cdn.local/movie.mkv"})
                .to_string(),
        )
        .expect(1)
        .create_async()
        .await;

    let app = TestApp::new();
    let config = selector_config();

    let request = PlaybackRequest::new(episode_queue())
        .at(1)
        .starting_at(Duration::from_secs(95));
    let decision = app.router.launch(request, &config);
    assert_eq!(
        decision,
        NavigationDecision::StreamSelectorLaunch {
            content_id: ContentId::new("abc123"),
            item_index: 1,
            start_position: Some(Duration::from_secs(95)),
            replace: false,
        }
    );
    assert_eq!(
        app.navigator.navigations(),
        vec![(
            Destination::ExternalStreamSelector {
                content_id: ContentId::new("abc123"),
                item_index: 1,
                start_position: Some(Duration::from_secs(95)),
            },
            false
        )]
    );
    {
        let video = app.queue.video.lock().unwrap();
        assert_eq!(video.len(), 1);
        assert_eq!(video[0].0, episode_queue());
        assert_eq!(video[0].1, 1);
    }

    let coordinator = coordinator_for(&server);
    let controller = Arc::new(
        StreamSelectorController::from_decision(
            &decision,
            coordinator.clone(),
            app.router.clone(),
            config,
        )
        .unwrap(),
    );

    let runner = {
        let controller = controller.clone();
        tokio::spawn(async move { controller.run().await })
    };

    match wait_for_loaded(&coordinator).await {
        SelectorState::Loaded {
            content_id,
            streams,
            resolving_index,
        } => {
            assert_eq!(content_id, ContentId::new("abc123"));
            assert_eq!(streams.len(), 2);
            assert_eq!(streams[1].quality, "4K");
            assert_eq!(resolving_index, None);
        }
        other => panic!("unexpected state {:?}", other),
    }

    controller.select(1).await.unwrap();

    let continued = timeout(Duration::from_secs(5), runner)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(
        continued,
        Some(NavigationDecision::NewVideoPlayerLaunch {
            item_index: 1,
            start_position: Some(Duration::from_secs(95)),
            replace: true,
            stream_url: Some("http://cdn.local/movie.mkv".to_string()),
        })
    );

    let navigations = app.navigator.navigations();
    assert_eq!(navigations.len(), 2);
    assert_eq!(
        navigations[1],
        (
            Destination::VideoPlayer {
                item_index: 1,
                start_position: Some(Duration::from_secs(95)),
                stream_url: Some("http://cdn.local/movie.mkv".to_string()),
            },
            true
        )
    );
    assert_eq!(coordinator.state(), SelectorState::Idle);

    streams_mock.assert_async().await;
    resolve_mock.assert_async().await;
}

#[tokio::test]
async fn test_service_failure_keeps_selector_open_until_dismissed() {
    let mut server = Server::new_async().await;
    let _streams_mock = server
        .mock("GET", "/streams/abc123")
        .with_status(500)
        .create_async()
        .await;

    let app = TestApp::new();
    let config = selector_config();
    let decision = app
        .router
        .launch(PlaybackRequest::new(episode_queue()).at(1), &config);

    let coordinator = coordinator_for(&server);
    let controller = Arc::new(
        StreamSelectorController::from_decision(
            &decision,
            coordinator.clone(),
            app.router.clone(),
            config,
        )
        .unwrap(),
    );
    let runner = {
        let controller = controller.clone();
        tokio::spawn(async move { controller.run().await })
    };

    match wait_for_loaded(&coordinator).await {
        SelectorState::Error { message } => assert!(message.contains("500")),
        other => panic!("unexpected state {:?}", other),
    }
    assert!(coordinator.resolve(0).await.is_none());

    controller.dismiss().await;
    let continued = timeout(Duration::from_secs(5), runner)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(continued, None);
    assert_eq!(app.navigator.back_count(), 1);
    assert_eq!(app.navigator.navigations().len(), 1);
}

#[tokio::test]
async fn test_failed_resolve_allows_another_pick() {
    let mut server = Server::new_async().await;
    let _streams_mock = server
        .mock("GET", "/streams/abc123")
        .with_status(200)
        .with_body(streams_body().to_string())
        .create_async()
        .await;
    let _failed_resolve = server
        .mock("GET", "/resolve/abc123")
        .match_query(Matcher::UrlEncoded("stream".into(), "0".into()))
        .with_status(200)
        .with_body(r#"{"status": "error", "url": null}"#)
        .create_async()
        .await;

    let coordinator = coordinator_for(&server);
    coordinator
        .load(ContentId::new("abc123"))
        .await
        .unwrap()
        .await
        .unwrap();
    coordinator.resolve(0).await.unwrap().await.unwrap();
    assert_eq!(
        coordinator.take_outcome().await,
        Some(Err("Failed to resolve stream".to_string()))
    );
    assert_eq!(coordinator.state(), SelectorState::Idle);

    // A fresh session for the same id fetches the listing again
    coordinator
        .load(ContentId::new("abc123"))
        .await
        .unwrap()
        .await
        .unwrap();
    assert!(matches!(coordinator.state(), SelectorState::Loaded { .. }));
}

#[tokio::test]
async fn test_items_without_stream_id_skip_the_selector() {
    let mut server = Server::new_async().await;
    let untouched = server
        .mock("GET", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let app = TestApp::new();
    let items = vec![MediaItem::new("movie-1", MediaKind::Movie)];
    let decision = app.router.launch(
        PlaybackRequest::new(items).replacing(true),
        &PlaybackConfig::default(),
    );

    assert_eq!(
        decision,
        NavigationDecision::LegacyVideoPlayerLaunch {
            item_index: 0,
            start_position: None,
            replace: true,
            stream_url: None,
        }
    );
    assert!(
        StreamSelectorController::from_decision(
            &decision,
            coordinator_for(&server),
            app.router.clone(),
            PlaybackConfig::default(),
        )
        .is_none()
    );
    untouched.assert_async().await;
}

#[tokio::test]
async fn test_audio_requests_never_reach_the_video_queue() {
    let app = TestApp::new();
    let items = vec![
        MediaItem::new("track-1", MediaKind::Audio),
        MediaItem::new("clip-1", MediaKind::Video).with_provider_id("sc", "abc123"),
    ];

    let decision = app.router.launch(
        PlaybackRequest::new(items.clone()).at(1).shuffled(true),
        &selector_config(),
    );

    assert_eq!(decision, NavigationDecision::PlayAudioQueue);
    assert!(app.queue.video.lock().unwrap().is_empty());
    assert_eq!(app.queue.audio.lock().unwrap().as_slice(), &[(items, 1, true)]);
    assert_eq!(
        app.navigator.navigations(),
        vec![(Destination::NowPlaying, false)]
    );
}
