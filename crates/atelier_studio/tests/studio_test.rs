// Studio session tests over in-memory collaborators.

mod test_utils;

use atelier_core::{ImageAspectRatio, ImageInput, Mode, Readiness, VideoRequest};
use atelier_error::{AtelierResult, StorageError, StorageErrorKind};
use atelier_interface::{AssetResponse, KeyValueStore, MediaStore};
use atelier_media::{PlaybackEnd, encode_base64};
use atelier_storage::{HISTORY_KEY, MemoryMediaStore};
use atelier_studio::{Studio, StudioComponentsBuilder, StudioConfig};
use serde_json::json;
use std::sync::Arc;
use test_utils::{InstantSleeper, MockTransport, TestCredentials, fixture};

/// Store that reads as empty and refuses every write.
struct ReadOnlyStore;

impl KeyValueStore for ReadOnlyStore {
    fn get(&self, _key: &str) -> AtelierResult<Option<String>> {
        Ok(None)
    }

    fn set(&self, key: &str, _value: &str) -> AtelierResult<()> {
        Err(StorageError::new(StorageErrorKind::FileWrite(format!("{}: read-only", key))).into())
    }

    fn remove(&self, _key: &str) -> AtelierResult<()> {
        Ok(())
    }
}

fn video_submission(name: &str) -> serde_json::Value {
    json!({ "name": name })
}

fn video_done(name: &str, uri: Option<&str>) -> serde_json::Value {
    match uri {
        Some(uri) => json!({
            "name": name,
            "done": true,
            "response": { "generateVideoResponse": { "generatedSamples": [{ "video": { "uri": uri } }] } }
        }),
        None => json!({ "name": name, "done": true, "response": {} }),
    }
}

fn image_response(bytes: &[u8]) -> serde_json::Value {
    json!({ "predictions": [{ "bytesBase64Encoded": encode_base64(bytes), "mimeType": "image/jpeg" }] })
}

#[tokio::test]
async fn test_image_is_recorded_in_history() -> anyhow::Result<()> {
    let mut f = fixture(TestCredentials::with_key("k"));
    f.transport.push_json(image_response(b"fox"));

    let entry = f
        .studio
        .generate_image("a fox", ImageAspectRatio::Landscape16x9)
        .await?;

    assert_eq!(entry.locator(), &format!("data:image/jpeg;base64,{}", encode_base64(b"fox")));
    assert_eq!(f.studio.history().len(), 1);
    assert_eq!(f.studio.history()[0].prompt(), "a fox");
    assert!(f.kv.get(HISTORY_KEY)?.is_some());
    Ok(())
}

#[tokio::test]
async fn test_history_is_bounded_and_unique() -> anyhow::Result<()> {
    let mut f = fixture(TestCredentials::with_key("k"));
    for i in 0..8u8 {
        f.transport.push_json(image_response(&[i]));
    }
    f.transport.push_json(image_response(&[7]));

    for i in 0..9 {
        f.studio
            .generate_image(&format!("prompt {}", i), ImageAspectRatio::Square)
            .await?;
    }

    let history = f.studio.history();
    assert_eq!(history.len(), 6);
    assert_eq!(history[0].prompt(), "prompt 8");
    let repeated = history
        .iter()
        .filter(|e| e.locator() == history[0].locator())
        .count();
    assert_eq!(repeated, 1);
    Ok(())
}

#[tokio::test]
async fn test_missing_credential_gates_session() {
    let mut f = fixture(TestCredentials::selectable("k"));
    f.studio.select_credential().await;
    f.studio.check_readiness().await;
    assert_eq!(f.studio.readiness(), Readiness::Ready);

    let mut f = fixture(TestCredentials::selectable("k"));
    let err = f
        .studio
        .generate_image("a fox", ImageAspectRatio::Square)
        .await
        .unwrap_err();

    assert!(err.is_missing_credential());
    assert_eq!(f.studio.readiness(), Readiness::NotReady);
    assert_eq!(
        f.studio.last_error(),
        Some("generate-image-from-prompt failed: No API key selected")
    );
    assert!(f.transport.paths().is_empty());

    f.studio.select_credential().await;
    assert_eq!(f.studio.readiness(), Readiness::Ready);
    assert_eq!(f.studio.last_error(), None);
}

#[tokio::test]
async fn test_video_runs_to_stored_asset() -> anyhow::Result<()> {
    let mut f = fixture(TestCredentials::with_key("k"));
    f.transport.push_json(json!({ "name": "operations/v1" }));
    f.transport.push_json(json!({
        "name": "operations/v1",
        "done": true,
        "response": { "generateVideoResponse": {
            "generatedSamples": [{ "video": { "uri": "https://files.example/v1.mp4" } }]
        } }
    }));
    f.transport
        .push_asset(AssetResponse::new(200, "OK", Some("video/mp4".into()), b"clip".to_vec()));

    let handle = f
        .studio
        .generate_video(&VideoRequest::from_prompt("waves"))
        .await?;

    assert_eq!(f.media.retrieve(&handle).await?, b"clip");
    assert_eq!(
        f.transport.paths(),
        [
            "models/veo-2.0-generate-001:predictLongRunning",
            "operations/v1",
            "https://files.example/v1.mp4",
        ]
    );
    assert_eq!(f.sleeper.sleeps().len(), 1);
    Ok(())
}

#[tokio::test]
async fn test_batch_refused_until_ready() {
    let mut f = fixture(TestCredentials::with_key("k"));
    assert_eq!(f.studio.readiness(), Readiness::Checking);

    let err = f
        .studio
        .batch_images(&["a".to_string()], ImageAspectRatio::Square)
        .await
        .unwrap_err();

    assert!(err.is_missing_credential());
    assert!(f.transport.paths().is_empty());
    assert!(f.studio.batch_job().is_none());
}

#[tokio::test]
async fn test_batch_images_after_ready() -> anyhow::Result<()> {
    let mut f = fixture(TestCredentials::with_key("k"));
    f.studio.check_readiness().await;
    f.transport.push_json(image_response(b"a"));
    f.transport.push_json(json!({}));

    let report = f
        .studio
        .batch_images(&["a".to_string(), "b".to_string()], ImageAspectRatio::Square)
        .await?;

    assert_eq!(*report.total(), 2);
    assert_eq!(report.succeeded().len() + report.failed().len(), 2);
    assert_eq!(f.studio.readiness(), Readiness::Ready);
    assert!(f.studio.batch_job().is_none());
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_speech_decodes_and_plays() -> anyhow::Result<()> {
    let mut f = fixture(TestCredentials::with_key("k"));
    let pcm: Vec<u8> = (0..480u16).flat_map(|s| s.to_le_bytes()).collect();
    f.transport.push_json(json!({
        "candidates": [{ "content": { "parts": [
            { "inlineData": { "mimeType": "audio/L16;rate=24000", "data": encode_base64(&pcm) } }
        ] } }]
    }));

    let buffer = f.studio.generate_speech("Once upon a time").await?;
    assert_eq!(buffer.channel_count(), 1);
    assert_eq!(buffer.frames(), 480);

    let playback = f.studio.play(buffer);
    assert_eq!(playback.finished().await, PlaybackEnd::Finished);
    Ok(())
}

#[tokio::test]
async fn test_story_from_image() -> anyhow::Result<()> {
    let mut f = fixture(TestCredentials::with_key("k"));
    f.transport.push_json(json!({
        "candidates": [{ "content": { "parts": [{ "text": "A tale." }] } }]
    }));

    let story = f
        .studio
        .generate_story(&ImageInput::new(vec![1, 2], "image/png"))
        .await?;
    assert_eq!(story, "A tale.");
    Ok(())
}

#[test]
fn test_prompt_hand_off() {
    let mut f = fixture(TestCredentials::with_key("k"));

    f.studio.send_prompt("", Mode::Speech);
    assert_eq!(f.studio.router().active(), Mode::Speech);
    assert_eq!(f.studio.router().initial(Mode::Speech), Some(""));

    f.studio.send_prompt("a lighthouse", Mode::Video);
    assert_eq!(f.studio.router().active(), Mode::Video);
    assert_eq!(
        f.studio.router_mut().take_initial(Mode::Video).as_deref(),
        Some("a lighthouse")
    );
}

#[tokio::test]
async fn test_unsaved_history_still_returns_image() -> anyhow::Result<()> {
    let transport = Arc::new(MockTransport::default());
    transport.push_json(image_response(b"fox"));
    let components = StudioComponentsBuilder::default()
        .config(StudioConfig::default())
        .credentials(Arc::new(TestCredentials::with_key("k")))
        .transport(transport.clone())
        .key_value(Arc::new(ReadOnlyStore))
        .media(Arc::new(MemoryMediaStore::new()))
        .sleeper(Arc::new(InstantSleeper::default()))
        .build()?;
    let mut studio = Studio::new(components)?;

    let entry = studio
        .generate_image("a fox", ImageAspectRatio::Square)
        .await?;

    assert_eq!(entry.prompt(), "a fox");
    let message = studio.last_error().unwrap();
    assert!(message.starts_with("Failed to save image history"));
    assert!(message.contains("read-only"));
    Ok(())
}

#[tokio::test]
async fn test_video_batch_keeps_results_before_failure() -> anyhow::Result<()> {
    let mut f = fixture(TestCredentials::with_key("k"));
    f.studio.check_readiness().await;
    f.transport.push_json(video_submission("operations/a"));
    f.transport
        .push_json(video_done("operations/a", Some("https://files.example/a.mp4")));
    f.transport
        .push_asset(AssetResponse::new(200, "OK", Some("video/mp4".into()), b"a-clip".to_vec()));
    f.transport.push_json(video_submission("operations/b"));
    f.transport.push_json(video_done("operations/b", None));

    let prompts = ["a".to_string(), "b".to_string(), "c".to_string()];
    let report = f
        .studio
        .batch_videos(&prompts, &VideoRequest::from_prompt(""))
        .await?;

    assert_eq!(report.succeeded(), &["a"]);
    assert_eq!(report.failed()[0].0, "b");
    assert!(report.stopped_by().is_some());

    let locator = f
        .studio
        .batch()
        .artifacts("a")
        .and_then(|a| a.video.clone())
        .unwrap();
    assert!(locator.starts_with("memory://"));
    assert_eq!(f.media.len(), 1);
    assert!(f.studio.batch().artifacts("c").is_none());
    assert_eq!(
        f.studio.last_error(),
        Some("poll-video failed: Video generation finished without a download link")
    );
    assert_eq!(f.studio.readiness(), Readiness::Ready);
    Ok(())
}
