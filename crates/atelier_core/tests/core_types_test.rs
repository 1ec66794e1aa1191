use atelier_core::{
    BatchJob, BatchKind, GenerationRequest, HistoryEntry, ImageAspectRatio, Mode,
    VideoAspectRatio, VideoDuration, VideoOperation, VideoRequest,
};
use atelier_error::{GenerationErrorKind, Operation};
use strum::IntoEnumIterator;

#[test]
fn test_image_aspect_ratios_round_trip_through_strings() {
    for ratio in ImageAspectRatio::iter() {
        let parsed: ImageAspectRatio = ratio.to_string().parse().unwrap();
        assert_eq!(parsed, ratio);
    }
    assert_eq!(ImageAspectRatio::iter().count(), 5);
}

#[test]
fn test_video_aspect_ratio_rejects_unsupported_values() {
    assert_eq!(
        "16:10".parse::<VideoAspectRatio>().unwrap(),
        VideoAspectRatio::Landscape16x10
    );
    assert!("9:16".parse::<VideoAspectRatio>().is_err());
}

#[test]
fn test_video_duration_bounds() {
    assert_eq!(VideoDuration::try_from(5).unwrap().seconds(), 5);
    assert_eq!(VideoDuration::try_from(8).unwrap().seconds(), 8);

    let err = VideoDuration::try_from(4).unwrap_err();
    assert_eq!(err.operation, Operation::VideoSubmit);
    assert!(matches!(err.kind, GenerationErrorKind::InvalidRequest(_)));
    assert!(VideoDuration::try_from(9).is_err());
}

#[test]
fn test_video_duration_deserialization_is_validated() {
    let ok: VideoDuration = serde_json::from_str("6").unwrap();
    assert_eq!(ok.seconds(), 6);
    assert!(serde_json::from_str::<VideoDuration>("12").is_err());
}

#[test]
fn test_batch_job_completion_never_exceeds_total() {
    let mut job = BatchJob::new(BatchKind::Videos, 3);
    for _ in 0..10 {
        job.record_settlement();
    }
    assert_eq!(*job.completed(), 3);
    assert_eq!(*job.total(), 3);
}

#[test]
fn test_request_maps_to_operation() {
    let video = GenerationRequest::Video(VideoRequest::from_prompt("waves"));
    assert_eq!(video.operation(), Operation::VideoSubmit);
    assert_eq!(GenerationRequest::IdeaList.operation(), Operation::Ideas);
}

#[test]
fn test_video_request_with_prompt_keeps_settings() {
    let base = VideoRequest::from_prompt("one");
    let other = base.with_prompt("two");
    assert_eq!(other.prompt(), "two");
    assert_eq!(other.duration(), base.duration());
    assert_eq!(other.aspect_ratio(), base.aspect_ratio());
}

#[test]
fn test_finished_operation_without_locator() {
    let op = VideoOperation::finished_empty("operations/1");
    assert!(op.done());
    assert!(op.result_uri().is_none());
    assert!(op.error().is_none());
}

#[test]
fn test_history_entry_serializes_aspect_ratio_as_string() {
    let entry = HistoryEntry::new("data:image/jpeg;base64,AA==", "a cat", ImageAspectRatio::Portrait3x4);
    let json = serde_json::to_string(&entry).unwrap();
    assert!(json.contains("\"3:4\""));
    let back: HistoryEntry = serde_json::from_str(&json).unwrap();
    assert_eq!(back, entry);
}

#[test]
fn test_modes_parse_lowercase() {
    assert_eq!("video".parse::<Mode>().unwrap(), Mode::Video);
    assert_eq!(Mode::Speech.to_string(), "speech");
}
