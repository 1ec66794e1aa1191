//! Audio playback with single-fire completion.
//!
//! A [`Playback`] is the caller's half of a running playback: it can stop the
//! audio and await how it ended. The sink keeps the other half, a
//! [`PlaybackController`], and settles it exactly once.

use crate::AudioBuffer;
use tokio::sync::oneshot;
use tracing::debug;

/// How a playback ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlaybackEnd {
    /// The whole buffer was played
    Finished,
    /// The user stopped it early
    Stopped,
}

/// Caller side of a running playback.
#[derive(Debug)]
pub struct Playback {
    stop: Option<oneshot::Sender<()>>,
    done: oneshot::Receiver<PlaybackEnd>,
}

/// Sink side of a running playback.
#[derive(Debug)]
pub struct PlaybackController {
    stop: oneshot::Receiver<()>,
    done: oneshot::Sender<PlaybackEnd>,
}

impl Playback {
    /// Create a connected playback / controller pair.
    pub fn pair() -> (Playback, PlaybackController) {
        let (stop_tx, stop_rx) = oneshot::channel();
        let (done_tx, done_rx) = oneshot::channel();
        (
            Playback {
                stop: Some(stop_tx),
                done: done_rx,
            },
            PlaybackController {
                stop: stop_rx,
                done: done_tx,
            },
        )
    }

    /// Halt playback. Calling it again, or after the end, does nothing.
    pub fn stop(&mut self) {
        if let Some(stop) = self.stop.take() {
            let _ = stop.send(());
        }
    }

    /// Wait for playback to end.
    ///
    /// A sink that drops its controller without settling counts as stopped.
    pub async fn finished(self) -> PlaybackEnd {
        self.done.await.unwrap_or(PlaybackEnd::Stopped)
    }
}

impl PlaybackController {
    /// Resolves when the caller asks to stop.
    ///
    /// Never resolves if the caller dropped its [`Playback`] without stopping.
    pub async fn stopped(&mut self) {
        if (&mut self.stop).await.is_err() {
            std::future::pending::<()>().await;
        }
    }

    /// Settle the playback. Consumes the controller, so it fires once.
    pub fn finish(self, end: PlaybackEnd) {
        let _ = self.done.send(end);
    }
}

/// Host audio output.
pub trait AudioSink: Send + Sync {
    /// Start playing `buffer`.
    fn play(&self, buffer: AudioBuffer) -> Playback;
}

/// Headless sink that holds each buffer for its duration on the tokio clock.
///
/// Must be used from within a tokio runtime.
#[derive(Debug, Clone, Copy, Default)]
pub struct TimedSink;

impl AudioSink for TimedSink {
    fn play(&self, buffer: AudioBuffer) -> Playback {
        let (playback, mut controller) = Playback::pair();
        let duration = buffer.duration();
        debug!(?duration, channels = buffer.channel_count(), "Starting playback");

        tokio::spawn(async move {
            let end = tokio::select! {
                _ = tokio::time::sleep(duration) => PlaybackEnd::Finished,
                _ = controller.stopped() => PlaybackEnd::Stopped,
            };
            debug!(?end, "Playback ended");
            controller.finish(end);
        });

        playback
    }
}
