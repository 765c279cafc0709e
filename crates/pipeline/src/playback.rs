use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::session::{AudioInput, SessionObserver, SpeechSession, SpeechSource, Utterance};

/// Development speech backend that replays a UTF-8 text object as a
/// recognition session.
///
/// Each non-empty line becomes one utterance; an optional
/// tab-separated prefix carries the diarized speaker identity
/// (`"2\tMy order never arrived."`). The session fires a clean stop
/// once the text is exhausted. Production recognition engines plug in
/// behind the same `SpeechSource` seam.
pub struct TextPlayback;

impl TextPlayback {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TextPlayback {
    fn default() -> Self {
        Self::new()
    }
}

struct TextPlaybackSession {
    observer: Arc<dyn SessionObserver>,
    lines: Vec<(Option<String>, String)>,
}

#[async_trait]
impl SpeechSource for TextPlayback {
    async fn open_session(
        &self,
        audio: AudioInput,
        observer: Arc<dyn SessionObserver>,
    ) -> anyhow::Result<Box<dyn SpeechSession>> {
        let text = String::from_utf8(audio.bytes)
            .map_err(|e| anyhow::anyhow!("Audio object '{}' is not UTF-8 text: {e}", audio.name))?;

        let lines: Vec<(Option<String>, String)> = text
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(parse_line)
            .collect();

        debug!(name = %audio.name, utterances = lines.len(), "Text playback session opened");

        Ok(Box::new(TextPlaybackSession { observer, lines }))
    }

    fn name(&self) -> &str {
        "text_playback"
    }
}

#[async_trait]
impl SpeechSession for TextPlaybackSession {
    async fn start(&mut self) -> anyhow::Result<()> {
        for (speaker_id, text) in self.lines.drain(..) {
            self.observer.on_utterance(Utterance { speaker_id, text });
        }
        self.observer.on_stopped();
        Ok(())
    }

    async fn stop(&mut self) -> anyhow::Result<()> {
        Ok(())
    }
}

fn parse_line(line: &str) -> (Option<String>, String) {
    match line.split_once('\t') {
        Some((speaker, text)) if !speaker.trim().is_empty() => {
            (Some(speaker.trim().to_string()), text.trim().to_string())
        }
        _ => (None, line.trim().to_string()),
    }
}
