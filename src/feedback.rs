// src/feedback.rs

use crate::models::Cue;
use log::debug;

/// Audio/haptic collaborator. Fire-and-forget: nothing comes back.
pub trait FeedbackSink {
    fn notify(&mut self, cue: Cue);
}

/// Writes cues to the log. Used by the terminal host, which has no speaker.
#[derive(Debug, Default)]
pub struct LogSink;

impl FeedbackSink for LogSink {
    fn notify(&mut self, cue: Cue) {
        debug!("[Feedback] {:?}", cue);
    }
}

/// Keeps every cue it receives, for assertions.
#[derive(Debug, Default, Clone)]
pub struct RecordingSink {
    pub cues: Vec<Cue>,
}

impl FeedbackSink for RecordingSink {
    fn notify(&mut self, cue: Cue) {
        self.cues.push(cue);
    }
}
