//! The composer's staging record and lifecycle phases.

use crate::types::EncodedPreview;

/// Work the composer is waiting on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activity {
    Acquiring,
    Transcoding,
    Sending,
}

/// Lifecycle phase, derived from the state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Not busy, nothing staged
    Idle,
    /// Reading the selected file
    Acquiring,
    /// Decoding and re-encoding
    Transcoding,
    /// Not busy, a preview is staged
    Staged,
    /// Waiting on the message-send collaborator
    Sending,
}

/// What the user is composing.
///
/// `busy` is true exactly while an acquisition, transcode or send is in
/// flight.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompositionState {
    text: String,
    attachment: Option<EncodedPreview>,
    activity: Option<Activity>,
}

impl CompositionState {
    /// Draft text, as typed
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Staged preview, if any
    pub fn attachment(&self) -> Option<&EncodedPreview> {
        self.attachment.as_ref()
    }

    pub fn is_busy(&self) -> bool {
        self.activity.is_some()
    }

    pub fn activity(&self) -> Option<Activity> {
        self.activity
    }

    pub fn phase(&self) -> Phase {
        match self.activity {
            Some(Activity::Acquiring) => Phase::Acquiring,
            Some(Activity::Transcoding) => Phase::Transcoding,
            Some(Activity::Sending) => Phase::Sending,
            None if self.attachment.is_some() => Phase::Staged,
            None => Phase::Idle,
        }
    }

    /// Whether a submission would send anything.
    pub fn has_content(&self) -> bool {
        !self.text.trim().is_empty() || self.attachment.is_some()
    }

    /// Whether `submit` would call the send collaborator right now.
    pub fn can_submit(&self) -> bool {
        !self.is_busy() && self.has_content()
    }

    pub(crate) fn set_text(&mut self, text: String) {
        self.text = text;
    }

    pub(crate) fn set_attachment(&mut self, attachment: Option<EncodedPreview>) {
        self.attachment = attachment;
    }

    pub(crate) fn set_activity(&mut self, activity: Option<Activity>) {
        self.activity = activity;
    }
}
