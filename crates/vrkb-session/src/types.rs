use vrkb_core::geometry::Viewpoint;
use vrkb_core::memo::MemoId;

pub(crate) const TITLE: &str = "メモ入力";
pub(crate) const PLACEHOLDER: &str = "ここに入力";

/// Candidate service failure. The session degrades to the source text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CandidateError {
    #[error("request failed: {0}")]
    Transport(String),
    #[error("unexpected response: {0}")]
    Parse(String),
}

/// Speech recognition outcome other than a transcript.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VoiceError {
    #[error("no speech detected")]
    NoSpeech,
    #[error("microphone permission denied")]
    PermissionDenied,
    #[error("recognition aborted")]
    Aborted,
    #[error("recognition failed: {0}")]
    Service(String),
}

/// Text handed to the memo store when a session completes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub text: String,
    /// Memo being edited; `None` creates a new memo.
    pub target: Option<MemoId>,
}

/// Request for asynchronous candidate lookup. The caller answers with
/// `receive_candidates(generation, ..)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AsyncCandidateRequest {
    pub reading: String,
    pub generation: u64,
}

/// Instruction for the host's speech recognizer (ja-JP, single utterance).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoiceCommand {
    Start { generation: u64 },
    Abort,
}

/// Non-fatal condition the host may surface to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusNotice {
    /// A voice request is already outstanding.
    VoiceBusy,
    VoiceFailed(VoiceError),
}

impl StatusNotice {
    pub fn message(&self) -> String {
        match self {
            Self::VoiceBusy => "音声認識は実行中です".to_string(),
            Self::VoiceFailed(VoiceError::NoSpeech) => "音声が検出されませんでした".to_string(),
            Self::VoiceFailed(VoiceError::PermissionDenied) => "マイクの使用が許可されていません".to_string(),
            Self::VoiceFailed(e) => format!("音声認識エラー: {e}"),
        }
    }
}

/// Response from `handle_key` and the async receivers. Every side effect the
/// caller must perform is a field here; the session itself never calls out.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyResponse {
    pub consumed: bool,
    /// Panel needs redrawing.
    pub render: bool,
    pub submit: Option<Submission>,
    /// Session is finished (submitted or cancelled); the panel should close.
    pub closed: bool,
    pub async_request: Option<AsyncCandidateRequest>,
    pub voice: Option<VoiceCommand>,
    pub status: Option<StatusNotice>,
    /// Move the viewer (memo list "move to").
    pub viewpoint: Option<Viewpoint>,
}

impl KeyResponse {
    pub fn not_consumed() -> Self {
        Self {
            consumed: false,
            render: false,
            submit: None,
            closed: false,
            async_request: None,
            voice: None,
            status: None,
            viewpoint: None,
        }
    }

    pub fn consumed() -> Self {
        Self {
            consumed: true,
            ..Self::not_consumed()
        }
    }

    pub fn rendered() -> Self {
        Self {
            render: true,
            ..Self::consumed()
        }
    }

    /// Combine two responses from one key press; fields set in `other` win.
    pub(crate) fn merge(mut self, other: KeyResponse) -> KeyResponse {
        self.consumed |= other.consumed;
        self.render |= other.render;
        self.closed |= other.closed;
        if other.submit.is_some() {
            self.submit = other.submit;
        }
        if other.async_request.is_some() {
            self.async_request = other.async_request;
        }
        if other.voice.is_some() {
            self.voice = other.voice;
        }
        if other.status.is_some() {
            self.status = other.status;
        }
        if other.viewpoint.is_some() {
            self.viewpoint = other.viewpoint;
        }
        self
    }
}

/// Display parameters the session needs for wrapping and paging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    pub visible_lines: usize,
    pub columns: usize,
    pub page_size: usize,
}

impl SessionConfig {
    pub fn from_settings(s: &vrkb_core::settings::Settings) -> Self {
        Self {
            visible_lines: s.text.visible_lines,
            columns: s.text.columns,
            page_size: s.candidates.page_size,
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self::from_settings(vrkb_core::settings::settings())
    }
}

/// State of the nested kana-to-word conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionSession {
    pub generation: u64,
    /// Span start, in characters.
    pub span_start: usize,
    /// Span length, in characters.
    pub span_len: usize,
    pub source: String,
    pub candidates: Vec<String>,
    pub page: usize,
}

impl ConversionSession {
    pub fn page_count(&self, page_size: usize) -> usize {
        self.candidates.len().div_ceil(page_size.max(1)).max(1)
    }

    /// Candidates on the current page.
    pub fn page_items(&self, page_size: usize) -> &[String] {
        let size = page_size.max(1);
        let start = (self.page * size).min(self.candidates.len());
        let end = (start + size).min(self.candidates.len());
        &self.candidates[start..end]
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct VoiceState {
    pub(crate) active: bool,
    pub(crate) generation: u64,
}
