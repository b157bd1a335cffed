use tracing::debug;

use super::types::{KeyResponse, StatusNotice, VoiceCommand, VoiceError};
use super::InputSession;

impl InputSession {
    /// Ask the host to start speech recognition. Rejected with a status
    /// notice while a request is already outstanding.
    pub fn start_voice(&mut self) -> KeyResponse {
        if self.voice.active {
            let mut resp = KeyResponse::consumed();
            resp.status = Some(StatusNotice::VoiceBusy);
            return resp;
        }
        self.cancel_conversion_silently();
        self.flush_romaji();
        self.voice.active = true;
        self.voice.generation += 1;
        debug!(generation = self.voice.generation, "voice started");
        let mut resp = self.render_response();
        resp.voice = Some(VoiceCommand::Start {
            generation: self.voice.generation,
        });
        resp
    }

    /// Stop recording. State flips here, before the host aborts; calling it
    /// with nothing recording does nothing.
    pub fn abort_voice(&mut self) -> KeyResponse {
        if !self.voice.active {
            return KeyResponse::consumed();
        }
        self.voice.active = false;
        // Results already in flight for the aborted request must not land.
        self.voice.generation += 1;
        debug!("voice aborted");
        let mut resp = KeyResponse::rendered();
        resp.voice = Some(VoiceCommand::Abort);
        resp
    }

    /// Voice key: start, or stop when already recording.
    pub(crate) fn toggle_voice(&mut self) -> KeyResponse {
        if self.voice.active {
            self.abort_voice()
        } else {
            self.start_voice()
        }
    }

    /// Deliver a recognition result. Returns `None` for a result that does
    /// not belong to the outstanding request.
    pub fn receive_voice(
        &mut self,
        generation: u64,
        result: Result<String, VoiceError>,
    ) -> Option<KeyResponse> {
        if !self.voice.active || generation != self.voice.generation {
            debug!(generation, "voice result dropped: stale");
            return None;
        }
        self.voice.active = false;
        match result {
            Ok(transcript) => {
                debug!(%transcript, "voice result");
                Some(self.insert_at_cursor(&transcript))
            }
            Err(e) => {
                debug!(error = %e, "voice failed");
                let mut resp = KeyResponse::rendered();
                resp.status = Some(StatusNotice::VoiceFailed(e));
                Some(resp)
            }
        }
    }
}
