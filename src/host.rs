//! UI-thread adapter around [`Keyboard`].
//!
//! Routes the side effects described by each [`KeyResponse`]: candidate
//! lookups go to the [`CandidateWorker`], renders go through the
//! [`RenderGate`] and are drawn into an offscreen [`Raster`] once per tick.
//! Voice commands and submissions are handed back to the caller.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, debug_span};
use vrkb_core::geometry::Vec3;
use vrkb_core::layout::KeyId;
use vrkb_core::render::{draw_panel, Raster};
use vrkb_core::settings::Settings;
use vrkb_session::{
    Keyboard, KeyResponse, RenderGate, StatusNotice, Submission, VoiceCommand, VoiceError,
};

use crate::async_worker::{CandidateResult, CandidateWorker};
use crate::candidate_service::CandidateService;
use crate::memo_store::InMemoryMemoStore;

pub struct KeyboardHost {
    keyboard: Keyboard<InMemoryMemoStore>,
    worker: CandidateWorker,
    gate: RenderGate,
    raster: Raster,
    status: Option<StatusNotice>,
    submissions: Vec<Submission>,
    frames: u64,
}

impl KeyboardHost {
    pub fn new(
        store: InMemoryMemoStore,
        settings: Settings,
        service: Arc<dyn CandidateService>,
    ) -> std::io::Result<Self> {
        let raster = Raster::new(settings.panel.width, settings.panel.height);
        Ok(Self {
            keyboard: Keyboard::new(store, settings),
            worker: CandidateWorker::spawn(service)?,
            gate: RenderGate::new(),
            raster,
            status: None,
            submissions: Vec::new(),
            frames: 0,
        })
    }

    pub fn keyboard(&self) -> &Keyboard<InMemoryMemoStore> {
        &self.keyboard
    }

    pub fn store(&self) -> &InMemoryMemoStore {
        self.keyboard.store()
    }

    pub fn raster(&self) -> &Raster {
        &self.raster
    }

    /// Last status notice, cleared by the next key press.
    pub fn status(&self) -> Option<&StatusNotice> {
        self.status.as_ref()
    }

    /// Number of frames drawn so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Submissions received since the last call.
    pub fn take_submissions(&mut self) -> Vec<Submission> {
        std::mem::take(&mut self.submissions)
    }

    pub fn show_for_new(&mut self, position: Vec3) -> KeyResponse {
        let resp = self.keyboard.show_for_new(position);
        self.route(resp)
    }

    pub fn show_memo_list(&mut self) -> KeyResponse {
        let resp = self.keyboard.show_memo_list();
        self.route(resp)
    }

    pub fn hide(&mut self) -> KeyResponse {
        let resp = self.keyboard.hide();
        self.route(resp)
    }

    pub fn click(&mut self, x: f32, y: f32) -> KeyResponse {
        let _span = debug_span!("click", x, y).entered();
        self.status = None;
        let resp = self.keyboard.click(x, y);
        self.route(resp)
    }

    pub fn press(&mut self, key: KeyId) -> KeyResponse {
        self.status = None;
        let resp = self.keyboard.press(key);
        self.route(resp)
    }

    /// Report a finished speech recognition back to the keyboard.
    pub fn receive_voice(
        &mut self,
        generation: u64,
        result: Result<String, VoiceError>,
    ) -> Option<KeyResponse> {
        let resp = self.keyboard.receive_voice(generation, result)?;
        Some(self.route(resp))
    }

    /// Drain finished candidate lookups, then draw one frame if one is due.
    /// Returns true when a frame was drawn.
    pub fn tick(&mut self) -> bool {
        while let Some(result) = self.worker.try_recv() {
            self.deliver(result);
        }
        self.draw_frame()
    }

    /// Block until a candidate result arrives and deliver it. Used by
    /// headless drivers that have no frame loop.
    pub fn wait_for_candidates(&mut self, timeout: Duration) -> bool {
        match self.worker.recv_timeout(timeout) {
            Some(result) => {
                self.deliver(result);
                true
            }
            None => false,
        }
    }

    fn deliver(&mut self, result: CandidateResult) {
        debug!(reading = %result.reading, generation = result.generation, "candidates received");
        if let Some(resp) = self
            .keyboard
            .receive_candidates(result.generation, result.result)
        {
            self.route(resp);
        }
    }

    fn route(&mut self, resp: KeyResponse) -> KeyResponse {
        if let Some(req) = &resp.async_request {
            self.worker.submit(req.reading.clone(), req.generation);
        } else if !self.is_converting() {
            self.worker.invalidate();
        }
        if let Some(submission) = &resp.submit {
            self.submissions.push(submission.clone());
        }
        if let Some(status) = &resp.status {
            self.status = Some(status.clone());
        }
        if matches!(resp.voice, Some(VoiceCommand::Start { .. })) {
            self.status = None;
        }
        if resp.render || resp.status.is_some() {
            self.gate.request();
        }
        resp
    }

    fn is_converting(&self) -> bool {
        self.keyboard.session().is_some_and(|s| s.is_converting())
    }

    fn draw_frame(&mut self) -> bool {
        if !self.gate.begin_frame() {
            return false;
        }
        self.raster.clear();
        if let (Some(layout), Some(mut view)) = (self.keyboard.layout(), self.keyboard.panel_view())
        {
            if let Some(status) = &self.status {
                view.status = Some(status.message());
            }
            draw_panel(
                &mut self.raster,
                &layout,
                &view,
                &self.keyboard.settings().text,
            );
        }
        // Requests made while drawing are dropped by the gate.
        self.gate.end_frame();
        self.frames += 1;
        true
    }
}
