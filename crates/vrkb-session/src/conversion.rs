use tracing::{debug, warn};

use vrkb_core::unicode::is_conversion_char;

use super::types::{AsyncCandidateRequest, CandidateError, ConversionSession, KeyResponse};
use super::InputSession;

/// Candidate list shown for `source`: the service's list with the source
/// appended when missing, or just the source on failure.
pub(crate) fn normalize_candidates(
    source: &str,
    result: Result<Vec<String>, CandidateError>,
) -> Vec<String> {
    let mut list: Vec<String> = match result {
        Ok(list) => list.into_iter().filter(|c| !c.is_empty()).collect(),
        Err(e) => {
            warn!(%source, error = %e, "candidate lookup failed");
            Vec::new()
        }
    };
    if !list.iter().any(|c| c == source) {
        list.push(source.to_string());
    }
    list
}

impl InputSession {
    /// Begin converting the hiragana run that ends at the cursor.
    ///
    /// Returns a response carrying the async candidate request, or a plain
    /// consumed response when there is nothing to convert.
    pub fn start_conversion(&mut self) -> KeyResponse {
        self.cancel_conversion_silently();
        self.flush_romaji();

        let start = self.buffer.run_start_before_cursor(is_conversion_char);
        let len = self.buffer.cursor() - start;
        if len == 0 {
            return self.render_response();
        }
        let source = self.buffer.slice(start, len);

        self.conversion_generation += 1;
        let generation = self.conversion_generation;
        debug!(%source, generation, "conversion started");
        self.conversion = Some(ConversionSession {
            generation,
            span_start: start,
            span_len: len,
            candidates: vec![source.clone()],
            source: source.clone(),
            page: 0,
        });

        let mut resp = self.render_response();
        resp.async_request = Some(AsyncCandidateRequest {
            reading: source,
            generation,
        });
        resp
    }

    /// Deliver a candidate lookup result. Returns `None` when the response
    /// belongs to a conversion that is no longer active.
    pub fn receive_candidates(
        &mut self,
        generation: u64,
        result: Result<Vec<String>, CandidateError>,
    ) -> Option<KeyResponse> {
        let Some(conv) = self.conversion.as_mut() else {
            debug!(generation, "candidates dropped: no active conversion");
            return None;
        };
        if conv.generation != generation {
            debug!(
                generation,
                active = conv.generation,
                "candidates dropped: stale generation"
            );
            return None;
        }
        conv.candidates = normalize_candidates(&conv.source, result);
        conv.page = 0;
        Some(self.render_response())
    }

    /// Replace the source span with the candidate at `index` (absolute, not
    /// page-relative). Out-of-range indices leave everything unchanged.
    pub fn confirm_conversion(&mut self, index: usize) -> KeyResponse {
        let Some(conv) = self.conversion.as_ref() else {
            return KeyResponse::consumed();
        };
        let Some(chosen) = conv.candidates.get(index).cloned() else {
            return KeyResponse::consumed();
        };
        let (start, len) = (conv.span_start, conv.span_len);
        self.conversion = None;
        self.buffer.replace(start, len, &chosen);
        debug!(%chosen, "conversion confirmed");
        self.render_response()
    }

    /// Confirm the candidate shown in `slot` of the current page.
    pub(crate) fn confirm_slot(&mut self, slot: usize) -> KeyResponse {
        let Some(conv) = self.conversion.as_ref() else {
            return KeyResponse::consumed();
        };
        if slot >= self.config.page_size {
            return KeyResponse::consumed();
        }
        let index = conv.page * self.config.page_size + slot;
        self.confirm_conversion(index)
    }

    /// Drop the conversion, leaving the buffer as it is.
    pub fn cancel_conversion(&mut self) -> KeyResponse {
        if self.conversion.is_none() {
            return KeyResponse::consumed();
        }
        self.cancel_conversion_silently();
        self.render_response()
    }

    pub(crate) fn cancel_conversion_silently(&mut self) {
        if let Some(conv) = self.conversion.take() {
            debug!(generation = conv.generation, "conversion cancelled");
        }
    }

    /// Flip the candidate page by `delta`, clamped to the available pages.
    pub fn flip_page(&mut self, delta: isize) -> KeyResponse {
        let page_size = self.config.page_size;
        let Some(conv) = self.conversion.as_mut() else {
            return KeyResponse::consumed();
        };
        let last = conv.page_count(page_size) - 1;
        let page = (conv.page as isize + delta).clamp(0, last as isize) as usize;
        if page == conv.page {
            return KeyResponse::consumed();
        }
        conv.page = page;
        KeyResponse::rendered()
    }
}
