//! Host-side pieces for the in-scene keyboard: candidate lookup over HTTP,
//! a background candidate worker, an in-memory memo store with JSON
//! persistence and the [`host::KeyboardHost`] adapter that ties them to the
//! keyboard controller.

pub mod async_worker;
pub mod candidate_service;
pub mod host;
pub mod memo_store;
pub mod trace_init;

pub use candidate_service::{CandidateService, GoogleTransliterate, StaticCandidates};
pub use host::KeyboardHost;
pub use memo_store::{InMemoryMemoStore, MemoStoreError};
pub use trace_init::init_tracing;
