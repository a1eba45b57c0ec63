mod fake_backend;
mod recording_events;

pub use fake_backend::{FakeBackend, FakeBackendFactory};
pub use recording_events::RecordingEvents;
