//! Mock Judge0 submissions API for testing execution clients
//!
//! Serves `POST /submissions` and `GET /submissions/{token}` from a
//! [`ServiceFixture`] and records every request it receives, including the
//! credential headers, so tests can assert on exactly what a client sent.

pub mod fixtures;
pub mod handlers;
pub mod recorder;
pub mod server;

pub use fixtures::{encode_wrapped, CreateBehavior, ResultFixture, ServiceFixture};
pub use recorder::{MockState, RecordedCreate, RecordedFetch, RequestMeta};
pub use server::{MockServer, RunningMockServer};
