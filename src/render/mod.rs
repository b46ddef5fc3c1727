/// Host rendering API contract.
pub mod host;
/// Render task orchestration.
pub mod job;
/// Step outcomes and the soft-warning policy.
pub mod outcome;
/// In-memory recording host.
pub mod recording;
/// Host session guard.
pub mod session;
