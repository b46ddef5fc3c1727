/// Enumerated option sets and their display names.
pub mod options;
/// Typed render parameter record and its validation.
pub mod render_params;
