/// Ordered path rewriting with lazily loaded rules.
pub mod mapper;
/// Rule records and the rules file format.
pub mod rules;
