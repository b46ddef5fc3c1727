/// Tile output file naming.
pub mod naming;
/// Tile pixel bounds and ray-tracing region arithmetic.
pub mod planner;
