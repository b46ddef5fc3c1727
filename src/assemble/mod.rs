/// Recomposing rendered tiles into full frames.
pub mod tiles;
