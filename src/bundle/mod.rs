/// Asset reference document.
pub mod assets;
/// Parameter value records and the OpenJD value conversion.
pub mod parameters;
/// Job bundle directory writer.
pub mod writer;
