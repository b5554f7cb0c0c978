// Adapters layer: concrete sample sources and report renderers around the core.

pub mod csv_source;
pub mod inline;
pub mod raw_input;
pub mod render;
