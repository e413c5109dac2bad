// Tree generation
pub mod generate;
pub mod plan;

// Inspection
pub mod measure;
