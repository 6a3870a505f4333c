mod file_extractor;
mod ground_truth;
mod scripted;

pub use file_extractor::FileExtractor;
pub use ground_truth::GroundTruthStore;
pub use scripted::ScriptedExtractor;
