pub mod analysis;
pub mod problem;
pub mod video;

pub use analysis::{AnalysisResponse, AnalysisResult, AnalyzeRequest};
pub use problem::{Difficulty, ProblemInfo};
pub use video::VideoResult;
