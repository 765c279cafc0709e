mod assessment;
mod transcript;

pub use assessment::AssessmentRecord;
pub use transcript::TranscriptRecord;
