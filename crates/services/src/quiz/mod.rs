mod progress;
mod scoring;
mod session;
mod workflow;

// Public API of the quiz subsystem.
pub use crate::error::QuizError;
pub use progress::QuizProgress;
pub use scoring::check_answer;
pub use session::QuizSession;
pub use workflow::QuizWorkflow;
