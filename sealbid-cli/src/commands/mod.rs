pub mod hash;
pub mod submission;

pub use hash::{handle_hash_command, HashCommands};
pub use submission::{handle_submission_command, SubmissionCommands};
