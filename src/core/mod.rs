pub mod diff_parser;
pub mod git;
pub mod prompt;
pub mod reviewer;
pub mod runner;
pub mod terminal;

pub use diff_parser::{ChangedFile, DiffParser, IgnoreRule};
pub use git::{DiffSource, GitDiffSource};
pub use reviewer::CodeReviewer;
pub use runner::{ReviewRun, RunOutcome};
pub use terminal::{Prompter, StdinPrompter};
