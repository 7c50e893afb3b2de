mod file_modifier;
mod prompter;
mod validator;

pub use file_modifier::{backup_path_for, AppliedFix, FixApplier, Validation, CONFIRM_QUESTION};
pub use prompter::{is_affirmative, Prompter, TtyPrompter};
pub use validator::{BuildValidator, GoValidator, Validators};
