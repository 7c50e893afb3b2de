pub mod fix;

pub use fix::{handle_fix, run_fix};
