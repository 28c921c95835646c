pub mod practice;
pub mod stats;
pub mod words;

pub use practice::{PracticeLog, record_attempt};
pub use stats::WordPracticeTotals;
pub use words::{Definition, WordEntry, PRACTICE_BATCH_SIZE};
