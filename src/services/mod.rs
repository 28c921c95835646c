pub mod dictionary;
pub mod stats;
