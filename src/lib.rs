// Reusable library API — used by the CLI and the auxiliary binaries
pub mod controller;
pub mod dictionary;
pub mod errors;
mod letters;
pub mod log;
pub mod search;
pub mod word_bag;
