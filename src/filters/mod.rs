pub mod catalog;
pub mod help;

pub use catalog::{lookup, lookup_choice, lookup_key, section, SECTIONS};
