pub mod category;
pub mod fields;
pub mod prompt;
