pub mod cleaner;
pub mod diversity;
pub mod nested;
pub mod random;
pub mod render;
pub mod sections;
