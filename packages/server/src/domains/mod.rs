// Business domains
pub mod associations;
pub mod content;
pub mod departments;
pub mod settings;
pub mod taxonomy;
