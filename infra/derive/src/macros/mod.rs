pub mod args;
pub mod configurable;
pub mod setters;
