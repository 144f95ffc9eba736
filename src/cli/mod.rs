pub mod menu;
pub mod prompt;
pub mod setup;
pub mod tables;
pub mod ui;
