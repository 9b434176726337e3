// HTTP handlers

pub mod health;
pub mod resources;
pub mod ui;
