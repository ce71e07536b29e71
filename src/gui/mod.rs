//! GUI module - User interface components

mod app;
mod file_card;

pub use app::SweepApp;
pub use file_card::{FileCard, FileCardAction, FileSession, Notice};
