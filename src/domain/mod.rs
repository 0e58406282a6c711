//! Domain aggregates exchanged with the news platform API.

pub mod account;
pub mod category;
pub mod news;
pub mod report;
pub mod tag;
pub mod types;
