//! Pinyin drill core: answer matching, mastery bookkeeping, chapter pools and
//! the session controller. The terminal front end lives in the binary.

pub mod app;
pub mod catalog;
pub mod config;
pub mod engine;
pub mod logging;
pub mod lookup;
pub mod session;
pub mod store;
