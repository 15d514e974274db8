//! Headless Chrome access for snapshotting live pages and cross-checking
//! locators against the browser's own XPath engine.

pub mod config;
pub mod session;

pub use config::{ConnectionOptions, LaunchOptions};
pub use session::BrowserSession;
