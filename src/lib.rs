//! # xpath-picker
//!
//! Stable XPath inference for DOM elements.
//!
//! Given one element of a page, the crate computes an XPath expression that
//! selects exactly that element and is likely to keep selecting it after
//! re-renders: reordered siblings, regenerated ids and small layout changes.
//!
//! ## Features
//!
//! - **Locator inference**: text, anchor-relative, direct-attribute and full-path
//!   strategies, verified for uniqueness and ranked by priority
//! - **Stability heuristics**: generated ids, hashes and numbered layout classes are
//!   never used as identifying features
//! - **XPath 1.0 engine**: evaluation over an immutable document snapshot
//! - **Picker session**: hover/click/cancel state machine with suggested test actions
//! - **Live pages**: snapshot a Chrome tab and cross-check locators in the browser
//!
//! ## Computing a Locator
//!
//! ```rust
//! use xpath_picker::{Document, ElementNode, LocatorCategory, compute_locator};
//!
//! # fn main() -> xpath_picker::Result<()> {
//! let doc = Document::new(
//!     &ElementNode::new("div")
//!         .with_child(ElementNode::new("span").with_attribute("id", "x1").with_text("Hello"))
//!         .with_child(ElementNode::new("span").with_text("World")),
//! );
//!
//! let world = doc.evaluate("//span[2]", doc.root())?[0];
//! let locator = compute_locator(&doc, world)?;
//!
//! assert_eq!(locator.expression, r#"//span[text()="World"]"#);
//! assert_eq!(locator.category, LocatorCategory::Text);
//! # Ok(())
//! # }
//! ```
//!
//! ## Live Pages
//!
//! ```rust,no_run
//! use xpath_picker::{BrowserSession, LaunchOptions, SelectorEngine};
//!
//! # fn main() -> xpath_picker::Result<()> {
//! let session = BrowserSession::launch(LaunchOptions::default())?;
//! session.navigate("https://example.com")?;
//!
//! let doc = session.snapshot_dom()?;
//! let heading = doc.evaluate("//h1", doc.root())?[0];
//! let locator = SelectorEngine::new(&doc).compute_locator(heading)?;
//!
//! println!("{} matches {} node(s)", locator.expression, session.count_matches(&locator.expression)?);
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Overview
//!
//! - [`locator`]: candidate generation, anchors, path builders and ranking
//! - [`xpath`]: XPath 1.0 parser and evaluator, literal quoting
//! - [`dom`]: flat page snapshots, hand-built elements and the arena document
//! - [`picker`]: interactive picking session and selection list
//! - [`browser`]: headless Chrome session
//! - [`config`]: inference options
//! - [`error`]: error types and result aliases

pub mod browser;
pub mod config;
pub mod dom;
pub mod error;
pub mod locator;
pub mod picker;
pub mod xpath;

pub use browser::{BrowserSession, ConnectionOptions, LaunchOptions};
pub use config::InferenceOptions;
pub use dom::{Document, ElementNode, NodeId, NodeKind, SnapshotChild, SnapshotNode};
pub use error::{LocatorError, Result};
pub use locator::{
    AnchorResult, Candidate, HeuristicClassifier, Locator, LocatorCategory, SelectorEngine, StabilityClassifier,
    compute_locator, is_static,
};
pub use picker::{
    AddOutcome, ElementAction, HoverPreview, PickerEvent, PickerSession, PickerState, Selection, SelectionList,
};
pub use xpath::XPath;
