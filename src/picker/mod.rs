//! Interactive element picking.
//!
//! A [`PickerSession`] is a plain value: each event consumes the current
//! session and returns the next one, so nothing about the pick in progress
//! lives outside it.
//!
//! ```text
//! Idle --Start--> Armed --Hover--> Highlighted --Click--> Resolved
//!                   \                  /
//!                    '----Cancel------' --> Idle
//! ```

pub mod action;
pub mod selection;

pub use action::ElementAction;
pub use selection::{AddOutcome, SelectionList, is_absolute_xpath};

use crate::config::InferenceOptions;
use crate::dom::{Document, NodeId};
use crate::locator::{Candidate, Locator, SelectorEngine};
use serde::Serialize;
use std::fmt;

/// Live information about the hovered element
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HoverPreview {
    pub node: NodeId,
    /// Opening tag summary, e.g. `<button id="save">`
    pub element: String,
    /// Best-scoring candidate, not re-verified
    pub candidate: Candidate,
}

/// A clicked element with its locator and suggested action
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Selection {
    pub node: NodeId,
    pub element: String,
    pub locator: Locator,
    pub action: ElementAction,
}

impl Selection {
    /// `"{expression} → {action}"`
    pub fn selector(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} → {}", self.locator.expression, self.action)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PickerState {
    Idle,
    Armed,
    Highlighted(HoverPreview),
    Resolved(Selection),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerEvent {
    Start,
    Hover(NodeId),
    Click(NodeId),
    Cancel,
}

#[derive(Debug, Clone)]
pub struct PickerSession {
    state: PickerState,
    options: InferenceOptions,
}

impl Default for PickerSession {
    fn default() -> Self {
        Self::new()
    }
}

impl PickerSession {
    pub fn new() -> Self {
        Self::with_options(InferenceOptions::default())
    }

    pub fn with_options(options: InferenceOptions) -> Self {
        Self {
            state: PickerState::Idle,
            options,
        }
    }

    pub fn state(&self) -> &PickerState {
        &self.state
    }

    /// Armed or highlighting, i.e. hover and click events are handled
    pub fn is_active(&self) -> bool {
        matches!(self.state, PickerState::Armed | PickerState::Highlighted(_))
    }

    /// Apply one event. Events that make no sense in the current state leave
    /// it unchanged.
    pub fn handle(mut self, document: &Document, event: PickerEvent) -> Self {
        let active = self.is_active();
        let engine = self.engine(document);
        self.state = match (self.state, event) {
            (PickerState::Idle | PickerState::Resolved(_), PickerEvent::Start) => PickerState::Armed,
            (_, PickerEvent::Cancel) if active => {
                log::debug!("Picker cancelled");
                PickerState::Idle
            }
            (state, PickerEvent::Hover(node)) if active => {
                match engine.preview(node) {
                    Ok(candidate) => PickerState::Highlighted(HoverPreview {
                        node,
                        element: document.describe(node),
                        candidate,
                    }),
                    Err(e) => {
                        log::debug!("Ignoring hover: {}", e);
                        state
                    }
                }
            }
            (state, PickerEvent::Click(node)) if active => match engine.compute_locator(node) {
                Ok(locator) => {
                    let selection = Selection {
                        node,
                        element: document.describe(node),
                        action: ElementAction::for_element(document, node),
                        locator,
                    };
                    log::debug!("Picked {}", selection);
                    PickerState::Resolved(selection)
                }
                Err(e) => {
                    log::debug!("Ignoring click: {}", e);
                    state
                }
            },
            (state, _) => state,
        };
        self
    }

    /// Hand out a resolved selection and return to `Idle`. Any other state is
    /// returned untouched.
    pub fn take_selection(self) -> (Self, Option<Selection>) {
        match self.state {
            PickerState::Resolved(selection) => (
                Self {
                    state: PickerState::Idle,
                    options: self.options,
                },
                Some(selection),
            ),
            state => (
                Self {
                    state,
                    options: self.options,
                },
                None,
            ),
        }
    }

    fn engine<'a>(&self, document: &'a Document) -> SelectorEngine<'a> {
        SelectorEngine::new(document).with_options(self.options.clone())
    }
}
