//! Asana Guide - step-by-step yoga pose guide
//!
//! A pose page is a static body of content plus one piece of state: which
//! step of the guided breakdown is shown. [`selector::StepSelector`] owns that
//! state and notifies subscribers on every change; the HTML renderer, the
//! static site builder and the terminal viewer all read from it.

pub mod config;
pub mod content;
pub mod logging;
pub mod render;
pub mod selector;
pub mod site;
pub mod ui;

pub use content::{Catalog, CatalogError, PageContent, Step};
pub use selector::{SelectionChange, SelectionPhase, StepSelector, SubscriptionId};
