//! Step selector: the view state behind the step navigation
//!
//! The selector owns one value, the title of the selected step. Writes are
//! never validated; reads resolve the title against the catalog and fall back
//! to the first step when it does not match. Renderers subscribe to changes
//! and are called synchronously from [`StepSelector::select`] after the new
//! title is stored.

use std::fmt;

use crate::content::{Catalog, Step};

/// Handle returned by [`StepSelector::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Payload delivered to subscribers on every `select`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionChange {
    pub previous: String,
    pub current: String,
}

/// Logical state of the selector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionPhase {
    /// Initial state, the first step is selected
    Default,
    /// At least one `select` has happened
    UserSelected,
}

type Subscriber = Box<dyn FnMut(&SelectionChange)>;

pub struct StepSelector {
    selected: String,
    phase: SelectionPhase,
    subscribers: Vec<(SubscriptionId, Subscriber)>,
    next_id: u64,
}

impl StepSelector {
    /// Create a selector with the catalog's first step selected
    pub fn new(catalog: &Catalog) -> Self {
        Self {
            selected: catalog.first().title.clone(),
            phase: SelectionPhase::Default,
            subscribers: Vec::new(),
            next_id: 0,
        }
    }

    /// Select a step by title and notify subscribers.
    ///
    /// The title is stored as given, even when no step has it.
    pub fn select(&mut self, title: impl Into<String>) {
        let current = title.into();
        let previous = std::mem::replace(&mut self.selected, current.clone());
        self.phase = SelectionPhase::UserSelected;

        tracing::debug!(previous = %previous, current = %current, "Step selected");

        let change = SelectionChange { previous, current };
        for (_, subscriber) in &mut self.subscribers {
            subscriber(&change);
        }
    }

    /// The active step: the first catalog entry titled like the selection,
    /// or the catalog's first step if there is none
    pub fn active_step<'c>(&self, catalog: &'c Catalog) -> &'c Step {
        catalog.resolve(&self.selected)
    }

    /// Catalog index of [`StepSelector::active_step`]
    pub fn active_index(&self, catalog: &Catalog) -> usize {
        catalog.resolve_index(&self.selected)
    }

    /// Whether `step` is the active step of `catalog`
    pub fn is_active(&self, step: &Step, catalog: &Catalog) -> bool {
        std::ptr::eq(self.active_step(catalog), step)
    }

    /// Raw selection state, possibly not a catalog title
    pub fn selected_title(&self) -> &str {
        &self.selected
    }

    pub fn phase(&self) -> SelectionPhase {
        self.phase
    }

    /// Register a callback run after every `select`, in registration order
    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&SelectionChange) + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscribers.push((id, Box::new(callback)));
        id
    }

    /// Remove a callback. Returns false if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sid, _)| *sid != id);
        self.subscribers.len() != before
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

impl fmt::Debug for StepSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StepSelector")
            .field("selected", &self.selected)
            .field("phase", &self.phase)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::PageContent;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn bridge_catalog() -> Catalog {
        PageContent::builtin().unwrap().steps
    }

    #[test]
    fn test_initial_state_is_first_step() {
        let catalog = bridge_catalog();
        let selector = StepSelector::new(&catalog);

        assert_eq!(selector.phase(), SelectionPhase::Default);
        assert_eq!(selector.selected_title(), "Set Your Foundation");
        assert_eq!(selector.active_step(&catalog).title, "Set Your Foundation");
        assert_eq!(selector.active_index(&catalog), 0);
    }

    #[test]
    fn test_bridge_pose_scenario() {
        let catalog = bridge_catalog();
        let mut selector = StepSelector::new(&catalog);

        selector.select("Lift the Hips");
        assert_eq!(selector.active_step(&catalog).title, "Lift the Hips");
        assert_eq!(selector.active_index(&catalog), 2);

        selector.select("Nonexistent");
        assert_eq!(selector.active_step(&catalog).title, "Set Your Foundation");
        assert_eq!(selector.active_index(&catalog), 0);
    }

    #[test]
    fn test_unknown_title_stored_verbatim() {
        let catalog = bridge_catalog();
        let mut selector = StepSelector::new(&catalog);

        selector.select("Nonexistent");
        assert_eq!(selector.selected_title(), "Nonexistent");
        assert_eq!(selector.phase(), SelectionPhase::UserSelected);
    }

    #[test]
    fn test_phase_changes_even_when_reselecting_first() {
        let catalog = bridge_catalog();
        let mut selector = StepSelector::new(&catalog);

        selector.select("Set Your Foundation");
        assert_eq!(selector.phase(), SelectionPhase::UserSelected);
        assert_eq!(selector.active_index(&catalog), 0);
    }

    #[test]
    fn test_is_active_marks_exactly_one_step() {
        let catalog = bridge_catalog();
        let mut selector = StepSelector::new(&catalog);

        selector.select("Engage and Hold");
        let active: Vec<_> = catalog
            .iter()
            .filter(|s| selector.is_active(s, &catalog))
            .map(|s| s.title.as_str())
            .collect();
        assert_eq!(active, vec!["Engage and Hold"]);

        selector.select("missing");
        let active: Vec<_> = catalog
            .iter()
            .filter(|s| selector.is_active(s, &catalog))
            .map(|s| s.title.as_str())
            .collect();
        assert_eq!(active, vec!["Set Your Foundation"]);
    }

    #[test]
    fn test_subscribers_notified_in_order_after_mutation() {
        let catalog = bridge_catalog();
        let mut selector = StepSelector::new(&catalog);
        let log = Rc::new(RefCell::new(Vec::new()));

        let first = Rc::clone(&log);
        selector.subscribe(move |change| {
            first
                .borrow_mut()
                .push(format!("a:{}->{}", change.previous, change.current));
        });
        let second = Rc::clone(&log);
        selector.subscribe(move |change| {
            second.borrow_mut().push(format!("b:{}", change.current));
        });

        selector.select("Align and Activate");

        assert_eq!(
            *log.borrow(),
            vec![
                "a:Set Your Foundation->Align and Activate".to_string(),
                "b:Align and Activate".to_string(),
            ]
        );
    }

    #[test]
    fn test_reselect_still_notifies() {
        let catalog = bridge_catalog();
        let mut selector = StepSelector::new(&catalog);
        let count = Rc::new(RefCell::new(0));

        let counter = Rc::clone(&count);
        selector.subscribe(move |_| *counter.borrow_mut() += 1);

        selector.select("Lift the Hips");
        selector.select("Lift the Hips");
        assert_eq!(*count.borrow(), 2);
        assert_eq!(selector.active_step(&catalog).title, "Lift the Hips");
    }

    #[test]
    fn test_unsubscribe() {
        let catalog = bridge_catalog();
        let mut selector = StepSelector::new(&catalog);
        let count = Rc::new(RefCell::new(0));

        let counter = Rc::clone(&count);
        let id = selector.subscribe(move |_| *counter.borrow_mut() += 1);
        assert_eq!(selector.subscriber_count(), 1);

        selector.select("Lift the Hips");
        assert!(selector.unsubscribe(id));
        assert!(!selector.unsubscribe(id));
        selector.select("Engage and Hold");

        assert_eq!(*count.borrow(), 1);
        assert_eq!(selector.subscriber_count(), 0);
    }

    #[test]
    fn test_debug_omits_callbacks() {
        let catalog = bridge_catalog();
        let mut selector = StepSelector::new(&catalog);
        selector.subscribe(|_| {});
        let debug = format!("{selector:?}");
        assert!(debug.contains("Set Your Foundation"));
        assert!(debug.contains("subscribers: 1"));
    }
}
