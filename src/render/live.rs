//! A rendered page kept in sync with a step selector

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use super::{PageRenderer, RenderError, RenderOptions};
use crate::content::PageContent;
use crate::selector::{StepSelector, SubscriptionId};

/// HTML for the selector's current state, re-rendered synchronously inside
/// every `select` through a selector subscription.
pub struct LivePage {
    html: Rc<RefCell<String>>,
    renders: Rc<Cell<usize>>,
    subscription: SubscriptionId,
}

impl LivePage {
    /// Render the current selection and subscribe for re-renders
    pub fn attach(
        selector: &mut StepSelector,
        renderer: Rc<PageRenderer>,
        content: Rc<PageContent>,
        options: RenderOptions,
    ) -> Result<Self, RenderError> {
        let initial = renderer.render(&content, selector, &options)?;
        let html = Rc::new(RefCell::new(initial));
        let renders = Rc::new(Cell::new(1));

        let sink = Rc::clone(&html);
        let counter = Rc::clone(&renders);
        let subscription = selector.subscribe(move |change| {
            match renderer.render_selection(&content, &change.current, &options) {
                Ok(page) => {
                    *sink.borrow_mut() = page;
                    counter.set(counter.get() + 1);
                }
                // Keep the last good page
                Err(e) => tracing::error!(error = %e, step = %change.current, "Re-render failed"),
            }
        });

        Ok(Self {
            html,
            renders,
            subscription,
        })
    }

    /// Latest rendered HTML
    pub fn html(&self) -> String {
        self.html.borrow().clone()
    }

    /// Number of completed renders, including the initial one
    pub fn render_count(&self) -> usize {
        self.renders.get()
    }

    /// Stop following the selector
    pub fn detach(self, selector: &mut StepSelector) -> String {
        selector.unsubscribe(self.subscription);
        self.html()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attach() -> (StepSelector, LivePage) {
        let content = Rc::new(PageContent::builtin().unwrap());
        let renderer = Rc::new(PageRenderer::new().unwrap());
        let mut selector = StepSelector::new(&content.steps);
        let page = LivePage::attach(
            &mut selector,
            renderer,
            content,
            RenderOptions::site_index(),
        )
        .unwrap();
        (selector, page)
    }

    #[test]
    fn test_initial_render() {
        let (_selector, page) = attach();
        assert_eq!(page.render_count(), 1);
        assert!(page.html().contains("<h3>Set Your Foundation</h3>"));
    }

    #[test]
    fn test_rerenders_inside_select() {
        let (mut selector, page) = attach();

        selector.select("Lift the Hips");
        assert_eq!(page.render_count(), 2);
        assert!(page.html().contains("<h3>Lift the Hips</h3>"));

        selector.select("Nonexistent");
        assert_eq!(page.render_count(), 3);
        assert!(page.html().contains("<h3>Set Your Foundation</h3>"));
    }

    #[test]
    fn test_detach_stops_updates() {
        let (mut selector, page) = attach();
        selector.select("Engage and Hold");

        let html = page.detach(&mut selector);
        assert!(html.contains("<h3>Engage and Hold</h3>"));
        assert_eq!(selector.subscriber_count(), 0);

        // No subscriber left; selecting must not panic
        selector.select("Controlled Descent");
    }
}
