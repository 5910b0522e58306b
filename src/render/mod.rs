//! Handlebars HTML renderer for pose pages
//!
//! The renderer turns [`PageContent`] plus a selection into a complete HTML
//! document. Navigation entries are links to the pre-rendered page of each
//! step, so the static site works without scripting.

mod live;
pub mod slug;

use handlebars::Handlebars;
use serde::Serialize;
use thiserror::Error;

use crate::content::{
    BreathSection, DocumentMeta, Hero, ListSection, PageContent, PoseCard, ProseSection,
    SectionHeader, Step,
};
use crate::selector::StepSelector;

pub use live::LivePage;
pub use slug::{slugify, step_slugs};

/// Page template, registered as [`PAGE_TEMPLATE_NAME`]
const PAGE_TEMPLATE: &str = include_str!("page.hbs");

pub const PAGE_TEMPLATE_NAME: &str = "page";

/// Shared stylesheet for all pages
pub const STYLESHEET: &str = include_str!("style.css");

/// Errors raised while rendering pages or writing the site
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to compile page template: {0}")]
    Template(#[from] handlebars::TemplateError),

    #[error("failed to render page: {0}")]
    Render(#[from] handlebars::RenderError),

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// How a page references its stylesheet
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stylesheet {
    /// Embed [`STYLESHEET`] in a `<style>` element
    Inline,
    /// Link to a stylesheet at this relative URL
    Linked(String),
}

/// Per-page link settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    pub stylesheet: Stylesheet,
    /// Navigation link for a step is `<prefix><slug><suffix>`
    pub step_link_prefix: String,
    pub step_link_suffix: String,
}

impl RenderOptions {
    /// A single self-contained page. There are no step pages next to it,
    /// so navigation entries are `#<slug>` fragments.
    pub fn standalone() -> Self {
        Self {
            stylesheet: Stylesheet::Inline,
            step_link_prefix: "#".to_string(),
            step_link_suffix: String::new(),
        }
    }

    /// A self-contained page whose navigation links into a site built at
    /// `site_root`
    pub fn linked_to_site(site_root: &str) -> Self {
        let root = site_root.trim_end_matches('/');
        Self {
            stylesheet: Stylesheet::Inline,
            step_link_prefix: format!("{root}/steps/"),
            step_link_suffix: ".html".to_string(),
        }
    }

    /// `index.html` at the site root
    pub fn site_index() -> Self {
        Self {
            stylesheet: Stylesheet::Linked("style.css".to_string()),
            step_link_prefix: "steps/".to_string(),
            step_link_suffix: ".html".to_string(),
        }
    }

    /// A page under `steps/`
    pub fn site_step() -> Self {
        Self {
            stylesheet: Stylesheet::Linked("../style.css".to_string()),
            step_link_prefix: String::new(),
            step_link_suffix: ".html".to_string(),
        }
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self::standalone()
    }
}

/// A navigation entry, one per catalog step
#[derive(Debug, Clone, Serialize)]
pub struct NavEntry<'a> {
    pub title: &'a str,
    pub href: String,
    pub active: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct StylesheetView<'a> {
    pub inline: Option<&'static str>,
    pub href: Option<&'a str>,
}

/// Template context for one page
#[derive(Debug, Clone, Serialize)]
pub struct PageView<'a> {
    pub document: &'a DocumentMeta,
    pub hero: &'a Hero,
    pub pose_card: &'a PoseCard,
    pub timeline: &'a SectionHeader,
    pub nav: Vec<NavEntry<'a>>,
    pub active: &'a Step,
    pub benefits: &'a ListSection,
    pub safety: &'a ListSection,
    pub breathing: &'a BreathSection,
    pub cool_down: &'a ProseSection,
    pub stylesheet: StylesheetView<'a>,
}

/// Handlebars-based page renderer
pub struct PageRenderer {
    handlebars: Handlebars<'static>,
}

impl PageRenderer {
    /// Create a renderer with the page template compiled
    pub fn new() -> Result<Self, RenderError> {
        let mut handlebars = Handlebars::new();
        handlebars.set_strict_mode(false);
        handlebars.register_template_string(PAGE_TEMPLATE_NAME, PAGE_TEMPLATE)?;
        Ok(Self { handlebars })
    }

    /// Build the template context for a selection.
    ///
    /// `selected_title` goes through the catalog's fallback rule, so an
    /// unknown title renders the first step.
    pub fn view<'a>(
        &self,
        content: &'a PageContent,
        selected_title: &str,
        options: &'a RenderOptions,
    ) -> PageView<'a> {
        let catalog = &content.steps;
        let active_index = catalog.resolve_index(selected_title);

        let nav = catalog
            .iter()
            .zip(step_slugs(catalog))
            .enumerate()
            .map(|(index, (step, slug))| NavEntry {
                title: &step.title,
                href: format!(
                    "{}{}{}",
                    options.step_link_prefix, slug, options.step_link_suffix
                ),
                active: index == active_index,
            })
            .collect();

        let stylesheet = match &options.stylesheet {
            Stylesheet::Inline => StylesheetView {
                inline: Some(STYLESHEET),
                href: None,
            },
            Stylesheet::Linked(href) => StylesheetView {
                inline: None,
                href: Some(href),
            },
        };

        PageView {
            document: &content.document,
            hero: &content.hero,
            pose_card: &content.pose_card,
            timeline: &content.timeline,
            nav,
            active: catalog.resolve(selected_title),
            benefits: &content.benefits,
            safety: &content.safety,
            breathing: &content.breathing,
            cool_down: &content.cool_down,
            stylesheet,
        }
    }

    /// Render the page for a raw selection title
    pub fn render_selection(
        &self,
        content: &PageContent,
        selected_title: &str,
        options: &RenderOptions,
    ) -> Result<String, RenderError> {
        let view = self.view(content, selected_title, options);
        Ok(self.handlebars.render(PAGE_TEMPLATE_NAME, &view)?)
    }

    /// Render the page for the selector's current state
    pub fn render(
        &self,
        content: &PageContent,
        selector: &StepSelector,
        options: &RenderOptions,
    ) -> Result<String, RenderError> {
        self.render_selection(content, selector.selected_title(), options)
    }
}
