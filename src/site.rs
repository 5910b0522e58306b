//! Static site build: one pre-rendered page per possible selection
//!
//! Layout:
//! - `index.html`: default selection (first step)
//! - `steps/<slug>.html`: that step selected
//! - `style.css`: shared stylesheet

use std::path::{Path, PathBuf};

use crate::content::PageContent;
use crate::render::{step_slugs, PageRenderer, RenderError, RenderOptions, STYLESHEET};
use crate::selector::StepSelector;

/// Directory for per-step pages, relative to the site root
pub const STEPS_DIR: &str = "steps";

/// Files written by [`build_site`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteManifest {
    pub root: PathBuf,
    /// Paths relative to `root`, in write order
    pub files: Vec<PathBuf>,
}

/// Render the whole site into `output_dir`
pub fn build_site(
    content: &PageContent,
    renderer: &PageRenderer,
    output_dir: &Path,
) -> Result<SiteManifest, RenderError> {
    let steps_dir = output_dir.join(STEPS_DIR);
    create_dir(&steps_dir)?;

    let mut manifest = SiteManifest {
        root: output_dir.to_path_buf(),
        files: Vec::new(),
    };

    write_file(&mut manifest, PathBuf::from("style.css"), STYLESHEET)?;

    let mut selector = StepSelector::new(&content.steps);
    let index = renderer.render(content, &selector, &RenderOptions::site_index())?;
    write_file(&mut manifest, PathBuf::from("index.html"), &index)?;

    let step_options = RenderOptions::site_step();
    for (step, slug) in content.steps.iter().zip(step_slugs(&content.steps)) {
        selector.select(step.title.as_str());
        let page = renderer.render(content, &selector, &step_options)?;
        write_file(
            &mut manifest,
            Path::new(STEPS_DIR).join(format!("{slug}.html")),
            &page,
        )?;
    }

    tracing::info!(
        output = %output_dir.display(),
        files = manifest.files.len(),
        "Site built"
    );
    Ok(manifest)
}

fn create_dir(path: &Path) -> Result<(), RenderError> {
    std::fs::create_dir_all(path).map_err(|source| RenderError::Write {
        path: path.to_path_buf(),
        source,
    })
}

fn write_file(
    manifest: &mut SiteManifest,
    relative: PathBuf,
    contents: &str,
) -> Result<(), RenderError> {
    let path = manifest.root.join(&relative);
    std::fs::write(&path, contents).map_err(|source| RenderError::Write {
        path: path.clone(),
        source,
    })?;
    tracing::info!(output = %path.display(), bytes = contents.len(), "Wrote page");
    manifest.files.push(relative);
    Ok(())
}
