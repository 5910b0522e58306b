//! Static site build against the public library API

use std::fs;

use asana_guide::content::PageContent;
use asana_guide::render::{step_slugs, PageRenderer};
use asana_guide::site::{build_site, STEPS_DIR};
use tempfile::TempDir;

const CUSTOM_CONTENT: &str = r#"
[document]
title = "Tree Pose"
description = "Balance on one leg"

[hero]
badge = "Balance"
heading = "Tree Pose"
intro = "Root down & rise up."

[pose_card]
name = "Vrksasana"
summary = "Standing balance"

[timeline]
heading = "Steps"

[[steps]]
title = "Root Down"
detail = "Shift weight into the left foot."

[[steps]]
title = "Place the Foot"
detail = "Rest the right sole on the inner thigh, never the knee."

[[steps]]
title = "Grow Tall"
detail = "Bring palms together <at> the heart."

[benefits]
heading = "Benefits"
items = ["Balance"]

[safety]
heading = "Safety"
items = ["Use a wall"]

[breathing]
heading = "Breath"

[cool_down]
heading = "Cool Down"
text = "Switch sides."
"#;

fn read(dir: &TempDir, relative: &str) -> String {
    fs::read_to_string(dir.path().join(relative)).unwrap()
}

fn active_links(page: &str) -> usize {
    page.matches("aria-current=\"step\"").count()
}

#[test]
fn builtin_site_has_a_page_per_step() {
    let dir = TempDir::new().unwrap();
    let content = PageContent::builtin().unwrap();
    let renderer = PageRenderer::new().unwrap();

    build_site(&content, &renderer, dir.path()).unwrap();

    let index = read(&dir, "index.html");
    assert!(index.contains("<h3>Set Your Foundation</h3>"));
    assert!(index.contains("href=\"style.css\""));
    assert_eq!(active_links(&index), 1);

    for (step, slug) in content.steps.iter().zip(step_slugs(&content.steps)) {
        let page = read(&dir, &format!("{STEPS_DIR}/{slug}.html"));
        assert!(page.contains(&format!("<h3>{}</h3>", step.title)));
        assert_eq!(active_links(&page), 1, "{slug}");
    }
}

#[test]
fn custom_content_is_escaped_and_linked() {
    let dir = TempDir::new().unwrap();
    let content = PageContent::from_toml_str(CUSTOM_CONTENT, "tree.toml").unwrap();
    let renderer = PageRenderer::new().unwrap();

    let manifest = build_site(&content, &renderer, dir.path()).unwrap();
    assert_eq!(manifest.files.len(), 5);

    let index = read(&dir, "index.html");
    assert!(index.contains("Root down &amp; rise up."));
    assert!(index.contains("href=\"steps/place-the-foot.html\""));

    let last = read(&dir, "steps/grow-tall.html");
    assert!(last.contains("&lt;at&gt;"));
    assert!(last.contains("href=\"root-down.html\""));
}

#[test]
fn rebuild_overwrites_previous_output() {
    let dir = TempDir::new().unwrap();
    let renderer = PageRenderer::new().unwrap();

    let builtin = PageContent::builtin().unwrap();
    build_site(&builtin, &renderer, dir.path()).unwrap();

    let custom = PageContent::from_toml_str(CUSTOM_CONTENT, "tree.toml").unwrap();
    build_site(&custom, &renderer, dir.path()).unwrap();

    assert!(read(&dir, "index.html").contains("<h3>Root Down</h3>"));
}
