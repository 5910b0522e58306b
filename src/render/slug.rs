//! File-name slugs for per-step pages

use std::collections::HashSet;

use crate::content::Catalog;

/// Lowercase ASCII slug: alphanumerics kept, every other run collapses to `-`
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_dash = false;

    for c in title.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }

    if slug.is_empty() {
        "step".to_string()
    } else {
        slug
    }
}

/// One unique slug per catalog step, in catalog order.
///
/// A slug already issued gets the lowest free `-2`, `-3`, ... suffix, so a
/// suffixed slug never collides with another title's plain slug.
pub fn step_slugs(catalog: &Catalog) -> Vec<String> {
    let mut issued: HashSet<String> = HashSet::new();
    catalog
        .iter()
        .map(|step| {
            let base = slugify(&step.title);
            let mut candidate = base.clone();
            let mut n = 2;
            while issued.contains(&candidate) {
                candidate = format!("{base}-{n}");
                n += 1;
            }
            issued.insert(candidate.clone());
            candidate
        })
        .collect()
}
