use log::debug;
use std::collections::{HashMap, HashSet};

use crate::dom::Document;
use crate::toc::parser::HeadingDescriptor;
use crate::utils::slugify;

/// Identifier used when a heading's text slugifies to nothing
pub const FALLBACK_ID: &str = "section";

/// Give every heading an identifier and write it back onto its element.
///
/// - An existing identifier is kept as-is, so repeated builds are stable.
/// - Otherwise the slug of the display text is used, or [`FALLBACK_ID`] when
///   the slug is empty.
/// - A generated identifier that already names another element gets a
///   `-1`, `-2`, ... suffix until it is unique in the document.
///
/// Identifiers are written as they are assigned, so later headings see
/// earlier ones when checking for collisions. The same document and texts
/// always produce the same identifiers.
pub fn assign_identifiers<D: Document>(doc: &mut D, headings: &mut [(D::Handle, HeadingDescriptor)]) {
    if headings.iter().all(|(_, heading)| heading.id.is_some()) {
        return;
    }

    let mut registry = IdRegistry::new(doc.ids());
    for (element, heading) in headings.iter_mut() {
        if heading.id.is_some() {
            continue;
        }

        let id = registry.claim(&heading.text);
        debug!("Assigning id '{}' to <{}> \"{}\"", id, heading.tag, heading.text);
        doc.set_id(*element, &id);
        heading.id = Some(id);
    }
}

/// Identifiers already in use, plus the next suffix to try for each base
struct IdRegistry {
    taken: HashSet<String>,
    next_suffix: HashMap<String, usize>,
}

impl IdRegistry {
    fn new(ids: Vec<String>) -> Self {
        Self {
            taken: ids.into_iter().collect(),
            next_suffix: HashMap::new(),
        }
    }

    /// Reserve the first free identifier for `text`
    fn claim(&mut self, text: &str) -> String {
        let slug = slugify(text);
        let base = if slug.is_empty() { FALLBACK_ID.to_string() } else { slug };

        if self.taken.insert(base.clone()) {
            return base;
        }

        // Ids are only ever added, so suffixes below the counter stay taken
        let suffix = self.next_suffix.entry(base.clone()).or_insert(1);
        loop {
            let candidate = format!("{}-{}", base, suffix);
            *suffix += 1;
            if self.taken.insert(candidate.clone()) {
                return candidate;
            }
        }
    }
}
