//! Search filter over a sheet's section tree.
//!
//! Matching is at subsection granularity: a subsection is kept whole (every
//! grade, every question) as soon as its name or any of its question texts
//! contains the query, case-insensitively. Sections left without subsections
//! are dropped. Input order is preserved and nothing is sorted.

use crate::models::catalog::{Section, Subsection};

pub fn filter_sections(sections: &[Section], query: &str) -> Vec<Section> {
    let needle = query.trim().to_lowercase();

    sections
        .iter()
        .filter_map(|section| {
            let subsections: Vec<Subsection> = section
                .subsections
                .iter()
                .filter(|sub| matches_needle(sub, &needle))
                .cloned()
                .collect();

            if subsections.is_empty() {
                None
            } else {
                Some(Section {
                    title: section.title.clone(),
                    subsections,
                })
            }
        })
        .collect()
}

/// `needle` must already be lowercased.
fn matches_needle(subsection: &Subsection, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    subsection.name.to_lowercase().contains(needle)
        || subsection
            .all_questions()
            .any(|q| q.question.to_lowercase().contains(needle))
}
