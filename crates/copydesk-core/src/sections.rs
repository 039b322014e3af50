//! Grouping of prose fragments under their H2 heading.

use crate::markdown::{Fragment, Node};

/// Label for prose that appears before the first H2.
pub const INTRO_LABEL: &str = "(intro)";

/// Prose fragments that share the nearest preceding H2 heading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    /// H2 heading text, or [`INTRO_LABEL`].
    pub label: String,
    /// Fragments in document order.
    pub fragments: Vec<Fragment>,
}

impl Section {
    /// All fragment texts joined by single spaces.
    pub fn joined_text(&self) -> String {
        join_fragments(self.fragments.iter())
    }
}

/// Join fragment texts with single spaces.
pub fn join_fragments<'a>(fragments: impl IntoIterator<Item = &'a Fragment>) -> String {
    fragments
        .into_iter()
        .map(|f| f.text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Fold nodes into sections keyed by H2 text.
///
/// A repeated H2 resumes its earlier section instead of starting a new one.
/// Sections that end up with no fragments are dropped. Order follows the
/// first appearance of each label.
#[tracing::instrument(skip_all, fields(node_count = nodes.len()))]
pub fn build_sections(nodes: &[Node]) -> Vec<Section> {
    let mut sections: Vec<Section> = Vec::new();
    let mut current = INTRO_LABEL.to_string();

    for node in nodes {
        match node {
            Node::Heading(h) if h.depth == 2 => {
                current.clone_from(&h.text);
                section_mut(&mut sections, &current);
            }
            Node::Paragraph(fragment) | Node::ListItemParagraph(fragment) => {
                section_mut(&mut sections, &current)
                    .fragments
                    .push(fragment.clone());
            }
            Node::Heading(_) | Node::NonProse { .. } => {}
        }
    }

    sections.retain(|s| !s.fragments.is_empty());
    tracing::debug!(section_count = sections.len(), "sections built");
    sections
}

/// Find the section labelled `label`, appending it if absent.
fn section_mut<'s>(sections: &'s mut Vec<Section>, label: &str) -> &'s mut Section {
    let idx = match sections.iter().position(|s| s.label == label) {
        Some(idx) => idx,
        None => {
            sections.push(Section {
                label: label.to_string(),
                fragments: Vec::new(),
            });
            sections.len() - 1
        }
    };
    &mut sections[idx]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markdown::parse_nodes;

    #[test]
    fn content_before_first_h2_is_intro() {
        let sections = build_sections(&parse_nodes("# Title\n\nOpening words.\n\n## Usage\n\nUse it."));
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].label, INTRO_LABEL);
        assert_eq!(sections[0].fragments[0].text, "Opening words.");
        assert_eq!(sections[1].label, "Usage");
    }

    #[test]
    fn repeated_h2_resumes_its_section() {
        let input = "## Notes\n\nFirst.\n\n## Other\n\nMiddle.\n\n## Notes\n\nSecond.\n";
        let sections = build_sections(&parse_nodes(input));
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].label, "Notes");
        let texts: Vec<_> = sections[0].fragments.iter().map(|f| f.text.as_str()).collect();
        assert_eq!(texts, vec!["First.", "Second."]);
        assert_eq!(sections[1].label, "Other");
    }

    #[test]
    fn deeper_headings_do_not_start_sections() {
        let input = "## Setup\n\nInstall it.\n\n### Details\n\nMore setup.\n";
        let sections = build_sections(&parse_nodes(input));
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].fragments.len(), 2);
    }

    #[test]
    fn empty_sections_are_dropped() {
        let input = "## Empty\n\n```\ncode only\n```\n\n## Full\n\nWords here.\n";
        let sections = build_sections(&parse_nodes(input));
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].label, "Full");
    }

    #[test]
    fn list_items_join_their_section() {
        let input = "## Steps\n\n- Open the file.\n- Save the file.\n";
        let sections = build_sections(&parse_nodes(input));
        assert_eq!(
            sections[0].joined_text(),
            "Open the file. Save the file."
        );
    }

    #[test]
    fn no_prose_means_no_sections() {
        assert!(build_sections(&parse_nodes("")).is_empty());
        assert!(build_sections(&parse_nodes("# Only a title\n")).is_empty());
    }
}
