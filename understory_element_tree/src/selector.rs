// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A small selector language for matching elements by tag and class.
//!
//! ## Grammar
//!
//! - A compound selector is an optional tag name (or `*`) followed by any
//!   number of `.class` tokens: `li`, `.item`, `li.item.big`, `*`.
//! - A selector list joins compounds with commas: `li, .card`.
//!
//! Combinators, attribute selectors, and pseudo-classes are not supported
//! and fail to parse. Tag names compare ASCII case-insensitively; classes
//! compare exactly against [`Tree::class_list`], so marker tokens such as
//! `moving` match as well.
//!
//! ```
//! use understory_element_tree::{LocalNode, Selector, Tree};
//!
//! let mut tree = Tree::new();
//! let ul = tree.insert(None, LocalNode::element("ul"));
//! let li = tree.insert(Some(ul), LocalNode::element("LI").with_class("item"));
//!
//! let sel = Selector::parse("li.item, .card").unwrap();
//! assert!(sel.matches(&tree, li));
//! assert!(!sel.matches(&tree, ul));
//! assert!(Selector::parse("li > a").is_err());
//! ```

use alloc::string::String;
use alloc::vec::Vec;

use thiserror::Error;

use crate::tree::Tree;
use crate::types::NodeId;

/// Errors from [`Selector::parse`].
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum SelectorError {
    /// The selector is empty or only whitespace.
    #[error("selector is empty")]
    Empty,
    /// A comma-separated entry is empty.
    #[error("empty selector list entry at byte {position}")]
    EmptyEntry {
        /// Byte offset of the entry.
        position: usize,
    },
    /// A `.` is not followed by a class name.
    #[error("missing class name after '.' at byte {position}")]
    MissingClassName {
        /// Byte offset of the dot.
        position: usize,
    },
    /// A character outside the supported grammar.
    #[error("unexpected character {ch:?} at byte {position}")]
    InvalidCharacter {
        /// The offending character.
        ch: char,
        /// Byte offset of the character.
        position: usize,
    },
}

/// A parsed selector list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Selector {
    source: String,
    alternatives: Vec<Compound>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct Compound {
    // `None` is the universal selector.
    tag: Option<String>,
    classes: Vec<String>,
}

impl Selector {
    /// Parse a selector list.
    pub fn parse(source: &str) -> Result<Self, SelectorError> {
        if source.trim().is_empty() {
            return Err(SelectorError::Empty);
        }
        let mut alternatives = Vec::new();
        let mut start = 0;
        for entry in source.split(',') {
            alternatives.push(parse_compound(entry, start)?);
            start += entry.len() + 1;
        }
        Ok(Self {
            source: source.into(),
            alternatives,
        })
    }

    /// The source text this selector was parsed from.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Returns true if the element matches any selector in the list.
    ///
    /// Stale ids never match.
    pub fn matches(&self, tree: &Tree, id: NodeId) -> bool {
        let Some(tag) = tree.tag(id) else {
            return false;
        };
        self.alternatives.iter().any(|c| {
            c.tag.as_deref().is_none_or(|t| t.eq_ignore_ascii_case(tag))
                && c.classes.iter().all(|class| tree.has_class(id, class))
        })
    }
}

impl core::str::FromStr for Selector {
    type Err = SelectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl core::fmt::Display for Selector {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.source)
    }
}

fn is_ident_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '-' || ch == '_'
}

/// Parse one compound selector; `offset` is the entry's byte offset in the full source.
fn parse_compound(entry: &str, offset: usize) -> Result<Compound, SelectorError> {
    let leading = entry.len() - entry.trim_start().len();
    let body = entry.trim();
    if body.is_empty() {
        return Err(SelectorError::EmptyEntry { position: offset });
    }
    let base = offset + leading;

    // Split into the tag part and a run of `.class` parts.
    let tag_end = body.find('.').unwrap_or(body.len());
    let tag = match &body[..tag_end] {
        "" | "*" => None,
        t => {
            if let Some((i, ch)) = t.char_indices().find(|(_, c)| !is_ident_char(*c)) {
                return Err(SelectorError::InvalidCharacter {
                    ch,
                    position: base + i,
                });
            }
            Some(String::from(t))
        }
    };

    let mut classes = Vec::new();
    let mut rest = &body[tag_end..];
    let mut pos = base + tag_end;
    while let Some(after_dot) = rest.strip_prefix('.') {
        let len = after_dot
            .char_indices()
            .find(|(_, c)| !is_ident_char(*c))
            .map_or(after_dot.len(), |(i, _)| i);
        if len == 0 {
            return match after_dot.chars().next() {
                None | Some('.') => Err(SelectorError::MissingClassName { position: pos }),
                Some(ch) => Err(SelectorError::InvalidCharacter {
                    ch,
                    position: pos + 1,
                }),
            };
        }
        classes.push(String::from(&after_dot[..len]));
        rest = &after_dot[len..];
        pos += 1 + len;
        if let Some(ch) = rest.chars().next().filter(|c| *c != '.') {
            return Err(SelectorError::InvalidCharacter { ch, position: pos });
        }
    }

    Ok(Compound { tag, classes })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{LocalNode, Markers};

    fn sample() -> (Tree, NodeId, NodeId, NodeId) {
        let mut tree = Tree::new();
        let ul = tree.insert(None, LocalNode::element("ul"));
        let li = tree.insert(Some(ul), LocalNode::element("li").with_class("item"));
        let card = tree.insert(
            Some(ul),
            LocalNode::element("div").with_class("card").with_class("big"),
        );
        (tree, ul, li, card)
    }

    #[test]
    fn tag_and_class_matching() {
        let (tree, ul, li, card) = sample();
        let by_tag = Selector::parse("li").unwrap();
        assert!(by_tag.matches(&tree, li));
        assert!(!by_tag.matches(&tree, card));

        let by_class = Selector::parse(".card.big").unwrap();
        assert!(by_class.matches(&tree, card));
        assert!(!by_class.matches(&tree, li));

        let universal = Selector::parse("*").unwrap();
        assert!(universal.matches(&tree, ul));

        let list = Selector::parse(" li , div.card ").unwrap();
        assert!(list.matches(&tree, li));
        assert!(list.matches(&tree, card));
        assert!(!list.matches(&tree, ul));
    }

    #[test]
    fn tag_is_case_insensitive() {
        let (tree, _, li, _) = sample();
        assert!(Selector::parse("LI").unwrap().matches(&tree, li));
    }

    #[test]
    fn markers_match_as_classes() {
        let (mut tree, _, li, _) = sample();
        let moving = Selector::parse("li.moving").unwrap();
        assert!(!moving.matches(&tree, li));
        tree.add_markers(li, Markers::MOVING);
        assert!(moving.matches(&tree, li));
    }

    #[test]
    fn stale_ids_never_match() {
        let (mut tree, _, li, _) = sample();
        tree.remove(li);
        assert!(!Selector::parse("*").unwrap().matches(&tree, li));
    }

    #[test]
    fn malformed_selectors() {
        assert_eq!(Selector::parse("   "), Err(SelectorError::Empty));
        assert_eq!(
            Selector::parse("li,,div"),
            Err(SelectorError::EmptyEntry { position: 3 })
        );
        assert_eq!(
            Selector::parse("li."),
            Err(SelectorError::MissingClassName { position: 2 })
        );
        assert_eq!(
            Selector::parse("li..a"),
            Err(SelectorError::MissingClassName { position: 2 })
        );
        assert_eq!(
            Selector::parse("li > a"),
            Err(SelectorError::InvalidCharacter {
                ch: ' ',
                position: 2
            })
        );
        assert_eq!(
            Selector::parse(".a:hover"),
            Err(SelectorError::InvalidCharacter {
                ch: ':',
                position: 2
            })
        );
    }

    #[test]
    fn display_round_trips_source() {
        let sel: Selector = "li.item".parse().unwrap();
        assert_eq!(sel.as_str(), "li.item");
        assert_eq!(alloc::format!("{sel}"), "li.item");
    }
}
