//! Identifier-or-position matching of model domains to tree nodes.
//!
//! # Invariants
//! - Identifier hits win over positional correspondence.
//! - Positional matching applies only when the tree held exactly as many
//!   domain wrappers as the model has entries when matching started.
//! - A wrapper whose domain carries another model entry's id is never claimed
//!   by position.

use crate::model::domain::DomainFragment;
use crate::parse::{is_supported_domain, supported_domain};
use crate::xml::names::{ID_ATTRIBUTE, NON_NUMERIC_DOMAIN};
use crate::xml::{Element, NodePath};
use std::collections::HashSet;

/// Where a model domain lands in the scale element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainMatch {
    /// Path (from the scale element) of the domain element carrying the id.
    ById(NodePath),
    /// Child-node index of the `nonNumericDomain` wrapper at the same list
    /// position.
    ByPosition(usize),
    /// No counterpart; a new wrapper is appended.
    None,
}

#[derive(Debug, Clone)]
struct Slot {
    index: usize,
    id: Option<String>,
}

/// Snapshot of the wrappers present before synchronization starts.
#[derive(Debug, Clone)]
pub struct DomainMatcher {
    slots: Vec<Slot>,
    model_len: usize,
    model_ids: HashSet<String>,
}

impl DomainMatcher {
    /// Records the wrapper slots of `scale` for a model list `domains`.
    pub fn new(scale: &Element, domains: &[DomainFragment]) -> Self {
        let slots = scale
            .positions_named(NON_NUMERIC_DOMAIN)
            .into_iter()
            .filter_map(|index| {
                let domain = scale.element_at_index(index).and_then(supported_domain)?;
                Some(Slot {
                    index,
                    id: domain.attribute(ID_ATTRIBUTE).map(str::to_string),
                })
            })
            .collect();
        Self {
            slots,
            model_len: domains.len(),
            model_ids: domains.iter().map(|domain| domain.id.clone()).collect(),
        }
    }

    /// Number of wrapper slots seen when the matcher was built.
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Matches the model entry at `position` against the current `scale`.
    ///
    /// `scale` may already hold edits for earlier entries; identifier lookups
    /// always run against it.
    pub fn match_domain(
        &self,
        scale: &Element,
        position: usize,
        fragment: &DomainFragment,
    ) -> DomainMatch {
        let by_id = scale.find_path(|element| {
            is_supported_domain(element)
                && element.attribute(ID_ATTRIBUTE) == Some(fragment.id.as_str())
        });
        if let Some(path) = by_id {
            return DomainMatch::ById(path);
        }

        if self.slots.len() != self.model_len {
            return DomainMatch::None;
        }
        match self.slots.get(position) {
            Some(slot) if !self.is_owned_by_other(slot, fragment) => {
                DomainMatch::ByPosition(slot.index)
            }
            _ => DomainMatch::None,
        }
    }

    fn is_owned_by_other(&self, slot: &Slot, fragment: &DomainFragment) -> bool {
        slot.id
            .as_deref()
            .is_some_and(|id| id != fragment.id && self.model_ids.contains(id))
    }
}

#[cfg(test)]
mod tests {
    use super::{DomainMatch, DomainMatcher};
    use crate::model::domain::{DomainFragment, DomainKind, TextDomain};
    use crate::xml::Element;

    fn scale() -> Element {
        Element::parse_str(
            "<nominal>\
             <nonNumericDomain><textDomain id=\"a\"><definition>A</definition></textDomain></nonNumericDomain>\
             <nonNumericDomain><references>x</references></nonNumericDomain>\
             <nonNumericDomain><textDomain id=\"b\"><definition>B</definition></textDomain></nonNumericDomain>\
             </nominal>",
        )
        .expect("fixture parses")
    }

    fn text(id: &str) -> DomainFragment {
        DomainFragment::with_id(id, DomainKind::Text(TextDomain::new("x")))
    }

    #[test]
    fn identifier_match_wins() {
        let scale = scale();
        let domains = [text("b"), text("a")];
        let matcher = DomainMatcher::new(&scale, &domains);

        assert_eq!(matcher.slot_count(), 2);
        match matcher.match_domain(&scale, 0, &domains[0]) {
            DomainMatch::ById(path) => assert_eq!(path.indices(), &[2, 0]),
            other => panic!("expected id match, got {other:?}"),
        }
    }

    #[test]
    fn positional_match_needs_equal_counts() {
        let scale = scale();
        let same_len = [text("new-1"), text("new-2")];
        let matcher = DomainMatcher::new(&scale, &same_len);
        assert_eq!(
            matcher.match_domain(&scale, 1, &same_len[1]),
            DomainMatch::ByPosition(2)
        );

        let longer = [text("new-1"), text("new-2"), text("new-3")];
        let matcher = DomainMatcher::new(&scale, &longer);
        assert_eq!(matcher.match_domain(&scale, 0, &longer[0]), DomainMatch::None);
    }

    #[test]
    fn slot_owned_by_another_entry_is_not_taken() {
        let mut scale = scale();
        let domains = [text("fresh"), text("a")];
        let matcher = DomainMatcher::new(&scale, &domains);
        assert_eq!(matcher.match_domain(&scale, 0, &domains[0]), DomainMatch::None);

        // Drop the wrapper holding `b`; `a` is no longer claimed by the model.
        scale.remove_node(2);
        let single = [text("fresh")];
        let matcher = DomainMatcher::new(&scale, &single);
        assert_eq!(matcher.slot_count(), 1);
        assert_eq!(
            matcher.match_domain(&scale, 0, &single[0]),
            DomainMatch::ByPosition(0)
        );
    }
}
