//! Union-and-align of child lists.

use super::engine::Comparator;
use crate::api::Element;
use crate::error::{ErrorContext, Result};
use crate::model::{ApiMap, ElementKey};
use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

/// Every key found among one container's children, with the snapshots that
/// contain it. Iteration follows key order.
pub type Frontier<'a> = BTreeMap<ElementKey, ApiMap<&'a Element>>;

impl<'a> Comparator<'a> {
    pub(super) fn frontier(
        &self,
        parent: Option<&ElementKey>,
        children: &ApiMap<Vec<&'a Element>>,
    ) -> Result<Frontier<'a>> {
        let mut frontier = Frontier::new();
        for (id, elements) in children {
            for &element in elements {
                // misplaced kinds fail regardless of access or selection
                let key = ElementKey::of(parent, element).with_context(|| {
                    format!("building key for {} '{}' in {id}", element.kind, element.name)
                })?;
                if !self.is_accessible(element) || !self.selector().includes(&key) {
                    continue;
                }
                match frontier.entry(key).or_default().entry(id.clone()) {
                    Entry::Vacant(slot) => {
                        slot.insert(element);
                    }
                    Entry::Occupied(slot) => {
                        tracing::warn!(
                            "Duplicate {} '{}' in {}; keeping the first occurrence",
                            element.kind,
                            element.name,
                            slot.key()
                        );
                    }
                }
            }
        }
        Ok(frontier)
    }

    /// Modules and packages are always compared; types and members only at
    /// or above the configured access level.
    fn is_accessible(&self, element: &Element) -> bool {
        let kind = element.kind;
        if kind.is_type() || kind.is_executable() || kind.is_variable() {
            element.access() >= self.access()
        } else {
            true
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{AccessKind, Api, Modifier, Snapshot, SnapshotApi};
    use crate::compare::Selector;
    use crate::model::ApiId;

    fn children<'a>(lists: &[&'a [Element]]) -> ApiMap<Vec<&'a Element>> {
        lists
            .iter()
            .enumerate()
            .map(|(i, list)| (ApiId::new(i, format!("api{i}")), list.iter().collect()))
            .collect()
    }

    fn empty(name: &str) -> SnapshotApi {
        SnapshotApi::new(name, Snapshot::default())
    }

    #[test]
    fn test_union_of_keys() {
        let a = [Element::package("p", vec![]), Element::package("q", vec![])];
        let b = [Element::package("q", vec![]), Element::package("r", vec![])];
        let (x, y) = (empty("a"), empty("b"));
        let comparator = Comparator::new([&x as &dyn Api, &y]);

        let frontier = comparator.frontier(None, &children(&[&a, &b])).expect("frontier");
        let names: Vec<&str> = frontier.keys().map(ElementKey::name).collect();
        assert_eq!(names, vec!["p", "q", "r"]);
        assert_eq!(frontier[&ElementKey::package(None, "q")].len(), 2);
        assert_eq!(frontier[&ElementKey::package(None, "p")].len(), 1);
    }

    #[test]
    fn test_access_filter() {
        let parent = ElementKey::package(None, "p");
        let hidden = Element::class("Hidden", vec![]).with_modifiers([Modifier::Private]);
        let a = [Element::class("C", vec![]), hidden.clone()];
        let b = [Element::class("C", vec![]), hidden];
        let (x, y) = (empty("a"), empty("b"));

        let comparator = Comparator::new([&x as &dyn Api, &y]);
        let frontier = comparator
            .frontier(Some(&parent), &children(&[&a, &b]))
            .expect("frontier");
        assert_eq!(frontier.len(), 1);

        let comparator = comparator.with_access(AccessKind::Private);
        let frontier = comparator
            .frontier(Some(&parent), &children(&[&a, &b]))
            .expect("frontier");
        assert_eq!(frontier.len(), 2);
    }

    #[test]
    fn test_selector_and_duplicates() {
        let a = [
            Element::package("p", vec![]),
            Element::package("p", vec![Element::class("Second", vec![])]),
            Element::package("internal", vec![]),
        ];
        let (x, y) = (empty("a"), empty("b"));
        let comparator = Comparator::new([&x as &dyn Api, &y])
            .with_selector(Selector::new(&["p.*"], &[]).expect("pattern"));

        let frontier = comparator.frontier(None, &children(&[&a])).expect("frontier");
        assert_eq!(frontier.len(), 1);
        let kept = frontier.values().next().and_then(|m| m.values().next()).expect("entry");
        assert_eq!(kept.enclosed.as_ref().map(Vec::len), Some(0));
    }

    #[test]
    fn test_unsupported_child_is_an_error() {
        let parent = ElementKey::package(None, "p").nested("C");
        let init = Element::new(crate::api::ElementKind::StaticInit, "").with_modifiers([Modifier::Public]);
        let a = [init];
        let (x, y) = (empty("a"), empty("b"));
        let comparator = Comparator::new([&x as &dyn Api, &y]);

        let err = comparator
            .frontier(Some(&parent), &children(&[&a]))
            .unwrap_err();
        assert!(err.is_contract_violation());
    }

    #[test]
    fn test_hidden_misplaced_child_is_an_error() {
        let parent = ElementKey::package(None, "p");
        let method = Element::method("m", crate::api::TypeMirror::primitive(crate::api::PrimitiveKind::Void), vec![])
            .with_modifiers(Vec::<Modifier>::new());
        assert_eq!(method.access(), AccessKind::Package);
        let a = [method];
        let (x, y) = (empty("a"), empty("b"));
        let comparator = Comparator::new([&x as &dyn Api, &y]).with_access(AccessKind::Public);

        let err = comparator
            .frontier(Some(&parent), &children(&[&a]))
            .unwrap_err();
        assert!(err.is_contract_violation());
    }

    #[test]
    fn test_enclosed_type_parameter_is_an_error() {
        let parent = ElementKey::package(None, "p").nested("C");
        let param = Element::new(crate::api::ElementKind::TypeParameter, "T").with_modifiers([Modifier::Public]);
        let a = [param];
        let (x, y) = (empty("a"), empty("b"));
        let comparator = Comparator::new([&x as &dyn Api, &y]);

        let err = comparator
            .frontier(Some(&parent), &children(&[&a]))
            .unwrap_err();
        assert!(err.is_contract_violation());
    }
}
