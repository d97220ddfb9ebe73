use super::elements::check;
use crate::api::{AnnotationMirror, AnnotationValue};
use crate::model::{ApiMap, ElementKey, Position, PositionIndex, RelationKind};
use crate::reports::Reporter;
use std::collections::{BTreeMap, BTreeSet};

/// Compare the annotations applied at `position`, matched by annotation type.
///
/// An annotation absent from some snapshots is reported as a whole; otherwise
/// its explicitly given values are compared element by element.
pub(super) fn compare_annotations<R: Reporter + ?Sized>(
    position: &Position,
    annotations: &ApiMap<&[AnnotationMirror]>,
    reporter: &mut R,
) -> bool {
    let mut by_type: BTreeMap<ElementKey, ApiMap<&AnnotationMirror>> = BTreeMap::new();
    for (id, list) in annotations {
        for mirror in *list {
            by_type
                .entry(ElementKey::declared(&mirror.annotation_type))
                .or_default()
                .entry(id.clone())
                .or_insert(mirror);
        }
    }

    let mut equal = true;
    for (key, found) in by_type {
        let pos = position.relative_at(RelationKind::Annotation, PositionIndex::Key(key));
        if found.len() < annotations.len() {
            let projected = found.project(annotations.keys(), |a| *a);
            reporter.report_different_annotations(&pos, &projected);
            equal = false;
            continue;
        }

        let names: BTreeSet<&str> = found
            .values()
            .flat_map(|a| a.values.keys().map(String::as_str))
            .collect();
        for name in names {
            let values: ApiMap<Option<&AnnotationValue>> = found.map(|a| a.values.get(name));
            let value_pos = pos.relative_at(RelationKind::AnnotationValue, PositionIndex::Name(name.to_string()));
            equal &= check(reporter, &values, |r, v| r.report_different_annotation_values(&value_pos, v));
        }
    }
    equal
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::DeclaredType;
    use crate::model::ApiId;
    use crate::reports::{Dimension, EventRecorder, ReportEvent};

    fn deprecated() -> AnnotationMirror {
        AnnotationMirror::new(DeclaredType::new("java.lang", "Deprecated"))
    }

    fn position() -> Position {
        Position::element(ElementKey::package(None, "p").nested("C"))
    }

    fn ids() -> (ApiId, ApiId) {
        (ApiId::new(0, "a"), ApiId::new(1, "b"))
    }

    #[test]
    fn test_missing_annotation() {
        let (a, b) = ids();
        let with = [deprecated()];
        let mut map: ApiMap<&[AnnotationMirror]> = ApiMap::new();
        map.insert(a, &with);
        map.insert(b, &[]);

        let mut recorder = EventRecorder::new();
        assert!(!compare_annotations(&position(), &map, &mut recorder));
        match &recorder.events()[0] {
            ReportEvent::Different { position, dimension, values } => {
                assert_eq!(*dimension, Dimension::Annotations);
                assert_eq!(position.to_string(), "annotation java.lang.Deprecated of type p.C");
                assert_eq!(values.get("a").map(String::as_str), Some("@java.lang.Deprecated"));
                assert_eq!(values.get("b").map(String::as_str), Some("(none)"));
            }
            other => panic!("unexpected event {other:?}"),
        }
    }

    #[test]
    fn test_annotation_values() {
        let (a, b) = ids();
        let since = |v: &str| [deprecated().with_value("since", AnnotationValue::String(v.to_string()))];
        let (one, two) = (since("9"), since("11"));
        let mut map: ApiMap<&[AnnotationMirror]> = ApiMap::new();
        map.insert(a.clone(), &one);
        map.insert(b.clone(), &two);

        let mut recorder = EventRecorder::new();
        assert!(!compare_annotations(&position(), &map, &mut recorder));
        assert_eq!(recorder.difference_count(), 1);

        let same = since("9");
        let mut map: ApiMap<&[AnnotationMirror]> = ApiMap::new();
        map.insert(a, &one);
        map.insert(b, &same);
        assert!(compare_annotations(&position(), &map, &mut EventRecorder::new()));
    }
}
