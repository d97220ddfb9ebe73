use super::elements::check;
use super::engine::Comparator;
use crate::api::{AnnotationValue, Element, SerializedForm, TypeMirror};
use crate::error::Result;
use crate::model::{ApiMap, Position, PositionIndex, RelationKind, TypeKey};
use crate::reports::Reporter;
use std::collections::BTreeMap;

impl<'a> Comparator<'a> {
    /// Compare serialized forms: presence, then `serialVersionUID`, then the
    /// serialized fields by name.
    pub(super) fn compare_serialized_forms<R: Reporter + ?Sized>(
        &self,
        position: &Position,
        present: &ApiMap<&'a Element>,
        reporter: &mut R,
    ) -> Result<bool> {
        let forms: ApiMap<Option<&SerializedForm>> = present
            .iter()
            .map(|(id, e)| (id.clone(), self.api(id).serialized_form(e)))
            .collect();

        let presence = forms.map(Option::is_some);
        if !presence.all_equal() {
            reporter.report_different_serialized_forms(position, &forms);
            return Ok(false);
        }
        let forms: ApiMap<&SerializedForm> = forms.iter().filter_map(|(id, f)| Some((id.clone(), (*f)?))).collect();
        if forms.is_empty() {
            return Ok(true);
        }

        let mut equal = true;
        let uids: ApiMap<Option<AnnotationValue>> =
            forms.map(|f| f.serial_version_uid.map(|uid| AnnotationValue::Number(uid.into())));
        let uids = uids.map(Option::as_ref);
        let pos = position.relative(RelationKind::SerialVersionUid);
        equal &= check(reporter, &uids, |r, v| r.report_different_values(&pos, v));

        let mut fields: BTreeMap<&str, ApiMap<&TypeMirror>> = BTreeMap::new();
        for (id, form) in &forms {
            for field in &form.fields {
                fields.entry(field.name.as_str()).or_default().insert(id.clone(), &field.ty);
            }
        }
        for (name, found) in &fields {
            let types = found
                .project(forms.keys(), |t| *t)
                .try_map(|t| TypeKey::of_optional(*t))?;
            let pos = position.relative_at(RelationKind::SerializedField, PositionIndex::Name((*name).to_string()));
            equal &= check(reporter, &types, |r, v| r.report_different_types(&pos, v));
        }
        Ok(equal)
    }
}

#[cfg(test)]
mod tests {
    use crate::api::{Api, Element, PrimitiveKind, SerializedField, SerializedForm, Snapshot, SnapshotApi, TypeMirror};
    use crate::compare::Comparator;
    use crate::reports::{Dimension, EventRecorder, ReportEvent};

    fn api(name: &str, form: Option<SerializedForm>) -> SnapshotApi {
        let mut class = Element::class("C", vec![]);
        class.serialized_form = form;
        SnapshotApi::new(
            name,
            Snapshot {
                name: None,
                modules: vec![],
                packages: vec![Element::package("p", vec![class])],
            },
        )
    }

    fn form(uid: i64, fields: &[(&str, PrimitiveKind)]) -> SerializedForm {
        SerializedForm {
            serial_version_uid: Some(uid),
            fields: fields
                .iter()
                .map(|(name, kind)| SerializedField {
                    name: (*name).to_string(),
                    ty: TypeMirror::primitive(*kind),
                })
                .collect(),
        }
    }

    fn dimensions(a: &SnapshotApi, b: &SnapshotApi) -> Vec<(String, Dimension)> {
        let mut recorder = EventRecorder::new();
        Comparator::new([a as &dyn Api, b])
            .compare(&mut recorder)
            .expect("comparison");
        recorder
            .events()
            .iter()
            .filter_map(|e| match e {
                ReportEvent::Different { position, dimension, .. } => Some((position.to_string(), *dimension)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_presence() {
        let a = api("a", Some(form(1, &[])));
        let b = api("b", None);
        assert_eq!(dimensions(&a, &b), vec![("type p.C".to_string(), Dimension::SerializedForms)]);
    }

    #[test]
    fn test_uid_and_fields() {
        let a = api("a", Some(form(1, &[("count", PrimitiveKind::Int)])));
        let b = api("b", Some(form(2, &[("count", PrimitiveKind::Long)])));
        assert_eq!(
            dimensions(&a, &b),
            vec![
                ("serialVersionUID of type p.C".to_string(), Dimension::Values),
                ("serialized field count of type p.C".to_string(), Dimension::Types),
            ]
        );

        let same = api("c", Some(form(1, &[("count", PrimitiveKind::Int)])));
        assert!(dimensions(&a, &same).is_empty());
    }
}
