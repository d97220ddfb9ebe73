//! Attribute comparison for one aligned entity.

use super::annotations::compare_annotations;
use super::directives::compare_directives;
use super::engine::Comparator;
use crate::api::{Element, ElementKind};
use crate::error::Result;
use crate::model::{ApiId, ApiMap, ElementKey, Position, PositionIndex, RelationKind, TypeKey};
use crate::reports::Reporter;
use std::collections::{BTreeMap, BTreeSet};

/// Hand `values` to `report` unless every snapshot agrees.
pub(super) fn check<V: PartialEq, R: ?Sized>(
    reporter: &mut R,
    values: &ApiMap<V>,
    report: impl FnOnce(&mut R, &ApiMap<V>),
) -> bool {
    if values.all_equal() {
        true
    } else {
        report(reporter, values);
        false
    }
}

fn type_set<'t>(types: impl IntoIterator<Item = &'t crate::api::TypeMirror>) -> Result<BTreeSet<TypeKey>> {
    types
        .into_iter()
        .map(|t| TypeKey::of(t).map_err(Into::into))
        .collect()
}

impl<'a> Comparator<'a> {
    /// Compare everything but the children of an entity present in at least
    /// two snapshots.
    pub(super) fn compare_attributes<R: Reporter + ?Sized>(
        &self,
        position: &Position,
        key: &ElementKey,
        present: &ApiMap<&'a Element>,
        reporter: &mut R,
    ) -> Result<bool> {
        let mut equal = true;

        let kinds: ApiMap<ElementKind> = present.map(|e| e.kind);
        equal &= check(reporter, &kinds, |r, v| r.report_different_kinds(position, v));

        let modifiers = present.map(|e| e.modifiers.clone());
        equal &= check(reporter, &modifiers, |r, v| r.report_different_modifiers(position, v));

        equal &= self.compare_type_parameters(position, present, reporter)?;
        equal &= compare_annotations(position, &present.map(|e| e.annotations.as_slice()), reporter);

        match key {
            ElementKey::Module { .. } => {
                equal &= compare_directives(position, present, reporter);
                equal &= self.compare_doc_files(position, present, reporter);
            }
            ElementKey::Package { .. } => {
                equal &= self.compare_doc_files(position, present, reporter);
            }
            ElementKey::Type { .. } => {
                equal &= self.compare_type_attributes(position, present, reporter)?;
                equal &= self.compare_serialized_forms(position, present, reporter)?;
            }
            ElementKey::Executable { .. } => {
                equal &= self.compare_executable_attributes(position, present, reporter)?;
            }
            ElementKey::Variable { .. } => {
                let types = present.try_map(|e| TypeKey::of_optional(e.ty.as_ref()))?;
                equal &= check(reporter, &types, |r, v| r.report_different_types(position, v));

                let values = present.map(|e| e.constant_value.as_ref());
                equal &= check(reporter, &values, |r, v| r.report_different_values(position, v));
            }
            ElementKey::TypeParameter { .. } => {}
        }

        equal &= self.compare_documentation(position, present, reporter);
        Ok(equal)
    }

    fn compare_type_parameters<R: Reporter + ?Sized>(
        &self,
        position: &Position,
        present: &ApiMap<&'a Element>,
        reporter: &mut R,
    ) -> Result<bool> {
        let counts = present.map(|e| e.type_parameters.len());
        if !counts.all_equal() {
            let params = present.map(|e| e.type_parameters.as_slice());
            reporter.report_different_type_parameters(position, &params);
            return Ok(false);
        }

        let count = counts.values().next().copied().unwrap_or(0);
        let mut equal = true;
        for i in 0..count {
            let param_pos = position.relative_at(RelationKind::TypeParameter, PositionIndex::Ordinal(i));

            let names = present.map(|e| e.type_parameters[i].name.as_str());
            equal &= check(reporter, &names, |r, v| r.report_different_names(&param_pos, v));

            let bound_count = present
                .values()
                .map(|e| e.type_parameters[i].bounds.len())
                .max()
                .unwrap_or(0);
            for j in 0..bound_count {
                let bounds = present.try_map(|e| TypeKey::of_optional(e.type_parameters[i].bounds.get(j)))?;
                let bound_pos = param_pos.relative_at(RelationKind::Bound, PositionIndex::Ordinal(j));
                equal &= check(reporter, &bounds, |r, v| r.report_different_types(&bound_pos, v));
            }

            let annotations = present.map(|e| e.type_parameters[i].annotations.as_slice());
            equal &= compare_annotations(&param_pos, &annotations, reporter);
        }
        Ok(equal)
    }

    fn compare_type_attributes<R: Reporter + ?Sized>(
        &self,
        position: &Position,
        present: &ApiMap<&'a Element>,
        reporter: &mut R,
    ) -> Result<bool> {
        let mut equal = true;

        let superclasses = present.try_map(|e| TypeKey::of_optional(e.superclass.as_ref()))?;
        let pos = position.relative(RelationKind::Superclass);
        equal &= check(reporter, &superclasses, |r, v| r.report_different_superclasses(&pos, v));

        let interfaces = present.try_map(|e| type_set(&e.interfaces))?;
        let pos = position.relative(RelationKind::Superinterface);
        equal &= check(reporter, &interfaces, |r, v| r.report_different_interfaces(&pos, v));

        let permitted = present.try_map(|e| type_set(&e.permitted_subclasses))?;
        let pos = position.relative(RelationKind::PermittedSubclass);
        equal &= check(reporter, &permitted, |r, v| r.report_different_permitted_subclasses(&pos, v));

        let component_count = present
            .values()
            .map(|e| e.record_components.len())
            .max()
            .unwrap_or(0);
        for i in 0..component_count {
            let pos = position.relative_at(RelationKind::RecordComponent, PositionIndex::Ordinal(i));
            let components = present.map(|e| e.record_components.get(i));
            let lacking: BTreeSet<ApiId> = components
                .iter()
                .filter(|(_, c)| c.is_none())
                .map(|(id, _)| id.clone())
                .collect();
            if !lacking.is_empty() {
                reporter.report_missing(&pos, &lacking);
                equal = false;
                continue;
            }
            let components: ApiMap<_> = components.iter().filter_map(|(id, c)| Some((id.clone(), (*c)?))).collect();

            let names = components.map(|c| c.name.as_str());
            equal &= check(reporter, &names, |r, v| r.report_different_names(&pos, v));

            let types = components.try_map(|c| TypeKey::of(&c.ty).map(Some))?;
            equal &= check(reporter, &types, |r, v| r.report_different_types(&pos, v));

            equal &= compare_annotations(&pos, &components.map(|c| c.annotations.as_slice()), reporter);
        }

        Ok(equal)
    }

    fn compare_executable_attributes<R: Reporter + ?Sized>(
        &self,
        position: &Position,
        present: &ApiMap<&'a Element>,
        reporter: &mut R,
    ) -> Result<bool> {
        let mut equal = true;

        let returns = present.try_map(|e| TypeKey::of_optional(e.return_type.as_ref()))?;
        let pos = position.relative(RelationKind::ReturnType);
        equal &= check(reporter, &returns, |r, v| r.report_different_types(&pos, v));

        let receivers = present.try_map(|e| TypeKey::of_optional(e.receiver_type.as_ref()))?;
        let pos = position.relative(RelationKind::ReceiverType);
        equal &= check(reporter, &receivers, |r, v| r.report_different_types(&pos, v));

        // Parameter counts agree: erased parameter types are part of the key.
        let count = present.values().map(|e| e.parameters.len()).min().unwrap_or(0);
        for i in 0..count {
            let pos = position.relative_at(RelationKind::Parameter, PositionIndex::Ordinal(i));

            let names = present.map(|e| e.parameters[i].name.as_str());
            equal &= check(reporter, &names, |r, v| r.report_different_names(&pos, v));

            let types = present.try_map(|e| TypeKey::of(&e.parameters[i].ty).map(Some))?;
            equal &= check(reporter, &types, |r, v| r.report_different_types(&pos, v));

            let annotations = present.map(|e| e.parameters[i].annotations.as_slice());
            equal &= compare_annotations(&pos, &annotations, reporter);
        }

        let thrown = present.try_map(|e| type_set(&e.thrown_types))?;
        let pos = position.relative(RelationKind::Exception);
        equal &= check(reporter, &thrown, |r, v| r.report_different_thrown_types(&pos, v));

        let defaults = present.map(|e| e.default_value.as_ref());
        let pos = position.relative(RelationKind::DefaultValue);
        equal &= check(reporter, &defaults, |r, v| r.report_different_values(&pos, v));

        Ok(equal)
    }

    fn compare_doc_files<R: Reporter + ?Sized>(
        &self,
        position: &Position,
        present: &ApiMap<&'a Element>,
        reporter: &mut R,
    ) -> bool {
        let mut by_path: BTreeMap<&str, ApiMap<&str>> = BTreeMap::new();
        for (id, element) in present {
            let element: &'a Element = element;
            for file in self.api(id).doc_files(element) {
                by_path
                    .entry(file.path.as_str())
                    .or_default()
                    .insert(id.clone(), file.content.as_str());
            }
        }

        let mut equal = true;
        for (path, found) in &by_path {
            let pos = position.relative_at(RelationKind::DocFile, PositionIndex::Name((*path).to_string()));
            let contents = found.project(present.keys(), |c| *c);
            equal &= check(reporter, &contents, |r, v| r.report_different_doc_files(&pos, v));
        }
        equal
    }

    fn compare_documentation<R: Reporter + ?Sized>(
        &self,
        position: &Position,
        present: &ApiMap<&'a Element>,
        reporter: &mut R,
    ) -> bool {
        let mut equal = true;
        if self.compares_doc_comments() {
            let comments: ApiMap<Option<&str>> = present
                .iter()
                .map(|(id, e)| (id.clone(), self.api(id).raw_doc_comment(e)))
                .collect();
            equal &= check(reporter, &comments, |r, v| r.report_different_raw_doc_comments(position, v));
        }
        if self.compares_api_descriptions() {
            let descriptions: ApiMap<Option<&str>> = present
                .iter()
                .map(|(id, e)| (id.clone(), self.api(id).api_description(e)))
                .collect();
            equal &= check(reporter, &descriptions, |r, v| r.report_different_api_descriptions(position, v));
        }
        equal
    }
}
