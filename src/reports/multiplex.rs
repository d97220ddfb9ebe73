use super::{Dimension, Reporter};
use crate::api::{AnnotationMirror, AnnotationValue, Directive, Element, ElementKind, Modifier, SerializedForm, TypeParameter};
use crate::model::{ApiId, ApiMap, Position, TypeKey};
use std::collections::BTreeSet;

/// Broadcasts every call, in order, to each child reporter.
///
/// Typed reports are forwarded as typed reports, so a child that overrides
/// one sees the original values rather than their rendered form.
#[derive(Default)]
pub struct MultiplexReporter<'r> {
    reporters: Vec<&'r mut dyn Reporter>,
}

impl<'r> MultiplexReporter<'r> {
    #[must_use]
    pub fn new() -> Self {
        Self { reporters: Vec::new() }
    }

    #[must_use]
    pub fn with(mut self, reporter: &'r mut dyn Reporter) -> Self {
        self.reporters.push(reporter);
        self
    }

    pub fn push(&mut self, reporter: &'r mut dyn Reporter) {
        self.reporters.push(reporter);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.reporters.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.reporters.is_empty()
    }
}

macro_rules! forward {
    ($self:ident . $method:ident ( $($arg:expr),* )) => {
        for reporter in &mut $self.reporters {
            reporter.$method($($arg),*);
        }
    };
}

impl Reporter for MultiplexReporter<'_> {
    fn comparing(&mut self, position: &Position, elements: &ApiMap<&Element>) {
        forward!(self.comparing(position, elements));
    }

    fn completed(&mut self, position: &Position, equal: bool) {
        forward!(self.completed(position, equal));
    }

    fn completed_all(&mut self, equal: bool) {
        forward!(self.completed_all(equal));
    }

    fn report_missing(&mut self, position: &Position, missing: &BTreeSet<ApiId>) {
        forward!(self.report_missing(position, missing));
    }

    fn report_different(&mut self, position: &Position, dimension: Dimension, values: &ApiMap<String>) {
        forward!(self.report_different(position, dimension, values));
    }

    fn report_different_kinds(&mut self, position: &Position, kinds: &ApiMap<ElementKind>) {
        forward!(self.report_different_kinds(position, kinds));
    }

    fn report_different_names(&mut self, position: &Position, names: &ApiMap<&str>) {
        forward!(self.report_different_names(position, names));
    }

    fn report_different_modifiers(&mut self, position: &Position, modifiers: &ApiMap<BTreeSet<Modifier>>) {
        forward!(self.report_different_modifiers(position, modifiers));
    }

    fn report_different_type_parameters(&mut self, position: &Position, params: &ApiMap<&[TypeParameter]>) {
        forward!(self.report_different_type_parameters(position, params));
    }

    fn report_different_annotations(&mut self, position: &Position, annotations: &ApiMap<Option<&AnnotationMirror>>) {
        forward!(self.report_different_annotations(position, annotations));
    }

    fn report_different_annotation_values(&mut self, position: &Position, values: &ApiMap<Option<&AnnotationValue>>) {
        forward!(self.report_different_annotation_values(position, values));
    }

    fn report_different_superclasses(&mut self, position: &Position, superclasses: &ApiMap<Option<TypeKey>>) {
        forward!(self.report_different_superclasses(position, superclasses));
    }

    fn report_different_interfaces(&mut self, position: &Position, interfaces: &ApiMap<BTreeSet<TypeKey>>) {
        forward!(self.report_different_interfaces(position, interfaces));
    }

    fn report_different_permitted_subclasses(&mut self, position: &Position, subclasses: &ApiMap<BTreeSet<TypeKey>>) {
        forward!(self.report_different_permitted_subclasses(position, subclasses));
    }

    fn report_different_thrown_types(&mut self, position: &Position, thrown: &ApiMap<BTreeSet<TypeKey>>) {
        forward!(self.report_different_thrown_types(position, thrown));
    }

    fn report_different_types(&mut self, position: &Position, types: &ApiMap<Option<TypeKey>>) {
        forward!(self.report_different_types(position, types));
    }

    fn report_different_values(&mut self, position: &Position, values: &ApiMap<Option<&AnnotationValue>>) {
        forward!(self.report_different_values(position, values));
    }

    fn report_different_directives(&mut self, position: &Position, directives: &ApiMap<Option<&Directive>>) {
        forward!(self.report_different_directives(position, directives));
    }

    fn report_different_raw_doc_comments(&mut self, position: &Position, comments: &ApiMap<Option<&str>>) {
        forward!(self.report_different_raw_doc_comments(position, comments));
    }

    fn report_different_api_descriptions(&mut self, position: &Position, descriptions: &ApiMap<Option<&str>>) {
        forward!(self.report_different_api_descriptions(position, descriptions));
    }

    fn report_different_doc_files(&mut self, position: &Position, contents: &ApiMap<Option<&str>>) {
        forward!(self.report_different_doc_files(position, contents));
    }

    fn report_different_serialized_forms(&mut self, position: &Position, forms: &ApiMap<Option<&SerializedForm>>) {
        forward!(self.report_different_serialized_forms(position, forms));
    }
}
