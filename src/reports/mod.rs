//! Reporter sinks for comparison events.
//!
//! The engine drives a [`Reporter`] with a strictly ordered stream of calls:
//! `comparing(p)`, then every report for `p` and its descendants, then
//! `completed(p, equal)`, and finally one `completed_all(equal)`.
//!
//! Implementations in this module:
//! - [`SummaryReporter`]: human-readable text with optional ANSI color
//! - [`JsonReporter`]: structured JSON for programmatic integration
//! - [`EventRecorder`]: the typed event stream, kept in memory
//! - [`LogReporter`]: mirrors events to `tracing`
//! - [`MultiplexReporter`]: broadcasts to several reporters in order

mod events;
mod json;
mod log;
mod multiplex;
mod summary;
mod types;

pub use events::{EventRecorder, ReportEvent};
pub use json::JsonReporter;
pub use log::LogReporter;
pub use multiplex::MultiplexReporter;
pub use summary::SummaryReporter;
pub use types::{ApiSummary, ReportFormat, ReportMetadata, ReportStats};

use crate::api::{
    format_modifiers, AnnotationMirror, AnnotationValue, Directive, Element, ElementKind, Modifier,
    SerializedForm, TypeParameter,
};
use crate::model::{ApiId, ApiMap, Position, TypeKey};
use crate::notes::Notes;
use serde::Serialize;
use std::collections::BTreeSet;
use thiserror::Error;

/// Errors that can occur during report generation
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Format error: {0}")]
    FormatError(#[from] std::fmt::Error),
}

/// The attribute a difference report is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Dimension {
    Kinds,
    Names,
    Modifiers,
    TypeParameters,
    Annotations,
    AnnotationValues,
    Superclasses,
    Interfaces,
    PermittedSubclasses,
    ThrownTypes,
    Types,
    Values,
    Directives,
    RawDocComments,
    ApiDescriptions,
    DocFiles,
    SerializedForms,
}

impl Dimension {
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::Kinds => "kinds",
            Self::Names => "names",
            Self::Modifiers => "modifiers",
            Self::TypeParameters => "type parameters",
            Self::Annotations => "annotations",
            Self::AnnotationValues => "annotation values",
            Self::Superclasses => "superclasses",
            Self::Interfaces => "superinterfaces",
            Self::PermittedSubclasses => "permitted subclasses",
            Self::ThrownTypes => "thrown types",
            Self::Types => "types",
            Self::Values => "values",
            Self::Directives => "directives",
            Self::RawDocComments => "doc comments",
            Self::ApiDescriptions => "API descriptions",
            Self::DocFiles => "doc files",
            Self::SerializedForms => "serialized forms",
        }
    }
}

impl std::fmt::Display for Dimension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.description())
    }
}

/// Placeholder for a value a snapshot does not have.
pub const ABSENT: &str = "(none)";

fn render_optional<T: std::fmt::Display>(value: Option<&T>) -> String {
    value.map_or_else(|| ABSENT.to_string(), ToString::to_string)
}

fn render_type_set(types: &BTreeSet<TypeKey>) -> String {
    if types.is_empty() {
        return ABSENT.to_string();
    }
    types.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ")
}

fn render_type_parameters(params: &[TypeParameter]) -> String {
    let rendered: Vec<String> = params
        .iter()
        .map(|p| {
            if p.bounds.is_empty() {
                p.name.clone()
            } else {
                let bounds: Vec<String> = p.bounds.iter().map(ToString::to_string).collect();
                format!("{} extends {}", p.name, bounds.join(" & "))
            }
        })
        .collect();
    format!("<{}>", rendered.join(", "))
}

fn render_serialized_form(form: &SerializedForm) -> String {
    let uid = form
        .serial_version_uid
        .map_or_else(|| ABSENT.to_string(), |uid| uid.to_string());
    format!("serialVersionUID {uid}, {} serialized fields", form.fields.len())
}

/// Receiver of comparison events.
///
/// Only [`Reporter::report_missing`] and [`Reporter::report_different`] are
/// required. Each typed `report_different_*` method defaults to rendering its
/// values to strings and forwarding to `report_different`.
pub trait Reporter {
    /// An entity is about to be compared.
    fn comparing(&mut self, _position: &Position, _elements: &ApiMap<&Element>) {}

    /// An entity and all its descendants have been compared.
    fn completed(&mut self, _position: &Position, _equal: bool) {}

    /// The whole comparison has finished.
    fn completed_all(&mut self, _equal: bool) {}

    /// An entity is absent from the listed snapshots.
    fn report_missing(&mut self, position: &Position, missing: &BTreeSet<ApiId>);

    /// Rendered form of every difference report.
    fn report_different(&mut self, position: &Position, dimension: Dimension, values: &ApiMap<String>);

    fn report_different_kinds(&mut self, position: &Position, kinds: &ApiMap<ElementKind>) {
        self.report_different(position, Dimension::Kinds, &kinds.map(ToString::to_string));
    }

    fn report_different_names(&mut self, position: &Position, names: &ApiMap<&str>) {
        self.report_different(position, Dimension::Names, &names.map(|n| (*n).to_string()));
    }

    fn report_different_modifiers(&mut self, position: &Position, modifiers: &ApiMap<BTreeSet<Modifier>>) {
        self.report_different(position, Dimension::Modifiers, &modifiers.map(format_modifiers));
    }

    fn report_different_type_parameters(&mut self, position: &Position, params: &ApiMap<&[TypeParameter]>) {
        self.report_different(
            position,
            Dimension::TypeParameters,
            &params.map(|p| render_type_parameters(p)),
        );
    }

    fn report_different_annotations(
        &mut self,
        position: &Position,
        annotations: &ApiMap<Option<&AnnotationMirror>>,
    ) {
        self.report_different(
            position,
            Dimension::Annotations,
            &annotations.map(|a| render_optional(a.as_ref())),
        );
    }

    fn report_different_annotation_values(
        &mut self,
        position: &Position,
        values: &ApiMap<Option<&AnnotationValue>>,
    ) {
        self.report_different(
            position,
            Dimension::AnnotationValues,
            &values.map(|v| render_optional(v.as_ref())),
        );
    }

    fn report_different_superclasses(&mut self, position: &Position, superclasses: &ApiMap<Option<TypeKey>>) {
        self.report_different(
            position,
            Dimension::Superclasses,
            &superclasses.map(|t| render_optional(t.as_ref())),
        );
    }

    fn report_different_interfaces(&mut self, position: &Position, interfaces: &ApiMap<BTreeSet<TypeKey>>) {
        self.report_different(position, Dimension::Interfaces, &interfaces.map(render_type_set));
    }

    fn report_different_permitted_subclasses(
        &mut self,
        position: &Position,
        subclasses: &ApiMap<BTreeSet<TypeKey>>,
    ) {
        self.report_different(position, Dimension::PermittedSubclasses, &subclasses.map(render_type_set));
    }

    fn report_different_thrown_types(&mut self, position: &Position, thrown: &ApiMap<BTreeSet<TypeKey>>) {
        self.report_different(position, Dimension::ThrownTypes, &thrown.map(render_type_set));
    }

    fn report_different_types(&mut self, position: &Position, types: &ApiMap<Option<TypeKey>>) {
        self.report_different(position, Dimension::Types, &types.map(|t| render_optional(t.as_ref())));
    }

    fn report_different_values(&mut self, position: &Position, values: &ApiMap<Option<&AnnotationValue>>) {
        self.report_different(position, Dimension::Values, &values.map(|v| render_optional(v.as_ref())));
    }

    fn report_different_directives(&mut self, position: &Position, directives: &ApiMap<Option<&Directive>>) {
        self.report_different(
            position,
            Dimension::Directives,
            &directives.map(|d| render_optional(d.as_ref())),
        );
    }

    fn report_different_raw_doc_comments(&mut self, position: &Position, comments: &ApiMap<Option<&str>>) {
        self.report_different(
            position,
            Dimension::RawDocComments,
            &comments.map(|c| c.unwrap_or(ABSENT).to_string()),
        );
    }

    fn report_different_api_descriptions(&mut self, position: &Position, descriptions: &ApiMap<Option<&str>>) {
        self.report_different(
            position,
            Dimension::ApiDescriptions,
            &descriptions.map(|d| d.unwrap_or(ABSENT).to_string()),
        );
    }

    fn report_different_doc_files(&mut self, position: &Position, contents: &ApiMap<Option<&str>>) {
        self.report_different(
            position,
            Dimension::DocFiles,
            &contents.map(|c| c.unwrap_or(ABSENT).to_string()),
        );
    }

    fn report_different_serialized_forms(
        &mut self,
        position: &Position,
        forms: &ApiMap<Option<&SerializedForm>>,
    ) {
        self.report_different(
            position,
            Dimension::SerializedForms,
            &forms.map(|f| f.map_or_else(|| ABSENT.to_string(), render_serialized_form)),
        );
    }
}

/// A reporter that renders a final report once the comparison has completed.
pub trait ReportRenderer: Reporter {
    /// Render the collected events.
    fn render(&self, metadata: &ReportMetadata) -> Result<String, ReportError>;

    /// Counts of what was reported so far.
    fn stats(&self) -> ReportStats;

    /// Get the format this renderer produces
    fn format(&self) -> ReportFormat;
}

/// Create a renderer for the given format.
///
/// Matching notes are attached to each reported position when `notes` is
/// given.
#[must_use]
pub fn create_reporter<'n>(
    format: ReportFormat,
    colored: bool,
    notes: Option<&'n Notes>,
) -> Box<dyn ReportRenderer + 'n> {
    match format {
        ReportFormat::Summary => {
            let reporter = SummaryReporter::new().with_notes(notes);
            if colored {
                Box::new(reporter)
            } else {
                Box::new(reporter.no_color())
            }
        }
        ReportFormat::Json => Box::new(JsonReporter::new().with_notes(notes)),
    }
}
