//! The comparison driver.

use super::selector::Selector;
use crate::api::{AccessKind, Api, Element};
use crate::error::{ApiDiffError, CompareErrorKind, ErrorContext, Result};
use crate::model::{ApiId, ApiMap, ElementKey, Position};
use crate::reports::Reporter;
use std::collections::{BTreeSet, HashSet};

/// Compares two or more snapshots and reports through a [`Reporter`].
///
/// The comparator holds configuration only. Each call to
/// [`Comparator::compare`] is an independent, deterministic walk.
pub struct Comparator<'a> {
    apis: Vec<(ApiId, &'a dyn Api)>,
    access: AccessKind,
    compare_doc_comments: bool,
    compare_api_descriptions: bool,
    selector: Selector,
}

impl<'a> Comparator<'a> {
    /// Create a comparator over `apis`, in declaration order.
    pub fn new(apis: impl IntoIterator<Item = &'a dyn Api>) -> Self {
        let apis = apis
            .into_iter()
            .enumerate()
            .map(|(index, api)| (ApiId::new(index, api.name()), api))
            .collect();
        Self {
            apis,
            access: AccessKind::default(),
            compare_doc_comments: false,
            compare_api_descriptions: false,
            selector: Selector::all(),
        }
    }

    /// Only compare types and members at least this accessible.
    #[must_use]
    pub const fn with_access(mut self, access: AccessKind) -> Self {
        self.access = access;
        self
    }

    /// Compare raw documentation comments
    #[must_use]
    pub const fn with_doc_comments(mut self, enabled: bool) -> Self {
        self.compare_doc_comments = enabled;
        self
    }

    /// Compare derived API description text
    #[must_use]
    pub const fn with_api_descriptions(mut self, enabled: bool) -> Self {
        self.compare_api_descriptions = enabled;
        self
    }

    #[must_use]
    pub fn with_selector(mut self, selector: Selector) -> Self {
        self.selector = selector;
        self
    }

    /// Snapshot identities, in declaration order.
    #[must_use]
    pub fn api_ids(&self) -> Vec<ApiId> {
        self.apis.iter().map(|(id, _)| id.clone()).collect()
    }

    pub(super) const fn access(&self) -> AccessKind {
        self.access
    }

    pub(super) const fn selector(&self) -> &Selector {
        &self.selector
    }

    pub(super) const fn compares_doc_comments(&self) -> bool {
        self.compare_doc_comments
    }

    pub(super) const fn compares_api_descriptions(&self) -> bool {
        self.compare_api_descriptions
    }

    pub(super) fn api(&self, id: &ApiId) -> &'a dyn Api {
        self.apis[id.index()].1
    }

    /// Run the comparison. Returns whether all snapshots are equal.
    ///
    /// Any provider failure or contract violation aborts the walk with an
    /// error; events already delivered to `reporter` must then be discarded.
    pub fn compare<R: Reporter + ?Sized>(&self, reporter: &mut R) -> Result<bool> {
        self.check_inputs()?;
        tracing::debug!(
            "Comparing {} APIs (access >= {}, {})",
            self.apis.len(),
            self.access,
            self.selector.describe()
        );

        let mut roots = ApiMap::new();
        for (id, api) in &self.apis {
            let api: &'a dyn Api = *api;
            let top = api
                .top_level()
                .with_context(|| format!("reading top level of '{}'", api.name()))?;
            roots.insert(id.clone(), top);
        }

        let equal = self.compare_children(None, &roots, reporter)?;
        reporter.completed_all(equal);
        Ok(equal)
    }

    fn check_inputs(&self) -> Result<()> {
        if self.apis.len() < 2 {
            return Err(ApiDiffError::compare(
                "checking inputs",
                CompareErrorKind::TooFewApis(self.apis.len()),
            ));
        }
        let mut seen = HashSet::new();
        for (id, _) in &self.apis {
            if !seen.insert(id.name()) {
                return Err(ApiDiffError::compare(
                    "checking inputs",
                    CompareErrorKind::DuplicateApiName(id.name().to_string()),
                ));
            }
        }
        Ok(())
    }

    /// Compare the children of one container.
    ///
    /// `children` holds an entry for every snapshot that provides the
    /// container's children; snapshots without an entry are not counted when
    /// deciding whether a child is missing.
    fn compare_children<R: Reporter + ?Sized>(
        &self,
        parent: Option<&ElementKey>,
        children: &ApiMap<Vec<&'a Element>>,
        reporter: &mut R,
    ) -> Result<bool> {
        let frontier = self.frontier(parent, children)?;
        let mut equal = true;
        for (key, present) in &frontier {
            equal &= self.compare_element(key, present, children, reporter)?;
        }
        Ok(equal)
    }

    fn compare_element<R: Reporter + ?Sized>(
        &self,
        key: &ElementKey,
        present: &ApiMap<&'a Element>,
        providers: &ApiMap<Vec<&'a Element>>,
        reporter: &mut R,
    ) -> Result<bool> {
        let position = Position::element(key.clone());
        reporter.comparing(&position, present);
        let mut equal = true;

        if present.len() < providers.len() {
            let missing: BTreeSet<ApiId> = providers
                .keys()
                .filter(|id| !present.contains(id))
                .cloned()
                .collect();
            reporter.report_missing(&position, &missing);
            equal = false;
        }

        if present.len() >= 2 {
            equal &= self
                .compare_attributes(&position, key, present, reporter)
                .with_context(|| format!("comparing {position}"))?;

            if key.is_container() {
                let children = self
                    .children_of(present)
                    .with_context(|| format!("reading children of {position}"))?;
                equal &= self.compare_children(Some(key), &children, reporter)?;
            }
        }

        reporter.completed(&position, equal);
        Ok(equal)
    }

    /// Children of a container in every snapshot that provides them.
    fn children_of(&self, present: &ApiMap<&'a Element>) -> Result<ApiMap<Vec<&'a Element>>> {
        let mut children = ApiMap::new();
        for (id, element) in present {
            let element: &'a Element = element;
            if let Some(enclosed) = self.api(id).enclosed(element)? {
                children.insert(id.clone(), enclosed.iter().collect());
            }
        }
        Ok(children)
    }
}
