/// A named map/reduce view destined for a design document.
///
/// Identity is the `(design_document, view_name)` pair. Definitions are
/// immutable once constructed; applying one to a store with [`sync_view`]
/// is idempotent — identical source is a no-op, differing source
/// overwrites the stored view.
///
/// [`sync_view`]: crate::DocumentStore::sync_view
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewDefinition {
    design_document: String,
    view_name: String,
    map_source: String,
    reduce_source: Option<String>,
}

impl ViewDefinition {
    /// Creates a view definition from its sources.
    pub fn new(
        design_document: impl Into<String>,
        view_name: impl Into<String>,
        map_source: impl Into<String>,
        reduce_source: Option<String>,
    ) -> Self {
        Self {
            design_document: design_document.into(),
            view_name: view_name.into(),
            map_source: map_source.into(),
            reduce_source,
        }
    }

    /// The design document this view belongs to.
    pub fn design_document(&self) -> &str {
        &self.design_document
    }

    /// The view's name within its design document.
    pub fn view_name(&self) -> &str {
        &self.view_name
    }

    /// The map function source.
    pub fn map_source(&self) -> &str {
        &self.map_source
    }

    /// The reduce function source, if the view has one.
    pub fn reduce_source(&self) -> Option<&str> {
        self.reduce_source.as_deref()
    }

    /// Renders the `"design/view"` form used in logs and query paths.
    pub fn qualified_name(&self) -> String {
        format!("{}/{}", self.design_document, self.view_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn qualified_name_joins_design_and_view() {
        let def = ViewDefinition::new("tests", "by_age", "function (doc) {}", None);
        assert_eq!(def.qualified_name(), "tests/by_age");
    }

    #[test]
    fn accessors_expose_the_sources() {
        let def = ViewDefinition::new("tests", "by_age", "map src", Some("_count".to_string()));
        assert_eq!(def.design_document(), "tests");
        assert_eq!(def.view_name(), "by_age");
        assert_eq!(def.map_source(), "map src");
        assert_eq!(def.reduce_source(), Some("_count"));
    }
}
