use std::collections::HashMap;
use std::time::Instant;

use boxc_types::IndexField;

use crate::context::DocumentIndexingContext;
use crate::error::{IndexingError, IndexingResult};
use crate::filter::{FilterResult, IndexDocumentFilter};
use crate::filters::{
    AccessControlFilter, AccessStatusFilter, ContentStatusFilter, ContentTypeFilter,
    DatastreamFilter, DescriptiveFilter, PathFilter, ResourceTypeFilter,
};

/// The standard filter order.
///
/// Resource type runs before path, and path before content-type
/// aggregation, which reads the Work's own `ancestorPath` entry.
pub fn default_filters() -> Vec<Box<dyn IndexDocumentFilter>> {
    vec![
        Box::new(DescriptiveFilter),
        Box::new(ResourceTypeFilter),
        Box::new(AccessControlFilter),
        Box::new(AccessStatusFilter),
        Box::new(ContentStatusFilter),
        Box::new(PathFilter),
        Box::new(DatastreamFilter),
        Box::new(ContentTypeFilter),
    ]
}

/// An ordered, dependency-checked list of filters.
pub struct FilterPipeline {
    filters: Vec<Box<dyn IndexDocumentFilter>>,
}

impl FilterPipeline {
    /// Build a pipeline, checking that every field a filter requires is
    /// provided by an earlier filter and that no field has two providers.
    pub fn new(filters: Vec<Box<dyn IndexDocumentFilter>>) -> IndexingResult<Self> {
        let mut providers: HashMap<IndexField, &str> = HashMap::new();
        for filter in &filters {
            for field in filter.requires() {
                if !providers.contains_key(field) {
                    return Err(IndexingError::UnsatisfiedDependency {
                        filter: filter.name().to_string(),
                        field: *field,
                    });
                }
            }
            for field in filter.provides() {
                if let Some(first) = providers.insert(*field, filter.name()) {
                    return Err(IndexingError::DuplicateProvider {
                        field: *field,
                        first: first.to_string(),
                        second: filter.name().to_string(),
                    });
                }
            }
        }
        Ok(Self { filters })
    }

    /// The standard pipeline (see [`default_filters`]).
    pub fn with_default_filters() -> IndexingResult<Self> {
        Self::new(default_filters())
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Filter names in run order.
    pub fn filter_names(&self) -> Vec<&str> {
        self.filters.iter().map(|f| f.name()).collect()
    }

    /// Run every filter over the context.
    ///
    /// The run is **fail-fast**: the first filter error stops the run and is
    /// returned; the partially built document must then be discarded.
    pub fn run(&self, ctx: &mut DocumentIndexingContext<'_>) -> IndexingResult<Vec<FilterResult>> {
        let mut results = Vec::with_capacity(self.filters.len());
        for filter in &self.filters {
            let start = Instant::now();
            if let Err(e) = filter.filter(ctx) {
                tracing::debug!(id = %ctx.id(), filter = filter.name(), error = %e, "filter failed");
                return Err(e);
            }
            results.push(FilterResult {
                filter_name: filter.name().to_string(),
                elapsed: start.elapsed(),
            });
        }
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Declares {
        name: &'static str,
        requires: &'static [IndexField],
        provides: &'static [IndexField],
    }

    impl IndexDocumentFilter for Declares {
        fn name(&self) -> &str {
            self.name
        }
        fn requires(&self) -> &[IndexField] {
            self.requires
        }
        fn provides(&self) -> &[IndexField] {
            self.provides
        }
        fn filter(&self, _ctx: &mut DocumentIndexingContext<'_>) -> IndexingResult<()> {
            Ok(())
        }
    }

    #[test]
    fn default_order_is_valid() {
        let pipeline = FilterPipeline::with_default_filters().unwrap();
        assert_eq!(
            pipeline.filter_names(),
            vec![
                "descriptive",
                "resource_type",
                "access_control",
                "access_status",
                "content_status",
                "path",
                "datastream",
                "content_type"
            ]
        );
    }

    #[test]
    fn path_before_resource_type_is_rejected() {
        let filters: Vec<Box<dyn IndexDocumentFilter>> =
            vec![Box::new(PathFilter), Box::new(ResourceTypeFilter)];
        let err = FilterPipeline::new(filters).err().unwrap();
        assert!(matches!(
            err,
            IndexingError::UnsatisfiedDependency { ref filter, field: IndexField::ResourceType } if filter == "path"
        ));
    }

    #[test]
    fn content_type_needs_path() {
        let filters: Vec<Box<dyn IndexDocumentFilter>> =
            vec![Box::new(ResourceTypeFilter), Box::new(ContentTypeFilter)];
        assert!(matches!(
            FilterPipeline::new(filters),
            Err(IndexingError::UnsatisfiedDependency {
                field: IndexField::AncestorPath,
                ..
            })
        ));
    }

    #[test]
    fn duplicate_provider_is_rejected() {
        let filters: Vec<Box<dyn IndexDocumentFilter>> = vec![
            Box::new(Declares {
                name: "a",
                requires: &[],
                provides: &[IndexField::Title],
            }),
            Box::new(Declares {
                name: "b",
                requires: &[IndexField::Title],
                provides: &[IndexField::Title],
            }),
        ];
        assert!(matches!(
            FilterPipeline::new(filters),
            Err(IndexingError::DuplicateProvider { .. })
        ));
    }

    #[test]
    fn empty_pipeline_is_valid() {
        let pipeline = FilterPipeline::new(Vec::new()).unwrap();
        assert!(pipeline.is_empty());
    }
}
