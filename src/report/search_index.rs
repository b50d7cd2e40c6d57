//! Search index for the browser-side spec search.
//!
//! Maps every tag and every spec title to the report pages it appears on.
//! Both maps are sorted and each location is listed once per key, so the
//! serialized asset is stable across runs.

use crate::bridge::to_html_file_name;
use crate::types::SuiteResult;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;

/// Variable the search script reads the index from.
pub const INDEX_VARIABLE: &str = "index";

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SearchIndex {
    /// Spec title -> report pages with that title
    pub specs: BTreeMap<String, Vec<String>>,
    /// Tag -> report pages carrying the tag on the spec or any of its scenarios
    pub tags: BTreeMap<String, Vec<String>>,
}

impl SearchIndex {
    /// Serialize as the `js/search_index.js` asset body.
    pub fn to_script(&self) -> Result<String, serde_json::Error> {
        Ok(format!("var {} = {};", INDEX_VARIABLE, serde_json::to_string(self)?))
    }
}

/// Accumulates index entries, ignoring repeats of a (key, location) pair.
#[derive(Debug, Default)]
pub struct SearchIndexBuilder {
    index: SearchIndex,
}

impl SearchIndexBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_tag(&mut self, tag: &str, location: &str) {
        insert_unique(&mut self.index.tags, tag, location);
    }

    pub fn add_spec(&mut self, title: &str, location: &str) {
        insert_unique(&mut self.index.specs, title, location);
    }

    pub fn build(self) -> SearchIndex {
        self.index
    }
}

fn insert_unique(map: &mut BTreeMap<String, Vec<String>>, key: &str, location: &str) {
    let locations = map.entry(key.to_string()).or_default();
    if !locations.iter().any(|l| l == location) {
        locations.push(location.to_string());
    }
}

/// Build the index over every spec in the suite.
pub fn build_search_index(suite: &SuiteResult, project_root: &Path) -> SearchIndex {
    let mut builder = SearchIndexBuilder::new();

    for spec in &suite.spec_results {
        let location = to_html_file_name(&spec.file_name, project_root);

        for tag in &spec.tags {
            builder.add_tag(tag, &location);
        }
        for scenario in spec.scenarios() {
            for tag in &scenario.tags {
                builder.add_tag(tag, &location);
            }
        }
        builder.add_spec(&spec.heading, &location);
    }

    builder.build()
}
