use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::filter::BoolFilter;

/// Filter clauses loaded from a YAML file:
///
/// ```yaml
/// filters:
///   - not-dangling
///   - "=true"
/// ```
#[derive(Debug, Default, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct FiltersConfig {
    #[serde(default)]
    pub filters: Vec<String>,
}

impl FiltersConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let settings = ::config::Config::builder()
            .add_source(::config::File::from(path))
            .build()
            .with_context(|| format!("Config: Failed to read {:?}", path))?;
        settings
            .try_deserialize()
            .with_context(|| format!("Config: Invalid filter configuration in {:?}", path))
    }

    /// Build an enabled filter from the file's clauses followed by `extra`.
    pub fn into_filter<I, S>(self, extra: I) -> anyhow::Result<BoolFilter>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut filter = BoolFilter::new();
        for clause in &self.filters {
            filter
                .parse(clause)
                .context("Config: Invalid clause in filter file")?;
        }
        for clause in extra {
            filter
                .parse(clause.as_ref())
                .context("CLI: Invalid --filter clause")?;
        }
        filter.enable();
        Ok(filter)
    }
}
