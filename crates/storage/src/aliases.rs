use std::collections::BTreeMap;

/// Maps caller-facing bucket names to the buckets that actually exist.
/// Names without an entry are used as-is.
#[derive(Debug, Clone, Default)]
pub struct BucketAliases {
    table: BTreeMap<String, String>,
}

impl BucketAliases {
    pub fn new(table: BTreeMap<String, String>) -> Self {
        Self { table }
    }

    pub fn resolve<'a>(&'a self, logical: &'a str) -> &'a str {
        self.table.get(logical).map(String::as_str).unwrap_or(logical)
    }
}
