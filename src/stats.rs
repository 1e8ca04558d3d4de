use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DomainCount {
    pub domain: String,
    #[serde(rename = "number_of_customers")]
    pub count: u64,
}

impl DomainCount {
    pub fn new(domain: impl Into<String>, count: u64) -> Self {
        Self {
            domain: domain.into(),
            count,
        }
    }
}

/// Outcome of one aggregation pass.
///
/// `domains` is sorted ascending by domain and holds each domain once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregateResult {
    pub domains: Vec<DomainCount>,
    pub rows_processed: u64,
    pub rows_skipped: u64,
}

impl AggregateResult {
    pub fn len(&self) -> usize {
        self.domains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.domains.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DomainCount> {
        self.domains.iter()
    }

    pub fn total_customers(&self) -> u64 {
        self.domains.iter().map(|d| d.count).sum()
    }
}

impl<'a> IntoIterator for &'a AggregateResult {
    type Item = &'a DomainCount;
    type IntoIter = std::slice::Iter<'a, DomainCount>;

    fn into_iter(self) -> Self::IntoIter {
        self.domains.iter()
    }
}
