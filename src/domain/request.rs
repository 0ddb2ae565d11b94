use url::Url;

use crate::domain::vocabulary::SortDirection;

/// Paging and sorting options accepted by list endpoints.
///
/// Only the options that were set are written to the query string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageQuery {
    pub page: Option<u32>,
    pub page_size: Option<u32>,
    pub sort_by: Option<String>,
    pub direction: SortDirection,
}

impl PageQuery {
    pub const PAGE: &'static str = "page";
    pub const PAGE_SIZE: &'static str = "pagesize";
    pub const SORT_BY: &'static str = "sortby";
    pub const DIRECTION: &'static str = "direction";

    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    pub fn page_size(mut self, page_size: u32) -> Self {
        self.page_size = Some(page_size);
        self
    }

    pub fn sort_by(mut self, field: impl Into<String>) -> Self {
        self.sort_by = Some(field.into());
        self
    }

    pub fn direction(mut self, direction: SortDirection) -> Self {
        self.direction = direction;
        self
    }

    /// `(name, value)` pairs in a stable order.
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(page) = self.page {
            pairs.push((Self::PAGE, page.to_string()));
        }
        if let Some(page_size) = self.page_size {
            pairs.push((Self::PAGE_SIZE, page_size.to_string()));
        }
        if let Some(sort_by) = self.sort_by.as_deref().filter(|field| !field.trim().is_empty()) {
            pairs.push((Self::SORT_BY, sort_by.trim().to_owned()));
        }
        if let Some(direction) = crate::transport::WireEnum::wire(self.direction) {
            pairs.push((Self::DIRECTION, direction.to_owned()));
        }
        pairs
    }

    /// Append the set options to `url`'s query string.
    pub fn apply_to(&self, url: &mut Url) {
        let pairs = self.to_pairs();
        if pairs.is_empty() {
            return;
        }
        url.query_pairs_mut().extend_pairs(pairs);
    }
}
