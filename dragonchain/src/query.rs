/// Paging and search parameters for query operations.
///
/// `offset` and `limit` are always transmitted (defaulting to 0 and 10);
/// `q` and `sort` are omitted when not supplied.
#[derive(Debug, Clone)]
pub struct QueryParams {
    /// Search expression, omitted if empty.
    pub q: Option<String>,
    /// Sort expression, omitted if empty.
    pub sort: Option<String>,
    /// Result offset, defaults to 0.
    pub offset: u64,
    /// Result page size, defaults to 10.
    pub limit: u64,
}

impl Default for QueryParams {
    fn default() -> Self {
        Self {
            q: None,
            sort: None,
            offset: 0,
            limit: 10,
        }
    }
}

impl QueryParams {
    /// Create query params with the defaults: no search, offset 0, limit 10.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the search expression.
    pub fn with_query(mut self, q: impl Into<String>) -> Self {
        self.q = Some(q.into());
        self
    }

    /// Set the sort expression.
    pub fn with_sort(mut self, sort: impl Into<String>) -> Self {
        self.sort = Some(sort.into());
        self
    }

    /// Set the result offset.
    pub fn with_offset(mut self, offset: u64) -> Self {
        self.offset = offset;
        self
    }

    /// Set the result page size.
    pub fn with_limit(mut self, limit: u64) -> Self {
        self.limit = limit;
        self
    }

    /// Serialize into a query string with the leading `?`.
    pub(crate) fn to_query_string(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());

        if let Some(q) = self.q.as_deref().filter(|v| !v.is_empty()) {
            serializer.append_pair("q", q);
        }
        if let Some(sort) = self.sort.as_deref().filter(|v| !v.is_empty()) {
            serializer.append_pair("sort", sort);
        }
        serializer.append_pair("offset", &self.offset.to_string());
        serializer.append_pair("limit", &self.limit.to_string());

        format!("?{}", serializer.finish())
    }
}
