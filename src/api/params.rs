/// The page size Oomnitza documents as its default.
pub const DEFAULT_PAGE_LIMIT: u64 = 200;

/// Query parameters for listing assets.
///
/// Paging through results is up to the caller: bump `skip` by `limit`
/// and list again until a short page comes back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListParams {
    /// Fields to include within each returned asset, e.g. `name,serial_number`.
    pub fields: String,
    /// Pagination: the starting index.
    pub skip: u64,
    /// Pagination: the amount of assets returned per page.
    pub limit: u64,
    /// The field to sort results by.
    pub sort_by: String,
}

impl ListParams {
    /// Builds the query string for the `/assets/` endpoint.
    ///
    /// Values are interpolated verbatim, without any percent-encoding.
    /// A value containing `&` or `#` will therefore alter the resulting query.
    pub fn to_query_string(&self) -> String {
        format!(
            "fields={}&skip={}&limit={}&sortby={}",
            self.fields, self.skip, self.limit, self.sort_by
        )
    }
}
