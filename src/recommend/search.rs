/// Build the search URL for a query, form-encoding the query value
pub fn search_url(base_url: &str, query: &str) -> String {
    let encoded = serde_urlencoded::to_string([("search_query", query)])
        .unwrap_or_else(|_| format!("search_query={}", query));

    let separator = if base_url.contains('?') { '&' } else { '?' };
    format!("{}{}{}", base_url, separator, encoded)
}
