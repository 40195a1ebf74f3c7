/// Sites the search is restricted to.
pub const ALLOWED_DOMAINS: [&str; 5] = [
    "skatteverket.se",
    "verksamt.se",
    "vismaspcs.se",
    "bolagsverket.se",
    "fortnox.se",
];

/// Append the `site:` clause restricting a query to [`ALLOWED_DOMAINS`].
pub fn restrict_query(query: &str) -> String {
    let clause = ALLOWED_DOMAINS
        .iter()
        .map(|d| format!("site:{d}"))
        .collect::<Vec<_>>()
        .join(" OR ");
    format!("{query} {clause}")
}
