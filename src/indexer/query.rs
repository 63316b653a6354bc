/// GraphQL documents and variables for the three record queries
use serde::Serialize;

/// Token fields requested by every query. Order and names must match the
/// indexer schema exactly.
pub const TOKEN_FIELDS: &str = "
    artifact_uri
    average
    decimals
    description
    display_uri
    extra
    flag
    highest_offer
    is_boolean_amount
    last_listed
    last_metadata_update
    level
    lowest_ask
    metadata
    mime
    name
    ophash
    rights
    supply
    symbol
    thumbnail_uri
    timestamp
    tzip16_key
    creators {
      creator_address
    }
";

/// A record window against one holder address
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArtQuery {
    /// Tokens held by `address`, indexer order
    Held {
        address: String,
        limit: usize,
        offset: usize,
    },
    /// Holdings of `address`, most recently acquired first
    RecentlyAcquired {
        address: String,
        limit: usize,
        offset: usize,
    },
}

/// Body of a GraphQL POST
#[derive(Debug, Serialize)]
pub struct GraphQlRequest<'a> {
    pub query: String,
    #[serde(rename = "operationName")]
    pub operation_name: &'a str,
    pub variables: Variables<'a>,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct Variables<'a> {
    pub limit: usize,
    pub offset: usize,
    pub address: &'a str,
}

impl ArtQuery {
    pub fn held(address: impl Into<String>, limit: usize, offset: usize) -> Self {
        Self::Held {
            address: address.into(),
            limit,
            offset,
        }
    }

    pub fn recently_acquired(address: impl Into<String>, limit: usize, offset: usize) -> Self {
        Self::RecentlyAcquired {
            address: address.into(),
            limit,
            offset,
        }
    }

    pub fn address(&self) -> &str {
        match self {
            Self::Held { address, .. } | Self::RecentlyAcquired { address, .. } => address,
        }
    }

    pub fn window(&self) -> (usize, usize) {
        match self {
            Self::Held { limit, offset, .. } | Self::RecentlyAcquired { limit, offset, .. } => {
                (*limit, *offset)
            }
        }
    }

    /// Name of the top-level field holding the result rows
    pub fn root_field(&self) -> &'static str {
        match self {
            Self::Held { .. } => "token",
            Self::RecentlyAcquired { .. } => "token_holder",
        }
    }

    pub fn document(&self) -> String {
        match self {
            Self::Held { .. } => format!(
                "query HeldTokens($limit: Int!, $offset: Int!, $address: String!) {{
  token(
    where: {{ holders: {{ holder: {{ address: {{ _eq: $address }} }} }} }}
    offset: $offset
    limit: $limit
  ) {{{fields}  }}
}}",
                fields = TOKEN_FIELDS
            ),
            Self::RecentlyAcquired { .. } => format!(
                "query RecentHoldings($limit: Int!, $offset: Int!, $address: String!) {{
  token_holder(
    where: {{ holder: {{ address: {{ _eq: $address }} }} }}
    offset: $offset
    limit: $limit
    order_by: {{ last_incremented_at: desc }}
  ) {{
    last_incremented_at
    token {{{fields}    }}
  }}
}}",
                fields = TOKEN_FIELDS
            ),
        }
    }

    pub fn operation_name(&self) -> &'static str {
        match self {
            Self::Held { .. } => "HeldTokens",
            Self::RecentlyAcquired { .. } => "RecentHoldings",
        }
    }

    /// Full POST body for this query
    pub fn request(&self) -> GraphQlRequest<'_> {
        let (limit, offset) = self.window();
        GraphQlRequest {
            query: self.document(),
            operation_name: self.operation_name(),
            variables: Variables {
                limit,
                offset,
                address: self.address(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SELECTED: [&str; 23] = [
        "artifact_uri",
        "average",
        "decimals",
        "description",
        "display_uri",
        "extra",
        "flag",
        "highest_offer",
        "is_boolean_amount",
        "last_listed",
        "last_metadata_update",
        "level",
        "lowest_ask",
        "metadata",
        "mime",
        "name",
        "ophash",
        "rights",
        "supply",
        "symbol",
        "thumbnail_uri",
        "timestamp",
        "tzip16_key",
    ];

    #[test]
    fn test_field_selection_is_complete_and_ordered() {
        let fields: Vec<&str> = TOKEN_FIELDS.split_whitespace().collect();
        assert_eq!(&fields[..SELECTED.len()], &SELECTED[..]);
        assert_eq!(&fields[SELECTED.len()..], &["creators", "{", "creator_address", "}"]);
    }

    #[test]
    fn test_held_document() {
        let query = ArtQuery::held("tz1ref", 1000, 0);
        let doc = query.document();
        assert!(doc.starts_with("query HeldTokens($limit: Int!, $offset: Int!, $address: String!)"));
        assert!(doc.contains("holders: { holder: { address: { _eq: $address } } }"));
        assert!(!doc.contains("order_by"));
        assert!(doc.contains("creator_address"));
        assert_eq!(query.root_field(), "token");
    }

    #[test]
    fn test_recent_document_is_ordered() {
        let query = ArtQuery::recently_acquired("tz1ref", 24, 48);
        let doc = query.document();
        assert!(doc.contains("token_holder("));
        assert!(doc.contains("order_by: { last_incremented_at: desc }"));
        assert!(doc.contains("last_incremented_at\n    token {"));
        assert_eq!(query.root_field(), "token_holder");
    }

    #[test]
    fn test_request_body() {
        let query = ArtQuery::recently_acquired("tz1someone", 24, 48);
        let body = serde_json::to_value(query.request()).unwrap();

        assert_eq!(body["operationName"], "RecentHoldings");
        assert_eq!(body["variables"]["limit"], 24);
        assert_eq!(body["variables"]["offset"], 48);
        assert_eq!(body["variables"]["address"], "tz1someone");
        assert!(body["query"].as_str().unwrap().contains("token_holder"));
    }

    #[test]
    fn test_braces_balance() {
        for query in [ArtQuery::held("a", 1, 0), ArtQuery::recently_acquired("a", 1, 0)] {
            let doc = query.document();
            assert_eq!(doc.matches('{').count(), doc.matches('}').count());
            assert_eq!(doc.matches('(').count(), doc.matches(')').count());
        }
    }
}
