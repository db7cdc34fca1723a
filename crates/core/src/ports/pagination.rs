//! Pagination types for catalog list queries.
//!
//! These types implement cursor pagination as exposed by the remote
//! Storefront API: an opaque cursor marks a position in the server-ordered
//! result set, and each request paginates in exactly one direction.

use serde::{Deserialize, Serialize};

/// Query string parameter carrying the cursor.
const CURSOR_PARAM: &str = "cursor";
/// Query string parameter carrying the pagination direction.
const DIRECTION_PARAM: &str = "direction";
/// Direction value selecting backward pagination.
const DIRECTION_PREVIOUS: &str = "previous";

/// Variables of one paginated catalog query.
///
/// Invariant: exactly one direction is active - either `first` +
/// `end_cursor` (forward) or `last` + `start_cursor` (backward), never
/// both. Cursors are opaque tokens and are forwarded to the remote API
/// unmodified, never reinterpreted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationVariables {
    /// Number of items to fetch (forward pagination).
    pub first: Option<i32>,
    /// Number of items to fetch (backward pagination).
    pub last: Option<i32>,
    /// Cursor to end before (backward pagination).
    pub start_cursor: Option<String>,
    /// Cursor to start after (forward pagination).
    pub end_cursor: Option<String>,
}

impl PaginationVariables {
    /// Forward pagination: the first `page_by` items after `cursor`.
    pub fn forward(page_by: i32, cursor: Option<String>) -> Self {
        Self {
            first: Some(page_by),
            last: None,
            start_cursor: None,
            end_cursor: cursor,
        }
    }

    /// Backward pagination: the last `page_by` items before `cursor`.
    pub fn backward(page_by: i32, cursor: Option<String>) -> Self {
        Self {
            first: None,
            last: Some(page_by),
            start_cursor: cursor,
            end_cursor: None,
        }
    }

    /// Derive pagination variables from a request query string.
    ///
    /// Reads the `cursor` and `direction` parameters:
    /// `direction=previous` selects backward pagination, anything else
    /// (including no direction at all) selects forward pagination.
    pub fn from_query_str(query: Option<&str>, page_by: i32) -> Self {
        let mut cursor = None;
        let mut direction = None;

        if let Some(query) = query {
            for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
                match key.as_ref() {
                    CURSOR_PARAM => cursor = Some(value.into_owned()),
                    DIRECTION_PARAM => direction = Some(value.into_owned()),
                    _ => {}
                }
            }
        }

        if direction.as_deref() == Some(DIRECTION_PREVIOUS) {
            Self::backward(page_by, cursor)
        } else {
            Self::forward(page_by, cursor)
        }
    }

    /// Derive pagination variables from a full request URL.
    pub fn from_url(url: &url::Url, page_by: i32) -> Self {
        Self::from_query_str(url.query(), page_by)
    }
}

/// Paginated result set in the connection shape.
///
/// Node order is server-defined and preserved as received. Constructed
/// fresh per loader invocation and immutable once returned.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection<T> {
    /// Items of the current page, in server order.
    pub nodes: Vec<T>,
    /// Information about the current page.
    pub page_info: PageInfo,
}

impl<T> Connection<T> {
    /// Map every node through `f`, preserving order and page info.
    ///
    /// The first node error aborts the whole mapping.
    pub fn try_map<U, E>(self, f: impl FnMut(T) -> Result<U, E>) -> Result<Connection<U>, E> {
        Ok(Connection {
            nodes: self
                .nodes
                .into_iter()
                .map(f)
                .collect::<Result<Vec<_>, E>>()?,
            page_info: self.page_info,
        })
    }
}

/// Information about the current page in a paginated result.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    /// Whether there are items before this page.
    pub has_previous_page: bool,
    /// Whether there are more items after this page.
    pub has_next_page: bool,
    /// Cursor of the first item in this page.
    pub start_cursor: Option<String>,
    /// Cursor of the last item in this page.
    pub end_cursor: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_exactly_one_direction(vars: &PaginationVariables) {
        let forward = vars.first.is_some();
        let backward = vars.last.is_some();
        assert!(forward ^ backward, "exactly one direction must be active");
        if forward {
            assert!(vars.start_cursor.is_none());
        } else {
            assert!(vars.end_cursor.is_none());
        }
    }

    #[test]
    fn test_no_params_defaults_to_forward_first_page() {
        let vars = PaginationVariables::from_query_str(None, 8);
        assert_eq!(vars.first, Some(8));
        assert_eq!(vars.end_cursor, None);
        assert_exactly_one_direction(&vars);
    }

    #[test]
    fn test_cursor_without_direction_paginates_forward() {
        let vars = PaginationVariables::from_query_str(Some("cursor=abc123"), 8);
        assert_eq!(vars.first, Some(8));
        assert_eq!(vars.end_cursor.as_deref(), Some("abc123"));
        assert_exactly_one_direction(&vars);
    }

    #[test]
    fn test_direction_previous_paginates_backward() {
        let vars = PaginationVariables::from_query_str(Some("direction=previous&cursor=abc"), 4);
        assert_eq!(vars.last, Some(4));
        assert_eq!(vars.start_cursor.as_deref(), Some("abc"));
        assert_exactly_one_direction(&vars);
    }

    #[test]
    fn test_unknown_direction_falls_back_to_forward() {
        let vars = PaginationVariables::from_query_str(Some("direction=sideways&cursor=abc"), 8);
        assert_eq!(vars.first, Some(8));
        assert_eq!(vars.end_cursor.as_deref(), Some("abc"));
        assert_exactly_one_direction(&vars);
    }

    // Test critique: les curseurs sont opaques et transmis tels quels
    #[test]
    fn test_cursor_is_forwarded_unmodified() {
        let opaque = "eyJsYXN0X2lkIjo0Mn0=";
        let query = format!("cursor={}", opaque);
        let vars = PaginationVariables::from_query_str(Some(&query), 8);
        assert_eq!(vars.end_cursor.as_deref(), Some(opaque));
    }

    #[test]
    fn test_from_url_reads_query_string() {
        let url = url::Url::parse("https://shop.example/products?direction=previous&cursor=xyz")
            .unwrap();
        let vars = PaginationVariables::from_url(&url, 8);
        assert_eq!(vars.last, Some(8));
        assert_eq!(vars.start_cursor.as_deref(), Some("xyz"));
    }

    #[test]
    fn test_variables_serialize_to_wire_names() {
        let vars = PaginationVariables::backward(8, Some("abc".into()));
        let json = serde_json::to_value(&vars).unwrap();
        assert_eq!(json["last"], 8);
        assert_eq!(json["startCursor"], "abc");
        assert!(json["first"].is_null());
        assert!(json["endCursor"].is_null());
    }

    #[test]
    fn test_try_map_preserves_order_and_page_info() {
        let conn = Connection {
            nodes: vec![1, 2, 3],
            page_info: PageInfo {
                has_next_page: true,
                end_cursor: Some("c3".into()),
                ..Default::default()
            },
        };

        let mapped = conn.try_map(|n| Ok::<_, ()>(n * 10)).unwrap();
        assert_eq!(mapped.nodes, vec![10, 20, 30]);
        assert!(mapped.page_info.has_next_page);
        assert_eq!(mapped.page_info.end_cursor.as_deref(), Some("c3"));
    }

    #[test]
    fn test_try_map_propagates_node_errors() {
        let conn = Connection {
            nodes: vec![1, 2, 3],
            page_info: PageInfo::default(),
        };

        let result = conn.try_map(|n| if n == 2 { Err("bad node") } else { Ok(n) });
        assert_eq!(result.unwrap_err(), "bad node");
    }
}
