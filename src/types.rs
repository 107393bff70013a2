//! Stream records and request shapes exchanged with the Streamr API.
//!
//! A [`Stream`] is a projection of remote state: the client never mutates its fields
//! locally, it only fetches or creates streams through
//! [`StreamService`](crate::StreamService).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A Streamr data stream.
///
/// ```json
/// {
///   "id": "xyz123",
///   "name": "temperature",
///   "description": "sensor readings",
///   "dateCreated": "2024-01-01T00:00:00Z",
///   "lastUpdated": "2024-01-02T00:00:00Z"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stream {
    /// Unique identifier assigned by the server
    pub id: String,

    /// Human readable name
    #[serde(default)]
    pub name: String,

    /// Free-form description
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,

    /// When the stream was created
    #[serde(default)]
    pub date_created: Option<DateTime<Utc>>,

    /// When the stream was last modified
    #[serde(default)]
    pub last_updated: Option<DateTime<Utc>>,
}

impl Stream {
    /// Create a stream value with only identity fields set.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Stream {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            date_created: None,
            last_updated: None,
        }
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Body of a stream creation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewStream {
    /// Name of the new stream
    pub name: String,

    /// Optional description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl NewStream {
    /// A creation request carrying only a name.
    pub fn new(name: impl Into<String>) -> Self {
        NewStream {
            name: name.into(),
            description: None,
        }
    }

    /// Attach a description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Sort direction for [`StreamQuery`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    /// Ascending
    Asc,
    /// Descending
    Desc,
}

impl SortOrder {
    fn as_str(self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

/// Filter for listing streams.
///
/// Every field is optional; an empty query lists all streams visible to the API key.
/// Fields are sent as URL query parameters.
///
/// ```
/// use streamr_client::{SortOrder, StreamQuery};
///
/// let query = StreamQuery::new()
///     .with_search("sensor")
///     .with_max(10)
///     .with_sort_by("lastUpdated", SortOrder::Desc);
///
/// assert_eq!(
///     query.to_query_pairs(),
///     vec![
///         ("search", "sensor".to_string()),
///         ("max", "10".to_string()),
///         ("sortBy", "lastUpdated".to_string()),
///         ("order", "desc".to_string()),
///     ]
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StreamQuery {
    /// Exact stream name
    pub name: Option<String>,
    /// Substring search over name and description
    pub search: Option<String>,
    /// Only public (or only private) streams
    pub public: Option<bool>,
    /// Maximum number of results
    pub max: Option<u32>,
    /// Number of results to skip
    pub offset: Option<u32>,
    /// Field to sort by
    pub sort_by: Option<String>,
    /// Sort direction, only sent together with `sort_by`
    pub order: Option<SortOrder>,
}

impl StreamQuery {
    /// An empty query.
    pub fn new() -> Self {
        Self::default()
    }

    /// Match streams by exact name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Substring search.
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    /// Restrict to public or private streams.
    pub fn with_public(mut self, public: bool) -> Self {
        self.public = Some(public);
        self
    }

    /// Limit the number of results.
    pub fn with_max(mut self, max: u32) -> Self {
        self.max = Some(max);
        self
    }

    /// Skip the first `offset` results.
    pub fn with_offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Sort results by `field`.
    pub fn with_sort_by(mut self, field: impl Into<String>, order: SortOrder) -> Self {
        self.sort_by = Some(field.into());
        self.order = Some(order);
        self
    }

    /// Query parameters in a stable order.
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(name) = &self.name {
            pairs.push(("name", name.clone()));
        }
        if let Some(search) = &self.search {
            pairs.push(("search", search.clone()));
        }
        if let Some(public) = self.public {
            pairs.push(("public", public.to_string()));
        }
        if let Some(max) = self.max {
            pairs.push(("max", max.to_string()));
        }
        if let Some(offset) = self.offset {
            pairs.push(("offset", offset.to_string()));
        }
        if let Some(sort_by) = &self.sort_by {
            pairs.push(("sortBy", sort_by.clone()));
            if let Some(order) = self.order {
                pairs.push(("order", order.as_str().to_string()));
            }
        }
        pairs
    }
}
