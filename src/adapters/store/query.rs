//! Single-partition document queries
//!
//! A [`DocumentQuery`] is either built from equality filters, an optional
//! ordering and an optional limit, or given as raw SQL with named
//! parameters. Every query targets exactly one logical partition.
//!
//! ```
//! use docbridge::adapters::store::{DocumentQuery, SortOrder};
//! use docbridge::domain::PartitionKeyValue;
//!
//! let tenant = PartitionKeyValue::new("tenant-42").unwrap();
//! let query = DocumentQuery::in_partition(tenant)
//!     .where_eq("status", "open")
//!     .order_by("createdAt", SortOrder::Descending)
//!     .limit(10);
//!
//! let rendered = query.to_sql().unwrap();
//! assert_eq!(
//!     rendered.text,
//!     "SELECT TOP 10 * FROM c WHERE c.status = @p0 ORDER BY c.createdAt DESC"
//! );
//! ```

use crate::domain::{DocBridgeError, PartitionKeyValue, Result};
use serde_json::Value;

/// Sort direction for `ORDER BY`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

/// Equality filter on a dotted property path
#[derive(Debug, Clone, PartialEq)]
pub struct EqFilter {
    pub path: String,
    pub value: Value,
}

/// Query assembled from filters
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StructuredQuery {
    pub filters: Vec<EqFilter>,
    pub order_by: Option<(String, SortOrder)>,
    pub limit: Option<u32>,
}

/// Raw SQL query with named parameters
#[derive(Debug, Clone, PartialEq)]
pub struct SqlQuery {
    pub text: String,
    pub parameters: Vec<(String, Value)>,
}

/// The two forms a query can take
#[derive(Debug, Clone, PartialEq)]
pub enum QueryBody {
    Structured(StructuredQuery),
    Sql(SqlQuery),
}

/// SQL text plus parameters, ready to hand to the SDK
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedQuery {
    pub text: String,
    pub parameters: Vec<(String, Value)>,
}

/// A query scoped to one logical partition
///
/// Builder calls that don't apply to the query's form (filters on raw SQL,
/// parameters on a structured query) are recorded and make rendering fail.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentQuery {
    partition_key: PartitionKeyValue,
    body: QueryBody,
    misuse: Option<String>,
}

impl DocumentQuery {
    /// Matches every document in the partition until filters are added
    pub fn in_partition(partition_key: PartitionKeyValue) -> Self {
        Self {
            partition_key,
            body: QueryBody::Structured(StructuredQuery::default()),
            misuse: None,
        }
    }

    /// Raw SQL against the container alias `c`
    pub fn sql(partition_key: PartitionKeyValue, text: impl Into<String>) -> Self {
        Self {
            partition_key,
            body: QueryBody::Sql(SqlQuery {
                text: text.into(),
                parameters: Vec::new(),
            }),
            misuse: None,
        }
    }

    /// Adds an equality filter; not allowed on raw SQL queries
    pub fn where_eq(mut self, path: impl Into<String>, value: impl Into<Value>) -> Self {
        match &mut self.body {
            QueryBody::Structured(q) => q.filters.push(EqFilter {
                path: path.into(),
                value: value.into(),
            }),
            QueryBody::Sql(_) => self.record_misuse("where_eq cannot be used with a raw SQL query"),
        }
        self
    }

    /// Sets the ordering; not allowed on raw SQL queries
    pub fn order_by(mut self, path: impl Into<String>, order: SortOrder) -> Self {
        match &mut self.body {
            QueryBody::Structured(q) => q.order_by = Some((path.into(), order)),
            QueryBody::Sql(_) => self.record_misuse("order_by cannot be used with a raw SQL query"),
        }
        self
    }

    /// Caps the number of returned documents; not allowed on raw SQL queries
    pub fn limit(mut self, limit: u32) -> Self {
        match &mut self.body {
            QueryBody::Structured(q) => q.limit = Some(limit),
            QueryBody::Sql(_) => self.record_misuse("limit cannot be used with a raw SQL query"),
        }
        self
    }

    /// Binds a named parameter (`@name`); only allowed on raw SQL queries
    pub fn with_parameter(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        match &mut self.body {
            QueryBody::Sql(q) => q.parameters.push((name.into(), value.into())),
            QueryBody::Structured(_) => {
                self.record_misuse("with_parameter can only be used with a raw SQL query")
            }
        }
        self
    }

    fn record_misuse(&mut self, message: &str) {
        if self.misuse.is_none() {
            self.misuse = Some(message.to_string());
        }
    }

    /// Fails if a builder call didn't apply to this query's form
    pub fn validate(&self) -> Result<()> {
        match &self.misuse {
            Some(message) => Err(DocBridgeError::Validation(message.clone())),
            None => Ok(()),
        }
    }

    pub fn partition_key(&self) -> &PartitionKeyValue {
        &self.partition_key
    }

    pub fn body(&self) -> &QueryBody {
        &self.body
    }

    /// Renders the `SELECT *` form
    pub fn to_sql(&self) -> Result<RenderedQuery> {
        self.validate()?;
        match &self.body {
            QueryBody::Structured(q) => {
                let (where_clause, parameters) = render_filters(&q.filters)?;
                let mut text = match q.limit {
                    Some(limit) => format!("SELECT TOP {limit} * FROM c"),
                    None => "SELECT * FROM c".to_string(),
                };
                text.push_str(&where_clause);
                if let Some((path, order)) = &q.order_by {
                    let direction = match order {
                        SortOrder::Ascending => "ASC",
                        SortOrder::Descending => "DESC",
                    };
                    text.push_str(&format!(" ORDER BY {} {direction}", render_path(path)?));
                }
                Ok(RenderedQuery { text, parameters })
            }
            QueryBody::Sql(q) => {
                validate_sql(q)?;
                Ok(RenderedQuery {
                    text: q.text.clone(),
                    parameters: q.parameters.clone(),
                })
            }
        }
    }

    /// Renders the `SELECT VALUE COUNT(1)` form
    ///
    /// Ordering and limits don't apply to counts. Raw SQL is wrapped as a
    /// subquery.
    pub fn to_count_sql(&self) -> Result<RenderedQuery> {
        self.validate()?;
        match &self.body {
            QueryBody::Structured(q) => {
                let (where_clause, parameters) = render_filters(&q.filters)?;
                Ok(RenderedQuery {
                    text: format!("SELECT VALUE COUNT(1) FROM c{where_clause}"),
                    parameters,
                })
            }
            QueryBody::Sql(q) => {
                validate_sql(q)?;
                Ok(RenderedQuery {
                    text: format!("SELECT VALUE COUNT(1) FROM ({}) q", q.text.trim()),
                    parameters: q.parameters.clone(),
                })
            }
        }
    }
}

fn validate_sql(q: &SqlQuery) -> Result<()> {
    if q.text.trim().is_empty() {
        return Err(DocBridgeError::Validation("Query text cannot be empty".to_string()));
    }
    if let Some((name, _)) = q.parameters.iter().find(|(name, _)| !name.starts_with('@')) {
        return Err(DocBridgeError::Validation(format!(
            "Query parameter '{name}' must start with '@'"
        )));
    }
    Ok(())
}

fn render_filters(filters: &[EqFilter]) -> Result<(String, Vec<(String, Value)>)> {
    if filters.is_empty() {
        return Ok((String::new(), Vec::new()));
    }

    let mut clauses = Vec::with_capacity(filters.len());
    let mut parameters = Vec::with_capacity(filters.len());
    for (i, filter) in filters.iter().enumerate() {
        let name = format!("@p{i}");
        clauses.push(format!("{} = {name}", render_path(&filter.path)?));
        parameters.push((name, filter.value.clone()));
    }

    Ok((format!(" WHERE {}", clauses.join(" AND ")), parameters))
}

/// Splits a dotted path into its segments
pub(crate) fn path_segments(path: &str) -> Result<Vec<&str>> {
    let segments: Vec<&str> = path.split('.').collect();
    if segments.iter().any(|s| s.is_empty()) {
        return Err(DocBridgeError::Validation(format!(
            "Invalid property path '{path}'"
        )));
    }
    Ok(segments)
}

/// Renders `a.b-c` as `c.a["b-c"]`
fn render_path(path: &str) -> Result<String> {
    let mut rendered = String::from("c");
    for segment in path_segments(path)? {
        if is_identifier(segment) {
            rendered.push('.');
            rendered.push_str(segment);
        } else {
            let escaped = segment.replace('\\', "\\\\").replace('"', "\\\"");
            rendered.push_str(&format!("[\"{escaped}\"]"));
        }
    }
    Ok(rendered)
}

fn is_identifier(segment: &str) -> bool {
    let mut chars = segment.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn pk() -> PartitionKeyValue {
        PartitionKeyValue::new("tenant-42").unwrap()
    }

    #[test]
    fn test_unfiltered_query() {
        let rendered = DocumentQuery::in_partition(pk()).to_sql().unwrap();
        assert_eq!(rendered.text, "SELECT * FROM c");
        assert!(rendered.parameters.is_empty());
    }

    #[test]
    fn test_filters_use_positional_parameters() {
        let rendered = DocumentQuery::in_partition(pk())
            .where_eq("status", "open")
            .where_eq("address.city", "Oslo")
            .where_eq("priority", 3)
            .to_sql()
            .unwrap();

        assert_eq!(
            rendered.text,
            "SELECT * FROM c WHERE c.status = @p0 AND c.address.city = @p1 AND c.priority = @p2"
        );
        assert_eq!(
            rendered.parameters,
            vec![
                ("@p0".to_string(), json!("open")),
                ("@p1".to_string(), json!("Oslo")),
                ("@p2".to_string(), json!(3)),
            ]
        );
    }

    #[test]
    fn test_non_identifier_segments_use_brackets() {
        let rendered = DocumentQuery::in_partition(pk())
            .where_eq("meta.first-name", "Ada")
            .where_eq("2fa", true)
            .where_eq("say\"hi", 1)
            .to_sql()
            .unwrap();

        assert_eq!(
            rendered.text,
            "SELECT * FROM c WHERE c.meta[\"first-name\"] = @p0 AND c[\"2fa\"] = @p1 AND c[\"say\\\"hi\"] = @p2"
        );
    }

    #[test]
    fn test_order_and_limit() {
        let rendered = DocumentQuery::in_partition(pk())
            .order_by("createdAt", SortOrder::Ascending)
            .limit(5)
            .to_sql()
            .unwrap();

        assert_eq!(rendered.text, "SELECT TOP 5 * FROM c ORDER BY c.createdAt ASC");
    }

    #[test]
    fn test_count_ignores_order_and_limit() {
        let rendered = DocumentQuery::in_partition(pk())
            .where_eq("status", "open")
            .order_by("createdAt", SortOrder::Descending)
            .limit(5)
            .to_count_sql()
            .unwrap();

        assert_eq!(rendered.text, "SELECT VALUE COUNT(1) FROM c WHERE c.status = @p0");
        assert_eq!(rendered.parameters.len(), 1);
    }

    #[test]
    fn test_invalid_path_rejected() {
        let result = DocumentQuery::in_partition(pk()).where_eq("a..b", 1).to_sql();
        assert!(matches!(result, Err(DocBridgeError::Validation(_))));

        let result = DocumentQuery::in_partition(pk()).where_eq("", 1).to_count_sql();
        assert!(result.is_err());
    }

    #[test]
    fn test_raw_sql_with_parameters() {
        let query = DocumentQuery::sql(pk(), "SELECT * FROM c WHERE c.total > @min")
            .with_parameter("@min", 100);

        let rendered = query.to_sql().unwrap();
        assert_eq!(rendered.text, "SELECT * FROM c WHERE c.total > @min");
        assert_eq!(rendered.parameters, vec![("@min".to_string(), json!(100))]);

        let count = query.to_count_sql().unwrap();
        assert_eq!(
            count.text,
            "SELECT VALUE COUNT(1) FROM (SELECT * FROM c WHERE c.total > @min) q"
        );
    }

    #[test]
    fn test_raw_sql_validation() {
        assert!(DocumentQuery::sql(pk(), "  ").to_sql().is_err());

        let result = DocumentQuery::sql(pk(), "SELECT * FROM c WHERE c.a = @a")
            .with_parameter("a", 1)
            .to_sql();
        assert!(result.is_err());
    }

    #[test]
    fn test_structured_builders_rejected_on_raw_sql() {
        let query = DocumentQuery::sql(pk(), "SELECT * FROM c").where_eq("status", "open");
        let err = query.to_sql().unwrap_err();
        assert!(matches!(err, DocBridgeError::Validation(_)));
        assert!(err.to_string().contains("where_eq"));

        let query = DocumentQuery::sql(pk(), "SELECT * FROM c")
            .order_by("total", SortOrder::Ascending)
            .limit(3);
        let err = query.to_count_sql().unwrap_err();
        assert!(err.to_string().contains("order_by"));
    }

    #[test]
    fn test_parameter_rejected_on_structured_query() {
        let query = DocumentQuery::in_partition(pk())
            .where_eq("status", "open")
            .with_parameter("@min", 100);

        assert!(matches!(query.validate(), Err(DocBridgeError::Validation(_))));
        assert!(query.to_sql().is_err());
        assert!(query.to_count_sql().is_err());
    }

    #[test]
    fn test_partition_key_accessor() {
        let query = DocumentQuery::in_partition(pk());
        assert_eq!(query.partition_key().as_str(), "tenant-42");
        assert!(matches!(query.body(), QueryBody::Structured(_)));
    }
}
