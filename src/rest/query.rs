//! Parameterized SQL queries.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A SQL query with named parameters, sent as `application/query+json`.
///
/// # Example
///
/// ```rust
/// use cosmosdb::rest::Query;
///
/// let query = Query::new("SELECT * FROM people WHERE people.surname = @surname")
///     .parameter("@surname", "Minter");
///
/// let body = serde_json::to_value(&query).unwrap();
/// assert_eq!(body["parameters"][0]["name"], "@surname");
/// assert_eq!(body["parameters"][0]["value"], "Minter");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Query {
    /// The query text.
    pub query: String,
    /// Values bound to `@name` placeholders in the text.
    #[serde(default)]
    pub parameters: Vec<Parameter>,
}

/// One named query parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    /// The placeholder, including its leading `@`.
    pub name: String,
    /// The bound value.
    pub value: Value,
}

impl Query {
    /// Creates a query without parameters.
    #[must_use]
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            parameters: Vec::new(),
        }
    }

    /// Binds `value` to the placeholder `name`.
    #[must_use]
    pub fn parameter(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.parameters.push(Parameter {
            name: name.into(),
            value: value.into(),
        });
        self
    }
}

impl From<&str> for Query {
    fn from(query: &str) -> Self {
        Self::new(query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_query_without_parameters_serializes_empty_list() {
        let body = serde_json::to_value(Query::from("SELECT * FROM root")).unwrap();
        assert_eq!(body, json!({"query": "SELECT * FROM root", "parameters": []}));
    }

    #[test]
    fn test_parameters_keep_order_and_type() {
        let query = Query::new("SELECT * FROM c WHERE c.age > @age AND c.city = @city")
            .parameter("@age", 30)
            .parameter("@city", "Dublin");

        assert_eq!(query.parameters.len(), 2);
        assert_eq!(query.parameters[0].value, json!(30));
        assert_eq!(query.parameters[1].name, "@city");
    }
}
