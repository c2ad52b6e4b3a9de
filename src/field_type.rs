use serde::{Deserialize, Serialize};
use std::fmt;

/// Datatype resolved for a profiled column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DataType {
    /// Every non-missing value is a base-10 integer.
    #[serde(rename = "integer")]
    Integer,
    /// Every non-missing value is numeric, at least one is not an integer.
    #[serde(rename = "decimal")]
    Decimal,
    /// Every non-missing value is a recognised boolean spelling.
    #[serde(rename = "boolean")]
    Boolean,
    /// Every non-missing value parses as a date or date-time.
    #[serde(rename = "dateTime")]
    DateTime,
    /// Fallback.
    #[default]
    #[serde(rename = "string")]
    String,
}

impl DataType {
    /// XML Schema namespace the datatypes live in.
    pub const XSD_NAMESPACE: &'static str = "http://www.w3.org/2001/XMLSchema#";

    /// The XSD local name (`integer`, `decimal`, `boolean`, `dateTime`, `string`).
    pub const fn xsd_name(&self) -> &'static str {
        match self {
            DataType::Integer => "integer",
            DataType::Decimal => "decimal",
            DataType::Boolean => "boolean",
            DataType::DateTime => "dateTime",
            DataType::String => "string",
        }
    }

    /// Full XSD datatype IRI.
    pub fn xsd_iri(&self) -> String {
        format!("{}{}", Self::XSD_NAMESPACE, self.xsd_name())
    }

    /// Returns true for integer and decimal.
    #[inline]
    pub fn is_numeric(&self) -> bool {
        matches!(self, DataType::Integer | DataType::Decimal)
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.xsd_name())
    }
}

/// Inferred semantic role of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Near-unique values identifying a record.
    Identifier,
    /// Numeric observations.
    Measure,
    /// Low-cardinality or boolean categories.
    Dimension,
    /// Anything else.
    #[default]
    Attribute,
}

impl Role {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Role::Identifier => "identifier",
            Role::Measure => "measure",
            Role::Dimension => "dimension",
            Role::Attribute => "attribute",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}
