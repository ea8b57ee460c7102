use indexmap::IndexMap;

/// Canonical scalar kind a column is reduced to, independent of the native
/// MySQL type name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarKind {
    Integer,
    Float,
    String,
    Boolean,
}

/// Ordered column name -> canonical kind mapping for one table.
///
/// Recomputed per request; never cached across requests.
pub type TableSchema = IndexMap<String, ScalarKind>;

/// Fixed registry from a native column type token to its canonical kind.
///
/// Every type reported by introspection must resolve here; an unmapped token
/// is a configuration error, not a default.
pub fn column_kind(type_token: &str) -> Option<ScalarKind> {
    let kind = match type_token {
        "tinyint" | "smallint" | "mediumint" | "int" | "integer" | "bigint" | "year" => {
            ScalarKind::Integer
        }
        "float" | "double" | "real" => ScalarKind::Float,
        "varchar" | "char" | "tinytext" | "text" | "mediumtext" | "longtext" | "enum" => {
            ScalarKind::String
        }
        "binary" | "varbinary" | "tinyblob" | "blob" | "mediumblob" | "longblob" => {
            ScalarKind::String
        }
        "date" | "datetime" | "timestamp" => ScalarKind::String,
        "bool" | "boolean" => ScalarKind::Boolean,
        _ => return None,
    };
    Some(kind)
}

/// Extract the leading type token of a reported column type string,
/// e.g. "varchar(255)" -> "varchar", "int(11) unsigned" -> "int".
pub fn type_token(raw_type: &str) -> &str {
    let end = raw_type
        .find(|c: char| !c.is_ascii_alphanumeric() && c != '_')
        .unwrap_or(raw_type.len());
    &raw_type[..end]
}
