//! Field lookup utilities
//!
//! Navigates nested records using dotted paths with optional array
//! indexing, e.g. `user.profile.email`, `items[0].price` or
//! `items.0.price`. Lookup is total: an unresolved path yields `None`,
//! never an error.

use verdict_core::{Record, Value};

/// One segment of a parsed field path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    /// Object key
    Key(String),
    /// Array index
    Index(usize),
}

/// Parse a dotted field path into segments.
///
/// `[n]` suffixes and bare numeric segments both become indexes, so
/// `items[0].price` and `items.0.price` are equivalent.
pub fn parse_path(path: &str) -> Vec<PathSegment> {
    let mut segments = Vec::new();
    for part in path.split('.') {
        if part.is_empty() {
            continue;
        }
        let mut rest = part;
        // Leading key before any bracket
        if let Some(bracket) = rest.find('[') {
            let key = &rest[..bracket];
            if !key.is_empty() {
                segments.push(PathSegment::Key(key.to_string()));
            }
            rest = &rest[bracket..];
            while let Some(close) = rest.find(']') {
                let inner = &rest[1..close];
                if let Ok(ix) = inner.parse::<usize>() {
                    segments.push(PathSegment::Index(ix));
                } else {
                    segments.push(PathSegment::Key(inner.to_string()));
                }
                rest = &rest[close + 1..];
                if !rest.starts_with('[') {
                    break;
                }
            }
        } else if let Ok(ix) = rest.parse::<usize>() {
            segments.push(PathSegment::Index(ix));
        } else {
            segments.push(PathSegment::Key(rest.to_string()));
        }
    }
    segments
}

/// Look up a field in a record.
///
/// Returns `None` when any part of the path is absent, indexes out of
/// bounds, or a segment is applied to an incompatible value. A present
/// field holding `null` is found (it exists), distinct from an absent one.
pub fn lookup_field<'a>(record: &'a Record, path: &str) -> Option<&'a Value> {
    let segments = parse_path(path);
    let (first, rest) = segments.split_first()?;

    let mut current = match first {
        PathSegment::Key(key) => record.get(key)?,
        // Records are keyed objects; a leading index never resolves
        PathSegment::Index(_) => return None,
    };

    for segment in rest {
        current = match (segment, current) {
            (PathSegment::Key(key), Value::Object(map)) => map.get(key)?,
            (PathSegment::Index(ix), Value::Array(items)) => items.get(*ix)?,
            // Numeric keys double as indexes when the value is an array
            (PathSegment::Index(ix), Value::Object(map)) => map.get(&ix.to_string())?,
            _ => return None,
        };
    }
    Some(current)
}
