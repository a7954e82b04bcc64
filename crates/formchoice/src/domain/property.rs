//! Property-path expressions.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::errors::AccessError;

/// A dotted property path such as `owner.name` or `tags[0]`.
///
/// The text is kept verbatim and only split into segments when evaluated, so a path that cannot
/// be applied surfaces as an evaluation failure rather than a construction failure.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PropertyPath(String);

impl PropertyPath {
    pub fn new(expression: impl Into<String>) -> Self {
        Self(expression.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Split the expression into the keys to follow, in order.
    ///
    /// `items[2].name` and `items.2.name` produce the same segments. Segments are taken
    /// literally; a key such as `-1` is just a key.
    pub fn segments(&self) -> Result<Vec<&str>, AccessError> {
        let invalid = || AccessError::InvalidPath(self.0.clone());
        let mut segments = Vec::new();

        for part in self.0.split('.') {
            let (head, mut rest) = match part.find('[') {
                Some(pos) => part.split_at(pos),
                None => (part, ""),
            };
            let head = head.trim();
            if head.is_empty() {
                return Err(invalid());
            }
            segments.push(head);

            while !rest.is_empty() {
                let close = rest.find(']').ok_or_else(invalid)?;
                let key = rest[1..close].trim();
                if key.is_empty() {
                    return Err(invalid());
                }
                segments.push(key);
                rest = &rest[close + 1..];
                if !rest.is_empty() && !rest.starts_with('[') {
                    return Err(invalid());
                }
            }
        }

        Ok(segments)
    }
}

impl fmt::Display for PropertyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PropertyPath {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for PropertyPath {
    fn from(value: String) -> Self {
        Self(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_dotted_and_indexed_segments() {
        let path = PropertyPath::new("owner.tags[1].label");
        assert_eq!(path.segments().unwrap(), vec!["owner", "tags", "1", "label"]);

        let dotted = PropertyPath::new("owner.tags.1.label");
        assert_eq!(dotted.segments().unwrap(), path.segments().unwrap());
    }

    #[test]
    fn keeps_negative_keys_verbatim() {
        let path = PropertyPath::new("codes.-1");
        assert_eq!(path.segments().unwrap(), vec!["codes", "-1"]);
    }

    #[test]
    fn rejects_malformed_paths() {
        for broken in ["", "a..b", "a[", "a[]", "a[0]b", ".a"] {
            assert!(
                matches!(
                    PropertyPath::new(broken).segments(),
                    Err(AccessError::InvalidPath(_))
                ),
                "{broken} should be rejected"
            );
        }
    }
}
