//! Employee model and identifier handling.
//!
//! The employee directory is owned by the backend; this crate only reads it
//! to populate the selector and to resolve display names.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// An opaque employee identifier.
///
/// The backend sometimes sends identifiers as JSON numbers and sometimes as
/// strings; both decode to the same textual form so that `7` and `"7"`
/// compare equal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct EmployeeId(String);

impl EmployeeId {
    /// Creates an identifier from its textual form.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into().trim().to_string())
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if no employee is identified.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Reads an identifier from an arbitrary JSON value.
    ///
    /// Strings and numbers are read directly. A populated reference object
    /// yields its `_id` (or `id`). Anything else, and blank strings, give
    /// `None`.
    pub fn from_value(value: &Value) -> Option<Self> {
        let id = match value {
            Value::String(s) => EmployeeId::new(s.as_str()),
            Value::Number(n) => match (n.as_u64(), n.as_i64(), n.as_f64()) {
                (Some(u), _, _) => EmployeeId(u.to_string()),
                (_, Some(i), _) => EmployeeId(i.to_string()),
                (_, _, Some(f)) => EmployeeId(f.to_string()),
                _ => return None,
            },
            Value::Object(map) => {
                return map
                    .get("_id")
                    .or_else(|| map.get("id"))
                    .filter(|inner| !inner.is_object())
                    .and_then(EmployeeId::from_value);
            }
            _ => return None,
        };
        (!id.is_empty()).then_some(id)
    }
}

impl fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EmployeeId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for EmployeeId {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<u64> for EmployeeId {
    fn from(value: u64) -> Self {
        Self(value.to_string())
    }
}

impl<'de> Deserialize<'de> for EmployeeId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Unsigned(u64),
            Signed(i64),
            Float(f64),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Text(s) => EmployeeId::new(s),
            Raw::Unsigned(n) => EmployeeId(n.to_string()),
            Raw::Signed(n) => EmployeeId(n.to_string()),
            Raw::Float(n) => EmployeeId(n.to_string()),
        })
    }
}

/// An employee as returned by the directory endpoint.
///
/// Name fields vary between directory sources, so all of them are optional
/// and [`Employee::display_name`] picks the first usable one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    /// Unique identifier for the employee.
    #[serde(alias = "_id")]
    pub id: EmployeeId,
    /// Preferred display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Full legal name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    /// Given name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    /// Family name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
}

impl Employee {
    /// Creates an employee with only a display name.
    pub fn named(id: impl Into<EmployeeId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: Some(name.into()),
            full_name: None,
            first_name: None,
            last_name: None,
        }
    }

    /// Resolves the display name.
    ///
    /// Tries `name`, then `fullName`, then `firstName lastName`; the first
    /// non-blank candidate wins. Falls back to the identifier.
    ///
    /// # Examples
    ///
    /// ```
    /// use plexus_evaluations::models::{Employee, EmployeeId};
    ///
    /// let employee = Employee {
    ///     id: EmployeeId::new("E1"),
    ///     name: Some("  ".to_string()),
    ///     full_name: None,
    ///     first_name: Some("Grace".to_string()),
    ///     last_name: Some("Hopper".to_string()),
    /// };
    /// assert_eq!(employee.display_name(), "Grace Hopper");
    /// ```
    pub fn display_name(&self) -> String {
        let joined = [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ");

        [self.name.as_deref(), self.full_name.as_deref(), Some(joined.as_str())]
            .into_iter()
            .flatten()
            .map(str::trim)
            .find(|candidate| !candidate.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| self.id.to_string())
    }
}
