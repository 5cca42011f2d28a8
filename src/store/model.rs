//! Employee record types.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// A persisted employee record.
///
/// Either fully present or absent; there is no partial state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    /// Backend-assigned identifier, immutable after creation.
    pub id: i64,
    pub name: String,
    pub designation: String,
    pub salary: f64,
    /// Set once at creation.
    pub created_at: DateTime<Utc>,
    /// Set at creation, refreshed on every successful update.
    pub updated_at: DateTime<Utc>,
}

/// Decoded request body for create and update.
///
/// Absent fields take their zero value. On update a zero value means
/// "keep the stored value".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmployeePayload {
    #[serde(deserialize_with = "null_as_zero")]
    pub id: i64,
    #[serde(deserialize_with = "null_as_zero")]
    pub name: String,
    #[serde(deserialize_with = "null_as_zero")]
    pub designation: String,
    #[serde(deserialize_with = "null_as_zero")]
    pub salary: f64,
}

/// An explicit `null` reads the same as an absent field.
fn null_as_zero<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl EmployeePayload {
    /// Identifier requested for a new row, if any.
    pub fn requested_id(&self) -> Option<i64> {
        (self.id != 0).then_some(self.id)
    }

    /// Build the post-update record from the stored row and this patch.
    ///
    /// Zero-valued fields fall back to `stored`. The identifier and creation
    /// time always come from `stored`.
    pub fn merge_onto(&self, stored: &Employee, updated_at: DateTime<Utc>) -> Employee {
        Employee {
            id: stored.id,
            name: if self.name.is_empty() {
                stored.name.clone()
            } else {
                self.name.clone()
            },
            designation: if self.designation.is_empty() {
                stored.designation.clone()
            } else {
                self.designation.clone()
            },
            salary: if self.salary == 0.0 {
                stored.salary
            } else {
                self.salary
            },
            created_at: stored.created_at,
            updated_at,
        }
    }
}

/// Timestamp for an update that is strictly later than `previous`.
pub fn next_update_stamp(previous: DateTime<Utc>) -> DateTime<Utc> {
    let now = Utc::now();
    let floor = previous + Duration::microseconds(1);
    now.max(floor)
}

/// A window over the id-ordered employee list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub limit: i64,
    pub offset: i64,
}

impl Page {
    pub fn new(limit: i64, offset: i64) -> Self {
        Self { limit, offset }
    }

    /// A page that can never contain rows.
    pub fn is_empty_window(&self) -> bool {
        self.limit <= 0 || self.offset < 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stored() -> Employee {
        let at = Utc::now();
        Employee {
            id: 1,
            name: "Dan".into(),
            designation: "Software Developer".into(),
            salary: 23456.0,
            created_at: at,
            updated_at: at,
        }
    }

    #[test]
    fn merge_keeps_stored_values_for_zero_fields() {
        let original = stored();
        let patch = EmployeePayload {
            salary: 11111.0,
            ..Default::default()
        };
        let later = next_update_stamp(original.updated_at);

        let merged = patch.merge_onto(&original, later);

        assert_eq!(merged.id, 1);
        assert_eq!(merged.name, "Dan");
        assert_eq!(merged.designation, "Software Developer");
        assert_eq!(merged.salary, 11111.0);
        assert_eq!(merged.created_at, original.created_at);
        assert!(merged.updated_at > original.updated_at);
    }

    #[test]
    fn merge_ignores_patch_identifier() {
        let original = stored();
        let patch = EmployeePayload {
            id: 99,
            name: "Kiran".into(),
            ..Default::default()
        };

        let merged = patch.merge_onto(&original, Utc::now());

        assert_eq!(merged.id, 1);
        assert_eq!(merged.name, "Kiran");
        assert_eq!(patch.id, 99, "patch must not be modified");
    }

    #[test]
    fn update_stamp_is_strictly_increasing_even_for_future_previous() {
        let future = Utc::now() + Duration::seconds(60);
        assert!(next_update_stamp(future) > future);
    }

    #[test]
    fn payload_defaults_absent_fields() {
        let payload: EmployeePayload = serde_json::from_str(r#"{"salary": 11111.0}"#).unwrap();
        assert_eq!(payload.name, "");
        assert_eq!(payload.requested_id(), None);
        assert_eq!(payload.salary, 11111.0);
    }

    #[test]
    fn null_fields_read_as_zero_and_merge_to_stored() {
        let patch: EmployeePayload =
            serde_json::from_str(r#"{"id":null,"name":null,"designation":"Lead","salary":null}"#)
                .unwrap();
        assert_eq!(patch.id, 0);
        assert_eq!(patch.name, "");
        assert_eq!(patch.salary, 0.0);

        let original = stored();
        let merged = patch.merge_onto(&original, Utc::now());
        assert_eq!(merged.name, "Dan");
        assert_eq!(merged.designation, "Lead");
        assert_eq!(merged.salary, 23456.0);
    }

    #[test]
    fn employee_serializes_camel_case_timestamps() {
        let value = serde_json::to_value(stored()).unwrap();
        assert!(value.get("createdAt").is_some());
        assert!(value.get("updatedAt").is_some());
        assert_eq!(value["designation"], "Software Developer");
    }

    #[test]
    fn empty_windows() {
        assert!(Page::new(0, 0).is_empty_window());
        assert!(Page::new(-1, 0).is_empty_window());
        assert!(Page::new(10, -5).is_empty_window());
        assert!(!Page::new(10, 0).is_empty_window());
    }
}
