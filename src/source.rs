//! Employee and zone loaders.
//!
//! A run needs two independent reads: employees with roles and
//! availability, and zones with weekday requirements. They touch
//! disjoint data, so the service issues them concurrently.
//!
//! # Implementations
//!
//! | Source | Backing store |
//! |--------|---------------|
//! | [`InMemorySource`] | Per-organization maps, for tests and embedding |
//! | [`JsonDirectorySource`] | `<root>/<org>/employees.json` and `<root>/<org>/zones.json` |

use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::future::Future;
use std::path::{Path, PathBuf};

use crate::error::SourceError;
use crate::models::{Employee, Zone};

/// Supplies employees for an organization.
pub trait AvailabilitySource: Send + Sync {
    /// Loads every employee with roles and weekly availability.
    fn load_employees(
        &self,
        organization_id: &str,
    ) -> impl Future<Output = Result<Vec<Employee>, SourceError>> + Send;
}

/// Supplies zones for an organization.
pub trait RequirementSource: Send + Sync {
    /// Loads every zone with its weekday requirements.
    fn load_zones(
        &self,
        organization_id: &str,
    ) -> impl Future<Output = Result<Vec<Zone>, SourceError>> + Send;
}

/// In-memory source keyed by organization ID.
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    employees: HashMap<String, Vec<Employee>>,
    zones: HashMap<String, Vec<Zone>>,
}

impl InMemorySource {
    /// Creates an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an organization's employees and zones.
    pub fn with_organization(
        mut self,
        organization_id: impl Into<String>,
        employees: Vec<Employee>,
        zones: Vec<Zone>,
    ) -> Self {
        let organization_id = organization_id.into();
        self.employees.insert(organization_id.clone(), employees);
        self.zones.insert(organization_id, zones);
        self
    }
}

fn unknown(organization_id: &str) -> SourceError {
    SourceError::UnknownOrganization {
        organization_id: organization_id.to_string(),
    }
}

impl AvailabilitySource for InMemorySource {
    async fn load_employees(&self, organization_id: &str) -> Result<Vec<Employee>, SourceError> {
        self.employees
            .get(organization_id)
            .cloned()
            .ok_or_else(|| unknown(organization_id))
    }
}

impl RequirementSource for InMemorySource {
    async fn load_zones(&self, organization_id: &str) -> Result<Vec<Zone>, SourceError> {
        self.zones
            .get(organization_id)
            .cloned()
            .ok_or_else(|| unknown(organization_id))
    }
}

/// Reads JSON arrays from one directory per organization.
///
/// ```text
/// <root>/
///   org-1/
///     employees.json   # [Employee, ...]
///     zones.json       # [Zone, ...]
/// ```
#[derive(Debug, Clone)]
pub struct JsonDirectorySource {
    root: PathBuf,
}

impl JsonDirectorySource {
    const EMPLOYEES_FILE: &'static str = "employees.json";
    const ZONES_FILE: &'static str = "zones.json";

    /// Creates a source rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory for an organization. IDs that are not a single plain
    /// path component are rejected.
    fn organization_dir(&self, organization_id: &str) -> Result<PathBuf, SourceError> {
        let plain = !organization_id.is_empty()
            && organization_id != "."
            && organization_id != ".."
            && !organization_id.contains(['/', '\\']);
        if !plain {
            return Err(unknown(organization_id));
        }
        Ok(self.root.join(organization_id))
    }

    async fn read_json<T: DeserializeOwned>(
        &self,
        organization_id: &str,
        file: &str,
    ) -> Result<T, SourceError> {
        let dir = self.organization_dir(organization_id)?;
        let exists = tokio::fs::try_exists(&dir)
            .await
            .map_err(|source| SourceError::Io {
                path: dir.display().to_string(),
                source,
            })?;
        if !exists {
            return Err(unknown(organization_id));
        }

        let path = dir.join(file);
        tracing::debug!(path = %path.display(), "reading roster data");
        let bytes = tokio::fs::read(&path).await.map_err(|source| SourceError::Io {
            path: path.display().to_string(),
            source,
        })?;
        serde_json::from_slice(&bytes).map_err(|source| SourceError::Decode {
            path: path.display().to_string(),
            source,
        })
    }
}

impl AvailabilitySource for JsonDirectorySource {
    async fn load_employees(&self, organization_id: &str) -> Result<Vec<Employee>, SourceError> {
        self.read_json(organization_id, Self::EMPLOYEES_FILE).await
    }
}

impl RequirementSource for JsonDirectorySource {
    async fn load_zones(&self, organization_id: &str) -> Result<Vec<Zone>, SourceError> {
        self.read_json(organization_id, Self::ZONES_FILE).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Weekday, ZoneRequirement};
    use chrono::NaiveTime;

    fn hm(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[tokio::test]
    async fn test_in_memory_returns_registered_data() {
        let source = InMemorySource::new().with_organization(
            "org-1",
            vec![Employee::new("E1").with_role("server")],
            vec![Zone::new("Z1").with_requirement(ZoneRequirement::new(
                Weekday::Monday,
                "server",
                1,
                hm(9, 0),
                hm(17, 0),
            ))],
        );

        let employees = source.load_employees("org-1").await.unwrap();
        let zones = source.load_zones("org-1").await.unwrap();
        assert_eq!(employees.len(), 1);
        assert_eq!(zones[0].requirements.len(), 1);
    }

    #[tokio::test]
    async fn test_in_memory_unknown_organization() {
        let source = InMemorySource::new();
        let err = source.load_employees("nope").await.unwrap_err();
        assert!(matches!(err, SourceError::UnknownOrganization { .. }));
    }

    #[tokio::test]
    async fn test_json_directory_reads_both_files() {
        let dir = tempfile::tempdir().unwrap();
        let org = dir.path().join("org-1");
        std::fs::create_dir(&org).unwrap();
        std::fs::write(
            org.join("employees.json"),
            r#"[{"id": "E1", "roles": ["server"], "availability": [
                {"day_of_week": "Monday", "start_time": "09:00:00",
                 "end_time": "17:00:00", "can_work": true}
            ]}]"#,
        )
        .unwrap();
        std::fs::write(
            org.join("zones.json"),
            r#"[{"id": "Z1", "name": "Patio", "requirements": [
                {"day_of_week": "Monday", "role": "server", "required_count": 2,
                 "shift_start": "09:00:00", "shift_end": "17:00:00"}
            ]}]"#,
        )
        .unwrap();

        let source = JsonDirectorySource::new(dir.path());
        let employees = source.load_employees("org-1").await.unwrap();
        let zones = source.load_zones("org-1").await.unwrap();
        assert_eq!(employees[0].id, "E1");
        assert_eq!(zones[0].name, "Patio");
        assert_eq!(zones[0].requirements[0].required_count, 2);
    }

    #[tokio::test]
    async fn test_json_directory_missing_org() {
        let dir = tempfile::tempdir().unwrap();
        let source = JsonDirectorySource::new(dir.path());
        let err = source.load_zones("org-404").await.unwrap_err();
        assert!(matches!(err, SourceError::UnknownOrganization { .. }));
    }

    #[tokio::test]
    async fn test_json_directory_unreadable_root_is_io() {
        // A regular file as the root makes the organization lookup fail
        // with "not a directory", which is not the same as a missing org.
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("roster-data");
        std::fs::write(&root, "").unwrap();

        let source = JsonDirectorySource::new(&root);
        let err = source.load_employees("org-1").await.unwrap_err();
        assert!(matches!(err, SourceError::Io { .. }), "{err:?}");
    }

    #[tokio::test]
    async fn test_json_directory_rejects_path_traversal() {
        let dir = tempfile::tempdir().unwrap();
        let source = JsonDirectorySource::new(dir.path());
        for id in ["..", "a/b", "", "."] {
            let err = source.load_employees(id).await.unwrap_err();
            assert!(matches!(err, SourceError::UnknownOrganization { .. }), "{id}");
        }
    }

    #[tokio::test]
    async fn test_json_directory_malformed_and_missing_files() {
        let dir = tempfile::tempdir().unwrap();
        let org = dir.path().join("org-1");
        std::fs::create_dir(&org).unwrap();
        std::fs::write(org.join("employees.json"), "{not json").unwrap();

        let source = JsonDirectorySource::new(dir.path());
        let err = source.load_employees("org-1").await.unwrap_err();
        assert!(matches!(err, SourceError::Decode { .. }));

        let err = source.load_zones("org-1").await.unwrap_err();
        assert!(matches!(err, SourceError::Io { .. }));
    }
}
