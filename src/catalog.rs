//! Built-in Shortcut resources.

use serde_json::{Map, Value};

use crate::error::ContextError;
use crate::resource::{context_from_field, ResourceDefinition};

/// Path parameter filled from a project record.
pub const PROJECT_PUBLIC_ID: &str = "project-public-id";

fn project_context(record: &Value) -> Result<Map<String, Value>, ContextError> {
    context_from_field("projects", record, "id", PROJECT_PUBLIC_ID)
}

/// All Shortcut v3 resources, in registration order.
pub fn shortcut_resources() -> Vec<ResourceDefinition> {
    vec![
        ResourceDefinition::new("categories", "/api/v3/categories"),
        ResourceDefinition::new("epics", "/api/v3/epics"),
        ResourceDefinition::new("files", "/api/v3/files"),
        ResourceDefinition::new("groups", "/api/v3/groups"),
        ResourceDefinition::new("iterations", "/api/v3/iterations"),
        ResourceDefinition::new("labels", "/api/v3/labels"),
        ResourceDefinition::new("members", "/api/v3/members").with_nullable_fields(["replaced_by"]),
        ResourceDefinition::new("milestones", "/api/v3/milestones"),
        ResourceDefinition::new("projects", "/api/v3/projects").with_child_context(project_context),
        ResourceDefinition::new(
            "project_stories",
            "/api/v3/projects/{project-public-id}/stories",
        )
        .with_parent("projects"),
        ResourceDefinition::new("repositories", "/api/v3/repositories"),
        ResourceDefinition::new("workflows", "/api/v3/workflows"),
    ]
}
