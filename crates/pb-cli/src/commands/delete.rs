use anyhow::{Context, bail};
use pb_core::wire::DeleteRequest;
use serde_json::json;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::{DeleteArgs, DeleteObject};
use crate::context::AppContext;
use crate::output::output;

/// Handle `playbook delete`.
pub async fn handle(args: &DeleteArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let request = build_request(args.object, &args.name, args.parent.as_deref())?;
    if !args.yes {
        bail!(
            "refusing to delete {} '{}' without --yes",
            request.object_label(),
            request.name()
        );
    }

    ctx.client
        .delete(&request)
        .await
        .with_context(|| format!("failed to delete {} '{}'", request.object_label(), request.name()))?;

    output(
        &json!({
            "result": "deleted",
            "object": request.object_label(),
            "name": request.name(),
            "parent": args.parent,
        }),
        flags.format,
    )
}

fn build_request(object: DeleteObject, name: &str, parent: Option<&str>) -> anyhow::Result<DeleteRequest> {
    let name = name.to_string();
    if object == DeleteObject::Project {
        return Ok(DeleteRequest::Project { name });
    }

    let Some(parent) = parent.filter(|parent| !parent.is_empty()).map(str::to_string) else {
        bail!("--parent is required when deleting anything but a project");
    };

    Ok(match object {
        DeleteObject::Project => DeleteRequest::Project { name },
        DeleteObject::Feature => DeleteRequest::Feature {
            name,
            project: parent,
        },
        DeleteObject::AbuserStory => DeleteRequest::AbuserStory {
            name,
            feature: parent,
        },
        DeleteObject::Scenario => DeleteRequest::Scenario {
            name,
            abuser_story: parent,
        },
        DeleteObject::Test => DeleteRequest::TestCase {
            name,
            scenario: parent,
        },
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn project_needs_no_parent() {
        assert_eq!(
            build_request(DeleteObject::Project, "web", None).unwrap(),
            DeleteRequest::Project { name: "web".into() }
        );
    }

    #[test]
    fn children_need_a_parent() {
        for object in [
            DeleteObject::Feature,
            DeleteObject::AbuserStory,
            DeleteObject::Scenario,
            DeleteObject::Test,
        ] {
            assert!(build_request(object, "x", None).is_err());
            assert!(build_request(object, "x", Some("")).is_err());
        }
    }

    #[test]
    fn parent_lands_in_the_matching_field() {
        assert_eq!(
            build_request(DeleteObject::Scenario, "no-lockout", Some("brute-force")).unwrap(),
            DeleteRequest::Scenario {
                name: "no-lockout".into(),
                abuser_story: "brute-force".into(),
            }
        );
        assert_eq!(
            build_request(DeleteObject::Test, "attempt-1000-logins", Some("no-lockout")).unwrap(),
            DeleteRequest::TestCase {
                name: "attempt-1000-logins".into(),
                scenario: "no-lockout".into(),
            }
        );
    }
}
