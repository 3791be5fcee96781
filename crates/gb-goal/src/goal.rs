// goal.rs — Goal: the single record type tracked by goalboard.
//
// A goal always carries an `id` and a `title`. Any other JSON fields a
// client sends are kept in `extra` and shallow-merged on update, so the
// wire shape stays open (`{"id":1,"title":"x","due":"friday"}`).
//
// The id belongs to the server. An `id` key in a request body never
// reaches a stored record.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Identifier of a goal, unique within one store.
pub type GoalId = u64;

/// A stored goal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    pub id: GoalId,

    pub title: String,

    /// Caller-supplied fields beyond `id` and `title`.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Goal {
    /// Build a goal with only an id and a title.
    pub fn new(id: GoalId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            extra: Map::new(),
        }
    }

    /// Build a stored goal from a create request.
    pub(crate) fn from_new(id: GoalId, new: NewGoal) -> Self {
        Self {
            id,
            title: new.title,
            extra: without_id(new.extra),
        }
    }

    /// Shallow-merge a patch: keys present in the patch overwrite, the rest
    /// stay as they were.
    pub fn apply(&mut self, patch: GoalPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        for (key, value) in without_id(patch.extra) {
            self.extra.insert(key, value);
        }
    }
}

/// Body of a create request. `title` must be present.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewGoal {
    pub title: String,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl NewGoal {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            extra: Map::new(),
        }
    }
}

/// Body of an update request. Every field is optional; absent fields are
/// left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GoalPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl GoalPatch {
    /// A patch that only changes the title.
    pub fn title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            extra: Map::new(),
        }
    }
}

/// The goals a fresh store starts with.
pub fn default_seed() -> Vec<Goal> {
    vec![
        Goal::new(1, "Learn Express"),
        Goal::new(2, "Build a CRUD API"),
    ]
}

fn without_id(mut fields: Map<String, Value>) -> Map<String, Value> {
    fields.remove("id");
    fields
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn serializes_extra_fields_inline() {
        let mut goal = Goal::new(7, "Ship it");
        goal.extra.insert("due".into(), json!("friday"));

        let value = serde_json::to_value(&goal).unwrap();
        assert_eq!(value, json!({"id": 7, "title": "Ship it", "due": "friday"}));
    }

    #[test]
    fn new_goal_requires_title() {
        let result = serde_json::from_value::<NewGoal>(json!({"due": "friday"}));
        assert!(result.is_err());
    }

    #[test]
    fn new_goal_id_is_dropped() {
        let new: NewGoal = serde_json::from_value(json!({"id": 99, "title": "x"})).unwrap();
        let goal = Goal::from_new(5, new);

        assert_eq!(goal.id, 5);
        assert!(goal.extra.is_empty());
        assert_eq!(serde_json::to_value(&goal).unwrap(), json!({"id": 5, "title": "x"}));
    }

    #[test]
    fn apply_only_touches_supplied_fields() {
        let mut goal = Goal::new(1, "Old");
        goal.extra.insert("priority".into(), json!(2));
        goal.extra.insert("note".into(), json!("keep"));

        let patch: GoalPatch = serde_json::from_value(json!({"priority": 5})).unwrap();
        goal.apply(patch);

        assert_eq!(goal.title, "Old");
        assert_eq!(goal.extra["priority"], json!(5));
        assert_eq!(goal.extra["note"], json!("keep"));
    }

    #[test]
    fn apply_ignores_id_in_patch() {
        let mut goal = Goal::new(1, "Old");
        let patch: GoalPatch =
            serde_json::from_value(json!({"id": 42, "title": "New"})).unwrap();
        goal.apply(patch);

        assert_eq!(goal.id, 1);
        assert_eq!(goal.title, "New");
        assert!(!goal.extra.contains_key("id"));
    }

    #[test]
    fn null_title_in_patch_leaves_title() {
        let mut goal = Goal::new(1, "Keep");
        let patch: GoalPatch = serde_json::from_value(json!({"title": null})).unwrap();
        goal.apply(patch);
        assert_eq!(goal.title, "Keep");
    }
}
