use bibliotheca_core::{Group, Project, User};
use proptest::prelude::*;
use serde_json::{Map, Value};

fn extra_fields() -> impl Strategy<Value = Map<String, Value>> {
    proptest::collection::btree_map("x[a-zA-Z0-9]{1,12}", "[a-z0-9 ]{0,16}", 0..6).prop_map(
        |entries| {
            entries
                .into_iter()
                .map(|(key, value)| (key, Value::String(value)))
                .collect()
        },
    )
}

proptest! {
    #[test]
    fn unknown_project_fields_survive(extra in extra_fields(), name in "[a-z]{1,10}") {
        let mut object = extra.clone();
        object.insert("name".to_string(), Value::String(name.clone()));
        let project: Project = serde_json::from_value(Value::Object(object.clone())).expect("project");
        prop_assert_eq!(project.name.as_deref(), Some(name.as_str()));
        prop_assert_eq!(&project.extra, &extra);
        prop_assert_eq!(serde_json::to_value(&project).expect("serialize"), Value::Object(object));
    }

    #[test]
    fn unknown_user_and_group_fields_survive(extra in extra_fields()) {
        let user: User = serde_json::from_value(Value::Object(extra.clone())).expect("user");
        prop_assert_eq!(serde_json::to_value(&user).expect("serialize"), Value::Object(extra.clone()));

        let group: Group = serde_json::from_value(Value::Object(extra.clone())).expect("group");
        prop_assert_eq!(serde_json::to_value(&group).expect("serialize"), Value::Object(extra));
    }
}
