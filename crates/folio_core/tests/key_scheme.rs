use folio_core::{
    make_item_key, make_tree_key, AnyItemKey, CacheKey, ContentType, ItemKey, Note, Task,
};
use proptest::prelude::*;
use std::collections::HashMap;

fn content_type() -> impl Strategy<Value = ContentType> {
    prop::sample::select(ContentType::ALL.to_vec())
}

proptest! {
    #[test]
    fn item_keys_are_structurally_equal(kind in content_type(), id in ".*") {
        prop_assert_eq!(make_item_key(kind, id.clone()), make_item_key(kind, id));
    }

    #[test]
    fn item_keys_differ_when_any_field_differs(
        kind in content_type(),
        other_kind in content_type(),
        id in "[a-z0-9-]{0,12}",
        other_id in "[a-z0-9-]{0,12}",
    ) {
        prop_assume!(kind != other_kind || id != other_id);
        prop_assert_ne!(make_item_key(kind, id), make_item_key(other_kind, other_id));
    }

    #[test]
    fn tree_type_is_content_type_plus_tree(kind in content_type(), project_id in ".*") {
        let key = make_tree_key(kind, project_id);
        prop_assert_eq!(key.type_tag().to_string(), format!("{}Tree", kind.as_str()));
        prop_assert_eq!(ContentType::from_tree_tag(key.type_tag()), Some(kind));
    }

    #[test]
    fn wire_shape_round_trips(kind in content_type(), id in "\\PC*") {
        let key = make_item_key(kind, id);
        let json = serde_json::to_value(&key).unwrap();
        prop_assert!(json["type"] == kind.as_str());
        let decoded: AnyItemKey = serde_json::from_value(json).unwrap();
        prop_assert_eq!(decoded, key);
    }
}

#[test]
fn equal_keys_address_the_same_cache_entry() {
    let mut cache = HashMap::new();
    cache.insert(CacheKey::from(make_item_key(Note, "n-1")), "first");
    cache.insert(CacheKey::from(make_item_key(ContentType::Note, "n-1")), "second");

    assert_eq!(cache.len(), 1);
    assert_eq!(
        cache.get(&CacheKey::from(make_item_key(Note, "n-1"))),
        Some(&"second")
    );
}

#[test]
fn narrowed_keys_accept_only_their_kind() {
    fn task_id(key: &ItemKey<Task>) -> &str {
        key.id()
    }

    let erased = make_item_key(ContentType::Task, "t-1");
    let narrowed = erased.narrow::<Task>().expect("task key narrows to Task");
    assert_eq!(task_id(&narrowed), "t-1");
    assert!(make_item_key(ContentType::Note, "t-1")
        .narrow::<Task>()
        .is_none());
}

#[test]
fn tree_keys_serialize_with_derived_type() {
    let json = serde_json::to_value(make_tree_key(Task, "p-7")).unwrap();
    assert_eq!(json["type"], "taskTree");
    assert_eq!(json["projectId"], "p-7");
}
