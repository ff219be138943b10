//! End-to-end store scenarios.

use paramstore::{ParameterState, ParameterStore, Tree, Value, WriteRejected, castable_enum};
use pretty_assertions::assert_eq;
use serde_json::json;
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

castable_enum! {
    pub enum Quality as "quality" {
        Low = 0 => "low",
        Medium = 1 => "medium",
        High = 2 => "high",
    }
}

fn basic() -> ParameterStore {
    ParameterStore::from_json(r#"{"a": 100, "b": 2.5, "s": "222", "sx": "Test"}"#).unwrap()
}

#[test]
fn reads_cast_to_the_requested_kind() {
    init_tracing();
    let store = basic();
    assert_eq!(store.get::<i64>("a", 10), 100);
    assert_eq!(store.get::<i64>("b", 10), 2);
    assert_eq!(store.get::<i64>("s", 10), 222);
    assert_eq!(store.get::<i64>("sx", 10), 10);
    assert_eq!(store.get::<String>("b", None), "2.5");
    assert_eq!(store.get::<i64>("missing", None), 0);
}

#[test]
fn large_doubles_survive_a_string_parameter() {
    let mut store = basic();
    store.set("s", 1.0e70).unwrap();
    assert!(store.get::<String>("s", None).len() > 64);
    assert_eq!(store.get::<f64>("s", -1.0), 1.0e70);
}

#[test]
fn new_parameters_need_add_setting() {
    init_tracing();
    let mut store = basic();

    let err = store.set("par8.k", 5).unwrap_err();
    assert!(matches!(err, WriteRejected::UnknownParameter { .. }));
    assert_eq!(store.get::<i64>("par8.k", 777), 777);

    assert!(store.add_setting("par8.k", 222));
    assert_eq!(store.get::<i64>("par8.k", 777), 222);
    assert!(!store.add_setting("par8.k", 1));
}

#[test]
fn first_kind_sticks() {
    init_tracing();
    let mut store = basic();
    assert!(store.add_setting("c", 300.0));
    store.set("c", 10).unwrap();
    assert_eq!(store.current().get("c"), Some(&Value::Double(10.0)));
    assert_eq!(store.get::<f64>("c", 0.0), 10.0);

    store.set("a", 2.5).unwrap();
    assert_eq!(store.current().get("a"), Some(&Value::Int(2)));
}

#[test]
fn add_setting_accepts_subtrees() {
    let mut store = basic();
    let proxy = Tree::try_from(json!({ "host": "10.0.0.1", "port": 3128 })).unwrap();
    assert!(store.add_setting("net.proxy", proxy));
    assert_eq!(store.get::<u32>("net.proxy.port", None), 3128);

    store.set("net.proxy.port", "8080").unwrap();
    assert_eq!(store.get::<u32>("net.proxy.port", None), 8080);
    assert!(!store.add_setting("net.proxy.port", 1));
}

#[test]
fn delete_setting_removes_everywhere() {
    let mut store = basic();
    store.set("a", 1).unwrap();
    store.delete_setting("a");
    assert!(!store.contains("a"));
    assert!(!store.previous().contains_path("a"));
    assert!(!store.initial().contains_path("a"));
    assert_eq!(store.get::<i64>("a", 3), 3);
    assert!(store.set("a", 1).is_err());

    store.delete_setting("a");
    store.delete_setting("never.there");
}

#[test]
fn merge_settings_overwrites_without_casting() {
    let mut store = basic();
    store.set("a", 1).unwrap();
    store.merge_settings(Tree::new().with("a", "text").with("extra", true));

    for snapshot in [store.current(), store.previous(), store.initial()] {
        assert_eq!(snapshot.get("a"), Some(&Value::string("text")));
        assert_eq!(snapshot.get("extra"), Some(&Value::Bool(true)));
    }
    assert_eq!(store.state("a"), ParameterState::Clean);
}

#[test]
fn enums_cast_through_codes_and_aliases() {
    let mut store = ParameterStore::new(Tree::new().with("quality", Quality::Medium));
    assert_eq!(store.get::<Quality>("quality", None), Quality::Medium);

    store.set("quality", "high").unwrap();
    assert_eq!(store.get::<Quality>("quality", None), Quality::High);
    store.set("quality", 0).unwrap();
    assert_eq!(store.get::<Quality>("quality", None), Quality::Low);

    assert!(store.set("quality", "ultra").is_err());
    assert!(store.set("quality", 7).is_err());
    assert_eq!(store.get::<Quality>("quality", None), Quality::Low);
    assert_eq!(store.to_json(), r#"{"quality":"low"}"#);
}

#[test]
fn get_falls_back_to_initial_when_current_lacks_a_path() {
    let mut store = ParameterStore::from_json(r#"{"net": {"port": 80, "host": "h"}}"#).unwrap();
    store.set("net", Tree::new().with("host", "other")).unwrap();

    assert!(!store.contains("net.port"));
    assert_eq!(store.get::<i64>("net.port", 1), 80);

    store.set("net.port", "81").unwrap();
    assert!(store.contains("net.port"));
    assert_eq!(store.get::<i64>("net.port", 1), 81);
}

#[test]
fn pending_changes_track_previous() {
    let mut store = basic();
    assert!(!store.is_modified());

    store.set("a", 5).unwrap();
    store.set("s", "x").unwrap();
    let pending = store.pending_changes();
    assert_eq!(pending.changed, vec!["a", "s"]);
    assert!(store.is_modified());

    store.apply(None);
    assert!(store.pending_changes().is_empty());
    assert_eq!(store.state("a"), ParameterState::Clean);
    assert!(store.is_modified());
}
