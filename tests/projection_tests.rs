//! Filtering scenarios run through the public library API.

use fieldcut::{
    Content, DocumentFormat, EmptyPolicy, Error, FieldPath, FilterProcessor, FilterSet,
    MatchDecision, Pruner,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
struct TestObject {
    property1: Option<String>,
    property2: Option<String>,
    property3: i64,
    sub_object: Option<Box<TestObject>>,
}

impl TestObject {
    fn new(p1: &str, p2: &str, p3: i64, sub_object: Option<TestObject>) -> Self {
        Self {
            property1: Some(p1.to_string()),
            property2: Some(p2.to_string()),
            property3: p3,
            sub_object: sub_object.map(Box::new),
        }
    }

    fn sub(&self) -> &TestObject {
        self.sub_object.as_deref().unwrap()
    }
}

fn test_data() -> TestObject {
    TestObject::new(
        "1",
        "2",
        3,
        Some(TestObject::new("S1", "S2", 3, Some(TestObject::new("SS1", "SS2", 3, None)))),
    )
}

fn process(filters: &[&str]) -> TestObject {
    FilterProcessor::new(Some(filters)).unwrap().process(&test_data()).unwrap()
}

fn tree(filters: &[&str]) -> Content {
    FilterProcessor::new(Some(filters)).unwrap().process_tree(&test_data()).unwrap()
}

#[test]
fn test_wildcard_keeps_everything() {
    let result = process(&["*"]);
    assert_eq!(result, test_data());
    assert!(result.sub().sub().sub_object.is_none());
}

#[test]
fn test_multiple_properties() {
    let result = process(&["Property1", "SubObject/Property2", "SubObject/SubObject/Property3"]);

    assert_eq!(result.property1.as_deref(), Some("1"));
    assert!(result.property2.is_none());
    assert_eq!(result.property3, 0);
    assert_eq!(result.sub().property2.as_deref(), Some("S2"));
    assert!(result.sub().property1.is_none());
    assert_eq!(result.sub().property3, 0);
    assert_eq!(result.sub().sub().property3, 3);
    assert!(result.sub().sub().property1.is_none());
    assert!(result.sub().sub().property2.is_none());
    assert!(result.sub().sub().sub_object.is_none());
}

#[test]
fn test_pruned_fields_are_absent() {
    let content = tree(&["Property1", "SubObject/Property2", "SubObject/SubObject/Property3"]);

    assert_eq!(content.member_names(), vec!["Property1", "SubObject"]);
    assert_eq!(content.get("SubObject").unwrap().member_names(), vec!["Property2", "SubObject"]);
    assert_eq!(content.lookup("SubObject/SubObject").unwrap().member_names(), vec!["Property3"]);
    assert_eq!(content.lookup("SubObject/SubObject/Property3").unwrap().as_i64(), Some(3));
}

#[test]
fn test_wildcard_with_subselection() {
    let result = process(&["*", "SubObject(Property1,Property2)"]);

    assert_eq!(result.property1.as_deref(), Some("1"));
    assert_eq!(result.property2.as_deref(), Some("2"));
    assert_eq!(result.property3, 3);
    assert_eq!(result.sub().property1.as_deref(), Some("S1"));
    assert_eq!(result.sub().property2.as_deref(), Some("S2"));
    assert_eq!(result.sub().property3, 0);
    assert!(result.sub().sub_object.is_none());

    let content = tree(&["*", "SubObject(Property1,Property2)"]);
    assert_eq!(content.get("SubObject").unwrap().member_names(), vec!["Property1", "Property2"]);
}

#[test]
fn test_wildcard_with_nested_paths() {
    let result = process(&["*", "SubObject/Property1", "SubObject/SubObject/Property3"]);

    assert_eq!(result.property1.as_deref(), Some("1"));
    assert_eq!(result.property2.as_deref(), Some("2"));
    assert_eq!(result.property3, 3);
    assert_eq!(result.sub().property1.as_deref(), Some("S1"));
    assert!(result.sub().property2.is_none());
    assert_eq!(result.sub().property3, 0);
    assert!(result.sub().sub().property1.is_none());
    assert!(result.sub().sub().property2.is_none());
    assert_eq!(result.sub().sub().property3, 3);
}

#[test]
fn test_nested_subselection() {
    let result = process(&["Property1", "SubObject/SubObject(Property1,Property2)"]);

    assert_eq!(result.property1.as_deref(), Some("1"));
    assert!(result.property2.is_none());
    assert_eq!(result.property3, 0);
    assert!(result.sub().property1.is_none());
    assert!(result.sub().property2.is_none());
    assert_eq!(result.sub().property3, 0);
    assert_eq!(result.sub().sub().property1.as_deref(), Some("SS1"));
    assert_eq!(result.sub().sub().property2.as_deref(), Some("SS2"));
    assert_eq!(result.sub().sub().property3, 0);
}

#[test]
fn test_single_property_drops_unselected_subtree() {
    let result = process(&["Property1"]);

    assert_eq!(result.property1.as_deref(), Some("1"));
    assert!(result.property2.is_none());
    assert_eq!(result.property3, 0);
    assert!(result.sub_object.is_none());
}

#[test]
fn test_single_sub_property() {
    let result = process(&["SubObject/Property1"]);

    assert!(result.property1.is_none());
    assert!(result.property2.is_none());
    assert_eq!(result.property3, 0);
    assert_eq!(result.sub().property1.as_deref(), Some("S1"));
    assert!(result.sub().property2.is_none());
    assert_eq!(result.sub().property3, 0);
    assert!(result.sub().sub_object.is_none());
}

#[test]
fn test_sub_elements_with_wildcard() {
    let result = process(&["SubObject/*", "SubObject/SubObject/Property1"]);

    assert!(result.property1.is_none());
    assert!(result.property2.is_none());
    assert_eq!(result.property3, 0);
    assert_eq!(result.sub().property1.as_deref(), Some("S1"));
    assert_eq!(result.sub().property2.as_deref(), Some("S2"));
    assert_eq!(result.sub().property3, 3);
    assert_eq!(result.sub().sub().property1.as_deref(), Some("SS1"));
    assert!(result.sub().sub().property2.is_none());
    assert_eq!(result.sub().sub().property3, 0);

    let content = tree(&["SubObject/*", "SubObject/SubObject/Property1"]);
    assert_eq!(content.member_names(), vec!["SubObject"]);
    assert_eq!(content.lookup("SubObject/SubObject").unwrap().member_names(), vec!["Property1"]);
}

#[test]
fn test_override_exclusivity() {
    let set = FilterSet::parse(["*", "a/b(c,d)"]).unwrap();
    let decide = |path: &str| set.decide(&FieldPath::parse(path));

    assert_eq!(decide("a/b/e"), MatchDecision::ExcludeSubtree);
    assert_eq!(decide("a/b/c"), MatchDecision::KeepSubtree);
    assert_eq!(decide("a/b/d"), MatchDecision::KeepSubtree);
    assert_eq!(decide("a/b"), MatchDecision::Traverse);
}

#[test]
fn test_override_prunes_unlisted_siblings() {
    let doc = Content::deserialize(json!({
        "a": {"b": {"c": 1, "d": 2, "e": 3}, "x": true},
        "top": "dropped"
    }))
    .unwrap();
    let processor = FilterProcessor::new(Some(["a/*", "a/b(c,d)"])).unwrap();

    let events = processor.explain(&doc);
    let decision = |path: &str| {
        events
            .iter()
            .find(|event| event.path.to_string() == path)
            .map(|event| event.decision)
            .unwrap()
    };
    assert_eq!(decision("a/b"), MatchDecision::Traverse);
    assert_eq!(decision("a/b/e"), MatchDecision::ExcludeSubtree);
    assert_eq!(decision("a/x"), MatchDecision::KeepSubtree);

    let value = processor.process_value(serde_json::to_value(&doc).unwrap()).unwrap();
    assert_eq!(value, json!({"a": {"b": {"c": 1, "d": 2}, "x": true}}));
}

#[test]
fn test_refiltering_is_idempotent() {
    let expressions = [
        vec!["Property1", "SubObject/Property2", "SubObject/SubObject/Property3"],
        vec!["*", "SubObject(Property1,Property2)"],
        vec!["SubObject/*", "SubObject/SubObject/Property1"],
        vec!["Property3"],
    ];

    for filters in expressions {
        let set = FilterSet::parse(&filters).unwrap();
        let pruner = Pruner::new(&set);

        let processor = FilterProcessor::new(Some(&filters)).unwrap();
        let once = processor.process_tree(&test_data()).unwrap();
        let mut twice = once.clone();
        let stats = pruner.prune(&mut twice);

        assert_eq!(once, twice, "filters {filters:?}");
        assert_eq!(stats.removed, 0, "filters {filters:?}");
    }
}

#[test]
fn test_wildcard_is_identity_on_deep_tree() {
    let mut doc = json!({"leaf": 0});
    for depth in 1..40 {
        doc = json!({"level": depth, "tags": ["a", "b"], "next": doc, "none": null});
    }

    let processor = FilterProcessor::new(Some(["*"])).unwrap();
    assert_eq!(processor.process_value(doc.clone()).unwrap(), doc);
}

#[test]
fn test_malformed_filter_leaves_source_untouched() {
    let original = tree(&["*"]);
    let filter_in_place = |filters: &[&str], content: &mut Content| {
        FilterProcessor::new(Some(filters)).map(|processor| processor.process_content(content))
    };

    let mut content = original.clone();
    let err = filter_in_place(&["Property1", "a(b,c"], &mut content).unwrap_err();
    assert!(matches!(
        &err,
        Error::InvalidFilterSyntax { expression, reason }
            if expression == "a(b,c" && *reason == "unbalanced parentheses"
    ));
    assert_eq!(content, original);
    assert_eq!(content.node_count(), original.node_count());

    let stats = filter_in_place(&["Property1"], &mut content).unwrap();
    assert!(stats.removed > 0);
    assert_eq!(content.member_names(), vec!["Property1"]);
}

#[test]
fn test_process_as_json() {
    let filters = ["Property1", "Property3", "SubObject/Property2"];
    let processor = FilterProcessor::new(Some(filters)).unwrap();
    let json = processor.process_as_json(&test_data()).unwrap();
    let result: TestObject = serde_json::from_str(&json).unwrap();

    assert_eq!(result.property1.as_deref(), Some("1"));
    assert!(result.property2.is_none());
    assert_eq!(result.property3, 3);
    assert!(result.sub().property1.is_none());
    assert_eq!(result.sub().property2.as_deref(), Some("S2"));
    assert_eq!(result.sub().property3, 0);
    assert!(result.sub().sub_object.is_none());

    assert!(json.contains('\n'), "expected indented JSON, got {json}");
}

#[test]
fn test_process_as_yaml_and_toml() {
    let processor = FilterProcessor::new(Some(["Property1", "SubObject(Property2)"])).unwrap();

    let yaml = processor.process_as_yaml(&test_data()).unwrap();
    let from_yaml: TestObject = serde_yml::from_str(&yaml).unwrap();
    assert_eq!(from_yaml.property1.as_deref(), Some("1"));
    assert_eq!(from_yaml.sub().property2.as_deref(), Some("S2"));
    assert!(from_yaml.sub().sub_object.is_none());

    let toml_text = processor.process_as_toml(&test_data()).unwrap();
    let from_toml: TestObject = toml::from_str(&toml_text).unwrap();
    assert_eq!(from_yaml, from_toml);
}

#[test]
fn test_missing_filter_collection() {
    assert!(matches!(
        FilterProcessor::new(None::<Vec<&str>>),
        Err(Error::NullFilterCollection)
    ));
}

#[test]
fn test_empty_filter_collection() {
    assert!(matches!(
        FilterProcessor::new(Some(Vec::<&str>::new())),
        Err(Error::EmptyFilterSet)
    ));
    assert!(matches!(
        FilterProcessor::new(Some([None, Some(""), Some("  ")])),
        Err(Error::EmptyFilterSet)
    ));
}

#[test]
fn test_blank_entries_are_skipped() {
    let processor = FilterProcessor::new(Some([Some("*"), None, Some("")])).unwrap();
    assert_eq!(processor.filters().len(), 1);

    let result = processor.process(&test_data()).unwrap();
    assert_eq!(result.property1.as_deref(), Some("1"));
    assert_eq!(result.sub().property2.as_deref(), Some("S2"));
    assert_eq!(result.sub().sub().property3, 3);
    assert!(result.sub().sub().sub_object.is_none());
}

#[test]
fn test_match_nothing_policy_empties_root() {
    let processor = FilterProcessor::with_policy(Some([""]), EmptyPolicy::MatchNothing).unwrap();
    let content = processor.process_tree(&test_data()).unwrap();
    assert!(content.member_names().is_empty());
}

#[test]
fn test_sequences_share_their_parent_path() {
    let processor = FilterProcessor::new(Some(["items(id)", "count"])).unwrap();
    let out = processor
        .process_str(
            "count: 2\nitems:\n  - id: 1\n    secret: a\n  - id: 2\n    secret: b\nextra: true\n",
            DocumentFormat::Yaml,
            DocumentFormat::Json,
            false,
        )
        .unwrap();
    assert_eq!(out, r#"{"count":2,"items":[{"id":1},{"id":2}]}"#);
}

#[test]
fn test_root_sequence_elements_are_roots() {
    let processor = FilterProcessor::new(Some(["name"])).unwrap();
    let value = processor
        .process_value(json!([{"name": "a", "x": 1}, {"name": "b", "y": 2}]))
        .unwrap();
    assert_eq!(value, json!([{"name": "a"}, {"name": "b"}]));
}

#[test]
fn test_toml_round_trip_keeps_tables() {
    let filters = ["package(name,version)", "dependencies/*"];
    let processor = FilterProcessor::new(Some(filters)).unwrap();
    let input = r#"[package]
name = "demo"
version = "0.1.0"
edition = "2024"

[dependencies]
serde = "1"

[profile.release]
lto = true
"#;

    let out = processor
        .process_str(input, DocumentFormat::Toml, DocumentFormat::Toml, true)
        .unwrap();
    let value: toml::Value = toml::from_str(&out).unwrap();

    assert_eq!(value["package"]["name"].as_str(), Some("demo"));
    assert_eq!(value["package"]["version"].as_str(), Some("0.1.0"));
    assert!(value["package"].get("edition").is_none());
    assert_eq!(value["dependencies"]["serde"].as_str(), Some("1"));
    assert!(value.get("profile").is_none());
}
