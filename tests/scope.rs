mod common;

use pretty_assertions::assert_eq;
use tabhero::{NewTabSet, Scope, TabSet, TabSetStore};

use common::{TestDir, tab};

fn set(scope: Option<Scope>, branch: Option<&str>) -> TabSet {
    TabSet::new(NewTabSet {
        name: format!("{:?}/{:?}", scope, branch),
        tabs: vec![tab("a.rs")],
        branch: branch.map(str::to_string),
        is_favorite: false,
        scope,
    })
}

#[test]
fn visibility_truth_table() {
    let cases: [(Option<Scope>, Option<&str>, Option<&str>, bool); 14] = [
        // explicit branch scope
        (Some(Scope::Branch), Some("main"), Some("main"), true),
        (Some(Scope::Branch), Some("feature"), Some("main"), false),
        (Some(Scope::Branch), Some("main"), None, false),
        (Some(Scope::Branch), None, Some("main"), false),
        // explicit project scope
        (Some(Scope::Project), None, Some("main"), true),
        (Some(Scope::Project), None, None, true),
        (Some(Scope::Project), Some("feature"), Some("main"), true),
        (Some(Scope::Project), Some("feature"), None, true),
        // legacy with a branch behaves as branch-scoped
        (None, Some("main"), Some("main"), true),
        (None, Some("main"), Some("feature"), false),
        (None, Some("main"), None, false),
        // legacy without a branch behaves as project-scoped
        (None, None, Some("main"), true),
        (None, None, Some("feature"), true),
        (None, None, None, true),
    ];

    for (scope, branch, current, expected) in cases {
        assert_eq!(
            set(scope, branch).is_visible_on(current),
            expected,
            "scope={scope:?} branch={branch:?} current={current:?}"
        );
    }
}

#[test]
fn scope_query_end_to_end() {
    let dir = TestDir::new("scope-e2e");
    let store = TabSetStore::initialize(Some(dir.path())).unwrap();

    let a = store.save(NewTabSet {
        name: "Main Branch Set".to_string(),
        tabs: vec![tab("main.rs")],
        branch: Some("main".to_string()),
        is_favorite: false,
        scope: Some(Scope::Branch),
    });
    let b = store.save(NewTabSet {
        name: "Project Set".to_string(),
        tabs: vec![tab("README.md")],
        branch: None,
        is_favorite: false,
        scope: Some(Scope::Project),
    });

    assert_eq!(store.get_by_scope(Some("main")), vec![a.clone(), b.clone()]);
    assert_eq!(store.get_by_scope(Some("feature")), vec![b.clone()]);
    assert_eq!(store.get_by_scope(None), vec![b]);
}

#[test]
fn scope_query_mixes_legacy_and_current_records() {
    let dir = TestDir::new("scope-mixed");
    let store = TabSetStore::initialize(Some(dir.path())).unwrap();

    let legacy_main = store.save(NewTabSet {
        name: "legacy main".into(),
        branch: Some("main".into()),
        ..Default::default()
    });
    let legacy_plain = store.save(NewTabSet {
        name: "legacy plain".into(),
        ..Default::default()
    });
    let scoped_feature = store.save(NewTabSet {
        name: "feature".into(),
        branch: Some("feature".into()),
        scope: Some(Scope::Branch),
        ..Default::default()
    });

    assert_eq!(
        store.get_by_scope(Some("main")),
        vec![legacy_main, legacy_plain.clone()]
    );
    assert_eq!(
        store.get_by_scope(Some("feature")),
        vec![legacy_plain.clone(), scoped_feature]
    );
    assert_eq!(store.get_by_scope(None), vec![legacy_plain]);
}
