//! Glob search and child enumeration over an in-memory resource index.

use resource_path::{PatternError, ResourceIndex, ResourcePath, StaticIndex};
use rstest::rstest;

fn path(raw: &str) -> ResourcePath {
    ResourcePath::new(raw).expect("valid path")
}

fn sample_index() -> StaticIndex {
    StaticIndex::new([
        "Packages/Foo/helloworld.txt",
        "Packages/Foo/data/alpha.txt",
        "Packages/Foo/data/beta.json",
        "Packages/Foo/readme.md",
        "Packages/Other/readme.md",
        "Cache/Foo/state",
    ])
}

#[test]
fn glob_resources_preserves_enumeration_order() {
    let found = sample_index()
        .glob_resources("/Packages/Foo/**/*.txt")
        .expect("valid pattern");
    assert_eq!(
        found,
        vec![
            path("Packages/Foo/helloworld.txt"),
            path("Packages/Foo/data/alpha.txt"),
        ]
    );
}

#[test]
fn glob_resources_matches_suffixes_without_an_anchor() {
    let found = sample_index().glob_resources("readme.md").expect("valid pattern");
    assert_eq!(
        found,
        vec![path("Packages/Foo/readme.md"), path("Packages/Other/readme.md")]
    );
}

#[test]
fn glob_resources_with_no_matches_is_empty() {
    let found = sample_index().glob_resources("ks27jArEz4").expect("valid pattern");
    assert_eq!(found, vec![]);
}

#[test]
fn glob_in_anchors_beneath_the_base() {
    let found = sample_index()
        .glob_in(&path("Packages/Foo"), "*.md")
        .expect("valid pattern");
    assert_eq!(found, vec![path("Packages/Foo/readme.md")]);
}

#[test]
fn rglob_in_searches_at_any_depth() {
    let found = sample_index()
        .rglob_in(&path("Packages/Foo"), "*.txt")
        .expect("valid pattern");
    assert_eq!(
        found,
        vec![
            path("Packages/Foo/helloworld.txt"),
            path("Packages/Foo/data/alpha.txt"),
        ]
    );
}

#[test]
fn rglob_in_rejects_anchored_patterns() {
    let err = sample_index()
        .rglob_in(&path("Packages/Foo"), "/bar")
        .expect_err("anchored pattern");
    assert!(matches!(err, PatternError::Anchored { .. }), "{err}");
}

#[test]
fn children_include_intermediate_directories_once() {
    let children = sample_index()
        .children_of(&path("Packages/Foo"))
        .expect("valid base");
    assert_eq!(
        children,
        vec![
            path("Packages/Foo/helloworld.txt"),
            path("Packages/Foo/data"),
            path("Packages/Foo/readme.md"),
        ]
    );
}

#[test]
fn children_of_a_leaf_are_empty() {
    let children = sample_index()
        .children_of(&path("Packages/Foo/readme.md"))
        .expect("valid base");
    assert_eq!(children, vec![]);
}

#[rstest]
#[case("Packages/Foo/readme.md", true)]
#[case("Packages/Foo/data", false)]
#[case("Packages/Nope", false)]
fn exists_requires_an_exact_entry(#[case] raw: &str, #[case] expected: bool) {
    assert_eq!(sample_index().exists(&path(raw)), expected);
}
