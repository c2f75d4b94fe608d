use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde::de::DeserializeOwned;

pub const FIXTURE_FORMAT_V1: &str = "mention-fixture-v1";

/// A single golden case; failures are reported under its id.
pub trait FixtureCase {
    fn id(&self) -> &str;
}

#[derive(Deserialize)]
#[serde(bound = "T: DeserializeOwned")]
struct FixtureFile<T> {
    format: String,
    cases: Vec<T>,
}

/// `<crate>/tests/fixtures/<name>`, from the caller's `CARGO_MANIFEST_DIR`.
pub fn fixture_path(manifest_dir: &str, name: &str) -> PathBuf {
    Path::new(manifest_dir).join("tests").join("fixtures").join(name)
}

/// Case id to run alone, from `MENTION_FIXTURE_CASE`. Empty means all.
pub fn case_filter() -> Option<String> {
    std::env::var("MENTION_FIXTURE_CASE")
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Load and validate a fixture file: known format, at least one case, unique
/// ids. Honors [`case_filter`].
pub fn load_fixture<T>(path: &Path) -> Vec<T>
where
    T: DeserializeOwned + FixtureCase,
{
    let content = fs::read_to_string(path)
        .unwrap_or_else(|err| panic!("failed to read fixture {path:?}: {err}"));
    let file: FixtureFile<T> = toml::from_str(&content)
        .unwrap_or_else(|err| panic!("failed to parse fixture {path:?}: {err}"));

    assert_eq!(
        file.format, FIXTURE_FORMAT_V1,
        "unsupported fixture format in {path:?}"
    );
    assert!(!file.cases.is_empty(), "fixture {path:?} has no cases");

    let mut seen = BTreeSet::new();
    for case in &file.cases {
        assert!(
            !case.id().trim().is_empty(),
            "fixture {path:?} has a case with an empty id"
        );
        assert!(
            seen.insert(case.id().to_string()),
            "duplicate case id in {path:?}: {}",
            case.id()
        );
    }

    match case_filter() {
        Some(only) => {
            let cases: Vec<T> = file.cases.into_iter().filter(|c| c.id() == only).collect();
            assert!(!cases.is_empty(), "MENTION_FIXTURE_CASE={only} matches no case in {path:?}");
            cases
        }
        None => file.cases,
    }
}
