// tests/integration_test.rs
use std::fs;
use std::path::Path;
use std::process::Command;

use git2::Repository;
use serial_test::serial;
use tempfile::TempDir;

use semvertag::commands;
use semvertag::config::Config;
use semvertag::git::{GitTagStore, TagStore};
use semvertag::version::BumpField;

/// Initialize a scratch repository with one commit, plus a bare clone
/// wired up as its "origin" remote so pushes have somewhere to go.
fn setup_test_repo() -> (TempDir, TempDir) {
    let work_dir = TempDir::new().expect("Could not create temp dir");
    let origin_dir = TempDir::new().expect("Could not create temp dir");

    Repository::init_bare(origin_dir.path()).expect("Could not init bare origin");

    let repo = Repository::init(work_dir.path()).expect("Could not init git repo");

    {
        let mut config = repo.config().expect("Could not get config");
        config
            .set_str("user.name", "Test User")
            .expect("Could not set user.name");
        config
            .set_str("user.email", "test@example.com")
            .expect("Could not set user.email");
    }

    let content_path = work_dir.path().join("README.md");
    fs::write(&content_path, b"Initial content\n").expect("Could not write initial file");

    let mut index = repo.index().expect("Could not get index");
    index
        .add_path(Path::new("README.md"))
        .expect("Could not add file");
    index.write().expect("Could not write index");
    let tree_id = index.write_tree().expect("Could not write tree");
    let tree = repo.find_tree(tree_id).expect("Could not find tree");
    let sig = repo.signature().expect("Could not get signature");
    repo.commit(Some("HEAD"), &sig, &sig, "start", &tree, &[])
        .expect("Could not create initial commit");

    repo.remote("origin", origin_dir.path().to_str().unwrap())
        .expect("Could not add origin remote");

    (work_dir, origin_dir)
}

fn gittag(repo_dir: &Path, name: &str) {
    let repo = Repository::open(repo_dir).expect("Could not open repo");
    let head = repo
        .head()
        .and_then(|h| h.peel_to_commit())
        .expect("Could not resolve HEAD");
    repo.tag_lightweight(name, head.as_object(), false)
        .expect("Could not create tag");
}

/// The tag set the original tool's test repository is seeded with,
/// including two strings that must never parse.
fn seed_fixture_tags(repo_dir: &Path) {
    for name in [
        "1.0.0",
        "1.0.1+1",
        "1.0.1+2",
        "1.0.1+3",
        "1.2.1+3",
        "1.2.1-foo+2",
        "1.2.1-foo+1",
        "1.3.1-bar+1",
        "1.3.2-bar",
        "plum-0.0.2-bar+1",
        "plum-0.0.2-bar+2",
        "plum-0.0.1-bar+2",
        // unsupported strings
        "plum-0.0.a-bar+2",
        "plum-0.0.a-bar+2bc",
    ] {
        gittag(repo_dir, name);
    }
}

#[test]
fn test_latest() {
    let (work_dir, _origin) = setup_test_repo();
    seed_fixture_tags(work_dir.path());
    let store = GitTagStore::open(work_dir.path()).unwrap();

    assert_eq!(commands::latest(&store, "", None).unwrap(), "1.2.1+3");
    assert_eq!(
        commands::latest(&store, "", Some("foo")).unwrap(),
        "1.2.1-foo+2"
    );
    assert_eq!(
        commands::latest(&store, "", Some("bar")).unwrap(),
        "1.3.2-bar"
    );
    assert_eq!(
        commands::latest(&store, "plum-", Some("bar")).unwrap(),
        "plum-0.0.2-bar+2"
    );
}

#[test]
fn test_bump() {
    let (work_dir, _origin) = setup_test_repo();
    seed_fixture_tags(work_dir.path());
    let store = GitTagStore::open(work_dir.path()).unwrap();
    let config = Config::default();

    assert_eq!(
        commands::bump(&store, &config, "", None, BumpField::Build, false).unwrap(),
        "1.2.1+4"
    );
    assert_eq!(
        commands::bump(&store, &config, "", Some("foo"), BumpField::Build, false).unwrap(),
        "1.2.1-foo+3"
    );
    assert_eq!(
        commands::bump(&store, &config, "", Some("bar"), BumpField::Build, false).unwrap(),
        "1.3.2-bar+1"
    );
    assert_eq!(
        commands::bump(&store, &config, "plum-", Some("bar"), BumpField::Build, false).unwrap(),
        "plum-0.0.2-bar+3"
    );
}

#[test]
fn test_bump_tagging() {
    let (work_dir, origin_dir) = setup_test_repo();
    seed_fixture_tags(work_dir.path());
    let store = GitTagStore::open(work_dir.path()).unwrap();
    let config = Config::default();

    // Each tagged bump becomes the latest for the next invocation.
    assert_eq!(
        commands::bump(&store, &config, "", None, BumpField::Build, true).unwrap(),
        "1.2.1+4"
    );
    assert_eq!(
        commands::bump(&store, &config, "", None, BumpField::Build, true).unwrap(),
        "1.2.1+5"
    );

    assert_eq!(
        commands::bump(&store, &config, "", Some("foo"), BumpField::Build, true).unwrap(),
        "1.2.1-foo+3"
    );
    assert_eq!(
        commands::bump(&store, &config, "", Some("foo"), BumpField::Build, true).unwrap(),
        "1.2.1-foo+4"
    );

    assert_eq!(
        commands::bump(&store, &config, "plum-", Some("bar"), BumpField::Build, true).unwrap(),
        "plum-0.0.2-bar+3"
    );

    // The created tags made it to the origin.
    let origin = Repository::open_bare(origin_dir.path()).unwrap();
    let origin_tags: Vec<String> = origin
        .tag_names(None)
        .unwrap()
        .iter()
        .flatten()
        .map(|s| s.to_string())
        .collect();
    assert!(origin_tags.contains(&"1.2.1+4".to_string()));
    assert!(origin_tags.contains(&"1.2.1+5".to_string()));
    assert!(origin_tags.contains(&"plum-0.0.2-bar+3".to_string()));
}

#[test]
fn test_set_arbitrary_tag() {
    let (work_dir, origin_dir) = setup_test_repo();
    let store = GitTagStore::open(work_dir.path()).unwrap();
    let config = Config::default();

    let echoed = commands::tag(&store, &config, "foobar-1.2.3").unwrap();
    assert_eq!(echoed, "foobar-1.2.3");

    let origin = Repository::open_bare(origin_dir.path()).unwrap();
    let origin_tags: Vec<String> = origin
        .tag_names(None)
        .unwrap()
        .iter()
        .flatten()
        .map(|s| s.to_string())
        .collect();
    assert_eq!(origin_tags, vec!["foobar-1.2.3"]);
}

#[test]
fn test_fields_bumping() {
    let (work_dir, _origin) = setup_test_repo();
    let store = GitTagStore::open(work_dir.path()).unwrap();
    let config = Config::default();

    commands::tag(&store, &config, "precious-0.0.1").unwrap();

    assert_eq!(
        commands::bump(&store, &config, "precious-", None, BumpField::Build, true).unwrap(),
        "precious-0.0.1+1"
    );
    assert_eq!(
        commands::bump(&store, &config, "precious-", None, BumpField::Patch, true).unwrap(),
        "precious-0.0.2"
    );
    assert_eq!(
        commands::bump(&store, &config, "precious-", None, BumpField::Minor, true).unwrap(),
        "precious-0.1.0"
    );
    assert_eq!(
        commands::bump(&store, &config, "precious-", None, BumpField::Major, true).unwrap(),
        "precious-1.0.0"
    );
    assert_eq!(
        commands::bump(&store, &config, "precious-", None, BumpField::Build, true).unwrap(),
        "precious-1.0.0+1"
    );
}

#[test]
fn test_list() {
    let (work_dir, _origin) = setup_test_repo();
    seed_fixture_tags(work_dir.path());
    let store = GitTagStore::open(work_dir.path()).unwrap();

    assert_eq!(
        commands::list(&store, "", None, false, false).unwrap(),
        "1.2.1+3\n1.0.1+3\n1.0.1+2\n1.0.1+1\n1.0.0"
    );
    assert_eq!(
        commands::list(&store, "", None, false, true).unwrap(),
        "1.2.1+3,1.0.1+3,1.0.1+2,1.0.1+1,1.0.0"
    );
    assert_eq!(
        commands::list(&store, "", None, true, false).unwrap(),
        "1.0.0\n1.0.1+1\n1.0.1+2\n1.0.1+3\n1.2.1+3"
    );
    assert_eq!(
        commands::list(&store, "", None, true, true).unwrap(),
        "1.0.0,1.0.1+1,1.0.1+2,1.0.1+3,1.2.1+3"
    );
}

#[test]
fn test_unknown_stage_synthesizes_baseline() {
    let (work_dir, _origin) = setup_test_repo();
    seed_fixture_tags(work_dir.path());
    let store = GitTagStore::open(work_dir.path()).unwrap();
    let config = Config::default();

    assert_eq!(
        commands::latest(&store, "", Some("baz")).unwrap(),
        "0.0.0-baz"
    );
    assert_eq!(
        commands::bump(&store, &config, "", Some("baz"), BumpField::Build, false).unwrap(),
        "0.0.0-baz+1"
    );
}

#[test]
fn test_empty_repository_synthesizes_zero() {
    let (work_dir, _origin) = setup_test_repo();
    let store = GitTagStore::open(work_dir.path()).unwrap();

    assert_eq!(commands::latest(&store, "", None).unwrap(), "0.0.0");
    assert_eq!(
        commands::latest(&store, "plum-", Some("bar")).unwrap(),
        "plum-0.0.0-bar"
    );
}

#[test]
fn test_duplicate_tag_creation_is_fatal() {
    let (work_dir, _origin) = setup_test_repo();
    gittag(work_dir.path(), "1.0.0");
    let store = GitTagStore::open(work_dir.path()).unwrap();

    assert!(store.create_tag("1.0.0", "Release").is_err());
}

#[test]
fn test_created_tags_are_annotated() {
    let (work_dir, _origin) = setup_test_repo();
    let store = GitTagStore::open(work_dir.path()).unwrap();

    store.create_tag("1.0.0", "Release").unwrap();

    let repo = Repository::open(work_dir.path()).unwrap();
    let reference = repo.find_reference("refs/tags/1.0.0").unwrap();
    let tag_obj = reference.peel(git2::ObjectType::Tag).unwrap();
    let annotation = tag_obj.as_tag().unwrap();
    assert_eq!(annotation.message().map(str::trim), Some("Release"));
}

#[test]
#[serial]
fn test_semvertag_help() {
    let output = Command::new("cargo")
        .args(["run", "--bin", "semvertag", "--", "--help"])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("semvertag"));
    assert!(stdout.contains("latest"));
    assert!(stdout.contains("bump"));
}

#[test]
#[serial]
fn test_semvertag_latest_via_cli() {
    let (work_dir, _origin) = setup_test_repo();
    seed_fixture_tags(work_dir.path());

    let output = Command::new("cargo")
        .args([
            "run",
            "--bin",
            "semvertag",
            "--",
            "--cwd",
            work_dir.path().to_str().unwrap(),
            "latest",
        ])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(stdout.trim(), "1.2.1+3");
}
