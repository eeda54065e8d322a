#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;
use clap::Parser;
use pretty_assertions::assert_eq;

fn options(manifest: PathBuf) -> Options {
    Options {
        manifest,
        types: vec!["User".to_string()],
        dest: None,
        package: None,
        tag: "json".to_string(),
        reset: false,
    }
}

#[test]
fn parses_full_command_line() {
    let parsed = Options::try_parse_from([
        "bintgen",
        "--manifest",
        "types.json",
        "--type",
        "User",
        "--type",
        "Order",
        "--dest",
        "user_bintly.go",
        "--package",
        "wire",
        "--tag",
        "db",
        "--reset",
    ])
    .expect("valid command line");

    assert_eq!(
        parsed,
        Options {
            manifest: PathBuf::from("types.json"),
            types: vec!["User".to_string(), "Order".to_string()],
            dest: Some(PathBuf::from("user_bintly.go")),
            package: Some("wire".to_string()),
            tag: "db".to_string(),
            reset: true,
        }
    );
}

#[test]
fn defaults_apply() {
    let parsed = Options::try_parse_from(["bintgen", "--manifest", "m.json", "--type", "T"])
        .expect("valid command line");
    assert_eq!(parsed.tag, "json");
    assert!(!parsed.reset);
    assert_eq!(parsed.dest, None);
    assert_eq!(parsed.coder_config(), CoderConfig::default());
}

#[test]
fn tag_reaches_coder_config() {
    let parsed = Options::try_parse_from([
        "bintgen", "--manifest", "m.json", "--type", "T", "--tag", "db",
    ])
    .expect("valid command line");
    assert_eq!(parsed.coder_config().tag_name, "db");
}

#[test]
fn manifest_is_required() {
    assert!(Options::try_parse_from(["bintgen", "--type", "T"]).is_err());
}

#[test]
fn validate_rejects_missing_types() {
    let file = tempfile::NamedTempFile::new().expect("temp file");
    let mut opts = options(file.path().to_path_buf());
    opts.types.clear();
    assert_eq!(opts.validate(), Err(OptionsError::NoTypes));
}

#[test]
fn validate_rejects_missing_manifest() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("absent.json");
    assert_eq!(
        options(path.clone()).validate(),
        Err(OptionsError::MissingManifest(path))
    );
}

#[test]
fn validate_rejects_bad_tag_and_package() {
    let file = tempfile::NamedTempFile::new().expect("temp file");

    let mut opts = options(file.path().to_path_buf());
    opts.tag = "  ".to_string();
    assert_eq!(opts.validate(), Err(OptionsError::EmptyTag));

    let mut opts = options(file.path().to_path_buf());
    opts.package = Some("my-pkg".to_string());
    assert_eq!(
        opts.validate(),
        Err(OptionsError::InvalidPackage("my-pkg".to_string()))
    );

    opts.package = Some("my_pkg2".to_string());
    assert_eq!(opts.validate(), Ok(()));
}

#[test]
fn identifiers() {
    assert!(is_identifier("model"));
    assert!(is_identifier("_x9"));
    assert!(!is_identifier(""));
    assert!(!is_identifier("9lives"));
    assert!(!is_identifier("a.b"));
}
