use std::fs;
use std::path::{Path, PathBuf};

use tgn_actions::{ActionError, CopyOptions, Mapping, copy, glob_map};

fn write(root: &Path, rel: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, rel.as_bytes()).unwrap();
}

fn fixture() -> tempfile::TempDir {
    let tmp = tempfile::tempdir().expect("tempdir");
    let root = tmp.path().join("src");
    for rel in [
        "api.h",
        "api.cc",
        "detail/impl.h",
        "detail/deep/more.h",
        "README.md",
    ] {
        write(&root, rel);
    }
    tmp
}

#[test]
fn maps_headers_recursively_under_dest() {
    let tmp = fixture();
    let root = tmp.path().join("src");
    let dest = PathBuf::from("gen/include/mylib");

    let mappings = glob_map(&root, "**/*.h", &dest).expect("glob_map");

    assert_eq!(
        mappings,
        vec![
            Mapping {
                source: root.join("api.h"),
                dest: dest.join("api.h"),
            },
            Mapping {
                source: root.join("detail/deep/more.h"),
                dest: dest.join("detail/deep/more.h"),
            },
            Mapping {
                source: root.join("detail/impl.h"),
                dest: dest.join("detail/impl.h"),
            },
        ]
    );
}

#[test]
fn single_star_only_matches_top_level() {
    let tmp = fixture();
    let root = tmp.path().join("src");

    let mappings = glob_map(&root, "*.h", Path::new("out")).expect("glob_map");
    let sources: Vec<_> = mappings.iter().map(|m| m.source.clone()).collect();
    assert_eq!(sources, vec![root.join("api.h")]);
}

#[test]
fn missing_root_is_an_error() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let err = glob_map(&tmp.path().join("absent"), "*", Path::new("out")).unwrap_err();
    assert!(matches!(err, ActionError::MissingSource(_)));
}

#[test]
fn mappings_can_be_copied() {
    let tmp = fixture();
    let root = tmp.path().join("src");
    let dest = tmp.path().join("out/include");

    for m in glob_map(&root, "detail/**", &dest).expect("glob_map") {
        copy(&m.source, &m.dest, CopyOptions::default()).expect("copy");
    }

    assert_eq!(
        fs::read_to_string(dest.join("detail/deep/more.h")).unwrap(),
        "detail/deep/more.h"
    );
    assert!(!dest.join("api.h").exists());
}

#[test]
fn mapping_serializes_to_json() {
    let m = Mapping {
        source: PathBuf::from("a/b.h"),
        dest: PathBuf::from("out/b.h"),
    };
    let json = serde_json::to_string(&m).unwrap();
    assert_eq!(json, r#"{"source":"a/b.h","dest":"out/b.h"}"#);
}

#[cfg(unix)]
#[test]
fn linked_files_are_mapped_like_regular_files() {
    let tmp = fixture();
    let root = tmp.path().join("src");
    write(tmp.path(), "shared/common.h");
    std::os::unix::fs::symlink(tmp.path().join("shared/common.h"), root.join("linked.h"))
        .unwrap();

    let mappings = glob_map(&root, "*.h", Path::new("out")).expect("glob_map");
    let sources: Vec<_> = mappings.iter().map(|m| m.source.clone()).collect();
    assert_eq!(sources, vec![root.join("api.h"), root.join("linked.h")]);

    let dest = tmp.path().join("gen");
    for m in glob_map(&root, "linked.h", &dest).expect("glob_map") {
        copy(&m.source, &m.dest, CopyOptions::default()).expect("copy");
    }
    assert_eq!(
        fs::read_to_string(dest.join("linked.h")).unwrap(),
        "shared/common.h"
    );
}
