use super::*;
use crate::testing::DatasetFixture;

fn rel_paths(index: &DatasetIndex) -> Vec<&str> {
    index.keys().collect()
}

#[test]
fn test_build_without_background() {
    let fixture = DatasetFixture::new();
    fixture.add_foreground("s1/city/01.laz");
    fixture.add_foreground("s1/city/02.las");
    fixture.add_foreground("s2/town/01.LAZ");
    fixture.add_foreground("s2/town/notes.txt");

    let index = fixture.index();

    assert_eq!(index.len(), 3);
    assert!(index.warnings().is_empty());
    assert!(
        index
            .entries()
            .iter()
            .all(|e| e.background_absolute_path.is_none())
    );
    assert_eq!(
        rel_paths(&index),
        vec!["s1/city/01.laz", "s1/city/02.las", "s2/town/01.LAZ"]
    );
}

#[test]
fn test_shared_background_for_group() {
    let fixture = DatasetFixture::new();
    let bg = fixture.add_background("s1/city.laz");
    fixture.add_foreground("s1/city/01.laz");
    fixture.add_foreground("s1/city/02.laz");

    let index = fixture.index_with_background();

    assert_eq!(index.len(), 2);
    for entry in index.entries() {
        assert_eq!(entry.background_absolute_path.as_ref(), Some(&bg));
    }
    assert!(index.warnings().is_empty());
}

#[test]
fn test_background_at_root_level() {
    let fixture = DatasetFixture::new();
    let bg = fixture.add_background("scan.las");
    fixture.add_foreground("scan/obj.laz");

    let index = fixture.index_with_background();
    assert_eq!(index.entries()[0].background_absolute_path, Some(bg));
}

#[test]
fn test_missing_background_degrades_entry() {
    let fixture = DatasetFixture::new();
    let bg = fixture.add_background("s1/city.laz");
    fixture.add_foreground("s1/city/01.laz");
    fixture.add_foreground("s1/village/01.laz");
    fixture.add_foreground("s1/village/02.laz");

    let index = fixture.index_with_background();

    assert_eq!(index.len(), 3);
    assert_eq!(index.entries()[0].background_absolute_path, Some(bg));
    assert_eq!(index.entries()[1].background_absolute_path, None);
    assert_eq!(index.entries()[2].background_absolute_path, None);

    // one warning per offending group, not per entry
    assert_eq!(index.warnings().len(), 1);
    match &index.warnings()[0] {
        DatasetError::BackgroundMatch { group, candidates, .. } => {
            assert_eq!(group, "village");
            assert!(candidates.is_empty());
        }
        other => panic!("unexpected warning: {other}"),
    }
}

#[test]
fn test_ambiguous_background_degrades_entry() {
    let fixture = DatasetFixture::new();
    fixture.add_background("s1/city.laz");
    fixture.add_background("s1/city.las");
    fixture.add_foreground("s1/city/01.laz");

    let index = fixture.index_with_background();

    assert_eq!(index.entries()[0].background_absolute_path, None);
    match &index.warnings()[0] {
        DatasetError::BackgroundMatch { candidates, .. } => assert_eq!(candidates.len(), 2),
        other => panic!("unexpected warning: {other}"),
    }
    assert!(index.warnings()[0].is_warning());
}

#[test]
fn test_background_in_other_chain_is_not_matched() {
    let fixture = DatasetFixture::new();
    fixture.add_background("s2/city.laz");
    fixture.add_foreground("s1/city/01.laz");

    let index = fixture.index_with_background();
    assert_eq!(index.entries()[0].background_absolute_path, None);
    assert_eq!(index.warnings().len(), 1);
}

#[test]
fn test_ungrouped_foreground_warns() {
    let fixture = DatasetFixture::new();
    fixture.add_foreground("loose.laz");

    let index = fixture.index_with_background();
    assert_eq!(index.len(), 1);
    assert!(matches!(
        index.warnings()[0],
        DatasetError::NoObjectGroup { .. }
    ));
}

#[test]
fn test_empty_dataset_fails() {
    let fixture = DatasetFixture::new();
    fixture.add_foreground("s1/readme.md");

    let err = DatasetIndex::build(&fixture.foreground_root(), None).unwrap_err();
    assert!(matches!(err, DatasetError::Empty { .. }));
    assert!(!err.is_warning());
}

#[test]
fn test_missing_root_fails() {
    let fixture = DatasetFixture::new();
    let err = DatasetIndex::build(&fixture.path().join("absent"), None).unwrap_err();
    assert!(matches!(err, DatasetError::RootNotFound { .. }));
}

#[test]
fn test_groups_are_contiguous() {
    let fixture = DatasetFixture::new();
    fixture.add_foreground("a/b/1.laz");
    fixture.add_foreground("a/b/sub/1.laz");
    fixture.add_foreground("a/b/z.laz");
    fixture.add_foreground("a/b-c/1.laz");

    let index = fixture.index();

    assert_eq!(
        rel_paths(&index),
        vec!["a/b/1.laz", "a/b/z.laz", "a/b-c/1.laz", "a/b/sub/1.laz"]
    );
    assert_eq!(index.group_position(0), Some((1, 2)));
    assert_eq!(index.group_position(1), Some((2, 2)));
    assert_eq!(index.group_position(2), Some((1, 1)));
    assert_eq!(index.group_position(3), Some((1, 1)));
    assert_eq!(index.group_position(4), None);
}

#[test]
fn test_order_is_reproducible() {
    let fixture = DatasetFixture::new();
    for name in ["c", "a", "b"] {
        fixture.add_foreground(&format!("s/g/{name}.laz"));
    }

    let first: Vec<String> = fixture.index().keys().map(String::from).collect();
    let second: Vec<String> = fixture.index().keys().map(String::from).collect();
    assert_eq!(first, second);
    assert_eq!(first, vec!["s/g/a.laz", "s/g/b.laz", "s/g/c.laz"]);
}

#[test]
fn test_foreground_path_is_joined_onto_root() {
    let fixture = DatasetFixture::new();
    let fg = fixture.add_foreground("s1/city/01.laz");

    let index = fixture.index();
    assert_eq!(index.entries()[0].foreground_path, fg);
    assert_eq!(index.foreground_root(), fixture.foreground_root());
}

#[test]
fn test_from_entries_rejects_empty() {
    let err = DatasetIndex::from_entries(PathBuf::from("root"), None, Vec::new()).unwrap_err();
    assert!(matches!(err, DatasetError::Empty { .. }));
}

#[cfg(unix)]
#[test]
fn test_non_utf8_names_are_skipped() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let fixture = DatasetFixture::new();
    fixture.add_foreground("s1/city/01.laz");
    let group = fixture.foreground_root().join("s1").join("city");
    for name in [&b"a\xff.laz"[..], &b"a\xfe.laz"[..]] {
        let path = group.join(OsStr::from_bytes(name));
        if std::fs::write(&path, b"").is_err() {
            // Filesystem refuses non UTF-8 names; nothing to check
            return;
        }
    }

    let index = fixture.index();
    assert_eq!(rel_paths(&index), vec!["s1/city/01.laz"]);
    assert!(index.entries()[0].foreground_path.is_file());

    let store = crate::testing::empty_store(&index);
    assert_eq!(store.len(), index.len());
}
