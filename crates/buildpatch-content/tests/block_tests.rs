//! Tests for marker-delimited block removal on build.gradle content

use buildpatch_content::{
    BlockRemoval, EditKind, Error, remove_marked_block, remove_marked_block_with_fallbacks,
};
use pretty_assertions::assert_eq;

const SHORT_MARKER: &str = "// 统一仓库";
const LONG_MARKER: &str = "// 统一仓库（含本地 maven 源）";
const END_BLOCK: &str = "}\n\n// ⚠️";

const BUILD_GRADLE: &str = r#"buildscript {
  repositories {
    google()
  }
}

// 统一仓库（含本地 maven 源）
allprojects {
  repositories {
    maven { url("$rootDir/../node_modules/react-native/android") }
    google()
  }
}

// ⚠️ keep the plugin below
apply plugin: "com.facebook.react.rootproject"
"#;

#[test]
fn test_end_marker_text_is_reinserted() {
    let text = "a\nSTART\nfoo\nbar\nEND}\nkeep\n";
    assert_eq!(
        remove_marked_block(text, "START", "}").unwrap(),
        "a\n}\nkeep\n"
    );
}

#[test]
fn test_strip_repository_block_keeps_boundary() {
    let out = remove_marked_block(BUILD_GRADLE, SHORT_MARKER, END_BLOCK).unwrap();

    assert_eq!(
        out,
        r#"buildscript {
  repositories {
    google()
  }
}

}

// ⚠️ keep the plugin below
apply plugin: "com.facebook.react.rootproject"
"#
    );
}

#[test]
fn test_result_is_prefix_plus_end_plus_suffix() {
    let start = BUILD_GRADLE.find(SHORT_MARKER).unwrap();
    let end = start + BUILD_GRADLE[start..].find(END_BLOCK).unwrap() + END_BLOCK.len();

    let out = remove_marked_block(BUILD_GRADLE, SHORT_MARKER, END_BLOCK).unwrap();

    let expected = format!("{}{}{}", &BUILD_GRADLE[..start], END_BLOCK, &BUILD_GRADLE[end..]);
    assert_eq!(out, expected);
    assert_eq!(out.len(), BUILD_GRADLE.len() - (end - start) + END_BLOCK.len());
}

#[test]
fn test_fallback_uses_first_candidate_present() {
    let text = "head\n// 统一仓库（含本地 maven 源）\nbody\n}\n\n// ⚠️ tail\n";
    let out =
        remove_marked_block_with_fallbacks(text, &["// mojibake", LONG_MARKER], END_BLOCK).unwrap();
    assert_eq!(out, "head\n}\n\n// ⚠️ tail\n");
}

#[test]
fn test_fallback_order_is_priority_not_position() {
    // "B" appears later in the text but is listed first, so it anchors.
    let removal = BlockRemoval::with_fallbacks(["B", "A"], "!");
    let (out, edit) = removal.apply("A..B..!").unwrap();

    assert_eq!(out, "A..!");
    assert_eq!(
        edit.kind,
        EditKind::BlockRemoval {
            start_marker: "B".into(),
            end_marker: "!".into(),
        }
    );
}

#[test]
fn test_no_candidate_found_lists_all() {
    let err = remove_marked_block_with_fallbacks("nothing here", &["X", "Y"], "}").unwrap_err();
    match err {
        Error::MarkerNotFound { candidates } => assert_eq!(candidates, ["X", "Y"]),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_only_first_start_occurrence_anchors() {
    let text = "S1\nS2\n}\nS3\n}\n";
    assert_eq!(remove_marked_block(text, "S", "}").unwrap(), "}\nS3\n}\n");
}

#[test]
fn test_end_marker_inside_comment_still_ends_block() {
    let text = "// START\ndef x = 1 // }\nreal }\nafter";
    assert_eq!(
        remove_marked_block(text, "// START", "}").unwrap(),
        "}\nreal }\nafter"
    );
}

#[test]
fn test_empty_markers_are_rejected() {
    assert!(matches!(
        remove_marked_block("abc", "", "c"),
        Err(Error::InvalidMarker { .. })
    ));
    assert!(matches!(
        remove_marked_block("abc", "a", ""),
        Err(Error::InvalidMarker { .. })
    ));
}

#[test]
fn test_missing_start_marker_produces_no_output() {
    let result = remove_marked_block(BUILD_GRADLE, "// not here", END_BLOCK);
    assert!(matches!(result, Err(Error::MarkerNotFound { .. })));
}
