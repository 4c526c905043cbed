//! Property-based tests for line rules and block removal

use buildpatch_content::{
    Document, Error, LineRule, apply_line_rules, remove_marked_block,
    remove_marked_block_with_fallbacks,
};
use proptest::prelude::*;

/// Non-empty lines that never start with `K=` once trimmed
fn unmatched_line() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 .#=_-]{1,20}".prop_filter("must not match the K= rule", |line| {
        !line.trim().starts_with("K=")
    })
}

fn normalize(text: &str) -> String {
    Document::parse(text).render()
}

proptest! {
    #[test]
    fn unmatched_documents_are_normalized_identity(
        lines in prop::collection::vec(unmatched_line(), 0..20),
        trailing_newline in any::<bool>(),
    ) {
        let mut text = lines.join("\n");
        if trailing_newline {
            text.push('\n');
        }
        let rule = LineRule::prefix("K=", ["A", "B"]);
        prop_assert_eq!(apply_line_rules(&text, &[rule]), normalize(&text));
    }

    #[test]
    fn matched_line_expands_in_place(
        before in prop::collection::vec(unmatched_line(), 0..10),
        after in prop::collection::vec(unmatched_line(), 0..10),
        value in "[a-z0-9]{0,8}",
    ) {
        let mut lines = before.clone();
        lines.push(format!("K={value}"));
        lines.extend(after.iter().cloned());

        let out = apply_line_rules(&lines.join("\n"), &[LineRule::prefix("K=", ["A", "B"])]);
        let out_lines = Document::parse(&out).lines().to_vec();

        let mut expected = before.clone();
        expected.push("A".to_string());
        expected.push("B".to_string());
        expected.extend(after.iter().cloned());
        prop_assert_eq!(out_lines, expected);
    }

    #[test]
    fn removal_matches_slice_formula(
        head in "[a-z\n ]{0,30}",
        body in "[a-z\n ]{0,30}",
        tail in "[a-z\n }]{0,30}",
    ) {
        let text = format!("{head}<<START>>{body}}}{tail}");
        let start = text.find("<<START>>").unwrap();
        let end = start + text[start..].find('}').unwrap() + 1;

        let out = remove_marked_block(&text, "<<START>>", "}").unwrap();

        prop_assert_eq!(&out, &format!("{}}}{}", &text[..start], &text[end..]));
        prop_assert_eq!(out.len(), text.len() - (end - start) + 1);
    }

    #[test]
    fn absent_markers_always_fail(text in "[a-z\n ]{0,60}") {
        let result = remove_marked_block_with_fallbacks(&text, &["<<A>>", "<<B>>"], "}");
        let is_marker_not_found = matches!(result, Err(Error::MarkerNotFound { .. }));
        prop_assert!(is_marker_not_found);
    }
}
