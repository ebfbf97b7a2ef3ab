//! Property-based tests for path containment and placeholder substitution.
//!
//! These tests use proptest to generate arbitrary inputs and verify the
//! safety and rewrite properties hold across a wide range of cases.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use gocanon_core::ProjectName;
use gocanon_core::ScaffoldConfig;
use gocanon_core::ScaffoldError;
use gocanon_core::copy::CopyBuffer;
use gocanon_core::copy::copy_with_buffer;
use gocanon_core::extraction::RootRemap;
use gocanon_core::rewrite::replace_literal;
use gocanon_core::scaffold;
use gocanon_core::test_utils::ZipTestBuilder;
use gocanon_core::types::DestDir;
use gocanon_core::types::SafePath;
use proptest::prelude::*;
use std::fs;
use std::io::Cursor;
use std::path::Path;
use std::path::PathBuf;
use tempfile::TempDir;

const TOKEN: &str = "go-canonical";

fn create_test_dest() -> (TempDir, DestDir) {
    let temp = TempDir::new().expect("failed to create temp dir");
    let dest = DestDir::new(temp.path().to_path_buf()).expect("failed to create dest");
    (temp, dest)
}

proptest! {
    /// Any path with a `..` segment is rejected.
    #[test]
    fn prop_parent_traversal_rejected(
        prefix in "([a-z]+/){0,5}",
        suffix in "([a-z]+/?){0,5}"
    ) {
        let (_temp, dest) = create_test_dest();
        let path = PathBuf::from(format!("{prefix}../{suffix}"));

        let result = SafePath::validate(&path, &dest);
        let is_traversal = matches!(result, Err(ScaffoldError::PathTraversal { .. }));
        prop_assert!(is_traversal);
    }

    /// Plain relative paths are accepted and resolve below the destination.
    #[test]
    fn prop_relative_paths_contained(
        segments in prop::collection::vec("[a-zA-Z0-9_-]{1,12}(\\.go)?", 1..6)
    ) {
        let (_temp, dest) = create_test_dest();
        let path = PathBuf::from(segments.join("/"));

        let safe = SafePath::validate(&path, &dest).unwrap();
        prop_assert!(dest.join(&safe).starts_with(dest.as_path()));
    }

    /// Stripping the template root removes exactly one leading component.
    #[test]
    fn prop_remap_strips_single_root(
        rest in prop::collection::vec("[a-z]{1,8}", 1..4)
    ) {
        let remap = RootRemap::new(TOKEN);
        let rest_path = PathBuf::from(rest.join("/"));
        let stored = Path::new(TOKEN).join(&rest_path);

        prop_assert_eq!(remap.strip(&stored), rest_path.as_path());
        prop_assert_eq!(remap.strip(&rest_path), rest_path.as_path());
    }

    /// After substitution no occurrence of the token remains, unless the
    /// replacement itself reintroduces one.
    #[test]
    fn prop_substitution_complete(
        chunks in prop::collection::vec("[a-z /\\n]{0,16}", 1..8),
        name in "[a-z][a-z0-9]{0,10}"
    ) {
        prop_assume!(!name.contains("go"));
        let content = chunks.join(TOKEN);
        let (out, count) = replace_literal(content.as_bytes(), TOKEN.as_bytes(), name.as_bytes());

        prop_assert_eq!(count, chunks.len() - 1);
        let out = String::from_utf8(out.into_owned()).unwrap();
        prop_assert!(!out.contains(TOKEN));
        prop_assert_eq!(out, chunks.join(&name));
    }

    /// Content without the token is returned unchanged.
    #[test]
    fn prop_substitution_identity_without_token(content in prop::collection::vec(any::<u8>(), 0..512)) {
        prop_assume!(!content.windows(TOKEN.len()).any(|w| w == TOKEN.as_bytes()));
        let (out, count) = replace_literal(&content, TOKEN.as_bytes(), b"widget");

        prop_assert_eq!(count, 0);
        prop_assert_eq!(out.as_ref(), content.as_slice());
    }

    /// Copying through the reusable buffer preserves every byte.
    #[test]
    fn prop_copy_preserves_data(data in prop::collection::vec(any::<u8>(), 0..200_000)) {
        let mut buffer = CopyBuffer::new();
        let mut output = Vec::new();

        let copied = copy_with_buffer(&mut Cursor::new(&data), &mut output, &mut buffer).unwrap();

        prop_assert_eq!(copied, data.len() as u64);
        prop_assert_eq!(output, data);
    }

    /// Trimming is the only normalization applied to project names.
    #[test]
    fn prop_project_name_trimmed(
        name in "[a-zA-Z][a-zA-Z0-9_.-]{0,20}",
        left in "[ \\t\\n]{0,3}",
        right in "[ \\t\\r\\n]{0,3}"
    ) {
        let parsed = ProjectName::parse(&format!("{left}{name}{right}")).unwrap();
        prop_assert_eq!(parsed.as_str(), name.as_str());
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    /// Extracted files always land under the project directory with their
    /// original bytes apart from substitution in targets.
    #[test]
    fn prop_scaffold_round_trip(
        files in prop::collection::btree_map("[a-z]{1,8}", prop::collection::vec(any::<u8>(), 0..256), 1..6),
        name in "[a-z]{1,10}"
    ) {
        let temp = TempDir::new().unwrap();
        let mut builder = ZipTestBuilder::new();
        for (file, content) in &files {
            builder = builder.add_file(&format!("{TOKEN}/assets/{file}.bin"), content);
        }
        let archive = temp.path().join("template.zip");
        builder.write_to(&archive).unwrap();

        let report = scaffold(&archive, temp.path(), &name, &ScaffoldConfig::default()).unwrap();

        prop_assert_eq!(report.extraction.files_extracted, files.len());
        prop_assert_eq!(report.rewrite.files_scanned, 0);
        for (file, content) in &files {
            let written = fs::read(temp.path().join(&name).join("assets").join(format!("{file}.bin"))).unwrap();
            prop_assert_eq!(&written, content);
        }
    }
}
