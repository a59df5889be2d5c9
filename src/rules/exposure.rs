//! Classification of static references against the reference locale.
//!
//! - VALID: the key exists; it is recorded as used.
//! - EXPOSED: the key is absent and the call site has no fallback, so the
//!   raw key would render.
//! - COVERED: the key is absent but an inline fallback renders instead.
//!
//! References to the same (namespace, key) collapse into one issue that
//! lists every location. The classification of the first reference wins;
//! later references only add locations.

use std::collections::{HashMap, HashSet};

use crate::{
    core::{KeyIndex, SourceReference, extract::FileReferences},
    issues::{CoveredKeyIssue, ExposedKeyIssue, ExposureReason, KeyUsage},
};

/// Outcome of classifying every reference of a scan.
#[derive(Debug, Default)]
pub struct ExposureAnalysis {
    /// In order of first encounter.
    pub exposed: Vec<ExposedKeyIssue>,
    /// In order of first encounter.
    pub covered: Vec<CoveredKeyIssue>,
    /// (namespace, key) pairs that resolved to a defined key.
    pub used_keys: HashSet<(String, String)>,
}

enum Slot {
    Valid,
    Exposed(usize),
    Covered(usize),
}

pub fn classify_references(files: &[FileReferences], index: &KeyIndex) -> ExposureAnalysis {
    let mut analysis = ExposureAnalysis::default();
    let mut seen: HashMap<(String, String), Slot> = HashMap::new();

    for reference in files.iter().flat_map(|f| f.references.iter()) {
        let id = (reference.namespace.clone(), reference.key.clone());

        match seen.get(&id) {
            Some(Slot::Valid) => {}
            Some(Slot::Exposed(i)) => analysis.exposed[*i]
                .usage
                .others
                .push(reference.context.clone()),
            Some(Slot::Covered(i)) => analysis.covered[*i]
                .usage
                .others
                .push(reference.context.clone()),
            None => {
                let slot = classify(reference, index, &mut analysis);
                seen.insert(id, slot);
            }
        }
    }

    tracing::debug!(
        exposed = analysis.exposed.len(),
        covered = analysis.covered.len(),
        used = analysis.used_keys.len(),
        "classified references"
    );

    analysis
}

fn classify(reference: &SourceReference, index: &KeyIndex, analysis: &mut ExposureAnalysis) -> Slot {
    let reason = match index.contains(&reference.namespace, &reference.key) {
        Some(true) => {
            analysis
                .used_keys
                .insert((reference.namespace.clone(), reference.key.clone()));
            return Slot::Valid;
        }
        Some(false) => ExposureReason::MissingKey,
        None => ExposureReason::UnknownNamespace,
    };

    let usage = KeyUsage::new(&reference.namespace, &reference.key, reference.context.clone())
        .with_provenance(reference.provenance);

    // An unknown namespace has no dictionary to fall back from.
    if reference.has_fallback && reason == ExposureReason::MissingKey {
        analysis.covered.push(CoveredKeyIssue { usage });
        Slot::Covered(analysis.covered.len() - 1)
    } else {
        analysis.exposed.push(ExposedKeyIssue { usage, reason });
        Slot::Exposed(analysis.exposed.len() - 1)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use pretty_assertions::assert_eq;
    use tempfile::{TempDir, tempdir};

    use super::*;
    use crate::core::{Provenance, extract::extract_source};

    fn known() -> Vec<String> {
        ["common", "medical"].map(String::from).to_vec()
    }

    fn index_with(common: &str) -> (TempDir, KeyIndex) {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("en")).unwrap();
        fs::write(dir.path().join("en/common.json"), common).unwrap();
        fs::write(
            dir.path().join("en/medical.json"),
            r#"{"conditions": {"title": "Conditions"}}"#,
        )
        .unwrap();
        let index = KeyIndex::load(dir.path(), "en", &known());
        (dir, index)
    }

    fn file(source: &str, path: &str) -> FileReferences {
        extract_source(source, path, "common", &known())
    }

    #[test]
    fn test_absent_key_without_fallback_is_exposed() {
        let (_dir, index) = index_with(r#"{}"#);
        let files = vec![file("t('foo.bar');", "a.tsx")];

        let analysis = classify_references(&files, &index);

        assert_eq!(analysis.exposed.len(), 1);
        assert_eq!(analysis.exposed[0].usage.key, "foo.bar");
        assert_eq!(analysis.exposed[0].reason, ExposureReason::MissingKey);
        assert!(analysis.covered.is_empty());
        assert!(analysis.used_keys.is_empty());
    }

    #[test]
    fn test_present_key_is_valid() {
        let (_dir, index) = index_with(r#"{"foo": {"bar": "Bar"}}"#);
        let files = vec![file("t('foo.bar');", "a.tsx")];

        let analysis = classify_references(&files, &index);

        assert!(analysis.exposed.is_empty());
        assert!(analysis.covered.is_empty());
        assert!(
            analysis
                .used_keys
                .contains(&("common".to_string(), "foo.bar".to_string()))
        );
    }

    #[test]
    fn test_absent_key_with_fallback_is_covered() {
        let (_dir, index) = index_with(r#"{}"#);
        let files = vec![file("t('foo.bar', 'Fallback');", "a.tsx")];

        let analysis = classify_references(&files, &index);

        assert!(analysis.exposed.is_empty());
        assert_eq!(analysis.covered.len(), 1);
        assert_eq!(analysis.covered[0].usage.key, "foo.bar");
    }

    #[test]
    fn test_prefixed_key_resolves_against_its_namespace() {
        let (_dir, index) = index_with(r#"{}"#);
        let files = vec![
            file("t('medical:conditions.title');", "a.tsx"),
            file(
                "const { t } = useTranslation('medical');\nt('conditions.title');",
                "b.tsx",
            ),
        ];

        let analysis = classify_references(&files, &index);

        assert!(analysis.exposed.is_empty());
        assert_eq!(analysis.used_keys.len(), 1);
    }

    #[test]
    fn test_unknown_namespace_is_exposed() {
        let (_dir, index) = index_with(r#"{}"#);
        let files = vec![file(
            "const { t } = useTranslation('billing');\nt('invoice.title', 'Invoice');",
            "a.tsx",
        )];

        let analysis = classify_references(&files, &index);

        assert_eq!(analysis.exposed.len(), 1);
        assert_eq!(analysis.exposed[0].usage.namespace, "billing");
        assert_eq!(analysis.exposed[0].reason, ExposureReason::UnknownNamespace);
    }

    #[test]
    fn test_namespace_without_dictionary_is_exposed_despite_fallback() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("en")).unwrap();
        fs::write(dir.path().join("en/common.json"), "{}").unwrap();
        let vocabulary = ["common", "admin"].map(String::from).to_vec();
        let index = KeyIndex::load(dir.path(), "en", &vocabulary);

        let files = vec![extract_source(
            "t('admin:users.title', 'Users');",
            "a.tsx",
            "common",
            &vocabulary,
        )];
        let analysis = classify_references(&files, &index);

        assert!(analysis.covered.is_empty());
        assert_eq!(analysis.exposed.len(), 1);
        assert_eq!(analysis.exposed[0].usage.namespace, "admin");
        assert_eq!(analysis.exposed[0].reason, ExposureReason::UnknownNamespace);
    }

    #[test]
    fn test_duplicates_merge_into_one_entry() {
        let (_dir, index) = index_with(r#"{}"#);
        let files = vec![
            file("t('buttons.save');", "./src/a.tsx"),
            file("\nt('buttons.save');", "./src/b.tsx"),
        ];

        let analysis = classify_references(&files, &index);

        assert_eq!(analysis.exposed.len(), 1);
        assert_eq!(
            analysis.exposed[0].usage.locations(),
            vec!["./src/a.tsx:1", "./src/b.tsx:2"]
        );
    }

    // The first reference decides the classification, even when a later
    // duplicate would classify differently.
    #[test]
    fn test_first_seen_classification_wins() {
        let (_dir, index) = index_with(r#"{}"#);

        let exposed_first = vec![
            file("t('promo.title');", "a.tsx"),
            file("t('promo.title', 'Promo');", "b.tsx"),
        ];
        let analysis = classify_references(&exposed_first, &index);
        assert_eq!(analysis.exposed.len(), 1);
        assert_eq!(analysis.exposed[0].usage.locations().len(), 2);
        assert!(analysis.covered.is_empty());

        let covered_first = vec![
            file("t('promo.title', 'Promo');", "a.tsx"),
            file("t('promo.title');", "b.tsx"),
        ];
        let analysis = classify_references(&covered_first, &index);
        assert!(analysis.exposed.is_empty());
        assert_eq!(analysis.covered.len(), 1);
        assert_eq!(analysis.covered[0].usage.locations().len(), 2);
    }

    #[test]
    fn test_dynamic_references_are_never_classified() {
        let (_dir, index) = index_with(r#"{}"#);
        let files = vec![file("t(`greeting.${lang}`);\nt(labelKey);", "a.tsx")];

        let analysis = classify_references(&files, &index);

        assert!(analysis.exposed.is_empty());
        assert!(analysis.covered.is_empty());
        assert_eq!(files[0].dynamic.len(), 2);
        assert_eq!(files[0].dynamic[0].expression, "`greeting.${lang}`");
    }

    #[test]
    fn test_key_property_with_sibling_is_covered() {
        let (_dir, index) = index_with(r#"{}"#);
        let source = "const items = [\n  {\n    titleKey: 'menu.home',\n    title: 'Home',\n  },\n  { labelKey: 'menu.about' },\n];";
        let files = vec![file(source, "a.tsx")];

        let analysis = classify_references(&files, &index);

        assert_eq!(analysis.covered.len(), 1);
        assert_eq!(analysis.covered[0].usage.key, "menu.home");
        assert_eq!(analysis.exposed.len(), 1);
        assert_eq!(analysis.exposed[0].usage.key, "menu.about");
        assert_eq!(analysis.exposed[0].usage.provenance, Provenance::Property);
    }
}
