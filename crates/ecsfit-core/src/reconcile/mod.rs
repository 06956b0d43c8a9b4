//! Reconciliation of flattened package fields against the canonical dictionary
//!
//! Each package record is classified independently (duplicates produce one
//! row each), then every dictionary path the package never references is
//! reported as `canonical-unused`. Rows are ordered by path; rows sharing a
//! path keep their input order.

mod policy;

pub use policy::{ReconcileOptions, TypePolicy};

use crate::model::{
    Classification, FlatFieldRecord, ReconciliationEntry, SchemaDictionary,
};
use std::collections::BTreeSet;

/// Reconcile with default options (strict type comparison).
pub fn reconcile(
    records: &[FlatFieldRecord],
    dictionary: &SchemaDictionary,
) -> Vec<ReconciliationEntry> {
    reconcile_with(records, dictionary, ReconcileOptions::default())
}

/// Reconcile with explicit options. Total: never fails.
pub fn reconcile_with(
    records: &[FlatFieldRecord],
    dictionary: &SchemaDictionary,
    options: ReconcileOptions,
) -> Vec<ReconciliationEntry> {
    let mut entries = classify_records(records, dictionary, options);
    entries.extend(canonical_unused(
        records.iter().map(|r| r.path.as_str()),
        dictionary,
    ));

    // Stable: duplicate package rows stay in definition order
    entries.sort_by(|a, b| a.path.cmp(&b.path));
    entries
}

/// Classify package records only, without `canonical-unused` rows.
///
/// Used when several record sets (data streams) share one package and
/// unused canonical paths must be computed over their union.
pub fn classify_records(
    records: &[FlatFieldRecord],
    dictionary: &SchemaDictionary,
    options: ReconcileOptions,
) -> Vec<ReconciliationEntry> {
    let mut entries: Vec<ReconciliationEntry> = records
        .iter()
        .map(|record| classify(record, dictionary, options))
        .collect();
    entries.sort_by(|a, b| a.path.cmp(&b.path));
    entries
}

/// `canonical-unused` rows for every dictionary path not in `referenced`,
/// in path order.
pub fn canonical_unused<'a>(
    referenced: impl IntoIterator<Item = &'a str>,
    dictionary: &SchemaDictionary,
) -> Vec<ReconciliationEntry> {
    let referenced: BTreeSet<&str> = referenced.into_iter().collect();
    dictionary
        .iter()
        .filter(|(path, _)| !referenced.contains(path))
        .map(|(path, canonical)| ReconciliationEntry {
            path: path.to_string(),
            classification: Classification::CanonicalUnused,
            package_type: None,
            canonical_type: Some(canonical.field_type.clone()),
            source: None,
        })
        .collect()
}

fn classify(
    record: &FlatFieldRecord,
    dictionary: &SchemaDictionary,
    options: ReconcileOptions,
) -> ReconciliationEntry {
    let package_type = record.declared_type();
    let (classification, canonical_type) = match dictionary.get(&record.path) {
        None => (Classification::Extension, None),
        Some(canonical) => {
            let classification = if options
                .type_policy
                .is_compatible(package_type, &canonical.field_type)
            {
                Classification::Matched
            } else {
                Classification::Conflict
            };
            (classification, Some(canonical.field_type.clone()))
        }
    };

    ReconciliationEntry {
        path: record.path.clone(),
        classification,
        package_type: package_type.map(str::to_string),
        canonical_type,
        source: record.source.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CanonicalFieldRecord;

    fn dict(fields: &[(&str, &str)]) -> SchemaDictionary {
        SchemaDictionary::from_records(
            "test",
            fields
                .iter()
                .map(|(p, t)| CanonicalFieldRecord::new(*p, *t)),
        )
    }

    #[test]
    fn test_empty_inputs_yield_empty_report() {
        assert!(reconcile(&[], &SchemaDictionary::default()).is_empty());
    }

    #[test]
    fn test_untyped_leaf_in_dictionary_is_conflict() {
        let records = vec![FlatFieldRecord::new("user.id", "")];
        let entries = reconcile(&records, &dict(&[("user.id", "keyword")]));

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].classification, Classification::Conflict);
        assert_eq!(entries[0].package_type, None);
        assert_eq!(entries[0].canonical_type.as_deref(), Some("keyword"));
    }

    #[test]
    fn test_family_policy_matches_constant_keyword() {
        let records = vec![FlatFieldRecord::new("event.module", "constant_keyword")];
        let dictionary = dict(&[("event.module", "keyword")]);

        let strict = reconcile(&records, &dictionary);
        assert_eq!(strict[0].classification, Classification::Conflict);

        let family = reconcile_with(
            &records,
            &dictionary,
            ReconcileOptions {
                type_policy: TypePolicy::Family,
            },
        );
        assert_eq!(family[0].classification, Classification::Matched);
    }

    #[test]
    fn test_canonical_unused_over_union_of_sets() {
        let dictionary = dict(&[("a.x", "keyword"), ("b.y", "long"), ("c.z", "ip")]);
        let one = vec![FlatFieldRecord::new("a.x", "keyword")];
        let two = vec![FlatFieldRecord::new("b.y", "long")];

        let unused = canonical_unused(
            one.iter().chain(two.iter()).map(|r| r.path.as_str()),
            &dictionary,
        );

        assert_eq!(unused.len(), 1);
        assert_eq!(unused[0].path, "c.z");
        assert!(classify_records(&one, &dictionary, ReconcileOptions::default())
            .iter()
            .all(|e| e.classification != Classification::CanonicalUnused));
    }
}
