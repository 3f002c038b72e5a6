/// End-to-end extractor tests against real DICOM files.
///
/// Fixtures are written with the `dicom` crate into a temporary directory,
/// so the full open → partial decode → field conversion path is exercised
/// with zero mocking.
mod common;

use dicomsleuth_core::error::SkipKind;
use dicomsleuth_core::extract::extract_file;
use dicomsleuth_core::model::schema::DEFAULT_FIELDS;
use dicomsleuth_core::model::{FieldKind, FieldSpec, TagSchema, TagValue};
use tempfile::TempDir;

#[test]
fn valid_file_yields_every_default_field() {
    let tmp = TempDir::new().expect("failed to create temp dir");
    let path = tmp.path().join("ct.dcm");
    common::write_dicom(&path, 7);

    let schema = TagSchema::default();
    let record = extract_file(&path, &schema).expect("valid DICOM must produce a record");

    assert_eq!(record.path, path);
    assert_eq!(record.values.len(), DEFAULT_FIELDS.len());
    for (name, _, _) in DEFAULT_FIELDS {
        assert!(record.get(name).is_some(), "missing field {name}");
    }

    assert_eq!(record.get("PatientID"), Some(&TagValue::Text("PAT007".into())));
    assert_eq!(record.get("PatientName"), Some(&TagValue::Text("Doe^Jane".into())));
    assert_eq!(record.get("Modality"), Some(&TagValue::Text("CT".into())));
    // UIDs are NUL-padded to even length on disk.
    assert_eq!(
        record.get("SOPInstanceUID"),
        Some(&TagValue::Text("1.2.826.0.1.3680043.2.1125.7".into()))
    );
    assert_eq!(record.get("KVP"), Some(&TagValue::Decimal(120.0)));
    assert_eq!(record.get("InstanceNumber"), Some(&TagValue::Integer(7)));
    assert_eq!(
        record.get("ImagePositionPatient"),
        Some(&TagValue::Decimals(vec![-125.0, -125.0, 30.5]))
    );

    // Not written by the fixture.
    assert_eq!(record.get("StudyDate"), Some(&TagValue::Absent));
    assert_eq!(record.get("NumberOfFrames"), Some(&TagValue::Absent));
    assert_eq!(record.present_count(), 8);
}

#[test]
fn absent_fields_render_as_sentinel() {
    let tmp = TempDir::new().expect("failed to create temp dir");
    let path = tmp.path().join("ct.dcm");
    common::write_dicom(&path, 1);

    let schema = TagSchema::resolve(
        &[
            FieldSpec::new("PatientID", FieldKind::Text),
            FieldSpec::new("SeriesDescription", FieldKind::Text),
        ],
        "*NO_TAG*",
    )
    .unwrap();
    let record = extract_file(&path, &schema).unwrap();

    let line = record.to_line(&schema);
    assert!(line.ends_with("\tPatientID=PAT001\tSeriesDescription=*NO_TAG*"), "{line}");
}

#[test]
fn kind_mismatch_is_absent_not_error() {
    let tmp = TempDir::new().expect("failed to create temp dir");
    let path = tmp.path().join("ct.dcm");
    common::write_dicom(&path, 3);

    // PatientName cannot be read as an integer.
    let schema =
        TagSchema::resolve(&[FieldSpec::new("PatientName", FieldKind::Integer)], "-").unwrap();
    let record = extract_file(&path, &schema).unwrap();
    assert_eq!(record.get("PatientName"), Some(&TagValue::Absent));
}

#[test]
fn garbage_and_empty_files_are_format_skips() {
    let tmp = TempDir::new().expect("failed to create temp dir");
    let noise = tmp.path().join("noise.bin");
    common::write_garbage(&noise, 4096);
    let empty = tmp.path().join("empty.dcm");
    std::fs::write(&empty, b"").unwrap();

    let schema = TagSchema::default();
    for path in [&noise, &empty] {
        let err = extract_file(path, &schema).unwrap_err();
        assert_eq!(err.kind(), SkipKind::Format, "{err}");
        assert_eq!(err.path(), path.as_path());
    }
}

#[test]
fn truncated_dicom_is_format_skip() {
    let tmp = TempDir::new().expect("failed to create temp dir");
    let full = tmp.path().join("full.dcm");
    common::write_dicom(&full, 2);

    // Keep the preamble, magic and part of the meta group only.
    let bytes = std::fs::read(&full).unwrap();
    let cut = tmp.path().join("cut.dcm");
    std::fs::write(&cut, &bytes[..150]).unwrap();

    let err = extract_file(&cut, &TagSchema::default()).unwrap_err();
    assert_eq!(err.kind(), SkipKind::Format, "{err}");
}

#[cfg(unix)]
#[test]
fn unreadable_file_is_permission_skip() {
    use std::os::unix::fs::PermissionsExt;

    let tmp = TempDir::new().expect("failed to create temp dir");
    let path = tmp.path().join("locked.dcm");
    common::write_dicom(&path, 4);
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o000)).unwrap();

    // Privileged users (e.g. root in a container) bypass file modes.
    if std::fs::read(&path).is_ok() {
        return;
    }

    let err = extract_file(&path, &TagSchema::default()).unwrap_err();
    assert_eq!(err.kind(), SkipKind::Permission);
}
