//! Shared fixtures for the integration tests: genuine DICOM files written
//! with the `dicom` crate, plus non-DICOM noise.
#![allow(dead_code)]

use dicom::core::{DataElement, PrimitiveValue, VR};
use dicom::dictionary_std::{tags, uids};
use dicom::object::{FileMetaTableBuilder, InMemDicomObject};
use std::fs;
use std::path::{Path, PathBuf};

/// Write a small CT instance carrying a subset of the default fields.
///
/// Present: PatientID, PatientName, StudyInstanceUID, SOPInstanceUID,
/// Modality, KVP, InstanceNumber, ImagePositionPatient.
/// Absent: everything else in the default schema.
pub fn write_dicom(path: &Path, index: usize) {
    let sop_uid = format!("1.2.826.0.1.3680043.2.1125.{index}");
    let mut obj = InMemDicomObject::new_empty();
    obj.put(DataElement::new(
        tags::PATIENT_ID,
        VR::LO,
        PrimitiveValue::from(format!("PAT{index:03}")),
    ));
    obj.put(DataElement::new(
        tags::PATIENT_NAME,
        VR::PN,
        PrimitiveValue::from("Doe^Jane"),
    ));
    obj.put(DataElement::new(
        tags::STUDY_INSTANCE_UID,
        VR::UI,
        PrimitiveValue::from("1.2.826.0.1.3680043.2.1125.1"),
    ));
    obj.put(DataElement::new(
        tags::SOP_CLASS_UID,
        VR::UI,
        PrimitiveValue::from(uids::CT_IMAGE_STORAGE),
    ));
    obj.put(DataElement::new(
        tags::SOP_INSTANCE_UID,
        VR::UI,
        PrimitiveValue::from(sop_uid.clone()),
    ));
    obj.put(DataElement::new(
        tags::MODALITY,
        VR::CS,
        PrimitiveValue::from("CT"),
    ));
    obj.put(DataElement::new(tags::KVP, VR::DS, PrimitiveValue::from("120")));
    obj.put(DataElement::new(
        tags::INSTANCE_NUMBER,
        VR::IS,
        PrimitiveValue::from(index.to_string()),
    ));
    obj.put(DataElement::new(
        tags::IMAGE_POSITION_PATIENT,
        VR::DS,
        PrimitiveValue::Strs(
            ["-125", "-125", "30.5"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        ),
    ));

    let file = obj
        .with_meta(
            FileMetaTableBuilder::new()
                .transfer_syntax(uids::EXPLICIT_VR_LITTLE_ENDIAN)
                .media_storage_sop_class_uid(uids::CT_IMAGE_STORAGE)
                .media_storage_sop_instance_uid(sop_uid),
        )
        .unwrap();
    file.write_to_file(path).unwrap();
}

/// Write `n` bytes of non-DICOM noise.
pub fn write_garbage(path: &Path, n: usize) {
    fs::write(path, vec![0x5Au8; n]).unwrap();
}

/// Build a tree of `valid` DICOM files and `garbage` noise files spread over
/// a few nested directories. Returns every file path created.
///
/// ```text
/// root/
///   series_0/ ... series_3/
///     img_NNN.dcm
///     deep/junk_NNN.bin
/// ```
pub fn build_tree(root: &Path, valid: usize, garbage: usize) -> Vec<PathBuf> {
    let mut created = Vec::with_capacity(valid + garbage);
    for i in 0..valid {
        let dir = root.join(format!("series_{}", i % 4));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join(format!("img_{i:03}.dcm"));
        write_dicom(&path, i);
        created.push(path);
    }
    for i in 0..garbage {
        let dir = root.join(format!("series_{}", i % 4)).join("deep");
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join(format!("junk_{i:03}.bin"));
        write_garbage(&path, 64 + i * 100);
        created.push(path);
    }
    created.sort();
    created
}
