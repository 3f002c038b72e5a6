/// Element value decoding for a single schema field.
///
/// Conversion failures are not errors: a field whose value cannot be read as
/// the requested kind is reported as [`TagValue::Absent`], exactly like a
/// field the file does not carry.
use crate::model::{FieldKind, TagValue};
use dicom::object::mem::InMemElement;

/// Strip the space and NUL padding DICOM uses to even out value lengths.
pub(crate) fn clean(raw: &str) -> String {
    raw.trim_matches(|c: char| c.is_whitespace() || c == '\0')
        .to_string()
}

/// Decode `element` according to `kind`.
pub fn decode_element(element: &InMemElement, kind: FieldKind) -> TagValue {
    match kind {
        FieldKind::Text => decode_text(element),
        FieldKind::Integer => decode_integer(element),
        FieldKind::Decimal => decode_decimal(element),
    }
}

fn decode_text(element: &InMemElement) -> TagValue {
    let values = match element.to_multi_str() {
        Ok(v) => v,
        Err(_) => return TagValue::Absent,
    };
    match values.len() {
        0 => TagValue::Text(String::new()),
        1 => values
            .first()
            .map(|v| TagValue::Text(clean(v)))
            .unwrap_or(TagValue::Absent),
        _ => TagValue::Texts(values.iter().map(|v| clean(v)).collect()),
    }
}

fn decode_integer(element: &InMemElement) -> TagValue {
    if let Ok(v) = element.to_int::<i64>() {
        return TagValue::Integer(v);
    }
    // IS values may carry leading padding that the typed conversion rejects.
    element
        .to_str()
        .ok()
        .and_then(|s| clean(&s).parse::<i64>().ok())
        .map(TagValue::Integer)
        .unwrap_or(TagValue::Absent)
}

fn decode_decimal(element: &InMemElement) -> TagValue {
    let values: Vec<f64> = match element.to_multi_float64() {
        Ok(v) => v,
        Err(_) => match element.to_multi_str() {
            Ok(strs) => {
                let parsed: Option<Vec<f64>> =
                    strs.iter().map(|s| clean(s).parse::<f64>().ok()).collect();
                match parsed {
                    Some(v) => v,
                    None => return TagValue::Absent,
                }
            }
            Err(_) => return TagValue::Absent,
        },
    };

    match values.as_slice() {
        [] => TagValue::Absent,
        [single] => TagValue::Decimal(*single),
        _ => TagValue::Decimals(values),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dicom::core::{DataElement, PrimitiveValue, VR};
    use dicom::dictionary_std::tags;

    fn element(tag: dicom::core::Tag, vr: VR, value: PrimitiveValue) -> InMemElement {
        DataElement::new(tag, vr, value)
    }

    fn strs(values: &[&str]) -> PrimitiveValue {
        PrimitiveValue::Strs(values.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn test_clean_strips_padding() {
        assert_eq!(clean(" 1.2.3\0"), "1.2.3");
        assert_eq!(clean("CT "), "CT");
        assert_eq!(clean(""), "");
    }

    #[test]
    fn test_text_single_and_multi() {
        let single = element(tags::MODALITY, VR::CS, PrimitiveValue::from("CT "));
        assert_eq!(decode_element(&single, FieldKind::Text), TagValue::Text("CT".into()));

        let multi = element(tags::IMAGE_TYPE, VR::CS, strs(&["ORIGINAL", "PRIMARY"]));
        assert_eq!(
            decode_element(&multi, FieldKind::Text),
            TagValue::Texts(vec!["ORIGINAL".into(), "PRIMARY".into()])
        );
    }

    #[test]
    fn test_integer_from_is_string() {
        let is = element(tags::INSTANCE_NUMBER, VR::IS, PrimitiveValue::from(" 7"));
        assert_eq!(decode_element(&is, FieldKind::Integer), TagValue::Integer(7));
    }

    #[test]
    fn test_integer_conversion_failure_is_absent() {
        let garbage = element(tags::INSTANCE_NUMBER, VR::IS, PrimitiveValue::from("seven"));
        assert_eq!(decode_element(&garbage, FieldKind::Integer), TagValue::Absent);
    }

    #[test]
    fn test_decimal_single_and_multi() {
        let kvp = element(tags::KVP, VR::DS, PrimitiveValue::from("120"));
        assert_eq!(decode_element(&kvp, FieldKind::Decimal), TagValue::Decimal(120.0));

        let pos = element(
            tags::IMAGE_POSITION_PATIENT,
            VR::DS,
            strs(&["-125", "-125", "30.5"]),
        );
        assert_eq!(
            decode_element(&pos, FieldKind::Decimal),
            TagValue::Decimals(vec![-125.0, -125.0, 30.5])
        );
    }

    #[test]
    fn test_empty_decimal_is_absent() {
        let empty = element(tags::KVP, VR::DS, PrimitiveValue::Empty);
        assert_eq!(decode_element(&empty, FieldKind::Decimal), TagValue::Absent);
    }
}
