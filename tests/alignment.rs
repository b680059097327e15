//! Property tests for positional alignment between row columns and schema
//! fields.

use apache_avro::types::Value;
use csv2avro::{Error, FieldKind, RecordConverter};
use proptest::prelude::*;

fn long_fields(count: usize) -> RecordConverter {
    RecordConverter::new((0..count).map(|idx| (format!("f{idx}"), FieldKind::Long)))
}

proptest! {
    #[test]
    fn short_or_exact_rows_keep_present_columns(
        values in prop::collection::vec(any::<i64>(), 0..12),
        extra_fields in 0usize..4,
    ) {
        let converter = long_fields(values.len() + extra_fields);
        let row = values.iter().map(|v| v.to_string()).collect::<Vec<_>>();
        let record = converter.convert(row.iter().map(String::as_str)).unwrap();

        prop_assert_eq!(record.len(), values.len());
        for (idx, value) in values.iter().enumerate() {
            let name = format!("f{idx}");
            let expected = Value::Long(*value);
            prop_assert_eq!(record.get(&name), Some(&expected));
        }
        for idx in values.len()..converter.field_count() {
            let name = format!("f{idx}");
            prop_assert!(record.get(&name).is_none());
        }
    }

    #[test]
    fn long_rows_overflow_at_first_excess_column(
        fields in 0usize..8,
        excess in 1usize..5,
    ) {
        let converter = long_fields(fields);
        let row = vec!["1"; fields + excess];
        match converter.convert(row) {
            Err(Error::ColumnOverflow { index, fields: declared }) => {
                prop_assert_eq!(index, fields);
                prop_assert_eq!(declared, fields);
            }
            other => prop_assert!(false, "expected ColumnOverflow, got {:?}", other),
        }
    }

    #[test]
    fn string_fields_pass_text_through(text in ".*") {
        let converter = RecordConverter::new([("s", FieldKind::String)]);
        let record = converter.convert([text.as_str()]).unwrap();
        let expected = Value::String(text.clone());
        prop_assert_eq!(record.get("s"), Some(&expected));
    }

    #[test]
    fn int_accepts_exactly_the_32_bit_range(value in any::<i64>()) {
        let converter = RecordConverter::new([("i", FieldKind::Int)]);
        let text = value.to_string();
        let result = converter.convert([text.as_str()]);
        match i32::try_from(value) {
            Ok(expected) => {
                let record = result.unwrap();
                let expected = Value::Int(expected);
                prop_assert_eq!(record.get("i"), Some(&expected));
            }
            Err(_) => {
                let is_conversion = matches!(result, Err(Error::Conversion { .. }));
                prop_assert!(is_conversion);
            }
        }
    }
}
