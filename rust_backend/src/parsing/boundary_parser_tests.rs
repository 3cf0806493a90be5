#[cfg(test)]
mod tests {
    use crate::core::domain::PointType;
    use crate::core::EtlError;
    use crate::parsing::boundary_parser::{parse_boundary_records, RECORD_SIZE};
    use proptest::prelude::*;

    /// Format a record exactly as `bound_20.dat` lays it out
    fn format_record(ra: f64, dec: f64, code: &str, flag: char) -> String {
        format!("{:10.7} {:+11.7} {:<4} {}", ra, dec, code, flag)
    }

    #[test]
    fn test_format_helper_matches_record_size() {
        assert_eq!(format_record(22.8714256, 35.1669998, "AND", 'I').len(), RECORD_SIZE);
        assert_eq!(format_record(1.5, -89.0, "SER2", 'O').len(), RECORD_SIZE);
    }

    #[test]
    fn test_parse_file_with_crlf_and_blank_lines() {
        let content = "22.8714256 +35.1669998 AND  I\r\n\r\n22.8714256 +52.6666718 AND  O\r\n";
        let points = parse_boundary_records(content, "bound_20.dat").unwrap();
        assert_eq!(points.len(), 2);
        assert_eq!(points[1].dec_degrees, 52.6666718);
        assert_eq!(points[1].point_type, PointType::Original);
    }

    #[test]
    fn test_error_reports_offending_line() {
        let content = [
            "22.8714256 +35.1669998 AND  I",
            "22.8714256 +52.6666718 AND  O",
            "22.8714256 +5x.6666718 AND  O",
        ]
        .join("\n");

        let err = parse_boundary_records(&content, "bound_20.dat").unwrap_err();
        match &err {
            EtlError::MalformedRecord {
                source_name, line, ..
            } => {
                assert_eq!(source_name, "bound_20.dat");
                assert_eq!(*line, 3);
            }
            other => panic!("unexpected error {:?}", other),
        }
        assert!(err.to_string().starts_with("bound_20.dat:3:"));
    }

    #[test]
    fn test_invalid_point_type_is_rejected() {
        let err = parse_boundary_records("22.8714256 +35.1669998 AND  X", "b").unwrap_err();
        assert!(err.to_string().contains("point type"), "{}", err);
    }

    #[test]
    fn test_delimiter_shifted_record_is_rejected() {
        // Same tokens, single-space separated: the code lands in the wrong columns
        let err = parse_boundary_records("22.8714256 +35.1669998 AND I", "b").unwrap_err();
        assert!(matches!(err, EtlError::MalformedRecord { line: 1, .. }));
    }

    #[test]
    fn test_non_blank_separator_is_rejected() {
        let content = [
            "22.8714256 +35.1669998 AND  I",
            "22.8714256 +35.16699981AND  I",
        ]
        .join("\n");

        let err = parse_boundary_records(&content, "bound_20.dat").unwrap_err();
        assert!(matches!(err, EtlError::MalformedRecord { line: 2, .. }), "{:?}", err);
    }

    #[test]
    fn test_separator_before_type_must_be_blank() {
        let err = parse_boundary_records("22.8714256 +35.1669998 ANDXXI", "b").unwrap_err();
        assert!(matches!(err, EtlError::MalformedRecord { line: 1, .. }));
        assert!(err.to_string().contains("byte 28"), "{}", err);
    }

    proptest! {
        #[test]
        fn prop_every_record_parses_back(
            records in prop::collection::vec(
                (0.0f64..24.0, -90.0f64..90.0, "[A-Z]{3}[A-Z1-2]?", prop::bool::ANY),
                1..50,
            )
        ) {
            let content: String = records
                .iter()
                .map(|(ra, dec, code, original)| {
                    format_record(*ra, *dec, code, if *original { 'O' } else { 'I' }) + "\n"
                })
                .collect();

            let points = parse_boundary_records(&content, "generated").unwrap();
            prop_assert_eq!(points.len(), records.len());
            for (point, (_, _, code, original)) in points.iter().zip(&records) {
                prop_assert_eq!(&point.constellation, code);
                prop_assert_eq!(point.point_type == PointType::Original, *original);
            }
        }
    }
}
