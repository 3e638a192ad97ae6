// File: crates/chart-core/tests/data.rs
// Purpose: CSV loading: header lookup, numeric coercion, structured errors and file access.

use std::path::PathBuf;

use tvchart_core::data::{BRAND_CSV, SIZE_CSV, TECH_CSV};
use tvchart_core::{BrandRecord, CsvSource, DataError, DataSource, SizeRecord, TechRecord};

fn out_dir() -> PathBuf {
    let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("target/test_out/data");
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn brand_rows_keep_file_order() {
    let csv = "brand,count\nSamsung,1500\nLG,900\nTCL,1200\n";
    let rows = CsvSource::<BrandRecord>::new("brands.csv").read_from(csv.as_bytes()).unwrap();
    assert_eq!(
        rows,
        vec![BrandRecord::new("Samsung", 1500), BrandRecord::new("LG", 900), BrandRecord::new("TCL", 1200)]
    );
}

#[test]
fn headers_match_by_trimmed_lowercase_name_in_any_order() {
    let csv = "Count , Brand\n 12 , Sony \n";
    let rows = CsvSource::<BrandRecord>::new("brands.csv").read_from(csv.as_bytes()).unwrap();
    assert_eq!(rows, vec![BrandRecord::new("Sony", 12)]);
}

#[test]
fn whole_decimal_counts_are_accepted() {
    let csv = "size,count\n55,12.0\n65.0,3\n";
    let rows = CsvSource::<SizeRecord>::new("sizes.csv").read_from(csv.as_bytes()).unwrap();
    assert_eq!(rows, vec![SizeRecord::new(55, 12), SizeRecord::new(65, 3)]);
}

#[test]
fn tech_rows_carry_percentages() {
    let csv = "technology,count,percentage\nLED,1112,68.3\nOLED,331,20.3\n";
    let rows = CsvSource::<TechRecord>::new("tech.csv").read_from(csv.as_bytes()).unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].technology, "LED");
    assert_eq!(rows[0].count, 1112);
    assert_eq!(rows[1].percentage, 20.3);
}

#[test]
fn non_numeric_field_reports_line_column_and_value() {
    let csv = "brand,count\nSamsung,1500\nLG,lots\n";
    let err = CsvSource::<BrandRecord>::new("brands.csv").read_from(csv.as_bytes()).unwrap_err();
    match err {
        DataError::InvalidNumber { path, line, column, value } => {
            assert_eq!(path, PathBuf::from("brands.csv"));
            assert_eq!(line, 3);
            assert_eq!(column, "count");
            assert_eq!(value, "lots");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn negative_and_fractional_counts_are_rejected() {
    for bad in ["-5", "2.5", "NaN", ""] {
        let csv = format!("brand,count\nX,{bad}\n");
        let err = CsvSource::<BrandRecord>::new("b.csv").read_from(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, DataError::InvalidNumber { column: "count", .. }), "{bad:?}: {err:?}");
    }
    let err = CsvSource::<TechRecord>::new("t.csv").read_from("technology,count,percentage\nLED,1,inf\n".as_bytes()).unwrap_err();
    assert!(matches!(err, DataError::InvalidNumber { column: "percentage", .. }));
}

#[test]
fn missing_column_is_named() {
    let csv = "technology,count\nLED,10\n";
    let err = CsvSource::<TechRecord>::new("tech.csv").read_from(csv.as_bytes()).unwrap_err();
    assert!(matches!(err, DataError::MissingColumn { column: "percentage", .. }));
    assert_eq!(err.to_string(), "tech.csv: missing column `percentage`");
}

#[test]
fn ragged_rows_are_malformed_csv() {
    let csv = "brand,count\nSamsung,1500,extra\n";
    let err = CsvSource::<BrandRecord>::new("brands.csv").read_from(csv.as_bytes()).unwrap_err();
    assert!(matches!(err, DataError::Csv { .. }));
}

#[test]
fn header_only_file_is_empty_not_an_error() {
    let rows = CsvSource::<SizeRecord>::new("sizes.csv").read_from("size,count\n".as_bytes()).unwrap();
    assert!(rows.is_empty());
}

#[test]
fn custom_delimiter() {
    let csv = "brand;count\nHisense;700\n";
    let rows = CsvSource::<BrandRecord>::new("b.csv").with_delimiter(b';').read_from(csv.as_bytes()).unwrap();
    assert_eq!(rows, vec![BrandRecord::new("Hisense", 700)]);
}

#[test]
fn load_reads_from_the_site_root() {
    let root = out_dir().join("site");
    std::fs::create_dir_all(root.join("data")).unwrap();
    std::fs::write(root.join(SIZE_CSV), "size,count\n65,400\n32,120\n").unwrap();

    let source = CsvSource::<SizeRecord>::under(&root, SIZE_CSV);
    assert_eq!(source.path(), root.join("data/screenSize.csv"));
    let rows = source.load().unwrap();
    assert_eq!(rows, vec![SizeRecord::new(65, 400), SizeRecord::new(32, 120)]);
}

#[test]
fn missing_file_is_an_open_error() {
    let root = out_dir().join("no-such-site");
    let err = CsvSource::<BrandRecord>::under(&root, BRAND_CSV).load().unwrap_err();
    assert!(matches!(err, DataError::Open { .. }), "{err:?}");
    assert!(err.to_string().contains("tvBrandCount.csv"));
    assert!(std::error::Error::source(&err).is_some());
}

#[test]
fn bundled_dashboard_data_loads() {
    let root = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../dashboard");
    let brands = CsvSource::<BrandRecord>::under(&root, BRAND_CSV).load().unwrap();
    assert!(!brands.is_empty());
    let techs = CsvSource::<TechRecord>::under(&root, TECH_CSV).load().unwrap();
    assert_eq!(techs.len(), 3);
    let pct: f64 = techs.iter().map(|t| t.percentage).sum();
    assert!((pct - 100.0).abs() < 0.5);
}
