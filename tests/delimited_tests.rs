// Integration tests for delimited-text import

use ferrite_playground::dataset::{load_delimited_with, load_from_delimited, DelimitedOptions};
use ferrite_playground::PlaygroundError;

#[test]
fn label_only_scenario_builds_vocabulary() {
    let import = load_from_delimited("a,b,1\nc,d,2\n", &[], 2, false).unwrap();
    assert_eq!(import.vocabulary.labels(), ["1".to_owned(), "2".to_owned()]);
    assert_eq!(import.vocabulary.index_of("1"), Some(0));
    assert_eq!(import.vocabulary.index_of("2"), Some(1));
    assert_eq!(import.dataset.len(), 2);
    assert_eq!(import.dataset.feature_dim(), 0);
    assert_eq!(import.dataset.class_indices(), vec![0, 1]);
    assert!(import.warnings.is_empty());
}

#[test]
fn header_is_skipped_and_features_parsed() {
    let text = "x,y,kind\n1.5,-2,cat\n\n0,3.25,dog\n4,4,cat\n";
    let import = load_from_delimited(text, &[0, 1], 2, true).unwrap();
    assert_eq!(import.dataset.inputs(), vec![vec![1.5, -2.0], vec![0.0, 3.25], vec![4.0, 4.0]]);
    assert_eq!(import.dataset.targets()[1], vec![0.0, 1.0]);
    assert_eq!(import.vocabulary.len(), 2);
}

#[test]
fn malformed_input_cell_becomes_zero_with_warning() {
    let import = load_from_delimited("1,oops,a\n2,3,b\n", &[0, 1], 2, false).unwrap();
    assert_eq!(import.dataset.inputs()[0], vec![1.0, 0.0]);
    assert_eq!(import.warnings.len(), 1);
    let w = &import.warnings[0];
    assert_eq!((w.row, w.column, w.cell.as_str()), (1, 1, "oops"));
}

#[test]
fn non_finite_input_cells_become_zero_with_warning() {
    let import = load_from_delimited("nan,inf,a\n1,-infinity,b\n", &[0, 1], 2, false).unwrap();
    assert_eq!(import.dataset.inputs(), vec![vec![0.0, 0.0], vec![1.0, 0.0]]);
    assert!(import.dataset.inputs().iter().flatten().all(|v| v.is_finite()));
    let cells: Vec<&str> = import.warnings.iter().map(|w| w.cell.as_str()).collect();
    assert_eq!(cells, vec!["nan", "inf", "-infinity"]);
}

#[test]
fn missing_input_column_warns() {
    let import = load_from_delimited("1,a\n", &[0, 5], 1, false).unwrap();
    assert_eq!(import.dataset.inputs()[0], vec![1.0, 0.0]);
    assert_eq!(import.warnings[0].column, 5);
}

#[test]
fn missing_label_is_an_error_naming_the_row() {
    let err = load_from_delimited("h1,h2\n1,a\n2\n", &[0], 1, true).unwrap_err();
    match err {
        PlaygroundError::InvalidArgument(msg) => assert!(msg.contains("row 3"), "{msg}"),
        other => panic!("unexpected error {other:?}"),
    }
    assert!(load_from_delimited("1,\n", &[0], 1, false).is_err());
}

#[test]
fn empty_and_header_only_inputs_are_errors() {
    assert!(load_from_delimited("", &[0], 1, false).is_err());
    assert!(load_from_delimited("a,b\n\n", &[0], 1, true).is_err());
}

#[test]
fn quoted_fields_and_custom_delimiter() {
    let options = DelimitedOptions {
        delimiter: ';',
        has_header: false,
        input_columns: vec![0],
        label_column: 1,
    };
    let import = load_delimited_with("2.5;\"big; red\"\n1;\"say \"\"hi\"\"\"\n", &options).unwrap();
    assert_eq!(import.vocabulary.labels(), ["big; red".to_owned(), "say \"hi\"".to_owned()]);
    assert_eq!(import.dataset.inputs(), vec![vec![2.5], vec![1.0]]);
}
