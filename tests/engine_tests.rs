mod common;
use common::{date, row, scenario_table};
use rmachlogger::engine::{Aggregation, DateRange, FilterSpec, Selection, aggregate, filter};
use rmachlogger::errors::AppError;
use rmachlogger::models::{LogTable, Parsed};
use rmachlogger::schema::LogField;

fn hours_by(table: &LogTable, by: &[LogField]) -> Aggregation {
    aggregate(table, by, LogField::Hours).expect("aggregate")
}

#[test]
fn aggregate_by_machine_sums_hours() {
    let table = scenario_table();
    let agg = hours_by(&table, &[LogField::Machine]);

    assert_eq!(agg.len(), 2);
    assert_eq!(agg.get(&["CNC-1"]), Some(7.0));
    assert_eq!(agg.get(&["Robot"]), Some(2.0));
    assert_eq!(agg.excluded, 0);
}

#[test]
fn filter_by_machine_and_single_day() {
    let table = scenario_table();
    let mut spec = FilterSpec::all(&table);
    spec.machine = Selection::only(["CNC-1"]);
    spec.date_range = DateRange::new(date("2024-01-01"), date("2024-01-01")).expect("range");

    let out = filter(&table, &spec);

    assert_eq!(out.len(), 1);
    let r = &out.rows()[0];
    assert_eq!(r.machine, "CNC-1");
    assert_eq!(r.project, "ProjA");
    assert_eq!(r.date.get(), Some(date("2024-01-01")));
    assert_eq!(r.hours.get(), Some(4.0));
}

#[test]
fn filter_is_idempotent() {
    let table = scenario_table();
    let mut spec = FilterSpec::all(&table);
    spec.project = Selection::only(["ProjA"]);

    let once = filter(&table, &spec);
    let twice = filter(&once, &spec);
    assert_eq!(once, twice);
}

#[test]
fn filter_keeps_original_order() {
    let table = scenario_table();
    let mut spec = FilterSpec::all(&table);
    spec.machine = Selection::only(["CNC-1"]);

    let out = filter(&table, &spec);
    let dates: Vec<_> = out.iter().map(|r| r.date.get()).collect();
    assert_eq!(dates, vec![Some(date("2024-01-01")), Some(date("2024-01-02"))]);

    // every kept row appears in the input, in the same relative order
    let mut input = table.iter();
    for kept in out.iter() {
        assert!(input.any(|r| r == kept));
    }
}

#[test]
fn default_spec_keeps_everything() {
    let table = scenario_table();
    let out = filter(&table, &FilterSpec::all(&table));
    assert_eq!(out, table);
}

#[test]
fn empty_selection_matches_nothing() {
    let table = scenario_table();
    let mut spec = FilterSpec::all(&table);
    spec.operator = Selection::none();

    assert!(filter(&table, &spec).is_empty());
}

#[test]
fn predicates_are_and_combined() {
    let table = scenario_table();
    let mut spec = FilterSpec::all(&table);
    spec.machine = Selection::only(["Robot"]);
    spec.project = Selection::only(["ProjB"]);

    assert!(filter(&table, &spec).is_empty());
}

#[test]
fn grouping_partitions_the_total() {
    let table = scenario_table();
    let total = table.total_hours();

    for field in [LogField::Machine, LogField::Project, LogField::Operator, LogField::Date] {
        let agg = hours_by(&table, &[field]);
        assert!((agg.total() - total).abs() < 1e-9, "grouping by {field}");
    }

    let agg = hours_by(&table, &[LogField::Project, LogField::Machine]);
    assert_eq!(agg.get(&["ProjA", "CNC-1"]), Some(4.0));
    assert_eq!(agg.get(&["ProjA", "Robot"]), Some(2.0));
    assert_eq!(agg.get(&["ProjB", "CNC-1"]), Some(3.0));
    assert!((agg.total() - total).abs() < 1e-9);
}

#[test]
fn malformed_hours_excluded_from_sum_but_still_listed() {
    let mut table = scenario_table();
    table.push(row("2024-01-02", "Robot", "ProjB", Parsed::Invalid("N/A".into())));

    let out = filter(&table, &FilterSpec::all(&table));
    assert_eq!(out.len(), 4);
    assert_eq!(out.invalid_rows(), 1);

    let agg = hours_by(&out, &[LogField::Machine]);
    assert_eq!(agg.get(&["Robot"]), Some(2.0));
    assert_eq!(agg.excluded, 1);
    assert_eq!(agg.total(), 9.0);
}

#[test]
fn invalid_date_never_matches_a_range() {
    let mut table = scenario_table();
    let mut bad = row("2024-01-01", "CNC-1", "ProjA", Parsed::Value(1.0));
    bad.date = Parsed::Invalid("32/13/2024".into());
    table.push(bad);

    let spec = FilterSpec::all(&table);
    assert_eq!(filter(&table, &spec).len(), 3);
}

#[test]
fn empty_table_gives_empty_results() {
    let table = LogTable::default();
    let spec = FilterSpec::all(&table);

    assert!(filter(&table, &spec).is_empty());
    let agg = hours_by(&table, &[LogField::Machine]);
    assert!(agg.is_empty());
    assert_eq!(agg.total(), 0.0);
}

#[test]
fn aggregate_rejects_bad_arguments() {
    let table = scenario_table();

    let none: &[LogField] = &[];
    let err = aggregate(&table, none, LogField::Hours).unwrap_err();
    assert!(matches!(err, AppError::InvalidField(_)));

    let by: &[LogField] = &[LogField::Machine];
    let err = aggregate(&table, by, LogField::Project).unwrap_err();
    assert!(matches!(err, AppError::InvalidField(_)));
}

#[test]
fn date_range_rejects_reversed_bounds() {
    let err = DateRange::new(date("2024-02-01"), date("2024-01-01")).unwrap_err();
    assert!(matches!(err, AppError::InvalidRange(_)));
}

#[test]
fn summary_order_is_largest_first() {
    let table = scenario_table();
    let agg = hours_by(&table, &[LogField::Machine]);
    let sorted = agg.sorted_by_total();

    assert_eq!(sorted[0].0, &vec!["CNC-1".to_string()]);
    assert_eq!(sorted[1].0, &vec!["Robot".to_string()]);
    assert_eq!(agg.title(), "Hours by Machine");
}

#[test]
fn table_helpers_report_bounds_and_distinct_values() {
    let table = scenario_table();

    assert_eq!(
        table.date_bounds(),
        Some((date("2024-01-01"), date("2024-01-02")))
    );
    assert_eq!(table.distinct(LogField::Machine), vec!["CNC-1", "Robot"]);
    assert_eq!(table.distinct(LogField::Project), vec!["ProjA", "ProjB"]);
}
