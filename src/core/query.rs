use crate::cli::parser::FilterArgs;
use crate::engine::{DateRange, FilterSpec, Selection};
use crate::errors::AppResult;
use crate::models::{LogTable, Shift};
use crate::schema::LogField;
use crate::store::LogStore;
use crate::ui::messages::warning;
use crate::utils::range::parse_range;

pub struct QueryLogic;

impl QueryLogic {
    /// Load the log for this session. Returns None (after telling the user)
    /// when there is nothing to report on yet.
    pub fn load(store: &dyn LogStore) -> AppResult<Option<LogTable>> {
        let table = store.load()?;

        if table.is_empty() {
            warning(format!("No data found in {}.", store.path().display()));
            return Ok(None);
        }

        let invalid = table.invalid_rows();
        if invalid > 0 {
            warning(format!(
                "{invalid} row(s) with invalid values: rows with an invalid date are hidden, rows with invalid hours are listed but left out of totals."
            ));
        }

        Ok(Some(table))
    }

    /// Turn CLI filter flags into a FilterSpec for `table`.
    pub fn filter_spec(args: &FilterArgs, table: &LogTable) -> AppResult<FilterSpec> {
        let mut spec = FilterSpec::all(table);

        spec.machine = selection(&args.machine, |s| s.to_string());
        spec.project = selection(&args.project, |s| s.to_string());
        spec.operator = selection(&args.operator, |s| s.to_string());
        spec.shift = selection(&args.shift, Shift::canonical_label);

        if let Some(r) = &args.range {
            if !r.eq_ignore_ascii_case("all") {
                let (start, end) = parse_range(r)?;
                spec.date_range = DateRange::new(start, end)?;
            } else {
                spec.date_range = DateRange::unbounded();
            }
        }

        Ok(spec)
    }

    /// `--by machine,project --by operator` → [[Machine, Project], [Operator]].
    /// Empty input gives the default machine / project / operator summaries.
    pub fn groupings(by: &[String]) -> AppResult<Vec<Vec<LogField>>> {
        if by.is_empty() {
            return Ok(vec![
                vec![LogField::Machine],
                vec![LogField::Project],
                vec![LogField::Operator],
            ]);
        }

        by.iter()
            .map(|group| {
                group
                    .split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(LogField::from_name)
                    .collect::<AppResult<Vec<_>>>()
            })
            .collect()
    }
}

/// None → All; Some(values) → exactly the non-blank values (possibly none).
pub fn selection(values: &Option<Vec<String>>, map: fn(&str) -> String) -> Selection {
    match values {
        None => Selection::All,
        Some(v) => Selection::only(
            v.iter()
                .map(|s| s.trim())
                .filter(|s| !s.is_empty())
                .map(map),
        ),
    }
}
