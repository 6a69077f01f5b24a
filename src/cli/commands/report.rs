use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::query::QueryLogic;
use crate::core::report::{Report, render_rows, render_summary};
use crate::errors::AppResult;
use crate::store;
use crate::ui::messages::{header, info, warning};
use crate::utils::fmt_hours;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Report { filters, by, rows } = cmd {
        let log_store = store::open(&cfg.store_path(), &cfg.sheet_name)?;
        let Some(table) = QueryLogic::load(log_store.as_ref())? else {
            return Ok(());
        };

        let spec = QueryLogic::filter_spec(filters, &table)?;
        let groupings = QueryLogic::groupings(by)?;
        let report = Report::build(&table, &spec, &groupings)?;
        let sep = cfg.separator();

        header(&report.title);
        info(format!(
            "Records: {} of {} | Hours: {}",
            report.rows.len(),
            report.loaded,
            fmt_hours(report.total_hours())
        ));

        if report.rows.is_empty() {
            warning("No records match the selected filters.");
            return Ok(());
        }

        if *rows {
            header("Filtered logs");
            print!("{}", render_rows(report.rows.rows(), sep));
        }

        for agg in &report.summaries {
            header(format!("Total {}", agg.title()));
            print!("{}", render_summary(agg, sep));
        }
    }
    Ok(())
}
