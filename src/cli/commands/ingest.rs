use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::ingest::IngestLogic;
use crate::core::query::selection;
use crate::core::report::render_summary;
use crate::errors::AppResult;
use crate::export::{ExportLogic, ExportModel};
use crate::ui::messages::{header, info, warning};
use crate::utils::fmt_hours;
use std::path::Path;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Ingest {
        workbook,
        project,
        machine,
        export,
        format,
        force,
    } = cmd
    {
        let project = selection(project, |s| s.to_string());
        let machine = selection(machine, |s| s.to_string());

        let summary = IngestLogic::run(Path::new(workbook), &project, &machine)?;
        let sep = cfg.separator();

        for issue in &summary.report.issues {
            warning(format!(
                "Sheet '{}' skipped, missing column(s): {}",
                issue.sheet,
                issue.missing.join(", ")
            ));
        }

        let invalid = summary.report.invalid_rows();
        if invalid > 0 {
            warning(format!("{invalid} row(s) with a non-numeric machining time were left out of the totals."));
        }

        header(format!("Machining time from {workbook}"));
        info(format!(
            "Sheets: {} | Rows: {} | Hours: {}",
            summary.report.sheets.join(", "),
            summary.rows.len(),
            fmt_hours(summary.rows.iter().filter_map(|r| r.hours.get()).sum())
        ));

        if summary.rows.is_empty() {
            warning("No rows match the selected filters.");
            return Ok(());
        }

        for agg in &summary.summaries {
            header(format!("Total {}", agg.title()));
            print!("{}", render_summary(agg, sep));
        }

        if let Some(out) = export {
            let model = ExportModel::from_ingest(&summary, sep);
            ExportLogic::export(&model, *format, out, *force)?;
        }
    }
    Ok(())
}
