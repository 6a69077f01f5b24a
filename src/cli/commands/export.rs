use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::query::QueryLogic;
use crate::core::report::Report;
use crate::errors::AppResult;
use crate::export::{ExportLogic, ExportModel};
use crate::store;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Export {
        format,
        out,
        filters,
        by,
        force,
    } = cmd
    {
        let log_store = store::open(&cfg.store_path(), &cfg.sheet_name)?;
        let Some(table) = QueryLogic::load(log_store.as_ref())? else {
            return Ok(());
        };

        let spec = QueryLogic::filter_spec(filters, &table)?;
        let groupings = QueryLogic::groupings(by)?;
        let report = Report::build(&table, &spec, &groupings)?;

        let model = ExportModel::from_report(&report, cfg.separator());
        ExportLogic::export(&model, *format, out, *force)?;
    }
    Ok(())
}
