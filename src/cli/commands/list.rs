use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::query::QueryLogic;
use crate::core::report::render_rows;
use crate::engine::filter;
use crate::errors::AppResult;
use crate::store;
use crate::ui::messages::{header, warning};
use crate::utils::fmt_hours;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::List { filters } = cmd {
        let log_store = store::open(&cfg.store_path(), &cfg.sheet_name)?;
        let Some(table) = QueryLogic::load(log_store.as_ref())? else {
            return Ok(());
        };

        let spec = QueryLogic::filter_spec(filters, &table)?;
        let rows = filter(&table, &spec);

        header(format!("Filtered logs ({} records)", rows.len()));

        if rows.is_empty() {
            warning("No records match the selected filters.");
            return Ok(());
        }

        print!("{}", render_rows(rows.rows(), cfg.separator()));
        println!("\nTotal hours: {}", fmt_hours(rows.total_hours()));
    }
    Ok(())
}
