use crate::cli::parser::Cli;
use crate::config::Config;
use crate::errors::AppResult;
use crate::models::LogTable;
use crate::store;
use crate::ui::messages::{info, success};

/// Handle the `init` command
///
/// This initializes:
///  - the config directory (if missing)
///  - the configuration file (skipped in test mode)
///  - the log file with its header row (if missing)
pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    if !cli.test {
        cfg.save()?;
        info(format!("Config file : {}", Config::config_file().display()));
    }

    let path = cfg.store_path();
    let log_store = store::open(&path, &cfg.sheet_name)?;

    if log_store.exists() {
        // validates the header of an existing file
        let table = log_store.load()?;
        info(format!(
            "Log file already present: {} ({} records)",
            path.display(),
            table.len()
        ));
    } else {
        log_store.write_all(&LogTable::default())?;
        success(format!("Log file created: {}", path.display()));
    }

    success("rMachLogger initialization completed!");
    Ok(())
}
