use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::add::{AddInput, AddLogic};
use crate::errors::AppResult;
use crate::store;

/// Log one machine usage record.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Add {
        date,
        machine,
        project,
        operator,
        shift,
        start,
        end,
        hours,
        notes,
    } = cmd
    {
        let input = AddInput {
            date: date.clone(),
            machine: machine.clone(),
            project: project.clone(),
            operator: operator.clone(),
            shift: shift.clone(),
            start: start.clone(),
            end: end.clone(),
            hours: hours.clone(),
            notes: notes.clone(),
        };

        let log_store = store::open(&cfg.store_path(), &cfg.sheet_name)?;
        AddLogic::apply(log_store.as_ref(), &input, cfg.shift()?)?;
    }

    Ok(())
}
