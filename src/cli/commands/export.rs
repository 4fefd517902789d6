use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::export::ExportLogic;
use crate::store;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Export {
        format,
        file,
        range,
        table,
        force,
    } = cmd
    {
        let mut store = store::open(cfg)?;
        ExportLogic::export(store.as_mut(), *format, file, range, *table, *force)?;
    }
    Ok(())
}
