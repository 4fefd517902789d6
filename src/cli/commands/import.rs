use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::import::ImportLogic;
use crate::errors::AppResult;
use crate::store;
use crate::utils::path::expand_tilde;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Import {
        file,
        table,
        preview,
        yes,
    } = cmd
    {
        let path = expand_tilde(file);
        let mut store = store::open(cfg)?;
        ImportLogic::import_file(store.as_mut(), cfg, &path, *table, *preview, *yes)?;
    }
    Ok(())
}
