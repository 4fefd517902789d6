use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::backup::BackupLogic;
use crate::errors::AppResult;
use crate::store;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Backup {
        file,
        compress,
        force,
    } = cmd
    {
        let mut store = store::open(cfg)?;
        BackupLogic::backup(store.as_mut(), cfg, file, *compress, *force)?;
    }

    Ok(())
}
