use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::audit::AuditLogic;
use crate::errors::AppResult;
use crate::store;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Audit {
        id,
        status,
        reviewed_by,
        comments,
    } = cmd
    {
        let mut store = store::open(cfg)?;
        AuditLogic::apply(
            store.as_mut(),
            id.trim(),
            status,
            reviewed_by.as_deref(),
            comments.as_deref(),
        )?;
    }
    Ok(())
}
