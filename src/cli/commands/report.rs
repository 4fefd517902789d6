use crate::cli::commands::build_filter;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::report::{ReportLogic, ReportOptions};
use crate::errors::AppResult;
use crate::store;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Report {
        table,
        filter,
        group_by,
        pivot,
        full,
        json,
        export,
        format,
        force,
    } = cmd
    {
        let opts = ReportOptions {
            table: *table,
            filter: build_filter(filter)?,
            group_by: *group_by,
            pivot: *pivot,
            full: *full,
            json: *json,
            export: export.clone(),
            format: *format,
            force: *force,
        };

        let mut store = store::open(cfg)?;
        ReportLogic::run(store.as_mut(), cfg, &opts)?;
    }
    Ok(())
}
