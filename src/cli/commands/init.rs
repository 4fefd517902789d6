use crate::cli::parser::Cli;
use crate::config::{Config, StorageKind};
use crate::errors::AppResult;
use crate::store::{RecordStore, SqliteStore, log_quietly};
use crate::ui::messages::{info, success};

/// Handle the `init` command
///
/// This initializes:
///  - the config directory (if missing)
///  - the configuration file (skipped in test mode)
///  - the SQLite database with every pending migration applied
pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let init_cfg = Config::init_all(cli.db.clone(), cli.test)?;

    if cfg.storage == StorageKind::Memory {
        info("In-memory storage selected: no database file to initialize.");
        return Ok(());
    }

    let db_path = init_cfg.database.clone();

    println!("⚙️  Initializing rOvertime…");
    println!("📄 Config file : {}", Config::config_file().display());
    println!("🗄️  Database   : {}", &db_path);

    let mut store = SqliteStore::open(&db_path)?;
    success(format!("Database initialized at {}", &db_path));

    let overtime = store.count_overtime()?;
    let duties = store.count_duties()?;
    info(format!(
        "{overtime} overtime entries, {duties} uncovered duties stored."
    ));

    log_quietly(
        &mut store,
        "init",
        "Database initialized",
        &format!("Database initialized at {}", &db_path),
    );

    println!("🎉 rOvertime initialization completed!");
    Ok(())
}
