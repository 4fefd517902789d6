use crate::cli::parser::Commands;
use crate::config::{Config, StorageKind};
use crate::db::migrate::run_pending_migrations;
use crate::db::pool::DbPool;
use crate::db::stats;
use crate::errors::{AppError, AppResult};
use crate::utils::colors::{CYAN, GREEN, RED, RESET, YELLOW};

fn get_pool<'a>(pool: &'a mut Option<DbPool>, db_path: &str) -> AppResult<&'a mut DbPool> {
    if pool.is_none() {
        *pool = Some(DbPool::new(db_path)?);
    }
    pool.as_mut()
        .ok_or_else(|| AppError::Config("database connection unavailable".to_string()))
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Db {
        migrate,
        check,
        vacuum,
        info,
    } = cmd
    {
        if cfg.storage == StorageKind::Memory {
            return Err(AppError::Config(
                "database maintenance needs the SQLite store".to_string(),
            ));
        }

        let mut pool: Option<DbPool> = None;

        if *migrate {
            let pool = get_pool(&mut pool, &cfg.database)?;
            println!("{}▶ Running migrations…{}", CYAN, RESET);
            let applied = run_pending_migrations(&pool.conn)?;
            if applied == 0 {
                println!("{}✔ Schema already up to date.{}\n", GREEN, RESET);
            } else {
                println!(
                    "{}✔ Migration completed ({} applied).{}\n",
                    GREEN, applied, RESET
                );
            }
        }

        if *info {
            let pool = get_pool(&mut pool, &cfg.database)?;
            stats::print_db_info(&pool.conn, &cfg.database)?;
        }

        if *check {
            let pool = get_pool(&mut pool, &cfg.database)?;

            println!("{}▶ Running integrity check…{}", CYAN, RESET);

            let integrity: String = pool
                .conn
                .query_row("PRAGMA integrity_check;", [], |row| row.get(0))?;

            if integrity == "ok" {
                println!("{}✔ Integrity check passed.{}", GREEN, RESET);
            } else {
                println!("{}✘ Integrity check failed:{} {}", RED, RESET, integrity);
            }

            run_pending_migrations(&pool.conn)?;
            let issues = stats::find_data_issues(&pool.conn)?;
            if issues.total() == 0 {
                println!("{}✔ Stored values are valid.{}\n", GREEN, RESET);
            } else {
                println!(
                    "{}⚠ {} rows hold values outside the allowed sets:{}",
                    YELLOW,
                    issues.total(),
                    RESET
                );
                println!("    overtime status:        {}", issues.bad_status);
                println!("    overtime audit status:  {}", issues.bad_audit_status);
                println!("    negative overtime hours: {}", issues.negative_hours);
                println!("    duty status:            {}", issues.bad_duty_status);
                println!("    duty shift:             {}", issues.bad_shift);
                println!("    negative uncovered hours: {}\n", issues.negative_uncovered);
            }
        }

        if *vacuum {
            let pool = get_pool(&mut pool, &cfg.database)?;
            println!("{}▶ Running VACUUM…{}", CYAN, RESET);

            pool.conn.execute_batch("VACUUM;")?;

            println!("{}✔ Vacuum completed.{}\n", GREEN, RESET);
        }
    }

    Ok(())
}
