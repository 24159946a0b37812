use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::log::load_log;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use ansi_term::Colour;

/// ANSI colour for an operation name
fn color_for_operation(op: &str) -> Colour {
    match op {
        "pin" => Colour::Green,
        "unpin" => Colour::Red,
        "export" => Colour::Blue,
        "init" => Colour::RGB(255, 153, 51),
        _ => Colour::White,
    }
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if matches!(cmd, Commands::Log { print: true }) {
        let pool = DbPool::new(&cfg.database)?;
        let entries = load_log(&pool.conn)?;

        if entries.is_empty() {
            println!("📜 Internal log is empty.");
            return Ok(());
        }

        let id_w = entries
            .iter()
            .map(|e| e.id.to_string().len())
            .max()
            .unwrap_or(1);

        println!("📜 Internal log:\n");

        for e in entries {
            let date = chrono::DateTime::parse_from_rfc3339(&e.date)
                .map(|dt| dt.format("%FT%T%:z").to_string())
                .unwrap_or(e.date);

            let op = if cfg.theme.color {
                color_for_operation(&e.operation)
                    .paint(e.operation.as_str())
                    .to_string()
            } else {
                e.operation.clone()
            };
            let op_target = if e.target.is_empty() {
                op
            } else {
                format!("{op} ({})", e.target)
            };

            println!("{:>id_w$}: {} | {} => {}", e.id, date, op_target, e.message);
        }
    }

    Ok(())
}
