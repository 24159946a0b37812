use crate::cli::parser::Commands;
use crate::cli::session::open_session;
use crate::config::Config;
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::export::ExportLogic;
use crate::ui::messages::warning;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Export {
        format,
        file,
        force,
        filters,
    } = cmd
    {
        let mut session = open_session(cfg)?;
        session.state.set_filter(filters.to_state());

        let state = &session.state;
        let filtered = state.filtered();
        let count = ExportLogic::export(
            &filtered,
            &|id| state.is_pinned(id),
            *format,
            file,
            *force,
        )?;

        if count > 0 {
            let logged = DbPool::new(&cfg.database).and_then(|pool| {
                ttlog(
                    &pool.conn,
                    "export",
                    format.as_str(),
                    &format!("{count} record(s) to {file}"),
                )
            });
            if let Err(e) = logged {
                warning(format!("Failed to write internal log: {e}"));
            }
        }
    }
    Ok(())
}
