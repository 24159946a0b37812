use crate::cli::parser::Commands;
use crate::cli::session::open_session;
use crate::config::Config;
use crate::core::Command;
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::TerminalView;
use crate::ui::messages::{success, warning};
use std::io;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Pin { id, filters } = cmd {
        let mut session = open_session(cfg)?;

        let stdout = io::stdout();
        let mut view = TerminalView::new(stdout.lock(), &cfg.theme, &cfg.domain);

        // Set the filter first so the toggle re-renders exactly once.
        session.state.set_filter(filters.to_state());
        session
            .state
            .dispatch(Command::TogglePin { record_id: *id }, &mut view)?;

        let pinned = session.state.is_pinned(*id);
        let title = session
            .state
            .record(*id)
            .map(|r| r.title.clone())
            .unwrap_or_default();

        if pinned {
            success(format!("📌 Pinned #{id} {title}"));
        } else {
            success(format!("Unpinned #{id} {title}"));
        }

        // Audit line (non-blocking)
        let logged = DbPool::new(&cfg.database).and_then(|pool| {
            ttlog(
                &pool.conn,
                if pinned { "pin" } else { "unpin" },
                &id.to_string(),
                &title,
            )
        });
        if let Err(e) = logged {
            warning(format!("Failed to write internal log: {e}"));
        }
    }
    Ok(())
}
