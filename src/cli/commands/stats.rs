use crate::cli::parser::Commands;
use crate::cli::session::open_session;
use crate::config::Config;
use crate::core::render::TimelineView;
use crate::core::stats::compute_stats;
use crate::errors::AppResult;
use crate::ui::TerminalView;
use std::io;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Stats { filters } = cmd {
        let mut session = open_session(cfg)?;
        session.state.set_filter(filters.to_state());

        let state = &session.state;
        let filtered = state.filtered();
        let summary = compute_stats(&filtered, state.dataset().len(), &|id| state.is_pinned(id));

        let stdout = io::stdout();
        let mut view = TerminalView::new(stdout.lock(), &cfg.theme, &cfg.domain);
        view.stats(&summary)?;
    }
    Ok(())
}
