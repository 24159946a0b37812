use crate::cli::parser::Commands;
use crate::cli::session::open_session;
use crate::config::Config;
use crate::core::Command;
use crate::core::reporter::RetryAction;
use crate::errors::AppResult;
use crate::ui::TerminalView;
use std::io;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::List {
        filters,
        collapse,
        retry,
    } = cmd
    {
        let mut session = open_session(cfg)?;
        for year in collapse {
            session.state.collapse_year(year);
        }

        let stdout = io::stdout();
        let mut view = TerminalView::new(stdout.lock(), &cfg.theme, &cfg.domain);

        session
            .state
            .dispatch(Command::SetFilter(filters.to_state()), &mut view)?;

        // Retry once: a record failing twice stays reported.
        if *retry && let Some(RetryAction::RenderRecords(ids)) = session.reporter.take_retry() {
            session.state.dispatch(Command::RetryRender(ids), &mut view)?;
        }
    }
    Ok(())
}
