//! Terminal rendering of the timeline.

use crate::config::{Domain, Theme};
use crate::core::render::{EventCard, MinorMarker, TimelineView, YearHeader};
use crate::core::stats::Summary;
use crate::errors::AppResult;
use crate::utils::formatting::{pad_right, ratio};
use ansi_term::{Colour, Style};
use std::io::Write;

const TITLE_WIDTH: usize = 48;
const TEXT_WIDTH: usize = 76;
const INDENT: &str = "     ";

pub struct TerminalView<W: Write> {
    out: W,
    color: bool,
    accent: Colour,
    domain: Domain,
}

impl<W: Write> TerminalView<W> {
    pub fn new(out: W, theme: &Theme, domain: &Domain) -> Self {
        Self {
            out,
            color: theme.color,
            accent: accent_colour(&theme.accent),
            domain: domain.clone(),
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn label<'a>(&'a self, key: &'a str) -> &'a str {
        self.domain.label(key)
    }

    fn paint(&self, style: Style, text: &str) -> String {
        if self.color {
            style.paint(text).to_string()
        } else {
            text.to_string()
        }
    }
}

fn accent_colour(name: &str) -> Colour {
    match name.to_lowercase().as_str() {
        "red" => Colour::Red,
        "green" => Colour::Green,
        "yellow" => Colour::Yellow,
        "blue" => Colour::Blue,
        "purple" | "magenta" => Colour::Purple,
        "white" => Colour::White,
        _ => Colour::Cyan,
    }
}

impl<W: Write> TimelineView for TerminalView<W> {
    fn clear(&mut self) -> AppResult<()> {
        self.out.flush()?;
        Ok(())
    }

    fn year_header(&mut self, header: &YearHeader) -> AppResult<()> {
        let arrow = if header.collapsed { "▸" } else { "▾" };
        let text = format!("{arrow} {} ({})", header.label, header.count);
        let line = self.paint(self.accent.bold(), &text);
        writeln!(self.out, "\n{line}")?;
        Ok(())
    }

    fn event_card(&mut self, card: &EventCard) -> AppResult<()> {
        let pin = if card.pinned { "📌" } else { "  " };
        let seen = if card.watched { "✔" } else { " " };
        let title = pad_right(&card.title, TITLE_WIDTH);
        let title = self.paint(Style::new().bold(), &title);

        let meta: Vec<&str> = [&card.classification, &card.format, &card.period]
            .into_iter()
            .filter_map(|v| v.as_deref())
            .collect();
        let meta = self.paint(Colour::Fixed(245).normal(), &meta.join(" · "));

        writeln!(self.out, "  {pin} {seen} [{:>4}] {title} {meta}", card.id)?;

        let mut details = Vec::new();
        if let Some(date) = &card.date {
            details.push(format!("{}: {date}", self.label("Date")));
        }
        if !card.platforms.is_empty() {
            details.push(format!(
                "{}: {}",
                self.label("WatchOn"),
                card.platforms.join(", ")
            ));
        }
        if let Some((n, d)) = card.rating {
            details.push(format!("{}: {n}/{d}", self.label("HistoricalAccuracy")));
        }
        if !details.is_empty() {
            writeln!(self.out, "{INDENT}{}", details.join(" | "))?;
        }

        if let Some(desc) = &card.description {
            let opts = textwrap::Options::new(TEXT_WIDTH)
                .initial_indent(INDENT)
                .subsequent_indent(INDENT);
            writeln!(self.out, "{}", textwrap::fill(desc, opts))?;
        }
        if let Some(notes) = &card.notes {
            let line = format!("{INDENT}{}: {notes}", self.label("Notes"));
            writeln!(self.out, "{line}")?;
        }
        if let Some(url) = &card.wikipedia {
            writeln!(self.out, "{INDENT}🔗 {url}")?;
        }
        Ok(())
    }

    fn minor_marker(&mut self, marker: &MinorMarker) -> AppResult<()> {
        let pin = if marker.pinned { "📌" } else { "  " };
        let date = marker.date.as_deref().unwrap_or(&marker.year);
        let line = format!("  {pin} · [{:>4}] {date}  {}", marker.id, marker.title);
        let line = self.paint(Style::new().dimmed(), &line);
        writeln!(self.out, "{line}")?;
        Ok(())
    }

    fn placeholder(&mut self, message: &str) -> AppResult<()> {
        let line = self.paint(Style::new().italic(), message);
        writeln!(self.out, "\n{line}")?;
        Ok(())
    }

    fn stats(&mut self, summary: &Summary) -> AppResult<()> {
        let classes: Vec<String> = summary
            .classifications
            .iter()
            .map(|(k, n)| format!("{k} {n}"))
            .collect();
        let platforms: Vec<String> = summary
            .top_platforms
            .iter()
            .map(|(k, n)| format!("{k} {n}"))
            .collect();

        let lines = [
            self.paint(self.accent.bold(), "── Stats ──"),
            format!("Selected: {} of {}", summary.selected, summary.total),
            format!(
                "{}: {}",
                self.label("Watched"),
                ratio(summary.watched, summary.selected, summary.watched_percent)
            ),
            format!(
                "{}: {}",
                self.label("Pinned"),
                ratio(summary.pinned, summary.selected, summary.pinned_percent)
            ),
            format!("{}: {}", self.label("Classification"), classes.join(" · ")),
            format!("Top platforms: {}", platforms.join(", ")),
        ];

        writeln!(self.out, "\n{}", lines.join("\n"))?;
        Ok(())
    }
}
