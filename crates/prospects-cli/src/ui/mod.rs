//! TUI rendering — orchestrates all panes.

pub mod prospect_list;

use chrono::Local;
use ratatui::{
  Frame,
  layout::{Alignment, Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Paragraph, Tabs},
};

use crate::app::{App, FILTERS};

// ─── Root draw ────────────────────────────────────────────────────────────────

/// Main draw function called each frame.
pub fn draw(f: &mut Frame, app: &App) {
  let area = f.area();

  // Vertical stack: header, tabs, body, status bar.
  let rows = Layout::default()
    .direction(Direction::Vertical)
    .constraints([
      Constraint::Length(1), // header
      Constraint::Length(1), // tabs
      Constraint::Min(0),    // body
      Constraint::Length(1), // status bar
    ])
    .split(area);

  draw_header(f, rows[0], app);
  draw_tabs(f, rows[1], app);
  prospect_list::draw(f, rows[2], app);
  draw_status(f, rows[3], app);
}

// ─── Header ───────────────────────────────────────────────────────────────────

fn draw_header(f: &mut Frame, area: Rect, app: &App) {
  let bar = Style::default().bg(Color::DarkGray);
  let title = Line::from(vec![
    Span::styled(" prospects", bar.fg(Color::White).add_modifier(Modifier::BOLD)),
    Span::styled(format!(" · {}", app.sort.label()), bar.fg(Color::Gray)),
  ]);
  let date = Span::styled(format!("{} ", Local::now().format("%Y-%m-%d")), bar.fg(Color::Black));

  // Columns, not byte-counted padding: the date keeps its display width.
  let [left, right] = Layout::horizontal([
    Constraint::Min(0),
    Constraint::Length(date.width() as u16),
  ])
  .areas(area);

  f.render_widget(Paragraph::new(title).style(bar), left);
  f.render_widget(
    Paragraph::new(date).style(bar).alignment(Alignment::Right),
    right,
  );
}

// ─── Tabs ─────────────────────────────────────────────────────────────────────

fn draw_tabs(f: &mut Frame, area: Rect, app: &App) {
  let titles: Vec<Line> = FILTERS
    .iter()
    .enumerate()
    .map(|(i, filter)| Line::from(format!("{} {}", i + 1, filter.title())))
    .collect();
  let selected = FILTERS.iter().position(|filter| *filter == app.filter).unwrap_or(0);

  f.render_widget(
    Tabs::new(titles)
      .select(selected)
      .style(Style::default().fg(Color::DarkGray))
      .highlight_style(
        Style::default()
          .fg(Color::White)
          .add_modifier(Modifier::BOLD),
      ),
    area,
  );
}

// ─── Status bar ───────────────────────────────────────────────────────────────

fn draw_status(f: &mut Frame, area: Rect, app: &App) {
  let hints = match app.cursor_prospect() {
    Some(p) if !p.is_contacted() => {
      "↑↓/jk move  Tab filter  s sort  ␣ mark contacted  r remind  a scan  q quit"
    }
    Some(_) => "↑↓/jk move  Tab filter  s sort  ␣ mark uncontacted  a scan  q quit",
    None => "Tab filter  s sort  a scan  q quit",
  };

  let status = if app.status_msg.is_empty() {
    hints.to_string()
  } else {
    app.status_msg.clone()
  };

  let mode_span = Span::styled(
    format!(" {} ", app.filter.to_string().to_uppercase()),
    Style::default()
      .fg(Color::Black)
      .bg(Color::Cyan)
      .add_modifier(Modifier::BOLD),
  );
  let hint_span = Span::styled(
    format!("  {status}"),
    Style::default().fg(Color::DarkGray),
  );

  let line = Line::from(vec![mode_span, hint_span]);
  f.render_widget(
    Paragraph::new(line).style(Style::default().bg(Color::Black)),
    area,
  );
}

#[cfg(test)]
mod tests {
  use std::time::Duration;

  use prospects_core::Prospects;
  use prospects_store_json::JsonFileStore;
  use ratatui::{Terminal, backend::TestBackend};
  use tempfile::TempDir;

  use super::*;
  use crate::notifier::TimerNotifier;

  #[tokio::test]
  async fn header_date_is_flush_right_despite_wide_glyphs() {
    let dir = TempDir::new().unwrap();
    let repo = Prospects::initialize(JsonFileStore::open(dir.path().join("Prospects.json"))).await;
    let (notifier, fired) = TimerNotifier::new(false);
    let app = App::new(repo, notifier, fired, Duration::from_secs(5));

    let width = 48;
    let mut terminal = Terminal::new(TestBackend::new(width, 6)).unwrap();
    terminal.draw(|f| draw(f, &app)).unwrap();

    let buffer = terminal.backend().buffer();
    let header: String = (0..width).map(|x| buffer[(x, 0)].symbol()).collect();
    let date = Local::now().format("%Y-%m-%d").to_string();

    assert!(header.starts_with(&format!(" prospects · {}", app.sort.label())));
    assert!(header.ends_with(&format!("{date} ")), "header was {header:?}");
    assert_eq!(header.chars().count(), width as usize);
  }
}
