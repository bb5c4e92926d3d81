//! Prospect list pane.

use ratatui::{
  Frame,
  layout::Rect,
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};

use crate::app::App;

/// Render the visible prospects into `area`.
pub fn draw(f: &mut Frame, area: Rect, app: &App) {
  let visible = app.visible();
  let total = app.repo.len();

  // Title with count.
  let title = format!(" {} ({}/{}) ", app.filter.title(), visible.len(), total);

  let block = Block::default()
    .title(title)
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));

  if visible.is_empty() {
    let inner = block.inner(area);
    f.render_widget(block, area);
    f.render_widget(
      Paragraph::new(Span::styled(
        "Nobody here yet. Press a to scan.",
        Style::default().fg(Color::DarkGray),
      )),
      inner,
    );
    return;
  }

  let items: Vec<ListItem> = visible
    .iter()
    .map(|prospect| {
      let (marker, marker_style) = if prospect.is_contacted() {
        ("✔ ", Style::default().fg(Color::Green))
      } else {
        ("✘ ", Style::default().fg(Color::Magenta))
      };

      ListItem::new(Line::from(vec![
        Span::styled(marker, marker_style),
        Span::styled(
          prospect.name.clone(),
          Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(
          prospect.email_address.clone(),
          Style::default().fg(Color::DarkGray),
        ),
      ]))
    })
    .collect();

  // Scrollable list with cursor tracking.
  let mut state = ListState::default();
  state.select(Some(app.list_cursor));

  f.render_stateful_widget(
    List::new(items)
      .block(block)
      .highlight_style(
        Style::default()
          .bg(Color::Blue)
          .fg(Color::White)
          .add_modifier(Modifier::BOLD),
      )
      .highlight_symbol(""),
    area,
    &mut state,
  );
}
