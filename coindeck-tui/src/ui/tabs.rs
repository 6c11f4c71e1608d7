//! The MainLayout screen: content area plus bottom tab bar.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Row, Table, Tabs},
    Frame,
};

use crate::app::{AppState, Tab};

/// Render the tab layout: content, status line, tab bar.
pub fn render_main_layout(frame: &mut Frame, area: Rect, state: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),    // Content
            Constraint::Length(1), // Status line
            Constraint::Length(3), // Tab bar
        ])
        .split(area);

    match state.selected_tab {
        Tab::Home => render_placeholder(frame, chunks[0], "Home", "Wallet balance and watchlist"),
        Tab::Portfolio => render_placeholder(frame, chunks[0], "Portfolio", "Your holdings"),
        // The trade button never owns the content area.
        Tab::Trade => {}
        Tab::Market => render_market(frame, chunks[0], state),
        Tab::Profile => render_placeholder(frame, chunks[0], "Profile", "Account and settings"),
    }

    render_status_line(frame, chunks[1], state);
    render_tab_bar(frame, chunks[2], state);
}

fn render_placeholder(frame: &mut Frame, area: Rect, title: &str, hint: &str) {
    let body = Paragraph::new(hint)
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::DarkGray))
        .block(
            Block::default()
                .title(format!(" {title} "))
                .borders(Borders::ALL),
        );
    frame.render_widget(body, area);
}

fn render_market(frame: &mut Frame, area: Rect, state: &AppState) {
    let title = if state.market.loading {
        " Market (refreshing...) "
    } else {
        " Market "
    };
    let block = Block::default().title(title).borders(Borders::ALL);

    if let Some(ref error) = state.market.error {
        let body = Paragraph::new(format!("Refresh failed: {error}\n\nPress r to retry"))
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Red))
            .block(block);
        frame.render_widget(body, area);
        return;
    }

    if state.market.quotes.is_empty() {
        let body = Paragraph::new("No quotes yet. Press r to refresh.")
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(body, area);
        return;
    }

    let rows: Vec<Row> = state
        .market
        .quotes
        .iter()
        .map(|q| {
            let change_style = if q.change_24h_pct < 0.0 {
                Style::default().fg(Color::Red)
            } else {
                Style::default().fg(Color::Green)
            };
            Row::new(vec![
                Span::raw(q.symbol.clone()),
                Span::raw(q.name.clone()),
                Span::raw(format!("{:>12.2}", q.price_usd)),
                Span::styled(format!("{:>+7.2}%", q.change_24h_pct), change_style),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(8),
            Constraint::Min(12),
            Constraint::Length(14),
            Constraint::Length(9),
        ],
    )
    .header(
        Row::new(vec!["Symbol", "Name", "Price (USD)", "24h"])
            .style(Style::default().add_modifier(Modifier::BOLD)),
    )
    .block(block);

    frame.render_widget(table, area);
}

fn render_status_line(frame: &mut Frame, area: Rect, state: &AppState) {
    let text = match &state.status.message {
        Some(message) => Line::from(message.as_str()),
        None => Line::from(Span::styled(
            "1-5 tabs | Tab cycle | t trade | r refresh | q quit",
            Style::default().fg(Color::DarkGray),
        )),
    };
    frame.render_widget(Paragraph::new(text), area);
}

fn render_tab_bar(frame: &mut Frame, area: Rect, state: &AppState) {
    let titles: Vec<Line> = Tab::ALL
        .iter()
        .map(|tab| {
            if *tab == Tab::Trade && state.trade_modal_visible {
                Line::from(Span::styled(
                    tab.title(),
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                ))
            } else {
                Line::from(tab.title())
            }
        })
        .collect();

    let selected = Tab::ALL
        .iter()
        .position(|t| *t == state.selected_tab)
        .unwrap_or(0);

    let bar = Tabs::new(titles)
        .select(selected)
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(bar, area);
}
