//! UI rendering
//!
//! Pure rendering functions that transform state into terminal frames; no
//! side effects beyond drawing. The entry point resolves the navigator's
//! active screen and delegates.

pub mod tabs;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use libcoindeck::Navigator;

use crate::app::{AppState, ScreenKind};

/// Render the application UI
///
/// Draws the active route's screen, a header bar only when the route's
/// options ask for one, and the trade modal overlay when visible.
pub fn render(frame: &mut Frame, state: &AppState, nav: &Navigator<ScreenKind>) {
    let mut area = frame.area();

    if nav.header_shown() {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(0)])
            .split(area);
        render_header(frame, chunks[0], nav.current().name.as_str());
        area = chunks[1];
    }

    match nav.current().screen {
        ScreenKind::MainLayout => tabs::render_main_layout(frame, area, state),
    }

    if state.trade_modal_visible {
        render_trade_modal(frame, frame.area());
    }
}

fn render_header(frame: &mut Frame, area: Rect, title: &str) {
    let header = Paragraph::new(title)
        .alignment(Alignment::Center)
        .style(Style::default().add_modifier(Modifier::BOLD))
        .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, area);
}

/// Centered trade modal overlay.
fn render_trade_modal(frame: &mut Frame, area: Rect) {
    let modal_area = centered_rect(40, 9, area);

    let body = Paragraph::new("Buy / Sell\n\nTrading is handled by the exchange\nmodules. Esc to close.")
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .title(" Trade ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        );
    frame.render_widget(ratatui::widgets::Clear, modal_area);
    frame.render_widget(body, modal_area);
}

/// A fixed-size rect centered in `area`, clamped to fit.
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
