mod components;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::app::{App, Popup};
use crate::stats::{DigitView, Distribution};
use crate::theme::Chrome;

use components::{DigitCircle, Legend};

pub fn draw(f: &mut Frame, app: &App) {
    let area = f.area();
    let chrome = app.theme.chrome();
    let distribution = app.distribution();
    let (first_row, second_row) = distribution.rows();

    f.render_widget(
        Block::default().style(Style::default().bg(chrome.background)),
        area,
    );

    let legend_height = if app.show_legend { 2 } else { 0 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(0)
        .constraints([
            Constraint::Length(1),             // Info line
            Constraint::Length(legend_height), // Legend (+ spacing)
            Constraint::Length(1),             // "Digits 0-4"
            Constraint::Ratio(1, 2),           // Row 0-4
            Constraint::Length(1),             // "Digits 5-9"
            Constraint::Ratio(1, 2),           // Row 5-9
            Constraint::Length(1),             // Footer
        ])
        .split(area);

    draw_info_line(f, app, &distribution, &chrome, chunks[0]);
    if app.show_legend {
        f.render_widget(Legend { theme: app.theme }, chunks[1]);
    }
    draw_row_heading(f, &chrome, "Digits 0-4", chunks[2]);
    draw_digit_row(f, app, first_row, chunks[3]);
    draw_row_heading(f, &chrome, "Digits 5-9", chunks[4]);
    draw_digit_row(f, app, second_row, chunks[5]);
    draw_footer(f, &chrome, chunks[6]);

    if app.popup == Popup::Help {
        draw_help_popup(f, &chrome);
    }
}

fn draw_info_line(f: &mut Frame, app: &App, distribution: &Distribution, chrome: &Chrome, area: Rect) {
    // Priority: status message > snapshot source > nothing loaded
    let line = if let Some(ref status) = app.status_message {
        Line::from(Span::styled(status.as_str(), Style::default().fg(chrome.active_text)))
    } else {
        let source = app
            .source
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "no snapshot".to_string());
        let live = match (app.active_digit(), app.pinned_digit) {
            (Some(d), Some(_)) => format!("live {} (pinned, seen {})", d, distribution.get(d).count),
            (Some(d), None) => format!("live {} (seen {})", d, distribution.get(d).count),
            (None, _) => "no live digit".to_string(),
        };
        Line::from(vec![
            Span::styled(source, Style::default().fg(chrome.heading)),
            Span::styled(" │ ", Style::default().fg(chrome.heading)),
            Span::styled(live, Style::default().fg(chrome.text)),
        ])
    };

    let info = Paragraph::new(line).alignment(Alignment::Center);
    f.render_widget(info, area);
}

fn draw_row_heading(f: &mut Frame, chrome: &Chrome, title: &str, area: Rect) {
    let heading = Paragraph::new(Span::styled(
        title,
        Style::default().fg(chrome.heading).add_modifier(Modifier::BOLD),
    ))
    .alignment(Alignment::Center);
    f.render_widget(heading, area);
}

/// Five equal columns, one indicator each
fn draw_digit_row(f: &mut Frame, app: &App, digits: &[DigitView], area: Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(vec![Constraint::Ratio(1, digits.len() as u32); digits.len()])
        .split(area);

    for (view, column) in digits.iter().zip(columns.iter()) {
        f.render_widget(DigitCircle::new(*view, app.theme), *column);
    }
}

fn draw_footer(f: &mut Frame, chrome: &Chrome, area: Rect) {
    let hints: [(&str, &str); 6] = [
        ("0-9", "Pin"),
        ("c", "Unpin"),
        ("t", "Theme"),
        ("r", "Reload"),
        ("h", "Help"),
        ("q", "Quit"),
    ];

    // Responsive: show fewer hints on narrow terminals
    let max_hints = if area.width < 50 { 3 } else if area.width < 70 { 4 } else { hints.len() };

    let hint_spans: Vec<Span> = hints
        .iter()
        .take(max_hints)
        .flat_map(|(key, action)| {
            vec![
                Span::styled(*key, Style::default().fg(chrome.accent)),
                Span::styled(format!(" {} │ ", action), Style::default().fg(chrome.heading)),
            ]
        })
        .collect();

    let footer = Paragraph::new(Line::from(hint_spans)).alignment(Alignment::Center);
    f.render_widget(footer, area);
}

fn draw_help_popup(f: &mut Frame, chrome: &Chrome) {
    let area = f.area();
    let popup_area = centered_rect(
        if area.width < 80 { 95 } else { 60 },
        if area.height < 30 { 95 } else { 70 },
        area,
    );

    f.render_widget(Clear, popup_area);

    let section = |title: &'static str| {
        Line::from(Span::styled(
            title,
            Style::default().fg(chrome.heading).add_modifier(Modifier::BOLD),
        ))
    };
    let entry = |key: &'static str, action: &'static str| {
        Line::from(vec![
            Span::styled(key, Style::default().fg(chrome.accent)),
            Span::styled(action, Style::default().fg(chrome.text)),
        ])
    };

    let help_text = vec![
        section("═══ Live Digit ═══"),
        entry("  0-9       ", "Pin a digit as live"),
        entry("  c         ", "Follow the snapshot's live digit again"),
        Line::from(""),
        section("═══ View ═══"),
        entry("  t         ", "Toggle light/dark theme"),
        entry("  l         ", "Show/hide legend"),
        entry("  r         ", "Reload snapshot now"),
        Line::from(""),
        section("═══ Colors ═══"),
        entry("  green     ", "Most appearing digit"),
        entry("  yellow    ", "Second most appearing"),
        entry("  red       ", "Least appearing"),
        entry("  purple    ", "Live digit (beats any rank)"),
        Line::from(""),
        Line::from(vec![
            Span::styled("  Press ", Style::default().fg(chrome.heading)),
            Span::styled("h", Style::default().fg(chrome.accent)),
            Span::styled("/", Style::default().fg(chrome.heading)),
            Span::styled("Esc", Style::default().fg(chrome.accent)),
            Span::styled(" to close", Style::default().fg(chrome.heading)),
        ]),
    ];

    let help = Paragraph::new(help_text)
        .block(
            Block::default()
                .title(Span::styled(" digitdist Help ", Style::default().fg(chrome.accent)))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(chrome.accent))
                .style(Style::default().bg(chrome.background)),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(help, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
