use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, List, ListItem, Paragraph},
};

use crate::app::{App, Screen};
use crate::timer::TimerState;

pub fn draw(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Screen
            Constraint::Length(3), // Footer
        ])
        .split(f.area());

    draw_header(f, app, chunks[0]);
    match app.screen {
        Screen::Bakery => draw_bakery(f, app, chunks[1]),
        Screen::Catalog => draw_catalog(f, app, chunks[1]),
    }
    draw_footer(f, app, chunks[2]);
}

pub fn format_elapsed(seconds: u64) -> String {
    let (hours, minutes, secs) = (seconds / 3600, (seconds / 60) % 60, seconds % 60);
    if hours > 0 {
        format!("{hours}:{minutes:02}:{secs:02}")
    } else {
        format!("{minutes:02}:{secs:02}")
    }
}

fn draw_header(f: &mut Frame, app: &App, area: Rect) {
    let status = match (app.paused, app.timer.state()) {
        (true, _) => "⏸️ Paused",
        (false, TimerState::Running) => "Open",
        (false, TimerState::Stopped) => "Away",
    };
    let header_text = format!(
        "Revenue: ${}    Sold: {}    Time: {}    {}",
        app.scoreboard.revenue,
        app.scoreboard.units_sold,
        format_elapsed(app.session.elapsed_seconds()),
        status
    );

    let header = Paragraph::new(header_text)
        .block(
            Block::default()
                .title("Dessert Clicker")
                .borders(Borders::ALL)
                .style(Style::default().fg(Color::White)),
        )
        .style(Style::default().fg(Color::Green))
        .alignment(Alignment::Center);

    f.render_widget(header, area);
}

fn draw_bakery(f: &mut Frame, app: &App, area: Rect) {
    let main_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(50), // Dessert
            Constraint::Percentage(50), // Activity feed
        ])
        .split(area);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)])
        .split(main_chunks[0]);

    let image = app.scoreboard.image;
    let price = app.session.current_tier().unit_price;
    let dessert_lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            image.glyph,
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            image.name,
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )),
        Line::from(format!("${price} each")),
        Line::from(""),
        Line::from(Span::styled(
            "[Enter] Sell one",
            Style::default().fg(Color::Gray),
        )),
    ];
    let dessert = Paragraph::new(dessert_lines)
        .block(
            Block::default()
                .title("Today's Dessert")
                .borders(Borders::ALL)
                .style(Style::default().fg(Color::White)),
        )
        .alignment(Alignment::Center);
    f.render_widget(dessert, left[0]);

    let progress = match app.session.next_milestone() {
        Some((tier, remaining)) => {
            let start = app.session.current_tier().activation_threshold;
            let span = tier.activation_threshold.saturating_sub(start).max(1);
            let done = app.session.units_sold().saturating_sub(start);
            Gauge::default()
                .gauge_style(Style::default().fg(Color::Magenta))
                .ratio((done as f64 / span as f64).clamp(0.0, 1.0))
                .label(format!("{remaining} more to unlock {}", tier.image.name))
        }
        None => Gauge::default()
            .gauge_style(Style::default().fg(Color::Magenta))
            .ratio(1.0)
            .label("Every dessert unlocked"),
    };
    f.render_widget(
        progress.block(Block::default().title("Next Dessert").borders(Borders::ALL)),
        left[1],
    );

    let activity_items: Vec<ListItem> = app
        .recent_activities
        .iter()
        .map(|activity| {
            ListItem::new(Line::from(Span::styled(
                format!("• {activity}"),
                Style::default().fg(Color::Cyan),
            )))
        })
        .collect();

    let activity_list = List::new(activity_items)
        .block(
            Block::default()
                .title("Recent Activity")
                .borders(Borders::ALL)
                .style(Style::default().fg(Color::White)),
        )
        .style(Style::default().fg(Color::White));

    f.render_widget(activity_list, main_chunks[1]);
}

fn draw_catalog(f: &mut Frame, app: &App, area: Rect) {
    let units_sold = app.session.units_sold();
    let items: Vec<ListItem> = app
        .session
        .catalog()
        .tiers()
        .iter()
        .enumerate()
        .map(|(i, tier)| {
            let unlocked = tier.activation_threshold <= units_sold;
            let current = i == app.session.active_tier();
            let style = if i == app.selected_tier {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else if unlocked {
                Style::default().fg(Color::White)
            } else {
                Style::default().fg(Color::DarkGray)
            };

            let prefix = if i == app.selected_tier { "► " } else { "  " };
            let marker = if current {
                " ◄ baking"
            } else if unlocked {
                ""
            } else {
                " 🔒"
            };
            let name = if unlocked { tier.image.name } else { "???" };
            ListItem::new(Line::from(Span::styled(
                format!(
                    "{prefix}{:<20} ${:<6} unlocks at {:>6} sold{marker}",
                    name, tier.unit_price, tier.activation_threshold
                ),
                style,
            )))
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .title("Dessert Catalog")
                .borders(Borders::ALL)
                .style(Style::default().fg(Color::White)),
        )
        .style(Style::default().fg(Color::White));

    f.render_widget(list, area);
}

fn draw_footer(f: &mut Frame, app: &App, area: Rect) {
    let (text, style) = match app.visible_notice() {
        Some(notice) => (
            format!("⚠ {notice}"),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
        None => {
            let controls = match app.screen {
                Screen::Bakery => {
                    "Enter/Space Sell  S Share  C Catalog  P Pause  R Recreate  Q Quit"
                }
                Screen::Catalog => "↑↓ Browse  C/Esc Back  Q Quit",
            };
            (controls.to_string(), Style::default().fg(Color::Gray))
        }
    };

    let footer = Paragraph::new(text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .style(Style::default().fg(Color::White)),
        )
        .style(style)
        .alignment(Alignment::Center);

    f.render_widget(footer, area);
}
