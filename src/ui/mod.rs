use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

pub mod layout;

use crate::app::{App, InitStatus};
use crate::domain::ConsoleLevel;

pub const LOGO: [&str; 5] = [
    r"   ____   ",
    r"  / __ \  ",
    r" | |  | | ",
    r" | |__| | ",
    r"  \____/  ",
];

pub const INSTRUCTIONS: &str = "Edit src/ui/mod.rs and save to reload.";
pub const LINK_TEXT: &str = "Learn Substrate";
pub const LINK_URL: &str = "https://docs.substrate.io";

/// Render the page; the page itself never depends on what the routine did
pub fn draw(f: &mut Frame, app: &App) {
    let areas = layout::areas(f.size(), app.console_open);

    draw_page(f, areas.page);
    if app.console_open {
        draw_console(f, areas.console, app);
    }
    draw_footer(f, areas.footer, app);
}

fn draw_page(f: &mut Frame, area: Rect) {
    let logo_style = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);

    let mut lines: Vec<Line> = LOGO
        .iter()
        .map(|row| Line::from(Span::styled(*row, logo_style)))
        .collect();
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::raw("Edit "),
        Span::styled("src/ui/mod.rs", Style::default().fg(Color::Yellow)),
        Span::raw(" and save to reload."),
    ]));
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled(
            LINK_TEXT,
            Style::default()
                .fg(Color::LightBlue)
                .add_modifier(Modifier::UNDERLINED),
        ),
        Span::styled(format!(" ({LINK_URL})"), Style::default().fg(Color::DarkGray)),
    ]));

    let content_height = lines.len() as u16;
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(content_height),
            Constraint::Min(0),
        ])
        .split(area);

    f.render_widget(
        Paragraph::new(Text::from(lines)).alignment(Alignment::Center),
        vertical[1],
    );
}

fn draw_console(f: &mut Frame, area: Rect, app: &App) {
    f.render_widget(Clear, area);

    let title = match &app.status {
        InitStatus::Idle => "Console".to_string(),
        InitStatus::Connecting => "Console · connecting".to_string(),
        InitStatus::Connected { endpoint, chain } => match chain {
            Some(chain) => format!("Console · {chain} @ {endpoint}"),
            None => format!("Console · {endpoint}"),
        },
        InitStatus::Done => "Console · done".to_string(),
        InitStatus::Failed => "Console · failed".to_string(),
    };

    let lines: Vec<Line> = app
        .console()
        .iter()
        .map(|line| {
            let style = match line.level {
                ConsoleLevel::Info => Style::default(),
                ConsoleLevel::Error => Style::default().fg(Color::Red),
            };
            Line::from(Span::styled(line.text.clone(), style))
        })
        .collect();

    // Keep the newest lines visible
    let inner_height = area.height.saturating_sub(2) as usize;
    let skip = lines.len().saturating_sub(inner_height);
    let lines: Vec<Line> = lines.into_iter().skip(skip).collect();

    f.render_widget(
        Paragraph::new(Text::from(lines))
            .wrap(Wrap { trim: false })
            .block(Block::default().borders(Borders::ALL).title(title)),
        area,
    );
}

fn draw_footer(f: &mut Frame, area: Rect, app: &App) {
    let errors = app.console().iter().filter(|line| line.is_error()).count();
    let mut spans = vec![Span::styled(
        " c/F12 console · q quit",
        Style::default().fg(Color::DarkGray),
    )];
    if errors > 0 && !app.console_open {
        spans.push(Span::styled(
            format!(" · {errors} error(s)"),
            Style::default().fg(Color::Red),
        ));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}
