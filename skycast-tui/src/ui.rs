//! Declarative rendering of session state. Nothing here mutates the app;
//! every frame is a pure function of [`App`].

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{Axis, Block, Borders, Chart, Clear, Dataset, GraphType, Paragraph},
};
use skycast_core::{Condition, CurrentConditions, ForecastEntry, TemperatureTrend, backdrop};

use crate::app::{App, Notice};

/// Terminal stand-in for the condition-keyed background imagery: a muted
/// full-frame tint. The canonical image reference still shows up in the
/// status line.
fn backdrop_tint(condition: &Condition) -> Color {
    match condition {
        Condition::Clear => Color::Rgb(18, 38, 68),
        Condition::Clouds => Color::Rgb(44, 48, 58),
        Condition::Rain => Color::Rgb(28, 38, 48),
        Condition::Snow => Color::Rgb(56, 64, 78),
        Condition::Other(_) => Color::Rgb(24, 28, 36),
    }
}

/// Glyph for an OpenWeather icon identifier (group digits + day/night
/// suffix, e.g. "10n").
fn condition_glyph(icon: &str) -> &'static str {
    match icon.get(..2) {
        Some("01") => "\u{2600}",               // ☀ clear sky
        Some("02") => "\u{26C5}",               // ⛅ few clouds
        Some("03") | Some("04") => "\u{2601}",  // ☁ clouds
        Some("09") | Some("10") => "\u{1F327}", // 🌧 rain
        Some("11") => "\u{26C8}",               // ⛈ thunderstorm
        Some("13") => "\u{2744}",               // ❄ snow
        Some("50") => "\u{1F32B}",              // 🌫 mist
        _ => "?",
    }
}

pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    // Full-frame cover behind all content.
    let tint = app
        .current
        .as_ref()
        .map_or(Color::Reset, |c| backdrop_tint(&c.condition));
    frame.render_widget(Block::default().style(Style::default().bg(tint)), area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // search bar
            Constraint::Length(8), // current conditions
            Constraint::Length(8), // forecast strip
            Constraint::Min(8),    // temperature chart
            Constraint::Length(1), // status line
        ])
        .split(area);

    render_search(frame, app, chunks[0]);
    if let Some(current) = &app.current {
        render_current(frame, current, chunks[1]);
    }
    render_outlook(frame, &app.outlook, chunks[2]);
    render_chart(frame, app, chunks[3]);
    render_status(frame, app, chunks[4]);

    if let Some(notice) = app.notice {
        render_notice(frame, notice, area);
    }
}

fn render_search(frame: &mut Frame, app: &App, area: Rect) {
    let line = Line::from(vec![
        Span::raw(app.query.as_str()),
        Span::styled("\u{2588}", Style::default().fg(Color::DarkGray)),
    ]);

    let block = Block::default()
        .title(" City ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    frame.render_widget(Paragraph::new(line).block(block), area);
}

fn render_current(frame: &mut Frame, current: &CurrentConditions, area: Rect) {
    let lines = vec![
        Line::from(Span::styled(
            current.city.clone(),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )),
        Line::from(condition_glyph(&current.icon)),
        Line::from(current.description.to_uppercase()),
        Line::from(format!("\u{1F321} {}\u{00B0}C", current.temperature_c.round())),
        Line::from(format!("\u{1F4A8} {} m/s", current.wind_speed_mps)),
    ];

    let block = Block::default()
        .title(" Current Conditions ")
        .borders(Borders::ALL);

    frame.render_widget(
        Paragraph::new(lines).alignment(Alignment::Center).block(block),
        area,
    );
}

fn render_outlook(frame: &mut Frame, outlook: &[ForecastEntry], area: Rect) {
    if outlook.is_empty() {
        return;
    }

    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(vec![
            Constraint::Ratio(1, outlook.len() as u32);
            outlook.len()
        ])
        .split(area);

    for (entry, card) in outlook.iter().zip(cards.iter()) {
        let lines = vec![
            Line::from(entry.stamp.format("%d %b").to_string()),
            Line::from(condition_glyph(&entry.icon)),
            Line::from(entry.description.to_uppercase()),
            Line::from(format!("{}\u{00B0}C", entry.temperature_c.round())),
        ];

        let block = Block::default().borders(Borders::ALL);
        frame.render_widget(
            Paragraph::new(lines).alignment(Alignment::Center).block(block),
            *card,
        );
    }
}

fn render_chart(frame: &mut Frame, app: &App, area: Rect) {
    let Some(trend) = TemperatureTrend::from_outlook(&app.outlook) else {
        return;
    };

    let (lo, hi) = trend.bounds;
    let x_max = trend.points.len().saturating_sub(1).max(1) as f64;

    let datasets = vec![
        Dataset::default()
            .name("Temperature (\u{00B0}C)")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::LightRed))
            .data(&trend.points),
    ];

    let title = format!(" 4-Day Temperature Forecast for {} ", app.submitted_city);
    let chart = Chart::new(datasets)
        .block(Block::default().title(title).borders(Borders::ALL))
        .x_axis(
            Axis::default()
                .bounds([0.0, x_max])
                .labels(trend.labels.clone()),
        )
        .y_axis(Axis::default().bounds([lo, hi]).labels(vec![
            format!("{lo:.0}"),
            format!("{:.0}", (lo + hi) / 2.0),
            format!("{hi:.0}"),
        ]));

    frame.render_widget(chart, area);
}

fn render_status(frame: &mut Frame, app: &App, area: Rect) {
    let mut spans = vec![
        Span::styled("Enter", Style::default().fg(Color::Yellow)),
        Span::raw(" Search  "),
        Span::styled("Esc", Style::default().fg(Color::Yellow)),
        Span::raw(" Quit"),
    ];

    if let Some(current) = &app.current {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            format!("backdrop: {}", backdrop::image_for(&current.condition)),
            Style::default().fg(Color::DarkGray),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_notice(frame: &mut Frame, notice: Notice, area: Rect) {
    let width = (notice.message().len() as u16 + 8).min(area.width);
    let rect = centered(width, 5, area);

    let lines = vec![
        Line::from(notice.message()),
        Line::from(""),
        Line::from(Span::styled(
            "press any key",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let block = Block::default()
        .title(" Notice ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));

    frame.render_widget(Clear, rect);
    frame.render_widget(
        Paragraph::new(lines).alignment(Alignment::Center).block(block),
        rect,
    );
}

fn centered(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}
