//! TUI views and rendering
//!
//! Draws from AppState, never modifies it.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table, Tabs, Wrap};
use tracing::trace;

use super::state::AppState;
use crate::itinerary::{DayPlan, ItineraryResult, TripField};
use crate::planner::PlannerPhase;

mod colors {
    use ratatui::style::Color;

    pub const BRAND: Color = Color::Rgb(13, 148, 136); // Teal
    pub const ACCENT: Color = Color::Rgb(255, 183, 3); // Amber
    pub const KEYBIND: Color = Color::Rgb(0, 255, 255); // Cyan
    pub const ERROR: Color = Color::Rgb(220, 20, 60); // Crimson
    pub const NOTICE: Color = Color::Rgb(255, 215, 0); // Gold
    pub const SUCCESS: Color = Color::Rgb(50, 205, 50); // Lime green
    pub const SELECTED_BG: Color = Color::Rgb(40, 40, 40);
    pub const DIM: Color = Color::DarkGray;
}

fn bold(color: ratatui::style::Color) -> Style {
    Style::default().fg(color).add_modifier(Modifier::BOLD)
}

fn dim() -> Style {
    Style::default().fg(colors::DIM)
}

fn section(title: &str) -> Line<'static> {
    Line::from(Span::styled(title.to_string(), bold(colors::BRAND)))
}

/// Main render function
pub fn render(state: &AppState, frame: &mut Frame) {
    trace!(phase = %state.planner.phase(), open = state.planner.is_open(), "render: called");
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Content
            Constraint::Length(3), // Footer
        ])
        .split(frame.area());

    render_header(state, frame, chunks[0]);

    if !state.planner.is_open() {
        render_tours(state, frame, chunks[1]);
    } else {
        match state.planner.phase() {
            PlannerPhase::Collecting => render_form(state, frame, chunks[1]),
            PlannerPhase::Pending => render_pending(state, frame, chunks[1]),
            PlannerPhase::Presenting => render_result(state, frame, chunks[1]),
        }
    }

    render_footer(state, frame, chunks[2]);
}

fn render_header(state: &AppState, frame: &mut Frame, area: Rect) {
    let subtitle = if state.planner.is_open() {
        "AI Trip Planner"
    } else {
        "Discover the world with us"
    };
    let line = Line::from(vec![
        Span::styled(" Ezora Tours", bold(colors::BRAND)),
        Span::raw(" │ "),
        Span::styled(subtitle, Style::default().fg(colors::ACCENT)),
    ]);
    let header = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
    frame.render_widget(header, area);
}

fn keybind_spans(binds: &[(&'static str, &'static str)]) -> Vec<Span<'static>> {
    let mut spans = vec![Span::raw(" ")];
    for (key, action) in binds {
        spans.push(Span::styled(*key, bold(colors::KEYBIND)));
        spans.push(Span::raw(format!(" {}  ", action)));
    }
    spans
}

fn render_footer(state: &AppState, frame: &mut Frame, area: Rect) {
    let line = if let Some(notice) = &state.notice {
        Line::from(Span::styled(format!(" {}", notice), bold(colors::NOTICE)))
    } else if !state.planner.is_open() {
        Line::from(keybind_spans(&[("p", "plan a trip"), ("j/k", "browse"), ("q", "quit")]))
    } else {
        let binds: &[(&str, &str)] = match state.planner.phase() {
            PlannerPhase::Collecting if state.planner.can_submit() => &[
                ("Tab", "next field"),
                ("+/-", "adjust"),
                ("Enter", "plan trip"),
                ("Esc", "close"),
            ],
            PlannerPhase::Collecting => &[
                ("Tab", "next field"),
                ("+/-", "adjust"),
                ("Enter", "fill required fields first"),
                ("Esc", "close"),
            ],
            PlannerPhase::Pending => &[("Esc", "close"), ("Ctrl-C", "quit")],
            PlannerPhase::Presenting => &[
                ("←/→", "day"),
                ("1-9", "jump"),
                ("j/k", "scroll"),
                ("r", "plan another trip"),
                ("Esc", "close"),
            ],
        };
        Line::from(keybind_spans(binds))
    };
    frame.render_widget(Paragraph::new(line).block(Block::default().borders(Borders::ALL)), area);
}

fn render_tours(state: &AppState, frame: &mut Frame, area: Rect) {
    trace!("render_tours: called");
    let header = Row::new(["#", "Tour", "Location", "Duration", "Price", "Rating", "Category"])
        .style(bold(colors::BRAND));

    let rows = state.tours().iter().enumerate().map(|(i, tour)| {
        let style = if i == state.tour_index {
            Style::default().bg(colors::SELECTED_BG).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        Row::new(vec![
            Cell::from(tour.id.to_string()),
            Cell::from(tour.title),
            Cell::from(tour.location),
            Cell::from(tour.duration),
            Cell::from(tour.price_display()),
            Cell::from(Span::styled(
                format!("★ {:.1} ({})", tour.rating, tour.reviews),
                Style::default().fg(colors::ACCENT),
            )),
            Cell::from(Span::styled(tour.category, dim())),
        ])
        .style(style)
    });

    let widths = [
        Constraint::Length(3),
        Constraint::Min(26),
        Constraint::Length(12),
        Constraint::Length(9),
        Constraint::Length(8),
        Constraint::Length(14),
        Constraint::Length(11),
    ];
    let table = Table::new(rows, widths).header(header).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Popular Tours ")
            .title_bottom(Line::from(" Press p to design your own trip ").alignment(Alignment::Right)),
    );
    frame.render_widget(table, area);
}

fn render_form(state: &AppState, frame: &mut Frame, area: Rect) {
    trace!(focus = ?state.focus, "render_form: called");
    let request = state.planner.request();
    let mut lines = vec![
        Line::from(Span::styled("Tell us about your dream trip", bold(colors::BRAND))),
        Line::from(""),
    ];

    for field in TripField::ALL {
        let focused = field == state.focus;
        let marker = if focused { "▸ " } else { "  " };
        let required = if field.is_required() { "*" } else { " " };
        let label_style = if focused { bold(colors::KEYBIND) } else { Style::default() };

        let value = request.field_text(field);
        let value_span = if field == TripField::Style {
            Span::styled(format!("‹ {} ›", value), bold(colors::ACCENT))
        } else if value.is_empty() {
            Span::styled(field.placeholder().to_string(), dim())
        } else {
            Span::raw(value)
        };
        let cursor = if focused && field.is_text() { "▏" } else { "" };

        lines.push(Line::from(vec![
            Span::styled(marker, bold(colors::KEYBIND)),
            Span::styled(format!("{:<24}", field.label()), label_style),
            Span::styled(required, Style::default().fg(colors::ERROR)),
            Span::raw(" "),
            value_span,
            Span::styled(cursor, Style::default().fg(colors::KEYBIND)),
        ]));
    }

    lines.push(Line::from(""));
    if let Some(error) = state.planner.last_error() {
        lines.push(Line::from(Span::styled(error.to_string(), bold(colors::ERROR))));
    } else {
        lines.push(Line::from(Span::styled("* required", dim())));
    }

    let form = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title(" Plan Your Trip "));
    frame.render_widget(form, area);
}

fn render_pending(state: &AppState, frame: &mut Frame, area: Rect) {
    trace!("render_pending: called");
    let destination = &state.planner.request().destination;
    let top = area.height.saturating_sub(4) / 2;
    let mut lines: Vec<Line> = (0..top).map(|_| Line::from("")).collect();
    lines.push(Line::from(vec![
        Span::styled(state.spinner(), bold(colors::BRAND)),
        Span::styled(format!(" Designing your trip to {}", destination), bold(colors::BRAND)),
    ]));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(state.phrase(), dim())));

    let pending = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(pending, area);
}

fn render_result(state: &AppState, frame: &mut Frame, area: Rect) {
    trace!(active_day = ?state.planner.active_day(), "render_result: called");
    let Some(result) = state.planner.result() else {
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    let mut day_numbers = result.day_numbers();
    day_numbers.sort_unstable();
    let selected = state
        .planner
        .active_day()
        .and_then(|d| day_numbers.iter().position(|n| *n == d))
        .unwrap_or(0);
    let titles: Vec<Line> = day_numbers.iter().map(|n| Line::from(format!("Day {}", n))).collect();
    let tabs = Tabs::new(titles)
        .select(selected)
        .highlight_style(bold(colors::ACCENT).add_modifier(Modifier::REVERSED))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {} ", result.title)),
        );
    frame.render_widget(tabs, chunks[0]);

    let panes = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(chunks[1]);

    let day_lines = match state.planner.active_day_plan() {
        Some(day) => day_lines(day),
        None => vec![Line::from(Span::styled("No day selected", dim()))],
    };
    let day_title = state
        .planner
        .active_day()
        .map(|d| format!(" Day {} ", d))
        .unwrap_or_default();
    let day_pane = Paragraph::new(day_lines)
        .wrap(Wrap { trim: false })
        .scroll((state.scroll, 0))
        .block(Block::default().borders(Borders::ALL).title(day_title));
    frame.render_widget(day_pane, panes[0]);

    let overview = Paragraph::new(overview_lines(result))
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title(" Trip Overview "));
    frame.render_widget(overview, panes[1]);
}

fn day_lines(day: &DayPlan) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(Span::styled(day.theme.clone(), bold(colors::ACCENT))),
        Line::from(""),
    ];

    for (label, activities) in day.slots() {
        lines.push(section(label));
        if activities.is_empty() {
            lines.push(Line::from(Span::styled("  Free time", dim())));
        }
        for activity in activities {
            lines.push(Line::from(vec![
                Span::styled(format!("  {:<12}", activity.time), Style::default().fg(colors::KEYBIND)),
                Span::raw(activity.description.clone()),
            ]));
            lines.push(Line::from(Span::styled(format!("  {:<12}@ {}", "", activity.location), dim())));
        }
        lines.push(Line::from(""));
    }

    if !day.local_tip.is_empty() {
        lines.push(Line::from(vec![
            Span::styled("Local tip: ", bold(colors::SUCCESS)),
            Span::raw(day.local_tip.clone()),
        ]));
    }
    lines
}

fn overview_lines(result: &ItineraryResult) -> Vec<Line<'static>> {
    let mut lines = vec![Line::from(result.summary.clone()), Line::from("")];

    lines.push(section("Getting There"));
    let transport = &result.transport;
    lines.push(Line::from(format!("{}: {}", transport.mode, transport.options)));
    lines.push(Line::from(Span::styled(
        format!("{} · {}", transport.duration, transport.approx_cost),
        dim(),
    )));
    lines.push(Line::from(""));

    lines.push(section("Where to Stay"));
    for option in &result.accommodations {
        lines.push(Line::from(vec![
            Span::styled(option.name.clone(), Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(format!(" ({}) ", option.category)),
            Span::styled(option.approx_cost_per_night.clone(), Style::default().fg(colors::SUCCESS)),
        ]));
        lines.push(Line::from(Span::styled(option.rationale.clone(), dim())));
    }
    lines.push(Line::from(""));

    lines.push(section("Budget"));
    for (label, amount) in result.budget.buckets() {
        lines.push(Line::from(format!("{:<12} {}", label, amount)));
    }
    lines.push(Line::from(vec![
        Span::styled(format!("{:<12} ", "Total"), Style::default().add_modifier(Modifier::BOLD)),
        Span::styled(result.budget.total_estimate.clone(), bold(colors::SUCCESS)),
    ]));
    lines.push(Line::from(""));

    lines.push(section("Practical Tips"));
    let tips = &result.practical_tips;
    for (label, text) in [("Weather", &tips.weather), ("Safety", &tips.safety), ("Packing", &tips.packing)] {
        lines.push(Line::from(vec![
            Span::styled(format!("{}: ", label), Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(text.clone()),
        ]));
    }
    lines
}
