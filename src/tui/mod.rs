//! Ratatui-based terminal UI.
//!
//! The TUI lists the chart catalog in a side panel and renders the selected
//! chart with Plotters. Charts are fetched on demand; loading an entry again
//! re-fetches the dataset and recomputes everything, exactly like the batch
//! mode (nothing is cached).

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
    Terminal,
};

use crate::app::pipeline::{self, ChartData};
use crate::cli::TuiArgs;
use crate::config;
use crate::data::EurostatClient;
use crate::domain::{Rgb, Series, ValueFormat};
use crate::error::AppError;

mod chart_widget;

use chart_widget::SeriesChart;

/// Start the TUI.
pub fn run(args: TuiArgs) -> Result<(), AppError> {
    let _guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AppError::upstream(format!("Failed to initialize terminal: {e}")))?;

    let mut app = App::new(args);
    app.event_loop(&mut terminal)
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode()
            .map_err(|e| AppError::upstream(format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::upstream(format!(
                "Failed to enter alternate screen: {e}"
            )));
        }
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

struct App {
    client: EurostatClient,
    selected: usize,
    data: Option<ChartData>,
    status: String,
}

impl App {
    fn new(args: TuiArgs) -> Self {
        let selected = args.chart.min(config::CHARTS.len().saturating_sub(1));
        let mut app = Self {
            client: EurostatClient::from_env(),
            selected,
            data: None,
            status: String::new(),
        };
        app.load_selected();
        app
    }

    fn event_loop<B: ratatui::backend::Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
    ) -> Result<(), AppError> {
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal
                    .draw(|f| self.draw(f))
                    .map_err(|e| AppError::upstream(format!("Terminal draw error: {e}")))?;
                needs_redraw = false;
            }

            if !event::poll(Duration::from_millis(100))
                .map_err(|e| AppError::upstream(format!("Event poll error: {e}")))?
            {
                continue;
            }

            match event::read().map_err(|e| AppError::upstream(format!("Event read error: {e}")))? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if self.handle_key(key.code) {
                        break;
                    }
                    needs_redraw = true;
                }
                Event::Resize(_, _) => {
                    needs_redraw = true;
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Returns `true` when the app should quit.
    fn handle_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Up | KeyCode::Char('k') => self.select(self.selected.saturating_sub(1)),
            KeyCode::Down | KeyCode::Char('j') => self.select(self.selected + 1),
            KeyCode::Home => self.select(0),
            KeyCode::End => self.select(config::CHARTS.len().saturating_sub(1)),
            KeyCode::Enter | KeyCode::Char('r') => self.load_selected(),
            _ => {}
        }
        false
    }

    fn select(&mut self, idx: usize) {
        let idx = idx.min(config::CHARTS.len().saturating_sub(1));
        if idx == self.selected {
            return;
        }
        self.selected = idx;
        // Stale data would belong to another catalog entry; drop it and wait
        // for an explicit load.
        self.data = None;
        self.status = "Press Enter to load.".to_string();
    }

    fn load_selected(&mut self) {
        let spec = &config::CHARTS[self.selected];
        match pipeline::run_chart(&self.client, spec) {
            Ok(data) => {
                self.status = format!(
                    "{} | fetched {} | {} series",
                    spec.dataset,
                    data.fetched_at.format("%H:%M:%S"),
                    data.series.len(),
                );
                if data.series.is_empty() {
                    self.status.push_str(" | no data after filtering");
                }
                self.data = Some(data);
            }
            Err(err) => {
                // A failed fetch shouldn't kill the UI; surface it instead.
                self.data = None;
                self.status = err.to_string();
            }
        }
    }

    fn draw(&mut self, frame: &mut ratatui::Frame<'_>) {
        let size = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4),
                Constraint::Min(0),
                Constraint::Length(3),
            ])
            .split(size);

        self.draw_header(frame, chunks[0]);
        self.draw_body(frame, chunks[1]);
        self.draw_footer(frame, chunks[2]);
    }

    fn draw_header(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let spec = &config::CHARTS[self.selected];

        let mut lines: Vec<Line> = Vec::new();
        lines.push(Line::from(vec![
            Span::styled("esc", Style::default().fg(Color::Cyan)),
            Span::raw(" — Eurostat macro indicator charts"),
        ]));
        lines.push(Line::from(Span::styled(
            format!("{} — {}", spec.title, spec.subtitle),
            Style::default().add_modifier(Modifier::BOLD),
        )));

        let p = Paragraph::new(Text::from(lines)).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_body(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(38), Constraint::Min(0)])
            .split(area);

        self.draw_catalog(frame, chunks[0]);
        self.draw_chart(frame, chunks[1]);
    }

    fn draw_catalog(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let items: Vec<ListItem> = config::CHARTS
            .iter()
            .enumerate()
            .map(|(idx, spec)| ListItem::new(format!("{idx:>2} {:<12} {}", spec.dataset, spec.title)))
            .collect();

        let list = List::new(items)
            .block(Block::default().title("Charts").borders(Borders::ALL))
            .highlight_style(Style::default().fg(Color::Black).bg(Color::White))
            .highlight_symbol("» ");

        let mut state = ListState::default();
        state.select(Some(self.selected));
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn draw_chart(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let spec = &config::CHARTS[self.selected];
        let block = Block::default()
            .title(spec.title)
            .borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(Clear, inner);

        let Some(data) = &self.data else {
            let msg = Paragraph::new("No chart loaded. Press Enter to fetch.")
                .style(Style::default().fg(Color::Yellow));
            frame.render_widget(msg, inner);
            return;
        };

        let Some((x_bounds, y_bounds)) = chart_bounds(&data.series) else {
            let msg = Paragraph::new("No data after filtering.")
                .style(Style::default().fg(Color::Yellow));
            frame.render_widget(msg, inner);
            return;
        };

        let (chart_rect, insets) = chart_layout(inner);
        let widget = SeriesChart {
            series: &data.series,
            x_bounds,
            y_bounds,
            x_label: "year",
            y_label: spec.y_label,
            y_format: spec.y_format,
        };

        frame.render_widget(widget, chart_rect);
        if let Some(insets) = insets {
            draw_axis_ticks(frame, inner, chart_rect, insets, x_bounds, y_bounds, spec.y_format, spec.y_label);
        }
        draw_legend(frame, chart_rect, &data.series);
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = "↑/↓ select  Enter load  r re-fetch  q quit";
        let line = Line::from(vec![
            Span::styled(help, Style::default().fg(Color::Gray)),
            Span::raw(" | "),
            Span::styled(&self.status, Style::default().fg(Color::Yellow)),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}

/// Compute plot bounds from the prepared series, padding the value axis.
fn chart_bounds(series: &[Series]) -> Option<([f64; 2], [f64; 2])> {
    let mut x_min = f64::INFINITY;
    let mut x_max = f64::NEG_INFINITY;
    let mut y_min = f64::INFINITY;
    let mut y_max = f64::NEG_INFINITY;

    for s in series {
        for &(year, value) in &s.points {
            x_min = x_min.min(year as f64);
            x_max = x_max.max(year as f64);
            y_min = y_min.min(value);
            y_max = y_max.max(value);
        }
    }

    if !(x_min.is_finite() && x_max.is_finite() && y_min.is_finite() && y_max.is_finite()) {
        return None;
    }
    if x_max <= x_min {
        x_min -= 1.0;
        x_max += 1.0;
    }

    let pad = ((y_max - y_min).abs() * 0.05).max(1e-12);
    Some(([x_min, x_max], [y_min - pad, y_max + pad]))
}

/// Legend overlay in the top-left corner of the chart area, one colored line
/// per series.
fn draw_legend(frame: &mut ratatui::Frame<'_>, chart: Rect, series: &[Series]) {
    for (i, s) in series.iter().enumerate() {
        let y = chart.y + 1 + i as u16;
        if y >= chart.y + chart.height.saturating_sub(1) {
            break;
        }
        let marker = match s.line {
            crate::domain::LineStyle::Solid => "──",
            crate::domain::LineStyle::Dashed => "╌╌",
        };
        let text = format!("{marker} {}", s.label);
        let width = (text.chars().count() as u16).min(chart.width.saturating_sub(4));
        let line = Paragraph::new(text).style(Style::default().fg(ratatui_color(s.color)));
        frame.render_widget(
            line,
            Rect {
                x: chart.x + 2,
                y,
                width,
                height: 1,
            },
        );
    }
}

fn ratatui_color(color: Rgb) -> Color {
    Color::Rgb(color.0, color.1, color.2)
}

#[derive(Debug, Clone, Copy)]
struct AxisInsets {
    left: u16,
    right: u16,
    top: u16,
    bottom: u16,
}

fn chart_layout(inner: Rect) -> (Rect, Option<AxisInsets>) {
    let insets = AxisInsets {
        left: 9,
        right: 2,
        top: 1,
        bottom: 2,
    };

    if inner.width <= insets.left + insets.right + 10
        || inner.height <= insets.top + insets.bottom + 5
    {
        return (inner, None);
    }

    let rect = Rect {
        x: inner.x + insets.left,
        y: inner.y + insets.top,
        width: inner.width - insets.left - insets.right,
        height: inner.height - insets.top - insets.bottom,
    };

    (rect, Some(insets))
}

#[allow(clippy::too_many_arguments)]
fn draw_axis_ticks(
    frame: &mut ratatui::Frame<'_>,
    inner: Rect,
    chart: Rect,
    insets: AxisInsets,
    x_bounds: [f64; 2],
    y_bounds: [f64; 2],
    y_format: ValueFormat,
    y_label: &str,
) {
    let ticks = 5usize;
    let style = Style::default().fg(Color::Gray);

    for i in 0..ticks {
        let u = i as f64 / (ticks as f64 - 1.0);
        let x_val = x_bounds[0] + u * (x_bounds[1] - x_bounds[0]);
        let x = chart.x + ((chart.width - 1) as f64 * u).round() as u16;
        let label = format!("{x_val:.0}");
        let label_len = label.len() as u16;
        let start = x.saturating_sub((label.len() / 2) as u16);
        let y = chart.y + chart.height;
        if y >= inner.y + inner.height - 1 {
            continue;
        }
        frame.render_widget(
            Paragraph::new(label).style(style),
            Rect {
                x: start,
                y,
                width: label_len,
                height: 1,
            },
        );
    }

    for i in 0..ticks {
        let u = i as f64 / (ticks as f64 - 1.0);
        let y_val = y_bounds[0] + u * (y_bounds[1] - y_bounds[0]);
        let y = chart.y + (chart.height - 1) - ((chart.height - 1) as f64 * u).round() as u16;
        let label = y_format.tick_label(y_val);
        let label_len = label.len() as u16;
        let x = inner.x + insets.left.saturating_sub(1);
        let start = x.saturating_sub(label.len() as u16);
        if start < inner.x {
            continue;
        }
        frame.render_widget(
            Paragraph::new(label).style(style),
            Rect {
                x: start,
                y,
                width: label_len,
                height: 1,
            },
        );
    }

    let x_axis = Paragraph::new("year")
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Gray));
    let x_rect = Rect {
        x: chart.x,
        y: chart.y + chart.height + 1,
        width: chart.width,
        height: 1,
    };
    if x_rect.y < inner.y + inner.height {
        frame.render_widget(x_axis, x_rect);
    }

    let y_axis = Paragraph::new(y_label)
        .style(Style::default().fg(Color::Gray).add_modifier(Modifier::BOLD));
    let y_rect = Rect {
        x: inner.x,
        y: inner.y,
        width: insets.left.saturating_sub(1),
        height: 1,
    };
    frame.render_widget(y_axis, y_rect);
}
