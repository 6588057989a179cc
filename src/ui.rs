use anyhow::Result;
use arr_estimator::{
    format_headcount, format_millions, format_percent, format_rate, format_rate_thousands,
    parse_hex, rate_comparison, sensitivity_series, sensitivity_table, ComparisonStats,
    EstimateTable, EstimationConfig, EstimationResult, KeyInsights, RateBounds, ScenarioKind,
    Theme,
};
use crossterm::{
    event::{self, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{
        Axis, Bar, BarChart, BarGroup, Block, Borders, Cell, Chart, Dataset, GraphType,
        Paragraph, Row, Table,
    },
    Frame, Terminal,
};
use std::io;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Summary,
    Detailed,
    Sensitivity,
}

impl Page {
    pub const ALL: [Page; 3] = [Page::Summary, Page::Detailed, Page::Sensitivity];

    pub fn next(&self) -> Self {
        match self {
            Page::Summary => Page::Detailed,
            Page::Detailed => Page::Sensitivity,
            Page::Sensitivity => Page::Summary,
        }
    }

    pub fn previous(&self) -> Self {
        match self {
            Page::Summary => Page::Sensitivity,
            Page::Detailed => Page::Summary,
            Page::Sensitivity => Page::Detailed,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Page::Summary => "Summary Dashboard",
            Page::Detailed => "Detailed Analysis",
            Page::Sensitivity => "Sensitivity Analysis",
        }
    }
}

/// A slider in the control panel
#[derive(Debug, Clone, PartialEq)]
pub enum Control {
    Scenario(ScenarioKind),
    Override(String),
}

/// Everything derived from the current config, recomputed on every draw
pub struct Snapshot {
    pub table: EstimateTable,
    pub stats: ComparisonStats,
    pub insights: KeyInsights,
}

pub struct App {
    /// Startup config, restored by `reset`
    pub defaults: EstimationConfig,
    /// Current slider values
    pub config: EstimationConfig,
    pub controls: Vec<Control>,
    pub selected_control: usize,
    pub current_page: Page,
    pub theme: Theme,
}

impl App {
    pub fn new(config: EstimationConfig) -> Self {
        let mut controls: Vec<Control> = config
            .scenarios
            .iter()
            .map(|s| Control::Scenario(s.kind))
            .collect();
        controls.extend(
            config
                .entities
                .iter()
                .map(|e| Control::Override(e.name.clone())),
        );

        Self {
            defaults: config.clone(),
            config,
            controls,
            selected_control: 0,
            current_page: Page::Summary,
            theme: Theme::default(),
        }
    }

    pub fn next_page(&mut self) {
        self.current_page = self.current_page.next();
    }

    pub fn previous_page(&mut self) {
        self.current_page = self.current_page.previous();
    }

    pub fn next_control(&mut self) {
        if self.controls.is_empty() {
            return;
        }
        self.selected_control = (self.selected_control + 1) % self.controls.len();
    }

    pub fn previous_control(&mut self) {
        if self.controls.is_empty() {
            return;
        }
        self.selected_control = if self.selected_control == 0 {
            self.controls.len() - 1
        } else {
            self.selected_control - 1
        };
    }

    pub fn selected(&self) -> Option<&Control> {
        self.controls.get(self.selected_control)
    }

    pub fn control_value(&self, control: &Control) -> EstimationResult<f64> {
        match control {
            Control::Scenario(kind) => self.config.rate(*kind),
            Control::Override(name) => self.config.custom_rate(name),
        }
    }

    pub fn control_bounds(&self, control: &Control) -> EstimationResult<RateBounds> {
        match control {
            Control::Scenario(kind) => self.config.scenario(*kind).map(|s| s.bounds),
            Control::Override(_) => Ok(self.config.override_bounds),
        }
    }

    pub fn control_label(&self, control: &Control) -> String {
        match control {
            Control::Scenario(kind) => kind.description().to_string(),
            Control::Override(name) => format!("{} Custom ARR per FTE", name),
        }
    }

    /// Move the selected slider by `steps`, clamped to its range
    pub fn adjust(&mut self, steps: i32) -> EstimationResult<()> {
        let Some(control) = self.selected().cloned() else {
            return Ok(());
        };
        let bounds = self.control_bounds(&control)?;
        let value = bounds.nudge(self.control_value(&control)?, steps);

        self.config = match &control {
            Control::Scenario(kind) => self.config.with_scenario_rate(*kind, value)?,
            Control::Override(name) => self.config.with_override_rate(name, value)?,
        };
        Ok(())
    }

    pub fn reset(&mut self) {
        self.config = self.defaults.clone();
    }

    /// Custom sliders go back to tracking the base rate
    pub fn clear_overrides(&mut self) {
        self.config = self.config.without_overrides();
    }

    pub fn toggle_theme(&mut self) {
        self.theme = self.theme.toggle();
    }

    pub fn snapshot(&self) -> EstimationResult<Snapshot> {
        let table = self.config.estimates()?;
        let stats = ComparisonStats::compute(&self.config.entities, &table)?;
        let insights = KeyInsights::build(&self.config, &table)?;
        Ok(Snapshot {
            table,
            stats,
            insights,
        })
    }

    fn primary(&self) -> Color {
        hex_color(self.theme.primary())
    }

    fn scenario_color(&self, kind: ScenarioKind) -> Color {
        hex_color(self.theme.scenario_color(kind))
    }

    fn entity_color(&self, index: usize) -> Color {
        self.config
            .entities
            .get(index)
            .map(|e| hex_color(self.theme.entity_color(e)))
            .unwrap_or(Color::White)
    }

    fn border(&self) -> Color {
        match self.theme {
            Theme::Light => Color::White,
            Theme::Dark => hex_color(self.theme.border()),
        }
    }

    fn text_color(&self) -> Color {
        match self.theme {
            Theme::Light => Color::White,
            Theme::Dark => hex_color(self.theme.text()),
        }
    }
}

fn hex_color(hex: &str) -> Color {
    parse_hex(hex)
        .map(|(r, g, b)| Color::Rgb(r, g, b))
        .unwrap_or(Color::White)
}

pub fn run_ui(app: &mut App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the app
    let res = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!(error = %err, "dashboard stopped");
        println!("Error: {:?}", err);
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            let adjusted = match key.code {
                KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                KeyCode::Tab => {
                    if key.modifiers.contains(KeyModifiers::SHIFT) {
                        app.previous_page();
                    } else {
                        app.next_page();
                    }
                    Ok(())
                }
                KeyCode::BackTab => {
                    app.previous_page();
                    Ok(())
                }
                KeyCode::Char('1') => {
                    app.current_page = Page::Summary;
                    Ok(())
                }
                KeyCode::Char('2') => {
                    app.current_page = Page::Detailed;
                    Ok(())
                }
                KeyCode::Char('3') => {
                    app.current_page = Page::Sensitivity;
                    Ok(())
                }
                KeyCode::Down | KeyCode::Char('j') => {
                    app.next_control();
                    Ok(())
                }
                KeyCode::Up | KeyCode::Char('k') => {
                    app.previous_control();
                    Ok(())
                }
                KeyCode::Right | KeyCode::Char('l') => app.adjust(1),
                KeyCode::Left | KeyCode::Char('h') => app.adjust(-1),
                KeyCode::PageUp => app.adjust(5),
                KeyCode::PageDown => app.adjust(-5),
                KeyCode::Char('r') => {
                    app.reset();
                    Ok(())
                }
                KeyCode::Char('c') => {
                    app.clear_overrides();
                    Ok(())
                }
                KeyCode::Char('t') => {
                    app.toggle_theme();
                    Ok(())
                }
                _ => Ok(()),
            };

            if let Err(err) = adjusted {
                tracing::warn!(error = %err, "slider adjustment rejected");
            }
        }
    }
}

fn ui(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header with navigation
            Constraint::Min(0),    // Content area
            Constraint::Length(3), // Status bar
        ])
        .split(f.size());

    render_header(f, chunks[0], app);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(38), // Control panel
            Constraint::Min(0),     // Page content
        ])
        .split(chunks[1]);

    render_controls(f, body[0], app);

    match app.snapshot() {
        Ok(snapshot) => match app.current_page {
            Page::Summary => render_summary(f, body[1], app, &snapshot),
            Page::Detailed => render_detailed(f, body[1], app, &snapshot),
            Page::Sensitivity => render_sensitivity(f, body[1], app),
        },
        Err(err) => {
            let message = Paragraph::new(format!("  Configuration error: {}", err)).block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Red))
                    .title(" Error "),
            );
            f.render_widget(message, body[1]);
        }
    }

    render_status_bar(f, chunks[2], app);
}

fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let mut tab_spans = vec![Span::styled(
        " ARR Estimator ",
        Style::default()
            .fg(app.primary())
            .add_modifier(Modifier::BOLD),
    )];
    tab_spans.push(Span::raw("  "));

    for (i, page) in Page::ALL.iter().enumerate() {
        if i > 0 {
            tab_spans.push(Span::raw(" │ "));
        }

        let style = if *page == app.current_page {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        tab_spans.push(Span::styled(page.title().to_string(), style));
    }

    tab_spans.push(Span::raw("  |  "));
    for (i, entity) in app.config.entities.iter().enumerate() {
        if i > 0 {
            tab_spans.push(Span::raw("  "));
        }
        tab_spans.push(Span::styled(
            format!("{}: {} FTE", entity.name, format_headcount(entity.headcount)),
            Style::default().fg(app.entity_color(i)),
        ));
    }

    let header = Paragraph::new(vec![Line::from(tab_spans)]).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(app.primary())),
    );

    f.render_widget(header, area);
}

fn slider_bar(value: f64, bounds: &RateBounds, width: usize) -> String {
    let span = bounds.max - bounds.min;
    let ratio = if span > 0.0 {
        ((value - bounds.min) / span).clamp(0.0, 1.0)
    } else {
        1.0
    };
    let filled = (ratio * width as f64).round() as usize;
    format!("[{}{}]", "█".repeat(filled), "░".repeat(width - filled))
}

fn render_controls(f: &mut Frame, area: Rect, app: &App) {
    let mut content = vec![
        Line::from(""),
        Line::from(Span::styled(
            "  ARR per FTE Scenarios",
            Style::default()
                .fg(app.primary())
                .add_modifier(Modifier::BOLD),
        )),
    ];

    let mut entity_index = 0;
    for (i, control) in app.controls.iter().enumerate() {
        if let Control::Override(_) = control {
            if entity_index == 0 {
                content.push(Line::from(""));
                content.push(Line::from("  ──────────────────────────────"));
                content.push(Line::from(Span::styled(
                    "  Company-Specific Tuning",
                    Style::default()
                        .fg(app.primary())
                        .add_modifier(Modifier::BOLD),
                )));
            }
        }

        let label_color = match control {
            Control::Scenario(kind) => app.scenario_color(*kind),
            Control::Override(_) => {
                let color = app.entity_color(entity_index);
                entity_index += 1;
                color
            }
        };

        let marker = if i == app.selected_control {
            Span::styled("→ ", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD))
        } else {
            Span::raw("  ")
        };

        content.push(Line::from(""));
        content.push(Line::from(vec![
            marker,
            Span::styled(
                app.control_label(control),
                Style::default().fg(label_color).add_modifier(Modifier::BOLD),
            ),
        ]));

        let line = match (app.control_value(control), app.control_bounds(control)) {
            (Ok(value), Ok(bounds)) => Line::from(vec![
                Span::raw("  "),
                Span::styled(slider_bar(value, &bounds, 16), Style::default().fg(label_color)),
                Span::raw(" "),
                Span::styled(format_rate(value), Style::default().fg(app.text_color())),
            ]),
            _ => Line::from(Span::styled("  unavailable", Style::default().fg(Color::Red))),
        };
        content.push(line);
    }

    let panel = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(app.primary()))
            .title(" Control Panel "),
    );

    f.render_widget(panel, area);
}

fn render_summary(f: &mut Frame, area: Rect, app: &App, snapshot: &Snapshot) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(8), // Company cards
            Constraint::Length(5), // ARR summary metrics
            Constraint::Min(0),    // Scenario comparison chart
        ])
        .split(area);

    // Company cards
    let card_count = snapshot.table.rows.len().max(1) as u32;
    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(vec![Constraint::Ratio(1, card_count); card_count as usize])
        .split(chunks[0]);

    for (i, row) in snapshot.table.rows.iter().enumerate() {
        let color = app.entity_color(i);
        let mut content = vec![
            Line::from(vec![
                Span::styled("  FTE Count: ", Style::default().add_modifier(Modifier::BOLD)),
                Span::raw(format_headcount(row.headcount)),
            ]),
            Line::from(""),
        ];
        for kind in ScenarioKind::CONFIGURED {
            let value = row.get(kind).map(format_millions).unwrap_or_default();
            content.push(Line::from(vec![
                Span::styled(
                    format!("  {:<6}", kind.as_str()),
                    Style::default()
                        .fg(app.scenario_color(kind))
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(value, Style::default().fg(app.text_color())),
            ]));
        }

        let card = Paragraph::new(content).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color))
                .title(Span::styled(
                    format!(" {} ", row.entity),
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                )),
        );
        f.render_widget(card, cards[i]);
    }

    // ARR summary: base + custom delta per entity, then spread per entity
    let mut metrics: Vec<(String, String, String)> = Vec::new();
    for row in &snapshot.table.rows {
        if let (Some(base), Some(stats)) = (row.get(ScenarioKind::Base), snapshot.stats.entity(&row.entity)) {
            metrics.push((
                format!("{} Base ARR", row.entity),
                format_millions(base),
                format!("{:+.1}M in Custom", stats.custom_delta / 1_000_000.0),
            ));
        }
    }
    for stats in &snapshot.stats.entities {
        metrics.push((
            format!("{} ARR Range", stats.entity),
            format_millions(stats.spread),
            "Bear to Bull spread".to_string(),
        ));
    }

    let metric_count = metrics.len().max(1) as u32;
    let metric_areas = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(vec![Constraint::Ratio(1, metric_count); metric_count as usize])
        .split(chunks[1]);

    for (i, (title, value, caption)) in metrics.into_iter().enumerate() {
        let content = vec![
            Line::from(Span::styled(
                format!(" {}", value),
                Style::default()
                    .fg(app.text_color())
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                format!(" {}", caption),
                Style::default().fg(Color::DarkGray),
            )),
        ];
        let metric = Paragraph::new(content).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(app.border()))
                .title(format!(" {} ", title)),
        );
        f.render_widget(metric, metric_areas[i]);
    }

    // Scenario comparison chart grouped by company
    let mut chart = BarChart::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(app.border()))
                .title(" Scenario Comparison (ARR $M) "),
        )
        .bar_width(9)
        .bar_gap(1)
        .group_gap(4)
        .max((snapshot.table.max_value() / 100_000.0).round().max(1.0) as u64);

    for row in &snapshot.table.rows {
        let bars: Vec<Bar> = row
            .ordered()
            .map(|(kind, value)| {
                Bar::default()
                    .value((value / 100_000.0).round() as u64)
                    .text_value(format_millions(value))
                    .label(Line::from(kind.as_str()))
                    .style(Style::default().fg(app.scenario_color(kind)))
            })
            .collect();
        chart = chart.data(
            BarGroup::default()
                .label(Line::from(row.entity.clone()))
                .bars(&bars),
        );
    }

    f.render_widget(chart, chunks[2]);
}

fn render_detailed(f: &mut Frame, area: Rect, app: &App, snapshot: &Snapshot) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(area);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(6), Constraint::Min(0)])
        .split(columns[0]);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(columns[1]);

    render_company_table(f, left[0], app, snapshot);
    render_estimate_table(f, left[1], app, snapshot);
    render_rate_comparison(f, right[0], app);
    render_insights(f, right[1], app, snapshot);
}

fn header_row(labels: &[&str]) -> Row<'static> {
    let cells: Vec<Cell> = labels
        .iter()
        .map(|h| {
            Cell::from(h.to_string()).style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
        })
        .collect();

    Row::new(cells)
        .style(Style::default().bg(Color::DarkGray))
        .height(1)
}

fn render_company_table(f: &mut Frame, area: Rect, app: &App, snapshot: &Snapshot) {
    let rows = snapshot.stats.entities.iter().enumerate().map(|(i, stats)| {
        Row::new(vec![
            Cell::from(stats.entity.clone()).style(Style::default().fg(app.entity_color(i))),
            Cell::from(format_headcount(stats.headcount)),
            Cell::from(format_percent(stats.relative_size)),
        ])
        .height(1)
    });

    let table = Table::new(
        rows,
        [
            Constraint::Length(16),
            Constraint::Length(12),
            Constraint::Length(14),
        ],
    )
    .header(header_row(&["Company", "FTE Count", "Relative Size"]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(app.border()))
            .title(" Company Information "),
    );

    f.render_widget(table, area);
}

fn render_estimate_table(f: &mut Frame, area: Rect, app: &App, snapshot: &Snapshot) {
    let rows = snapshot.table.rows.iter().enumerate().map(|(i, row)| {
        let mut cells = vec![Cell::from(row.entity.clone()).style(Style::default().fg(app.entity_color(i)))];
        for kind in ScenarioKind::DISPLAY_ORDER {
            let value = row.get(kind).map(format_millions).unwrap_or_default();
            cells.push(Cell::from(value).style(Style::default().fg(app.scenario_color(kind))));
        }
        Row::new(cells).height(1)
    });

    let table = Table::new(
        rows,
        [
            Constraint::Length(12),
            Constraint::Length(10),
            Constraint::Length(10),
            Constraint::Length(10),
            Constraint::Length(10),
        ],
    )
    .header(header_row(&["Company", "Bear", "Base", "Bull", "Custom"]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(app.border()))
            .title(" ARR Estimates "),
    );

    f.render_widget(table, area);
}

fn render_rate_comparison(f: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.border()))
        .title(" ARR per FTE Comparison ($K) ");

    let bars = match rate_comparison(&app.config) {
        Ok(bars) => bars,
        Err(err) => {
            f.render_widget(Paragraph::new(format!("  {}", err)).block(block), area);
            return;
        }
    };

    let scenario_count = ScenarioKind::CONFIGURED.len();
    let rendered: Vec<Bar> = bars
        .iter()
        .enumerate()
        .map(|(i, bar)| {
            let color = if i < scenario_count {
                app.scenario_color(ScenarioKind::CONFIGURED[i])
            } else {
                app.entity_color(i - scenario_count)
            };
            Bar::default()
                .value(bar.rate_k.round() as u64)
                .text_value(format_rate_thousands(bar.rate_k * 1_000.0))
                .label(Line::from(bar.label.clone()))
                .style(Style::default().fg(color))
        })
        .collect();

    let chart = BarChart::default()
        .block(block)
        .bar_width(8)
        .bar_gap(2)
        .data(BarGroup::default().bars(&rendered));

    f.render_widget(chart, area);
}

fn render_insights(f: &mut Frame, area: Rect, app: &App, snapshot: &Snapshot) {
    let mut content = vec![Line::from("")];
    for line in snapshot.insights.lines() {
        content.push(Line::from(vec![
            Span::styled("  • ", Style::default().fg(Color::Yellow)),
            Span::raw(line),
        ]));
    }

    let paragraph = Paragraph::new(content)
        .wrap(ratatui::widgets::Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(app.border()))
                .title(" Key Insights "),
        );

    f.render_widget(paragraph, area);
}

fn render_sensitivity(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(62), Constraint::Percentage(38)])
        .split(area);

    let config = &app.config;
    let range = config.sensitivity_range;

    // Curves in ($K, $M)
    let curves: Vec<Vec<(f64, f64)>> = config
        .entities
        .iter()
        .map(|entity| {
            sensitivity_series(entity, range.rates())
                .map(|(rate, estimate)| (rate / 1_000.0, estimate / 1_000_000.0))
                .collect()
        })
        .collect();

    let x_min = range.start as f64 / 1_000.0;
    let x_max = curves
        .iter()
        .filter_map(|c| c.last().map(|p| p.0))
        .fold(x_min, f64::max);
    let y_max = curves
        .iter()
        .flat_map(|c| c.iter().map(|p| p.1))
        .fold(0.0, f64::max)
        .max(1.0);

    // Vertical marker per configured scenario
    let markers: Vec<(ScenarioKind, Vec<(f64, f64)>)> = config
        .scenarios
        .iter()
        .map(|s| {
            let x = s.rate / 1_000.0;
            let points = (0..=20)
                .map(|i| (x, y_max * f64::from(i) / 20.0))
                .collect();
            (s.kind, points)
        })
        .collect();

    let mut datasets: Vec<Dataset> = curves
        .iter()
        .enumerate()
        .map(|(i, points)| {
            Dataset::default()
                .name(format!("{} ARR ($M)", config.entities[i].name))
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(app.entity_color(i)))
                .data(points)
        })
        .collect();

    for (kind, points) in &markers {
        datasets.push(
            Dataset::default()
                .name(format!("{} Case", kind.as_str()))
                .marker(symbols::Marker::Dot)
                .graph_type(GraphType::Scatter)
                .style(Style::default().fg(app.scenario_color(*kind)))
                .data(points),
        );
    }

    let axis_style = Style::default().fg(Color::DarkGray);
    let chart = Chart::new(datasets)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(app.border()))
                .title(" ARR vs ARR per FTE "),
        )
        .x_axis(
            Axis::default()
                .title("ARR per FTE ($K)")
                .style(axis_style)
                .bounds([x_min, x_max])
                .labels(vec![
                    Span::raw(format!("{:.0}", x_min)),
                    Span::raw(format!("{:.0}", (x_min + x_max) / 2.0)),
                    Span::raw(format!("{:.0}", x_max)),
                ]),
        )
        .y_axis(
            Axis::default()
                .title("ARR ($M)")
                .style(axis_style)
                .bounds([0.0, y_max])
                .labels(vec![
                    Span::raw("0"),
                    Span::raw(format!("{:.0}", y_max / 2.0)),
                    Span::raw(format!("{:.0}", y_max)),
                ]),
        );

    f.render_widget(chart, chunks[0]);

    // Sensitivity table at key rates
    let mut headers = vec!["ARR per FTE".to_string()];
    headers.extend(config.entities.iter().map(|e| format!("{} ARR", e.name)));
    headers.push("Difference".to_string());
    let header_labels: Vec<&str> = headers.iter().map(String::as_str).collect();

    let rows = sensitivity_table(&config.entities, &config.key_rates)
        .into_iter()
        .map(|row| {
            let mut cells = vec![Cell::from(format_rate_thousands(row.rate))];
            cells.extend(row.estimates.iter().map(|v| Cell::from(format_millions(*v))));
            cells.push(Cell::from(row.difference.map(format_millions).unwrap_or_default()));
            Row::new(cells).height(1)
        })
        .collect::<Vec<_>>();

    let widths = vec![Constraint::Length(16); headers.len()];
    let table = Table::new(rows, widths)
        .header(header_row(&header_labels))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(app.border()))
                .title(" Sensitivity Table ($ millions) "),
        );

    f.render_widget(table, chunks[1]);
}

fn render_status_bar(f: &mut Frame, area: Rect, app: &App) {
    let mut status_spans = vec![Span::styled(
        format!(" Page: {} ", app.current_page.title()),
        Style::default().fg(Color::Cyan),
    )];

    status_spans.push(Span::raw(" | "));
    status_spans.push(Span::styled(
        format!("Theme: {}", app.theme.as_str()),
        Style::default().fg(Color::Green),
    ));
    status_spans.push(Span::raw(" | "));
    status_spans.push(Span::styled("Tab", Style::default().fg(Color::Yellow)));
    status_spans.push(Span::raw(" Page | "));
    status_spans.push(Span::styled("↑/↓", Style::default().fg(Color::Yellow)));
    status_spans.push(Span::raw(" Slider | "));
    status_spans.push(Span::styled("←/→", Style::default().fg(Color::Yellow)));
    status_spans.push(Span::raw(" Adjust | "));
    status_spans.push(Span::styled("r", Style::default().fg(Color::Yellow)));
    status_spans.push(Span::raw(" Reset | "));
    status_spans.push(Span::styled("c", Style::default().fg(Color::Yellow)));
    status_spans.push(Span::raw(" Clear custom | "));
    status_spans.push(Span::styled("t", Style::default().fg(Color::Yellow)));
    status_spans.push(Span::raw(" Theme | "));
    status_spans.push(Span::styled("q", Style::default().fg(Color::Red)));
    status_spans.push(Span::raw(" Quit"));

    let status_bar = Paragraph::new(vec![Line::from(status_spans)]).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(app.border())),
    );

    f.render_widget(status_bar, area);
}
