//! Dashboard rendering: query box, company details, price-history chart.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::symbols;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph};
use ratatui::Frame;

use crate::dashboard::{App, SearchState};
use crate::dashboard::data::HistoricalRow;
use crate::pipeline::CompanyRow;

pub fn render(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(12),
            Constraint::Min(8),
        ])
        .split(f.area());

    render_query(f, chunks[0], app);

    match &app.search {
        SearchState::Idle => {
            let hint = Paragraph::new("Type a company name and press Enter. Esc quits.")
                .style(muted())
                .block(Block::default().borders(Borders::ALL).title("Details"));
            f.render_widget(hint, chunks[1]);
        }
        SearchState::NotFound => {
            let msg = Paragraph::new("Company details not found.")
                .style(Style::default().fg(Color::Red))
                .block(Block::default().borders(Borders::ALL).title("Details"));
            f.render_widget(msg, chunks[1]);
        }
        SearchState::Found { company, history } => {
            render_details(f, chunks[1], company);
            render_chart(f, chunks[2], company, history);
        }
    }
}

fn render_query(f: &mut Frame, area: Rect, app: &App) {
    let input = Paragraph::new(app.query.as_str())
        .block(Block::default().borders(Borders::ALL).title("Company search"));
    f.render_widget(input, area);
}

fn render_details(f: &mut Frame, area: Rect, company: &CompanyRow) {
    let pairs = [
        ("Company Name", company.company_name.as_str()),
        ("Ticker", company.ticker.as_str()),
        ("Industry", company.industry.as_str()),
        ("Sector", company.sector.as_str()),
        ("Share Price", company.share_price.as_str()),
        ("Market Cap", company.market_cap.as_str()),
        ("Trailing P/E", company.trailing_pe.as_str()),
        ("52 Week High / Low", ""),
        ("Indicator", company.indicator.as_str()),
        ("Indicator 2", company.indicator_2.as_str()),
    ];

    let range = format!(
        "{} / {}",
        company.fifty_two_week_high, company.fifty_two_week_low
    );

    let lines: Vec<Line> = pairs
        .iter()
        .map(|(label, value)| {
            let value = if *label == "52 Week High / Low" {
                range.as_str()
            } else {
                value
            };
            Line::from(vec![
                Span::styled(format!("{:<22}", label), muted()),
                Span::raw(value.to_string()),
            ])
        })
        .collect();

    let details = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title("Details"));
    f.render_widget(details, area);
}

fn render_chart(f: &mut Frame, area: Rect, company: &CompanyRow, history: &[HistoricalRow]) {
    if history.is_empty() {
        let msg = Paragraph::new("No historical prices for this company.")
            .style(muted())
            .block(Block::default().borders(Borders::ALL).title("History"));
        f.render_widget(msg, area);
        return;
    }

    let series = |pick: fn(&HistoricalRow) -> f64| -> Vec<(f64, f64)> {
        history
            .iter()
            .enumerate()
            .map(|(i, r)| (i as f64, pick(r)))
            .collect()
    };

    let open = series(|r| r.open);
    let close = series(|r| r.close);
    let high = series(|r| r.high);
    let low = series(|r| r.low);

    let y_min = low.iter().map(|(_, v)| *v).fold(f64::INFINITY, f64::min);
    let y_max = high
        .iter()
        .map(|(_, v)| *v)
        .fold(f64::NEG_INFINITY, f64::max);
    let padding = (y_max - y_min).abs() * 0.05;
    let bounds = [y_min - padding, y_max + padding];
    let x_max = (history.len().saturating_sub(1) as f64).max(1.0);

    fn dataset<'a>(name: &'a str, color: Color, data: &'a [(f64, f64)]) -> Dataset<'a> {
        Dataset::default()
            .name(name)
            .marker(symbols::Marker::Braille)
            .style(Style::default().fg(color))
            .graph_type(GraphType::Line)
            .data(data)
    }

    let datasets = vec![
        dataset("Open", Color::Cyan, &open),
        dataset("Close", Color::Yellow, &close),
        dataset("High", Color::Green, &high),
        dataset("Low", Color::Red, &low),
    ];

    let first_date = history.first().map(|r| r.date.clone()).unwrap_or_default();
    let last_date = history.last().map(|r| r.date.clone()).unwrap_or_default();

    let chart = Chart::new(datasets)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("Historical prices - {}", company.company_name)),
        )
        .x_axis(
            Axis::default()
                .title(Span::styled("Date", muted()))
                .style(muted())
                .bounds([0.0, x_max])
                .labels(vec![
                    Span::styled(first_date, muted()),
                    Span::styled(last_date, muted()),
                ]),
        )
        .y_axis(
            Axis::default()
                .title(Span::styled("Price", muted()))
                .style(muted())
                .bounds(bounds)
                .labels(vec![
                    Span::styled(format!("{:.0}", bounds[0]), muted()),
                    Span::styled(format!("{:.0}", bounds[1]), muted()),
                ]),
        );

    f.render_widget(chart, area);
}

fn muted() -> Style {
    Style::default().fg(Color::DarkGray)
}
