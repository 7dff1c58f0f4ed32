//! Ratatui rendering for the screener terminal

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Cell, Paragraph, Row, Sparkline, Table, Tabs},
    Frame,
};
use screener_chain::{
    ChainRow, ChainTable, ChainView, ContractType, DisplayMode, QuoteView, RowFlags, Session, Tone,
};

use crate::cursor::ChainCursor;

const C_GAIN: Color = Color::Rgb(100, 220, 100);
const C_LOSS: Color = Color::Rgb(220, 100, 100);
const C_WARN: Color = Color::Rgb(255, 171, 0);
const C_DIM: Color = Color::Rgb(120, 120, 120);
const C_TEXT: Color = Color::Rgb(200, 221, 232);
const C_BRIGHT: Color = Color::Rgb(232, 244, 250);
const C_ACCENT: Color = Color::Rgb(0, 184, 212);
const C_ITM_BG: Color = Color::Rgb(15, 30, 45);

/// Colour for a gain/loss tone
pub fn tone_color(tone: Tone) -> Color {
    match tone {
        Tone::Gain => C_GAIN,
        Tone::Loss => C_LOSS,
        Tone::Neutral => C_DIM,
    }
}

/// Badge column text for a row
pub fn row_badge(flags: &RowFlags) -> String {
    let mut badge = String::new();
    badge.push_str(if flags.is_atm_row { "► " } else { "  " });
    badge.push_str(if flags.is_itm { "ITM" } else { "   " });
    if flags.is_unusual {
        badge.push_str(" ⚡");
    }
    badge
}

/// Scale closes to 0..=100 for a sparkline
pub fn sparkline_points(closes: &[f64]) -> Vec<u64> {
    let min = closes.iter().copied().fold(f64::INFINITY, f64::min);
    let max = closes.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let span = max - min;

    closes
        .iter()
        .map(|close| {
            if span > f64::EPSILON {
                ((close - min) / span * 100.0).round() as u64
            } else {
                50
            }
        })
        .collect()
}

/// Render the whole terminal
pub fn render_ui(f: &mut Frame, session: &Session, clock: &str, cursor: &mut ChainCursor) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(8),
            Constraint::Length(3),
            Constraint::Min(8),
            Constraint::Length(2),
        ])
        .split(f.area());

    render_header(f, chunks[0], session, clock);
    render_quote_panel(f, chunks[1], session);
    render_expirations(f, chunks[2], session);
    render_chain(f, chunks[3], session, cursor);
    render_footer(f, chunks[4], session);
}

fn render_header(f: &mut Frame, area: Rect, session: &Session, clock: &str) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(C_ACCENT));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(20), Constraint::Length(12)])
        .split(inner);

    let mut spans = vec![
        Span::styled(
            " SCREENER ",
            Style::default().fg(C_ACCENT).add_modifier(Modifier::BOLD),
        ),
        Span::styled("│ TICKER ", Style::default().fg(C_DIM)),
        Span::styled(
            format!("{}█", session.input()),
            Style::default().fg(C_BRIGHT).add_modifier(Modifier::BOLD),
        ),
    ];
    if session.is_loading() {
        spans.push(Span::styled("  loading…", Style::default().fg(C_WARN)));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), columns[0]);

    f.render_widget(
        Paragraph::new(Span::styled(clock.to_string(), Style::default().fg(C_TEXT)))
            .alignment(Alignment::Right),
        columns[1],
    );
}

fn render_quote_panel(f: &mut Frame, area: Rect, session: &Session) {
    let Some(quote) = session.quote_view() else {
        let block = Block::default()
            .title(" QUOTE ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(C_DIM));
        let hint = Paragraph::new(Span::styled(
            "Type a ticker and press Enter",
            Style::default().fg(C_DIM),
        ))
        .block(block);
        f.render_widget(hint, area);
        return;
    };

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    let block = Block::default()
        .title(format!(" {} · {} ", quote.ticker, quote.name))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(C_ACCENT));
    f.render_widget(Paragraph::new(quote_lines(&quote)).block(block), columns[0]);

    let block = Block::default()
        .title(" 1Y ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(C_DIM));
    let points = sparkline_points(&quote.closes);
    let sparkline = Sparkline::default()
        .block(block)
        .data(&points)
        .max(100)
        .style(Style::default().fg(tone_color(quote.change_tone)));
    f.render_widget(sparkline, columns[1]);
}

fn quote_lines(quote: &QuoteView) -> Vec<Line<'static>> {
    let label = |text: &'static str| Span::styled(text, Style::default().fg(C_DIM));
    let value = |text: &str| Span::styled(text.to_string(), Style::default().fg(C_TEXT));
    let change_style = Style::default().fg(tone_color(quote.change_tone));

    vec![
        Line::from(vec![
            Span::styled(
                quote.price.clone(),
                Style::default().fg(C_BRIGHT).add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!("  {} ({})", quote.change, quote.change_pct), change_style),
            Span::styled(format!("   {}", quote.classification), Style::default().fg(C_DIM)),
        ]),
        Line::from(vec![
            label("OPEN "),
            value(&quote.open),
            label("  PREV "),
            value(&quote.previous_close),
            label("  DAY "),
            value(&quote.day_range),
        ]),
        Line::from(vec![label("52W "), value(&quote.week_52_range)]),
        Line::from(vec![
            label("MCAP "),
            value(&quote.market_cap),
            label("  P/E "),
            value(&quote.pe_ratio),
            label("  FWD "),
            value(&quote.forward_pe),
            label("  EPS "),
            value(&quote.eps),
        ]),
        Line::from(vec![
            label("BETA "),
            value(&quote.beta),
            label("  YIELD "),
            value(&quote.dividend_yield),
            label("  VOL "),
            value(&quote.volume),
            label("  AVG "),
            value(&quote.avg_volume),
        ]),
        Line::from(Span::styled(
            quote.description.clone(),
            Style::default().fg(C_DIM).add_modifier(Modifier::ITALIC),
        )),
    ]
}

fn render_expirations(f: &mut Frame, area: Rect, session: &Session) {
    let side = match session.side() {
        ContractType::Call => " CALLS ",
        ContractType::Put => " PUTS ",
    };
    let mode = match session.mode() {
        DisplayMode::Dollar => "P&L $",
        DisplayMode::Percent => "RETURN %",
    };

    let block = Block::default()
        .title(format!(" EXPIRATION │{side}│ {mode} "))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(C_DIM));

    let expirations = session.expirations();
    let selected = session
        .expiration()
        .and_then(|current| expirations.iter().position(|known| known == current));

    let tabs = Tabs::new(expirations.iter().map(String::as_str))
        .block(block)
        .select(selected.unwrap_or(0))
        .style(Style::default().fg(C_DIM))
        .highlight_style(Style::default().fg(C_ACCENT).add_modifier(Modifier::BOLD));
    f.render_widget(tabs, area);
}

fn render_chain(f: &mut Frame, area: Rect, session: &Session, cursor: &mut ChainCursor) {
    let block = Block::default()
        .title(" OPTIONS CHAIN ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(C_ACCENT));

    match session.chain_view() {
        ChainView::NotLoaded => {
            let text = if session.is_loading() {
                "Loading options chain…"
            } else {
                "No chain loaded"
            };
            let placeholder = Paragraph::new(Span::styled(text, Style::default().fg(C_DIM)))
                .block(block)
                .alignment(Alignment::Center);
            f.render_widget(placeholder, area);
        }
        ChainView::Empty { side, expiration } => {
            let text = format!("No options data for {side}s expiring {expiration}");
            let placeholder = Paragraph::new(Span::styled(text, Style::default().fg(C_WARN)))
                .block(block)
                .alignment(Alignment::Center);
            f.render_widget(placeholder, area);
        }
        ChainView::Table(table) => render_chain_table(f, area, block, &table, cursor),
    }
}

const FIXED_COLUMNS: [(&str, u16); 12] = [
    ("", 8),
    ("STRIKE", 10),
    ("BID", 8),
    ("ASK", 8),
    ("LAST", 8),
    ("MID", 8),
    ("COST", 10),
    ("B/E", 10),
    ("TO B/E", 8),
    ("VOL", 7),
    ("OI", 7),
    ("IV", 7),
];

const HEADER_HEIGHT: u16 = 2;

fn render_chain_table(
    f: &mut Frame,
    area: Rect,
    block: Block,
    table: &ChainTable,
    cursor: &mut ChainCursor,
) {
    let header_style = Style::default().fg(C_WARN).add_modifier(Modifier::BOLD);

    let header_cells = FIXED_COLUMNS
        .iter()
        .map(|(title, _)| Cell::from(*title).style(header_style))
        .chain(table.headers.iter().map(|header| {
            Cell::from(Text::from(vec![
                Line::from(header.label),
                Line::from(Span::styled(
                    header.target_price.clone(),
                    Style::default().fg(C_DIM),
                )),
            ]))
            .style(header_style)
        }));
    let header = Row::new(header_cells).height(HEADER_HEIGHT);

    let rows = table.rows.iter().map(chain_row);

    let widths = FIXED_COLUMNS
        .iter()
        .map(|(_, width)| Constraint::Length(*width))
        .chain(table.headers.iter().map(|_| Constraint::Length(9)));

    let visible_rows = block.inner(area).height.saturating_sub(HEADER_HEIGHT);
    cursor.sync(table);
    cursor.fit(visible_rows as usize);

    let widget = Table::new(rows, widths)
        .header(header)
        .block(block)
        .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED));
    f.render_stateful_widget(widget, area, cursor.state_mut());
}

fn chain_row(row: &ChainRow) -> Row<'static> {
    let text = Style::default().fg(C_TEXT);
    let strike_style = if row.flags.is_atm_row {
        Style::default().fg(C_ACCENT).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(C_BRIGHT)
    };
    let badge_style = if row.flags.is_unusual {
        Style::default().fg(C_WARN)
    } else {
        Style::default().fg(C_ACCENT)
    };

    let mut cells = vec![
        Cell::from(row_badge(&row.flags)).style(badge_style),
        Cell::from(row.strike.clone()).style(strike_style),
        Cell::from(row.bid.clone()).style(text),
        Cell::from(row.ask.clone()).style(text),
        Cell::from(row.last_price.clone()).style(text),
        Cell::from(row.mid_premium.clone()).style(text),
        Cell::from(row.cost_per_contract.clone()).style(text),
        Cell::from(row.breakeven.clone()).style(text),
        Cell::from(row.pct_to_breakeven.clone()).style(text),
        Cell::from(row.volume.clone()).style(text),
        Cell::from(row.open_interest.clone()).style(text),
        Cell::from(row.implied_volatility.clone()).style(text),
    ];
    cells.extend(row.scenarios.iter().map(|cell| {
        Cell::from(cell.text.clone()).style(Style::default().fg(tone_color(cell.tone)))
    }));

    let mut style = Style::default();
    if row.flags.is_itm {
        style = style.bg(C_ITM_BG);
    }
    if row.flags.is_atm_row {
        style = style.add_modifier(Modifier::UNDERLINED);
    }
    Row::new(cells).style(style)
}

fn render_footer(f: &mut Frame, area: Rect, session: &Session) {
    let mut lines = Vec::with_capacity(2);

    if let Some(error) = session.error() {
        lines.push(Line::from(Span::styled(
            format!(" ✖ {error}"),
            Style::default().fg(C_LOSS).add_modifier(Modifier::BOLD),
        )));
    }

    lines.push(Line::from(Span::styled(
        " Enter search │ ↑/↓ PgUp/PgDn Home/End scroll │ Tab calls/puts │ %/$ mode \
         │ ←/→ expiration │ F5 retry │ Del dismiss │ Esc quit",
        Style::default().fg(C_DIM),
    )));

    f.render_widget(Paragraph::new(lines), area);
}
