use std::collections::BTreeMap;

use crate::models::{DocumentPlan, TransactionRecord};
use crate::render::errors::RenderError;
use crate::render::template::*;
use crate::types::{Amount, Currency};

const ELLIPSIS: &str = "...";

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Font {
    Regular,
    Bold
}

/// A single run of text placed at a baseline position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextItem {
    pub font: Font,
    pub size: i64,
    pub x: i64,
    pub y: i64,
    pub text: String
}

/// A horizontal rule from `x1` to `x2` at height `y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rule {
    pub x1: i64,
    pub x2: i64,
    pub y: i64
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Page {
    pub texts: Vec<TextItem>,
    pub rules: Vec<Rule>
}

impl Page {
    fn text(&mut self, font: Font, size: i64, x: i64, y: i64, text: impl Into<String>) {
        self.texts.push(TextItem { font, size, x, y, text: text.into() });
    }

    /// All text on the page, in placement order.
    #[cfg(test)]
    pub fn lines(&self) -> Vec<&str> {
        self.texts.iter().map(|item| item.text.as_str()).collect()
    }
}

/// Lays out a document plan into positioned pages.
pub fn layout(plan: &DocumentPlan, template: &Template, source_name: &str) -> Result<Vec<Page>, RenderError> {
    match plan {
        DocumentPlan::Receipt(record) => Ok(vec![layout_receipt(record, template, source_name)]),
        DocumentPlan::DailySummary { date, records } => {
            layout_daily_summary(&date.format("%Y-%m-%d").to_string(), records, template, source_name)
        }
    }
}

fn layout_receipt(record: &TransactionRecord, template: &Template, source_name: &str) -> Page {
    let mut page = Page::default();
    let mut y = template.height() - MARGIN_TOP;

    let title = if record.amount.is_negative() {
        format!("{} (refund)", template.title)
    } else {
        template.title.clone()
    };

    page.text(Font::Bold, TITLE_SIZE, MARGIN_LEFT, y, title);
    page.rules.push(Rule { x1: MARGIN_LEFT, x2: template.width() - MARGIN_LEFT, y: y - 12 });
    y -= TITLE_SIZE + 2 * FIELD_SPACING;

    let fields = [
        ("Date", timestamp(record)),
        ("Reference", record.reference.clone()),
        ("Amount", format!("{} {}", record.amount, record.currency))
    ];

    for (label, value) in fields {
        page.text(Font::Bold, BODY_SIZE, MARGIN_LEFT, y, label);
        page.text(Font::Regular, BODY_SIZE, VALUE_X, y, value);
        y -= FIELD_SPACING;
    }

    page.text(Font::Bold, BODY_SIZE, MARGIN_LEFT, y, "Message");

    for line in wrap(&record.message, MESSAGE_COLUMNS, MESSAGE_MAX_LINES) {
        page.text(Font::Regular, BODY_SIZE, VALUE_X, y, line);
        y -= FIELD_SPACING - 4;
    }

    page.text(Font::Regular, FOOTER_SIZE, MARGIN_LEFT, FOOTER_Y, format!("Source: {source_name}, row {}", record.row));

    page
}

/// Body lines of the summary table, before pagination.
#[derive(Clone)]
enum TableLine<'a> {
    Payment(&'a TransactionRecord),
    Blank,
    Count(usize),
    Total(Currency, Amount)
}

fn layout_daily_summary(date: &str, records: &[TransactionRecord], template: &Template, source_name: &str) -> Result<Vec<Page>, RenderError> {
    let rows_per_page = template.table_rows_per_page().max(1);
    let payments: Vec<TableLine> = records.iter().map(TableLine::Payment).collect();
    let mut summary = vec![TableLine::Blank, TableLine::Count(records.len())];

    for (currency, total) in totals(records)? {
        summary.push(TableLine::Total(currency, total));
    }

    let mut chunks: Vec<Vec<TableLine>> = payments.chunks(rows_per_page).map(|chunk| chunk.to_vec()).collect();

    //NOTE: count and totals stay together, on a fresh page if the last one is too full
    let last_page_fits = chunks.last().is_some_and(|last| last.len() + summary.len() <= rows_per_page);

    match chunks.last_mut() {
        Some(last) if last_page_fits => last.extend(summary),
        _ => chunks.extend(summary.chunks(rows_per_page).map(|chunk| chunk.to_vec()))
    }

    let page_count = chunks.len();
    let mut pages = Vec::with_capacity(page_count);

    for (index, chunk) in chunks.into_iter().enumerate() {
        let mut page = Page::default();
        let mut y = template.height() - MARGIN_TOP;

        page.text(Font::Bold, TITLE_SIZE, MARGIN_LEFT, y, format!("{} {date}", template.title));
        y -= 2 * TABLE_LINE_HEIGHT;

        page.text(Font::Bold, TABLE_SIZE, TABLE_TIME_X, y, "Time");
        page.text(Font::Bold, TABLE_SIZE, TABLE_REFERENCE_X, y, "Reference");
        page.text(Font::Bold, TABLE_SIZE, TABLE_AMOUNT_X, y, "Amount");
        page.text(Font::Bold, TABLE_SIZE, TABLE_MESSAGE_X, y, "Message");
        page.rules.push(Rule { x1: MARGIN_LEFT, x2: template.width() - MARGIN_LEFT, y: y - 4 });
        y -= TABLE_LINE_HEIGHT;

        for line in &chunk {
            match line {
                TableLine::Payment(record) => {
                    let time = record.time.map(|time| time.format("%H:%M").to_string()).unwrap_or_default();

                    page.text(Font::Regular, TABLE_SIZE, TABLE_TIME_X, y, time);
                    page.text(Font::Regular, TABLE_SIZE, TABLE_REFERENCE_X, y, truncate(&record.reference, TABLE_REFERENCE_COLUMNS));
                    page.text(Font::Regular, TABLE_SIZE, TABLE_AMOUNT_X, y, format!("{} {}", record.amount, record.currency));
                    page.text(Font::Regular, TABLE_SIZE, TABLE_MESSAGE_X, y, truncate(&single_line(&record.message), TABLE_MESSAGE_COLUMNS));
                }
                TableLine::Blank => {}
                TableLine::Count(count) => {
                    let noun = if *count == 1 { "payment" } else { "payments" };
                    page.text(Font::Bold, TABLE_SIZE, TABLE_TIME_X, y, format!("{count} {noun}"));
                }
                TableLine::Total(currency, total) => {
                    page.text(Font::Bold, TABLE_SIZE, TABLE_REFERENCE_X, y, "Total");
                    page.text(Font::Bold, TABLE_SIZE, TABLE_AMOUNT_X, y, format!("{total} {currency}"));
                }
            }

            y -= TABLE_LINE_HEIGHT;
        }

        page.text(Font::Regular, FOOTER_SIZE, MARGIN_LEFT, FOOTER_Y, format!("Source: {source_name}"));
        page.text(Font::Regular, FOOTER_SIZE, template.width() - MARGIN_LEFT - 48, FOOTER_Y, format!("Page {} of {page_count}", index + 1));

        pages.push(page);
    }

    Ok(pages)
}

fn timestamp(record: &TransactionRecord) -> String {
    match record.time {
        Some(time) => format!("{} {}", record.date.format("%Y-%m-%d"), time.format("%H:%M")),
        None => record.date.format("%Y-%m-%d").to_string()
    }
}

/// Sums amounts per currency, ordered by currency code.
pub fn totals(records: &[TransactionRecord]) -> Result<BTreeMap<Currency, Amount>, RenderError> {
    let mut totals = BTreeMap::<Currency, Amount>::new();

    for record in records {
        let total = totals.entry(record.currency).or_insert_with(Amount::zero);

        *total = total.checked_add(record.amount)
            .ok_or(RenderError::TotalOverflow { currency: record.currency })?;
    }

    Ok(totals)
}

/// Word-wraps `text` to at most `columns` characters per line.
///
/// Explicit line breaks are kept, words longer than a line are split, and
/// when more than `max_lines` lines are needed the last kept line ends in `...`.
pub fn wrap(text: &str, columns: usize, max_lines: usize) -> Vec<String> {
    let mut lines = Vec::new();

    for paragraph in text.lines() {
        let mut current = String::new();

        for word in paragraph.split_whitespace() {
            let mut word: Vec<char> = word.chars().collect();

            while !word.is_empty() {
                let used = current.chars().count();
                let space = usize::from(used > 0);

                if used + space + word.len() <= columns {
                    if space == 1 {
                        current.push(' ');
                    }
                    current.extend(word.drain(..));
                } else if used > 0 {
                    lines.push(std::mem::take(&mut current));
                } else {
                    current.extend(word.drain(..columns));
                    lines.push(std::mem::take(&mut current));
                }
            }
        }

        lines.push(current);
    }

    while lines.last().is_some_and(|line| line.is_empty()) {
        lines.pop();
    }

    if lines.len() > max_lines {
        lines.truncate(max_lines);

        if let Some(last) = lines.last_mut() {
            *last = truncate_with_ellipsis(last, columns);
        }
    }

    lines
}

/// Shortens `text` to `columns` characters, marking the cut with `...`.
pub fn truncate(text: &str, columns: usize) -> String {
    if text.chars().count() <= columns {
        text.to_string()
    } else {
        let kept: String = text.chars().take(columns.saturating_sub(ELLIPSIS.len())).collect();
        format!("{kept}{ELLIPSIS}")
    }
}

fn truncate_with_ellipsis(text: &str, columns: usize) -> String {
    let kept: String = text.chars().take(columns.saturating_sub(ELLIPSIS.len())).collect();
    format!("{}{ELLIPSIS}", kept.trim_end())
}

fn single_line(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
