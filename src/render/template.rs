//! Fixed visual template shared by every document.
//!
//! All positions are PDF points measured from the bottom left corner of the
//! page. Only the page size and the title text are configurable.

use std::fmt;
use std::str::FromStr;

pub const DEFAULT_TITLE: &str = "Swish payment";

pub const MARGIN_LEFT: i64 = 72;
pub const MARGIN_TOP: i64 = 90;
pub const FOOTER_Y: i64 = 48;

pub const TITLE_SIZE: i64 = 20;
pub const BODY_SIZE: i64 = 11;
pub const FOOTER_SIZE: i64 = 8;

/// Receipt: label column, value column and spacing between fields.
pub const VALUE_X: i64 = 180;
pub const FIELD_SPACING: i64 = 18;
pub const MESSAGE_COLUMNS: usize = 60;
pub const MESSAGE_MAX_LINES: usize = 12;

/// Daily summary table.
pub const TABLE_SIZE: i64 = 10;
pub const TABLE_LINE_HEIGHT: i64 = 14;
pub const TABLE_TIME_X: i64 = MARGIN_LEFT;
pub const TABLE_REFERENCE_X: i64 = 116;
pub const TABLE_AMOUNT_X: i64 = 256;
pub const TABLE_MESSAGE_X: i64 = 356;
pub const TABLE_REFERENCE_COLUMNS: usize = 22;
pub const TABLE_MESSAGE_COLUMNS: usize = 36;

#[derive(Debug, Clone, Copy, Eq, PartialEq, Default)]
pub enum PageSize {
    #[default]
    A4,
    Letter
}

impl PageSize {
    /// Width and height in points.
    pub fn dimensions(&self) -> (i64, i64) {
        match self {
            Self::A4 => (595, 842),
            Self::Letter => (612, 792)
        }
    }
}

impl FromStr for PageSize {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "a4" => Ok(Self::A4),
            "letter" => Ok(Self::Letter),
            other => Err(format!("unknown page size '{other}', expected a4 or letter"))
        }
    }
}

impl fmt::Display for PageSize {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::A4 => formatter.write_str("a4"),
            Self::Letter => formatter.write_str("letter")
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    pub page_size: PageSize,
    pub title: String
}

impl Default for Template {
    fn default() -> Self {
        Self {
            page_size: PageSize::default(),
            title: DEFAULT_TITLE.to_string()
        }
    }
}

impl Template {
    pub fn width(&self) -> i64 {
        self.page_size.dimensions().0
    }

    pub fn height(&self) -> i64 {
        self.page_size.dimensions().1
    }

    /// Rows of the summary table that fit between the header and the footer.
    pub fn table_rows_per_page(&self) -> usize {
        let first_row_y = self.height() - MARGIN_TOP - 3 * TABLE_LINE_HEIGHT;
        let last_row_y = FOOTER_Y + 2 * TABLE_LINE_HEIGHT;

        ((first_row_y - last_row_y) / TABLE_LINE_HEIGHT + 1) as usize
    }
}
