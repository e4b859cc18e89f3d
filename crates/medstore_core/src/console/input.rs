//! Prompt reading and strict field parsing for the console menu.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io::{self, BufRead, Write};
use std::str::FromStr;

/// User-facing validation failure for one prompted value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    InvalidNumber { field: &'static str, value: String },
    NonPositiveId(i64),
}

impl Display for InputError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidNumber { field, value } => {
                write!(f, "invalid {field} `{value}`: expected a number")
            }
            Self::NonPositiveId(_) => write!(f, "Invalid ID. Please enter a positive integer."),
        }
    }
}

impl Error for InputError {}

/// Menu entries in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Insert,
    Update,
    Delete,
    ShowAll,
    Exit,
}

impl MenuChoice {
    /// Maps the typed menu number; anything else is `None`.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "1" => Some(Self::Insert),
            "2" => Some(Self::Update),
            "3" => Some(Self::Delete),
            "4" => Some(Self::ShowAll),
            "5" => Some(Self::Exit),
            _ => None,
        }
    }
}

pub(super) type ConsoleResult<T> = Result<T, ConsoleError>;

pub(super) enum ConsoleError {
    Io(io::Error),
    Input(InputError),
    /// Input stream ended mid-action.
    Closed,
}

impl From<io::Error> for ConsoleError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<InputError> for ConsoleError {
    fn from(value: InputError) -> Self {
        Self::Input(value)
    }
}

/// Prints `label`, then reads one line without its line terminator.
///
/// Returns `Ok(None)` at end of input.
pub(super) fn prompt<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    label: &str,
) -> io::Result<Option<String>> {
    write!(output, "{label}")?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    let trimmed_len = line.trim_end_matches(['\n', '\r']).len();
    line.truncate(trimmed_len);
    Ok(Some(line))
}

pub(super) fn parse_field<T: FromStr>(field: &'static str, raw: &str) -> Result<T, InputError> {
    raw.trim().parse().map_err(|_| InputError::InvalidNumber {
        field,
        value: raw.to_string(),
    })
}

/// Parses a price; `inf` and `NaN` parse as `f64` but are refused.
pub(super) fn parse_price(raw: &str) -> Result<f64, InputError> {
    let price: f64 = parse_field("price", raw)?;
    if !price.is_finite() {
        return Err(InputError::InvalidNumber {
            field: "price",
            value: raw.to_string(),
        });
    }
    Ok(price)
}
