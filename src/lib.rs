pub mod calendar;
pub mod error;
pub mod formatter;
pub mod locale;
pub mod parser;
pub mod types;

// Main API
pub use calendar::{Calendar, CalendarDate};
pub use error::{FormatError, NumberParseError};
pub use formatter::{format, try_format};
pub use locale::{CultureInfo, DateTimeFormatInfo, LocaleError, NumberFormatInfo};
pub use parser::{ParseNumber, parse, parse_default, try_parse};
pub use types::*;
