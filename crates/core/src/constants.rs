use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// The whole of an expense, in percent.
pub const FULL_PERCENTAGE: Decimal = dec!(100);

/// Decimal places percentages carry when handed to persistence
pub const PERCENTAGE_PRECISION: u32 = 2;

/// Storage key / default file stem of the local expense store.
pub const STORE_NAME: &str = "wariflex-storage";

/// Header row of the exported CSV report
pub const CSV_HEADERS: [&str; 3] = ["Participant", "Percentage (%)", "Amount"];

/// UTF-8 byte order mark, so spreadsheet apps detect the encoding.
pub const UTF8_BOM: &str = "\u{feff}";
