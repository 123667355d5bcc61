// Money Manager - Core Library
// Exposes the store, validators, reports, and menu loop for the CLI and tests

pub mod db;
pub mod menu;
pub mod report;
pub mod validate;

// Re-export commonly used types
pub use db::{
    CategoryTotal, Income, Store, Transaction, DATE_FORMAT, DEFAULT_CATEGORIES,
};
pub use menu::App;
pub use report::{
    expense_ledger, format_currency, income_ledger, profit_report, spending_by_category,
    ProfitSummary, Table,
};
pub use validate::{
    parse_amount, parse_date, parse_description, parse_menu_choice, parse_yes_no, ParseError,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
