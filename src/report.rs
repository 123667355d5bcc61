//! Read-only report rendering. Pulls aggregates out of the [`Store`] and
//! shapes them into bordered fixed-width text tables with a trailing total
//! row where the ledger calls for one.

use anyhow::Result;

use crate::db::{Store, DATE_FORMAT};

const RULE: &str = "--------------";

/// Derived profit/debt figures. At most one of profit and debt is nonzero;
/// both are zero only when income equals expenses.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProfitSummary {
    pub income: f64,
    pub expenses: f64,
    pub profit: f64,
    pub debt: f64,
}

impl ProfitSummary {
    pub fn new(income: f64, expenses: f64) -> Self {
        let net = income - expenses;
        ProfitSummary {
            income,
            expenses,
            profit: net.max(0.0),
            debt: (-net).max(0.0),
        }
    }
}

/// Format a monetary value for display: currency symbol, thousands
/// separators, exactly two decimals. Stored values keep full precision;
/// this is presentation only.
pub fn format_currency(value: f64) -> String {
    let sign = if value < 0.0 { "-" } else { "" };
    let fixed = format!("{:.2}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((&fixed, "00"));

    let mut grouped = String::new();
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    format!("{}${}.{}", sign, grouped, frac_part)
}

/// Minimal fixed-width bordered table, one header row plus data rows.
#[derive(Debug)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new<S: Into<String>>(headers: Vec<S>) -> Self {
        Table {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    pub fn add_row<S: Into<String>>(&mut self, row: Vec<S>) {
        let row: Vec<String> = row.into_iter().map(Into::into).collect();
        debug_assert_eq!(row.len(), self.headers.len());
        self.rows.push(row);
    }

    fn column_widths(&self) -> Vec<usize> {
        let mut widths: Vec<usize> = self.headers.iter().map(|h| h.chars().count()).collect();
        for row in &self.rows {
            for (i, cell) in row.iter().enumerate() {
                widths[i] = widths[i].max(cell.chars().count());
            }
        }
        widths
    }

    fn border(widths: &[usize]) -> String {
        let mut line = String::from("+");
        for w in widths {
            line.push_str(&"-".repeat(w + 2));
            line.push('+');
        }
        line
    }

    fn format_row(cells: &[String], widths: &[usize]) -> String {
        let mut line = String::from("|");
        for (cell, w) in cells.iter().zip(widths) {
            line.push(' ');
            line.push_str(cell);
            line.push_str(&" ".repeat(w - cell.chars().count() + 1));
            line.push('|');
        }
        line
    }

    /// Render with an optional centered title box spanning the table width.
    pub fn render(&self, title: Option<&str>) -> String {
        let widths = self.column_widths();
        let border = Self::border(&widths);
        let mut out = String::new();

        if let Some(title) = title {
            let inner = border.chars().count() - 2;
            out.push('+');
            out.push_str(&"-".repeat(inner));
            out.push_str("+\n");
            out.push_str(&format!("|{:^inner$}|\n", title, inner = inner));
        }

        out.push_str(&border);
        out.push('\n');
        out.push_str(&Self::format_row(&self.headers, &widths));
        out.push('\n');
        out.push_str(&border);
        out.push('\n');
        for row in &self.rows {
            out.push_str(&Self::format_row(row, &widths));
            out.push('\n');
        }
        out.push_str(&border);
        out.push('\n');
        out
    }
}

/// One row per transaction in insertion order, then a total row.
pub fn expense_ledger(store: &Store) -> Result<String> {
    let transactions = store.list_transactions()?;

    let mut table = Table::new(vec!["Category", "Amount", "Description", "Date"]);
    let mut total = 0.0;
    for tx in &transactions {
        table.add_row(vec![
            tx.category.clone(),
            format_currency(tx.amount),
            tx.description.clone(),
            tx.date.format(DATE_FORMAT).to_string(),
        ]);
        total += tx.amount;
    }
    table.add_row(vec![RULE, RULE, RULE, RULE]);
    table.add_row(vec!["Total".to_string(), format_currency(total), String::new(), String::new()]);

    Ok(table.render(Some("Transaction")))
}

/// One row per category that has at least one transaction. Categories with
/// no transactions are omitted, not shown as zero.
pub fn spending_by_category(store: &Store) -> Result<String> {
    let totals = store.sum_by_category()?;

    let mut table = Table::new(vec!["Category", "Total Spending"]);
    for entry in &totals {
        table.add_row(vec![entry.category.clone(), format_currency(entry.total)]);
    }

    Ok(table.render(None))
}

/// One row per income entry, then a total row.
pub fn income_ledger(store: &Store) -> Result<String> {
    let incomes = store.list_incomes()?;
    let total = store.sum_all_incomes()?;

    let mut table = Table::new(vec!["ID", "Amount", "Description", "Date"]);
    for income in &incomes {
        table.add_row(vec![
            income.id.to_string(),
            format_currency(income.amount),
            income.description.clone(),
            income.date.format(DATE_FORMAT).to_string(),
        ]);
    }
    table.add_row(vec![RULE, RULE, RULE, RULE]);
    table.add_row(vec!["Total".to_string(), format_currency(total), String::new(), String::new()]);

    Ok(table.render(Some("INCOME")))
}

/// Four-column single-row summary of income, expenses, profit, debt.
pub fn profit_report(store: &Store) -> Result<String> {
    let summary = ProfitSummary::new(store.sum_all_incomes()?, store.sum_all_transactions()?);

    let mut table = Table::new(vec![
        "Total Income",
        "Total Expenses",
        "Total Profit",
        "Total Debt",
    ]);
    table.add_row(vec![
        format_currency(summary.income),
        format_currency(summary.expenses),
        format_currency(summary.profit),
        format_currency(summary.debt),
    ]);

    Ok(table.render(Some("PROFIT")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn test_store() -> Store {
        let store = Store::open_in_memory().unwrap();
        store.initialize().unwrap();
        store
    }

    fn date(d: u32, m: u32, y: i32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(0.0), "$0.00");
        assert_eq!(format_currency(25.5), "$25.50");
        assert_eq!(format_currency(1234.5), "$1,234.50");
        assert_eq!(format_currency(1234567.891), "$1,234,567.89");
        assert_eq!(format_currency(100.0), "$100.00");
        assert_eq!(format_currency(1000.0), "$1,000.00");
        assert_eq!(format_currency(-60.0), "-$60.00");
    }

    #[test]
    fn test_profit_summary_income_exceeds_expenses() {
        let summary = ProfitSummary::new(100.0, 40.0);
        assert_eq!(summary.profit, 60.0);
        assert_eq!(summary.debt, 0.0);
    }

    #[test]
    fn test_profit_summary_expenses_exceed_income() {
        let summary = ProfitSummary::new(40.0, 100.0);
        assert_eq!(summary.profit, 0.0);
        assert_eq!(summary.debt, 60.0);
    }

    #[test]
    fn test_profit_summary_break_even() {
        let summary = ProfitSummary::new(50.0, 50.0);
        assert_eq!(summary.profit, 0.0);
        assert_eq!(summary.debt, 0.0);
    }

    #[test]
    fn test_table_render_shape() {
        let mut table = Table::new(vec!["A", "Long header"]);
        table.add_row(vec!["hello world", "x"]);
        let rendered = table.render(None);

        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "+-------------+-------------+");
        assert_eq!(lines[1], "| A           | Long header |");
        assert_eq!(lines[3], "| hello world | x           |");
        // Every line is the same width
        assert!(lines.iter().all(|l| l.len() == lines[0].len()));
    }

    #[test]
    fn test_expense_ledger_lists_rows_and_total() {
        let store = test_store();
        store
            .add_transaction("Food", 25.50, "lunch", date(1, 1, 2024))
            .unwrap();
        store
            .add_transaction("Rent", 800.0, "", date(2, 1, 2024))
            .unwrap();

        let report = expense_ledger(&store).unwrap();
        assert!(report.contains("Transaction"));
        assert!(report.contains("Food"));
        assert!(report.contains("$25.50"));
        assert!(report.contains("lunch"));
        assert!(report.contains("01-01-2024"));
        assert!(report.contains("Total"));
        assert!(report.contains("$825.50"));
    }

    #[test]
    fn test_expense_ledger_empty_still_shows_zero_total() {
        let store = test_store();
        let report = expense_ledger(&store).unwrap();
        assert!(report.contains("Total"));
        assert!(report.contains("$0.00"));
    }

    #[test]
    fn test_spending_by_category_omits_unused_categories() {
        let store = test_store();
        store
            .add_transaction("Food", 25.50, "", date(1, 1, 2024))
            .unwrap();

        let report = spending_by_category(&store).unwrap();
        assert!(report.contains("Food"));
        assert!(report.contains("$25.50"));
        assert!(!report.contains("Rent"));
        assert!(!report.contains("$0.00"));
    }

    #[test]
    fn test_income_ledger() {
        let store = test_store();
        store.add_income(1500.0, "salary", date(1, 2, 2024)).unwrap();

        let report = income_ledger(&store).unwrap();
        assert!(report.contains("INCOME"));
        assert!(report.contains("$1,500.00"));
        assert!(report.contains("salary"));
        assert!(report.contains("Total"));
    }

    #[test]
    fn test_profit_report_columns() {
        let store = test_store();
        store.add_income(100.0, "", date(1, 1, 2024)).unwrap();
        store
            .add_transaction("Food", 40.0, "", date(1, 1, 2024))
            .unwrap();

        let report = profit_report(&store).unwrap();
        assert!(report.contains("PROFIT"));
        assert!(report.contains("Total Income"));
        assert!(report.contains("$100.00"));
        assert!(report.contains("$40.00"));
        assert!(report.contains("$60.00"));
    }
}
