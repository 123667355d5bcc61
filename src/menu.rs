//! Menu-driven interaction loop. An explicit state machine rather than
//! recursive re-entry, so long sessions never grow the call stack. Reader
//! and writer are generic so whole sessions can be driven from scripted
//! input in tests.

use anyhow::{bail, Result};
use std::io::{BufRead, Write};
use tracing::debug;

use crate::db::Store;
use crate::report;
use crate::validate::{
    parse_amount, parse_date, parse_description, parse_menu_choice, parse_yes_no, ParseError,
};

const MENU_OPTIONS: [&str; 7] = [
    "Add A New Transaction",
    "Add A New Income",
    "View Total Expenses",
    "View Expenses By Category",
    "View Total Income",
    "View Total Profit / Debt",
    "Exit",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuState {
    MainMenu,
    AddTransaction,
    AddIncome,
    ViewExpenses,
    ViewByCategory,
    ViewIncome,
    ViewProfit,
    Exit,
}

pub struct App<R, W> {
    store: Store,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> App<R, W> {
    pub fn new(store: Store, input: R, output: W) -> Self {
        App {
            store,
            input,
            output,
        }
    }

    /// Drive the state machine until the user picks Exit.
    pub fn run(&mut self) -> Result<()> {
        let mut state = MenuState::MainMenu;
        loop {
            debug!(?state, "entering state");
            state = match state {
                MenuState::MainMenu => self.main_menu()?,
                MenuState::AddTransaction => self.add_transaction()?,
                MenuState::AddIncome => self.add_income()?,
                MenuState::ViewExpenses => {
                    self.show_report(&report::expense_ledger(&self.store)?)?
                }
                MenuState::ViewByCategory => {
                    self.show_report(&report::spending_by_category(&self.store)?)?
                }
                MenuState::ViewIncome => self.show_report(&report::income_ledger(&self.store)?)?,
                MenuState::ViewProfit => self.show_report(&report::profit_report(&self.store)?)?,
                MenuState::Exit => {
                    writeln!(self.output, "\nThank you for using Money Manager. Goodbye!")?;
                    return Ok(());
                }
            };
        }
    }

    fn main_menu(&mut self) -> Result<MenuState> {
        self.print_banner()?;

        let choice = self.prompt_valid("\nPlease choose an option: ", |raw| {
            parse_menu_choice(raw, 1..=7)
        })?;

        Ok(match choice {
            1 => MenuState::AddTransaction,
            2 => MenuState::AddIncome,
            3 => MenuState::ViewExpenses,
            4 => MenuState::ViewByCategory,
            5 => MenuState::ViewIncome,
            6 => MenuState::ViewProfit,
            _ => MenuState::Exit,
        })
    }

    fn print_banner(&mut self) -> Result<()> {
        let stars = format!("{}{}", " ".repeat(13), "* ".repeat(26));
        writeln!(self.output, "{}", stars)?;
        writeln!(
            self.output,
            "{}Hello, welcome to your personal Money Manager",
            " ".repeat(17)
        )?;
        writeln!(
            self.output,
            "{}Choose an option from the menu below",
            " ".repeat(21)
        )?;
        writeln!(self.output, "{}", stars)?;

        let rule = format!("{}*    {}     *", " ".repeat(13), "-".repeat(40));
        writeln!(self.output, "{}", rule)?;
        writeln!(
            self.output,
            "{}*    |{}MENU{}|     *",
            " ".repeat(13),
            " ".repeat(18),
            " ".repeat(16)
        )?;
        writeln!(self.output, "{}", rule)?;
        for (i, option) in MENU_OPTIONS.iter().enumerate() {
            writeln!(
                self.output,
                "{}*    |  {}) {: <33}|     *",
                " ".repeat(13),
                i + 1,
                option
            )?;
        }
        writeln!(self.output, "{}", rule)?;
        writeln!(self.output, "{}", stars)?;
        Ok(())
    }

    fn add_transaction(&mut self) -> Result<MenuState> {
        let mut categories = self.store.list_categories()?;
        for (i, category) in categories.iter().enumerate() {
            writeln!(self.output, "{}. {}", i + 1, category)?;
        }
        writeln!(self.output, "{}. Add a new category", categories.len() + 1)?;

        let choice = self.prompt_valid("Please choose an option: ", |raw| {
            parse_menu_choice(raw, 1..=categories.len() + 1)
        })?;

        let category = if choice == categories.len() + 1 {
            let name = self.prompt_new_category_name()?;
            // Duplicate names silently resolve to the existing category
            self.store.add_category(&name)?;
            writeln!(self.output, "New category '{}' has been added!", name)?;
            name
        } else {
            categories.swap_remove(choice - 1)
        };

        let amount =
            self.prompt_valid("Please enter the amount of the transaction: ", parse_amount)?;
        let description = self.prompt_valid("Description (optional): ", parse_description)?;
        let date = self.prompt_valid("Date (DD-MM-YYYY): ", parse_date)?;

        self.store
            .add_transaction(&category, amount, &description, date)?;
        writeln!(self.output, "The transaction has been added to {}!", category)?;

        self.back_to_menu_or_repeat(MenuState::AddTransaction)
    }

    fn add_income(&mut self) -> Result<MenuState> {
        let amount =
            self.prompt_valid("Please enter the amount of your income: ", parse_amount)?;
        let description = self.prompt_valid("Description (optional): ", parse_description)?;
        let date = self.prompt_valid(
            "Please enter the date of your income (DD-MM-YYYY): ",
            parse_date,
        )?;

        self.store.add_income(amount, &description, date)?;
        writeln!(
            self.output,
            "The income of {} has been added!",
            report::format_currency(amount)
        )?;

        self.back_to_menu_or_repeat(MenuState::AddIncome)
    }

    /// Render a report, then require a 'y' acknowledgment before returning
    /// to the main menu.
    fn show_report(&mut self, rendered: &str) -> Result<MenuState> {
        write!(self.output, "{}", rendered)?;

        loop {
            let raw = self.prompt("Press 'y' to go back to the main menu: ")?;
            if raw.eq_ignore_ascii_case("y") {
                return Ok(MenuState::MainMenu);
            }
            writeln!(self.output, "Invalid input. Enter a valid Input")?;
        }
    }

    fn back_to_menu_or_repeat(&mut self, repeat: MenuState) -> Result<MenuState> {
        let to_menu = self.prompt_valid(
            "Press 'y' to go back to the main menu and 'n' to add another entry: ",
            parse_yes_no,
        )?;
        Ok(if to_menu { MenuState::MainMenu } else { repeat })
    }

    fn prompt_new_category_name(&mut self) -> Result<String> {
        loop {
            let name = self.prompt("Please enter the name of the new category: ")?;
            if !name.is_empty() {
                return Ok(name);
            }
            writeln!(self.output, "Category name cannot be empty!")?;
        }
    }

    /// Re-prompt with the parser's message until the input validates.
    fn prompt_valid<T>(
        &mut self,
        message: &str,
        parse: impl Fn(&str) -> Result<T, ParseError>,
    ) -> Result<T> {
        loop {
            let raw = self.prompt(message)?;
            match parse(&raw) {
                Ok(value) => return Ok(value),
                Err(e) => writeln!(self.output, "{}", e)?,
            }
        }
    }

    fn prompt(&mut self, message: &str) -> Result<String> {
        write!(self.output, "{}", message)?;
        self.output.flush()?;

        let mut line = String::new();
        let read = self.input.read_line(&mut line)?;
        if read == 0 {
            bail!("unexpected end of input");
        }
        Ok(line.trim().to_string())
    }
}
