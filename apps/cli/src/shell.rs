//! # Interactive Shell
//!
//! Numbered-menu loop over a [`QuoteEngine`].
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────────┐
//! │  print menu ──► "Select: " ──► read line                      │
//! │       ▲                           │                           │
//! │       │           ┌───────────────┼──────────────┐            │
//! │       │           ▼               ▼              ▼            │
//! │       │       1 / 2 / 4           3            0 / EOF        │
//! │       │       render table   read JSON line    "Bye." exit    │
//! │       │           │          quote_order                      │
//! │       └───────────┴───────────────┘                           │
//! └───────────────────────────────────────────────────────────────┘
//! ```
//!
//! Reader and writer are generic so tests drive the shell with a
//! `Cursor` and capture output in a `Vec<u8>`.

use std::io::{BufRead, Write};

use foodshop_core::{PurchasingRequest, QuoteEngine};
use tracing::debug;

use crate::error::{ShellError, ORDER_JSON_EXAMPLE};
use crate::render;

const MENU: &str = "\
=== Food Shop ===
1) View all menu items
2) View all promotions
3) Quote order (JSON input)
4) View order history
0) Exit";

pub struct Shell<R, W> {
    input: R,
    output: W,
    engine: QuoteEngine,
    currency_unit: String,
}

/// Outcome of one prompt read.
enum Line {
    Text(String),
    Eof,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    pub fn new(input: R, output: W, engine: QuoteEngine, currency_unit: impl Into<String>) -> Self {
        Shell {
            input,
            output,
            engine,
            currency_unit: currency_unit.into(),
        }
    }

    pub fn engine(&self) -> &QuoteEngine {
        &self.engine
    }

    /// Runs until `0`, end of input, or an I/O failure.
    pub fn run(&mut self) -> Result<(), ShellError> {
        loop {
            writeln!(self.output)?;
            writeln!(self.output, "{MENU}")?;

            let choice = match self.prompt("Select: ")? {
                Line::Text(choice) => choice,
                Line::Eof => return self.bye(),
            };
            debug!(%choice, "menu choice");

            let result = match choice.as_str() {
                "1" => self.show_menu(),
                "2" => self.show_promotions(),
                "3" => match self.quote_order() {
                    Ok(true) => Ok(()),
                    Ok(false) => return self.bye(),
                    Err(err) => Err(err),
                },
                "4" => self.show_history(),
                "0" => {
                    writeln!(self.output, "Bye.")?;
                    return Ok(());
                }
                _ => {
                    writeln!(self.output, "Invalid choice. Please select 0-4.")?;
                    Ok(())
                }
            };

            if let Err(err) = result {
                if err.is_fatal() {
                    return Err(err);
                }
                writeln!(self.output, "Error: {}", err.user_message())?;
            }
        }
    }

    fn prompt(&mut self, label: &str) -> Result<Line, ShellError> {
        write!(self.output, "{label}")?;
        self.output.flush()?;

        let mut buf = String::new();
        if self.input.read_line(&mut buf)? == 0 {
            return Ok(Line::Eof);
        }
        Ok(Line::Text(buf.trim().to_string()))
    }

    fn bye(&mut self) -> Result<(), ShellError> {
        writeln!(self.output)?;
        writeln!(self.output, "EOF received. Bye.")?;
        Ok(())
    }

    fn show_menu(&mut self) -> Result<(), ShellError> {
        let items = self.engine.menu_catalog();
        render::write_menu(&mut self.output, &items, &self.currency_unit)?;
        Ok(())
    }

    fn show_promotions(&mut self) -> Result<(), ShellError> {
        render::write_promotions(&mut self.output, &self.engine.promotions())?;
        Ok(())
    }

    fn show_history(&mut self) -> Result<(), ShellError> {
        let entries = self.engine.order_history();
        render::write_history(&mut self.output, &entries, &self.currency_unit)?;
        Ok(())
    }

    /// Returns `Ok(false)` when input ended at the JSON prompt.
    fn quote_order(&mut self) -> Result<bool, ShellError> {
        writeln!(self.output, "Example: {ORDER_JSON_EXAMPLE}")?;
        let raw = match self.prompt("Order JSON: ")? {
            Line::Text(raw) => raw,
            Line::Eof => return Ok(false),
        };

        if raw.is_empty() {
            writeln!(self.output, "Error: empty input")?;
            return Ok(true);
        }

        let request: PurchasingRequest = serde_json::from_str(&raw)?;
        let quote = self.engine.quote_order(&request)?;
        render::write_quote(&mut self.output, &quote, &self.currency_unit)?;
        Ok(true)
    }
}
