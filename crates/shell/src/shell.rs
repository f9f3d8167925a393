//! Menu loop.

use std::io::{self, BufRead, Write};

use chrono::Utc;
use thiserror::Error;

use stockledger_core::DomainError;
use stockledger_inventory::{Movement, MovementKind};
use stockledger_products::Product;

use crate::config::ReportFormat;
use crate::context::AppContext;
use crate::input::{parse_price, parse_quantity};

const MENU: &str = "\n=== STOCK MENU ===\n\
1 - Add product\n\
2 - Register entry\n\
3 - Register exit\n\
4 - Generate report\n\
0 - Exit";

#[derive(Debug, Error)]
pub enum ShellError {
    /// A domain rule rejected the request; the session continues.
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("console I/O failed: {0}")]
    Io(#[from] io::Error),

    #[error("failed to render report: {0}")]
    Render(#[from] serde_json::Error),

    /// Input ended while a prompt was waiting.
    #[error("end of input")]
    EndOfInput,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// Interactive session over an [`AppContext`].
pub struct Shell<R, W> {
    ctx: AppContext,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    pub fn new(ctx: AppContext, input: R, output: W) -> Self {
        Self { ctx, input, output }
    }

    pub fn context(&self) -> &AppContext {
        &self.ctx
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Run until option `0` or end of input.
    ///
    /// Domain errors are printed as `Error: <message>` and the loop continues;
    /// only console failures end the session with an error.
    pub fn run(&mut self) -> Result<(), ShellError> {
        loop {
            writeln!(self.output, "{MENU}")?;
            let choice = match self.prompt("Choose an option: ") {
                Ok(choice) => choice,
                Err(ShellError::EndOfInput) => return self.quit(),
                Err(err) => return Err(err),
            };

            match self.dispatch(choice.trim()) {
                Ok(Flow::Continue) => {}
                Ok(Flow::Quit) => return Ok(()),
                Err(ShellError::Domain(err)) => writeln!(self.output, "Error: {err}")?,
                Err(ShellError::EndOfInput) => return self.quit(),
                Err(err) => return Err(err),
            }
        }
    }

    fn dispatch(&mut self, choice: &str) -> Result<Flow, ShellError> {
        match choice {
            "1" => self.add_product()?,
            "2" => self.register(MovementKind::Entry)?,
            "3" => self.register(MovementKind::Exit)?,
            "4" => self.report()?,
            "0" => {
                self.quit()?;
                return Ok(Flow::Quit);
            }
            other => {
                tracing::debug!(choice = other, "unknown menu option");
                writeln!(self.output, "Invalid option!")?;
            }
        }
        Ok(Flow::Continue)
    }

    fn quit(&mut self) -> Result<(), ShellError> {
        writeln!(self.output, "Exiting.")?;
        Ok(())
    }

    fn prompt(&mut self, label: &str) -> Result<String, ShellError> {
        write!(self.output, "{label}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(ShellError::EndOfInput);
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }

    fn add_product(&mut self) -> Result<(), ShellError> {
        let name = self.prompt("Product name: ")?;
        let code = self.prompt("Product code: ")?;
        let price = parse_price(&self.prompt("Product price: ")?)?;
        let quantity = parse_quantity(&self.prompt("Initial quantity: ")?)?;

        let product = Product::new(name, code, price, quantity)?;
        let name = product.name().to_string();
        self.ctx.registry.add_product(product)?;
        writeln!(self.output, "Product \"{name}\" added to stock.")?;
        Ok(())
    }

    fn register(&mut self, kind: MovementKind) -> Result<(), ShellError> {
        let code = self.prompt("Product code: ")?;
        let code = self.ctx.registry.require_product(&code)?.code().clone();

        let label = match kind {
            MovementKind::Entry => "Quantity to add: ",
            MovementKind::Exit => "Quantity to remove: ",
        };
        let quantity = parse_quantity(&self.prompt(label)?)?;

        let movement = Movement::new(kind, Utc::now(), quantity, code)?;
        let message = self.ctx.registry.register_movement(&movement)?.message().to_string();
        writeln!(self.output, "{message}")?;

        if kind == MovementKind::Exit {
            let threshold = self.ctx.registry.threshold();
            if let Some(product) = self.ctx.registry.find_product(movement.product_code().as_str()) {
                if product.is_low_stock_at(threshold) {
                    writeln!(self.output, "Low stock for product: {}", product.name())?;
                }
            }
        }
        Ok(())
    }

    fn report(&mut self) -> Result<(), ShellError> {
        let report = self.ctx.registry.report();
        match self.ctx.report_format {
            ReportFormat::Text => write!(self.output, "\n{report}")?,
            ReportFormat::Json => {
                let json = serde_json::to_string_pretty(&report)?;
                writeln!(self.output, "{json}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn run(script: &str) -> (String, AppContext) {
        let mut shell = Shell::new(AppContext::default(), Cursor::new(script.to_string()), Vec::new());
        shell.run().unwrap();
        let ctx = shell.context().clone();
        (String::from_utf8(shell.into_output()).unwrap(), ctx)
    }

    #[test]
    fn zero_quits() {
        let (out, _) = run("0\n");
        assert!(out.contains("=== STOCK MENU ==="));
        assert!(out.ends_with("Exiting.\n"));
    }

    #[test]
    fn eof_quits() {
        let (out, _) = run("");
        assert!(out.ends_with("Exiting.\n"));
    }

    #[test]
    fn unknown_option_continues() {
        let (out, _) = run("9\n0\n");
        assert!(out.contains("Invalid option!"));
        assert!(out.ends_with("Exiting.\n"));
    }

    #[test]
    fn unknown_code_is_reported_before_quantity_prompt() {
        let (out, ctx) = run("2\n404\n0\n");
        assert!(out.contains("Error: product not found: 404"));
        assert!(!out.contains("Quantity to add: "));
        assert_eq!(ctx.registry.history_len(), 0);
    }

    #[test]
    fn bad_price_is_a_validation_error() {
        let (out, ctx) = run("1\nCaneta\n001\nabc\n10\n0\n");
        assert!(out.contains("Error: validation failed: invalid price"));
        assert_eq!(ctx.registry.product_count(), 0);
    }
}
