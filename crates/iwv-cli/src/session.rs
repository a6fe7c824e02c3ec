//! Interactive shopping session.
//!
//! Reads one command per line, turns it into a [`CatalogMessage`] where it
//! edits state, and redraws from state. Errors from a single command are
//! shown and the session carries on.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use chrono::Utc;
use iwv_core::print::render_print_document;
use iwv_core::render::format_table;
use iwv_core::{
    build_summary, AppConfig, CatalogMessage, CatalogState, PricingPolicy, Product, RowState,
    SortColumn, SummaryError, Theme,
};
use iwv_source::{load_theme, save_theme, LocalStore};

use crate::catalog::{fetch_catalog, local_store};
use crate::sink::Sink;

const HELP: &str = "\
commands:
  list                 show the product table
  search TEXT          filter by product name
  clear                remove the filter
  sort COLUMN          sort by name, unit, price or indent (repeat to reverse)
  check NAME           select a product
  uncheck NAME         deselect a product
  qty NAME QUANTITY    set a quantity (0 deselects)
  summary              build the order summary
  print                show the print-ready catalogue
  contact              show the contact link
  theme                toggle dark/light
  help                 show this help
  quit                 leave the session";

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Command {
    List,
    Search(String),
    Clear,
    Sort(SortColumn),
    Check(String),
    Uncheck(String),
    Quantity { name: String, raw: String },
    Summary,
    Print,
    Contact,
    Theme,
    Help,
    Quit,
}

/// Parses one input line. Blank lines yield `Ok(None)`.
///
/// # Errors
///
/// Returns a message for the user when the line is not a known command or is
/// missing an argument.
pub(crate) fn parse_command(line: &str) -> Result<Option<Command>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (verb, rest) = line
        .split_once(char::is_whitespace)
        .map_or((line, ""), |(v, r)| (v, r.trim()));

    let needs_name = |usage: &str| -> Result<String, String> {
        if rest.is_empty() {
            Err(format!("usage: {usage}"))
        } else {
            Ok(rest.to_string())
        }
    };

    let command = match verb.to_ascii_lowercase().as_str() {
        "list" | "ls" => Command::List,
        "search" | "find" => {
            if rest.is_empty() {
                Command::Clear
            } else {
                Command::Search(rest.to_string())
            }
        }
        "clear" => Command::Clear,
        "sort" => {
            let column = needs_name("sort COLUMN")?;
            Command::Sort(column.parse().map_err(|e| format!("{e}"))?)
        }
        "check" | "add" => Command::Check(needs_name("check NAME")?),
        "uncheck" | "remove" => Command::Uncheck(needs_name("uncheck NAME")?),
        "qty" | "quantity" => {
            let (name, raw) = rest
                .rsplit_once(char::is_whitespace)
                .ok_or_else(|| "usage: qty NAME QUANTITY".to_string())?;
            Command::Quantity {
                name: name.trim().to_string(),
                raw: raw.to_string(),
            }
        }
        "summary" | "order" => Command::Summary,
        "print" => Command::Print,
        "contact" => Command::Contact,
        "theme" => Command::Theme,
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        other => return Err(format!("unknown command '{other}', type 'help'")),
    };
    Ok(Some(command))
}

pub(crate) struct Session {
    state: CatalogState,
    store: LocalStore,
    theme: Theme,
    pricing: PricingPolicy,
    contact_url: String,
    sink: Sink,
}

impl Session {
    pub(crate) fn new(
        products: Vec<Product>,
        store: LocalStore,
        pricing: PricingPolicy,
        contact_url: String,
        sink: Sink,
    ) -> Self {
        let theme = load_theme(&store);
        Self {
            state: CatalogState::new(products),
            store,
            theme,
            pricing,
            contact_url,
            sink,
        }
    }

    #[cfg(test)]
    pub(crate) fn state(&self) -> &CatalogState {
        &self.state
    }

    /// Runs until `quit` is confirmed or input ends.
    ///
    /// Quitting with a non-empty selection asks for confirmation first.
    pub(crate) fn run<R: BufRead, W: Write>(&mut self, input: R, out: &mut W) -> io::Result<()> {
        writeln!(out, "theme: {}", self.theme)?;
        self.show(out)?;

        let mut lines = input.lines();
        loop {
            write!(out, "> ")?;
            out.flush()?;
            let Some(line) = lines.next().transpose()? else {
                if self.state.has_pending_selection() {
                    tracing::warn!(
                        selected = self.state.selection().len(),
                        "input closed with an unsent selection"
                    );
                }
                writeln!(out)?;
                return Ok(());
            };

            let command = match parse_command(&line) {
                Ok(Some(command)) => command,
                Ok(None) => continue,
                Err(message) => {
                    writeln!(out, "{message}")?;
                    continue;
                }
            };

            if command == Command::Quit {
                if !self.state.has_pending_selection() {
                    return Ok(());
                }
                write!(
                    out,
                    "You have {} selected product(s). Leave anyway? [y/N] ",
                    self.state.selection().len()
                )?;
                out.flush()?;
                let answer = lines.next().transpose()?.unwrap_or_default();
                if matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes") {
                    return Ok(());
                }
                continue;
            }

            self.handle(command, out)?;
        }
    }

    fn handle<W: Write>(&mut self, command: Command, out: &mut W) -> io::Result<()> {
        match command {
            Command::List => self.show(out),
            Command::Search(term) => {
                self.send(CatalogMessage::Search(term), out)?;
                self.show(out)
            }
            Command::Clear => {
                self.send(CatalogMessage::ClearSearch, out)?;
                self.show(out)
            }
            Command::Sort(column) => {
                self.send(CatalogMessage::SortBy(column), out)?;
                if let Some(sort) = self.state.sort() {
                    writeln!(out, "sorted by {} ({})", sort.column, sort.direction_label())?;
                }
                self.show(out)
            }
            Command::Check(name) => self.send(
                CatalogMessage::Toggle {
                    product_name: name,
                    checked: true,
                },
                out,
            ),
            Command::Uncheck(name) => self.send(
                CatalogMessage::Toggle {
                    product_name: name,
                    checked: false,
                },
                out,
            ),
            Command::Quantity { name, raw } => self.send(
                CatalogMessage::EditQuantity {
                    product_name: name,
                    raw,
                },
                out,
            ),
            Command::Summary => self.summary(out),
            Command::Print => {
                let document = render_print_document(self.state.products(), Utc::now());
                writeln!(out, "{}", document.text())
            }
            Command::Contact => writeln!(out, "{}", self.contact_url),
            Command::Theme => {
                self.theme = self.theme.toggled();
                if let Err(e) = save_theme(&self.store, self.theme) {
                    tracing::warn!(error = %e, "could not persist theme");
                }
                writeln!(out, "theme: {}", self.theme)
            }
            Command::Help => writeln!(out, "{HELP}"),
            Command::Quit => Ok(()),
        }
    }

    /// Applies a message and reports the edited row, if any.
    fn send<W: Write>(&mut self, message: CatalogMessage, out: &mut W) -> io::Result<()> {
        let name = match &message {
            CatalogMessage::Toggle { product_name, .. }
            | CatalogMessage::EditQuantity { product_name, .. } => {
                self.state.find_product(product_name).map(|p| p.product_name.clone())
            }
            _ => None,
        };
        match self.state.apply(message) {
            Ok(Some(row)) => writeln!(out, "{}", row_line(name.as_deref().unwrap_or("?"), row)),
            Ok(None) => Ok(()),
            Err(e) => writeln!(out, "{e}"),
        }
    }

    fn summary<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let summary = match build_summary(self.state.selection(), &self.pricing) {
            Ok(summary) => summary,
            Err(SummaryError::NothingSelected) => {
                return writeln!(out, "Please select at least one product first.");
            }
            Err(e) => {
                tracing::warn!(error = %e, "order summary could not be built");
                return writeln!(out, "Could not build the order summary: {e}");
            }
        };
        let text = summary.to_string();
        if self.sink.is_stdout() {
            return writeln!(out, "{text}");
        }
        match self.sink.deliver(&text) {
            Ok(()) => writeln!(
                out,
                "Order summary copied to {}. Please send it to us on WhatsApp: {}",
                self.sink, self.contact_url
            ),
            Err(e) => writeln!(out, "Could not copy the order summary: {e}"),
        }
    }

    fn show<W: Write>(&self, out: &mut W) -> io::Result<()> {
        write!(out, "{}", format_table(&self.state.render()))
    }
}

fn row_line(name: &str, row: RowState) -> String {
    let mark = if row.checked { "[x]" } else { "[ ]" };
    format!("{mark} {name}: quantity {}", row.quantity)
}

/// Load products and run a session on stdin/stdout.
///
/// # Errors
///
/// Returns an error if the product list cannot be loaded or the terminal
/// cannot be read or written.
pub(crate) async fn run_shop(
    config: &AppConfig,
    out: Option<PathBuf>,
    refresh: bool,
) -> anyhow::Result<()> {
    let products = fetch_catalog(config, refresh).await?;
    let mut session = Session::new(
        products,
        local_store(&config.local),
        config.pricing_policy(),
        config.local.contact_url.clone(),
        Sink::from_arg(out),
    );
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    session.run(stdin.lock(), &mut stdout)?;
    Ok(())
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
