//! # Operator Console
//!
//! Line-oriented front end over the commands.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Console Loop                                         │
//! │                                                                         │
//! │   stdin line ──► parse_line ──► Console::execute ──► commands::*        │
//! │                                        │                                │
//! │                                        ▼                                │
//! │                              output channel ──► stdout                  │
//! │                                        ▲                                │
//! │   submit ──► tokio::spawn ─────────────┘  (result printed when it lands;│
//! │                                            the prompt stays usable, so  │
//! │                                            `cancel` works mid-flight)   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod parse;
pub mod render;

pub use parse::{parse_line, ConsoleCommand};

use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::debug;
use vendora_api::{ApiClient, ProductCatalogProvider, SalesApi};
use vendora_core::Settlement;

use crate::commands::sale::SubmitResponse;
use crate::commands::{auth, catalog, sale};
use crate::error::{AppError, AppResult};
use crate::state::{ComposerState, DisplayConfig, SessionState};

/// Whether the loop keeps reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Console session: state plus the collaborators commands run against.
pub struct Console {
    api: ApiClient,
    catalog: Arc<dyn ProductCatalogProvider>,
    sales: Arc<dyn SalesApi>,
    composer: ComposerState,
    session: SessionState,
    display: DisplayConfig,
    out: UnboundedSender<String>,
}

impl Console {
    /// Console wired to the REST API. Output goes to the returned receiver.
    pub fn new(
        api: ApiClient,
        session: SessionState,
        display: DisplayConfig,
    ) -> (Self, UnboundedReceiver<String>) {
        let catalog = Arc::new(api.products());
        let sales = Arc::new(api.sales());
        Console::with_collaborators(api, catalog, sales, session, display)
    }

    pub fn with_collaborators(
        api: ApiClient,
        catalog: Arc<dyn ProductCatalogProvider>,
        sales: Arc<dyn SalesApi>,
        session: SessionState,
        display: DisplayConfig,
    ) -> (Self, UnboundedReceiver<String>) {
        let (out, rx) = mpsc::unbounded_channel();
        let console = Console {
            api,
            catalog,
            sales,
            composer: ComposerState::new(),
            session,
            display,
            out,
        };
        (console, rx)
    }

    pub fn prompt(&self) -> String {
        self.session.prompt()
    }

    fn say(&self, text: impl Into<String>) {
        // Receiver gone means the console is shutting down
        let _ = self.out.send(text.into());
    }

    /// Parses and runs one line.
    pub async fn handle_line(&self, line: &str) -> Flow {
        match parse_line(line) {
            Ok(Some(command)) => self.execute(command).await,
            Ok(None) => Flow::Continue,
            Err(usage) => {
                self.say(usage);
                Flow::Continue
            }
        }
    }

    /// Runs a command; failures are reported on the output channel.
    pub async fn execute(&self, command: ConsoleCommand) -> Flow {
        debug!(?command, "Console command");
        match self.dispatch(command).await {
            Ok(flow) => flow,
            Err(e) => {
                self.say(format!("error {}", e));
                Flow::Continue
            }
        }
    }

    async fn dispatch(&self, command: ConsoleCommand) -> AppResult<Flow> {
        let display = &self.display;

        match command {
            ConsoleCommand::Login { email, password } => {
                let user = auth::login(&self.api, &self.session, &email, &password).await?;
                self.say(format!("Signed in as {}", render::user(&user)));
            }
            ConsoleCommand::Logout => {
                auth::logout(&self.api, &self.session)?;
                self.say("Signed out");
            }
            ConsoleCommand::Whoami => match auth::whoami(&self.session) {
                Some(user) => self.say(render::user(&user)),
                None => self.say("Not signed in"),
            },
            ConsoleCommand::Open => {
                let summary = sale::open_sale(self.catalog.as_ref(), &self.composer).await?;
                self.say(render::composer(&summary, display));
            }
            ConsoleCommand::Products => {
                let products = catalog::list_products(self.catalog.as_ref()).await?;
                self.say(render::products(&products, display));
            }
            ConsoleCommand::Clients => {
                let clients = catalog::list_clients(&self.api).await?;
                self.say(render::clients(&clients));
            }
            ConsoleCommand::Select { product_id } => {
                let summary = sale::select_product(&self.composer, product_id.as_deref())?;
                self.say(render::composer(&summary, display));
            }
            ConsoleCommand::Qty { quantity } => {
                let summary = sale::set_quantity(&self.composer, quantity)?;
                self.say(render::composer(&summary, display));
            }
            ConsoleCommand::Add {
                product_id: None, ..
            } => {
                let response = sale::add_staged(&self.composer)?;
                self.say(render::edit(response.outcome, &response.summary, display));
            }
            ConsoleCommand::Add {
                product_id: Some(product_id),
                quantity,
            } => {
                let quantity = quantity.unwrap_or(vendora_core::composer::DEFAULT_QUANTITY);
                let response = sale::add_item(&self.composer, &product_id, quantity)?;
                self.say(render::edit(response.outcome, &response.summary, display));
            }
            ConsoleCommand::Remove { product_id } => {
                let response = sale::remove_item(&self.composer, &product_id)?;
                self.say(render::edit(response.outcome, &response.summary, display));
            }
            ConsoleCommand::Inc { product_id, by } => {
                let response = sale::adjust_quantity(&self.composer, &product_id, by)?;
                self.say(render::edit(response.outcome, &response.summary, display));
            }
            ConsoleCommand::Dec { product_id, by } => {
                let delta = by.checked_neg().ok_or_else(|| {
                    AppError::validation(format!("Cannot decrease by {}", by))
                })?;
                let response = sale::adjust_quantity(&self.composer, &product_id, delta)?;
                self.say(render::edit(response.outcome, &response.summary, display));
            }
            ConsoleCommand::Show => {
                let summary = sale::get_sale(&self.composer)?;
                self.say(render::composer(&summary, display));
            }
            ConsoleCommand::Submit { client_id } => self.spawn_submission(client_id)?,
            ConsoleCommand::Cancel => {
                let summary = sale::cancel_sale(&self.composer)?;
                self.say("Sale discarded");
                self.say(render::composer(&summary, display));
            }
            ConsoleCommand::Sales { sale_id: None } => {
                let sales = sale::list_sales(&self.api).await?;
                self.say(render::sales(&sales, display));
            }
            ConsoleCommand::Sales {
                sale_id: Some(sale_id),
            } => {
                let recorded = sale::get_recorded_sale(&self.api, &sale_id).await?;
                self.say(render::sale(&recorded, display));
            }
            ConsoleCommand::Void { sale_id } => {
                sale::void_sale(&self.api, &sale_id).await?;
                self.say(format!("Sale {} canceled", sale_id));
            }
            ConsoleCommand::Quit => {
                if self.composer.with_composer(|c| c.is_submitting()).unwrap_or(false) {
                    self.say("A submission is still in flight; its result will not be shown");
                }
                return Ok(Flow::Quit);
            }
        }

        Ok(Flow::Continue)
    }

    /// Starts a submission in the background so the prompt stays usable.
    ///
    /// Emptiness and the in-flight lock are checked up front so the
    /// operator gets those errors immediately.
    fn spawn_submission(&self, client_id: Option<String>) -> AppResult<()> {
        let (count, submitting) = self
            .composer
            .with_composer(|c| (c.pending().len(), c.is_submitting()))?;
        if submitting {
            return Err(vendora_core::CoreError::SubmissionInProgress.into());
        }
        if count == 0 {
            return Err(vendora_core::ValidationError::EmptySale.into());
        }

        let sales = Arc::clone(&self.sales);
        let composer = self.composer.clone();
        let display = self.display.clone();
        let out = self.out.clone();

        self.say("Submitting...");
        tokio::spawn(async move {
            let message = match sale::submit_sale(sales.as_ref(), &composer, client_id).await {
                Ok(SubmitResponse {
                    sale: created,
                    settlement: Settlement::Applied,
                }) => format!(
                    "Sale {} created, total {}",
                    created.id,
                    display.format_money(created.total)
                ),
                Ok(SubmitResponse {
                    sale: created,
                    settlement: Settlement::Discarded,
                }) => format!(
                    "Canceled submission still reached the server as sale {}; run `void {}` to cancel it",
                    created.id, created.id
                ),
                Err(e) => format!("error {}", e),
            };
            let _ = out.send(message);
        });

        Ok(())
    }
}

/// Reads commands from stdin until `quit` or end of input.
pub async fn run(console: Console, mut output: UnboundedReceiver<String>) -> AppResult<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    write_prompt(&mut stdout, &console.prompt()).await?;
    loop {
        tokio::select! {
            Some(message) = output.recv() => {
                stdout.write_all(format!("\n{}\n", message).as_bytes()).await?;
                write_prompt(&mut stdout, &console.prompt()).await?;
            }
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                let flow = console.handle_line(&line).await;
                while let Ok(message) = output.try_recv() {
                    stdout.write_all(format!("{}\n", message).as_bytes()).await?;
                }
                if flow == Flow::Quit {
                    break;
                }
                write_prompt(&mut stdout, &console.prompt()).await?;
            }
        }
    }

    stdout.flush().await?;
    Ok(())
}

async fn write_prompt(stdout: &mut tokio::io::Stdout, prompt: &str) -> AppResult<()> {
    stdout.write_all(prompt.as_bytes()).await?;
    stdout.flush().await?;
    Ok(())
}
