pub mod help;
pub mod ledger;
pub mod payments;
pub mod transfers;

use std::sync::Arc;

use tracing::debug;

use crate::api::backoffice::{BackofficeClient, LedgerEntry, PaymentStatus, SystemPayment, Transfer};
use crate::config::Config;
use crate::console::{ConsoleView, Prompter};
use crate::error::{ConsoleError, Result};
use crate::paging::{PagedListViewModel, RecordKey};
use crate::services::ledger_service::{LedgerSource, LEDGER_REFRESH};
use crate::services::payment_service::{self, PaymentSource, PAYMENT_REFRESH};
use crate::services::transfer_service::{TransferAction, TransferSource, TRANSFER_REFRESH};

/// Screen that navigation and search commands apply to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Transfers,
    Ledger,
    Payments,
}

impl Screen {
    pub fn name(&self) -> &'static str {
        match self {
            Screen::Transfers => "transfers",
            Screen::Ledger => "ledger",
            Screen::Payments => "payments",
        }
    }
}

/// A parsed console line
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Help,
    Quit,
    Open { screen: Screen, page: u32 },
    PaymentsForAccount(Option<RecordKey>),
    Next,
    Prev,
    Goto(u32),
    Search(Option<RecordKey>),
    Reset,
    Refresh,
    Transfer { action: TransferAction, id: Option<RecordKey> },
    Reverse(Option<RecordKey>),
    SetStatus { id: Option<RecordKey>, status: PaymentStatus },
    Create,
}

/// What the read loop should do next
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

fn parse_page(arg: Option<&str>) -> Result<u32> {
    match arg {
        None => Ok(0),
        Some(raw) => {
            // Operators count pages from 1
            let shown: u32 = raw.trim_start_matches(['p', 'P']).parse().map_err(|_| {
                ConsoleError::Validation(format!("Invalid page number '{}'", raw))
            })?;
            if shown == 0 {
                return Err(ConsoleError::Validation("Pages start at 1".to_string()));
            }
            Ok(shown - 1)
        }
    }
}

impl Command {
    /// Parse one input line; `Ok(None)` for a blank line
    pub fn parse(line: &str) -> Result<Option<Command>> {
        let parts: Vec<&str> = line.split_whitespace().collect();
        let Some((&command, args)) = parts.split_first() else {
            return Ok(None);
        };
        let first = args.first().copied();
        let id = first.and_then(RecordKey::from_input);

        let parsed = match command.to_lowercase().as_str() {
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            "transfers" | "tr" => Command::Open {
                screen: Screen::Transfers,
                page: parse_page(first)?,
            },
            "ledger" | "entries" => Command::Open {
                screen: Screen::Ledger,
                page: parse_page(first)?,
            },
            "payments" | "pay" => Command::PaymentsForAccount(id),
            "next" | "n" => Command::Next,
            "prev" | "p" => Command::Prev,
            "page" => Command::Goto(parse_page(Some(first.ok_or_else(|| {
                ConsoleError::Validation("Usage: page <number>".to_string())
            })?))?),
            "search" | "find" => Command::Search(id),
            "reset" => Command::Reset,
            "refresh" | "reload" => Command::Refresh,
            "execute" => Command::Transfer {
                action: TransferAction::Execute,
                id,
            },
            "revoke" => Command::Transfer {
                action: TransferAction::Revoke,
                id,
            },
            "reverse" | "reversal" => Command::Reverse(id),
            "status" => {
                let raw = args.get(1).ok_or_else(|| {
                    ConsoleError::Validation(
                        "Usage: status <payment id> <EXECUTED|FAILED|CANCELLED|PENDING>".to_string(),
                    )
                })?;
                Command::SetStatus {
                    id,
                    status: payment_service::parse_target_status(raw)?,
                }
            }
            "create" | "new" => Command::Create,
            other => {
                return Err(ConsoleError::Validation(format!(
                    "Unknown command '{}'. Type 'help' for the command list.",
                    other
                )))
            }
        };

        Ok(Some(parsed))
    }
}

/// The three screens plus the operator's current position
pub struct Session {
    pub(crate) client: Arc<BackofficeClient>,
    pub(crate) prompter: Arc<dyn Prompter>,
    pub(crate) transfers: PagedListViewModel<Transfer>,
    pub(crate) ledger: PagedListViewModel<LedgerEntry>,
    pub(crate) payments: PagedListViewModel<SystemPayment>,
    pub(crate) payment_source: Arc<PaymentSource>,
    active: Screen,
}

impl Session {
    pub fn new(config: &Config, client: Arc<BackofficeClient>, prompter: Arc<dyn Prompter>) -> Self {
        let payment_source = Arc::new(PaymentSource::new(client.clone()));

        let transfers = PagedListViewModel::new(
            Arc::new(TransferSource::new(client.clone())),
            Arc::new(ConsoleView::<Transfer>::new("transfers")),
            config.page_size,
            TRANSFER_REFRESH,
        )
        .with_policy(config.load_policy);

        let ledger = PagedListViewModel::new(
            Arc::new(LedgerSource::new(client.clone())),
            Arc::new(ConsoleView::<LedgerEntry>::new("ledger entries")),
            config.page_size,
            LEDGER_REFRESH,
        )
        .with_policy(config.load_policy);

        let payments = PagedListViewModel::new(
            payment_source.clone(),
            Arc::new(ConsoleView::<SystemPayment>::new("payments")),
            config.page_size,
            PAYMENT_REFRESH,
        )
        .with_policy(config.load_policy);

        Self {
            client,
            prompter,
            transfers,
            ledger,
            payments,
            payment_source,
            active: Screen::Transfers,
        }
    }

    pub(crate) fn activate(&mut self, screen: Screen) {
        if self.active != screen {
            debug!("Switching to {} screen", screen.name());
        }
        self.active = screen;
    }

    /// Ask before a mutating call; `false` means the operator declined
    pub(crate) fn confirm(&self, prompt: &str) -> Result<bool> {
        let approved = self.prompter.confirm(prompt)?;
        if !approved {
            println!("Cancelled.");
        }
        Ok(approved)
    }

    /// Run one parsed command
    pub async fn handle(&mut self, command: Command) -> Result<Flow> {
        debug!("Handling {:?} on {} screen", command, self.active.name());

        match command {
            Command::Help => help::print_help(),
            Command::Quit => return Ok(Flow::Quit),
            Command::Open { screen, page } => {
                self.activate(screen);
                self.load(page).await;
            }
            Command::PaymentsForAccount(account) => {
                self.activate(Screen::Payments);
                payments::open(self, account).await;
            }
            Command::Next => self.change_page(1).await,
            Command::Prev => self.change_page(-1).await,
            Command::Goto(page) => {
                let total = self.total_pages();
                if page >= total {
                    return Err(ConsoleError::Validation(format!(
                        "Page {} does not exist ({} page(s))",
                        page + 1,
                        total
                    )));
                }
                self.load(page).await;
            }
            Command::Search(key) => self.search(key),
            Command::Reset => self.search(None),
            Command::Refresh => {
                let page = self.current_page();
                self.load(page).await;
            }
            Command::Transfer { action, id } => {
                self.activate(Screen::Transfers);
                transfers::act(self, action, id).await?;
            }
            Command::Reverse(id) => {
                self.activate(Screen::Ledger);
                ledger::reverse(self, id).await?;
            }
            Command::SetStatus { id, status } => {
                self.activate(Screen::Payments);
                payments::set_status(self, id, status).await?;
            }
            Command::Create => match self.active {
                Screen::Transfers => transfers::create(self).await?,
                Screen::Payments => payments::create(self).await?,
                Screen::Ledger => {
                    return Err(ConsoleError::Validation(
                        "Ledger entries cannot be created from the console".to_string(),
                    ))
                }
            },
        }

        Ok(Flow::Continue)
    }

    async fn load(&self, page: u32) {
        match self.active {
            Screen::Transfers => self.transfers.load(page).await,
            Screen::Ledger => self.ledger.load(page).await,
            Screen::Payments => self.payments.load(page).await,
        };
    }

    async fn change_page(&self, delta: i64) {
        let moved = match self.active {
            Screen::Transfers => self.transfers.change_page(delta).await,
            Screen::Ledger => self.ledger.change_page(delta).await,
            Screen::Payments => self.payments.change_page(delta).await,
        };
        if moved.is_none() {
            println!("{}", if delta > 0 { "Already on the last page." } else { "Already on the first page." });
        }
    }

    fn search(&self, key: Option<RecordKey>) {
        let found = match self.active {
            Screen::Transfers => self.transfers.filter_by_key(key.clone()).len(),
            Screen::Ledger => self.ledger.filter_by_key(key.clone()).len(),
            Screen::Payments => self.payments.filter_by_key(key.clone()).len(),
        };
        if let Some(key) = key {
            println!("{} match(es) for #{} on this page", found, key);
        }
    }

    fn current_page(&self) -> u32 {
        match self.active {
            Screen::Transfers => self.transfers.current_page(),
            Screen::Ledger => self.ledger.current_page(),
            Screen::Payments => self.payments.current_page(),
        }
    }

    fn total_pages(&self) -> u32 {
        match self.active {
            Screen::Transfers => self.transfers.total_pages(),
            Screen::Ledger => self.ledger.total_pages(),
            Screen::Payments => self.payments.total_pages(),
        }
    }
}
