//! Implements InputPort. Inquire-based interactive menu over the use cases.
//!
//! Results are printed as pretty JSON; failures show their error code and the menu continues.

use crate::domain::{CategoryFilters, DomainError, TransactionFilters, TransactionType};
use crate::ports::InputPort;
use crate::usecases::{
    CreateCategory, CreateCategoryRequest, CreateTransaction, CreateTransactionCommand,
    GetAllCategories, GetAllTransactions, GetAllTransactionsQuery, GetBalance,
    GetFilteredTransactions, GetFilteredTransactionsRequest,
};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use inquire::error::InquireError;
use inquire::ui::RenderConfig;
use inquire::{Confirm, CustomType, Select, Text};
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

/// Applies the colored theme to every subsequent prompt.
pub fn apply_theme() {
    inquire::set_global_render_config(RenderConfig::default_colored());
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuItem {
    CreateTransaction,
    ListTransactions,
    FilterTransactions,
    CreateCategory,
    ListCategories,
    Balance,
    Exit,
}

impl MenuItem {
    const ALL: [MenuItem; 7] = [
        MenuItem::CreateTransaction,
        MenuItem::ListTransactions,
        MenuItem::FilterTransactions,
        MenuItem::CreateCategory,
        MenuItem::ListCategories,
        MenuItem::Balance,
        MenuItem::Exit,
    ];
}

impl fmt::Display for MenuItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            MenuItem::CreateTransaction => "New transaction",
            MenuItem::ListTransactions => "List transactions",
            MenuItem::FilterTransactions => "Search transactions",
            MenuItem::CreateCategory => "New category",
            MenuItem::ListCategories => "List categories",
            MenuItem::Balance => "Balance",
            MenuItem::Exit => "Exit",
        };
        f.write_str(label)
    }
}

/// Use cases driven by the menu.
pub struct UseCases {
    pub create_transaction: CreateTransaction,
    pub get_all_transactions: GetAllTransactions,
    pub get_filtered_transactions: GetFilteredTransactions,
    pub create_category: CreateCategory,
    pub get_all_categories: GetAllCategories,
    pub get_balance: GetBalance,
}

/// TUI adapter. Inquire prompts.
pub struct TuiInputPort {
    use_cases: Arc<UseCases>,
    page_size: u32,
}

impl TuiInputPort {
    pub fn new(use_cases: Arc<UseCases>, page_size: u32) -> Self {
        Self {
            use_cases,
            page_size,
        }
    }

    async fn dispatch(&self, item: MenuItem) -> Result<(), DomainError> {
        match item {
            MenuItem::CreateTransaction => self.create_transaction().await,
            MenuItem::ListTransactions => self.list_transactions().await,
            MenuItem::FilterTransactions => self.filter_transactions().await,
            MenuItem::CreateCategory => self.create_category().await,
            MenuItem::ListCategories => self.list_categories().await,
            MenuItem::Balance => print_json(&self.use_cases.get_balance.execute().await?),
            MenuItem::Exit => Ok(()),
        }
    }

    async fn create_transaction(&self) -> Result<(), DomainError> {
        let kind = Select::new(
            "Type:",
            vec![TransactionType::Expense, TransactionType::Income],
        )
        .prompt()
        .map_err(ui_err)?;
        let amount = CustomType::<f64>::new("Amount:")
            .with_error_message("Enter a number")
            .prompt()
            .map_err(ui_err)?;
        let currency = Text::new("Currency:")
            .with_default("COP")
            .prompt()
            .map_err(ui_err)?;
        let category_id = self.pick_category().await?;
        let date = Text::new("Date (YYYY-MM-DD or RFC 3339, empty for now):")
            .prompt()
            .map_err(ui_err)?;
        let description = Text::new("Description:")
            .prompt_skippable()
            .map_err(ui_err)?
            .filter(|d| !d.trim().is_empty());

        let result = self
            .use_cases
            .create_transaction
            .execute(CreateTransactionCommand {
                amount,
                kind,
                currency,
                category_id,
                date: parse_date(&date)?.unwrap_or_else(Utc::now),
                description,
            })
            .await?;
        print_json(&result)
    }

    /// Chooses among active categories by uid; falls back to free text when none exist.
    async fn pick_category(&self) -> Result<String, DomainError> {
        let active = self
            .use_cases
            .get_all_categories
            .execute(Some(CategoryFilters {
                is_active: Some(true),
                ..Default::default()
            }))
            .await?;
        if active.categories.is_empty() {
            return Text::new("Category id:").prompt().map_err(ui_err);
        }
        let labels: Vec<String> = active
            .categories
            .iter()
            .map(|c| format!("{} {}", c.icon.as_deref().unwrap_or("-"), c.name))
            .collect();
        let chosen = Select::new("Category:", labels.clone())
            .prompt()
            .map_err(ui_err)?;
        let index = labels.iter().position(|l| *l == chosen).unwrap_or(0);
        Ok(active.categories[index].uid.clone())
    }

    async fn list_transactions(&self) -> Result<(), DomainError> {
        let offset = CustomType::<u32>::new("Skip how many?")
            .with_default(0)
            .prompt()
            .map_err(ui_err)?;
        let result = self
            .use_cases
            .get_all_transactions
            .execute(GetAllTransactionsQuery {
                limit: Some(self.page_size),
                offset: Some(offset),
            })
            .await?;
        print_json(&result)
    }

    async fn filter_transactions(&self) -> Result<(), DomainError> {
        let kind = Select::new("Type:", vec!["Any", "INCOME", "EXPENSE"])
            .prompt()
            .map_err(ui_err)?;
        let kind = match kind {
            "Any" => None,
            other => Some(other.parse::<TransactionType>()?),
        };
        let category_id = skippable("Category id:")?;
        let description = skippable("Description contains:")?;
        let date_from = parse_date(&skippable("From date:")?.unwrap_or_default())?;
        let date_to = parse_date(&skippable("To date:")?.unwrap_or_default())?;
        let amount_min = CustomType::<f64>::new("Minimum amount:")
            .prompt_skippable()
            .map_err(ui_err)?;
        let amount_max = CustomType::<f64>::new("Maximum amount:")
            .prompt_skippable()
            .map_err(ui_err)?;

        let filters = TransactionFilters {
            kind,
            currency: None,
            category_id,
            date_from,
            date_to,
            amount_min,
            amount_max,
            description,
        };
        debug!(?filters, "searching transactions");
        let response = self
            .use_cases
            .get_filtered_transactions
            .execute(GetFilteredTransactionsRequest {
                filters: Some(filters),
                limit: Some(self.page_size),
                offset: None,
            })
            .await?;
        print_json(&response)
    }

    async fn create_category(&self) -> Result<(), DomainError> {
        let name = Text::new("Name:").prompt().map_err(ui_err)?;
        let description = skippable("Description:")?;
        let color = skippable("Color (#RRGGBB):")?;
        let icon = skippable("Icon:")?;
        let is_active = Confirm::new("Active?")
            .with_default(true)
            .prompt()
            .map_err(ui_err)?;

        let response = self
            .use_cases
            .create_category
            .execute(CreateCategoryRequest {
                name,
                description,
                color,
                icon,
                is_active: Some(is_active),
            })
            .await?;
        print_json(&response)
    }

    async fn list_categories(&self) -> Result<(), DomainError> {
        let status = Select::new("Show:", vec!["All", "Active", "Inactive"])
            .prompt()
            .map_err(ui_err)?;
        let filters = CategoryFilters {
            is_active: match status {
                "Active" => Some(true),
                "Inactive" => Some(false),
                _ => None,
            },
            ..Default::default()
        };
        print_json(&self.use_cases.get_all_categories.execute(Some(filters)).await?)
    }
}

#[async_trait]
impl InputPort for TuiInputPort {
    async fn run(&self) -> Result<(), DomainError> {
        loop {
            let item = match Select::new("What next?", MenuItem::ALL.to_vec()).prompt() {
                Ok(item) => item,
                Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => {
                    break;
                }
                Err(e) => return Err(ui_err(e)),
            };
            if item == MenuItem::Exit {
                break;
            }
            if let Err(e) = self.dispatch(item).await {
                warn!(code = e.code(), "{e}");
                println!("[{} {}] {}", e.status_code(), e.code(), e);
            }
        }
        Ok(())
    }
}

fn ui_err(e: InquireError) -> DomainError {
    DomainError::Ui(e.to_string())
}

/// Optional text answer; blank counts as absent.
fn skippable(message: &str) -> Result<Option<String>, DomainError> {
    Ok(Text::new(message)
        .prompt_skippable()
        .map_err(ui_err)?
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty()))
}

fn print_json<T: Serialize>(value: &T) -> Result<(), DomainError> {
    let json = serde_json::to_string_pretty(value).map_err(|e| DomainError::Ui(e.to_string()))?;
    println!("{json}");
    Ok(())
}

/// Blank input is `None`. Accepts a bare date (midnight UTC) or an RFC 3339 timestamp.
fn parse_date(input: &str) -> Result<Option<DateTime<Utc>>, DomainError> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(None);
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(input) {
        return Ok(Some(ts.with_timezone(&Utc)));
    }
    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| Some(dt.and_utc()))
        .ok_or_else(|| DomainError::validation(format!("Invalid date: {input}")))
}
