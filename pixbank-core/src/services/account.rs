//! Account service - account listings, statement and transfers
//!
//! Thin request/response mappings. Nothing is validated, filtered or cached
//! locally; each call is one round trip.

use std::sync::Arc;

use crate::adapters::http::ApiClient;
use crate::domain::result::{Error, Result};
use crate::domain::{
    BankAccount, BankAccountsResponse, Statement, StatementResponse, Transfer, TransferFilters,
    TransferRequest,
};
use crate::services::logging::{record, LogEvent, LoggingService};

pub struct AccountService {
    api: Arc<ApiClient>,
    logger: Option<Arc<LoggingService>>,
}

impl AccountService {
    pub fn new(api: Arc<ApiClient>, logger: Option<Arc<LoggingService>>) -> Self {
        Self { api, logger }
    }

    /// The caller's own bank accounts
    pub fn my_accounts(&self) -> Result<Vec<BankAccount>> {
        self.api
            .get::<BankAccountsResponse>("/users/bank_accounts/my")
            .map(|r| r.user_bank_accounts)
            .inspect_err(|e| self.log_failure("my_accounts", e))
    }

    /// Accounts that can receive a transfer
    pub fn available_accounts(&self) -> Result<Vec<BankAccount>> {
        self.api
            .get::<BankAccountsResponse>("/users/bank_accounts")
            .map(|r| r.user_bank_accounts)
            .inspect_err(|e| self.log_failure("available_accounts", e))
    }

    /// One page of the transfer statement. Filters go out as query
    /// parameters exactly as given.
    pub fn transactions(&self, filters: Option<&TransferFilters>) -> Result<Statement> {
        let path = "/users/bank_account_transfers/statements";
        let result = match filters {
            Some(filters) => self.api.get_with_query::<_, StatementResponse>(path, filters),
            None => self.api.get::<StatementResponse>(path),
        };
        result
            .map(|r| r.data)
            .inspect_err(|e| self.log_failure("transactions", e))
    }

    /// Submit a transfer and return the record the backend created
    pub fn transfer(&self, request: &TransferRequest) -> Result<Transfer> {
        self.api
            .post("/users/bank_account_transfers", &request.to_body())
            .inspect_err(|e| self.log_failure("transfer", e))
    }

    fn log_failure(&self, operation: &str, error: &Error) {
        record(
            &self.logger,
            LogEvent::new("request_failed")
                .with_operation(operation)
                .with_status(error.status())
                .with_error(error.to_string()),
        );
    }
}
