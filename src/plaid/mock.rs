//! Scripted in-memory aggregator for tests
//!
//! Serves a fixed transaction set (or a scripted sequence of pages) and
//! records every transactions request so paging behaviour can be asserted.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::models::{
    Account, AccountBalances, LinkToken, TokenExchange, TransactionRecord, TransactionsPage,
    TransactionsPageRequest,
};
use super::Aggregator;
use crate::errors::UpstreamError;

/// How the mock answers `get_transactions`
#[derive(Debug, Clone)]
enum TransactionSource {
    /// Slice a fixed list by offset/count and report its length as the total
    Fixed(Vec<TransactionRecord>),
    /// Return pre-built pages in order, one per request
    Scripted(Vec<TransactionsPage>),
}

/// Mock implementation of [`Aggregator`]
#[derive(Debug)]
pub struct MockAggregator {
    source: TransactionSource,
    balances: HashMap<String, Vec<Account>>,
    fail_transactions_at: Option<usize>,
    fail_balances: bool,
    requests: Mutex<Vec<TransactionsPageRequest>>,
}

impl Default for MockAggregator {
    fn default() -> Self {
        Self::new()
    }
}

impl MockAggregator {
    pub fn new() -> Self {
        Self {
            source: TransactionSource::Fixed(Vec::new()),
            balances: HashMap::new(),
            fail_transactions_at: None,
            fail_balances: false,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Serve `count` generated transactions dated `date`
    pub fn with_generated_transactions(self, count: usize, date: NaiveDate) -> Self {
        let transactions = (0..count)
            .map(|i| sample_transaction(&format!("tx-{i}"), Decimal::ONE, date))
            .collect();
        self.with_transactions(transactions)
    }

    /// Serve a fixed list of transactions
    pub fn with_transactions(mut self, transactions: Vec<TransactionRecord>) -> Self {
        self.source = TransactionSource::Fixed(transactions);
        self
    }

    /// Serve pre-built pages in order regardless of the requested offset
    pub fn with_pages(mut self, pages: Vec<TransactionsPage>) -> Self {
        self.source = TransactionSource::Scripted(pages);
        self
    }

    /// Fail the transactions request with this zero-based index
    pub fn failing_transactions_at(mut self, request_index: usize) -> Self {
        self.fail_transactions_at = Some(request_index);
        self
    }

    /// Accounts returned for an access token by `get_accounts` and `get_balances`
    pub fn with_accounts(mut self, access_token: &str, accounts: Vec<Account>) -> Self {
        self.balances.insert(access_token.to_string(), accounts);
        self
    }

    /// Fail every accounts and balances request
    pub fn failing_balances(mut self) -> Self {
        self.fail_balances = true;
        self
    }

    /// Every transactions request received so far
    pub fn transaction_requests(&self) -> Vec<TransactionsPageRequest> {
        self.requests
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }

    fn accounts_for(
        &self,
        operation: &'static str,
        access_token: &str,
    ) -> Result<Vec<Account>, UpstreamError> {
        if self.fail_balances {
            return Err(UpstreamError::new(operation, "503 returned by provider"));
        }
        self.balances
            .get(access_token)
            .cloned()
            .ok_or_else(|| UpstreamError::new(operation, "400 INVALID_ACCESS_TOKEN"))
    }
}

#[async_trait]
impl Aggregator for MockAggregator {
    async fn create_link_token(&self, user_id: &str) -> Result<LinkToken, UpstreamError> {
        Ok(LinkToken {
            link_token: format!("link-sandbox-{user_id}"),
            expiration: "2026-10-14T04:00:00Z".to_string(),
        })
    }

    async fn exchange_public_token(
        &self,
        public_token: &str,
    ) -> Result<TokenExchange, UpstreamError> {
        let suffix = public_token.trim_start_matches("public-");
        Ok(TokenExchange {
            access_token: format!("access-{suffix}"),
            item_id: format!("item-{suffix}"),
        })
    }

    async fn get_accounts(&self, access_token: &str) -> Result<Vec<Account>, UpstreamError> {
        self.accounts_for("accounts/get", access_token)
    }

    async fn get_balances(&self, access_token: &str) -> Result<Vec<Account>, UpstreamError> {
        self.accounts_for("accounts/balance/get", access_token)
    }

    async fn get_transactions(
        &self,
        request: &TransactionsPageRequest,
    ) -> Result<TransactionsPage, UpstreamError> {
        let index = {
            let mut requests = self
                .requests
                .lock()
                .map_err(|_| UpstreamError::new("transactions/get", "mock lock poisoned"))?;
            requests.push(request.clone());
            requests.len() - 1
        };

        if self.fail_transactions_at == Some(index) {
            return Err(UpstreamError::new(
                "transactions/get",
                "500 INTERNAL_SERVER_ERROR",
            ));
        }

        match &self.source {
            TransactionSource::Fixed(all) => {
                let in_range: Vec<&TransactionRecord> = all
                    .iter()
                    .filter(|t| t.date >= request.start_date && t.date <= request.end_date)
                    .collect();
                let transactions = in_range
                    .iter()
                    .skip(request.offset)
                    .take(request.count)
                    .map(|t| (*t).clone())
                    .collect();
                Ok(TransactionsPage {
                    transactions,
                    total_transactions: in_range.len(),
                })
            }
            TransactionSource::Scripted(pages) => pages
                .get(index)
                .cloned()
                .ok_or_else(|| UpstreamError::new("transactions/get", "no scripted page left")),
        }
    }
}

/// Build a settled transaction for tests and fixtures
pub fn sample_transaction(id: &str, amount: Decimal, date: NaiveDate) -> TransactionRecord {
    TransactionRecord {
        id: id.to_string(),
        account_id: "acc-checking".to_string(),
        amount,
        date,
        name: format!("Transaction {id}"),
        merchant_name: None,
        category: Vec::new(),
        pending: false,
        iso_currency_code: Some("USD".to_string()),
    }
}

/// Build an account with the given current balance
pub fn sample_account(id: &str, current: Option<Decimal>) -> Account {
    Account {
        account_id: id.to_string(),
        name: format!("Account {id}"),
        official_name: None,
        mask: Some("0000".to_string()),
        account_type: "depository".to_string(),
        subtype: Some("checking".to_string()),
        balances: AccountBalances {
            available: current,
            current,
            limit: None,
            iso_currency_code: Some("USD".to_string()),
        },
    }
}
