//! Transfer domain models: records, submissions, statement queries

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::account::{deserialize_amount, BankAccount};

/// Transfer type discriminator, sent to the backend as an integer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum TransferType {
    /// Instant transfer (1)
    Pix,
    /// Scheduled/batch transfer (2)
    Ted,
}

impl TransferType {
    pub fn code(self) -> u8 {
        match self {
            TransferType::Pix => 1,
            TransferType::Ted => 2,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TransferType::Pix => "PIX",
            TransferType::Ted => "TED",
        }
    }
}

impl From<TransferType> for u8 {
    fn from(value: TransferType) -> Self {
        value.code()
    }
}

impl TryFrom<u8> for TransferType {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(TransferType::Pix),
            2 => Ok(TransferType::Ted),
            other => Err(format!("unknown transfer type: {}", other)),
        }
    }
}

impl FromStr for TransferType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pix" | "1" => Ok(TransferType::Pix),
            "ted" | "2" => Ok(TransferType::Ted),
            other => Err(format!("unknown transfer type '{}' (expected pix or ted)", other)),
        }
    }
}

impl fmt::Display for TransferType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Statement direction filter. The backend calls this parameter `transfer_type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Sent,
    Received,
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sent" => Ok(Direction::Sent),
            "received" => Ok(Direction::Received),
            other => Err(format!("unknown direction '{}' (expected sent or received)", other)),
        }
    }
}

/// A transfer record created by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transfer {
    pub id: i64,
    #[serde(deserialize_with = "deserialize_amount")]
    pub amount_to_transfer: Decimal,
    pub transfer_type: TransferType,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub source_account: Option<BankAccount>,
    #[serde(default)]
    pub destination_account: Option<BankAccount>,
}

/// A transfer submission
///
/// `make_success` is forwarded as-is when set. Its meaning is defined by the
/// backend; the client attaches no behavior to it.
#[derive(Debug, Clone, PartialEq)]
pub struct TransferRequest {
    pub from_account_id: i64,
    pub to_account_id: i64,
    pub transfer_type: TransferType,
    pub amount: Decimal,
    pub make_success: Option<bool>,
}

impl TransferRequest {
    pub fn new(
        from_account_id: i64,
        to_account_id: i64,
        transfer_type: TransferType,
        amount: Decimal,
    ) -> Self {
        Self {
            from_account_id,
            to_account_id,
            transfer_type,
            amount,
            make_success: None,
        }
    }

    pub fn with_make_success(mut self, make_success: bool) -> Self {
        self.make_success = Some(make_success);
        self
    }

    /// Wire body for `POST /users/bank_account_transfers`
    pub(crate) fn to_body(&self) -> TransferBody {
        TransferBody {
            bank_account_transfer: TransferBodyInner {
                to_user_bank_account_id: self.to_account_id,
                from_user_bank_account_id: self.from_account_id,
                transfer_type: self.transfer_type,
                amount_to_transfer: self.amount,
            },
            make_success: self.make_success,
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct TransferBody {
    bank_account_transfer: TransferBodyInner,
    #[serde(skip_serializing_if = "Option::is_none")]
    make_success: Option<bool>,
}

#[derive(Debug, Serialize)]
struct TransferBodyInner {
    to_user_bank_account_id: i64,
    from_user_bank_account_id: i64,
    transfer_type: TransferType,
    #[serde(with = "rust_decimal::serde::float")]
    amount_to_transfer: Decimal,
}

/// Statement query parameters. Unset fields are not sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TransferFilters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_value: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_value: Option<Decimal>,
    #[serde(rename = "transfer_type", skip_serializing_if = "Option::is_none")]
    pub direction: Option<Direction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u32>,
}

impl TransferFilters {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// A page of the transfer statement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Statement {
    pub bank_account_transfers: Vec<Transfer>,
    pub total_records: u64,
    pub total_pages: u64,
    pub current_page: u64,
}

/// `{ "data": { ...statement } }`
#[derive(Debug, Deserialize)]
pub(crate) struct StatementResponse {
    pub data: Statement,
}
