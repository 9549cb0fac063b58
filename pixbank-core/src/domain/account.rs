//! Bank account domain model

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use super::user::SessionUser;

/// A bank account as returned by the backend
///
/// Immutable snapshot: the client never edits these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BankAccount {
    pub id: i64,
    #[serde(default)]
    pub bank_name: Option<String>,
    #[serde(default)]
    pub bank_code: Option<String>,
    #[serde(default)]
    pub agency_number: Option<String>,
    #[serde(default)]
    pub agency_digit: Option<String>,
    pub number: String,
    pub account_number: String,
    pub account_digit: String,
    /// Freeform account type, e.g. "checking" or "savings"
    #[serde(default)]
    pub account_type: Option<String>,
    /// Holder document (CPF/CNPJ)
    #[serde(default)]
    pub document: Option<String>,
    pub holder_name: String,
    #[serde(deserialize_with = "deserialize_amount")]
    pub balance: Decimal,
    #[serde(deserialize_with = "deserialize_amount")]
    pub amount: Decimal,
    #[serde(default)]
    pub user: Option<SessionUser>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl BankAccount {
    /// Short routing label: "Bank 0001-2 / 12345-6"
    pub fn routing_label(&self) -> String {
        let bank = self
            .bank_name
            .as_deref()
            .or(self.bank_code.as_deref())
            .unwrap_or("Bank");

        let agency = match (&self.agency_number, &self.agency_digit) {
            (Some(number), Some(digit)) if !digit.is_empty() => format!("{}-{}", number, digit),
            (Some(number), _) => number.clone(),
            (None, _) => "-".to_string(),
        };

        format!(
            "{} {} / {}-{}",
            bank, agency, self.account_number, self.account_digit
        )
    }
}

/// `{ "user_bank_accounts": [...] }`
#[derive(Debug, Deserialize)]
pub(crate) struct BankAccountsResponse {
    pub user_bank_accounts: Vec<BankAccount>,
}

/// Deserialize an amount that can be a JSON number or a decimal string
pub(crate) fn deserialize_amount<'de, D>(deserializer: D) -> std::result::Result<Decimal, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Error;
    let value: JsonValue = Deserialize::deserialize(deserializer)?;
    match value {
        JsonValue::Number(n) => n
            .to_string()
            .parse::<Decimal>()
            .or_else(|_| Decimal::from_scientific(&n.to_string()))
            .map_err(|e| D::Error::custom(format!("invalid decimal: {}", e))),
        JsonValue::String(s) => s
            .trim()
            .parse::<Decimal>()
            .map_err(|e| D::Error::custom(format!("invalid decimal: {}", e))),
        _ => Err(D::Error::custom("expected number or string for amount")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn account_json() -> JsonValue {
        json!({
            "id": 12,
            "bank_name": "Banco Exemplo",
            "bank_code": "999",
            "agency_number": "0001",
            "agency_digit": "9",
            "number": "123456",
            "account_number": "12345",
            "account_digit": "6",
            "account_type": "checking",
            "document": "12345678900",
            "holder_name": "Ana Souza",
            "balance": "1500.75",
            "amount": 1500.75,
            "user": {"id": 3, "name": "Ana Souza", "email": "ana@example.com"},
            "created_at": "2024-01-15T10:00:00.000Z",
            "updated_at": "2024-02-01T08:30:00Z"
        })
    }

    #[test]
    fn test_deserialize_full_account() {
        let account: BankAccount = serde_json::from_value(account_json()).unwrap();
        assert_eq!(account.id, 12);
        assert_eq!(account.balance, Decimal::new(150075, 2));
        assert_eq!(account.amount, Decimal::new(150075, 2));
        assert_eq!(account.user.as_ref().map(|u| u.id), Some(3));
    }

    #[test]
    fn test_deserialize_minimal_account() {
        let mut value = account_json();
        let obj = value.as_object_mut().unwrap();
        let optional = [
            "bank_name",
            "bank_code",
            "agency_number",
            "agency_digit",
            "account_type",
            "document",
            "user",
        ];
        for key in optional {
            obj.remove(key);
        }

        let account: BankAccount = serde_json::from_value(value).unwrap();
        assert!(account.bank_name.is_none());
        assert!(account.user.is_none());
        assert_eq!(account.routing_label(), "Bank - / 12345-6");
    }

    #[test]
    fn test_routing_label() {
        let account: BankAccount = serde_json::from_value(account_json()).unwrap();
        assert_eq!(account.routing_label(), "Banco Exemplo 0001-9 / 12345-6");
    }

    #[test]
    fn test_reject_non_numeric_amount() {
        let mut value = account_json();
        value["balance"] = json!(true);
        let result: std::result::Result<BankAccount, _> = serde_json::from_value(value);
        assert!(result.is_err());
    }

    #[test]
    fn test_accounts_envelope() {
        let response: BankAccountsResponse =
            serde_json::from_value(json!({"user_bank_accounts": [account_json(), account_json()]}))
                .unwrap();
        assert_eq!(response.user_bank_accounts.len(), 2);
    }
}
