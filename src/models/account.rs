//! Customer and lead accounts.

use serde::{Deserialize, Serialize};

/// A customer or sales prospect.
///
/// Two accounts are the same record when their `id` matches; every other
/// field is display data that may change between saves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Account {
    pub id: String,
    pub company: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub job_title: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub industry: String,
    /// Prospects are leads; converted customers are not.
    #[serde(default)]
    pub is_lead: bool,
    /// Estimated deal value for leads.
    #[serde(default)]
    pub opportunity_size: f64,
}

impl Account {
    /// Create a lead with only the identifying fields set.
    pub fn lead(id: impl Into<String>, company: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            company: company.into(),
            is_lead: true,
            ..Default::default()
        }
    }

    /// Whether `other` refers to the same account record.
    pub fn same_identity(&self, other: &Account) -> bool {
        self.id == other.id
    }

    /// Contact name as shown in lists, falling back to the company.
    pub fn display_name(&self) -> String {
        let name = format!("{} {}", self.first_name, self.last_name);
        let name = name.trim();
        if name.is_empty() {
            self.company.clone()
        } else {
            name.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_identity_ignores_display_fields() {
        let original = Account::lead("42", "Contoso");
        let mut renamed = original.clone();
        renamed.company = "Contoso Ltd".to_string();
        renamed.city = "Seattle".to_string();

        assert!(original.same_identity(&renamed));
        assert!(!original.same_identity(&Account::lead("43", "Contoso")));
    }

    #[test]
    fn test_display_name_falls_back_to_company() {
        let mut account = Account::lead("1", "Fabrikam");
        assert_eq!(account.display_name(), "Fabrikam");

        account.first_name = "Ada".to_string();
        account.last_name = "Lovelace".to_string();
        assert_eq!(account.display_name(), "Ada Lovelace");
    }

    #[test]
    fn test_deserialize_fills_missing_fields() {
        let json = r#"{"id":"7","company":"Northwind"}"#;
        let account: Account = serde_json::from_str(json).unwrap();
        assert_eq!(account.company, "Northwind");
        assert!(!account.is_lead);
        assert_eq!(account.opportunity_size, 0.0);
    }
}
