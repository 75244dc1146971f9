use crate::models::Account;
use std::cmp::Ordering;

/// Company order used for the lead list: case-insensitive, ties broken ordinally.
pub fn compare_by_company(a: &Account, b: &Account) -> Ordering {
    a.company
        .to_lowercase()
        .cmp(&b.company.to_lowercase())
        .then_with(|| a.company.cmp(&b.company))
}

pub fn sort_by_company(leads: &mut [Account]) {
    leads.sort_by(compare_by_company);
}

/// Replace the entry with the same identity as `account`, or append it, then
/// return the list re-sorted by company.
pub fn upsert_sorted(mut leads: Vec<Account>, account: Account) -> Vec<Account> {
    match leads.iter().position(|lead| lead.same_identity(&account)) {
        Some(index) => leads[index] = account,
        None => leads.push(account),
    }
    sort_by_company(&mut leads);
    leads
}

#[cfg(test)]
mod tests {
    use super::*;

    fn companies(leads: &[Account]) -> Vec<&str> {
        leads.iter().map(|lead| lead.company.as_str()).collect()
    }

    #[test]
    fn test_new_identity_is_appended_and_sorted() {
        let leads = vec![Account::lead("1", "B Co")];
        let leads = upsert_sorted(leads, Account::lead("2", "A Co"));

        assert_eq!(leads, vec![Account::lead("2", "A Co"), Account::lead("1", "B Co")]);
    }

    #[test]
    fn test_existing_identity_is_replaced_without_duplicate() {
        let leads = vec![Account::lead("1", "B Co"), Account::lead("2", "C Co")];
        let leads = upsert_sorted(leads, Account::lead("2", "A Co"));

        assert_eq!(leads.len(), 2);
        assert_eq!(companies(&leads), vec!["A Co", "B Co"]);
        assert_eq!(leads[0].id, "2");
    }

    #[test]
    fn test_company_order_ignores_case() {
        let mut leads = vec![
            Account::lead("1", "beta"),
            Account::lead("2", "Alpha"),
            Account::lead("3", "Beta"),
        ];
        sort_by_company(&mut leads);
        assert_eq!(companies(&leads), vec!["Alpha", "Beta", "beta"]);
    }
}
