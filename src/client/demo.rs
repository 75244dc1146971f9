//! In-memory customer data client backed by a generated demo data set.

use crate::client::CustomerDataClient;
use crate::client::error::DataClientError;
use crate::models::{Account, Order};
use chrono::{Local, NaiveDate, TimeDelta};
use log::{debug, info};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::sync::Arc;
use tokio::sync::Mutex;
use uuid::{Builder, Uuid};

const COMPANIES: [&str; 12] = [
    "Adventure Works",
    "Alpine Ski House",
    "Blue Yonder Airlines",
    "Coho Winery",
    "Contoso Pharmaceuticals",
    "Fabrikam Residences",
    "Fourth Coffee",
    "Litware Inc",
    "Margie's Travel",
    "Northwind Traders",
    "Proseware Inc",
    "Wide World Importers",
];

const FIRST_NAMES: [&str; 8] = [
    "Ana", "Brian", "Chen", "Dana", "Emeka", "Fatima", "Gustavo", "Hana",
];
const LAST_NAMES: [&str; 8] = [
    "Okafor", "Lindqvist", "Moreau", "Tanaka", "Silva", "Novak", "Reyes", "Kowalski",
];
const CITIES: [&str; 6] = ["Seattle", "Denver", "Austin", "Boston", "Chicago", "Portland"];
const INDUSTRIES: [&str; 5] = ["Retail", "Hospitality", "Manufacturing", "Travel", "Healthcare"];
const ITEMS: [&str; 5] = [
    "Pro Widget",
    "Widget Service Plan",
    "Widget Starter Kit",
    "Enterprise License",
    "Installation",
];

/// Orders are spread over this many days before the reference date.
const ORDER_WINDOW_DAYS: i64 = 56;

#[derive(Debug, Default)]
struct DemoStore {
    seeded: bool,
    accounts: Vec<Account>,
    orders: Vec<Order>,
}

/// Customer data client that keeps everything in memory.
///
/// Nothing is stored until [`CustomerDataClient::seed_data`] runs; the data
/// set is derived from the RNG seed and a reference date, so two clients
/// built with the same inputs hold identical records.
#[derive(Clone, Debug)]
pub struct DemoDataClient {
    rng_seed: u64,
    reference_date: NaiveDate,
    store: Arc<Mutex<DemoStore>>,
}

impl DemoDataClient {
    /// Demo client whose orders fall in the weeks before today.
    pub fn new(rng_seed: u64) -> Self {
        Self::with_reference_date(rng_seed, Local::now().date_naive())
    }

    pub fn with_reference_date(rng_seed: u64, reference_date: NaiveDate) -> Self {
        Self {
            rng_seed,
            reference_date,
            store: Arc::new(Mutex::new(DemoStore::default())),
        }
    }

    fn generate(&self) -> (Vec<Account>, Vec<Order>) {
        let mut rng = StdRng::seed_from_u64(self.rng_seed);
        let mut accounts = Vec::with_capacity(COMPANIES.len());
        let mut orders = Vec::new();

        // Companies at even positions are customers, the rest are leads.
        for (index, company) in COMPANIES.iter().enumerate() {
            let is_lead = index % 2 == 1;
            let first_name = pick(&mut rng, &FIRST_NAMES);
            let last_name = pick(&mut rng, &LAST_NAMES);
            let account = Account {
                id: random_id(&mut rng),
                company: company.to_string(),
                email: format!(
                    "{}.{}@{}.example",
                    first_name.to_lowercase(),
                    last_name.to_lowercase(),
                    company.to_lowercase().replace([' ', '\''], "")
                ),
                first_name: first_name.to_string(),
                last_name: last_name.to_string(),
                job_title: if is_lead { "Buyer" } else { "Purchasing Manager" }.to_string(),
                phone: format!("555-01{:02}", rng.gen_range(0..100)),
                city: pick(&mut rng, &CITIES).to_string(),
                industry: pick(&mut rng, &INDUSTRIES).to_string(),
                is_lead,
                opportunity_size: if is_lead {
                    f64::from(rng.gen_range(10..=90u32)) * 1_000.0
                } else {
                    0.0
                },
            };

            if !is_lead {
                for _ in 0..rng.gen_range(3..=6) {
                    let days_back = rng.gen_range(0..ORDER_WINDOW_DAYS);
                    let start_date = self.reference_date - TimeDelta::days(days_back);
                    let amount = f64::from(rng.gen_range(5..=80u32)) * 125.0;
                    let mut order = Order::new(random_id(&mut rng), &account.id, amount, start_date);
                    order.item = pick(&mut rng, &ITEMS).to_string();
                    orders.push(order);
                }
            }
            accounts.push(account);
        }

        (accounts, orders)
    }
}

fn pick<'a>(rng: &mut StdRng, values: &[&'a str]) -> &'a str {
    values.choose(rng).copied().unwrap_or_default()
}

fn random_id(rng: &mut StdRng) -> String {
    Builder::from_random_bytes(rng.r#gen()).into_uuid().to_string()
}

#[async_trait::async_trait]
impl CustomerDataClient for DemoDataClient {
    async fn seed_data(&self) -> Result<(), DataClientError> {
        let mut store = self.store.lock().await;
        if store.seeded {
            debug!("Demo data already seeded, skipping");
            return Ok(());
        }
        let (accounts, orders) = self.generate();
        info!(
            "Seeded demo data: {} accounts, {} orders",
            accounts.len(),
            orders.len()
        );
        store.accounts = accounts;
        store.orders = orders;
        store.seeded = true;
        Ok(())
    }

    async fn get_all_account_orders(&self) -> Result<Vec<Order>, DataClientError> {
        Ok(self.store.lock().await.orders.clone())
    }

    async fn get_accounts(&self, leads_only: bool) -> Result<Vec<Account>, DataClientError> {
        let store = self.store.lock().await;
        Ok(store
            .accounts
            .iter()
            .filter(|account| !leads_only || account.is_lead)
            .cloned()
            .collect())
    }

    async fn save_account(&self, mut account: Account) -> Result<Account, DataClientError> {
        if account.id.is_empty() {
            account.id = Uuid::new_v4().to_string();
        }
        let mut store = self.store.lock().await;
        match store
            .accounts
            .iter()
            .position(|existing| existing.same_identity(&account))
        {
            Some(index) => store.accounts[index] = account.clone(),
            None => store.accounts.push(account.clone()),
        }
        Ok(account)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
    }

    #[tokio::test]
    async fn test_store_is_empty_until_seeded() {
        let client = DemoDataClient::with_reference_date(7, reference_date());
        assert!(client.get_accounts(false).await.unwrap().is_empty());
        assert!(client.get_all_account_orders().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_seed_data_is_idempotent() {
        let client = DemoDataClient::with_reference_date(7, reference_date());
        client.seed_data().await.unwrap();
        let accounts = client.get_accounts(false).await.unwrap();
        let orders = client.get_all_account_orders().await.unwrap();

        client.seed_data().await.unwrap();
        assert_eq!(client.get_accounts(false).await.unwrap(), accounts);
        assert_eq!(client.get_all_account_orders().await.unwrap(), orders);
        assert_eq!(accounts.len(), COMPANIES.len());
    }

    #[tokio::test]
    async fn test_same_seed_generates_same_data() {
        let first = DemoDataClient::with_reference_date(11, reference_date());
        let second = DemoDataClient::with_reference_date(11, reference_date());
        first.seed_data().await.unwrap();
        second.seed_data().await.unwrap();

        assert_eq!(
            first.get_all_account_orders().await.unwrap(),
            second.get_all_account_orders().await.unwrap()
        );
    }

    #[tokio::test]
    async fn test_orders_fall_inside_window_and_belong_to_customers() {
        let client = DemoDataClient::with_reference_date(3, reference_date());
        client.seed_data().await.unwrap();
        let customers: Vec<String> = client
            .get_accounts(false)
            .await
            .unwrap()
            .into_iter()
            .filter(|a| !a.is_lead)
            .map(|a| a.id)
            .collect();

        let orders = client.get_all_account_orders().await.unwrap();
        assert!(!orders.is_empty());
        let earliest = reference_date() - TimeDelta::days(ORDER_WINDOW_DAYS);
        for order in orders {
            assert!(order.start_date <= reference_date());
            assert!(order.start_date > earliest);
            assert!(order.amount > 0.0);
            assert!(customers.contains(&order.account_id));
        }
    }

    #[tokio::test]
    async fn test_leads_only_filters_customers() {
        let client = DemoDataClient::with_reference_date(5, reference_date());
        client.seed_data().await.unwrap();

        let leads = client.get_accounts(true).await.unwrap();
        assert_eq!(leads.len(), COMPANIES.len() / 2);
        assert!(leads.iter().all(|a| a.is_lead));
    }

    #[tokio::test]
    async fn test_save_account_assigns_id_and_upserts() {
        let client = DemoDataClient::with_reference_date(5, reference_date());
        client.seed_data().await.unwrap();

        let saved = client
            .save_account(Account::lead("", "Tailspin Toys"))
            .await
            .unwrap();
        assert!(!saved.id.is_empty());

        let mut renamed = saved.clone();
        renamed.company = "Tailspin Toys Ltd".to_string();
        client.save_account(renamed).await.unwrap();

        let matching: Vec<Account> = client
            .get_accounts(true)
            .await
            .unwrap()
            .into_iter()
            .filter(|a| a.id == saved.id)
            .collect();
        assert_eq!(matching.len(), 1);
        assert_eq!(matching[0].company, "Tailspin Toys Ltd");
    }
}
