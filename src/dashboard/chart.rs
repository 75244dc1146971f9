//! Chart aggregation for the sales dashboard.

use crate::consts::dashboard_consts::CHART_LABEL_FORMAT;
use crate::models::{ChartDataPoint, Order};
use chrono::{Datelike, NaiveDate, TimeDelta};
use std::collections::BTreeMap;

/// Summed order amounts for one bucket of the sales chart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SalesDataPoint {
    pub date_start: NaiveDate,
    pub amount: f64,
}

/// Groups orders into chart buckets.
#[derive(Debug, Clone)]
pub struct ChartHelper {
    sales_data: Vec<SalesDataPoint>,
}

impl ChartHelper {
    /// Bucket `orders` by start date, or by the Sunday starting their week
    /// when `weekly` is set, summing the amounts in each bucket.
    pub fn new(orders: &[Order], weekly: bool) -> Self {
        let mut buckets: BTreeMap<NaiveDate, f64> = BTreeMap::new();
        for order in orders {
            let key = if weekly {
                week_start(order.start_date)
            } else {
                order.start_date
            };
            *buckets.entry(key).or_insert(0.0) += order.amount;
        }

        let sales_data = buckets
            .into_iter()
            .map(|(date_start, amount)| SalesDataPoint { date_start, amount })
            .collect();
        Self { sales_data }
    }

    /// Buckets in ascending date order.
    pub fn sales_data(&self) -> &[SalesDataPoint] {
        &self.sales_data
    }

    pub fn chart_points(&self) -> Vec<ChartDataPoint> {
        self.sales_data()
            .iter()
            .map(|point| {
                ChartDataPoint::new(
                    point.date_start,
                    point.date_start.format(CHART_LABEL_FORMAT).to_string(),
                    point.amount,
                )
            })
            .collect()
    }
}

/// The Sunday on or before `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - TimeDelta::days(i64::from(date.weekday().num_days_from_sunday()))
}

/// Arithmetic mean of the point values; `None` when there are no points.
pub fn sales_average(points: &[ChartDataPoint]) -> Option<f64> {
    if points.is_empty() {
        return None;
    }
    let total: f64 = points.iter().map(|point| point.value).sum();
    Some(total / points.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn order(id: &str, amount: f64, start_date: NaiveDate) -> Order {
        Order::new(id, "acct", amount, start_date)
    }

    #[test]
    fn test_points_sorted_by_date_with_labels() {
        let orders = vec![
            order("a", 100.0, date(2024, 1, 2)),
            order("b", 50.0, date(2024, 1, 1)),
        ];
        let points = ChartHelper::new(&orders, false).chart_points();

        assert_eq!(
            points,
            vec![
                ChartDataPoint::new(date(2024, 1, 1), "1 Jan", 50.0),
                ChartDataPoint::new(date(2024, 1, 2), "2 Jan", 100.0),
            ]
        );
        assert_eq!(sales_average(&points), Some(75.0));
    }

    #[test]
    fn test_one_point_per_distinct_date() {
        let orders = vec![
            order("a", 10.0, date(2024, 2, 10)),
            order("b", 15.0, date(2024, 2, 10)),
            order("c", 30.0, date(2024, 2, 9)),
        ];
        let helper = ChartHelper::new(&orders, false);

        assert_eq!(
            helper.sales_data(),
            &[
                SalesDataPoint {
                    date_start: date(2024, 2, 9),
                    amount: 30.0
                },
                SalesDataPoint {
                    date_start: date(2024, 2, 10),
                    amount: 25.0
                },
            ]
        );
    }

    #[test]
    fn test_weekly_buckets_start_on_sunday() {
        // 2024-01-07 is a Sunday.
        assert_eq!(week_start(date(2024, 1, 7)), date(2024, 1, 7));
        assert_eq!(week_start(date(2024, 1, 10)), date(2024, 1, 7));
        assert_eq!(week_start(date(2024, 1, 6)), date(2023, 12, 31));

        let orders = vec![
            order("a", 10.0, date(2024, 1, 8)),
            order("b", 20.0, date(2024, 1, 13)),
            order("c", 5.0, date(2024, 1, 14)),
        ];
        let points = ChartHelper::new(&orders, true).chart_points();
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].value, 30.0);
        assert_eq!(points[1].label, "14 Jan");
    }

    #[test]
    fn test_empty_orders() {
        let points = ChartHelper::new(&[], false).chart_points();
        assert!(points.is_empty());
        assert_eq!(sales_average(&points), None);
    }
}
