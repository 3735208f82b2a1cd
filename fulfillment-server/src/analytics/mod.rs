//! Sales aggregation
//!
//! Read-only batch analytics over the persisted order set. Every query is
//! recomputed in full on each request; nothing here is cached or persisted.
//! All four queries tolerate an empty order set and return zero/empty rather
//! than an error.

use std::collections::{BTreeMap, HashMap};

use chrono::Datelike;
use chrono_tz::Tz;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::db::models::Order;
use crate::utils::money::{to_decimal, to_f64};

/// Month-name lookup, indexed by calendar month number (1-12)
///
/// Index 0 is an unused sentinel so that `MONTH_LABELS[month]` works without
/// an off-by-one adjustment.
pub const MONTH_LABELS: [&str; 13] = [
    "", "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Label for a 1-based calendar month; empty string for out-of-range input
pub fn month_label(month: u32) -> &'static str {
    MONTH_LABELS.get(month as usize).copied().unwrap_or("")
}

/// Order count and total revenue
#[derive(Debug, Clone, Serialize)]
pub struct SalesSummary {
    pub total_orders: usize,
    pub total_revenue: f64,
}

/// One row of the per-customer revenue ranking
#[derive(Debug, Clone, Serialize)]
pub struct CustomerRevenue {
    pub customer_name: String,
    pub total: f64,
}

/// One row of the per-month revenue report
#[derive(Debug, Clone, Serialize)]
pub struct MonthlyRevenue {
    pub month_label: String,
    pub total: f64,
}

/// One row of the per-product revenue report
#[derive(Debug, Clone, Serialize)]
pub struct ProductRevenue {
    pub product_name: String,
    pub revenue: f64,
    pub percent_of_total: f64,
}

/// Order count and summed grand totals
pub fn summarize(orders: &[Order]) -> SalesSummary {
    let total: Decimal = orders.iter().map(|o| to_decimal(o.total_price)).sum();
    SalesSummary {
        total_orders: orders.len(),
        total_revenue: to_f64(total),
    }
}

/// Revenue grouped by owning customer, descending by total
///
/// `names` maps customer record ids ("user:key") to display names; a missing
/// entry falls back to the raw id. Ties keep first-seen order (stable sort).
pub fn revenue_by_customer(
    orders: &[Order],
    names: &HashMap<String, String>,
) -> Vec<CustomerRevenue> {
    let mut totals: Vec<(String, Decimal)> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for order in orders {
        let key = order.user.to_string();
        match index.get(&key) {
            Some(&i) => totals[i].1 += to_decimal(order.total_price),
            None => {
                index.insert(key.clone(), totals.len());
                totals.push((key, to_decimal(order.total_price)));
            }
        }
    }

    totals.sort_by(|a, b| b.1.cmp(&a.1));
    totals
        .into_iter()
        .map(|(key, total)| CustomerRevenue {
            customer_name: names.get(&key).cloned().unwrap_or(key),
            total: to_f64(total),
        })
        .collect()
}

/// Revenue grouped by (year, month) of the status-change timestamp
///
/// Orders never processed fall back to their creation timestamp. Groups are
/// sorted ascending by (year, month); months with no orders are omitted, not
/// zero-filled.
pub fn revenue_by_month(orders: &[Order], tz: Tz) -> Vec<MonthlyRevenue> {
    let mut groups: BTreeMap<(i32, u32), Decimal> = BTreeMap::new();

    for order in orders {
        let millis = order.processed_at.unwrap_or(order.created_at);
        let Some(dt) = chrono::DateTime::from_timestamp_millis(millis) else {
            continue;
        };
        let local = dt.with_timezone(&tz);
        *groups
            .entry((local.year(), local.month()))
            .or_insert(Decimal::ZERO) += to_decimal(order.total_price);
    }

    groups
        .into_iter()
        .map(|((_year, month), total)| MonthlyRevenue {
            month_label: month_label(month).to_string(),
            total: to_f64(total),
        })
        .collect()
}

/// Revenue and share per product display name, descending by revenue
///
/// Revenue flattens every line item: Σ(unit price × quantity) per name.
/// The percentage denominator is the sum of the orders' stored items-subtotal
/// fields — a separately-derived total that is not guaranteed to match the
/// flattened line-item sum. Both sources are kept as-is rather than
/// reconciled here.
pub fn revenue_by_product(orders: &[Order]) -> Vec<ProductRevenue> {
    let mut totals: Vec<(String, Decimal)> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for order in orders {
        for item in &order.items {
            let revenue = to_decimal(item.price) * Decimal::from(item.quantity);
            match index.get(&item.name) {
                Some(&i) => totals[i].1 += revenue,
                None => {
                    index.insert(item.name.clone(), totals.len());
                    totals.push((item.name.clone(), revenue));
                }
            }
        }
    }

    let denominator: Decimal = orders.iter().map(|o| to_decimal(o.items_price)).sum();

    totals.sort_by(|a, b| b.1.cmp(&a.1));
    totals
        .into_iter()
        .map(|(product_name, revenue)| ProductRevenue {
            product_name,
            revenue: to_f64(revenue),
            percent_of_total: if denominator > Decimal::ZERO {
                to_f64(revenue / denominator * Decimal::ONE_HUNDRED)
            } else {
                0.0
            },
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::models::{LineItem, NotificationState, OrderStatus, ShippingAddress};
    use surrealdb::RecordId;

    fn order(user_key: &str, total_price: f64) -> Order {
        Order {
            id: Some(RecordId::from_table_key("order", "o")),
            user: RecordId::from_table_key("user", user_key),
            items: Vec::new(),
            shipping: ShippingAddress {
                address: String::new(),
                city: String::new(),
                postal_code: String::new(),
                country: String::new(),
                phone: String::new(),
            },
            items_price: total_price,
            tax_price: 0.0,
            shipping_price: 0.0,
            total_price,
            is_paid: true,
            status: OrderStatus::Processing,
            created_at: 0,
            processed_at: None,
            notification: NotificationState::Pending,
            notification_error: None,
        }
    }

    fn item(name: &str, price: f64, quantity: i32) -> LineItem {
        LineItem {
            product: RecordId::from_table_key("product", "p"),
            name: name.to_string(),
            price,
            quantity,
            image: String::new(),
        }
    }

    // 2024-01-15 and 2024-03-10, both mid-day UTC
    const JAN_2024: i64 = 1_705_312_800_000;
    const MAR_2024: i64 = 1_710_064_800_000;

    #[test]
    fn test_month_label_table_has_leading_sentinel() {
        assert_eq!(MONTH_LABELS[0], "");
        assert_eq!(month_label(1), "Jan");
        assert_eq!(month_label(12), "Dec");
        assert_eq!(month_label(0), "");
        assert_eq!(month_label(13), "");
    }

    #[test]
    fn test_empty_order_set_yields_zeroes() {
        let summary = summarize(&[]);
        assert_eq!(summary.total_orders, 0);
        assert_eq!(summary.total_revenue, 0.0);

        assert!(revenue_by_customer(&[], &HashMap::new()).is_empty());
        assert!(revenue_by_month(&[], chrono_tz::UTC).is_empty());
        assert!(revenue_by_product(&[]).is_empty());
    }

    #[test]
    fn test_summarize() {
        let orders = vec![order("a", 100.0), order("b", 50.5)];
        let summary = summarize(&orders);
        assert_eq!(summary.total_orders, 2);
        assert_eq!(summary.total_revenue, 150.5);
    }

    #[test]
    fn test_revenue_by_customer_descending() {
        let orders = vec![order("a", 100.0), order("b", 80.0), order("a", 50.0)];
        let names = HashMap::from([
            ("user:a".to_string(), "Alice".to_string()),
            ("user:b".to_string(), "Bob".to_string()),
        ]);

        let report = revenue_by_customer(&orders, &names);

        assert_eq!(report.len(), 2);
        assert_eq!(report[0].customer_name, "Alice");
        assert_eq!(report[0].total, 150.0);
        assert_eq!(report[1].customer_name, "Bob");
        assert_eq!(report[1].total, 80.0);
    }

    #[test]
    fn test_revenue_by_customer_missing_name_falls_back_to_id() {
        let orders = vec![order("ghost", 10.0)];
        let report = revenue_by_customer(&orders, &HashMap::new());
        assert_eq!(report[0].customer_name, "user:ghost");
    }

    #[test]
    fn test_revenue_by_month_omits_empty_months() {
        let mut jan_a = order("a", 100.0);
        jan_a.processed_at = Some(JAN_2024);
        let mut jan_b = order("b", 25.0);
        jan_b.processed_at = Some(JAN_2024);
        let mut mar = order("a", 40.0);
        mar.processed_at = Some(MAR_2024);

        let report = revenue_by_month(&[jan_a, jan_b, mar], chrono_tz::UTC);

        assert_eq!(report.len(), 2);
        assert_eq!(report[0].month_label, "Jan");
        assert_eq!(report[0].total, 125.0);
        assert_eq!(report[1].month_label, "Mar");
        assert_eq!(report[1].total, 40.0);
    }

    #[test]
    fn test_revenue_by_month_falls_back_to_creation_time() {
        let mut unprocessed = order("a", 60.0);
        unprocessed.created_at = MAR_2024;
        unprocessed.processed_at = None;

        let report = revenue_by_month(&[unprocessed], chrono_tz::UTC);

        assert_eq!(report.len(), 1);
        assert_eq!(report[0].month_label, "Mar");
    }

    #[test]
    fn test_revenue_by_product_groups_across_orders() {
        let mut o1 = order("a", 45.0);
        o1.items = vec![item("Bottle", 10.0, 2), item("Strap", 5.0, 5)];
        let mut o2 = order("b", 30.0);
        o2.items = vec![item("Bottle", 10.0, 3)];

        let report = revenue_by_product(&[o1, o2]);

        assert_eq!(report.len(), 2);
        assert_eq!(report[0].product_name, "Bottle");
        assert_eq!(report[0].revenue, 50.0);
        assert_eq!(report[1].product_name, "Strap");
        assert_eq!(report[1].revenue, 25.0);
    }

    #[test]
    fn test_product_share_uses_stored_subtotals_as_denominator() {
        // Flattened line revenue is 200, but the stored items subtotal says
        // 100; the share is computed against the stored field.
        let mut o = order("a", 100.0);
        o.items_price = 100.0;
        o.items = vec![item("Bottle", 100.0, 2)];

        let report = revenue_by_product(&[o]);

        assert_eq!(report[0].revenue, 200.0);
        assert_eq!(report[0].percent_of_total, 200.0);
    }

    #[test]
    fn test_product_share_zero_denominator() {
        let mut o = order("a", 0.0);
        o.items_price = 0.0;
        o.items = vec![item("Freebie", 0.0, 1)];

        let report = revenue_by_product(&[o]);
        assert_eq!(report[0].percent_of_total, 0.0);
    }
}
