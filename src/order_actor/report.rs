use chrono::{DateTime, Duration, NaiveDate, Utc};

use crate::domain::{Order, OrderStatus};

/// Revenue and order count for one calendar day.
#[derive(Debug, Clone, PartialEq)]
pub struct DailySales {
    pub date: NaiveDate,
    pub revenue: f64,
    pub orders: u32,
}

/// The back-office financial view over a trailing window. Cancelled orders
/// never count toward revenue.
#[derive(Debug, Clone)]
pub struct SalesReport {
    pub window_days: i64,
    pub total_revenue: f64,
    pub order_count: u32,
    pub daily: Vec<DailySales>,
}

pub fn build_sales_report(orders: &[Order], window_days: i64, now: DateTime<Utc>) -> SalesReport {
    let cutoff = now - Duration::days(window_days);

    let mut daily: Vec<DailySales> = Vec::new();
    let mut total_revenue = 0.0;
    let mut order_count = 0;

    for order in orders {
        if order.status == OrderStatus::Cancelled || order.created_at < cutoff {
            continue;
        }
        total_revenue += order.total;
        order_count += 1;

        let date = order.created_at.date_naive();
        match daily.iter_mut().find(|d| d.date == date) {
            Some(day) => {
                day.revenue += order.total;
                day.orders += 1;
            }
            None => daily.push(DailySales {
                date,
                revenue: order.total,
                orders: 1,
            }),
        }
    }

    daily.sort_by_key(|d| d.date);

    SalesReport {
        window_days,
        total_revenue,
        order_count,
        daily,
    }
}
