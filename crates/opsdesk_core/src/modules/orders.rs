//! E-commerce orders module.
//!
//! # Invariants
//! - New orders start `Pending` / `Unpaid` and get an `ORD-####` id.
//! - Revenue only counts orders whose payment status is `Paid`.

use crate::metrics::{average, count_where, distinct_count, sum_where};
use crate::model::id::IdStrategy;
use crate::model::module::{require_non_negative, require_text, RecordModule, ValidationError};
use crate::modules::now_epoch_ms;
use serde::{Deserialize, Serialize};

/// Fulfilment state of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderStatus {
    Pending,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    /// Orders that still need warehouse work.
    pub fn is_open(self) -> bool {
        matches!(self, Self::Pending | Self::Processing)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentStatus {
    Unpaid,
    Paid,
    Refunded,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    pub customer: String,
    pub email: String,
    pub product: String,
    pub quantity: u32,
    /// Order total in rupees.
    pub amount: f64,
    pub status: OrderStatus,
    pub payment_status: PaymentStatus,
    /// Unix epoch milliseconds.
    pub placed_at: i64,
}

/// Create-order form input.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderDraft {
    pub customer: String,
    pub email: String,
    pub product: String,
    pub quantity: u32,
    pub amount: f64,
}

pub struct Orders;

impl RecordModule for Orders {
    type Record = Order;
    type Draft = OrderDraft;

    const NAME: &'static str = "order";
    const STORE_KEY: &'static str = "ecommerce.orders";
    const ID_STRATEGY: IdStrategy = IdStrategy::Sequential {
        prefix: "ORD",
        width: 4,
    };

    fn record_id(record: &Order) -> &str {
        &record.id
    }

    fn seed() -> Vec<Order> {
        vec![
            seed_order(
                "ORD-9821",
                "Rahul Sharma",
                "Wireless Earbuds",
                2,
                4_998.0,
                OrderStatus::Delivered,
                PaymentStatus::Paid,
            ),
            seed_order(
                "ORD-9822",
                "Anita Desai",
                "Smart Watch",
                1,
                12_499.0,
                OrderStatus::Processing,
                PaymentStatus::Paid,
            ),
            seed_order(
                "ORD-9823",
                "Vikram Singh",
                "Laptop Stand",
                3,
                2_697.0,
                OrderStatus::Pending,
                PaymentStatus::Unpaid,
            ),
            seed_order(
                "ORD-9824",
                "Neha Sharma",
                "Bluetooth Speaker",
                1,
                3_499.0,
                OrderStatus::Shipped,
                PaymentStatus::Paid,
            ),
            seed_order(
                "ORD-9825",
                "Arjun Mehta",
                "USB-C Hub",
                2,
                3_198.0,
                OrderStatus::Cancelled,
                PaymentStatus::Refunded,
            ),
        ]
    }

    fn search_fields(record: &Order) -> Vec<&str> {
        vec![&record.id, &record.customer, &record.product]
    }

    fn validate_draft(draft: &OrderDraft) -> Result<(), ValidationError> {
        require_text("customer", &draft.customer)?;
        require_text("email", &draft.email)?;
        require_text("product", &draft.product)?;
        if draft.quantity == 0 {
            return Err(ValidationError::InvalidValue {
                field: "quantity",
                message: "must be at least 1".to_string(),
            });
        }
        require_non_negative("amount", draft.amount)
    }

    fn validate_record(record: &Order) -> Result<(), ValidationError> {
        require_text("customer", &record.customer)?;
        require_text("product", &record.product)?;
        require_non_negative("amount", record.amount)
    }

    fn build_record(id: String, draft: OrderDraft) -> Order {
        Order {
            id,
            customer: draft.customer.trim().to_string(),
            email: draft.email.trim().to_string(),
            product: draft.product.trim().to_string(),
            quantity: draft.quantity,
            amount: draft.amount,
            status: OrderStatus::Pending,
            payment_status: PaymentStatus::Unpaid,
            placed_at: now_epoch_ms(),
        }
    }
}

fn seed_order(
    id: &str,
    customer: &str,
    product: &str,
    quantity: u32,
    amount: f64,
    status: OrderStatus,
    payment_status: PaymentStatus,
) -> Order {
    let email = format!(
        "{}@example.in",
        customer.to_ascii_lowercase().replace(' ', ".")
    );
    Order {
        id: id.to_string(),
        customer: customer.to_string(),
        email,
        product: product.to_string(),
        quantity,
        amount,
        status,
        payment_status,
        // 2024-03-01T00:00:00Z
        placed_at: 1_709_251_200_000,
    }
}

/// Summary cards shown above the orders table.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderSummary {
    pub total_orders: usize,
    pub paid_revenue: f64,
    pub open_orders: usize,
    pub unique_customers: usize,
    pub average_order_value: f64,
}

pub fn summarize(orders: &[Order]) -> OrderSummary {
    OrderSummary {
        total_orders: orders.len(),
        paid_revenue: sum_where(
            orders,
            |order| order.amount,
            |order| order.payment_status == PaymentStatus::Paid,
        ),
        open_orders: count_where(orders, |order| order.status.is_open()),
        unique_customers: distinct_count(orders, |order| order.customer.as_str()),
        average_order_value: average(orders, |order| order.amount),
    }
}
