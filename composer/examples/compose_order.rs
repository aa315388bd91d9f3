//! Demo: build and submit an order against an in-memory gateway
//!
//! ```sh
//! cargo run --example compose_order
//! ```

use async_trait::async_trait;
use composer::money::format_money;
use composer::{ComposerConfig, OrderComposer, OrderGateway};
use shared::error::SubmissionError;
use shared::order::{
    Addition, AdjustOrderRequest, CreateOrderRequest, DiscountKind, LineInput, Operator,
    OrderDetail,
};

struct StdoutGateway;

#[async_trait]
impl OrderGateway for StdoutGateway {
    async fn create_order(&self, request: &CreateOrderRequest) -> Result<String, SubmissionError> {
        println!("--- create-order payload ---");
        println!("{}", serde_json::to_string_pretty(request).unwrap());
        Ok("order-demo-1".to_string())
    }

    async fn fetch_order(&self, _order_id: &str) -> Result<OrderDetail, SubmissionError> {
        Err(SubmissionError::Rejected {
            code: "ORDER_NOT_FOUND".into(),
            message: "demo gateway has no persisted orders".into(),
        })
    }

    async fn adjust_order(&self, _request: &AdjustOrderRequest) -> Result<(), SubmissionError> {
        Ok(())
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    composer::utils::init_logger_with_file(Some("debug"), None);

    let config = ComposerConfig::from_env();
    let preferences = config.preferences.clone();
    let mut composer = OrderComposer::new(
        Operator {
            id: "op-1".into(),
            name: "Demo operator".into(),
        },
        config,
    );

    composer.add_line(LineInput {
        product_id: "p-burger".into(),
        name: "Burger".into(),
        unit_price: 10.0,
        custom_price: None,
        quantity: 3,
        additions: vec![Addition::new("a-cheese", "Extra cheese", 2.0)],
        note: None,
    })?;
    composer.set_order_discount(DiscountKind::Percentage, 10.0)?;
    composer.set_table("t-12");

    let totals = composer.totals();
    println!(
        "{} line(s), subtotal {}, total {}",
        totals.line_count,
        format_money(totals.subtotal, &preferences),
        format_money(totals.total, &preferences),
    );

    let order_id = composer.submit(&StdoutGateway).await?;
    println!("created {order_id}");
    Ok(())
}
