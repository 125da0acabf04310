//! Terminal front-end for the wholesale query service.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use serde_json::Value;
use wholesale_service::client::forms::{ItemForm, OrderForm};
use wholesale_service::client::select::OptionList;
use wholesale_service::client::{render_rows, rows_from_value, ApiClient, StatusLine, DEFAULT_BASE_URL};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Base URL of the query service API
    #[arg(long, env = "WHOLESALE_API_URL", default_value = DEFAULT_BASE_URL, global = true)]
    base_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List base tables
    Tables,
    /// List views
    Views,
    /// Show the first 100 rows of a table or view
    Data { object_name: String },
    /// Show a customer's order history
    History { customer_id: String },
    /// Show products below the stock threshold
    LowStock {
        #[arg(long)]
        warehouse_id: Option<String>,
        #[arg(long)]
        threshold: Option<String>,
    },
    /// Create an order
    CreateOrder {
        #[arg(long)]
        customer_id: String,
        #[arg(long)]
        employee_id: String,
        /// YYYY-MM-DD
        #[arg(long, default_value = "")]
        delivery_date: String,
        #[arg(long, default_value = "")]
        shipping_address: String,
    },
    /// Add a product to an order, or raise its quantity
    AddItem {
        #[arg(long)]
        order_id: String,
        #[arg(long)]
        product_id: String,
        #[arg(long)]
        warehouse_id: String,
        #[arg(long, default_value = "1")]
        quantity: String,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("warn"));
    let args = Args::parse();
    let client = ApiClient::new(args.base_url);
    let mut status = StatusLine::default();

    match args.command {
        Command::Tables => list(&client, "tables", "-- Tables --", &mut status).await,
        Command::Views => list(&client, "views", "-- Views --", &mut status).await,
        Command::Data { object_name } => {
            show(&client, &format!("data/{object_name}"), &[], &mut status).await
        }
        Command::History { customer_id } => {
            show(&client, &format!("customer/{customer_id}/orders"), &[], &mut status).await
        }
        Command::LowStock {
            warehouse_id,
            threshold,
        } => {
            let mut query = Vec::new();
            if let Some(w) = warehouse_id.as_deref().filter(|w| !w.is_empty()) {
                query.push(("warehouseId", w));
            }
            if let Some(t) = threshold.as_deref().filter(|t| !t.is_empty()) {
                query.push(("threshold", t));
            }
            show(&client, "products/lowstock", &query, &mut status).await
        }
        Command::CreateOrder {
            customer_id,
            employee_id,
            delivery_date,
            shipping_address,
        } => match OrderForm::from_inputs(&customer_id, &employee_id, &delivery_date, &shipping_address) {
            Ok(form) => {
                if let Ok(body) = client.post_data("orders", &form, &mut status).await {
                    if let Some(order_id) = body.get("orderId").filter(|id| !id.is_null()) {
                        println!("Current order: {}", display(order_id));
                    }
                }
            }
            Err(e) => status.error(e.to_string()),
        },
        Command::AddItem {
            order_id,
            product_id,
            warehouse_id,
            quantity,
        } => match ItemForm::from_inputs(&order_id, &product_id, &warehouse_id, &quantity) {
            Ok(form) => {
                // The outcome is already on the status line.
                let _ = client.post_data(&form.endpoint(), &form, &mut status).await;
            }
            Err(e) => status.error(e.to_string()),
        },
    }

    if !status.text.is_empty() {
        if status.is_error() {
            eprintln!("{}", status.text);
        } else {
            println!("{}", status.text);
        }
    }
    if status.is_error() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

async fn list(client: &ApiClient, endpoint: &str, placeholder: &str, status: &mut StatusLine) {
    let mut options = OptionList::new(placeholder);
    options.populate(client, endpoint, status).await;
    println!("{}", options.label());
    for option in options.options() {
        println!("  {option}");
    }
}

async fn show(client: &ApiClient, endpoint: &str, query: &[(&str, &str)], status: &mut StatusLine) {
    let Some(data) = client.fetch_data(endpoint, query, status).await else {
        return;
    };
    println!("{}", render_rows(&rows_from_value(Some(data))).to_text());
}

fn display(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
