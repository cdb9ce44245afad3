use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use scentops_client::{AdminClient, PublicClient};
use scentops_core::currency::format_vnd;
use scentops_core::{load_app_config, AppConfig};
use scentops_export::{DONATIONS_FILE_NAME, ORDERS_FILE_NAME};

#[derive(Debug, Parser)]
#[command(name = "scentops")]
#[command(about = "Admin tooling for the scent shop backend")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Export a table to an xlsx workbook.
    Export {
        #[command(subcommand)]
        table: ExportTable,
    },
    /// List products with their variant counts.
    Products,
    /// List categories via the public endpoint (no login needed).
    Categories,
    /// List orders with payment status and totals.
    Orders,
}

#[derive(Debug, Subcommand)]
enum ExportTable {
    Orders {
        /// Output path, defaults to orders.xlsx in the working directory.
        #[arg(long)]
        out: Option<PathBuf>,
    },
    Donations {
        /// Output path, defaults to donations.xlsx in the working directory.
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse first so --help and usage errors work without any configuration.
    let cli = Cli::parse();

    let config = load_app_config().context("failed to load configuration")?;

    let filter = EnvFilter::try_new(&config.log_level)
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match cli.command {
        Commands::Export { table } => match table {
            ExportTable::Orders { out } => {
                let client = logged_in_client(&config).await?;
                let orders = client.list_orders().await?;
                let path = out.unwrap_or_else(|| PathBuf::from(ORDERS_FILE_NAME));
                scentops_export::save_orders(&orders, &path)?;
                println!("wrote {} orders to {}", orders.len(), path.display());
            }
            ExportTable::Donations { out } => {
                let client = logged_in_client(&config).await?;
                let donations = client.list_donations().await?;
                let path = out.unwrap_or_else(|| PathBuf::from(DONATIONS_FILE_NAME));
                scentops_export::save_donations(&donations, &path)?;
                println!("wrote {} donations to {}", donations.len(), path.display());
            }
        },
        Commands::Products => {
            let client = logged_in_client(&config).await?;
            for product in client.list_products().await? {
                println!(
                    "{}\t{}\t{} variants\t{}",
                    product.id,
                    product.name.en,
                    product.variants.len(),
                    product.status,
                );
            }
        }
        Commands::Categories => {
            let client = PublicClient::new(&config.api_base_url, config.request_timeout_secs)?;
            for category in client.categories().await? {
                println!("{}\t{}\t{}", category.id, category.name.en, category.status);
            }
        }
        Commands::Orders => {
            let client = logged_in_client(&config).await?;
            for order in client.list_orders().await? {
                println!(
                    "#{}\t{}\t{}\t{}",
                    order.order_code,
                    order.status.payment_label(),
                    order.customer_name(),
                    format_vnd(order.amount),
                );
            }
        }
    }

    Ok(())
}

/// Builds an admin client and logs in with the operator credentials from the
/// environment.
async fn logged_in_client(config: &AppConfig) -> anyhow::Result<AdminClient> {
    let email = std::env::var("SCENTOPS_ADMIN_EMAIL")
        .context("SCENTOPS_ADMIN_EMAIL must be set for admin commands")?;
    let password = std::env::var("SCENTOPS_ADMIN_PASSWORD")
        .context("SCENTOPS_ADMIN_PASSWORD must be set for admin commands")?;

    let client = AdminClient::new(config)?;
    client
        .login(&email, &password)
        .await
        .context("login failed")?;
    tracing::debug!(%email, "authenticated against the admin API");
    Ok(client)
}
