//! CLI smoke entry point.
//!
//! # Responsibility
//! - Mount every module against one snapshot database and print its summary.
//! - Keep output deterministic for quick local sanity checks.
//!
//! Usage: `opsdesk_cli [DB_PATH] [--log-dir ABS_DIR] [--reset]`.
//! Without `DB_PATH` an in-memory database is used.

use log::info;
use opsdesk_core::db::{open_db, open_db_in_memory};
use opsdesk_core::modules::{campaigns, drivers, inventory, orders, vendors};
use opsdesk_core::{
    default_log_level, init_logging, KeyValueStorage, RecordModule, RecordService,
    SqliteKeyValueStorage,
};
use std::error::Error;
use std::path::PathBuf;

#[derive(Debug, Default)]
struct Args {
    db_path: Option<PathBuf>,
    log_dir: Option<PathBuf>,
    reset: bool,
}

fn parse_args() -> Result<Args, String> {
    let mut args = Args::default();
    let mut raw = std::env::args().skip(1);
    while let Some(arg) = raw.next() {
        match arg.as_str() {
            "--log-dir" => {
                let dir = raw.next().ok_or("--log-dir needs a directory")?;
                args.log_dir = Some(PathBuf::from(dir));
            }
            "--reset" => args.reset = true,
            flag if flag.starts_with("--") => return Err(format!("unknown flag `{flag}`")),
            path => args.db_path = Some(PathBuf::from(path)),
        }
    }
    Ok(args)
}

fn mount<M: RecordModule, S: KeyValueStorage>(
    storage: S,
    reset: bool,
) -> Result<RecordService<M, S>, Box<dyn Error>> {
    let mut service = RecordService::<M, S>::load(storage)?;
    if reset {
        service.reset_to_seed()?;
    }
    println!(
        "[{}] records={} source={}",
        M::STORE_KEY,
        service.records().len(),
        service.store().load_source().as_str()
    );
    Ok(service)
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = parse_args()?;
    if let Some(log_dir) = &args.log_dir {
        init_logging(default_log_level(), log_dir)?;
    }

    let conn = match &args.db_path {
        Some(path) => open_db(path)?,
        None => open_db_in_memory()?,
    };
    let storage = SqliteKeyValueStorage::try_new(&conn)?;
    info!(
        "event=cli_start module=cli status=ok persistent={}",
        args.db_path.is_some()
    );

    println!("opsdesk_core version={}", opsdesk_core::core_version());

    let orders = mount::<orders::Orders, _>(&storage, args.reset)?;
    let summary = orders::summarize(orders.records());
    println!(
        "  total={} paid_revenue={:.2} open={} customers={} avg_value={:.2}",
        summary.total_orders,
        summary.paid_revenue,
        summary.open_orders,
        summary.unique_customers,
        summary.average_order_value
    );

    let inventory = mount::<inventory::Inventory, _>(&storage, args.reset)?;
    let summary = inventory::summarize(inventory.records());
    println!(
        "  items={} stock_value={:.2} low={} out={} categories={}",
        summary.total_items,
        summary.total_stock_value,
        summary.low_stock,
        summary.out_of_stock,
        summary.categories
    );

    let vendors = mount::<vendors::Vendors, _>(&storage, args.reset)?;
    let summary = vendors::summarize(vendors.records());
    println!(
        "  vendors={} active={} under_review={} avg_rating={:.1} active_share={:.1}%",
        summary.total_vendors,
        summary.active,
        summary.under_review,
        summary.average_rating,
        summary.active_share
    );

    let campaigns = mount::<campaigns::Campaigns, _>(&storage, args.reset)?;
    let summary = campaigns::summarize(campaigns.records());
    println!(
        "  campaigns={} active={} spend={:.2} leads={} ctr={:.2}%",
        summary.total_campaigns,
        summary.active,
        summary.total_spend,
        summary.total_leads,
        summary.click_through_rate
    );

    let drivers = mount::<drivers::Drivers, _>(&storage, args.reset)?;
    let summary = drivers::summarize(drivers.records());
    println!(
        "  drivers={} available={} on_trip={} avg_rating={:.1} trips={}",
        summary.total_drivers,
        summary.available,
        summary.on_trip,
        summary.average_rating,
        summary.total_trips
    );

    Ok(())
}
