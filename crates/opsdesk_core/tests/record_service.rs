use opsdesk_core::modules::campaigns::{CampaignDraft, CampaignStatus, Campaigns};
use opsdesk_core::modules::drivers::{DriverStatus, Drivers};
use opsdesk_core::modules::inventory::{Inventory, StockStatus};
use opsdesk_core::modules::orders::{OrderDraft, OrderStatus, Orders, PaymentStatus};
use opsdesk_core::{
    AlwaysConfirm, DeleteOutcome, KeyValueStorage, LoadSource, MemoryStorage, MutationOutcome,
    NeverConfirm, RecordModule, RecordService, RecordStore, ServiceError, StoreError,
    ValidationError,
};
use std::cell::RefCell;
use std::collections::HashSet;

fn order_draft(customer: &str) -> OrderDraft {
    OrderDraft {
        customer: customer.to_string(),
        email: "buyer@example.in".to_string(),
        product: "Desk Lamp".to_string(),
        quantity: 1,
        amount: 1_299.0,
    }
}

#[test]
fn many_inserts_keep_ids_unique() {
    let storage = MemoryStorage::new();
    let mut orders = RecordService::<Orders, _>::load(&storage).unwrap();
    let mut campaigns = RecordService::<Campaigns, _>::load(&storage).unwrap();

    for index in 0..50 {
        orders.insert(order_draft(&format!("Customer {index}"))).unwrap();
        campaigns
            .insert(CampaignDraft {
                name: format!("Flash Sale {index}"),
                channel: "Email".to_string(),
                budget: 1_000.0,
            })
            .unwrap();
    }

    let order_ids: HashSet<_> = orders.records().iter().map(|order| &order.id).collect();
    assert_eq!(order_ids.len(), 55);
    let campaign_ids: HashSet<_> = campaigns
        .records()
        .iter()
        .map(|campaign| &campaign.id)
        .collect();
    assert_eq!(campaign_ids.len(), 53);
}

#[test]
fn deleting_newest_does_not_reuse_its_id() {
    let storage = MemoryStorage::new();
    let mut orders = RecordService::<Orders, _>::load(&storage).unwrap();

    let first = orders.insert(order_draft("Kabir Rao")).unwrap();
    assert_eq!(first.id, "ORD-9826");
    orders.delete("ORD-9825", &AlwaysConfirm).unwrap();

    let second = orders.insert(order_draft("Meera Nair")).unwrap();
    assert_eq!(second.id, "ORD-9827");
}

#[test]
fn insert_fails_once_sequential_ids_run_out() {
    let storage = MemoryStorage::new();
    let mut last = Orders::seed().remove(0);
    last.id = format!("ORD-{}", u64::MAX);
    let snapshot = serde_json::to_string(&vec![last]).unwrap();
    storage.set_item(Orders::STORE_KEY, &snapshot).unwrap();

    let mut orders = RecordService::<Orders, _>::load(&storage).unwrap();
    assert_eq!(orders.store().load_source(), LoadSource::Persisted);

    let err = orders.insert(order_draft("Kabir Rao")).unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Store(StoreError::IdSpaceExhausted {
            key: "ecommerce.orders"
        })
    ));
    assert_eq!(orders.records().len(), 1);
    assert_eq!(storage.get_item(Orders::STORE_KEY).unwrap(), Some(snapshot));
}

#[test]
fn insert_prepends_and_applies_defaults() {
    let storage = MemoryStorage::new();
    let mut orders = RecordService::<Orders, _>::load(&storage).unwrap();
    let before = orders.records().len();

    let created = orders.insert(order_draft("  Priya Patel ")).unwrap();

    assert_eq!(orders.records().len(), before + 1);
    assert_eq!(orders.records()[0], created);
    assert_eq!(created.customer, "Priya Patel");
    assert_eq!(created.status, OrderStatus::Pending);
    assert_eq!(created.payment_status, PaymentStatus::Unpaid);
    assert!(created.placed_at > 0);
}

#[test]
fn validation_failure_writes_nothing() {
    let storage = MemoryStorage::new();
    let mut orders = RecordService::<Orders, _>::load(&storage).unwrap();

    let err = orders.insert(order_draft("")).unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Validation(ValidationError::MissingField("customer"))
    ));
    assert_eq!(orders.records().len(), 5);
    assert_eq!(storage.get_item("ecommerce.orders").unwrap(), None);

    let mut edited = orders.get("ORD-9822").cloned().unwrap();
    edited.product = String::new();
    assert!(matches!(
        orders.update(edited),
        Err(ServiceError::Validation(ValidationError::MissingField("product")))
    ));
    assert_eq!(orders.get("ORD-9822").unwrap().product, "Smart Watch");
}

#[test]
fn update_replaces_in_place() {
    let storage = MemoryStorage::new();
    let mut orders = RecordService::<Orders, _>::load(&storage).unwrap();

    let mut edited = orders.get("ORD-9823").cloned().unwrap();
    edited.payment_status = PaymentStatus::Paid;
    edited.status = OrderStatus::Processing;

    assert_eq!(
        orders.update(edited.clone()).unwrap(),
        MutationOutcome::Applied
    );
    assert_eq!(orders.records().len(), 5);
    assert_eq!(orders.records()[2], edited);

    let reloaded = RecordStore::<Orders, _>::load(&storage).unwrap();
    assert_eq!(reloaded.get("ORD-9823"), Some(&edited));
}

#[test]
fn update_unknown_id_is_a_no_op() {
    let storage = MemoryStorage::new();
    let mut orders = RecordService::<Orders, _>::load(&storage).unwrap();

    let mut ghost = Orders::seed().remove(0);
    ghost.id = "ORD-0001".to_string();

    assert_eq!(orders.update(ghost).unwrap(), MutationOutcome::NotFound);
    assert_eq!(orders.records(), Orders::seed().as_slice());
    assert_eq!(storage.get_item("ecommerce.orders").unwrap(), None);
}

#[test]
fn update_rederives_inventory_status() {
    let storage = MemoryStorage::new();
    let mut inventory = RecordService::<Inventory, _>::load(&storage).unwrap();

    let mut item = inventory.get("INV-0001").cloned().unwrap();
    item.quantity = 0;
    // Stale status from the form is ignored.
    item.status = StockStatus::InStock;
    inventory.update(item).unwrap();

    assert_eq!(
        inventory.get("INV-0001").unwrap().status,
        StockStatus::OutOfStock
    );
}

#[test]
fn delete_requires_confirmation() {
    let storage = MemoryStorage::new();
    let mut orders = RecordService::<Orders, _>::load(&storage).unwrap();

    assert_eq!(
        orders.delete("ORD-9822", &NeverConfirm).unwrap(),
        DeleteOutcome::Declined
    );
    assert!(orders.get("ORD-9822").is_some());

    let prompts = RefCell::new(Vec::new());
    let confirm = |prompt: &str| {
        prompts.borrow_mut().push(prompt.to_string());
        true
    };
    assert_eq!(
        orders.delete("ORD-9822", &confirm).unwrap(),
        DeleteOutcome::Deleted
    );
    assert_eq!(orders.records().len(), 4);
    assert!(orders.get("ORD-9822").is_none());
    assert_eq!(prompts.borrow().len(), 1);
    assert!(prompts.borrow()[0].contains("ORD-9822"));
}

#[test]
fn delete_unknown_id_does_not_prompt() {
    let storage = MemoryStorage::new();
    let mut orders = RecordService::<Orders, _>::load(&storage).unwrap();

    let confirm = |_: &str| -> bool { panic!("prompt must not be shown") };
    assert_eq!(
        orders.delete("ORD-0000", &confirm).unwrap(),
        DeleteOutcome::NotFound
    );
    assert_eq!(orders.records().len(), 5);
}

#[test]
fn toggle_status_persists_and_respects_fixed_pair() {
    let storage = MemoryStorage::new();
    let mut campaigns = RecordService::<Campaigns, _>::load(&storage).unwrap();

    assert_eq!(
        campaigns.toggle_status("CMP-1001").unwrap(),
        MutationOutcome::Applied
    );
    assert_eq!(
        campaigns.get("CMP-1001").unwrap().status,
        CampaignStatus::Paused
    );
    assert_eq!(
        campaigns.toggle_status("CMP-1002").unwrap(),
        MutationOutcome::Unchanged
    );
    assert_eq!(
        campaigns.toggle_status("CMP-9999").unwrap(),
        MutationOutcome::NotFound
    );

    let reloaded = RecordStore::<Campaigns, _>::load(&storage).unwrap();
    assert_eq!(
        reloaded.get("CMP-1001").unwrap().status,
        CampaignStatus::Paused
    );
}

#[test]
fn driver_toggle_skips_on_trip() {
    let storage = MemoryStorage::new();
    let mut drivers = RecordService::<Drivers, _>::load(&storage).unwrap();

    assert_eq!(
        drivers.toggle_status("DRV-102").unwrap(),
        MutationOutcome::Unchanged
    );
    assert_eq!(drivers.get("DRV-102").unwrap().status, DriverStatus::OnTrip);
    assert_eq!(storage.get_item("fleet.drivers").unwrap(), None);

    assert_eq!(
        drivers.toggle_status("DRV-101").unwrap(),
        MutationOutcome::Applied
    );
    assert_eq!(
        drivers.get("DRV-101").unwrap().status,
        DriverStatus::OffDuty
    );
}
