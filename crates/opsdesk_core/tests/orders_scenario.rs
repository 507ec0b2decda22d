use opsdesk_core::db::open_db_in_memory;
use opsdesk_core::model::id::sequence_number;
use opsdesk_core::modules::orders::{
    summarize, Order, OrderDraft, OrderStatus, Orders, PaymentStatus,
};
use opsdesk_core::{
    AlwaysConfirm, DeleteOutcome, ListViewState, RecordModule, RecordService, RecordStore,
    SqliteKeyValueStorage,
};

#[test]
fn orders_desk_session() {
    let conn = open_db_in_memory().unwrap();
    let storage = SqliteKeyValueStorage::try_new(&conn).unwrap();
    let mut orders = RecordService::<Orders, _>::load(&storage).unwrap();
    let mut view = ListViewState::<Order>::new();

    assert_eq!(orders.records().len(), 5);

    view.set_search("sharma");
    let ids: Vec<_> = orders
        .list(&view.query())
        .items
        .iter()
        .map(|order| order.id.clone())
        .collect();
    assert_eq!(ids, vec!["ORD-9821".to_string(), "ORD-9824".to_string()]);

    assert!(view.surface.open_create());
    let created = orders
        .insert(OrderDraft {
            customer: "Priya Patel".to_string(),
            email: "priya.patel@example.in".to_string(),
            product: "Mechanical Keyboard".to_string(),
            quantity: 1,
            amount: 5_499.0,
        })
        .unwrap();
    view.surface.dismiss();

    assert_eq!(orders.records().len(), 6);
    assert_eq!(orders.records()[0].id, created.id);
    assert_eq!(created.id, "ORD-9826");
    assert_eq!(sequence_number("ORD", &created.id), Some(9826));
    assert_eq!(created.status, OrderStatus::Pending);
    assert_eq!(created.payment_status, PaymentStatus::Unpaid);

    assert_eq!(
        orders.delete("ORD-9821", &AlwaysConfirm).unwrap(),
        DeleteOutcome::Deleted
    );
    assert_eq!(orders.records().len(), 5);
    assert!(orders.get("ORD-9821").is_none());

    let summary = summarize(orders.records());
    assert_eq!(summary.total_orders, 5);
    assert_eq!(summary.paid_revenue, 12_499.0 + 3_499.0);
    assert_eq!(summary.open_orders, 3);

    let reloaded = RecordStore::<Orders, _>::load(&storage).unwrap();
    assert_eq!(reloaded.records(), orders.records());
    assert_ne!(reloaded.records(), Orders::seed().as_slice());
}
