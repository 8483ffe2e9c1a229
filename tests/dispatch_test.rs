use brewery::model::{Beer, BeerCreate, BeerPatch, BeerStyle};
use brewery::resource::Resource;
use brewery::service::{BeerService, ListFilter, ResourceService, ServiceError};
use chrono::Utc;
use record_store::mock::{create_mock_store, expect_find_all, expect_modify, MockStore};
use record_store::{Lookup, Page, StoreError};
use rust_decimal::Decimal;
use std::sync::Arc;
use uuid::Uuid;

// --- Helpers ---

fn beer(name: &str, style: BeerStyle, quantity: i32) -> Beer {
    Beer::from_create(
        Uuid::new_v4(),
        BeerCreate {
            beer_name: name.to_string(),
            beer_style: style,
            upc: "123".to_string(),
            price: Decimal::new(995, 2),
            quantity_on_hand: Some(quantity),
        },
        Utc::now(),
    )
}

fn service(mock: &MockStore<Beer>) -> ResourceService<Beer> {
    ResourceService::new(Arc::new(mock.store()))
}

fn every_filter_combination() -> Vec<(ListFilter<BeerStyle>, Lookup<BeerStyle>)> {
    vec![
        (ListFilter::default(), Lookup::All),
        (ListFilter::by_name("IPA"), Lookup::NameLike("IPA".into())),
        (
            ListFilter::by_category(BeerStyle::Stout),
            Lookup::CategoryEq(BeerStyle::Stout),
        ),
        (
            ListFilter {
                name: Some("cat".into()),
                category: Some(BeerStyle::PaleAle),
                show_inventory: None,
            },
            Lookup::NameLikeAndCategory("cat".into(), BeerStyle::PaleAle),
        ),
    ]
}

// --- Dispatch ---

#[tokio::test]
async fn test_each_filter_combination_issues_one_matching_query() {
    for (filter, expected) in every_filter_combination() {
        let mut mock = MockStore::<Beer>::new();
        mock.expect_find_all().return_ok(vec![]);

        service(&mock).list(filter, None, None).await.unwrap();

        assert_eq!(mock.lookups(), vec![expected]);
        mock.verify();
    }
}

#[tokio::test]
async fn test_blank_name_filter_falls_back_to_category_only() {
    let mut mock = MockStore::<Beer>::new();
    mock.expect_find_all().return_ok(vec![]);

    let filter = ListFilter {
        name: Some("   ".into()),
        category: Some(BeerStyle::Gose),
        show_inventory: None,
    };
    service(&mock).list(filter, None, None).await.unwrap();

    assert_eq!(mock.lookups(), vec![Lookup::CategoryEq(BeerStyle::Gose)]);
}

#[tokio::test]
async fn test_list_sends_normalized_page_request() {
    let (store, mut receiver) = create_mock_store::<Beer>(10);
    let beers = BeerService::new(ResourceService::new(Arc::new(store)));

    let task = tokio::spawn(async move {
        beers
            .list_beers(Some("IPA".into()), None, None, Some(3), Some(5000))
            .await
    });

    let (lookup, page, responder) = expect_find_all(&mut receiver)
        .await
        .expect("Expected FindAll request");
    assert_eq!(lookup, Lookup::NameLike("IPA".to_string()));
    assert_eq!(page.index(), 2);
    assert_eq!(page.size(), 1000);
    responder.send(Ok(Page::new(vec![], page, 0))).unwrap();

    let result = task.await.unwrap().unwrap();
    assert_eq!(result.number, 2);
    assert!(receiver.try_recv().is_err(), "only one store query per list");
}

// --- Redaction ---

#[tokio::test]
async fn test_hidden_inventory_is_cleared_on_every_branch() {
    for (filter, _) in every_filter_combination() {
        let mut mock = MockStore::<Beer>::new();
        mock.expect_find_all().return_ok(vec![
            beer("Galaxy Cat", BeerStyle::PaleAle, 200),
            beer("Crank", BeerStyle::PaleAle, 12),
        ]);

        let page = service(&mock)
            .list(filter.show_inventory(false), None, None)
            .await
            .unwrap();

        assert_eq!(page.number_of_elements(), 2);
        assert!(page.iter().all(|b| b.quantity_on_hand.is_none()));
    }
}

#[tokio::test]
async fn test_absent_or_true_flag_keeps_inventory() {
    for show in [None, Some(true)] {
        let mut mock = MockStore::<Beer>::new();
        mock.expect_find_all()
            .return_ok(vec![beer("Galaxy Cat", BeerStyle::PaleAle, 200)]);

        let filter = ListFilter {
            show_inventory: show,
            ..ListFilter::default()
        };
        let page = service(&mock).list(filter, None, None).await.unwrap();

        assert_eq!(page.content[0].quantity_on_hand, Some(200));
    }
}

// --- Not Found & Failures ---

#[tokio::test]
async fn test_patch_of_unknown_id_never_saves() {
    let mut mock = MockStore::<Beer>::new();
    mock.expect_modify().return_ok(None);

    let result = service(&mock)
        .patch(&Uuid::new_v4(), BeerPatch::default())
        .await
        .unwrap();

    assert!(result.is_none());
    assert!(mock.saved().is_empty());
    mock.verify();
}

#[tokio::test]
async fn test_patch_writes_merged_record_in_one_store_call() {
    let existing = beer("Galaxy Cat", BeerStyle::PaleAle, 200);
    let mut mock = MockStore::<Beer>::new();
    mock.expect_modify().return_ok(Some(existing.clone()));

    let patched = service(&mock)
        .patch(
            &existing.id,
            BeerPatch {
                price: Some(Decimal::new(1395, 2)),
                ..Default::default()
            },
        )
        .await
        .unwrap()
        .unwrap();

    assert_eq!(mock.saved(), vec![patched.clone()]);
    assert_eq!(patched.price, Decimal::new(1395, 2));
    assert_eq!(patched.version, existing.version + 1);
    mock.verify();
}

#[tokio::test]
async fn test_patch_request_carries_the_merge() {
    let (store, mut receiver) = create_mock_store::<Beer>(10);
    let beers = BeerService::new(ResourceService::new(Arc::new(store)));
    let existing = beer("Crank", BeerStyle::PaleAle, 12);
    let id = existing.id;

    let task = tokio::spawn(async move {
        beers
            .patch_beer_by_id(
                id,
                BeerPatch {
                    quantity_on_hand: Some(48),
                    ..Default::default()
                },
            )
            .await
    });

    let (requested, modifier, responder) = expect_modify(&mut receiver)
        .await
        .expect("Expected Modify request");
    assert_eq!(requested, id);
    let merged = modifier.apply(existing.clone());
    assert_eq!(merged.quantity_on_hand, Some(48));
    assert_eq!(merged.beer_name, "Crank");
    responder.send(Ok(Some(merged.clone()))).unwrap();

    let result = task.await.unwrap().unwrap();
    assert_eq!(result, Some(merged));
    assert!(receiver.try_recv().is_err(), "patch is a single store call");
}

#[tokio::test]
async fn test_delete_of_unknown_id_reports_false() {
    let mut mock = MockStore::<Beer>::new();
    mock.expect_delete().return_ok(false);

    let removed = service(&mock).delete(&Uuid::new_v4()).await.unwrap();

    assert!(!removed);
    mock.verify();
}

#[tokio::test]
async fn test_storage_failures_propagate_untouched() {
    let mut mock = MockStore::<Beer>::new();
    mock.expect_find_all()
        .return_err(StoreError::Storage("disk I/O error".into()));
    mock.expect_modify()
        .return_err(StoreError::Storage("disk I/O error".into()));

    let service = service(&mock);
    let listed = service.list(ListFilter::default(), None, None).await;
    assert!(matches!(
        listed,
        Err(ServiceError::Storage(StoreError::Storage(ref msg))) if msg == "disk I/O error"
    ));

    let patched = service.patch(&Uuid::new_v4(), BeerPatch::default()).await;
    assert!(matches!(patched, Err(ServiceError::Storage(_))));
    assert!(mock.saved().is_empty());
}
