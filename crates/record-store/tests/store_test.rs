use record_store::{
    EntityStore, Lookup, Modifier, Page, PageRequest, SqlRecord, SqliteStore, StoreActor,
    StoreError, StoredRecord,
};
use rusqlite::types::Value;
use rusqlite::Row;
use std::sync::Arc;

// --- Test Record ---

#[derive(Clone, Debug, PartialEq)]
struct Hop {
    id: String,
    name: String,
    family: Option<String>,
}

impl StoredRecord for Hop {
    type Id = String;
    type Category = String;

    fn id(&self) -> &String {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn category(&self) -> Option<&String> {
        self.family.as_ref()
    }
}

impl SqlRecord for Hop {
    const TABLE: &'static str = "hops";
    const SCHEMA: &'static str = "CREATE TABLE IF NOT EXISTS hops (
        id     TEXT PRIMARY KEY,
        name   TEXT NOT NULL,
        family TEXT
    );";
    const COLUMNS: &'static [&'static str] = &["id", "name", "family"];
    const ID_COLUMN: &'static str = "id";
    const NAME_COLUMN: &'static str = "name";
    const CATEGORY_COLUMN: Option<&'static str> = Some("family");

    fn id_value(id: &String) -> Value {
        Value::Text(id.clone())
    }

    fn category_value(category: &String) -> Value {
        Value::Text(category.clone())
    }

    fn to_values(&self) -> Vec<Value> {
        vec![
            Value::Text(self.id.clone()),
            Value::Text(self.name.clone()),
            self.family.clone().map_or(Value::Null, Value::Text),
        ]
    }

    fn from_row(row: &Row<'_>) -> Result<Self, StoreError> {
        Ok(Self {
            id: row.get(0)?,
            name: row.get(1)?,
            family: row.get(2)?,
        })
    }
}

fn hop(id: &str, name: &str, family: Option<&str>) -> Hop {
    Hop {
        id: id.to_string(),
        name: name.to_string(),
        family: family.map(str::to_string),
    }
}

fn hop_yard() -> Vec<Hop> {
    vec![
        hop("h1", "Citra", Some("american")),
        hop("h2", "Saaz", Some("noble")),
        hop("h3", "Cascade", Some("american")),
        hop("h4", "Hallertau", Some("noble")),
        hop("h5", "Centennial", Some("american")),
        hop("h6", "Mystery", None),
        // Same name as h1: order falls back to the id.
        hop("h0", "Citra", Some("american")),
        hop("h7", "Éclat", Some("french")),
    ]
}

async fn seed(store: &dyn EntityStore<Hop>, records: Vec<Hop>) {
    for record in records {
        store.save(record).await.unwrap();
    }
}

fn names(page: &Page<Hop>) -> Vec<&str> {
    page.iter().map(|h| h.name.as_str()).collect()
}

fn memory_store() -> record_store::MemoryStore<Hop> {
    let (actor, store) = StoreActor::<Hop>::new(10);
    tokio::spawn(actor.run());
    store
}

// --- Tests ---

#[tokio::test]
async fn test_memory_store_full_lifecycle() {
    let store = memory_store();

    // 1. Save
    let saved = store
        .save(hop("h1", "Citra", Some("american")))
        .await
        .unwrap();
    assert_eq!(saved.name, "Citra");
    assert!(store.exists(&"h1".to_string()).await.unwrap());

    // 2. Overwrite in place
    store
        .save(hop("h1", "Citra Cryo", Some("american")))
        .await
        .unwrap();
    let found = store.find(&"h1".to_string()).await.unwrap().unwrap();
    assert_eq!(found.name, "Citra Cryo");
    assert_eq!(store.count().await.unwrap(), 1);

    // 3. Delete, then delete again
    assert!(store.delete(&"h1".to_string()).await.unwrap());
    assert!(!store.delete(&"h1".to_string()).await.unwrap());
    assert!(store.find(&"h1".to_string()).await.unwrap().is_none());
    assert!(!store.exists(&"h1".to_string()).await.unwrap());
    assert_eq!(store.count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_find_all_sorts_by_name_then_id() {
    let store = memory_store();
    seed(&store, hop_yard()).await;

    let page = store
        .find_all(&Lookup::All, PageRequest::new(0, 25))
        .await
        .unwrap();
    assert_eq!(
        names(&page),
        vec![
            "Cascade",
            "Centennial",
            "Citra",
            "Citra",
            "Hallertau",
            "Mystery",
            "Saaz",
            "Éclat"
        ]
    );
    assert_eq!(page.content[2].id, "h0");
    assert_eq!(page.content[3].id, "h1");
}

#[tokio::test]
async fn test_category_lookups_skip_records_without_category() {
    let store = memory_store();
    seed(&store, hop_yard()).await;

    let noble = store
        .find_all(&Lookup::CategoryEq("noble".into()), PageRequest::new(0, 25))
        .await
        .unwrap();
    assert_eq!(names(&noble), vec!["Hallertau", "Saaz"]);

    let both = store
        .find_all(
            &Lookup::NameLikeAndCategory("c".into(), "american".into()),
            PageRequest::new(0, 25),
        )
        .await
        .unwrap();
    assert_eq!(both.total_elements, 4);
    assert!(both.iter().all(|h| h.family.as_deref() == Some("american")));
}

#[tokio::test]
async fn test_sqlite_store_full_lifecycle() {
    let store = SqliteStore::<Hop>::open_in_memory().unwrap();

    store.save(hop("h1", "Citra", None)).await.unwrap();
    store
        .save(hop("h1", "Citra", Some("american")))
        .await
        .unwrap();
    assert_eq!(store.count().await.unwrap(), 1);

    let found = store.find(&"h1".to_string()).await.unwrap().unwrap();
    assert_eq!(found, hop("h1", "Citra", Some("american")));

    assert!(store.delete(&"h1".to_string()).await.unwrap());
    assert!(!store.delete(&"missing".to_string()).await.unwrap());
    assert!(store.find(&"h1".to_string()).await.unwrap().is_none());
}

fn both_backends() -> Vec<(&'static str, Arc<dyn EntityStore<Hop>>)> {
    let memory: Arc<dyn EntityStore<Hop>> = Arc::new(memory_store());
    let sqlite: Arc<dyn EntityStore<Hop>> =
        Arc::new(SqliteStore::<Hop>::open_in_memory().unwrap());
    vec![("memory", memory), ("sqlite", sqlite)]
}

fn append_star() -> Modifier<Hop> {
    Modifier::new(|mut h: Hop| {
        h.name.push('*');
        h
    })
}

#[tokio::test]
async fn test_modify_updates_in_place_and_never_inserts() {
    for (backend, store) in both_backends() {
        store.save(hop("h1", "Citra", None)).await.unwrap();

        let updated = store
            .modify(
                &"h1".to_string(),
                Modifier::new(|mut h: Hop| {
                    h.family = Some("american".into());
                    h
                }),
            )
            .await
            .unwrap();
        assert_eq!(updated, Some(hop("h1", "Citra", Some("american"))), "{backend}");
        assert_eq!(
            store.find(&"h1".to_string()).await.unwrap(),
            Some(hop("h1", "Citra", Some("american")))
        );

        let missing = store
            .modify(&"ghost".to_string(), append_star())
            .await
            .unwrap();
        assert!(missing.is_none(), "{backend}");
        assert!(!store.exists(&"ghost".to_string()).await.unwrap());
        assert_eq!(store.count().await.unwrap(), 1);
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_modifies_are_all_applied() {
    for (backend, store) in both_backends() {
        store.save(hop("h1", "Citra", None)).await.unwrap();

        let tasks: Vec<_> = (0..16)
            .map(|_| {
                let store = Arc::clone(&store);
                tokio::spawn(async move { store.modify(&"h1".to_string(), append_star()).await })
            })
            .collect();
        for task in tasks {
            assert!(task.await.unwrap().unwrap().is_some());
        }

        let found = store.find(&"h1".to_string()).await.unwrap().unwrap();
        assert_eq!(found.name, format!("Citra{}", "*".repeat(16)), "{backend}");
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_modify_racing_delete_never_resurrects() {
    for (backend, store) in both_backends() {
        for round in 0..20 {
            store.save(hop("h1", "Citra", None)).await.unwrap();

            let modifying = {
                let store = Arc::clone(&store);
                tokio::spawn(async move { store.modify(&"h1".to_string(), append_star()).await })
            };
            let deleting = {
                let store = Arc::clone(&store);
                tokio::spawn(async move { store.delete(&"h1".to_string()).await })
            };
            let modified = modifying.await.unwrap().unwrap();
            assert!(deleting.await.unwrap().unwrap(), "{backend} round {round}");

            // Whichever ran first, the delete is final.
            assert!(store.find(&"h1".to_string()).await.unwrap().is_none());
            if let Some(record) = modified {
                assert_eq!(record.name, "Citra*");
            }
        }
    }
}

#[tokio::test]
async fn test_sqlite_store_persists_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("hops.db");

    {
        let store = SqliteStore::<Hop>::open(&path).unwrap();
        seed(&store, hop_yard()).await;
    }

    let reopened = SqliteStore::<Hop>::open(&path).unwrap();
    assert_eq!(reopened.count().await.unwrap(), hop_yard().len() as u64);
    let saaz = reopened.find(&"h2".to_string()).await.unwrap().unwrap();
    assert_eq!(saaz.family.as_deref(), Some("noble"));
}

#[tokio::test]
async fn test_backends_return_identical_pages() {
    let memory = memory_store();
    let sqlite = SqliteStore::<Hop>::open_in_memory().unwrap();
    seed(&memory, hop_yard()).await;
    seed(&sqlite, hop_yard()).await;

    let lookups = vec![
        Lookup::All,
        Lookup::NameLike("CIT".into()),
        Lookup::NameLike("a".into()),
        // Only ASCII is folded, on both sides.
        Lookup::NameLike("éclat".into()),
        Lookup::CategoryEq("american".into()),
        Lookup::CategoryEq("unknown".into()),
        Lookup::NameLikeAndCategory("e".into(), "american".into()),
    ];
    let pages = [
        PageRequest::new(0, 25),
        PageRequest::new(0, 2),
        PageRequest::new(1, 2),
        PageRequest::new(3, 3),
    ];

    for lookup in &lookups {
        for page in pages {
            let from_memory = memory.find_all(lookup, page).await.unwrap();
            let from_sqlite = sqlite.find_all(lookup, page).await.unwrap();
            assert_eq!(
                from_memory, from_sqlite,
                "backends disagree for {:?} {:?}",
                lookup, page
            );
        }
    }

    let none = sqlite
        .find_all(&Lookup::NameLike("éclat".into()), PageRequest::new(0, 25))
        .await
        .unwrap();
    assert_eq!(none.total_elements, 0);
}

#[tokio::test]
async fn test_store_reports_closed_actor() {
    let (actor, store) = StoreActor::<Hop>::new(1);
    drop(actor);

    let result = store.find(&"h1".to_string()).await;
    assert!(matches!(result, Err(StoreError::ActorClosed)));
}
