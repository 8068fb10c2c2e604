//! Mock-database tests for the project repository.

use std::collections::BTreeMap;

use chrono::{NaiveDate, Utc};
use rust_decimal_macros::dec;
use sea_orm::{DatabaseBackend, MockDatabase, Value};

use super::*;
use misboard_core::project::ProjectStatus;

fn project(id: &str, contract_key: Option<&str>) -> projects::Model {
    let now = Utc::now().into();
    projects::Model {
        id: id.to_string(),
        name: "Solar rollout".to_string(),
        client: Some("Acme".to_string()),
        description: None,
        status: "active".to_string(),
        start_date: NaiveDate::from_ymd_opt(2025, 4, 1),
        end_date: None,
        budget: dec!(250000),
        contract_key: contract_key.map(str::to_string),
        created_at: now,
        updated_at: now,
    }
}

fn count_row(count: i64) -> BTreeMap<&'static str, Value> {
    BTreeMap::from([("num_items", Value::BigInt(Some(count)))])
}

fn new_project(id: &str) -> NewProject {
    NewProject {
        id: id.to_string(),
        details: ProjectDetails {
            name: "Solar rollout".to_string(),
            client: None,
            description: None,
            status: ProjectStatus::Active,
            start_date: None,
            end_date: None,
            budget: dec!(250000),
        },
    }
}

#[tokio::test]
async fn test_create_duplicate_id() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![project("PRJ-001", None)]])
        .into_connection();

    let err = ProjectRepository::new(&db)
        .create(new_project("PRJ-001"))
        .await
        .unwrap_err();

    assert!(matches!(err, ProjectRepoError::Duplicate(id) if id == "PRJ-001"));
}

#[tokio::test]
async fn test_create_project() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<projects::Model>::new(), vec![project("PRJ-002", None)]])
        .into_connection();

    let created = ProjectRepository::new(&db)
        .create(new_project("PRJ-002"))
        .await
        .expect("create should succeed");

    assert_eq!(created.id, "PRJ-002");
    assert!(created.contract_key.is_none());
}

#[tokio::test]
async fn test_get_missing_project() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<projects::Model>::new()])
        .into_connection();

    let err = ProjectRepository::new(&db).get("NOPE").await.unwrap_err();
    assert!(matches!(err, ProjectRepoError::NotFound(id) if id == "NOPE"));
}

#[tokio::test]
async fn test_line_item_requires_project() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([[count_row(0)]])
        .into_connection();

    let input = LineItemInput {
        item: "Inverter".to_string(),
        amount: dec!(1200),
        vendor: None,
        incurred_on: None,
    };
    let err = ProjectRepository::new(&db)
        .add_line_item("NOPE", LineKind::Capx, input)
        .await
        .unwrap_err();

    assert!(matches!(err, ProjectRepoError::NotFound(_)));
}

#[tokio::test]
async fn test_list_line_items_filters_by_kind() {
    let line = project_line_items::Model {
        id: 1,
        project_id: "PRJ-001".to_string(),
        kind: "opx".to_string(),
        item: "Site rent".to_string(),
        amount: dec!(5000),
        vendor: None,
        incurred_on: None,
        created_at: Utc::now().into(),
    };
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([[count_row(1)]])
        .append_query_results([vec![line]])
        .into_connection();

    let repo = ProjectRepository::new(&db);
    let items = repo
        .list_line_items("PRJ-001", LineKind::Opx)
        .await
        .expect("list should succeed");
    assert_eq!(items.len(), 1);

    let log = format!("{:?}", db.into_transaction_log());
    assert!(log.contains("opx"));
}

#[tokio::test]
async fn test_replace_contract_returns_previous_key() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([
            vec![project("PRJ-001", Some("contracts/old.pdf"))],
            vec![project("PRJ-001", Some("contracts/new.pdf"))],
        ])
        .into_connection();

    let previous = ProjectRepository::new(&db)
        .replace_contract("PRJ-001", "contracts/new.pdf".to_string())
        .await
        .expect("replace should succeed");

    assert_eq!(previous.as_deref(), Some("contracts/old.pdf"));
}

#[tokio::test]
async fn test_replace_contract_missing_project() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<projects::Model>::new()])
        .into_connection();

    let err = ProjectRepository::new(&db)
        .replace_contract("NOPE", "contracts/x.pdf".to_string())
        .await
        .unwrap_err();

    assert!(matches!(err, DocumentError::ProjectNotFound(_)));
}

#[tokio::test]
async fn test_list_bd_expenditures() {
    let bd = bd_expenditures::Model {
        id: 3,
        project_id: "PRJ-001".to_string(),
        description: "Client dinner".to_string(),
        amount: dec!(4200.50),
        spent_on: NaiveDate::from_ymd_opt(2025, 5, 2),
        receipt_key: "receipts/abc-bill.pdf".to_string(),
        created_at: Utc::now().into(),
    };
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([[count_row(1)]])
        .append_query_results([vec![bd]])
        .into_connection();

    let rows = ProjectRepository::new(&db)
        .list_bd_expenditures("PRJ-001")
        .await
        .expect("list should succeed");

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].receipt_key, "receipts/abc-bill.pdf");
    assert_eq!(rows[0].amount, dec!(4200.50));
}
