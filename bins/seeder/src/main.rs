//! Database seeder for Misboard development and testing.
//!
//! Seeds sample expenditures, sales quarters, banks and one project with
//! CAPX/OPX line items. Safe to run repeatedly: existing records are left
//! alone.
//!
//! Usage: cargo run --bin seeder

use anyhow::Context;
use chrono::NaiveDate;
use rust_decimal::Decimal;

use misboard_core::bank_details::{BankAccount, BankDetails};
use misboard_core::expenditure::NewExpenditure;
use misboard_core::project::{LineItemInput, LineKind, NewProject, ProjectDetails, ProjectStatus};
use misboard_core::quarter::{Quarter, QuarterFilter, QuarterTag};
use misboard_core::sales::SalesQuarterInput;
use misboard_db::repositories::{
    BankRepository, ExpenditureRepository, ProjectRepoError, ProjectRepository,
    SalesQuarterError, SalesQuarterRepository,
};
use misboard_shared::DatabaseConfig;

const SAMPLE_PROJECT_ID: &str = "PRJ-001";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set in environment")?;

    println!("Connecting to database...");
    let db = misboard_db::connect(&DatabaseConfig {
        url,
        max_connections: 2,
        min_connections: 1,
    })
    .await
    .context("Failed to connect to database")?;

    println!("Seeding expenditures...");
    seed_expenditures(ExpenditureRepository::new(&db)).await?;

    println!("Seeding sales quarters...");
    seed_sales_quarters(SalesQuarterRepository::new(&db)).await?;

    println!("Seeding banks...");
    seed_banks(BankRepository::new(&db)).await?;

    println!("Seeding sample project...");
    seed_project(ProjectRepository::new(&db)).await?;

    println!("Seeding complete!");
    Ok(())
}

fn amount(units: i64) -> Decimal {
    Decimal::from(units)
}

/// Seeds a small expenditure sheet, only into an empty table.
async fn seed_expenditures(repo: ExpenditureRepository<'_>) -> anyhow::Result<()> {
    if !repo.list(QuarterFilter::All).await?.is_empty() {
        println!("  Expenditures already present, skipping...");
        return Ok(());
    }

    let items = [
        ("Rent", "Head office", 85_000, QuarterTag::AllQuarters),
        ("Rent", "Warehouse", 40_000, QuarterTag::Quarter(Quarter::MarMay)),
        ("Utilities", "Electricity", 12_500, QuarterTag::Quarter(Quarter::MarMay)),
        ("Utilities", "Internet", 3_200, QuarterTag::AllQuarters),
        ("Travel", "Client visits", 18_750, QuarterTag::Quarter(Quarter::JunAug)),
        ("Marketing", "Trade fair stall", 60_000, QuarterTag::Quarter(Quarter::SepNov)),
    ];

    let rows = items
        .into_iter()
        .map(|(category, item, value, quarter)| {
            NewExpenditure::new(category, item, amount(value), quarter)
        })
        .collect::<Result<Vec<_>, _>>()?;

    let imported = repo.import_rows(&rows).await?;
    println!("  Created {imported} expenditure items");
    Ok(())
}

/// Seeds two quarters of sales figures.
async fn seed_sales_quarters(repo: SalesQuarterRepository<'_>) -> anyhow::Result<()> {
    let quarters = [
        ("Mar-May", [420_000, 310_000, 95_000, 60_000], 900_000, 880_000, 92, 98),
        ("Jun-Aug", [380_000, 295_000, 110_000, 72_000], 950_000, 860_000, 85, 90),
    ];

    for (quarter, [direct, institutional, channel, online], target, forecast, hit, achieved) in
        quarters
    {
        let record = SalesQuarterInput {
            quarter: quarter.to_string(),
            direct_sales: amount(direct),
            institutional_sales: amount(institutional),
            channel_sales: amount(channel),
            online_sales: amount(online),
            target: amount(target),
            forecasted_sales: amount(forecast),
            hit_percentage: amount(hit),
            achieved_percentage: amount(achieved),
        }
        .validate()?;

        match repo.create(&record).await {
            Ok(_) => println!("  Created sales figures for {quarter}"),
            Err(SalesQuarterError::Duplicate(_)) => {
                println!("  Sales figures for {quarter} already exist, skipping...");
            }
            Err(e) => return Err(e.into()),
        }
    }
    Ok(())
}

/// Seeds the banks used by the sample statements. Upserts are idempotent.
async fn seed_banks(repo: BankRepository<'_>) -> anyhow::Result<()> {
    let banks = [
        ("HDFC Bank", "50100012345678", "HDFC0000123", "Fort"),
        ("State Bank of India", "30987654321", "SBIN0001234", "Andheri East"),
    ];

    for (name, account_no, ifsc, branch) in banks {
        let account = BankAccount {
            bank_name: name.to_string(),
            details: BankDetails {
                account_no: Some(account_no.to_string()),
                ifsc_code: Some(ifsc.to_string()),
                branch_name: Some(branch.to_string()),
                ..BankDetails::default()
            },
        }
        .validate()?;

        repo.upsert(account).await?;
        println!("  Saved bank: {name}");
    }
    Ok(())
}

/// Seeds one project with a CAPX and an OPX line item.
async fn seed_project(repo: ProjectRepository<'_>) -> anyhow::Result<()> {
    let project = NewProject {
        id: SAMPLE_PROJECT_ID.to_string(),
        details: ProjectDetails {
            name: "Rooftop solar rollout".to_string(),
            client: Some("Acme Textiles".to_string()),
            description: Some("Phase 1: three factory rooftops".to_string()),
            status: ProjectStatus::Active,
            start_date: NaiveDate::from_ymd_opt(2025, 4, 1),
            end_date: NaiveDate::from_ymd_opt(2026, 3, 31),
            budget: amount(2_500_000),
        },
    }
    .validate()?;

    match repo.create(project).await {
        Ok(_) => println!("  Created project: {SAMPLE_PROJECT_ID}"),
        Err(ProjectRepoError::Duplicate(_)) => {
            println!("  Project {SAMPLE_PROJECT_ID} already exists, skipping...");
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    }

    let items = [
        (LineKind::Capx, "Inverters", 640_000, "SunGrid Pvt Ltd"),
        (LineKind::Opx, "Site supervision", 45_000, "Local contractor"),
    ];
    for (kind, item, value, vendor) in items {
        let input = LineItemInput {
            item: item.to_string(),
            amount: amount(value),
            vendor: Some(vendor.to_string()),
            incurred_on: NaiveDate::from_ymd_opt(2025, 5, 15),
        }
        .validate()?;

        repo.add_line_item(SAMPLE_PROJECT_ID, kind, input).await?;
        println!("  Added {} item: {item}", kind.as_str());
    }
    Ok(())
}
