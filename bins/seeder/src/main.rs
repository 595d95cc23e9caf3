//! Database seeder for Partida development and testing.
//!
//! Seeds a demo tenant with a small Colombian PUC chart of accounts and
//! open fiscal periods for the current year.
//!
//! Usage: cargo run --bin seeder

use uuid::Uuid;

use partida_core::chart::{AccountType, ChartError};
use partida_db::repositories::account::{AccountRepoError, CreateAccountInput};
use partida_db::{AccountRepository, FiscalPeriodRepository};
use partida_shared::types::TenantId;

/// Demo tenant ID (consistent for all seeds)
const DEMO_TENANT_ID: &str = "00000000-0000-0000-0000-000000000001";

/// Fiscal year to open periods for.
const DEMO_YEAR: i32 = 2026;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let database_url =
        std::env::var("DATABASE_URL").expect("DATABASE_URL must be set in environment");

    println!("Connecting to database...");
    let db = partida_db::connect(&database_url)
        .await
        .expect("Failed to connect to database");

    let tenant_id = TenantId::from_uuid(Uuid::parse_str(DEMO_TENANT_ID).unwrap());

    println!("Seeding chart of accounts...");
    seed_chart(&AccountRepository::new(db.clone()), tenant_id).await;

    println!("Seeding fiscal periods for {DEMO_YEAR}...");
    seed_periods(&FiscalPeriodRepository::new(db.clone()), tenant_id).await;

    println!("Seeding complete!");
}

/// A condensed PUC: classes, groups, accounts and postable subaccounts.
/// Levels 1-3 are structural and marked as system accounts.
const CHART: &[(&str, &str, AccountType, i16)] = &[
    // Class level
    ("1", "Activo", AccountType::Asset, 1),
    ("2", "Pasivo", AccountType::Liability, 1),
    ("3", "Patrimonio", AccountType::Equity, 1),
    ("4", "Ingresos", AccountType::Income, 1),
    ("5", "Gastos", AccountType::Expense, 1),
    ("6", "Costos", AccountType::Cost, 1),
    // Group level
    ("11", "Disponible", AccountType::Asset, 2),
    ("13", "Deudores", AccountType::Asset, 2),
    ("15", "Propiedades planta y equipo", AccountType::Asset, 2),
    ("22", "Proveedores", AccountType::Liability, 2),
    ("23", "Cuentas por pagar", AccountType::Liability, 2),
    ("24", "Impuestos, gravamenes y tasas", AccountType::Liability, 2),
    ("25", "Obligaciones laborales", AccountType::Liability, 2),
    ("31", "Capital social", AccountType::Equity, 2),
    ("41", "Operacionales", AccountType::Income, 2),
    ("51", "Operacionales de administracion", AccountType::Expense, 2),
    ("61", "Costo de ventas", AccountType::Cost, 2),
    // Account level
    ("1105", "Caja", AccountType::Asset, 3),
    ("1110", "Bancos", AccountType::Asset, 3),
    ("1305", "Clientes", AccountType::Asset, 3),
    ("1524", "Equipo de oficina", AccountType::Asset, 3),
    ("2205", "Proveedores nacionales", AccountType::Liability, 3),
    ("2370", "Retenciones y aportes de nomina", AccountType::Liability, 3),
    ("2408", "Impuesto sobre las ventas por pagar", AccountType::Liability, 3),
    ("2505", "Salarios por pagar", AccountType::Liability, 3),
    ("3105", "Capital suscrito y pagado", AccountType::Equity, 3),
    ("4135", "Comercio al por mayor y al por menor", AccountType::Income, 3),
    ("5105", "Gastos de personal", AccountType::Expense, 3),
    ("5135", "Servicios", AccountType::Expense, 3),
    ("6135", "Comercio al por mayor y al por menor", AccountType::Cost, 3),
    // Postable subaccounts
    ("110505", "Caja general", AccountType::Asset, 4),
    ("111005", "Moneda nacional", AccountType::Asset, 4),
    ("130505", "Clientes nacionales", AccountType::Asset, 4),
    ("152405", "Equipo de oficina", AccountType::Asset, 4),
    ("220505", "Proveedores nacionales", AccountType::Liability, 4),
    ("237005", "Deducciones de nomina", AccountType::Liability, 4),
    ("240801", "IVA generado", AccountType::Liability, 4),
    ("250501", "Salarios por pagar", AccountType::Liability, 4),
    ("310505", "Capital autorizado", AccountType::Equity, 4),
    ("413501", "Comercio al por mayor", AccountType::Income, 4),
    ("510501", "Sueldos", AccountType::Expense, 4),
    ("513501", "Aseo y vigilancia", AccountType::Expense, 4),
    ("613501", "Costo comercio al por mayor", AccountType::Cost, 4),
];

async fn seed_chart(accounts: &AccountRepository, tenant_id: TenantId) {
    for &(code, name, account_type, level) in CHART {
        let parent_code = (code.len() > 1).then(|| parent_of(code).to_string());
        let result = accounts
            .create(CreateAccountInput {
                tenant_id,
                code: code.to_string(),
                name: name.to_string(),
                account_type,
                nature: None,
                level,
                parent_code,
                requires_third_party: matches!(code, "130505" | "220505"),
                requires_cost_center: false,
                is_system: level < 4,
            })
            .await;

        match result {
            Ok(_) => println!("  {code} {name}"),
            Err(AccountRepoError::Chart(ChartError::DuplicateCode(_))) => {
                println!("  {code} already exists, skipping");
            }
            Err(err) => panic!("Failed to seed account {code}: {err}"),
        }
    }
}

/// Returns the PUC parent of a code: class for groups, group for accounts,
/// account for subaccounts.
fn parent_of(code: &str) -> &str {
    match code.len() {
        2 => &code[..1],
        4 => &code[..2],
        _ => &code[..4],
    }
}

async fn seed_periods(periods: &FiscalPeriodRepository, tenant_id: TenantId) {
    for month in 1..=12 {
        periods
            .ensure(tenant_id, DEMO_YEAR, month)
            .await
            .expect("Failed to seed fiscal period");
        println!("  {DEMO_YEAR}-{month:02} open");
    }
}
