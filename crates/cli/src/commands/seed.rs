//! Seed an empty back-office database.
//!
//! Creates the `admin` and `operador` users, the sample haberdashery
//! products and three sample customers. Does nothing if any user exists.
//!
//! # Environment Variables
//!
//! - `BACKOFFICE_DATABASE_URL` (or `DATABASE_URL`) - `PostgreSQL` connection string
//! - `SEED_ADMIN_PASSWORD`, `SEED_OPERATOR_PASSWORD` - user passwords, when the
//!   flags are omitted

use rust_decimal::Decimal;
use tracing::info;

use armarinho_backoffice::db::products::ProductRepository;
use armarinho_backoffice::db::{CustomerRepository, PgCustomerRepository, PgUserRepository};
use armarinho_backoffice::models::{NewCustomer, NewUser};
use armarinho_backoffice::services::auth::hash_password;
use armarinho_core::{Document, DocumentKind, Role};

use super::{CliError, check_password, connect};

/// `(code, description, price in cents, stock)`
const SAMPLE_PRODUCTS: &[(&str, &str, i64, i32)] = &[
    ("001", "Botão de Madeira", 500, 120),
    ("002", "Linha de Algodão", 850, 85),
    ("003", "Agulha de Costura", 320, 200),
    ("004", "Fita Métrica", 1200, 50),
    ("005", "Tesoura Profissional", 2500, 30),
];

/// `(name, kind, document, phone, email)`
const SAMPLE_CUSTOMERS: &[(&str, DocumentKind, &str, &str, &str)] = &[
    (
        "Maria Silva",
        DocumentKind::Individual,
        "12345678901",
        "84999999999",
        "maria@email.com",
    ),
    (
        "João Santos",
        DocumentKind::Individual,
        "98765432109",
        "84888888888",
        "joao@email.com",
    ),
    (
        "Confecção LTDA",
        DocumentKind::Company,
        "12345678000190",
        "8433333333",
        "contato@confeccao.com.br",
    ),
];

/// Seed default users and sample data.
///
/// # Errors
///
/// Returns an error if a password is too short, the database is unreachable
/// or an insert fails.
pub async fn run(admin_password: &str, operator_password: &str) -> Result<(), CliError> {
    check_password("admin password", admin_password)?;
    check_password("operator password", operator_password)?;

    let pool = connect().await?;

    let users = PgUserRepository::new(&pool);
    if users.count().await? > 0 {
        info!("Users already exist, skipping seed");
        return Ok(());
    }

    for (login_name, display_name, role, password) in [
        ("admin", "Administrador", Role::Admin, admin_password),
        ("operador", "Operador", Role::Operator, operator_password),
    ] {
        let user = users
            .create(&NewUser {
                login_name: login_name.to_owned(),
                display_name: display_name.to_owned(),
                password_hash: hash_password(password)?,
                role,
            })
            .await?;
        info!(user_id = %user.id, login = login_name, %role, "Created user");
    }

    let products = ProductRepository::new(&pool);
    for &(code, description, cents, stock) in SAMPLE_PRODUCTS {
        products
            .create(code, description, Decimal::new(cents, 2), stock)
            .await?;
    }
    info!(count = SAMPLE_PRODUCTS.len(), "Created sample products");

    let customers = PgCustomerRepository::new(&pool);
    for &(name, kind, document, phone, email) in SAMPLE_CUSTOMERS {
        customers
            .insert(&NewCustomer {
                name: name.to_owned(),
                kind,
                document: Document::parse(document, kind)?,
                phone: Some(phone.to_owned()),
                email: Some(email.to_owned()),
                address: None,
            })
            .await?;
    }
    info!(count = SAMPLE_CUSTOMERS.len(), "Created sample customers");

    info!("Database seeded successfully!");
    Ok(())
}
