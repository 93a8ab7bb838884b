//! # Seed Binary
//!
//! Provisions demo users and sample tasks. User creation is the
//! out-of-scope provisioning step for the API: there is no registration
//! endpoint, so this is how accounts come to exist.
//!
//! Existing emails are left untouched, so the binary can be re-run safely
//! for users (sample tasks are only seeded when the admin has none).
//!
//! ## Usage
//!
//! ```bash
//! JWT_SECRET=... cargo run -p tasktrack-api --bin seed
//! ```

use chrono::NaiveDate;
use tasktrack_api::config::Config;
use tasktrack_shared::auth::password::hash_password;
use tasktrack_shared::db::{migrations::run_migrations, pool};
use tasktrack_shared::models::task::{TaskPriority, TaskStatus};
use tasktrack_shared::models::user::{CreateUser, User};
use tasktrack_shared::tasks::{self, CreateTaskInput};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "seed=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    let db = pool::create_pool(pool::DatabaseConfig {
        url: config.database.url.clone(),
        max_connections: config.database.max_connections,
        ..Default::default()
    })
    .await?;

    run_migrations(&db).await?;

    let demo_users = [
        ("admin@taskmanager.com", "Admin1234!", "Admin User"),
        ("juan@taskmanager.com", "Juan1234!", "Juan Perez"),
        ("Maria@taskmanager.com", "Maria1234!", "Maria Martinez"),
    ];

    let mut admin_id = None;
    for (email, password, name) in demo_users {
        match User::find_by_email(&db, email).await? {
            Some(existing) => {
                tracing::info!(email, "User already exists, skipping");
                admin_id.get_or_insert(existing.id);
            }
            None => {
                let user = User::create(
                    &db,
                    CreateUser {
                        email: email.to_string(),
                        name: name.to_string(),
                        password_hash: hash_password(password)?,
                    },
                )
                .await?;
                tracing::info!(email, user_id = user.id, "Created user");
                admin_id.get_or_insert(user.id);
            }
        }
    }

    // Sample tasks for the first (admin) user, only on a fresh database
    let admin_id = admin_id.expect("demo user list is non-empty");
    if tasks::list(&db, admin_id, None).await?.is_empty() {
        let samples = [
            CreateTaskInput {
                title: "Set up CI/CD pipeline".to_string(),
                description: Some("Configure GitHub Actions for automatic deploys".to_string()),
                status: Some(TaskStatus::InProgress),
                priority: Some(TaskPriority::High),
                due_date: NaiveDate::from_ymd_opt(2025, 3, 1),
            },
            CreateTaskInput {
                title: "Write unit tests".to_string(),
                description: Some("Cover task update and edit flows".to_string()),
                status: Some(TaskStatus::Pending),
                priority: Some(TaskPriority::Medium),
                due_date: NaiveDate::from_ymd_opt(2025, 3, 15),
            },
            CreateTaskInput {
                title: "Update documentation".to_string(),
                description: Some("Improve the README with setup steps".to_string()),
                status: Some(TaskStatus::Completed),
                priority: Some(TaskPriority::Low),
                due_date: None,
            },
        ];

        for input in samples {
            let task = tasks::create(&db, admin_id, input).await?;
            tracing::info!(task_id = task.id, title = %task.title, "Created sample task");
        }
    } else {
        tracing::info!("Admin user already has tasks, skipping samples");
    }

    tracing::info!("Seed completed");
    Ok(())
}
