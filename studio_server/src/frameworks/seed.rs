use std::io::{Error, Result};

use crate::domain::entities::{NewTeacher, NewUser};
use crate::domain::password::hash_password;
use crate::domain::ports::Clock;
use crate::interface_adapters::state::{AppState, SystemClock};

pub const DEMO_ADMIN_EMAIL: &str = "yoga@studio.com";
pub const DEMO_ADMIN_PASSWORD: &str = "test!1234";

const DEMO_TEACHERS: [(&str, &str); 2] = [("Margot", "DELAHAYE"), ("Hélène", "THIERCELIN")];

// Insert the demo admin account and teachers unless they already exist.
pub async fn seed_demo_data(state: &AppState) -> Result<()> {
    let now = SystemClock.now_utc();

    let admin = state
        .users
        .find_by_email(DEMO_ADMIN_EMAIL)
        .await
        .map_err(Error::other)?;
    if admin.is_none() {
        let admin = state
            .users
            .insert(
                NewUser {
                    email: DEMO_ADMIN_EMAIL.to_string(),
                    first_name: "Admin".to_string(),
                    last_name: "Admin".to_string(),
                    password_hash: hash_password(DEMO_ADMIN_PASSWORD),
                    admin: true,
                },
                now,
            )
            .await
            .map_err(Error::other)?;
        tracing::info!(user_id = admin.id, email = DEMO_ADMIN_EMAIL, "seeded demo admin");
    }

    let teachers = state.teachers.find_all().await.map_err(Error::other)?;
    if teachers.is_empty() {
        for (first_name, last_name) in DEMO_TEACHERS {
            state
                .teachers
                .insert(
                    NewTeacher {
                        first_name: first_name.to_string(),
                        last_name: last_name.to_string(),
                    },
                    now,
                )
                .await
                .map_err(Error::other)?;
        }
        tracing::info!(count = DEMO_TEACHERS.len(), "seeded demo teachers");
    }

    Ok(())
}
