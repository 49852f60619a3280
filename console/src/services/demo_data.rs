//! Seed content for the client-side catalogs.
//!
//! Projects and contact messages have no backend endpoint, so the binary
//! starts them from this fixed set.

use crate::models::contact::{ContactMessage, MessageStatus};
use crate::models::project::{DEFAULT_PROJECT_IMAGE, Project, ProjectStatus};
use chrono::{NaiveDate, TimeZone, Utc};

fn project(
    id: &str,
    title: &str,
    description: &str,
    tech: &[&str],
    status: ProjectStatus,
    created_at: (i32, u32, u32),
) -> Project {
    let (y, m, d) = created_at;
    Project {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        tech_stack: tech.iter().map(|t| t.to_string()).collect(),
        github_url: format!("https://github.com/techstartup/{}", id),
        live_url: String::new(),
        status,
        image: DEFAULT_PROJECT_IMAGE.to_string(),
        created_at: NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default(),
    }
}

pub fn demo_projects() -> Vec<Project> {
    vec![
        project(
            "talent-hub",
            "Talent Hub",
            "Applicant tracking portal for the hiring team.",
            &["React", "TypeScript", "PostgreSQL"],
            ProjectStatus::Active,
            (2024, 11, 4),
        ),
        project(
            "fleet-pulse",
            "Fleet Pulse",
            "Telemetry dashboard for delivery vehicles.",
            &["Rust", "Tokio", "Grafana"],
            ProjectStatus::InProgress,
            (2024, 9, 18),
        ),
        project(
            "ledger-lite",
            "Ledger Lite",
            "Bookkeeping app for freelancers.",
            &["Vue", "Node.js"],
            ProjectStatus::Completed,
            (2024, 6, 2),
        ),
        project(
            "open-menu",
            "Open Menu",
            "QR ordering for small restaurants.",
            &["Flutter", "Firebase"],
            ProjectStatus::Archived,
            (2023, 12, 10),
        ),
    ]
}

fn message(
    id: &str,
    name: &str,
    email: &str,
    subject: &str,
    body: &str,
    status: MessageStatus,
    received: (i32, u32, u32),
) -> ContactMessage {
    let (y, m, d) = received;
    ContactMessage {
        id: id.to_string(),
        name: name.to_string(),
        email: email.to_string(),
        subject: subject.to_string(),
        message: body.to_string(),
        status,
        created_at: Utc
            .with_ymd_and_hms(y, m, d, 9, 30, 0)
            .single()
            .unwrap_or_default(),
    }
}

pub fn demo_messages() -> Vec<ContactMessage> {
    vec![
        message(
            "msg-1",
            "Priya Natarajan",
            "priya@northwind.io",
            "Partnership inquiry",
            "We would like to discuss a joint pilot next quarter.",
            MessageStatus::Unread,
            (2025, 1, 14),
        ),
        message(
            "msg-2",
            "Tom Becker",
            "tom.becker@mail.com",
            "Question about the backend role",
            "Is the senior backend position open to remote candidates?",
            MessageStatus::Unread,
            (2025, 1, 12),
        ),
        message(
            "msg-3",
            "Lena Ortiz",
            "lena@brightpixel.co",
            "Invoice #2041",
            "Attached is the corrected invoice for December.",
            MessageStatus::Read,
            (2025, 1, 8),
        ),
    ]
}
