// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Azefine Worker

//! Member dashboard endpoints.
//!
//! There is no order pipeline behind the site, so the activity figures are
//! the fixed demo values the dashboard page has always shown.

use axum::Json;
use serde::Serialize;
use utoipa::ToSchema;

use crate::auth::Auth;

/// Member activity counters.
#[derive(Debug, Serialize, ToSchema)]
pub struct DashboardStats {
    /// Requests currently in progress
    pub active_requests: u32,
    /// Requests waiting on confirmation
    pub awaiting_confirmation: u32,
    /// Completed engagements
    pub completed: u32,
}

/// Member dashboard summary.
#[derive(Debug, Serialize, ToSchema)]
pub struct DashboardSummary {
    /// Display name for the greeting
    pub name: String,
    pub stats: DashboardStats,
    /// Recent activity lines, newest first
    pub recent_activity: Vec<String>,
}

/// The signed-in member's dashboard summary.
#[utoipa::path(
    get,
    path = "/v1/dashboard/summary",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Dashboard summary", body = DashboardSummary),
        (status = 401, description = "No session"),
    )
)]
pub async fn summary(Auth(user): Auth) -> Json<DashboardSummary> {
    Json(DashboardSummary {
        name: user.name,
        stats: DashboardStats {
            active_requests: 2,
            awaiting_confirmation: 1,
            completed: 5,
        },
        recent_activity: vec![
            "Permintaan konsultasi Anda sedang diproses.".to_string(),
            "Dokumen penawaran dikirimkan via email.".to_string(),
            "Jadwal meeting dikonfirmasi oleh tim Azefine.".to_string(),
        ],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::claims::SessionClaims;
    use crate::auth::AuthenticatedUser;

    #[tokio::test]
    async fn summary_greets_the_member() {
        let user = AuthenticatedUser::from_claims(SessionClaims {
            sub: "user-001".to_string(),
            name: "Budi Santoso".to_string(),
            email: "user@example.com".to_string(),
            role: "user".to_string(),
            phone: None,
            iat: 0,
            exp: 0,
            iss: "azefine-server".to_string(),
        });

        let Json(summary) = summary(Auth(user)).await;
        assert_eq!(summary.name, "Budi Santoso");
        assert_eq!(summary.stats.active_requests, 2);
        assert_eq!(summary.recent_activity.len(), 3);
    }
}
