//! Full-calendar endpoints: month-grouped, categorized events.

use axum::{Json, Router, extract::State, routing::get};

use feedcal_core::{Category, MonthBucket, calendar_months};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/calendar", get(list_months))
        .route("/categories", get(list_categories))
}

/// GET /calendar - Every upcoming event, grouped by month
async fn list_months(State(state): State<AppState>) -> Json<Vec<MonthBucket>> {
    Json(calendar_months(&state.feed, state.clock.as_ref()).await)
}

/// GET /categories - Category labels in rule priority order
async fn list_categories() -> Json<Vec<&'static str>> {
    Json(Category::ALL.iter().map(Category::label).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::test_support::{get_json, spawn_upstream, state};
    use axum::http::StatusCode;

    #[tokio::test]
    async fn test_months_are_grouped_and_categorized() {
        let base = spawn_upstream().await;
        let app = router().with_state(state(&format!("{base}/feed.ics")));

        let (status, body) = get_json(app, "/calendar").await;
        assert_eq!(status, StatusCode::OK);

        let labels: Vec<&str> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|m| m["label"].as_str().unwrap())
            .collect();
        assert_eq!(labels, vec!["January 2025", "February 2025", "January 2026"]);

        let january: Vec<&str> = body[0]["events"]
            .as_array()
            .unwrap()
            .iter()
            .map(|e| e["category"].as_str().unwrap())
            .collect();
        assert_eq!(january, vec!["Parents", "General", "Exams", "Sixth Form"]);

        assert_eq!(body[1]["events"][0]["title"], "INSET Day");
        assert_eq!(body[1]["events"][0]["allDay"], true);
        assert_eq!(body[1]["events"][0]["category"], "Closure");
    }

    #[tokio::test]
    async fn test_upstream_failure_is_empty_calendar() {
        let base = spawn_upstream().await;
        let app = router().with_state(state(&format!("{base}/broken")));

        let (status, body) = get_json(app, "/calendar").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, serde_json::json!([]));
    }

    #[tokio::test]
    async fn test_categories_in_priority_order() {
        let base = spawn_upstream().await;
        let app = router().with_state(state(&format!("{base}/feed.ics")));

        let (_, body) = get_json(app, "/categories").await;
        assert_eq!(
            body,
            serde_json::json!(["Parents", "Closure", "Exams", "Trips", "Sixth Form", "General"])
        );
    }
}
