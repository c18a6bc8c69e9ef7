/// Browser labeling page
///
/// ```text
/// GET /ui?user_id=1&project_id=1
/// ```
///
/// The page reads `user_id` and `project_id` from its own query string and
/// talks to `/items/next` and `/labels/add`. Keys 1, 2 and 3 submit
/// positive, neutral and negative.

use axum::response::Html;

const PAGE: &str = include_str!("../../static/ui.html");

pub async fn ui() -> Html<&'static str> {
    Html(PAGE)
}
