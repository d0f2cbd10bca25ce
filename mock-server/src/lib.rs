use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    #[serde(rename = "userId")]
    pub user_id: u64,
    pub id: u64,
    pub title: String,
    pub body: String,
}

/// Read-only post table shared by every handler.
pub type Db = Arc<BTreeMap<u64, Post>>;

/// Ten deterministic posts in the jsonplaceholder shape.
pub fn seed_posts() -> Vec<Post> {
    (1..=10)
        .map(|id| Post {
            user_id: (id - 1) / 5 + 1,
            id,
            title: format!("post {id}"),
            body: format!("body of post {id}"),
        })
        .collect()
}

pub fn app() -> Router {
    app_with(seed_posts())
}

pub fn app_with(posts: Vec<Post>) -> Router {
    let db: Db = Arc::new(posts.into_iter().map(|p| (p.id, p)).collect());
    Router::new()
        .route("/posts", get(list_posts))
        .route("/posts/{id}", get(get_post))
        .with_state(db)
}

/// Router that answers every route with `status`.
pub fn failing_app(status: StatusCode) -> Router {
    let fail = move || async move { (status, "injected failure") };
    Router::new()
        .route("/posts", get(fail.clone()))
        .route("/posts/{id}", get(fail))
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    serve(listener, app()).await
}

pub async fn serve(listener: TcpListener, router: Router) -> Result<(), std::io::Error> {
    axum::serve(listener, router).await
}

async fn list_posts(State(db): State<Db>) -> Json<Vec<Post>> {
    tracing::debug!(count = db.len(), "list posts");
    Json(db.values().cloned().collect())
}

async fn get_post(State(db): State<Db>, Path(id): Path<u64>) -> Result<Json<Post>, StatusCode> {
    tracing::debug!(id, "get post");
    db.get(&id).cloned().map(Json).ok_or(StatusCode::NOT_FOUND)
}
