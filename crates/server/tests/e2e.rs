use std::net::SocketAddr;

use axum::Router;
use configs::AppConfig;
use migration::MigratorTrait;
use reqwest::StatusCode as HttpStatusCode;
use sea_orm::DatabaseConnection;
use serde_json::json;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use uuid::Uuid;

use server::{routes, startup};
use service::auth::TokenService;

fn cors() -> CorsLayer { CorsLayer::very_permissive() }

struct TestApp {
    base_url: String,
    db: DatabaseConnection,
    tokens: TokenService,
}

async fn start_server() -> anyhow::Result<TestApp> {
    // Use DATABASE_URL from environment; if not present, skip tests gracefully
    if std::env::var("DATABASE_URL").is_err() {
        eprintln!("DATABASE_URL missing; skip e2e tests.");
        return Err(anyhow::anyhow!("missing DATABASE_URL"));
    }

    // Connect DB and run migrations
    let db = models::db::connect().await?;
    migration::Migrator::up(&db, None).await?;

    let mut cfg = AppConfig::default();
    cfg.auth.jwt_secret = "test-secret".into();
    let state = startup::build_state(db.clone(), &cfg);

    let app: Router = routes::build_router(state, cors(), "/api/v1");
    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    let base_url = format!("http://{}:{}/api/v1", addr.ip(), addr.port());

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await { eprintln!("server error: {}", e); }
    });

    let tokens = TokenService::new("test-secret", cfg.auth.token_ttl_minutes);
    Ok(TestApp { base_url, db, tokens })
}

#[tokio::test]
async fn e2e_poll_lifecycle_with_ownership() -> anyhow::Result<()> {
    if std::env::var("SKIP_DB_TESTS").is_ok() { return Ok(()); }
    let app = match start_server().await {
        Ok(a) => a,
        Err(_) => return Ok(()),
    };
    let c = reqwest::Client::new();

    let owner = models::user::create(&app.db, &format!("owner_{}@example.com", Uuid::new_v4()), None, false).await?;
    let other = models::user::create(&app.db, &format!("other_{}@example.com", Uuid::new_v4()), None, false).await?;
    let root = models::user::create(&app.db, &format!("root_{}@example.com", Uuid::new_v4()), None, true).await?;
    let owner_tok = app.tokens.issue(owner.id)?;
    let other_tok = app.tokens.issue(other.id)?;
    let root_tok = app.tokens.issue(root.id)?;

    // Create
    let res = c.post(format!("{}/polls/", app.base_url))
        .bearer_auth(&owner_tok)
        .json(&json!({"title": "Foo", "description": "Fighters"}))
        .send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let created = res.json::<serde_json::Value>().await?;
    assert_eq!(created["owner_id"], json!(owner.id));
    let url = format!("{}/polls/{}", app.base_url, created["id"]);

    // Foreign user cannot read
    let res = c.get(&url).bearer_auth(&other_tok).send().await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);

    // Owner's list only shows own polls
    let res = c.get(format!("{}/polls/?limit=1", app.base_url)).bearer_auth(&owner_tok).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let page = res.json::<serde_json::Value>().await?;
    assert_eq!(page["count"], 1);

    // Superuser partial update keeps owner
    let res = c.put(&url).bearer_auth(&root_tok).json(&json!({"title": "Bar"})).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let updated = res.json::<serde_json::Value>().await?;
    assert_eq!(updated["title"], "Bar");
    assert_eq!(updated["description"], "Fighters");
    assert_eq!(updated["owner_id"], json!(owner.id));

    // Owner deletes
    let res = c.delete(&url).bearer_auth(&owner_tok).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let res = c.get(&url).bearer_auth(&owner_tok).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);

    for id in [owner.id, other.id, root.id] {
        models::user::hard_delete(&app.db, id).await?;
    }
    Ok(())
}

#[tokio::test]
async fn e2e_protected_without_token_denied() -> anyhow::Result<()> {
    if std::env::var("SKIP_DB_TESTS").is_ok() { return Ok(()); }
    let app = match start_server().await {
        Ok(a) => a,
        Err(_) => return Ok(()),
    };
    let res = reqwest::Client::new().get(format!("{}/polls/", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::FORBIDDEN);
    Ok(())
}
