use axum::{
	body::{self, Body},
	http::{Request, StatusCode},
};
use tower::util::ServiceExt;

use bone_api::{routes, state::AppState};
use bone_config::{Config, Postgres, Search, Service, Storage};
use bone_testkit::TestDatabase;

fn test_config(dsn: String) -> Config {
	Config {
		service: Service {
			http_bind: "127.0.0.1:0".to_string(),
			log_level: "info".to_string(),
		},
		storage: Storage { postgres: Postgres { dsn, pool_max_conns: 1 } },
		search: Search { result_limit: 10 },
	}
}

async fn test_env() -> Option<TestDatabase> {
	let base_dsn = match bone_testkit::env_dsn() {
		Some(value) => value,
		None => {
			eprintln!("Skipping HTTP tests; set BONE_PG_DSN to run this test.");

			return None;
		},
	};
	let test_db = TestDatabase::new(&base_dsn).await.expect("Failed to create test database.");

	Some(test_db)
}

#[tokio::test]
#[ignore = "Requires external Postgres. Set BONE_PG_DSN to run."]
async fn health_ok() {
	let Some(test_db) = test_env().await else {
		return;
	};
	let config = test_config(test_db.dsn().to_string());
	let state = AppState::new(config).await.expect("Failed to initialize app state.");
	let app = routes::router(state);
	let response = app
		.oneshot(
			Request::builder()
				.uri("/health")
				.body(Body::empty())
				.expect("Failed to build request."),
		)
		.await
		.expect("Failed to call /health.");

	assert_eq!(response.status(), StatusCode::OK);

	test_db.cleanup().await.expect("Failed to cleanup test database.");
}

#[tokio::test]
#[ignore = "Requires external Postgres. Set BONE_PG_DSN to run."]
async fn blank_terms_are_rejected() {
	let Some(test_db) = test_env().await else {
		return;
	};
	let config = test_config(test_db.dsn().to_string());
	let state = AppState::new(config).await.expect("Failed to initialize app state.");
	let app = routes::router(state);
	let response = app
		.oneshot(
			Request::builder()
				.uri("/search?terms=%20")
				.body(Body::empty())
				.expect("Failed to build request."),
		)
		.await
		.expect("Failed to call /search.");

	assert_eq!(response.status(), StatusCode::BAD_REQUEST);

	let bytes = body::to_bytes(response.into_body(), usize::MAX)
		.await
		.expect("Failed to read response body.");
	let json: serde_json::Value = serde_json::from_slice(&bytes).expect("Failed to parse response.");

	assert_eq!(json["error_code"], "invalid_request");

	test_db.cleanup().await.expect("Failed to cleanup test database.");
}

#[tokio::test]
#[ignore = "Requires external Postgres. Set BONE_PG_DSN to run."]
async fn unindexed_terms_return_not_found() {
	let Some(test_db) = test_env().await else {
		return;
	};
	let config = test_config(test_db.dsn().to_string());
	let state = AppState::new(config).await.expect("Failed to initialize app state.");
	let app = routes::router(state);
	let response = app
		.oneshot(
			Request::builder()
				.uri("/search?terms=nonexistent")
				.body(Body::empty())
				.expect("Failed to build request."),
		)
		.await
		.expect("Failed to call /search.");

	assert_eq!(response.status(), StatusCode::NOT_FOUND);

	test_db.cleanup().await.expect("Failed to cleanup test database.");
}

#[tokio::test]
#[ignore = "Requires external Postgres. Set BONE_PG_DSN to run."]
async fn search_returns_ranked_records() {
	let Some(test_db) = test_env().await else {
		return;
	};
	let config = test_config(test_db.dsn().to_string());
	let state = AppState::new(config).await.expect("Failed to initialize app state.");
	let pool = sqlx::postgres::PgPool::connect(test_db.dsn())
		.await
		.expect("Failed to connect for seeding.");

	sqlx::query("INSERT INTO domain (id, name, https) VALUES (1, 'example.org', TRUE)")
		.execute(&pool)
		.await
		.expect("Failed to seed domain.");
	sqlx::query(
		"\
INSERT INTO page (id, domain_id, path, title)
VALUES (5, 1, '/cats', 'All about cats'), (9, 1, '/dogs', 'All about dogs')",
	)
	.execute(&pool)
	.await
	.expect("Failed to seed pages.");
	sqlx::query("INSERT INTO word (id, word) VALUES (1, 'cat'), (2, 'dog')")
		.execute(&pool)
		.await
		.expect("Failed to seed words.");
	sqlx::query(
		"\
INSERT INTO word_relevance (word_id, page_id, score)
VALUES (1, 5, 3), (2, 5, 4), (1, 9, 10)",
	)
	.execute(&pool)
	.await
	.expect("Failed to seed relevance.");

	let app = routes::router(state);
	let response = app
		.oneshot(
			Request::builder()
				.uri("/search?terms=cat%20dog")
				.body(Body::empty())
				.expect("Failed to build request."),
		)
		.await
		.expect("Failed to call /search.");

	assert_eq!(response.status(), StatusCode::OK);

	let bytes = body::to_bytes(response.into_body(), usize::MAX)
		.await
		.expect("Failed to read response body.");
	let json: serde_json::Value = serde_json::from_slice(&bytes).expect("Failed to parse response.");
	let results = json["results"].as_array().expect("Results must be an array.");

	assert_eq!(results.len(), 2);
	assert_eq!(results[0]["title"], "All about dogs");
	assert_eq!(results[0]["category"], "?");
	assert_eq!(results[1]["title"], "All about cats");

	test_db.cleanup().await.expect("Failed to cleanup test database.");
}
