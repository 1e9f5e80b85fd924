use std::sync::Arc;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
};
use chrono::{DateTime, Duration, TimeZone, Utc};
use photocomp_common::{
    common::random_order::RandomOrderTokenFactory,
    competition::{CompetitionStatus, NewCompetition},
    image_entry::{ImageEntry, ImageEntryStatus},
    state::{CompetitionDbTrait, DatabaseTrait, ImageEntryDbTrait, InMemoryStateDb},
};
use serde_json::{Value, json};
use tower::ServiceExt;
use uuid::Uuid;

use crate::server::{AppState, RestConfig, router};

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
}

struct Fixture {
    db: Arc<InMemoryStateDb>,
    open_entries: Vec<Uuid>,
    unmoderated: Uuid,
    closed_entry: Uuid,
}

fn new_competition(title: &str, status: CompetitionStatus) -> NewCompetition {
    NewCompetition {
        title: title.into(),
        description: format!("{title} photos"),
        date_entries_close: now() - Duration::days(1),
        date_votes_close: now() + Duration::days(30),
        initial_status_of_images: ImageEntryStatus::Unmoderated,
        status,
    }
}

fn entry(competition_id: i32, first_name: &str, status: ImageEntryStatus, day: i64) -> ImageEntry {
    ImageEntry {
        image_id: Uuid::new_v4(),
        competition_id,
        first_name: first_name.into(),
        last_name: "Photographer".into(),
        email: format!("{}@example.com", first_name.to_lowercase()),
        description: format!("Shot by {first_name}"),
        status,
        date_submitted: now() - Duration::days(10 - day),
        ip_address: "192.0.2.10".into(),
        image_extension: Some("jpg".into()),
        third_party_opt_in: false,
    }
}

async fn fixture() -> Fixture {
    let db = Arc::new(InMemoryStateDb::new());

    let open = db
        .create_competition(new_competition("Harbours", CompetitionStatus::Voting))
        .await
        .unwrap();
    let closed = db
        .create_competition(new_competition("Forests", CompetitionStatus::Closed))
        .await
        .unwrap();

    let mut open_entries = Vec::new();
    for (day, name) in ["Cleo", "Amir", "Bea"].into_iter().enumerate() {
        let e = entry(open.competition_id, name, ImageEntryStatus::Verified, day as i64);
        open_entries.push(db.create_image_entry(e).await.unwrap().image_id);
    }

    let unmoderated = db
        .create_image_entry(entry(
            open.competition_id,
            "Dara",
            ImageEntryStatus::Unmoderated,
            4,
        ))
        .await
        .unwrap()
        .image_id;
    let closed_entry = db
        .create_image_entry(entry(
            closed.competition_id,
            "Eli",
            ImageEntryStatus::Verified,
            5,
        ))
        .await
        .unwrap()
        .image_id;

    Fixture {
        db,
        open_entries,
        unmoderated,
        closed_entry,
    }
}

fn app(db: Arc<InMemoryStateDb>, config: RestConfig) -> Router {
    let db: Arc<dyn DatabaseTrait> = db;
    let ts = now().timestamp();
    let state = AppState::new(db, config)
        .with_token_factory(RandomOrderTokenFactory::with_clock(move || ts));
    router(state)
}

fn restricted() -> RestConfig {
    RestConfig {
        include_restricted_data: true,
        ..Default::default()
    }
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    send(app, Request::get(uri).body(Body::empty()).unwrap()).await
}

async fn vote(app: Router, image_id: Uuid, ip: &str) -> (StatusCode, Value) {
    let request = Request::post("/v1/votes")
        .header(header::CONTENT_TYPE, "application/json")
        .header("x-forwarded-for", format!("{ip}, 10.0.0.1"))
        .body(Body::from(json!({ "imageId": image_id }).to_string()))
        .unwrap();
    send(app, request).await
}

fn encode(raw: &str) -> String {
    raw.replace('{', "%7B")
        .replace('}', "%7D")
        .replace('"', "%22")
        .replace(':', "%3A")
        .replace(',', "%2C")
}

fn ids(list: &Value) -> Vec<String> {
    list.as_array()
        .unwrap()
        .iter()
        .map(|row| row["imageId"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn test_list_competitions_sorted() {
    let f = fixture().await;
    let (status, body) = get(app(f.db, RestConfig::default()), "/v1/competitions?sort=-id").await;

    assert_eq!(status, StatusCode::OK);
    let ids: Vec<_> = body["data"]["competitions"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["competitionId"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![2, 1]);
    assert_eq!(
        body["pagination"],
        json!({"offset": 0, "returned": 2, "limit": 20, "total": 2})
    );
    assert!(body["data"].get("randomToken").is_none());
}

#[tokio::test]
async fn test_competition_status_filter() {
    let f = fixture().await;
    let (status, body) = get(
        app(f.db, RestConfig::default()),
        "/v1/competitions?statusFilter=STATUS_CLOSED",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["pagination"]["total"], 1);
    assert_eq!(body["data"]["competitions"][0]["title"], "Forests");
}

#[tokio::test]
async fn test_unknown_sort_field_is_bad_request() {
    let f = fixture().await;
    let (status, body) = get(app(f.db, RestConfig::default()), "/v1/imageEntries?sort=bogus").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["StatusCode"], 400);
    assert_eq!(body["DeveloperMessage"], "Sort parameter [bogus] is not known.");
}

#[tokio::test]
async fn test_rand_combined_with_field_is_bad_request() {
    let f = fixture().await;
    let (status, _) = get(
        app(f.db, RestConfig::default()),
        "/v1/imageEntries?sort=rand,firstName",
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_limit_is_validated() {
    let f = fixture().await;
    for uri in [
        "/v1/imageEntries?limit=1001",
        "/v1/imageEntries?limit=-1",
        "/v1/imageEntries?offset=abc",
    ] {
        let (status, _) = get(app(f.db.clone(), RestConfig::default()), uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
    }
}

#[tokio::test]
async fn test_public_listing_only_shows_verified() {
    let f = fixture().await;
    let (status, body) = get(
        app(f.db, RestConfig::default()),
        "/v1/imageEntries?statusFilter=STATUS_UNMODERATED&sort=dateSubmitted",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["pagination"]["total"], 4);

    let rows = &body["data"]["imageEntries"];
    assert!(!ids(rows).contains(&f.unmoderated.to_string()));
    assert!(rows[0].get("firstName").is_none());
    assert!(rows[0].get("email").is_none());
    assert_eq!(rows[0]["imageURL"], rows[0]["imageId"]);
}

#[tokio::test]
async fn test_restricted_listing_honours_filters() {
    let f = fixture().await;
    let (status, body) = get(
        app(f.db, restricted()),
        "/v1/imageEntries?statusFilter=STATUS_VERIFIED&competitionIdFilter=1&sort=firstName",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let names: Vec<_> = body["data"]["imageEntries"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["firstName"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Amir", "Bea", "Cleo"]);
}

#[tokio::test]
async fn test_random_listing_is_repeatable_with_token() {
    let f = fixture().await;
    let (status, first) = get(
        app(f.db.clone(), RestConfig::default()),
        "/v1/imageEntries?sort=rand&limit=2",
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let token = first["data"]["randomToken"].as_str().unwrap().to_string();
    let token_json: Value = serde_json::from_str(&token).unwrap();
    assert_eq!(token_json["numberEntries"], 4);

    let uri = format!(
        "/v1/imageEntries?sort=rand&limit=2&randomToken={}",
        encode(&token)
    );
    let (_, again) = get(app(f.db.clone(), RestConfig::default()), &uri).await;
    assert_eq!(
        ids(&again["data"]["imageEntries"]),
        ids(&first["data"]["imageEntries"])
    );
    assert_eq!(again["data"]["randomToken"], token);

    let uri = format!(
        "/v1/imageEntries?sort=rand&limit=2&offset=2&randomToken={}",
        encode(&token)
    );
    let (_, second) = get(app(f.db, RestConfig::default()), &uri).await;
    let mut all = ids(&first["data"]["imageEntries"]);
    all.extend(ids(&second["data"]["imageEntries"]));
    all.sort();
    all.dedup();
    assert_eq!(all.len(), 4);
}

#[tokio::test]
async fn test_single_entry_visibility() {
    let f = fixture().await;

    let uri = format!("/v1/imageEntries/{}", f.open_entries[0]);
    let (status, body) = get(app(f.db.clone(), RestConfig::default()), &uri).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["imageEntry"]["imageId"], f.open_entries[0].to_string());

    let uri = format!("/v1/imageEntries/{}", f.unmoderated);
    let (status, _) = get(app(f.db.clone(), RestConfig::default()), &uri).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    let (status, body) = get(app(f.db.clone(), restricted()), &uri).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["imageEntry"]["status"], "STATUS_UNMODERATED");

    let uri = format!("/v1/imageEntries/{}", Uuid::new_v4());
    let (status, _) = get(app(f.db.clone(), RestConfig::default()), &uri).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = get(app(f.db, RestConfig::default()), "/v1/imageEntries/nope").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_competition_stats_need_restricted_access() {
    let f = fixture().await;
    let (status, _) = get(
        app(f.db.clone(), RestConfig::default()),
        "/v1/competitions/1/stats",
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = get(app(f.db.clone(), restricted()), "/v1/competitions/1/stats").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["competitionStats"]["imageEntryCount"], 4);
    assert_eq!(body["data"]["competitionStats"]["imageEntryUnmoderatedCount"], 1);

    let (status, _) = get(app(f.db, restricted()), "/v1/competitions/99/stats").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_vote_flow() {
    let f = fixture().await;
    let target = f.open_entries[1];

    let (status, body) = vote(app(f.db.clone(), RestConfig::default()), target, "198.51.100.7").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["imageEntryWithScore"]["score"], 1);
    assert_eq!(
        body["data"]["imageEntryWithScore"]["imageId"],
        target.to_string()
    );

    let (status, body) = vote(app(f.db.clone(), RestConfig::default()), target, "198.51.100.7").await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["ErrorCode"], 121);

    let (status, body) = vote(app(f.db.clone(), RestConfig::default()), target, "198.51.100.8").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["imageEntryWithScore"]["score"], 2);

    let (status, body) = get(
        app(f.db, RestConfig::default()),
        "/v1/imageEntriesWithScore?sort=-score&limit=1",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["imageEntriesWithScore"][0]["imageId"], target.to_string());
    assert_eq!(body["data"]["imageEntriesWithScore"][0]["score"], 2);
}

#[tokio::test]
async fn test_vote_rejected_when_voting_closed() {
    let f = fixture().await;

    let (status, body) = vote(
        app(f.db.clone(), RestConfig::default()),
        f.closed_entry,
        "198.51.100.7",
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["ErrorCode"], 120);
    assert_eq!(body["UserMessage"], "Voting for this competition is not open.");

    let (status, _) = vote(app(f.db, RestConfig::default()), Uuid::new_v4(), "198.51.100.7").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_vote_requires_image_id() {
    let f = fixture().await;
    let request = Request::post("/v1/votes")
        .header(header::CONTENT_TYPE, "application/json")
        .header("x-real-ip", "198.51.100.9")
        .body(Body::from(r#"{"image":"x"}"#))
        .unwrap();

    let (status, body) = send(app(f.db, RestConfig::default()), request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["StatusCode"], 400);
}

#[tokio::test]
async fn test_healthcheck() {
    let f = fixture().await;
    let (status, body) = get(app(f.db, RestConfig::default()), "/v1/healthcheck").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!(["live"]));
}

#[tokio::test]
async fn test_api_version_prefix() {
    let f = fixture().await;
    let config = RestConfig {
        api_version: "v2".into(),
        ..Default::default()
    };

    let response = app(f.db.clone(), config.clone())
        .oneshot(Request::get("/v1/healthcheck").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let (status, _) = get(app(f.db, config), "/v2/competitions/1").await;
    assert_eq!(status, StatusCode::OK);
}
