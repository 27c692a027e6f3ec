use super::*;
use axum::{body, body::Body, http::Request};
use tower::ServiceExt;

const AGENDA: &str = "\
WEEKDAY,START_STR,END_STR,SESSION,FULL_NAME,TYPE,ROOM,TITLE,ABSTRACT
Monday,08:30,09:20,Plenary I,Fan Chung,Plenary,Auditorium,Spectral graph theory,Eigenvalues <b>and</b> graphs.
Monday,10:00,10:25,CT-1,Jane Smith,CT,Room 205,Bounds on the numerical radius,
Tuesday,09:30,09:55,MS6-1,Serkan Gugercin,MS6,Room 103,Data-driven model reduction,Loewner
";

fn test_app(favicon: Option<&'static [u8]>) -> Router {
    let agenda = Agenda::from_reader(AGENDA.as_bytes()).expect("agenda");
    build_router(Arc::new(AppState {
        api: ApiContext::new(agenda),
        page: PageSettings {
            title: "Speech Information".into(),
            heading: "Talk Information".into(),
        },
        favicon: favicon.map(Bytes::from_static),
    }))
}

async fn get_body(app: Router, uri: &str) -> (StatusCode, String) {
    let request = Request::get(uri).body(Body::empty()).expect("request");
    let response = app.oneshot(request).await.expect("response");
    let status = response.status();
    let bytes = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    (status, String::from_utf8(bytes.to_vec()).expect("utf8"))
}

#[tokio::test]
async fn healthz_reports_ok() {
    let (status, body) = get_body(test_app(None), "/healthz").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "ok");
}

#[tokio::test]
async fn index_renders_first_weekday_with_overview() {
    let (status, body) = get_body(test_app(None), "/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("<title>Speech Information</title>"));
    assert!(body.contains("<h1>Talk Information</h1>"));
    assert!(body.contains("<div id='schedule-overview'></div>"));
    assert!(body.contains(r##"<a href="#0">Spectral graph theory</a>"##));
    assert!(body.contains("<div id='1' class='anchor'></div>"));
    assert!(!body.contains("Data-driven model reduction"));
    assert!(body.contains("Contributed talks"));
}

#[tokio::test]
async fn index_never_injects_abstract_html() {
    let (_, body) = get_body(test_app(None), "/").await;
    assert!(body.contains("&lt;b&gt;and&lt;/b&gt;"));
    assert!(!body.contains("<b>and</b>"));
}

#[tokio::test]
async fn index_name_mode_without_query_prompts() {
    let (status, body) = get_body(test_app(None), "/?mode=name&form=name").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Please enter a name to search."));
    assert!(!body.contains("Detailed Information"));
}

#[tokio::test]
async fn index_rejects_unknown_weekday() {
    let (status, body) = get_body(test_app(None), "/?weekday=Funday").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("notice error"));
    assert!(body.contains("Funday"));
}

#[tokio::test]
async fn view_api_returns_json_view() {
    let (status, body) =
        get_body(test_app(None), "/api/view?mode=name&name=SMITH&form=name").await;
    assert_eq!(status, StatusCode::OK);
    let view: serde_json::Value = serde_json::from_str(&body).expect("json");
    assert_eq!(view["mode"], "name");
    assert_eq!(view["status"]["kind"], "results");
    assert_eq!(view["status"]["count"], 1);
    assert!(view["overview"].is_null());
    assert_eq!(view["details"][0]["presenter"], "Jane Smith");
}

#[tokio::test]
async fn view_api_maps_validation_to_bad_request() {
    let (status, body) = get_body(test_app(None), "/api/view?mode=type&talk_type=Workshop").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let error: serde_json::Value = serde_json::from_str(&body).expect("json");
    assert_eq!(error["code"], "validation");
}

#[tokio::test]
async fn options_api_lists_days_and_types() {
    let (status, body) = get_body(test_app(None), "/api/options").await;
    assert_eq!(status, StatusCode::OK);
    let options: serde_json::Value = serde_json::from_str(&body).expect("json");
    assert_eq!(options["weekdays"][0]["weekday"], "Monday");
    assert_eq!(options["weekdays"][0]["start_times"][1], "10:00");
    assert_eq!(options["talk_types"][0], "Plenary");
}

#[tokio::test]
async fn talk_api_finds_by_anchor_and_reports_missing() {
    let app = test_app(None);
    let (status, body) = get_body(app.clone(), "/api/talks/2").await;
    assert_eq!(status, StatusCode::OK);
    let detail: serde_json::Value = serde_json::from_str(&body).expect("json");
    assert_eq!(detail["title"], "Data-driven model reduction");

    let (status, body) = get_body(app, "/api/talks/99").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let error: serde_json::Value = serde_json::from_str(&body).expect("json");
    assert_eq!(error["code"], "not_found");
}

#[tokio::test]
async fn favicon_is_served_when_configured() {
    let (status, _) = get_body(test_app(None), "/favicon.ico").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = get_body(test_app(Some(b"icon")), "/favicon.ico").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "icon");
}
