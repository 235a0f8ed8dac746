use axum::{
    body::Body,
    extract::{RawQuery, State},
    http::header,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use futures::stream::{self, StreamExt};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{debug, error};

use crate::services::{AppError, FoodTruckSource};
use crate::views::{Renderer, ResultsView, SearchParams, ShellView};

#[derive(Clone)]
pub struct AppState {
    pub renderer: Arc<Renderer>,
    pub source: Arc<dyn FoodTruckSource>,
}

// Streams the shell first so the skeleton shows while the fetch is pending,
// then the results (or the error fragment) once it resolves.
pub async fn home(
    State(state): State<AppState>,
    RawQuery(raw): RawQuery,
) -> Result<Response, AppError> {
    let params = SearchParams::parse(raw.as_deref());
    let shell = state.renderer.shell(&ShellView::new(&params))?;
    let query = params.backend_query();
    debug!(?query, "Rendering food truck list");

    let results = async move {
        match state.source.fetch(&query).await {
            Ok(page) => or_failure(
                &state.renderer,
                state.renderer.results(&ResultsView::new(&page, &params)),
            ),
            Err(e) => {
                error!(error = %e, "Failed to load food trucks");
                state.renderer.failure()
            }
        }
    };

    let body = stream::once(async move { Ok::<_, common::Error>(shell) })
        .chain(stream::once(results));

    Ok((
        [(header::CONTENT_TYPE, "text/html; charset=utf-8")],
        Body::from_stream(body),
    )
        .into_response())
}

/// The shell is already on the wire, so a results render error still has to
/// end the document: the error fragment takes its place.
fn or_failure(renderer: &Renderer, rendered: common::Result<String>) -> common::Result<String> {
    rendered.or_else(|e| {
        error!(error = %e, "Failed to render food truck list");
        renderer.failure()
    })
}

pub async fn health() -> &'static str {
    "ok"
}

pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::views::fixtures::sample_truck;
    use async_trait::async_trait;
    use axum::body::to_bytes;
    use axum::http::{Request, StatusCode};
    use common::models::{FoodTruck, FoodTruckPage, FoodTruckQuery};
    use common::{Error, Result};
    use std::sync::Mutex;
    use tower::ServiceExt;

    struct StubSource {
        page: Option<FoodTruckPage>,
        seen: Mutex<Vec<FoodTruckQuery>>,
    }

    impl StubSource {
        fn returning(page: FoodTruckPage) -> Arc<Self> {
            Arc::new(Self {
                page: Some(page),
                seen: Mutex::new(Vec::new()),
            })
        }

        fn failing() -> Arc<Self> {
            Arc::new(Self {
                page: None,
                seen: Mutex::new(Vec::new()),
            })
        }

        fn seen(&self) -> Vec<FoodTruckQuery> {
            self.seen.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl FoodTruckSource for StubSource {
        async fn fetch(&self, query: &FoodTruckQuery) -> Result<FoodTruckPage> {
            self.seen.lock().unwrap().push(query.clone());
            self.page.clone().ok_or_else(|| Error::Upstream {
                status: 503,
                body: "catalog down".into(),
            })
        }
    }

    fn app(source: Arc<StubSource>) -> Router {
        routes(AppState {
            renderer: Arc::new(Renderer::new().unwrap()),
            source,
        })
    }

    async fn get_page(source: Arc<StubSource>, uri: &str) -> (StatusCode, String) {
        let response = app(source)
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    fn page_of(total: u64, trucks: Vec<FoodTruck>) -> FoodTruckPage {
        FoodTruckPage {
            food_trucks: trucks,
            total,
        }
    }

    #[tokio::test]
    async fn forwards_filters_and_page() {
        let source = StubSource::returning(page_of(50, vec![sample_truck()]));
        let (status, html) =
            get_page(Arc::clone(&source), "/?query=taco&status=approved&page=2").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            source.seen(),
            vec![FoodTruckQuery {
                query: Some("taco".into()),
                status: Some("approved".into()),
                page: Some(2),
            }]
        );
        assert!(html.contains("aria-current=\"page\">2</a>"));
    }

    #[tokio::test]
    async fn noop_filters_are_not_forwarded() {
        let source = StubSource::returning(page_of(1, vec![sample_truck()]));
        get_page(Arc::clone(&source), "/?query=&status=all").await;
        assert_eq!(source.seen(), vec![FoodTruckQuery::default()]);
    }

    #[tokio::test]
    async fn shell_streams_before_results() {
        let source = StubSource::returning(page_of(1, vec![sample_truck()]));
        let (_, html) = get_page(source, "/").await;

        let skeleton = html.find("id=\"food-truck-list-skeleton\"").unwrap();
        let list = html.find("<details data-slot=\"accordion-item\"").unwrap();
        assert!(skeleton < list);
        assert!(html.contains("Test Food Applicant"));
        assert!(html.trim_end().ends_with("</html>"));
    }

    #[tokio::test]
    async fn page_is_served_as_html() {
        let response = app(StubSource::returning(page_of(0, Vec::new())))
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "text/html; charset=utf-8"
        );
    }

    #[tokio::test]
    async fn no_results_render_empty_state() {
        let (status, html) = get_page(StubSource::returning(page_of(0, Vec::new())), "/?query=zzz").await;
        assert_eq!(status, StatusCode::OK);
        assert!(html.contains("No food trucks found"));
        assert!(html.contains("value=\"zzz\""));
    }

    #[tokio::test]
    async fn fetch_failure_renders_error_fragment() {
        let source = StubSource::failing();
        let (status, html) = get_page(Arc::clone(&source), "/?status=expired").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(source.seen().len(), 1);
        assert!(html.contains("SF Food Trucks Finder"));
        assert!(html.contains("Something went wrong"));
        assert!(html.contains("#food-truck-list-skeleton{display:none}"));
        assert!(!html.contains("<details data-slot=\"accordion-item\""));
    }

    #[test]
    fn render_error_falls_back_to_error_fragment() {
        let renderer = Renderer::new().unwrap();
        let html = or_failure(&renderer, Err(Error::Other("broken template".into()))).unwrap();

        assert!(html.contains("Something went wrong"));
        assert!(html.contains("#food-truck-list-skeleton{display:none}"));
        assert!(html.trim_end().ends_with("</html>"));
    }

    #[test]
    fn rendered_results_pass_through() {
        let renderer = Renderer::new().unwrap();
        let html = or_failure(&renderer, Ok("<p>results</p>".to_string())).unwrap();
        assert_eq!(html, "<p>results</p>");
    }

    #[tokio::test]
    async fn health_is_ok() {
        let (status, body) = get_page(StubSource::failing(), "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "ok");
    }
}
