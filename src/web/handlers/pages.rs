// Page handlers for HTML rendering with Askama

use askama::Template;
use axum::{
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use axum_htmx::HxRequest;

use crate::api_server::{AppState, ReportQuery};
use crate::error::SoilError;
use crate::report::{markdown, SoilReport};
use crate::soil::Location;
use crate::web::markdown_to_html;

const CHART_SIZE: u32 = 420;

// ============================================================================
// Home Page
// ============================================================================

#[derive(Template)]
#[template(path = "pages/home.html")]
pub struct HomeTemplate {
    pub title: String,
    pub query: String,
    pub notice: Option<String>,
}

pub async fn home_page() -> HomeTemplate {
    HomeTemplate {
        title: "Soil Intelligence Platform".to_string(),
        query: String::new(),
        notice: None,
    }
}

// ============================================================================
// Report Page
// ============================================================================

/// Display-ready report values.
pub struct ReportView {
    pub location_name: String,
    pub primary_crop: String,
    pub is_estimated: bool,
    pub chart_svg: String,
    pub body_html: String,
    pub pdf_href: String,
    pub markdown_href: String,
    pub json_href: String,
}

impl ReportView {
    pub fn new(report: &SoilReport) -> Self {
        let qs = location_query(&report.location).to_query_string();
        Self {
            location_name: report.location.display_name.clone(),
            primary_crop: report.primary_crop.clone(),
            is_estimated: report.is_estimated(),
            chart_svg: report.comparison.to_svg(CHART_SIZE),
            body_html: markdown_to_html(&markdown::render(report)),
            pdf_href: format!("/api/report/pdf?{}", qs),
            markdown_href: format!("/api/report/markdown?{}", qs),
            json_href: format!("/api/report?{}", qs),
        }
    }
}

/// Links use resolved coordinates so downloads skip geocoding.
fn location_query(location: &Location) -> ReportQuery {
    ReportQuery {
        q: None,
        lat: Some(location.latitude),
        lon: Some(location.longitude),
        name: Some(location.display_name.clone()),
    }
}

#[derive(Template)]
#[template(path = "pages/report.html")]
pub struct ReportTemplate {
    pub title: String,
    pub query: String,
    pub view: ReportView,
}

/// HTMX swap target: report body only
#[derive(Template)]
#[template(path = "partials/report_body.html")]
pub struct ReportFragment {
    pub view: ReportView,
}

/// HTMX swap target: notification banner only
#[derive(Template)]
#[template(path = "partials/notice.html")]
pub struct NoticeFragment {
    pub notice: Option<String>,
}

/// User-facing message for a failed lookup.
pub fn notice_for(err: &SoilError) -> String {
    match err {
        SoilError::EmptyQuery => {
            "Location required: please enter a location to search".to_string()
        }
        SoilError::LocationNotFound(_) => {
            "Location not found: please try a different location".to_string()
        }
        SoilError::InvalidCoordinates { .. } => {
            "Invalid coordinates: latitude must be within ±90 and longitude within ±180"
                .to_string()
        }
        _ => "Failed to search location. Please try again.".to_string(),
    }
}

fn search_text(target: &ReportQuery) -> String {
    match (&target.q, target.lat, target.lon) {
        (Some(q), _, _) if !q.trim().is_empty() => q.trim().to_string(),
        (_, Some(lat), Some(lon)) => format!("{}, {}", lat, lon),
        _ => String::new(),
    }
}

pub async fn report_page(
    State(state): State<AppState>,
    HxRequest(is_htmx): HxRequest,
    Query(target): Query<ReportQuery>,
) -> Response {
    match state.report(&target).await {
        Ok(report) => {
            let view = ReportView::new(&report);
            if is_htmx {
                ReportFragment { view }.into_response()
            } else {
                ReportTemplate {
                    title: format!("Soil report: {}", report.location.display_name),
                    query: search_text(&target),
                    view,
                }
                .into_response()
            }
        }
        Err(err) => {
            if err.is_user_error() {
                tracing::info!("Report request rejected: {}", err);
            } else {
                tracing::error!("Report request failed: {}", err);
            }

            let notice = Some(notice_for(&err));
            if is_htmx {
                NoticeFragment { notice }.into_response()
            } else {
                HomeTemplate {
                    title: "Soil Intelligence Platform".to_string(),
                    query: search_text(&target),
                    notice,
                }
                .into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::test_support::sample_report;

    #[test]
    fn test_view_links_use_coordinates() {
        let view = ReportView::new(&sample_report("Nairobi, Kenya"));
        assert_eq!(
            view.pdf_href,
            "/api/report/pdf?lat=-1.2921&lon=36.8219&name=Nairobi%2C%20Kenya"
        );
        assert!(view.chart_svg.starts_with("<svg"));
        assert!(view.body_html.contains("<h2>1. Soil Summary</h2>"));
    }

    #[test]
    fn test_home_renders_notice() {
        let html = HomeTemplate {
            title: "t".to_string(),
            query: "Atlantis".to_string(),
            notice: Some(notice_for(&SoilError::LocationNotFound("Atlantis".into()))),
        }
        .render()
        .unwrap();
        assert!(html.contains("Location not found"));
        assert!(html.contains("value=\"Atlantis\""));
    }

    #[test]
    fn test_fragment_has_no_layout() {
        let html = ReportFragment { view: ReportView::new(&sample_report("Nairobi")) }
            .render()
            .unwrap();
        assert!(!html.contains("<html"));
        assert!(html.contains("Download PDF"));
    }

    #[test]
    fn test_location_name_markup_is_escaped() {
        let html = ReportFragment {
            view: ReportView::new(&sample_report("<img src=x onerror=alert(1)>")),
        }
        .render()
        .unwrap();
        assert!(!html.contains("<img"));
        assert!(html.contains("&lt;img"));
    }

    #[test]
    fn test_search_form_reports_geolocation_failures() {
        let html = HomeTemplate {
            title: "t".to_string(),
            query: String::new(),
            notice: None,
        }
        .render()
        .unwrap();
        assert!(html.contains("Geolocation is not supported by your browser"));
        assert!(html.contains("Unable to retrieve your location"));
    }

    #[test]
    fn test_templates_respond_as_html() {
        let response = HomeTemplate {
            title: "t".to_string(),
            query: String::new(),
            notice: None,
        }
        .into_response();
        assert_eq!(response.status(), axum::http::StatusCode::OK);
        let content_type = response.headers()[axum::http::header::CONTENT_TYPE]
            .to_str()
            .unwrap();
        assert!(content_type.starts_with("text/html"));
    }
}
