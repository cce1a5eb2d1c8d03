//! Soil Intelligence
//!
//! Topsoil data for any location, turned into agronomic advice and reports.
//!
//! - `soil/`: data model, SoilGrids units, fallback estimates, USDA texture
//! - `crops/`: ideal crop profiles, ranking and actual-vs-ideal comparison
//! - `recommendations/`: amendment rules and planting calendars
//! - `report/`: report assembly, markdown, SVG chart, PDF export
//! - `services/` (feature `api`): Nominatim + SoilGrids clients, pipeline
//! - `api_server`, `web/` (feature `api`): Axum JSON API and HTMX pages

pub mod config;
pub mod crops;
pub mod error;
pub mod recommendations;
pub mod report;
pub mod soil;

#[cfg(feature = "api")]
pub mod api_server;
#[cfg(feature = "api")]
pub mod services;
#[cfg(feature = "api")]
pub mod web;

// Re-export commonly used types
pub use config::AppConfig;
pub use error::{Result, SoilError};
pub use report::{export_pdf, PdfExport, SoilReport};
pub use soil::{Location, SoilMeasurement, SoilSample, SoilSource};

#[cfg(feature = "api")]
pub use api_server::{create_router, AppState};
#[cfg(feature = "api")]
pub use services::ReportService;
