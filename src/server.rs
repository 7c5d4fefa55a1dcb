//! HTTP surface for browsing the catalog.
//!
//! The page lists one variant; the browser script fetches each icon's
//! markup only once the icon scrolls into view, which is what drives the
//! content cache. Every request names its variant and query, and each
//! variant has its own session, so clients never see each other's view.

use crate::browser::{Browser, Export, Library};
use crate::cache::EntryState;
use crate::codegen::ExportFormat;
use crate::error::{CatalogError, ConfigError};
use crate::naming::{sanitize_identifier, title_case};
use crate::preferences::{PreferenceStore, Theme};
use crate::variant::{Variant, VARIANTS};
use axum::extract::{Path, Query, State};
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use handlebars::Handlebars;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

const CATALOG_TEMPLATE: &str = include_str!("../templates/catalog.hbs");

pub struct AppState {
    sessions: HashMap<&'static str, Mutex<Browser>>,
    default_variant: &'static Variant,
    preferences: Arc<dyn PreferenceStore>,
    pages: Handlebars<'static>,
}

impl AppState {
    pub fn new(
        library: &Library,
        default_variant: &'static Variant,
        preferences: Arc<dyn PreferenceStore>,
    ) -> Result<Self, handlebars::TemplateError> {
        let mut pages = Handlebars::new();
        pages.register_template_string("catalog", CATALOG_TEMPLATE)?;
        let sessions = VARIANTS
            .iter()
            .map(|variant| (variant.slug, Mutex::new(Browser::new(library, variant))))
            .collect();
        Ok(Self {
            sessions,
            default_variant,
            preferences,
            pages,
        })
    }

    fn session(&self, slug: &str) -> Result<&Mutex<Browser>, CatalogError> {
        self.sessions.get(slug).ok_or_else(|| CatalogError::UnknownVariant {
            slug: slug.to_string(),
        })
    }

    /// Page and listing requests fall back like the tabs do: no variant
    /// means the default, an unknown one means `linear`.
    fn view_session(&self, params: &ViewParams) -> Result<&Mutex<Browser>, CatalogError> {
        let variant = params
            .variant
            .as_deref()
            .map_or(self.default_variant, Variant::from_slug);
        self.session(variant.slug)
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(catalog_page))
        .route("/api/icons", get(list_icons))
        .route("/api/icons/:variant/:category/:name", get(icon_markup))
        .route("/api/icons/:variant/:category/:name/component", get(icon_component))
        .route("/api/theme", get(get_theme).put(put_theme))
        .with_state(state)
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Preferences(#[from] ConfigError),
    #[error("cannot render page: {0}")]
    Render(#[from] handlebars::RenderError),
    #[error("load task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::Catalog(CatalogError::UnknownIcon { .. } | CatalogError::UnknownVariant { .. }) => {
                StatusCode::NOT_FOUND
            }
            ApiError::Catalog(CatalogError::Pending { .. }) => StatusCode::ACCEPTED,
            ApiError::Catalog(CatalogError::Load(_)) => StatusCode::UNPROCESSABLE_ENTITY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        (status, Json(serde_json::json!({ "error": self.to_string() }))).into_response()
    }
}

#[derive(Debug, Default, Deserialize)]
struct ViewParams {
    variant: Option<String>,
    q: Option<String>,
}

#[derive(Debug, Serialize)]
struct IconView {
    name: String,
    title: String,
    component: String,
}

#[derive(Debug, Serialize)]
struct CategoryView {
    key: String,
    title: String,
    icons: Vec<IconView>,
}

#[derive(Debug, Serialize)]
struct CatalogView {
    variant: &'static Variant,
    query: String,
    categories: Vec<CategoryView>,
}

#[derive(Debug, Serialize)]
struct Tab {
    slug: &'static str,
    title: &'static str,
    active: bool,
}

fn catalog_view(browser: &Browser, query: String) -> CatalogView {
    let variant = browser.variant();
    let categories = browser
        .visible(&query)
        .into_iter()
        .map(|(key, names)| CategoryView {
            title: title_case(&key),
            icons: names
                .keys()
                .map(|name| IconView {
                    title: title_case(name),
                    component: format!("{}{}", sanitize_identifier(name), variant.label),
                    name: name.clone(),
                })
                .collect(),
            key,
        })
        .collect();
    CatalogView {
        variant,
        query,
        categories,
    }
}

/// Rendering the page re-mounts the variant's icons, so anything that
/// failed to load before is fetched again.
async fn catalog_page(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ViewParams>,
) -> Result<Html<String>, ApiError> {
    let view = {
        let mut browser = state.view_session(&params)?.lock();
        browser.remount_failed();
        catalog_view(&browser, params.q.unwrap_or_default())
    };
    let tabs: Vec<Tab> = VARIANTS
        .iter()
        .map(|v| Tab {
            slug: v.slug,
            title: v.title(),
            active: v == view.variant,
        })
        .collect();
    let data = serde_json::json!({
        "tabs": tabs,
        "show_headings": view.query.trim().is_empty(),
        "theme": state.preferences.theme(),
        "view": view,
    });
    Ok(Html(state.pages.render("catalog", &data)?))
}

async fn list_icons(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ViewParams>,
) -> Result<Json<CatalogView>, ApiError> {
    let browser = state.view_session(&params)?.lock();
    Ok(Json(catalog_view(&browser, params.q.unwrap_or_default())))
}

/// Load (once) and export an icon. `None` until the entry has settled,
/// including while another request's load is still in flight.
async fn export(
    state: &AppState,
    variant: &str,
    category: &str,
    name: &str,
    format: ExportFormat,
) -> Result<Option<Export>, ApiError> {
    let session = state.session(variant)?;
    let ticket = session.lock().reveal(category, name)?;
    if let Some(ticket) = ticket {
        let (ticket, result) = tokio::task::spawn_blocking(move || {
            let result = ticket.run();
            (ticket, result)
        })
        .await?;
        session.lock().complete(ticket, result);
    }

    let mut browser = session.lock();
    if !matches!(browser.state(category, name), EntryState::Loaded(_) | EntryState::Failed(_)) {
        return Ok(None);
    }
    Ok(Some(browser.export(category, name, format)?))
}

async fn icon_markup(
    State(state): State<Arc<AppState>>,
    Path((variant, category, name)): Path<(String, String, String)>,
) -> Result<Response, ApiError> {
    Ok(match export(&state, &variant, &category, &name, ExportFormat::Markup).await? {
        Some(export) => ([(header::CONTENT_TYPE, "image/svg+xml")], export.payload).into_response(),
        None => StatusCode::ACCEPTED.into_response(),
    })
}

async fn icon_component(
    State(state): State<Arc<AppState>>,
    Path((variant, category, name)): Path<(String, String, String)>,
) -> Result<Response, ApiError> {
    let Some(export) = export(&state, &variant, &category, &name, ExportFormat::Component).await? else {
        return Ok(StatusCode::ACCEPTED.into_response());
    };
    let mut response = ([(header::CONTENT_TYPE, "text/plain; charset=utf-8")], export.payload).into_response();
    if export.shape_mismatch {
        response
            .headers_mut()
            .insert("x-shape-mismatch", HeaderValue::from_static("true"));
    }
    Ok(response)
}

#[derive(Debug, Serialize, Deserialize)]
struct ThemeBody {
    theme: Theme,
}

async fn get_theme(State(state): State<Arc<AppState>>) -> Json<ThemeBody> {
    Json(ThemeBody {
        theme: state.preferences.theme(),
    })
}

async fn put_theme(
    State(state): State<Arc<AppState>>,
    Json(body): Json<ThemeBody>,
) -> Result<Json<ThemeBody>, ApiError> {
    state.preferences.set_theme(body.theme)?;
    Ok(Json(body))
}
