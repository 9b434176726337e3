// HTML pages for the browser UI
// Static assets under ui/static are served by tower-http's ServeDir (see routes)

use std::path::{Path as FsPath, PathBuf};
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Html,
};
use tracing::{error, warn};

const NOT_FOUND_PAGE: &str = "<h1>404 Not Found</h1>";
const ERROR_PAGE: &str = "<h1>Error loading page</h1>";

/// Root directory holding `index.html` and the `ui/` tree
#[derive(Debug, Clone)]
pub struct UiState {
    pub root: Arc<PathBuf>,
}

impl UiState {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: Arc::new(root.into()),
        }
    }
}

type Page = (StatusCode, Html<String>);

async fn render(path: &FsPath) -> Page {
    match tokio::fs::read_to_string(path).await {
        Ok(content) => (StatusCode::OK, Html(content)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            warn!(path = %path.display(), "Page not found");
            (StatusCode::NOT_FOUND, Html(NOT_FOUND_PAGE.to_string()))
        }
        Err(e) => {
            error!(path = %path.display(), error = %e, "Error loading page");
            (StatusCode::INTERNAL_SERVER_ERROR, Html(ERROR_PAGE.to_string()))
        }
    }
}

/// Page names are single path segments without dots, so they cannot escape
/// the ui directory.
fn is_valid_page_name(page: &str) -> bool {
    !page.is_empty()
        && page
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// Serve the landing page
///
/// GET /
pub async fn serve_index(State(ui): State<UiState>) -> Page {
    render(&ui.root.join("index.html")).await
}

/// Serve a named UI page
///
/// GET /ui/:page
pub async fn serve_page(State(ui): State<UiState>, Path(page): Path<String>) -> Page {
    if !is_valid_page_name(&page) {
        warn!(page = %page, "Rejected UI page name");
        return (StatusCode::NOT_FOUND, Html(NOT_FOUND_PAGE.to_string()));
    }

    render(&ui.root.join("ui").join(format!("{}.html", page))).await
}
