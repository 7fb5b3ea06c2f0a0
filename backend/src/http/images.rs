//! Static image serving under `/images`.

use std::path::{Component, Path as FsPath, PathBuf};

use axum::{
    body::Body,
    extract::{Request, State},
    response::Response,
};
use tower::ServiceExt;
use tower_http::services::ServeFile;
use tracing::debug;

use super::error::AppError;
use super::extract::PathParams;
use super::state::AppState;

/// Join `requested` onto `root`, refusing anything that could leave it.
///
/// Only plain file-name components are accepted; `..`, absolute roots and
/// drive prefixes make the path unresolvable.
pub fn resolve_image_path(root: &FsPath, requested: &str) -> Option<PathBuf> {
    let mut resolved = root.to_path_buf();
    let mut pushed = false;

    for component in FsPath::new(requested).components() {
        match component {
            Component::Normal(part) => {
                resolved.push(part);
                pushed = true;
            }
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => return None,
        }
    }

    pushed.then_some(resolved)
}

/// GET /images/{*path}
pub async fn serve_image(
    State(state): State<AppState>,
    PathParams(requested): PathParams<String>,
    request: Request,
) -> Result<Response, AppError> {
    let not_found = || AppError::ImageNotFound(requested.clone());

    let full_path = resolve_image_path(&state.images_dir, &requested).ok_or_else(not_found)?;
    let metadata = tokio::fs::metadata(&full_path)
        .await
        .map_err(|_| not_found())?;
    if !metadata.is_file() {
        return Err(not_found());
    }

    debug!(path = %full_path.display(), "Serving image");
    let response = ServeFile::new(&full_path)
        .oneshot(request)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to serve {}: {}", full_path.display(), e)))?;

    Ok(response.map(Body::new))
}
