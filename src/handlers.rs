use axum::{
    extract::{rejection::FormRejection, State},
    http::{header, Method, StatusCode, Uri},
    response::{Html, IntoResponse, Response},
    Form,
};

use crate::components::TemplateComponent;
use crate::controller::Outcome;
use crate::errors::WikiError;
use crate::types::{AppState, EditSubmission};

/// Handle every path outside `/e/`: the view flow
pub async fn handle_view(State(state): State<AppState>, method: Method, uri: Uri) -> Response {
    if method != Method::GET && method != Method::HEAD {
        log::debug!("{} not allowed on {}", method, uri.path());
        return (StatusCode::METHOD_NOT_ALLOWED, [(header::ALLOW, "GET, HEAD")]).into_response();
    }
    log::info!("View request received: '{}'", uri.path());
    state.controller().view(uri.path()).into_response()
}

/// Handle `GET /e/<name>`: the edit form
pub async fn handle_edit(State(state): State<AppState>, uri: Uri) -> Response {
    log::info!("Edit request received: '{}'", uri.path());
    state.controller().edit_form(uri.path()).into_response()
}

/// Handle `POST /e/<name>`: an edit submission
pub async fn handle_edit_submit(
    State(state): State<AppState>,
    uri: Uri,
    form: Result<Form<EditSubmission>, FormRejection>,
) -> Response {
    log::info!("Edit submission received: '{}'", uri.path());
    let submission = form.map(|Form(submission)| submission).map_err(|e| WikiError::Form(e.to_string()));
    state.controller().submit(uri.path(), submission).into_response()
}

impl IntoResponse for Outcome {
    fn into_response(self) -> Response {
        let templates = TemplateComponent::new();
        match self {
            Outcome::Render(view) => Html(templates.render_page(&view)).into_response(),
            Outcome::Missing(view) => (StatusCode::NOT_FOUND, Html(templates.render_page(&view))).into_response(),
            Outcome::Found(location) => redirect(StatusCode::FOUND, location),
            Outcome::Moved(location) => redirect(StatusCode::PERMANENT_REDIRECT, location),
            Outcome::Failed(err) => err.into_response(),
        }
    }
}

fn redirect(status: StatusCode, location: String) -> Response {
    (status, [(header::LOCATION, location)]).into_response()
}
