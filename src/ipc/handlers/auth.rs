use crate::ipc::error::{err, ok, rejected};
use crate::ipc::helpers::{no_workspace, str_param};
use crate::ipc::types::{AppState, Request};
use crate::model::{Account, Role};
use crate::session::{route, Session, DEFAULT_VIEW};
use crate::store::Registration;
use serde_json::json;

fn account_json(a: &Account) -> serde_json::Value {
    json!({
        "userId": a.user_id,
        "role": a.role,
        "fullName": a.full_name,
        "email": a.email,
        "subject": a.subject,
    })
}

fn session_json(state: &AppState) -> serde_json::Value {
    json!({
        "session": state.session,
        "view": state.view,
        "screen": route(state.session.as_ref(), &state.view),
    })
}

fn handle_register(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(tracker) = state.tracker.as_mut() else {
        return no_workspace(req);
    };
    let reg = Registration {
        user_id: str_param(req, "userId").to_string(),
        password: str_param(req, "password").to_string(),
        confirm_password: str_param(req, "confirmPassword").to_string(),
        role: Some(Role::parse_lenient(str_param(req, "role"))),
        full_name: str_param(req, "fullName").to_string(),
        email: str_param(req, "email").to_string(),
        subject: str_param(req, "subject").to_string(),
    };
    match tracker.register(reg) {
        Ok(account) => ok(&req.id, json!({ "account": account_json(&account) })),
        Err(e) => rejected(&req.id, e),
    }
}

fn handle_login(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(tracker) = state.tracker.as_ref() else {
        return no_workspace(req);
    };
    let role = Role::parse_lenient(str_param(req, "role"));
    let session = match tracker.authenticate(
        str_param(req, "userId"),
        str_param(req, "password"),
        role,
    ) {
        Ok(account) => Session::start(account),
        Err(e) => return rejected(&req.id, e),
    };
    tracing::info!(user_id = %session.user_id, role = role.as_str(), "signed in");
    state.session = Some(session);
    state.view = DEFAULT_VIEW.to_string();
    ok(&req.id, session_json(state))
}

fn handle_logout(state: &mut AppState, req: &Request) -> serde_json::Value {
    if let Some(prev) = state.session.take() {
        tracing::info!(user_id = %prev.user_id, "signed out");
    }
    state.view = DEFAULT_VIEW.to_string();
    ok(&req.id, session_json(state))
}

fn handle_session_get(state: &mut AppState, req: &Request) -> serde_json::Value {
    ok(&req.id, session_json(state))
}

fn handle_navigate(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(view) = req.params.get("view").and_then(|v| v.as_str()) else {
        return err(&req.id, "bad_params", "missing view", None);
    };
    // An empty key leaves the current view in place.
    if !view.is_empty() {
        state.view = view.to_string();
    }
    ok(&req.id, session_json(state))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "accounts.register" => Some(handle_register(state, req)),
        "session.login" => Some(handle_login(state, req)),
        "session.logout" => Some(handle_logout(state, req)),
        "session.get" => Some(handle_session_get(state, req)),
        "view.navigate" => Some(handle_navigate(state, req)),
        _ => None,
    }
}
