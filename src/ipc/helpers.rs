use serde_json::Value;

use crate::ipc::error::err;
use crate::ipc::types::Request;
use crate::model::Role;
use crate::session::Session;

/// String param, or "" when absent or not a string.
pub fn str_param<'a>(req: &'a Request, key: &str) -> &'a str {
    req.params.get(key).and_then(|v| v.as_str()).unwrap_or("")
}

/// Integer id given either as a JSON number or a numeric string.
pub fn id_param(req: &Request, key: &str) -> Option<i64> {
    match req.params.get(key)? {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}

/// Numbers are rendered to text so grade and points accept either form.
pub fn text_param(req: &Request, key: &str) -> String {
    match req.params.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

pub fn require_role<'a>(
    session: Option<&'a Session>,
    req: &Request,
    role: Role,
) -> Result<&'a Session, Value> {
    let Some(session) = session else {
        return Err(err(&req.id, "not_signed_in", "sign in first", None));
    };
    if session.role != role {
        return Err(err(
            &req.id,
            "forbidden",
            format!("{} requires the {} role", req.method, role.as_str()),
            None,
        ));
    }
    Ok(session)
}

pub fn no_workspace(req: &Request) -> Value {
    err(&req.id, "no_workspace", "select a workspace first", None)
}
