use crate::ipc::error::ok;
use crate::ipc::helpers::{no_workspace, require_role, str_param};
use crate::ipc::types::{AppState, Request};
use crate::model::Role;
use crate::views;
use serde_json::json;

fn handle_student(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(tracker) = state.tracker.as_ref() else {
        return no_workspace(req);
    };
    let student = match require_role(state.session.as_ref(), req, Role::Student) {
        Ok(s) => s,
        Err(resp) => return resp,
    };
    let rows = views::student_rows(
        tracker.assignments(),
        tracker.submissions(),
        &student.user_id,
    );
    // Counts cover every row; the query only narrows the listing.
    let counts = views::student_counts(&rows);
    let rows = views::search_student_rows(rows, str_param(req, "query"));
    ok(&req.id, json!({ "rows": rows, "counts": counts }))
}

fn handle_teacher(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(tracker) = state.tracker.as_ref() else {
        return no_workspace(req);
    };
    let teacher = match require_role(state.session.as_ref(), req, Role::Teacher) {
        Ok(s) => s,
        Err(resp) => return resp,
    };
    let assignments = views::teacher_assignments(tracker.assignments(), teacher);
    let submissions = views::teacher_submissions(tracker.submissions(), teacher);
    let stats = views::teacher_stats(&assignments, &submissions);
    let roster = views::roster(&submissions);
    let listed = views::search_submissions(submissions, str_param(req, "query"));
    ok(
        &req.id,
        json!({
            "assignments": assignments,
            "submissions": listed,
            "roster": roster,
            "stats": stats,
        }),
    )
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "dashboard.student" => Some(handle_student(state, req)),
        "dashboard.teacher" => Some(handle_teacher(state, req)),
        _ => None,
    }
}
