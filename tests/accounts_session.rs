mod common;

use common::{temp_dir, Sidecar};
use serde_json::json;

#[test]
fn duplicate_user_role_pair_is_rejected() {
    let workspace = temp_dir("assignmate-accounts");
    let mut sc = Sidecar::spawn();
    sc.select_workspace(&workspace);

    sc.register_student("u1", "Una One");
    let dup = sc.request_err(
        "accounts.register",
        json!({
            "role": "student",
            "userId": " u1 ",
            "password": "pw",
            "confirmPassword": "pw",
            "fullName": "Other",
            "email": "o@x.test"
        }),
    );
    assert_eq!(dup, "duplicate_account");

    let teacher = sc.request_ok(
        "accounts.register",
        json!({
            "role": "teacher",
            "userId": "u1",
            "password": "pw",
            "confirmPassword": "pw",
            "subject": "Biology"
        }),
    );
    assert_eq!(teacher["account"]["fullName"], json!("u1"));
    assert_eq!(teacher["account"]["role"], json!("teacher"));
    assert!(teacher["account"].get("password").is_none());

    sc.close();
    let _ = std::fs::remove_dir_all(workspace);
}

#[test]
fn registration_and_login_validation() {
    let workspace = temp_dir("assignmate-auth-validation");
    let mut sc = Sidecar::spawn();
    sc.select_workspace(&workspace);

    let mismatch = sc.request_err(
        "accounts.register",
        json!({
            "role": "student",
            "userId": "s1",
            "password": "a",
            "confirmPassword": "b",
            "fullName": "S",
            "email": "s@x.test"
        }),
    );
    assert_eq!(mismatch, "validation");

    let no_subject = sc.request_err(
        "accounts.register",
        json!({ "role": "teacher", "userId": "t1", "password": "a", "confirmPassword": "a" }),
    );
    assert_eq!(no_subject, "validation");

    sc.register_student("s1", "Sam Student");
    assert_eq!(
        sc.request_err(
            "session.login",
            json!({ "userId": "s1", "password": "pw", "role": "teacher" })
        ),
        "invalid_credentials"
    );
    assert_eq!(
        sc.request_err(
            "session.login",
            json!({ "userId": "s1", "password": "nope", "role": "student" })
        ),
        "invalid_credentials"
    );

    sc.close();
    let _ = std::fs::remove_dir_all(workspace);
}

#[test]
fn session_routes_screens_and_logout_clears_it() {
    let workspace = temp_dir("assignmate-session");
    let mut sc = Sidecar::spawn();
    sc.select_workspace(&workspace);
    sc.register_teacher("t1", "Chemistry");

    let anon = sc.request_ok("session.get", json!({}));
    assert_eq!(anon["screen"], json!("login"));
    assert!(anon["session"].is_null());

    let signed_in = sc.login(" t1 ", "teacher");
    assert_eq!(signed_in["screen"], json!("teacherDashboard"));
    assert_eq!(signed_in["session"]["userId"], json!("t1"));
    assert_eq!(signed_in["session"]["subject"], json!("Chemistry"));
    assert!(signed_in["session"]["sessionId"].as_str().is_some());

    let grade = sc.request_ok("view.navigate", json!({ "view": "grade" }));
    assert_eq!(grade["screen"], json!("gradePanel"));
    let same = sc.request_ok("view.navigate", json!({ "view": "" }));
    assert_eq!(same["view"], json!("grade"));

    let out = sc.request_ok("session.logout", json!({}));
    assert_eq!(out["screen"], json!("login"));
    assert!(out["session"].is_null());

    sc.close();
    let _ = std::fs::remove_dir_all(workspace);
}
