mod common;

use common::{temp_dir, Sidecar};
use serde_json::json;

#[test]
fn invalid_grades_leave_submission_untouched() {
    let workspace = temp_dir("assignmate-grading");
    let mut sc = Sidecar::spawn();
    sc.select_workspace(&workspace);
    sc.register_teacher("t1", "Math");
    sc.register_student("s1", "Sam Student");

    sc.login("t1", "teacher");
    sc.request_ok("assignments.publish", json!({ "title": "Sheet", "dueDate": "2025-01-01" }));
    sc.login("s1", "student");
    sc.request_ok("submissions.submit", json!({ "assignmentId": 1, "fileName": "sheet.pdf" }));
    sc.login("t1", "teacher");

    for bad in [json!(150), json!(-3), json!("abc"), json!(""), json!(null)] {
        assert_eq!(
            sc.request_err("submissions.grade", json!({ "submissionId": 1, "grade": bad })),
            "validation"
        );
    }
    let subs = sc.request_ok("submissions.list", json!({}));
    let row = &subs["submissions"][0];
    assert_eq!(row["status"], json!("submitted"));
    assert_eq!(row["grade"], json!("-"));
    assert_eq!(row["feedback"], json!("-"));

    let graded = sc.request_ok(
        "submissions.grade",
        json!({ "submissionId": 1, "grade": "57", "feedback": "Good work" }),
    );
    assert_eq!(graded["submission"]["status"], json!("graded"));
    assert_eq!(graded["submission"]["grade"], json!("57"));
    assert_eq!(graded["submission"]["feedback"], json!("Good work"));

    let rounded = sc.request_ok(
        "submissions.grade",
        json!({ "submissionId": 1, "grade": 79.5 }),
    );
    assert_eq!(rounded["submission"]["grade"], json!("80"));

    assert_eq!(
        sc.request_err("submissions.grade", json!({ "submissionId": 42, "grade": 50 })),
        "not_found"
    );

    sc.close();
    let _ = std::fs::remove_dir_all(workspace);
}

#[test]
fn actions_are_gated_by_role() {
    let workspace = temp_dir("assignmate-roles");
    let mut sc = Sidecar::spawn();
    sc.select_workspace(&workspace);
    sc.register_teacher("t1", "Math");
    sc.register_student("s1", "Sam Student");

    assert_eq!(
        sc.request_err("assignments.publish", json!({ "title": "X", "dueDate": "2025-01-01" })),
        "not_signed_in"
    );

    sc.login("s1", "student");
    assert_eq!(
        sc.request_err("assignments.publish", json!({ "title": "X", "dueDate": "2025-01-01" })),
        "forbidden"
    );
    assert_eq!(
        sc.request_err("submissions.grade", json!({ "submissionId": 1, "grade": 10 })),
        "forbidden"
    );
    assert_eq!(sc.request_err("dashboard.teacher", json!({})), "forbidden");

    sc.login("t1", "teacher");
    assert_eq!(
        sc.request_err("submissions.submit", json!({ "assignmentId": 1, "fileName": "a" })),
        "forbidden"
    );
    assert_eq!(sc.request_err("dashboard.student", json!({})), "forbidden");

    sc.close();
    let _ = std::fs::remove_dir_all(workspace);
}

#[test]
fn teachers_only_see_their_own_work() {
    let workspace = temp_dir("assignmate-ownership");
    let mut sc = Sidecar::spawn();
    sc.select_workspace(&workspace);
    sc.register_teacher("Alice", "Math");
    sc.register_teacher("bob", "Art");
    sc.register_student("s1", "Sam Student");

    sc.login("Alice", "teacher");
    sc.request_ok("assignments.publish", json!({ "title": "Algebra", "dueDate": "2025-01-01" }));
    sc.login("bob", "teacher");
    sc.request_ok("assignments.publish", json!({ "title": "Sketch", "dueDate": "2025-01-01" }));

    sc.login("s1", "student");
    let all = sc.request_ok("assignments.list", json!({}));
    assert_eq!(all["assignments"].as_array().map(|a| a.len()), Some(2));
    sc.request_ok("submissions.submit", json!({ "assignmentId": 1, "fileName": "alg.pdf" }));
    sc.request_ok("submissions.submit", json!({ "assignmentId": 2, "fileName": "art.png" }));

    sc.login("Alice", "teacher");
    let dash = sc.request_ok("dashboard.teacher", json!({}));
    let titles: Vec<&str> = dash["assignments"]
        .as_array()
        .expect("array")
        .iter()
        .filter_map(|a| a["title"].as_str())
        .collect();
    assert_eq!(titles, vec!["Algebra"]);
    assert_eq!(dash["assignments"][0]["ownerKey"], json!("alice"));
    assert_eq!(dash["submissions"].as_array().map(|a| a.len()), Some(1));
    assert_eq!(dash["roster"][0]["id"], json!("s1"));
    assert_eq!(dash["roster"][0]["pending"], json!(1));

    let searched = sc.request_ok("dashboard.teacher", json!({ "query": "SKETCH" }));
    assert_eq!(searched["submissions"], json!([]));

    sc.close();
    let _ = std::fs::remove_dir_all(workspace);
}
