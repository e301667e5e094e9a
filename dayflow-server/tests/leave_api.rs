//! Leave requests and their attendance side effects

mod common;

use common::TestApp;
use http::StatusCode;
use serde_json::json;
use shared::error::ErrorCode;
use shared::models::Role;

fn leave_body(start: &str, end: &str) -> serde_json::Value {
    json!({
        "leave_type": "sick",
        "start_date": start,
        "end_date": end,
        "remarks": "flu",
    })
}

#[tokio::test]
async fn submit_marks_every_day_as_leave() {
    let app = TestApp::new().await;
    let emp = app.user("EMP001", Role::Employee).await;

    let res = app.post("/api/leave", &emp, leave_body("2024-02-28", "2024-03-01")).await;
    assert_eq!(res.status, StatusCode::CREATED);
    assert!(res.json()["id"].as_i64().is_some());

    let days = app.attendance_of(emp.id).await;
    assert_eq!(
        days,
        vec![
            ("2024-02-28".to_string(), "leave".to_string()),
            ("2024-02-29".to_string(), "leave".to_string()),
            ("2024-03-01".to_string(), "leave".to_string()),
        ]
    );

    let mine = app.get("/api/leave/my-leaves", &emp).await.json();
    assert_eq!(mine.as_array().map(Vec::len), Some(1));
    assert_eq!(mine[0]["status"], "pending");
    assert_eq!(mine[0]["leave_type"], "sick");
}

#[tokio::test]
async fn inverted_range_is_rejected_without_writes() {
    let app = TestApp::new().await;
    let emp = app.user("EMP001", Role::Employee).await;

    let res = app.post("/api/leave", &emp, leave_body("2024-03-05", "2024-03-01")).await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.json()["code"], ErrorCode::LeaveInvalidDateRange.code());

    assert!(app.attendance_of(emp.id).await.is_empty());
    let mine = app.get("/api/leave/my-leaves", &emp).await.json();
    assert_eq!(mine.as_array().map(Vec::len), Some(0));
}

#[tokio::test]
async fn submit_validates_type_and_dates() {
    let app = TestApp::new().await;
    let emp = app.user("EMP001", Role::Employee).await;

    let bad_type = json!({ "leave_type": "vacation", "start_date": "2024-03-01", "end_date": "2024-03-01" });
    let res = app.post("/api/leave", &emp, bad_type).await;
    assert_eq!(res.json()["code"], ErrorCode::LeaveInvalidType.code());

    let missing = json!({ "leave_type": "paid", "start_date": "2024-03-01" });
    let res = app.post("/api/leave", &emp, missing).await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);

    let malformed = json!({ "leave_type": "paid", "start_date": "2024-13-01", "end_date": "2024-13-02" });
    let res = app.post("/api/leave", &emp, malformed).await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);

    let too_long = app.post("/api/leave", &emp, leave_body("2024-01-01", "2025-06-01")).await;
    assert_eq!(too_long.json()["code"], ErrorCode::LeaveRangeTooLong.code());
}

#[tokio::test]
async fn remarks_are_filtered() {
    let app = TestApp::new().await;
    let emp = app.user("EMP001", Role::Employee).await;
    let hr = app.user("HR001", Role::Hr).await;

    let body = json!({
        "leave_type": "paid",
        "start_date": "2024-05-01",
        "end_date": "2024-05-01",
        "remarks": "this is fucking great",
    });
    assert_eq!(app.post("/api/leave", &emp, body).await.status, StatusCode::CREATED);

    let all = app.get("/api/leave/all", &hr).await.json();
    assert_eq!(all[0]["remarks"], "this is ***ing great");
    assert_eq!(all[0]["employee_id"], "EMP001");
}

#[tokio::test]
async fn rejection_overwrites_attendance_with_absent() {
    let app = TestApp::new().await;
    let emp = app.user("EMP001", Role::Employee).await;
    let admin = app.user("ADM001", Role::Admin).await;
    app.insert_attendance(emp.id, "2024-03-02", "present").await;

    let id = app
        .post("/api/leave", &emp, leave_body("2024-03-01", "2024-03-03"))
        .await
        .json()["id"]
        .as_i64()
        .unwrap();

    let res = app
        .put(
            &format!("/api/leave/{id}/approve"),
            &admin,
            json!({ "status": "rejected", "admin_comment": "busy week" }),
        )
        .await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.json()["message"], "Leave request rejected successfully");

    let days = app.attendance_of(emp.id).await;
    assert_eq!(days.len(), 3);
    assert!(days.iter().all(|(_, status)| status == "absent"));

    let mine = app.get("/api/leave/my-leaves", &emp).await.json();
    assert_eq!(mine[0]["status"], "rejected");
    assert_eq!(mine[0]["admin_comment"], "busy week");
    assert_eq!(mine[0]["approved_by"], admin.id);
}

#[tokio::test]
async fn approving_twice_succeeds() {
    let app = TestApp::new().await;
    let emp = app.user("EMP001", Role::Employee).await;
    let hr = app.user("HR001", Role::Hr).await;
    let id = app
        .post("/api/leave", &emp, leave_body("2024-03-01", "2024-03-01"))
        .await
        .json()["id"]
        .as_i64()
        .unwrap();

    for _ in 0..2 {
        let res = app
            .put(&format!("/api/leave/{id}/approve"), &hr, json!({ "status": "approved" }))
            .await;
        assert_eq!(res.status, StatusCode::OK);
    }
    assert_eq!(app.attendance_of(emp.id).await[0].1, "leave");
}

#[tokio::test]
async fn decisions_need_a_privileged_role_and_valid_status() {
    let app = TestApp::new().await;
    let emp = app.user("EMP001", Role::Employee).await;
    let hr = app.user("HR001", Role::Hr).await;
    let id = app
        .post("/api/leave", &emp, leave_body("2024-03-01", "2024-03-01"))
        .await
        .json()["id"]
        .as_i64()
        .unwrap();

    let own = app
        .put(&format!("/api/leave/{id}/approve"), &emp, json!({ "status": "approved" }))
        .await;
    assert_eq!(own.status, StatusCode::FORBIDDEN);

    let pending = app
        .put(&format!("/api/leave/{id}/approve"), &hr, json!({ "status": "pending" }))
        .await;
    assert_eq!(pending.json()["code"], ErrorCode::LeaveInvalidStatus.code());

    let missing = app
        .put("/api/leave/9999/approve", &hr, json!({ "status": "approved" }))
        .await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);

    assert_eq!(app.get("/api/leave/all", &emp).await.status, StatusCode::FORBIDDEN);
    let bad_filter = app.get("/api/leave/all?status=maybe", &hr).await;
    assert_eq!(bad_filter.json()["code"], ErrorCode::LeaveInvalidStatus.code());
}

#[tokio::test]
async fn attendance_listings_are_scoped() {
    let app = TestApp::new().await;
    let a = app.user("EMP001", Role::Employee).await;
    let b = app.user("EMP002", Role::Employee).await;
    let hr = app.user("HR001", Role::Hr).await;
    app.post("/api/leave", &a, leave_body("2024-03-01", "2024-03-02")).await;
    app.post("/api/leave", &b, leave_body("2024-03-05", "2024-03-05")).await;

    let mine = app.get("/api/attendance/my-attendance", &a).await.json();
    assert_eq!(mine.as_array().map(Vec::len), Some(2));
    assert_eq!(mine[0]["date"], "2024-03-02");

    let ranged = app
        .get("/api/attendance/my-attendance?from=2024-03-02&to=2024-03-31", &a)
        .await
        .json();
    assert_eq!(ranged.as_array().map(Vec::len), Some(1));

    assert_eq!(app.get("/api/attendance/all", &a).await.status, StatusCode::FORBIDDEN);
    let all = app.get("/api/attendance/all", &hr).await.json();
    assert_eq!(all.as_array().map(Vec::len), Some(3));
}
