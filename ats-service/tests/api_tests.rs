mod common;

use common::TestApp;
use reqwest::StatusCode;
use serde_json::json;

#[tokio::test]
async fn test_register_success() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/auth/register")
        .json(&json!({
            "email": "a@b.com",
            "password": "secret1",
            "firstName": "A",
            "lastName": "B",
            "role": "RECRUITER",
            "companyName": "Acme",
            "phoneNumber": "+1234567890"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body = response.text().await.expect("Failed to read response body");
    assert_eq!(body, "User registered successfully");
}

#[tokio::test]
async fn test_register_duplicate_email() {
    let app = TestApp::spawn().await;

    app.post("/api/auth/register")
        .json(&json!({
            "email": "a@b.com",
            "password": "secret1",
            "firstName": "A",
            "lastName": "B",
            "role": "RECRUITER"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    // Same email again, different everything else
    let response = app
        .post("/api/auth/register")
        .json(&json!({
            "email": "a@b.com",
            "password": "other_secret",
            "firstName": "C",
            "lastName": "D",
            "role": "ADMIN"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = response.text().await.expect("Failed to read response body");
    assert!(body.starts_with("Error registering user:"));
}

#[tokio::test]
async fn test_register_invalid_email() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/auth/register")
        .json(&json!({
            "email": "not-an-email",
            "password": "secret1",
            "firstName": "A",
            "lastName": "B",
            "role": "RECRUITER"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = response.text().await.expect("Failed to read response body");
    assert!(body.starts_with("Error registering user:"));
}

#[tokio::test]
async fn test_login_returns_bearer_token_and_user() {
    let app = TestApp::spawn().await;

    app.post("/api/auth/register")
        .json(&json!({
            "email": "a@b.com",
            "password": "secret1",
            "firstName": "A",
            "lastName": "B",
            "role": "RECRUITER"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    let response = app
        .post("/api/auth/login")
        .json(&json!({
            "email": "a@b.com",
            "password": "secret1"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    let token = body["accessToken"].as_str().unwrap();
    assert!(!token.is_empty());
    assert_eq!(body["tokenType"], "Bearer");
    assert_eq!(body["user"]["email"], "a@b.com");
    assert_eq!(body["user"]["firstName"], "A");
    assert_eq!(body["user"]["role"], "RECRUITER");
    assert!(body["user"]["passwordHash"].is_null());

    // The token is keyed on the principal's email
    assert_eq!(app.token_service.extract_subject(token).unwrap(), "a@b.com");
}

#[tokio::test]
async fn test_login_wrong_password() {
    let app = TestApp::spawn().await;

    app.post("/api/auth/register")
        .json(&json!({
            "email": "a@b.com",
            "password": "Correct_Password!",
            "firstName": "A",
            "lastName": "B",
            "role": "RECRUITER"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    let response = app
        .post("/api/auth/login")
        .json(&json!({
            "email": "a@b.com",
            "password": "Wrong_Password!"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["message"], "Invalid credentials");
}

#[tokio::test]
async fn test_login_unknown_email_is_indistinguishable_from_wrong_password() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/auth/login")
        .json(&json!({
            "email": "nobody@example.com",
            "password": "whatever"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // Identical surface to the wrong-password case
    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["message"], "Invalid credentials");
}

#[tokio::test]
async fn test_register_role_is_case_insensitive() {
    let app = TestApp::spawn().await;

    app.post("/api/auth/register")
        .json(&json!({
            "email": "admin@example.com",
            "password": "secret1",
            "firstName": "A",
            "lastName": "B",
            "role": "admin"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    let response = app
        .post("/api/auth/login")
        .json(&json!({
            "email": "admin@example.com",
            "password": "secret1"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["user"]["role"], "ADMIN");
}

#[tokio::test]
async fn test_register_unknown_role_falls_back_to_default() {
    let app = TestApp::spawn().await;

    // No error: the unknown role silently takes the configured default
    let response = app
        .post("/api/auth/register")
        .json(&json!({
            "email": "typo@example.com",
            "password": "secret1",
            "firstName": "A",
            "lastName": "B",
            "role": "not_a_role"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .post("/api/auth/login")
        .json(&json!({
            "email": "typo@example.com",
            "password": "secret1"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["user"]["role"], "RECRUITER");
}

#[tokio::test]
async fn test_protected_route_without_token() {
    let app = TestApp::spawn().await;

    let response = app
        .get("/api/jobs")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_protected_route_with_invalid_token() {
    let app = TestApp::spawn().await;

    let response = app
        .get_authenticated("/api/jobs", "not-a-real-token")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_protected_route_with_valid_token() {
    let app = TestApp::spawn().await;
    let token = app.register_and_login("a@b.com", "secret1").await;

    let response = app
        .get_authenticated("/api/jobs", &token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_expired_token_is_rejected() {
    // Tokens from this app are already past their expiry when issued
    let app = TestApp::spawn_with_ttl_minutes(-15).await;
    let token = app.register_and_login("a@b.com", "secret1").await;

    let response = app
        .get_authenticated("/api/jobs", &token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_deleted_user_token_is_rejected_on_next_request() {
    let app = TestApp::spawn().await;

    app.post("/api/auth/register")
        .json(&json!({
            "email": "a@b.com",
            "password": "secret1",
            "firstName": "A",
            "lastName": "B",
            "role": "RECRUITER"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    let login: serde_json::Value = app
        .post("/api/auth/login")
        .json(&json!({"email": "a@b.com", "password": "secret1"}))
        .send()
        .await
        .expect("Failed to execute request")
        .json()
        .await
        .expect("Failed to parse response");
    let token = login["accessToken"].as_str().unwrap().to_string();
    let user_id = login["user"]["id"].as_str().unwrap().to_string();

    // Token works while the principal exists
    let response = app
        .get_authenticated("/api/jobs", &token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .delete_authenticated(&format!("/api/users/{}", user_id), &token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // The gate re-resolves the principal per request, so deletion acts as
    // revocation on the very next call
    let response = app
        .get_authenticated("/api/jobs", &token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_job_crud_flow() {
    let app = TestApp::spawn().await;
    let token = app.register_and_login("recruiter@example.com", "secret1").await;

    // Create
    let response = app
        .post_authenticated("/api/jobs", &token)
        .json(&json!({
            "title": "Backend Engineer",
            "description": "Rust services",
            "department": "Engineering",
            "employmentType": "FULL_TIME",
            "location": "Remote",
            "salaryRange": "100k-140k",
            "status": "OPEN"
        }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::CREATED);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    let job_id = body["data"]["id"].as_str().unwrap().to_string();
    assert_eq!(body["data"]["title"], "Backend Engineer");
    assert_eq!(body["data"]["status"], "OPEN");
    assert!(body["data"]["createdBy"].is_string());

    // List
    let response = app
        .get_authenticated("/api/jobs", &token)
        .send()
        .await
        .expect("Failed to execute request");
    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    // Update
    let response = app
        .put_authenticated(&format!("/api/jobs/{}", job_id), &token)
        .json(&json!({
            "title": "Backend Engineer",
            "employmentType": "FULL_TIME",
            "status": "CLOSED"
        }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["status"], "CLOSED");

    // Delete
    let response = app
        .delete_authenticated(&format!("/api/jobs/{}", job_id), &token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app
        .get_authenticated(&format!("/api/jobs/{}", job_id), &token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_application_and_interview_flow() {
    let app = TestApp::spawn().await;

    let login: serde_json::Value = {
        app.post("/api/auth/register")
            .json(&json!({
                "email": "recruiter@example.com",
                "password": "secret1",
                "firstName": "R",
                "lastName": "E",
                "role": "RECRUITER"
            }))
            .send()
            .await
            .expect("Failed to execute request");
        app.post("/api/auth/login")
            .json(&json!({"email": "recruiter@example.com", "password": "secret1"}))
            .send()
            .await
            .expect("Failed to execute request")
            .json()
            .await
            .expect("Failed to parse response")
    };
    let token = login["accessToken"].as_str().unwrap().to_string();
    let interviewer_id = login["user"]["id"].as_str().unwrap().to_string();

    // Job
    let job: serde_json::Value = app
        .post_authenticated("/api/jobs", &token)
        .json(&json!({
            "title": "Data Engineer",
            "employmentType": "CONTRACT",
            "status": "OPEN"
        }))
        .send()
        .await
        .expect("Failed to execute request")
        .json()
        .await
        .expect("Failed to parse response");
    let job_id = job["data"]["id"].as_str().unwrap().to_string();

    // Candidate
    let candidate: serde_json::Value = app
        .post_authenticated("/api/candidates", &token)
        .json(&json!({
            "firstName": "Jane",
            "lastName": "Doe",
            "email": "jane@example.com",
            "experienceLevel": "SENIOR",
            "location": "Berlin"
        }))
        .send()
        .await
        .expect("Failed to execute request")
        .json()
        .await
        .expect("Failed to parse response");
    let candidate_id = candidate["data"]["id"].as_str().unwrap().to_string();

    // Application linking the two
    let response = app
        .post_authenticated("/api/applications", &token)
        .json(&json!({
            "jobId": job_id,
            "candidateId": candidate_id,
            "status": "APPLIED",
            "source": "referral"
        }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::CREATED);

    let application: serde_json::Value =
        response.json().await.expect("Failed to parse response");
    let application_id = application["data"]["id"].as_str().unwrap().to_string();
    assert_eq!(application["data"]["status"], "APPLIED");

    // Interview for the application
    let response = app
        .post_authenticated("/api/interviews", &token)
        .json(&json!({
            "applicationId": application_id,
            "interviewerId": interviewer_id,
            "interviewDate": "2030-01-15T10:00:00Z",
            "interviewType": "TECHNICAL",
            "outcome": "PENDING"
        }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::CREATED);

    let interview: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(interview["data"]["interviewType"], "TECHNICAL");
    assert_eq!(interview["data"]["outcome"], "PENDING");
}

#[tokio::test]
async fn test_user_management_flow() {
    let app = TestApp::spawn().await;

    let login: serde_json::Value = {
        app.post("/api/auth/register")
            .json(&json!({
                "email": "a@b.com",
                "password": "secret1",
                "firstName": "A",
                "lastName": "B",
                "role": "INTERVIEWER"
            }))
            .send()
            .await
            .expect("Failed to execute request");
        app.post("/api/auth/login")
            .json(&json!({"email": "a@b.com", "password": "secret1"}))
            .send()
            .await
            .expect("Failed to execute request")
            .json()
            .await
            .expect("Failed to parse response")
    };
    let token = login["accessToken"].as_str().unwrap().to_string();
    let user_id = login["user"]["id"].as_str().unwrap().to_string();

    // List includes the registered principal
    let response = app
        .get_authenticated("/api/users", &token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
    assert_eq!(body["data"][0]["email"], "a@b.com");

    // Update role and profile
    let response = app
        .put_authenticated(&format!("/api/users/{}", user_id), &token)
        .json(&json!({
            "role": "HIRING_MANAGER",
            "companyName": "Acme"
        }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["role"], "HIRING_MANAGER");
    assert_eq!(body["data"]["companyName"], "Acme");

    // Unknown role on update is rejected, unlike registration
    let response = app
        .put_authenticated(&format!("/api/users/{}", user_id), &token)
        .json(&json!({"role": "SUPERUSER"}))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}
