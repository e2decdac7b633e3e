use lawfort_core::auth::{LoginOutcome, SignupDraft};
use lawfort_core::{
    AuthMode, AuthScreen, LawfortError, LoginForm, SessionStore, SignupField, SignupFlow,
    SignupStep,
};
use lawfort_protocol::Role;
use lawfort_test_utils::{Reply, ScriptedBackend, UnreachableBackend};
use pretty_assertions::assert_eq;
use serde_json::json;
use tempfile::TempDir;

fn filled_flow(role: Role) -> SignupFlow {
    let mut flow = SignupFlow::new();
    flow.set_field(SignupField::Name, " Kavya Iyer ").expect("name");
    flow.set_field(SignupField::Contact, "kavya@example.com").expect("contact");
    flow.set_field(SignupField::Password, "hunter22").expect("password");
    flow.set_role(role).expect("role");
    flow
}

#[tokio::test]
async fn empty_password_stays_on_details() {
    let backend = ScriptedBackend::new();
    let mut flow = filled_flow(Role::Citizen);
    flow.set_field(SignupField::Password, "").expect("password");

    let err = flow.submit_details(&backend).await.unwrap_err();

    assert!(matches!(err, LawfortError::Validation(_)));
    assert_eq!(flow.step(), SignupStep::Details);
    assert!(backend.calls().is_empty());
}

#[tokio::test]
async fn lawyer_signup_sends_only_bar_council_id() {
    let backend = ScriptedBackend::new().json("/api/auth/signup", json!({ "message": "OTP sent" }));
    let mut flow = filled_flow(Role::Lawyer);
    flow.set_field(SignupField::VerificationId, "BCI/2019/881")
        .expect("id");

    flow.submit_details(&backend).await.expect("submit");

    assert_eq!(
        backend.calls()[0].body,
        Some(json!({
            "name": "Kavya Iyer",
            "contact": "kavya@example.com",
            "password": "hunter22",
            "role": "lawyer",
            "bar_council_id": "BCI/2019/881"
        }))
    );
}

/// Details are locked once the code is sent and unlocked by Start Over.
#[tokio::test]
async fn verify_step_locks_fields_until_start_over() {
    let backend = ScriptedBackend::new().json("/api/auth/signup", json!({}));
    let mut flow = filled_flow(Role::Citizen);

    flow.submit_details(&backend).await.expect("submit");
    assert_eq!(flow.step(), SignupStep::Verify);
    assert!(flow.is_locked());

    let err = flow.set_field(SignupField::Name, "Someone Else").unwrap_err();
    assert_eq!(err.to_string(), "field is locked");
    assert!(flow.set_role(Role::Police).is_err());
    assert_eq!(flow.draft().name, " Kavya Iyer ");

    flow.push_code("12a45");
    flow.push_code("6");
    assert_eq!(flow.code(), "12456");

    assert!(flow.start_over());
    assert_eq!(flow.step(), SignupStep::Details);
    assert_eq!(flow.code(), "");
    assert_eq!(flow.draft().contact, "kavya@example.com");
    flow.set_field(SignupField::Name, "Kavya R").expect("unlocked");
}

#[tokio::test]
async fn signup_rejection_stays_on_details() {
    let backend = ScriptedBackend::new().on(
        "/api/auth/signup",
        Reply::Reject("User already exists".to_string()),
    );
    let mut flow = filled_flow(Role::Citizen);

    let err = flow.submit_details(&backend).await.unwrap_err();

    assert_eq!(err.to_string(), "User already exists");
    assert_eq!(flow.step(), SignupStep::Details);
}

#[tokio::test]
async fn short_code_is_rejected_without_a_request() {
    let backend = ScriptedBackend::new().json("/api/auth/signup", json!({}));
    let mut flow = filled_flow(Role::Citizen);
    flow.submit_details(&backend).await.expect("submit");
    flow.push_code("123");

    let err = flow.verify(&backend).await.unwrap_err();

    assert!(matches!(err, LawfortError::Validation(_)));
    assert_eq!(backend.paths(), vec!["/api/auth/signup"]);
    assert_eq!(flow.step(), SignupStep::Verify);
}

#[tokio::test]
async fn wrong_code_stays_on_verify() {
    let backend = ScriptedBackend::new()
        .json("/api/auth/signup", json!({}))
        .on("/api/auth/verify-otp", Reply::Reject("Invalid OTP".to_string()));
    let mut flow = filled_flow(Role::Citizen);
    flow.submit_details(&backend).await.expect("submit");
    flow.set_code("000000");

    let err = flow.verify(&backend).await.unwrap_err();

    assert_eq!(err.to_string(), "Invalid OTP");
    assert_eq!(flow.step(), SignupStep::Verify);
    assert_eq!(flow.code(), "000000");
}

/// A verified signup lands on the login tab with the contact prefilled.
#[tokio::test]
async fn verified_signup_switches_to_login() {
    let backend = ScriptedBackend::new()
        .json("/api/auth/signup", json!({}))
        .json("/api/auth/verify-otp", json!({ "message": "verified" }));
    let sessions = SessionStore::in_memory();
    let mut screen = AuthScreen::new();
    screen.toggle_mode();
    screen.signup = filled_flow(Role::Police);
    screen
        .signup
        .set_field(SignupField::VerificationId, "MH-PD-4471")
        .expect("id");

    assert_eq!(screen.submit(&backend, &sessions).await, None);
    assert_eq!(screen.signup.step(), SignupStep::Verify);
    assert_eq!(
        screen.notice.as_deref(),
        Some("Verification code sent to kavya@example.com")
    );

    screen.signup.set_code("482913");
    assert_eq!(screen.submit(&backend, &sessions).await, None);

    assert_eq!(screen.mode, AuthMode::Login);
    assert_eq!(screen.signup.step(), SignupStep::Details);
    assert_eq!(screen.login.contact, "kavya@example.com");
    assert_eq!(screen.error, None);
    assert_eq!(
        backend.calls()[1].body,
        Some(json!({ "contact": "kavya@example.com", "otp": "482913" }))
    );
}

#[tokio::test]
async fn login_establishes_persisted_session() {
    let temp = TempDir::new().expect("tmp");
    let path = temp.path().join("session.json");
    let sessions = SessionStore::load(&path).expect("sessions");
    let backend = ScriptedBackend::new().json(
        "/api/auth/login",
        json!({
            "access_token": "jwt-abc",
            "user": {
                "name": "Inspector Rao",
                "email": "rao@police.gov.in",
                "role": "police",
                "stats": { "lawsRead": 5, "savedItems": 2, "testsTaken": 1 }
            }
        }),
    );
    let mut form = LoginForm {
        contact: "rao@police.gov.in".to_string(),
        password: "pw".to_string(),
    };

    let outcome = form.submit(&backend, &sessions).await.expect("login");

    let LoginOutcome::Authenticated(session) = outcome else {
        panic!("expected a session");
    };
    assert_eq!(session.name, "Inspector Rao");
    assert_eq!(session.role, Role::Police);
    assert_eq!(session.stats.laws_read, 5);
    assert_eq!(backend.token().as_deref(), Some("jwt-abc"));
    assert!(form.password.is_empty());
    assert_eq!(
        SessionStore::load(&path).expect("reload").token().as_deref(),
        Some("jwt-abc")
    );
}

#[tokio::test]
async fn login_without_token_is_rejected() {
    let backend =
        ScriptedBackend::new().json("/api/auth/login", json!({ "message": "Account pending" }));
    let sessions = SessionStore::in_memory();
    let mut screen = AuthScreen::new();
    screen.login.contact = "x@example.com".to_string();
    screen.login.password = "pw".to_string();

    assert_eq!(screen.submit(&backend, &sessions).await, None);

    assert_eq!(screen.error.as_deref(), Some("Account pending"));
    assert!(!sessions.is_authenticated());
}

#[tokio::test]
async fn login_errors_surface_on_the_form() {
    let sessions = SessionStore::in_memory();
    let mut screen = AuthScreen::new();

    screen.submit(&UnreachableBackend, &sessions).await;
    assert!(matches!(screen.error.as_deref(), Some(message) if message.starts_with("Enter")));

    screen.login.contact = "x@example.com".to_string();
    screen.login.password = "pw".to_string();
    screen.submit(&UnreachableBackend, &sessions).await;
    assert_eq!(
        screen.error.as_deref(),
        Some("Cannot connect to backend at http://127.0.0.1:8000. Please ensure the server is running.")
    );
    assert_eq!(screen.mode, AuthMode::Login);
}

#[test]
fn citizen_request_has_no_verification_id() {
    let draft = SignupDraft {
        name: "A".to_string(),
        contact: "a@example.com".to_string(),
        password: "pw".to_string(),
        role: Role::Citizen,
        verification_id: "ignored".to_string(),
    };
    let value = serde_json::to_value(draft.to_request().expect("request")).expect("json");
    assert_eq!(value.get("police_id"), None);
    assert_eq!(value.get("bar_council_id"), None);
    assert_eq!(value["role"], json!("citizen"));
}
