//! Signup with one-time-code verification, and login.
//!
//! Signup is a two-step flow. In `Details` the user fills in their identity
//! and role; submitting asks the backend to send a code. In `Verify` the
//! identity fields are locked and only the six-digit code can be edited.

use crate::api::submit;
use crate::error::LawfortError;
use crate::session::{Session, SessionStore};
use lawfort_protocol::{
    Backend, LoginRequest, LoginResponse, Role, SignupRequest, SignupRole, VerifyOtpRequest,
};
use log::{debug, info, warn};
use serde_json::Value;

pub const SIGNUP_PATH: &str = "/api/auth/signup";
pub const VERIFY_OTP_PATH: &str = "/api/auth/verify-otp";
pub const LOGIN_PATH: &str = "/api/auth/login";

/// Number of digits in a verification code.
pub const OTP_LENGTH: usize = 6;

const LOCKED_FIELD: &str = "field is locked";

/// Which tab of the auth screen is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthMode {
    #[default]
    Login,
    Signup,
}

impl AuthMode {
    pub fn toggled(self) -> Self {
        match self {
            AuthMode::Login => AuthMode::Signup,
            AuthMode::Signup => AuthMode::Login,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SignupStep {
    /// Collecting identity, password, and role.
    #[default]
    Details,
    /// Code sent; waiting for the user to enter it.
    Verify,
}

/// Editable text fields of the signup form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignupField {
    Name,
    Contact,
    Password,
    VerificationId,
}

/// Raw form input, exactly as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignupDraft {
    pub name: String,
    pub contact: String,
    pub password: String,
    pub role: Role,
    /// Police id or bar council id, depending on `role`.
    pub verification_id: String,
}

impl SignupDraft {
    /// Validate the draft and build the request body.
    ///
    /// Identity fields are trimmed; the password is sent as typed.
    pub fn to_request(&self) -> Result<SignupRequest, LawfortError> {
        let name = self.name.trim();
        let contact = self.contact.trim();
        if name.is_empty() || contact.is_empty() {
            return Err(LawfortError::validation(
                "Please fill in all required fields",
            ));
        }
        if self.password.trim().is_empty() {
            return Err(LawfortError::validation("Password is required"));
        }
        let verification_id = self.verification_id.trim();
        if let Some(label) = self
            .role
            .verification_label()
            .filter(|_| verification_id.is_empty())
        {
            return Err(LawfortError::Validation(format!("{label} is required")));
        }
        let role = match self.role {
            Role::Citizen => SignupRole::Citizen,
            Role::Police => SignupRole::Police {
                police_id: verification_id.to_string(),
            },
            Role::Lawyer => SignupRole::Lawyer {
                bar_council_id: verification_id.to_string(),
            },
        };
        Ok(SignupRequest {
            name: name.to_string(),
            contact: contact.to_string(),
            password: self.password.clone(),
            role,
        })
    }
}

/// Signup state machine.
#[derive(Debug, Clone, Default)]
pub struct SignupFlow {
    draft: SignupDraft,
    step: SignupStep,
    code: String,
}

impl SignupFlow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step(&self) -> SignupStep {
        self.step
    }

    pub fn draft(&self) -> &SignupDraft {
        &self.draft
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    /// Identity fields are read-only while a code is outstanding.
    pub fn is_locked(&self) -> bool {
        self.step == SignupStep::Verify
    }

    pub fn field(&self, field: SignupField) -> &str {
        match field {
            SignupField::Name => &self.draft.name,
            SignupField::Contact => &self.draft.contact,
            SignupField::Password => &self.draft.password,
            SignupField::VerificationId => &self.draft.verification_id,
        }
    }

    pub fn set_field(
        &mut self,
        field: SignupField,
        value: impl Into<String>,
    ) -> Result<(), LawfortError> {
        let slot = self.field_mut(field)?;
        *slot = value.into();
        Ok(())
    }

    /// Mutable access to a field, refused once the form is locked.
    pub fn field_mut(&mut self, field: SignupField) -> Result<&mut String, LawfortError> {
        if self.is_locked() {
            return Err(LawfortError::validation(LOCKED_FIELD));
        }
        Ok(match field {
            SignupField::Name => &mut self.draft.name,
            SignupField::Contact => &mut self.draft.contact,
            SignupField::Password => &mut self.draft.password,
            SignupField::VerificationId => &mut self.draft.verification_id,
        })
    }

    pub fn set_role(&mut self, role: Role) -> Result<(), LawfortError> {
        if self.is_locked() {
            return Err(LawfortError::validation(LOCKED_FIELD));
        }
        self.draft.role = role;
        Ok(())
    }

    /// Append typed input to the code, keeping digits only, up to six.
    pub fn push_code(&mut self, input: &str) {
        let room = OTP_LENGTH.saturating_sub(self.code.chars().count());
        self.code
            .extend(input.chars().filter(char::is_ascii_digit).take(room));
    }

    /// Replace the code with the digits of `input`, up to six.
    pub fn set_code(&mut self, input: &str) {
        self.code.clear();
        self.push_code(input);
    }

    pub fn pop_code(&mut self) {
        self.code.pop();
    }

    /// Send the details and move to `Verify` once the backend accepts them.
    pub async fn submit_details(&mut self, backend: &dyn Backend) -> Result<(), LawfortError> {
        if self.is_locked() {
            return Err(LawfortError::validation(
                "A verification code has already been sent",
            ));
        }
        let request = self.draft.to_request()?;
        debug!(
            "submitting signup (role={}, contact={})",
            request.role.role().as_str(),
            request.contact
        );
        submit::<_, Value>(backend, SIGNUP_PATH, &request).await?;
        info!("verification code requested (contact={})", request.contact);
        self.step = SignupStep::Verify;
        self.code.clear();
        Ok(())
    }

    /// Confirm the code. On success the form resets and the verified contact
    /// is returned so the caller can prefill login.
    pub async fn verify(&mut self, backend: &dyn Backend) -> Result<String, LawfortError> {
        if !self.is_locked() {
            return Err(LawfortError::validation("Submit your details first"));
        }
        if self.code.len() != OTP_LENGTH {
            return Err(LawfortError::validation(
                "Enter the 6-digit verification code",
            ));
        }
        let contact = self.draft.contact.trim().to_string();
        let request = VerifyOtpRequest {
            contact: contact.clone(),
            otp: self.code.clone(),
        };
        submit::<_, Value>(backend, VERIFY_OTP_PATH, &request).await?;
        info!("signup verified (contact={contact})");
        *self = Self::default();
        Ok(contact)
    }

    /// Leave `Verify` and unlock the details. Returns false outside `Verify`.
    pub fn start_over(&mut self) -> bool {
        if !self.is_locked() {
            return false;
        }
        self.step = SignupStep::Details;
        self.code.clear();
        true
    }
}

/// Result of a login attempt the backend accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    /// A session was established and saved.
    Authenticated(Session),
    /// The backend answered without a credential; carries its message.
    Rejected(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub contact: String,
    pub password: String,
}

impl LoginForm {
    pub async fn submit(
        &mut self,
        backend: &dyn Backend,
        sessions: &SessionStore,
    ) -> Result<LoginOutcome, LawfortError> {
        let contact = self.contact.trim().to_string();
        if contact.is_empty() || self.password.trim().is_empty() {
            return Err(LawfortError::validation(
                "Enter your email or mobile and password",
            ));
        }
        let request = LoginRequest {
            contact: contact.clone(),
            password: self.password.clone(),
        };
        let response: LoginResponse = submit(backend, LOGIN_PATH, &request).await?;
        let Some(token) = response.token.filter(|token| !token.is_empty()) else {
            warn!("login accepted without a token (contact={contact})");
            let message = response
                .message
                .unwrap_or_else(|| "Login failed: no session token returned".to_string());
            return Ok(LoginOutcome::Rejected(message));
        };

        let session = Session::from_login(token.clone(), response.user, &contact);
        sessions.establish(session.clone())?;
        backend.set_auth_token(Some(token));
        self.password.clear();
        Ok(LoginOutcome::Authenticated(session))
    }
}

/// Login and signup tabs plus the last status line shown to the user.
#[derive(Debug, Clone, Default)]
pub struct AuthScreen {
    pub mode: AuthMode,
    pub signup: SignupFlow,
    pub login: LoginForm,
    pub notice: Option<String>,
    pub error: Option<String>,
}

impl AuthScreen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle_mode(&mut self) {
        self.mode = self.mode.toggled();
        self.error = None;
    }

    /// Submit whatever the current tab and step call for.
    ///
    /// Errors are kept in `error` for display. Returns the new session when
    /// a login succeeds.
    pub async fn submit(
        &mut self,
        backend: &dyn Backend,
        sessions: &SessionStore,
    ) -> Option<Session> {
        self.error = None;
        let result = match (self.mode, self.signup.step()) {
            (AuthMode::Login, _) => self.submit_login(backend, sessions).await,
            (AuthMode::Signup, SignupStep::Details) => self
                .signup
                .submit_details(backend)
                .await
                .map(|()| {
                    self.notice = Some(format!(
                        "Verification code sent to {}",
                        self.signup.draft().contact.trim()
                    ));
                    None
                }),
            (AuthMode::Signup, SignupStep::Verify) => {
                self.signup.verify(backend).await.map(|contact| {
                    self.mode = AuthMode::Login;
                    self.login = LoginForm {
                        contact,
                        password: String::new(),
                    };
                    self.notice = Some("Account verified. Please log in.".to_string());
                    None
                })
            }
        };
        result.unwrap_or_else(|err| {
            self.error = Some(err.to_string());
            None
        })
    }

    async fn submit_login(
        &mut self,
        backend: &dyn Backend,
        sessions: &SessionStore,
    ) -> Result<Option<Session>, LawfortError> {
        match self.login.submit(backend, sessions).await? {
            LoginOutcome::Authenticated(session) => {
                self.notice = Some(format!("Welcome, {}", session.name));
                Ok(Some(session))
            }
            LoginOutcome::Rejected(message) => {
                self.error = Some(message);
                Ok(None)
            }
        }
    }

    /// Return to the details step from verification.
    pub fn start_over(&mut self) -> bool {
        let restarted = self.signup.start_over();
        if restarted {
            self.error = None;
            self.notice = None;
        }
        restarted
    }
}
