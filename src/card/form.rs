// Contact form: fields, field constraints, submission state machine
//
// State Diagram:
//
//              submit (fields valid)
//   [Idle] ─────────────────────────▶ [Submitting]
//     ▲                                 │      │
//     │ reset deadline        2xx       │      │ non-2xx / transport failure
//     │                                 ▼      ▼
//   [Success] ◀─────────────────────────┘   [Error]
//                                              │
//                 submit (fields valid)        │
//   [Submitting] ◀─────────────────────────────┘
//
// Field constraints gate the Idle|Error -> Submitting transition; a form
// that violates them never reaches the relay.

use super::timer::Deadline;
use regex::Regex;
use std::sync::LazyLock;
use std::time::{Duration, Instant};

/// Shape check for the email field (same rule browsers apply to type=email)
static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$",
    )
    .expect("email pattern is a valid regex")
});

/// Submission status of the contact form
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FormStatus {
    #[default]
    Idle,
    Submitting,
    Success,
    Error,
}

impl FormStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Submitting => "submitting",
            Self::Success => "success",
            Self::Error => "error",
        }
    }
}

/// The three input fields of the form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    Email,
    Message,
}

impl Field {
    pub const ALL: [Field; 3] = [Field::Name, Field::Email, Field::Message];

    /// Multipart field name sent to the relay
    pub fn key(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Message => "message",
        }
    }

    pub fn placeholder(&self) -> &'static str {
        match self {
            Self::Name => "Your Name",
            Self::Email => "Your Email",
            Self::Message => "Your Message",
        }
    }

    pub fn is_multiline(&self) -> bool {
        matches!(self, Self::Message)
    }

    /// Check a value against this field's constraints
    fn check(&self, value: &str) -> Option<FieldError> {
        let value = self.sanitize(value);
        if value.is_empty() {
            return Some(FieldError::ValueMissing);
        }
        if *self == Self::Email && !EMAIL_PATTERN.is_match(value) {
            return Some(FieldError::TypeMismatch);
        }
        None
    }

    /// Value as it is sent: the email field drops surrounding whitespace.
    /// Name and message are kept verbatim, so whitespace counts as filled.
    fn sanitize<'a>(&self, value: &'a str) -> &'a str {
        match self {
            Self::Email => value.trim(),
            _ => value,
        }
    }
}

/// A violated field constraint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldError {
    /// Required field left empty
    ValueMissing,
    /// Email field doesn't look like an address
    TypeMismatch,
}

impl FieldError {
    pub fn message(&self) -> &'static str {
        match self {
            Self::ValueMissing => "Please fill out this field.",
            Self::TypeMismatch => "Please enter a valid email address.",
        }
    }
}

/// Validated field values, ready to post
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub name: String,
    pub email: String,
    pub message: String,
}

/// Field contents of the contact form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl ContactForm {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Message => &self.message,
        }
    }

    pub fn get_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Name => &mut self.name,
            Field::Email => &mut self.email,
            Field::Message => &mut self.message,
        }
    }

    pub fn clear(&mut self) {
        self.name.clear();
        self.email.clear();
        self.message.clear();
    }

    /// Run every field constraint. On failure, returns all violations in
    /// field order so the first one can take focus.
    pub fn validate(&self) -> Result<Submission, Vec<(Field, FieldError)>> {
        let violations: Vec<_> = Field::ALL
            .iter()
            .filter_map(|&field| field.check(self.get(field)).map(|err| (field, err)))
            .collect();

        if !violations.is_empty() {
            return Err(violations);
        }

        Ok(Submission {
            name: Field::Name.sanitize(&self.name).to_string(),
            email: Field::Email.sanitize(&self.email).to_string(),
            message: Field::Message.sanitize(&self.message).to_string(),
        })
    }
}

/// Why a submit action was refused before any validation ran
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SubmitRejected {
    #[error("a submission is already in flight")]
    InFlight,
    #[error("the form is showing its confirmation")]
    Acknowledging,
    #[error("the card has been closed")]
    Closed,
}

/// State machine for the form's submission status
#[derive(Debug)]
pub struct FormMachine {
    status: FormStatus,
    reset: Deadline,
    reset_after: Duration,
}

impl FormMachine {
    pub fn new(reset_after: Duration) -> Self {
        Self {
            status: FormStatus::Idle,
            reset: Deadline::new(),
            reset_after,
        }
    }

    pub fn status(&self) -> FormStatus {
        self.status
    }

    /// The submit control is disabled exactly while a post is outstanding
    pub fn submit_disabled(&self) -> bool {
        self.status == FormStatus::Submitting
    }

    /// Check the form accepts a submit action right now
    pub fn can_begin(&self) -> Result<(), SubmitRejected> {
        match self.status {
            FormStatus::Idle | FormStatus::Error => Ok(()),
            FormStatus::Submitting => Err(SubmitRejected::InFlight),
            FormStatus::Success => Err(SubmitRejected::Acknowledging),
        }
    }

    /// Idle|Error -> Submitting
    pub fn begin(&mut self) -> Result<(), SubmitRejected> {
        self.can_begin()?;
        self.reset.cancel();
        self.status = FormStatus::Submitting;
        Ok(())
    }

    /// Submitting -> Success (arming the reset) or Error.
    /// Outcomes arriving in any other state are ignored.
    pub fn finish(&mut self, succeeded: bool, now: Instant) -> bool {
        if self.status != FormStatus::Submitting {
            return false;
        }
        if succeeded {
            self.status = FormStatus::Success;
            self.reset.arm(now, self.reset_after);
        } else {
            self.status = FormStatus::Error;
        }
        true
    }

    /// Apply the Success -> Idle reset if due. Returns true on state change.
    pub fn tick(&mut self, now: Instant) -> bool {
        if self.reset.fire(now) && self.status == FormStatus::Success {
            self.status = FormStatus::Idle;
            return true;
        }
        false
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.reset.next()
    }

    pub fn cancel(&mut self) {
        self.reset.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn filled(name: &str, email: &str, message: &str) -> ContactForm {
        ContactForm {
            name: name.to_string(),
            email: email.to_string(),
            message: message.to_string(),
        }
    }

    #[test]
    fn test_valid_form_produces_submission() {
        let form = filled("Ada Lovelace", " ada@example.com ", "Hello");
        let submission = form.validate().unwrap();
        assert_eq!(submission.name, "Ada Lovelace");
        assert_eq!(submission.email, "ada@example.com");
        assert_eq!(submission.message, "Hello");
    }

    #[test]
    fn test_missing_fields_reported_in_order() {
        let form = filled("", "ada@example.com", "");
        let violations = form.validate().unwrap_err();
        assert_eq!(
            violations,
            vec![
                (Field::Name, FieldError::ValueMissing),
                (Field::Message, FieldError::ValueMissing),
            ]
        );
    }

    #[test]
    fn test_whitespace_counts_as_filled() {
        let form = filled("   ", "ada@example.com", " \n ");
        let submission = form.validate().unwrap();
        assert_eq!(submission.name, "   ");
        assert_eq!(submission.message, " \n ");

        // The email is trimmed first, so blank still means missing
        assert_eq!(Field::Email.check("   "), Some(FieldError::ValueMissing));
    }

    #[test]
    fn test_email_shapes() {
        let ok = ["ada@example.com", "a.b+c@sub.example.co.uk", "x@localhost"];
        for email in ok {
            assert_eq!(Field::Email.check(email), None, "{email} should pass");
        }

        let bad = [
            "ada",
            "ada@",
            "@example.com",
            "ada@@example.com",
            "ada@exa mple.com",
            "ada@-example.com",
        ];
        for email in bad {
            assert_eq!(
                Field::Email.check(email),
                Some(FieldError::TypeMismatch),
                "{email} should fail"
            );
        }

        assert_eq!(Field::Email.check(""), Some(FieldError::ValueMissing));
    }

    #[test]
    fn test_success_flow_resets_after_window() {
        let t0 = Instant::now();
        let mut m = FormMachine::new(ms(5000));
        assert_eq!(m.status(), FormStatus::Idle);

        m.begin().unwrap();
        assert_eq!(m.status(), FormStatus::Submitting);
        assert!(m.submit_disabled());

        assert!(m.finish(true, t0));
        assert_eq!(m.status(), FormStatus::Success);
        assert!(!m.submit_disabled());

        assert!(!m.tick(t0 + ms(4999)));
        assert_eq!(m.status(), FormStatus::Success);

        assert!(m.tick(t0 + ms(5000)));
        assert_eq!(m.status(), FormStatus::Idle);
    }

    #[test]
    fn test_error_persists_until_next_submit() {
        let t0 = Instant::now();
        let mut m = FormMachine::new(ms(5000));
        m.begin().unwrap();
        m.finish(false, t0);
        assert_eq!(m.status(), FormStatus::Error);
        assert_eq!(m.next_deadline(), None);

        m.tick(t0 + ms(60_000));
        assert_eq!(m.status(), FormStatus::Error);

        m.begin().unwrap();
        assert_eq!(m.status(), FormStatus::Submitting);
    }

    #[test]
    fn test_reentrant_submit_rejected() {
        let mut m = FormMachine::new(ms(5000));
        m.begin().unwrap();
        assert_eq!(m.begin(), Err(SubmitRejected::InFlight));
        assert_eq!(m.status(), FormStatus::Submitting);
    }

    #[test]
    fn test_submit_rejected_while_acknowledging() {
        let mut m = FormMachine::new(ms(5000));
        m.begin().unwrap();
        m.finish(true, Instant::now());
        assert_eq!(m.begin(), Err(SubmitRejected::Acknowledging));
    }

    #[test]
    fn test_stray_outcome_ignored() {
        let mut m = FormMachine::new(ms(5000));
        assert!(!m.finish(true, Instant::now()));
        assert_eq!(m.status(), FormStatus::Idle);
    }

    #[test]
    fn test_disabled_iff_submitting() {
        let t0 = Instant::now();
        let mut m = FormMachine::new(ms(10));
        assert!(!m.submit_disabled());
        m.begin().unwrap();
        assert!(m.submit_disabled());
        m.finish(false, t0);
        assert!(!m.submit_disabled());
        m.begin().unwrap();
        m.finish(true, t0);
        assert!(!m.submit_disabled());
        m.tick(t0 + ms(10));
        assert!(!m.submit_disabled());
    }
}
