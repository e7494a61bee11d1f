//! Contact form validation and the `/api/contact` wire envelope.
//!
//! DESIGN
//! ======
//! Three page variants post to the same endpoint with slightly different
//! schemas. The contact page sends a `subject`, the project brief sends a
//! required `projectType`, and the lead-generation overlay may omit the
//! topic entirely. [`ContactInput::variant`] infers which schema applies
//! from the fields actually present, and [`validate`] checks every rule so
//! the caller can render all invalid fields at once.
//!
//! Values are trimmed before length checks; lengths count Unicode scalar
//! values, not bytes.

#[cfg(test)]
#[path = "contact_test.rs"]
mod contact_test;

use serde::{Deserialize, Serialize};

pub const NAME_MIN_CHARS: usize = 2;
pub const SUBJECT_MIN_CHARS: usize = 2;
pub const MESSAGE_MIN_CHARS: usize = 10;

const EMAIL_MAX_CHARS: usize = 254;
const EMAIL_LOCAL_MAX_CHARS: usize = 64;
const EMAIL_LABEL_MAX_CHARS: usize = 63;
/// Non-alphanumeric characters allowed in the local part of an address.
const EMAIL_LOCAL_SPECIALS: &str = "!#$%&'*+-/=?^_`{|}~.";

pub const ACCEPTED_MESSAGE: &str = "Contact form submitted successfully";
pub const INVALID_MESSAGE: &str = "Invalid form data";
pub const FAILED_MESSAGE: &str = "An error occurred while processing your request";

// =============================================================================
// INPUT
// =============================================================================

/// Which form schema a submission is checked against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormVariant {
    /// Contact page: `subject` of at least two characters.
    Contact,
    /// Project brief: `projectType` must be present and non-empty.
    Project,
    /// Lead-generation overlay: topic is optional; phone and company accepted.
    LeadGen,
}

/// Raw field values as entered by the user. Missing fields deserialize empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactInput {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_type: Option<String>,
    #[serde(default)]
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
}

impl ContactInput {
    /// Infer the schema from the fields the caller sent.
    ///
    /// A non-blank `subject` selects [`FormVariant::Contact`]; otherwise a
    /// `projectType` key (even blank) selects [`FormVariant::Project`];
    /// anything else is a [`FormVariant::LeadGen`] submission.
    #[must_use]
    pub fn variant(&self) -> FormVariant {
        if self.subject.as_deref().is_some_and(|s| !s.trim().is_empty()) {
            FormVariant::Contact
        } else if self.project_type.is_some() {
            FormVariant::Project
        } else {
            FormVariant::LeadGen
        }
    }

    /// Current raw value of a form field.
    #[must_use]
    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Subject => self.subject.as_deref().unwrap_or_default(),
            Field::ProjectType => self.project_type.as_deref().unwrap_or_default(),
            Field::Message => &self.message,
        }
    }

    /// Overwrite a form field with a new raw value.
    pub fn set(&mut self, field: Field, value: String) {
        match field {
            Field::Name => self.name = value,
            Field::Email => self.email = value,
            Field::Subject => self.subject = Some(value),
            Field::ProjectType => self.project_type = Some(value),
            Field::Message => self.message = value,
        }
    }
}

/// A validated, trimmed submission. Never stored; logged and discarded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_type: Option<String>,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
}

impl ContactSubmission {
    /// The subject or project type, whichever the variant carried.
    #[must_use]
    pub fn topic(&self) -> Option<&str> {
        self.subject.as_deref().or(self.project_type.as_deref())
    }
}

// =============================================================================
// ERRORS
// =============================================================================

/// A validated form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    Name,
    Email,
    Subject,
    ProjectType,
    Message,
}

impl Field {
    /// Wire name of the field, as used in JSON bodies.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Subject => "subject",
            Self::ProjectType => "projectType",
            Self::Message => "message",
        }
    }
}

/// The rule a field violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "code", rename_all = "snake_case")]
pub enum Rule {
    /// Fewer than `minimum` characters after trimming.
    MinLength { minimum: usize },
    /// Not a syntactically valid value (email).
    InvalidFormat,
    /// Empty where a value is mandatory.
    Required,
}

/// One violated rule on one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: Field,
    #[serde(flatten)]
    pub rule: Rule,
    pub message: String,
}

impl FieldError {
    #[must_use]
    pub fn new(field: Field, rule: Rule) -> Self {
        Self { field, rule, message: message_for(field, rule) }
    }
}

fn message_for(field: Field, rule: Rule) -> String {
    match (field, rule) {
        (Field::Email, _) => "Please enter a valid email".to_owned(),
        (Field::ProjectType, Rule::Required) => "Please select a project type".to_owned(),
        (Field::Name, Rule::MinLength { minimum }) => format!("Name must be at least {minimum} characters"),
        (Field::Subject, Rule::MinLength { minimum }) => format!("Subject must be at least {minimum} characters"),
        (Field::Message, Rule::MinLength { minimum }) => format!("Message must be at least {minimum} characters"),
        (field, Rule::Required) => format!("{} is required", field.as_str()),
        (field, Rule::MinLength { minimum }) => format!("{} must be at least {minimum} characters", field.as_str()),
        (field, Rule::InvalidFormat) => format!("{} is invalid", field.as_str()),
    }
}

/// Every rule violation found in one submission. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{} invalid field(s)", .0.len())]
pub struct FieldErrors(Vec<FieldError>);

impl FieldErrors {
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FieldError> {
        self.0.iter()
    }

    /// First error reported for `field`, if any.
    #[must_use]
    pub fn get(&self, field: Field) -> Option<&FieldError> {
        self.0.iter().find(|e| e.field == field)
    }

    #[must_use]
    pub fn into_vec(self) -> Vec<FieldError> {
        self.0
    }
}

impl<'a> IntoIterator for &'a FieldErrors {
    type Item = &'a FieldError;
    type IntoIter = std::slice::Iter<'a, FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

// =============================================================================
// VALIDATION
// =============================================================================

/// Validate against the schema inferred by [`ContactInput::variant`].
///
/// # Errors
///
/// Returns every violated rule, in field order, when any field is invalid.
pub fn validate(input: &ContactInput) -> Result<ContactSubmission, FieldErrors> {
    validate_as(input.variant(), input)
}

/// Validate against an explicit schema.
///
/// # Errors
///
/// Returns every violated rule, in field order, when any field is invalid.
pub fn validate_as(variant: FormVariant, input: &ContactInput) -> Result<ContactSubmission, FieldErrors> {
    let name = input.name.trim();
    let email = input.email.trim();
    let message = input.message.trim();
    let subject = trimmed(input.subject.as_deref());
    let project_type = trimmed(input.project_type.as_deref());

    let mut errors = Vec::new();

    if char_len(name) < NAME_MIN_CHARS {
        errors.push(FieldError::new(Field::Name, Rule::MinLength { minimum: NAME_MIN_CHARS }));
    }
    if !is_valid_email(email) {
        errors.push(FieldError::new(Field::Email, Rule::InvalidFormat));
    }
    match variant {
        FormVariant::Contact => {
            if char_len(subject.unwrap_or_default()) < SUBJECT_MIN_CHARS {
                errors.push(FieldError::new(Field::Subject, Rule::MinLength { minimum: SUBJECT_MIN_CHARS }));
            }
        }
        FormVariant::Project => {
            if project_type.is_none() {
                errors.push(FieldError::new(Field::ProjectType, Rule::Required));
            }
        }
        FormVariant::LeadGen => {}
    }
    if char_len(message) < MESSAGE_MIN_CHARS {
        errors.push(FieldError::new(Field::Message, Rule::MinLength { minimum: MESSAGE_MIN_CHARS }));
    }

    if !errors.is_empty() {
        return Err(FieldErrors(errors));
    }

    Ok(ContactSubmission {
        name: name.to_owned(),
        email: email.to_owned(),
        subject: subject.map(str::to_owned),
        project_type: project_type.map(str::to_owned),
        message: message.to_owned(),
        phone: trimmed(input.phone.as_deref()).map(str::to_owned),
        company: trimmed(input.company.as_deref()).map(str::to_owned),
    })
}

/// Trim an optional value, mapping blank to `None`.
fn trimmed(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn char_len(value: &str) -> usize {
    value.chars().count()
}

/// Syntactic email check: `local@domain.tld`.
///
/// The local part uses the RFC 5322 atext set with interior dots. The domain
/// needs at least two labels of alphanumerics and inner hyphens, ending in an
/// alphabetic TLD of two or more characters. Quoted local parts and IP
/// literals are rejected.
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    if email.is_empty() || char_len(email) > EMAIL_MAX_CHARS {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    valid_local_part(local) && valid_domain(domain)
}

fn valid_local_part(local: &str) -> bool {
    if local.is_empty() || char_len(local) > EMAIL_LOCAL_MAX_CHARS {
        return false;
    }
    if local.starts_with('.') || local.ends_with('.') || local.contains("..") {
        return false;
    }
    local
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || EMAIL_LOCAL_SPECIALS.contains(c))
}

fn valid_domain(domain: &str) -> bool {
    let labels = domain.split('.').collect::<Vec<_>>();
    if labels.len() < 2 {
        return false;
    }
    let labels_ok = labels.iter().all(|label| {
        !label.is_empty()
            && char_len(label) <= EMAIL_LABEL_MAX_CHARS
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
    });
    let tld_ok = labels
        .last()
        .is_some_and(|tld| tld.len() >= 2 && tld.chars().all(|c| c.is_ascii_alphabetic()));
    labels_ok && tld_ok
}

// =============================================================================
// WIRE ENVELOPE
// =============================================================================

/// JSON body returned by `POST /api/contact` for every outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactResponse {
    pub success: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<FieldError>>,
}

impl ContactResponse {
    /// 200: submission accepted.
    #[must_use]
    pub fn accepted() -> Self {
        Self { success: true, message: ACCEPTED_MESSAGE.to_owned(), errors: None }
    }

    /// 400: one entry per violated rule.
    #[must_use]
    pub fn invalid(errors: FieldErrors) -> Self {
        Self { success: false, message: INVALID_MESSAGE.to_owned(), errors: Some(errors.into_vec()) }
    }

    /// 400: the request body could not be decoded.
    #[must_use]
    pub fn malformed() -> Self {
        Self { success: false, message: INVALID_MESSAGE.to_owned(), errors: Some(Vec::new()) }
    }

    /// 500: the submission was valid but could not be processed.
    #[must_use]
    pub fn failed() -> Self {
        Self { success: false, message: FAILED_MESSAGE.to_owned(), errors: None }
    }
}

// =============================================================================
// CLIENT DRAFT
// =============================================================================

/// Lifecycle of a form on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DraftStatus {
    #[default]
    Editing,
    Submitting,
    Sent,
    Failed,
}

/// Toast shown after a submission settles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Notice {
    pub title: &'static str,
    pub description: &'static str,
    pub destructive: bool,
}

const SENT_NOTICE: Notice = Notice {
    title: "Message sent!",
    description: "We'll get back to you as soon as possible.",
    destructive: false,
};

const FAILED_NOTICE: Notice = Notice {
    title: "Error",
    description: "There was a problem sending your message. Please try again.",
    destructive: true,
};

/// Client-side form state: entered values survive a failed submission and
/// are cleared only once the server accepts them.
#[derive(Debug, Clone)]
pub struct ContactDraft {
    pub input: ContactInput,
    variant: FormVariant,
    errors: Vec<FieldError>,
    status: DraftStatus,
}

impl ContactDraft {
    #[must_use]
    pub fn new(variant: FormVariant) -> Self {
        Self { input: ContactInput::default(), variant, errors: Vec::new(), status: DraftStatus::Editing }
    }

    #[must_use]
    pub fn status(&self) -> DraftStatus {
        self.status
    }

    #[must_use]
    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    #[must_use]
    pub fn error_for(&self, field: Field) -> Option<&FieldError> {
        self.errors.iter().find(|e| e.field == field)
    }

    /// Edit a field. Clears any error shown for it.
    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        self.input.set(field, value.into());
        self.errors.retain(|e| e.field != field);
        if self.status != DraftStatus::Submitting {
            self.status = DraftStatus::Editing;
        }
    }

    /// Validate locally. Returns the submission to send, or `None` when
    /// fields are invalid or a submission is already in flight.
    pub fn begin_submit(&mut self) -> Option<ContactSubmission> {
        if self.status == DraftStatus::Submitting {
            return None;
        }
        match validate_as(self.variant, &self.input) {
            Ok(submission) => {
                self.errors.clear();
                self.status = DraftStatus::Submitting;
                Some(submission)
            }
            Err(errors) => {
                self.errors = errors.into_vec();
                self.status = DraftStatus::Editing;
                None
            }
        }
    }

    /// Apply the server's answer. Success resets the form; failure keeps
    /// every entered value and shows the server's field errors.
    pub fn finish(&mut self, response: &ContactResponse) {
        if response.success {
            self.input = ContactInput::default();
            self.errors.clear();
            self.status = DraftStatus::Sent;
        } else {
            self.errors = response.errors.clone().unwrap_or_default();
            self.status = DraftStatus::Failed;
        }
    }

    /// The request never reached the server. Values are kept.
    pub fn fail_transport(&mut self) {
        self.status = DraftStatus::Failed;
    }

    /// Toast for the last settled submission.
    #[must_use]
    pub fn notice(&self) -> Option<Notice> {
        match self.status {
            DraftStatus::Sent => Some(SENT_NOTICE),
            DraftStatus::Failed => Some(FAILED_NOTICE),
            DraftStatus::Editing | DraftStatus::Submitting => None,
        }
    }
}
