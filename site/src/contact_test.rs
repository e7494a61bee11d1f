use super::*;

fn contact_input(name: &str, email: &str, subject: &str, message: &str) -> ContactInput {
    ContactInput {
        name: name.to_owned(),
        email: email.to_owned(),
        subject: Some(subject.to_owned()),
        message: message.to_owned(),
        ..Default::default()
    }
}

fn valid_contact() -> ContactInput {
    contact_input("Jane Doe", "jane@example.com", "Project Inquiry", "I would like a quote please.")
}

// =============================================================================
// variant inference
// =============================================================================

#[test]
fn variant_contact_when_subject_present() {
    assert_eq!(valid_contact().variant(), FormVariant::Contact);
}

#[test]
fn variant_project_when_project_type_key_present() {
    let input = ContactInput { project_type: Some(String::new()), ..Default::default() };
    assert_eq!(input.variant(), FormVariant::Project);
}

#[test]
fn variant_lead_gen_when_no_topic() {
    let input = ContactInput { subject: Some("   ".into()), ..Default::default() };
    assert_eq!(input.variant(), FormVariant::LeadGen);
}

// =============================================================================
// validate
// =============================================================================

#[test]
fn valid_contact_round_trips_trimmed_fields() {
    let submission = validate(&valid_contact()).expect("should validate");
    assert_eq!(submission.name, "Jane Doe");
    assert_eq!(submission.email, "jane@example.com");
    assert_eq!(submission.subject.as_deref(), Some("Project Inquiry"));
    assert_eq!(submission.project_type, None);
    assert_eq!(submission.message, "I would like a quote please.");
    assert_eq!(submission.topic(), Some("Project Inquiry"));
}

#[test]
fn surrounding_whitespace_is_trimmed() {
    let input = contact_input("  Jane Doe ", " jane@example.com\t", " Hi there ", "  I would like a quote please.\n");
    let submission = validate(&input).expect("should validate");
    assert_eq!(submission.name, "Jane Doe");
    assert_eq!(submission.email, "jane@example.com");
    assert_eq!(submission.subject.as_deref(), Some("Hi there"));
    assert_eq!(submission.message, "I would like a quote please.");
}

#[test]
fn collects_every_error_instead_of_failing_fast() {
    let input = contact_input("A", "not-an-email", "", "short");
    let errors = validate(&input).expect_err("should fail");
    assert_eq!(errors.len(), 3);
    assert_eq!(errors.get(Field::Name).map(|e| e.rule), Some(Rule::MinLength { minimum: 2 }));
    assert_eq!(errors.get(Field::Email).map(|e| e.rule), Some(Rule::InvalidFormat));
    assert_eq!(errors.get(Field::Message).map(|e| e.rule), Some(Rule::MinLength { minimum: 10 }));
}

#[test]
fn short_subject_fails_min_length() {
    let mut input = valid_contact();
    input.subject = Some("X".into());
    let errors = validate(&input).expect_err("should fail");
    assert_eq!(errors.len(), 1);
    let err = errors.get(Field::Subject).expect("subject error");
    assert_eq!(err.rule, Rule::MinLength { minimum: 2 });
    assert_eq!(err.message, "Subject must be at least 2 characters");
}

#[test]
fn explicit_contact_variant_requires_subject() {
    let mut input = valid_contact();
    input.subject = None;
    let errors = validate_as(FormVariant::Contact, &input).expect_err("should fail");
    assert!(errors.get(Field::Subject).is_some());
}

#[test]
fn project_variant_requires_project_type() {
    let mut input = valid_contact();
    input.subject = None;
    input.project_type = Some("  ".into());
    let errors = validate(&input).expect_err("should fail");
    assert_eq!(errors.len(), 1);
    assert_eq!(errors.get(Field::ProjectType).map(|e| e.rule), Some(Rule::Required));
}

#[test]
fn project_variant_accepts_project_type() {
    let mut input = valid_contact();
    input.subject = None;
    input.project_type = Some("E-Commerce".into());
    let submission = validate(&input).expect("should validate");
    assert_eq!(submission.project_type.as_deref(), Some("E-Commerce"));
    assert_eq!(submission.topic(), Some("E-Commerce"));
}

#[test]
fn lead_gen_keeps_optional_contact_details() {
    let input = ContactInput {
        name: "Sam".into(),
        email: "sam@studio.io".into(),
        message: "Need a landing page redesign.".into(),
        phone: Some(" +1 555 0100 ".into()),
        company: Some("   ".into()),
        ..Default::default()
    };
    let submission = validate(&input).expect("should validate");
    assert_eq!(submission.phone.as_deref(), Some("+1 555 0100"));
    assert_eq!(submission.company, None);
    assert_eq!(submission.topic(), None);
}

#[test]
fn name_length_counts_characters_not_bytes() {
    let mut input = valid_contact();
    input.name = "Zoë".into();
    assert!(validate(&input).is_ok());
    input.name = "é".into();
    assert!(validate(&input).is_err());
}

#[test]
fn whitespace_only_message_is_too_short() {
    let mut input = valid_contact();
    input.message = "            ".into();
    let errors = validate(&input).expect_err("should fail");
    assert!(errors.get(Field::Message).is_some());
}

#[test]
fn field_errors_display_counts() {
    let errors = validate(&contact_input("A", "x", "", "")).expect_err("should fail");
    assert_eq!(errors.to_string(), "3 invalid field(s)");
}

// =============================================================================
// is_valid_email
// =============================================================================

#[test]
fn accepts_common_addresses() {
    for email in ["jane@example.com", "first.last+tag@sub.domain.co", "o'brien@mail-server.org", "x_y@a1.io"] {
        assert!(is_valid_email(email), "expected valid: {email}");
    }
}

#[test]
fn rejects_malformed_addresses() {
    for email in [
        "",
        "not-an-email",
        "@example.com",
        "jane@",
        "jane@example",
        "jane@@example.com",
        "jane@ex ample.com",
        ".jane@example.com",
        "jane.@example.com",
        "ja..ne@example.com",
        "jane@-example.com",
        "jane@example-.com",
        "jane@example..com",
        "jane@example.c",
        "jane@example.c0m",
        "jane doe@example.com",
    ] {
        assert!(!is_valid_email(email), "expected invalid: {email}");
    }
}

#[test]
fn rejects_overlong_local_part() {
    let email = format!("{}@example.com", "a".repeat(65));
    assert!(!is_valid_email(&email));
}

// =============================================================================
// wire format
// =============================================================================

#[test]
fn input_deserializes_camel_case_and_defaults_missing_fields() {
    let input: ContactInput =
        serde_json::from_str(r#"{"email":"a@b.co","projectType":"SEO"}"#).expect("should parse");
    assert_eq!(input.name, "");
    assert_eq!(input.email, "a@b.co");
    assert_eq!(input.project_type.as_deref(), Some("SEO"));
    assert_eq!(input.message, "");
}

#[test]
fn field_error_serializes_flat() {
    let err = FieldError::new(Field::ProjectType, Rule::Required);
    let value = serde_json::to_value(&err).expect("serialize");
    assert_eq!(
        value,
        serde_json::json!({
            "field": "projectType",
            "code": "required",
            "message": "Please select a project type"
        })
    );
}

#[test]
fn min_length_error_carries_minimum() {
    let err = FieldError::new(Field::Name, Rule::MinLength { minimum: 2 });
    let value = serde_json::to_value(&err).expect("serialize");
    assert_eq!(value["code"], "min_length");
    assert_eq!(value["minimum"], 2);
    let back: FieldError = serde_json::from_value(value).expect("deserialize");
    assert_eq!(back, err);
}

#[test]
fn accepted_response_omits_errors() {
    let value = serde_json::to_value(ContactResponse::accepted()).expect("serialize");
    assert_eq!(value, serde_json::json!({ "success": true, "message": "Contact form submitted successfully" }));
}

#[test]
fn invalid_response_lists_each_violation() {
    let errors = validate(&contact_input("A", "bad", "", "short")).expect_err("should fail");
    let response = ContactResponse::invalid(errors);
    assert!(!response.success);
    assert_eq!(response.message, "Invalid form data");
    assert_eq!(response.errors.as_ref().map(Vec::len), Some(3));
}

#[test]
fn malformed_response_has_empty_error_list() {
    let value = serde_json::to_value(ContactResponse::malformed()).expect("serialize");
    assert_eq!(value["errors"], serde_json::json!([]));
}

// =============================================================================
// ContactDraft
// =============================================================================

fn filled_draft() -> ContactDraft {
    let mut draft = ContactDraft::new(FormVariant::Contact);
    draft.set(Field::Name, "Jane Doe");
    draft.set(Field::Email, "jane@example.com");
    draft.set(Field::Subject, "Project Inquiry");
    draft.set(Field::Message, "I would like a quote please.");
    draft
}

#[test]
fn draft_invalid_submit_records_errors_and_keeps_values() {
    let mut draft = ContactDraft::new(FormVariant::Contact);
    draft.set(Field::Name, "J");
    assert!(draft.begin_submit().is_none());
    assert_eq!(draft.status(), DraftStatus::Editing);
    assert!(draft.error_for(Field::Name).is_some());
    assert!(draft.error_for(Field::Email).is_some());
    assert_eq!(draft.input.value(Field::Name), "J");
}

#[test]
fn draft_editing_a_field_clears_its_error() {
    let mut draft = ContactDraft::new(FormVariant::Contact);
    assert!(draft.begin_submit().is_none());
    draft.set(Field::Name, "Jane");
    assert!(draft.error_for(Field::Name).is_none());
    assert!(draft.error_for(Field::Email).is_some());
}

#[test]
fn draft_blocks_double_submit() {
    let mut draft = filled_draft();
    assert!(draft.begin_submit().is_some());
    assert_eq!(draft.status(), DraftStatus::Submitting);
    assert!(draft.begin_submit().is_none());
}

#[test]
fn draft_success_clears_form() {
    let mut draft = filled_draft();
    draft.begin_submit().expect("valid draft");
    draft.finish(&ContactResponse::accepted());
    assert_eq!(draft.status(), DraftStatus::Sent);
    assert_eq!(draft.input, ContactInput::default());
    assert_eq!(draft.notice().map(|n| n.title), Some("Message sent!"));
}

#[test]
fn draft_failure_preserves_values() {
    let mut draft = filled_draft();
    draft.begin_submit().expect("valid draft");
    draft.finish(&ContactResponse::failed());
    assert_eq!(draft.status(), DraftStatus::Failed);
    assert_eq!(draft.input.value(Field::Name), "Jane Doe");
    assert_eq!(draft.input.value(Field::Message), "I would like a quote please.");
    assert!(draft.notice().is_some_and(|n| n.destructive));
}

#[test]
fn draft_transport_failure_preserves_values() {
    let mut draft = filled_draft();
    draft.begin_submit().expect("valid draft");
    draft.fail_transport();
    assert_eq!(draft.status(), DraftStatus::Failed);
    assert_eq!(draft.input.value(Field::Subject), "Project Inquiry");
}

#[test]
fn draft_server_field_errors_are_shown() {
    let mut draft = filled_draft();
    draft.begin_submit().expect("valid draft");
    let response = ContactResponse {
        success: false,
        message: INVALID_MESSAGE.to_owned(),
        errors: Some(vec![FieldError::new(Field::Email, Rule::InvalidFormat)]),
    };
    draft.finish(&response);
    assert!(draft.error_for(Field::Email).is_some());
    assert_eq!(draft.input.value(Field::Email), "jane@example.com");
}
