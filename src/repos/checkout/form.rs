use std::collections::BTreeMap;

use serde::Deserialize;

/// Raw applicant input, exactly what the checkout form collects.
#[derive(Debug, Clone, Deserialize)]
pub struct ApplicationForm {
    pub phone: String,
    pub address: String,
    pub ssc_result: String,
    pub hsc_result: String,
    pub study_gap: Option<String>,
}

/// field name to message, ordered so the first error is stable
pub type FormErrors = BTreeMap<&'static str, String>;

/// The same fields once they passed validation, with the optional study gap
/// already defaulted.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidForm {
    pub phone: String,
    pub address: String,
    pub ssc_result: String,
    pub hsc_result: String,
    pub study_gap: String,
}

// deliberately permissive, enough to keep letters out without rejecting
// formatted numbers like "+1 (555) 123-4567"
fn is_phone_char(c: char) -> bool {
    c.is_ascii_digit() || c == '+' || c == '-' || c == ' ' || c == '(' || c == ')'
}

pub fn validate_application_form(form: &ApplicationForm) -> Result<ValidForm, FormErrors> {
    let mut errors = FormErrors::new();

    let phone = form.phone.trim();
    if phone.is_empty() {
        errors.insert("phone", "Phone number is required".to_string());
    } else if !phone.chars().all(is_phone_char) {
        errors.insert("phone", "Please enter a valid phone number".to_string());
    }

    let address = form.address.trim();
    if address.is_empty() {
        errors.insert("address", "Address is required".to_string());
    }

    let ssc_result = form.ssc_result.trim();
    if ssc_result.is_empty() {
        errors.insert("ssc_result", "SSC result is required".to_string());
    }

    let hsc_result = form.hsc_result.trim();
    if hsc_result.is_empty() {
        errors.insert("hsc_result", "HSC result is required".to_string());
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    let study_gap = match &form.study_gap {
        Some(gap) if !gap.trim().is_empty() => gap.trim().to_string(),
        _ => "No gap".to_string(),
    };

    Ok(ValidForm {
        phone: phone.to_string(),
        address: address.to_string(),
        ssc_result: ssc_result.to_string(),
        hsc_result: hsc_result.to_string(),
        study_gap,
    })
}
