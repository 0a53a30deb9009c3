//! The sign-up screen: a title above a form of four uncontrolled inputs
//! and a button that does nothing.
//!
//! Nothing here holds state. Inputs carry no `name`, so the browser never
//! submits their values, and the button is `type="button"`.

use serde::Serialize;

pub const TITLE_TEXT: &str = "Ribbit";
pub const SUBMIT_LABEL: &str = "Sign up";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InputKind {
    Text,
    Email,
    Password,
}

impl InputKind {
    /// Value of the HTML `type` attribute.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Email => "email",
            Self::Password => "password",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SignUpField {
    pub kind: InputKind,
    pub placeholder: &'static str,
}

pub const SIGN_UP_FIELDS: [SignUpField; 4] = [
    SignUpField {
        kind: InputKind::Text,
        placeholder: "Username",
    },
    SignUpField {
        kind: InputKind::Email,
        placeholder: "Email address",
    },
    SignUpField {
        kind: InputKind::Password,
        placeholder: "Password",
    },
    SignUpField {
        kind: InputKind::Password,
        placeholder: "Repeat password",
    },
];

#[derive(Debug, Clone, Serialize)]
pub struct Title {
    pub text: &'static str,
}

impl Default for Title {
    fn default() -> Self {
        Self { text: TITLE_TEXT }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SignUpForm {
    pub fields: &'static [SignUpField],
    pub submit_label: &'static str,
}

impl Default for SignUpForm {
    fn default() -> Self {
        Self {
            fields: &SIGN_UP_FIELDS,
            submit_label: SUBMIT_LABEL,
        }
    }
}

/// Page container: Title stacked above SignUpForm.
#[derive(Debug, Clone, Serialize)]
pub struct SignUpPage {
    pub lang: String,
    pub page_title: String,
    pub title: Title,
    pub form: SignUpForm,
}

impl SignUpPage {
    pub fn new(lang: &str) -> Self {
        Self {
            lang: lang.to_string(),
            page_title: format!("{} · {}", SUBMIT_LABEL, TITLE_TEXT),
            title: Title::default(),
            form: SignUpForm::default(),
        }
    }
}
