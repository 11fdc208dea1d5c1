use askama::Template;
use chrono::{Datelike, Utc};
use habitpro_types::{Notice, UpiPayment, PRODUCT_NAME};

use crate::checkout::{CheckoutForm, PaymentInstructions};

/// One card of the "How It Works" section
pub struct Step {
    pub number: u8,
    pub title: String,
    pub description: &'static str,
}

/// One card of the trust section
pub struct Feature {
    pub title: &'static str,
    pub description: &'static str,
}

/// A rendered notice; `level` doubles as the CSS modifier
pub struct NoticeView {
    pub level: &'static str,
    pub message: String,
}

impl From<&Notice> for NoticeView {
    fn from(notice: &Notice) -> Self {
        Self {
            level: notice.level.as_str(),
            message: notice.message.clone(),
        }
    }
}

/// The single public page: hero, checkout form, payment step, marketing sections.
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexPage {
    pub product: &'static str,
    pub price: String,
    pub email: String,
    pub mobile: String,
    /// Empty when the field is valid
    pub email_error: String,
    pub mobile_error: String,
    pub fields_disabled: bool,
    pub show_submit: bool,
    pub show_payment: bool,
    pub payment: PaymentInstructions,
    pub notices: Vec<NoticeView>,
    pub steps: Vec<Step>,
    pub features: Vec<Feature>,
    pub year: i32,
}

impl IndexPage {
    pub fn new(form: &CheckoutForm, payment: &UpiPayment) -> Self {
        let price = payment.display_amount();
        let errors = form.errors();

        Self {
            product: PRODUCT_NAME,
            email: form.submission().email.clone(),
            mobile: form.submission().mobile.clone(),
            email_error: errors.email.map(|e| e.to_string()).unwrap_or_default(),
            mobile_error: errors.mobile.map(|e| e.to_string()).unwrap_or_default(),
            fields_disabled: form.fields_disabled(),
            show_submit: !form.show_payment(),
            show_payment: form.show_payment(),
            payment: PaymentInstructions::new(payment, &form.submission().email),
            notices: form.notices().iter().map(NoticeView::from).collect(),
            steps: how_it_works(&price),
            features: features(),
            year: Utc::now().year(),
            price,
        }
    }
}

fn how_it_works(price: &str) -> Vec<Step> {
    vec![
        Step {
            number: 1,
            title: "Enter your details".to_string(),
            description: "Provide your email ID and mobile number",
        },
        Step {
            number: 2,
            title: format!("Pay {} via UPI", price),
            description: "Complete payment using any UPI app",
        },
        Step {
            number: 3,
            title: "Receive via email".to_string(),
            description: "Get Habit Tracker Pro in your inbox",
        },
    ]
}

fn features() -> Vec<Feature> {
    vec![
        Feature {
            title: "One-time payment",
            description: "Pay once, use forever",
        },
        Feature {
            title: "No subscription",
            description: "No recurring charges",
        },
        Feature {
            title: "Simple and beginner-friendly",
            description: "Easy to use for everyone",
        },
        Feature {
            title: "Designed for students",
            description: "Perfect for daily use",
        },
    ]
}
