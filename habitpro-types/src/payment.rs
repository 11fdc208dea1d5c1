use serde::{Deserialize, Serialize};

use crate::PRODUCT_NAME;

/// Payee details for the manual UPI checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UpiPayment {
    /// Virtual payment address of the payee
    pub upi_id: String,
    pub payee_name: String,
    /// Amount in whole rupees
    pub amount: u32,
    pub currency: String,
}

impl Default for UpiPayment {
    fn default() -> Self {
        Self {
            upi_id: "shreekumaran@fam".to_string(),
            payee_name: PRODUCT_NAME.to_string(),
            amount: 29,
            currency: "INR".to_string(),
        }
    }
}

impl UpiPayment {
    /// `upi://pay` deep link opened by the "Proceed to Payment" action.
    pub fn deep_link(&self) -> String {
        format!(
            "upi://pay?pa={}&pn={}&am={}&cu={}",
            encode_component(&self.upi_id),
            encode_component(&self.payee_name),
            self.amount,
            encode_component(&self.currency),
        )
    }

    /// Amount with its currency sign, e.g. `₹29`.
    pub fn display_amount(&self) -> String {
        if self.currency == "INR" {
            format!("₹{}", self.amount)
        } else {
            format!("{} {}", self.amount, self.currency)
        }
    }
}

/// Percent-encode a query component. `@` stays raw: UPI apps expect the VPA verbatim.
fn encode_component(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' | b'@' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{:02X}", byte)),
        }
    }
    out
}
