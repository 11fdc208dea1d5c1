use habitpro_types::UpiPayment;
use serde::Serialize;

/// What the payment step shows after a lead is saved.
#[derive(Debug, Clone, Serialize)]
pub struct PaymentInstructions {
    pub deep_link: String,
    pub upi_id: String,
    pub amount: String,
    pub steps: Vec<String>,
    /// Address the product will be delivered to
    pub email: String,
}

impl PaymentInstructions {
    pub fn new(payment: &UpiPayment, email: &str) -> Self {
        let amount = payment.display_amount();
        let steps = vec![
            "Open any UPI app (Google Pay, PhonePe, Paytm, etc.)".to_string(),
            format!("Scan the QR code or use the UPI ID: {}", payment.upi_id),
            format!("Enter amount: {}", amount),
            "Complete the payment".to_string(),
        ];

        Self {
            deep_link: payment.deep_link(),
            upi_id: payment.upi_id.clone(),
            amount,
            steps,
            email: email.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_instructions() {
        let instructions = PaymentInstructions::new(&UpiPayment::default(), "a@b.com");
        assert_eq!(instructions.upi_id, "shreekumaran@fam");
        assert_eq!(instructions.amount, "₹29");
        assert_eq!(instructions.steps.len(), 4);
        assert_eq!(instructions.steps[2], "Enter amount: ₹29");
        assert!(instructions.deep_link.contains("am=29"));
    }
}
