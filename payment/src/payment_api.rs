use common::api::HttpApi;
use common::errors::{ApiError, ValidationError};
use common::types::payment::{PaymentIntent, PaymentIntentRequest, PaymentVerification};
use std::future::Future;

/// Payment service calls.
pub trait PaymentBackend: Clone + Unpin + 'static {
    fn create_intent(
        &self,
        request: &PaymentIntentRequest,
    ) -> impl Future<Output = Result<PaymentIntent, ApiError>>;

    fn verify(&self, payment_intent_id: &str) -> impl Future<Output = Result<PaymentVerification, ApiError>>;
}

/// A 2xx with an empty body counts as verified.
pub fn parse_verification(body: &str) -> Result<PaymentVerification, ApiError> {
    if body.trim().is_empty() {
        return Ok(PaymentVerification::empty_response());
    }
    serde_json::from_str(body).map_err(|e| {
        let preview: String = body.chars().take(100).collect();
        ApiError::Decode(format!("{e}: {preview}"))
    })
}

impl PaymentBackend for HttpApi {
    async fn create_intent(&self, request: &PaymentIntentRequest) -> Result<PaymentIntent, ApiError> {
        request.validate()?;
        let url = format!("{}/api/payment/add", self.config().payment_url);
        self.fetch(self.client().post(url).json(request)).await
    }

    async fn verify(&self, payment_intent_id: &str) -> Result<PaymentVerification, ApiError> {
        let id = payment_intent_id.trim();
        if id.is_empty() {
            return Err(ValidationError::MissingField("Payment intent id").into());
        }
        let url = format!("{}/api/payment/verify/{id}", self.config().payment_url);
        let body = self.fetch_text(self.client().get(url)).await?;
        parse_verification(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_body_is_verified() {
        let verification = parse_verification("  \n").unwrap();
        assert!(verification.is_success());
        assert_eq!(
            verification.message.as_deref(),
            Some("Payment verified (empty response)")
        );
    }

    #[test]
    fn test_non_json_body_is_decode_error() {
        assert!(matches!(
            parse_verification("<html>oops</html>"),
            Err(ApiError::Decode(_))
        ));
    }

    #[test]
    fn test_verification_with_amount() {
        let verification =
            parse_verification(r#"{"status":"succeeded","amount":1099,"currency":"usd"}"#).unwrap();
        assert!(verification.is_success());
        assert_eq!(verification.amount, Some(1099.0));
    }
}
