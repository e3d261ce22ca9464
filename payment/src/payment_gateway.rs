use crate::payment_api::PaymentBackend;
use actix::prelude::*;
use common::errors::ApiError;
use common::logger::Logger;
use common::types::payment::{PaymentIntent, PaymentIntentRequest, PaymentVerification};
use common::utils::{cents_to_dollars, format_currency};
use std::collections::HashMap;

/// Creates payment intents for orders and verifies them afterwards.
pub struct PaymentGateway<B: PaymentBackend> {
    backend: B,
    /// Last intent created per order id.
    intents: HashMap<String, PaymentIntent>,
    logger: Logger,
}

impl<B: PaymentBackend> PaymentGateway<B> {
    pub fn new(backend: B, logger: Logger) -> Self {
        Self {
            backend,
            intents: HashMap::new(),
            logger,
        }
    }
}

impl<B: PaymentBackend> Actor for PaymentGateway<B> {
    type Context = Context<Self>;

    fn started(&mut self, _ctx: &mut Self::Context) {
        self.logger.debug("Payment gateway ready");
    }
}

#[derive(Message, Debug, Clone)]
#[rtype(result = "Result<PaymentIntent, ApiError>")]
pub struct CreatePaymentIntent(pub PaymentIntentRequest);

#[derive(Message, Debug, Clone)]
#[rtype(result = "Result<PaymentVerification, ApiError>")]
pub struct VerifyPayment {
    pub payment_intent_id: String,
}

#[derive(Message, Debug, Clone)]
#[rtype(result = "Option<PaymentIntent>")]
pub struct GetPaymentIntent {
    pub order_id: String,
}

impl<B: PaymentBackend> Handler<CreatePaymentIntent> for PaymentGateway<B> {
    type Result = ResponseActFuture<Self, Result<PaymentIntent, ApiError>>;

    fn handle(&mut self, msg: CreatePaymentIntent, _ctx: &mut Self::Context) -> Self::Result {
        let request = msg.0;
        if let Err(e) = request.validate() {
            return Box::pin(fut::ready(Err(e.into())));
        }
        let backend = self.backend.clone();
        let order_id = request.order_id.clone();
        let amount = format_currency(cents_to_dollars(request.total_price), &request.currency);
        let fut = async move { backend.create_intent(&request).await };

        Box::pin(fut.into_actor(self).map(move |res, act, _ctx| {
            match &res {
                Ok(intent) => {
                    act.logger
                        .info(format!("Payment intent for order {order_id} ({amount}) created"));
                    act.intents.insert(order_id, intent.clone());
                }
                Err(e) => act
                    .logger
                    .warn(format!("Payment intent for order {order_id} failed: {e}")),
            }
            res
        }))
    }
}

impl<B: PaymentBackend> Handler<VerifyPayment> for PaymentGateway<B> {
    type Result = ResponseActFuture<Self, Result<PaymentVerification, ApiError>>;

    fn handle(&mut self, msg: VerifyPayment, _ctx: &mut Self::Context) -> Self::Result {
        let backend = self.backend.clone();
        let fut = async move { backend.verify(&msg.payment_intent_id).await };

        Box::pin(fut.into_actor(self).map(|res, act, _ctx| {
            match &res {
                Ok(verification) => act
                    .logger
                    .info(format!("Payment status: {}", verification.status)),
                Err(e) => act.logger.warn(format!("Payment verification failed: {e}")),
            }
            res
        }))
    }
}

impl<B: PaymentBackend> Handler<GetPaymentIntent> for PaymentGateway<B> {
    type Result = Option<PaymentIntent>;

    fn handle(&mut self, msg: GetPaymentIntent, _ctx: &mut Self::Context) -> Self::Result {
        self.intents.get(&msg.order_id).cloned()
    }
}
