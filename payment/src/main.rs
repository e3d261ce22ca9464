use actix::Actor;
use common::api::HttpApi;
use common::config::Config;
use common::errors::ApiError;
use common::logger::Logger;
use common::types::payment::PaymentIntentRequest;
use common::utils::dollars_to_cents;
use payment::payment_gateway::{CreatePaymentIntent, PaymentGateway, VerifyPayment};
use std::env;
use std::process::ExitCode;
use std::sync::Arc;

fn usage(program: &str) -> ExitCode {
    eprintln!("Usage: {program} intent <order_id> <amount> [currency]");
    eprintln!("       {program} verify <payment_intent_id>");
    ExitCode::FAILURE
}

#[actix::main]
async fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("payment");
    let logger = Logger::new("payment");
    let config = Config::load(&logger);
    let api = HttpApi::new(Arc::new(config), logger.scoped("http"));
    let gateway = PaymentGateway::new(api, logger.clone()).start();

    let outcome = match args.get(1).map(String::as_str) {
        Some("intent") if args.len() >= 4 => {
            let Ok(amount) = args[3].parse::<f64>() else {
                return usage(program);
            };
            let mut request = PaymentIntentRequest::new(args[2].clone(), dollars_to_cents(amount) as f64);
            if let Some(currency) = args.get(4) {
                request.currency = currency.to_lowercase();
            }
            gateway
                .send(CreatePaymentIntent(request))
                .await
                .map_err(ApiError::from)
                .and_then(|res| res)
                .map(|intent| format!("Client secret: {}", intent.client_secret))
        }
        Some("verify") if args.len() >= 3 => gateway
            .send(VerifyPayment {
                payment_intent_id: args[2].clone(),
            })
            .await
            .map_err(ApiError::from)
            .and_then(|res| res)
            .map(|v| v.message.unwrap_or(v.status)),
        _ => return usage(program),
    };

    match outcome {
        Ok(message) => {
            logger.info(message);
            ExitCode::SUCCESS
        }
        Err(e) => {
            logger.error(e.to_string());
            ExitCode::FAILURE
        }
    }
}
