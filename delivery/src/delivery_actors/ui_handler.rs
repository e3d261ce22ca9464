use crate::commands::{self, Command, HELP};
use crate::delivery_actors::delivery_board::DeliveryBoard;
use crate::messages::board_messages::*;
use actix::prelude::*;
use common::api::HttpApi;
use common::app_context::AppContext;
use common::errors::ApiError;
use common::logger::Logger;
use common::messages::shared_messages::IncomingLine;
use common::render;
use common::session::session_store::{GetIdentity, Logout, SignIn};
use common::types::dtos::Credentials;
use common::types::identity::{DeliveryPersonProfile, Identity, Role};
use std::future::Future;
use std::sync::Arc;
use tokio::sync::Notify;

/// Actor UIHandler: delivery person console.
pub struct UIHandler {
    context: AppContext,
    board: Addr<DeliveryBoard<HttpApi>>,
    shutdown: Arc<Notify>,
    logger: Logger,
}

fn start_board(context: &AppContext) -> Addr<DeliveryBoard<HttpApi>> {
    DeliveryBoard::new(
        context.api.clone(),
        context.session.clone(),
        Some(context.config.realtime_url.clone()),
        context.backoff.clone(),
        context.logger.scoped("board"),
    )
    .start()
}

pub fn profile_card(profile: &DeliveryPersonProfile) -> String {
    let status = if profile.is_available {
        "available"
    } else {
        "off duty"
    };
    format!(
        "{} ({status})\n  {}  {}\n  vehicle {}  license {}\n  now at {}",
        profile.name,
        profile.email,
        profile.mobile,
        profile.vehicle_number,
        profile.license_number,
        profile.current_location
    )
}

/// Token and profile of the signed-in delivery person.
async fn signed_in(context: &AppContext) -> Result<(String, DeliveryPersonProfile), ApiError> {
    match context.session.send(GetIdentity).await? {
        Identity::DeliveryPerson { token, profile } => Ok((token, profile)),
        _ => Err(ApiError::NoSession("a delivery person")),
    }
}

impl UIHandler {
    pub fn new(context: AppContext, shutdown: Arc<Notify>) -> Self {
        Self {
            board: start_board(&context),
            shutdown,
            logger: context.logger.clone(),
            context,
        }
    }

    fn report(&self, err: ApiError) {
        if err.is_validation() {
            self.logger.warn(err.to_string());
        } else {
            self.logger.error(err.to_string());
        }
    }

    fn run<F>(&mut self, ctx: &mut Context<Self>, fut: F)
    where
        F: Future<Output = Result<String, ApiError>> + 'static,
    {
        ctx.wait(fut.into_actor(self).map(|res, act, _ctx| match res {
            Ok(text) if text.is_empty() => {}
            Ok(text) => println!("{text}"),
            Err(e) => act.report(e),
        }));
    }

    /// Clears the session and starts over with an empty board.
    fn sign_out<F>(&mut self, ctx: &mut Context<Self>, before: F, farewell: &'static str)
    where
        F: Future<Output = Result<(), ApiError>> + 'static,
    {
        let session = self.context.session.clone();
        let fut = async move {
            before.await?;
            session.send(Logout).await??;
            Ok::<(), ApiError>(())
        };
        ctx.wait(fut.into_actor(self).map(move |res, act, _ctx| match res {
            Ok(()) => {
                act.board.do_send(StopTracking);
                act.board = start_board(&act.context);
                act.logger.info(farewell);
            }
            Err(e) => act.report(e),
        }));
    }

    fn dispatch(&mut self, command: Command, ctx: &mut Context<Self>) {
        let context = self.context.clone();
        let board = self.board.clone();
        match command {
            Command::Help => println!("{HELP}"),
            Command::Quit => {
                self.board.do_send(StopTracking);
                self.shutdown.notify_one();
            }
            Command::Login { email, password } => self.run(ctx, async move {
                let identity = context
                    .api
                    .login(Role::DeliveryPerson, &Credentials { email, password })
                    .await?;
                let name = identity.display_name().to_string();
                context.session.send(SignIn(identity)).await??;
                let count = board.send(LoadMine).await??;
                Ok(format!("Welcome, {name}. You have {count} assigned orders"))
            }),
            Command::Register(form) => self.run(ctx, async move {
                let identity = context.api.register_delivery_person(&form).await?;
                context.session.send(SignIn(identity)).await??;
                Ok(format!("Welcome aboard, {}", form.name))
            }),
            Command::Logout => self.sign_out(ctx, async { Ok(()) }, "Signed out"),
            Command::Profile => self.run(ctx, async move {
                let (_, profile) = signed_in(&context).await?;
                let fresh = context.api.delivery_profile(&profile.id).await?;
                Ok(profile_card(&fresh))
            }),
            Command::SetAvailable(available) => self.run(ctx, async move {
                let (token, profile) = signed_in(&context).await?;
                let mut fresh = context.api.delivery_profile(&profile.id).await?;
                fresh.is_available = available;
                let saved = context.api.update_delivery_profile(&fresh).await?;
                let card = profile_card(&saved);
                context
                    .session
                    .send(SignIn(Identity::DeliveryPerson { token, profile: saved }))
                    .await??;
                Ok(card)
            }),
            Command::DeleteAccount => {
                let api = context.api.clone();
                let fut = async move {
                    let (_, profile) = signed_in(&context).await?;
                    api.delete_delivery_person(&profile.id).await
                };
                self.sign_out(ctx, fut, "Account deleted")
            }
            Command::Available => self.run(ctx, async move {
                board.send(LoadAvailable).await??;
                let boards = board.send(GetBoards).await?;
                Ok(render::order_list("Waiting for a delivery person", &boards.available))
            }),
            Command::Mine => self.run(ctx, async move {
                board.send(LoadMine).await??;
                let boards = board.send(GetBoards).await?;
                Ok(render::order_list("Assigned to you", &boards.mine))
            }),
            Command::Accept(order_id) => self.run(ctx, async move {
                board.send(AcceptOrder(order_id.clone())).await??;
                Ok(format!("Order {order_id} is yours"))
            }),
            Command::Deliver(order_id) => self.run(ctx, async move {
                board.send(MarkDelivered(order_id)).await??;
                Ok(String::new())
            }),
            Command::Cancel(order_id) => self.run(ctx, async move {
                board.send(CancelOrder(order_id)).await??;
                Ok(String::new())
            }),
        }
    }
}

impl Actor for UIHandler {
    type Context = Context<Self>;

    fn started(&mut self, ctx: &mut Self::Context) {
        println!("{}", render::welcome("Delivery"));
        let context = self.context.clone();
        let board = self.board.clone();
        ctx.wait(
            async move {
                let Ok((_, profile)) = signed_in(&context).await else {
                    return Ok(None);
                };
                let count = board.send(LoadMine).await??;
                Ok::<_, ApiError>(Some((profile.name, count)))
            }
            .into_actor(self)
            .map(|res, act, _ctx| match res {
                Ok(Some((name, count))) => act
                    .logger
                    .info(format!("Welcome back, {name}. {count} assigned orders")),
                Ok(None) => {}
                Err(e) => act.report(e),
            }),
        );
    }
}

impl Handler<IncomingLine> for UIHandler {
    type Result = ();

    fn handle(&mut self, msg: IncomingLine, ctx: &mut Self::Context) {
        match commands::parse(&msg.0) {
            Ok(Some(command)) => self.dispatch(command, ctx),
            Ok(None) => {}
            Err(e) => self.logger.warn(e.to_string()),
        }
    }
}
