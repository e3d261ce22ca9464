use crate::client_actors::cart_store::CartStore;
use crate::client_actors::order_tracker::OrderTracker;
use crate::commands::{self, Command, HELP};
use crate::messages::cart_messages::*;
use crate::messages::order_messages::*;
use actix::prelude::*;
use common::api::HttpApi;
use common::api::menu::MenuBackend;
use common::app_context::AppContext;
use common::errors::ApiError;
use common::logger::Logger;
use common::messages::shared_messages::IncomingLine;
use common::render;
use common::session::session_store::{GetIdentity, Logout, SignIn};
use common::types::cart::CatalogRef;
use common::types::dtos::{Credentials, UserRegistration};
use common::types::menu::MenuItem;
use common::types::order::Order;
use common::types::order_board::OrderBoard;
use common::types::payment::PaymentIntentRequest;
use common::types::review::ReviewDraft;
use common::utils::format_cents;
use payment::payment_gateway::{CreatePaymentIntent, PaymentGateway, VerifyPayment};
use std::future::Future;
use std::sync::Arc;
use tokio::sync::Notify;

/// Actor UIHandler: turns typed commands into messages for the stores and
/// prints what comes back.
pub struct UIHandler {
    context: AppContext,
    cart: Addr<CartStore<HttpApi>>,
    tracker: Addr<OrderTracker<HttpApi>>,
    payments: Addr<PaymentGateway<HttpApi>>,
    /// Last menu shown, used to resolve `add <item_id>` without a request.
    menu: Vec<MenuItem>,
    shutdown: Arc<Notify>,
    logger: Logger,
}

fn start_cart(context: &AppContext) -> Addr<CartStore<HttpApi>> {
    CartStore::new(
        context.api.clone(),
        context.session.clone(),
        context.logger.scoped("cart"),
    )
    .start()
}

fn start_tracker(context: &AppContext) -> Addr<OrderTracker<HttpApi>> {
    OrderTracker::new(
        context.api.clone(),
        context.session.clone(),
        Some(context.config.realtime_url.clone()),
        context.backoff.clone(),
        context.logger.scoped("orders"),
    )
    .start()
}

/// Finds an order by full id or by the short id printed on its card.
pub fn find_order<'a>(board: &'a OrderBoard, id: &str) -> Option<&'a Order> {
    let id = id.trim_start_matches('#');
    if id.is_empty() {
        return None;
    }
    board
        .get(id)
        .or_else(|| board.orders().iter().find(|o| o.id.ends_with(id)))
}

fn cart_view(outcome: CartOutcome) -> String {
    match outcome {
        CartOutcome::Synced(items) => render::cart(&items),
        CartOutcome::Inactive => "Sign in as a user to use the cart".to_string(),
    }
}

impl UIHandler {
    pub fn new(context: AppContext, shutdown: Arc<Notify>) -> Self {
        let payments =
            PaymentGateway::new(context.api.clone(), context.logger.scoped("payment")).start();
        Self {
            cart: start_cart(&context),
            tracker: start_tracker(&context),
            payments,
            menu: Vec::new(),
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

    /// Runs one command to completion before the next line is handled.
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

    fn dispatch(&mut self, command: Command, ctx: &mut Context<Self>) {
        let api = self.context.api.clone();
        let session = self.context.session.clone();
        match command {
            Command::Help => println!("{HELP}"),
            Command::Quit => {
                self.tracker.do_send(StopTracking);
                self.shutdown.notify_one();
            }
            Command::Login { role, email, password } => self.run(ctx, async move {
                let identity = api.login(role, &Credentials { email, password }).await?;
                let name = identity.display_name().to_string();
                session.send(SignIn(identity)).await??;
                Ok(format!("Welcome, {name}"))
            }),
            Command::Register { username, email, password, confirmed_password } => {
                let form = UserRegistration { username, email, password, confirmed_password };
                self.run(ctx, async move {
                    let identity = api.register_user(&form).await?;
                    let name = identity.display_name().to_string();
                    session.send(SignIn(identity)).await??;
                    Ok(format!("Account created, welcome {name}"))
                })
            }
            Command::Logout => self.logout(ctx),
            Command::WhoAmI => self.run(ctx, async move {
                let identity = session.send(GetIdentity).await?;
                Ok(match identity.role() {
                    Some(role) => format!("Signed in as {} ({role})", identity.display_name()),
                    None => "Browsing as a guest".to_string(),
                })
            }),
            Command::Restaurants => self.run(ctx, async move {
                Ok(render::restaurants(&api.restaurants().await?))
            }),
            Command::Restaurant(id) => self.run(ctx, async move {
                let restaurant = api.restaurant(&id).await?;
                let reviews = api.reviews_for(&id).await?;
                Ok(format!(
                    "{}\n  {}  {}\n  {}",
                    restaurant.name,
                    restaurant.location,
                    restaurant.mobile,
                    render::reviews(&reviews)
                ))
            }),
            Command::Menu(restaurant_id) => self.show_menu(restaurant_id, ctx),
            Command::Add { item_id, quantity } => {
                let cached = self.menu.iter().find(|m| m.id == item_id).map(MenuItem::catalog_ref);
                let cart = self.cart.clone();
                self.run(ctx, async move {
                    let item: CatalogRef = match cached {
                        Some(item) => item,
                        None => api.menu_item(&item_id).await?.catalog_ref(),
                    };
                    Ok(cart_view(cart.send(AddToCart { item, quantity }).await??))
                })
            }
            Command::Cart => {
                let cart = self.cart.clone();
                self.run(ctx, async move { Ok(cart_view(cart.send(FetchCart).await??)) })
            }
            Command::Update { item_id, quantity } => {
                let cart = self.cart.clone();
                self.run(ctx, async move {
                    Ok(cart_view(cart.send(UpdateCartItem { item_id, quantity }).await??))
                })
            }
            Command::Remove(item_id) => {
                let cart = self.cart.clone();
                self.run(ctx, async move {
                    Ok(cart_view(cart.send(RemoveCartItem { item_id }).await??))
                })
            }
            Command::Clear => {
                let cart = self.cart.clone();
                self.run(ctx, async move { Ok(cart_view(cart.send(ClearCart).await??)) })
            }
            Command::Checkout(address) => {
                let cart = self.cart.clone();
                self.run(ctx, async move {
                    Ok(match cart.send(Checkout { address }).await?? {
                        CartOutcome::Synced(_) => {
                            "Order placed, type 'orders' to follow it".to_string()
                        }
                        inactive => cart_view(inactive),
                    })
                })
            }
            Command::Orders => {
                let tracker = self.tracker.clone();
                self.run(ctx, async move {
                    tracker.send(LoadOrders).await??;
                    let board = tracker.send(GetBoard).await?;
                    Ok(render::order_list("My orders", board.orders()))
                })
            }
            Command::Track(id) => {
                let tracker = self.tracker.clone();
                self.run(ctx, async move {
                    let board = tracker.send(GetBoard).await?;
                    let Some(order_id) = find_order(&board, &id).map(|o| o.id.clone()) else {
                        return Ok(format!("No order '{id}', type 'orders' first"));
                    };
                    Ok(match tracker.send(SelectOrder(order_id)).await? {
                        Some((order, timeline)) => render::order_detail(&order, &timeline),
                        None => String::new(),
                    })
                })
            }
            Command::Leave => self.tracker.do_send(StopTracking),
            Command::Pay(id) => {
                let tracker = self.tracker.clone();
                let payments = self.payments.clone();
                self.run(ctx, async move {
                    let board = tracker.send(GetBoard).await?;
                    let Some(order) = find_order(&board, &id) else {
                        return Ok(format!("No order '{id}', type 'orders' first"));
                    };
                    let request = PaymentIntentRequest::new(&order.id, order.total_price);
                    let intent = payments.send(CreatePaymentIntent(request)).await??;
                    Ok(format!(
                        "Payment of {} started for order #{}\n  id: {}\n  client secret: {}",
                        format_cents(order.total_price),
                        order.short_id(),
                        intent.id.as_deref().unwrap_or("-"),
                        intent.client_secret
                    ))
                })
            }
            Command::Verify(payment_intent_id) => {
                let payments = self.payments.clone();
                self.run(ctx, async move {
                    let verification = payments.send(VerifyPayment { payment_intent_id }).await??;
                    Ok(if verification.is_success() {
                        format!("Payment confirmed ({})", verification.status)
                    } else {
                        format!("Payment not completed ({})", verification.status)
                    })
                })
            }
            Command::Reviews(restaurant_id) => self.run(ctx, async move {
                Ok(render::reviews(&api.reviews_for(&restaurant_id).await?))
            }),
            Command::Review { restaurant_id, rating, text } => self.run(ctx, async move {
                let identity = session.send(GetIdentity).await?;
                let customer_id = identity
                    .user_id()
                    .ok_or(ApiError::NoSession("a user"))?
                    .to_string();
                let draft = ReviewDraft {
                    customer_name: identity.display_name().to_string(),
                    review_text: text,
                    rating,
                    restaurant_id,
                    customer_id,
                };
                api.create_review(&draft).await?;
                Ok("Thanks for your review".to_string())
            }),
        }
    }

    fn show_menu(&mut self, restaurant_id: String, ctx: &mut Context<Self>) {
        let api = self.context.api.clone();
        let fut = async move { api.menu_for(&restaurant_id).await };
        ctx.wait(fut.into_actor(self).map(|res, act, _ctx| match res {
            Ok(items) => {
                println!("{}", render::menu(&items));
                act.menu = items;
            }
            Err(e) => act.report(e),
        }));
    }

    /// Clears the session and replaces the per-user stores with fresh ones.
    fn logout(&mut self, ctx: &mut Context<Self>) {
        self.tracker.do_send(StopTracking);
        let session = self.context.session.clone();
        let fut = async move {
            session.send(Logout).await??;
            Ok::<(), ApiError>(())
        };
        ctx.wait(fut.into_actor(self).map(|res, act, _ctx| {
            if let Err(e) = res {
                return act.report(e);
            }
            act.cart = start_cart(&act.context);
            act.tracker = start_tracker(&act.context);
            act.menu.clear();
            act.logger.info("Signed out");
        }));
    }
}

impl Actor for UIHandler {
    type Context = Context<Self>;

    fn started(&mut self, ctx: &mut Self::Context) {
        println!("{}", render::welcome("Customer"));
        let session = self.context.session.clone();
        ctx.wait(
            async move { session.send(GetIdentity).await }
                .into_actor(self)
                .map(|res, act, _ctx| {
                    if let Ok(identity) = res {
                        if !identity.is_guest() {
                            act.logger.info(format!("Welcome back, {}", identity.display_name()));
                        }
                    }
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
