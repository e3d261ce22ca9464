use crate::messages::board_messages::*;
use actix::prelude::*;
use common::api::orders::OrderBackend;
use common::errors::{ApiError, ValidationError};
use common::logger::Logger;
use common::messages::channel_messages::OrderStatusUpdate;
use common::network::connections::Backoff;
use common::network::order_channel::OrderSubscription;
use common::session::session_store::{CurrentId, SessionStore};
use common::types::identity::Role;
use common::types::order_board::OrderBoard;
use common::types::order_status::OrderStatus;
use std::future::Future;

/// Dashboard of a delivery person: orders waiting for someone to pick them
/// up and the orders already assigned to them, both kept live through one
/// subscription.
pub struct DeliveryBoard<B: OrderBackend> {
    backend: B,
    session: Addr<SessionStore>,
    available: OrderBoard,
    mine: OrderBoard,
    realtime_url: Option<String>,
    backoff: Backoff,
    subscription: Option<OrderSubscription>,
    logger: Logger,
}

async fn delivery_person_id(session: &Addr<SessionStore>) -> Result<String, ApiError> {
    session
        .send(CurrentId(Role::DeliveryPerson))
        .await?
        .ok_or(ApiError::NoSession("a delivery person"))
}

impl<B: OrderBackend> DeliveryBoard<B> {
    pub fn new(
        backend: B,
        session: Addr<SessionStore>,
        realtime_url: Option<String>,
        backoff: Backoff,
        logger: Logger,
    ) -> Self {
        Self {
            backend,
            session,
            available: OrderBoard::new(),
            mine: OrderBoard::new(),
            realtime_url,
            backoff,
            subscription: None,
            logger,
        }
    }

    fn subscribe(&mut self, ctx: &mut Context<Self>) {
        let Some(url) = &self.realtime_url else {
            return;
        };
        let subscription = self.subscription.get_or_insert_with(|| {
            OrderSubscription::open(url, self.backoff.clone(), ctx.address().recipient(), &self.logger)
        });
        let mut ids = self.available.ids();
        ids.extend(self.mine.ids());
        subscription.track(ids);
    }

    /// Availability depends on server-side assignment, so the list is
    /// fetched again instead of patched.
    fn refresh_available(&mut self, ctx: &mut Context<Self>) {
        let backend = self.backend.clone();
        ctx.spawn(
            async move { backend.available_orders().await }
                .into_actor(self)
                .map(|res, act, ctx| match res {
                    Ok(orders) => {
                        act.available.replace_all(orders);
                        act.subscribe(ctx);
                    }
                    Err(e) => act.logger.warn(format!("Refreshing available orders failed: {e}")),
                }),
        );
    }

    /// Rejects moves the cached order cannot make. A delivery person only
    /// delivers or cancels orders on their way. Orders not loaded yet are
    /// left for the order service to judge.
    fn check_transition(&self, order_id: &str, next: &OrderStatus) -> Result<(), ValidationError> {
        let Some(order) = self.mine.get(order_id) else {
            return Ok(());
        };
        if order.status == OrderStatus::Delivering && order.status.can_transition_to(next) {
            Ok(())
        } else {
            Err(ValidationError::InvalidTransition {
                order_id: order.short_id().to_string(),
                from: order.status.label(),
                to: next.label(),
            })
        }
    }

    fn transition<F, Fut>(
        &mut self,
        order_id: String,
        next: OrderStatus,
        call: F,
    ) -> ResponseActFuture<Self, Result<(), ApiError>>
    where
        F: FnOnce(B, String, String) -> Fut + 'static,
        Fut: Future<Output = Result<(), ApiError>> + 'static,
    {
        if let Err(e) = self.check_transition(&order_id, &next) {
            return Box::pin(fut::ready(Err(e.into())));
        }
        let backend = self.backend.clone();
        let session = self.session.clone();
        let id = order_id.clone();
        let fut = async move {
            let person_id = delivery_person_id(&session).await?;
            call(backend, id, person_id).await
        };

        Box::pin(fut.into_actor(self).map(move |res, act, _ctx| {
            res?;
            act.mine.set_status(&order_id, next.clone());
            act.logger
                .info(format!("Order {order_id} marked {}", next.label()));
            Ok(())
        }))
    }
}

impl<B: OrderBackend> Actor for DeliveryBoard<B> {
    type Context = Context<Self>;

    fn stopped(&mut self, _ctx: &mut Self::Context) {
        self.subscription = None;
    }
}

impl<B: OrderBackend> Handler<LoadAvailable> for DeliveryBoard<B> {
    type Result = ResponseActFuture<Self, Result<usize, ApiError>>;

    fn handle(&mut self, _msg: LoadAvailable, _ctx: &mut Self::Context) -> Self::Result {
        let backend = self.backend.clone();
        let fut = async move { backend.available_orders().await };

        Box::pin(fut.into_actor(self).map(|res, act, ctx| {
            act.available.replace_all(res?);
            act.subscribe(ctx);
            Ok(act.available.len())
        }))
    }
}

impl<B: OrderBackend> Handler<LoadMine> for DeliveryBoard<B> {
    type Result = ResponseActFuture<Self, Result<usize, ApiError>>;

    fn handle(&mut self, _msg: LoadMine, _ctx: &mut Self::Context) -> Self::Result {
        let backend = self.backend.clone();
        let session = self.session.clone();
        let fut = async move {
            let person_id = delivery_person_id(&session).await?;
            backend.delivery_orders(&person_id).await
        };

        Box::pin(fut.into_actor(self).map(|res, act, ctx| {
            act.mine.replace_all(res?);
            act.subscribe(ctx);
            Ok(act.mine.len())
        }))
    }
}

impl<B: OrderBackend> Handler<AcceptOrder> for DeliveryBoard<B> {
    type Result = ResponseActFuture<Self, Result<(), ApiError>>;

    fn handle(&mut self, msg: AcceptOrder, _ctx: &mut Self::Context) -> Self::Result {
        let backend = self.backend.clone();
        let session = self.session.clone();
        let order_id = msg.0;
        let fut = async move {
            let person_id = delivery_person_id(&session).await?;
            backend.accept_order(&order_id, &person_id).await?;
            let mine = backend.delivery_orders(&person_id).await?;
            Ok::<_, ApiError>((order_id, mine))
        };

        Box::pin(fut.into_actor(self).map(|res, act, ctx| {
            let (order_id, mine) = res?;
            act.available.remove(&order_id);
            act.mine.replace_all(mine);
            act.subscribe(ctx);
            act.logger.info(format!("Accepted order {order_id}"));
            Ok(())
        }))
    }
}

impl<B: OrderBackend> Handler<MarkDelivered> for DeliveryBoard<B> {
    type Result = ResponseActFuture<Self, Result<(), ApiError>>;

    fn handle(&mut self, msg: MarkDelivered, _ctx: &mut Self::Context) -> Self::Result {
        self.transition(msg.0, OrderStatus::Delivered, |backend, order_id, person_id| async move {
            backend.mark_delivered(&order_id, &person_id).await
        })
    }
}

impl<B: OrderBackend> Handler<CancelOrder> for DeliveryBoard<B> {
    type Result = ResponseActFuture<Self, Result<(), ApiError>>;

    fn handle(&mut self, msg: CancelOrder, _ctx: &mut Self::Context) -> Self::Result {
        self.transition(msg.0, OrderStatus::Cancelled, |backend, order_id, person_id| async move {
            backend.cancel_order(&order_id, &person_id).await
        })
    }
}

impl<B: OrderBackend> Handler<OrderStatusUpdate> for DeliveryBoard<B> {
    type Result = ();

    fn handle(&mut self, msg: OrderStatusUpdate, ctx: &mut Self::Context) {
        if self.mine.apply(&msg) {
            self.logger.info(format!(
                "Order {} is now {}",
                msg.order_id,
                msg.status.label()
            ));
        }
        self.refresh_available(ctx);
    }
}

impl<B: OrderBackend> Handler<StopTracking> for DeliveryBoard<B> {
    type Result = ();

    fn handle(&mut self, _msg: StopTracking, _ctx: &mut Self::Context) {
        if self.subscription.take().is_some() {
            self.logger.debug("Live order updates closed");
        }
    }
}

impl<B: OrderBackend> Handler<GetBoards> for DeliveryBoard<B> {
    type Result = DeliveryBoards;

    fn handle(&mut self, _msg: GetBoards, _ctx: &mut Self::Context) -> Self::Result {
        DeliveryBoards {
            available: self.available.orders().to_vec(),
            mine: self.mine.orders().to_vec(),
        }
    }
}
