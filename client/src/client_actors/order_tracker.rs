use crate::messages::order_messages::*;
use actix::prelude::*;
use common::api::orders::OrderBackend;
use common::errors::ApiError;
use common::logger::Logger;
use common::messages::channel_messages::OrderStatusUpdate;
use common::network::connections::Backoff;
use common::network::order_channel::OrderSubscription;
use common::session::session_store::{CurrentId, SessionStore};
use common::types::identity::Role;
use common::types::order::Order;
use common::types::order_board::OrderBoard;
use common::types::order_status::OrderTimeline;

/// "Track orders" view of a user: the order list, the open detail and the
/// live subscription feeding both.
pub struct OrderTracker<B: OrderBackend> {
    backend: B,
    session: Addr<SessionStore>,
    board: OrderBoard,
    realtime_url: Option<String>,
    backoff: Backoff,
    subscription: Option<OrderSubscription>,
    logger: Logger,
}

impl<B: OrderBackend> OrderTracker<B> {
    /// Without `realtime_url` the tracker never opens a live channel.
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
            board: OrderBoard::new(),
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
        subscription.track(self.board.ids());
    }
}

impl<B: OrderBackend> Actor for OrderTracker<B> {
    type Context = Context<Self>;

    fn stopped(&mut self, _ctx: &mut Self::Context) {
        self.subscription = None;
    }
}

impl<B: OrderBackend> Handler<LoadOrders> for OrderTracker<B> {
    type Result = ResponseActFuture<Self, Result<usize, ApiError>>;

    fn handle(&mut self, _msg: LoadOrders, _ctx: &mut Self::Context) -> Self::Result {
        let backend = self.backend.clone();
        let session = self.session.clone();
        let fut = async move {
            let user_id = session
                .send(CurrentId(Role::User))
                .await?
                .ok_or(ApiError::NoSession("a user"))?;
            backend.user_orders(&user_id).await
        };

        Box::pin(fut.into_actor(self).map(|res, act, ctx| {
            let orders = res?;
            act.board.replace_all(orders);
            act.subscribe(ctx);
            Ok(act.board.len())
        }))
    }
}

impl<B: OrderBackend> Handler<SelectOrder> for OrderTracker<B> {
    type Result = Option<(Order, OrderTimeline)>;

    fn handle(&mut self, msg: SelectOrder, _ctx: &mut Self::Context) -> Self::Result {
        let order = self.board.select(&msg.0)?.clone();
        let timeline = order.timeline();
        Some((order, timeline))
    }
}

impl<B: OrderBackend> Handler<OrderStatusUpdate> for OrderTracker<B> {
    type Result = ();

    fn handle(&mut self, msg: OrderStatusUpdate, _ctx: &mut Self::Context) {
        if self.board.apply(&msg) {
            let short = self
                .board
                .get(&msg.order_id)
                .map(|o| o.short_id().to_string())
                .unwrap_or_else(|| msg.order_id.clone());
            self.logger
                .info(format!("Order #{short} is now {}", msg.status.label()));
        }
    }
}

impl<B: OrderBackend> Handler<StopTracking> for OrderTracker<B> {
    type Result = ();

    fn handle(&mut self, _msg: StopTracking, _ctx: &mut Self::Context) {
        if self.subscription.take().is_some() {
            self.logger.debug("Live order updates closed");
        }
        self.board.clear_selection();
    }
}

impl<B: OrderBackend> Handler<GetBoard> for OrderTracker<B> {
    type Result = MessageResult<GetBoard>;

    fn handle(&mut self, _msg: GetBoard, _ctx: &mut Self::Context) -> Self::Result {
        MessageResult(self.board.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use common::session::session_store::SignIn;
    use common::session::storage::SessionFile;
    use common::types::identity::{Identity, UserProfile};
    use common::types::order_status::{Milestone, OrderStatus, StepState};
    use std::cell::Cell;
    use std::rc::Rc;

    #[derive(Clone, Default)]
    struct FakeOrders {
        fetches: Rc<Cell<u32>>,
    }

    fn order(id: &str, status: OrderStatus) -> Order {
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap();
        Order {
            id: id.to_string(),
            user_id: "u1".to_string(),
            items: Vec::new(),
            total_price: 1500.0,
            status,
            created_at: at,
            updated_at: at,
            delivery_person_id: None,
        }
    }

    impl OrderBackend for FakeOrders {
        async fn user_orders(&self, _user_id: &str) -> Result<Vec<Order>, ApiError> {
            self.fetches.set(self.fetches.get() + 1);
            Ok(vec![order("aaaa000001", OrderStatus::Paid), order("aaaa000002", OrderStatus::Delivering)])
        }

        async fn delivery_orders(&self, _id: &str) -> Result<Vec<Order>, ApiError> {
            Ok(Vec::new())
        }

        async fn available_orders(&self) -> Result<Vec<Order>, ApiError> {
            Ok(Vec::new())
        }

        async fn accept_order(&self, _order_id: &str, _id: &str) -> Result<(), ApiError> {
            Ok(())
        }

        async fn mark_delivered(&self, _order_id: &str, _id: &str) -> Result<(), ApiError> {
            Ok(())
        }

        async fn cancel_order(&self, _order_id: &str, _id: &str) -> Result<(), ApiError> {
            Ok(())
        }
    }

    fn update(order_id: &str, status: OrderStatus, minute: u32) -> OrderStatusUpdate {
        OrderStatusUpdate {
            order_id: order_id.to_string(),
            status,
            updated_at: Utc.with_ymd_and_hms(2024, 5, 1, 10, minute, 0).unwrap(),
        }
    }

    async fn start(backend: FakeOrders, signed_in: bool) -> (Addr<OrderTracker<FakeOrders>>, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let session = SessionStore::load(
            SessionFile::new(dir.path().join("user-storage.json")),
            Logger::new("session"),
        )
        .start();
        if signed_in {
            let identity = Identity::User {
                token: "t".to_string(),
                profile: UserProfile {
                    id: "u1".to_string(),
                    username: "kasun".to_string(),
                    email: "k@example.com".to_string(),
                    role: None,
                },
            };
            session.send(SignIn(identity)).await.unwrap().unwrap();
        }
        let tracker =
            OrderTracker::new(backend, session, None, Backoff::default(), Logger::new("orders")).start();
        (tracker, dir)
    }

    #[actix_rt::test]
    async fn test_duplicate_updates_are_idempotent() {
        let (tracker, _dir) = start(FakeOrders::default(), true).await;
        assert_eq!(tracker.send(LoadOrders).await.unwrap().unwrap(), 2);

        tracker.send(update("aaaa000001", OrderStatus::Delivering, 5)).await.unwrap();
        let once = tracker.send(GetBoard).await.unwrap();
        tracker.send(update("aaaa000001", OrderStatus::Delivering, 5)).await.unwrap();
        let twice = tracker.send(GetBoard).await.unwrap();

        assert_eq!(once, twice);
        assert_eq!(
            twice.get("aaaa000001").unwrap().status,
            OrderStatus::Delivering
        );
    }

    #[actix_rt::test]
    async fn test_update_patches_open_detail_without_refetch() {
        let backend = FakeOrders::default();
        let (tracker, _dir) = start(backend.clone(), true).await;
        tracker.send(LoadOrders).await.unwrap().unwrap();
        let (_, timeline) = tracker
            .send(SelectOrder("aaaa000002".to_string()))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(timeline.state(Milestone::Delivering), StepState::Current);

        tracker.send(update("aaaa000002", OrderStatus::Delivered, 9)).await.unwrap();

        let board = tracker.send(GetBoard).await.unwrap();
        assert_eq!(board.selected().unwrap().status, OrderStatus::Delivered);
        assert_eq!(board.selected_timeline().state(Milestone::Delivered), StepState::Current);
        assert_eq!(backend.fetches.get(), 1);
    }

    #[actix_rt::test]
    async fn test_loading_without_user_is_no_session() {
        let (tracker, _dir) = start(FakeOrders::default(), false).await;
        let err = tracker.send(LoadOrders).await.unwrap().unwrap_err();
        assert!(matches!(err, ApiError::NoSession(_)));
    }

    #[actix_rt::test]
    async fn test_stop_tracking_clears_selection() {
        let (tracker, _dir) = start(FakeOrders::default(), true).await;
        tracker.send(LoadOrders).await.unwrap().unwrap();
        tracker.send(SelectOrder("aaaa000001".to_string())).await.unwrap();
        tracker.send(StopTracking).await.unwrap();
        assert!(tracker.send(GetBoard).await.unwrap().selected().is_none());
    }
}
