use crate::logger::Logger;
use crate::messages::channel_messages::{ClientEvent, OrderStatusUpdate, ServerEvent};
use crate::messages::shared_messages::ConnectionClosed;
use crate::network::communicator::Communicator;
use crate::network::connections::{Backoff, WsStream, connect};
use actix::WeakRecipient;
use actix::prelude::*;
use std::collections::BTreeSet;

/// Long-lived real-time connection of one view. Joins the room of every
/// tracked order on each (re)connection and forwards their status updates.
///
/// The view owns the channel through [`OrderSubscription`], so the channel
/// only keeps a weak handle back to the view.
pub struct OrderChannel {
    url: String,
    tracked: BTreeSet<String>,
    destination: WeakRecipient<OrderStatusUpdate>,
    communicator: Option<Communicator<OrderChannel>>,
    backoff: Backoff,
    connections: u64,
    joins_sent: u64,
    closed: bool,
    logger: Logger,
}

impl OrderChannel {
    pub fn new(
        url: impl Into<String>,
        backoff: Backoff,
        destination: Recipient<OrderStatusUpdate>,
        logger: Logger,
    ) -> Self {
        Self {
            url: url.into(),
            tracked: BTreeSet::new(),
            destination: destination.downgrade(),
            communicator: None,
            backoff,
            connections: 0,
            joins_sent: 0,
            closed: false,
            logger,
        }
    }

    fn join(&mut self, order_id: &str) {
        if let Some(communicator) = &self.communicator {
            if communicator.send(ClientEvent::JoinOrder(order_id.to_string())) {
                self.joins_sent += 1;
            }
        }
    }

    fn on_connected(&mut self, stream: WsStream, ctx: &mut Context<Self>) {
        self.communicator = Some(Communicator::new(stream, ctx.address(), &self.logger));
        self.connections += 1;
        self.backoff.reset();
        self.logger.info(format!(
            "Connected to {} (tracking {} orders)",
            self.url,
            self.tracked.len()
        ));
        let ids: Vec<String> = self.tracked.iter().cloned().collect();
        for id in ids {
            self.join(&id);
        }
    }

    fn close(&mut self, ctx: &mut Context<Self>) {
        self.closed = true;
        if let Some(mut communicator) = self.communicator.take() {
            communicator.shutdown();
        }
        ctx.stop();
    }

    fn schedule_reconnect(&mut self, ctx: &mut Context<Self>) {
        if self.closed {
            return;
        }
        let delay = self.backoff.next_delay();
        self.logger
            .debug(format!("Reconnecting in {} ms", delay.as_millis()));
        ctx.run_later(delay, |_act, ctx| ctx.notify(Connect));
    }
}

impl Actor for OrderChannel {
    type Context = Context<Self>;

    fn started(&mut self, ctx: &mut Self::Context) {
        ctx.notify(Connect);
    }

    fn stopped(&mut self, _ctx: &mut Self::Context) {
        if let Some(mut communicator) = self.communicator.take() {
            communicator.shutdown();
        }
        self.logger.debug("Channel stopped");
    }
}

#[derive(Message)]
#[rtype(result = "()")]
struct Connect;

/// Adds order ids to the subscription set.
#[derive(Message, Debug, Clone)]
#[rtype(result = "()")]
pub struct Track(pub Vec<String>);

/// Closes the socket and stops the channel.
#[derive(Message, Debug, Clone, Copy)]
#[rtype(result = "()")]
pub struct Close;

/// Asks the channel for a [`ChannelStatus`] snapshot.
#[derive(Message)]
#[rtype(result = "ChannelStatus")]
pub struct GetChannelStatus;

/// Snapshot of a channel's connection and subscriptions.
#[derive(Debug, Clone, PartialEq, Eq, MessageResponse)]
pub struct ChannelStatus {
    /// Whether a socket is currently open.
    pub connected: bool,
    /// Tracked order ids, sorted.
    pub tracked: Vec<String>,
    /// Successful connections so far, reconnections included.
    pub connections: u64,
    /// `join_order` events handed to the socket, rejoins included.
    pub joins_sent: u64,
}

impl Handler<Connect> for OrderChannel {
    type Result = ResponseActFuture<Self, ()>;

    fn handle(&mut self, _msg: Connect, _ctx: &mut Self::Context) -> Self::Result {
        let url = self.url.clone();
        Box::pin(
            async move { connect(&url).await }
                .into_actor(self)
                .map(|res, act, ctx| {
                    if act.closed {
                        return;
                    }
                    match res {
                        Ok(stream) => act.on_connected(stream, ctx),
                        Err(e) => {
                            act.logger.warn(format!("Could not connect to {}: {e}", act.url));
                            act.schedule_reconnect(ctx);
                        }
                    }
                }),
        )
    }
}

impl Handler<Track> for OrderChannel {
    type Result = ();

    fn handle(&mut self, msg: Track, _ctx: &mut Self::Context) {
        for id in msg.0 {
            if self.tracked.insert(id.clone()) {
                self.join(&id);
            }
        }
    }
}

impl Handler<ServerEvent> for OrderChannel {
    type Result = ();

    fn handle(&mut self, msg: ServerEvent, ctx: &mut Self::Context) {
        match msg {
            ServerEvent::OrderStatusUpdate(update) => {
                if !self.tracked.contains(&update.order_id) {
                    self.logger
                        .debug(format!("Ignoring update for untracked order {}", update.order_id));
                } else if let Some(destination) = self.destination.upgrade() {
                    destination.do_send(update);
                } else {
                    self.logger.debug("Owner is gone, closing");
                    self.close(ctx);
                }
            }
            ServerEvent::Other(event) => self.logger.debug(format!("Ignoring event {event}")),
        }
    }
}

impl Handler<ConnectionClosed> for OrderChannel {
    type Result = ();

    fn handle(&mut self, msg: ConnectionClosed, ctx: &mut Self::Context) {
        let current = self
            .communicator
            .as_ref()
            .is_some_and(|c| c.connection_id == msg.connection_id);
        if !current {
            return;
        }
        if let Some(mut communicator) = self.communicator.take() {
            communicator.shutdown();
        }
        self.logger.warn("Real-time connection lost");
        self.schedule_reconnect(ctx);
    }
}

impl Handler<Close> for OrderChannel {
    type Result = ();

    fn handle(&mut self, _msg: Close, ctx: &mut Self::Context) {
        self.close(ctx);
    }
}

impl Handler<GetChannelStatus> for OrderChannel {
    type Result = ChannelStatus;

    fn handle(&mut self, _msg: GetChannelStatus, _ctx: &mut Self::Context) -> Self::Result {
        ChannelStatus {
            connected: self.communicator.is_some(),
            tracked: self.tracked.iter().cloned().collect(),
            connections: self.connections,
            joins_sent: self.joins_sent,
        }
    }
}

/// Handle owned by a view. The channel lives exactly as long as the handle:
/// dropping it closes the socket.
pub struct OrderSubscription {
    channel: Addr<OrderChannel>,
}

impl OrderSubscription {
    /// Must be called from inside a running actix system.
    pub fn open(
        url: &str,
        backoff: Backoff,
        destination: Recipient<OrderStatusUpdate>,
        logger: &Logger,
    ) -> Self {
        let channel = OrderChannel::new(url, backoff, destination, logger.scoped("realtime")).start();
        Self { channel }
    }

    pub fn track<I>(&self, ids: I)
    where
        I: IntoIterator<Item = String>,
    {
        let ids: Vec<String> = ids.into_iter().collect();
        if !ids.is_empty() {
            self.channel.do_send(Track(ids));
        }
    }

    pub async fn status(&self) -> Result<ChannelStatus, MailboxError> {
        self.channel.send(GetChannelStatus).await
    }

    pub fn close(self) {}
}

impl Drop for OrderSubscription {
    fn drop(&mut self) {
        self.channel.do_send(Close);
    }
}
