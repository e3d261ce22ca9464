use crate::logger::Logger;
use crate::messages::channel_messages::{ClientEvent, ServerEvent};
use crate::messages::shared_messages::{ConnectionClosed, Shutdown};
use crate::network::connections::WsStream;
use crate::network::ws_receiver::WsReceiver;
use crate::network::ws_sender::WsSender;
use actix::prelude::*;
use futures::StreamExt;
use uuid::Uuid;

/// Sender and receiver actors sharing one WebSocket connection.
pub struct Communicator<A>
where
    A: Actor<Context = Context<A>> + Handler<ServerEvent> + Handler<ConnectionClosed>,
{
    pub connection_id: Uuid,
    pub sender: Option<Addr<WsSender>>,
    pub receiver: Option<Addr<WsReceiver<A>>>,
}

impl<A> Communicator<A>
where
    A: Actor<Context = Context<A>> + Handler<ServerEvent> + Handler<ConnectionClosed>,
{
    pub fn new(stream: WsStream, destination: Addr<A>, logger: &Logger) -> Self {
        let connection_id = Uuid::new_v4();
        let (write_half, read_half) = stream.split();
        Self {
            connection_id,
            sender: Some(WsSender::new(write_half, logger.scoped("ws-out")).start()),
            receiver: Some(
                WsReceiver::new(read_half, connection_id, destination, logger.scoped("ws-in"))
                    .start(),
            ),
        }
    }

    /// Queues an event. Returns `false` once the communicator was shut down.
    pub fn send(&self, event: ClientEvent) -> bool {
        match &self.sender {
            Some(sender) if sender.connected() => {
                sender.do_send(event);
                true
            }
            _ => false,
        }
    }

    pub fn shutdown(&mut self) {
        if let Some(sender) = self.sender.take() {
            sender.do_send(Shutdown);
        }
        if let Some(receiver) = self.receiver.take() {
            receiver.do_send(Shutdown);
        }
    }
}
