use crate::errors::ChannelError;
use crate::logger::Logger;
use crate::messages::channel_messages::ServerEvent;
use crate::messages::shared_messages::{ConnectionClosed, Shutdown};
use crate::network::connections::WsReader;
use actix::dev::ToEnvelope;
use actix::prelude::*;
use futures::StreamExt;
use tokio_tungstenite::tungstenite::Message;
use uuid::Uuid;

/// Reads frames off the socket and forwards parsed [`ServerEvent`]s to its
/// destination. Reports [`ConnectionClosed`] once the stream ends.
pub struct WsReceiver<A>
where
    A: Actor + Handler<ServerEvent> + Handler<ConnectionClosed>,
{
    connection_id: Uuid,
    reader: Option<WsReader>,
    destination: Addr<A>,
    logger: Logger,
}

impl<A> WsReceiver<A>
where
    A: Actor + Handler<ServerEvent> + Handler<ConnectionClosed>,
{
    pub fn new(reader: WsReader, connection_id: Uuid, destination: Addr<A>, logger: Logger) -> Self {
        Self {
            connection_id,
            reader: Some(reader),
            destination,
            logger,
        }
    }
}

impl<A> Actor for WsReceiver<A>
where
    A: Actor + Handler<ServerEvent> + Handler<ConnectionClosed> + 'static,
    A::Context: ToEnvelope<A, ServerEvent> + ToEnvelope<A, ConnectionClosed>,
{
    type Context = Context<Self>;

    fn started(&mut self, ctx: &mut Self::Context) {
        let Some(mut reader) = self.reader.take() else {
            self.logger.error("Receiver started without a stream");
            ctx.stop();
            return;
        };
        let addr = self.destination.clone();
        let logger = self.logger.clone();
        let connection_id = self.connection_id;

        ctx.spawn(
            async move {
                while let Some(frame) = reader.next().await {
                    match frame {
                        Ok(Message::Text(text)) => match ServerEvent::parse(text.as_str()) {
                            Ok(event) => addr.do_send(event),
                            Err(e) => logger.warn(format!("Skipping frame: {e}")),
                        },
                        Ok(Message::Close(_)) => break,
                        Ok(_) => {}
                        Err(e) => {
                            logger.warn(ChannelError::from(e).to_string());
                            break;
                        }
                    }
                }
                logger.debug(format!("Connection {connection_id} closed"));
                addr.do_send(ConnectionClosed { connection_id });
            }
            .into_actor(self)
            .map(|_, _act, ctx| ctx.stop()),
        );
    }
}

impl<A> Handler<Shutdown> for WsReceiver<A>
where
    A: Actor + Handler<ServerEvent> + Handler<ConnectionClosed> + 'static,
    A::Context: ToEnvelope<A, ServerEvent> + ToEnvelope<A, ConnectionClosed>,
{
    type Result = ();

    fn handle(&mut self, _msg: Shutdown, ctx: &mut Self::Context) {
        ctx.stop();
    }
}
