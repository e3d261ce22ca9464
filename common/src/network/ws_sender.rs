use crate::logger::Logger;
use crate::messages::channel_messages::ClientEvent;
use crate::messages::shared_messages::Shutdown;
use crate::network::connections::WsWriter;
use actix::prelude::*;
use futures::SinkExt;
use std::collections::VecDeque;
use tokio_tungstenite::tungstenite::Message as Frame;

/// Writes [`ClientEvent`]s to the socket as JSON text frames, one at a time
/// and in the order they were queued.
pub struct WsSender {
    writer: Option<WsWriter>,
    queue: VecDeque<ClientEvent>,
    logger: Logger,
}

impl WsSender {
    pub fn new(writer: WsWriter, logger: Logger) -> Self {
        Self {
            writer: Some(writer),
            queue: VecDeque::new(),
            logger,
        }
    }
}

impl Actor for WsSender {
    type Context = Context<Self>;
}

/// Writes the frame at the head of the queue.
#[derive(Message)]
#[rtype(result = "()")]
struct ProcessQueue;

impl Handler<ClientEvent> for WsSender {
    type Result = ();

    fn handle(&mut self, msg: ClientEvent, ctx: &mut Self::Context) {
        self.queue.push_back(msg);
        if self.queue.len() == 1 {
            ctx.notify(ProcessQueue);
        }
    }
}

impl Handler<ProcessQueue> for WsSender {
    type Result = ResponseActFuture<Self, ()>;

    fn handle(&mut self, _msg: ProcessQueue, _ctx: &mut Self::Context) -> Self::Result {
        if let (Some(mut writer), Some(msg)) = (self.writer.take(), self.queue.front().cloned()) {
            let fut = async move {
                let frame = match msg.to_frame() {
                    Ok(frame) => frame,
                    Err(e) => return (Some(writer), Err(e.to_string())),
                };
                match writer.send(Frame::text(frame)).await {
                    Ok(()) => (Some(writer), Ok(())),
                    Err(e) => (None, Err(format!("Error writing to socket: {e}"))),
                }
            };

            Box::pin(fut.into_actor(self).map(|(writer, res), act, ctx| {
                act.writer = writer;
                act.queue.pop_front();
                if let Err(err_msg) = res {
                    act.logger.warn(err_msg);
                }
                if act.writer.is_none() {
                    act.queue.clear();
                } else if !act.queue.is_empty() {
                    ctx.notify(ProcessQueue);
                }
            }))
        } else {
            Box::pin(async {}.into_actor(self))
        }
    }
}

impl Handler<Shutdown> for WsSender {
    type Result = ();

    fn handle(&mut self, _msg: Shutdown, ctx: &mut Self::Context) {
        self.queue.clear();
        if let Some(mut writer) = self.writer.take() {
            actix::spawn(async move {
                let _ = writer.close().await;
            });
        }
        ctx.stop();
    }
}
