use actix::prelude::*;
use uuid::Uuid;

/// Stops a socket actor and drops its half of the stream.
#[derive(Message, Debug, Clone, Copy)]
#[rtype(result = "()")]
pub struct Shutdown;

/// Sent by a receiver when its socket stops yielding frames.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
#[rtype(result = "()")]
pub struct ConnectionClosed {
    pub connection_id: Uuid,
}

/// A line typed by the user on stdin.
#[derive(Message, Debug, Clone)]
#[rtype(result = "()")]
pub struct IncomingLine(pub String);
