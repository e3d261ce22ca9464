use crate::messages::shared_messages::IncomingLine;
use actix::dev::ToEnvelope;
use actix::prelude::*;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};

/// Forwards every line of an async reader (stdin in the front-ends) to an
/// actor, so the actor never blocks on input.
pub struct LineReader<R, A>
where
    R: AsyncRead + Unpin + 'static,
    A: Actor + Handler<IncomingLine>,
{
    reader: Option<BufReader<R>>,
    destination: Addr<A>,
}

impl<R, A> LineReader<R, A>
where
    R: AsyncRead + Unpin + 'static,
    A: Actor + Handler<IncomingLine>,
{
    pub fn new(reader: R, destination: Addr<A>) -> Self {
        Self {
            reader: Some(BufReader::new(reader)),
            destination,
        }
    }
}

impl<R, A> Actor for LineReader<R, A>
where
    R: AsyncRead + Unpin + 'static,
    A: Actor + Handler<IncomingLine> + 'static,
    A::Context: ToEnvelope<A, IncomingLine>,
{
    type Context = Context<Self>;

    fn started(&mut self, ctx: &mut Self::Context) {
        let Some(reader) = self.reader.take() else {
            ctx.stop();
            return;
        };
        let addr = self.destination.clone();

        ctx.spawn(
            async move {
                let mut lines = reader.lines();
                while let Ok(Some(line)) = lines.next_line().await {
                    addr.do_send(IncomingLine(line));
                }
            }
            .into_actor(self)
            .map(|_, _act, ctx| ctx.stop()),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Collector {
        lines: Vec<String>,
    }

    impl Actor for Collector {
        type Context = Context<Self>;
    }

    impl Handler<IncomingLine> for Collector {
        type Result = ();

        fn handle(&mut self, msg: IncomingLine, _ctx: &mut Self::Context) {
            self.lines.push(msg.0);
        }
    }

    #[derive(Message)]
    #[rtype(result = "Vec<String>")]
    struct GetLines;

    impl Handler<GetLines> for Collector {
        type Result = MessageResult<GetLines>;

        fn handle(&mut self, _msg: GetLines, _ctx: &mut Self::Context) -> Self::Result {
            MessageResult(self.lines.clone())
        }
    }

    #[actix_rt::test]
    async fn test_lines_are_forwarded_in_order() {
        let collector = Collector { lines: Vec::new() }.start();
        let input: &'static [u8] = b"menu r1\nadd i1 2\n";
        LineReader::new(input, collector.clone()).start();

        let mut lines = Vec::new();
        for _ in 0..50 {
            lines = collector.send(GetLines).await.unwrap();
            if lines.len() == 2 {
                break;
            }
            tokio::time::sleep(std::time::Duration::from_millis(10)).await;
        }
        assert_eq!(lines, vec!["menu r1".to_string(), "add i1 2".to_string()]);
    }
}
