use actix::Actor;
use colored::Color;
use common::app_context::AppContext;
use common::config::Config;
use common::logger::Logger;
use common::network::line_reader::LineReader;
use delivery::delivery_actors::ui_handler::UIHandler;
use std::sync::Arc;
use tokio::signal::ctrl_c;
use tokio::sync::Notify;

#[actix::main]
async fn main() -> std::io::Result<()> {
    let logger = Logger::with_color("delivery", Color::Cyan);
    let config = Config::load(&logger);
    let context = AppContext::start(config, logger.clone());

    let shutdown = Arc::new(Notify::new());
    let ui = UIHandler::new(context, shutdown.clone()).start();
    LineReader::new(tokio::io::stdin(), ui).start();

    tokio::select! {
        _ = ctrl_c() => logger.info("Ctrl-C received, shutting down"),
        _ = shutdown.notified() => logger.info("Bye"),
    }
    actix::System::current().stop();
    Ok(())
}
