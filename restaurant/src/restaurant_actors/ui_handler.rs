use crate::commands::{self, Command, HELP, RegisterForm};
use crate::messages::menu_messages::*;
use crate::restaurant_actors::menu_manager::MenuManager;
use actix::prelude::*;
use common::api::HttpApi;
use common::app_context::AppContext;
use common::constants::CARD_IMAGE_TRANSFORMATIONS;
use common::errors::ApiError;
use common::logger::Logger;
use common::messages::shared_messages::IncomingLine;
use common::render;
use common::session::session_store::{CurrentId, GetIdentity, Logout, SignIn};
use common::types::dtos::{Credentials, RestaurantRegistration};
use common::types::identity::{Identity, Role};
use common::utils::image_url;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::Notify;

/// Actor UIHandler: restaurant owner console.
pub struct UIHandler {
    context: AppContext,
    menu: Addr<MenuManager<HttpApi>>,
    shutdown: Arc<Notify>,
    logger: Logger,
}

fn start_menu(context: &AppContext) -> Addr<MenuManager<HttpApi>> {
    MenuManager::new(
        context.api.clone(),
        context.session.clone(),
        context.logger.scoped("menu"),
    )
    .start()
}

fn registration(form: RegisterForm) -> RestaurantRegistration {
    RestaurantRegistration {
        name: form.name,
        email: form.email,
        password: form.password,
        location: form.location,
        owner_name: form.owner_name,
        mobile: form.mobile,
        image_url: form.image_id,
        role: "restaurant",
    }
}

impl UIHandler {
    pub fn new(context: AppContext, shutdown: Arc<Notify>) -> Self {
        Self {
            menu: start_menu(&context),
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
        let menu = self.menu.clone();
        match command {
            Command::Help => println!("{HELP}"),
            Command::Quit => self.shutdown.notify_one(),
            Command::Login { email, password } => self.run(ctx, async move {
                let identity = api
                    .login(Role::Restaurant, &Credentials { email, password })
                    .await?;
                let name = identity.display_name().to_string();
                session.send(SignIn(identity)).await??;
                let items = menu.send(LoadMenu).await??;
                Ok(format!("Welcome, {name}. Your menu has {} items", items.len()))
            }),
            Command::Register(form) => {
                let form = registration(form);
                self.run(ctx, async move {
                    let identity = api.register_restaurant(&form).await?;
                    session.send(SignIn(identity)).await??;
                    Ok(format!("{} is now on BYTEats", form.name))
                })
            }
            Command::Logout => {
                let fut = async move {
                    session.send(Logout).await??;
                    Ok::<(), ApiError>(())
                };
                ctx.wait(fut.into_actor(self).map(|res, act, _ctx| match res {
                    Ok(()) => {
                        act.menu = start_menu(&act.context);
                        act.logger.info("Signed out");
                    }
                    Err(e) => act.report(e),
                }));
            }
            Command::Profile => {
                let config = self.context.config.clone();
                self.run(ctx, async move {
                    let Identity::Restaurant { profile, .. } = session.send(GetIdentity).await? else {
                        return Err(ApiError::NoSession("a restaurant"));
                    };
                    let fresh = api.restaurant(&profile.id).await?;
                    let mut text = format!(
                        "{} ({})\n  owner: {}\n  {}  {}  {}",
                        fresh.name, fresh.id, fresh.owner_name, fresh.location, fresh.email, fresh.mobile
                    );
                    if !fresh.image_url.is_empty() {
                        let url = image_url(&config, CARD_IMAGE_TRANSFORMATIONS, &fresh.image_url);
                        text.push_str(&format!("\n  image: {url}"));
                    }
                    Ok(text)
                })
            }
            Command::Menu => self.run(ctx, async move {
                Ok(render::menu(&menu.send(LoadMenu).await??))
            }),
            Command::AddItem(draft) => self.run(ctx, async move {
                Ok(render::menu(&menu.send(CreateMenuItem(draft)).await??))
            }),
            Command::EditItem { item_id, draft } => self.run(ctx, async move {
                Ok(render::menu(&menu.send(UpdateMenuItem { item_id, draft }).await??))
            }),
            Command::DeleteItem(item_id) => self.run(ctx, async move {
                Ok(render::menu(&menu.send(DeleteMenuItem { item_id }).await??))
            }),
            Command::Reviews => self.run(ctx, async move {
                let restaurant_id = session
                    .send(CurrentId(Role::Restaurant))
                    .await?
                    .ok_or(ApiError::NoSession("a restaurant"))?;
                Ok(render::reviews(&api.reviews_for(&restaurant_id).await?))
            }),
        }
    }
}

impl Actor for UIHandler {
    type Context = Context<Self>;

    fn started(&mut self, ctx: &mut Self::Context) {
        println!("{}", render::welcome("Restaurant"));
        let menu = self.menu.clone();
        let session = self.context.session.clone();
        ctx.wait(
            async move {
                let identity = session.send(GetIdentity).await?;
                if identity.role() != Some(Role::Restaurant) {
                    return Ok(None);
                }
                let items = menu.send(LoadMenu).await??;
                Ok::<_, ApiError>(Some((identity.display_name().to_string(), items.len())))
            }
            .into_actor(self)
            .map(|res, act, _ctx| match res {
                Ok(Some((name, count))) => {
                    act.logger.info(format!("Welcome back, {name}. {count} menu items"))
                }
                Ok(None) => {}
                Err(e) => act.report(e),
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
