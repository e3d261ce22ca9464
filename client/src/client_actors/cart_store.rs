use crate::messages::cart_messages::*;
use actix::prelude::*;
use common::api::cart::CartBackend;
use common::errors::ApiError;
use common::logger::Logger;
use common::session::session_store::{CurrentId, SessionStore};
use common::types::cart::{CartItem, cart_quantity, cart_total};
use common::types::identity::Role;
use common::validation::{require_address, require_quantity};
use std::future::Future;

/// Cached copy of the signed-in user's cart. The cart service is the source
/// of truth: every mutation is followed by a fresh fetch, never a local patch.
pub struct CartStore<B: CartBackend> {
    backend: B,
    session: Addr<SessionStore>,
    items: Vec<CartItem>,
    logger: Logger,
}

impl<B: CartBackend> CartStore<B> {
    pub fn new(backend: B, session: Addr<SessionStore>, logger: Logger) -> Self {
        Self {
            backend,
            session,
            items: Vec::new(),
            logger,
        }
    }

    /// Runs `op` for the signed-in user, then re-fetches the cart.
    fn sync_after<F, Fut>(&mut self, name: &'static str, op: F) -> ResponseActFuture<Self, CartResult>
    where
        F: FnOnce(B, String) -> Fut + 'static,
        Fut: Future<Output = Result<(), ApiError>> + 'static,
    {
        let backend = self.backend.clone();
        let session = self.session.clone();
        let fut = async move {
            let Some(user_id) = session.send(CurrentId(Role::User)).await? else {
                return Ok(None);
            };
            op(backend.clone(), user_id.clone()).await?;
            backend.fetch_cart(&user_id).await.map(Some)
        };

        Box::pin(fut.into_actor(self).map(move |res, act, _ctx| match res {
            Ok(Some(items)) => {
                act.logger
                    .debug(format!("{name}: cart has {} lines", items.len()));
                act.items = items.clone();
                Ok(CartOutcome::Synced(items))
            }
            Ok(None) => {
                act.logger.debug(format!("{name}: no user signed in"));
                Ok(CartOutcome::Inactive)
            }
            Err(e) => {
                act.logger.warn(format!("{name} failed: {e}"));
                Err(e)
            }
        }))
    }

    fn rejected(&self, err: ApiError) -> ResponseActFuture<Self, CartResult> {
        self.logger.debug(format!("Rejected before sending: {err}"));
        Box::pin(fut::ready(Err(err)))
    }
}

impl<B: CartBackend> Actor for CartStore<B> {
    type Context = Context<Self>;
}

impl<B: CartBackend> Handler<FetchCart> for CartStore<B> {
    type Result = ResponseActFuture<Self, CartResult>;

    fn handle(&mut self, _msg: FetchCart, _ctx: &mut Self::Context) -> Self::Result {
        self.sync_after("fetch", |_, _| async { Ok(()) })
    }
}

impl<B: CartBackend> Handler<AddToCart> for CartStore<B> {
    type Result = ResponseActFuture<Self, CartResult>;

    fn handle(&mut self, msg: AddToCart, _ctx: &mut Self::Context) -> Self::Result {
        if let Err(e) = require_quantity(msg.quantity) {
            return self.rejected(e.into());
        }
        self.sync_after("add", move |backend, user_id| async move {
            backend.add_to_cart(&user_id, &msg.item, msg.quantity).await
        })
    }
}

impl<B: CartBackend> Handler<UpdateCartItem> for CartStore<B> {
    type Result = ResponseActFuture<Self, CartResult>;

    fn handle(&mut self, msg: UpdateCartItem, _ctx: &mut Self::Context) -> Self::Result {
        if let Err(e) = require_quantity(msg.quantity) {
            return self.rejected(e.into());
        }
        self.sync_after("update", move |backend, user_id| async move {
            backend
                .update_cart_item(&user_id, &msg.item_id, msg.quantity)
                .await
        })
    }
}

impl<B: CartBackend> Handler<RemoveCartItem> for CartStore<B> {
    type Result = ResponseActFuture<Self, CartResult>;

    fn handle(&mut self, msg: RemoveCartItem, _ctx: &mut Self::Context) -> Self::Result {
        self.sync_after("remove", move |backend, user_id| async move {
            backend.remove_cart_item(&user_id, &msg.item_id).await
        })
    }
}

impl<B: CartBackend> Handler<ClearCart> for CartStore<B> {
    type Result = ResponseActFuture<Self, CartResult>;

    fn handle(&mut self, _msg: ClearCart, _ctx: &mut Self::Context) -> Self::Result {
        self.sync_after("clear", |backend, user_id| async move {
            backend.clear_cart(&user_id).await
        })
    }
}

impl<B: CartBackend> Handler<Checkout> for CartStore<B> {
    type Result = ResponseActFuture<Self, CartResult>;

    fn handle(&mut self, msg: Checkout, _ctx: &mut Self::Context) -> Self::Result {
        let address = match require_address(&msg.address) {
            Ok(address) => address,
            Err(e) => return self.rejected(e.into()),
        };
        self.sync_after("checkout", move |backend, user_id| async move {
            backend.checkout(&user_id, &address).await
        })
    }
}

impl<B: CartBackend> Handler<GetCart> for CartStore<B> {
    type Result = CartView;

    fn handle(&mut self, _msg: GetCart, _ctx: &mut Self::Context) -> Self::Result {
        CartView {
            items: self.items.clone(),
            total: cart_total(&self.items),
            quantity: cart_quantity(&self.items),
        }
    }
}
