use crate::messages::menu_messages::*;
use actix::prelude::*;
use common::api::menu::MenuBackend;
use common::errors::ApiError;
use common::logger::Logger;
use common::session::session_store::{CurrentId, SessionStore};
use common::types::identity::Role;
use common::types::menu::{ImageSource, MenuItem, MenuItemDraft};
use std::future::Future;

/// Menu of the signed-in restaurant. Every change is followed by a reload
/// so the cached list always mirrors the menu service.
pub struct MenuManager<B: MenuBackend> {
    backend: B,
    session: Addr<SessionStore>,
    items: Vec<MenuItem>,
    logger: Logger,
}

impl<B: MenuBackend> MenuManager<B> {
    pub fn new(backend: B, session: Addr<SessionStore>, logger: Logger) -> Self {
        Self {
            backend,
            session,
            items: Vec::new(),
            logger,
        }
    }

    fn reload_after<F, Fut>(&mut self, name: &'static str, op: F) -> ResponseActFuture<Self, MenuResult>
    where
        F: FnOnce(B, String) -> Fut + 'static,
        Fut: Future<Output = Result<(), ApiError>> + 'static,
    {
        let backend = self.backend.clone();
        let session = self.session.clone();
        let fut = async move {
            let restaurant_id = session
                .send(CurrentId(Role::Restaurant))
                .await?
                .ok_or(ApiError::NoSession("a restaurant"))?;
            op(backend.clone(), restaurant_id.clone()).await?;
            backend.menu_for(&restaurant_id).await
        };

        Box::pin(fut.into_actor(self).map(move |res, act, _ctx| match res {
            Ok(items) => {
                act.logger.debug(format!("{name}: {} menu items", items.len()));
                act.items = items.clone();
                Ok(items)
            }
            Err(e) => {
                act.logger.warn(format!("{name} failed: {e}"));
                Err(e)
            }
        }))
    }

    /// Keeps the current image when the edit does not bring a new one.
    fn with_current_image(&self, item_id: &str, mut draft: MenuItemDraft) -> MenuItemDraft {
        if draft.image.is_none() {
            draft.image = self
                .items
                .iter()
                .find(|item| item.id == item_id && !item.image_url.is_empty())
                .map(|item| ImageSource::Existing(item.image_url.clone()));
        }
        draft
    }
}

impl<B: MenuBackend> Actor for MenuManager<B> {
    type Context = Context<Self>;
}

impl<B: MenuBackend> Handler<LoadMenu> for MenuManager<B> {
    type Result = ResponseActFuture<Self, MenuResult>;

    fn handle(&mut self, _msg: LoadMenu, _ctx: &mut Self::Context) -> Self::Result {
        self.reload_after("load", |_, _| async { Ok(()) })
    }
}

impl<B: MenuBackend> Handler<CreateMenuItem> for MenuManager<B> {
    type Result = ResponseActFuture<Self, MenuResult>;

    fn handle(&mut self, msg: CreateMenuItem, _ctx: &mut Self::Context) -> Self::Result {
        if let Err(e) = msg.0.validate_for_create() {
            return Box::pin(fut::ready(Err(e.into())));
        }
        let draft = msg.0;
        self.reload_after("create", move |backend, restaurant_id| async move {
            backend.create_menu_item(&restaurant_id, &draft).await
        })
    }
}

impl<B: MenuBackend> Handler<UpdateMenuItem> for MenuManager<B> {
    type Result = ResponseActFuture<Self, MenuResult>;

    fn handle(&mut self, msg: UpdateMenuItem, _ctx: &mut Self::Context) -> Self::Result {
        if let Err(e) = msg.draft.validate() {
            return Box::pin(fut::ready(Err(e.into())));
        }
        let draft = self.with_current_image(&msg.item_id, msg.draft);
        let item_id = msg.item_id;
        self.reload_after("update", move |backend, restaurant_id| async move {
            backend.update_menu_item(&item_id, &restaurant_id, &draft).await
        })
    }
}

impl<B: MenuBackend> Handler<DeleteMenuItem> for MenuManager<B> {
    type Result = ResponseActFuture<Self, MenuResult>;

    fn handle(&mut self, msg: DeleteMenuItem, _ctx: &mut Self::Context) -> Self::Result {
        let item_id = msg.item_id;
        self.reload_after("delete", move |backend, _| async move {
            backend.delete_menu_item(&item_id).await
        })
    }
}

impl<B: MenuBackend> Handler<GetMenu> for MenuManager<B> {
    type Result = MessageResult<GetMenu>;

    fn handle(&mut self, _msg: GetMenu, _ctx: &mut Self::Context) -> Self::Result {
        MessageResult(self.items.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::errors::ValidationError;
    use common::session::session_store::SignIn;
    use common::session::storage::SessionFile;
    use common::types::identity::Identity;
    use common::types::restaurant_info::Restaurant;
    use std::cell::RefCell;
    use std::path::PathBuf;
    use std::rc::Rc;

    /// In-memory menu service.
    #[derive(Clone, Default)]
    struct FakeMenu {
        calls: Rc<RefCell<Vec<String>>>,
        items: Rc<RefCell<Vec<MenuItem>>>,
        images: Rc<RefCell<Vec<Option<ImageSource>>>>,
    }

    impl FakeMenu {
        fn calls(&self) -> Vec<String> {
            self.calls.borrow().clone()
        }
    }

    fn item(restaurant_id: &str, id: &str, draft: &MenuItemDraft) -> MenuItem {
        let image_url = match &draft.image {
            Some(ImageSource::Existing(url)) => url.clone(),
            Some(ImageSource::File(path)) => format!("uploaded/{}", path.display()),
            None => String::new(),
        };
        MenuItem {
            restaurant_id: restaurant_id.to_string(),
            id: id.to_string(),
            name: draft.name.clone(),
            description: draft.description.clone(),
            price: draft.price,
            category: draft.category.clone(),
            image_url,
        }
    }

    impl MenuBackend for FakeMenu {
        async fn menu_for(&self, restaurant_id: &str) -> Result<Vec<MenuItem>, ApiError> {
            self.calls.borrow_mut().push(format!("list {restaurant_id}"));
            Ok(self.items.borrow().clone())
        }

        async fn create_menu_item(&self, restaurant_id: &str, draft: &MenuItemDraft) -> Result<(), ApiError> {
            self.calls.borrow_mut().push(format!("create {}", draft.name));
            let id = format!("m{}", self.items.borrow().len() + 1);
            self.items.borrow_mut().push(item(restaurant_id, &id, draft));
            Ok(())
        }

        async fn update_menu_item(
            &self,
            item_id: &str,
            restaurant_id: &str,
            draft: &MenuItemDraft,
        ) -> Result<(), ApiError> {
            self.calls.borrow_mut().push(format!("update {item_id}"));
            self.images.borrow_mut().push(draft.image.clone());
            for existing in self.items.borrow_mut().iter_mut() {
                if existing.id == item_id {
                    *existing = item(restaurant_id, item_id, draft);
                }
            }
            Ok(())
        }

        async fn delete_menu_item(&self, item_id: &str) -> Result<(), ApiError> {
            self.calls.borrow_mut().push(format!("delete {item_id}"));
            self.items.borrow_mut().retain(|existing| existing.id != item_id);
            Ok(())
        }
    }

    fn draft(name: &str, image: Option<ImageSource>) -> MenuItemDraft {
        MenuItemDraft {
            name: name.to_string(),
            description: "Shredded roti with curry".to_string(),
            price: 8.5,
            category: "Mains".to_string(),
            image,
        }
    }

    async fn start(backend: FakeMenu, signed_in: bool) -> (Addr<MenuManager<FakeMenu>>, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let session = SessionStore::load(
            SessionFile::new(dir.path().join("user-storage.json")),
            Logger::new("session"),
        )
        .start();
        if signed_in {
            let identity = Identity::Restaurant {
                token: "t".to_string(),
                profile: Restaurant {
                    id: "r1".to_string(),
                    name: "Hela Bojun".to_string(),
                    location: "Kandy".to_string(),
                    owner_name: "Nimal".to_string(),
                    email: "hela@example.com".to_string(),
                    mobile: "0771234567".to_string(),
                    role: Some("restaurant".to_string()),
                    image_url: String::new(),
                },
            };
            session.send(SignIn(identity)).await.unwrap().unwrap();
        }
        let manager = MenuManager::new(backend, session, Logger::new("menu")).start();
        (manager, dir)
    }

    #[actix_rt::test]
    async fn test_create_reloads_menu() {
        let backend = FakeMenu::default();
        let (manager, _dir) = start(backend.clone(), true).await;

        let image = Some(ImageSource::File(PathBuf::from("kottu.jpg")));
        let menu = manager.send(CreateMenuItem(draft("Kottu", image))).await.unwrap().unwrap();

        assert_eq!(menu.len(), 1);
        assert_eq!(menu[0].restaurant_id, "r1");
        assert_eq!(backend.calls(), vec!["create Kottu", "list r1"]);
        assert_eq!(manager.send(GetMenu).await.unwrap(), menu);
    }

    #[actix_rt::test]
    async fn test_create_without_image_is_rejected_locally() {
        let backend = FakeMenu::default();
        let (manager, _dir) = start(backend.clone(), true).await;

        let res = manager.send(CreateMenuItem(draft("Kottu", None))).await.unwrap();

        assert!(matches!(
            res,
            Err(ApiError::Validation(ValidationError::MissingField("Image")))
        ));
        assert!(backend.calls().is_empty());
    }

    #[actix_rt::test]
    async fn test_update_keeps_existing_image() {
        let backend = FakeMenu::default();
        let (manager, _dir) = start(backend.clone(), true).await;
        let image = Some(ImageSource::Existing("menu/kottu".to_string()));
        manager.send(CreateMenuItem(draft("Kottu", image))).await.unwrap().unwrap();

        let menu = manager
            .send(UpdateMenuItem {
                item_id: "m1".to_string(),
                draft: draft("Cheese Kottu", None),
            })
            .await
            .unwrap()
            .unwrap();

        assert_eq!(menu[0].name, "Cheese Kottu");
        assert_eq!(
            backend.images.borrow().clone(),
            vec![Some(ImageSource::Existing("menu/kottu".to_string()))]
        );
    }

    #[actix_rt::test]
    async fn test_delete_reloads_menu() {
        let backend = FakeMenu::default();
        let (manager, _dir) = start(backend.clone(), true).await;
        let image = Some(ImageSource::Existing("menu/kottu".to_string()));
        manager.send(CreateMenuItem(draft("Kottu", image))).await.unwrap().unwrap();

        let menu = manager
            .send(DeleteMenuItem { item_id: "m1".to_string() })
            .await
            .unwrap()
            .unwrap();

        assert!(menu.is_empty());
        assert_eq!(backend.calls().last().map(String::as_str), Some("list r1"));
    }

    #[actix_rt::test]
    async fn test_requires_restaurant_session() {
        let backend = FakeMenu::default();
        let (manager, _dir) = start(backend.clone(), false).await;

        let res = manager.send(LoadMenu).await.unwrap();

        assert!(matches!(res, Err(ApiError::NoSession(_))));
        assert!(backend.calls().is_empty());
    }
}
