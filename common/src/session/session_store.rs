use crate::errors::StorageError;
use crate::logger::Logger;
use crate::session::storage::SessionFile;
use crate::types::identity::{Identity, Role};
use actix::prelude::*;

/// Holds the one active identity of the app and keeps it on disk.
pub struct SessionStore {
    identity: Identity,
    file: SessionFile,
    logger: Logger,
}

impl SessionStore {
    pub fn load(file: SessionFile, logger: Logger) -> Self {
        let identity = file.load_or_guest(&logger);
        if let Some(role) = identity.role() {
            logger.info(format!(
                "Restored {role} session for {}",
                identity.display_name()
            ));
        }
        Self {
            identity,
            file,
            logger,
        }
    }

    fn replace(&mut self, identity: Identity) -> Result<(), StorageError> {
        self.identity = identity;
        self.file.save(&self.identity).inspect_err(|e| {
            self.logger.error(format!("Could not persist session: {e}"));
        })
    }
}

impl Actor for SessionStore {
    type Context = Context<Self>;
}

/// Replaces whatever identity was active.
#[derive(Message, Debug, Clone)]
#[rtype(result = "Result<(), StorageError>")]
pub struct SignIn(pub Identity);

#[derive(Message, Debug, Clone, Copy)]
#[rtype(result = "Result<(), StorageError>")]
pub struct Logout;

#[derive(Message, Debug, Clone, Copy)]
#[rtype(result = "Identity")]
pub struct GetIdentity;

/// Id of the signed-in principal if it has the given role.
#[derive(Message, Debug, Clone, Copy)]
#[rtype(result = "Option<String>")]
pub struct CurrentId(pub Role);

impl Handler<SignIn> for SessionStore {
    type Result = Result<(), StorageError>;

    fn handle(&mut self, msg: SignIn, _ctx: &mut Self::Context) -> Self::Result {
        self.logger.info(format!(
            "Signed in as {} ({})",
            msg.0.display_name(),
            msg.0.role().map(|r| r.as_str()).unwrap_or("guest")
        ));
        self.replace(msg.0)
    }
}

impl Handler<Logout> for SessionStore {
    type Result = Result<(), StorageError>;

    fn handle(&mut self, _msg: Logout, _ctx: &mut Self::Context) -> Self::Result {
        self.logger.info("Logged out");
        self.replace(Identity::Guest)
    }
}

impl Handler<GetIdentity> for SessionStore {
    type Result = MessageResult<GetIdentity>;

    fn handle(&mut self, _msg: GetIdentity, _ctx: &mut Self::Context) -> Self::Result {
        MessageResult(self.identity.clone())
    }
}

impl Handler<CurrentId> for SessionStore {
    type Result = Option<String>;

    fn handle(&mut self, msg: CurrentId, _ctx: &mut Self::Context) -> Self::Result {
        let id = match msg.0 {
            Role::User => self.identity.user_id(),
            Role::Restaurant => self.identity.restaurant_id(),
            Role::DeliveryPerson => self.identity.delivery_person_id(),
        };
        id.map(str::to_string)
    }
}
