//! The `/users` resource.

use workshop_core::types::DbId;
use workshop_db::models::user::{CreateUser, UpdateUser, User};
use workshop_db::SharedRepository;

use super::crud::Resource;
use crate::state::AppState;

pub struct Users;

impl Resource for Users {
    type Entity = User;
    type Create = CreateUser;
    type Update = UpdateUser;

    const NAME: &'static str = "User";
    const TOPIC: &'static str = "user-events";

    fn repo(state: &AppState) -> &SharedRepository<User, CreateUser, UpdateUser> {
        &state.users
    }

    fn id(entity: &User) -> DbId {
        entity.id
    }
}
