//! The `/movies` resource. Actors travel embedded in each movie.

use workshop_core::types::DbId;
use workshop_db::models::movie::{CreateMovie, Movie, UpdateMovie};
use workshop_db::SharedRepository;

use super::crud::Resource;
use crate::state::AppState;

pub struct Movies;

impl Resource for Movies {
    type Entity = Movie;
    type Create = CreateMovie;
    type Update = UpdateMovie;

    const NAME: &'static str = "Movie";
    const TOPIC: &'static str = "movie-events";

    fn repo(state: &AppState) -> &SharedRepository<Movie, CreateMovie, UpdateMovie> {
        &state.movies
    }

    fn id(entity: &Movie) -> DbId {
        entity.id
    }
}
