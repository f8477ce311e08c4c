pub mod common;
pub mod movie;

pub use common::{title_key, Displayable, Titled};
pub use movie::{Movie, MovieDetails, POSTER_PLACEHOLDER};
