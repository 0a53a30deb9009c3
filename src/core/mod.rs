pub mod indexing;
pub mod search;
pub mod services;

pub use crate::domain::model::{Page, Post, PostEntity, PublishForm};
pub use crate::domain::ports::{InsertHandle, PowValidator, SearchCache, SearchDb, Storage};
pub use crate::utils::error::Result;
pub use search::ItemRepo;
