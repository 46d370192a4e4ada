// KidTube - Browse Commands
// Catalog views for viewers: shelves per category and a single category list

use serde::Serialize;

use crate::db::schema::VideoRecord;
use crate::error::Result;
use crate::store::CatalogStore;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryShelf {
    pub category: String,
    pub videos: Vec<VideoRecord>,
}

/// Group videos by category. Shelves appear in the order their category is first seen.
pub fn group_by_category(videos: Vec<VideoRecord>) -> Vec<CategoryShelf> {
    let mut shelves: Vec<CategoryShelf> = Vec::new();

    for video in videos {
        match shelves.iter_mut().find(|s| s.category == video.category) {
            Some(shelf) => shelf.videos.push(video),
            None => shelves.push(CategoryShelf {
                category: video.category.clone(),
                videos: vec![video],
            }),
        }
    }

    shelves
}

pub fn shelves(store: &CatalogStore) -> Result<Vec<CategoryShelf>> {
    Ok(group_by_category(store.fetch_all()?))
}

pub fn category_videos(store: &CatalogStore, category: &str) -> Result<Vec<VideoRecord>> {
    store.fetch_by_category(category)
}
