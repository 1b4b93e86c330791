//! Category service.

use uuid::Uuid;

use crate::{
    db::CategoryRepository,
    models::{Category, NewCategory},
    Error, Result,
};

pub struct CategoryService {
    categories: CategoryRepository,
}

impl CategoryService {
    pub fn new(categories: CategoryRepository) -> Self {
        Self { categories }
    }

    /// Category names are unique; a duplicate fails with Conflict.
    pub async fn create_category(&self, new: NewCategory) -> Result<Category> {
        self.categories.insert(new).await
    }

    pub async fn get_category(&self, id: Uuid) -> Result<Category> {
        self.categories
            .find_by_id(id)
            .await?
            .ok_or_else(|| Error::not_found("category"))
    }

    pub async fn get_all_categories(&self) -> Result<Vec<Category>> {
        self.categories.list_all().await
    }

    /// Categories are shared references: deletion fails with Conflict while
    /// any course still points at the category.
    pub async fn delete_category(&self, id: Uuid) -> Result<()> {
        if !self.categories.delete(id).await? {
            return Err(Error::not_found("category"));
        }
        Ok(())
    }
}
