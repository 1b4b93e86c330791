//! Category and tag storage.

use sqlx::{postgres::PgRow, PgPool, Row};
use uuid::Uuid;

use crate::{
    error::map_constraint_violation,
    models::{Category, NewCategory, Tag},
    Result,
};

#[derive(Clone)]
pub struct CategoryRepository {
    pool: PgPool,
}

impl CategoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn insert(&self, new: NewCategory) -> Result<Category> {
        let category = Category {
            id: Uuid::new_v4(),
            name: new.name,
            description: new.description,
        };

        sqlx::query("INSERT INTO categories (id, name, description) VALUES ($1, $2, $3)")
            .bind(category.id)
            .bind(&category.name)
            .bind(&category.description)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                map_constraint_violation(
                    e,
                    &format!("category with name {} already exists", category.name),
                )
            })?;

        Ok(category)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Category>> {
        let row = sqlx::query("SELECT id, name, description FROM categories WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(row_to_category))
    }

    pub async fn list_all(&self) -> Result<Vec<Category>> {
        let rows = sqlx::query("SELECT id, name, description FROM categories ORDER BY name")
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(row_to_category).collect())
    }

    /// Fails with Conflict while courses still reference the category:
    /// categories are shared references and are never cascaded into.
    pub async fn delete(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                map_constraint_violation(e, "category is still referenced by courses")
            })?;

        Ok(result.rows_affected() > 0)
    }
}

fn row_to_category(row: PgRow) -> Category {
    Category {
        id: row.get("id"),
        name: row.get("name"),
        description: row.get("description"),
    }
}

#[derive(Clone)]
pub struct TagRepository {
    pool: PgPool,
}

impl TagRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Look up a tag by name, creating it if absent. Atomic, so two
    /// concurrent callers converge on the same row.
    pub async fn find_or_create(&self, name: &str) -> Result<Tag> {
        let row = sqlx::query(
            "INSERT INTO tags (id, name) VALUES ($1, $2)
             ON CONFLICT (name) DO UPDATE SET name = EXCLUDED.name
             RETURNING id, name",
        )
        .bind(Uuid::new_v4())
        .bind(name)
        .fetch_one(&self.pool)
        .await?;

        Ok(Tag {
            id: row.get("id"),
            name: row.get("name"),
        })
    }

    pub async fn list_for_course(&self, course_id: Uuid) -> Result<Vec<Tag>> {
        let rows = sqlx::query(
            "SELECT t.id, t.name
             FROM tags t
             JOIN course_tags ct ON ct.tag_id = t.id
             WHERE ct.course_id = $1
             ORDER BY t.name",
        )
        .bind(course_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| Tag {
                id: r.get("id"),
                name: r.get("name"),
            })
            .collect())
    }
}
