//! User and profile storage.

use sqlx::{postgres::PgRow, PgPool, Row};
use uuid::Uuid;

use crate::{
    db::{courses, parse_enum},
    error::map_constraint_violation,
    models::{NewProfile, NewUser, Profile, User, UserRole, UserUpdate},
    Result,
};

#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn insert(&self, new: NewUser) -> Result<User> {
        let user = User {
            id: Uuid::new_v4(),
            name: new.name,
            email: new.email,
            role: new.role,
            phone: new.phone,
        };

        sqlx::query(
            "INSERT INTO users (id, name, email, role, phone)
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(user.id)
        .bind(&user.name)
        .bind(&user.email)
        .bind(user.role.as_str())
        .bind(&user.phone)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            map_constraint_violation(e, &format!("user with email {} already exists", user.email))
        })?;

        Ok(user)
    }

    /// Create a user and their profile atomically.
    pub async fn insert_with_profile(
        &self,
        new: NewUser,
        profile: NewProfile,
    ) -> Result<(User, Profile)> {
        let user = User {
            id: Uuid::new_v4(),
            name: new.name,
            email: new.email,
            role: new.role,
            phone: new.phone,
        };
        let profile = Profile {
            id: Uuid::new_v4(),
            user_id: user.id,
            bio: profile.bio,
            avatar_url: profile.avatar_url,
            linkedin_url: profile.linkedin_url,
        };

        let mut tx = self.pool.begin().await?;

        sqlx::query(
            "INSERT INTO users (id, name, email, role, phone)
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(user.id)
        .bind(&user.name)
        .bind(&user.email)
        .bind(user.role.as_str())
        .bind(&user.phone)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            map_constraint_violation(e, &format!("user with email {} already exists", user.email))
        })?;

        sqlx::query(
            "INSERT INTO profiles (id, user_id, bio, avatar_url, linkedin_url)
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(profile.id)
        .bind(profile.user_id)
        .bind(&profile.bio)
        .bind(&profile.avatar_url)
        .bind(&profile.linkedin_url)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok((user, profile))
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<User>> {
        let row = sqlx::query("SELECT id, name, email, role, phone FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(row_to_user).transpose()
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let row = sqlx::query("SELECT id, name, email, role, phone FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;

        row.map(row_to_user).transpose()
    }

    pub async fn exists_by_email(&self, email: &str) -> Result<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM users WHERE email = $1)")
                .bind(email)
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }

    pub async fn list_all(&self) -> Result<Vec<User>> {
        let rows =
            sqlx::query("SELECT id, name, email, role, phone FROM users ORDER BY name, email")
                .fetch_all(&self.pool)
                .await?;

        rows.into_iter().map(row_to_user).collect()
    }

    pub async fn list_by_role(&self, role: UserRole) -> Result<Vec<User>> {
        let rows = sqlx::query(
            "SELECT id, name, email, role, phone FROM users WHERE role = $1 ORDER BY name, email",
        )
        .bind(role.as_str())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(row_to_user).collect()
    }

    pub async fn update(&self, id: Uuid, update: UserUpdate) -> Result<Option<User>> {
        let row = sqlx::query(
            "UPDATE users SET name = $2, email = $3, role = $4, phone = $5
             WHERE id = $1
             RETURNING id, name, email, role, phone",
        )
        .bind(id)
        .bind(&update.name)
        .bind(&update.email)
        .bind(update.role.as_str())
        .bind(&update.phone)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            map_constraint_violation(
                e,
                &format!("user with email {} already exists", update.email),
            )
        })?;

        row.map(row_to_user).transpose()
    }

    pub async fn find_profile(&self, user_id: Uuid) -> Result<Option<Profile>> {
        let row = sqlx::query(
            "SELECT id, user_id, bio, avatar_url, linkedin_url FROM profiles WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| Profile {
            id: r.get("id"),
            user_id: r.get("user_id"),
            bio: r.get("bio"),
            avatar_url: r.get("avatar_url"),
            linkedin_url: r.get("linkedin_url"),
        }))
    }

    /// Delete a user and everything they own: profile, enrollments,
    /// submissions, quiz submissions, reviews, and every course they teach
    /// with its full subtree. Categories and tags are shared references and
    /// survive. Returns false when the user does not exist.
    pub async fn delete_cascade(&self, id: Uuid) -> Result<bool> {
        let mut tx = self.pool.begin().await?;

        let taught: Vec<Uuid> = sqlx::query_scalar("SELECT id FROM courses WHERE teacher_id = $1")
            .bind(id)
            .fetch_all(&mut *tx)
            .await?;

        for course_id in taught {
            courses::delete_course_subtree(&mut tx, course_id).await?;
        }

        sqlx::query("DELETE FROM courses WHERE teacher_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        delete_user_rows(&mut tx, id).await?;

        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(result.rows_affected() > 0)
    }
}

async fn delete_user_rows(tx: &mut sqlx::Transaction<'_, sqlx::Postgres>, id: Uuid) -> Result<()> {
    for sql in [
        "DELETE FROM course_reviews WHERE student_id = $1",
        "DELETE FROM quiz_submissions WHERE student_id = $1",
        "DELETE FROM submissions WHERE student_id = $1",
        "DELETE FROM enrollments WHERE student_id = $1",
        "DELETE FROM profiles WHERE user_id = $1",
    ] {
        sqlx::query(sql).bind(id).execute(&mut **tx).await?;
    }
    Ok(())
}

fn row_to_user(row: PgRow) -> Result<User> {
    Ok(User {
        id: row.get("id"),
        name: row.get("name"),
        email: row.get("email"),
        role: parse_enum(row.get::<String, _>("role"))?,
        phone: row.get("phone"),
    })
}
