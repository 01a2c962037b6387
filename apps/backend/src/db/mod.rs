//! PostgreSQL database operations

pub mod date_utils;

use chrono::{DateTime, Utc};
use sqlx::{postgres::PgPoolOptions, PgPool, Row};
use uuid::Uuid;

use cardify_core::progress;

use crate::error::{ApiError, Result};
use crate::models::*;

const STUDY_CARD_COLUMNS: &str = r#"
    c.id, c.deck_id, c.front, c.back, c.image_url,
    p.status, p.times_reviewed, p.times_mastered, p.times_struggled, p.last_reviewed_at
"#;

const DECK_SUMMARY_COLUMNS: &str = r#"
    d.id, d.title, d.subject, d.created_at, d.updated_at,
    COUNT(c.id) AS total_cards,
    COUNT(CASE WHEN p.status = 'MASTERED' THEN 1 END) AS mastered_cards
"#;

/// Database wrapper with connection pool
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Connect to PostgreSQL and create connection pool
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect(database_url)
            .await?;

        Ok(Self { pool })
    }

    /// Run database migrations
    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }

    /// Get the connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    // === User Repository ===

    /// Create a new user with a generated session token
    pub async fn create_user(&self, display_name: Option<&str>) -> Result<DbUser> {
        let token = Uuid::new_v4().to_string();
        let user = sqlx::query_as::<_, DbUser>(
            r#"
            INSERT INTO users (token, display_name)
            VALUES ($1, $2)
            RETURNING id, token, display_name, created_at, last_seen_at
            "#,
        )
        .bind(&token)
        .bind(display_name)
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }

    /// Get user by session token
    pub async fn get_user_by_token(&self, token: &str) -> Result<Option<DbUser>> {
        let user = sqlx::query_as::<_, DbUser>(
            r#"
            SELECT id, token, display_name, created_at, last_seen_at
            FROM users
            WHERE token = $1
            "#,
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Update user last_seen_at timestamp
    pub async fn update_last_seen(&self, user_id: Uuid) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE users
            SET last_seen_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    // === Deck Repository ===

    /// List the user's decks with card counts, most recently updated first
    pub async fn list_decks(&self, user_id: Uuid) -> Result<Vec<DeckSummary>> {
        let rows = sqlx::query_as::<_, DbDeckSummary>(&format!(
            r#"
            SELECT {DECK_SUMMARY_COLUMNS}
            FROM decks d
            LEFT JOIN cards c ON c.deck_id = d.id
            LEFT JOIN card_progress p ON p.card_id = c.id AND p.user_id = $1
            WHERE d.user_id = $1
            GROUP BY d.id
            ORDER BY d.updated_at DESC
            "#
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(DbDeckSummary::to_summary).collect())
    }

    /// Insert a deck, its cards and a NEW progress row per card in one transaction
    pub async fn create_deck(&self, user_id: Uuid, request: &CreateDeckRequest) -> Result<Uuid> {
        let mut tx = self.pool.begin().await?;

        let deck_id: Uuid = sqlx::query_scalar(
            r#"
            INSERT INTO decks (user_id, title, subject)
            VALUES ($1, $2, $3)
            RETURNING id
            "#,
        )
        .bind(user_id)
        .bind(request.title.trim())
        .bind(request.subject.as_deref().map(str::trim).filter(|s| !s.is_empty()))
        .fetch_one(&mut *tx)
        .await?;

        for (position, card) in request.cards.iter().enumerate() {
            let card_id: Uuid = sqlx::query_scalar(
                r#"
                INSERT INTO cards (deck_id, position, front, back, image_url)
                VALUES ($1, $2, $3, $4, $5)
                RETURNING id
                "#,
            )
            .bind(deck_id)
            .bind(position as i32)
            .bind(card.front.trim())
            .bind(card.back.trim())
            .bind(&card.image_url)
            .fetch_one(&mut *tx)
            .await?;

            sqlx::query(
                r#"
                INSERT INTO card_progress (user_id, card_id, status)
                VALUES ($1, $2, 'NEW')
                "#,
            )
            .bind(user_id)
            .bind(card_id)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        tracing::info!(%deck_id, cards = request.cards.len(), "deck created");
        Ok(deck_id)
    }

    /// Get a deck with its cards, or None if it does not exist for this user
    pub async fn get_deck(&self, deck_id: Uuid, user_id: Uuid) -> Result<Option<DeckDetail>> {
        let row = sqlx::query_as::<_, DbDeckSummary>(&format!(
            r#"
            SELECT {DECK_SUMMARY_COLUMNS}
            FROM decks d
            LEFT JOIN cards c ON c.deck_id = d.id
            LEFT JOIN card_progress p ON p.card_id = c.id AND p.user_id = $2
            WHERE d.id = $1 AND d.user_id = $2
            GROUP BY d.id
            "#
        ))
        .bind(deck_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let cards = self.list_study_cards(deck_id, user_id).await?;

        Ok(Some(DeckDetail {
            summary: row.to_summary(),
            cards,
        }))
    }

    /// Delete a deck; cards and progress rows go with it
    pub async fn delete_deck(&self, deck_id: Uuid, user_id: Uuid) -> Result<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM decks
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(deck_id)
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Check that a deck exists and belongs to the user
    pub async fn deck_exists(&self, deck_id: Uuid, user_id: Uuid) -> Result<bool> {
        let exists: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS (SELECT 1 FROM decks WHERE id = $1 AND user_id = $2)
            "#,
        )
        .bind(deck_id)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    // === Card Repository ===

    /// Cards of one deck in creation order, each with the user's progress
    pub async fn list_study_cards(&self, deck_id: Uuid, user_id: Uuid) -> Result<Vec<StudyCard>> {
        let rows = sqlx::query_as::<_, DbStudyCard>(&format!(
            r#"
            SELECT {STUDY_CARD_COLUMNS}
            FROM cards c
            JOIN decks d ON d.id = c.deck_id
            LEFT JOIN card_progress p ON p.card_id = c.id AND p.user_id = $2
            WHERE c.deck_id = $1 AND d.user_id = $2
            ORDER BY c.position
            "#
        ))
        .bind(deck_id)
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(DbStudyCard::to_study_card).collect())
    }

    /// Non-mastered cards across all decks: STRUGGLING first, then least
    /// recently reviewed, never-reviewed before anything else
    pub async fn quick_review_cards(&self, user_id: Uuid, limit: i64) -> Result<Vec<QuickReviewCard>> {
        let rows = sqlx::query_as::<_, DbStudyCard>(&format!(
            r#"
            SELECT {STUDY_CARD_COLUMNS}
            FROM cards c
            JOIN decks d ON d.id = c.deck_id
            LEFT JOIN card_progress p ON p.card_id = c.id AND p.user_id = $1
            WHERE d.user_id = $1
              AND COALESCE(p.status, 'NEW') <> 'MASTERED'
            ORDER BY
                CASE WHEN p.status = 'STRUGGLING' THEN 0 ELSE 1 END,
                p.last_reviewed_at ASC NULLS FIRST,
                c.created_at,
                c.position
            LIMIT $2
            "#
        ))
        .bind(user_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .iter()
            .map(|row| QuickReviewCard {
                deck_id: row.deck_id,
                card: row.to_study_card(),
            })
            .collect())
    }

    // === Progress Repository ===

    /// Apply one review to a card and return the stored progress.
    ///
    /// Returns None when the card does not exist for this user. A card
    /// without a progress row gets a NEW row first, then every review locks
    /// that row for the read-modify-write.
    pub async fn review_card(
        &self,
        card_id: Uuid,
        user_id: Uuid,
        action: ReviewAction,
        now: DateTime<Utc>,
    ) -> Result<Option<Progress>> {
        let mut tx = self.pool.begin().await?;

        let owned: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS (
                SELECT 1
                FROM cards c
                JOIN decks d ON d.id = c.deck_id
                WHERE c.id = $1 AND d.user_id = $2
            )
            "#,
        )
        .bind(card_id)
        .bind(user_id)
        .fetch_one(&mut *tx)
        .await?;

        if !owned {
            return Ok(None);
        }

        // Make sure there is a row to lock, so concurrent first reviews
        // serialize on it like any other review
        let created = sqlx::query(
            r#"
            INSERT INTO card_progress (user_id, card_id, status)
            VALUES ($1, $2, 'NEW')
            ON CONFLICT (user_id, card_id) DO NOTHING
            "#,
        )
        .bind(user_id)
        .bind(card_id)
        .execute(&mut *tx)
        .await?;

        if created.rows_affected() > 0 {
            tracing::warn!(%card_id, "card had no progress row, created it on review");
        }

        let current = sqlx::query_as::<_, DbProgress>(
            r#"
            SELECT status, times_reviewed, times_mastered, times_struggled, last_reviewed_at
            FROM card_progress
            WHERE user_id = $1 AND card_id = $2
            FOR UPDATE
            "#,
        )
        .bind(user_id)
        .bind(card_id)
        .fetch_one(&mut *tx)
        .await?;

        let next = DbProgress::from_core_progress(&progress::review(
            &current.to_core_progress(),
            action,
            now,
        ));

        let stored = sqlx::query_as::<_, DbProgress>(
            r#"
            UPDATE card_progress
            SET status = $3,
                times_reviewed = $4,
                times_mastered = $5,
                times_struggled = $6,
                last_reviewed_at = $7
            WHERE user_id = $1 AND card_id = $2
            RETURNING status, times_reviewed, times_mastered, times_struggled, last_reviewed_at
            "#,
        )
        .bind(user_id)
        .bind(card_id)
        .bind(&next.status)
        .bind(next.times_reviewed)
        .bind(next.times_mastered)
        .bind(next.times_struggled)
        .bind(next.last_reviewed_at)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(Some(stored.to_core_progress()))
    }

    /// Get the user's progress on one card
    pub async fn get_progress(&self, card_id: Uuid, user_id: Uuid) -> Result<Option<Progress>> {
        let row = sqlx::query_as::<_, DbProgress>(
            r#"
            SELECT status, times_reviewed, times_mastered, times_struggled, last_reviewed_at
            FROM card_progress
            WHERE user_id = $1 AND card_id = $2
            "#,
        )
        .bind(user_id)
        .bind(card_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|p| p.to_core_progress()))
    }

    /// Count progress rows for a set of cards, used to check cascades
    pub async fn count_progress_for_cards(&self, card_ids: &[Uuid]) -> Result<i64> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM card_progress
            WHERE card_id = ANY($1)
            "#,
        )
        .bind(card_ids)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }

    // === Stats Repository ===

    /// Mastered and struggling counts plus cards reviewed since `since`
    pub async fn dashboard_stats(&self, user_id: Uuid, since: DateTime<Utc>) -> Result<DashboardStats> {
        let row = sqlx::query(
            r#"
            SELECT
                COUNT(*) FILTER (WHERE status = 'MASTERED') AS mastered_count,
                COUNT(*) FILTER (WHERE status = 'STRUGGLING') AS struggling_count,
                COUNT(*) FILTER (WHERE last_reviewed_at >= $2) AS reviewed_today_count
            FROM card_progress
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .bind(since)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!(%user_id, error = %e, "dashboard stats query failed");
            ApiError::Database(e)
        })?;

        Ok(DashboardStats {
            mastered_count: row.get("mastered_count"),
            struggling_count: row.get("struggling_count"),
            reviewed_today_count: row.get("reviewed_today_count"),
        })
    }
}
