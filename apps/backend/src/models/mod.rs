//! Database models and API types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

// Re-export shared types from cardify-core
pub use cardify_core::types::{
    CardDraft, Progress, ProgressStatus, ReviewAction, StudyCard,
};

// === Database Entity Types ===

/// Registered user
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbUser {
    pub id: Uuid,
    pub token: String,
    pub display_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub last_seen_at: DateTime<Utc>,
}

/// Card joined with the viewing user's progress row, if any
#[derive(Debug, Clone, FromRow)]
pub struct DbStudyCard {
    pub id: Uuid,
    pub deck_id: Uuid,
    pub front: String,
    pub back: String,
    pub image_url: Option<String>,
    pub status: Option<String>,
    pub times_reviewed: Option<i32>,
    pub times_mastered: Option<i32>,
    pub times_struggled: Option<i32>,
    pub last_reviewed_at: Option<DateTime<Utc>>,
}

impl DbStudyCard {
    /// Convert to the shared study card; a missing progress row reads as NEW.
    pub fn to_study_card(&self) -> StudyCard {
        let progress = match &self.status {
            Some(status) => DbProgress {
                status: status.clone(),
                times_reviewed: self.times_reviewed.unwrap_or(0),
                times_mastered: self.times_mastered.unwrap_or(0),
                times_struggled: self.times_struggled.unwrap_or(0),
                last_reviewed_at: self.last_reviewed_at,
            }
            .to_core_progress(),
            None => Progress::default(),
        };

        StudyCard {
            id: self.id,
            front: self.front.clone(),
            back: self.back.clone(),
            image_url: self.image_url.clone(),
            progress,
        }
    }
}

/// Progress row
#[derive(Debug, Clone, FromRow)]
pub struct DbProgress {
    pub status: String,
    pub times_reviewed: i32,
    pub times_mastered: i32,
    pub times_struggled: i32,
    pub last_reviewed_at: Option<DateTime<Utc>>,
}

impl DbProgress {
    pub fn from_core_progress(progress: &Progress) -> Self {
        Self {
            status: progress.status.as_str().to_string(),
            times_reviewed: to_db_count(progress.times_reviewed),
            times_mastered: to_db_count(progress.times_mastered),
            times_struggled: to_db_count(progress.times_struggled),
            last_reviewed_at: progress.last_reviewed_at,
        }
    }

    pub fn to_core_progress(&self) -> Progress {
        Progress {
            status: ProgressStatus::from_str(&self.status).unwrap_or_default(),
            times_reviewed: self.times_reviewed.max(0) as u32,
            times_mastered: self.times_mastered.max(0) as u32,
            times_struggled: self.times_struggled.max(0) as u32,
            last_reviewed_at: self.last_reviewed_at,
        }
    }
}

fn to_db_count(n: u32) -> i32 {
    i32::try_from(n).unwrap_or(i32::MAX)
}

/// Deck row with aggregated card counts
#[derive(Debug, Clone, FromRow)]
pub struct DbDeckSummary {
    pub id: Uuid,
    pub title: String,
    pub subject: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub total_cards: i64,
    pub mastered_cards: i64,
}

impl DbDeckSummary {
    pub fn to_summary(&self) -> DeckSummary {
        let total_cards = self.total_cards.max(0) as usize;
        let mastered_cards = self.mastered_cards.max(0) as usize;
        DeckSummary {
            id: self.id,
            title: self.title.clone(),
            subject: self.subject.clone(),
            created_at: self.created_at,
            updated_at: self.updated_at,
            total_cards,
            mastered_cards,
            mastered_percent: cardify_core::mastered_percent(mastered_cards, total_cards),
        }
    }
}

// === API Request/Response Types ===

/// Register request
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct RegisterRequest {
    pub display_name: Option<String>,
}

/// Register response
#[derive(Debug, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub user_id: Uuid,
    pub token: String,
}

/// Session status response
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionStatusResponse {
    pub user_id: Uuid,
    pub display_name: Option<String>,
    pub last_seen_at: DateTime<Utc>,
}

/// Deck list entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeckSummary {
    pub id: Uuid,
    pub title: String,
    pub subject: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub total_cards: usize,
    pub mastered_cards: usize,
    pub mastered_percent: f64,
}

/// Deck with every card and the user's progress on it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeckDetail {
    #[serde(flatten)]
    pub summary: DeckSummary,
    pub cards: Vec<StudyCard>,
}

/// Create deck request
#[derive(Debug, Deserialize, Serialize)]
pub struct CreateDeckRequest {
    pub title: String,
    pub subject: Option<String>,
    #[serde(default)]
    pub cards: Vec<CardDraft>,
}

/// Review request
#[derive(Debug, Deserialize, Serialize)]
pub struct ReviewRequest {
    pub action: ReviewAction,
}

/// Quick review query params
#[derive(Debug, Deserialize)]
pub struct QuickReviewParams {
    pub limit: Option<i64>,
}

/// Card in the cross-deck quick review queue
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuickReviewCard {
    pub deck_id: Uuid,
    #[serde(flatten)]
    pub card: StudyCard,
}

/// Dashboard counters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardStats {
    pub mastered_count: i64,
    pub struggling_count: i64,
    pub reviewed_today_count: i64,
}

/// Generate request
#[derive(Debug, Deserialize, Serialize)]
pub struct GenerateRequest {
    pub topic: String,
    pub count: usize,
}

/// Generate response
#[derive(Debug, Serialize, Deserialize)]
pub struct GenerateResponse {
    pub cards: Vec<CardDraft>,
}

/// Tutor chat request
#[derive(Debug, Deserialize, Serialize)]
pub struct ChatRequest {
    pub question: String,
    #[serde(default)]
    pub answer: String,
    pub message: String,
}

/// Tutor chat response
#[derive(Debug, Serialize, Deserialize)]
pub struct ChatResponse {
    pub reply: String,
}
