// giftbot-core/src/repositories/postgres/player.rs

use chrono::Utc;
use sqlx::{Pool, Postgres};

use giftbot_common::error::Error;
use giftbot_common::models::Player;
use giftbot_common::traits::repository_traits::PlayerRepo;

pub struct PlayerRepository {
    pub pool: Pool<Postgres>,
}

impl PlayerRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl PlayerRepo for PlayerRepository {
    async fn create(&self, player: &Player) -> Result<(), Error> {
        sqlx::query(
            r#"
            INSERT INTO players (
                player_id, player_name, state_id, furnace_level,
                last_code, last_message, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
            .bind(player.player_id)
            .bind(&player.player_name)
            .bind(player.state_id)
            .bind(player.furnace_level)
            .bind(&player.last_code)
            .bind(&player.last_message)
            .bind(player.created_at)
            .bind(player.updated_at)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn get(&self, player_id: i64) -> Result<Option<Player>, Error> {
        let row = sqlx::query_as::<_, Player>(
            r#"
            SELECT player_id,
                   player_name,
                   state_id,
                   furnace_level,
                   last_code,
                   last_message,
                   created_at,
                   updated_at
            FROM players
            WHERE player_id = $1
            "#,
        )
            .bind(player_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row)
    }

    async fn delete(&self, player_id: i64) -> Result<(), Error> {
        sqlx::query("DELETE FROM players WHERE player_id = $1")
            .bind(player_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<Player>, Error> {
        let rows = sqlx::query_as::<_, Player>(
            r#"
            SELECT player_id,
                   player_name,
                   state_id,
                   furnace_level,
                   last_code,
                   last_message,
                   created_at,
                   updated_at
            FROM players
            ORDER BY created_at ASC
            "#,
        )
            .fetch_all(&self.pool)
            .await?;

        Ok(rows)
    }

    async fn list_eligible(&self, code: &str) -> Result<Vec<Player>, Error> {
        // last_code is written only for completed attempts, so NULL or a
        // different code means this player is still owed an attempt.
        let rows = sqlx::query_as::<_, Player>(
            r#"
            SELECT player_id,
                   player_name,
                   state_id,
                   furnace_level,
                   last_code,
                   last_message,
                   created_at,
                   updated_at
            FROM players
            WHERE last_code IS NULL OR last_code <> $1
            ORDER BY created_at ASC
            "#,
        )
            .bind(code)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows)
    }

    async fn record_attempt<'a>(
        &self,
        player_id: i64,
        code: Option<&'a str>,
        message: &'a str,
    ) -> Result<(), Error> {
        sqlx::query(
            r#"
            UPDATE players
            SET last_code = $2,
                last_message = $3,
                updated_at = $4
            WHERE player_id = $1
            "#,
        )
            .bind(player_id)
            .bind(code)
            .bind(message)
            .bind(Utc::now())
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
