/*
 * Responsibility
 * - tasks テーブル向け SQLx 操作
 * - UpdateInstruction は 1 本の UPDATE 文 (bind のみ, 値の文字列連結なし) に変換する
 * - 対象行が無い update は StoreError::NotFound
 */
use async_trait::async_trait;
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::models::{Assignment, Task, UpdateInstruction};
use crate::repos::error::StoreError;
use crate::repos::task_repo::TaskStore;

#[derive(Debug, FromRow)]
pub struct TaskRow {
    pub id: Uuid,
    pub description: String,
    pub due_date: Option<String>,
    pub priority: Option<String>,
    pub category: Option<String>,
    pub completed: bool,
}

impl From<TaskRow> for Task {
    fn from(row: TaskRow) -> Self {
        Task {
            id: row.id,
            description: row.description,
            due_date: row.due_date,
            priority: row.priority,
            category: row.category,
            completed: row.completed,
        }
    }
}

#[derive(Clone, Debug)]
pub struct PgTaskStore {
    pool: PgPool,
}

impl PgTaskStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn ensure_schema(&self) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS tasks (
                id          UUID PRIMARY KEY,
                description TEXT NOT NULL,
                due_date    TEXT NULL,
                priority    TEXT NULL,
                category    TEXT NULL,
                completed   BOOLEAN NOT NULL DEFAULT FALSE
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

/// Build the single UPDATE statement for an instruction.
///
/// Column names come from the fixed field table; every value is a bind parameter.
pub fn update_query(id: Uuid, instruction: &UpdateInstruction) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::<Postgres>::new("UPDATE tasks SET ");

    {
        let mut set = qb.separated(", ");
        for assignment in instruction.assignments() {
            set.push(assignment.field().column());
            set.push_unseparated(" = ");
            match assignment.clone() {
                Assignment::Description(v) => {
                    set.push_bind_unseparated(v);
                }
                Assignment::Completed(v) => {
                    set.push_bind_unseparated(v);
                }
                Assignment::DueDate(v) | Assignment::Priority(v) | Assignment::Category(v) => {
                    set.push_bind_unseparated(v);
                }
            }
        }
    }

    qb.push(" WHERE id = ");
    qb.push_bind(id);
    qb.push(" RETURNING id");
    qb
}

#[async_trait]
impl TaskStore for PgTaskStore {
    fn backend_name(&self) -> &'static str {
        "postgres"
    }

    async fn scan(&self) -> Result<Vec<Task>, StoreError> {
        let rows = sqlx::query_as::<_, TaskRow>(
            r#"
            SELECT id, description, due_date, priority, category, completed
            FROM tasks
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Task::from).collect())
    }

    async fn put(&self, task: &Task) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO tasks (id, description, due_date, priority, category, completed)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (id) DO UPDATE SET
                description = EXCLUDED.description,
                due_date = EXCLUDED.due_date,
                priority = EXCLUDED.priority,
                category = EXCLUDED.category,
                completed = EXCLUDED.completed
            "#,
        )
        .bind(task.id)
        .bind(&task.description)
        .bind(&task.due_date)
        .bind(&task.priority)
        .bind(&task.category)
        .bind(task.completed)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn update(&self, id: Uuid, instruction: &UpdateInstruction) -> Result<(), StoreError> {
        let mut query = update_query(id, instruction);
        let updated = query.build().fetch_optional(&self.pool).await?;

        match updated {
            Some(_) => Ok(()),
            None => Err(StoreError::NotFound),
        }
    }

    async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            DELETE FROM tasks
            WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
