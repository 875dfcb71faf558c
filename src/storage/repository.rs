use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::model::{MetricRecord, ProjectStatus};

// ── Projects ───────────────────────────────────────────────────────

const PROJECT_COLUMNS: &str = "project_id, name, analytics_type, data_source, time_range,
    metrics_of_interest, target_revenue, current_revenue, target_users, current_users,
    target_conversion, current_conversion, budget, team_size, created_at, status";

pub fn insert_project(conn: &Connection, record: &MetricRecord) -> Result<(), rusqlite::Error> {
    conn.execute(
        &format!(
            "INSERT INTO projects ({PROJECT_COLUMNS})
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16)"
        ),
        params![
            record.id,
            record.name,
            record.analytics_type,
            record.data_source,
            record.time_range,
            record.metrics_of_interest,
            record.target_revenue,
            record.current_revenue,
            to_sql_count(record.target_users),
            to_sql_count(record.current_users),
            record.target_conversion,
            record.current_conversion,
            record.budget,
            record.team_size,
            record
                .created_at
                .to_rfc3339_opts(SecondsFormat::Nanos, true),
            record.status.as_str(),
        ],
    )?;
    Ok(())
}

/// Delete a project. Returns false if no row had that id.
pub fn delete_project(conn: &Connection, project_id: &str) -> Result<bool, rusqlite::Error> {
    let count = conn.execute(
        "DELETE FROM projects WHERE project_id = ?1",
        params![project_id],
    )?;
    Ok(count > 0)
}

pub fn get_project(
    conn: &Connection,
    project_id: &str,
) -> Result<Option<MetricRecord>, rusqlite::Error> {
    conn.query_row(
        &format!("SELECT {PROJECT_COLUMNS} FROM projects WHERE project_id = ?1"),
        params![project_id],
        project_from_row,
    )
    .optional()
}

/// All projects in creation order.
pub fn list_projects(conn: &Connection) -> Result<Vec<MetricRecord>, rusqlite::Error> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {PROJECT_COLUMNS} FROM projects ORDER BY created_at, rowid"
    ))?;
    let rows = stmt.query_map([], project_from_row)?;
    rows.collect()
}

pub fn count_projects(conn: &Connection) -> Result<usize, rusqlite::Error> {
    let count: i64 = conn.query_row("SELECT COUNT(*) FROM projects", [], |row| row.get(0))?;
    Ok(count as usize)
}

fn project_from_row(row: &Row<'_>) -> Result<MetricRecord, rusqlite::Error> {
    let created_raw: String = row.get(14)?;
    let created_at = DateTime::parse_from_rfc3339(&created_raw)
        .map(|d| d.with_timezone(&Utc))
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(14, Type::Text, Box::new(e)))?;

    let status_raw: String = row.get(15)?;
    let status = ProjectStatus::parse(&status_raw).unwrap_or_else(|| {
        log::warn!("Unknown project status '{status_raw}', treating as active");
        ProjectStatus::Active
    });

    let team_size: i64 = row.get(13)?;

    Ok(MetricRecord {
        id: row.get(0)?,
        name: row.get(1)?,
        analytics_type: row.get(2)?,
        data_source: row.get(3)?,
        time_range: row.get(4)?,
        metrics_of_interest: row.get(5)?,
        target_revenue: non_negative(row.get(6)?),
        current_revenue: non_negative(row.get(7)?),
        target_users: from_sql_count(row.get(8)?),
        current_users: from_sql_count(row.get(9)?),
        target_conversion: non_negative(row.get(10)?),
        current_conversion: non_negative(row.get(11)?),
        budget: non_negative(row.get(12)?),
        team_size: u32::try_from(team_size).ok().filter(|n| *n > 0).unwrap_or(1),
        created_at,
        status,
    })
}

// SQLite integers are signed 64-bit.
fn to_sql_count(n: u64) -> i64 {
    i64::try_from(n).unwrap_or(i64::MAX)
}

fn from_sql_count(n: i64) -> u64 {
    u64::try_from(n).unwrap_or(0)
}

fn non_negative(v: f64) -> f64 {
    if v.is_finite() && v > 0.0 {
        v
    } else {
        0.0
    }
}

// ── Config ─────────────────────────────────────────────────────────

pub fn get_config(conn: &Connection, key: &str) -> Result<Option<String>, rusqlite::Error> {
    conn.query_row(
        "SELECT value FROM app_config WHERE key = ?1",
        params![key],
        |row| row.get(0),
    )
    .optional()
}

pub fn set_config(conn: &Connection, key: &str, value: &str) -> Result<(), rusqlite::Error> {
    conn.execute(
        "INSERT OR REPLACE INTO app_config (key, value, updated_at)
         VALUES (?1, ?2, datetime('now'))",
        params![key, value],
    )?;
    Ok(())
}

pub fn list_config(conn: &Connection) -> Result<Vec<(String, String)>, rusqlite::Error> {
    let mut stmt = conn.prepare("SELECT key, value FROM app_config ORDER BY key")?;
    let rows = stmt.query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?;
    rows.collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::testing::scenario_record;
    use crate::storage::Database;
    use chrono::TimeZone;

    fn record(id: &str, minute: u32) -> MetricRecord {
        let mut r = scenario_record();
        r.id = id.to_string();
        r.name = format!("Project {id}");
        r.created_at = Utc.with_ymd_and_hms(2025, 1, 1, 9, minute, 0).unwrap();
        r
    }

    #[tokio::test]
    async fn test_config_round_trip() {
        let db = Database::open_memory().await.unwrap();

        db.writer()
            .call(|conn| {
                set_config(conn, "dashboard_title", "Ops Board")?;
                let val = get_config(conn, "dashboard_title")?;
                assert_eq!(val, Some("Ops Board".to_string()));

                let missing = get_config(conn, "nonexistent")?;
                assert_eq!(missing, None);

                set_config(conn, "company_name", "Acme")?;
                let all = list_config(conn)?;
                assert_eq!(
                    all,
                    vec![
                        ("company_name".to_string(), "Acme".to_string()),
                        ("dashboard_title".to_string(), "Ops Board".to_string()),
                    ]
                );
                Ok::<(), rusqlite::Error>(())
            })
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_project_round_trip() {
        let db = Database::open_memory().await.unwrap();

        db.writer()
            .call(|conn| {
                let original = record("p1", 0);
                insert_project(conn, &original)?;

                let loaded = get_project(conn, "p1")?.expect("project exists");
                assert_eq!(loaded, original);
                assert_eq!(get_project(conn, "p2")?, None);
                Ok::<(), rusqlite::Error>(())
            })
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_project_crud_and_order() {
        let db = Database::open_memory().await.unwrap();

        db.writer()
            .call(|conn| {
                insert_project(conn, &record("late", 30))?;
                insert_project(conn, &record("early", 5))?;
                insert_project(conn, &record("middle", 15))?;
                assert_eq!(count_projects(conn)?, 3);

                let ids: Vec<String> = list_projects(conn)?.into_iter().map(|p| p.id).collect();
                assert_eq!(ids, vec!["early", "middle", "late"]);

                assert!(delete_project(conn, "middle")?);
                assert!(!delete_project(conn, "middle")?);
                assert_eq!(count_projects(conn)?, 2);
                Ok::<(), rusqlite::Error>(())
            })
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_duplicate_id_rejected() {
        let db = Database::open_memory().await.unwrap();

        let result = db
            .writer()
            .call(|conn| {
                insert_project(conn, &record("p1", 0))?;
                insert_project(conn, &record("p1", 1))
            })
            .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_unknown_status_reads_as_active() {
        let db = Database::open_memory().await.unwrap();

        let loaded = db
            .writer()
            .call(|conn| {
                insert_project(conn, &record("p1", 0))?;
                conn.execute("UPDATE projects SET status = 'paused'", [])?;
                get_project(conn, "p1")
            })
            .await
            .unwrap()
            .unwrap();
        assert_eq!(loaded.status, ProjectStatus::Active);
    }
}
