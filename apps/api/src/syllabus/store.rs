//! Persistence for syllabi and their assignments.
//!
//! Every function takes the pool as an argument; nothing here holds global
//! state. Writes that touch both tables run inside a single transaction so
//! a failed upsert or delete never leaves a syllabus half-replaced.

use std::collections::HashMap;

use chrono::{Duration, NaiveDate, Utc};
use sqlx::SqlitePool;
use tracing::info;

use crate::models::syllabus::{AssignmentRow, SyllabusRow};
use crate::syllabus::models::{Syllabus, SyllabusWrite};

/// Ceiling for due-date windows. Dates compare as TEXT in SQLite, and
/// years past 9999 render with a leading `+` that sorts before every
/// real date, so window arithmetic clamps here instead.
const MAX_DUE_DATE: NaiveDate = match NaiveDate::from_ymd_opt(9999, 12, 31) {
    Some(date) => date,
    None => unreachable!(),
};

/// Creates or replaces a syllabus and returns the persisted record.
///
/// `Update` with an id that exists keeps the row (and its `created_at`),
/// rewrites the parent fields and replaces the full assignment set.
/// `Update` with an unknown id, and `Create`, insert a fresh row with a
/// generated id; any caller-supplied id is not reused.
pub async fn upsert_syllabus(
    pool: &SqlitePool,
    write: SyllabusWrite,
) -> Result<Syllabus, sqlx::Error> {
    let (target, payload) = match write {
        SyllabusWrite::Create(payload) => (None, payload),
        SyllabusWrite::Update(id, payload) => (Some(id), payload),
    };

    let mut tx = pool.begin().await?;
    let now = Utc::now();

    // 1. Resolve the target row, if any
    let existing: Option<i64> = match target {
        Some(id) => {
            sqlx::query_scalar("SELECT id FROM syllabi WHERE id = ?1")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?
        }
        None => None,
    };

    // 2. Update in place or insert a fresh parent row
    let syllabus_id = match existing {
        Some(id) => {
            sqlx::query(
                "UPDATE syllabi SET class_name = ?1, course_code = ?2, updated_at = ?3 WHERE id = ?4",
            )
            .bind(&payload.class_name)
            .bind(&payload.course_code)
            .bind(now)
            .bind(id)
            .execute(&mut *tx)
            .await?;

            // Replace semantics: the stored assignment set is exactly the
            // payload's, so drop the old rows before inserting.
            sqlx::query("DELETE FROM assignments WHERE syllabus_id = ?1")
                .bind(id)
                .execute(&mut *tx)
                .await?;

            id
        }
        None => {
            sqlx::query_scalar(
                r#"
                INSERT INTO syllabi (class_name, course_code, created_at, updated_at)
                VALUES (?1, ?2, ?3, ?4)
                RETURNING id
                "#,
            )
            .bind(&payload.class_name)
            .bind(&payload.course_code)
            .bind(now)
            .bind(now)
            .fetch_one(&mut *tx)
            .await?
        }
    };

    // 3. Insert the assignment set in payload order
    for assignment in &payload.assignments {
        sqlx::query(
            r#"
            INSERT INTO assignments
                (name, due_date, due_time, submission_link, status, syllabus_id,
                 created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
        )
        .bind(&assignment.name)
        .bind(assignment.due_date)
        .bind(&assignment.due_time)
        .bind(&assignment.submission_link)
        .bind(assignment.status.as_str())
        .bind(syllabus_id)
        .bind(now)
        .bind(now)
        .execute(&mut *tx)
        .await?;
    }

    // 4. Read the stored record back inside the transaction so the caller
    //    sees the generated ids
    let row = sqlx::query_as::<_, SyllabusRow>("SELECT * FROM syllabi WHERE id = ?1")
        .bind(syllabus_id)
        .fetch_one(&mut *tx)
        .await?;
    let assignment_rows = sqlx::query_as::<_, AssignmentRow>(
        "SELECT * FROM assignments WHERE syllabus_id = ?1 ORDER BY id",
    )
    .bind(syllabus_id)
    .fetch_all(&mut *tx)
    .await?;

    tx.commit().await?;

    match existing {
        Some(_) => info!(
            "Replaced syllabus {syllabus_id} with {} assignments",
            payload.assignments.len()
        ),
        None => info!(
            "Created syllabus {syllabus_id} ({}) with {} assignments",
            payload.course_code,
            payload.assignments.len()
        ),
    }

    assemble(row, assignment_rows)
}

/// Returns a syllabus with its assignments, or `None` if the id is unknown.
pub async fn get_syllabus(pool: &SqlitePool, id: i64) -> Result<Option<Syllabus>, sqlx::Error> {
    let row = sqlx::query_as::<_, SyllabusRow>("SELECT * FROM syllabi WHERE id = ?1")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    let row = match row {
        Some(row) => row,
        None => return Ok(None),
    };
    let assignments = sqlx::query_as::<_, AssignmentRow>(
        "SELECT * FROM assignments WHERE syllabus_id = ?1 ORDER BY id",
    )
    .bind(row.id)
    .fetch_all(pool)
    .await?;
    Ok(Some(assemble(row, assignments)?))
}

/// Returns the first syllabus (lowest id) matching a course code exactly.
pub async fn get_syllabus_by_course_code(
    pool: &SqlitePool,
    course_code: &str,
) -> Result<Option<Syllabus>, sqlx::Error> {
    let row = sqlx::query_as::<_, SyllabusRow>(
        "SELECT * FROM syllabi WHERE course_code = ?1 ORDER BY id LIMIT 1",
    )
    .bind(course_code)
    .fetch_optional(pool)
    .await?;
    match row {
        Some(row) => get_syllabus(pool, row.id).await,
        None => Ok(None),
    }
}

/// Returns every syllabus with its assignments, ordered by id.
pub async fn get_all_syllabi(pool: &SqlitePool) -> Result<Vec<Syllabus>, sqlx::Error> {
    let rows = sqlx::query_as::<_, SyllabusRow>("SELECT * FROM syllabi ORDER BY id")
        .fetch_all(pool)
        .await?;
    let assignment_rows = sqlx::query_as::<_, AssignmentRow>(
        "SELECT * FROM assignments ORDER BY syllabus_id, id",
    )
    .fetch_all(pool)
    .await?;

    let mut by_syllabus: HashMap<i64, Vec<AssignmentRow>> = HashMap::new();
    for assignment in assignment_rows {
        by_syllabus
            .entry(assignment.syllabus_id)
            .or_default()
            .push(assignment);
    }

    let mut syllabi = Vec::with_capacity(rows.len());
    for row in rows {
        let assignments = by_syllabus.remove(&row.id).unwrap_or_default();
        syllabi.push(assemble(row, assignments)?);
    }
    Ok(syllabi)
}

/// True if a syllabus row with this id exists.
pub async fn syllabus_exists(pool: &SqlitePool, id: i64) -> Result<bool, sqlx::Error> {
    let found: Option<i64> = sqlx::query_scalar("SELECT id FROM syllabi WHERE id = ?1")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(found.is_some())
}

/// Assignments due within `[today, today + days_ahead]`, both ends
/// inclusive, ordered by due date. A negative window yields nothing; a
/// window reaching past year 9999 is capped at `MAX_DUE_DATE`.
pub async fn get_upcoming_assignments(
    pool: &SqlitePool,
    today: NaiveDate,
    days_ahead: i64,
) -> Result<Vec<AssignmentRow>, sqlx::Error> {
    if days_ahead < 0 {
        return Ok(Vec::new());
    }
    let end = Duration::try_days(days_ahead)
        .and_then(|window| today.checked_add_signed(window))
        .unwrap_or(MAX_DUE_DATE)
        .min(MAX_DUE_DATE);

    sqlx::query_as::<_, AssignmentRow>(
        r#"
        SELECT * FROM assignments
        WHERE due_date >= ?1 AND due_date <= ?2
        ORDER BY due_date, id
        "#,
    )
    .bind(today)
    .bind(end)
    .fetch_all(pool)
    .await
}

/// Assignments due on an exact date, ordered by id.
pub async fn get_assignments_on(
    pool: &SqlitePool,
    date: NaiveDate,
) -> Result<Vec<AssignmentRow>, sqlx::Error> {
    sqlx::query_as::<_, AssignmentRow>(
        "SELECT * FROM assignments WHERE due_date = ?1 ORDER BY id",
    )
    .bind(date)
    .fetch_all(pool)
    .await
}

/// Case-insensitive substring search over assignment names and the owning
/// syllabus's course code and class name. Each matching assignment appears
/// once, whichever columns matched.
pub async fn search_assignments(
    pool: &SqlitePool,
    query: &str,
) -> Result<Vec<AssignmentRow>, sqlx::Error> {
    let pattern = format!("%{}%", query.to_lowercase());
    sqlx::query_as::<_, AssignmentRow>(
        r#"
        SELECT a.* FROM assignments a
        JOIN syllabi s ON s.id = a.syllabus_id
        WHERE lower(a.name) LIKE ?1
           OR lower(s.course_code) LIKE ?1
           OR lower(s.class_name) LIKE ?1
        ORDER BY a.id
        "#,
    )
    .bind(&pattern)
    .fetch_all(pool)
    .await
}

/// Deletes a syllabus and its assignments. Returns `false` if the id did
/// not exist. The child rows are deleted explicitly in the same
/// transaction rather than relying on the FK cascade.
pub async fn delete_syllabus(pool: &SqlitePool, id: i64) -> Result<bool, sqlx::Error> {
    let mut tx = pool.begin().await?;

    sqlx::query("DELETE FROM assignments WHERE syllabus_id = ?1")
        .bind(id)
        .execute(&mut *tx)
        .await?;
    let affected = sqlx::query("DELETE FROM syllabi WHERE id = ?1")
        .bind(id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

    tx.commit().await?;

    if affected > 0 {
        info!("Deleted syllabus {id}");
    }
    Ok(affected > 0)
}

fn assemble(
    row: SyllabusRow,
    assignment_rows: Vec<AssignmentRow>,
) -> Result<Syllabus, sqlx::Error> {
    let mut assignments = Vec::with_capacity(assignment_rows.len());
    for assignment in assignment_rows {
        assignments.push(assignment.into_assignment()?);
    }
    Ok(Syllabus {
        id: row.id,
        class_name: row.class_name,
        course_code: row.course_code,
        assignments,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syllabus::models::{AssignmentStatus, NewAssignment, NewSyllabus};
    use sqlx::sqlite::SqlitePoolOptions;

    async fn test_pool() -> SqlitePool {
        // A single connection keeps the in-memory database alive and shared
        // for the whole test.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("in-memory pool");
        crate::db::MIGRATOR.run(&pool).await.expect("migrations");
        pool
    }

    fn make_assignment(name: &str, due: &str) -> NewAssignment {
        NewAssignment {
            name: name.to_string(),
            due_date: due.parse().expect("test date"),
            due_time: "11:59 PM".to_string(),
            submission_link: "https://lms.example.edu/submit".to_string(),
            status: AssignmentStatus::NotStarted,
        }
    }

    fn make_syllabus(class_name: &str, course_code: &str, assignments: Vec<NewAssignment>) -> NewSyllabus {
        NewSyllabus {
            class_name: class_name.to_string(),
            course_code: course_code.to_string(),
            assignments,
        }
    }

    async fn assignment_count(pool: &SqlitePool) -> i64 {
        sqlx::query_scalar("SELECT COUNT(*) FROM assignments")
            .fetch_one(pool)
            .await
            .expect("count")
    }

    #[tokio::test]
    async fn test_create_then_get_round_trips() {
        let pool = test_pool().await;
        let payload = make_syllabus(
            "Advanced Algorithms",
            "CS-401",
            vec![
                make_assignment("Problem Set 1", "2025-02-14"),
                make_assignment("Midterm Exam", "2025-03-10"),
            ],
        );

        let created = upsert_syllabus(&pool, SyllabusWrite::Create(payload))
            .await
            .unwrap();
        assert!(created.id > 0);

        let fetched = get_syllabus(&pool, created.id).await.unwrap().unwrap();
        assert_eq!(fetched.class_name, "Advanced Algorithms");
        assert_eq!(fetched.course_code, "CS-401");
        assert_eq!(fetched.assignments.len(), 2);
        assert_eq!(fetched.assignments[0].name, "Problem Set 1");
        assert_eq!(
            fetched.assignments[0].due_date,
            "2025-02-14".parse::<NaiveDate>().unwrap()
        );
        assert_eq!(fetched.assignments[0].status, AssignmentStatus::NotStarted);
        assert_eq!(fetched.assignments[1].name, "Midterm Exam");
    }

    #[tokio::test]
    async fn test_empty_assignment_list_is_legal() {
        let pool = test_pool().await;
        let created = upsert_syllabus(
            &pool,
            SyllabusWrite::Create(make_syllabus("Seminar", "SEM-100", vec![])),
        )
        .await
        .unwrap();
        let fetched = get_syllabus(&pool, created.id).await.unwrap().unwrap();
        assert!(fetched.assignments.is_empty());
    }

    #[tokio::test]
    async fn test_update_replaces_assignment_set() {
        let pool = test_pool().await;
        let created = upsert_syllabus(
            &pool,
            SyllabusWrite::Create(make_syllabus(
                "Databases",
                "CS-348",
                vec![
                    make_assignment("Lab 1", "2025-01-20"),
                    make_assignment("Lab 2", "2025-02-03"),
                    make_assignment("Lab 3", "2025-02-17"),
                ],
            )),
        )
        .await
        .unwrap();

        let replacement = make_syllabus(
            "Databases",
            "CS-348",
            vec![make_assignment("Final Project", "2025-04-01")],
        );
        let updated = upsert_syllabus(
            &pool,
            SyllabusWrite::Update(created.id, replacement.clone()),
        )
        .await
        .unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.assignments.len(), 1);
        assert_eq!(updated.assignments[0].name, "Final Project");
        assert_eq!(assignment_count(&pool).await, 1);

        // Replaying the same payload is idempotent in record shape.
        let replayed = upsert_syllabus(&pool, SyllabusWrite::Update(created.id, replacement))
            .await
            .unwrap();
        assert_eq!(replayed.id, created.id);
        assert_eq!(replayed.assignments.len(), 1);
        assert_eq!(replayed.assignments[0].name, "Final Project");
        assert_eq!(assignment_count(&pool).await, 1);
    }

    #[tokio::test]
    async fn test_update_preserves_created_at() {
        let pool = test_pool().await;
        let created = upsert_syllabus(
            &pool,
            SyllabusWrite::Create(make_syllabus("Compilers", "CS-444", vec![])),
        )
        .await
        .unwrap();
        let before: SyllabusRow = sqlx::query_as("SELECT * FROM syllabi WHERE id = ?1")
            .bind(created.id)
            .fetch_one(&pool)
            .await
            .unwrap();

        upsert_syllabus(
            &pool,
            SyllabusWrite::Update(created.id, make_syllabus("Compilers II", "CS-444", vec![])),
        )
        .await
        .unwrap();
        let after: SyllabusRow = sqlx::query_as("SELECT * FROM syllabi WHERE id = ?1")
            .bind(created.id)
            .fetch_one(&pool)
            .await
            .unwrap();

        assert_eq!(after.created_at, before.created_at);
        assert_eq!(after.class_name, "Compilers II");
        assert!(after.updated_at >= before.updated_at);
    }

    #[tokio::test]
    async fn test_update_with_unknown_id_creates_fresh_record() {
        let pool = test_pool().await;
        let saved = upsert_syllabus(
            &pool,
            SyllabusWrite::Update(9999, make_syllabus("Ethics", "PHIL-220", vec![])),
        )
        .await
        .unwrap();

        // The supplied id is not reused; the row gets a generated one.
        assert_ne!(saved.id, 9999);
        assert!(get_syllabus(&pool, 9999).await.unwrap().is_none());
        assert!(get_syllabus(&pool, saved.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_delete_cascades_and_reports() {
        let pool = test_pool().await;
        let created = upsert_syllabus(
            &pool,
            SyllabusWrite::Create(make_syllabus(
                "Networks",
                "CS-456",
                vec![make_assignment("Packet Tracer Lab", "2025-03-01")],
            )),
        )
        .await
        .unwrap();

        assert!(delete_syllabus(&pool, created.id).await.unwrap());
        assert!(get_syllabus(&pool, created.id).await.unwrap().is_none());
        assert_eq!(assignment_count(&pool).await, 0);

        // Deleting again reports missing rather than failing.
        assert!(!delete_syllabus(&pool, created.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_get_all_returns_stable_order() {
        let pool = test_pool().await;
        upsert_syllabus(
            &pool,
            SyllabusWrite::Create(make_syllabus("Algorithms", "CS-401", vec![])),
        )
        .await
        .unwrap();
        upsert_syllabus(
            &pool,
            SyllabusWrite::Create(make_syllabus(
                "Operating Systems",
                "CS-350",
                vec![make_assignment("Scheduler Assignment", "2025-02-20")],
            )),
        )
        .await
        .unwrap();

        let first = get_all_syllabi(&pool).await.unwrap();
        let second = get_all_syllabi(&pool).await.unwrap();
        assert_eq!(first.len(), 2);
        assert!(first[0].id < first[1].id);
        let ids: Vec<i64> = first.iter().map(|s| s.id).collect();
        let ids_again: Vec<i64> = second.iter().map(|s| s.id).collect();
        assert_eq!(ids, ids_again);
        assert_eq!(first[1].assignments.len(), 1);
    }

    #[tokio::test]
    async fn test_get_by_course_code_returns_first_match() {
        let pool = test_pool().await;
        let first = upsert_syllabus(
            &pool,
            SyllabusWrite::Create(make_syllabus("Algorithms (Fall)", "CS-401", vec![])),
        )
        .await
        .unwrap();
        upsert_syllabus(
            &pool,
            SyllabusWrite::Create(make_syllabus("Algorithms (Winter)", "CS-401", vec![])),
        )
        .await
        .unwrap();

        let found = get_syllabus_by_course_code(&pool, "CS-401")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.id, first.id);
        assert_eq!(found.class_name, "Algorithms (Fall)");

        assert!(get_syllabus_by_course_code(&pool, "CS-999")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_upcoming_window_is_inclusive() {
        let pool = test_pool().await;
        upsert_syllabus(
            &pool,
            SyllabusWrite::Create(make_syllabus(
                "Algorithms",
                "CS-401",
                vec![
                    make_assignment("Due Today", "2025-01-01"),
                    make_assignment("Due On Boundary", "2025-01-08"),
                    make_assignment("Due Past Boundary", "2025-01-09"),
                    make_assignment("Already Due", "2024-12-31"),
                ],
            )),
        )
        .await
        .unwrap();

        let today = "2025-01-01".parse::<NaiveDate>().unwrap();
        let upcoming = get_upcoming_assignments(&pool, today, 7).await.unwrap();

        let names: Vec<&str> = upcoming.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["Due Today", "Due On Boundary"]);
        // Ascending by due date.
        assert!(upcoming[0].due_date <= upcoming[1].due_date);
    }

    #[tokio::test]
    async fn test_upcoming_negative_window_is_empty() {
        let pool = test_pool().await;
        upsert_syllabus(
            &pool,
            SyllabusWrite::Create(make_syllabus(
                "Algorithms",
                "CS-401",
                vec![make_assignment("Due Today", "2025-01-01")],
            )),
        )
        .await
        .unwrap();

        let today = "2025-01-01".parse::<NaiveDate>().unwrap();
        let upcoming = get_upcoming_assignments(&pool, today, -1).await.unwrap();
        assert!(upcoming.is_empty());
    }

    #[tokio::test]
    async fn test_upcoming_zero_window_is_today_only() {
        let pool = test_pool().await;
        upsert_syllabus(
            &pool,
            SyllabusWrite::Create(make_syllabus(
                "Algorithms",
                "CS-401",
                vec![
                    make_assignment("Due Today", "2025-01-01"),
                    make_assignment("Due Tomorrow", "2025-01-02"),
                ],
            )),
        )
        .await
        .unwrap();

        let today = "2025-01-01".parse::<NaiveDate>().unwrap();
        let upcoming = get_upcoming_assignments(&pool, today, 0).await.unwrap();
        assert_eq!(upcoming.len(), 1);
        assert_eq!(upcoming[0].name, "Due Today");
    }

    #[tokio::test]
    async fn test_upcoming_huge_window_keeps_its_upper_bound() {
        let pool = test_pool().await;
        upsert_syllabus(
            &pool,
            SyllabusWrite::Create(make_syllabus(
                "Algorithms",
                "CS-401",
                vec![make_assignment("Due Tomorrow", "2025-01-02")],
            )),
        )
        .await
        .unwrap();

        let today = "2025-01-01".parse::<NaiveDate>().unwrap();
        // 10_000_000 days ends in a five-digit year, 100_000_000 days
        // overflows the date type, i64::MAX overflows the duration. All
        // must widen the window, never empty it.
        for days_ahead in [7, 10_000_000, 100_000_000, i64::MAX] {
            let upcoming = get_upcoming_assignments(&pool, today, days_ahead)
                .await
                .unwrap();
            assert_eq!(
                upcoming.len(),
                1,
                "window of {days_ahead} days lost the assignment"
            );
            assert_eq!(upcoming[0].name, "Due Tomorrow");
        }
    }

    #[tokio::test]
    async fn test_assignments_on_exact_date() {
        let pool = test_pool().await;
        upsert_syllabus(
            &pool,
            SyllabusWrite::Create(make_syllabus(
                "Algorithms",
                "CS-401",
                vec![
                    make_assignment("Quiz", "2025-03-05"),
                    make_assignment("Essay", "2025-03-05"),
                    make_assignment("Lab", "2025-03-06"),
                ],
            )),
        )
        .await
        .unwrap();

        let date = "2025-03-05".parse::<NaiveDate>().unwrap();
        let due = get_assignments_on(&pool, date).await.unwrap();
        assert_eq!(due.len(), 2);
        assert!(due.iter().all(|a| a.due_date == date));
    }

    #[tokio::test]
    async fn test_search_matches_course_code() {
        let pool = test_pool().await;
        upsert_syllabus(
            &pool,
            SyllabusWrite::Create(make_syllabus(
                "Advanced Computer Science",
                "CS-401",
                vec![
                    make_assignment("Midterm Exam", "2025-03-10"),
                    make_assignment("Final Project", "2025-04-15"),
                ],
            )),
        )
        .await
        .unwrap();

        // Neither assignment name contains "cs"; the course code does, so
        // every assignment of that syllabus matches.
        let hits = search_assignments(&pool, "cs").await.unwrap();
        assert_eq!(hits.len(), 2);
    }

    #[tokio::test]
    async fn test_search_matches_name_and_class_name() {
        let pool = test_pool().await;
        upsert_syllabus(
            &pool,
            SyllabusWrite::Create(make_syllabus(
                "Linear Algebra",
                "MATH-235",
                vec![
                    make_assignment("Midterm Exam", "2025-03-10"),
                    make_assignment("Homework 4", "2025-03-20"),
                ],
            )),
        )
        .await
        .unwrap();

        let by_name = search_assignments(&pool, "MIDTERM").await.unwrap();
        assert_eq!(by_name.len(), 1);
        assert_eq!(by_name[0].name, "Midterm Exam");

        let by_class = search_assignments(&pool, "algebra").await.unwrap();
        assert_eq!(by_class.len(), 2);
    }

    #[tokio::test]
    async fn test_search_reports_each_assignment_once() {
        let pool = test_pool().await;
        // "cs" appears in the assignment name and in the course code; the
        // row must still come back once.
        upsert_syllabus(
            &pool,
            SyllabusWrite::Create(make_syllabus(
                "Computer Science Seminar",
                "CS-490",
                vec![make_assignment("CS Reading Response", "2025-02-01")],
            )),
        )
        .await
        .unwrap();

        let hits = search_assignments(&pool, "cs").await.unwrap();
        assert_eq!(hits.len(), 1);
    }

    #[tokio::test]
    async fn test_search_without_match_is_empty() {
        let pool = test_pool().await;
        upsert_syllabus(
            &pool,
            SyllabusWrite::Create(make_syllabus(
                "Algorithms",
                "CS-401",
                vec![make_assignment("Quiz", "2025-03-05")],
            )),
        )
        .await
        .unwrap();

        assert!(search_assignments(&pool, "zzz").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_concurrent_upserts_leave_one_complete_payload() {
        use std::str::FromStr;

        // A file-backed database so two connections can actually contend.
        let dir = tempfile::tempdir().expect("tempdir");
        let url = format!("sqlite://{}", dir.path().join("contention.db").display());
        let options = sqlx::sqlite::SqliteConnectOptions::from_str(&url)
            .expect("options")
            .create_if_missing(true)
            .busy_timeout(std::time::Duration::from_secs(5));
        let pool = SqlitePoolOptions::new()
            .max_connections(4)
            .connect_with(options)
            .await
            .expect("file pool");
        crate::db::MIGRATOR.run(&pool).await.expect("migrations");

        let created = upsert_syllabus(
            &pool,
            SyllabusWrite::Create(make_syllabus("Algorithms", "CS-401", vec![])),
        )
        .await
        .unwrap();

        let payload_a = make_syllabus(
            "Algorithms",
            "CS-401",
            vec![
                make_assignment("a1", "2025-02-01"),
                make_assignment("a2", "2025-02-02"),
                make_assignment("a3", "2025-02-03"),
            ],
        );
        let payload_b = make_syllabus(
            "Algorithms",
            "CS-401",
            vec![
                make_assignment("b1", "2025-03-01"),
                make_assignment("b2", "2025-03-02"),
            ],
        );

        let (res_a, res_b) = tokio::join!(
            upsert_syllabus(&pool, SyllabusWrite::Update(created.id, payload_a)),
            upsert_syllabus(&pool, SyllabusWrite::Update(created.id, payload_b)),
        );

        // At most one writer can lose; the survivor's payload must be stored
        // whole, never an interleaving of both.
        assert!(res_a.is_ok() || res_b.is_ok());
        let stored = get_syllabus(&pool, created.id).await.unwrap().unwrap();
        let names: Vec<&str> = stored.assignments.iter().map(|a| a.name.as_str()).collect();
        assert!(
            names == vec!["a1", "a2", "a3"] || names == vec!["b1", "b2"],
            "stored assignment set mixes writers: {names:?}"
        );
    }
}
