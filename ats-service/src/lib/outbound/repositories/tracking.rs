use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;
use uuid::Uuid;

use crate::tracking::errors::StoreError;
use crate::tracking::models::Application;
use crate::tracking::models::ApplicationStatus;
use crate::tracking::models::Candidate;
use crate::tracking::models::EmploymentType;
use crate::tracking::models::ExperienceLevel;
use crate::tracking::models::Interview;
use crate::tracking::models::InterviewOutcome;
use crate::tracking::models::InterviewType;
use crate::tracking::models::Job;
use crate::tracking::models::JobStatus;

pub struct PostgresJobStore {
    pool: PgPool,
}

impl PostgresJobStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_job(row: &PgRow) -> Result<Job, StoreError> {
        Ok(Job {
            id: row.try_get("id").map_err(db_err)?,
            title: row.try_get("title").map_err(db_err)?,
            description: row.try_get("description").map_err(db_err)?,
            department: row.try_get("department").map_err(db_err)?,
            employment_type: enum_column(row, "employment_type", EmploymentType::parse)?,
            location: row.try_get("location").map_err(db_err)?,
            salary_range: row.try_get("salary_range").map_err(db_err)?,
            status: enum_column(row, "status", JobStatus::parse)?,
            created_by: row.try_get("created_by").map_err(db_err)?,
            created_at: row.try_get("created_at").map_err(db_err)?,
        })
    }
}

#[async_trait]
impl crate::tracking::ports::EntityStore<Job> for PostgresJobStore {
    async fn find_all(&self) -> Result<Vec<Job>, StoreError> {
        let rows = sqlx::query(
            "SELECT id, title, description, department, employment_type, location, salary_range, status, created_by, created_at \
             FROM jobs ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;

        rows.iter().map(Self::row_to_job).collect()
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Job>, StoreError> {
        let row = sqlx::query(
            "SELECT id, title, description, department, employment_type, location, salary_range, status, created_by, created_at \
             FROM jobs WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;

        row.as_ref().map(Self::row_to_job).transpose()
    }

    async fn save(&self, job: Job) -> Result<Job, StoreError> {
        sqlx::query(
            r#"
            INSERT INTO jobs (id, title, description, department, employment_type, location, salary_range, status, created_by, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            ON CONFLICT (id) DO UPDATE SET
                title = EXCLUDED.title,
                description = EXCLUDED.description,
                department = EXCLUDED.department,
                employment_type = EXCLUDED.employment_type,
                location = EXCLUDED.location,
                salary_range = EXCLUDED.salary_range,
                status = EXCLUDED.status
            "#,
        )
        .bind(job.id)
        .bind(&job.title)
        .bind(&job.description)
        .bind(&job.department)
        .bind(job.employment_type.as_str())
        .bind(&job.location)
        .bind(&job.salary_range)
        .bind(job.status.as_str())
        .bind(job.created_by)
        .bind(job.created_at)
        .execute(&self.pool)
        .await
        .map_err(db_err)?;

        Ok(job)
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<(), StoreError> {
        delete_row(&self.pool, "jobs", id).await
    }
}

pub struct PostgresCandidateStore {
    pool: PgPool,
}

impl PostgresCandidateStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_candidate(row: &PgRow) -> Result<Candidate, StoreError> {
        Ok(Candidate {
            id: row.try_get("id").map_err(db_err)?,
            first_name: row.try_get("first_name").map_err(db_err)?,
            last_name: row.try_get("last_name").map_err(db_err)?,
            email: row.try_get("email").map_err(db_err)?,
            phone_number: row.try_get("phone_number").map_err(db_err)?,
            resume_url: row.try_get("resume_url").map_err(db_err)?,
            linkedin_url: row.try_get("linkedin_url").map_err(db_err)?,
            experience_level: enum_column(row, "experience_level", ExperienceLevel::parse)?,
            location: row.try_get("location").map_err(db_err)?,
            created_at: row.try_get("created_at").map_err(db_err)?,
        })
    }
}

#[async_trait]
impl crate::tracking::ports::EntityStore<Candidate> for PostgresCandidateStore {
    async fn find_all(&self) -> Result<Vec<Candidate>, StoreError> {
        let rows = sqlx::query(
            "SELECT id, first_name, last_name, email, phone_number, resume_url, linkedin_url, experience_level, location, created_at \
             FROM candidates ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;

        rows.iter().map(Self::row_to_candidate).collect()
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Candidate>, StoreError> {
        let row = sqlx::query(
            "SELECT id, first_name, last_name, email, phone_number, resume_url, linkedin_url, experience_level, location, created_at \
             FROM candidates WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;

        row.as_ref().map(Self::row_to_candidate).transpose()
    }

    async fn save(&self, candidate: Candidate) -> Result<Candidate, StoreError> {
        sqlx::query(
            r#"
            INSERT INTO candidates (id, first_name, last_name, email, phone_number, resume_url, linkedin_url, experience_level, location, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            ON CONFLICT (id) DO UPDATE SET
                first_name = EXCLUDED.first_name,
                last_name = EXCLUDED.last_name,
                email = EXCLUDED.email,
                phone_number = EXCLUDED.phone_number,
                resume_url = EXCLUDED.resume_url,
                linkedin_url = EXCLUDED.linkedin_url,
                experience_level = EXCLUDED.experience_level,
                location = EXCLUDED.location
            "#,
        )
        .bind(candidate.id)
        .bind(&candidate.first_name)
        .bind(&candidate.last_name)
        .bind(&candidate.email)
        .bind(&candidate.phone_number)
        .bind(&candidate.resume_url)
        .bind(&candidate.linkedin_url)
        .bind(candidate.experience_level.as_str())
        .bind(&candidate.location)
        .bind(candidate.created_at)
        .execute(&self.pool)
        .await
        .map_err(db_err)?;

        Ok(candidate)
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<(), StoreError> {
        delete_row(&self.pool, "candidates", id).await
    }
}

pub struct PostgresApplicationStore {
    pool: PgPool,
}

impl PostgresApplicationStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_application(row: &PgRow) -> Result<Application, StoreError> {
        Ok(Application {
            id: row.try_get("id").map_err(db_err)?,
            job_id: row.try_get("job_id").map_err(db_err)?,
            candidate_id: row.try_get("candidate_id").map_err(db_err)?,
            status: enum_column(row, "status", ApplicationStatus::parse)?,
            applied_at: row.try_get("applied_at").map_err(db_err)?,
            source: row.try_get("source").map_err(db_err)?,
            notes: row.try_get("notes").map_err(db_err)?,
        })
    }
}

#[async_trait]
impl crate::tracking::ports::EntityStore<Application> for PostgresApplicationStore {
    async fn find_all(&self) -> Result<Vec<Application>, StoreError> {
        let rows = sqlx::query(
            "SELECT id, job_id, candidate_id, status, applied_at, source, notes \
             FROM applications ORDER BY applied_at DESC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;

        rows.iter().map(Self::row_to_application).collect()
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Application>, StoreError> {
        let row = sqlx::query(
            "SELECT id, job_id, candidate_id, status, applied_at, source, notes \
             FROM applications WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;

        row.as_ref().map(Self::row_to_application).transpose()
    }

    async fn save(&self, application: Application) -> Result<Application, StoreError> {
        sqlx::query(
            r#"
            INSERT INTO applications (id, job_id, candidate_id, status, applied_at, source, notes)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (id) DO UPDATE SET
                job_id = EXCLUDED.job_id,
                candidate_id = EXCLUDED.candidate_id,
                status = EXCLUDED.status,
                source = EXCLUDED.source,
                notes = EXCLUDED.notes
            "#,
        )
        .bind(application.id)
        .bind(application.job_id)
        .bind(application.candidate_id)
        .bind(application.status.as_str())
        .bind(application.applied_at)
        .bind(&application.source)
        .bind(&application.notes)
        .execute(&self.pool)
        .await
        .map_err(db_err)?;

        Ok(application)
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<(), StoreError> {
        delete_row(&self.pool, "applications", id).await
    }
}

pub struct PostgresInterviewStore {
    pool: PgPool,
}

impl PostgresInterviewStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_interview(row: &PgRow) -> Result<Interview, StoreError> {
        Ok(Interview {
            id: row.try_get("id").map_err(db_err)?,
            application_id: row.try_get("application_id").map_err(db_err)?,
            interviewer_id: row.try_get("interviewer_id").map_err(db_err)?,
            interview_date: row.try_get("interview_date").map_err(db_err)?,
            interview_type: enum_column(row, "interview_type", InterviewType::parse)?,
            feedback: row.try_get("feedback").map_err(db_err)?,
            rating: row.try_get("rating").map_err(db_err)?,
            outcome: enum_column(row, "outcome", InterviewOutcome::parse)?,
        })
    }
}

#[async_trait]
impl crate::tracking::ports::EntityStore<Interview> for PostgresInterviewStore {
    async fn find_all(&self) -> Result<Vec<Interview>, StoreError> {
        let rows = sqlx::query(
            "SELECT id, application_id, interviewer_id, interview_date, interview_type, feedback, rating, outcome \
             FROM interviews ORDER BY interview_date DESC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;

        rows.iter().map(Self::row_to_interview).collect()
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Interview>, StoreError> {
        let row = sqlx::query(
            "SELECT id, application_id, interviewer_id, interview_date, interview_type, feedback, rating, outcome \
             FROM interviews WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;

        row.as_ref().map(Self::row_to_interview).transpose()
    }

    async fn save(&self, interview: Interview) -> Result<Interview, StoreError> {
        sqlx::query(
            r#"
            INSERT INTO interviews (id, application_id, interviewer_id, interview_date, interview_type, feedback, rating, outcome)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT (id) DO UPDATE SET
                application_id = EXCLUDED.application_id,
                interviewer_id = EXCLUDED.interviewer_id,
                interview_date = EXCLUDED.interview_date,
                interview_type = EXCLUDED.interview_type,
                feedback = EXCLUDED.feedback,
                rating = EXCLUDED.rating,
                outcome = EXCLUDED.outcome
            "#,
        )
        .bind(interview.id)
        .bind(interview.application_id)
        .bind(interview.interviewer_id)
        .bind(interview.interview_date)
        .bind(interview.interview_type.as_str())
        .bind(&interview.feedback)
        .bind(interview.rating)
        .bind(interview.outcome.as_str())
        .execute(&self.pool)
        .await
        .map_err(db_err)?;

        Ok(interview)
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<(), StoreError> {
        delete_row(&self.pool, "interviews", id).await
    }
}

fn enum_column<T>(
    row: &PgRow,
    column: &str,
    parse: impl Fn(&str) -> Option<T>,
) -> Result<T, StoreError> {
    let value: String = row.try_get(column).map_err(db_err)?;
    parse(&value)
        .ok_or_else(|| StoreError::DatabaseError(format!("Unknown {} in store: {}", column, value)))
}

async fn delete_row(pool: &PgPool, table: &str, id: Uuid) -> Result<(), StoreError> {
    let result = sqlx::query(&format!("DELETE FROM {} WHERE id = $1", table))
        .bind(id)
        .execute(pool)
        .await
        .map_err(db_err)?;

    if result.rows_affected() == 0 {
        return Err(StoreError::NotFound(id.to_string()));
    }

    Ok(())
}

fn db_err(e: impl std::fmt::Display) -> StoreError {
    StoreError::DatabaseError(e.to_string())
}
