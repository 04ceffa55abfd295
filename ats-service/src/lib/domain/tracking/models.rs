use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

/// An open position. Status is stored and round-tripped, never enforced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub department: Option<String>,
    pub employment_type: EmploymentType,
    pub location: Option<String>,
    pub salary_range: Option<String>,
    pub status: JobStatus,
    /// Principal that created the posting.
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EmploymentType {
    FullTime,
    PartTime,
    Internship,
    Contract,
}

impl EmploymentType {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "FULL_TIME" => Some(Self::FullTime),
            "PART_TIME" => Some(Self::PartTime),
            "INTERNSHIP" => Some(Self::Internship),
            "CONTRACT" => Some(Self::Contract),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FullTime => "FULL_TIME",
            Self::PartTime => "PART_TIME",
            Self::Internship => "INTERNSHIP",
            Self::Contract => "CONTRACT",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobStatus {
    Open,
    Closed,
    Draft,
}

impl JobStatus {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "OPEN" => Some(Self::Open),
            "CLOSED" => Some(Self::Closed),
            "DRAFT" => Some(Self::Draft),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "OPEN",
            Self::Closed => "CLOSED",
            Self::Draft => "DRAFT",
        }
    }
}

/// A person in the pipeline, independent of any specific application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: Option<String>,
    pub resume_url: Option<String>,
    pub linkedin_url: Option<String>,
    pub experience_level: ExperienceLevel,
    pub location: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExperienceLevel {
    Junior,
    Mid,
    Senior,
}

impl ExperienceLevel {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "JUNIOR" => Some(Self::Junior),
            "MID" => Some(Self::Mid),
            "SENIOR" => Some(Self::Senior),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Junior => "JUNIOR",
            Self::Mid => "MID",
            Self::Senior => "SENIOR",
        }
    }
}

/// A candidate's application to a job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub id: Uuid,
    pub job_id: Uuid,
    pub candidate_id: Uuid,
    pub status: ApplicationStatus,
    pub applied_at: DateTime<Utc>,
    pub source: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApplicationStatus {
    Applied,
    InReview,
    Interviewing,
    Rejected,
    Hired,
}

impl ApplicationStatus {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "APPLIED" => Some(Self::Applied),
            "IN_REVIEW" => Some(Self::InReview),
            "INTERVIEWING" => Some(Self::Interviewing),
            "REJECTED" => Some(Self::Rejected),
            "HIRED" => Some(Self::Hired),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Applied => "APPLIED",
            Self::InReview => "IN_REVIEW",
            Self::Interviewing => "INTERVIEWING",
            Self::Rejected => "REJECTED",
            Self::Hired => "HIRED",
        }
    }
}

/// A scheduled or completed interview for an application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Interview {
    pub id: Uuid,
    pub application_id: Uuid,
    /// Principal conducting the interview.
    pub interviewer_id: Uuid,
    pub interview_date: DateTime<Utc>,
    pub interview_type: InterviewType,
    pub feedback: Option<String>,
    pub rating: Option<i32>,
    pub outcome: InterviewOutcome,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InterviewType {
    Technical,
    Hr,
    Final,
}

impl InterviewType {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "TECHNICAL" => Some(Self::Technical),
            "HR" => Some(Self::Hr),
            "FINAL" => Some(Self::Final),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Technical => "TECHNICAL",
            Self::Hr => "HR",
            Self::Final => "FINAL",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InterviewOutcome {
    Passed,
    Failed,
    Pending,
}

impl InterviewOutcome {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "PASSED" => Some(Self::Passed),
            "FAILED" => Some(Self::Failed),
            "PENDING" => Some(Self::Pending),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Passed => "PASSED",
            Self::Failed => "FAILED",
            Self::Pending => "PENDING",
        }
    }
}
