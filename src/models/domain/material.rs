use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::storage::StoredFile;

/// The five subjects the academy tutors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Subject {
    Mathematics,
    PhysicalSciences,
    LifeSciences,
    English,
    Accounting,
}

impl FromStr for Subject {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mathematics" => Ok(Subject::Mathematics),
            "physical_sciences" => Ok(Subject::PhysicalSciences),
            "life_sciences" => Ok(Subject::LifeSciences),
            "english" => Ok(Subject::English),
            "accounting" => Ok(Subject::Accounting),
            other => Err(AppError::ValidationError(format!(
                "Unknown subject '{}'. Expected one of: mathematics, physical_sciences, life_sciences, english, accounting",
                other
            ))),
        }
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Subject::Mathematics => "mathematics",
            Subject::PhysicalSciences => "physical_sciences",
            Subject::LifeSciences => "life_sciences",
            Subject::English => "english",
            Subject::Accounting => "accounting",
        };
        f.write_str(s)
    }
}

/// School grades 8 through 12, serialized as the bare digit strings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub enum GradeLevel {
    #[serde(rename = "8")]
    Grade8,
    #[serde(rename = "9")]
    Grade9,
    #[serde(rename = "10")]
    Grade10,
    #[serde(rename = "11")]
    Grade11,
    #[serde(rename = "12")]
    Grade12,
}

impl FromStr for GradeLevel {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "8" => Ok(GradeLevel::Grade8),
            "9" => Ok(GradeLevel::Grade9),
            "10" => Ok(GradeLevel::Grade10),
            "11" => Ok(GradeLevel::Grade11),
            "12" => Ok(GradeLevel::Grade12),
            other => Err(AppError::ValidationError(format!(
                "Unknown grade '{}'. Expected 8 through 12",
                other
            ))),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Material {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub file_name: String,
    pub file_path: String,
    pub file_size: i64,
    pub file_type: String,
    pub subject: Subject,
    pub grade: GradeLevel,
    pub uploaded_by: String,
    pub created_at: DateTime<Utc>,
}

impl Material {
    pub fn new(
        title: &str,
        description: Option<String>,
        subject: Subject,
        grade: GradeLevel,
        stored: &StoredFile,
        uploaded_by: &str,
    ) -> Self {
        Material {
            id: Uuid::new_v4().to_string(),
            title: title.to_string(),
            description,
            file_name: stored.file_name.clone(),
            file_path: stored.storage_path.clone(),
            file_size: stored.size,
            file_type: stored.mime_type.clone(),
            subject,
            grade,
            uploaded_by: uploaded_by.to_string(),
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subject_from_str() {
        assert_eq!(
            "physical_sciences".parse::<Subject>().unwrap(),
            Subject::PhysicalSciences
        );
        assert!("astrology".parse::<Subject>().is_err());
    }

    #[test]
    fn test_grade_level_from_str() {
        assert_eq!("12".parse::<GradeLevel>().unwrap(), GradeLevel::Grade12);
        assert!("7".parse::<GradeLevel>().is_err());
    }

    #[test]
    fn test_grade_level_serialization() {
        assert_eq!(
            serde_json::to_string(&GradeLevel::Grade10).unwrap(),
            "\"10\""
        );
    }
}
