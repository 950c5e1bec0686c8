// src/infrastructure/repositories/error.rs
use crate::domain::errors::DomainError;

const CNT_SLUG_GROUP_SEQUENCE: &str = "slugs_group_sequence_key";
const CNT_SLUG_NAME_NOT_BLANK: &str = "slugs_name_not_blank_chk";
const CNT_SLUG_SEQUENCE_POSITIVE: &str = "slugs_sequence_positive_chk";

pub fn map_sqlx(err: sqlx::Error) -> DomainError {
    match &err {
        sqlx::Error::Database(db_err) => {
            if let Some(constraint) = db_err.constraint() {
                return match constraint {
                    CNT_SLUG_GROUP_SEQUENCE => {
                        DomainError::Conflict("slug sequence already taken".into())
                    }
                    CNT_SLUG_NAME_NOT_BLANK => DomainError::BlankName,
                    CNT_SLUG_SEQUENCE_POSITIVE => {
                        DomainError::Validation("slug sequence must be positive".into())
                    }
                    other => {
                        DomainError::Persistence(format!("database constraint violation: {other}"))
                    }
                };
            }

            if let Some(code) = db_err.code() {
                match code.as_ref() {
                    "23505" => {
                        return DomainError::Conflict("unique constraint violated".into());
                    }
                    "23514" => {
                        return DomainError::Validation("check constraint violated".into());
                    }
                    _ => {}
                }
            }

            DomainError::Persistence(db_err.message().to_string())
        }
        sqlx::Error::RowNotFound => DomainError::NotFound("slug not found".into()),
        _ => DomainError::Persistence(err.to_string()),
    }
}
