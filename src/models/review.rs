//! Post-appointment reviews. Stored unmoderated.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{required, ValidationError};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewReview {
    pub appointment_id: Option<String>,
    pub rating: Option<f64>,
    pub comment: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: String,
    pub appointment_id: String,
    pub rating: u8,
    pub comment: String,
    pub created_at: DateTime<Utc>,
}

impl NewReview {
    pub fn into_review(self, id: String, now: DateTime<Utc>) -> Result<Review, ValidationError> {
        let appointment_id = required(self.appointment_id, "appointmentId")?;
        let rating = self
            .rating
            .ok_or_else(|| ValidationError::new("Missing required field: rating"))?;
        if rating.fract() != 0.0 || !(1.0..=5.0).contains(&rating) {
            return Err(ValidationError::new("Rating must be a whole number from 1 to 5"));
        }

        Ok(Review {
            id,
            appointment_id,
            rating: rating as u8,
            comment: self.comment.unwrap_or_default().trim().to_string(),
            created_at: now,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn review(rating: Option<f64>) -> NewReview {
        NewReview {
            appointment_id: Some("apt_1".into()),
            rating,
            comment: Some(" Great nurse ".into()),
        }
    }

    #[test]
    fn accepts_valid_rating() {
        let r = review(Some(5.0)).into_review("rev_1".into(), Utc::now()).unwrap();
        assert_eq!(r.rating, 5);
        assert_eq!(r.comment, "Great nurse");
    }

    #[test]
    fn rejects_out_of_range_or_fractional() {
        for bad in [0.0, 6.0, 3.5, f64::NAN] {
            assert!(review(Some(bad)).into_review("rev_1".into(), Utc::now()).is_err());
        }
        assert!(review(None).into_review("rev_1".into(), Utc::now()).is_err());
    }
}
