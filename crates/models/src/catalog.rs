use crate::ValidationError;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

fn require_text(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new(field, "may not be blank"));
    }
    Ok(())
}

fn require_positive(field: &'static str, value: i32) -> Result<(), ValidationError> {
    if value <= 0 {
        return Err(ValidationError::new(
            field,
            format!("must be a positive integer, got {value}"),
        ));
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenreInput {
    pub name: String,
}

impl GenreInput {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("name", &self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActorInput {
    pub name: String,
}

impl ActorInput {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("name", &self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CinemaHallInput {
    pub name: String,
    pub rows: i32,
    pub seats_in_row: i32,
}

impl CinemaHallInput {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("name", &self.name)?;
        require_positive("rows", self.rows)?;
        require_positive("seats_in_row", self.seats_in_row)
    }
}

/// Seat grid of a cinema hall
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HallLayout {
    pub rows: i32,
    pub seats_in_row: i32,
}

impl HallLayout {
    pub fn capacity(&self) -> i64 {
        i64::from(self.rows) * i64::from(self.seats_in_row)
    }

    /// Rows and seats are numbered from 1
    pub fn contains(&self, row: i32, seat: i32) -> bool {
        (1..=self.rows).contains(&row) && (1..=self.seats_in_row).contains(&seat)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieInput {
    pub title: String,
    pub description: String,
    /// Running time in minutes
    pub duration: i32,
    pub genres: BTreeSet<i32>,
    pub actors: BTreeSet<i32>,
}

impl MovieInput {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("title", &self.title)?;
        require_positive("duration", self.duration)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieSessionInput {
    pub show_time: NaiveDateTime,
    pub movie: i32,
    pub cinema_hall: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cinema_hall_validation() {
        let mut hall = CinemaHallInput {
            name: "Blue".to_string(),
            rows: 10,
            seats_in_row: 15,
        };
        assert!(hall.validate().is_ok());

        hall.seats_in_row = 0;
        assert_eq!(hall.validate().unwrap_err().field, "seats_in_row");

        hall.name = "  ".to_string();
        assert_eq!(hall.validate().unwrap_err().field, "name");
    }

    #[test]
    fn test_hall_layout() {
        let layout = HallLayout {
            rows: 10,
            seats_in_row: 15,
        };
        assert_eq!(layout.capacity(), 150);
        assert!(layout.contains(1, 1));
        assert!(layout.contains(10, 15));
        assert!(!layout.contains(0, 3));
        assert!(!layout.contains(11, 3));
        assert!(!layout.contains(3, 16));
    }

    #[test]
    fn test_movie_validation() {
        let movie = MovieInput {
            title: "The Matrix".to_string(),
            description: String::new(),
            duration: 0,
            genres: BTreeSet::new(),
            actors: BTreeSet::new(),
        };
        assert_eq!(movie.validate().unwrap_err().field, "duration");
    }
}
