use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use std::collections::BTreeSet;
use thiserror::Error;

/// Format accepted by the `date` query parameter
pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterError {
    #[error("`{param}` must be a comma-separated list of integer ids, got `{value}`")]
    InvalidIdList { param: &'static str, value: String },
    #[error("`{param}` must be an integer id, got `{value}`")]
    InvalidId { param: &'static str, value: String },
    #[error("`date` must use the YYYY-MM-DD format, got `{0}`")]
    InvalidDate(String),
}

/// Restrictions applied to the movie list.
///
/// Kinds combine conjunctively; a movie matches an id set if it is linked to
/// any of the ids in it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MovieFilter {
    pub actors: Option<BTreeSet<i32>>,
    pub genres: Option<BTreeSet<i32>>,
    /// Case-insensitive substring of the title
    pub title: Option<String>,
}

impl MovieFilter {
    /// Builds a filter from raw query parameter values.
    /// Absent or empty values leave the corresponding kind unrestricted.
    pub fn parse(
        actors: Option<&str>,
        genres: Option<&str>,
        title: Option<&str>,
    ) -> Result<Self, FilterError> {
        Ok(Self {
            actors: parse_id_list("actors", actors)?,
            genres: parse_id_list("genres", genres)?,
            title: title
                .filter(|title| !title.is_empty())
                .map(str::to_string),
        })
    }

    pub fn is_empty(&self) -> bool {
        self.actors.is_none() && self.genres.is_none() && self.title.is_none()
    }
}

/// Restrictions applied to the movie session list
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionFilter {
    pub movie: Option<i32>,
    pub date: Option<NaiveDate>,
}

impl SessionFilter {
    pub fn parse(movie: Option<&str>, date: Option<&str>) -> Result<Self, FilterError> {
        let movie = match movie.map(str::trim).filter(|m| !m.is_empty()) {
            Some(raw) => Some(raw.parse().map_err(|_| FilterError::InvalidId {
                param: "movie",
                value: raw.to_string(),
            })?),
            None => None,
        };

        let date = match date.map(str::trim).filter(|d| !d.is_empty()) {
            Some(raw) => Some(
                NaiveDate::parse_from_str(raw, DATE_FORMAT)
                    .map_err(|_| FilterError::InvalidDate(raw.to_string()))?,
            ),
            None => None,
        };

        Ok(Self { movie, date })
    }

    /// Half-open `[start, end)` range of show times covered by `date`
    pub fn show_time_range(&self) -> Option<(NaiveDateTime, NaiveDateTime)> {
        let date = self.date?;
        let start = date.and_time(NaiveTime::MIN);
        let end = date.succ_opt()?.and_time(NaiveTime::MIN);
        Some((start, end))
    }
}

/// Parses `1,2,3` into a set of ids
pub fn parse_id_list(
    param: &'static str,
    raw: Option<&str>,
) -> Result<Option<BTreeSet<i32>>, FilterError> {
    let Some(raw) = raw.filter(|raw| !raw.is_empty()) else {
        return Ok(None);
    };

    raw.split(',')
        .map(|id| id.trim().parse::<i32>())
        .collect::<Result<BTreeSet<_>, _>>()
        .map(Some)
        .map_err(|_| FilterError::InvalidIdList {
            param,
            value: raw.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id_list() {
        let ids = parse_id_list("actors", Some("3, 1,3")).unwrap().unwrap();
        assert_eq!(ids.into_iter().collect::<Vec<_>>(), vec![1, 3]);

        assert_eq!(parse_id_list("actors", None).unwrap(), None);
        assert_eq!(parse_id_list("actors", Some("")).unwrap(), None);
    }

    #[test]
    fn test_parse_id_list_rejects_garbage() {
        assert!(matches!(
            parse_id_list("genres", Some("1,x")),
            Err(FilterError::InvalidIdList { param: "genres", .. })
        ));
        assert!(parse_id_list("genres", Some("1,,2")).is_err());
    }

    #[test]
    fn test_movie_filter_parse() {
        let filter = MovieFilter::parse(Some("1,2"), None, Some("Matrix")).unwrap();
        assert_eq!(filter.actors, Some(BTreeSet::from([1, 2])));
        assert_eq!(filter.genres, None);
        assert_eq!(filter.title.as_deref(), Some("Matrix"));

        assert!(MovieFilter::parse(None, Some(""), Some("")).unwrap().is_empty());
    }

    #[test]
    fn test_session_filter_parse() {
        let filter = SessionFilter::parse(Some("4"), Some("2024-03-15")).unwrap();
        assert_eq!(filter.movie, Some(4));
        assert_eq!(filter.date, NaiveDate::from_ymd_opt(2024, 3, 15));

        assert!(matches!(
            SessionFilter::parse(None, Some("15.03.2024")),
            Err(FilterError::InvalidDate(_))
        ));
        assert!(matches!(
            SessionFilter::parse(Some("four"), None),
            Err(FilterError::InvalidId { param: "movie", .. })
        ));
    }

    #[test]
    fn test_show_time_range_spans_whole_day() {
        let filter = SessionFilter::parse(None, Some("2024-02-29")).unwrap();
        let (start, end) = filter.show_time_range().unwrap();

        assert_eq!(start.to_string(), "2024-02-29 00:00:00");
        assert_eq!(end.to_string(), "2024-03-01 00:00:00");
        assert!(SessionFilter::default().show_time_range().is_none());
    }
}
