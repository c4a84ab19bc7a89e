//! Decision criteria and their preference directions.
//!
//! The criterion set and each criterion's direction are fixed by domain
//! knowledge; callers only choose how much each one matters.
//!
//! # Examples
//! ```
//! use destinate_core::{Criterion, Direction};
//!
//! assert_eq!(Criterion::Price.direction(), Direction::Cost);
//! assert_eq!(Criterion::RatingCount.to_string(), "rating_count");
//! ```

/// Whether lower or higher raw values are preferred for a criterion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum Direction {
    /// Higher raw values are better.
    Benefit,
    /// Lower raw values are better.
    Cost,
}

impl Direction {
    /// Return the direction as a lowercase `&str`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Benefit => "benefit",
            Self::Cost => "cost",
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A scored attribute of a candidate destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum Criterion {
    /// Entry price; cheaper is better.
    Price,
    /// Average review rating on a `0..=5` scale.
    Rating,
    /// Number of reviews behind the rating.
    RatingCount,
    /// Great-circle distance from the user in kilometres; closer is better.
    Distance,
}

impl Criterion {
    /// Every criterion in decision-matrix column order.
    pub const ALL: [Self; 4] = [Self::Price, Self::Rating, Self::RatingCount, Self::Distance];

    /// Preference direction for this criterion.
    ///
    /// # Examples
    /// ```
    /// use destinate_core::{Criterion, Direction};
    ///
    /// assert_eq!(Criterion::Rating.direction(), Direction::Benefit);
    /// assert_eq!(Criterion::Distance.direction(), Direction::Cost);
    /// ```
    #[must_use]
    pub const fn direction(self) -> Direction {
        match self {
            Self::Price | Self::Distance => Direction::Cost,
            Self::Rating | Self::RatingCount => Direction::Benefit,
        }
    }

    /// Return the criterion as a snake-case `&str`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Price => "price",
            Self::Rating => "rating",
            Self::RatingCount => "rating_count",
            Self::Distance => "distance",
        }
    }
}

impl std::fmt::Display for Criterion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Criterion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "price" => Ok(Self::Price),
            "rating" => Ok(Self::Rating),
            "rating_count" => Ok(Self::RatingCount),
            "distance" => Ok(Self::Distance),
            _ => Err(format!("unknown criterion '{s}'")),
        }
    }
}
