//! Grade and category types.
//!
//! This module defines the four ordinal grades, the five fixed evaluation
//! categories and the [`GradeSheet`] that holds one optional grade per
//! category.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::EvalError;

/// An ordinal grade awarded for a single category.
///
/// Point values are fixed and strictly decreasing from A to D.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Grade {
    /// 4.0 points.
    A,
    /// 3.0 points.
    B,
    /// 2.0 points.
    C,
    /// 1.0 points.
    D,
}

impl Grade {
    /// All grades from best to worst.
    pub const ALL: [Grade; 4] = [Grade::A, Grade::B, Grade::C, Grade::D];

    /// Returns the fixed point value for this grade.
    ///
    /// # Examples
    ///
    /// ```
    /// use plexus_evaluations::models::Grade;
    /// use rust_decimal::Decimal;
    ///
    /// assert_eq!(Grade::A.points(), Decimal::new(40, 1));
    /// assert_eq!(Grade::D.points(), Decimal::new(10, 1));
    /// ```
    pub fn points(self) -> Decimal {
        match self {
            Grade::A => Decimal::new(40, 1),
            Grade::B => Decimal::new(30, 1),
            Grade::C => Decimal::new(20, 1),
            Grade::D => Decimal::new(10, 1),
        }
    }

    /// Returns the grade letter.
    pub fn as_str(self) -> &'static str {
        match self {
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::D => "D",
        }
    }

    /// Parses a grade letter, case-insensitively. Empty or unknown input yields `None`.
    pub fn parse(value: &str) -> Option<Grade> {
        match value.trim().to_ascii_uppercase().as_str() {
            "A" => Some(Grade::A),
            "B" => Some(Grade::B),
            "C" => Some(Grade::C),
            "D" => Some(Grade::D),
            _ => None,
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One of the five fixed evaluation dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Quality of work.
    Work,
    /// Speed of delivery.
    Speed,
    /// Leave discipline.
    Leave,
    /// Punctuality.
    Time,
    /// Conduct at work.
    Behaviour,
}

impl Category {
    /// All categories in display order.
    pub const ALL: [Category; 5] = [
        Category::Work,
        Category::Speed,
        Category::Leave,
        Category::Time,
        Category::Behaviour,
    ];

    /// Returns the wire name of the category.
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Work => "work",
            Category::Speed => "speed",
            Category::Leave => "leave",
            Category::Time => "time",
            Category::Behaviour => "behaviour",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = EvalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| EvalError::UnknownCategory {
                name: s.to_string(),
            })
    }
}

/// One optional grade per category.
///
/// Ungraded categories serialize as an empty string, the way the backend
/// stores a blank selection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradeSheet {
    /// Quality of work.
    #[serde(default, with = "grade_or_empty")]
    pub work: Option<Grade>,
    /// Speed of delivery.
    #[serde(default, with = "grade_or_empty")]
    pub speed: Option<Grade>,
    /// Leave discipline.
    #[serde(default, with = "grade_or_empty")]
    pub leave: Option<Grade>,
    /// Punctuality.
    #[serde(default, with = "grade_or_empty")]
    pub time: Option<Grade>,
    /// Conduct at work.
    #[serde(default, with = "grade_or_empty")]
    pub behaviour: Option<Grade>,
}

impl GradeSheet {
    /// Returns the grade recorded for a category.
    pub fn get(&self, category: Category) -> Option<Grade> {
        match category {
            Category::Work => self.work,
            Category::Speed => self.speed,
            Category::Leave => self.leave,
            Category::Time => self.time,
            Category::Behaviour => self.behaviour,
        }
    }

    /// Records (or clears, with `None`) the grade for a category.
    pub fn set(&mut self, category: Category, grade: Option<Grade>) {
        let slot = match category {
            Category::Work => &mut self.work,
            Category::Speed => &mut self.speed,
            Category::Leave => &mut self.leave,
            Category::Time => &mut self.time,
            Category::Behaviour => &mut self.behaviour,
        };
        *slot = grade;
    }

    /// Iterates over the grades that have been set, in category order.
    pub fn provided(&self) -> impl Iterator<Item = Grade> + '_ {
        Category::ALL.into_iter().filter_map(|c| self.get(c))
    }

    /// Returns true if no category has been graded.
    pub fn is_empty(&self) -> bool {
        self.provided().next().is_none()
    }
}

mod grade_or_empty {
    use super::*;

    pub fn serialize<S: Serializer>(grade: &Option<Grade>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(grade.map(Grade::as_str).unwrap_or(""))
    }

    /// Anything that is not a grade letter reads as ungraded.
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Grade>, D::Error> {
        let raw = serde_json::Value::deserialize(deserializer)?;
        Ok(raw.as_str().and_then(Grade::parse))
    }
}
