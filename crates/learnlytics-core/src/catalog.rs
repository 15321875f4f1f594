//! Grade levels, their subject catalogs, and the static tutorial-link table.
//!
//! The catalog is fixed: the prediction service only knows the subjects
//! listed here, and the wizard refuses selections outside the chosen grade
//! level's pool.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Education tier that determines the selectable subject pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GradeLevel {
    MiddleSchool,
    HighSchool,
    University,
}

impl GradeLevel {
    /// All grade levels, in the order the wizard offers them.
    pub const ALL: [GradeLevel; 3] = [
        GradeLevel::MiddleSchool,
        GradeLevel::HighSchool,
        GradeLevel::University,
    ];

    /// Human-readable name.
    pub fn display_name(&self) -> &'static str {
        match self {
            GradeLevel::MiddleSchool => "Middle School",
            GradeLevel::HighSchool => "High School",
            GradeLevel::University => "University (CSE)",
        }
    }

    /// Short description shown next to the name.
    pub fn description(&self) -> &'static str {
        match self {
            GradeLevel::MiddleSchool => "Grades 6-8",
            GradeLevel::HighSchool => "Grades 9-12",
            GradeLevel::University => "Computer Science",
        }
    }

    /// The subjects the prediction service supports for this grade level.
    pub fn subjects(&self) -> &'static [&'static str] {
        match self {
            GradeLevel::MiddleSchool => {
                &["MS Math", "MS Science", "MS Social Studies", "MS English"]
            }
            GradeLevel::HighSchool => {
                &["HS Algebra II", "HS Chemistry", "HS History", "HS Literature"]
            }
            GradeLevel::University => {
                &["CSE Data Structures", "CSE Algorithms", "CSE Database Systems"]
            }
        }
    }

    /// Whether `subject` belongs to this grade level's catalog.
    pub fn offers(&self, subject: &str) -> bool {
        self.subjects().iter().any(|s| *s == subject)
    }
}

impl fmt::Display for GradeLevel {
    /// The wire identifier (`middle_school`, `high_school`, `university`).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GradeLevel::MiddleSchool => write!(f, "middle_school"),
            GradeLevel::HighSchool => write!(f, "high_school"),
            GradeLevel::University => write!(f, "university"),
        }
    }
}

impl FromStr for GradeLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "middle_school" | "middle" | "ms" => Ok(GradeLevel::MiddleSchool),
            "high_school" | "high" | "hs" => Ok(GradeLevel::HighSchool),
            "university" | "uni" | "cse" => Ok(GradeLevel::University),
            other => Err(format!("unknown grade level: {other}")),
        }
    }
}

/// A named link into an external tutorial catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TutorialLink {
    pub name: &'static str,
    pub url: &'static str,
}

/// General study-habit tutorials, independent of subject.
///
/// This is a read-only lookup rendered alongside service-provided resources;
/// it never goes over the wire.
pub const TUTORIAL_LINKS: &[TutorialLink] = &[
    TutorialLink {
        name: "Effective Study Techniques",
        url: "https://www.studyhacks.com/general-study-guide",
    },
    TutorialLink {
        name: "Mastering Academic Time Management",
        url: "https://www.notion.so/time-management-for-students",
    },
    TutorialLink {
        name: "Deep Focus and Concentration Methods",
        url: "https://www.calm.com/focus-techniques",
    },
    TutorialLink {
        name: "Tips for Boosting Class Participation",
        url: "https://www.edutopia.org/class-participation-guide",
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grade_display_and_parse() {
        assert_eq!(GradeLevel::MiddleSchool.to_string(), "middle_school");
        assert_eq!(GradeLevel::University.to_string(), "university");
        assert_eq!(
            "high_school".parse::<GradeLevel>().unwrap(),
            GradeLevel::HighSchool
        );
        assert_eq!("HS".parse::<GradeLevel>().unwrap(), GradeLevel::HighSchool);
        assert_eq!(
            "middle-school".parse::<GradeLevel>().unwrap(),
            GradeLevel::MiddleSchool
        );
        assert!("kindergarten".parse::<GradeLevel>().is_err());
    }

    #[test]
    fn catalogs_are_disjoint_pools() {
        assert!(GradeLevel::HighSchool.offers("HS Chemistry"));
        assert!(!GradeLevel::HighSchool.offers("MS Math"));
        assert!(!GradeLevel::MiddleSchool.offers("CSE Algorithms"));
        assert_eq!(GradeLevel::University.subjects().len(), 3);
    }

    #[test]
    fn grade_serde_uses_wire_ids() {
        let json = serde_json::to_string(&GradeLevel::HighSchool).unwrap();
        assert_eq!(json, "\"high_school\"");
        let parsed: GradeLevel = serde_json::from_str("\"middle_school\"").unwrap();
        assert_eq!(parsed, GradeLevel::MiddleSchool);
    }
}
