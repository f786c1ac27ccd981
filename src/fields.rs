//! Static field layouts for the two view modes.
//!
//! Each mode lists the header fields and body sections it shows, together
//! with the column-name synonyms that may supply them across export versions.

use serde::Serialize;
use std::fmt;

/// Tone of the message shown when a section has no value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Info,
    Success,
    Warning,
}

/// How much horizontal space a section takes on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    Full,
    Half,
}

/// Message shown in place of a section body when its field is `MISSING`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Fallback {
    pub tone: Tone,
    pub message: &'static str,
}

/// A named output section and the columns that may supply it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub key: &'static str,
    pub icon: &'static str,
    pub title: &'static str,
    pub synonyms: &'static [&'static str],
    pub fallback: Fallback,
    pub layout: Layout,
}

/// Everything one view mode needs to render a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewSpec {
    pub identity: &'static [&'static str],
    pub group: &'static [&'static str],
    pub timestamp: &'static [&'static str],
    pub sections: &'static [FieldSpec],
}

const IDENTITY: &[&str] = &["User full name", "Full name", "Name"];
const GROUP: &[&str] = &["Groups", "Group"];
const TIMESTAMP: &[&str] = &["Date", "Timestamp"];

pub static STANDUP: ViewSpec = ViewSpec {
    identity: IDENTITY,
    group: GROUP,
    timestamp: TIMESTAMP,
    sections: &[
        FieldSpec {
            key: "achievements",
            icon: "🎉",
            title: "Achievements",
            synonyms: &[
                "What have you achieved since the last stand up?",
                "Achievements",
            ],
            fallback: Fallback {
                tone: Tone::Info,
                message: "No achievements recorded",
            },
            layout: Layout::Full,
        },
        FieldSpec {
            key: "blockers",
            icon: "🚧",
            title: "Current Blockers",
            synonyms: &[
                "What blockers are you currently encountering?",
                "Blockers",
                "Current blockers",
            ],
            fallback: Fallback {
                tone: Tone::Success,
                message: "No blockers",
            },
            layout: Layout::Full,
        },
        FieldSpec {
            key: "priorities",
            icon: "🎯",
            title: "Priorities",
            synonyms: &[
                "What are your priorities youll contribute to until the next stand up?",
                "What are your priorities you'll contribute to until the next stand up?",
                "Priorities",
                "Next priorities",
            ],
            fallback: Fallback {
                tone: Tone::Warning,
                message: "No priorities set",
            },
            layout: Layout::Full,
        },
        FieldSpec {
            key: "progress",
            icon: "📈",
            title: "Progress",
            synonyms: &[
                "Since the last stand up, Ive made progress relating to my project/curriculum?",
                "Since the last stand up, I've made progress relating to my project/curriculum?",
                "Progress",
            ],
            fallback: Fallback {
                tone: Tone::Info,
                message: "No progress update",
            },
            layout: Layout::Half,
        },
        FieldSpec {
            key: "shoutouts",
            icon: "👏",
            title: "Shoutouts",
            synonyms: &["Shoutouts", "Shout-outs"],
            fallback: Fallback {
                tone: Tone::Info,
                message: "No shoutouts",
            },
            layout: Layout::Half,
        },
    ],
};

pub static RETROSPECTIVE: ViewSpec = ViewSpec {
    identity: IDENTITY,
    group: GROUP,
    timestamp: TIMESTAMP,
    sections: &[
        FieldSpec {
            key: "achievements",
            icon: "🏆",
            title: "What did you achieve this week?",
            synonyms: &["What did you achieve this week?", "Achievements"],
            fallback: Fallback {
                tone: Tone::Info,
                message: "No achievements recorded",
            },
            layout: Layout::Full,
        },
        FieldSpec {
            key: "went_well",
            icon: "✅",
            title: "What went well this week?",
            synonyms: &[
                "What went well this week past week?",
                "What went well this week?",
                "Went well",
            ],
            fallback: Fallback {
                tone: Tone::Info,
                message: "No highlights recorded",
            },
            layout: Layout::Full,
        },
        FieldSpec {
            key: "could_improve",
            icon: "🔄",
            title: "What could've gone better?",
            synonyms: &[
                "What could've gone better this past week?",
                "What could have gone better?",
                "Improvements",
            ],
            fallback: Fallback {
                tone: Tone::Success,
                message: "Everything went smoothly!",
            },
            layout: Layout::Full,
        },
        FieldSpec {
            key: "learning",
            icon: "📚",
            title: "What have you learned?",
            synonyms: &["What have you learned this week?", "Learning", "Learnings"],
            fallback: Fallback {
                tone: Tone::Info,
                message: "No learning notes",
            },
            layout: Layout::Half,
        },
        FieldSpec {
            key: "puzzles",
            icon: "🤔",
            title: "What still puzzles you?",
            synonyms: &["What still puzzles you?", "Puzzles", "Questions"],
            fallback: Fallback {
                tone: Tone::Success,
                message: "No puzzles - all clear!",
            },
            layout: Layout::Half,
        },
    ],
};

/// The two independent viewers offered by the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    Standup,
    Retrospective,
}

impl ViewMode {
    pub const ALL: [ViewMode; 2] = [ViewMode::Standup, ViewMode::Retrospective];

    pub fn spec(self) -> &'static ViewSpec {
        match self {
            ViewMode::Standup => &STANDUP,
            ViewMode::Retrospective => &RETROSPECTIVE,
        }
    }

    /// URL path segment for this mode.
    pub fn slug(self) -> &'static str {
        match self {
            ViewMode::Standup => "standup",
            ViewMode::Retrospective => "retrospectives",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        ViewMode::ALL.into_iter().find(|mode| mode.slug() == slug)
    }

    /// Label used in the mode switcher.
    pub fn label(self) -> &'static str {
        match self {
            ViewMode::Standup => "Standup Notes",
            ViewMode::Retrospective => "Retrospectives",
        }
    }

    pub fn page_title(self) -> &'static str {
        match self {
            ViewMode::Standup => "Fellow Standup Notes Viewer",
            ViewMode::Retrospective => "Fellow Retrospectives Viewer",
        }
    }

    pub fn upload_label(self) -> &'static str {
        match self {
            ViewMode::Standup => "Upload your standup notes CSV file",
            ViewMode::Retrospective => "Upload your retrospectives CSV file",
        }
    }

    /// Message shown before any file has been uploaded.
    pub fn upload_prompt(self) -> &'static str {
        match self {
            ViewMode::Standup => "Please upload a CSV file to begin.",
            ViewMode::Retrospective => "Please upload a retrospectives CSV file to begin.",
        }
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugs_round_trip() {
        for mode in ViewMode::ALL {
            assert_eq!(ViewMode::from_slug(mode.slug()), Some(mode));
        }
        assert_eq!(ViewMode::from_slug("standups"), None);
    }

    #[test]
    fn section_keys_are_unique_per_mode() {
        for mode in ViewMode::ALL {
            let sections = mode.spec().sections;
            for (i, a) in sections.iter().enumerate() {
                assert!(!a.synonyms.is_empty(), "{} has no synonyms", a.key);
                for b in &sections[i + 1..] {
                    assert_ne!(a.key, b.key);
                }
            }
        }
    }

    #[test]
    fn fallback_tones_match_section_meaning() {
        let blockers = STANDUP.sections.iter().find(|s| s.key == "blockers").unwrap();
        assert_eq!(blockers.fallback.tone, Tone::Success);
        assert_eq!(blockers.fallback.message, "No blockers");

        let priorities = STANDUP.sections.iter().find(|s| s.key == "priorities").unwrap();
        assert_eq!(priorities.fallback.tone, Tone::Warning);

        let puzzles = RETROSPECTIVE.sections.iter().find(|s| s.key == "puzzles").unwrap();
        assert_eq!(puzzles.fallback.tone, Tone::Success);
    }

    #[test]
    fn apostrophe_variants_are_both_accepted() {
        let priorities = STANDUP.sections[2].synonyms;
        assert!(priorities.iter().any(|s| s.contains("youll")));
        assert!(priorities.iter().any(|s| s.contains("you'll")));
    }
}
