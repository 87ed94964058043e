//! Life domains and their static display metadata.
//!
//! # Responsibility
//! - Define the closed set of four life domains.
//! - Provide stable display names, colors and the predefined value catalog.
//!
//! # Invariants
//! - `Domain::ALL` order is the canonical display order for summaries.
//! - Serialized names match the stored display names exactly.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// One of the four fixed life categories a value belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Domain {
    #[serde(rename = "Work & Education")]
    WorkEducation,
    #[serde(rename = "Relationships")]
    Relationships,
    #[serde(rename = "Personal Growth & Health")]
    PersonalGrowthHealth,
    #[serde(rename = "Leisure")]
    Leisure,
}

/// Static presentation data for one domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DomainMetadata {
    /// Short label printed next to the chart quadrant.
    pub short_label: &'static str,
    /// Hex RGB color used for markers and summary badges.
    pub color: &'static str,
    pub description: &'static str,
    /// Suggested values offered before the user types a custom one.
    pub predefined_values: &'static [&'static str],
}

impl Domain {
    pub const ALL: [Domain; 4] = [
        Domain::WorkEducation,
        Domain::Relationships,
        Domain::PersonalGrowthHealth,
        Domain::Leisure,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::WorkEducation => "Work & Education",
            Self::Relationships => "Relationships",
            Self::PersonalGrowthHealth => "Personal Growth & Health",
            Self::Leisure => "Leisure",
        }
    }

    /// Parses a stored display name.
    pub fn from_name(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|domain| domain.name() == value)
    }

    /// Position of this domain in [`Domain::ALL`].
    pub fn index(self) -> usize {
        match self {
            Self::WorkEducation => 0,
            Self::Relationships => 1,
            Self::PersonalGrowthHealth => 2,
            Self::Leisure => 3,
        }
    }

    pub fn metadata(self) -> DomainMetadata {
        match self {
            Self::WorkEducation => DomainMetadata {
                short_label: "Work & Ed",
                color: "#002395",
                description: "Professional life, learning, and skill acquisition.",
                predefined_values: &[
                    "Service",
                    "Competence",
                    "Responsibility",
                    "Innovation",
                    "Leadership",
                    "Mastery",
                    "Work-Life Balance",
                    "Contribution",
                    "Mentorship",
                    "Creativity",
                    "Focus",
                    "Professionalism",
                ],
            },
            Self::Relationships => DomainMetadata {
                short_label: "Relationships",
                color: "#ED2939",
                description: "Connections with family, friends, and community.",
                predefined_values: &[
                    "Intimacy",
                    "Support",
                    "Honesty",
                    "Compassion",
                    "Loyalty",
                    "Boundaries",
                    "Vulnerability",
                    "Humor",
                    "Active Listening",
                    "Patience",
                    "Trust",
                    "Reliability",
                ],
            },
            Self::PersonalGrowthHealth => DomainMetadata {
                short_label: "Growth & Health",
                color: "#1a1a1a",
                description: "Mental and physical well-being, and soul searching.",
                predefined_values: &[
                    "Vitality",
                    "Mindfulness",
                    "Persistence",
                    "Self-Awareness",
                    "Fitness",
                    "Nutritional Health",
                    "Bravery",
                    "Knowledge",
                    "Resilience",
                    "Spirituality",
                    "Authenticity",
                    "Self-Care",
                ],
            },
            Self::Leisure => DomainMetadata {
                short_label: "Leisure",
                color: "#6b7280",
                description: "Recreation, artistic expression, and hobbies.",
                predefined_values: &[
                    "Creativity",
                    "Playfulness",
                    "Relaxation",
                    "Adventure",
                    "Curiosity",
                    "Connection with Nature",
                    "Skill Development",
                    "Spontaneity",
                    "Rest",
                    "Cultural Immersion",
                    "Aesthetics",
                    "Joy",
                ],
            },
        }
    }
}

impl Display for Domain {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
