use serde::{Deserialize, Serialize};

/// Departments with a dedicated, hand-built page. A slug matching one of these
/// always wins over the generic department table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RichDepartment {
    Cardiology,
    Oncology,
    Orthopedics,
    Urology,
}

impl RichDepartment {
    pub const ALL: [RichDepartment; 4] = [
        RichDepartment::Cardiology,
        RichDepartment::Oncology,
        RichDepartment::Orthopedics,
        RichDepartment::Urology,
    ];

    pub fn slug(&self) -> &'static str {
        match self {
            RichDepartment::Cardiology => "cardiology",
            RichDepartment::Oncology => "oncology",
            RichDepartment::Orthopedics => "orthopedics",
            RichDepartment::Urology => "urology",
        }
    }

    /// Expects a normalized (lowercase) slug.
    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|page| page.slug() == slug)
    }

    pub(crate) fn index(&self) -> usize {
        *self as usize
    }
}

impl std::fmt::Display for RichDepartment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.slug())
    }
}
