use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceEntry {
    pub name: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcedureEntry {
    pub name: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DoctorEntry {
    pub name: String,
    pub designation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qualifications: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub experience_years: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Faq {
    pub question: String,
    pub answer: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    pub title: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Testimonial {
    pub author: String,
    pub quote: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<u8>,
}

/// Department page record. `slug` is filled from the catalog key on load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepartmentDefinition {
    #[serde(default)]
    pub slug: String,
    pub title: String,
    pub description: String,
    pub icon: String,
    #[serde(default)]
    pub services: Vec<ServiceEntry>,
    #[serde(default)]
    pub procedures: Vec<ProcedureEntry>,
    #[serde(default)]
    pub doctors: Vec<DoctorEntry>,
    #[serde(default)]
    pub faqs: Vec<Faq>,
    // None means "use the catalog's shared defaults"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub features: Option<Vec<Feature>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub testimonials: Option<Vec<Testimonial>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentSection {
    pub heading: String,
    pub body: String,
}

/// Hand-authored content for a dedicated department page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RichDepartmentDefinition {
    #[serde(flatten)]
    pub department: DepartmentDefinition,
    pub tagline: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hero_image: Option<String>,
    #[serde(default)]
    pub highlights: Vec<String>,
    #[serde(default)]
    pub sections: Vec<ContentSection>,
}
