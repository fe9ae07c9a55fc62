// The built-in catalog of supplier-selection criteria.

use outranking::Direction;

#[derive(PartialEq, Debug, Clone)]
pub struct CatalogEntry {
    pub code: &'static str,
    pub label: &'static str,
    pub description: &'static str,
    pub direction: Direction,
    /// Scored on the 1 to 5 scale.
    pub qualitative: bool,
}

impl CatalogEntry {
    /// The name used in the tables, for example "C1 - Cost".
    pub fn name(&self) -> String {
        format!("{} - {}", self.code, self.label)
    }
}

const fn entry(
    code: &'static str,
    label: &'static str,
    description: &'static str,
    direction: Direction,
    qualitative: bool,
) -> CatalogEntry {
    CatalogEntry {
        code,
        label,
        description,
        direction,
        qualitative,
    }
}

use Direction::{Maximize as Up, Minimize as Down};

pub static CATALOG: [CatalogEntry; 14] = [
    entry("C1", "Cost", "Monetary cost of the proposal.", Down, false),
    entry(
        "C2",
        "Quality",
        "Quality assessment against benchmark standards.",
        Up,
        true,
    ),
    entry("C3", "Delivery", "Delivery time in days.", Down, false),
    entry(
        "C4",
        "Technology",
        "Level of innovation and adoption of advanced technologies.",
        Up,
        true,
    ),
    entry(
        "C5",
        "Environmental Costs",
        "Annual amount invested in environmental management (waste treatment, emissions control, certifications).",
        Down,
        false,
    ),
    entry(
        "C6",
        "Green Design",
        "Integration of sustainable design in products, processes and packaging.",
        Up,
        true,
    ),
    entry(
        "C7",
        "Environmental Management",
        "Effectiveness of the environmental management system.",
        Up,
        true,
    ),
    entry(
        "C8",
        "Stakeholders Management",
        "Commitment to stakeholder rights and service.",
        Up,
        true,
    ),
    entry(
        "C9",
        "Occupational Health and Safety",
        "Total Recordable Incident Rate: recordable incidents x 200,000 / hours worked.",
        Down,
        false,
    ),
    entry(
        "C10",
        "Compliance with Labor Policies",
        "Adherence to labor laws, employee rights and non-discrimination standards.",
        Up,
        true,
    ),
    entry(
        "C11",
        "Social Management",
        "Structured social responsibility policies and community programs.",
        Up,
        true,
    ),
    entry(
        "C12",
        "Performance History",
        "Number of years of experience.",
        Up,
        false,
    ),
    entry(
        "C13",
        "Reputation",
        "Media analysis, reviews and recognitions.",
        Up,
        true,
    ),
    entry("C14", "Logistics", "Distance in kilometers.", Down, false),
];

/// The meaning of each level of the qualitative criteria, from 1 to 5.
pub static QUALITATIVE_SCALES: [(&str, [&str; 5]); 8] = [
    (
        "C2",
        [
            "Does not meet quality standards: frequent rework and negative feedback.",
            "Generally below standard, occasional issues and mostly negative feedback.",
            "Meets the minimum standard, occasional problems and mixed feedback.",
            "Meets or exceeds standards, positive feedback and few rejections.",
            "Consistently exceeds standards, highly positive feedback and minimal rejections.",
        ],
    ),
    (
        "C4",
        [
            "No current technology used, manual processes dominate.",
            "Low technology adoption, minimal process improvements.",
            "Moderate use of known technologies, standard efficiency.",
            "High adoption of technologies, promoting efficiency gains.",
            "Cutting-edge technologies and continuous innovation.",
        ],
    ),
    (
        "C6",
        [
            "No sustainable design principles applied.",
            "Minimal and occasional sustainable actions, no systematic approach.",
            "Some sustainable design initiatives, not applied consistently.",
            "Sustainable design in several key aspects, partial lifecycle assessment.",
            "Fully sustainability-oriented design with full lifecycle assessment.",
        ],
    ),
    (
        "C7",
        [
            "No structured environmental management system.",
            "Informal and ineffective system.",
            "Basic system implemented with limitations.",
            "Well-structured system in compliance with standards.",
            "Robust, certified system with continuous improvement.",
        ],
    ),
    (
        "C8",
        [
            "Ignores stakeholder interests.",
            "Reactively and minimally responsive.",
            "Minimal stakeholder engagement.",
            "Commitment to active engagement policies.",
            "Transparent, active and responsible stakeholder involvement.",
        ],
    ),
    (
        "C10",
        [
            "No formal labor policies, repeated violations in the last 3 years.",
            "Minimal or incomplete policies, minor violations.",
            "Basic policies covering essential rights, no serious violations.",
            "Comprehensive policies aligned with law, active diversity programs.",
            "Policies exceeding legal requirements, recognized certifications or awards.",
        ],
    ),
    (
        "C11",
        [
            "No social responsibility policies or initiatives.",
            "Limited or reactive initiatives with minimal documentation.",
            "Some structured social programs, inconsistent execution.",
            "Comprehensive policies with consistent community engagement.",
            "Strategic, certified and impactful programs in the corporate culture.",
        ],
    ),
    (
        "C13",
        [
            "Very negative or unknown reputation.",
            "Unfavorable or unstable market image.",
            "Acceptable reputation, no major highlights.",
            "Good reputation with consistent positive evaluations.",
            "Excellent reputation, widely recognized in the industry.",
        ],
    ),
];

impl CatalogEntry {
    /// The descriptions of the levels 1 to 5, for qualitative criteria.
    pub fn scale(&self) -> Option<&'static [&'static str; 5]> {
        QUALITATIVE_SCALES
            .iter()
            .find(|(code, _)| *code == self.code)
            .map(|(_, levels)| levels)
    }
}

/// Finds a catalog entry from a column name.
///
/// The full name ("C3 - Delivery"), the code ("C3") and the label
/// ("Delivery") are all recognized, ignoring case.
pub fn lookup(name: &str) -> Option<&'static CatalogEntry> {
    let n = name.trim().to_lowercase();
    CATALOG.iter().find(|e| {
        e.name().to_lowercase() == n || e.code.to_lowercase() == n || e.label.to_lowercase() == n
    })
}

pub fn print_catalog() {
    for e in CATALOG.iter() {
        let arrow = match e.direction {
            Direction::Maximize => "(max)",
            Direction::Minimize => "(min)",
        };
        let scale = if e.qualitative { " [1-5]" } else { "" };
        println!("{:<40} {}{}", e.name(), arrow, scale);
        println!("    {}", e.description);
        if let Some(levels) = e.scale() {
            for (idx, level) in levels.iter().enumerate() {
                println!("      {}: {}", idx + 1, level);
            }
        }
    }
}
