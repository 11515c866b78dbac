//! Fallback content — deterministic output used when generation or extraction fails.
//!
//! Job titles are classified by case-insensitive substring match. Categories are
//! checked in declaration order and the first match wins, so "Data Manager" is
//! `Data` and "Lead Software Engineer" is `Software`.

/// Keyword category a job title falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkillCategory {
    Software,
    Design,
    Data,
    Management,
    Generic,
}

/// Classification precedence. `Generic` is the implicit last entry.
const CATEGORY_KEYWORDS: &[(SkillCategory, &[&str])] = &[
    (
        SkillCategory::Software,
        &["software", "developer", "engineer", "programming", "coder"],
    ),
    (
        SkillCategory::Design,
        &["design", "designer", "ui", "ux", "graphic"],
    ),
    (
        SkillCategory::Data,
        &["data", "analyst", "scientist", "analytics"],
    ),
    (
        SkillCategory::Management,
        &["manager", "management", "director", "lead"],
    ),
];

const SOFTWARE_SKILLS: [&str; 10] = [
    "Problem Solving",
    "JavaScript",
    "Python",
    "SQL",
    "Git",
    "Communication",
    "Agile Methodologies",
    "APIs",
    "Testing",
    "Data Structures",
];

const DESIGN_SKILLS: [&str; 10] = [
    "Adobe Creative Suite",
    "UI/UX Design",
    "Typography",
    "Wireframing",
    "Visual Communication",
    "Color Theory",
    "Figma",
    "User Research",
    "Prototyping",
    "Branding",
];

const DATA_SKILLS: [&str; 10] = [
    "SQL",
    "Python",
    "Data Visualization",
    "Statistical Analysis",
    "Excel",
    "Machine Learning",
    "R",
    "Data Cleaning",
    "Critical Thinking",
    "Problem Solving",
];

const MANAGEMENT_SKILLS: [&str; 10] = [
    "Leadership",
    "Strategic Planning",
    "Team Management",
    "Communication",
    "Problem Solving",
    "Decision Making",
    "Time Management",
    "Project Management",
    "Negotiation",
    "Delegation",
];

/// `{job_title}` is replaced with the requested title.
const GENERIC_SKILLS: [&str; 10] = [
    "Communication",
    "Problem Solving",
    "Team Collaboration",
    "{job_title} expertise",
    "Time Management",
    "Project Management",
    "Analytical Thinking",
    "Adaptability",
    "Interpersonal Skills",
    "Leadership",
];

const FALLBACK_SUMMARY_TEMPLATE: &str = "I am an experienced {job_title} with a proven track record \
    of success and a passion for delivering results. My expertise lies in problem-solving, \
    collaboration, and driving business growth through innovative solutions.";

/// Classifies a job title into its fallback category.
pub fn classify(job_title: &str) -> SkillCategory {
    let lower = job_title.to_lowercase();
    CATEGORY_KEYWORDS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| lower.contains(*k)))
        .map(|(category, _)| *category)
        .unwrap_or(SkillCategory::Generic)
}

fn table(category: SkillCategory) -> &'static [&'static str; 10] {
    match category {
        SkillCategory::Software => &SOFTWARE_SKILLS,
        SkillCategory::Design => &DESIGN_SKILLS,
        SkillCategory::Data => &DATA_SKILLS,
        SkillCategory::Management => &MANAGEMENT_SKILLS,
        SkillCategory::Generic => &GENERIC_SKILLS,
    }
}

/// Returns the ten fallback skills for `job_title`, in their fixed order.
pub fn fallback_skills(job_title: &str) -> Vec<String> {
    table(classify(job_title))
        .iter()
        .map(|skill| skill.replace("{job_title}", job_title))
        .collect()
}

/// Returns the canned summary for `job_title`.
pub fn fallback_summary(job_title: &str) -> String {
    FALLBACK_SUMMARY_TEMPLATE.replace("{job_title}", job_title)
}
